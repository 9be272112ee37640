use crate::error::{NeonveilError, NeonveilResult};
use crate::surface::Surface;

/// Separable Gaussian kernel in Q16 fixed point. Exact (to quantization)
/// and priced per tap, so it is reserved for small radii like the pattern
/// stroke halo; large decorative blurs go through [`approx_gaussian`].
pub struct BlurKernel {
    weights: Vec<u32>,
}

impl BlurKernel {
    pub fn gaussian(radius: u32, sigma: f32) -> NeonveilResult<Self> {
        if radius == 0 {
            return Ok(Self {
                weights: vec![1 << 16],
            });
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(NeonveilError::validation("blur sigma must be > 0"));
        }

        let r = radius as i32;
        let sigma = f64::from(sigma);
        let denom = 2.0 * sigma * sigma;
        let raw: Vec<f64> = (-r..=r)
            .map(|i| {
                let x = f64::from(i);
                (-x * x / denom).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        if sum <= 0.0 {
            return Err(NeonveilError::validation("gaussian kernel sum is zero"));
        }

        // Quantize to Q16 and push the rounding error into the center tap so
        // the weights sum to exactly one.
        let mut weights: Vec<u32> = raw
            .iter()
            .map(|&w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
            .collect();
        let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + (65536 - acc)).clamp(0, 65536) as u32;

        Ok(Self { weights })
    }

    pub fn radius(&self) -> u32 {
        (self.weights.len() / 2) as u32
    }

    pub fn apply(&self, src: &Surface) -> NeonveilResult<Surface> {
        let mut tmp = Surface::new(src.width(), src.height())?;
        let mut out = Surface::new(src.width(), src.height())?;
        let w = src.width() as i32;
        let h = src.height() as i32;
        kernel_pass(src.data(), tmp.data_mut(), w, h, &self.weights, true);
        kernel_pass(tmp.data(), out.data_mut(), w, h, &self.weights, false);
        Ok(out)
    }
}

fn kernel_pass(src: &[u8], dst: &mut [u8], width: i32, height: i32, k: &[u32], horizontal: bool) {
    let radius = (k.len() / 2) as i32;
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let o = ki as i32 - radius;
                let (sx, sy) = if horizontal {
                    ((x + o).clamp(0, width - 1), y)
                } else {
                    (x, (y + o).clamp(0, height - 1))
                };
                let idx = ((sy * width + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let idx = ((y * width + x) as usize) * 4;
            for c in 0..4 {
                dst[idx + c] = ((acc[c] + 32768) >> 16).min(255) as u8;
            }
        }
    }
}

/// One separable box-blur pass (clamp-to-edge), sliding-window so the cost
/// is independent of the radius.
pub fn box_blur(src: &Surface, radius: u32) -> NeonveilResult<Surface> {
    if radius == 0 {
        return Ok(src.clone());
    }
    let mut tmp = Surface::new(src.width(), src.height())?;
    let mut out = Surface::new(src.width(), src.height())?;
    let w = src.width() as usize;
    let h = src.height() as usize;
    let r = radius as usize;
    box_pass(src.data(), tmp.data_mut(), w, h, r, true);
    box_pass(tmp.data(), out.data_mut(), w, h, r, false);
    Ok(out)
}

/// Three iterated box blurs approximating a Gaussian of the given sigma,
/// per the classic `w = sqrt(12*sigma^2/n + 1)` window identity.
pub fn approx_gaussian(src: &Surface, sigma: f64) -> NeonveilResult<Surface> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(NeonveilError::validation(
            "blur sigma must be finite and >= 0",
        ));
    }
    let w_ideal = (12.0 * sigma * sigma / 3.0 + 1.0).sqrt();
    let radius = (((w_ideal - 1.0) / 2.0).round().max(0.0)) as u32;
    if radius == 0 {
        return Ok(src.clone());
    }
    let mut out = box_blur(src, radius)?;
    out = box_blur(&out, radius)?;
    box_blur(&out, radius)
}

fn box_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, r: usize, horizontal: bool) {
    let (lanes, lane_len, stride) = if horizontal {
        (height, width, 1usize)
    } else {
        (width, height, width)
    };
    let win = (2 * r + 1) as u32;

    let px = |lane_base: usize, i: usize| -> [u8; 4] {
        let o = (lane_base + i * stride) * 4;
        [src[o], src[o + 1], src[o + 2], src[o + 3]]
    };

    for lane in 0..lanes {
        let base = if horizontal { lane * width } else { lane };

        // Prime the window for index 0 with the clamped range [-r, r]; the
        // edge sample is counted r+1 times, matching clamp-to-edge.
        let first = px(base, 0);
        let mut sum = [0u32; 4];
        for c in 0..4 {
            sum[c] = u32::from(first[c]) * (r as u32 + 1);
        }
        for i in 1..=r {
            let p = px(base, i.min(lane_len - 1));
            for c in 0..4 {
                sum[c] += u32::from(p[c]);
            }
        }

        for i in 0..lane_len {
            let o = (base + i * stride) * 4;
            for c in 0..4 {
                dst[o + c] = (sum[c] / win) as u8;
            }

            let add = px(base, (i + r + 1).min(lane_len - 1));
            let sub = px(base, i.saturating_sub(r));
            for c in 0..4 {
                sum[c] = sum[c] + u32::from(add[c]) - u32::from(sub[c]);
            }
        }
    }
}
