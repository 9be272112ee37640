use crate::blur::BlurKernel;
use crate::color::Palette;
use crate::composite;
use crate::core::Rgba8Premul;
use crate::error::NeonveilResult;
use crate::surface::Surface;

/// Edge length of the repeating tile, logical px.
pub const TILE_EDGE: f64 = 60.0;

const STROKE_WIDTH: f64 = 1.5;
const STROKE_ALPHA: f64 = 0.7;
/// Blur radius of the stroke halo, logical px.
const HALO_RADIUS: f64 = 7.0;

/// The repeating rosette tile: one stroked circle centered in the tile plus
/// six circles of the same radius at 60-degree increments around it, inked
/// in the primary color over a blurred halo of the same strokes. Generated
/// once per (dpr, palette) and repeated across the viewport, so the rosette
/// geometry never depends on viewport size.
pub struct PatternTile {
    surface: Surface,
}

impl PatternTile {
    #[tracing::instrument(skip(palette))]
    pub fn generate(dpr: f64, palette: &Palette) -> NeonveilResult<Self> {
        let edge = ((TILE_EDGE * dpr).round() as u32).max(1);
        let mut strokes = Surface::new(edge, edge)?;

        let ink = palette
            .primary
            .with_alpha(palette.primary.a * STROKE_ALPHA)
            .to_premul();
        let c = TILE_EDGE / 2.0 * dpr;
        let r = TILE_EDGE / 2.0 * 0.95 * dpr;
        let width = STROKE_WIDTH * dpr;

        stroke_circle(&mut strokes, c, c, r, width, ink);
        for i in 0..6 {
            let angle = std::f64::consts::TAU * f64::from(i) / 6.0;
            stroke_circle(
                &mut strokes,
                c + r * angle.cos(),
                c + r * angle.sin(),
                r,
                width,
                ink,
            );
        }

        // Soft halo beneath the crisp strokes (canvas shadowBlur equivalent).
        let halo = ((HALO_RADIUS * dpr).round() as u32).max(1);
        let kernel = BlurKernel::gaussian(halo, halo as f32 / 2.0)?;
        let mut tile = kernel.apply(&strokes)?;
        composite::over_in_place(&mut tile, &strokes, 1.0)?;

        Ok(Self { surface: tile })
    }

    pub fn edge(&self) -> u32 {
        self.surface.width()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Repeat the tile across `dst`, anchored at the origin. Replaces the
    /// destination contents rather than blending.
    pub fn fill_tiled(&self, dst: &mut Surface) {
        let e = self.surface.width() as usize;
        let tile = self.surface.data();
        let dw = dst.width() as usize;
        let dh = dst.height() as usize;
        let data = dst.data_mut();

        for y in 0..dh {
            let trow = (y % e) * e;
            let drow = y * dw;
            for x in 0..dw {
                let t = (trow + x % e) * 4;
                let d = (drow + x) * 4;
                data[d..d + 4].copy_from_slice(&tile[t..t + 4]);
            }
        }
    }
}

/// Antialiased circle outline. Coverage falls off linearly across a pixel at
/// the stroke boundary; geometry outside the surface is clipped, exactly as
/// a canvas pattern tile clips arcs at its edges.
fn stroke_circle(dst: &mut Surface, cx: f64, cy: f64, r: f64, width: f64, ink: Rgba8Premul) {
    let half = width / 2.0;
    let w = dst.width();
    let h = dst.height();

    let x0 = (cx - r - half - 1.0).floor().max(0.0) as u32;
    let y0 = (cy - r - half - 1.0).floor().max(0.0) as u32;
    let x1 = ((cx + r + half + 2.0).ceil() as u32).min(w);
    let y1 = ((cy + r + half + 2.0).ceil() as u32).min(h);

    let src = ink.to_array();
    let data = dst.data_mut();
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = (f64::from(x) + 0.5) - cx;
            let dy = (f64::from(y) + 0.5) - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let cov = (half + 0.5 - (dist - r).abs()).clamp(0.0, 1.0);
            if cov <= 0.0 {
                continue;
            }
            let i = ((y as usize) * (w as usize) + (x as usize)) * 4;
            let cur = [data[i], data[i + 1], data[i + 2], data[i + 3]];
            let out = composite::over_px(cur, src, (cov * 255.0).round() as u16);
            data[i..i + 4].copy_from_slice(&out);
        }
    }
}
