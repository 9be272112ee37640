use crate::core::Rgba8Premul;
use crate::error::{NeonveilError, NeonveilResult};

/// An owned premultiplied-RGBA8 pixel buffer. Every buffer in the renderer
/// (frame, pattern, mask, sprites) is one of these.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> NeonveilResult<Self> {
        if width == 0 || height == 0 {
            return Err(NeonveilError::validation(
                "surface width/height must be > 0",
            ));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| NeonveilError::validation("surface size overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn clear(&mut self, px: Rgba8Premul) {
        if px == Rgba8Premul::TRANSPARENT {
            self.data.fill(0);
            return;
        }
        let px = px.to_array();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        debug_assert!(x < self.width && y < self.height);
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        }
    }

    /// Pack into 0xAARRGGBB words for window presentation.
    pub fn to_argb8888(&self) -> Vec<u32> {
        self.data
            .chunks_exact(4)
            .map(|p| {
                (u32::from(p[3]) << 24)
                    | (u32::from(p[0]) << 16)
                    | (u32::from(p[1]) << 8)
                    | u32::from(p[2])
            })
            .collect()
    }
}
