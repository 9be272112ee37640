use crate::error::{NeonveilError, NeonveilResult};

pub use kurbo::{Point, Vec2};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Logical viewport size plus the device pixel ratio that maps it to
/// physical buffer pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, dpr: f64) -> NeonveilResult<Self> {
        if width == 0 || height == 0 {
            return Err(NeonveilError::validation(
                "viewport width/height must be > 0",
            ));
        }
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(NeonveilError::validation(
                "viewport dpr must be finite and > 0",
            ));
        }
        Ok(Self { width, height, dpr })
    }

    pub fn physical_width(self) -> u32 {
        ((f64::from(self.width) * self.dpr).round() as u32).max(1)
    }

    pub fn physical_height(self) -> u32 {
        ((f64::from(self.height) * self.dpr).round() as u32).max(1)
    }

    /// Map a point in logical coordinates to physical buffer coordinates.
    pub fn to_physical(self, p: Point) -> Point {
        Point::new(p.x * self.dpr, p.y * self.dpr)
    }
}
