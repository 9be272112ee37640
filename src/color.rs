use serde::{Deserialize, Serialize};

use crate::core::Rgba8Premul;
use crate::error::{NeonveilError, NeonveilResult};

/// Straight (non-premultiplied) sRGB color, channels in 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_premul(self) -> Rgba8Premul {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let a = self.a.clamp(0.0, 1.0);
        Rgba8Premul {
            r: to_u8(self.r.clamp(0.0, 1.0) * a),
            g: to_u8(self.g.clamp(0.0, 1.0) * a),
            b: to_u8(self.b.clamp(0.0, 1.0) * a),
            a: to_u8(a),
        }
    }

    /// Straight-space interpolation, the same rule canvas gradients use.
    pub(crate) fn lerp(a: Self, b: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<f64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.len() {
                3 => Ok(Self::rgba(v[0], v[1], v[2], 1.0)),
                4 => Ok(Self::rgba(v[0], v[1], v[2], v[3])),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

pub(crate) fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    let (r, g, b, a) = match s.len() {
        6 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            (r, g, b, 255)
        }
        8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = hex_byte(&s[6..8])?;
            (r, g, b, a)
        }
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(Color::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

/// The three colors the embedding page supplies. Immutable for a renderer's
/// lifetime; changing it means building a fresh renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
}

impl Palette {
    pub const fn new(primary: Color, secondary: Color, tertiary: Color) -> Self {
        Self {
            primary,
            secondary,
            tertiary,
        }
    }

    /// Neon turquoise scheme.
    pub fn cosmetic() -> Self {
        Self::new(
            Color::from_rgb8(0x00, 0xea, 0xff),
            Color::from_rgb8(0x20, 0xb2, 0xaa),
            Color::from_rgb8(0x48, 0xd1, 0xcc),
        )
    }

    /// Warm orange/yellow/red scheme.
    pub fn nutrition() -> Self {
        Self::new(
            Color::from_rgb8(0xff, 0x6b, 0x00),
            Color::from_rgb8(0xff, 0xd9, 0x3d),
            Color::from_rgb8(0xff, 0x3d, 0x3d),
        )
    }

    pub fn from_hex(primary: &str, secondary: &str, tertiary: &str) -> NeonveilResult<Self> {
        Ok(Self::new(
            parse_hex(primary).map_err(NeonveilError::validation)?,
            parse_hex(secondary).map_err(NeonveilError::validation)?,
            parse_hex(tertiary).map_err(NeonveilError::validation)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_hex_rgb_and_rgba() {
        let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
        assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));

        let c: Color = serde_json::from_value(json!("#0000ff80")).unwrap();
        assert!((c.b - 1.0).abs() < 1e-9);
        assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);
    }

    #[test]
    fn parses_rgba_array() {
        let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75])).unwrap();
        assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 1.0));

        let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
        assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 0.9));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#gg0000").is_err());
    }

    #[test]
    fn to_premul_scales_channels_by_alpha() {
        let px = Color::rgba(1.0, 0.5, 0.0, 0.5).to_premul();
        assert_eq!(px.a, 128);
        assert_eq!(px.r, 128);
        assert_eq!(px.g, 64);
        assert_eq!(px.b, 0);
    }

    #[test]
    fn palette_json_roundtrip() {
        let p = Palette::cosmetic();
        let s = serde_json::to_string(&p).unwrap();
        let de: Palette = serde_json::from_str(&s).unwrap();
        assert_eq!(de, p);
    }

    #[test]
    fn palette_from_hex_matches_preset() {
        let p = Palette::from_hex("#00eaff", "#20b2aa", "#48d1cc").unwrap();
        assert_eq!(p, Palette::cosmetic());
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Color::rgba(0.0, 0.25, 0.5, 1.0);
        let b = Color::rgba(1.0, 0.75, 0.5, 0.0);
        assert_eq!(Color::lerp(a, b, 0.0), a);
        assert_eq!(Color::lerp(a, b, 1.0), b);
    }
}
