use crate::blur;
use crate::color::{Color, Palette};
use crate::composite;
use crate::core::Point;
use crate::error::NeonveilResult;
use crate::gradient::{self, GradientStop};
use crate::surface::Surface;

/// Radius of the glow disc, logical px (same circle the mask reveals).
pub const GLOW_RADIUS: f64 = 300.0;
/// Global opacity the sprite is composited with.
pub const GLOW_OPACITY: f32 = 0.5;
/// Sigma of the one-time sprite blur, logical px.
const GLOW_BLUR_SIGMA: f64 = 80.0;

const CORE_ALPHA: f64 = 153.0 / 255.0; // #..99
const MID_ALPHA: f64 = 68.0 / 255.0; // #..44

/// The pointer glow: a disc filled with a radial gradient from the primary
/// color through the secondary to transparent, heavily blurred.
///
/// The blob never changes shape while a renderer lives, only position, so it
/// is rasterized and blurred once here and stamped per frame.
pub struct GlowSprite {
    surface: Surface,
}

impl GlowSprite {
    #[tracing::instrument(skip(palette))]
    pub fn generate(dpr: f64, palette: &Palette) -> NeonveilResult<Self> {
        let stops = [
            GradientStop {
                t: 0.0,
                color: palette
                    .primary
                    .with_alpha(palette.primary.a * CORE_ALPHA),
            },
            GradientStop {
                t: 0.4,
                color: palette
                    .secondary
                    .with_alpha(palette.secondary.a * MID_ALPHA),
            },
            GradientStop {
                t: 0.7,
                color: Color::rgba(0.0, 0.0, 0.0, 0.15),
            },
            GradientStop {
                t: 1.0,
                color: Color::TRANSPARENT,
            },
        ];

        let radius = GLOW_RADIUS * dpr;
        let sigma = GLOW_BLUR_SIGMA * dpr;
        // Room for the blur tail; beyond two sigma the energy is negligible.
        let pad = (2.0 * sigma).ceil();
        let edge = ((((radius + pad) * 2.0).ceil()) as u32).max(1);

        let mut disc = Surface::new(edge, edge)?;
        let c = f64::from(edge) / 2.0;
        fill_radial_disc(&mut disc, c, c, radius, &stops);

        let surface = blur::approx_gaussian(&disc, sigma)?;
        Ok(Self { surface })
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Composite the sprite over `dst`, centered at `center` (physical px).
    pub fn stamp(&self, dst: &mut Surface, center: Point, opacity: f32) {
        let half = f64::from(self.surface.width()) / 2.0;
        let left = (center.x - half).round() as i64;
        let top = (center.y - half).round() as i64;
        composite::over_at(dst, &self.surface, left, top, opacity);
    }
}

fn fill_radial_disc(dst: &mut Surface, cx: f64, cy: f64, radius: f64, stops: &[GradientStop]) {
    let w = dst.width();
    let h = dst.height();
    let x0 = (cx - radius).floor().max(0.0) as u32;
    let y0 = (cy - radius).floor().max(0.0) as u32;
    let x1 = (((cx + radius).ceil()).max(0.0) as u32).min(w);
    let y1 = (((cy + radius).ceil()).max(0.0) as u32).min(h);

    let data = dst.data_mut();
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = (f64::from(x) + 0.5) - cx;
            let dy = (f64::from(y) + 0.5) - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist >= radius {
                continue;
            }
            let px = gradient::sample(stops, dist / radius).to_premul();
            let i = ((y as usize) * (w as usize) + (x as usize)) * 4;
            data[i..i + 4].copy_from_slice(&px.to_array());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgba8Premul;

    #[test]
    fn sprite_is_square_and_larger_than_the_disc() {
        let g = GlowSprite::generate(1.0, &Palette::cosmetic()).unwrap();
        let s = g.surface();
        assert_eq!(s.width(), s.height());
        assert!(f64::from(s.width()) >= 2.0 * GLOW_RADIUS);
    }

    #[test]
    fn sprite_center_carries_the_primary_hue() {
        // Cosmetic primary is #00eaff: no red, strong green/blue.
        let g = GlowSprite::generate(1.0, &Palette::cosmetic()).unwrap();
        let s = g.surface();
        let c = s.width() / 2;
        let px = s.pixel(c, c);
        assert!(px.a > 0);
        assert!(px.b > px.r);
        assert!(px.g > px.r);
    }

    #[test]
    fn sprite_fades_to_nothing_at_the_border() {
        let g = GlowSprite::generate(1.0, &Palette::cosmetic()).unwrap();
        let s = g.surface();
        assert_eq!(s.pixel(0, 0), Rgba8Premul::TRANSPARENT);
        assert_eq!(
            s.pixel(s.width() - 1, s.height() - 1),
            Rgba8Premul::TRANSPARENT
        );
    }

    #[test]
    fn sprite_alpha_peaks_at_the_center() {
        let g = GlowSprite::generate(1.0, &Palette::cosmetic()).unwrap();
        let s = g.surface();
        let c = s.width() / 2;
        let center = s.pixel(c, c).a;
        let rim = s.pixel(c + (GLOW_RADIUS as u32) - 10, c).a;
        assert!(center > rim);
    }

    #[test]
    fn stamp_centers_the_sprite() {
        let g = GlowSprite::generate(1.0, &Palette::cosmetic()).unwrap();
        let mut dst = Surface::new(600, 600).unwrap();
        dst.clear(Rgba8Premul::BLACK);
        g.stamp(&mut dst, Point::new(300.0, 300.0), GLOW_OPACITY);

        // The brightest part of the glow lands at the stamp center; far out
        // toward the rim only a faint remainder survives.
        let center = dst.pixel(300, 300);
        let rim = dst.pixel(580, 300);
        assert!(
            u32::from(center.g) + u32::from(center.b) > u32::from(rim.g) + u32::from(rim.b)
        );
    }
}
