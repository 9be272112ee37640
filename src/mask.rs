use crate::color::Color;
use crate::core::{Point, Rgba8Premul};
use crate::gradient::{self, GradientStop};
use crate::surface::Surface;

/// Radius of the soft reveal circle, logical px.
pub const REVEAL_RADIUS: f64 = 300.0;

/// Falloff of the reveal: fully opaque at the center, fading through fixed
/// stops to fully transparent at the circle's edge.
pub(crate) const REVEAL_STOPS: [GradientStop; 6] = [
    GradientStop {
        t: 0.0,
        color: Color::rgba(1.0, 1.0, 1.0, 1.0),
    },
    GradientStop {
        t: 0.3,
        color: Color::rgba(1.0, 1.0, 1.0, 0.95),
    },
    GradientStop {
        t: 0.5,
        color: Color::rgba(1.0, 1.0, 1.0, 0.7),
    },
    GradientStop {
        t: 0.7,
        color: Color::rgba(1.0, 1.0, 1.0, 0.4),
    },
    GradientStop {
        t: 0.85,
        color: Color::rgba(1.0, 1.0, 1.0, 0.1),
    },
    GradientStop {
        t: 1.0,
        color: Color::rgba(1.0, 1.0, 1.0, 0.0),
    },
];

/// Render the reveal mask into `dst`. `center` is the eased pointer position
/// in physical px, or `None` while no pointer has ever been observed; the
/// idle mask is fully transparent so the pattern stays hidden no matter how
/// many frames elapse.
pub fn render_reveal(dst: &mut Surface, center: Option<Point>, radius: f64) {
    dst.clear(Rgba8Premul::TRANSPARENT);
    let Some(c) = center else {
        return;
    };
    if !radius.is_finite() || radius <= 0.0 {
        return;
    }

    let w = dst.width();
    let h = dst.height();
    let x0 = (c.x - radius).floor().max(0.0) as u32;
    let y0 = (c.y - radius).floor().max(0.0) as u32;
    let x1 = (((c.x + radius).ceil()).max(0.0) as u32).min(w);
    let y1 = (((c.y + radius).ceil()).max(0.0) as u32).min(h);

    let data = dst.data_mut();
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = (f64::from(x) + 0.5) - c.x;
            let dy = (f64::from(y) + 0.5) - c.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist >= radius {
                continue;
            }
            let a = gradient::sample(&REVEAL_STOPS, dist / radius).a;
            let v = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
            let i = ((y as usize) * (w as usize) + (x as usize)) * 4;
            data[i..i + 4].copy_from_slice(&[v, v, v, v]);
        }
    }
}
