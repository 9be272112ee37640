use crate::core::Point;

/// Fixed per-frame interpolation factor toward the raw pointer target.
/// Deliberately not frame-time compensated; the lag is the effect.
pub const SMOOTHING: f64 = 0.18;

const OFFSCREEN: (f64, f64) = (-1000.0, -1000.0);

/// Raw pointer target plus the eased follower that trails it.
///
/// Two states: Idle (no move ever observed) and Tracking. The first move
/// switches to Tracking; pointer-leave does not switch back. The effect
/// freezes at the last eased position instead of hiding.
#[derive(Clone, Copy, Debug)]
pub struct PointerTracker {
    target: Point,
    eased: Point,
    observed: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        let off = Point::new(OFFSCREEN.0, OFFSCREEN.1);
        Self {
            target: off,
            eased: off,
            observed: false,
        }
    }

    /// Record a pointer move in logical surface coordinates.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.target = Point::new(x, y);
        self.observed = true;
    }

    /// Advance the eased follower one frame toward the target.
    pub fn step(&mut self) {
        self.eased = Point::new(
            lerp(self.eased.x, self.target.x, SMOOTHING),
            lerp(self.eased.y, self.target.y, SMOOTHING),
        );
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn eased(&self) -> Point {
        self.eased
    }

    pub fn observed(&self) -> bool {
        self.observed
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
