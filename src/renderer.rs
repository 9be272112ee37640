use crate::color::Palette;
use crate::composite;
use crate::core::{Rgba8Premul, Viewport};
use crate::error::NeonveilResult;
use crate::glow::{GLOW_OPACITY, GlowSprite};
use crate::mask::{self, REVEAL_RADIUS};
use crate::pattern::PatternTile;
use crate::pointer::PointerTracker;
use crate::surface::Surface;

/// The full background effect: a tiled rosette pattern revealed through a
/// soft circular mask at the eased pointer position, plus a glow stamped at
/// the same spot, redrawn over an opaque black base every frame.
///
/// The renderer owns every buffer it draws into. Input and frame advancement
/// are `&mut self` calls, so the host loop, not the renderer, decides the
/// cadence; dropping the renderer is the whole teardown.
pub struct BackgroundRenderer {
    viewport: Viewport,
    palette: Palette,
    tile: PatternTile,
    glow: GlowSprite,
    pointer: PointerTracker,
    pattern_buf: Surface,
    mask_buf: Surface,
    frame: Surface,
}

impl BackgroundRenderer {
    #[tracing::instrument(skip(palette))]
    pub fn new(viewport: Viewport, palette: Palette) -> NeonveilResult<Self> {
        let tile = PatternTile::generate(viewport.dpr, &palette)?;
        let glow = GlowSprite::generate(viewport.dpr, &palette)?;
        let (pw, ph) = (viewport.physical_width(), viewport.physical_height());
        Ok(Self {
            viewport,
            palette,
            tile,
            glow,
            pointer: PointerTracker::new(),
            pattern_buf: Surface::new(pw, ph)?,
            mask_buf: Surface::new(pw, ph)?,
            frame: Surface::new(pw, ph)?,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    /// Report a pointer move in logical surface coordinates. The first call
    /// starts tracking. There is no call for pointer-leave; stale targets
    /// freeze the effect in place on purpose.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.pointer_moved(x, y);
    }

    /// Reallocate every buffer for a new viewport. Pointer and eased state
    /// survive a resize; the cached tile and glow sprite only depend on the
    /// device pixel ratio and are rebuilt when it changes.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport) -> NeonveilResult<()> {
        let dpr_changed = (viewport.dpr - self.viewport.dpr).abs() > f64::EPSILON;
        self.viewport = viewport;
        if dpr_changed {
            self.tile = PatternTile::generate(viewport.dpr, &self.palette)?;
            self.glow = GlowSprite::generate(viewport.dpr, &self.palette)?;
        }
        let (pw, ph) = (viewport.physical_width(), viewport.physical_height());
        self.pattern_buf = Surface::new(pw, ph)?;
        self.mask_buf = Surface::new(pw, ph)?;
        self.frame = Surface::new(pw, ph)?;
        Ok(())
    }

    /// Advance the easing one step and redraw the frame:
    /// tile the pattern, cut it down to the reveal mask, lay it over black,
    /// then stamp the glow on top.
    pub fn render_frame(&mut self) -> NeonveilResult<&Surface> {
        self.pointer.step();
        let center = self
            .pointer
            .observed()
            .then(|| self.viewport.to_physical(self.pointer.eased()));

        self.tile.fill_tiled(&mut self.pattern_buf);
        mask::render_reveal(&mut self.mask_buf, center, REVEAL_RADIUS * self.viewport.dpr);
        composite::destination_in(&mut self.pattern_buf, &self.mask_buf)?;

        self.frame.clear(Rgba8Premul::BLACK);
        composite::over_in_place(&mut self.frame, &self.pattern_buf, 1.0)?;

        if let Some(c) = center {
            self.glow.stamp(&mut self.frame, c, GLOW_OPACITY);
        }
        Ok(&self.frame)
    }

    /// Render `n` consecutive frames, keeping only the last.
    pub fn step_frames(&mut self, n: u32) -> NeonveilResult<()> {
        for _ in 0..n {
            self.render_frame()?;
        }
        Ok(())
    }
}
