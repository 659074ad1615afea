pub mod glyph;
pub mod ring;

use crate::{config::RenderConfig, foundation::error::OdotsResult, render::surface::Surface};

/// Rendering strategy for one animation variant.
///
/// Implementations are pure: the same `(config, progress)` pair always
/// issues the same paint operations. Per-variant differences (segment count,
/// which segment drives which visual attribute, filled versus outlined dots)
/// live entirely inside the implementation.
pub trait Scene {
    /// Number of progress segments this scene divides a cycle into.
    fn segments(&self) -> u32;

    /// Paint one frame at `progress` in `[0, 1)`.
    ///
    /// The driver has already repainted the background; the scene only adds
    /// foreground content.
    fn draw(&self, config: &RenderConfig, surface: &mut Surface, progress: f64)
    -> OdotsResult<()>;
}

/// Line width denominator: strokes are `min_side / STROKE_FACTOR` wide.
pub(crate) const STROKE_FACTOR: f64 = 90.0;

/// Base glyph size denominator: scenes build on `min_side / SIZE_FACTOR`.
pub(crate) const SIZE_FACTOR: f64 = 3.0;
