use crate::foundation::{
    core::{Canvas, Rgba8},
    error::{OdotsError, OdotsResult},
};

/// Which animation the session renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Variant {
    /// "O" glyph with two filled swinging dots, 3 progress segments.
    Glyph,
    /// Growing ring with outlined dots and cross arms, 8 progress segments.
    Ring,
}

impl Variant {
    /// The default configuration for this variant.
    pub fn config(self) -> RenderConfig {
        match self {
            Self::Glyph => RenderConfig {
                segments: 3,
                progress_step: 0.02 / 3.0,
                ..RenderConfig::base()
            },
            Self::Ring => RenderConfig {
                segments: 8,
                progress_step: 0.02,
                ..RenderConfig::base()
            },
        }
    }
}

/// Immutable per-run render configuration.
///
/// Constructed once (usually via [`Variant::config`]), validated by the
/// session, and read-only thereafter.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    /// Output canvas size in pixels.
    pub canvas: Canvas,
    /// Declared inter-frame delay in milliseconds; the only pacing the
    /// output carries.
    pub frame_delay_ms: u32,
    /// Encoder quality, 0–100 (100 = best).
    pub quality: u8,
    /// Animation repeat count in the output file; 0 loops forever.
    pub loop_count: u16,
    /// Background color, repainted every frame.
    pub background: Rgba8,
    /// Foreground color for all strokes and fills.
    pub foreground: Rgba8,
    /// Number of eased progress segments the scene divides a cycle into.
    pub segments: u32,
    /// Per-tick progress step; a full cycle spans `1 / progress_step` ticks.
    pub progress_step: f64,
}

impl RenderConfig {
    fn base() -> Self {
        Self {
            canvas: Canvas {
                width: 500,
                height: 500,
            },
            frame_delay_ms: 20,
            quality: 100,
            loop_count: 0,
            background: Rgba8::BLACK,
            foreground: Rgba8::WHITE,
            segments: 1,
            progress_step: 0.02,
        }
    }

    pub fn validate(&self) -> OdotsResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.frame_delay_ms == 0 {
            return Err(OdotsError::validation("frame delay must be non-zero"));
        }
        if self.quality > 100 {
            return Err(OdotsError::validation("quality must be in 0..=100"));
        }
        if self.segments == 0 {
            return Err(OdotsError::validation("segment count must be positive"));
        }
        if !self.progress_step.is_finite()
            || self.progress_step <= 0.0
            || self.progress_step > 1.0
        {
            return Err(OdotsError::validation(
                "progress step must be finite and in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Number of ticks one cycle spans under plain f64 step accumulation.
    pub fn ticks_per_cycle(&self) -> u64 {
        debug_assert!(self.progress_step > 0.0, "config must be validated first");
        let mut scale = 0.0f64;
        let mut ticks = 0u64;
        loop {
            scale += self.progress_step;
            ticks += 1;
            if scale > 1.0 {
                return ticks;
            }
        }
    }
}
