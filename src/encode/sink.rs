use crate::foundation::{core::FrameIndex, error::OdotsResult};
use crate::render::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a render.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Declared inter-frame delay in milliseconds.
    pub frame_delay_ms: u32,
    /// Encoder quality, 0–100 (100 = best).
    pub quality: u8,
    /// Animation repeat count; 0 loops forever.
    pub loop_count: u16,
}

/// Sink contract for consuming rendered frames in tick order.
///
/// Ordering contract: `push_frame` is called with strictly increasing
/// `FrameIndex` values, exactly once per tick, bracketed by one `begin` and
/// one `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> OdotsResult<()>;
    /// Push one frame in strictly increasing tick order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> OdotsResult<()>;
    /// Called once after the last frame is pushed; finalizes the output.
    fn end(&mut self) -> OdotsResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in tick order.
    pub(crate) frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> OdotsResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> OdotsResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> OdotsResult<()> {
        self.ended = true;
        Ok(())
    }
}
