use crate::{
    animation::{animator::Animator, progress::CycleEvent, ticker::Ticker},
    config::{RenderConfig, Variant},
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::FrameIndex,
        error::{OdotsError, OdotsResult},
    },
    render::{FrameRGBA, surface::Surface},
    scene::{Scene, glyph::DotGlyph, ring::RingDots},
};

/// Render statistics for one session run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Frames handed to the sink.
    pub frames_encoded: u64,
    /// Cycle completions observed (1 for a full run).
    pub cycles_completed: u64,
}

/// Owns the drawing surface, the tick driver and the animator, and streams
/// one animation cycle into a [`FrameSink`].
///
/// Each tick: repaint background → draw at the current progress → snapshot →
/// push the frame → advance progress. On wraparound the ticker is stopped
/// and the sink finalized; the in-flight tick still completes, so the frame
/// drawn at the last progress value is always encoded.
pub struct RenderSession {
    config: RenderConfig,
    surface: Surface,
    ticker: Ticker,
    animator: Animator,
}

impl RenderSession {
    /// Construct a session from an explicit configuration and scene.
    pub fn new(config: RenderConfig, scene: Box<dyn Scene>) -> OdotsResult<Self> {
        config.validate()?;
        if config.segments != scene.segments() {
            return Err(OdotsError::validation(format!(
                "config has {} segments but the scene divides the cycle into {}",
                config.segments,
                scene.segments()
            )));
        }
        let surface = Surface::new(config.canvas)?;
        let animator = Animator::new(scene, config.progress_step)?;
        Ok(Self {
            config,
            surface,
            ticker: Ticker::new(),
            animator,
        })
    }

    /// Construct a session for a built-in variant with its default config.
    pub fn for_variant(variant: Variant) -> OdotsResult<Self> {
        let config = variant.config();
        let scene: Box<dyn Scene> = match variant {
            Variant::Glyph => Box::new(DotGlyph),
            Variant::Ring => Box::new(RingDots),
        };
        Self::new(config, scene)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Run one full animation cycle, streaming every frame into `sink`.
    #[tracing::instrument(skip(self, sink))]
    pub fn render(&mut self, sink: &mut dyn FrameSink) -> OdotsResult<RenderStats> {
        sink.begin(SinkConfig {
            width: self.config.canvas.width,
            height: self.config.canvas.height,
            frame_delay_ms: self.config.frame_delay_ms,
            quality: self.config.quality,
            loop_count: self.config.loop_count,
        })?;

        let mut stats = RenderStats::default();
        self.ticker.start();
        while self.ticker.is_running() {
            self.surface.begin_frame(self.config.background);
            self.animator.draw(&self.config, &mut self.surface)?;
            let frame = self.surface.snapshot();
            sink.push_frame(FrameIndex(stats.ticks), &frame)?;
            stats.frames_encoded += 1;

            if self.animator.advance() == CycleEvent::CycleComplete {
                stats.cycles_completed += 1;
                self.ticker.stop();
            }
            stats.ticks += 1;
        }
        sink.end()?;

        tracing::debug!(
            ticks = stats.ticks,
            frames = stats.frames_encoded,
            "render cycle finished"
        );
        Ok(stats)
    }

    /// Render the single frame the cycle shows at `tick`, without touching
    /// the session's own progress state.
    pub fn frame_at(&mut self, tick: u64) -> OdotsResult<FrameRGBA> {
        let mut progress = crate::animation::progress::Progress::new(self.config.progress_step)?;
        for _ in 0..tick {
            progress.advance();
        }
        self.surface.begin_frame(self.config.background);
        let config = self.config;
        self.animator
            .scene()
            .draw(&config, &mut self.surface, progress.scale())?;
        Ok(self.surface.snapshot())
    }
}
