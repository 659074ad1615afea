use crate::{
    animation::progress::{CycleEvent, Progress},
    config::RenderConfig,
    foundation::error::OdotsResult,
    render::surface::Surface,
    scene::Scene,
};

/// Owns the progress state and the scene strategy for one animation.
///
/// Composition contract: callers must [`Animator::draw`] before
/// [`Animator::advance`] within each tick, so a captured frame reflects the
/// progress value that was current at draw time, not the post-step value.
pub struct Animator {
    progress: Progress,
    scene: Box<dyn Scene>,
}

impl Animator {
    pub fn new(scene: Box<dyn Scene>, step: f64) -> OdotsResult<Self> {
        Ok(Self {
            progress: Progress::new(step)?,
            scene,
        })
    }

    /// Current progress value.
    pub fn progress(&self) -> f64 {
        self.progress.scale()
    }

    /// The scene strategy this animator drives.
    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    /// Paint the scene at the current progress.
    pub fn draw(&self, config: &RenderConfig, surface: &mut Surface) -> OdotsResult<()> {
        self.scene.draw(config, surface, self.progress.scale())
    }

    /// Step progress by one tick.
    pub fn advance(&mut self) -> CycleEvent {
        self.progress.advance()
    }
}
