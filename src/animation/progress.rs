use crate::foundation::error::{OdotsError, OdotsResult};

/// Outcome of one [`Progress::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleEvent {
    /// The cycle is still in flight.
    Running,
    /// Progress wrapped past 1.0 and was reset to 0; fires exactly once per
    /// wraparound.
    CycleComplete,
}

/// The single progress scalar driving the animation.
///
/// `scale` cycles through `[0, 1)`, advanced by a fixed step per tick. The
/// wraparound tick count follows plain f64 accumulation of the step, which
/// is part of the observable contract (step `0.02` wraps on the 50th
/// advance, step `0.02 / 3` on the 150th).
#[derive(Clone, Copy, Debug)]
pub struct Progress {
    scale: f64,
    step: f64,
}

impl Progress {
    /// Create a progress state at 0 with the given per-tick step.
    pub fn new(step: f64) -> OdotsResult<Self> {
        if !step.is_finite() || step <= 0.0 || step > 1.0 {
            return Err(OdotsError::animation(
                "progress step must be finite and in (0, 1]",
            ));
        }
        Ok(Self { scale: 0.0, step })
    }

    /// Current progress value in `[0, 1)`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Advance by one step, wrapping past 1.0 back to 0.
    pub fn advance(&mut self) -> CycleEvent {
        self.scale += self.step;
        if self.scale > 1.0 {
            self.scale = 0.0;
            CycleEvent::CycleComplete
        } else {
            CycleEvent::Running
        }
    }
}
