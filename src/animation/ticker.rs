/// Repetition gate for the zero-delay tick loop.
///
/// The driver runs ticks back-to-back while the ticker is running
/// (`while ticker.is_running() { .. }`); there is no sleep between ticks.
/// Animation pacing comes from the encoder's declared inter-frame delay, not
/// from the tick rate. `start`/`stop` are idempotent. Stopping from inside a
/// tick only prevents future ticks; the in-flight tick runs to completion.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ticker {
    running: bool,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking. Returns `false` (no-op) when already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop ticking. Returns `false` (no-op) when already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
