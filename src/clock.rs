use tracing::trace;

use crate::error::{AnimationError, Result};

/// Frame gaps at or above this many milliseconds are treated as stalls.
pub const MAX_FRAME_GAP_MS: f64 = 100.0;

/// Converts host animation-frame timestamps into frame deltas.
///
/// Frames following a stall (for example while the page is hidden) are
/// skipped rather than producing one huge step.
#[derive(Debug, Clone)]
pub struct Clock {
    speed: f64,
    last: Option<f64>,
}

impl Clock {
    /// Creates a clock that scales time by `speed`.
    ///
    /// # Errors
    ///
    /// Returns an error if `speed` is not finite and positive.
    pub fn new(speed: f64) -> Result<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(AnimationError::InvalidSpeed(speed).into());
        }
        Ok(Self { speed, last: None })
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Records the timestamp `now_ms` and returns the scaled delta in seconds.
    ///
    /// Returns `None` on the first tick and after a stall.
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        let last = self.last.replace(now_ms)?;
        let elapsed = now_ms - last;
        if elapsed < MAX_FRAME_GAP_MS {
            Some(elapsed * self.speed / 1000.0)
        } else {
            trace!(elapsed, "frame skipped after stall");
            None
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            speed: 1.0,
            last: None,
        }
    }
}
