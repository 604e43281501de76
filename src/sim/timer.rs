//! One-shot delayed-call timer

use serde::{Deserialize, Serialize};

/// Countdown that fires exactly once after `delay_ms` of advanced time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayedCall {
    delay_ms: f64,
    elapsed_ms: f64,
    fired: bool,
}

impl DelayedCall {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            elapsed_ms: 0.0,
            fired: false,
        }
    }

    /// Advance the clock. Returns true on the single step where the timer fires.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if self.fired {
            return false;
        }
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.delay_ms);
        if self.elapsed_ms >= self.delay_ms {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn remaining_ms(&self) -> f64 {
        (self.delay_ms - self.elapsed_ms).max(0.0)
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_ms() / 1000.0
    }
}
