//! Gravity module - accumulator timer for forced drops
//!
//! Elapsed frame time is summed until it reaches the drop interval; the
//! accumulator then restarts from zero and exactly one drop is due. A single
//! huge frame therefore yields one drop, not several.

/// Accumulator-based gravity scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gravity {
    interval_ms: u32,
    accumulator_ms: u32,
}

impl Gravity {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            accumulator_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn accumulator_ms(&self) -> u32 {
        self.accumulator_ms
    }

    /// Add elapsed time; returns true when a forced drop is due
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        if self.accumulator_ms >= self.interval_ms {
            self.accumulator_ms = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.accumulator_ms = 0;
    }
}
