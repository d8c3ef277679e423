//! Tick cadence for drivers that step the network on a timer

use std::time::Duration;

/// Default time between ticks in milliseconds
pub const DEFAULT_TICK_DELAY_MS: u64 = 500;

/// Shortest allowed time between ticks
pub const MIN_TICK_DELAY_MS: u64 = 1;

/// Longest allowed time between ticks
pub const MAX_TICK_DELAY_MS: u64 = 10_000;

/// How fast a driver steps the simulation, and whether it is stepping at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPace {
    delay_ms: u64,
    running: bool,
}

impl Default for TickPace {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_DELAY_MS)
    }
}

impl TickPace {
    /// Start stopped with the given delay, clamped to the allowed range
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms: delay_ms.clamp(MIN_TICK_DELAY_MS, MAX_TICK_DELAY_MS),
            running: false,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Halve the delay while it is above the minimum
    pub fn faster(&mut self) {
        if self.delay_ms > MIN_TICK_DELAY_MS {
            self.delay_ms /= 2;
        }
    }

    /// Double the delay while it is below the maximum
    pub fn slower(&mut self) {
        if self.delay_ms < MAX_TICK_DELAY_MS {
            self.delay_ms *= 2;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Flip between running and stopped, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }
}
