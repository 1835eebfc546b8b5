//! Monotonic millisecond clocks and the fixed-rate frame governor.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of the millisecond timestamps every cooldown is measured against.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the clock was created.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for deterministic runs.  Never goes backwards.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: Cell::new(start_ms) }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to `ms`; earlier values are ignored.
    pub fn set(&self, ms: u64) {
        self.now.set(self.now.get().max(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Paces a loop to a fixed number of iterations per second by sleeping off
/// whatever is left of each frame.
#[derive(Debug)]
pub struct FrameLimiter {
    frame: Duration,
    frame_start: Instant,
}

impl FrameLimiter {
    pub fn new(rate_hz: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / rate_hz.max(1),
            frame_start: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Call once at the end of every frame.
    pub fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}
