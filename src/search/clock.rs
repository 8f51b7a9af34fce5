//! Elapsed-time sources for the search. Play uses the wall clock; tests use
//! [`SteppedClock`] so that time-dependent behaviour is reproducible.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Mark the start of a top-level search.
    fn start(&mut self);
    /// Time since the last `start`.
    fn elapsed(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    started: Instant,
}

impl Default for WallClock {
    fn default() -> Self { Self { started: Instant::now() } }
}

impl Clock for WallClock {
    fn start(&mut self) { self.started = Instant::now(); }
    fn elapsed(&self) -> Duration { self.started.elapsed() }
}

/// Advances by a fixed `step` every time it is read.
#[derive(Debug, Clone)]
pub struct SteppedClock {
    now: Cell<Duration>,
    step: Duration,
}

impl SteppedClock {
    pub fn new(step: Duration) -> Self { Self { now: Cell::new(Duration::ZERO), step } }

    /// Never advances.
    pub fn frozen() -> Self { Self::new(Duration::ZERO) }
}

impl Clock for SteppedClock {
    fn start(&mut self) { self.now.set(Duration::ZERO); }

    fn elapsed(&self) -> Duration {
        let t = self.now.get();
        self.now.set(t + self.step);
        t
    }
}
