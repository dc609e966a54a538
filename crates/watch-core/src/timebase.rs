use std::time::{Duration, Instant};

/// Source of monotonic time for the scheduler loop.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `Instant::now` and `thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How long to wait after a command that ran for `took`, so that starts stay
/// `interval` apart. Zero once the command itself overran the interval.
pub fn sleep_budget(interval: Duration, took: Duration) -> Duration {
    interval.saturating_sub(took)
}
