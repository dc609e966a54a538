//! Deterministic stand-ins for the process runner and the wall clock.

use crate::runner::CommandRunner;
use crate::timebase::Clock;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
            sleeps: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Every duration passed to `sleep`, oldest first.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}

/// Replays canned outputs, one per call, then returns empty strings.
#[derive(Debug, Clone)]
pub struct ScriptedRunner {
    outputs: VecDeque<String>,
    runtime: Option<(ManualClock, Duration)>,
    calls: u64,
}

impl ScriptedRunner {
    pub fn new<I, S>(outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outputs: outputs.into_iter().map(Into::into).collect(),
            runtime: None,
            calls: 0,
        }
    }

    /// Pretend each run takes `took`, advancing `clock` accordingly.
    pub fn with_runtime(mut self, clock: ManualClock, took: Duration) -> Self {
        self.runtime = Some((clock, took));
        self
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&mut self) -> String {
        self.calls += 1;
        if let Some((clock, took)) = &self.runtime {
            clock.advance(*took);
        }
        self.outputs.pop_front().unwrap_or_default()
    }
}
