use crate::error::{Result, WatchError};
use crate::runner::CommandRunner;
use crate::timebase::{sleep_budget, Clock};
use crate::tracker::{DiffTracker, Reading, Report};
use log::debug;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shortest accepted interval; anything below is raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

pub const DEFAULT_INTERVAL_SECS: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LoopConfig {
    /// Target time between the starts of two consecutive runs.
    pub interval: Duration,
    /// Stop after this many cycles. `None` runs until stopped.
    pub max_cycles: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_cycles: None,
        }
    }
}

impl LoopConfig {
    /// Build a config from a user supplied interval, silently raising
    /// values below [`MIN_INTERVAL`].
    pub fn from_interval_secs(secs: f64) -> Result<Self> {
        if !secs.is_finite() {
            return Err(WatchError::InvalidInterval(secs));
        }
        let interval = if secs < MIN_INTERVAL.as_secs_f64() {
            MIN_INTERVAL
        } else {
            Duration::try_from_secs_f64(secs).map_err(|_| WatchError::InvalidInterval(secs))?
        };
        Ok(Self {
            interval,
            max_cycles: None,
        })
    }
}

#[derive(Clone, Default, Debug, PartialEq)]
pub struct LoopStats {
    pub cycles_executed: u64,
    pub numeric_readings: u64,
    pub pass_through: u64,
    /// Cycles whose command took at least the whole interval.
    pub overruns: u64,
    pub max_took: Duration,
}

/// Runs the command on a fixed cadence and reports how its number moves.
pub struct Scheduler<R: CommandRunner, C: Clock> {
    runner: R,
    clock: C,
    config: LoopConfig,
    tracker: DiffTracker,
    stats: LoopStats,
    last_finished_at: Option<Instant>,
}

impl<R: CommandRunner, C: Clock> Scheduler<R, C> {
    pub fn new(runner: R, clock: C, config: LoopConfig) -> Self {
        Self {
            runner,
            clock,
            config,
            tracker: DiffTracker::new(),
            stats: LoopStats::default(),
            last_finished_at: None,
        }
    }

    /// Loop until `stop` is raised or the cycle limit is hit, writing one
    /// line per cycle to `out`. Only a failed write ends the loop early.
    pub fn run<W: Write>(&mut self, out: &mut W, stop: &AtomicBool) -> Result<()> {
        while !stop.load(Ordering::Relaxed) && !self.limit_reached() {
            let (report, took) = self.cycle();
            writeln!(out, "{report}")?;
            out.flush()?;

            let budget = sleep_budget(self.config.interval, took);
            if budget.is_zero() {
                self.stats.overruns += 1;
                debug!(
                    "command took {:?}, interval is {:?}; starting next run immediately",
                    took, self.config.interval
                );
            } else if !self.limit_reached() {
                self.clock.sleep(budget);
            }
        }
        Ok(())
    }

    fn limit_reached(&self) -> bool {
        self.config
            .max_cycles
            .is_some_and(|max| self.stats.cycles_executed >= max)
    }

    /// Run the command once and feed its output to the tracker. Returns the
    /// report and how long the command ran.
    pub fn cycle(&mut self) -> (Report, Duration) {
        let started_at = self.clock.now();
        let output = self.runner.run();
        let finished_at = self.clock.now();

        let took = finished_at.saturating_duration_since(started_at);
        let actual_interval = self
            .last_finished_at
            .map(|prev| finished_at.saturating_duration_since(prev));
        self.last_finished_at = Some(finished_at);

        let report = self.tracker.observe(&output, actual_interval);

        self.stats.cycles_executed += 1;
        self.stats.max_took = self.stats.max_took.max(took);
        match report.reading {
            Reading::PassThrough => self.stats.pass_through += 1,
            Reading::First(_) | Reading::Delta { .. } => self.stats.numeric_readings += 1,
        }
        debug!(
            "cycle {} took {:?} (since previous: {:?})",
            self.stats.cycles_executed, took, actual_interval
        );

        (report, took)
    }

    pub fn tracker(&self) -> &DiffTracker {
        &self.tracker
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }
}
