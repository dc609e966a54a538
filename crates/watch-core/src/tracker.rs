use crate::extract::{first_line, first_number};
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// The line carried no usable number and was echoed as is.
    PassThrough,
    /// First number ever seen; nothing to compare against yet.
    First(Decimal),
    Delta {
        value: Decimal,
        diff: Decimal,
        per_second: f64,
    },
}

/// One reported cycle: the first output line and what was read from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub line: String,
    pub reading: Reading,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reading {
            Reading::Delta {
                diff, per_second, ..
            } => write!(
                f,
                "{} (diff={}, diff/s={:.2})",
                self.line,
                diff.normalize(),
                per_second
            ),
            Reading::PassThrough | Reading::First(_) => f.write_str(&self.line),
        }
    }
}

/// Remembers the previous reading and turns each new one into a delta.
#[derive(Debug, Clone, Default)]
pub struct DiffTracker {
    last: Option<Decimal>,
}

impl DiffTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.last.is_some()
    }

    pub fn last(&self) -> Option<Decimal> {
        self.last
    }

    /// Feed one command output. `elapsed` is the time since the previous
    /// command finished, `None` on the first cycle.
    pub fn observe(&mut self, output: &str, elapsed: Option<Duration>) -> Report {
        let line = first_line(output);
        let reading = self.read_line(line, elapsed);
        Report {
            line: line.to_string(),
            reading,
        }
    }

    fn read_line(&mut self, line: &str, elapsed: Option<Duration>) -> Reading {
        let Some(number) = first_number(line) else {
            return Reading::PassThrough;
        };
        let Some(value) = parse_exact(number) else {
            return Reading::PassThrough;
        };

        let Some(prev) = self.last else {
            self.last = Some(value);
            return Reading::First(value);
        };
        let Some(diff) = value.checked_sub(prev) else {
            debug!("difference between {prev} and {value} overflows");
            return Reading::PassThrough;
        };
        self.last = Some(value);

        Reading::Delta {
            value,
            diff,
            per_second: rate(diff, elapsed),
        }
    }
}

/// Parse `number` without losing digits. `Decimal::from_str` rounds away
/// fractional digits beyond its precision, so a scale shorter than the text's
/// fraction means the stored value would not be the one printed.
fn parse_exact(number: &str) -> Option<Decimal> {
    let value = match Decimal::from_str(number) {
        Ok(value) => value,
        Err(e) => {
            debug!("ignoring unrepresentable number {number:?}: {e}");
            return None;
        }
    };
    let fraction_digits = number.split_once('.').map_or(0, |(_, frac)| frac.len());
    if (value.scale() as usize) < fraction_digits {
        debug!("ignoring {number:?}: would be rounded to {value}");
        return None;
    }
    Some(value)
}

fn rate(diff: Decimal, elapsed: Option<Duration>) -> f64 {
    let secs = elapsed.map(|d| d.as_secs_f64()).unwrap_or(0.0);
    if secs <= 0.0 {
        return 0.0;
    }
    diff.to_f64().unwrap_or(0.0) / secs
}
