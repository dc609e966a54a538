pub mod error;
pub mod extract;
pub mod runner;
pub mod scheduler;
pub mod sim;
pub mod timebase;
pub mod tracker;

pub use error::{Result, WatchError};
pub use extract::{first_line, first_number};
pub use runner::{CommandRunner, CommandSpec, ExecMode, ProcessRunner};
pub use scheduler::{LoopConfig, LoopStats, Scheduler, MIN_INTERVAL};
pub use sim::{ManualClock, ScriptedRunner};
pub use timebase::{Clock, SystemClock};
pub use tracker::{DiffTracker, Reading, Report};
