use crate::runtime::config::{ConfigError, RuntimeConfig};
use crate::runtime::logging::init_tracing;
use std::io;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use tracing::{error, info};
use watch_core::{ProcessRunner, Scheduler, SystemClock};

pub fn run_from_args() -> ExitCode {
    let config = match RuntimeConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::Usage(e)) => e.exit(),
        Err(e) => {
            eprintln!("watchdiff: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Watch loop failed");
            ExitCode::FAILURE
        }
    }
}

/// Watch the configured command until the process is killed or stdout goes
/// away.
pub fn run(config: RuntimeConfig) -> watch_core::Result<()> {
    init_tracing(config.json_logs);

    info!(
        interval_ms = config.loop_config.interval.as_millis() as u64,
        mode = ?config.command.mode(),
        command = ?config.command.argv(),
        "Starting watch loop"
    );

    let runner = ProcessRunner::new(config.command);
    let mut scheduler = Scheduler::new(runner, SystemClock, config.loop_config);

    // Never raised: the loop ends with the process.
    let stop = AtomicBool::new(false);
    let stdout = io::stdout();
    let result = scheduler.run(&mut stdout.lock(), &stop);

    let stats = scheduler.stats();
    info!(
        cycles_executed = stats.cycles_executed,
        numeric_readings = stats.numeric_readings,
        pass_through = stats.pass_through,
        overruns = stats.overruns,
        max_took_ms = stats.max_took.as_millis() as u64,
        "Watch loop ended"
    );

    result
}
