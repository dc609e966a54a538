use clap::Parser;
use thiserror::Error;
use watch_core::scheduler::DEFAULT_INTERVAL_SECS;
use watch_core::{CommandSpec, ExecMode, LoopConfig, WatchError};

/// Run a command periodically and show how the first number in its output changes.
#[derive(Debug, Parser)]
#[command(name = "watchdiff", version)]
pub struct Cli {
    /// Update interval in seconds, may have a fractional part, min. 0.1
    #[arg(
        short = 'n',
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_INTERVAL_SECS,
        allow_negative_numbers = true
    )]
    pub interval: f64,

    /// Execute the command directly instead of through 'sh -c'
    #[arg(short = 'x', long)]
    pub exec: bool,

    /// Output diagnostic logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Command to watch; everything from here on is passed through
    #[arg(value_name = "COMMAND", required = true, trailing_var_arg = true)]
    pub command: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Invalid(#[from] WatchError),
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub command: CommandSpec,
    pub loop_config: LoopConfig,
    pub json_logs: bool,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_args(std::env::args_os())
    }

    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Self::from_cli(cli)
    }

    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let mode = if cli.exec {
            ExecMode::Exec
        } else {
            ExecMode::Shell
        };
        Ok(Self {
            command: CommandSpec::new(cli.command, mode)?,
            loop_config: LoopConfig::from_interval_secs(cli.interval)?,
            json_logs: cli.json_logs,
        })
    }
}
