use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("interval must be a finite number of seconds, got {0}")]
    InvalidInterval(f64),

    #[error("no command given")]
    EmptyCommand,

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WatchError>;
