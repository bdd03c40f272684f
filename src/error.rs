use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CcbarError {
    // External command errors
    #[error("failed to launch ccusage")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    #[error("ccusage exited with {status}: {stderr}")]
    CommandFailed { status: ExitStatus, stderr: String },

    #[error("ccusage timed out after {0:?}")]
    Timeout(Duration),

    // Data processing errors
    #[error("failed to parse ccusage output")]
    JsonParse(#[from] serde_json::Error),

    #[error("ccusage reported no active block")]
    NoActiveBlock,

    // Output errors
    #[error("failed to encode status output")]
    OutputEncode(#[source] serde_json::Error),

    #[error("failed to write status output")]
    OutputWrite(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CcbarError>;
