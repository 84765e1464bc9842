use std::time::Duration;
use thiserror::Error;

/// Common result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectError>;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} timed out after {}ms", .timeout.as_millis())]
    Timeout {
        program: &'static str,
        timeout: Duration,
    },
    #[error("{program} exited with status {code:?}: {}", .stderr.trim())]
    NonZeroExit {
        program: &'static str,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    #[error("unexpected output: {0}")]
    Parse(String),
}
