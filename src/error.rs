use thiserror::Error;

/// Top-level error type for the context builder.
///
/// Malformed transcript lines are never errors — they are skipped one line
/// at a time. Only failures of the single bounded file read are fatal, and
/// they propagate to the caller without retries.
#[derive(Debug, Error)]
pub enum ContextError {
    /// I/O error while reading the transcript tail.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
