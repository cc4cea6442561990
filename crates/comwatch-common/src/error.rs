use thiserror::Error;

/// Error types for the glue layers around the heartbeat core.
///
/// The core blocks themselves are infallible: a missing heartbeat is signalled
/// on the alarm channel, not through an error path. These variants cover the
/// parts that can genuinely fail - configuration and device I/O.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WatchError {
    /// Configuration or initialization error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Heartbeat source read failure.
    #[error("heartbeat source error: {0}")]
    SourceError(String),

    /// I/O operation error.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Convenience type alias for comwatch operations.
pub type WatchResult<T> = Result<T, WatchError>;
