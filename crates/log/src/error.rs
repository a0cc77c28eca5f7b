//! Logger errors

/// Errors raised while setting up logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// The filter directive string could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(String),

    /// An unknown output format name.
    #[error("unknown log format `{0}`, expected `compact`, `pretty` or `json`")]
    Format(String),

    /// A global subscriber is already installed.
    #[error("failed to install logger: {0}")]
    Init(String),
}

/// Result alias for logging setup.
pub type LogResult<T> = Result<T, LogError>;
