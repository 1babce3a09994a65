/// Convenience result type used across curtain.
pub type CurtainResult<T> = Result<T, CurtainError>;

/// Top-level error taxonomy used by sequencer APIs.
///
/// `Config` errors are programmer errors and surface at construction time.
/// `Environment` errors describe a missing platform capability; the sequencer
/// recovers from them locally and only lower-level helpers ever return them.
#[derive(thiserror::Error, Debug)]
pub enum CurtainError {
    /// Malformed timing table, payload script, or backdrop parameters.
    #[error("config error: {0}")]
    Config(String),

    /// A platform capability (storage, drawing surface, clock) is unavailable.
    #[error("environment error: {0}")]
    Environment(String),

    /// Errors when serializing or deserializing configs and frames.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem errors from file-backed stores and config loading.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CurtainError {
    /// Build a [`CurtainError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CurtainError::Environment`] value.
    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }

    /// Build a [`CurtainError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CurtainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
