pub type ReelResult<T> = Result<T, ReelError>;

/// Error kinds surfaced by the export pipeline.
///
/// Configuration and geometry failures are raised before any frame is produced where possible.
/// Evaluation and engine failures abort the whole run; there are no retries.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Contradictory, incomplete or unknown options.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Expression parse failure, unknown variable or invalid arithmetic result.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Degenerate bounds (too few points survive trimming, non-finite coordinates).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Failure reported by the layout engine, renderer or frame sink.
    #[error("engine error: {0}")]
    Engine(String),

    /// Malformed JSON input.
    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
