use thiserror::Error;

/// Rejected threshold input. Surfaced to the user as a corrective message;
/// the store is never mutated on this path.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("minimum must be less than maximum (got {lower} >= {upper})")]
    InvertedRange { lower: f32, upper: f32 },
    #[error("{metric} bounds must lie within {min} to {max}")]
    OutOfDomain {
        metric: &'static str,
        min: f32,
        max: f32,
    },
    #[error("bounds must be finite numbers")]
    NonFinite,
    #[error("bounds must be at least {min_separation} apart")]
    TooNarrow { min_separation: f32 },
}

/// Malformed handoff token or mini-app payload. Callers fall back to default
/// settings rather than failing hard.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("invalid base64 encoding")]
    InvalidBase64,
    #[error("malformed settings JSON")]
    InvalidJson,
    #[error("unsupported mini-app action: {0}")]
    UnknownAction(String),
}

#[derive(Debug, Error, Clone)]
pub enum MonitorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Device push or sensor fetch failure. Logged, never retried, never
    /// shown to the user who triggered the edit.
    #[error("transport error: {0}")]
    Transport(String),
    #[error("sensor source error: {0}")]
    Source(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
