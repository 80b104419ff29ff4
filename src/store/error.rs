use thiserror::Error;

/// Failures talking to the remote workshop store. All persistence and
/// transport problems surface here; they are never a concern of the pure
/// core components.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store returned status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
