use thiserror::Error;

/// Errors returned by gateway operations.
///
/// A signature that does not match is not an error: [`crate::verify`] reports
/// it as `false`.
#[derive(Debug, Error)]
pub enum AlipayError {
    #[error("key error: {0}")]
    KeyError(String),

    #[error("signature error: {0}")]
    SignatureError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("http error: {0}")]
    HttpError(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
