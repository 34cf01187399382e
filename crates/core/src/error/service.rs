use thiserror::Error;

/// Fault reported by the remote API inside an error envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ServiceError {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}
