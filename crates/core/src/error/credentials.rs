use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("credentials file not found: {path}")]
    FileNotFound { path: String },

    #[error("cannot read credentials file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("invalid credentials file format: {reason}")]
    InvalidFormat { reason: String },

    #[error("missing required credential: {field}")]
    MissingField { field: String },
}
