use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedResponseError {
    #[error("response is missing required field: {field}")]
    MissingField { field: String },

    #[error("response is not a valid document: {reason}")]
    InvalidDocument { reason: String },
}
