use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("instance_id must be specified")]
    MissingInstanceId,

    #[error("Invalid instance id")]
    InvalidInstanceId { value: String },
}
