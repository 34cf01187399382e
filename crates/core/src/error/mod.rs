mod config;
mod credentials;
mod response;
mod service;
mod transport;
mod validation;

pub use config::ConfigurationError;
pub use credentials::CredentialsError;
pub use response::MalformedResponseError;
pub use service::ServiceError;
use thiserror::Error;
pub use transport::TransportError;
pub use validation::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    InputOutput(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),
}

pub type Result<T> = std::result::Result<T, Error>;
