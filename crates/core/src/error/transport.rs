use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {reason}")]
    Request { reason: String },

    #[error("unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },
}
