mod config;
mod http_error;
pub mod signing;
mod transport;

pub use signing::{ApiRequest, SignatureV2Signer};
pub use transport::Ec2Transport;
