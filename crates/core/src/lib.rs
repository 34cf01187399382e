pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod response;
pub mod transport;
pub mod types;
