use ajaxconsole_core::error::{Error, TransportError};

pub fn map_http_error(operation_name: &'static str, error: reqwest::Error) -> Error {
    let reason = if error.is_timeout() {
        format!("{operation_name} timed out")
    } else if error.is_connect() {
        format!("{operation_name} could not connect: {error}")
    } else {
        format!("{operation_name} failed: {error}")
    };
    TransportError::Request { reason }.into()
}
