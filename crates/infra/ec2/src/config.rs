use ajaxconsole_core::error::{ConfigurationError, Result, TransportError};
use reqwest::Client;
use url::Url;

const USER_AGENT: &str = concat!("get-ajax-console/", env!("CARGO_PKG_VERSION"));

pub(super) fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|error| ConfigurationError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: error.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigurationError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        }
        .into());
    }
    if url.host_str().is_none() {
        return Err(ConfigurationError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: "missing host".to_string(),
        }
        .into());
    }
    Ok(url)
}

pub(super) fn build_http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|error| {
            TransportError::Request {
                reason: error.to_string(),
            }
            .into()
        })
}
