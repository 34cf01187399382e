use ajaxconsole_core::{
    credentials::Credentials,
    error::{Result, TransportError},
    transport::{ApiAction, Transport},
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{config, http_error::map_http_error, signing::SignatureV2Signer};

/// Signed query-API transport over HTTP(S). One GET per action, no retries.
pub struct Ec2Transport {
    http: Client,
    endpoint: Url,
    signer: SignatureV2Signer,
}

impl Ec2Transport {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let endpoint = config::parse_endpoint(&credentials.endpoint)?;
        let http = config::build_http_client()?;
        let signer = SignatureV2Signer::new(
            &credentials.access_key,
            &credentials.secret_key,
            &credentials.api_version,
        );
        Ok(Self {
            http,
            endpoint,
            signer,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for Ec2Transport {
    async fn send(&self, action: &ApiAction) -> Result<String> {
        let request = self.signer.sign(&self.endpoint, action, Utc::now());
        debug!(
            action = %request.action,
            endpoint = %self.endpoint,
            parameters = ?request.parameters,
            "sending signed request"
        );

        let response = self
            .http
            .get(request.url)
            .send()
            .await
            .map_err(|error| map_http_error(action.name, error))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| map_http_error(action.name, error))?;
        debug!(status = status.as_u16(), %body, "received response");

        if !status.is_success() {
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        Ok(body)
    }
}
