//! EC2 query API Signature Version 2.
//!
//! The string to sign is
//!
//! ```text
//! GET\n<host[:port]>\n<path>\n<canonical query string>
//! ```
//!
//! and the signature is the base64 encoded HMAC-SHA256 of it, keyed with the
//! secret key. The canonical query string is every parameter except
//! `Signature`, sorted by name, with names and values percent-encoded over
//! the RFC 3986 unreserved set.

use std::collections::BTreeMap;

use ajaxconsole_core::transport::ApiAction;
use base64::{Engine, engine::general_purpose};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::Sha256;
use url::Url;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_METHOD: &str = "HmacSHA256";
pub const SIGNATURE_VERSION: &str = "2";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A fully signed request, ready to be sent as a single GET.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub action: String,
    /// Every query parameter except `Signature`.
    pub parameters: BTreeMap<String, String>,
    pub signature: String,
    pub url: Url,
}

#[derive(Clone)]
pub struct SignatureV2Signer {
    access_key: String,
    secret_key: String,
    api_version: String,
}

impl SignatureV2Signer {
    pub fn new(access_key: &str, secret_key: &str, api_version: &str) -> Self {
        Self {
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            api_version: api_version.to_string(),
        }
    }

    pub fn sign(
        &self,
        endpoint: &Url,
        action: &ApiAction,
        timestamp: DateTime<Utc>,
    ) -> ApiRequest {
        let mut parameters = action.parameters.clone();
        parameters.insert("Action".to_string(), action.name.to_string());
        parameters.insert("Version".to_string(), self.api_version.clone());
        parameters.insert("AWSAccessKeyId".to_string(), self.access_key.clone());
        parameters.insert(
            "SignatureMethod".to_string(),
            SIGNATURE_METHOD.to_string(),
        );
        parameters.insert(
            "SignatureVersion".to_string(),
            SIGNATURE_VERSION.to_string(),
        );
        parameters.insert(
            "Timestamp".to_string(),
            timestamp.format(TIMESTAMP_FORMAT).to_string(),
        );

        let canonical_query = canonical_query_string(&parameters);
        let string_to_sign = string_to_sign(endpoint, &canonical_query);
        let signature = self.signature_for(&string_to_sign);

        let mut url = endpoint.clone();
        url.set_fragment(None);
        url.set_query(Some(&format!(
            "{canonical_query}&Signature={}",
            uri_encode(&signature)
        )));

        ApiRequest {
            action: action.name.to_string(),
            parameters,
            signature,
            url,
        }
    }

    fn signature_for(&self, string_to_sign: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(string_to_sign.as_bytes());
        general_purpose::STANDARD.encode(mac.finalize().into_bytes())
    }
}

pub fn string_to_sign(endpoint: &Url, canonical_query: &str) -> String {
    let path = match endpoint.path() {
        "" => "/",
        path => path,
    };
    format!(
        "GET\n{}\n{}\n{}",
        host_header(endpoint),
        path,
        canonical_query
    )
}

/// Host as sent in the `Host` header; the port appears only when it is not the scheme default.
fn host_header(endpoint: &Url) -> String {
    let host = endpoint.host_str().unwrap_or_default();
    match endpoint.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

pub fn canonical_query_string(parameters: &BTreeMap<String, String>) -> String {
    parameters
        .iter()
        .map(|(name, value)| format!("{}={}", uri_encode(name), uri_encode(value)))
        .collect::<Vec<String>>()
        .join("&")
}

pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, UNRESERVED).to_string()
}
