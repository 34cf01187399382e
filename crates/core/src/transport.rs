use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{error::Result, types::InstanceId};

pub const GET_AJAX_CONSOLE: &str = "GetAjaxConsole";

/// An API action and its action-specific parameters, before authentication is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiAction {
    pub name: &'static str,
    pub parameters: BTreeMap<String, String>,
}

impl ApiAction {
    pub fn get_ajax_console(instance_id: &InstanceId) -> Self {
        let mut parameters = BTreeMap::new();
        parameters.insert("InstanceId".to_string(), instance_id.to_string());
        Self {
            name: GET_AJAX_CONSOLE,
            parameters,
        }
    }
}

/// Sends one authenticated action to the compute API and returns the raw response body.
///
/// Implementations make a single attempt. A non-2xx reply is reported as
/// `TransportError::HttpStatus` with the body preserved.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, action: &ApiAction) -> Result<String>;
}
