use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use crate::error::{Result, ValidationError};

/// Decides whether a string is a well-formed instance identifier for a provider.
pub trait InstanceIdRule: Send + Sync {
    fn accepts(&self, candidate: &str) -> bool;
}

/// Identifiers made of a fixed prefix followed by ASCII alphanumerics, e.g. `i-0a1b2c3d`.
#[derive(Debug, Clone)]
pub struct PrefixedIdRule {
    pub prefix: String,
}

impl PrefixedIdRule {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

impl Default for PrefixedIdRule {
    fn default() -> Self {
        Self::new("i-")
    }
}

impl InstanceIdRule for PrefixedIdRule {
    fn accepts(&self, candidate: &str) -> bool {
        match candidate.strip_prefix(self.prefix.as_str()) {
            Some(suffix) => {
                !suffix.is_empty() && suffix.chars().all(|character| character.is_ascii_alphanumeric())
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn parse(candidate: &str, rule: &dyn InstanceIdRule) -> Result<Self> {
        if candidate.is_empty() {
            return Err(ValidationError::MissingInstanceId.into());
        }
        if !rule.accepts(candidate) {
            return Err(ValidationError::InvalidInstanceId {
                value: candidate.to_string(),
            }
            .into());
        }
        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for InstanceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSession {
    pub instance_id: String,
    pub url: String,
    /// Elements of the response other than `instanceId` and `url`, keyed by local name.
    pub extra: BTreeMap<String, String>,
}
