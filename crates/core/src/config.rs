use std::path::PathBuf;

use crate::error::{ConfigurationError, Result};

pub const ACCESS_KEY_VARIABLE: &str = "EC2_ACCESS_KEY";
pub const SECRET_KEY_VARIABLE: &str = "EC2_SECRET_KEY";
pub const ENDPOINT_VARIABLE: &str = "EC2_URL";
pub const API_VERSION_VARIABLE: &str = "EC2_API_VERSION";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8773/services/Cloud";
pub const DEFAULT_API_VERSION: &str = "2009-11-30";

pub fn get_credentials_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(ConfigurationError::HomeDirectoryNotAvailable)?;
    Ok(home_dir.join(".ajaxconsole").join("credentials"))
}
