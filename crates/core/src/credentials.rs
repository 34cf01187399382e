use std::{
    fmt::{self, Debug, Formatter},
    path::Path,
};

use ini::Ini;
use tokio::fs::try_exists;
use tracing::debug;

use crate::{
    config::{
        ACCESS_KEY_VARIABLE, API_VERSION_VARIABLE, DEFAULT_API_VERSION, DEFAULT_ENDPOINT,
        ENDPOINT_VARIABLE, SECRET_KEY_VARIABLE, get_credentials_path,
    },
    error::{CredentialsError, Result},
};

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: String,
    pub api_version: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Resolves credentials from the process environment, falling back to
/// `~/.ajaxconsole/credentials`.
pub async fn get_credentials() -> Result<Credentials> {
    let credentials_path = get_credentials_path()?;
    let exists = try_exists(&credentials_path)
        .await
        .map_err(|error| CredentialsError::Unreadable {
            path: credentials_path.display().to_string(),
            reason: error.to_string(),
        })?;
    let file = if exists {
        Some(credentials_path.as_path())
    } else {
        None
    };
    resolve_credentials(|name| std::env::var(name).ok(), file)
}

/// Each field comes from `lookup` first and the INI file second. Empty values count as unset.
///
/// The file is not read at all when `lookup` supplies the access key, secret key and endpoint.
pub fn resolve_credentials<F>(lookup: F, credentials_file: Option<&Path>) -> Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let from_environment = |variable: &str| lookup(variable).filter(|value| !value.is_empty());
    let environment_is_complete = [ACCESS_KEY_VARIABLE, SECRET_KEY_VARIABLE, ENDPOINT_VARIABLE]
        .into_iter()
        .all(|variable| from_environment(variable).is_some());

    let file = match credentials_file {
        Some(path) if !environment_is_complete => Some(load_credentials_file(path)?),
        _ => None,
    };

    let pick = |variable: &str, key: &str| -> Option<String> {
        from_environment(variable).or_else(|| {
            file.as_ref()
                .and_then(|config| config.general_section().get(key))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
    };

    let access_key =
        pick(ACCESS_KEY_VARIABLE, "access_key").ok_or(CredentialsError::MissingField {
            field: ACCESS_KEY_VARIABLE.to_string(),
        })?;
    let secret_key =
        pick(SECRET_KEY_VARIABLE, "secret_key").ok_or(CredentialsError::MissingField {
            field: SECRET_KEY_VARIABLE.to_string(),
        })?;
    let endpoint =
        pick(ENDPOINT_VARIABLE, "endpoint").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let api_version = pick(API_VERSION_VARIABLE, "api_version")
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

    let credentials = Credentials {
        access_key,
        secret_key,
        endpoint,
        api_version,
    };
    debug!(?credentials, "resolved credentials");
    Ok(credentials)
}

fn load_credentials_file(path: &Path) -> Result<Ini> {
    Ini::load_from_file(path).map_err(|error| match error {
        ini::Error::Io(io_error) if io_error.kind() == std::io::ErrorKind::NotFound => {
            CredentialsError::FileNotFound {
                path: path.display().to_string(),
            }
            .into()
        }
        ini::Error::Io(io_error) => CredentialsError::Unreadable {
            path: path.display().to_string(),
            reason: io_error.to_string(),
        }
        .into(),
        ini::Error::Parse(parse_error) => CredentialsError::InvalidFormat {
            reason: parse_error.to_string(),
        }
        .into(),
    })
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write};

    use tempfile::{NamedTempFile, tempdir};

    use super::*;
    use crate::error::Error;

    fn environment(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    fn credentials_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file should be created");
        file.write_all(contents.as_bytes())
            .expect("temp file should be writable");
        file
    }

    #[test]
    fn environment_alone_is_enough() {
        let env = environment(&[
            ("EC2_ACCESS_KEY", "access"),
            ("EC2_SECRET_KEY", "secret"),
            ("EC2_URL", "https://cloud.example.com:8773/services/Cloud"),
        ]);

        let credentials = resolve_credentials(|name| env.get(name).cloned(), None)
            .expect("credentials should resolve");

        assert_eq!(credentials.access_key, "access");
        assert_eq!(credentials.secret_key, "secret");
        assert_eq!(
            credentials.endpoint,
            "https://cloud.example.com:8773/services/Cloud"
        );
        assert_eq!(credentials.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn endpoint_defaults_when_unset() {
        let env = environment(&[("EC2_ACCESS_KEY", "access"), ("EC2_SECRET_KEY", "secret")]);

        let credentials = resolve_credentials(|name| env.get(name).cloned(), None)
            .expect("credentials should resolve");

        assert_eq!(credentials.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn file_fills_in_what_the_environment_lacks() {
        let file = credentials_file(
            "access_key = file-access\nsecret_key = file-secret\nendpoint = http://10.0.0.1:8773/services/Cloud\napi_version = 2010-08-31\n",
        );
        let env = environment(&[("EC2_ACCESS_KEY", "env-access"), ("EC2_SECRET_KEY", "")]);

        let credentials = resolve_credentials(|name| env.get(name).cloned(), Some(file.path()))
            .expect("credentials should resolve");

        assert_eq!(credentials.access_key, "env-access");
        assert_eq!(credentials.secret_key, "file-secret");
        assert_eq!(credentials.endpoint, "http://10.0.0.1:8773/services/Cloud");
        assert_eq!(credentials.api_version, "2010-08-31");
    }

    #[test]
    fn missing_secret_key_is_reported_by_name() {
        let env = environment(&[("EC2_ACCESS_KEY", "access")]);

        let error = resolve_credentials(|name| env.get(name).cloned(), None)
            .expect_err("missing secret should fail");

        match error {
            Error::Credentials(CredentialsError::MissingField { field }) => {
                assert_eq!(field, "EC2_SECRET_KEY")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparsable_file_is_an_invalid_format() {
        let file = credentials_file("[unterminated\naccess_key = x\n");

        let error = resolve_credentials(|_| None, Some(file.path()))
            .expect_err("broken file should fail");

        assert!(matches!(
            error,
            Error::Credentials(CredentialsError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn debug_output_hides_the_secret_key() {
        let credentials = Credentials {
            access_key: "access".to_string(),
            secret_key: "very-secret".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        };

        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("access"));
    }

    #[test]
    fn unreadable_file_is_reported_with_its_path() {
        let directory = tempdir().expect("tempdir should be created");
        let env = environment(&[("EC2_ACCESS_KEY", "access"), ("EC2_SECRET_KEY", "secret")]);

        let error = resolve_credentials(|name| env.get(name).cloned(), Some(directory.path()))
            .expect_err("a directory is not a credentials file");

        match error {
            Error::Credentials(CredentialsError::Unreadable { path, .. }) => {
                assert_eq!(path, directory.path().display().to_string())
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn complete_environment_never_touches_the_file() {
        let directory = tempdir().expect("tempdir should be created");
        let env = environment(&[
            ("EC2_ACCESS_KEY", "access"),
            ("EC2_SECRET_KEY", "secret"),
            ("EC2_URL", "http://10.0.0.1:8773/services/Cloud"),
        ]);

        let credentials =
            resolve_credentials(|name| env.get(name).cloned(), Some(directory.path()))
                .expect("environment alone should resolve");

        assert_eq!(credentials.endpoint, "http://10.0.0.1:8773/services/Cloud");
        assert_eq!(credentials.api_version, DEFAULT_API_VERSION);
    }
}
