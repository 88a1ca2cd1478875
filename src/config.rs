//! Runtime configuration from the environment.
//!
//! Credentials are mandatory and validated at startup; a missing or empty
//! value aborts the process before any request is served. Everything else
//! has a production default. The `Debug` rendering of the loaded config is
//! safe to log (the secret is redacted by [`Credentials`]).

use crate::client::{Credentials, DEFAULT_BASE_URL};
use crate::directory::SearchOptions;

pub const ENV_APP_KEY: &str = "APP_KEY";
pub const ENV_APP_SECRET: &str = "APP_SECRET";
pub const ENV_BASE_URL: &str = "DINGTALK_BASE_URL";
pub const ENV_STOP_ON_FIRST_MATCH: &str = "SEARCH_STOP_ON_FIRST_MATCH";

/// Configuration errors, all fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Required environment variable {name} is not set")]
    Missing { name: &'static str },

    #[error("Environment variable {name} must not be empty")]
    Empty { name: &'static str },

    #[error("Environment variable {name} has unrecognized value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Everything the binary needs to construct the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    /// Upstream endpoint; overridable so the binary can run against a stub.
    pub base_url: String,
    pub search: SearchOptions,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same rules with an injectable variable source, for tests.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let app_key = required(&lookup, ENV_APP_KEY)?;
        let app_secret = required(&lookup, ENV_APP_SECRET)?;
        let base_url = lookup(ENV_BASE_URL)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let stop_on_first_match = match lookup(ENV_STOP_ON_FIRST_MATCH) {
            None => false,
            Some(raw) => parse_bool(ENV_STOP_ON_FIRST_MATCH, &raw)?,
        };
        Ok(Self {
            credentials: Credentials::new(app_key, app_secret),
            base_url,
            search: SearchOptions {
                stop_on_first_match,
            },
        })
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(name) {
        None => Err(ConfigError::Missing { name }),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { name }),
        Some(value) => Ok(value),
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        // Empty counts as unset
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(
        pairs: &'a [(&'static str, &'static str)],
    ) -> impl Fn(&'static str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn test_minimal_config() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("APP_KEY", "ck"), ("APP_SECRET", "cs")]))
                .unwrap();
        assert_eq!(config.credentials.app_key, "ck");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.search.stop_on_first_match);
    }

    #[test]
    fn test_missing_credentials_are_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[("APP_KEY", "ck")])).unwrap_err();
        assert!(err.to_string().contains("APP_SECRET"));
    }

    #[test]
    fn test_empty_credential_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("APP_KEY", "ck"),
            ("APP_SECRET", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Empty { name: "APP_SECRET" }));
    }

    #[test]
    fn test_base_url_override() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_KEY", "ck"),
            ("APP_SECRET", "cs"),
            ("DINGTALK_BASE_URL", "http://localhost:8800"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8800");
    }

    #[test]
    fn test_stop_on_first_match_parsing() {
        for truthy in ["1", "true", "YES", "On"] {
            let config = AppConfig::from_lookup(lookup_from(&[
                ("APP_KEY", "ck"),
                ("APP_SECRET", "cs"),
                ("SEARCH_STOP_ON_FIRST_MATCH", truthy),
            ]))
            .unwrap();
            assert!(config.search.stop_on_first_match, "value {truthy}");
        }

        let err = AppConfig::from_lookup(lookup_from(&[
            ("APP_KEY", "ck"),
            ("APP_SECRET", "cs"),
            ("SEARCH_STOP_ON_FIRST_MATCH", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
