use resource_sync::{DeletePolicy, SyncOptions};
use std::time::Duration;

/// Console configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local API. A `.env` file in the working
/// directory is honored by the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Base address of the REST API (default: `http://localhost:8080`).
    pub api_url: String,
    /// Per-request HTTP timeout. `None` waits as long as the transport does.
    pub request_timeout: Option<Duration>,
    /// Mailbox size of each synchronizer (default: `32`).
    pub channel_buffer: usize,
    pub sync: SyncOptions,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".into(),
            request_timeout: None,
            channel_buffer: 32,
            sync: SyncOptions::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ConsoleConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `INVENTORY_API_URL`              | `http://localhost:8080` |
    /// | `INVENTORY_REQUEST_TIMEOUT_SECS` | unset                   |
    /// | `INVENTORY_CHANNEL_BUFFER`       | `32`                    |
    /// | `INVENTORY_STRICT_VALIDATION`    | `false`                 |
    /// | `INVENTORY_DELETE_POLICY`        | `reload`                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_url = var("INVENTORY_API_URL").unwrap_or(defaults.api_url);

        let request_timeout = match var("INVENTORY_REQUEST_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(parse(
                "INVENTORY_REQUEST_TIMEOUT_SECS",
                "a whole number of seconds",
                value,
            )?)),
            None => None,
        };

        let channel_buffer = match var("INVENTORY_CHANNEL_BUFFER") {
            Some(value) => {
                let size: usize =
                    parse("INVENTORY_CHANNEL_BUFFER", "a positive integer", value.clone())?;
                if size == 0 {
                    return Err(invalid("INVENTORY_CHANNEL_BUFFER", "a positive integer", value));
                }
                size
            }
            None => defaults.channel_buffer,
        };

        let strict = match var("INVENTORY_STRICT_VALIDATION") {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => return Err(invalid("INVENTORY_STRICT_VALIDATION", "true or false", value)),
            },
            None => false,
        };

        let delete_policy = match var("INVENTORY_DELETE_POLICY") {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "reload" => DeletePolicy::Reload,
                "splice" => DeletePolicy::Splice,
                _ => return Err(invalid("INVENTORY_DELETE_POLICY", "reload or splice", value)),
            },
            None => DeletePolicy::default(),
        };

        Ok(Self {
            api_url,
            request_timeout,
            channel_buffer,
            sync: SyncOptions {
                strict,
                delete_policy,
            },
        })
    }
}

fn parse<N: std::str::FromStr>(
    key: &'static str,
    expected: &'static str,
    value: String,
) -> Result<N, ConfigError> {
    value.parse().map_err(|_| invalid(key, expected, value))
}

fn invalid(key: &'static str, expected: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid {
        key,
        expected,
        value,
    }
}
