use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::auth::{Credentials, RawCredentials};
use crate::constants::{defaults, envvars};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("could not read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },
    #[error("could not parse gateway config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct Config {
    pub interval: Duration,
    pub request_timeout: Duration,
    pub api_base_url: String,
    pub gateway_config_path: PathBuf,
    pub credentials: Credentials,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let credentials = Credentials::new(RawCredentials {
            grant_type: var(envvars::GRANT_TYPE),
            username: var(envvars::USERNAME),
            password: var(envvars::PASSWORD),
            client_id: var(envvars::CLIENT_ID),
            client_secret: var(envvars::CLIENT_SECRET),
            access_token: var(envvars::ACCESS_TOKEN),
        })?;

        let interval = parse_seconds(
            envvars::REQ_INTERVAL,
            var(envvars::REQ_INTERVAL)
                .or_else(|| var(envvars::INTERVAL_LEGACY))
                .as_deref(),
            Duration::from_secs(defaults::POLL_INTERVAL_SECS),
        );
        let request_timeout = parse_seconds(
            envvars::REQUEST_TIMEOUT,
            var(envvars::REQUEST_TIMEOUT).as_deref(),
            defaults::API_REQUEST_TIMEOUT,
        );

        Ok(Config {
            interval,
            request_timeout,
            api_base_url: var(envvars::API_BASE_URL)
                .unwrap_or_else(|| defaults::API_BASE_URL.to_string()),
            gateway_config_path: var(envvars::GATEWAY_CONFIG)
                .unwrap_or_else(|| defaults::GATEWAY_CONFIG_PATH.to_string())
                .into(),
            credentials,
        })
    }
}

pub fn verbose_from_env() -> bool {
    var(envvars::VERBOSE).as_deref() == Some("1")
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a positive number of seconds, falling back to `default` otherwise.
pub fn parse_seconds(name: &str, raw: Option<&str>, default: Duration) -> Duration {
    let Some(raw) = raw else {
        return default;
    };
    let parsed = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
    match parsed {
        Some(duration) => duration,
        None => {
            log::warn!(
                "Ignoring {}={:?}; using {}s instead",
                name,
                raw,
                default.as_secs_f64()
            );
            default
        }
    }
}
