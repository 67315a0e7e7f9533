use std::fmt;

use crate::config::ConfigError;
use crate::constants::defaults;
use crate::helpers::redact;

const PASSWORD_GRANT: &str = "password";

/// Unvalidated credential fields as they come from configuration.
#[derive(Clone, Default)]
pub struct RawCredentials {
    pub grant_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: Option<String>,
}

/// Validated, immutable credentials for the provider.
#[derive(Clone)]
pub enum Credentials {
    /// A pre-issued access token; no exchange is ever performed.
    Static {
        client_id: String,
        access_token: String,
    },
    Exchange(ExchangeCredentials),
}

#[derive(Clone)]
pub struct ExchangeCredentials {
    pub grant_type: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: String,
    pub client_secret: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Credentials {
    pub fn new(raw: RawCredentials) -> Result<Self, ConfigError> {
        let client_id = present(raw.client_id).ok_or(ConfigError::Missing("client_id"))?;

        if let Some(access_token) = present(raw.access_token) {
            return Ok(Credentials::Static {
                client_id,
                access_token,
            });
        }

        let client_secret = present(raw.client_secret)
            .ok_or(ConfigError::Missing("client_secret or access_token"))?;
        let grant_type =
            present(raw.grant_type).unwrap_or_else(|| defaults::GRANT_TYPE.to_string());
        let username = present(raw.username);
        let password = present(raw.password);

        if grant_type == PASSWORD_GRANT {
            if username.is_none() {
                return Err(ConfigError::Missing("username"));
            }
            if password.is_none() {
                return Err(ConfigError::Missing("password"));
            }
        }

        Ok(Credentials::Exchange(ExchangeCredentials {
            grant_type,
            username,
            password,
            client_id,
            client_secret,
        }))
    }

    pub fn client_id(&self) -> &str {
        match self {
            Credentials::Static { client_id, .. } => client_id,
            Credentials::Exchange(creds) => &creds.client_id,
        }
    }
}

impl ExchangeCredentials {
    /// Form fields for the token endpoint; absent values are sent empty.
    pub fn form(&self) -> [(&str, &str); 6] {
        [
            ("grant_type", self.grant_type.as_str()),
            ("username", self.username.as_deref().unwrap_or("")),
            ("password", self.password.as_deref().unwrap_or("")),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", ""),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Static {
                client_id,
                access_token,
            } => f
                .debug_struct("Static")
                .field("client_id", client_id)
                .field("access_token", &redact(access_token))
                .finish(),
            Credentials::Exchange(creds) => fmt::Debug::fmt(creds, f),
        }
    }
}

impl fmt::Debug for ExchangeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("grant_type", &self.grant_type)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}
