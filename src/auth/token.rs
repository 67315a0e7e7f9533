use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{defaults, endpoints};
use crate::helpers::{self, redact};
use crate::interfaces::http_api::{HttpError, NetatmoApi};

use super::credentials::{Credentials, ExchangeCredentials};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Http(#[from] HttpError),
    #[error("could not parse token response: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("token response carried an empty access token")]
    EmptyToken,
}

/// Token record returned by the provider's token endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Currently held token; replaced wholesale on every exchange.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenState {
    pub fn from_token(token: &Token, received_at: DateTime<Utc>) -> Self {
        Self {
            access_token: Some(token.access_token.clone()),
            refresh_token: token.refresh_token.clone(),
            expires_at: token.expires_in.and_then(|secs| {
                let expires_at = helpers::after_secs(received_at, secs);
                if expires_at.is_none() {
                    log::warn!("Ignoring out-of-range token lifetime of {}s", secs);
                }
                expires_at
            }),
        }
    }

    /// The held access token, unless it is absent or about to expire.
    pub fn usable_token(&self, now: DateTime<Utc>) -> Option<&str> {
        let token = self.access_token.as_deref()?;
        let Some(expires_at) = self.expires_at else {
            return Some(token);
        };
        let margin = TimeDelta::seconds(defaults::TOKEN_EXPIRY_MARGIN_SECS);
        match expires_at.checked_sub_signed(margin) {
            Some(renew_at) if now < renew_at => Some(token),
            _ => None,
        }
    }
}

/// Result of [`TokenManager::ensure_token`].
#[derive(Clone, Debug, PartialEq)]
pub enum TokenGrant {
    /// A token that was already held (or a static one).
    Held(String),
    /// A token obtained by an exchange during this call.
    Acquired(Token),
}

impl TokenGrant {
    pub fn access_token(&self) -> &str {
        match self {
            TokenGrant::Held(token) => token,
            TokenGrant::Acquired(token) => &token.access_token,
        }
    }
}

/// Owns the credentials and the held token.
///
/// Never refreshes on its own; a token is only requested when none is held
/// (or the held one has expired). Failed exchanges are not retried here.
pub struct TokenManager {
    credentials: Credentials,
    state: TokenState,
}

impl TokenManager {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            state: TokenState::default(),
        }
    }

    pub fn state(&self) -> &TokenState {
        &self.state
    }

    pub fn has_token(&self) -> bool {
        match &self.credentials {
            Credentials::Static { .. } => true,
            Credentials::Exchange(_) => self.state.usable_token(helpers::now()).is_some(),
        }
    }

    pub fn ensure_token(&mut self, api: &NetatmoApi) -> Result<TokenGrant, AuthError> {
        let creds = match &self.credentials {
            Credentials::Static { access_token, .. } => {
                return Ok(TokenGrant::Held(access_token.clone()))
            }
            Credentials::Exchange(creds) => creds,
        };

        if let Some(token) = self.state.usable_token(helpers::now()) {
            return Ok(TokenGrant::Held(token.to_string()));
        }
        if self.state.access_token.is_some() {
            log::info!("Access token expired; requesting a new one");
        }

        let token = exchange(api, creds)?;
        self.state = TokenState::from_token(&token, helpers::now());
        Ok(TokenGrant::Acquired(token))
    }

    /// Drops the held token so the next call performs a new exchange.
    pub fn invalidate(&mut self) {
        if self.state.access_token.is_some() {
            log::warn!("Discarding access token rejected by the provider");
        }
        self.state = TokenState::default();
    }
}

fn exchange(api: &NetatmoApi, creds: &ExchangeCredentials) -> Result<Token, AuthError> {
    log::debug!(
        "Getting access token for client {} with grant type {}",
        creds.client_id,
        creds.grant_type
    );
    let body = api.post_form(endpoints::TOKEN, &creds.form())?;
    let token: Token = serde_json::from_str(&body)?;
    if token.access_token.is_empty() {
        return Err(AuthError::EmptyToken);
    }
    log::debug!(
        "Got access token {} (expires in {:?}s)",
        redact(&token.access_token),
        token.expires_in
    );
    Ok(token)
}
