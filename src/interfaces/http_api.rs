use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::constants::endpoints;
use crate::data_mgmt::models::StationReading;
use crate::data_mgmt::payload::{parse_stations_data, PayloadError};

#[derive(Error, Debug)]
pub enum HttpError {
    #[error(transparent)]
    Tls(#[from] native_tls::Error),
    #[error(transparent)]
    Transport(#[from] ureq::Transport),
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not read response body: {0}")]
    Body(#[from] std::io::Error),
}

impl From<ureq::Error> for HttpError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => HttpError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => HttpError::Transport(transport),
        }
    }
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("station data request failed: {0}")]
    Http(#[from] HttpError),
    #[error("station data response rejected: {0}")]
    Payload(#[from] PayloadError),
}

impl FetchError {
    /// Whether the provider refused the access token we sent.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            FetchError::Http(HttpError::Status {
                status: 401 | 403,
                ..
            })
        )
    }
}

pub fn build_agent(timeout: Duration) -> Result<ureq::Agent, HttpError> {
    Ok(ureq::AgentBuilder::new()
        .tls_connector(Arc::new(native_tls::TlsConnector::new()?))
        .timeout(timeout)
        .build())
}

/// Client for the weather station provider's HTTP API.
pub struct NetatmoApi {
    agent: ureq::Agent,
    base_url: String,
}

impl NetatmoApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        Ok(Self {
            agent: build_agent(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs a form-encoded body and returns the raw response body.
    pub fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<String, HttpError> {
        let url = format!("{}{}", self.base_url, path);
        log::trace!("POST {url}");
        let response = self.agent.post(&url).send_form(form)?;
        Ok(response.into_string()?)
    }

    pub fn fetch_station_data(&self, access_token: &str) -> Result<StationReading, FetchError> {
        log::debug!("Requesting station data");
        let body = self.post_form(
            endpoints::STATIONS_DATA,
            &[("access_token", access_token)],
        )?;
        Ok(parse_stations_data(&body)?)
    }
}
