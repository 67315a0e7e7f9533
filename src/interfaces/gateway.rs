use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::ConfigError;
use crate::data_mgmt::models::{MetricKey, MetricSet};
use crate::data_mgmt::publish::{PublishError, Publisher};

use super::http_api::{build_agent, HttpError};

const STATUS_OK: u16 = 200;

/// Mapping of station and module metrics to Zipabox channel identifiers.
///
/// ```json
/// {
///     "baseurl": "https://my.zipato.com/zipato-web/remoting/attribute/set?serial=XXXX&apiKey=YYYY",
///     "station": {"Temperature": "ch-1", "CO2": "ch-2"},
///     "modules": {"Outdoor": {"Temperature": "ch-3"}}
/// }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GatewayConfig {
    pub baseurl: String,
    #[serde(default)]
    pub station: BTreeMap<String, String>,
    #[serde(default)]
    pub modules: BTreeMap<String, BTreeMap<String, String>>,
}

impl FromStr for GatewayConfig {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let config: GatewayConfig = serde_json::from_str(raw)?;
        Url::parse(&config.baseurl).map_err(|e| ConfigError::Invalid {
            name: "baseurl",
            reason: e.to_string(),
        })?;
        Ok(config)
    }
}

impl GatewayConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        raw.parse()
    }

    /// Every metric with a gateway channel, station metrics first.
    pub fn monitored_metrics(&self) -> Vec<MetricKey> {
        let station = self.station.keys().map(MetricKey::station);
        let modules = self.modules.iter().flat_map(|(module, metrics)| {
            metrics
                .keys()
                .map(move |metric| MetricKey::module(module.as_str(), metric.as_str()))
        });
        station.chain(modules).collect()
    }

    pub fn channel_for(&self, key: &MetricKey) -> Option<&str> {
        let channel = match key {
            MetricKey::Station(metric) => self.station.get(metric),
            MetricKey::Module { module, metric } => {
                self.modules.get(module).and_then(|m| m.get(metric))
            }
        };
        channel.map(String::as_str)
    }
}

/// Publishes metric values to a Zipabox with a single GET request.
pub struct ZipaboxGateway {
    agent: ureq::Agent,
    config: GatewayConfig,
}

impl ZipaboxGateway {
    pub fn new(config: GatewayConfig, timeout: Duration) -> Result<Self, HttpError> {
        Ok(Self {
            agent: build_agent(timeout)?,
            config,
        })
    }

    /// Base URL with one `channel=value` pair appended per mapped metric.
    pub fn update_url(&self, values: &MetricSet) -> Result<Url, PublishError> {
        let mut url = Url::parse(&self.config.baseurl)?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in values {
                match self.config.channel_for(key) {
                    Some(channel) => {
                        query.append_pair(channel, &value.to_string());
                    }
                    None => log::warn!("No gateway channel for {}; leaving it out", key),
                }
            }
        }
        Ok(url)
    }
}

impl Publisher for ZipaboxGateway {
    fn publish(&self, values: &MetricSet) -> Result<(), PublishError> {
        let url = self.update_url(values)?;
        log::debug!("zipabox: preparing to update - {}", url.path());

        let response = self
            .agent
            .request_url("GET", &url)
            .call()
            .map_err(HttpError::from)
            .map_err(|e| match e.status() {
                Some(status) => PublishError::Status(status),
                None => PublishError::Http(e),
            })?;

        let status = response.status();
        log::info!("zipabox: did update: {}", status);
        if status != STATUS_OK {
            return Err(PublishError::Status(status));
        }
        Ok(())
    }
}
