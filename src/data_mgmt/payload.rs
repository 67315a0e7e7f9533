use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::models::{Metrics, ModuleReading, StationReading};

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("could not parse station data JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("provider returned error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("malformed station data: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct StationsDataResponse {
    body: Option<StationsDataBody>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct StationsDataBody {
    devices: Option<Vec<DeviceData>>,
}

#[derive(Debug, Deserialize)]
struct DeviceData {
    #[serde(default)]
    module_name: String,
    dashboard_data: Option<Map<String, Value>>,
    #[serde(default)]
    modules: Vec<ModuleData>,
}

#[derive(Debug, Deserialize)]
struct ModuleData {
    #[serde(default)]
    module_name: String,
    // Absent while a module is unreachable
    dashboard_data: Option<Map<String, Value>>,
}

/// Decodes a `getstationsdata` response into a reading of its first device.
pub fn parse_stations_data(raw: &str) -> Result<StationReading, PayloadError> {
    let response: StationsDataResponse = serde_json::from_str(raw)?;

    if let Some(err) = response.error {
        return Err(PayloadError::Api {
            code: err.code,
            message: err.message,
        });
    }

    let device = response
        .body
        .ok_or_else(|| PayloadError::Malformed("missing body".into()))?
        .devices
        .ok_or_else(|| PayloadError::Malformed("missing devices".into()))?
        .into_iter()
        .next()
        .ok_or_else(|| PayloadError::Malformed("no devices in station data".into()))?;

    let dashboard = device.dashboard_data.ok_or_else(|| {
        PayloadError::Malformed(format!(
            "device '{}' has no dashboard data",
            device.module_name
        ))
    })?;

    let modules = device
        .modules
        .into_iter()
        .map(|m| {
            if m.dashboard_data.is_none() {
                log::debug!("Module '{}' reported no dashboard data", m.module_name);
            }
            ModuleReading {
                metrics: m.dashboard_data.as_ref().map(numeric_metrics).unwrap_or_default(),
                module_name: m.module_name,
            }
        })
        .collect();

    Ok(StationReading {
        device: ModuleReading {
            module_name: device.module_name,
            metrics: numeric_metrics(&dashboard),
        },
        modules,
    })
}

// Trend markers and other non-numeric entries are not metrics
fn numeric_metrics(dashboard: &Map<String, Value>) -> Metrics {
    dashboard
        .iter()
        .filter_map(|(name, value)| value.as_f64().map(|v| (name.clone(), v)))
        .collect()
}
