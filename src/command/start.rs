use anyhow::{anyhow, Result};

use crate::auth::TokenManager;
use crate::config::Config;
use crate::data_mgmt::Dispatcher;
use crate::interfaces::{GatewayConfig, NetatmoApi, ZipaboxGateway};
use crate::poller::Poller;

/// Start polling the station and forwarding changes to the gateway
pub fn start() -> Result<()> {
    log::info!(
        "Starting Netatmo Zipabox Dispatcher v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    log::debug!("Configuration: {:?}", config);
    log::info!("Using Netatmo client {}", config.credentials.client_id());

    let gateway_config = GatewayConfig::from_file(&config.gateway_config_path)?;
    let monitored = gateway_config.monitored_metrics();

    let api = NetatmoApi::new(&config.api_base_url, config.request_timeout)?;
    let gateway = ZipaboxGateway::new(gateway_config, config.request_timeout)?;
    let dispatcher = Dispatcher::new(gateway, monitored);
    log::info!(
        "Monitoring {} metrics: {}",
        dispatcher.monitored().len(),
        dispatcher
            .monitored()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let poller = Poller::new(api, TokenManager::new(config.credentials), dispatcher);

    poller
        .start(config.interval)
        .wait()
        .map_err(|_| anyhow!("Polling thread panicked"))?;
    Ok(())
}
