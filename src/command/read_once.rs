use anyhow::Result;

use crate::auth::TokenManager;
use crate::config::Config;
use crate::interfaces::NetatmoApi;

/// Fetch one station reading and print it as JSON, without publishing
pub fn read_once() -> Result<()> {
    let config = Config::from_env()?;
    let api = NetatmoApi::new(&config.api_base_url, config.request_timeout)?;
    let mut tokens = TokenManager::new(config.credentials);

    let grant = tokens.ensure_token(&api)?;
    let reading = api.fetch_station_data(grant.access_token())?;
    log::info!("Got data from {}", reading.device.module_name);

    println!("{}", serde_json::to_string_pretty(&reading)?);
    Ok(())
}
