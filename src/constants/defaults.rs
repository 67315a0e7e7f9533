use std::time::Duration;

pub const API_BASE_URL: &str = "https://api.netatmo.com";
pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
pub const POLL_INTERVAL_SECS: u64 = 30;
pub const GRANT_TYPE: &str = "password";
pub const GATEWAY_CONFIG_PATH: &str = "zipabox.json";
pub const LOG_LEVEL: &str = "info";
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Held tokens are treated as expired this long before the provider says so
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;
