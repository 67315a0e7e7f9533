pub const LOG_LEVEL: &str = "LOGGING_LEVEL";
pub const ENV_FILE: &str = "NETATMO_ENV_FILE";

pub const VERBOSE: &str = "NETATMO_VERBOSE";
pub const REQ_INTERVAL: &str = "NETATMO_REQ_INTERVAL";
pub const INTERVAL_LEGACY: &str = "NETATMO_INTERVAL";
pub const GRANT_TYPE: &str = "NETATMO_GRANT_TYPE";
pub const USERNAME: &str = "NETATMO_USERNAME";
pub const PASSWORD: &str = "NETATMO_PASSWORD";
pub const CLIENT_ID: &str = "NETATMO_CLIENT_ID";
pub const CLIENT_SECRET: &str = "NETATMO_CLIENT_SECRET";
pub const ACCESS_TOKEN: &str = "NETATMO_ACCESS_TOKEN";
pub const API_BASE_URL: &str = "NETATMO_API_BASE_URL";
pub const REQUEST_TIMEOUT: &str = "NETATMO_REQUEST_TIMEOUT";

pub const GATEWAY_CONFIG: &str = "ZIPABOX_CONFIG";
