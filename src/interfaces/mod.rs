pub mod gateway;
pub mod http_api;

pub use gateway::{GatewayConfig, ZipaboxGateway};
pub use http_api::{FetchError, HttpError, NetatmoApi};
