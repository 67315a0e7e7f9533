use thiserror::Error;

use crate::interfaces::http_api::HttpError;

use super::models::MetricSet;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("gateway request failed: {0}")]
    Http(#[from] HttpError),
    #[error("gateway answered with status {0}")]
    Status(u16),
    #[error("could not build gateway URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Receives the full set of monitored values whenever any of them changed.
///
/// An `Err` means the update was not accepted; the caller keeps its
/// baseline so the same values are offered again on the next cycle.
pub trait Publisher {
    fn publish(&self, values: &MetricSet) -> Result<(), PublishError>;
}
