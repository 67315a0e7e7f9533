pub mod baseline;
pub mod dispatch;
pub mod models;
pub mod payload;
pub mod publish;

pub use dispatch::{DispatchOutcome, Dispatcher};
pub use models::{MetricKey, MetricSet, ModuleReading, StationReading};
pub use publish::{PublishError, Publisher};
