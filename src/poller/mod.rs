mod cycle;
mod schedule;

pub use cycle::{CycleOutcome, PollEvent, Poller};
pub use schedule::PollerHandle;
