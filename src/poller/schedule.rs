use std::thread::{self, JoinHandle};
use std::time::Duration;

use flume::RecvTimeoutError;

use crate::data_mgmt::{DispatchOutcome, Publisher};

use super::cycle::{CycleOutcome, Poller};

/// Handle to a poller running on its own thread.
pub struct PollerHandle<P> {
    stop_tx: flume::Sender<()>,
    thread: JoinHandle<Poller<P>>,
}

impl<P> PollerHandle<P> {
    /// Prevents further ticks, lets an in-flight cycle finish and hands the
    /// poller back.
    pub fn stop(self) -> thread::Result<Poller<P>> {
        // The loop may already have ended; nothing to signal then
        let _ = self.stop_tx.send(());
        self.thread.join()
    }

    /// Blocks until the loop ends, which only happens on a panic.
    pub fn wait(self) -> thread::Result<Poller<P>> {
        let PollerHandle { stop_tx, thread } = self;
        let poller = thread.join();
        drop(stop_tx);
        poller
    }
}

impl<P: Publisher + Send + 'static> Poller<P> {
    /// Runs the loop on a dedicated thread; the first tick fires immediately.
    pub fn start(mut self, interval: Duration) -> PollerHandle<P> {
        let (stop_tx, stop_rx) = flume::bounded(1);
        let thread = thread::spawn(move || {
            self.run(interval, &stop_rx);
            self
        });
        PollerHandle { stop_tx, thread }
    }
}

impl<P: Publisher> Poller<P> {
    /// Ticks until `stop_rx` fires or disconnects.
    ///
    /// Fixed-delay schedule: the wait for the next tick only begins once the
    /// current tick's requests have completed, so two cycles never overlap.
    pub fn run(&mut self, interval: Duration, stop_rx: &flume::Receiver<()>) {
        log::info!(
            "Entering loop with {:.1} second intervals",
            interval.as_secs_f64()
        );
        loop {
            log_outcome(&self.tick());

            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        log::info!("Polling loop stopped");
    }
}

fn log_outcome(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::Skipped(_) => log::debug!("Cycle skipped: no access token"),
        CycleOutcome::Failed(_) => log::debug!("Cycle dropped: no usable station data"),
        CycleOutcome::Updated { dispatch, .. } => match dispatch {
            DispatchOutcome::Unchanged => log::debug!("Cycle done: no change"),
            DispatchOutcome::Published { metrics, changed } => log::debug!(
                "Cycle done: published {} metrics ({} changed)",
                metrics,
                changed
            ),
            DispatchOutcome::Failed(_) => log::debug!("Cycle done: gateway update failed"),
        },
    }
}
