use crate::auth::{AuthError, Token, TokenGrant, TokenManager};
use crate::data_mgmt::{DispatchOutcome, Dispatcher, Publisher, StationReading};
use crate::helpers::redact;
use crate::interfaces::{FetchError, NetatmoApi};

/// Notification sent to subscribers while polling.
#[derive(Clone, Debug, PartialEq)]
pub enum PollEvent {
    TokenAcquired(Token),
    Update(StationReading),
}

/// What a single tick amounted to.
#[derive(Debug)]
pub enum CycleOutcome {
    /// No token could be obtained; nothing was fetched.
    Skipped(AuthError),
    /// The station data request failed or returned something unusable.
    Failed(FetchError),
    Updated {
        reading: StationReading,
        dispatch: DispatchOutcome,
    },
}

/// Polling state: provider client, held token and change-detection baseline.
///
/// Only the thread driving [`Poller::tick`] touches this state, so cycles
/// never observe each other half-done.
pub struct Poller<P> {
    api: NetatmoApi,
    tokens: TokenManager,
    dispatcher: Dispatcher<P>,
    subscribers: Vec<flume::Sender<PollEvent>>,
}

impl<P: Publisher> Poller<P> {
    pub fn new(api: NetatmoApi, tokens: TokenManager, dispatcher: Dispatcher<P>) -> Self {
        Self {
            api,
            tokens,
            dispatcher,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> flume::Receiver<PollEvent> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn dispatcher(&self) -> &Dispatcher<P> {
        &self.dispatcher
    }

    pub fn tick(&mut self) -> CycleOutcome {
        let access_token = match self.tokens.ensure_token(&self.api) {
            Ok(TokenGrant::Held(token)) => token,
            Ok(TokenGrant::Acquired(token)) => {
                log::info!("Acquired access token {}", redact(&token.access_token));
                let access_token = token.access_token.clone();
                self.notify(PollEvent::TokenAcquired(token));
                access_token
            }
            Err(e) => {
                log::error!("Token exchange failed; skipping this cycle: {}", e);
                return CycleOutcome::Skipped(e);
            }
        };

        let reading = match self.api.fetch_station_data(&access_token) {
            Ok(reading) => reading,
            Err(e) => {
                log::error!("Could not get station data: {}", e);
                if e.is_unauthorized() {
                    self.tokens.invalidate();
                }
                return CycleOutcome::Failed(e);
            }
        };

        log::info!(
            "Got data from {} ({} metrics, {} modules)",
            reading.device.module_name,
            reading.device.metrics.len(),
            reading.modules.len()
        );
        self.notify(PollEvent::Update(reading.clone()));

        let dispatch = self.dispatcher.dispatch(&reading);
        CycleOutcome::Updated { reading, dispatch }
    }

    fn notify(&mut self, event: PollEvent) {
        // Receivers that went away are dropped from the list
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
