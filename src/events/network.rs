use crate::application::Application;
use crate::relay::Relay;
use crate::state::State;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    Submit(Application),
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    relay: &'a Relay,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, relay: &'a Relay) -> Self {
        Handler { state, relay }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Submit(application) => self.submit(application).await?,
        }
        Ok(())
    }

    /// Relay the snapshot once and report the outcome back to the form.
    ///
    async fn submit(&mut self, application: Application) -> Result<()> {
        debug!("Processing submit network event...");
        let outcome = self.relay.submit(&application).await;
        let mut state = self.state.lock().await;
        state.resolve_submission(outcome)?;
        Ok(())
    }
}
