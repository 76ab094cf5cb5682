//! Event dispatcher: fans gateway events out to every feature module.
//!
//! Delivery contract:
//! - features receive events in registry order, each in its own task;
//!   `dispatch` does not await handler completion (fire-and-forget), so a
//!   slow handler never delays the next module or the next event;
//! - a handler error is logged and isolated to that module;
//! - no event is delivered before every module's `on_startup` has finished;
//! - reaction events carrying only a message reference are resolved to the
//!   full message first; if resolution fails the event is dropped.

#[path = "dispatch_tests.rs"]
mod dispatch_tests;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::api::ChatApi;
use crate::errors;
use crate::events::{Event, ReactionPayload, ReadyPayload};
use crate::features::Feature;

pub struct Dispatcher {
    api: Arc<dyn ChatApi>,
    features: Vec<Arc<dyn Feature>>,
    ready: watch::Sender<bool>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn ChatApi>, features: Vec<Arc<dyn Feature>>) -> Self {
        Self {
            api,
            features,
            ready: watch::Sender::new(false),
        }
    }

    /// The platform client features talk to.
    pub fn api(&self) -> &Arc<dyn ChatApi> {
        &self.api
    }

    /// Route one event. Returns once handler tasks are spawned, not once
    /// they complete.
    pub async fn dispatch(&self, event: Event) {
        if let Event::Ready(ready) = &event {
            self.run_startup(ready).await;
            return;
        }

        // Hold events that race the gateway handshake until startup is done.
        let mut gate = self.ready.subscribe();
        if gate.wait_for(|open| *open).await.is_err() {
            return;
        }

        let event = match self.resolve(event).await {
            Some(event) => event,
            None => return,
        };

        for feature in &self.features {
            let feature = Arc::clone(feature);
            let api = Arc::clone(&self.api);
            let event = event.clone();
            tokio::spawn(async move {
                let result = match &event {
                    Event::Ready(_) => Ok(()),
                    Event::MessageCreated(msg) => feature.on_message(api.as_ref(), msg).await,
                    Event::MessageDeleted(deleted) => {
                        feature.on_message_delete(api.as_ref(), deleted).await
                    }
                    Event::ReactionAdded(reaction) => {
                        feature.on_reaction_add(api.as_ref(), reaction).await
                    }
                    Event::ReactionRemoved(reaction) => {
                        feature.on_reaction_remove(api.as_ref(), reaction).await
                    }
                    Event::ThreadUpdated(update) => {
                        feature.on_thread_update(api.as_ref(), update).await
                    }
                    Event::InteractionReceived(interaction) => {
                        feature.on_interaction(api.as_ref(), interaction).await
                    }
                };
                if let Err(e) = result {
                    error!(
                        "Feature '{}' failed handling {}: {:#}",
                        feature.name(),
                        event.kind(),
                        e
                    );
                }
            });
        }
    }

    /// Run every feature's startup hook in registry order, then open the
    /// gate. Startup failures are logged and do not block other features.
    async fn run_startup(&self, ready: &ReadyPayload) {
        info!("Running startup hooks ({} features)", self.features.len());
        for feature in &self.features {
            if let Err(e) = feature.on_startup(self.api.as_ref()).await {
                error!("Feature '{}' startup failed: {:#}", feature.name(), e);
            }
        }
        self.ready.send_replace(true);
        info!("Dispatcher ready as {}", ready.username);
    }

    /// Resolve partial payloads before fan-out. `None` drops the event.
    async fn resolve(&self, event: Event) -> Option<Event> {
        match event {
            Event::ReactionAdded(reaction) => {
                Some(Event::ReactionAdded(self.resolve_reaction(reaction).await?))
            }
            Event::ReactionRemoved(reaction) => Some(Event::ReactionRemoved(
                self.resolve_reaction(reaction).await?,
            )),
            other => Some(other),
        }
    }

    async fn resolve_reaction(&self, mut reaction: ReactionPayload) -> Option<ReactionPayload> {
        if reaction.message.is_some() {
            return Some(reaction);
        }
        match self
            .api
            .fetch_message(reaction.channel_id, reaction.message_id)
            .await
        {
            Ok(message) => {
                reaction.message = Some(message);
                Some(reaction)
            }
            Err(e) => {
                errors::log_error("dispatch: resolve reaction message", &e);
                warn!(
                    "Dropping reaction event for message {} in channel {}: unresolvable",
                    reaction.message_id, reaction.channel_id
                );
                None
            }
        }
    }
}
