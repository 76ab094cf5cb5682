//! Feature modules: self-contained units of moderation policy.
//!
//! A module implements only the handlers it cares about; the defaults ignore
//! the event. Modules share no state with each other; anything one module
//! does that another can observe goes through the platform itself.

pub mod honeypot;
pub mod pinned_threads;
pub mod thread_cleanup;
pub mod verify;

use anyhow::Result;
use async_trait::async_trait;

use crate::api::ChatApi;
use crate::events::{InteractionPayload, MessageDeleted, ReactionPayload, ThreadUpdate};
use crate::types::ChannelMessage;

/// Contract every feature module implements.
///
/// Handlers return `Err` to signal an unrecoverable failure for this event;
/// the dispatcher logs it and carries on with other modules.
#[async_trait]
pub trait Feature: Send + Sync {
    /// Stable name; registry order is lexicographic over these.
    fn name(&self) -> &'static str;

    /// Runs once after the gateway connects, before any event is delivered.
    async fn on_startup(&self, _api: &dyn ChatApi) -> Result<()> {
        Ok(())
    }

    async fn on_message(&self, _api: &dyn ChatApi, _message: &ChannelMessage) -> Result<()> {
        Ok(())
    }

    async fn on_message_delete(
        &self,
        _api: &dyn ChatApi,
        _deleted: &MessageDeleted,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_reaction_add(&self, _api: &dyn ChatApi, _reaction: &ReactionPayload) -> Result<()> {
        Ok(())
    }

    async fn on_reaction_remove(
        &self,
        _api: &dyn ChatApi,
        _reaction: &ReactionPayload,
    ) -> Result<()> {
        Ok(())
    }

    async fn on_thread_update(&self, _api: &dyn ChatApi, _update: &ThreadUpdate) -> Result<()> {
        Ok(())
    }

    async fn on_interaction(
        &self,
        _api: &dyn ChatApi,
        _interaction: &InteractionPayload,
    ) -> Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for dyn Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feature").field("name", &self.name()).finish()
    }
}
