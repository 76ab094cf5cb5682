//! Serenity event handler: converts gateway events into normalized
//! payloads and hands them to the dispatcher.
//!
//! The reply-template command is handled here rather than in a feature
//! module because its collector needs the live shard messenger.

use std::sync::Arc;

use serenity::async_trait;
use serenity::model::application::{Command, Interaction};
use serenity::model::channel::{ChannelFlags, GuildChannel, Message, Reaction};
use serenity::model::gateway::Ready;
use serenity::model::id::{ChannelId, GuildId, MessageId};
use serenity::prelude::*;
use tracing::{error, info};

use crate::api;
use crate::commands::{self, reply_templates::ReplyTemplate};
use crate::dispatch::Dispatcher;
use crate::events::{
    Event, InteractionPayload, MessageDeleted, ReactionPayload, ReadyPayload, ThreadUpdate,
};
use crate::health::HealthState;

/// Everything the handler needs, stored in serenity's type map.
pub struct BotState {
    pub dispatcher: Dispatcher,
    pub templates: Vec<ReplyTemplate>,
    pub health: HealthState,
}

impl TypeMapKey for BotState {
    type Value = Arc<BotState>;
}

pub struct Handler;

async fn state(ctx: &Context) -> Option<Arc<BotState>> {
    let data = ctx.data.read().await;
    let state = data.get::<BotState>();
    if state.is_none() {
        error!("BotState not found in context data");
    }
    state.cloned()
}

fn thread_update(channel: &GuildChannel) -> ThreadUpdate {
    ThreadUpdate {
        thread_id: channel.id.get(),
        parent_id: channel.parent_id.map(|id| id.get()),
        archived: channel
            .thread_metadata
            .as_ref()
            .map_or(false, |meta| meta.archived),
        pinned: channel.flags.contains(ChannelFlags::PINNED),
    }
}

fn reaction_payload(reaction: &Reaction) -> ReactionPayload {
    ReactionPayload {
        channel_id: reaction.channel_id.get(),
        message_id: reaction.message_id.get(),
        user_id: reaction.user_id.map(|id| id.get()),
        guild_id: reaction.guild_id.map(|id| id.get()),
        emoji: reaction.emoji.to_string(),
        message: None,
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Connected to gateway as {}", ready.user.name);

        for definition in commands::definitions() {
            if let Err(e) = Command::create_global_command(&ctx.http, definition).await {
                error!("Failed to register application command: {}", e);
            }
        }

        let Some(state) = state(&ctx).await else {
            return;
        };
        state.health.set_bot_username(ready.user.name.clone()).await;
        state
            .dispatcher
            .dispatch(Event::Ready(ReadyPayload {
                username: ready.user.name.clone(),
            }))
            .await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Bot and webhook traffic never reaches features; the honeypot
        // check for bots is a second line of defense.
        if msg.author.bot {
            return;
        }
        let Some(state) = state(&ctx).await else {
            return;
        };
        state
            .dispatcher
            .dispatch(Event::MessageCreated(api::message_info(&msg)))
            .await;
    }

    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        let Some(state) = state(&ctx).await else {
            return;
        };
        state
            .dispatcher
            .dispatch(Event::MessageDeleted(MessageDeleted {
                channel_id: channel_id.get(),
                message_id: deleted_message_id.get(),
                guild_id: guild_id.map(|id| id.get()),
            }))
            .await;
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        let Some(state) = state(&ctx).await else {
            return;
        };
        state
            .dispatcher
            .dispatch(Event::ReactionAdded(reaction_payload(&reaction)))
            .await;
    }

    async fn reaction_remove(&self, ctx: Context, reaction: Reaction) {
        let Some(state) = state(&ctx).await else {
            return;
        };
        state
            .dispatcher
            .dispatch(Event::ReactionRemoved(reaction_payload(&reaction)))
            .await;
    }

    async fn thread_update(&self, ctx: Context, _old: Option<GuildChannel>, new: GuildChannel) {
        let Some(state) = state(&ctx).await else {
            return;
        };
        state
            .dispatcher
            .dispatch(Event::ThreadUpdated(thread_update(&new)))
            .await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(cmd) = interaction else {
            return;
        };
        let Some(state) = state(&ctx).await else {
            return;
        };

        if cmd.data.name == commands::REPLY_COMMAND {
            let api = Arc::clone(state.dispatcher.api());
            if let Err(e) =
                commands::handle_reply_command(&ctx, api.as_ref(), &state.templates, &cmd).await
            {
                error!("Reply command failed: {:#}", e);
            }
            return;
        }

        state
            .dispatcher
            .dispatch(Event::InteractionReceived(InteractionPayload {
                command: cmd.data.name.clone(),
                user: api::user_info(&cmd.user),
                channel_id: cmd.channel_id.get(),
                guild_id: cmd.guild_id.map(|id| id.get()),
            }))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn thread_channel(flags: u64, archived: bool) -> GuildChannel {
        serde_json::from_value(json!({
            "id": "800",
            "type": 11,
            "guild_id": "1",
            "parent_id": "500",
            "name": "rules",
            "position": 0,
            "flags": flags,
            "thread_metadata": {
                "archived": archived,
                "auto_archive_duration": 1440,
                "archive_timestamp": "2024-01-01T00:00:00Z",
                "locked": false
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_thread_update_reads_pin_flag() {
        // Flag bit 1 (value 2) marks a pinned forum thread.
        let update = thread_update(&thread_channel(2, false));
        assert_eq!(update.thread_id, 800);
        assert_eq!(update.parent_id, Some(500));
        assert!(update.pinned);
        assert!(!update.archived);
    }

    #[test]
    fn test_thread_update_reads_archived_metadata() {
        let update = thread_update(&thread_channel(0, true));
        assert!(update.archived);
        assert!(!update.pinned);
    }
}
