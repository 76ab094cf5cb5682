//! Help-forum thread cleanup.
//!
//! When the author of a help thread deletes their opening message, the
//! thread is dead weight. If nobody else (human) has replied, remove the
//! whole thread; otherwise ask the mod team to clean up by hand.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::api::ChatApi;
use crate::config::Config;
use crate::errors;
use crate::events::MessageDeleted;
use crate::features::Feature;

/// How many recent messages to inspect for human activity.
const SAMPLE_LIMIT: u8 = 10;

pub struct ThreadCleanupFeature {
    help_forum: u64,
    mod_log_channel: u64,
}

impl ThreadCleanupFeature {
    pub fn new(config: &Config) -> Self {
        Self {
            help_forum: config.discord.channels.help_forum,
            mod_log_channel: config.discord.channels.mod_log,
        }
    }
}

#[async_trait]
impl Feature for ThreadCleanupFeature {
    fn name(&self) -> &'static str {
        "thread_cleanup"
    }

    async fn on_message_delete(&self, api: &dyn ChatApi, deleted: &MessageDeleted) -> Result<()> {
        if self.help_forum == 0 {
            return Ok(());
        }
        // A thread-starter message shares its id with the thread channel.
        if deleted.message_id != deleted.channel_id || deleted.guild_id.is_none() {
            return Ok(());
        }

        let parent = match api.thread_parent(deleted.channel_id).await {
            Ok(parent) => parent,
            Err(e) => {
                errors::log_error("thread_cleanup: resolve channel", &e);
                return Ok(());
            }
        };
        if parent != Some(self.help_forum) {
            return Ok(());
        }

        let messages = match api.recent_messages(deleted.channel_id, SAMPLE_LIMIT).await {
            Ok(messages) => messages,
            Err(e) => {
                errors::log_error("thread_cleanup: fetch messages", &e);
                return Ok(());
            }
        };

        let has_human_replies = messages.iter().any(|m| !m.author.bot);
        if has_human_replies {
            debug!(
                "Thread {} kept: human replies remain after starter deletion",
                deleted.channel_id
            );
            if self.mod_log_channel != 0 {
                let notice = format!(
                    "Original message in thread deleted: <#{}>",
                    deleted.channel_id
                );
                if let Err(e) = api.send_text(self.mod_log_channel, &notice).await {
                    errors::log_error("thread_cleanup: mod-log notice", &e);
                }
            }
        } else {
            info!(
                "Deleting thread {}: starter message removed, no human replies",
                deleted.channel_id
            );
            if let Err(e) = api
                .delete_channel(
                    deleted.channel_id,
                    "OP deleted initial message, so removing thread",
                )
                .await
            {
                errors::log_error("thread_cleanup: delete thread", &e);
            }
        }
        Ok(())
    }
}
