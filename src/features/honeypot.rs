//! Honeypot channel enforcement.
//!
//! Any non-staff, non-bot message in the honeypot channel is treated as
//! proof of automated spam: the author is banned and their recent messages
//! purged. When the ban fails the feature falls back to deleting the
//! triggering message, so some corrective action always lands.

#[path = "honeypot_tests.rs"]
mod honeypot_tests;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::ChatApi;
use crate::config::Config;
use crate::errors;
use crate::features::Feature;
use crate::types::{ChannelMessage, Embed, EmbedField};

pub const BAN_REASON: &str = "Posted in honeypot channel";
/// Purge the offender's messages from the last hour.
pub const BAN_PURGE_SECS: u64 = 3600;
const EMBED_COLOR: u32 = 0xF5_A6_23;

/// Result of one enforcement attempt, for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationOutcome {
    Banned,
    BanFailedFallbackApplied,
    BanFailedFallbackFailed,
}

pub struct HoneypotFeature {
    honeypot_channel: u64,
    mod_log_channel: u64,
    staff_roles: Vec<u64>,
}

impl HoneypotFeature {
    pub fn new(config: &Config) -> Self {
        Self {
            honeypot_channel: config.discord.channels.honeypot,
            mod_log_channel: config.discord.channels.mod_log,
            staff_roles: config.discord.roles.staff.clone(),
        }
    }

    /// Run the enforcement state machine for one message. `None` means the
    /// message was ignored (wrong channel, bot author, staff, or the member
    /// could not be resolved).
    pub async fn enforce(
        &self,
        api: &dyn ChatApi,
        message: &ChannelMessage,
    ) -> Option<ModerationOutcome> {
        if self.honeypot_channel == 0 || message.channel_id != self.honeypot_channel {
            return None;
        }
        if message.author.bot {
            return None;
        }
        let guild_id = message.guild_id?;

        // Staff exemption is absolute and checked before any mutating call.
        // An unresolvable member is ignored rather than banned on suspicion.
        match api.fetch_member(guild_id, message.author.id).await {
            Ok(member) if member.has_any_role(&self.staff_roles) => return None,
            Ok(_) => {}
            Err(e) => {
                errors::log_error("honeypot: resolve member", &e);
                return None;
            }
        }

        match api
            .ban_member(guild_id, message.author.id, BAN_PURGE_SECS, BAN_REASON)
            .await
        {
            Ok(()) => {
                info!(
                    "Banned user {} ({}) for posting in honeypot channel",
                    message.author.visible_name(),
                    message.author.id
                );
                self.post_ban_log(api, message).await;
                Some(ModerationOutcome::Banned)
            }
            Err(e) => {
                errors::log_error("honeypot: ban", &e);
                match self.apply_fallback(api, message).await {
                    Ok(()) => Some(ModerationOutcome::BanFailedFallbackApplied),
                    Err(e) => {
                        errors::log_error("honeypot: fallback delete", &e);
                        Some(ModerationOutcome::BanFailedFallbackFailed)
                    }
                }
            }
        }
    }

    /// Post the ban notice to the mod log. Failures never unwind the ban.
    async fn post_ban_log(&self, api: &dyn ChatApi, message: &ChannelMessage) {
        if self.mod_log_channel == 0 {
            warn!("No mod-log channel configured, skipping honeypot ban notice");
            return;
        }

        let quoted = if message.content.is_empty() {
            "*No text content*".to_string()
        } else {
            format!("```{}```", message.content)
        };
        let embed = Embed {
            title: Some("🍯 Honeypot Ban".to_string()),
            description: Some(format!(
                "User <@{}> was banned for posting in the honeypot channel",
                message.author.id
            )),
            color: Some(EMBED_COLOR),
            fields: vec![EmbedField {
                name: "Message".to_string(),
                value: quoted,
                inline: false,
            }],
            footer: None,
        };

        if let Err(e) = api.send_embed(self.mod_log_channel, embed).await {
            errors::log_error("honeypot: mod-log notice", &e);
        }
    }

    /// Weaker corrective action when the ban is rejected: remove the message
    /// and tell the mod team. The delete is the essential part; a failed log
    /// post still counts as applied.
    async fn apply_fallback(&self, api: &dyn ChatApi, message: &ChannelMessage) -> Result<()> {
        api.delete_message(
            message.channel_id,
            message.id,
            "Honeypot channel violation (ban failed)",
        )
        .await?;

        if self.mod_log_channel != 0 {
            let notice = format!(
                "Honeypot channel violation (ban failed): message by <@{}> in <#{}> was deleted",
                message.author.id, message.channel_id
            );
            if let Err(e) = api.send_text(self.mod_log_channel, &notice).await {
                errors::log_error("honeypot: fallback notice", &e);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Feature for HoneypotFeature {
    fn name(&self) -> &'static str {
        "honeypot"
    }

    async fn on_message(&self, api: &dyn ChatApi, message: &ChannelMessage) -> Result<()> {
        if let Some(outcome) = self.enforce(api, message).await {
            info!(
                "Honeypot outcome for message {} by user {}: {:?}",
                message.id, message.author.id, outcome
            );
        }
        Ok(())
    }
}
