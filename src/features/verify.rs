//! Intro-channel verification.
//!
//! A member who posts in the intro channel gets the verified role.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::api::ChatApi;
use crate::config::Config;
use crate::errors;
use crate::features::Feature;
use crate::types::ChannelMessage;

pub struct VerifyFeature {
    intro_channel: u64,
    verified_role: u64,
}

impl VerifyFeature {
    pub fn new(config: &Config) -> Self {
        Self {
            intro_channel: config.discord.channels.intro,
            verified_role: config.discord.roles.verified,
        }
    }
}

#[async_trait]
impl Feature for VerifyFeature {
    fn name(&self) -> &'static str {
        "verify"
    }

    async fn on_message(&self, api: &dyn ChatApi, message: &ChannelMessage) -> Result<()> {
        if self.intro_channel == 0 || self.verified_role == 0 {
            return Ok(());
        }
        if message.channel_id != self.intro_channel || message.author.bot {
            return Ok(());
        }
        let Some(guild_id) = message.guild_id else {
            return Ok(());
        };

        match api
            .add_role(
                guild_id,
                message.author.id,
                self.verified_role,
                "Introduced themselves",
            )
            .await
        {
            Ok(()) => debug!(
                "Granted verified role to {} ({})",
                message.author.username, message.author.id
            ),
            Err(e) => errors::log_error("verify: add role", &e),
        }
        Ok(())
    }
}
