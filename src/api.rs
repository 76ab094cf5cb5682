//! The Remote Platform Client seam.
//!
//! Feature modules and the dispatcher talk to Discord exclusively through
//! [`ChatApi`], so unit tests can substitute a fake client. [`SerenityApi`]
//! is the production implementation over serenity's HTTP client.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::builder::{
    CreateEmbed, CreateEmbedFooter, CreateMessage, EditThread, GetMessages,
};
use serenity::http::Http;
use serenity::model::channel::{Channel, ChannelFlags, Message};
use serenity::model::guild::Member;
use serenity::model::id::{ChannelId, GuildId, MessageId, RoleId, UserId};

use crate::types::{ChannelMessage, Embed, MemberInfo, UserInfo};

/// Command surface of the remote chat platform.
///
/// Ids are plain `u64`s; callers are responsible for not passing zero ids
/// (zero means "unconfigured" at the feature level and never reaches here).
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Ban a guild member, deleting their messages from the last
    /// `purge_secs` seconds.
    async fn ban_member(
        &self,
        guild_id: u64,
        user_id: u64,
        purge_secs: u64,
        reason: &str,
    ) -> Result<()>;

    async fn delete_message(&self, channel_id: u64, message_id: u64, reason: &str) -> Result<()>;

    async fn send_text(&self, channel_id: u64, content: &str) -> Result<()>;

    async fn send_embed(&self, channel_id: u64, embed: Embed) -> Result<()>;

    /// Send an embed as a reply to an existing message.
    async fn reply_with_embed(
        &self,
        channel_id: u64,
        message_id: u64,
        embed: Embed,
    ) -> Result<()>;

    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> Result<ChannelMessage>;

    /// The most recent messages in a channel, newest first.
    async fn recent_messages(&self, channel_id: u64, limit: u8) -> Result<Vec<ChannelMessage>>;

    async fn fetch_member(&self, guild_id: u64, user_id: u64) -> Result<MemberInfo>;

    async fn add_role(&self, guild_id: u64, user_id: u64, role_id: u64, reason: &str)
        -> Result<()>;

    /// Parent channel id if the channel is a thread, `None` otherwise.
    async fn thread_parent(&self, channel_id: u64) -> Result<Option<u64>>;

    /// Delete a channel or thread.
    async fn delete_channel(&self, channel_id: u64, reason: &str) -> Result<()>;

    async fn unarchive_thread(&self, channel_id: u64, reason: &str) -> Result<()>;

    async fn pin_thread(&self, channel_id: u64, reason: &str) -> Result<()>;
}

/// Production [`ChatApi`] backed by serenity's HTTP client.
pub struct SerenityApi {
    http: Arc<Http>,
}

impl SerenityApi {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatApi for SerenityApi {
    async fn ban_member(
        &self,
        guild_id: u64,
        user_id: u64,
        purge_secs: u64,
        reason: &str,
    ) -> Result<()> {
        // Discord's ban endpoint takes whole days here; round the purge
        // window up so a one-hour window still removes recent messages.
        let days = purge_secs.div_ceil(86_400).min(7) as u8;
        self.http
            .ban_user(GuildId::new(guild_id), UserId::new(user_id), days, Some(reason))
            .await
            .with_context(|| format!("ban user {user_id} in guild {guild_id}"))
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64, reason: &str) -> Result<()> {
        self.http
            .delete_message(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                Some(reason),
            )
            .await
            .with_context(|| format!("delete message {message_id} in channel {channel_id}"))
    }

    async fn send_text(&self, channel_id: u64, content: &str) -> Result<()> {
        ChannelId::new(channel_id)
            .send_message(&*self.http, CreateMessage::new().content(content))
            .await
            .with_context(|| format!("send message to channel {channel_id}"))?;
        Ok(())
    }

    async fn send_embed(&self, channel_id: u64, embed: Embed) -> Result<()> {
        ChannelId::new(channel_id)
            .send_message(&*self.http, CreateMessage::new().embed(build_embed(embed)))
            .await
            .with_context(|| format!("send embed to channel {channel_id}"))?;
        Ok(())
    }

    async fn reply_with_embed(
        &self,
        channel_id: u64,
        message_id: u64,
        embed: Embed,
    ) -> Result<()> {
        let channel = ChannelId::new(channel_id);
        let builder = CreateMessage::new()
            .embed(build_embed(embed))
            .reference_message((channel, MessageId::new(message_id)));
        channel
            .send_message(&*self.http, builder)
            .await
            .with_context(|| format!("reply to message {message_id} in channel {channel_id}"))?;
        Ok(())
    }

    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> Result<ChannelMessage> {
        let msg = self
            .http
            .get_message(ChannelId::new(channel_id), MessageId::new(message_id))
            .await
            .with_context(|| format!("fetch message {message_id} in channel {channel_id}"))?;
        Ok(message_info(&msg))
    }

    async fn recent_messages(&self, channel_id: u64, limit: u8) -> Result<Vec<ChannelMessage>> {
        let messages = ChannelId::new(channel_id)
            .messages(&*self.http, GetMessages::new().limit(limit))
            .await
            .with_context(|| format!("fetch recent messages in channel {channel_id}"))?;
        Ok(messages.iter().map(message_info).collect())
    }

    async fn fetch_member(&self, guild_id: u64, user_id: u64) -> Result<MemberInfo> {
        let member = self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await
            .with_context(|| format!("fetch member {user_id} in guild {guild_id}"))?;
        Ok(member_info(&member))
    }

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<()> {
        self.http
            .add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(reason),
            )
            .await
            .with_context(|| format!("add role {role_id} to user {user_id}"))
    }

    async fn thread_parent(&self, channel_id: u64) -> Result<Option<u64>> {
        let channel = self
            .http
            .get_channel(ChannelId::new(channel_id))
            .await
            .with_context(|| format!("fetch channel {channel_id}"))?;
        match channel {
            Channel::Guild(chan) if chan.thread_metadata.is_some() => {
                Ok(chan.parent_id.map(|p| p.get()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_channel(&self, channel_id: u64, reason: &str) -> Result<()> {
        self.http
            .delete_channel(ChannelId::new(channel_id), Some(reason))
            .await
            .with_context(|| format!("delete channel {channel_id}"))?;
        Ok(())
    }

    async fn unarchive_thread(&self, channel_id: u64, reason: &str) -> Result<()> {
        ChannelId::new(channel_id)
            .edit_thread(
                &*self.http,
                EditThread::new().archived(false).audit_log_reason(reason),
            )
            .await
            .with_context(|| format!("unarchive thread {channel_id}"))?;
        Ok(())
    }

    async fn pin_thread(&self, channel_id: u64, reason: &str) -> Result<()> {
        ChannelId::new(channel_id)
            .edit_thread(
                &*self.http,
                EditThread::new()
                    .flags(ChannelFlags::PINNED)
                    .audit_log_reason(reason),
            )
            .await
            .with_context(|| format!("pin thread {channel_id}"))?;
        Ok(())
    }
}

fn build_embed(embed: Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(title) = embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = embed.description {
        builder = builder.description(description);
    }
    if let Some(color) = embed.color {
        builder = builder.colour(color);
    }
    for field in embed.fields {
        builder = builder.field(field.name, field.value, field.inline);
    }
    if let Some(footer) = embed.footer {
        let mut f = CreateEmbedFooter::new(footer.text);
        if let Some(icon) = footer.icon_url {
            f = f.icon_url(icon);
        }
        builder = builder.footer(f);
    }
    builder
}

/// Convert a serenity message into the platform-neutral shape.
pub(crate) fn message_info(msg: &Message) -> ChannelMessage {
    ChannelMessage {
        id: msg.id.get(),
        channel_id: msg.channel_id.get(),
        guild_id: msg.guild_id.map(|g| g.get()),
        author: user_info(&msg.author),
        content: msg.content.clone(),
    }
}

pub(crate) fn user_info(user: &serenity::model::user::User) -> UserInfo {
    UserInfo {
        id: user.id.get(),
        username: user.name.clone(),
        display_name: user.global_name.clone(),
        bot: user.bot,
    }
}

pub(crate) fn member_info(member: &Member) -> MemberInfo {
    MemberInfo {
        user: user_info(&member.user),
        guild_id: member.guild_id.get(),
        roles: member.roles.iter().map(|r| r.get()).collect(),
        display_name: member.display_name().to_string(),
    }
}
