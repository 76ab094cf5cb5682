//! Test support: a fake platform client with a recorded call log, plus
//! builders for domain objects.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::api::ChatApi;
use crate::types::{ChannelMessage, Embed, MemberInfo, UserInfo};

/// One recorded call against [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Ban {
        guild_id: u64,
        user_id: u64,
        purge_secs: u64,
        reason: String,
    },
    DeleteMessage {
        channel_id: u64,
        message_id: u64,
        reason: String,
    },
    SendText {
        channel_id: u64,
        content: String,
    },
    SendEmbed {
        channel_id: u64,
        embed: Embed,
    },
    ReplyWithEmbed {
        channel_id: u64,
        message_id: u64,
        embed: Embed,
    },
    FetchMessage {
        channel_id: u64,
        message_id: u64,
    },
    RecentMessages {
        channel_id: u64,
        limit: u8,
    },
    FetchMember {
        guild_id: u64,
        user_id: u64,
    },
    AddRole {
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    },
    ThreadParent {
        channel_id: u64,
    },
    DeleteChannel {
        channel_id: u64,
    },
    UnarchiveThread {
        channel_id: u64,
    },
    PinThread {
        channel_id: u64,
    },
}

/// In-memory [`ChatApi`] with programmable lookups and failure switches.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<ApiCall>>,
    members: Mutex<HashMap<(u64, u64), MemberInfo>>,
    messages: Mutex<HashMap<(u64, u64), ChannelMessage>>,
    recent: Mutex<HashMap<u64, Vec<ChannelMessage>>>,
    parents: Mutex<HashMap<u64, u64>>,
    pub fail_ban: bool,
    pub fail_delete_message: bool,
    pub fail_send: bool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(self, member: MemberInfo) -> Self {
        self.members
            .lock()
            .unwrap()
            .insert((member.guild_id, member.user.id), member);
        self
    }

    pub fn with_message(self, message: ChannelMessage) -> Self {
        self.messages
            .lock()
            .unwrap()
            .insert((message.channel_id, message.id), message);
        self
    }

    pub fn with_recent(self, channel_id: u64, messages: Vec<ChannelMessage>) -> Self {
        self.recent.lock().unwrap().insert(channel_id, messages);
        self
    }

    pub fn with_thread_parent(self, thread_id: u64, parent_id: u64) -> Self {
        self.parents.lock().unwrap().insert(thread_id, parent_id);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatApi for FakeApi {
    async fn ban_member(
        &self,
        guild_id: u64,
        user_id: u64,
        purge_secs: u64,
        reason: &str,
    ) -> Result<()> {
        self.record(ApiCall::Ban {
            guild_id,
            user_id,
            purge_secs,
            reason: reason.to_string(),
        });
        if self.fail_ban {
            return Err(anyhow!("ban rejected"));
        }
        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64, reason: &str) -> Result<()> {
        self.record(ApiCall::DeleteMessage {
            channel_id,
            message_id,
            reason: reason.to_string(),
        });
        if self.fail_delete_message {
            return Err(anyhow!("delete rejected"));
        }
        Ok(())
    }

    async fn send_text(&self, channel_id: u64, content: &str) -> Result<()> {
        self.record(ApiCall::SendText {
            channel_id,
            content: content.to_string(),
        });
        if self.fail_send {
            return Err(anyhow!("send rejected"));
        }
        Ok(())
    }

    async fn send_embed(&self, channel_id: u64, embed: Embed) -> Result<()> {
        self.record(ApiCall::SendEmbed { channel_id, embed });
        if self.fail_send {
            return Err(anyhow!("send rejected"));
        }
        Ok(())
    }

    async fn reply_with_embed(
        &self,
        channel_id: u64,
        message_id: u64,
        embed: Embed,
    ) -> Result<()> {
        self.record(ApiCall::ReplyWithEmbed {
            channel_id,
            message_id,
            embed,
        });
        if self.fail_send {
            return Err(anyhow!("send rejected"));
        }
        Ok(())
    }

    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> Result<ChannelMessage> {
        self.record(ApiCall::FetchMessage {
            channel_id,
            message_id,
        });
        self.messages
            .lock()
            .unwrap()
            .get(&(channel_id, message_id))
            .cloned()
            .ok_or_else(|| anyhow!("unknown message {message_id}"))
    }

    async fn recent_messages(&self, channel_id: u64, limit: u8) -> Result<Vec<ChannelMessage>> {
        self.record(ApiCall::RecentMessages { channel_id, limit });
        Ok(self
            .recent
            .lock()
            .unwrap()
            .get(&channel_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_member(&self, guild_id: u64, user_id: u64) -> Result<MemberInfo> {
        self.record(ApiCall::FetchMember { guild_id, user_id });
        self.members
            .lock()
            .unwrap()
            .get(&(guild_id, user_id))
            .cloned()
            .ok_or_else(|| anyhow!("unknown member {user_id}"))
    }

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        _reason: &str,
    ) -> Result<()> {
        self.record(ApiCall::AddRole {
            guild_id,
            user_id,
            role_id,
        });
        Ok(())
    }

    async fn thread_parent(&self, channel_id: u64) -> Result<Option<u64>> {
        self.record(ApiCall::ThreadParent { channel_id });
        Ok(self.parents.lock().unwrap().get(&channel_id).copied())
    }

    async fn delete_channel(&self, channel_id: u64, _reason: &str) -> Result<()> {
        self.record(ApiCall::DeleteChannel { channel_id });
        Ok(())
    }

    async fn unarchive_thread(&self, channel_id: u64, _reason: &str) -> Result<()> {
        self.record(ApiCall::UnarchiveThread { channel_id });
        Ok(())
    }

    async fn pin_thread(&self, channel_id: u64, _reason: &str) -> Result<()> {
        self.record(ApiCall::PinThread { channel_id });
        Ok(())
    }
}

// builders

pub fn user(id: u64, username: &str) -> UserInfo {
    UserInfo {
        id,
        username: username.to_string(),
        display_name: None,
        bot: false,
    }
}

pub fn bot_user(id: u64, username: &str) -> UserInfo {
    UserInfo {
        bot: true,
        ..user(id, username)
    }
}

pub fn member(guild_id: u64, author: &UserInfo, roles: Vec<u64>) -> MemberInfo {
    MemberInfo {
        user: author.clone(),
        guild_id,
        roles,
        display_name: author.username.clone(),
    }
}

pub fn guild_message(
    id: u64,
    channel_id: u64,
    guild_id: u64,
    author: &UserInfo,
    content: &str,
) -> ChannelMessage {
    ChannelMessage {
        id,
        channel_id,
        guild_id: Some(guild_id),
        author: author.clone(),
        content: content.to_string(),
    }
}
