//! Normalized gateway events routed through the dispatcher.
//!
//! The gateway layer converts platform models into these payloads so that
//! feature modules (and their tests) never touch the platform SDK directly.

use crate::types::{ChannelMessage, UserInfo};

/// Gateway connected and identified.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyPayload {
    pub username: String,
}

/// A message was deleted. For thread-starter messages the message id equals
/// the thread's channel id.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDeleted {
    pub channel_id: u64,
    pub message_id: u64,
    pub guild_id: Option<u64>,
}

/// A reaction was added to or removed from a message.
///
/// `message` is `None` when the platform delivered only a reference; the
/// dispatcher resolves it to the full message before fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionPayload {
    pub channel_id: u64,
    pub message_id: u64,
    pub user_id: Option<u64>,
    pub guild_id: Option<u64>,
    pub emoji: String,
    pub message: Option<ChannelMessage>,
}

/// A thread channel changed state.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadUpdate {
    pub thread_id: u64,
    pub parent_id: Option<u64>,
    pub archived: bool,
    pub pinned: bool,
}

/// An application command or component interaction arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionPayload {
    pub command: String,
    pub user: UserInfo,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
}

/// The tagged union of platform occurrences the dispatcher recognizes.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Ready(ReadyPayload),
    MessageCreated(ChannelMessage),
    MessageDeleted(MessageDeleted),
    ReactionAdded(ReactionPayload),
    ReactionRemoved(ReactionPayload),
    ThreadUpdated(ThreadUpdate),
    InteractionReceived(InteractionPayload),
}

impl Event {
    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Ready(_) => "ready",
            Event::MessageCreated(_) => "message_created",
            Event::MessageDeleted(_) => "message_deleted",
            Event::ReactionAdded(_) => "reaction_added",
            Event::ReactionRemoved(_) => "reaction_removed",
            Event::ThreadUpdated(_) => "thread_updated",
            Event::InteractionReceived(_) => "interaction_received",
        }
    }
}
