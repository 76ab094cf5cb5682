//! Platform-neutral domain types shared by events, features, and the API seam.

/// A chat platform user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
    /// Server-agnostic display name, when the platform provides one.
    pub display_name: Option<String>,
    pub bot: bool,
}

impl UserInfo {
    /// The name to show in log entries and embed footers.
    pub fn visible_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// A guild member: the user plus their role memberships in one guild.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberInfo {
    pub user: UserInfo,
    pub guild_id: u64,
    pub roles: Vec<u64>,
    /// Nickname, global display name, or username, in that order.
    pub display_name: String,
}

impl MemberInfo {
    /// True if the member holds any of the given role ids.
    pub fn has_any_role(&self, role_ids: &[u64]) -> bool {
        self.roles.iter().any(|r| role_ids.contains(r))
    }
}

/// A message in a channel, with enough context for routing decisions
/// without re-fetching.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessage {
    pub id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
    pub author: UserInfo,
    pub content: String,
}

/// Embed field
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Embed footer
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: Option<String>,
}

/// Rich embed attached to an outbound message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<EmbedFooter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_name_prefers_display_name() {
        let user = UserInfo {
            id: 1,
            username: "alice".to_string(),
            display_name: Some("Alice".to_string()),
            bot: false,
        };
        assert_eq!(user.visible_name(), "Alice");
    }

    #[test]
    fn test_visible_name_falls_back_to_username() {
        let user = UserInfo {
            id: 1,
            username: "alice".to_string(),
            display_name: None,
            bot: false,
        };
        assert_eq!(user.visible_name(), "alice");
    }

    #[test]
    fn test_has_any_role() {
        let member = MemberInfo {
            user: UserInfo {
                id: 1,
                username: "bob".to_string(),
                display_name: None,
                bot: false,
            },
            guild_id: 100,
            roles: vec![10, 20],
            display_name: "bob".to_string(),
        };
        assert!(member.has_any_role(&[20, 30]));
        assert!(!member.has_any_role(&[30, 40]));
        assert!(!member.has_any_role(&[]));
    }
}
