//! Canned moderator replies.
//!
//! The catalog is static apart from channel mentions, which come from
//! config so the texts stay correct across servers.

use crate::config::ChannelConfig;
use crate::types::{Embed, EmbedFooter};

/// One canned reply a moderator can post under a message.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyTemplate {
    /// Menu label; also the selection key.
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub title: String,
    pub body: String,
}

fn mention(channel_id: u64) -> String {
    format!("<#{channel_id}>")
}

/// Build the full catalog for this server's channel layout.
pub fn catalog(channels: &ChannelConfig) -> Vec<ReplyTemplate> {
    let help = mention(channels.help_forum);
    vec![
        ReplyTemplate {
            name: "Use #help-forum to get help",
            description: Some("The help forum is the best place to ask questions"),
            title: "Use the help forum for questions".to_string(),
            body: format!(
                "Got a question? Head over to the {help} channel. \
                 It's our go-to spot for all your questions."
            ),
        },
        ReplyTemplate {
            name: "Discussions",
            description: Some("Explains why the user doesn't have access to the discussions channel"),
            title: "Access to Discussions Channel".to_string(),
            body: format!(
                "We have limited write access to {}. You need to be active in the {help} \
                 channel to gain write access.",
                mention(channels.discussions)
            ),
        },
        ReplyTemplate {
            name: "Not Enough Info",
            description: Some("Replies with directions for questions with not enough information"),
            title: "Please add more information to your question".to_string(),
            body: "Your question currently does not have sufficient information for people \
                   to be able to help. Please add more information to help us help you, for \
                   example: relevant code snippets, a reproduction repository, and/or more \
                   detailed error messages."
                .to_string(),
        },
        ReplyTemplate {
            name: "Improve Forum Question Title",
            description: Some("Tell the user to update their question title to make it more descriptive"),
            title: "Please improve the title of your question".to_string(),
            body: "To ensure you get the best possible assistance, could you please change \
                   your thread title to be more descriptive? Specific titles attract the \
                   attention of users who can help and make it easier for others to find \
                   similar solutions in the future. You can change the title by going to \
                   `•••` → `Edit Post` → `Post Title`."
                .to_string(),
        },
        ReplyTemplate {
            name: "Crossposting or Reposting",
            description: Some("Keep the question in one channel and wait for a response"),
            title: "Crossposting and reposting the same question across different channels \
                    is not allowed"
                .to_string(),
            body: "Crossposting (posting a question in a channel and sending the question \
                   link to another channel) and reposting (posting the same question in \
                   several channels) are not allowed in this server. See the server rules \
                   for more information."
                .to_string(),
        },
        ReplyTemplate {
            name: "Don't Ask to Ask",
            description: None,
            title: "Don't ask to ask, just ask!".to_string(),
            body: "Please just ask your question directly: https://dontasktoask.com."
                .to_string(),
        },
        ReplyTemplate {
            name: "Explain Why a Help Post is not Answered",
            description: Some("Let the user know why their post is not replied, and future directions for them."),
            title: "Why your post might have not had answers".to_string(),
            body: [
                "People who help here are all volunteers, they are not paid so not required \
                 to attend to any forum posts. So if a post doesn't have a response, there \
                 are four possible cases:",
                "1. People who may help have not been active yet or did not find the \
                 question. In this case you can bump the question later to make it float up \
                 the channel. Don't do it more than once per day.",
                "2. No one can answer, usually because the question concerns technologies \
                 that are too niche or the question is too hard.",
                "3. The question is bad. Following the resources for good questions will \
                 help you avoid this third scenario.",
                "4. The question is too long. Keep it concise please, people who help may \
                 not have sufficient spare time and energy to read through a help request \
                 that is too long.",
            ]
            .join("\n\n"),
        },
        ReplyTemplate {
            name: "Promotion",
            description: Some("Replies with the server rules for promotion"),
            title: "Promotion is not allowed outside the respective channels".to_string(),
            body: format!(
                "We have a few channels that allow for self-promotion: {} and {}. Sharing \
                 promotional links such as referral links, giveaways/contests or anything \
                 that would be a plain advertisement is discouraged and may be removed.\n\n\
                 If what you want to share doesn't fit the promotion channels, contact a \
                 moderator to know if the post is valid before posting it.",
                mention(channels.showcase),
                mention(channels.content_showcase)
            ),
        },
        ReplyTemplate {
            name: "Jobs",
            description: Some("Replies with directions for job posts"),
            title: "Job posts are not allowed in the server".to_string(),
            body: format!(
                "We do not allow job posts in this server, unless it's in the context of a \
                 discussion. You may check the latest official job threads announced in the \
                 {} channel.",
                mention(channels.announcements)
            ),
        },
        ReplyTemplate {
            name: "Ping",
            description: Some("Explains why we discourage pinging other members"),
            title: "Don't ping or DM other devs you aren't actively talking to".to_string(),
            body: "Do not ping other people in order to get attention to your question \
                   unless they are actively involved in the discussion. If you're looking \
                   to get help, it is a lot better to post your question in a public \
                   channel so other people can help or learn from the questions."
                .to_string(),
        },
        ReplyTemplate {
            name: "No Vercel-specific questions",
            description: Some("Use Vercel's official community forum for Vercel help"),
            title: "Please keep the content primarily Next.js-focused".to_string(),
            body: format!(
                "This server is dedicated to all things Next.js, and is not a Vercel \
                 support server. Vercel-specific questions are best suited for the official \
                 Vercel community at https://vercel.community. See more resources at {}.",
                mention(channels.vercel_help)
            ),
        },
    ]
}

/// Look a template up by its menu label.
pub fn find<'a>(catalog: &'a [ReplyTemplate], name: &str) -> Option<&'a ReplyTemplate> {
    catalog.iter().find(|t| t.name == name)
}

/// The embed posted as a reply, attributed to the requesting moderator.
pub fn reply_embed(
    template: &ReplyTemplate,
    requester_name: &str,
    requester_icon: Option<String>,
) -> Embed {
    Embed {
        title: Some(template.title.clone()),
        description: Some(template.body.clone()),
        color: None,
        fields: Vec::new(),
        footer: Some(EmbedFooter {
            text: format!("Requested by {requester_name}"),
            icon_url: requester_icon,
        }),
    }
}
