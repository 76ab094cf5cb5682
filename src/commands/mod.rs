//! Message context-menu commands.
//!
//! The "Reply with issue..." command lets moderators answer common
//! questions with a canned reply. The flow is interactive: an ephemeral
//! select menu scoped to the invoking moderator, a selection, then the
//! reply embed posted under the target message.

pub mod reply_templates;

use std::time::Duration;

use anyhow::{Context as _, Result};
use serenity::builder::{
    CreateActionRow, CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption,
};
use serenity::client::Context;
use serenity::model::application::{
    CommandInteraction, CommandType, ComponentInteractionDataKind,
};
use serenity::model::Permissions;
use tracing::{debug, info};

use crate::api::ChatApi;
use reply_templates::{find, reply_embed, ReplyTemplate};

pub const REPLY_COMMAND: &str = "Reply with issue...";

const SELECT_ID: &str = "reply-template";
const SELECT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Application commands registered on startup.
pub fn definitions() -> Vec<CreateCommand> {
    vec![CreateCommand::new(REPLY_COMMAND)
        .kind(CommandType::Message)
        .default_member_permissions(Permissions::SEND_MESSAGES)]
}

fn select_menu(catalog: &[ReplyTemplate]) -> CreateSelectMenu {
    let options = catalog
        .iter()
        .map(|t| {
            let mut option = CreateSelectMenuOption::new(t.name, t.name);
            if let Some(description) = t.description {
                option = option.description(description);
            }
            option
        })
        .collect();
    CreateSelectMenu::new(SELECT_ID, CreateSelectMenuKind::String { options })
        .placeholder("Select the reply to send")
}

async fn ephemeral_notice(ctx: &Context, cmd: &CommandInteraction, text: &str) -> Result<()> {
    cmd.create_response(
        &ctx.http,
        CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(text)
                .ephemeral(true),
        ),
    )
    .await
    .context("Failed to send ephemeral notice")
}

/// Run the full reply-template flow for one command invocation.
pub async fn handle_reply_command(
    ctx: &Context,
    api: &dyn ChatApi,
    catalog: &[ReplyTemplate],
    cmd: &CommandInteraction,
) -> Result<()> {
    let Some(target_id) = cmd.data.target_id else {
        return Ok(());
    };
    let message_id = target_id.to_message_id();
    let Some(target) = cmd.data.resolved.messages.get(&message_id) else {
        return Ok(());
    };

    if target.author.bot {
        return ephemeral_notice(ctx, cmd, "You cannot reply to a bot message.").await;
    }
    let target_channel = target.channel_id.get();

    cmd.create_response(
        &ctx.http,
        CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .ephemeral(true)
                .components(vec![CreateActionRow::SelectMenu(select_menu(catalog))]),
        ),
    )
    .await
    .context("Failed to present reply menu")?;

    let prompt = cmd
        .get_response(&ctx.http)
        .await
        .context("Failed to fetch reply menu message")?;

    let selection = prompt
        .await_component_interaction(&ctx.shard)
        .author_id(cmd.user.id)
        .timeout(SELECT_TIMEOUT)
        .await;

    let Some(component) = selection else {
        debug!("Reply menu for {} timed out", cmd.user.name);
        cmd.delete_response(&ctx.http)
            .await
            .context("Failed to remove expired reply menu")?;
        return Ok(());
    };

    let chosen = match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values.first().cloned(),
        _ => None,
    };
    let Some(template) = chosen.as_deref().and_then(|name| find(catalog, name)) else {
        return Ok(());
    };

    component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await
        .context("Failed to acknowledge selection")?;

    let requester_name = cmd
        .member
        .as_ref()
        .map(|m| m.display_name().to_string())
        .unwrap_or_else(|| cmd.user.name.clone());
    let embed = reply_embed(template, &requester_name, Some(cmd.user.face()));

    api.reply_with_embed(target_channel, message_id.get(), embed)
        .await
        .context("Failed to post template reply")?;
    info!(
        "Posted reply template '{}' for {} in channel {}",
        template.name, requester_name, target_channel
    );

    // The ephemeral prompt has served its purpose.
    cmd.delete_response(&ctx.http)
        .await
        .context("Failed to remove reply menu")?;
    Ok(())
}
