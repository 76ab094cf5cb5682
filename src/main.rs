//! Warden, a community moderation bot for Discord.
//!
//! Connects to the gateway, normalizes events, and fans them out to a
//! registry of feature modules (honeypot enforcement, member verification,
//! thread upkeep) plus a reply-template context-menu command.

mod api;
mod commands;
mod config;
mod dispatch;
mod errors;
mod events;
mod features;
mod gateway;
mod health;
mod registry;
#[cfg(test)]
mod testing;
mod types;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::SerenityApi;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::gateway::{BotState, Handler};
use crate::health::HealthState;

/// Warden moderation bot CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/warden.toml")]
    config: String,

    /// Discord bot token (overrides config file)
    #[arg(long, env = "DISCORD_BOT_TOKEN")]
    bot_token: Option<String>,

    /// Health check server port
    #[arg(long, env = "HEALTH_CHECK_PORT", default_value = "3001")]
    health_port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warden=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting warden");

    let args = Args::parse();

    let mut config = if std::path::Path::new(&args.config).exists() {
        info!("Loading config from file: {}", args.config);
        Config::from_file(&args.config)?
    } else {
        info!("Config file not found, loading from environment");
        Config::from_env()?
    };
    if let Some(bot_token) = args.bot_token {
        config.discord.bot_token = bot_token;
    }

    // A partial feature set is worse than a failed start.
    let features = registry::load_all(&config)?;
    let feature_names: Vec<String> = features.iter().map(|f| f.name().to_string()).collect();
    info!("Loaded features: {}", feature_names.join(", "));

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord.bot_token, intents)
        .event_handler(Handler)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create Discord client: {}", e))?;

    let api = Arc::new(SerenityApi::new(client.http.clone()));
    let health_state = HealthState::new(feature_names);
    let state = Arc::new(BotState {
        dispatcher: Dispatcher::new(api, features),
        templates: commands::reply_templates::catalog(&config.discord.channels),
        health: health_state.clone(),
    });

    {
        let mut data = client.data.write().await;
        data.insert::<BotState>(state);
    }

    let health_port = args.health_port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(health_state, health_port).await {
            error!("Health server error: {}", e);
        }
    });

    // Graceful shutdown: close all shards on SIGTERM or Ctrl+C.
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = signal(SignalKind::terminate()).expect("SIGTERM handler");
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await.ok();
        }
        info!("Shutdown signal received, stopping Discord client...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting gateway connection...");
    client
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Discord client error: {}", e))?;

    info!("Warden stopped");
    Ok(())
}
