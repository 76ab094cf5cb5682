//! Configuration management.
//!
//! Loads from a TOML file when present, otherwise from environment
//! variables. A missing bot token is fatal either way; channel and role ids
//! default to zero, which the owning feature treats as "disabled".

#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Complete bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordConfig,
}

/// Discord-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Bot token from the Discord developer portal.
    #[serde(default = "default_bot_token")]
    pub bot_token: String,
    #[serde(default)]
    pub channels: ChannelConfig,
    #[serde(default)]
    pub roles: RoleConfig,
    #[serde(default)]
    pub threads: ThreadConfig,
}

/// Well-known channel ids. Zero means the channel is not configured and the
/// features that need it stay inert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default)]
    pub honeypot: u64,
    #[serde(default)]
    pub mod_log: u64,
    #[serde(default)]
    pub intro: u64,
    #[serde(default)]
    pub help_forum: u64,
    #[serde(default)]
    pub showcase: u64,
    #[serde(default)]
    pub content_showcase: u64,
    #[serde(default)]
    pub discussions: u64,
    #[serde(default)]
    pub announcements: u64,
    #[serde(default)]
    pub vercel_help: u64,
}

/// Role ids the bot acts on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Role granted on a first message in the intro channel.
    #[serde(default)]
    pub verified: u64,
    /// Roles exempt from automated moderation.
    #[serde(default)]
    pub staff: Vec<u64>,
}

/// Thread upkeep configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadConfig {
    /// Threads the bot keeps pinned and unarchived.
    #[serde(default)]
    pub keep_pinned: Vec<u64>,
}

/// Environment access seam so config loading is testable without touching
/// the process environment.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Option<String>;
}

/// [`ReadEnv`] over the real process environment.
pub struct ProcessEnv;

impl ReadEnv for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Config {
    /// Load configuration from a TOML file. The bot token may still come
    /// from `DISCORD_BOT_TOKEN` when the file omits it.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        if config.discord.bot_token.is_empty() {
            bail!("No bot token in {} and DISCORD_BOT_TOKEN not set", path);
        }

        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_impl(&ProcessEnv)
    }

    pub(crate) fn from_env_impl(env: &dyn ReadEnv) -> Result<Self> {
        let bot_token = env
            .var("DISCORD_BOT_TOKEN")
            .context("DISCORD_BOT_TOKEN not set")?;

        let channels = ChannelConfig {
            honeypot: parse_id(env, "HONEYPOT_CHANNEL_ID")?,
            mod_log: parse_id(env, "MOD_LOG_CHANNEL_ID")?,
            intro: parse_id(env, "INTRO_CHANNEL_ID")?,
            help_forum: parse_id(env, "HELP_CHANNEL_ID")?,
            showcase: parse_id(env, "SHOWCASE_CHANNEL_ID")?,
            content_showcase: parse_id(env, "CONTENT_SHOWCASE_CHANNEL_ID")?,
            discussions: parse_id(env, "DISCUSSIONS_CHANNEL_ID")?,
            announcements: parse_id(env, "ANNOUNCEMENT_CHANNEL_ID")?,
            vercel_help: parse_id(env, "VERCEL_HELP_CHANNEL_ID")?,
        };

        let roles = RoleConfig {
            verified: parse_id(env, "VERIFIED_ROLE_ID")?,
            staff: parse_id_list(&env.var("STAFF_ROLE_IDS").unwrap_or_default()),
        };

        let threads = ThreadConfig {
            keep_pinned: parse_id_list(&env.var("KEEP_PINNED_THREAD_IDS").unwrap_or_default()),
        };

        Ok(Config {
            discord: DiscordConfig {
                bot_token,
                channels,
                roles,
                threads,
            },
        })
    }
}

fn default_bot_token() -> String {
    std::env::var("DISCORD_BOT_TOKEN").unwrap_or_default()
}

/// A single id; absent means 0, malformed is a startup error.
fn parse_id(env: &dyn ReadEnv, key: &str) -> Result<u64> {
    match env.var(key) {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{} is not a valid id: {:?}", key, raw)),
    }
}

fn parse_id_list(s: &str) -> Vec<u64> {
    s.split(',')
        .map(|x| x.trim())
        .filter(|x| !x.is_empty())
        .filter_map(|x| x.parse::<u64>().ok())
        .collect()
}
