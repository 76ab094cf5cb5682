//! Keep designated rule threads pinned and unarchived.
//!
//! Forum threads auto-archive after inactivity and moderators occasionally
//! unpin them by accident; this feature reverts both for a configured list
//! of thread ids.

use anyhow::Result;
use async_trait::async_trait;

use crate::api::ChatApi;
use crate::config::Config;
use crate::errors;
use crate::events::ThreadUpdate;
use crate::features::Feature;

const KEEP_REASON: &str = "Keep this thread pinned";

pub struct PinnedThreadsFeature {
    keep_pinned: Vec<u64>,
}

impl PinnedThreadsFeature {
    pub fn new(config: &Config) -> Self {
        Self {
            keep_pinned: config.discord.threads.keep_pinned.clone(),
        }
    }
}

#[async_trait]
impl Feature for PinnedThreadsFeature {
    fn name(&self) -> &'static str {
        "pinned_threads"
    }

    async fn on_thread_update(&self, api: &dyn ChatApi, update: &ThreadUpdate) -> Result<()> {
        if !self.keep_pinned.contains(&update.thread_id) {
            return Ok(());
        }

        // Both repairs are attempted independently.
        if update.archived {
            if let Err(e) = api.unarchive_thread(update.thread_id, KEEP_REASON).await {
                errors::log_error("pinned_threads: unarchive", &e);
            }
        }
        if !update.pinned {
            if let Err(e) = api.pin_thread(update.thread_id, KEEP_REASON).await {
                errors::log_error("pinned_threads: pin", &e);
            }
        }
        Ok(())
    }
}
