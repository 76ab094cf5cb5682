//! Feature registry.
//!
//! Features are registered in a static table, constructed once at startup,
//! and dispatched in lexicographic name order so fan-out order is
//! deterministic. Any constructor failure aborts startup: running with a
//! partial feature set silently is worse than not starting.

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::features::honeypot::HoneypotFeature;
use crate::features::pinned_threads::PinnedThreadsFeature;
use crate::features::thread_cleanup::ThreadCleanupFeature;
use crate::features::verify::VerifyFeature;
use crate::features::Feature;

type Constructor = fn(&Config) -> Result<Arc<dyn Feature>>;

/// Every feature shipped with the bot.
fn constructors() -> Vec<Constructor> {
    vec![
        |c| Ok(Arc::new(HoneypotFeature::new(c))),
        |c| Ok(Arc::new(VerifyFeature::new(c))),
        |c| Ok(Arc::new(ThreadCleanupFeature::new(c))),
        |c| Ok(Arc::new(PinnedThreadsFeature::new(c))),
    ]
}

/// Construct every registered feature, ordered by name.
pub fn load_all(config: &Config) -> Result<Vec<Arc<dyn Feature>>> {
    load_from(&constructors(), config)
}

fn load_from(table: &[Constructor], config: &Config) -> Result<Vec<Arc<dyn Feature>>> {
    let mut features = Vec::with_capacity(table.len());
    for (index, construct) in table.iter().enumerate() {
        let feature = construct(config)
            .with_context(|| format!("Failed to construct feature #{index}"))?;
        features.push(feature);
    }

    features.sort_by(|a, b| a.name().cmp(b.name()));

    for pair in features.windows(2) {
        if pair[0].name() == pair[1].name() {
            bail!("Duplicate feature name: {}", pair[0].name());
        }
    }

    Ok(features)
}
