//! Log setup. The terminal belongs to the UI, so records go to a file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DEFAULT_LOG_FILTER;

/// Pick the filter directive: `ROSTER_LOG`, then `RUST_LOG`, then the
/// config value, then the default.
pub fn filter_directive(configured: Option<&str>) -> String {
    pick_directive(
        std::env::var("ROSTER_LOG").ok(),
        std::env::var("RUST_LOG").ok(),
        configured,
    )
}

/// Blank values count as unset at every level
fn pick_directive(
    roster_log: Option<String>,
    rust_log: Option<String>,
    configured: Option<&str>,
) -> String {
    let set = |value: &String| !value.trim().is_empty();
    roster_log
        .filter(set)
        .or_else(|| rust_log.filter(set))
        .or_else(|| configured.map(str::to_string).filter(set))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Install the global subscriber, appending to `path`
pub fn init(path: &Path, configured_filter: Option<&str>) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_new(filter_directive(configured_filter))?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(path.to_path_buf())
}
