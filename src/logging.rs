use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Route tracing output to `log_file`. The terminal owns stdout while the UI
/// runs, so logging is skipped entirely when no file is configured.
///
/// `log_level` accepts anything `EnvFilter` understands (`debug`,
/// `player_queue=trace`, ...); unparseable values fall back to `info`.
pub fn init_logging(log_level: &str, log_file: Option<&Path>) -> Result<()> {
    let Some(log_file) = log_file else {
        return Ok(());
    };

    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("failed to create log directory")?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let subscriber = fmt()
        .with_env_filter(level_filter(log_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}

fn level_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(log_level.trim().to_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"))
}
