//! File logging setup.
//!
//! The terminal belongs to the UI, so log records only go to a file.

use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::fs;
use std::path::Path;

/// Parse a level name, falling back to `Info` for unknown values.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Build the fern dispatch writing to `path`.
///
/// # Arguments
/// * `path` - Log file path (parent directory is created)
/// * `level` - Level name from configuration
///
/// # Returns
/// * `Result<fern::Dispatch>` - Dispatch ready to be applied
fn build_dispatch(path: &Path, level: &str) -> Result<fern::Dispatch> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fern::log_file(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    Ok(fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(parse_level(level))
        .chain(file))
}

/// Install the global logger.
///
/// # Arguments
/// * `path` - Log file path
/// * `level` - Level name from configuration
///
/// # Returns
/// * `Result<()>` - Success, or error if the file can't be opened or a
///   logger is already installed
pub fn init_logging(path: &Path, level: &str) -> Result<()> {
    build_dispatch(path, level)?
        .apply()
        .context("Failed to install logger")?;
    log::info!("Logging to {}", path.display());
    Ok(())
}
