//! Configuration management for the project catalog.
//!
//! Handles loading and saving configuration from JSONC files.
//! Holds the catalog source, the selectable label vocabulary, and
//! search and logging preferences.

use crate::catalog::CatalogSource;
use crate::filter::SearchOptions;
use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "project-catalog";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog file path (relative to config dir or absolute)
    pub catalog_path: String,
    /// Remote catalog URL, preferred over `catalog_path` when set
    pub catalog_url: Option<String>,
    /// Policy labels offered as filter checkboxes
    pub policy_labels: Vec<String>,
    /// SDG labels offered as filter checkboxes
    pub sdg_labels: Vec<String>,
    /// Whether search terms also match project descriptions
    pub search_description: bool,
    /// Log file path (relative to config dir or absolute)
    pub log_path: String,
    /// Log level filter (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: "projects.json".to_string(),
            catalog_url: None,
            policy_labels: vec![
                "Water Conservation".to_string(),
                "Policy 2".to_string(),
                "Policy 3".to_string(),
            ],
            sdg_labels: vec![
                "SDG 1".to_string(),
                "SDG 2".to_string(),
                "SDG 3".to_string(),
            ],
            search_description: true,
            log_path: "project-catalog.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/project-catalog/config.jsonc`
    /// 3. `~/.config/project-catalog/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| "Failed to deserialize config")?;

        Ok(config)
    }

    /// Save configuration to file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    ///
    /// # Details
    /// Creates config directory if it doesn't exist.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - `$XDG_CONFIG_HOME/project-catalog/config.jsonc` or error
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::app_config_dir()?.join("config.jsonc"))
    }

    /// Resolve where the project catalog comes from.
    ///
    /// # Returns
    /// * `Result<CatalogSource>` - URL if configured, otherwise the catalog file
    pub fn catalog_source(&self) -> Result<CatalogSource> {
        if let Some(url) = self.catalog_url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Ok(CatalogSource::Url(url.clone()));
        }
        Ok(CatalogSource::File(Self::resolve(&self.catalog_path)?))
    }

    /// Get log file path.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        Self::resolve(&self.log_path)
    }

    /// Search options derived from preferences.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            include_description: self.search_description,
        }
    }

    /// Absolute paths pass through; relative ones resolve under the config dir.
    fn resolve(path: &str) -> Result<PathBuf> {
        let path = Path::new(path);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(Self::app_config_dir()?.join(path))
        }
    }

    fn app_config_dir() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join(APP_DIR))
    }
}

/// Strip `//` comments that are not inside a string literal.
///
/// Tracks quote state per line, honouring backslash escapes.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut in_string = false;
            let mut escaped = false;
            let bytes = line.as_bytes();
            for (i, &b) in bytes.iter().enumerate() {
                if escaped {
                    escaped = false;
                    continue;
                }
                match b {
                    b'\\' if in_string => escaped = true,
                    b'"' => in_string = !in_string,
                    b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => {
                        return line[..i].trim_end();
                    }
                    _ => {}
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
