//! Project catalog loading.
//!
//! Supplies the in-memory project list from a local file or a remote URL.

pub mod client;
pub mod models;

pub use client::CatalogClient;
pub use models::{Project, parse_catalog};

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Where the catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Local JSON file
    File(PathBuf),
    /// Remote JSON document
    Url(String),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Load the full project list from `source`.
///
/// # Arguments
/// * `source` - Catalog file or URL
///
/// # Returns
/// * `Result<Vec<Project>>` - Validated projects in document order
pub async fn load_catalog(source: &CatalogSource) -> Result<Vec<Project>> {
    let projects = match source {
        CatalogSource::File(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
            parse_catalog(&content)
                .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?
        }
        CatalogSource::Url(url) => CatalogClient::new()?.fetch_projects(url).await?,
    };

    log::info!("Loaded {} projects from {}", projects.len(), source);
    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_catalog_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("projects.json");
        fs::write(
            &path,
            r#"[{"id": 1, "name": "Clean River", "policies": ["Water Conservation"]}]"#,
        )
        .unwrap();

        let projects = load_catalog(&CatalogSource::File(path)).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Clean River");
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        let err = load_catalog(&CatalogSource::File(path)).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog file"));
    }
}
