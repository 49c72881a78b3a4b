//! Catalog data model.
//!
//! Contains the project structure and the accepted catalog document shapes.

use crate::error::CatalogError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A catalog entry tagged with policy and SDG labels.
///
/// Label order is kept as supplied so chips render in a stable order;
/// matching treats both label lists as sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Unique project id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Policy labels
    #[serde(default)]
    pub policies: Vec<String>,
    /// Sustainable Development Goal labels
    #[serde(default)]
    pub sdgs: Vec<String>,
}

impl Project {
    /// Create a new project.
    ///
    /// # Arguments
    /// * `id` - Unique project id
    /// * `name` - Display name
    /// * `description` - Description text
    /// * `policies` - Policy labels
    /// * `sdgs` - SDG labels
    ///
    /// # Returns
    /// * `Project` - New project instance
    #[cfg(test)]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        description: impl Into<String>,
        policies: &[&str],
        sdgs: &[&str],
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            policies: policies.iter().map(|p| p.to_string()).collect(),
            sdgs: sdgs.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check whether the project carries the given policy label.
    pub fn has_policy(&self, policy: &str) -> bool {
        self.policies.iter().any(|p| p == policy)
    }

    /// Check whether the project carries the given SDG label.
    pub fn has_sdg(&self, sdg: &str) -> bool {
        self.sdgs.iter().any(|s| s == sdg)
    }
}

/// `{ "projects": [ ... ] }` form of a catalog document.
#[derive(Debug, Deserialize)]
struct WrappedCatalog {
    projects: Vec<Project>,
}

/// Parse a catalog document into a validated project list.
///
/// # Arguments
/// * `content` - JSON text of the catalog
///
/// # Returns
/// * `Result<Vec<Project>>` - Projects in document order, or error
///
/// # Details
/// Accepts either a bare array of projects or an object with a
/// `projects` array. Rejects catalogs where two projects share an id.
pub fn parse_catalog(content: &str) -> Result<Vec<Project>> {
    // Pick the shape up front so serde reports the offending field and position
    let parsed = match content.trim_start().as_bytes().first() {
        Some(b'[') => serde_json::from_str::<Vec<Project>>(content),
        Some(b'{') => serde_json::from_str::<WrappedCatalog>(content).map(|w| w.projects),
        _ => {
            return Err(CatalogError::InvalidFormat(
                "expected a JSON array or an object with a \"projects\" array".to_string(),
            )
            .into());
        }
    };
    let projects = parsed.map_err(|e| CatalogError::InvalidFormat(e.to_string()))?;

    validate_ids(&projects)?;
    Ok(projects)
}

fn validate_ids(projects: &[Project]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(projects.len());
    for project in projects {
        if !seen.insert(project.id) {
            return Err(CatalogError::DuplicateId(project.id));
        }
    }
    Ok(())
}
