//! Project filtering.
//!
//! Maps the full project list plus the current query into the displayed
//! subset. Three predicates (search text, policies, SDGs) must all hold.

use crate::catalog::Project;
use std::collections::BTreeSet;

/// Options controlling which fields the text predicate searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Also match search terms against the project description
    pub include_description: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            include_description: true,
        }
    }
}

/// Current search text and selected filter labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Raw search text as typed
    pub search_text: String,
    /// Active policy filter (empty admits all)
    pub selected_policies: BTreeSet<String>,
    /// Active SDG filter (empty admits all)
    pub selected_sdgs: BTreeSet<String>,
}

impl QueryState {
    /// Check whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        search_terms(&self.search_text).is_empty()
            && self.selected_policies.is_empty()
            && self.selected_sdgs.is_empty()
    }

    /// Reset search text and both selections.
    pub fn clear(&mut self) {
        self.search_text.clear();
        self.selected_policies.clear();
        self.selected_sdgs.clear();
    }

    /// All three predicates; `terms` are the pre-split search text.
    fn matches_with_terms(&self, project: &Project, terms: &[String], options: SearchOptions) -> bool {
        matches_terms(project, terms, options)
            && (self.selected_policies.is_empty()
                || self.selected_policies.iter().any(|p| project.has_policy(p)))
            && (self.selected_sdgs.is_empty()
                || self.selected_sdgs.iter().any(|s| project.has_sdg(s)))
    }
}

/// Split search text into lowercase, non-empty terms.
///
/// # Arguments
/// * `text` - Raw search text
///
/// # Returns
/// * `Vec<String>` - Terms in input order
pub fn search_terms(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Filter projects against a query.
///
/// # Arguments
/// * `projects` - Full project list
/// * `query` - Current query state
/// * `options` - Search field options
///
/// # Returns
/// * `Vec<Project>` - Matching projects in their original order
///
/// # Details
/// Every search term must appear (case-insensitively) in the name, a policy
/// label, an SDG label, or, when enabled, the description. Each non-empty
/// label selection requires at least one shared label.
pub fn filter(projects: &[Project], query: &QueryState, options: SearchOptions) -> Vec<Project> {
    let terms = search_terms(&query.search_text);
    projects
        .iter()
        .filter(|project| query.matches_with_terms(project, &terms, options))
        .cloned()
        .collect()
}

/// Remove `item` from `set` if present, otherwise insert it.
pub fn toggle(set: &mut BTreeSet<String>, item: &str) {
    if !set.remove(item) {
        set.insert(item.to_string());
    }
}

fn matches_terms(project: &Project, terms: &[String], options: SearchOptions) -> bool {
    if terms.is_empty() {
        return true;
    }

    let name = project.name.to_lowercase();
    let description = options
        .include_description
        .then(|| project.description.to_lowercase());
    let labels: Vec<String> = project
        .policies
        .iter()
        .chain(project.sdgs.iter())
        .map(|label| label.to_lowercase())
        .collect();

    terms.iter().all(|term| {
        name.contains(term.as_str())
            || labels.iter().any(|label| label.contains(term.as_str()))
            || description
                .as_deref()
                .is_some_and(|d| d.contains(term.as_str()))
    })
}
