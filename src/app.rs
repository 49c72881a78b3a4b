//! Application state management.
//!
//! Owns the project list and the query, and keeps the displayed list in
//! sync with both.

use crate::catalog::Project;
use crate::filter::{self, QueryState, SearchOptions};
use std::cmp;

/// Current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal list view
    List,
    /// Typing into the search bar
    Search,
    /// Moving through the policy checkboxes
    Policies,
    /// Moving through the SDG checkboxes
    Sdgs,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Every project in the catalog
    pub all_projects: Vec<Project>,
    /// Projects passing the current query (derived, see `apply_filters`)
    pub filtered_projects: Vec<Project>,
    /// Currently selected project index (in filtered_projects)
    pub selected_index: usize,
    /// Search text and label selections
    pub query: QueryState,
    /// Which fields the search text is matched against
    pub search_options: SearchOptions,
    /// Selectable policy labels
    pub policy_labels: Vec<String>,
    /// Selectable SDG labels
    pub sdg_labels: Vec<String>,
    /// Cursor within the policy checkboxes
    pub policy_cursor: usize,
    /// Cursor within the SDG checkboxes
    pub sdg_cursor: usize,
    /// Current UI mode
    pub mode: UiMode,
    /// Status message to display
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `policy_labels` - Policy vocabulary for the checkbox panel
    /// * `sdg_labels` - SDG vocabulary for the checkbox panel
    /// * `search_options` - Search field options
    ///
    /// # Returns
    /// * `App` - New application state with no projects
    pub fn new(
        policy_labels: Vec<String>,
        sdg_labels: Vec<String>,
        search_options: SearchOptions,
    ) -> Self {
        Self {
            all_projects: Vec::new(),
            filtered_projects: Vec::new(),
            selected_index: 0,
            query: QueryState::default(),
            search_options,
            policy_labels,
            sdg_labels,
            policy_cursor: 0,
            sdg_cursor: 0,
            mode: UiMode::List,
            status_message: None,
        }
    }

    /// Replace the project list and reapply the query.
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.all_projects = projects;
        self.apply_filters();
    }

    /// Recompute `filtered_projects` from the full list and current query.
    ///
    /// # Details
    /// This is the only place the displayed list is written. It always
    /// filters `all_projects`, never the previous result, so clearing a
    /// filter brings hidden projects back. Selection is clamped into range.
    pub fn apply_filters(&mut self) {
        self.filtered_projects =
            filter::filter(&self.all_projects, &self.query, self.search_options);
        self.selected_index = cmp::min(
            self.selected_index,
            self.filtered_projects.len().saturating_sub(1),
        );
        log::debug!(
            "Filter {:?} policies={:?} sdgs={:?} -> {}/{}",
            self.query.search_text,
            self.query.selected_policies,
            self.query.selected_sdgs,
            self.filtered_projects.len(),
            self.all_projects.len()
        );
    }

    /// Get the currently selected project.
    pub fn selected_project(&self) -> Option<&Project> {
        self.filtered_projects.get(self.selected_index)
    }

    /// Move selection up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        if self.filtered_projects.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_projects.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn move_down(&mut self) {
        if self.filtered_projects.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_projects.len();
    }

    /// Add a character to the search text.
    ///
    /// # Details
    /// Only works in Search mode.
    pub fn add_search_char(&mut self, ch: char) {
        if self.mode == UiMode::Search {
            self.query.search_text.push(ch);
            self.apply_filters();
        }
    }

    /// Remove the last character from the search text.
    ///
    /// # Details
    /// Only works in Search mode.
    pub fn remove_search_char(&mut self) {
        if self.mode == UiMode::Search {
            self.query.search_text.pop();
            self.apply_filters();
        }
    }

    /// Clear the search text.
    pub fn clear_search(&mut self) {
        self.query.search_text.clear();
        self.apply_filters();
    }

    /// Toggle a policy label in the selection.
    pub fn toggle_policy(&mut self, policy: &str) {
        filter::toggle(&mut self.query.selected_policies, policy);
        self.apply_filters();
    }

    /// Toggle an SDG label in the selection.
    pub fn toggle_sdg(&mut self, sdg: &str) {
        filter::toggle(&mut self.query.selected_sdgs, sdg);
        self.apply_filters();
    }

    /// Toggle whichever label the active checkbox cursor points at.
    pub fn toggle_under_cursor(&mut self) {
        match self.mode {
            UiMode::Policies => {
                if let Some(label) = self.policy_labels.get(self.policy_cursor).cloned() {
                    self.toggle_policy(&label);
                }
            }
            UiMode::Sdgs => {
                if let Some(label) = self.sdg_labels.get(self.sdg_cursor).cloned() {
                    self.toggle_sdg(&label);
                }
            }
            UiMode::List | UiMode::Search => {}
        }
    }

    /// Move the active checkbox cursor by `delta`, wrapping around.
    pub fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.mode {
            UiMode::Policies => (&mut self.policy_cursor, self.policy_labels.len()),
            UiMode::Sdgs => (&mut self.sdg_cursor, self.sdg_labels.len()),
            UiMode::List | UiMode::Search => return,
        };
        if len == 0 {
            return;
        }
        *cursor = (*cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Switch between the policy and SDG panels.
    pub fn switch_filter_panel(&mut self) {
        self.mode = match self.mode {
            UiMode::Policies => UiMode::Sdgs,
            UiMode::Sdgs => UiMode::Policies,
            other => other,
        };
    }

    /// Reset search text and all label selections.
    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.apply_filters();
    }

    /// Summary line for the status bar.
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} projects",
            self.filtered_projects.len(),
            self.all_projects.len()
        )
    }

    /// Set status message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear status message.
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
