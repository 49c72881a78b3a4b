//! Project list widget rendering.
//!
//! Displays a scrollable list of project cards with selection highlighting.

use crate::app::App;
use crate::catalog::Project;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Lines per card: name, description, policies, SDGs, separator.
pub const LINES_PER_PROJECT: u16 = 5;

/// Render the project list widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Each project is a card:
/// - Line 1: Name (bold)
/// - Line 2: Description
/// - Line 3: Policy chips
/// - Line 4: SDG chips
///
/// Shows "No projects found" when nothing matches.
pub fn render_list(app: &App, area: Rect, buf: &mut Buffer) {
    let projects = &app.filtered_projects;
    let title = format!("Projects ({}/{})", projects.len(), app.all_projects.len());

    if projects.is_empty() {
        let list = List::new(vec![ListItem::new(Span::styled(
            "No projects found",
            Style::default().fg(Color::Gray),
        ))])
        .block(Block::default().title(title).borders(Borders::ALL));
        Widget::render(list, area, buf);
        return;
    }

    let selected_index = app.selected_index.min(projects.len().saturating_sub(1));

    let separator_width = area.width.saturating_sub(2).max(10) as usize;
    let separator_line = "─".repeat(separator_width);

    // Keep the selection centered where possible
    let available_height = area.height.saturating_sub(2);
    let visible = (available_height / LINES_PER_PROJECT).max(1) as usize;
    let scroll_offset = selected_index
        .saturating_sub(visible / 2)
        .min(projects.len().saturating_sub(visible));
    let end_idx = (scroll_offset + visible).min(projects.len());

    let items: Vec<ListItem> = projects[scroll_offset..end_idx]
        .iter()
        .enumerate()
        .map(|(offset, project)| {
            let is_selected = scroll_offset + offset == selected_index;
            project_card(project, is_selected, &separator_line)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index - scroll_offset));

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );

    StatefulWidget::render(list, area, buf, &mut list_state);
}

fn project_card<'a>(project: &'a Project, is_selected: bool, separator: &str) -> ListItem<'a> {
    let name_style = Style::default()
        .fg(if is_selected { Color::Yellow } else { Color::White })
        .add_modifier(Modifier::BOLD);

    let name = Line::from(Span::styled(project.name.as_str(), name_style));
    let description = Line::from(Span::styled(
        project.description.as_str(),
        Style::default().fg(Color::Gray),
    ));
    let policies = chip_line(&project.policies, Color::Cyan);
    let sdgs = chip_line(&project.sdgs, Color::Green);
    let separator = Line::from(Span::styled(
        separator.to_string(),
        Style::default().fg(if is_selected { Color::Blue } else { Color::DarkGray }),
    ));

    ListItem::new(vec![name, description, policies, sdgs, separator])
}

/// One bracketed chip per label, blank line when there are none.
fn chip_line(labels: &[String], color: Color) -> Line<'_> {
    let chip_style = Style::default().fg(Color::Black).bg(color);
    let mut spans = Vec::with_capacity(labels.len() * 2);
    for label in labels {
        spans.push(Span::styled(format!(" {} ", label), chip_style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
