//! Search widget rendering.
//!
//! Displays the search input bar with a live term and match count.

use crate::app::{App, UiMode};
use crate::filter::search_terms;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the search widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Displays a search input bar with the current search text. The title
/// reports how many terms are active and how many projects match all of
/// them. Highlights when in search mode.
pub fn render_search(app: &App, area: Rect, buf: &mut Buffer) {
    let is_active = app.mode == UiMode::Search;
    let prompt = if is_active {
        "Search: "
    } else {
        "Search (press '/'): "
    };

    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::Yellow)),
        Span::styled(
            &app.query.search_text,
            Style::default().fg(if is_active { Color::White } else { Color::Gray }),
        ),
        Span::styled(
            if is_active { "_" } else { "" },
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let title = match search_terms(&app.query.search_text).len() {
        0 => "Search".to_string(),
        1 => format!("Search (1 term, {} matching)", app.filtered_projects.len()),
        n => format!(
            "Search ({} terms, all must match: {} matching)",
            n,
            app.filtered_projects.len()
        ),
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }),
    );

    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Project;
    use crate::filter::SearchOptions;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn create_test_app() -> App {
        let mut app = App::new(Vec::new(), Vec::new(), SearchOptions::default());
        app.set_projects(vec![
            Project::new(1, "Clean River", "", &["Water Conservation"], &["SDG 1"]),
            Project::new(2, "Solar Grid", "", &["Policy 2"], &["SDG 2"]),
        ]);
        app.mode = UiMode::Search;
        app
    }

    #[test]
    fn test_render_search_shows_text_and_term_count() {
        let mut app = create_test_app();
        for ch in "solar".chars() {
            app.add_search_char(ch);
        }
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);

        render_search(&app, area, &mut buf);

        assert!(row_text(&buf, 0).contains("Search (1 term, 1 matching)"));
        assert!(row_text(&buf, 1).contains("solar"));
    }

    #[test]
    fn test_render_search_multiple_terms() {
        let mut app = create_test_app();
        for ch in " river  grid ".chars() {
            app.add_search_char(ch);
        }
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);

        render_search(&app, area, &mut buf);

        assert!(row_text(&buf, 0).contains("Search (2 terms, all must match: 0 matching)"));
    }

    #[test]
    fn test_render_search_blank_title() {
        let app = create_test_app();
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);

        render_search(&app, area, &mut buf);

        let title = row_text(&buf, 0);
        assert!(title.contains("Search"));
        assert!(!title.contains("term"));
    }
}
