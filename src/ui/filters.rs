//! Filters widget rendering.
//!
//! Displays the policy and SDG checkbox panels side by side.

use crate::app::{App, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::collections::BTreeSet;

/// Render the filters widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Left half lists the policy labels, right half the SDG labels, each as
/// a `[x]`/`[ ]` checkbox. The panel being edited is highlighted and its
/// cursor row is reversed.
pub fn render_filters(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_panel(
        "Policies",
        'p',
        &app.policy_labels,
        &app.query.selected_policies,
        (app.mode == UiMode::Policies).then_some(app.policy_cursor),
        chunks[0],
        buf,
    );
    render_panel(
        "SDGs",
        's',
        &app.sdg_labels,
        &app.query.selected_sdgs,
        (app.mode == UiMode::Sdgs).then_some(app.sdg_cursor),
        chunks[1],
        buf,
    );
}

/// First visible row so that `cursor` stays inside `visible_rows`.
fn scroll_offset(cursor: Option<usize>, visible_rows: u16) -> u16 {
    let visible = visible_rows.max(1) as usize;
    cursor.map_or(0, |c| c.saturating_sub(visible - 1)) as u16
}

/// `cursor` is `Some` only while this panel is active.
fn render_panel(
    title: &str,
    key: char,
    labels: &[String],
    selected: &BTreeSet<String>,
    cursor: Option<usize>,
    area: Rect,
    buf: &mut Buffer,
) {
    let is_active = cursor.is_some();

    let mut lines: Vec<Line> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let checked = selected.contains(label);
            let mut style = Style::default().fg(if checked { Color::Green } else { Color::White });
            if cursor == Some(idx) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(
                format!("[{}] {}", if checked { "x" } else { " " }, label),
                style,
            ))
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No labels configured",
            Style::default().fg(Color::Gray),
        )));
    }

    let block_title = if is_active {
        format!("{} (ACTIVE - Space to toggle, Tab to switch, Esc to exit)", title)
    } else {
        format!("{} (press '{}')", title, key)
    };

    let block = Block::default()
        .title(block_title)
        .borders(Borders::ALL)
        .style(if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });

    // Keep the cursor row on screen when labels outnumber rows
    let paragraph = Paragraph::new(lines)
        .scroll((scroll_offset(cursor, area.height.saturating_sub(2)), 0))
        .block(block);

    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SearchOptions;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_filters_marks_selected_labels() {
        let mut app = App::new(
            vec!["Water Conservation".to_string(), "Policy 2".to_string()],
            vec!["SDG 1".to_string()],
            SearchOptions::default(),
        );
        app.toggle_policy("Policy 2");

        let area = Rect::new(0, 0, 80, 6);
        let mut buf = Buffer::empty(area);
        render_filters(&app, area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("[ ] Water Conservation"));
        assert!(text.contains("[x] Policy 2"));
        assert!(text.contains("[ ] SDG 1"));
    }

    #[test]
    fn test_scroll_offset_follows_cursor() {
        assert_eq!(scroll_offset(None, 6), 0);
        assert_eq!(scroll_offset(Some(5), 6), 0);
        assert_eq!(scroll_offset(Some(6), 6), 1);
        assert_eq!(scroll_offset(Some(16), 6), 11);
        assert_eq!(scroll_offset(Some(2), 0), 2);
    }

    #[test]
    fn test_render_filters_scrolls_long_vocabulary() {
        let sdgs: Vec<String> = (1..=17).map(|n| format!("SDG {}", n)).collect();
        let mut app = App::new(vec!["Policy 2".to_string()], sdgs, SearchOptions::default());
        app.mode = UiMode::Sdgs;
        app.move_cursor(-1);
        app.toggle_under_cursor();

        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        render_filters(&app, area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("[x] SDG 17"));
        assert!(text.contains("[ ] SDG 12"));
        assert!(!text.contains("SDG 11"));
    }
}
