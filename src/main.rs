//! Project Catalog - Terminal UI for browsing projects by policy and SDG.
//!
//! Main entry point and event loop for the application.

mod app;
mod catalog;
mod config;
mod error;
mod filter;
mod logging;
mod ui;

use app::{App, UiMode};
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

const HELP_TEXT: &str =
    "q quit | / search (Ctrl-U clears) | p policies | s SDGs | c clear filters | j/k move";

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Loads configuration (optionally from the path given as first argument),
/// sets up file logging, loads the catalog, and runs the event loop.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    // First run: leave a starter config behind to edit
    if config_path.is_none() {
        let default_path = Config::default_config_path()?;
        if !default_path.exists()
            && let Err(e) = config.save(None)
        {
            eprintln!("Warning: could not write {}: {:#}", default_path.display(), e);
        }
    }

    match config.log_file_path() {
        Ok(path) => {
            if let Err(e) = logging::init_logging(&path, &config.log_level) {
                eprintln!("Warning: logging disabled: {:#}", e);
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {:#}", e),
    }

    let source = config.catalog_source()?;
    let projects = match catalog::load_catalog(&source).await {
        Ok(projects) => projects,
        Err(e) => {
            log::error!("Failed to load catalog from {}: {:#}", source, e);
            eprintln!("Error: could not load project catalog from {}", source);
            eprintln!("{:#}", e);
            eprintln!(
                "Set \"catalog_path\" or \"catalog_url\" in: {}",
                Config::default_config_path()?.display()
            );
            return Err(e);
        }
    };

    let mut app = App::new(
        config.policy_labels.clone(),
        config.sdg_labels.clone(),
        config.search_options(),
    );
    app.set_projects(projects);
    if app.all_projects.is_empty() {
        app.set_status("Warning: catalog contains no projects".to_string());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    log::info!("Exiting");
    result
}

/// Split the screen into search, filters, list, and status areas.
///
/// The checkbox panels take what their labels need, but never more than a
/// third of the screen; longer vocabularies scroll inside the panel.
fn layout(area: Rect, filter_rows: u16) -> [Rect; 4] {
    let filter_height = (filter_rows + 2).min(area.height / 3).max(3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Search bar
            Constraint::Length(filter_height), // Checkbox panels
            Constraint::Min(0),                // Project list
            Constraint::Length(3),             // Status bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Render the complete UI.
fn render_ui(f: &mut ratatui::Frame, app: &App) {
    let filter_rows = app.policy_labels.len().max(app.sdg_labels.len()).max(1) as u16;
    let [search, filters, list, status_area] = layout(f.area(), filter_rows);

    ui::render_search(app, search, f.buffer_mut());
    ui::render_filters(app, filters, f.buffer_mut());
    ui::render_list(app, list, f.buffer_mut());

    let status_text = match &app.status_message {
        Some(message) => format!("{} | {}", app.summary(), message),
        None => format!("{} | {}", app.summary(), HELP_TEXT),
    };
    let status = ratatui::widgets::Paragraph::new(ratatui::text::Line::from(status_text))
        .block(ratatui::widgets::Block::default().borders(ratatui::widgets::Borders::ALL));
    f.render_widget(status, status_area);
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
///
/// # Returns
/// * `Result<()>` - Success or error
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press && handle_key(app, key) {
                    break;
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp if app.mode == UiMode::List => app.move_up(),
                MouseEventKind::ScrollDown if app.mode == UiMode::List => app.move_down(),
                _ => {}
            },
            _ => {}
        }
    }

    Ok(())
}

/// Apply one key press to the application state.
///
/// # Returns
/// * `bool` - True if the application should quit
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.mode {
        UiMode::List => {
            // Status messages last until the next key
            app.clear_status();
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
                KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                KeyCode::Enter => {
                    if let Some(project) = app.selected_project() {
                        let message = format!("#{} {}", project.id, project.name);
                        app.set_status(message);
                    }
                }
                KeyCode::Char('/') => app.mode = UiMode::Search,
                KeyCode::Char('p') => app.mode = UiMode::Policies,
                KeyCode::Char('s') => app.mode = UiMode::Sdgs,
                KeyCode::Char('c') => {
                    if app.query.is_empty() {
                        app.set_status("No filters active".to_string());
                    } else {
                        app.clear_filters();
                        app.set_status("Filters cleared".to_string());
                    }
                }
                _ => {}
            }
        }
        UiMode::Search => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.mode = UiMode::List,
            KeyCode::Backspace => app.remove_search_char(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.clear_search()
            }
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                app.add_search_char(c)
            }
            _ => {}
        },
        UiMode::Policies | UiMode::Sdgs => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.mode = UiMode::List,
            KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_under_cursor(),
            KeyCode::Tab => app.switch_filter_panel(),
            _ => {}
        },
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Project;
    use crate::filter::SearchOptions;
    use ratatui::backend::TestBackend;

    fn sdg_labels(count: usize) -> Vec<String> {
        (1..=count).map(|n| format!("SDG {}", n)).collect()
    }

    fn create_test_app(sdgs: Vec<String>) -> App {
        let mut app = App::new(
            vec!["Water Conservation".to_string(), "Policy 2".to_string()],
            sdgs,
            SearchOptions::default(),
        );
        app.set_projects(vec![
            Project::new(1, "Clean River", "Restore the banks", &["Water Conservation"], &["SDG 1"]),
            Project::new(2, "Solar Grid", "Rooftop panels", &["Policy 2"], &["SDG 2"]),
        ]);
        app
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
        handle_key(app, KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_layout_caps_filter_panel() {
        let [_, filters, list, _] = layout(Rect::new(0, 0, 80, 24), 17);
        assert_eq!(filters.height, 8);
        assert!(list.height >= 10);

        let [_, filters, _, _] = layout(Rect::new(0, 0, 80, 24), 3);
        assert_eq!(filters.height, 5);
    }

    #[test]
    fn test_full_sdg_vocabulary_keeps_projects_visible() {
        let mut app = create_test_app(sdg_labels(17));
        let text = screen_text(&app, 80, 24);
        assert!(text.contains("Clean River"));
        assert!(text.contains("[ ] SDG 1"));

        app.mode = UiMode::Sdgs;
        app.move_cursor(-1);
        assert_eq!(app.sdg_cursor, 16);
        let text = screen_text(&app, 80, 24);
        assert!(text.contains("[ ] SDG 17"));
        assert!(text.contains("Clean River"));
    }

    #[test]
    fn test_search_ignores_modified_keys() {
        let mut app = create_test_app(sdg_labels(3));
        app.mode = UiMode::Search;

        press(&mut app, KeyCode::Char('S'), KeyModifiers::SHIFT);
        press(&mut app, KeyCode::Char('o'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('w'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(app.query.search_text, "So");

        press(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(app.query.search_text.is_empty());
    }

    #[test]
    fn test_status_cleared_on_next_list_key() {
        let mut app = create_test_app(sdg_labels(3));

        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.status_message.as_deref(), Some("#1 Clean River"));

        press(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(app.status_message.is_none());

        press(&mut app, KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(app.status_message.as_deref(), Some("No filters active"));
        press(&mut app, KeyCode::Char('k'), KeyModifiers::NONE);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app(sdg_labels(3));
        assert!(press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL));

        app.mode = UiMode::Search;
        assert!(!press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE));
        app.mode = UiMode::List;
        assert!(press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE));
    }
}
