//! Main TUI application state and logic

use crate::parser::ast::{Rule, Stylesheet};
use crate::ui::panes::{count_properties, flatten_stylesheet, TreeRow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Source,
    Properties,
}

impl FocusedPane {
    /// Move focus to the next pane (tree -> source -> properties)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Properties,
            FocusedPane::Properties => FocusedPane::Tree,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Properties,
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Properties => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    pub stylesheet: Stylesheet,

    /// The stylesheet text as read from disk
    pub source_code: String,

    /// Flattened rule tree, rebuilt only on construction
    pub rows: Vec<TreeRow>,

    /// Index into `rows`
    pub selected: usize,

    pub property_counts: Vec<(String, usize)>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub tree_scroll: usize,
    pub source_scroll: usize,
    pub properties_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app over an already parsed stylesheet and its source text
    pub fn new(stylesheet: Stylesheet, source_code: String) -> Self {
        let rows = flatten_stylesheet(&stylesheet);
        let property_counts = count_properties(&stylesheet);
        let status_message = format!(
            "Parsed {} rule(s), {} distinct propert{}",
            stylesheet.rules.len(),
            property_counts.len(),
            if property_counts.len() == 1 { "y" } else { "ies" }
        );
        debug!("tree has {} rows", rows.len());

        App {
            stylesheet,
            source_code,
            rows,
            selected: 0,
            property_counts,
            focused_pane: FocusedPane::Tree,
            tree_scroll: 0,
            source_scroll: 0,
            properties_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// The top-level rule that owns the selected tree row
    pub fn selected_rule(&self) -> Option<&Rule> {
        let row = self.rows.get(self.selected)?;
        self.stylesheet.rules.get(row.rule_index)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Source (top) | Preview (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        // Right column: Tree (top) | Properties (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_preview_pane(frame, left_rows[1], self.selected_rule());

        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            &self.rows,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_properties_pane(
            frame,
            right_rows[1],
            &self.property_counts,
            self.focused_pane == FocusedPane::Properties,
            &mut self.properties_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.selected,
            self.rows.len(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => {
                    self.selected = self.selected.saturating_sub(1);
                }
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Properties => {
                    self.properties_scroll = self.properties_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => {
                    if self.selected + 1 < self.rows.len() {
                        self.selected += 1;
                    }
                }
                // Render clamps these against the content length
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Properties => {
                    self.properties_scroll = self.properties_scroll.saturating_add(1);
                }
            },
            KeyCode::Home => {
                self.selected = 0;
                self.status_message = "Jumped to first row".to_string();
            }
            KeyCode::End => {
                self.selected = self.rows.len().saturating_sub(1);
                self.status_message = "Jumped to last row".to_string();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_stylesheet;
    use crossterm::event::KeyModifiers;

    fn app(source: &str) -> App {
        App::new(parse_stylesheet(source).unwrap(), source.to_string())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles() {
        let pane = FocusedPane::Tree;
        assert_eq!(pane.next().next().next(), pane);
        assert_eq!(pane.prev(), FocusedPane::Properties);
        assert_eq!(pane.next().prev(), pane);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app("a { color: red; } b { margin: 0; }");
        // a, color, b, margin
        assert_eq!(app.rows.len(), 4);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);

        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected, 3);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected, 3);
    }

    #[test]
    fn test_selected_rule_follows_row() {
        let mut app = app("@import \"x.css\"; b { margin: 0; }");
        assert!(matches!(app.selected_rule(), Some(Rule::At(_))));
        press(&mut app, KeyCode::End);
        assert!(matches!(app.selected_rule(), Some(Rule::Qualified(_))));
    }

    #[test]
    fn test_empty_stylesheet() {
        let mut app = app("");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected, 0);
        assert!(app.selected_rule().is_none());
    }

    #[test]
    fn test_quit_and_tab() {
        let mut app = app("a { b: c; }");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
