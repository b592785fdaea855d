//! Preview pane: the selected top-level rule, re-rendered as CSS

use crate::parser::ast::Rule;
use crate::ui::panes::source::highlight_source_line;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_preview_pane(frame: &mut Frame, area: Rect, rule: Option<&Rule>) {
    let block = Block::default()
        .title(" Selected Rule ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let lines: Vec<Line> = match rule {
        Some(rule) => rule
            .to_string()
            .lines()
            .map(highlight_source_line)
            .collect(),
        None => vec![Line::from(Span::styled(
            "(nothing selected)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))],
    };

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
