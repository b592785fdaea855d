//! Source pane rendering with syntax highlighting
//!
//! Each line is highlighted by running the stylesheet [`Scanner`] over it, so
//! the colors follow exactly the token classes the parser sees. Constructs
//! that span lines (block comments, escaped newlines in strings) fall back to
//! plain text for the remainder of the line.

use crate::parser::scanner::{Scanner, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn token_style(kind: TokenKind, value: &str) -> Style {
    match kind {
        TokenKind::AtKeyword => Style::default()
            .fg(DEFAULT_THEME.at_keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Hash => Style::default().fg(DEFAULT_THEME.selector),
        TokenKind::String | TokenKind::Url => Style::default().fg(DEFAULT_THEME.string),
        TokenKind::Number => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Important => Style::default()
            .fg(DEFAULT_THEME.important)
            .add_modifier(Modifier::BOLD),
        TokenKind::Comment => Style::default().fg(DEFAULT_THEME.comment),
        TokenKind::Function => Style::default().fg(DEFAULT_THEME.primary),
        TokenKind::Char => match value {
            "{" | "}" | "(" | ")" | "[" | "]" => Style::default().fg(DEFAULT_THEME.primary),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        },
        TokenKind::Error => Style::default().fg(DEFAULT_THEME.error),
        TokenKind::Identifier | TokenKind::Whitespace | TokenKind::EndOfInput => {
            Style::default().fg(DEFAULT_THEME.fg)
        }
    }
}

/// Highlight one line of CSS
pub fn highlight_source_line(line: &str) -> Line<'static> {
    let mut scanner = Scanner::new(line);
    let mut spans = Vec::new();
    let mut consumed = 0;

    loop {
        let token = scanner.next();
        match token.kind {
            TokenKind::EndOfInput => break,
            TokenKind::Error => {
                let rest: String = line.chars().skip(consumed).collect();
                spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.comment)));
                break;
            }
            kind => {
                consumed += token.value.chars().count();
                let style = token_style(kind, &token.value);
                spans.push(Span::styled(token.value, style));
            }
        }
    }

    Line::from(spans)
}

/// Render the source pane starting at `scroll` (clamped to the file length)
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = (*scroll).min(lines.len().saturating_sub(visible_height));

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut spans = vec![Span::styled(
                format!("{:4} ", idx + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            spans.extend(highlight_source_line(line).spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
