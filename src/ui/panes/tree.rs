//! Rule tree pane
//!
//! The stylesheet is flattened into one row per at-rule, qualified rule and
//! declaration, indented by nesting depth. Each row remembers the top-level
//! rule it belongs to so the preview pane can render that rule.

use crate::parser::ast::*;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRowKind {
    AtRule,
    Rule,
    Declaration,
}

/// One visible row of the rule tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub kind: TreeRowKind,
    pub text: String,
    /// Index into `Stylesheet::rules`
    pub rule_index: usize,
}

/// Flatten a stylesheet into tree rows, in source order
pub fn flatten_stylesheet(stylesheet: &Stylesheet) -> Vec<TreeRow> {
    let mut rows = Vec::new();

    for (rule_index, rule) in stylesheet.rules.iter().enumerate() {
        match rule {
            Rule::At(at) => {
                let text = if at.prelude.is_empty() {
                    at.keyword.clone()
                } else {
                    format!("{} {}", at.keyword, at.prelude)
                };
                rows.push(TreeRow {
                    depth: 0,
                    kind: TreeRowKind::AtRule,
                    text,
                    rule_index,
                });
                match &at.body {
                    AtRuleBody::Semicolon => {}
                    AtRuleBody::Block(block) => {
                        push_declarations(&mut rows, &block.declarations, 1, rule_index)
                    }
                    AtRuleBody::Rules(nested) => {
                        for qualified in nested {
                            push_qualified_rule(&mut rows, qualified, 1, rule_index);
                        }
                    }
                }
            }
            Rule::Qualified(qualified) => push_qualified_rule(&mut rows, qualified, 0, rule_index),
        }
    }

    rows
}

fn push_qualified_rule(
    rows: &mut Vec<TreeRow>,
    rule: &QualifiedRule,
    depth: usize,
    rule_index: usize,
) {
    let text = rule
        .selectors
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    rows.push(TreeRow {
        depth,
        kind: TreeRowKind::Rule,
        text,
        rule_index,
    });
    push_declarations(rows, &rule.declarations, depth + 1, rule_index);
}

fn push_declarations(
    rows: &mut Vec<TreeRow>,
    declarations: &DeclarationList,
    depth: usize,
    rule_index: usize,
) {
    for declaration in declarations {
        rows.push(TreeRow {
            depth,
            kind: TreeRowKind::Declaration,
            text: declaration.to_string(),
            rule_index,
        });
    }
}

fn row_style(kind: TreeRowKind) -> Style {
    match kind {
        TreeRowKind::AtRule => Style::default()
            .fg(DEFAULT_THEME.at_keyword)
            .add_modifier(Modifier::BOLD),
        TreeRowKind::Rule => Style::default().fg(DEFAULT_THEME.selector),
        TreeRowKind::Declaration => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the rule tree pane, keeping the selected row in view
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[TreeRow],
    selected: usize,
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
        .title(format!(" Rules ({}) ", rows.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if selected < *scroll {
        *scroll = selected;
    } else if selected >= *scroll + visible_height {
        *scroll = selected + 1 - visible_height;
    }

    let lines: Vec<Line> = if rows.is_empty() {
        vec![Line::from(Span::styled(
            "(empty stylesheet)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))]
    } else {
        rows.iter()
            .enumerate()
            .skip(*scroll)
            .take(visible_height)
            .map(|(idx, row)| {
                let marker = if idx == selected { "▶ " } else { "  " };
                let mut style = row_style(row.kind);
                if idx == selected {
                    style = style.bg(DEFAULT_THEME.current_line_bg);
                }
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                    Span::raw("  ".repeat(row.depth)),
                    Span::styled(row.text.clone(), style),
                ])
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
