//! Property summary pane: how often each property is declared

use crate::parser::ast::*;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashMap;

/// Property usage counts, most used first, ties broken by name
pub fn count_properties(stylesheet: &Stylesheet) -> Vec<(String, usize)> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();

    for rule in &stylesheet.rules {
        match rule {
            Rule::Qualified(rule) => count_list(&mut counts, &rule.declarations),
            Rule::At(at) => match &at.body {
                AtRuleBody::Semicolon => {}
                AtRuleBody::Block(block) => count_list(&mut counts, &block.declarations),
                AtRuleBody::Rules(nested) => {
                    for rule in nested {
                        count_list(&mut counts, &rule.declarations);
                    }
                }
            },
        }
    }

    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

fn count_list<'a>(counts: &mut FxHashMap<&'a str, usize>, list: &'a DeclarationList) {
    for declaration in list {
        *counts.entry(declaration.property.as_str()).or_default() += 1;
    }
}

pub fn render_properties_pane(
    frame: &mut Frame,
    area: Rect,
    counts: &[(String, usize)],
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
        .title(" Properties ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = (*scroll).min(counts.len().saturating_sub(visible_height));

    let lines: Vec<Line> = counts
        .iter()
        .skip(*scroll)
        .take(visible_height)
        .map(|(name, count)| {
            Line::from(vec![
                Span::styled(format!("{:>4} ", count), Style::default().fg(DEFAULT_THEME.number)),
                Span::styled(name.clone(), Style::default().fg(DEFAULT_THEME.property)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
