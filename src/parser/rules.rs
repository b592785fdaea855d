//! At-rule and qualified rule parsing
//!
//! ```text
//! at-rule        : AT-KEYWORD prelude [ block | ';' ]
//! qualified-rule : selector [ ',' selector ]* '{' declaration-list '}'
//! ```
//!
//! The prelude is a single token unless [`ParserOptions::full_prelude`] is
//! set, in which case everything up to the block or `;` is captured.
//!
//! A body may be opened with `{`, `[` or `(` and is closed by the matching
//! character. Directly after the keyword, `[` and `(` only open the body of
//! declaration at-rules such as `@page`; for the others a body opened that
//! way needs a prelude token first (`@media x ( ... )`).
//!
//! [`ParserOptions::full_prelude`]: super::options::ParserOptions::full_prelude

use super::ast::*;
use super::options::holds_declarations;
use super::parser::{unexpected, unexpected_end, ParseError, Parser};
use super::scanner::{Token, TokenKind};
use super::selectors::{closing_bracket, is_selector_start, SpacedText};
use log::debug;

impl Parser {
    /// Parse an at-rule whose keyword token has already been consumed
    pub(crate) fn parse_at_rule(&mut self, keyword: Token) -> Result<AtRule, ParseError> {
        let prelude = if self.options.full_prelude {
            self.parse_full_prelude()?
        } else {
            self.parse_single_token_prelude(&keyword.value)
        };

        let terminator = self.next_significant_token();
        let body = match terminator.as_char() {
            Some(';') => AtRuleBody::Semicolon,
            Some(open @ ('{' | '[' | '(')) => {
                let close = closing_bracket(open).unwrap_or('}');
                if holds_declarations(&keyword.value) {
                    AtRuleBody::Block(Block {
                        declarations: self.parse_declaration_list(close)?,
                    })
                } else {
                    AtRuleBody::Rules(self.parse_rule_list(close)?)
                }
            }
            _ => return Err(unexpected(&terminator, "opening block or ';'")),
        };

        debug!(
            "parsed at-rule {} {:?} at line {}",
            keyword.value, prelude, keyword.location.line
        );

        Ok(AtRule {
            keyword: keyword.value,
            prelude,
            body,
        })
    }

    /// One token, or nothing when the block or `;` follows the keyword
    /// directly. The terminator itself is left in the stream.
    ///
    /// `[` and `(` right after the keyword open the body only for at-rules
    /// that hold declarations; elsewhere they are the prelude, as in
    /// `@media (color) { ... }`.
    fn parse_single_token_prelude(&mut self, keyword: &str) -> String {
        let opens_block = holds_declarations(keyword);
        let next = self.peek();
        if next.is_char('{')
            || next.is_char(';')
            || next.is_terminal()
            || (opens_block && (next.is_char('[') || next.is_char('(')))
        {
            return String::new();
        }
        self.next_significant_token().value
    }

    /// Every token up to a `{` or `;` outside brackets. The terminator is
    /// pushed back.
    fn parse_full_prelude(&mut self) -> Result<String, ParseError> {
        let mut text = SpacedText::default();
        let mut stack: Vec<char> = Vec::new();

        loop {
            let token = self.next_token();
            if token.is_insignificant() {
                text.mark_space();
                continue;
            }
            if token.is_terminal()
                || (stack.is_empty() && (token.is_char('{') || token.is_char(';')))
            {
                self.push_back(token);
                return Ok(text.take());
            }
            self.track_bracket(&mut stack, &token)?;
            text.push(&token.value);
        }
    }

    /// Nested qualified rules up to and including `close`
    fn parse_rule_list(&mut self, close: char) -> Result<Vec<QualifiedRule>, ParseError> {
        let mut rules = Vec::new();

        loop {
            let token = self.next_significant_token();
            match token.kind {
                _ if token.is_char(close) => return Ok(rules),
                TokenKind::EndOfInput | TokenKind::Error => {
                    return Err(unexpected_end(&token, "block"));
                }
                // keyframe selectors such as `50%`
                TokenKind::Number => rules.push(self.parse_qualified_rule(token)?),
                _ if is_selector_start(&token) => rules.push(self.parse_qualified_rule(token)?),
                _ => return Err(unexpected(&token, "selector")),
            }
        }
    }

    /// Parse a qualified rule starting with the selector token `first`
    pub(crate) fn parse_qualified_rule(&mut self, first: Token) -> Result<QualifiedRule, ParseError> {
        let line = first.location.line;
        let selectors = self.parse_selector_list(first)?;
        let declarations = self.parse_declaration_list('}')?;

        debug!(
            "parsed rule with {} selector(s) and {} declaration(s) at line {}",
            selectors.len(),
            declarations.len(),
            line
        );

        Ok(QualifiedRule {
            selectors,
            declarations,
        })
    }
}
