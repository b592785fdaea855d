//! Selector list parsing
//!
//! Selectors are kept as flattened text, one [`ComponentValue`] per
//! comma-separated group. The parser reads raw tokens so it can see the
//! whitespace that separates compound selectors; any run of whitespace
//! becomes one space in the stored text, and leading or trailing whitespace
//! is dropped.
//!
//! Brackets (`[...]`, `(...)`, functional pseudo-classes like `:not(`) are
//! tracked on an explicit stack of expected closing characters. A `,` or `{`
//! only ends a selector when that stack is empty, so `:is(a, b)` stays one
//! selector.

use super::ast::ComponentValue;
use super::parser::{unexpected, unexpected_end, ParseError, ParseErrorKind, Parser};
use super::scanner::{Token, TokenKind};

/// Can this token begin a qualified rule?
pub(crate) fn is_selector_start(token: &Token) -> bool {
    match token.kind {
        TokenKind::Hash | TokenKind::Identifier => true,
        TokenKind::Char => matches!(token.as_char(), Some('.' | '*' | ':' | '[')),
        _ => false,
    }
}

pub(crate) fn closing_bracket(open: char) -> Option<char> {
    match open {
        '[' => Some(']'),
        '(' => Some(')'),
        '{' => Some('}'),
        _ => None,
    }
}

pub(crate) fn is_closing_bracket(c: char) -> bool {
    matches!(c, ']' | ')' | '}')
}

/// Text accumulator that collapses whitespace runs to one space
#[derive(Debug, Default)]
pub(crate) struct SpacedText {
    text: String,
    pending_space: bool,
}

impl SpacedText {
    /// Whitespace was seen; it only shows up if more text follows
    pub(crate) fn mark_space(&mut self) {
        self.pending_space = !self.text.is_empty();
    }

    pub(crate) fn push(&mut self, s: &str) {
        if self.pending_space {
            self.text.push(' ');
            self.pending_space = false;
        }
        self.text.push_str(s);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn take(&mut self) -> String {
        self.pending_space = false;
        std::mem::take(&mut self.text)
    }
}

impl Parser {
    /// Parse comma-separated selectors, starting with `first`, up to and
    /// including the `{` that opens the declaration block.
    pub(crate) fn parse_selector_list(
        &mut self,
        first: Token,
    ) -> Result<Vec<ComponentValue>, ParseError> {
        let mut selectors = Vec::new();
        let mut current = SpacedText::default();
        let mut stack: Vec<char> = Vec::new();
        let mut token = first;

        loop {
            if token.is_insignificant() {
                current.mark_space();
            } else if token.is_terminal() {
                return Err(unexpected_end(&token, "selector"));
            } else if stack.is_empty() && (token.is_char(',') || token.is_char('{')) {
                if current.is_empty() {
                    return Err(unexpected(&token, "selector"));
                }
                selectors.push(ComponentValue::new(current.take()));
                if token.is_char('{') {
                    return Ok(selectors);
                }
            } else if stack.is_empty() && token.is_char(';') {
                return Err(unexpected(&token, "'{'"));
            } else {
                self.track_bracket(&mut stack, &token)?;
                current.push(&token.value);
            }

            token = self.next_token();
        }
    }

    /// Update the open-bracket stack for one token.
    ///
    /// Openers push their closing character; closers must match the top of
    /// the stack.
    pub(crate) fn track_bracket(
        &mut self,
        stack: &mut Vec<char>,
        token: &Token,
    ) -> Result<(), ParseError> {
        let opened = match token.kind {
            TokenKind::Function => Some(')'),
            TokenKind::Char => token.as_char().and_then(closing_bracket),
            _ => None,
        };

        if let Some(close) = opened {
            if stack.len() >= self.options.max_nesting_depth {
                return Err(ParseError::new(
                    ParseErrorKind::NestingTooDeep {
                        limit: self.options.max_nesting_depth,
                    },
                    token.location,
                ));
            }
            stack.push(close);
            return Ok(());
        }

        let Some(found) = token.as_char().filter(|&c| is_closing_bracket(c)) else {
            return Ok(());
        };

        match stack.last() {
            Some(&expected) if expected == found => {
                stack.pop();
                Ok(())
            }
            Some(&expected) => Err(ParseError::new(
                ParseErrorKind::UnbalancedBrackets { expected, found },
                token.location,
            )),
            None => Err(unexpected(token, "matching opening bracket")),
        }
    }
}
