//! Declaration block parsing
//!
//! ```text
//! declaration-list : [ declaration | ';' ]* close
//! declaration      : IDENT ':' value+ [ ';' | '!important' ]
//! ```
//!
//! A declaration ends at `;`, right after `!important`, or in front of the
//! block's closing character. Brackets and functions inside a value are
//! tracked, so `calc(1px + 2px)` inside a `( ... )` block does not close it.
//! Reaching the end of input inside a block is always an error.

use super::ast::{Declaration, DeclarationList};
use super::parser::{unexpected, unexpected_end, ParseError, ParseErrorKind, Parser};
use super::scanner::{Token, TokenKind};
use super::selectors::is_closing_bracket;
use log::warn;

fn is_closing_bracket_token(token: &Token) -> bool {
    token.as_char().is_some_and(is_closing_bracket)
}

impl Parser {
    /// Parse declarations up to and including `close`
    pub(crate) fn parse_declaration_list(
        &mut self,
        close: char,
    ) -> Result<DeclarationList, ParseError> {
        let mut list = DeclarationList::default();

        loop {
            let token = self.next_significant_token();
            match token.kind {
                _ if token.is_char(close) => return Ok(list),
                _ if token.is_char(';') => {}
                TokenKind::EndOfInput | TokenKind::Error => {
                    return Err(unexpected_end(&token, "block"));
                }
                // nested at-rules inside declaration blocks are not supported
                TokenKind::AtKeyword => {
                    warn!(
                        "skipping {} inside declaration block at line {}",
                        token.value, token.location.line
                    );
                }
                TokenKind::Identifier => {
                    let declaration = self.parse_declaration(token, close)?;
                    list.declarations.push(declaration);
                }
                _ => return Err(unexpected(&token, "property name")),
            }
        }
    }

    /// Parse one declaration whose property token has been consumed
    pub(crate) fn parse_declaration(
        &mut self,
        property: Token,
        close: char,
    ) -> Result<Declaration, ParseError> {
        self.expect_char(':')?;

        let mut values = Vec::new();
        // brackets opened inside the value; `;` and `close` only end the
        // declaration outside them
        let mut stack: Vec<char> = Vec::new();
        loop {
            let token = self.next_significant_token();
            match token.kind {
                TokenKind::Important => {
                    values.push(token.value);
                    return Ok(Declaration {
                        property: property.value,
                        values,
                    });
                }
                TokenKind::Error => return Err(unexpected(&token, "value")),
                // the enclosing list reports the end of input
                TokenKind::EndOfInput => {
                    self.push_back(token);
                    break;
                }
                _ if stack.is_empty() && token.is_char(';') => break,
                _ if stack.is_empty() && token.is_char(close) => {
                    self.push_back(token);
                    break;
                }
                // a stray closer outside any bracket is plain value text
                _ if stack.is_empty() && is_closing_bracket_token(&token) => {
                    values.push(token.value)
                }
                _ => {
                    self.track_bracket(&mut stack, &token)?;
                    values.push(token.value);
                }
            }
        }

        if values.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyDeclaration {
                    property: property.value,
                },
                property.location,
            ));
        }

        Ok(Declaration {
            property: property.value,
            values,
        })
    }
}
