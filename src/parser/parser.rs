//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, token acquisition helpers, and the main parse entry
//! point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent consumer of [`Scanner`] output:
//! - This module: Parser struct, token primitives, top-level rule loop
//! - `rules`: at-rules and qualified rules
//! - `selectors`: selector lists, tracked with an explicit bracket stack
//! - `declarations`: declaration blocks and single declarations
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Lookahead is a single pushback slot (`cache`). The grammar never needs more
//! than one token of lookahead, and nothing is ever un-read beyond that token.

use super::ast::*;
use super::options::ParserOptions;
use super::scanner::{Scanner, Token, TokenKind};
use super::selectors::is_selector_start;
use log::{debug, trace, warn};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {}, column {}: {kind}", .location.line, .location.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The scanner could not classify the input
    #[error("invalid input {text:?}")]
    Lexical { text: String },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// A closing bracket that does not match the innermost open one
    #[error("expected '{expected}', found '{found}'")]
    UnbalancedBrackets { expected: char, found: char },

    #[error("expected components, none found for property '{property}'")]
    EmptyDeclaration { property: String },

    #[error("hit end of input while parsing {context}")]
    UnexpectedEof { context: &'static str },

    #[error("brackets nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

/// Error for a token that is not one of the `expected` ones
pub(crate) fn unexpected(token: &Token, expected: &str) -> ParseError {
    let kind = match token.kind {
        TokenKind::Error => ParseErrorKind::Lexical {
            text: token.value.clone(),
        },
        _ => ParseErrorKind::UnexpectedToken {
            expected: expected.to_string(),
            found: token.to_string(),
        },
    };
    ParseError::new(kind, token.location)
}

/// Error for a terminal token reached inside an unclosed construct
pub(crate) fn unexpected_end(token: &Token, context: &'static str) -> ParseError {
    match token.kind {
        TokenKind::Error => unexpected(token, context),
        _ => ParseError::new(ParseErrorKind::UnexpectedEof { context }, token.location),
    }
}

/// Recursive descent parser for CSS stylesheets
pub struct Parser {
    scanner: Scanner,
    /// One-token pushback filled by `peek` and `push_back`
    pub(crate) cache: Option<Token>,
    pub(crate) options: ParserOptions,
}

impl Parser {
    pub fn new(scanner: Scanner) -> Self {
        Self::with_options(scanner, ParserOptions::default())
    }

    pub fn with_options(scanner: Scanner, options: ParserOptions) -> Self {
        Self {
            scanner,
            cache: None,
            options,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse the whole source into a stylesheet.
    ///
    /// Stops at the first error; no partial tree is returned.
    pub fn parse(&mut self) -> Result<Stylesheet, ParseError> {
        let mut stylesheet = Stylesheet::new();

        loop {
            let token = self.next_significant_token();
            match token.kind {
                TokenKind::EndOfInput => break,
                TokenKind::Error => return Err(unexpected(&token, "rule")),
                TokenKind::AtKeyword => {
                    let rule = self.parse_at_rule(token)?;
                    stylesheet.rules.push(Rule::At(rule));
                }
                _ if is_selector_start(&token) => {
                    let rule = self.parse_qualified_rule(token)?;
                    stylesheet.rules.push(Rule::Qualified(rule));
                }
                // stray separators between rules
                _ if token.is_char(';') => {}
                _ if self.options.strict => {
                    return Err(unexpected(&token, "at-rule or selector"));
                }
                _ => {
                    warn!(
                        "skipping {} at line {}, column {}",
                        token, token.location.line, token.location.column
                    );
                }
            }
        }

        debug!("parsed {} top-level rules", stylesheet.rules.len());
        Ok(stylesheet)
    }

    // ===== Token primitives =====

    /// Next raw token, whitespace included; drains the pushback slot first
    pub(crate) fn next_token(&mut self) -> Token {
        if let Some(token) = self.cache.take() {
            return token;
        }
        let token = self.scanner.next();
        trace!(
            "{:?} {:?} at {}:{}",
            token.kind,
            token.value,
            token.location.line,
            token.location.column
        );
        token
    }

    /// Next token that is not whitespace or a comment
    pub(crate) fn next_significant_token(&mut self) -> Token {
        loop {
            let token = self.next_token();
            if !token.is_insignificant() {
                return token;
            }
        }
    }

    /// Look at the next significant token without consuming it
    pub(crate) fn peek(&mut self) -> &Token {
        let token = self.next_significant_token();
        self.cache.insert(token)
    }

    /// Return one token to the stream. The slot must be empty.
    pub(crate) fn push_back(&mut self, token: Token) {
        debug_assert!(self.cache.is_none(), "pushback slot already holds a token");
        self.cache = Some(token);
    }

    /// Consume the next significant token, which must be the `Char` `c`
    pub(crate) fn expect_char(&mut self, c: char) -> Result<Token, ParseError> {
        let token = self.next_significant_token();
        if token.is_char(c) {
            Ok(token)
        } else {
            Err(unexpected(&token, &format!("'{c}'")))
        }
    }
}

/// Parse a complete stylesheet with default options
pub fn parse_stylesheet(source: &str) -> Result<Stylesheet, ParseError> {
    Parser::new(Scanner::new(source)).parse()
}

/// Parse a complete stylesheet with the given options
pub fn parse_stylesheet_with(
    source: &str,
    options: ParserOptions,
) -> Result<Stylesheet, ParseError> {
    Parser::with_options(Scanner::new(source), options).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_rule() {
        let source = ".cool-name { display: none;}";
        let stylesheet = parse_stylesheet(source).unwrap();

        assert_eq!(stylesheet.rules.len(), 1);
        match &stylesheet.rules[0] {
            Rule::Qualified(rule) => {
                assert_eq!(rule.selectors, vec![ComponentValue::new(".cool-name")]);
                assert_eq!(rule.declarations.len(), 1);
                assert_eq!(rule.declarations.declarations[0].property, "display");
                assert_eq!(rule.declarations.declarations[0].values, vec!["none"]);
            }
            _ => panic!("Expected qualified rule"),
        }
    }

    #[test]
    fn test_empty_source() {
        let stylesheet = parse_stylesheet("  /* nothing */ \n").unwrap();
        assert!(stylesheet.rules.is_empty());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut parser = Parser::new(Scanner::new("  a  b"));
        assert_eq!(parser.peek().value, "a");
        assert_eq!(parser.peek().value, "a");
        assert!(parser.cache.is_some());
        assert_eq!(parser.next_significant_token().value, "a");
        assert!(parser.cache.is_none());
        assert_eq!(parser.next_significant_token().value, "b");
        assert_eq!(parser.next_significant_token().kind, TokenKind::EndOfInput);
        assert_eq!(parser.next_significant_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_expect_char() {
        let mut parser = Parser::new(Scanner::new(" : ;"));
        assert!(parser.expect_char(':').is_ok());
        let err = parser.expect_char(':').unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                expected: "':'".to_string(),
                found: "';'".to_string(),
            }
        );
        assert_eq!(err.location, SourceLocation::new(1, 4));
    }

    #[test]
    fn test_strict_rejects_stray_top_level_token() {
        let err = parse_stylesheet("} a { b: c; }").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
        assert_eq!(err.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_lenient_skips_stray_top_level_token() {
        let options = ParserOptions::default().with_strict(false);
        let stylesheet = parse_stylesheet_with("} 42 a { b: c; }", options).unwrap();
        assert_eq!(stylesheet.rules.len(), 1);
    }

    #[test]
    fn test_stray_semicolons_between_rules() {
        let stylesheet = parse_stylesheet("; a { b: c; } ;").unwrap();
        assert_eq!(stylesheet.rules.len(), 1);
    }

    #[test]
    fn test_lexical_error_surfaces() {
        let err = parse_stylesheet("a { b: c; }\n\u{1}").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Lexical {
                text: "\u{1}".to_string()
            }
        );
        assert_eq!(err.location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_error_display() {
        let err = parse_stylesheet("a { color }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 11: expected ':', found '}'"
        );
    }
}
