//! # Introduction
//!
//! csstty parses CSS stylesheets into a small syntax tree and lets you browse
//! that tree in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Parser → Stylesheet → Printer / TUI
//! ```
//!
//! 1. [`parser`]: scans the source one token at a time and builds the
//!    [`parser::ast::Stylesheet`] tree by recursive descent.
//! 2. [`printer`]: renders a tree back to normalized CSS text.
//! 3. [`ui`]: ratatui-based browser; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use csstty::parser::{Parser, Scanner};
//! use csstty::parser::ast::Rule;
//!
//! let mut parser = Parser::new(Scanner::new("a, b { color: red !important; }"));
//! let stylesheet = parser.parse().unwrap();
//!
//! let Rule::Qualified(rule) = &stylesheet.rules[0] else { unreachable!() };
//! assert_eq!(rule.selectors.len(), 2);
//! assert!(rule.declarations.declarations[0].is_important());
//! ```

pub mod parser;
pub mod printer;
pub mod ui;
