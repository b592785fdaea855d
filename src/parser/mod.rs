//! CSS stylesheet parser
//!
//! This module transforms CSS source text into a syntax tree:
//! - [`scanner`]: Tokenization (source text → tokens, one per call)
//! - [`parser`]: Parsing (tokens → tree), split across `rules`,
//!   `selectors` and `declarations`
//! - [`ast`]: Tree node definitions
//! - [`options`]: Parser configuration
//!
//! # Supported Grammar
//!
//! - At-rules ending in `;` (`@charset`, `@import`) or a block
//! - Nested qualified rules inside at-rule blocks (`@media`, `@supports`,
//!   `@keyframes`); declaration blocks for `@font-face`, `@page` and friends
//! - Selector lists with combinators, pseudo-classes and attribute selectors,
//!   stored as flattened text
//! - Declarations with `!important`
//!
//! Parsing stops at the first error; there is no recovery.

pub mod ast;
mod declarations;
pub mod options;
pub mod parser;
mod rules;
pub mod scanner;
mod selectors;

pub use options::ParserOptions;
pub use parser::{parse_stylesheet, parse_stylesheet_with, ParseError, ParseErrorKind, Parser};
pub use scanner::{Scanner, Token, TokenKind};
