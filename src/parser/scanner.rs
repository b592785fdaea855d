//! Scanner (tokenizer) for CSS source text
//!
//! Produces one [`Token`] per call to [`Scanner::next`], advancing an internal
//! cursor. The scanner never fails: input it cannot classify comes back as a
//! [`TokenKind::Error`] token, and the parser turns that into a parse error.
//!
//! Once [`TokenKind::EndOfInput`] or [`TokenKind::Error`] has been produced the
//! scanner is finished and keeps returning that same token.

use super::ast::SourceLocation;
use std::fmt;

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Hash,
    AtKeyword,
    /// A single punctuation or delimiter character
    Char,
    String,
    /// Name immediately followed by `(`; the value includes the `(`
    Function,
    /// Number, dimension or percentage (`3`, `12pt`, `50%`)
    Number,
    /// `url(...)` with an unquoted body, as one lexeme
    Url,
    /// `!important`
    Important,
    Whitespace,
    Comment,
    Error,
    EndOfInput,
}

/// A token and the exact source text it was scanned from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            value: value.into(),
            location,
        }
    }

    /// True for `Char` tokens holding exactly `c`
    pub fn is_char(&self, c: char) -> bool {
        self.kind == TokenKind::Char && self.value.len() == c.len_utf8() && self.value.starts_with(c)
    }

    /// The character of a `Char` token
    pub fn as_char(&self) -> Option<char> {
        if self.kind != TokenKind::Char {
            return None;
        }
        let mut chars = self.value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// `EndOfInput` and `Error` end the token stream
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput | TokenKind::Error)
    }

    /// Whitespace and comments carry no meaning for the grammar
    pub fn is_insignificant(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.value),
            TokenKind::Hash => write!(f, "hash '{}'", self.value),
            TokenKind::AtKeyword => write!(f, "at-keyword '{}'", self.value),
            TokenKind::Char => write!(f, "'{}'", self.value),
            TokenKind::String => write!(f, "string {}", self.value),
            TokenKind::Function => write!(f, "function '{}'", self.value),
            TokenKind::Number => write!(f, "number '{}'", self.value),
            TokenKind::Url => write!(f, "url '{}'", self.value),
            TokenKind::Important => write!(f, "'{}'", self.value),
            TokenKind::Whitespace => write!(f, "whitespace"),
            TokenKind::Comment => write!(f, "comment"),
            TokenKind::Error => write!(f, "invalid input '{}'", self.value.escape_debug()),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Scanner over one source string
pub struct Scanner {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    /// Set once `EndOfInput` or `Error` has been produced
    finished: Option<Token>,
}

impl Scanner {
    /// Create a new scanner for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            finished: None,
        }
    }

    /// Scan the next token
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token {
        if let Some(token) = &self.finished {
            return token.clone();
        }

        let token = self.scan_token();
        if token.is_terminal() {
            self.finished = Some(token.clone());
        }
        token
    }

    /// Scan every token up to and including the terminal one
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next();
            let done = token.is_terminal();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn scan_token(&mut self) -> Token {
        let loc = self.current_location();
        let Some(ch) = self.peek() else {
            return Token::new(TokenKind::EndOfInput, "", loc);
        };

        match ch {
            c if is_whitespace(c) => self.whitespace(loc),

            '/' if self.peek_ahead(1) == Some('*') => self.comment(loc),

            '"' | '\'' => self.string(ch, loc),

            '@' if self.starts_name(1) => {
                self.advance();
                let mut value = String::from('@');
                self.consume_name(&mut value);
                Token::new(TokenKind::AtKeyword, value, loc)
            }

            '#' if self.peek_ahead(1).is_some_and(is_name_char) || self.starts_escape(1) => {
                self.advance();
                let mut value = String::from('#');
                self.consume_name(&mut value);
                Token::new(TokenKind::Hash, value, loc)
            }

            // CDO / CDC are insignificant, like whitespace
            '<' if self.matches_ahead("<!--") => {
                self.advance_n(4);
                Token::new(TokenKind::Whitespace, "<!--", loc)
            }
            '-' if self.matches_ahead("-->") => {
                self.advance_n(3);
                Token::new(TokenKind::Whitespace, "-->", loc)
            }

            _ if self.starts_number() => self.number(loc),

            _ if self.starts_name(0) => self.ident_like(loc),

            '!' if self.matches_important() => {
                let value: String = self.input[self.position..self.position + 10]
                    .iter()
                    .collect();
                self.advance_n(10);
                Token::new(TokenKind::Important, value, loc)
            }

            c if is_delimiter(c) => {
                self.advance();
                Token::new(TokenKind::Char, c.to_string(), loc)
            }

            _ => {
                self.advance();
                Token::new(TokenKind::Error, ch.to_string(), loc)
            }
        }
    }

    fn whitespace(&mut self, loc: SourceLocation) -> Token {
        let mut value = String::new();
        while let Some(c) = self.peek().filter(|&c| is_whitespace(c)) {
            value.push(c);
            self.advance();
        }
        Token::new(TokenKind::Whitespace, value, loc)
    }

    /// `/* ... */`
    fn comment(&mut self, loc: SourceLocation) -> Token {
        let start = self.position;
        self.advance_n(2);

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance_n(2);
                return Token::new(TokenKind::Comment, self.text_from(start), loc);
            }
            self.advance();
        }

        Token::new(TokenKind::Error, self.text_from(start), loc)
    }

    /// Quoted string; the value keeps the quotes and escapes verbatim
    fn string(&mut self, quote: char, loc: SourceLocation) -> Token {
        let start = self.position;
        self.advance(); // opening quote

        while let Some(ch) = self.peek() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Token::new(TokenKind::String, self.text_from(start), loc);
                }
                '\n' => break,
                '\\' => {
                    self.advance();
                    // escaped delimiter or escaped newline
                    if self.advance().is_none() {
                        break;
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }

        Token::new(TokenKind::Error, self.text_from(start), loc)
    }

    /// Number with optional fraction, exponent and unit or `%`
    fn number(&mut self, loc: SourceLocation) -> Token {
        let start = self.position;

        if matches!(self.peek(), Some('+') | Some('-')) {
            self.advance();
        }
        self.consume_digits();
        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            let digit_at = match self.peek_ahead(1) {
                Some('+') | Some('-') => 2,
                _ => 1,
            };
            if self.peek_ahead(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.advance_n(digit_at);
                self.consume_digits();
            }
        }

        let mut value = self.text_from(start);
        if self.peek() == Some('%') {
            self.advance();
            value.push('%');
        } else if self.starts_name(0) {
            self.consume_name(&mut value);
        }

        Token::new(TokenKind::Number, value, loc)
    }

    /// Identifier, function or unquoted url
    fn ident_like(&mut self, loc: SourceLocation) -> Token {
        let mut value = String::new();
        self.consume_name(&mut value);

        if self.peek() != Some('(') {
            return Token::new(TokenKind::Identifier, value, loc);
        }

        self.advance();
        value.push('(');

        if value.eq_ignore_ascii_case("url(") {
            if let Some(url) = self.unquoted_url(&value) {
                return Token::new(TokenKind::Url, url, loc);
            }
        }

        Token::new(TokenKind::Function, value, loc)
    }

    /// Scan the body of `url(` when it is not quoted; the cursor is left
    /// untouched when the body starts with a quote.
    fn unquoted_url(&mut self, head: &str) -> Option<String> {
        let mut offset = 0;
        while self.peek_ahead(offset).is_some_and(is_whitespace) {
            offset += 1;
        }
        if matches!(self.peek_ahead(offset), Some('"') | Some('\'')) {
            return None;
        }

        let mut value = head.to_string();
        while let Some(ch) = self.peek() {
            self.advance();
            value.push(ch);
            match ch {
                ')' => return Some(value),
                '\\' => {
                    if let Some(escaped) = self.advance() {
                        value.push(escaped);
                    }
                }
                _ => {}
            }
        }

        // unterminated url: hand back what we have and let the parser see EOF
        Some(value)
    }

    fn consume_name(&mut self, out: &mut String) {
        while let Some(ch) = self.peek() {
            if is_name_char(ch) {
                out.push(ch);
                self.advance();
            } else if self.starts_escape(0) {
                out.push(ch);
                self.advance();
                if let Some(escaped) = self.advance() {
                    out.push(escaped);
                }
            } else {
                break;
            }
        }
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Does a name (identifier) start `offset` characters ahead?
    fn starts_name(&self, offset: usize) -> bool {
        match self.peek_ahead(offset) {
            Some('-') => match self.peek_ahead(offset + 1) {
                Some(c) => is_name_start(c) || c == '-' || self.starts_escape(offset + 1),
                None => false,
            },
            Some(c) if is_name_start(c) => true,
            Some('\\') => self.starts_escape(offset),
            _ => false,
        }
    }

    /// `\` followed by anything but a newline
    fn starts_escape(&self, offset: usize) -> bool {
        self.peek_ahead(offset) == Some('\\')
            && self.peek_ahead(offset + 1).is_some_and(|c| c != '\n')
    }

    fn starts_number(&self) -> bool {
        let digit_at = |n: usize| self.peek_ahead(n).is_some_and(|c| c.is_ascii_digit());
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => digit_at(1),
            Some('+') | Some('-') => {
                digit_at(1) || (self.peek_ahead(1) == Some('.') && digit_at(2))
            }
            _ => false,
        }
    }

    fn matches_ahead(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, c)| self.peek_ahead(i) == Some(c))
    }

    /// `!important`, case-insensitive, not followed by more name characters
    fn matches_important(&self) -> bool {
        "important"
            .chars()
            .enumerate()
            .all(|(i, c)| {
                self.peek_ahead(i + 1)
                    .is_some_and(|actual| actual.eq_ignore_ascii_case(&c))
            })
            && !self.peek_ahead(10).is_some_and(is_name_char)
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0C')
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

fn is_delimiter(c: char) -> bool {
    matches!(
        c,
        '{' | '}'
            | '('
            | ')'
            | '['
            | ']'
            | ':'
            | ';'
            | ','
            | '.'
            | '>'
            | '+'
            | '~'
            | '*'
            | '='
            | '|'
            | '^'
            | '$'
            | '!'
            | '/'
            | '%'
            | '&'
            | '?'
            | '<'
            | '@'
            | '#'
            | '-'
    )
}
