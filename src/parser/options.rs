// Parser configuration and limits

/// Deepest bracket nesting accepted inside a selector
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// At-rules whose block holds declarations rather than nested rules
pub const DECLARATION_AT_RULES: &[&str] = &[
    "@font-face",
    "@page",
    "@counter-style",
    "@property",
    "@viewport",
    "@font-feature-values",
];

/// Knobs for [`Parser`](super::parser::Parser)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Reject tokens at the top level that cannot start a rule. When off they
    /// are skipped with a warning.
    pub strict: bool,
    /// Capture the whole at-rule prelude instead of its first token only
    pub full_prelude: bool,
    pub max_nesting_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            strict: true,
            full_prelude: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ParserOptions {
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_full_prelude(mut self, full_prelude: bool) -> Self {
        self.full_prelude = full_prelude;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

/// Does the block of this at-rule hold declarations?
pub fn holds_declarations(keyword: &str) -> bool {
    DECLARATION_AT_RULES
        .iter()
        .any(|k| k.eq_ignore_ascii_case(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert!(options.strict);
        assert!(!options.full_prelude);
        assert_eq!(options.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_builder() {
        let options = ParserOptions::default()
            .with_strict(false)
            .with_full_prelude(true)
            .with_max_nesting_depth(3);
        assert_eq!(
            options,
            ParserOptions {
                strict: false,
                full_prelude: true,
                max_nesting_depth: 3,
            }
        );
    }

    #[test]
    fn test_holds_declarations() {
        assert!(holds_declarations("@font-face"));
        assert!(holds_declarations("@PAGE"));
        assert!(!holds_declarations("@media"));
        assert!(!holds_declarations("@supports"));
    }
}
