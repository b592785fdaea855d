// AST (Abstract Syntax Tree) definitions for CSS stylesheets

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Root of the tree: rules in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A top-level rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    At(AtRule),
    Qualified(QualifiedRule),
}

/// `@keyword prelude { ... }` or `@keyword prelude;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Includes the leading `@`
    pub keyword: String,
    pub prelude: String,
    pub body: AtRuleBody,
}

/// How an at-rule is terminated.
///
/// An at-rule ends either with a bare `;` or with a block, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtRuleBody {
    Semicolon,
    /// Nested qualified rules, e.g. the body of `@media`
    Rules(Vec<QualifiedRule>),
    /// Declarations directly inside the block, e.g. `@font-face`
    Block(Block),
}

impl AtRule {
    pub fn just_semicolon(&self) -> bool {
        matches!(self.body, AtRuleBody::Semicolon)
    }

    /// First nested qualified rule, if the body holds rules
    pub fn nested_rule(&self) -> Option<&QualifiedRule> {
        self.nested_rules().first()
    }

    pub fn nested_rules(&self) -> &[QualifiedRule] {
        match &self.body {
            AtRuleBody::Rules(rules) => rules,
            _ => &[],
        }
    }

    pub fn block(&self) -> Option<&Block> {
        match &self.body {
            AtRuleBody::Block(block) => Some(block),
            _ => None,
        }
    }
}

/// Selector list followed by a declaration block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedRule {
    /// One entry per comma-separated selector, never empty
    pub selectors: Vec<ComponentValue>,
    pub declarations: DeclarationList,
}

/// Flattened text of one selector, e.g. `table tbody` or `#id[name="x"]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentValue {
    pub name: String,
}

impl ComponentValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationList {
    pub declarations: Vec<Declaration>,
}

impl DeclarationList {
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }
}

impl<'a> IntoIterator for &'a DeclarationList {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

/// `property: value value ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    /// Value token texts; a trailing `!important` is kept as the last element
    pub values: Vec<String>,
}

impl Declaration {
    pub fn is_important(&self) -> bool {
        self.values
            .last()
            .is_some_and(|v| v.eq_ignore_ascii_case("!important"))
    }
}

/// Plain `{ ... }` body holding declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub declarations: DeclarationList,
}
