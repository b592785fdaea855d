//! Renders a parsed stylesheet back to CSS text.
//!
//! Output is normalized: one declaration per line, four-space indentation,
//! values separated by single spaces. Parsing the output again yields a tree
//! equal to the one that was printed.

use crate::parser::ast::*;
use std::fmt::{self, Write};

const INDENT: &str = "    ";

pub fn print_stylesheet(stylesheet: &Stylesheet) -> String {
    stylesheet.to_string()
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::At(rule) => write!(f, "{rule}"),
            Rule::Qualified(rule) => write!(f, "{rule}"),
        }
    }
}

impl fmt::Display for AtRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keyword)?;
        if !self.prelude.is_empty() {
            write!(f, " {}", self.prelude)?;
        }

        match &self.body {
            AtRuleBody::Semicolon => f.write_str(";\n"),
            AtRuleBody::Block(block) => {
                f.write_str(" {\n")?;
                write_declarations(f, &block.declarations, 1)?;
                f.write_str("}\n")
            }
            AtRuleBody::Rules(rules) => {
                f.write_str(" {\n")?;
                for rule in rules {
                    write_qualified_rule(f, rule, 1)?;
                }
                f.write_str("}\n")
            }
        }
    }
}

impl fmt::Display for QualifiedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_qualified_rule(f, self, 0)
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.values.join(" "))
    }
}

fn write_qualified_rule(
    f: &mut fmt::Formatter<'_>,
    rule: &QualifiedRule,
    depth: usize,
) -> fmt::Result {
    write_indent(f, depth)?;
    for (i, selector) in rule.selectors.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{selector}")?;
    }
    f.write_str(" {\n")?;
    write_declarations(f, &rule.declarations, depth + 1)?;
    write_indent(f, depth)?;
    f.write_str("}\n")
}

fn write_declarations(
    f: &mut fmt::Formatter<'_>,
    declarations: &DeclarationList,
    depth: usize,
) -> fmt::Result {
    for declaration in declarations {
        write_indent(f, depth)?;
        writeln!(f, "{declaration};")?;
    }
    Ok(())
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_stylesheet;

    #[test]
    fn test_print_qualified_rule() {
        let stylesheet = parse_stylesheet("a,b{color:red!important;margin:0 auto}").unwrap();
        assert_eq!(
            print_stylesheet(&stylesheet),
            "a, b {\n    color: red !important;\n    margin: 0 auto;\n}\n"
        );
    }

    #[test]
    fn test_print_at_rules() {
        let source = "@charset \"UTF-8\";\n@media print { body { font-size: 12pt; } }";
        let stylesheet = parse_stylesheet(source).unwrap();
        assert_eq!(
            print_stylesheet(&stylesheet),
            "@charset \"UTF-8\";\n\n@media print {\n    body {\n        font-size: 12pt;\n    }\n}\n"
        );
    }

    #[test]
    fn test_print_declaration_block_at_rule() {
        let stylesheet = parse_stylesheet("@font-face{font-family:Foo}").unwrap();
        assert_eq!(
            print_stylesheet(&stylesheet),
            "@font-face {\n    font-family: Foo;\n}\n"
        );
    }

    #[test]
    fn test_reparse_is_equal() {
        let source = r#"
            @import url(a.css);
            table   tbody, #cool-name[name="hello"] , :is(h1,h2) > p { border: 1px red solid; color: rgb(0,0,0) }
            @media print { .a:hover { color: #fff !important; } }
            @page { margin: 1in; }
        "#;
        let first = parse_stylesheet(source).unwrap();
        let second = parse_stylesheet(&print_stylesheet(&first)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_stylesheet() {
        assert_eq!(print_stylesheet(&Stylesheet::new()), "");
    }
}
