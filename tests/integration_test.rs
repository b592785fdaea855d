// Integration tests for the stylesheet parser

use csstty::parser::ast::*;
use csstty::parser::{
    parse_stylesheet, parse_stylesheet_with, ParseErrorKind, Parser, ParserOptions, Scanner,
    TokenKind,
};
use csstty::printer::print_stylesheet;

fn declaration(property: &str, values: &[&str]) -> Declaration {
    Declaration {
        property: property.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
    }
}

fn qualified(selectors: &[&str], declarations: Vec<Declaration>) -> QualifiedRule {
    QualifiedRule {
        selectors: selectors.iter().map(|s| ComponentValue::new(*s)).collect(),
        declarations: DeclarationList { declarations },
    }
}

fn single_rule(source: &str) -> QualifiedRule {
    let stylesheet = parse_stylesheet(source).expect("Parsing failed");
    assert_eq!(stylesheet.rules.len(), 1, "expected one rule in {:?}", source);
    match stylesheet.rules.into_iter().next() {
        Some(Rule::Qualified(rule)) => rule,
        other => panic!("expected a qualified rule, got {:?}", other),
    }
}

#[test]
fn test_class_selector() {
    assert_eq!(
        single_rule(".cool-name { display: none;}"),
        qualified(&[".cool-name"], vec![declaration("display", &["none"])])
    );
}

#[test]
fn test_hash_selector_with_hash_value() {
    assert_eq!(
        single_rule("#cool-name { display: none; color: #fff;}"),
        qualified(
            &["#cool-name"],
            vec![
                declaration("display", &["none"]),
                declaration("color", &["#fff"]),
            ]
        )
    );
}

#[test]
fn test_selector_groups() {
    assert_eq!(
        single_rule("th, #cool-name, .cool-name { display: none;}").selectors,
        vec![
            ComponentValue::new("th"),
            ComponentValue::new("#cool-name"),
            ComponentValue::new(".cool-name"),
        ]
    );

    let rule = single_rule("a, b, c { x: y; }");
    assert_eq!(rule.selectors.len(), 3);
    assert_eq!(rule.declarations.declarations, vec![declaration("x", &["y"])]);
}

#[test]
fn test_descendant_selector() {
    let rule = single_rule("table tbody, #cool-name, .cool-name { display: none;}");
    assert_eq!(rule.selectors[0].name, "table tbody");
    assert_eq!(rule.selectors.len(), 3);
}

#[test]
fn test_attribute_selector_kept_verbatim() {
    let rule = single_rule("#cool-name[name=\"hello\"] { display: none; color: #fff;}");
    assert_eq!(
        rule.selectors,
        vec![ComponentValue::new("#cool-name[name=\"hello\"]")]
    );
    assert_eq!(rule.declarations.len(), 2);
}

#[test]
fn test_important_retained() {
    let rule = single_rule("p { color: red !important; }");
    let decl = &rule.declarations.declarations[0];
    assert_eq!(decl.values, vec!["red", "!important"]);
    assert!(decl.is_important());
}

#[test]
fn test_charset() {
    let stylesheet = parse_stylesheet("@charset \"UTF-8\";").unwrap();
    assert_eq!(
        stylesheet.rules,
        vec![Rule::At(AtRule {
            keyword: "@charset".to_string(),
            prelude: "\"UTF-8\"".to_string(),
            body: AtRuleBody::Semicolon,
        })]
    );
    let Rule::At(at) = &stylesheet.rules[0] else {
        unreachable!()
    };
    assert!(at.just_semicolon());
    assert!(at.block().is_none());
    assert!(at.nested_rule().is_none());
}

#[test]
fn test_media_then_rule() {
    let source = r#"
@media print {
  body {
    font-size: 12pt;
  }
}

.super-cool, #it-is-awesome {
  border: 1px red solid;
}
"#;
    let stylesheet = parse_stylesheet(source).expect("Parsing failed");

    assert_eq!(
        stylesheet.rules,
        vec![
            Rule::At(AtRule {
                keyword: "@media".to_string(),
                prelude: "print".to_string(),
                body: AtRuleBody::Rules(vec![qualified(
                    &["body"],
                    vec![declaration("font-size", &["12pt"])]
                )]),
            }),
            Rule::Qualified(qualified(
                &[".super-cool", "#it-is-awesome"],
                vec![declaration("border", &["1px", "red", "solid"])]
            )),
        ]
    );

    let Rule::At(media) = &stylesheet.rules[0] else {
        unreachable!()
    };
    assert!(!media.just_semicolon());
    assert_eq!(
        media.nested_rule().map(|r| r.selectors[0].name.as_str()),
        Some("body")
    );
}

#[test]
fn test_font_face_holds_declarations() {
    let stylesheet =
        parse_stylesheet("@font-face { font-family: Foo; src: url(foo.woff2) format(\"woff2\"); }")
            .unwrap();
    let Rule::At(at) = &stylesheet.rules[0] else {
        panic!("expected an at-rule")
    };
    assert_eq!(at.prelude, "");
    let block = at.block().expect("declaration block");
    assert_eq!(block.declarations.len(), 2);
    assert_eq!(block.declarations.declarations[1].property, "src");
}

#[test]
fn test_missing_colon() {
    let err = parse_stylesheet("a { color }").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedToken {
            expected: "':'".to_string(),
            found: "'}'".to_string(),
        }
    );
    assert!(err.to_string().contains("expected ':'"));
}

#[test]
fn test_empty_value() {
    let err = parse_stylesheet("a { color: ; }").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::EmptyDeclaration { .. }));
    assert!(err
        .to_string()
        .contains("expected components, none found"));
}

#[test]
fn test_unbalanced_selector_brackets() {
    let err = parse_stylesheet("a[href) { x: y; }").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnbalancedBrackets {
            expected: ']',
            found: ')',
        }
    );
}

#[test]
fn test_end_of_input_inside_block_is_error() {
    for source in ["a { color: red", "a { color: red;", "@media print { a { x: y; }", "a, b"] {
        let err = parse_stylesheet(source).unwrap_err();
        assert!(
            matches!(err.kind, ParseErrorKind::UnexpectedEof { .. }),
            "{:?} gave {:?}",
            source,
            err
        );
    }
}

#[test]
fn test_lexical_error_surfaces() {
    let err = parse_stylesheet("a { color: \"unterminated }").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Lexical { .. }));
}

#[test]
fn test_strict_and_lenient_top_level() {
    let source = "} a { x: y; }";
    assert!(parse_stylesheet(source).is_err());

    let options = ParserOptions::default().with_strict(false);
    let stylesheet = parse_stylesheet_with(source, options).unwrap();
    assert_eq!(stylesheet.rules.len(), 1);
}

#[test]
fn test_full_prelude_option() {
    let source = "@media screen and (min-width: 900px) { a { x: y; } }";
    assert!(parse_stylesheet(source).is_err());

    let options = ParserOptions::default().with_full_prelude(true);
    let stylesheet = parse_stylesheet_with(source, options).unwrap();
    let Rule::At(at) = &stylesheet.rules[0] else {
        panic!("expected an at-rule")
    };
    assert_eq!(at.prelude, "screen and (min-width: 900px)");
    assert_eq!(at.nested_rules().len(), 1);
}

#[test]
fn test_nesting_limit() {
    let source = "a:is(:is(:is(b))) { x: y; }";
    let options = ParserOptions::default().with_max_nesting_depth(2);
    let err = parse_stylesheet_with(source, options).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep { limit: 2 });
    assert!(parse_stylesheet(source).is_ok());
}

#[test]
fn test_deterministic() {
    let source = "@import url(a.css); h1, h2 > em { margin: 0 auto; } @media print { p { x: y; } }";
    assert_eq!(parse_stylesheet(source), parse_stylesheet(source));
}

#[test]
fn test_print_then_reparse() {
    let source = "@charset \"UTF-8\";
        table   tbody, .x:hover { border: 1px red solid; color: red !important; }
        @media print { body { font-size: 12pt; } }
        @font-face { font-family: \"Foo\"; }";
    let stylesheet = parse_stylesheet(source).unwrap();
    let printed = print_stylesheet(&stylesheet);
    assert_eq!(parse_stylesheet(&printed).unwrap(), stylesheet);
}

#[test]
fn test_scanner_end_is_idempotent() {
    let mut scanner = Scanner::new("a");
    assert_eq!(scanner.next().kind, TokenKind::Identifier);
    let end = scanner.next();
    assert_eq!(end.kind, TokenKind::EndOfInput);
    for _ in 0..5 {
        assert_eq!(scanner.next(), end);
    }
}

#[test]
fn test_parser_from_scanner() {
    let mut parser = Parser::new(Scanner::new("a { b: c; }"));
    let stylesheet = parser.parse().unwrap();
    assert_eq!(stylesheet.rules.len(), 1);
    // a finished parser keeps reporting an empty remainder
    assert_eq!(parser.parse().unwrap(), Stylesheet::new());
}
