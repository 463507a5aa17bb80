//! Integration tests for module-gated pseudo-classes and pseudo-elements.

use selector_parser::ast::{self, Argument};
use selector_parser::{DialectConfig, SelectorParser, UnknownPolicy, create_parser};

fn parser(modules: &[&str]) -> SelectorParser {
    create_parser(&DialectConfig::new().with_modules(modules.iter().copied())).unwrap()
}

fn strict_parser(modules: &[&str]) -> SelectorParser {
    create_parser(
        &DialectConfig::new()
            .with_modules(modules.iter().copied())
            .with_pseudo_class_policy(UnknownPolicy::Reject)
            .with_pseudo_element_policy(UnknownPolicy::Reject),
    )
    .unwrap()
}

fn single(item: ast::Item) -> ast::Selector {
    ast::selector([ast::rule([item])])
}

fn rejection(parser: &SelectorParser, text: &str) -> String {
    parser.parse(text).unwrap_err().to_string()
}

#[test]
fn test_position_1_pseudo_classes() {
    let parse = parser(&["css-position-1"]);
    for name in ["static", "relative", "absolute"] {
        assert_eq!(
            parse.parse(&format!(":{name}")).unwrap(),
            single(ast::pseudo_class(name))
        );
    }

    let strict = strict_parser(&["css-position-1"]);
    assert_eq!(rejection(&strict, ":fixed"), "Unknown pseudo-class: \"fixed\".");
}

#[test]
fn test_position_2_adds_fixed() {
    let parse = parser(&["css-position-2"]);
    assert_eq!(parse.parse(":fixed").unwrap(), single(ast::pseudo_class("fixed")));

    let strict = strict_parser(&["css-position-2"]);
    assert_eq!(rejection(&strict, ":sticky"), "Unknown pseudo-class: \"sticky\".");
}

#[test]
fn test_position_3_pseudo_classes() {
    let parse = parser(&["css-position-3"]);
    for name in ["sticky", "fixed", "absolute"] {
        assert_eq!(
            parse.parse(&format!(":{name}")).unwrap(),
            single(ast::pseudo_class(name))
        );
    }
}

#[test]
fn test_position_pseudo_classes_rejected_without_module() {
    let strict = strict_parser(&[]);
    assert_eq!(rejection(&strict, ":sticky"), "Unknown pseudo-class: \"sticky\".");
    assert_eq!(rejection(&strict, ":fixed"), "Unknown pseudo-class: \"fixed\".");
    assert_eq!(rejection(&strict, ":absolute"), "Unknown pseudo-class: \"absolute\".");
}

#[test]
fn test_position_4_adds_initial() {
    let parse = parser(&["css-position-4"]);
    assert_eq!(parse.parse(":initial").unwrap(), single(ast::pseudo_class("initial")));

    let strict = strict_parser(&["css-position-3"]);
    assert_eq!(rejection(&strict, ":initial"), "Unknown pseudo-class: \"initial\".");
}

#[test]
fn test_scoping_host_and_host_context() {
    let parse = parser(&["css-scoping-1"]);

    assert_eq!(parse.parse(":host").unwrap(), single(ast::pseudo_class("host")));

    assert_eq!(
        parse.parse(":host(.special)").unwrap(),
        single(ast::pseudo_class_with(
            "host",
            Argument::Selector(single(ast::class_name("special")))
        ))
    );

    assert_eq!(
        parse.parse(":host-context(body.dark-theme)").unwrap(),
        single(ast::pseudo_class_with(
            "host-context",
            Argument::Selector(ast::selector([ast::rule([
                ast::tag_name("body"),
                ast::class_name("dark-theme"),
            ])]))
        ))
    );
}

#[test]
fn test_scoping_slotted() {
    let parse = parser(&["css-scoping-1"]);
    assert_eq!(
        parse.parse("::slotted(span)").unwrap(),
        single(ast::pseudo_element_with(
            "slotted",
            Argument::Selector(single(ast::tag_name("span")))
        ))
    );
}

#[test]
fn test_scoping_rejected_without_module() {
    let strict = strict_parser(&[]);
    assert_eq!(rejection(&strict, ":host"), "Unknown pseudo-class: \"host\".");
    assert_eq!(
        rejection(&strict, ":host-context(body)"),
        "Unknown pseudo-class: \"host-context\"."
    );
    assert_eq!(
        rejection(&strict, "::slotted(span)"),
        "Unknown pseudo-element \"slotted\"."
    );
}

#[test]
fn test_host_context_requires_argument() {
    let parse = parser(&["css-scoping-1"]);
    assert!(parse.parse(":host-context").is_err());
    assert!(parse.parse("::slotted").is_err());
}

#[test]
fn test_multiple_modules() {
    let parse = parser(&["css-position-3", "css-scoping-1"]);

    assert_eq!(parse.parse(":sticky").unwrap(), single(ast::pseudo_class("sticky")));
    assert_eq!(parse.parse(":host").unwrap(), single(ast::pseudo_class("host")));
    assert_eq!(
        parse.parse("::slotted(span)").unwrap(),
        single(ast::pseudo_element_with(
            "slotted",
            Argument::Selector(single(ast::tag_name("span")))
        ))
    );
}

#[test]
fn test_shadow_parts_identifier_argument() {
    let parse = parser(&["css-shadow-parts-1"]);
    assert_eq!(
        parse.parse("::part(label)").unwrap(),
        single(ast::pseudo_element_with(
            "part",
            Argument::Identifier("label".to_string())
        ))
    );
    assert!(parse.parse("::part(.label)").is_err());
}

#[test]
fn test_selectors_4_nth_child_of_selector() {
    let parse = parser(&["selectors-4"]);
    assert_eq!(
        parse.parse("li:nth-child(2n+1 of .item)").unwrap(),
        ast::selector([ast::rule([
            ast::tag_name("li"),
            ast::pseudo_class_with(
                "nth-child",
                Argument::FormulaOfSelector {
                    a: 2,
                    b: 1,
                    selector: Some(single(ast::class_name("item"))),
                }
            ),
        ])])
    );
}

#[test]
fn test_selectors_3_nth_child_formula_only() {
    let parse = parser(&["selectors-3"]);
    assert_eq!(
        parse.parse(":nth-child(odd)").unwrap(),
        single(ast::pseudo_class_with(
            "nth-child",
            Argument::Formula { a: 2, b: 1 }
        ))
    );
    assert!(parse.parse(":nth-child(2n of .item)").is_err());
}
