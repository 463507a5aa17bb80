//! Integration tests for the module registry and the dialect compiler.

use selector_parser::ast::{AttributeOperator, CombinatorKind};
use selector_parser::modules::{Category, PseudoSignature};
use selector_parser::{
    ArgumentGrammar, ConfigError, Dialect, DialectConfig, ModuleRegistry, UnknownPolicy, compile,
    create_parser,
};

fn dialect(modules: &[&str]) -> Dialect {
    compile(&DialectConfig::new().with_modules(modules.iter().copied())).unwrap()
}

#[test]
fn test_empty_config_knows_nothing() {
    let dialect = dialect(&[]);
    assert_eq!(dialect.known_pseudo_classes().count(), 0);
    assert_eq!(dialect.known_pseudo_elements().count(), 0);
    assert_eq!(dialect.policy(Category::PseudoClass), UnknownPolicy::Accept);
    assert_eq!(dialect.policy(Category::PseudoElement), UnknownPolicy::Accept);
}

#[test]
fn test_single_module_grants_exactly_its_names() {
    let registry = ModuleRegistry::builtin();
    for name in registry.module_names() {
        let module = registry.resolve(name).unwrap();
        let dialect = dialect(&[name]);
        for category in [Category::PseudoClass, Category::PseudoElement] {
            let mut expected: Vec<(&str, PseudoSignature)> = module
                .grants(category)
                .iter()
                .map(|def| (def.name, def.signature))
                .collect();
            expected.sort_by_key(|(name, _)| *name);
            let actual: Vec<_> = dialect.known(category).collect();
            assert_eq!(actual, expected, "module {name}, {category}");
        }
    }
}

#[test]
fn test_module_order_does_not_matter() {
    assert_eq!(
        dialect(&["css-position-3", "css-scoping-1", "css-pseudo-4"]),
        dialect(&["css-pseudo-4", "css-scoping-1", "css-position-3"])
    );
    assert_eq!(
        dialect(&["css-position-2", "css-position-4"]),
        dialect(&["css-position-4", "css-position-2"])
    );
}

#[test]
fn test_enabling_more_modules_never_removes_names() {
    let smaller = dialect(&["css-position-3"]);
    let larger = dialect(&["css-position-3", "css-scoping-1", "css-shadow-parts-1"]);
    for category in [Category::PseudoClass, Category::PseudoElement] {
        for (name, signature) in smaller.known(category) {
            assert_eq!(larger.pseudo(category, name), Some(signature));
        }
    }
}

#[test]
fn test_overlapping_levels_union() {
    let dialect = dialect(&["css-position-1", "css-position-3"]);
    let names: Vec<_> = dialect.known_pseudo_classes().collect();
    assert_eq!(names, vec!["absolute", "fixed", "relative", "static", "sticky"]);
}

#[test]
fn test_scoping_signatures() {
    let dialect = dialect(&["css-scoping-1"]);
    assert_eq!(
        dialect.pseudo_class("host"),
        Some(PseudoSignature::optional(ArgumentGrammar::Selector))
    );
    assert_eq!(
        dialect.pseudo_class("host-context"),
        Some(PseudoSignature::required(ArgumentGrammar::Selector))
    );
    assert_eq!(
        dialect.pseudo_element("slotted"),
        Some(PseudoSignature::required(ArgumentGrammar::Selector))
    );
    assert_eq!(dialect.pseudo_class("slotted"), None);
}

#[test]
fn test_unknown_module_fails_eagerly() {
    let error = create_parser(&DialectConfig::new().with_module("css-position-9")).unwrap_err();
    assert!(matches!(error, ConfigError::UnknownModule(ref name) if name == "css-position-9"));
    assert_eq!(error.to_string(), "Unknown module: \"css-position-9\".");
}

#[test]
fn test_selectors_levels_conflict() {
    let error = compile(&DialectConfig::new().with_modules(["selectors-3", "selectors-4"]))
        .unwrap_err();
    assert!(matches!(
        error,
        ConfigError::ConflictingGrammar { category: Category::PseudoClass, ref name, .. }
            if name == "nth-child"
    ));
}

#[test]
fn test_definition_extends_module() {
    let config = DialectConfig::new()
        .with_module("css-position-3")
        .define_pseudo_class("toggle", ArgumentGrammar::NoArgument)
        .define_pseudo_element("cue", ArgumentGrammar::NoArgument)
        .define_pseudo_element("cue", ArgumentGrammar::Selector);
    let dialect = compile(&config).unwrap();
    assert_eq!(dialect.pseudo_class("toggle"), Some(PseudoSignature::NO_ARGUMENT));
    assert_eq!(dialect.pseudo_class("sticky"), Some(PseudoSignature::NO_ARGUMENT));
    assert_eq!(
        dialect.pseudo_element("cue"),
        Some(PseudoSignature::optional(ArgumentGrammar::Selector))
    );
}

#[test]
fn test_definition_agreeing_with_module_is_a_union() {
    let config = DialectConfig::new()
        .with_module("css-position-3")
        .define_pseudo_class("sticky", ArgumentGrammar::NoArgument);
    assert_eq!(compile(&config).unwrap(), dialect(&["css-position-3"]));
}

#[test]
fn test_definition_conflicting_with_module() {
    let config = DialectConfig::new()
        .with_module("css-scoping-1")
        .define_pseudo_class("host", ArgumentGrammar::Identifier);
    let error = compile(&config).unwrap_err();
    assert!(matches!(
        error,
        ConfigError::ConflictingGrammar { ref first, ref second, .. }
            if first == "css-scoping-1" && second == "syntax"
    ));
}

#[test]
fn test_definition_with_two_argument_grammars() {
    let config = DialectConfig::new()
        .define_pseudo_class("odd-one", ArgumentGrammar::String)
        .define_pseudo_class("odd-one", ArgumentGrammar::Number);
    assert!(matches!(
        compile(&config).unwrap_err(),
        ConfigError::AmbiguousDefinition { .. }
    ));
}

#[test]
fn test_category_collision_between_module_and_definition() {
    let config = DialectConfig::new()
        .with_module("css-scoping-1")
        .define_pseudo_element("host", ArgumentGrammar::NoArgument);
    assert!(matches!(
        compile(&config).unwrap_err(),
        ConfigError::CategoryCollision { ref name } if name == "host"
    ));
}

#[test]
fn test_config_from_json() {
    let config = DialectConfig::from_json(
        r#"{
            "modules": ["css-position-3", "css-scoping-1"],
            "syntax": {
                "pseudoClasses": { "unknown": "reject" },
                "pseudoElements": {
                    "unknown": "warn",
                    "definitions": { "NoArgument": ["cue"], "Selector": ["cue"] }
                },
                "attributes": { "operators": ["=", "~="], "unknown": "reject" },
                "combinators": { "allowed": ["descendant", "child"] }
            }
        }"#,
    )
    .unwrap();

    let expected = DialectConfig::new()
        .with_modules(["css-position-3", "css-scoping-1"])
        .with_pseudo_class_policy(UnknownPolicy::Reject)
        .with_pseudo_element_policy(UnknownPolicy::Warn)
        .define_pseudo_element("cue", ArgumentGrammar::NoArgument)
        .define_pseudo_element("cue", ArgumentGrammar::Selector)
        .with_attribute_operators([AttributeOperator::Equals, AttributeOperator::Includes])
        .with_attribute_policy(UnknownPolicy::Reject)
        .with_combinators([CombinatorKind::Descendant, CombinatorKind::Child]);
    assert_eq!(config, expected);
}

#[test]
fn test_config_from_json_defaults() {
    let config = DialectConfig::from_json("{}").unwrap();
    assert_eq!(config, DialectConfig::new());
}

#[test]
fn test_config_from_json_rejects_bad_policy() {
    let error = DialectConfig::from_json(r#"{"syntax": {"pseudoClasses": {"unknown": "strict"}}}"#)
        .unwrap_err();
    assert!(matches!(error, ConfigError::InvalidJson(_)));
}

#[test]
fn test_config_from_json_rejects_unknown_grammar() {
    let error =
        DialectConfig::from_json(r#"{"syntax": {"pseudoClasses": {"definitions": {"Color": ["x"]}}}}"#)
            .unwrap_err();
    assert!(matches!(error, ConfigError::InvalidJson(_)));
}
