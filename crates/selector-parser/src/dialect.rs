//! Dialect compiler.
//!
//! A [`Dialect`] is the frozen result of merging every enabled module with the
//! explicit `syntax` definitions of a [`DialectConfig`]. It is built once per
//! configuration, never changes afterwards, and is shared read-only by every
//! parse that uses it.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::ast::{AttributeOperator, CombinatorKind};
use crate::config::{
    AttributeSyntax, CombinatorSyntax, DialectConfig, PseudoDefinitions, UnknownPolicy,
};
use crate::error::ConfigError;
use crate::modules::{ArgumentGrammar, Category, ModuleRegistry, PseudoSignature};

/// Source name used in conflict errors for the explicit `definitions` tables.
const SYNTAX_SOURCE: &str = "syntax";

/// The compiled set of legal pseudo names plus the syntax switches.
///
/// Pseudo names are stored and looked up in ASCII lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialect {
    pseudo_classes: BTreeMap<String, PseudoSignature>,
    pseudo_elements: BTreeMap<String, PseudoSignature>,
    pseudo_class_policy: UnknownPolicy,
    pseudo_element_policy: UnknownPolicy,
    attributes: AttributeSyntax,
    combinators: CombinatorSyntax,
}

impl Dialect {
    /// Signature of a known pseudo name in the given category.
    #[must_use]
    pub fn pseudo(&self, category: Category, name: &str) -> Option<PseudoSignature> {
        self.table(category).get(&name.to_ascii_lowercase()).copied()
    }

    /// Signature of a known pseudo-class.
    #[must_use]
    pub fn pseudo_class(&self, name: &str) -> Option<PseudoSignature> {
        self.pseudo(Category::PseudoClass, name)
    }

    /// Signature of a known pseudo-element.
    #[must_use]
    pub fn pseudo_element(&self, name: &str) -> Option<PseudoSignature> {
        self.pseudo(Category::PseudoElement, name)
    }

    /// Every known name of a category with its signature, sorted by name.
    pub fn known(&self, category: Category) -> impl Iterator<Item = (&str, PseudoSignature)> {
        self.table(category)
            .iter()
            .map(|(name, signature)| (name.as_str(), *signature))
    }

    /// Every known pseudo-class name, sorted.
    pub fn known_pseudo_classes(&self) -> impl Iterator<Item = &str> {
        self.pseudo_classes.keys().map(String::as_str)
    }

    /// Every known pseudo-element name, sorted.
    pub fn known_pseudo_elements(&self) -> impl Iterator<Item = &str> {
        self.pseudo_elements.keys().map(String::as_str)
    }

    /// Policy for unknown names of a category.
    #[must_use]
    pub const fn policy(&self, category: Category) -> UnknownPolicy {
        match category {
            Category::PseudoClass => self.pseudo_class_policy,
            Category::PseudoElement => self.pseudo_element_policy,
        }
    }

    /// Whether an attribute operator is recognized without consulting the policy.
    #[must_use]
    pub fn allows_attribute_operator(&self, operator: AttributeOperator) -> bool {
        self.attributes.operators.contains(&operator)
    }

    /// Whether a case sensitivity modifier is recognized without consulting
    /// the policy. Modifiers compare ASCII case-insensitively.
    #[must_use]
    pub fn allows_case_sensitivity_modifier(&self, modifier: &str) -> bool {
        self.attributes
            .case_sensitivity_modifiers
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(modifier))
    }

    /// Policy for unrecognized attribute operators and modifiers.
    #[must_use]
    pub const fn attribute_policy(&self) -> UnknownPolicy {
        self.attributes.unknown
    }

    /// Whether a combinator is recognized without consulting the policy.
    #[must_use]
    pub fn allows_combinator(&self, kind: CombinatorKind) -> bool {
        self.combinators.allowed.contains(&kind)
    }

    /// Policy for disallowed combinators.
    #[must_use]
    pub const fn combinator_policy(&self) -> UnknownPolicy {
        self.combinators.unknown
    }

    const fn table(&self, category: Category) -> &BTreeMap<String, PseudoSignature> {
        match category {
            Category::PseudoClass => &self.pseudo_classes,
            Category::PseudoElement => &self.pseudo_elements,
        }
    }
}

/// Compile a configuration against the built-in module registry.
///
/// # Errors
///
/// See [`compile_with_registry`].
pub fn compile(config: &DialectConfig) -> Result<Dialect, ConfigError> {
    compile_with_registry(config, ModuleRegistry::builtin())
}

/// Compile a configuration against a caller-supplied registry.
///
/// Modules are merged by union; the order of `config.modules` does not
/// affect the result.
///
/// # Errors
///
/// - [`ConfigError::UnknownModule`] for a module name missing from `registry`.
/// - [`ConfigError::ConflictingGrammar`] when two sources give one name
///   different signatures.
/// - [`ConfigError::AmbiguousDefinition`] when a `definitions` table lists
///   two argument grammars for one name.
/// - [`ConfigError::CategoryCollision`] when a name ends up both a
///   pseudo-class and a pseudo-element.
pub fn compile_with_registry(
    config: &DialectConfig,
    registry: &ModuleRegistry,
) -> Result<Dialect, ConfigError> {
    let mut tables = Tables::default();

    for name in &config.modules {
        let module = registry.resolve(name)?;
        for category in [Category::PseudoClass, Category::PseudoElement] {
            for def in module.grants(category) {
                tables.grant(category, def.name, def.signature, module.name)?;
            }
        }
    }

    let syntax = &config.syntax;
    for (category, definitions) in [
        (Category::PseudoClass, &syntax.pseudo_classes.definitions),
        (Category::PseudoElement, &syntax.pseudo_elements.definitions),
    ] {
        for (name, signature) in definition_signatures(category, definitions)? {
            tables.grant(category, &name, signature, SYNTAX_SOURCE)?;
        }
    }

    tables.check_categories()?;

    Ok(Dialect {
        pseudo_classes: strip_sources(tables.pseudo_classes),
        pseudo_elements: strip_sources(tables.pseudo_elements),
        pseudo_class_policy: syntax.pseudo_classes.unknown,
        pseudo_element_policy: syntax.pseudo_elements.unknown,
        attributes: syntax.attributes.clone(),
        combinators: syntax.combinators.clone(),
    })
}

/// Signatures tagged with the source that first granted them.
type SourcedTable = BTreeMap<String, (PseudoSignature, &'static str)>;

#[derive(Default)]
struct Tables {
    pseudo_classes: SourcedTable,
    pseudo_elements: SourcedTable,
}

impl Tables {
    fn grant(
        &mut self,
        category: Category,
        name: &str,
        signature: PseudoSignature,
        source: &'static str,
    ) -> Result<(), ConfigError> {
        let table = match category {
            Category::PseudoClass => &mut self.pseudo_classes,
            Category::PseudoElement => &mut self.pseudo_elements,
        };
        match table.entry(name.to_ascii_lowercase()) {
            Entry::Vacant(entry) => {
                let _ = entry.insert((signature, source));
            }
            Entry::Occupied(entry) => {
                let (existing, first) = *entry.get();
                if existing != signature {
                    return Err(ConfigError::ConflictingGrammar {
                        category,
                        name: entry.key().clone(),
                        first: first.to_string(),
                        second: source.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_categories(&self) -> Result<(), ConfigError> {
        match self
            .pseudo_classes
            .keys()
            .find(|name| self.pseudo_elements.contains_key(*name))
        {
            Some(name) => Err(ConfigError::CategoryCollision { name: name.clone() }),
            None => Ok(()),
        }
    }
}

fn strip_sources(table: SourcedTable) -> BTreeMap<String, PseudoSignature> {
    table
        .into_iter()
        .map(|(name, (signature, _))| (name, signature))
        .collect()
}

/// Group a `definitions` table by name and turn each group into a signature.
fn definition_signatures(
    category: Category,
    definitions: &PseudoDefinitions,
) -> Result<Vec<(String, PseudoSignature)>, ConfigError> {
    let mut grouped: BTreeMap<String, Vec<ArgumentGrammar>> = BTreeMap::new();
    for (grammar, name) in definitions.entries() {
        grouped
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(grammar);
    }

    grouped
        .into_iter()
        .map(|(name, grammars)| match PseudoSignature::from_grammars(&grammars) {
            Ok(signature) => Ok((name, signature)),
            Err((first, second)) => Err(ConfigError::AmbiguousDefinition {
                category,
                name,
                first: first.to_string(),
                second: second.to_string(),
            }),
        })
        .collect()
}
