//! Parser configuration.
//!
//! The configuration names the modules to enable and carries the explicit
//! syntax switches. It can be written in code with the builder methods on
//! [`DialectConfig`] or loaded from JSON:
//!
//! ```json
//! {
//!   "modules": ["css-position-3", "css-scoping-1"],
//!   "syntax": {
//!     "pseudoClasses": { "unknown": "reject" },
//!     "pseudoElements": {
//!       "unknown": "warn",
//!       "definitions": { "NoArgument": ["cue"], "Selector": ["cue"] }
//!     }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumString};

use crate::ast::{AttributeOperator, CombinatorKind};
use crate::error::ConfigError;
use crate::modules::ArgumentGrammar;

/// What to do with a construct the dialect does not recognize.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UnknownPolicy {
    /// Fail the parse with an unknown-feature error.
    Reject,
    /// Build the node without validating it.
    #[default]
    Accept,
    /// Build the node without validating it and record a warning.
    Warn,
}

/// Explicit pseudo name definitions, keyed by argument grammar.
///
/// Listing a name under `NoArgument` and one argument grammar makes the
/// argument optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "PascalCase")]
pub struct PseudoDefinitions {
    /// Names used without an argument.
    pub no_argument: Vec<String>,
    /// Names taking a nested selector list.
    pub selector: Vec<String>,
    /// Names taking an `an+b` formula.
    pub formula: Vec<String>,
    /// Names taking an `an+b` formula with an optional `of <selector>`.
    pub formula_of_selector: Vec<String>,
    /// Names taking a quoted string.
    pub string: Vec<String>,
    /// Names taking an identifier.
    pub identifier: Vec<String>,
    /// Names taking a number.
    pub number: Vec<String>,
}

impl PseudoDefinitions {
    /// The list for one grammar.
    #[must_use]
    pub fn names(&self, grammar: ArgumentGrammar) -> &[String] {
        match grammar {
            ArgumentGrammar::NoArgument => &self.no_argument,
            ArgumentGrammar::Selector => &self.selector,
            ArgumentGrammar::Formula => &self.formula,
            ArgumentGrammar::FormulaOfSelector => &self.formula_of_selector,
            ArgumentGrammar::String => &self.string,
            ArgumentGrammar::Identifier => &self.identifier,
            ArgumentGrammar::Number => &self.number,
        }
    }

    /// Add a name to the list for one grammar.
    pub fn add(&mut self, grammar: ArgumentGrammar, name: impl Into<String>) {
        let list = match grammar {
            ArgumentGrammar::NoArgument => &mut self.no_argument,
            ArgumentGrammar::Selector => &mut self.selector,
            ArgumentGrammar::Formula => &mut self.formula,
            ArgumentGrammar::FormulaOfSelector => &mut self.formula_of_selector,
            ArgumentGrammar::String => &mut self.string,
            ArgumentGrammar::Identifier => &mut self.identifier,
            ArgumentGrammar::Number => &mut self.number,
        };
        list.push(name.into());
    }

    /// Every `(grammar, name)` pair, grammar by grammar.
    pub fn entries(&self) -> impl Iterator<Item = (ArgumentGrammar, &str)> {
        ArgumentGrammar::iter().flat_map(move |grammar| {
            self.names(grammar)
                .iter()
                .map(move |name| (grammar, name.as_str()))
        })
    }
}

/// Switches for pseudo-classes or pseudo-elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PseudoSyntax {
    /// Policy for names no module or definition grants.
    pub unknown: UnknownPolicy,
    /// Names granted in addition to the enabled modules.
    pub definitions: PseudoDefinitions,
}

/// Switches for attribute selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AttributeSyntax {
    /// Matchers recognized without consulting the policy.
    pub operators: Vec<AttributeOperator>,
    /// Case sensitivity modifiers recognized without consulting the policy.
    pub case_sensitivity_modifiers: Vec<String>,
    /// Policy for operators and modifiers outside the lists above.
    pub unknown: UnknownPolicy,
}

impl Default for AttributeSyntax {
    fn default() -> Self {
        Self {
            operators: AttributeOperator::iter().collect(),
            case_sensitivity_modifiers: vec!["i".to_string(), "s".to_string()],
            unknown: UnknownPolicy::default(),
        }
    }
}

/// Switches for combinators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CombinatorSyntax {
    /// Combinators recognized without consulting the policy.
    pub allowed: Vec<CombinatorKind>,
    /// Policy for combinators outside the list above.
    pub unknown: UnknownPolicy,
}

impl Default for CombinatorSyntax {
    fn default() -> Self {
        Self {
            allowed: CombinatorKind::iter().collect(),
            unknown: UnknownPolicy::default(),
        }
    }
}

/// The `syntax` section of a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SyntaxConfig {
    /// Pseudo-class switches.
    pub pseudo_classes: PseudoSyntax,
    /// Pseudo-element switches.
    pub pseudo_elements: PseudoSyntax,
    /// Attribute selector switches.
    pub attributes: AttributeSyntax,
    /// Combinator switches.
    pub combinators: CombinatorSyntax,
}

/// Everything needed to compile a [`Dialect`](crate::dialect::Dialect).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectConfig {
    /// Registered module names to enable. Order does not matter.
    pub modules: Vec<String>,
    /// Explicit syntax switches and overrides.
    pub syntax: SyntaxConfig,
}

impl DialectConfig {
    /// A configuration with no modules and default (lenient) switches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidJson`] if the text is not valid JSON or
    /// does not have the configuration shape.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable one module.
    #[must_use]
    pub fn with_module(mut self, name: impl Into<String>) -> Self {
        self.modules.push(name.into());
        self
    }

    /// Enable several modules.
    #[must_use]
    pub fn with_modules<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the policy for unknown pseudo-classes.
    #[must_use]
    pub fn with_pseudo_class_policy(mut self, policy: UnknownPolicy) -> Self {
        self.syntax.pseudo_classes.unknown = policy;
        self
    }

    /// Set the policy for unknown pseudo-elements.
    #[must_use]
    pub fn with_pseudo_element_policy(mut self, policy: UnknownPolicy) -> Self {
        self.syntax.pseudo_elements.unknown = policy;
        self
    }

    /// Set the policy for unknown attribute operators and modifiers.
    #[must_use]
    pub fn with_attribute_policy(mut self, policy: UnknownPolicy) -> Self {
        self.syntax.attributes.unknown = policy;
        self
    }

    /// Set the policy for disallowed combinators.
    #[must_use]
    pub fn with_combinator_policy(mut self, policy: UnknownPolicy) -> Self {
        self.syntax.combinators.unknown = policy;
        self
    }

    /// Restrict the recognized attribute operators.
    #[must_use]
    pub fn with_attribute_operators(
        mut self,
        operators: impl IntoIterator<Item = AttributeOperator>,
    ) -> Self {
        self.syntax.attributes.operators = operators.into_iter().collect();
        self
    }

    /// Restrict the recognized combinators.
    #[must_use]
    pub fn with_combinators(mut self, allowed: impl IntoIterator<Item = CombinatorKind>) -> Self {
        self.syntax.combinators.allowed = allowed.into_iter().collect();
        self
    }

    /// Grant a pseudo-class with the given argument grammar.
    ///
    /// Call twice with [`ArgumentGrammar::NoArgument`] and an argument grammar
    /// to make the argument optional.
    #[must_use]
    pub fn define_pseudo_class(mut self, name: impl Into<String>, grammar: ArgumentGrammar) -> Self {
        self.syntax.pseudo_classes.definitions.add(grammar, name);
        self
    }

    /// Grant a pseudo-element with the given argument grammar.
    #[must_use]
    pub fn define_pseudo_element(
        mut self,
        name: impl Into<String>,
        grammar: ArgumentGrammar,
    ) -> Self {
        self.syntax.pseudo_elements.definitions.add(grammar, name);
        self
    }
}
