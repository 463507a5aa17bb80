//! Module registry.
//!
//! A module is a named, static bundle of pseudo-class and pseudo-element
//! grants, corresponding to a CSS specification level or module (e.g.
//! [CSS Positioned Layout Level 3](https://www.w3.org/TR/css-position-3/) or
//! [CSS Scoping Level 1](https://www.w3.org/TR/css-scoping-1/)). Modules are
//! additive: enabling more of them never removes a capability granted by
//! another.

#![allow(unused_qualifications)] // lint fires inside strum's EnumIter derive expansion

use std::collections::BTreeMap;
use std::sync::LazyLock;

use strum_macros::{Display, EnumIter};

use crate::error::ConfigError;

/// Which namespace a pseudo name lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Category {
    /// `:name`
    PseudoClass,
    /// `::name`
    PseudoElement,
}

/// The sub-grammar a pseudo-class or pseudo-element argument must follow.
///
/// The variant names double as the keys of the `definitions` tables in the
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum ArgumentGrammar {
    /// No parenthesized argument, e.g. `:hover`.
    NoArgument,
    /// A nested selector list, e.g. `:not(.a, .b)`.
    Selector,
    /// An `an+b` expression, e.g. `:nth-of-type(2n+1)`.
    Formula,
    /// An `an+b` expression optionally followed by `of <selector>`,
    /// e.g. `:nth-child(2n of .item)`.
    FormulaOfSelector,
    /// A single quoted string.
    String,
    /// A single identifier, e.g. `:dir(rtl)`.
    Identifier,
    /// A single number.
    Number,
}

/// The set of argument grammars accepted by one pseudo name.
///
/// A signature holds at most one argument-bearing grammar. When `bare` is set
/// the name may also appear without parentheses, which makes the argument
/// optional (`:host` and `:host(.dark)` are both valid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PseudoSignature {
    bare: bool,
    argument: Option<ArgumentGrammar>,
}

impl PseudoSignature {
    /// A name that never takes an argument.
    pub const NO_ARGUMENT: Self = Self {
        bare: true,
        argument: None,
    };

    /// A name that must be followed by an argument of the given grammar.
    #[must_use]
    pub const fn required(grammar: ArgumentGrammar) -> Self {
        Self {
            bare: false,
            argument: Some(grammar),
        }
    }

    /// A name that may appear bare or with an argument of the given grammar.
    #[must_use]
    pub const fn optional(grammar: ArgumentGrammar) -> Self {
        Self {
            bare: true,
            argument: Some(grammar),
        }
    }

    /// Build a signature from a list of grammars, as written in a
    /// `definitions` table. An empty list means [`Self::NO_ARGUMENT`].
    ///
    /// # Errors
    ///
    /// Returns the two offending grammars when more than one argument-bearing
    /// grammar is listed.
    pub fn from_grammars(
        grammars: &[ArgumentGrammar],
    ) -> Result<Self, (ArgumentGrammar, ArgumentGrammar)> {
        let mut signature = Self {
            bare: false,
            argument: None,
        };
        for &grammar in grammars {
            match (grammar, signature.argument) {
                (ArgumentGrammar::NoArgument, _) => signature.bare = true,
                (_, None) => signature.argument = Some(grammar),
                (_, Some(existing)) if existing == grammar => {}
                (_, Some(existing)) => return Err((existing, grammar)),
            }
        }
        if signature.argument.is_none() {
            signature.bare = true;
        }
        Ok(signature)
    }

    /// Whether the name may appear without parentheses.
    #[must_use]
    pub const fn accepts_no_argument(&self) -> bool {
        self.bare
    }

    /// The grammar of the parenthesized argument, if one is accepted.
    #[must_use]
    pub const fn argument(&self) -> Option<ArgumentGrammar> {
        self.argument
    }

    /// The grammars of this signature, in `definitions` table form.
    #[must_use]
    pub fn grammars(&self) -> Vec<ArgumentGrammar> {
        let mut grammars = Vec::with_capacity(2);
        if self.bare {
            grammars.push(ArgumentGrammar::NoArgument);
        }
        grammars.extend(self.argument);
        grammars
    }
}

/// One pseudo-class or pseudo-element granted by a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoDef {
    /// The name without leading colons.
    pub name: &'static str,
    /// Which arguments the name accepts.
    pub signature: PseudoSignature,
}

impl PseudoDef {
    /// A name without an argument.
    #[must_use]
    pub const fn no_argument(name: &'static str) -> Self {
        Self {
            name,
            signature: PseudoSignature::NO_ARGUMENT,
        }
    }

    /// A name with a required argument.
    #[must_use]
    pub const fn required(name: &'static str, grammar: ArgumentGrammar) -> Self {
        Self {
            name,
            signature: PseudoSignature::required(grammar),
        }
    }

    /// A name with an optional argument.
    #[must_use]
    pub const fn optional(name: &'static str, grammar: ArgumentGrammar) -> Self {
        Self {
            name,
            signature: PseudoSignature::optional(grammar),
        }
    }
}

/// A named bundle of grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    /// Registry key, e.g. `css-scoping-1`.
    pub name: &'static str,
    /// Pseudo-classes introduced by the module.
    pub pseudo_classes: &'static [PseudoDef],
    /// Pseudo-elements introduced by the module.
    pub pseudo_elements: &'static [PseudoDef],
}

impl Module {
    /// The grants of the given category.
    #[must_use]
    pub const fn grants(&self, category: Category) -> &'static [PseudoDef] {
        match category {
            Category::PseudoClass => self.pseudo_classes,
            Category::PseudoElement => self.pseudo_elements,
        }
    }
}

/// Lookup table from module name to [`Module`].
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<&'static str, Module>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of every module shipped with this crate.
    ///
    /// Built on first access and shared for the lifetime of the process.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: LazyLock<ModuleRegistry> = LazyLock::new(|| {
            let mut registry = ModuleRegistry::new();
            for module in BUILTIN_MODULES {
                let _ = registry.register(*module);
            }
            registry
        });
        &BUILTIN
    }

    /// Add a module, returning the entry it replaced (if any).
    pub fn register(&mut self, module: Module) -> Option<Module> {
        self.modules.insert(module.name, module)
    }

    /// Look up a module by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownModule`] when no module has this name.
    pub fn resolve(&self, name: &str) -> Result<&Module, ConfigError> {
        self.modules
            .get(name)
            .ok_or_else(|| ConfigError::UnknownModule(name.to_string()))
    }

    /// Names of all registered modules, in sorted order.
    pub fn module_names(&self) -> impl Iterator<Item = &'static str> {
        self.modules.keys().copied()
    }
}

use ArgumentGrammar::{Formula, FormulaOfSelector, Identifier, Selector};

/// [CSS 2.1 § 9.3.1](https://www.w3.org/TR/CSS21/visuren.html#choose-position)
const CSS_POSITION_1: &[PseudoDef] = &[
    PseudoDef::no_argument("static"),
    PseudoDef::no_argument("relative"),
    PseudoDef::no_argument("absolute"),
];

const CSS_POSITION_2: &[PseudoDef] = &[
    PseudoDef::no_argument("static"),
    PseudoDef::no_argument("relative"),
    PseudoDef::no_argument("absolute"),
    PseudoDef::no_argument("fixed"),
];

/// [CSS Positioned Layout Level 3 § 2](https://www.w3.org/TR/css-position-3/#position-property)
/// "Sticky positioning is similar to relative positioning except the offsets
/// are automatically adjusted in reference to the nearest ancestor scroll
/// container's scrollport."
const CSS_POSITION_3: &[PseudoDef] = &[
    PseudoDef::no_argument("static"),
    PseudoDef::no_argument("relative"),
    PseudoDef::no_argument("absolute"),
    PseudoDef::no_argument("fixed"),
    PseudoDef::no_argument("sticky"),
];

const CSS_POSITION_4: &[PseudoDef] = &[
    PseudoDef::no_argument("static"),
    PseudoDef::no_argument("relative"),
    PseudoDef::no_argument("absolute"),
    PseudoDef::no_argument("fixed"),
    PseudoDef::no_argument("sticky"),
    PseudoDef::no_argument("initial"),
];

/// [CSS Scoping Level 1 § 3.2](https://www.w3.org/TR/css-scoping-1/#host-selector)
/// "The :host pseudo-class, when evaluated in the context of a shadow tree,
/// matches the shadow tree's shadow host."
///
/// `:host-context()` "matches the shadow host only if the shadow host or any
/// of its shadow-including ancestors matches the compound selector argument."
const CSS_SCOPING_1_CLASSES: &[PseudoDef] = &[
    PseudoDef::optional("host", Selector),
    PseudoDef::required("host-context", Selector),
];

/// [CSS Scoping Level 1 § 3.2.2](https://www.w3.org/TR/css-scoping-1/#slotted-pseudo)
/// "The ::slotted() pseudo-element represents the elements assigned, after
/// flattening, to a slot."
const CSS_SCOPING_1_ELEMENTS: &[PseudoDef] = &[PseudoDef::required("slotted", Selector)];

/// [CSS Shadow Parts § 4.1](https://www.w3.org/TR/css-shadow-parts-1/#part)
/// "The ::part() pseudo-element allows you to select elements that have been
/// exposed via a part attribute."
const CSS_SHADOW_PARTS_1_ELEMENTS: &[PseudoDef] = &[PseudoDef::required("part", Identifier)];

/// [CSS Pseudo-Elements Level 4](https://www.w3.org/TR/css-pseudo-4/)
const CSS_PSEUDO_4_ELEMENTS: &[PseudoDef] = &[
    PseudoDef::no_argument("first-line"),
    PseudoDef::no_argument("first-letter"),
    PseudoDef::no_argument("before"),
    PseudoDef::no_argument("after"),
    PseudoDef::no_argument("marker"),
    PseudoDef::no_argument("placeholder"),
    PseudoDef::no_argument("selection"),
    PseudoDef::no_argument("target-text"),
    PseudoDef::no_argument("spelling-error"),
    PseudoDef::no_argument("grammar-error"),
    PseudoDef::no_argument("backdrop"),
    PseudoDef::no_argument("file-selector-button"),
    PseudoDef::required("highlight", Identifier),
];

/// Pseudo-elements shared by both Selectors levels.
const SELECTORS_ELEMENTS: &[PseudoDef] = &[
    PseudoDef::no_argument("first-line"),
    PseudoDef::no_argument("first-letter"),
    PseudoDef::no_argument("before"),
    PseudoDef::no_argument("after"),
];

/// [Selectors Level 3 § 6.6](https://www.w3.org/TR/selectors-3/#pseudo-classes)
const SELECTORS_3_CLASSES: &[PseudoDef] = &[
    PseudoDef::no_argument("link"),
    PseudoDef::no_argument("visited"),
    PseudoDef::no_argument("hover"),
    PseudoDef::no_argument("active"),
    PseudoDef::no_argument("focus"),
    PseudoDef::no_argument("target"),
    PseudoDef::required("lang", Identifier),
    PseudoDef::no_argument("enabled"),
    PseudoDef::no_argument("disabled"),
    PseudoDef::no_argument("checked"),
    PseudoDef::no_argument("root"),
    PseudoDef::required("nth-child", Formula),
    PseudoDef::required("nth-last-child", Formula),
    PseudoDef::required("nth-of-type", Formula),
    PseudoDef::required("nth-last-of-type", Formula),
    PseudoDef::no_argument("first-child"),
    PseudoDef::no_argument("last-child"),
    PseudoDef::no_argument("first-of-type"),
    PseudoDef::no_argument("last-of-type"),
    PseudoDef::no_argument("only-child"),
    PseudoDef::no_argument("only-of-type"),
    PseudoDef::no_argument("empty"),
    PseudoDef::required("not", Selector),
];

/// [Selectors Level 4 § 3.5](https://www.w3.org/TR/selectors-4/#pseudo-classes)
///
/// `:nth-child()` and `:nth-last-child()` accept the `of S` form here, so this
/// level cannot be combined with `selectors-3`.
const SELECTORS_4_CLASSES: &[PseudoDef] = &[
    PseudoDef::no_argument("link"),
    PseudoDef::no_argument("visited"),
    PseudoDef::no_argument("any-link"),
    PseudoDef::no_argument("local-link"),
    PseudoDef::no_argument("hover"),
    PseudoDef::no_argument("active"),
    PseudoDef::no_argument("focus"),
    PseudoDef::no_argument("focus-visible"),
    PseudoDef::no_argument("focus-within"),
    PseudoDef::no_argument("target"),
    PseudoDef::no_argument("target-within"),
    PseudoDef::no_argument("scope"),
    PseudoDef::optional("current", Selector),
    PseudoDef::no_argument("past"),
    PseudoDef::no_argument("future"),
    PseudoDef::no_argument("playing"),
    PseudoDef::no_argument("paused"),
    PseudoDef::required("lang", Identifier),
    PseudoDef::required("dir", Identifier),
    PseudoDef::no_argument("enabled"),
    PseudoDef::no_argument("disabled"),
    PseudoDef::no_argument("read-only"),
    PseudoDef::no_argument("read-write"),
    PseudoDef::no_argument("placeholder-shown"),
    PseudoDef::no_argument("default"),
    PseudoDef::no_argument("checked"),
    PseudoDef::no_argument("indeterminate"),
    PseudoDef::no_argument("blank"),
    PseudoDef::no_argument("valid"),
    PseudoDef::no_argument("invalid"),
    PseudoDef::no_argument("in-range"),
    PseudoDef::no_argument("out-of-range"),
    PseudoDef::no_argument("required"),
    PseudoDef::no_argument("optional"),
    PseudoDef::no_argument("user-invalid"),
    PseudoDef::no_argument("root"),
    PseudoDef::no_argument("empty"),
    PseudoDef::required("nth-child", FormulaOfSelector),
    PseudoDef::required("nth-last-child", FormulaOfSelector),
    PseudoDef::required("nth-of-type", Formula),
    PseudoDef::required("nth-last-of-type", Formula),
    PseudoDef::no_argument("first-child"),
    PseudoDef::no_argument("last-child"),
    PseudoDef::no_argument("first-of-type"),
    PseudoDef::no_argument("last-of-type"),
    PseudoDef::no_argument("only-child"),
    PseudoDef::no_argument("only-of-type"),
    PseudoDef::required("not", Selector),
    PseudoDef::required("is", Selector),
    PseudoDef::required("where", Selector),
    PseudoDef::required("has", Selector),
];

/// Every module shipped with the crate.
const BUILTIN_MODULES: &[Module] = &[
    Module {
        name: "css-position-1",
        pseudo_classes: CSS_POSITION_1,
        pseudo_elements: &[],
    },
    Module {
        name: "css-position-2",
        pseudo_classes: CSS_POSITION_2,
        pseudo_elements: &[],
    },
    Module {
        name: "css-position-3",
        pseudo_classes: CSS_POSITION_3,
        pseudo_elements: &[],
    },
    Module {
        name: "css-position-4",
        pseudo_classes: CSS_POSITION_4,
        pseudo_elements: &[],
    },
    Module {
        name: "css-scoping-1",
        pseudo_classes: CSS_SCOPING_1_CLASSES,
        pseudo_elements: CSS_SCOPING_1_ELEMENTS,
    },
    Module {
        name: "css-shadow-parts-1",
        pseudo_classes: &[],
        pseudo_elements: CSS_SHADOW_PARTS_1_ELEMENTS,
    },
    Module {
        name: "css-pseudo-4",
        pseudo_classes: &[],
        pseudo_elements: CSS_PSEUDO_4_ELEMENTS,
    },
    Module {
        name: "selectors-3",
        pseudo_classes: SELECTORS_3_CLASSES,
        pseudo_elements: SELECTORS_ELEMENTS,
    },
    Module {
        name: "selectors-4",
        pseudo_classes: SELECTORS_4_CLASSES,
        pseudo_elements: SELECTORS_ELEMENTS,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_from_grammars() {
        use ArgumentGrammar::{NoArgument, String};

        assert_eq!(
            PseudoSignature::from_grammars(&[]),
            Ok(PseudoSignature::NO_ARGUMENT)
        );
        assert_eq!(
            PseudoSignature::from_grammars(&[NoArgument, Selector]),
            Ok(PseudoSignature::optional(Selector))
        );
        assert_eq!(
            PseudoSignature::from_grammars(&[Formula]),
            Ok(PseudoSignature::required(Formula))
        );
        assert_eq!(
            PseudoSignature::from_grammars(&[Selector, String]),
            Err((Selector, String))
        );
    }

    #[test]
    fn test_signature_grammars_round_trip() {
        let signature = PseudoSignature::optional(Selector);
        assert_eq!(
            PseudoSignature::from_grammars(&signature.grammars()),
            Ok(signature)
        );
    }

    #[test]
    fn test_builtin_module_names_are_unique() {
        let registry = ModuleRegistry::builtin();
        assert_eq!(registry.module_names().count(), BUILTIN_MODULES.len());
    }

    #[test]
    fn test_builtin_modules_have_no_duplicate_grants() {
        for module in BUILTIN_MODULES {
            for category in [Category::PseudoClass, Category::PseudoElement] {
                let grants = module.grants(category);
                for (index, def) in grants.iter().enumerate() {
                    assert!(
                        grants[index + 1..].iter().all(|other| other.name != def.name),
                        "{} lists {} twice",
                        module.name,
                        def.name
                    );
                }
            }
        }
    }
}
