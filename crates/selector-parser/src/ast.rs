//! Selector syntax tree.
//!
//! Nodes are plain owned values with structural equality. The constructor
//! functions at the bottom of this module build the same values the parser
//! produces, so tests and embedders can write expected trees directly:
//!
//! ```
//! use selector_parser::ast::{self, Argument};
//!
//! let expected = ast::selector([ast::rule([ast::pseudo_class_with(
//!     "host",
//!     Argument::Selector(ast::selector([ast::rule([ast::class_name("special")])])),
//! )])]);
//! assert_eq!(expected.rules.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// A selector list: comma-separated alternatives in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selector {
    /// The alternatives.
    pub rules: Vec<Rule>,
}

/// One complex selector: compounds joined by combinators.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rule {
    /// Simple selectors and combinators in source order.
    pub items: Vec<Item>,
}

/// One element of a [`Rule`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Item {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Examples: `div`, `span`, `h1`
    TagName {
        /// Element name as written.
        name: String,
    },
    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#the-universal-selector)
    /// "The universal selector is a special type selector, that represents an
    /// element of any element type. It is written as a CSS qualified name
    /// with an asterisk (* U+002A) as the local name."
    ///
    /// Example: `*`
    Universal,
    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.foo`, `.nav-item`
    ClassName {
        /// Class name without the dot.
        name: String,
    },
    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector consists of a 'number sign' (U+0023, #) immediately
    /// followed by the ID value, which must be a CSS identifier."
    ///
    /// Examples: `#bar`, `#main`
    IdName {
        /// ID without the hash.
        name: String,
    },
    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    /// "Selectors allow the representation of an element's attributes."
    ///
    /// Examples: `[href]`, `[lang|=en]`, `[type="text" i]`
    Attribute(AttributeSelector),
    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    /// "The pseudo-class concept is introduced to permit selection based on
    /// information that lies outside of the document tree or that can be
    /// awkward or impossible to express using the other simple selectors."
    ///
    /// Examples: `:hover`, `:host(.special)`, `:nth-child(2n+1 of .item)`
    PseudoClass {
        /// Name as written, without the colon.
        name: String,
        /// The parenthesized argument, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        argument: Option<Argument>,
    },
    /// [§ 3.6 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    /// "Pseudo-elements represent abstract elements of the document beyond
    /// those elements explicitly created by the document language."
    ///
    /// Examples: `::before`, `::slotted(span)`, `::part(label)`
    PseudoElement {
        /// Name as written, without the colons.
        name: String,
        /// The parenthesized argument, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        argument: Option<Argument>,
    },
    /// [§ 3.1 Combinators](https://www.w3.org/TR/selectors-4/#combinator)
    /// "A combinator is a condition of relationship between two elements
    /// represented by the compound selectors on either side."
    ///
    /// Examples: `a b`, `ul > li`, `h1 + p`, `h1 ~ p`
    Combinator {
        /// Which relationship the combinator expresses.
        kind: CombinatorKind,
    },
}

/// `[name]`, `[name op value]` or `[name op value modifier]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSelector {
    /// Attribute name.
    pub name: String,
    /// The matcher, or `None` for a presence test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<AttributeOperator>,
    /// The value to match; present exactly when `operator` is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// The case sensitivity modifier (`i`, `s`, ...), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitivity: Option<String>,
}

impl AttributeSelector {
    /// Attach a case sensitivity modifier.
    #[must_use]
    pub fn with_case_sensitivity(mut self, modifier: impl Into<String>) -> Self {
        self.case_sensitivity = Some(modifier.into());
        self
    }
}

/// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum AttributeOperator {
    /// `[att=val]`
    #[strum(serialize = "=")]
    #[serde(rename = "=")]
    Equals,
    /// `[att~=val]`: whitespace-separated list contains `val`.
    #[strum(serialize = "~=")]
    #[serde(rename = "~=")]
    Includes,
    /// `[att|=val]`: equals `val` or starts with `val-`.
    #[strum(serialize = "|=")]
    #[serde(rename = "|=")]
    DashMatch,
    /// `[att^=val]`
    #[strum(serialize = "^=")]
    #[serde(rename = "^=")]
    Prefix,
    /// `[att$=val]`
    #[strum(serialize = "$=")]
    #[serde(rename = "$=")]
    Suffix,
    /// `[att*=val]`
    #[strum(serialize = "*=")]
    #[serde(rename = "*=")]
    Substring,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// `Display` renders the combinator's symbol; the descendant combinator is a
/// single space.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CombinatorKind {
    /// [§ 16.1](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A descendant combinator is whitespace that separates two compound
    /// selectors."
    #[strum(serialize = " ")]
    Descendant,
    /// [§ 16.2](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A child combinator is a 'greater-than sign' (U+003E, >) code point."
    #[strum(serialize = ">")]
    Child,
    /// [§ 16.3](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// "The next-sibling combinator is made of the 'plus sign' (U+002B, +)
    /// code point that separates two compound selectors."
    #[strum(serialize = "+")]
    NextSibling,
    /// [§ 16.4](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// "The subsequent-sibling combinator is made of the 'tilde' (U+007E, ~)
    /// code point that separates two compound selectors."
    #[strum(serialize = "~")]
    SubsequentSibling,
}

/// The parenthesized argument of a pseudo-class or pseudo-element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Argument {
    /// A nested selector list.
    Selector(Selector),
    /// A quoted string, or the source text of a loosely accepted argument
    /// exactly as written.
    String(String),
    /// A number literal.
    Number(f64),
    /// An identifier.
    Identifier(String),
    /// [§ 14.1 `an+b`](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
    /// "The `:nth-child(An+B)` pseudo-class notation represents elements
    /// that are among An+Bth siblings."
    ///
    /// `odd` is `{ a: 2, b: 1 }` and `even` is `{ a: 2, b: 0 }`.
    Formula {
        /// The step.
        a: i32,
        /// The offset.
        b: i32,
    },
    /// [§ 14.4](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
    /// "The `:nth-child(An+B [of S]? )` pseudo-class notation represents
    /// elements that are among An+Bth elements from the list composed of
    /// their inclusive siblings that match the selector list S."
    ///
    /// `selector` is `None` when the `of` clause is omitted.
    FormulaOfSelector {
        /// The step.
        a: i32,
        /// The offset.
        b: i32,
        /// The filter selector list.
        #[serde(skip_serializing_if = "Option::is_none")]
        selector: Option<Selector>,
    },
}

/// Build a selector list.
#[must_use]
pub fn selector(rules: impl IntoIterator<Item = Rule>) -> Selector {
    Selector {
        rules: rules.into_iter().collect(),
    }
}

/// Build a rule.
#[must_use]
pub fn rule(items: impl IntoIterator<Item = Item>) -> Rule {
    Rule {
        items: items.into_iter().collect(),
    }
}

/// Build a type selector.
///
/// # Panics
///
/// Panics if `name` is empty.
#[must_use]
pub fn tag_name(name: impl Into<String>) -> Item {
    Item::TagName {
        name: non_empty(name, "tag name"),
    }
}

/// Build the universal selector.
#[must_use]
pub const fn universal() -> Item {
    Item::Universal
}

/// Build a class selector.
///
/// # Panics
///
/// Panics if `name` is empty.
#[must_use]
pub fn class_name(name: impl Into<String>) -> Item {
    Item::ClassName {
        name: non_empty(name, "class name"),
    }
}

/// Build an ID selector.
///
/// # Panics
///
/// Panics if `name` is empty.
#[must_use]
pub fn id_name(name: impl Into<String>) -> Item {
    Item::IdName {
        name: non_empty(name, "id"),
    }
}

/// Build an attribute presence selector, `[name]`.
///
/// # Panics
///
/// Panics if `name` is empty.
#[must_use]
pub fn attribute(name: impl Into<String>) -> Item {
    Item::Attribute(AttributeSelector {
        name: non_empty(name, "attribute name"),
        operator: None,
        value: None,
        case_sensitivity: None,
    })
}

/// Build an attribute value selector, `[name op value]`.
///
/// Use [`AttributeSelector::with_case_sensitivity`] with [`Item::Attribute`]
/// to add a modifier.
///
/// # Panics
///
/// Panics if `name` is empty.
#[must_use]
pub fn attribute_with(
    name: impl Into<String>,
    operator: AttributeOperator,
    value: impl Into<String>,
) -> Item {
    Item::Attribute(AttributeSelector {
        name: non_empty(name, "attribute name"),
        operator: Some(operator),
        value: Some(value.into()),
        case_sensitivity: None,
    })
}

/// Build a pseudo-class without an argument.
///
/// # Panics
///
/// Panics if `name` is empty.
#[must_use]
pub fn pseudo_class(name: impl Into<String>) -> Item {
    Item::PseudoClass {
        name: non_empty(name, "pseudo-class name"),
        argument: None,
    }
}

/// Build a pseudo-class with an argument.
///
/// # Panics
///
/// Panics if `name` is empty.
#[must_use]
pub fn pseudo_class_with(name: impl Into<String>, argument: Argument) -> Item {
    Item::PseudoClass {
        name: non_empty(name, "pseudo-class name"),
        argument: Some(argument),
    }
}

/// Build a pseudo-element without an argument.
///
/// # Panics
///
/// Panics if `name` is empty.
#[must_use]
pub fn pseudo_element(name: impl Into<String>) -> Item {
    Item::PseudoElement {
        name: non_empty(name, "pseudo-element name"),
        argument: None,
    }
}

/// Build a pseudo-element with an argument.
///
/// # Panics
///
/// Panics if `name` is empty.
#[must_use]
pub fn pseudo_element_with(name: impl Into<String>, argument: Argument) -> Item {
    Item::PseudoElement {
        name: non_empty(name, "pseudo-element name"),
        argument: Some(argument),
    }
}

/// Build a combinator.
#[must_use]
pub const fn combinator(kind: CombinatorKind) -> Item {
    Item::Combinator { kind }
}

fn non_empty(name: impl Into<String>, what: &str) -> String {
    let name = name.into();
    assert!(!name.is_empty(), "{what} must not be empty");
    name
}
