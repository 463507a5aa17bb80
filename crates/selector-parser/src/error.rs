//! Error types for configuration, lexing, and parsing.
//!
//! Configuration problems surface from [`compile`](crate::dialect::compile) and
//! [`create_parser`](crate::create_parser) and are never deferred to parse
//! time. Lexing and parsing problems surface from
//! [`SelectorParser::parse`](crate::SelectorParser::parse).

use thiserror::Error;

use crate::modules::Category;

/// Errors raised while compiling a dialect from its configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A module name that is not present in the registry.
    #[error("Unknown module: \"{0}\".")]
    UnknownModule(String),

    /// Two sources define the same name with different argument grammars.
    #[error("Conflicting argument grammar for {category} \"{name}\": \"{first}\" and \"{second}\" disagree.")]
    ConflictingGrammar {
        /// Whether the name is a pseudo-class or a pseudo-element.
        category: Category,
        /// The pseudo-class or pseudo-element name.
        name: String,
        /// The source (module name or `syntax` override) seen first.
        first: String,
        /// The source that disagrees with it.
        second: String,
    },

    /// A name is defined both as a pseudo-class and as a pseudo-element.
    #[error("\"{name}\" is defined both as a pseudo-class and as a pseudo-element.")]
    CategoryCollision {
        /// The colliding name.
        name: String,
    },

    /// A single definition lists two argument-bearing grammars for one name.
    #[error("{category} \"{name}\" cannot take both a {first} and a {second} argument.")]
    AmbiguousDefinition {
        /// Whether the name is a pseudo-class or a pseudo-element.
        category: Category,
        /// The pseudo-class or pseudo-element name.
        name: String,
        /// The first argument grammar.
        first: String,
        /// The second argument grammar.
        second: String,
    },

    /// The JSON configuration could not be deserialized.
    #[error("Invalid configuration: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors raised while splitting selector text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A quoted string without its closing quote on the same line.
    #[error("Unterminated string starting at offset {position}.")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },

    /// A character that cannot appear in a selector.
    #[error("Unexpected character \"{character}\" at offset {position}.")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        position: usize,
    },
}

impl LexError {
    /// Byte offset where the problem starts.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnterminatedString { position } | Self::InvalidCharacter { position, .. } => {
                *position
            }
        }
    }
}

/// A construct rejected by the dialect's validation policy.
///
/// The display strings are part of the public contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownFeatureError {
    /// An unknown pseudo-class under the `reject` policy.
    #[error("Unknown pseudo-class: \"{0}\".")]
    PseudoClass(String),

    /// An unknown pseudo-element under the `reject` policy.
    #[error("Unknown pseudo-element \"{0}\".")]
    PseudoElement(String),

    /// An attribute operator outside the allowed list under the `reject` policy.
    #[error("Unknown attribute operator: \"{0}\".")]
    AttributeOperator(String),

    /// A case sensitivity modifier outside the allowed list under the `reject` policy.
    #[error("Unknown attribute case sensitivity modifier: \"{0}\".")]
    CaseSensitivityModifier(String),

    /// A combinator outside the allowed list under the `reject` policy.
    #[error("Unknown combinator: \"{0}\".")]
    Combinator(String),
}

/// Errors raised while parsing selector text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The token stream does not match the selector grammar.
    #[error("{message} (at offset {position})")]
    Syntax {
        /// What went wrong.
        message: String,
        /// Byte offset of the offending token.
        position: usize,
    },

    /// The dialect rejected an unrecognized construct.
    #[error(transparent)]
    UnknownFeature(#[from] UnknownFeatureError),
}

impl ParseError {
    /// Create a syntax error at the given byte offset.
    #[must_use]
    pub fn syntax(message: impl Into<String>, position: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }
}
