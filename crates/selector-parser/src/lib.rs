//! Dialect-aware CSS selector parser.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector Tokenizer** ([CSS Syntax § 4](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Identifiers, strings, numbers, hashes, and selector punctuation
//!   - Comment handling
//!   - Escape sequences
//!
//! - **Module Registry**
//!   - Named bundles of pseudo-classes and pseudo-elements, one per
//!     specification level (`css-position-3`, `css-scoping-1`, `selectors-4`, ...)
//!
//! - **Dialect Compiler**
//!   - Union of the enabled modules plus explicit `syntax` definitions
//!   - Configuration errors for conflicting grammars, detected eagerly
//!
//! - **Selector Parser** ([Selectors Level 4 § 18](https://www.w3.org/TR/selectors-4/#grammar))
//!   - Type, universal, class, ID, and attribute selectors
//!   - Pseudo-classes and pseudo-elements with selector, `an+b`, `an+b of S`,
//!     string, identifier, and number arguments
//!   - Descendant, child, next-sibling, and subsequent-sibling combinators
//!   - `reject` / `accept` / `warn` policies for unrecognized constructs
//!
//! # Not Implemented
//!
//! - Namespace prefixes (`svg|rect`)
//! - The nesting selector (`&`)
//! - Legacy single-colon pseudo-elements (`:before`)
//! - Serializing a tree back to selector text
//!
//! # Example
//!
//! ```
//! use selector_parser::{DialectConfig, UnknownPolicy, ast, create_parser};
//!
//! let parser = create_parser(
//!     &DialectConfig::new()
//!         .with_module("css-position-3")
//!         .with_pseudo_class_policy(UnknownPolicy::Reject),
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     parser.parse(":sticky").unwrap(),
//!     ast::selector([ast::rule([ast::pseudo_class("sticky")])])
//! );
//! assert_eq!(
//!     parser.parse(":host").unwrap_err().to_string(),
//!     "Unknown pseudo-class: \"host\"."
//! );
//! ```

use std::sync::Arc;

/// Selector syntax tree and constructors.
pub mod ast;
/// Parser configuration.
pub mod config;
/// Dialect compiler.
pub mod dialect;
/// Error types.
pub mod error;
/// Module registry.
pub mod modules;
/// Recursive-descent parser.
pub mod parser;
/// Validation policy for unrecognized constructs.
pub mod policy;
/// Selector tokenizer per [CSS Syntax § 4](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;

// Re-exports for convenience
pub use ast::{Argument, Item, Rule, Selector};
pub use config::{DialectConfig, UnknownPolicy};
pub use dialect::{Dialect, compile};
pub use error::{ConfigError, LexError, ParseError, UnknownFeatureError};
pub use modules::{ArgumentGrammar, ModuleRegistry};
pub use parser::ParseOutput;
pub use tokenizer::tokenize;

/// A reusable parser bound to one compiled [`Dialect`].
///
/// Cloning is cheap and clones share the dialect, so one parser can be
/// handed to several threads.
#[derive(Debug, Clone)]
pub struct SelectorParser {
    dialect: Arc<Dialect>,
}

impl SelectorParser {
    /// Wrap an already compiled dialect.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect: Arc::new(dialect),
        }
    }

    /// Parse selector text.
    ///
    /// Warnings produced under the `warn` policy are dropped. Use
    /// [`Self::parse_with_warnings`] to collect them, and
    /// [`ParseOutput::report`] to print them.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for lexical errors, syntax errors, and
    /// constructs rejected by the dialect.
    pub fn parse(&self, text: &str) -> Result<Selector, ParseError> {
        parser::parse(text, &self.dialect)
    }

    /// Parse selector text and return the warnings alongside the tree.
    ///
    /// # Errors
    ///
    /// Same as [`Self::parse`].
    pub fn parse_with_warnings(&self, text: &str) -> Result<ParseOutput, ParseError> {
        parser::parse_with_warnings(text, &self.dialect)
    }

    /// The compiled dialect this parser validates against.
    #[must_use]
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }
}

/// Compile `config` against the built-in modules and return a parser for it.
///
/// Every configuration problem is reported here, never at parse time.
///
/// # Errors
///
/// Returns a [`ConfigError`] for unknown modules and conflicting definitions.
pub fn create_parser(config: &DialectConfig) -> Result<SelectorParser, ConfigError> {
    Ok(SelectorParser::new(compile(config)?))
}
