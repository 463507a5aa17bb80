//! Selector tokenizer.
//!
//! Splits selector text into [`Token`]s. The tokenizer is dialect-agnostic:
//! it knows nothing about which pseudo-classes exist and never fails on an
//! unknown name.

/// The lazy lexer and the `tokenize` convenience wrapper.
pub mod lexer;
/// Token and token kind definitions.
pub mod token;

pub use lexer::{Lexer, tokenize};
pub use token::{Token, TokenKind};
