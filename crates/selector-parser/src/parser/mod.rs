//! Selector parser module.

/// `an+b` microsyntax.
mod formula;
/// Recursive-descent parser per [Selectors Level 4 § 18](https://www.w3.org/TR/selectors-4/#grammar).
pub mod grammar;

pub use grammar::{ParseOutput, parse, parse_with_warnings};
