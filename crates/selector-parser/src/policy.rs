//! Validation policy.
//!
//! Decides what happens to a construct the dialect does not recognize. The
//! parser asks once per construct and acts on the [`Outcome`]; the policy
//! itself never builds nodes or errors.

use crate::config::UnknownPolicy;
use crate::dialect::Dialect;
use crate::modules::{Category, PseudoSignature};

/// How the parser should treat one construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The dialect knows the name; validate the argument against the signature.
    Known(PseudoSignature),
    /// Fail the parse with an unknown-feature error.
    Rejected,
    /// Build the node without validating it.
    AcceptedLoosely,
    /// Build the node without validating it and record a warning.
    AcceptedWithWarning,
}

/// Resolve a pseudo name in the given category.
#[must_use]
pub fn resolve(name: &str, category: Category, dialect: &Dialect) -> Outcome {
    dialect
        .pseudo(category, name)
        .map_or_else(|| unrecognized(dialect.policy(category)), Outcome::Known)
}

/// The outcome for a construct that is not recognized under `policy`.
#[must_use]
pub const fn unrecognized(policy: UnknownPolicy) -> Outcome {
    match policy {
        UnknownPolicy::Reject => Outcome::Rejected,
        UnknownPolicy::Accept => Outcome::AcceptedLoosely,
        UnknownPolicy::Warn => Outcome::AcceptedWithWarning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DialectConfig;
    use crate::dialect::compile;

    #[test]
    fn test_known_name_ignores_policy() {
        let config = DialectConfig::new()
            .with_module("css-position-3")
            .with_pseudo_class_policy(UnknownPolicy::Reject);
        let dialect = compile(&config).unwrap();
        assert_eq!(
            resolve("sticky", Category::PseudoClass, &dialect),
            Outcome::Known(PseudoSignature::NO_ARGUMENT)
        );
        assert_eq!(
            resolve("sticky", Category::PseudoElement, &dialect),
            Outcome::AcceptedLoosely
        );
    }

    #[test]
    fn test_unknown_name_follows_policy() {
        let dialect = compile(&DialectConfig::new().with_pseudo_element_policy(UnknownPolicy::Warn))
            .unwrap();
        assert_eq!(
            resolve("slotted", Category::PseudoElement, &dialect),
            Outcome::AcceptedWithWarning
        );
        assert_eq!(unrecognized(UnknownPolicy::Reject), Outcome::Rejected);
    }
}
