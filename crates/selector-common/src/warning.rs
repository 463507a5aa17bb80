//! Parser warnings with colored terminal output.
//!
//! A [`Warning`] is a plain record produced while parsing (for example when an
//! unknown pseudo-class is accepted under the `warn` policy). Presentation is
//! left to the caller: records can be collected and inspected, or handed to
//! [`warn_once`], which prints each distinct message a single time.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;
use serde::Serialize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// A non-fatal diagnostic emitted while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Human-readable message, e.g. `Unknown pseudo-class: "sticky".`
    pub message: String,
    /// Byte offset in the parsed input where the offending construct starts.
    pub position: usize,
}

impl Warning {
    /// Create a new warning record.
    #[must_use]
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    /// Print this warning through [`warn_once`].
    ///
    /// Returns `true` if the message had not been reported before.
    #[must_use]
    pub fn report(&self, component: &str) -> bool {
        warn_once(component, &self.to_string())
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at offset {})", self.message, self.position)
    }
}

/// Warn about an unsupported construct (prints once per unique message).
///
/// Returns `true` if the message was printed, `false` if it was a duplicate.
///
/// # Example
/// ```ignore
/// warn_once("Selectors", "Unknown pseudo-class: \"sticky\".");
/// ```
#[must_use]
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[{component}] ⚠ {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call between independent parsing sessions).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
