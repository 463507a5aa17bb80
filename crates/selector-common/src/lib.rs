//! Common utilities for the selector parser workspace.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Warning System** - warning records plus colored, deduplicated terminal output

/// Warning records and once-per-message reporting.
pub mod warning;
