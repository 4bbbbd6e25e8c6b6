//! Built-in rules
//!
//! Ready-to-use [`SingleRule`](crate::SingleRule)s and
//! [`RuleSet`](crate::RuleSet)s for common manifest checks. Every rule
//! carries a code from [`codes`](crate::foundation::codes) so callers can
//! match failures programmatically.
//!
//! # Categories
//!
//! - **Comparison**: equality and ordering against a fixed value
//! - **Length**: bounds on string, slice and map length
//! - **String**: emptiness, patterns and well-known formats (UUID, URL, JSON)
//! - **Membership**: allowed values and mutually exclusive properties
//! - **Uniqueness**: duplicate detection across slice elements
//!
//! # Examples
//!
//! ```rust
//! use manifest_validator::prelude::*;
//!
//! let name = new_rule_set::<String>()
//!     .with_rule(string_length(1, 20))
//!     .with_rule(string_ascii());
//!
//! assert!(name.validate(&"my-service".to_owned()).is_ok());
//! assert!(name.validate(&String::new()).is_err());
//! ```

use std::fmt::Display;

pub mod comparable;
pub mod forbidden;
pub mod length;
pub mod one_of;
pub mod string;
pub mod unique;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use comparable::{
    equal_to, greater_than, greater_than_or_equal_to, less_than, less_than_or_equal_to,
    not_equal_to,
};
pub use forbidden::forbidden;
pub use length::{
    map_length, map_max_length, map_min_length, slice_length, slice_max_length, slice_min_length,
    string_length, string_max_length, string_min_length,
};
pub use one_of::{MutuallyExclusive, mutually_exclusive, one_of};
pub use string::{
    string_ascii, string_contains, string_deny_regexp, string_description,
    string_is_dns_subdomain, string_json, string_match_regexp, string_not_empty,
    string_starts_with, string_url, string_uuid,
};
pub use unique::{self_hash, slice_unique};

// ============================================================================
// MESSAGE HELPERS
// ============================================================================

/// Renders values as `'a', 'b'`.
pub(crate) fn quoted_list<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders values as `a, b`.
pub(crate) fn plain_list<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
