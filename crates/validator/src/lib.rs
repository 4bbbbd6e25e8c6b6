//! # manifest-validator
//!
//! A declarative validation engine for structured configuration objects.
//!
//! Rules are declared once per type and reused: a [`Validator`] holds
//! property rules, each extracting a value from the validated object and
//! running rules against it. Failures are collected into a tree of errors
//! carrying JSON-path-like property names, the offending value and
//! machine-readable codes.
//!
//! ## Quick Start
//!
//! ```rust
//! use manifest_validator::prelude::*;
//!
//! struct Teacher {
//!     name: String,
//!     students: Vec<String>,
//! }
//!
//! let v = validator![
//!     for_property(|t: &Teacher| t.name.clone())
//!         .with_name("name")
//!         .required()
//!         .rules(string_is_dns_subdomain()),
//!     for_slice(|t: &Teacher| t.students.clone())
//!         .with_name("students")
//!         .rules(slice_max_length(2))
//!         .rules_for_each(string_length(1, 10)),
//! ]
//! .with_name("Teacher");
//!
//! let err = v
//!     .validate(&Teacher {
//!         name: "jake".into(),
//!         students: vec!["Mark".into(), String::new()],
//!     })
//!     .unwrap_err();
//! assert_eq!(err.errors[0].property_name, "students[1]");
//! ```
//!
//! ## Declaring Rules
//!
//! - [`for_property`], [`for_option`] and [`transform`] declare rules for a
//!   single property
//! - [`for_slice`] and [`for_map`] add per-element rules for collections
//! - [`Validator`]s nest through [`PropertyRules::include`]
//!
//! ## Built-in Rules
//!
//! The [`validators`] module provides comparison, length, string format,
//! membership and uniqueness rules, each with its own error code from
//! [`foundation::codes`].
//!
//! ## Introspection
//!
//! [`plan()`] lists every declared rule per property path without running
//! any of them.

// PropertyError is the fundamental error type returned by every property
// check; boxing it would add an allocation to every failing validation.
#![allow(clippy::result_large_err)]
#![allow(clippy::type_complexity)]

pub mod combinators;
pub mod foundation;
mod macros;
pub mod plan;
pub mod prelude;
pub mod validator;
pub mod validators;

pub use combinators::{
    CascadeMode, MapItem, MapLike, Predicate, PropertyRules, PropertyRulesForMap,
    PropertyRulesForSlice, RuleSet, SingleRule, for_map, for_option, for_property, for_slice,
    get_self, map_element_name, new_rule_set, new_single_rule, slice_element_name, transform,
};
pub use foundation::{
    HasErrorCode, PropertyError, PropertyErrors, PropertyValidator, PropertyValue, Rule,
    RuleError, RuleFailure, RuleSetError, ValidatorError, codes, has_error_code,
};
pub use plan::{PropertyPlan, RulePlan, plan};
pub use validator::Validator;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
