//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation system:
//!
//! - **Traits**: [`Rule`], [`PropertyValidator`], [`PropertyValue`]
//! - **Errors**: [`RuleError`], [`PropertyError`], [`PropertyErrors`],
//!   [`ValidatorError`], [`RuleFailure`]
//! - **Codes**: the [`codes`] module with every built-in error code
//!
//! # Error tree
//!
//! Rules fail with a [`RuleFailure`]. Property rules collect the failures of
//! one property into a [`PropertyError`] named after the property path, and a
//! [`Validator`](crate::Validator) wraps all of them into a [`ValidatorError`]:
//!
//! ```text
//! ValidatorError { name, errors: [
//!     PropertyError { propertyName, propertyValue, errors: [
//!         RuleError { error, code }
//!     ]}
//! ]}
//! ```
//!
//! Error codes chain from the outside in: wrapping a rule that fails with code
//! `string_length` into a rule with code `teacher_name` yields
//! `teacher_name:string_length`. Use [`has_error_code`] to look for a code
//! anywhere in the tree.

pub mod codes;
mod error;
mod traits;
mod value;

pub use codes::{ERROR_CODE_SEPARATOR, ErrorCode};
pub use error::{
    HIDDEN_VALUE, HasErrorCode, PROPERTY_NAME_SEPARATOR, PropertyError, PropertyErrors,
    RuleError, RuleFailure, RuleSetError, ValidatorError, has_error_code, join_errors,
};
pub use traits::{PropertyValidator, Rule};
pub use value::{PROPERTY_VALUE_LENGTH_LIMIT, PropertyValue, property_value_string};

pub(crate) use error::concat_strings;
