//! Prelude module for convenient imports.
//!
//! Provides a single `use manifest_validator::prelude::*;` import that brings
//! in the traits, types, declaration functions, built-in rules and macros.
//!
//! # Examples
//!
//! ```rust
//! use manifest_validator::prelude::*;
//!
//! let port = rule_set![greater_than(0_u16), less_than_or_equal_to(65535_u16)];
//! assert!(port.validate(&8080).is_ok());
//! assert!(has_error_code(&port.validate(&0).unwrap_err(), codes::GREATER_THAN));
//! ```

// ============================================================================
// FOUNDATION: Traits, errors, codes
// ============================================================================

pub use crate::foundation::{
    HasErrorCode, PropertyError, PropertyErrors, PropertyValidator, PropertyValue, Rule,
    RuleError, RuleFailure, RuleSetError, ValidatorError, codes, has_error_code,
};

// ============================================================================
// DECLARATION: Validator, property rules, conditions
// ============================================================================

pub use crate::Validator;
pub use crate::combinators::{
    CascadeMode, MapItem, MapLike, Predicate, PropertyRules, PropertyRulesForMap,
    PropertyRulesForSlice, RuleSet, SingleRule, for_map, for_option, for_property, for_slice,
    get_self, map_element_name, new_rule_set, new_single_rule, slice_element_name, transform,
};

// ============================================================================
// VALIDATORS: All built-in rules
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// PLAN & MACROS
// ============================================================================

pub use crate::plan::{PropertyPlan, RulePlan, plan};
pub use crate::{property_value, rule_set, validator};
