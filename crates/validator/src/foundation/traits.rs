//! Core traits of the validation system.

use super::error::{PropertyErrors, RuleFailure};
use crate::plan::{PlanBuilder, PlanEntry, RulePlan};

// ============================================================================
// RULE
// ============================================================================

/// A single check over a value.
///
/// Most rules are built with [`new_single_rule`](crate::new_single_rule) or
/// taken from the [`validators`](crate::validators) module, but the trait can
/// be implemented directly:
///
/// ```rust
/// use manifest_validator::foundation::{Rule, RuleFailure};
///
/// struct Even;
///
/// impl Rule<i64> for Even {
///     fn validate(&self, value: &i64) -> Result<(), RuleFailure> {
///         if value % 2 == 0 {
///             Ok(())
///         } else {
///             Err("must be even".into())
///         }
///     }
/// }
///
/// assert!(Even.validate(&4).is_ok());
/// ```
pub trait Rule<T: ?Sized>: Send + Sync {
    /// Checks `value`, returning the failure if it does not satisfy the rule.
    fn validate(&self, value: &T) -> Result<(), RuleFailure>;

    /// Describes the rule for [`plan`](crate::plan::plan). Empty by default.
    fn describe(&self) -> Vec<RulePlan> {
        Vec::new()
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for Box<R> {
    fn validate(&self, value: &T) -> Result<(), RuleFailure> {
        (**self).validate(value)
    }

    fn describe(&self) -> Vec<RulePlan> {
        (**self).describe()
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for std::sync::Arc<R> {
    fn validate(&self, value: &T) -> Result<(), RuleFailure> {
        (**self).validate(value)
    }

    fn describe(&self) -> Vec<RulePlan> {
        (**self).describe()
    }
}

// ============================================================================
// PROPERTY VALIDATOR
// ============================================================================

/// A member of a [`Validator`](crate::Validator): extracts one property of
/// `S` and validates it.
///
/// Implemented by [`PropertyRules`](crate::PropertyRules),
/// [`PropertyRulesForSlice`](crate::PropertyRulesForSlice) and
/// [`PropertyRulesForMap`](crate::PropertyRulesForMap).
pub trait PropertyValidator<S>: Send + Sync {
    fn validate(&self, owner: &S) -> Result<(), PropertyErrors>;

    /// Reports the declared rules into `sink` without running them.
    fn plan(&self, builder: &PlanBuilder, sink: &mut Vec<PlanEntry>);
}
