//! RULE building blocks - single rules and rule sets
//!
//! [`SingleRule`] wraps a closure and decorates its failure with an error
//! code, an override message and free-form details. [`RuleSet`] bundles
//! several rules that are all evaluated, stamping its own code and details on
//! each failure.

use std::fmt;
use std::sync::Arc;

use crate::foundation::{
    ERROR_CODE_SEPARATOR, ErrorCode, Rule, RuleFailure, RuleSetError, concat_strings,
};
use crate::plan::RulePlan;

type RuleFn<T> = Arc<dyn Fn(&T) -> Result<(), RuleFailure> + Send + Sync>;

// ============================================================================
// SINGLE RULE
// ============================================================================

/// The basic validation building block.
///
/// # Examples
///
/// ```rust
/// use manifest_validator::foundation::Rule;
/// use manifest_validator::new_single_rule;
///
/// let rule = new_single_rule(|v: &i32| {
///     if *v > 0 { Ok(()) } else { Err("must be positive") }
/// })
/// .with_error_code("positive")
/// .with_details("counters start at 1");
///
/// let err = rule.validate(&0).unwrap_err();
/// assert_eq!(err.to_string(), "must be positive; counters start at 1");
/// ```
pub struct SingleRule<T: ?Sized> {
    validate: RuleFn<T>,
    error_code: ErrorCode,
    message: Option<String>,
    details: String,
    description: String,
}

/// Creates a [`SingleRule`] from a closure.
///
/// The closure may fail with anything convertible into a [`RuleFailure`]:
/// a message (`&str`, `String`), a [`RuleError`](crate::RuleError) or a
/// [`PropertyError`](crate::PropertyError) scoped to a sub-path.
pub fn new_single_rule<T, F, E>(validate: F) -> SingleRule<T>
where
    T: ?Sized,
    F: Fn(&T) -> Result<(), E> + Send + Sync + 'static,
    E: Into<RuleFailure>,
{
    SingleRule {
        validate: Arc::new(move |v| validate(v).map_err(Into::into)),
        error_code: ErrorCode::new(),
        message: None,
        details: String::new(),
        description: String::new(),
    }
}

impl<T: ?Sized> SingleRule<T> {
    /// Sets the code prepended onto every failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.error_code = code.into();
        self
    }

    /// Overrides the failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Appends details to the failure message, separated with `"; "`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Sets the description reported by [`plan`](crate::plan::plan).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn error_code(&self) -> &str {
        &self.error_code
    }
}

impl<T: ?Sized> Rule<T> for SingleRule<T> {
    fn validate(&self, value: &T) -> Result<(), RuleFailure> {
        (self.validate)(value).map_err(|mut failure| {
            failure.decorate(self.message.as_deref(), &self.details, &self.error_code);
            failure
        })
    }

    fn describe(&self) -> Vec<RulePlan> {
        let description = match (&self.message, self.description.is_empty()) {
            (Some(message), true) => message.clone(),
            _ => self.description.clone(),
        };
        vec![
            RulePlan::new(description)
                .with_details(self.details.clone())
                .with_error_code(&self.error_code),
        ]
    }
}

impl<T: ?Sized> Clone for SingleRule<T> {
    fn clone(&self) -> Self {
        Self {
            validate: Arc::clone(&self.validate),
            error_code: self.error_code.clone(),
            message: self.message.clone(),
            details: self.details.clone(),
            description: self.description.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for SingleRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleRule")
            .field("error_code", &self.error_code)
            .field("message", &self.message)
            .field("details", &self.details)
            .field("description", &self.description)
            .field("validate", &"<function>")
            .finish()
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// A bundle of rules evaluated together.
///
/// Every member runs, regardless of earlier failures. The set's code becomes
/// the outer prefix of each member failure's code.
pub struct RuleSet<T: ?Sized> {
    rules: Vec<Arc<dyn Rule<T>>>,
    error_code: ErrorCode,
    details: String,
}

/// Creates an empty [`RuleSet`]; add members with [`RuleSet::with_rule`].
pub fn new_rule_set<T: ?Sized>() -> RuleSet<T> {
    RuleSet {
        rules: Vec::new(),
        error_code: ErrorCode::new(),
        details: String::new(),
    }
}

impl<T: ?Sized> RuleSet<T> {
    /// Appends a member rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule<R>(mut self, rule: R) -> Self
    where
        R: Rule<T> + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the code prepended onto every member failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.error_code = code.into();
        self
    }

    /// Appends details to every member failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: ?Sized> Rule<T> for RuleSet<T> {
    fn validate(&self, value: &T) -> Result<(), RuleFailure> {
        let mut errors = RuleSetError::default();
        for rule in &self.rules {
            if let Err(mut failure) = rule.validate(value) {
                failure.decorate(None, &self.details, &self.error_code);
                errors.push(failure);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(RuleFailure::Set(errors))
        }
    }

    fn describe(&self) -> Vec<RulePlan> {
        self.rules
            .iter()
            .flat_map(|rule| rule.describe())
            .map(|mut plan| {
                plan.details = concat_strings(&plan.details, &self.details, "; ");
                plan.error_code =
                    concat_strings(&self.error_code, &plan.error_code, ERROR_CODE_SEPARATOR);
                plan
            })
            .collect()
    }
}

impl<T: ?Sized> Clone for RuleSet<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            error_code: self.error_code.clone(),
            details: self.details.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.len())
            .field("error_code", &self.error_code)
            .field("details", &self.details)
            .finish()
    }
}

/// Builds a [`RuleSet`] from a list of rules.
///
/// ```rust
/// use manifest_validator::prelude::*;
///
/// let set = rule_set![string_min_length(2), string_max_length(4)]
///     .with_error_code("name");
/// let err = set.validate(&"a".to_owned()).unwrap_err();
/// assert!(err.has_error_code("name"));
/// ```
#[macro_export]
macro_rules! rule_set {
    ($($rule:expr),* $(,)?) => {
        $crate::new_rule_set()$(.with_rule($rule))*
    };
}
