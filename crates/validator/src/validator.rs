//! The top-level validator.
//!
//! A [`Validator`] aggregates the property rules declared for a type. It can
//! be run directly, or included as a step of another property's rules to
//! validate nested values.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::combinators::when::{Predicate, Predicates};
use crate::foundation::{PropertyErrors, PropertyValidator, ValidatorError};
use crate::plan::{PlanBuilder, PlanEntry};

/// Validates values of type `S`.
///
/// Built once and shared: configuration methods take `self` and return the
/// modified copy, and [`validate`](Self::validate) never mutates.
///
/// # Examples
///
/// ```rust
/// use manifest_validator::prelude::*;
///
/// struct Teacher {
///     name: String,
/// }
///
/// let v = validator![
///     for_property(|t: &Teacher| t.name.clone())
///         .with_name("name")
///         .rules(equal_to("Tom".to_owned())),
/// ];
///
/// let err = v.validate(&Teacher { name: "Jake".into() }).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Validation has failed for the following properties:\n  - 'name' with value 'Jake':\n    - should be equal to 'Tom'"
/// );
/// ```
pub struct Validator<S> {
    properties: Vec<Arc<dyn PropertyValidator<S>>>,
    name: String,
    predicates: Predicates<S>,
}

impl<S> Validator<S> {
    /// Creates a validator without properties.
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            name: String::new(),
            predicates: Predicates::default(),
        }
    }

    /// Appends property rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_property<P>(mut self, property: P) -> Self
    where
        P: PropertyValidator<S> + 'static,
    {
        self.properties.push(Arc::new(property));
        self
    }

    /// Sets the name shown in [`ValidatorError`].
    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Only validates when `predicate` holds; otherwise validation passes.
    #[must_use = "builder methods must be chained or built"]
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.when_predicate(Predicate::new(predicate))
    }

    /// Like [`when`](Self::when), with a description reported by
    /// [`plan`](crate::plan::plan).
    #[must_use = "builder methods must be chained or built"]
    pub fn when_described<F>(self, predicate: F, description: impl Into<String>) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.when_predicate(Predicate::new(predicate).with_description(description))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn when_predicate(mut self, predicate: Predicate<S>) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs every property's rules, in declaration order.
    pub fn validate(&self, value: &S) -> Result<(), ValidatorError> {
        if !self.predicates.matches(value) {
            trace!(validator = %self.name, "predicates not met, skipping validation");
            return Ok(());
        }
        let mut errors = PropertyErrors::new();
        for property in &self.properties {
            if let Err(errs) = property.validate(value) {
                errors.extend(errs);
            }
        }
        if errors.is_empty() {
            return Ok(());
        }
        debug!(
            validator = %self.name,
            properties = errors.len(),
            "validation failed"
        );
        Err(ValidatorError::new(errors).with_name(self.name.clone()))
    }

    pub(crate) fn plan_into(&self, builder: &PlanBuilder, sink: &mut Vec<PlanEntry>) {
        let builder = builder.with_conditions(self.predicates.descriptions());
        for property in &self.properties {
            property.plan(&builder, sink);
        }
    }
}

impl<S> Default for Validator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Validator<S> {
    fn clone(&self) -> Self {
        Self {
            properties: self.properties.clone(),
            name: self.name.clone(),
            predicates: self.predicates.clone(),
        }
    }
}

impl<S> fmt::Debug for Validator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("properties", &self.properties.len())
            .field("predicates", &self.predicates)
            .finish()
    }
}
