//! EACH rules - validates a slice property and each of its elements
//!
//! [`PropertyRulesForSlice`] keeps two independent step lists: rules for the
//! whole collection and rules for every element. Element errors are named
//! `<name>[<index>]` and flagged with
//! [`is_slice_element_error`](crate::PropertyError::is_slice_element_error).

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use crate::Validator;
use crate::combinators::steps::{Step, Steps};
use crate::combinators::when::{CascadeMode, Predicate, Predicates};
use crate::foundation::{
    PropertyError, PropertyErrors, PropertyValidator, PropertyValue, Rule, RuleError,
    property_value_string,
};
use crate::plan::{self, PlanBuilder, PlanEntry};

type SliceGetter<T, S> = Arc<dyn Fn(&S) -> Vec<T> + Send + Sync>;

/// Rules for a slice property of `S` with elements of type `T`.
pub struct PropertyRulesForSlice<T, S> {
    name: String,
    getter: SliceGetter<T, S>,
    slice_steps: Steps<Vec<T>>,
    each_steps: Steps<T>,
    required: bool,
    omit_empty: bool,
    mode: CascadeMode,
    examples: Vec<String>,
    predicates: Predicates<S>,
}

/// Creates [`PropertyRulesForSlice`] for the elements returned by `getter`.
pub fn for_slice<T, S, F>(getter: F) -> PropertyRulesForSlice<T, S>
where
    T: PropertyValue + Serialize + 'static,
    S: 'static,
    F: Fn(&S) -> Vec<T> + Send + Sync + 'static,
{
    PropertyRulesForSlice::new(getter)
}

/// Name of the element at `index` of the slice `slice_name`.
///
/// ```rust
/// use manifest_validator::slice_element_name;
///
/// assert_eq!(slice_element_name("teachers", 1), "teachers[1]");
/// assert_eq!(slice_element_name("", 1), "[1]");
/// ```
pub fn slice_element_name(slice_name: &str, index: usize) -> String {
    format!("{slice_name}[{index}]")
}

impl<T, S> PropertyRulesForSlice<T, S>
where
    T: PropertyValue + Serialize + 'static,
    S: 'static,
{
    pub fn new<F>(getter: F) -> Self
    where
        F: Fn(&S) -> Vec<T> + Send + Sync + 'static,
    {
        Self {
            name: String::new(),
            getter: Arc::new(getter),
            slice_steps: Steps::default(),
            each_steps: Steps::default(),
            required: false,
            omit_empty: false,
            mode: CascadeMode::default(),
            examples: Vec::new(),
            predicates: Predicates::default(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_examples<I, E>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.examples.extend(examples.into_iter().map(Into::into));
        self
    }

    /// Appends a rule for the whole slice.
    #[must_use = "builder methods must be chained or built"]
    pub fn rules<R>(mut self, rule: R) -> Self
    where
        R: Rule<Vec<T>> + 'static,
    {
        self.slice_steps.push(Step::Rule(Arc::new(rule)));
        self
    }

    /// Appends a rule run for every element.
    #[must_use = "builder methods must be chained or built"]
    pub fn rules_for_each<R>(mut self, rule: R) -> Self
    where
        R: Rule<T> + 'static,
    {
        self.each_steps.push(Step::Rule(Arc::new(rule)));
        self
    }

    /// Appends a validator run for every element.
    #[must_use = "builder methods must be chained or built"]
    pub fn include_for_each(mut self, validator: Validator<T>) -> Self {
        self.each_steps.push(Step::Validator(validator));
        self
    }

    /// Stop marker in the whole-slice list.
    #[must_use = "builder methods must be chained or built"]
    pub fn stop_on_error(mut self) -> Self {
        self.slice_steps.push(Step::StopOnError);
        self
    }

    /// Stop marker in the per-element list.
    #[must_use = "builder methods must be chained or built"]
    pub fn stop_on_error_for_each(mut self) -> Self {
        self.each_steps.push(Step::StopOnError);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.when_predicate(Predicate::new(predicate))
    }

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

    /// Reports an empty slice with the required code.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Skips validation of an empty slice.
    #[must_use = "builder methods must be chained or built"]
    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    /// Applies `mode` to both step lists. With [`CascadeMode::Stop`] element
    /// rules are skipped when whole-slice rules failed, and each element stops
    /// at its own first failing step.
    #[must_use = "builder methods must be chained or built"]
    pub fn cascade(mut self, mode: CascadeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validate(&self, owner: &S) -> Result<(), PropertyErrors> {
        if !self.predicates.matches(owner) {
            trace!(property = %self.name, "predicates not met, skipping slice");
            return Ok(());
        }
        let values = (self.getter)(owner);
        if values.is_empty() {
            if self.required {
                return Err(PropertyError::with_rendered_value(
                    &self.name,
                    "",
                    [RuleError::required()],
                )
                .into());
            }
            if self.omit_empty {
                return Ok(());
            }
        }

        let mut errors: PropertyErrors = self
            .slice_steps
            .walk(&values, self.mode)
            .into_errors(&self.name, property_value_string(&values), |_| {})
            .into();
        if !errors.is_empty() && self.mode == CascadeMode::Stop {
            return Err(errors.aggregate());
        }

        if !self.each_steps.is_empty() {
            let outcomes = self.each_steps.walk_each(values.iter(), self.mode);
            for (i, (outcome, value)) in outcomes.into_iter().zip(&values).enumerate() {
                if outcome.is_empty() {
                    continue;
                }
                errors.extend(outcome.into_errors(
                    &slice_element_name(&self.name, i),
                    property_value_string(value),
                    |e| e.is_slice_element_error = true,
                ));
            }
        }
        errors.aggregate().into_result()
    }

    pub(crate) fn plan_into(&self, builder: &PlanBuilder, sink: &mut Vec<PlanEntry>) {
        let builder = builder
            .with_conditions(self.predicates.descriptions())
            .append_path(&self.name);
        self.slice_steps.plan(
            &builder.with_property(
                plan::type_name::<Vec<T>>(),
                &self.examples,
                !self.required && self.omit_empty,
                false,
            ),
            sink,
        );
        self.each_steps.plan(
            &builder
                .append_path("[*]")
                .with_property(plan::type_name::<T>(), &[], false, false),
            sink,
        );
    }
}

impl<T, S> PropertyValidator<S> for PropertyRulesForSlice<T, S>
where
    T: PropertyValue + Serialize + 'static,
    S: 'static,
{
    fn validate(&self, owner: &S) -> Result<(), PropertyErrors> {
        Self::validate(self, owner)
    }

    fn plan(&self, builder: &PlanBuilder, sink: &mut Vec<PlanEntry>) {
        self.plan_into(builder, sink);
    }
}

impl<T, S> Clone for PropertyRulesForSlice<T, S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            getter: Arc::clone(&self.getter),
            slice_steps: self.slice_steps.clone(),
            each_steps: self.each_steps.clone(),
            required: self.required,
            omit_empty: self.omit_empty,
            mode: self.mode,
            examples: self.examples.clone(),
            predicates: self.predicates.clone(),
        }
    }
}

impl<T, S> fmt::Debug for PropertyRulesForSlice<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRulesForSlice")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("omit_empty", &self.omit_empty)
            .field("mode", &self.mode)
            .field("predicates", &self.predicates)
            .finish_non_exhaustive()
    }
}
