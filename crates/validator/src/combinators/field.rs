//! FIELD rules - validates a single property of an owner value
//!
//! [`PropertyRules`] binds a getter to a name and an ordered list of rules
//! and nested validators. Three extraction modes are available:
//!
//! - [`for_property`] - the getter returns the value itself
//! - [`for_option`] - the getter returns an `Option`; `None` is absent
//! - [`transform`] - the getter's value is converted through a fallible function
//!
//! # Examples
//!
//! ```rust
//! use manifest_validator::prelude::*;
//!
//! struct Teacher {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! let name = for_property(|t: &Teacher| t.name.clone())
//!     .with_name("name")
//!     .required()
//!     .rules(string_length(1, 63));
//! let age = for_option(|t: &Teacher| t.age)
//!     .with_name("age")
//!     .rules(less_than(150_u32));
//!
//! let teacher = Teacher { name: "Jake".into(), age: None };
//! assert!(name.validate(&teacher).is_ok());
//! assert!(age.validate(&teacher).is_ok());
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::Validator;
use crate::combinators::steps::{Step, Steps};
use crate::combinators::when::{CascadeMode, Predicate, Predicates};
use crate::foundation::{
    PropertyError, PropertyErrors, PropertyValidator, PropertyValue, Rule, RuleError, codes,
    property_value_string,
};
use crate::plan::{self, PlanBuilder, PlanEntry};

/// Result of running a getter.
enum Extracted<T> {
    Value(T),
    /// The source was empty; carries the zero value to validate instead.
    Empty(T),
    Absent,
    Failed { original: String, error: RuleError },
}

type Extractor<T, S> = Arc<dyn Fn(&S) -> Extracted<T> + Send + Sync>;

// ============================================================================
// PROPERTY RULES
// ============================================================================

/// Rules for a single property of `S`, of type `T`.
///
/// Builder methods take `self` and return the modified copy, so a configured
/// value can be shared between threads and reused freely.
pub struct PropertyRules<T, S> {
    name: String,
    extractor: Extractor<T, S>,
    steps: Steps<T>,
    required: bool,
    omit_empty: bool,
    hide_value: bool,
    is_pointer: bool,
    mode: CascadeMode,
    examples: Vec<String>,
    original_type: Option<String>,
    predicates: Predicates<S>,
}

impl<T, S> PropertyRules<T, S>
where
    T: PropertyValue + 'static,
    S: 'static,
{
    fn with_extractor(extractor: Extractor<T, S>) -> Self {
        Self {
            name: String::new(),
            extractor,
            steps: Steps::default(),
            required: false,
            omit_empty: false,
            hide_value: false,
            is_pointer: false,
            mode: CascadeMode::default(),
            examples: Vec::new(),
            original_type: None,
            predicates: Predicates::default(),
        }
    }

    /// Rules for the value returned by `getter`.
    ///
    /// A zero value is still validated unless [`omit_empty`](Self::omit_empty)
    /// or [`required`](Self::required) is declared.
    pub fn new<F>(getter: F) -> Self
    where
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        Self::with_extractor(Arc::new(move |s| Extracted::Value(getter(s))))
    }

    /// Rules for an optional value. `None` is skipped unless
    /// [`required`](Self::required) is declared; `Some` of a zero value is
    /// validated.
    pub fn for_option<F>(getter: F) -> Self
    where
        F: Fn(&S) -> Option<T> + Send + Sync + 'static,
    {
        let mut rules = Self::with_extractor(Arc::new(move |s| match getter(s) {
            Some(v) => Extracted::Value(v),
            None => Extracted::Absent,
        }));
        rules.is_pointer = true;
        rules
    }

    /// Rules for a value converted from the getter's value.
    ///
    /// The converter only runs for non-empty values. An empty source value is
    /// treated like any other zero value: rules run against `T::default()`
    /// unless [`omit_empty`](Self::omit_empty) or [`required`](Self::required)
    /// is declared. A conversion failure is reported with the
    /// [`codes::TRANSFORM`] code against the original value, and no rule runs.
    pub fn transform<U, F, G, E>(getter: F, transformer: G) -> Self
    where
        T: Default,
        U: PropertyValue + 'static,
        F: Fn(&S) -> U + Send + Sync + 'static,
        G: Fn(&U) -> Result<T, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        let mut rules = Self::with_extractor(Arc::new(move |s| {
            let source = getter(s);
            if source.is_empty_value() {
                return Extracted::Empty(T::default());
            }
            match transformer(&source) {
                Ok(v) => Extracted::Value(v),
                Err(err) => Extracted::Failed {
                    original: property_value_string(&source),
                    error: RuleError::new(err.to_string()).with_code(codes::TRANSFORM),
                },
            }
        }));
        rules.original_type = Some(plan::type_name::<U>());
        rules
    }

    /// Sets the property name used as the path segment in errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds examples reported by [`plan`](crate::plan::plan).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_examples<I, E>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.examples.extend(examples.into_iter().map(Into::into));
        self
    }

    /// Appends a rule step.
    #[must_use = "builder methods must be chained or built"]
    pub fn rules<R>(mut self, rule: R) -> Self
    where
        R: Rule<T> + 'static,
    {
        self.steps.push(Step::Rule(Arc::new(rule)));
        self
    }

    /// Appends a nested validator step. Its errors are reported under this
    /// property's path.
    #[must_use = "builder methods must be chained or built"]
    pub fn include(mut self, validator: Validator<T>) -> Self {
        self.steps.push(Step::Validator(validator));
        self
    }

    /// Appends a marker that stops the remaining steps if the previous step failed.
    #[must_use = "builder methods must be chained or built"]
    pub fn stop_on_error(mut self) -> Self {
        self.steps.push(Step::StopOnError);
        self
    }

    /// Only validates when `predicate` holds for the owner.
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

    /// Reports an empty value with the [`codes::REQUIRED`] code.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Skips validation of the zero value.
    #[must_use = "builder methods must be chained or built"]
    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    /// Replaces the value in errors with [`HIDDEN_VALUE`](crate::foundation::HIDDEN_VALUE).
    #[must_use = "builder methods must be chained or built"]
    pub fn hide_value(mut self) -> Self {
        self.hide_value = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn cascade(mut self, mode: CascadeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validates the property of `owner`.
    pub fn validate(&self, owner: &S) -> Result<(), PropertyErrors> {
        let value = match (self.extractor)(owner) {
            Extracted::Value(v) if self.is_pointer || !v.is_empty_value() => v,
            Extracted::Value(v) | Extracted::Empty(v) => {
                if self.required {
                    return Err(self.required_error());
                }
                if self.omit_empty {
                    return Ok(());
                }
                v
            }
            Extracted::Absent => {
                if self.required {
                    return Err(self.required_error());
                }
                return Ok(());
            }
            Extracted::Failed { original, error } => {
                let mut err = PropertyError::with_rendered_value(&self.name, original, [error]);
                if self.hide_value {
                    err.hide_value();
                }
                return Err(err.into());
            }
        };
        if !self.predicates.matches(owner) {
            trace!(property = %self.name, "predicates not met, skipping property");
            return Ok(());
        }

        let outcome = self.steps.walk(&value, self.mode);
        if outcome.is_empty() {
            return Ok(());
        }
        let mut errors: PropertyErrors = outcome
            .into_errors(&self.name, property_value_string(&value), |_| {})
            .into();
        if self.hide_value {
            errors.hide_value();
        }
        Err(errors.aggregate())
    }

    fn required_error(&self) -> PropertyErrors {
        PropertyError::with_rendered_value(&self.name, "", [RuleError::required()]).into()
    }

    fn type_name(&self) -> String {
        self.original_type
            .clone()
            .unwrap_or_else(plan::type_name::<T>)
    }

    pub(crate) fn plan_into(&self, builder: &PlanBuilder, sink: &mut Vec<PlanEntry>) {
        let builder = builder
            .with_conditions(self.predicates.descriptions())
            .append_path(&self.name)
            .with_property(
                self.type_name(),
                &self.examples,
                !self.required && (self.is_pointer || self.omit_empty),
                self.hide_value,
            );
        self.steps.plan(&builder, sink);
    }
}

impl<T, S> PropertyValidator<S> for PropertyRules<T, S>
where
    T: PropertyValue + 'static,
    S: 'static,
{
    fn validate(&self, owner: &S) -> Result<(), PropertyErrors> {
        Self::validate(self, owner)
    }

    fn plan(&self, builder: &PlanBuilder, sink: &mut Vec<PlanEntry>) {
        self.plan_into(builder, sink);
    }
}

impl<T, S> Clone for PropertyRules<T, S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            extractor: Arc::clone(&self.extractor),
            steps: self.steps.clone(),
            required: self.required,
            omit_empty: self.omit_empty,
            hide_value: self.hide_value,
            is_pointer: self.is_pointer,
            mode: self.mode,
            examples: self.examples.clone(),
            original_type: self.original_type.clone(),
            predicates: self.predicates.clone(),
        }
    }
}

impl<T, S> fmt::Debug for PropertyRules<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRules")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("omit_empty", &self.omit_empty)
            .field("hide_value", &self.hide_value)
            .field("is_pointer", &self.is_pointer)
            .field("mode", &self.mode)
            .field("predicates", &self.predicates)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Creates [`PropertyRules`] for the value returned by `getter`.
pub fn for_property<T, S, F>(getter: F) -> PropertyRules<T, S>
where
    T: PropertyValue + 'static,
    S: 'static,
    F: Fn(&S) -> T + Send + Sync + 'static,
{
    PropertyRules::new(getter)
}

/// Creates [`PropertyRules`] for an optional value.
pub fn for_option<T, S, F>(getter: F) -> PropertyRules<T, S>
where
    T: PropertyValue + 'static,
    S: 'static,
    F: Fn(&S) -> Option<T> + Send + Sync + 'static,
{
    PropertyRules::for_option(getter)
}

/// Creates [`PropertyRules`] for a converted value.
pub fn transform<U, T, S, F, G, E>(getter: F, transformer: G) -> PropertyRules<T, S>
where
    U: PropertyValue + 'static,
    T: PropertyValue + Default + 'static,
    S: 'static,
    F: Fn(&S) -> U + Send + Sync + 'static,
    G: Fn(&U) -> Result<T, E> + Send + Sync + 'static,
    E: fmt::Display,
{
    PropertyRules::transform(getter, transformer)
}

/// Getter returning a copy of the validated value itself.
pub fn get_self<S: Clone>() -> fn(&S) -> S {
    S::clone
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{HIDDEN_VALUE, HasErrorCode};
    use crate::{new_single_rule, validator};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[derive(Debug, Clone, Default)]
    struct Teacher {
        name: String,
        middle_name: Option<String>,
        age: u32,
        tenure: String,
    }

    fn equal_to(expected: &'static str) -> impl Rule<String> {
        new_single_rule(move |v: &String| {
            if v == expected {
                Ok(())
            } else {
                Err(format!("should be equal to '{expected}'"))
            }
        })
    }

    fn jake() -> Teacher {
        Teacher {
            name: "Jake".into(),
            ..Teacher::default()
        }
    }

    #[test]
    fn test_passing_property() {
        let rules = for_property(|t: &Teacher| t.name.clone())
            .with_name("name")
            .rules(equal_to("Jake"));
        assert!(rules.validate(&jake()).is_ok());
    }

    #[test]
    fn test_failing_property_groups_rule_errors() {
        let rules = for_property(|t: &Teacher| t.name.clone())
            .with_name("name")
            .rules(equal_to("Tom"))
            .rules(equal_to("Tim"));
        let errors = rules.validate(&jake()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property_name, "name");
        assert_eq!(errors[0].property_value, "Jake");
        assert_eq!(errors[0].errors.len(), 2);
    }

    #[test]
    fn test_required_value_missing() {
        let rules = for_property(|t: &Teacher| t.tenure.clone())
            .with_name("tenure")
            .required()
            .rules(equal_to("x"));
        let errors = rules.validate(&jake()).unwrap_err();
        assert_eq!(
            errors.into_inner(),
            vec![PropertyError::with_rendered_value(
                "tenure",
                "",
                [RuleError::required()]
            )]
        );
    }

    #[test]
    fn test_zero_value_is_validated_without_omit_empty() {
        let rules = for_property(|t: &Teacher| t.tenure.clone())
            .with_name("tenure")
            .rules(equal_to("x"));
        assert!(rules.validate(&jake()).is_err());

        let rules = rules.omit_empty();
        assert!(rules.validate(&jake()).is_ok());
    }

    #[test]
    fn test_option_none_is_skipped() {
        let rules = for_option(|t: &Teacher| t.middle_name.clone())
            .with_name("middleName")
            .rules(equal_to("x"));
        assert!(rules.validate(&jake()).is_ok());

        let errors = rules.clone().required().validate(&jake()).unwrap_err();
        assert!(errors.has_error_code(codes::REQUIRED));
    }

    #[test]
    fn test_option_some_zero_value_is_validated() {
        let rules = for_option(|t: &Teacher| t.middle_name.clone())
            .with_name("middleName")
            .required()
            .rules(equal_to("x"));
        let teacher = Teacher {
            middle_name: Some(String::new()),
            ..jake()
        };
        let errors = rules.validate(&teacher).unwrap_err();
        assert!(!errors.has_error_code(codes::REQUIRED));
        assert_eq!(errors[0].errors[0].message, "should be equal to 'x'");
    }

    #[test]
    fn test_transform_failure_reports_original_value() {
        let rules = transform(
            |t: &Teacher| t.tenure.clone(),
            |s: &String| s.parse::<u64>().map(Duration::from_secs),
        )
        .with_name("tenure")
        .rules(new_single_rule(|_: &Duration| Ok::<(), &str>(())));
        let teacher = Teacher {
            tenure: "ten".into(),
            ..jake()
        };
        let errors = rules.validate(&teacher).unwrap_err();
        assert_eq!(errors[0].property_value, "ten");
        assert_eq!(errors[0].errors[0].code, codes::TRANSFORM);
        assert_eq!(errors[0].errors[0].message, "invalid digit found in string");
    }

    #[test]
    fn test_transform_of_empty_value_validates_zero_value() {
        let rules = transform(
            |t: &Teacher| t.tenure.clone(),
            |s: &String| s.parse::<u64>(),
        )
        .with_name("tenure")
        .rules(new_single_rule(|v: &u64| {
            if *v > 0 { Ok(()) } else { Err("should be greater than '0'") }
        }));
        let errors = rules.validate(&jake()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property_name, "tenure");
        assert_eq!(errors[0].property_value, "0");
        assert_eq!(errors[0].errors[0].message, "should be greater than '0'");
    }

    #[test]
    fn test_transform_of_empty_value_honors_omit_empty_and_required() {
        let rules = transform(
            |t: &Teacher| t.tenure.clone(),
            |s: &String| s.parse::<u64>(),
        )
        .with_name("tenure")
        .rules(new_single_rule(|_: &u64| Err("never")));
        assert!(rules.clone().omit_empty().validate(&jake()).is_ok());

        let errors = rules.required().validate(&jake()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_error_code(codes::REQUIRED));
        assert!(!errors.has_error_code(codes::TRANSFORM));
    }

    #[test]
    fn test_predicates_gate_evaluation() {
        let rules = for_property(|t: &Teacher| t.name.clone())
            .with_name("name")
            .when(|t: &Teacher| t.age > 30)
            .rules(equal_to("Tom"));
        assert!(rules.validate(&jake()).is_ok());

        let older = Teacher { age: 40, ..jake() };
        assert!(rules.validate(&older).is_err());
    }

    #[test]
    fn test_cascade_stop() {
        let rules = for_property(|t: &Teacher| t.name.clone())
            .with_name("name")
            .cascade(CascadeMode::Stop)
            .rules(equal_to("Tom"))
            .rules(equal_to("Tim"));
        let errors = rules.validate(&jake()).unwrap_err();
        assert_eq!(errors[0].errors.len(), 1);
    }

    #[test]
    fn test_include_prepends_name() {
        let inner = validator![
            for_property(|s: &String| s.len() as u32)
                .with_name("length")
                .rules(new_single_rule(|v: &u32| {
                    if *v > 5 { Ok(()) } else { Err("too short") }
                }))
        ];
        let rules = for_property(|t: &Teacher| t.name.clone())
            .with_name("name")
            .include(inner)
            .rules(equal_to("Tom"));
        let errors = rules.validate(&jake()).unwrap_err();
        let names: Vec<_> = errors.iter().map(|e| e.property_name.as_str()).collect();
        assert_eq!(names, vec!["name.length", "name"]);
        assert_eq!(errors[0].property_value, "4");
    }

    #[test]
    fn test_rule_returning_property_error_is_scoped() {
        let rules = for_property(|t: &Teacher| t.name.clone())
            .with_name("teacher")
            .rules(new_single_rule(|_: &String| {
                Err(PropertyError::new("nested", "made-up", [RuleError::new("bad")]))
            }));
        let errors = rules.validate(&jake()).unwrap_err();
        assert_eq!(errors[0].property_name, "teacher.nested");
        assert_eq!(errors[0].property_value, "made-up");
    }

    #[test]
    fn test_hide_value() {
        let rules = for_property(|t: &Teacher| t.name.clone())
            .with_name("name")
            .hide_value()
            .rules(new_single_rule(|v: &String| Err(format!("'{v}' is wrong"))));
        let errors = rules.validate(&jake()).unwrap_err();
        assert_eq!(errors[0].property_value, HIDDEN_VALUE);
        assert_eq!(errors[0].errors[0].message, "'[hidden]' is wrong");
    }

    #[test]
    fn test_get_self() {
        let rules = for_property(get_self::<String>()).rules(equal_to("a"));
        assert!(rules.validate(&"a".to_owned()).is_ok());
        let errors = rules.validate(&"b".to_owned()).unwrap_err();
        assert_eq!(errors[0].property_name, "");
        assert_eq!(errors[0].property_value, "b");
    }
}
