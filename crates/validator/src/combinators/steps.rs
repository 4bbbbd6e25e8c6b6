//! Ordered step lists shared by every kind of property rules.
//!
//! A step is a rule, a nested validator, or a stop marker. A list is walked
//! either over a single value or, step-major, over every element of a
//! collection.

use std::sync::Arc;

use tracing::trace;

use crate::Validator;
use crate::combinators::when::CascadeMode;
use crate::foundation::{PropertyError, PropertyErrors, Rule, RuleError, RuleFailure};
use crate::plan::{PlanBuilder, PlanEntry};

pub(crate) enum Step<T> {
    Rule(Arc<dyn Rule<T>>),
    Validator(Validator<T>),
    StopOnError,
}

impl<T> Clone for Step<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Rule(rule) => Self::Rule(Arc::clone(rule)),
            Self::Validator(v) => Self::Validator(v.clone()),
            Self::StopOnError => Self::StopOnError,
        }
    }
}

/// Failures collected at one position: plain rule errors, to be grouped into a
/// single property error, and already path-scoped property errors.
#[derive(Debug, Default)]
pub(crate) struct Outcome {
    pub(crate) rule_errors: Vec<RuleError>,
    pub(crate) property_errors: Vec<PropertyError>,
}

impl Outcome {
    pub(crate) fn is_empty(&self) -> bool {
        self.rule_errors.is_empty() && self.property_errors.is_empty()
    }

    fn record(&mut self, failure: RuleFailure) {
        match failure {
            RuleFailure::Rule(err) => self.rule_errors.push(err),
            RuleFailure::Property(err) => self.property_errors.push(err),
            RuleFailure::Set(set) => {
                for failure in set {
                    self.record(failure);
                }
            }
        }
    }

    fn record_nested(&mut self, errors: PropertyErrors) {
        self.property_errors.extend(errors);
    }

    /// Converts the outcome into property errors for the position `name`.
    ///
    /// Nested errors get `name` prepended; rule errors are grouped into one
    /// error reporting `value`. `mark` runs on every produced error before
    /// its path is extended.
    pub(crate) fn into_errors<F>(self, name: &str, value: String, mark: F) -> Vec<PropertyError>
    where
        F: Fn(&mut PropertyError),
    {
        let mut errors = Vec::with_capacity(self.property_errors.len() + 1);
        for mut err in self.property_errors {
            mark(&mut err);
            errors.push(err.prepend_property_name(name));
        }
        if !self.rule_errors.is_empty() {
            let mut err = PropertyError::with_rendered_value(name, value, self.rule_errors);
            mark(&mut err);
            errors.push(err);
        }
        errors
    }
}

/// Ordered list of steps.
pub(crate) struct Steps<T>(Vec<Step<T>>);

impl<T> Steps<T> {
    pub(crate) fn push(&mut self, step: Step<T>) {
        self.0.push(step);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Runs every step over `value`.
    pub(crate) fn walk(&self, value: &T, mode: CascadeMode) -> Outcome {
        let mut outcome = Outcome::default();
        let mut previous_failed = false;
        for step in &self.0 {
            previous_failed = match step {
                Step::StopOnError => {
                    if previous_failed {
                        trace!("stop marker reached after a failed step");
                        break;
                    }
                    continue;
                }
                Step::Rule(rule) => match rule.validate(value) {
                    Ok(()) => false,
                    Err(failure) => {
                        outcome.record(failure);
                        true
                    }
                },
                Step::Validator(validator) => match validator.validate(value) {
                    Ok(()) => false,
                    Err(err) => {
                        outcome.record_nested(err.errors);
                        true
                    }
                },
            };
            if previous_failed && mode == CascadeMode::Stop {
                trace!("cascade mode stop, skipping remaining steps");
                break;
            }
        }
        outcome
    }

    /// Runs every step over every element, step-major.
    ///
    /// A stop marker looks at the whole previous step: it breaks the walk when
    /// that step failed for at least one element. [`CascadeMode::Stop`] applies
    /// to each element on its own, so a failing element skips its remaining
    /// steps while the other elements keep going.
    pub(crate) fn walk_each<'a, I>(&self, elements: I, mode: CascadeMode) -> Vec<Outcome>
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: Clone,
    {
        let elements = elements.into_iter();
        let mut outcomes: Vec<Outcome> = elements.clone().map(|_| Outcome::default()).collect();
        let mut stopped = vec![false; outcomes.len()];
        let mut previous_failed = false;
        for step in &self.0 {
            if stopped.iter().all(|s| *s) {
                trace!("cascade mode stop, every element failed");
                break;
            }
            previous_failed = match step {
                Step::StopOnError => {
                    if previous_failed {
                        trace!("stop marker reached after a failed element step");
                        break;
                    }
                    continue;
                }
                Step::Rule(rule) => {
                    let mut failed = false;
                    let active = outcomes
                        .iter_mut()
                        .zip(stopped.iter_mut())
                        .zip(elements.clone())
                        .filter(|((_, stopped), _)| !**stopped);
                    for ((outcome, stopped), element) in active {
                        if let Err(failure) = rule.validate(element) {
                            outcome.record(failure);
                            *stopped = mode == CascadeMode::Stop;
                            failed = true;
                        }
                    }
                    failed
                }
                Step::Validator(validator) => {
                    let mut failed = false;
                    let active = outcomes
                        .iter_mut()
                        .zip(stopped.iter_mut())
                        .zip(elements.clone())
                        .filter(|((_, stopped), _)| !**stopped);
                    for ((outcome, stopped), element) in active {
                        if let Err(err) = validator.validate(element) {
                            outcome.record_nested(err.errors);
                            *stopped = mode == CascadeMode::Stop;
                            failed = true;
                        }
                    }
                    failed
                }
            };
        }
        outcomes
    }

    pub(crate) fn plan(&self, builder: &PlanBuilder, sink: &mut Vec<PlanEntry>) {
        for step in &self.0 {
            match step {
                Step::Rule(rule) => builder.push_rules(rule.describe(), sink),
                Step::Validator(validator) => validator.plan_into(builder, sink),
                Step::StopOnError => {}
            }
        }
    }
}

impl<T> Default for Steps<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Clone for Steps<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
