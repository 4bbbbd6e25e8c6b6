//! WHEN - predicates gating evaluation, and cascade modes
//!
//! Property rules and validators accept any number of predicates through
//! `when`. Evaluation is skipped, with no error, unless every predicate holds.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

/// Controls whether the remaining steps of a rule list run after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CascadeMode {
    /// Run every step and report every failure.
    #[default]
    Continue,
    /// Stop at the first failing step.
    Stop,
}

/// A condition over the owner value, with an optional description used by
/// [`plan`](crate::plan::plan).
pub struct Predicate<S> {
    func: Arc<dyn Fn(&S) -> bool + Send + Sync>,
    description: String,
}

impl<S> Predicate<S> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            description: String::new(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matches(&self, value: &S) -> bool {
        (self.func)(value)
    }
}

impl<S> Clone for Predicate<S> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            description: self.description.clone(),
        }
    }
}

impl<S> fmt::Debug for Predicate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("description", &self.description)
            .field("func", &"<function>")
            .finish()
    }
}

/// Conjunction of predicates. Most rules declare at most a couple.
pub(crate) struct Predicates<S>(SmallVec<[Predicate<S>; 2]>);

impl<S> Predicates<S> {
    pub(crate) fn push(&mut self, predicate: Predicate<S>) {
        self.0.push(predicate);
    }

    /// `true` when every predicate holds; vacuously `true` when empty.
    pub(crate) fn matches(&self, value: &S) -> bool {
        self.0.iter().all(|p| p.matches(value))
    }

    /// Non-empty descriptions, in declaration order.
    pub(crate) fn descriptions(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|p| !p.description.is_empty())
            .map(|p| p.description.clone())
            .collect()
    }
}

impl<S> Default for Predicates<S> {
    fn default() -> Self {
        Self(SmallVec::new())
    }
}

impl<S> Clone for Predicates<S> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<S> fmt::Debug for Predicates<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_predicates_match() {
        let predicates = Predicates::<i32>::default();
        assert!(predicates.matches(&1));
    }

    #[test]
    fn test_all_predicates_must_hold() {
        let mut predicates = Predicates::default();
        predicates.push(Predicate::new(|v: &i32| *v > 0));
        predicates.push(Predicate::new(|v: &i32| *v < 10).with_description("below ten"));
        assert!(predicates.matches(&5));
        assert!(!predicates.matches(&11));
        assert!(!predicates.matches(&-1));
        assert_eq!(predicates.descriptions(), vec!["below ten"]);
    }
}
