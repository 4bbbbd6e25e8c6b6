//! Membership validators
//!
//! [`one_of`] restricts a value to a fixed set; [`mutually_exclusive`]
//! restricts how many of a type's properties may be set at once.

use std::fmt::{self, Display};
use std::sync::Arc;

use crate::foundation::{PropertyValue, Rule, RuleError, RuleFailure, codes};
use crate::plan::RulePlan;
use crate::validators::plain_list;
use crate::{SingleRule, new_single_rule};

fn bracketed_list<T: Display>(values: &[T]) -> String {
    format!("[{}]", plain_list(values))
}

// ============================================================================
// ONE OF
// ============================================================================

/// Passes when the value equals any of `values`.
///
/// ```rust
/// use manifest_validator::prelude::*;
///
/// let rule = one_of(["GET", "POST"]);
/// assert!(rule.validate(&"GET").is_ok());
/// assert_eq!(
///     rule.validate(&"PUT").unwrap_err().to_string(),
///     "must be one of [GET, POST]"
/// );
/// ```
pub fn one_of<T, I>(values: I) -> SingleRule<T>
where
    T: PartialEq + Display + Send + Sync + 'static,
    I: IntoIterator<Item = T>,
{
    let values: Vec<T> = values.into_iter().collect();
    let description = format!("must be one of: {}", plain_list(&values));
    new_single_rule(move |v: &T| {
        if values.contains(v) {
            Ok(())
        } else {
            Err(format!("must be one of {}", bracketed_list(&values)))
        }
    })
    .with_error_code(codes::ONE_OF)
    .with_description(description)
}

// ============================================================================
// MUTUALLY EXCLUSIVE
// ============================================================================

type IsSetFn<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// Checks that at most one of the registered properties is non-empty.
///
/// When `required`, exactly one must be set. Create with
/// [`mutually_exclusive`] and register properties with
/// [`with_property`](Self::with_property).
pub struct MutuallyExclusive<S> {
    required: bool,
    properties: Vec<(String, IsSetFn<S>)>,
}

/// Creates an empty [`MutuallyExclusive`] rule.
///
/// ```rust
/// use manifest_validator::prelude::*;
///
/// #[derive(Clone, Default)]
/// struct Source {
///     url: String,
///     path: String,
/// }
///
/// let rule = mutually_exclusive::<Source>(true)
///     .with_property("url", |s| s.url.clone())
///     .with_property("path", |s| s.path.clone());
///
/// let both = Source { url: "https://x".into(), path: "/x".into() };
/// assert_eq!(
///     rule.validate(&both).unwrap_err().to_string(),
///     "[path, url] properties are mutually exclusive, provide only one of them"
/// );
/// assert_eq!(
///     rule.validate(&Source::default()).unwrap_err().to_string(),
///     "one of [path, url] properties must be set, none was provided"
/// );
/// ```
pub fn mutually_exclusive<S>(required: bool) -> MutuallyExclusive<S> {
    MutuallyExclusive {
        required,
        properties: Vec::new(),
    }
}

impl<S> MutuallyExclusive<S> {
    /// Registers a property; it counts as set when its value is non-empty.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_property<V, F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        V: PropertyValue,
        F: Fn(&S) -> V + Send + Sync + 'static,
    {
        self.properties.push((
            name.into(),
            Arc::new(move |s: &S| !getter(s).is_empty_value()),
        ));
        self
    }

    fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.properties.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl<S> Rule<S> for MutuallyExclusive<S> {
    fn validate(&self, value: &S) -> Result<(), RuleFailure> {
        let mut set: Vec<&str> = self
            .properties
            .iter()
            .filter(|(_, is_set)| is_set(value))
            .map(|(name, _)| name.as_str())
            .collect();
        let message = match set.len() {
            0 if self.required => format!(
                "one of {} properties must be set, none was provided",
                bracketed_list(&self.sorted_names())
            ),
            0 | 1 => return Ok(()),
            _ => {
                set.sort_unstable();
                format!(
                    "{} properties are mutually exclusive, provide only one of them",
                    bracketed_list(&set)
                )
            }
        };
        Err(RuleError::new(message)
            .with_code(codes::MUTUALLY_EXCLUSIVE)
            .into())
    }

    fn describe(&self) -> Vec<RulePlan> {
        vec![
            RulePlan::new(format!(
                "properties are mutually exclusive: {}",
                self.sorted_names().join(", ")
            ))
            .with_error_code(codes::MUTUALLY_EXCLUSIVE),
        ]
    }
}

impl<S> Clone for MutuallyExclusive<S> {
    fn clone(&self) -> Self {
        Self {
            required: self.required,
            properties: self.properties.clone(),
        }
    }
}

impl<S> fmt::Debug for MutuallyExclusive<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutuallyExclusive")
            .field("required", &self.required)
            .field("properties", &self.sorted_names())
            .finish()
    }
}
