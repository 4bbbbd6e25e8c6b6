//! Length validators
//!
//! String length is measured in Unicode scalar values (chars); slices and
//! maps count their elements.

use crate::SingleRule;
use crate::combinators::map::MapLike;
use crate::foundation::codes;
use crate::new_single_rule;

// ============================================================================
// BOUNDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    min: Option<usize>,
    max: Option<usize>,
}

impl Bounds {
    fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    fn message(self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("length must be between {min} and {max}"),
            (Some(min), None) => format!("length must be greater than or equal to {min}"),
            (None, Some(max)) => format!("length must be less than or equal to {max}"),
            (None, None) => String::new(),
        }
    }

    fn check(self, length: usize) -> Result<(), String> {
        let below = self.min.is_some_and(|min| length < min);
        let above = self.max.is_some_and(|max| length > max);
        if below || above {
            Err(self.message())
        } else {
            Ok(())
        }
    }
}

fn length_rule<T, F>(bounds: Bounds, code: &str, measure: F) -> SingleRule<T>
where
    T: ?Sized,
    F: Fn(&T) -> usize + Send + Sync + 'static,
{
    new_single_rule(move |v: &T| bounds.check(measure(v)))
        .with_error_code(code)
        .with_description(bounds.message())
}

fn char_count<T: AsRef<str> + ?Sized>(v: &T) -> usize {
    v.as_ref().chars().count()
}

// ============================================================================
// STRING LENGTH
// ============================================================================

/// Passes when the string has between `min` and `max` chars, inclusive.
///
/// ```rust
/// use manifest_validator::prelude::*;
///
/// let rule = string_length(2, 4);
/// assert!(rule.validate("żółw").is_ok());
/// assert_eq!(
///     rule.validate("a").unwrap_err().to_string(),
///     "length must be between 2 and 4"
/// );
/// ```
pub fn string_length<T: AsRef<str> + ?Sized>(min: usize, max: usize) -> SingleRule<T> {
    length_rule(Bounds::between(min, max), codes::STRING_LENGTH, |v: &T| char_count(v))
}

pub fn string_min_length<T: AsRef<str> + ?Sized>(min: usize) -> SingleRule<T> {
    length_rule(Bounds::at_least(min), codes::STRING_MIN_LENGTH, |v: &T| char_count(v))
}

pub fn string_max_length<T: AsRef<str> + ?Sized>(max: usize) -> SingleRule<T> {
    length_rule(Bounds::at_most(max), codes::STRING_MAX_LENGTH, |v: &T| char_count(v))
}

// ============================================================================
// SLICE LENGTH
// ============================================================================

/// Passes when the slice has between `min` and `max` elements, inclusive.
pub fn slice_length<T>(min: usize, max: usize) -> SingleRule<Vec<T>> {
    length_rule(Bounds::between(min, max), codes::SLICE_LENGTH, |v: &Vec<T>| v.len())
}

pub fn slice_min_length<T>(min: usize) -> SingleRule<Vec<T>> {
    length_rule(Bounds::at_least(min), codes::SLICE_MIN_LENGTH, |v: &Vec<T>| v.len())
}

pub fn slice_max_length<T>(max: usize) -> SingleRule<Vec<T>> {
    length_rule(Bounds::at_most(max), codes::SLICE_MAX_LENGTH, |v: &Vec<T>| v.len())
}

// ============================================================================
// MAP LENGTH
// ============================================================================

/// Passes when the map has between `min` and `max` entries, inclusive.
pub fn map_length<M: MapLike>(min: usize, max: usize) -> SingleRule<M> {
    length_rule(Bounds::between(min, max), codes::MAP_LENGTH, |m: &M| m.len())
}

pub fn map_min_length<M: MapLike>(min: usize) -> SingleRule<M> {
    length_rule(Bounds::at_least(min), codes::MAP_MIN_LENGTH, |m: &M| m.len())
}

pub fn map_max_length<M: MapLike>(max: usize) -> SingleRule<M> {
    length_rule(Bounds::at_most(max), codes::MAP_MAX_LENGTH, |m: &M| m.len())
}
