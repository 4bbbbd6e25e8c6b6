//! Uniqueness validators

use std::collections::HashMap;
use std::hash::Hash;

use crate::foundation::codes;
use crate::{SingleRule, new_single_rule};

/// Fails when two elements produce the same hash.
///
/// `constraints` describe what the hash is built from and are appended to
/// the message.
///
/// ```rust
/// use manifest_validator::prelude::*;
///
/// let rule = slice_unique(|s: &String| s.to_lowercase(), &["case-insensitive name"]);
/// let err = rule
///     .validate(&vec!["a".to_owned(), "b".to_owned(), "A".to_owned()])
///     .unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "elements are not unique, index 0 collides with index 2 based on constraints: case-insensitive name"
/// );
/// ```
pub fn slice_unique<T, H, F>(hash: F, constraints: &[&str]) -> SingleRule<Vec<T>>
where
    H: Eq + Hash,
    F: Fn(&T) -> H + Send + Sync + 'static,
{
    let constraints = constraints.join(", ");
    let description = if constraints.is_empty() {
        "elements must be unique".to_owned()
    } else {
        format!("elements must be unique according to the following constraints: {constraints}")
    };
    new_single_rule(move |slice: &Vec<T>| {
        let mut seen: HashMap<H, usize> = HashMap::with_capacity(slice.len());
        for (i, element) in slice.iter().enumerate() {
            if let Some(j) = seen.insert(hash(element), i) {
                let mut message =
                    format!("elements are not unique, index {j} collides with index {i}");
                if !constraints.is_empty() {
                    message.push_str(" based on constraints: ");
                    message.push_str(&constraints);
                }
                return Err(message);
            }
        }
        Ok(())
    })
    .with_error_code(codes::SLICE_UNIQUE)
    .with_description(description)
}

/// A hash function returning a copy of the element itself.
pub fn self_hash<T: Clone>() -> fn(&T) -> T {
    T::clone
}
