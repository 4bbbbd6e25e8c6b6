//! Presence validators

use crate::foundation::{PropertyValue, codes};
use crate::{SingleRule, new_single_rule};

/// Fails when the value is set (non-empty).
///
/// ```rust
/// use manifest_validator::prelude::*;
///
/// let rule = forbidden::<String>();
/// assert!(rule.validate(&String::new()).is_ok());
/// assert_eq!(
///     rule.validate(&"x".to_owned()).unwrap_err().to_string(),
///     "property is forbidden"
/// );
/// ```
pub fn forbidden<T: PropertyValue + ?Sized>() -> SingleRule<T> {
    const MESSAGE: &str = "property is forbidden";
    new_single_rule(|v: &T| {
        if v.is_empty_value() {
            Ok(())
        } else {
            Err(MESSAGE)
        }
    })
    .with_error_code(codes::FORBIDDEN)
    .with_description(MESSAGE)
}
