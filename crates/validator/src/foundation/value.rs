//! Value capability required from validated properties.
//!
//! [`PropertyValue`] answers two questions about a value: is it the empty
//! (zero) value of its type, and how should it be shown in an error. Property
//! rules use the first to implement `required` and `omit_empty`, and the second
//! to fill [`PropertyError::property_value`](super::PropertyError::property_value).

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::BuildHasher;
use std::time::Duration;

use serde::Serialize;

/// Maximum length, in bytes, of a rendered property value.
pub const PROPERTY_VALUE_LENGTH_LIMIT: usize = 100;

/// A value that can be reported in a [`PropertyError`](super::PropertyError).
///
/// Implement it for your own types with the
/// [`property_value!`](crate::property_value) macro, or by hand.
pub trait PropertyValue {
    /// Returns `true` for the zero value of the type.
    fn is_empty_value(&self) -> bool;

    /// Human-readable form of the value. Empty values should render as `""`.
    fn to_property_string(&self) -> String;
}

/// Renders `value` the way it appears in errors.
///
/// The string is cut to [`PROPERTY_VALUE_LENGTH_LIMIT`] bytes (with `...`
/// appended), trimmed, and has its line breaks escaped.
pub fn property_value_string<V>(value: &V) -> String
where
    V: PropertyValue + ?Sized,
{
    normalize(&value.to_property_string())
}

fn normalize(raw: &str) -> String {
    limit_string(raw, PROPERTY_VALUE_LENGTH_LIMIT)
        .trim()
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

fn limit_string(s: &str, limit: usize) -> String {
    if s.len() <= limit {
        return s.to_owned();
    }
    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    // Converting through `Value` sorts object keys, so hash maps render stably.
    serde_json::to_value(value)
        .map(|v| v.to_string())
        .unwrap_or_default()
}

// ============================================================================
// PRIMITIVES
// ============================================================================

macro_rules! display_value {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn is_empty_value(&self) -> bool {
                    *self == $zero
                }

                fn to_property_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_value! {
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    bool => false,
    char => '\0',
}

// Only positive zero is empty; `-0.0` has a sign bit set.
macro_rules! float_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn is_empty_value(&self) -> bool {
                    self.to_bits() == 0
                }

                fn to_property_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

float_value!(f32, f64);

impl PropertyValue for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn to_property_string(&self) -> String {
        self.to_owned()
    }
}

impl PropertyValue for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn to_property_string(&self) -> String {
        self.clone()
    }
}

impl PropertyValue for Duration {
    fn is_empty_value(&self) -> bool {
        self.is_zero()
    }

    fn to_property_string(&self) -> String {
        format!("{self:?}")
    }
}

impl PropertyValue for () {
    fn is_empty_value(&self) -> bool {
        true
    }

    fn to_property_string(&self) -> String {
        String::new()
    }
}

// ============================================================================
// WRAPPERS
// ============================================================================

impl<T: PropertyValue + ?Sized> PropertyValue for &T {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }

    fn to_property_string(&self) -> String {
        (**self).to_property_string()
    }
}

impl<T: PropertyValue + ?Sized> PropertyValue for Box<T> {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }

    fn to_property_string(&self) -> String {
        (**self).to_property_string()
    }
}

/// `None` is empty; `Some` is never empty, even when wrapping a zero value.
impl<T: PropertyValue> PropertyValue for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }

    fn to_property_string(&self) -> String {
        self.as_ref()
            .map(PropertyValue::to_property_string)
            .unwrap_or_default()
    }
}

// ============================================================================
// COLLECTIONS
// ============================================================================

macro_rules! json_collection_value {
    ($(impl<$($gen:ident $(: $bound:path)?),*> for $ty:ty;)*) => {
        $(
            impl<$($gen $(: $bound)?),*> PropertyValue for $ty
            where
                Self: Serialize,
            {
                fn is_empty_value(&self) -> bool {
                    self.is_empty()
                }

                fn to_property_string(&self) -> String {
                    if self.is_empty() {
                        return String::new();
                    }
                    to_json(self)
                }
            }
        )*
    };
}

json_collection_value! {
    impl<T> for Vec<T>;
    impl<T> for [T];
    impl<K, V, H: BuildHasher> for HashMap<K, V, H>;
    impl<K, V> for BTreeMap<K, V>;
    impl<T, H: BuildHasher> for HashSet<T, H>;
    impl<T> for BTreeSet<T>;
}

impl PropertyValue for serde_json::Value {
    fn is_empty_value(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::Array(a) => a.is_empty(),
            Self::Object(o) => o.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    fn to_property_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::String(s) => s.clone(),
            other if other.is_empty_value() => String::new(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0, true)]
    #[case::positive(5, false)]
    #[case::negative(-1, false)]
    fn test_numeric_emptiness(#[case] value: i64, #[case] empty: bool) {
        assert_eq!(value.is_empty_value(), empty);
    }

    #[rstest]
    #[case::positive_zero(0.0, true)]
    #[case::negative_zero(-0.0, false)]
    #[case::fraction(0.5, false)]
    fn test_float_emptiness(#[case] value: f64, #[case] empty: bool) {
        assert_eq!(value.is_empty_value(), empty);
    }

    #[test]
    fn test_negative_zero_f32_is_not_empty() {
        assert!(0.0_f32.is_empty_value());
        assert!(!(-0.0_f32).is_empty_value());
        assert_eq!(property_value_string(&-0.0_f32), "-0");
    }

    #[test]
    fn test_zero_values_still_render() {
        assert_eq!(property_value_string(&0_u8), "0");
        assert_eq!(property_value_string(&false), "false");
        assert_eq!(property_value_string(&0.5_f64), "0.5");
    }

    #[test]
    fn test_option_semantics() {
        assert!(None::<i32>.is_empty_value());
        assert!(!Some(0).is_empty_value());
        assert_eq!(property_value_string(&Some(7)), "7");
        assert_eq!(property_value_string(&None::<String>), "");
    }

    #[test]
    fn test_collections_render_as_json() {
        assert_eq!(property_value_string(&vec!["a", "b"]), r#"["a","b"]"#);
        assert_eq!(property_value_string(&Vec::<String>::new()), "");

        let mut map = HashMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        assert_eq!(property_value_string(&map), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_value_is_limited() {
        let long = "x".repeat(150);
        let rendered = property_value_string(long.as_str());
        assert_eq!(rendered.len(), PROPERTY_VALUE_LENGTH_LIMIT + 3);
        assert!(rendered.ends_with("..."));
    }

    #[test]
    fn test_limit_respects_char_boundary() {
        let s = format!("{}ż", "a".repeat(99));
        let rendered = property_value_string(s.as_str());
        assert_eq!(rendered, format!("{}...", "a".repeat(99)));
    }

    #[test]
    fn test_value_is_trimmed_and_escaped() {
        assert_eq!(property_value_string("  a\nb\r\nc  "), "a\\nb\\r\\nc");
    }

    #[test]
    fn test_json_value() {
        assert!(serde_json::Value::Null.is_empty_value());
        assert_eq!(property_value_string(&serde_json::json!("plain")), "plain");
        assert_eq!(property_value_string(&serde_json::json!({"a": 1})), r#"{"a":1}"#);
    }
}
