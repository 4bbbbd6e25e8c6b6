//! Macros for declaring validators with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`validator!`] - build a [`Validator`](crate::Validator) from a list of property rules
//! - [`property_value!`] - implement [`PropertyValue`](crate::foundation::PropertyValue)
//!   for a serializable type
//! - [`rule_set!`] - build a [`RuleSet`](crate::RuleSet) from a list of rules
//!
//! # Examples
//!
//! ```rust
//! use manifest_validator::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Clone, Default, PartialEq, Serialize)]
//! struct Address {
//!     city: String,
//! }
//! property_value!(Address);
//!
//! #[derive(Clone)]
//! struct Teacher {
//!     address: Address,
//! }
//!
//! let address = validator![
//!     for_property(|a: &Address| a.city.clone())
//!         .with_name("city")
//!         .required(),
//! ];
//! let teacher = validator![
//!     for_property(|t: &Teacher| t.address.clone())
//!         .with_name("address")
//!         .include(address),
//! ];
//!
//! let err = teacher
//!     .validate(&Teacher { address: Address { city: String::new() } })
//!     .unwrap_err();
//! assert_eq!(err.errors[0].property_name, "address.city");
//! ```

// ============================================================================
// VALIDATOR MACRO
// ============================================================================

/// Creates a [`Validator`](crate::Validator) from a list of property rules.
///
/// Each entry may be a [`PropertyRules`](crate::PropertyRules),
/// [`PropertyRulesForSlice`](crate::PropertyRulesForSlice) or
/// [`PropertyRulesForMap`](crate::PropertyRulesForMap).
///
/// ```rust
/// use manifest_validator::prelude::*;
///
/// let v = validator![
///     for_property(|s: &String| s.len()).with_name("length").rules(less_than(10_usize)),
///     for_property(|s: &String| s.clone()).rules(string_not_empty()),
/// ]
/// .with_name("Label");
///
/// assert!(v.validate(&"ok".to_owned()).is_ok());
/// ```
#[macro_export]
macro_rules! validator {
    ($($property:expr),* $(,)?) => {
        $crate::Validator::new()$(.with_property($property))*
    };
}

// ============================================================================
// PROPERTY VALUE MACRO
// ============================================================================

/// Implements [`PropertyValue`](crate::foundation::PropertyValue) for types
/// that are `Serialize + Default + PartialEq`.
///
/// The default value is the empty value; others render as compact JSON.
///
/// ```rust
/// use manifest_validator::foundation::{PropertyValue, property_value_string};
/// use manifest_validator::property_value;
/// use serde::Serialize;
///
/// #[derive(Default, PartialEq, Serialize)]
/// struct Port {
///     number: u16,
/// }
/// property_value!(Port);
///
/// assert!(Port::default().is_empty_value());
/// assert_eq!(property_value_string(&Port { number: 80 }), r#"{"number":80}"#);
/// ```
#[macro_export]
macro_rules! property_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::foundation::PropertyValue for $ty {
                fn is_empty_value(&self) -> bool {
                    *self == <$ty as ::core::default::Default>::default()
                }

                fn to_property_string(&self) -> ::std::string::String {
                    if $crate::foundation::PropertyValue::is_empty_value(self) {
                        return ::std::string::String::new();
                    }
                    $crate::__private::serde_json::to_string(self).unwrap_or_default()
                }
            }
        )+
    };
}
