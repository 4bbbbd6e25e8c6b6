//! Error tree produced by validation.
//!
//! The tree has four levels:
//!
//! - [`RuleError`] - a single failed rule: message plus a chained error code
//! - [`PropertyError`] - every rule failure recorded for one property path
//! - [`PropertyErrors`] - the failures of many properties
//! - [`ValidatorError`] - the named top-level wrapper returned by
//!   [`Validator::validate`](crate::Validator::validate)
//!
//! Rules themselves fail with a [`RuleFailure`], which is reshaped into the
//! tree above as it bubbles up through property rules and nested validators.
//!
//! # Rendering
//!
//! The [`Display`](fmt::Display) output is stable and intended for golden
//! comparisons:
//!
//! ```text
//! Validation for Teacher has failed for the following properties:
//!   - 'name' with value 'Jake':
//!     - should be equal to 'Tom'
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::codes::{self, ERROR_CODE_SEPARATOR, ErrorCode};
use super::value::{PropertyValue, property_value_string};

/// Separator placed between property path segments.
pub const PROPERTY_NAME_SEPARATOR: &str = ".";

/// Marker that replaces a property value declared as hidden.
pub const HIDDEN_VALUE: &str = "[hidden]";

const LIST_POINT: &str = "- ";
const NESTED_INDENT: &str = "  ";

// ============================================================================
// RULE ERROR
// ============================================================================

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleError {
    /// Human-readable message.
    #[serde(rename = "error")]
    pub message: String,
    /// Colon-joined code chain, the outermost code first.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: ErrorCode,
}

impl RuleError {
    /// Creates a new rule error without a code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: ErrorCode::new(),
        }
    }

    /// The error reported for an empty property declared as required.
    pub fn required() -> Self {
        Self::new("property is required but was empty").with_code(codes::REQUIRED)
    }

    /// Prepends `code` onto the existing chain.
    ///
    /// ```rust
    /// use manifest_validator::RuleError;
    ///
    /// let err = RuleError::new("boom").with_code("inner").with_code("outer");
    /// assert_eq!(err.code, "outer:inner");
    /// ```
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: &str) -> Self {
        self.add_code(code);
        self
    }

    /// In-place variant of [`with_code`](Self::with_code).
    pub fn add_code(&mut self, code: &str) {
        self.code = concat_strings(code, &self.code, ERROR_CODE_SEPARATOR);
    }

    /// Appends free-form details to the message, separated with `"; "`.
    pub fn add_details(&mut self, details: &str) {
        self.message = add_details_to_message(&self.message, details);
    }

    /// Replaces every literal occurrence of `value` in the message.
    pub fn hide_value(&mut self, value: &str) {
        if !value.is_empty() {
            self.message = self.message.replace(value, HIDDEN_VALUE);
        }
    }

    /// Iterates over the individual codes of the chain.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.code
            .split(ERROR_CODE_SEPARATOR)
            .filter(|code| !code.is_empty())
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RuleError {}

impl From<&str> for RuleError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for RuleError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

// ============================================================================
// PROPERTY ERROR
// ============================================================================

/// Every rule failure recorded for a single property path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyError {
    /// Dotted path of the property, e.g. `spec.teachers[1].name`.
    pub property_name: String,
    /// Normalized string form of the offending value.
    pub property_value: String,
    /// Set when the error comes from map key validation; the value is then the key.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_key_error: bool,
    /// Set when the error comes from slice element validation.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_slice_element_error: bool,
    /// Failed rules.
    pub errors: Vec<RuleError>,
}

impl PropertyError {
    /// Creates a property error, rendering `value` into its normalized string form.
    pub fn new<V>(
        name: impl Into<String>,
        value: &V,
        errors: impl IntoIterator<Item = RuleError>,
    ) -> Self
    where
        V: PropertyValue + ?Sized,
    {
        Self::with_rendered_value(name, property_value_string(value), errors)
    }

    /// Creates a property error from an already rendered value.
    pub fn with_rendered_value(
        name: impl Into<String>,
        value: impl Into<String>,
        errors: impl IntoIterator<Item = RuleError>,
    ) -> Self {
        Self {
            property_name: name.into(),
            property_value: value.into(),
            is_key_error: false,
            is_slice_element_error: false,
            errors: errors.into_iter().collect(),
        }
    }

    /// Returns `true` if both errors describe the same property occurrence.
    ///
    /// Only the name, the value and the key/slice flags are compared.
    pub fn same_property(&self, other: &Self) -> bool {
        self.property_name == other.property_name
            && self.property_value == other.property_value
            && self.is_key_error == other.is_key_error
            && self.is_slice_element_error == other.is_slice_element_error
    }

    /// Prepends a path segment to the property name.
    ///
    /// Slice element errors whose name already starts with an index
    /// (`[0]`) are joined without a dot.
    #[must_use = "builder methods must be chained or built"]
    pub fn prepend_property_name(mut self, name: &str) -> Self {
        let sep = if self.is_slice_element_error && self.property_name.starts_with('[') {
            ""
        } else {
            PROPERTY_NAME_SEPARATOR
        };
        self.property_name = concat_strings(name, &self.property_name, sep);
        self
    }

    /// Replaces the value with [`HIDDEN_VALUE`] and scrubs it from every message.
    pub fn hide_value(&mut self) {
        if self.property_value.is_empty() {
            return;
        }
        let value = std::mem::replace(&mut self.property_value, HIDDEN_VALUE.to_owned());
        for err in &mut self.errors {
            err.hide_value(&value);
        }
    }

    /// Prepends `code` onto every contained rule error.
    pub fn add_code(&mut self, code: &str) {
        for err in &mut self.errors {
            err.add_code(code);
        }
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut indent = "";
        if !self.property_name.is_empty() {
            write!(f, "'{}'", self.property_name)?;
            if !self.property_value.is_empty() {
                if self.is_key_error {
                    write!(f, " with key '{}'", self.property_value)?;
                } else {
                    write!(f, " with value '{}'", self.property_value)?;
                }
            }
            f.write_str(":\n")?;
            indent = NESTED_INDENT;
        }
        join_errors(f, &self.errors, indent)
    }
}

impl std::error::Error for PropertyError {}

// ============================================================================
// PROPERTY ERRORS
// ============================================================================

/// Failures of many properties.
///
/// Returned by property rules; [`Validator`](crate::Validator) wraps it into a
/// [`ValidatorError`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyErrors(Vec<PropertyError>);

impl PropertyErrors {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Consumes the list, returning the inner vector.
    pub fn into_inner(self) -> Vec<PropertyError> {
        self.0
    }

    /// Merges entries describing the same property, concatenating their rule
    /// errors in original order. The first occurrence keeps its position.
    #[must_use = "aggregate returns the merged list"]
    pub fn aggregate(self) -> Self {
        let mut merged: Vec<PropertyError> = Vec::with_capacity(self.0.len());
        for err in self.0 {
            match merged.iter_mut().find(|existing| existing.same_property(&err)) {
                Some(existing) => existing.errors.extend(err.errors),
                None => merged.push(err),
            }
        }
        Self(merged)
    }

    /// Sorts by name, then value; key errors and slice element errors go first.
    ///
    /// Meaningful only after [`aggregate`](Self::aggregate).
    #[must_use = "sort returns the sorted list"]
    pub fn sort(mut self) -> Self {
        self.0.sort_by(|a, b| {
            a.property_name
                .cmp(&b.property_name)
                .then_with(|| a.property_value.cmp(&b.property_value))
                .then_with(|| b.is_key_error.cmp(&a.is_key_error))
                .then_with(|| b.is_slice_element_error.cmp(&a.is_slice_element_error))
        });
        self
    }

    /// Hides the value of every contained error.
    pub fn hide_value(&mut self) {
        for err in &mut self.0 {
            err.hide_value();
        }
    }

    /// Prepends a path segment to every contained error.
    #[must_use = "builder methods must be chained or built"]
    pub fn prepend_property_name(self, name: &str) -> Self {
        self.0
            .into_iter()
            .map(|err| err.prepend_property_name(name))
            .collect()
    }

    /// Converts the list into a `Result`: `Ok(())` when empty.
    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::ops::Deref for PropertyErrors {
    type Target = Vec<PropertyError>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for PropertyErrors {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<PropertyError>> for PropertyErrors {
    fn from(errors: Vec<PropertyError>) -> Self {
        Self(errors)
    }
}

impl From<PropertyError> for PropertyErrors {
    fn from(error: PropertyError) -> Self {
        Self(vec![error])
    }
}

impl FromIterator<PropertyError> for PropertyErrors {
    fn from_iter<I: IntoIterator<Item = PropertyError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<PropertyError> for PropertyErrors {
    fn extend<I: IntoIterator<Item = PropertyError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for PropertyErrors {
    type Item = PropertyError;
    type IntoIter = std::vec::IntoIter<PropertyError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyErrors {
    type Item = &'a PropertyError;
    type IntoIter = std::slice::Iter<'a, PropertyError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PropertyErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join_errors(f, &self.0, "")
    }
}

impl std::error::Error for PropertyErrors {}

// ============================================================================
// VALIDATOR ERROR
// ============================================================================

/// Top-level error returned by [`Validator::validate`](crate::Validator::validate).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorError {
    /// Display name of the validator, empty when unnamed.
    #[serde(default)]
    pub name: String,
    /// Failing properties.
    pub errors: PropertyErrors,
}

impl ValidatorError {
    /// Wraps property errors into an unnamed validator error.
    pub fn new(errors: PropertyErrors) -> Self {
        Self {
            name: String::new(),
            errors,
        }
    }

    /// Overrides the display name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl fmt::Display for ValidatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validation")?;
        if !self.name.is_empty() {
            write!(f, " for {}", self.name)?;
        }
        f.write_str(" has failed for the following properties:\n")?;
        join_errors(f, &self.errors, NESTED_INDENT)
    }
}

impl std::error::Error for ValidatorError {}

// ============================================================================
// RULE FAILURE
// ============================================================================

/// The error a [`Rule`](crate::foundation::Rule) fails with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleFailure {
    /// A plain rule violation.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// A violation scoped to a sub-path of the validated value.
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// Every failure reported by a [`RuleSet`](crate::RuleSet).
    #[error(transparent)]
    Set(#[from] RuleSetError),
}

impl RuleFailure {
    /// Wraps any displayable error into a plain rule violation.
    pub fn other(err: impl fmt::Display) -> Self {
        Self::Rule(RuleError::new(err.to_string()))
    }

    /// Applies an override message and details to every plain violation and
    /// prepends `code` onto every contained code chain.
    pub(crate) fn decorate(&mut self, message: Option<&str>, details: &str, code: &str) {
        match self {
            Self::Rule(err) => {
                if let Some(message) = message {
                    message.clone_into(&mut err.message);
                }
                err.add_details(details);
                err.add_code(code);
            }
            Self::Property(err) => err.add_code(code),
            Self::Set(set) => {
                for failure in &mut set.0 {
                    failure.decorate(message, details, code);
                }
            }
        }
    }
}

impl From<&str> for RuleFailure {
    fn from(message: &str) -> Self {
        Self::Rule(RuleError::new(message))
    }
}

impl From<String> for RuleFailure {
    fn from(message: String) -> Self {
        Self::Rule(RuleError::new(message))
    }
}

/// Container for the failures of a [`RuleSet`](crate::RuleSet).
///
/// Never nested: a set returned by a member of another set is flattened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSetError(Vec<RuleFailure>);

impl RuleSetError {
    pub(crate) fn push(&mut self, failure: RuleFailure) {
        match failure {
            RuleFailure::Set(set) => self.0.extend(set.0),
            other => self.0.push(other),
        }
    }

    /// Returns the contained failures.
    pub fn failures(&self) -> &[RuleFailure] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for RuleSetError {
    type Item = RuleFailure;
    type IntoIter = std::vec::IntoIter<RuleFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for RuleSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join_errors(f, &self.0, "")
    }
}

impl std::error::Error for RuleSetError {}

// ============================================================================
// ERROR CODE LOOKUP
// ============================================================================

/// Recursive search for an error code anywhere in an error tree.
pub trait HasErrorCode {
    /// Returns `true` if any code chain in the tree contains `code` as a segment.
    fn has_error_code(&self, code: &str) -> bool;
}

impl HasErrorCode for RuleError {
    fn has_error_code(&self, code: &str) -> bool {
        self.codes().any(|c| c == code)
    }
}

impl HasErrorCode for PropertyError {
    fn has_error_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.has_error_code(code))
    }
}

impl HasErrorCode for PropertyErrors {
    fn has_error_code(&self, code: &str) -> bool {
        self.0.iter().any(|e| e.has_error_code(code))
    }
}

impl HasErrorCode for ValidatorError {
    fn has_error_code(&self, code: &str) -> bool {
        self.errors.has_error_code(code)
    }
}

impl HasErrorCode for RuleSetError {
    fn has_error_code(&self, code: &str) -> bool {
        self.0.iter().any(|e| e.has_error_code(code))
    }
}

impl HasErrorCode for RuleFailure {
    fn has_error_code(&self, code: &str) -> bool {
        match self {
            Self::Rule(e) => e.has_error_code(code),
            Self::Property(e) => e.has_error_code(code),
            Self::Set(e) => e.has_error_code(code),
        }
    }
}

/// Checks a type-erased error for `code`.
///
/// Errors that are not part of this crate's error tree never match.
pub fn has_error_code(err: &(dyn std::error::Error + 'static), code: &str) -> bool {
    if let Some(e) = err.downcast_ref::<ValidatorError>() {
        e.has_error_code(code)
    } else if let Some(e) = err.downcast_ref::<PropertyErrors>() {
        e.has_error_code(code)
    } else if let Some(e) = err.downcast_ref::<PropertyError>() {
        e.has_error_code(code)
    } else if let Some(e) = err.downcast_ref::<RuleError>() {
        e.has_error_code(code)
    } else if let Some(e) = err.downcast_ref::<RuleFailure>() {
        e.has_error_code(code)
    } else if let Some(e) = err.downcast_ref::<RuleSetError>() {
        e.has_error_code(code)
    } else {
        false
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Writes `errors` as a bullet list, one entry per line.
///
/// Every line of a multi-line message is indented with `indent`; a message
/// already starting with `"- "` is not bulleted twice.
pub fn join_errors<W, T>(w: &mut W, errors: &[T], indent: &str) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    T: fmt::Display,
{
    let line_break = format!("\n{indent}");
    for (i, err) in errors.iter().enumerate() {
        let message = err.to_string();
        w.write_str(indent)?;
        if !message.starts_with(LIST_POINT) {
            w.write_str(LIST_POINT)?;
        }
        w.write_str(&message.replace('\n', &line_break))?;
        if i + 1 < errors.len() {
            w.write_char('\n')?;
        }
    }
    Ok(())
}

pub(crate) fn concat_strings(pre: &str, post: &str, sep: &str) -> String {
    match (pre.is_empty(), post.is_empty()) {
        (true, _) => post.to_owned(),
        (false, true) => pre.to_owned(),
        (false, false) => format!("{pre}{sep}{post}"),
    }
}

pub(crate) fn add_details_to_message(message: &str, details: &str) -> String {
    if details.is_empty() {
        message.to_owned()
    } else if message.is_empty() {
        details.to_owned()
    } else {
        format!("{message}; {details}")
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_code_prepends() {
        let err = RuleError::new("msg")
            .with_code("code")
            .with_code("another")
            .with_code("last");
        assert_eq!(err.code, "last:another:code");
    }

    #[test]
    fn test_add_empty_code_is_noop() {
        let err = RuleError::new("msg").with_code("a").with_code("");
        assert_eq!(err.code, "a");
    }

    #[test]
    fn test_details_separator() {
        assert_eq!(add_details_to_message("msg", "details"), "msg; details");
        assert_eq!(add_details_to_message("", "details"), "details");
        assert_eq!(add_details_to_message("msg", ""), "msg");
    }

    #[test]
    fn test_property_error_display_with_value() {
        let err = PropertyError::new(
            "name",
            "Jake",
            [RuleError::new("should be equal to 'Tom'")],
        );
        assert_eq!(
            err.to_string(),
            "'name' with value 'Jake':\n  - should be equal to 'Tom'"
        );
    }

    #[test]
    fn test_property_error_display_key_error() {
        let mut err = PropertyError::new("labels.k", "k", [RuleError::new("bad key")]);
        err.is_key_error = true;
        assert_eq!(err.to_string(), "'labels.k' with key 'k':\n  - bad key");
    }

    #[test]
    fn test_property_error_display_without_name() {
        let err = PropertyError::new("", "", [RuleError::new("a"), RuleError::new("b")]);
        assert_eq!(err.to_string(), "- a\n- b");
    }

    #[test]
    fn test_validator_error_display() {
        let err = ValidatorError::new(
            vec![PropertyError::new("name", "Jake", [RuleError::new("oops")])].into(),
        )
        .with_name("Teacher");
        assert_eq!(
            err.to_string(),
            "Validation for Teacher has failed for the following properties:\n  - 'name' with value 'Jake':\n    - oops"
        );
    }

    #[test]
    fn test_multiline_message_is_indented() {
        let err = PropertyError::new("p", "", [RuleError::new("line1\nline2")]);
        assert_eq!(err.to_string(), "'p':\n  - line1\n  line2");
    }

    #[test]
    fn test_prepend_property_name() {
        let err = PropertyError::new("name", "", [RuleError::new("x")]);
        assert_eq!(err.prepend_property_name("teacher").property_name, "teacher.name");

        let err = PropertyError::new("", "", [RuleError::new("x")]);
        assert_eq!(err.prepend_property_name("teacher").property_name, "teacher");

        let mut err = PropertyError::new("[0]", "", [RuleError::new("x")]);
        err.is_slice_element_error = true;
        assert_eq!(err.prepend_property_name("list").property_name, "list[0]");

        let err = PropertyError::new("[0]", "", [RuleError::new("x")]);
        assert_eq!(err.prepend_property_name("list").property_name, "list.[0]");
    }

    #[test]
    fn test_hide_value() {
        let mut err = PropertyError::new(
            "secret",
            "hunter2",
            [RuleError::new("'hunter2' is too weak")],
        );
        err.hide_value();
        assert_eq!(err.property_value, HIDDEN_VALUE);
        assert_eq!(err.errors[0].message, "'[hidden]' is too weak");
    }

    #[test]
    fn test_hide_empty_value_keeps_message() {
        let mut err = PropertyError::new("secret", "", [RuleError::new("abc")]);
        err.hide_value();
        assert_eq!(err.property_value, "");
        assert_eq!(err.errors[0].message, "abc");
    }

    #[test]
    fn test_aggregate_merges_same_property() {
        let errors = PropertyErrors::from(vec![
            PropertyError::new("a", "1", [RuleError::new("x")]),
            PropertyError::new("b", "1", [RuleError::new("y")]),
            PropertyError::new("a", "1", [RuleError::new("z")]),
        ])
        .aggregate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].property_name, "a");
        assert_eq!(
            errors[0].errors,
            vec![RuleError::new("x"), RuleError::new("z")]
        );
    }

    #[test]
    fn test_aggregate_respects_flags() {
        let mut key = PropertyError::new("m.k", "k", [RuleError::new("x")]);
        key.is_key_error = true;
        let value = PropertyError::new("m.k", "k", [RuleError::new("y")]);
        let errors = PropertyErrors::from(vec![key, value]).aggregate();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_sort_puts_key_errors_first() {
        let mut key = PropertyError::new("m.k", "k", [RuleError::new("x")]);
        key.is_key_error = true;
        let value = PropertyError::new("m.k", "k", [RuleError::new("y")]);
        let errors = PropertyErrors::from(vec![value, key]).sort();
        assert!(errors[0].is_key_error);
    }

    #[test]
    fn test_has_error_code() {
        let err = ValidatorError::new(
            vec![PropertyError::new(
                "a",
                "",
                [RuleError::new("x").with_code("inner").with_code("outer")],
            )]
            .into(),
        );
        assert!(err.has_error_code("inner"));
        assert!(err.has_error_code("outer"));
        assert!(!err.has_error_code("out"));
        assert!(has_error_code(&err, "inner"));

        let io = std::io::Error::other("inner");
        assert!(!has_error_code(&io, "inner"));
    }

    #[test]
    fn test_rule_set_error_flattens() {
        let mut inner = RuleSetError::default();
        inner.push(RuleError::new("a").into());
        let mut outer = RuleSetError::default();
        outer.push(RuleFailure::Set(inner));
        outer.push(RuleError::new("b").into());
        assert_eq!(outer.failures().len(), 2);
        assert_eq!(outer.to_string(), "- a\n- b");
    }

    #[test]
    fn test_serialize_wire_shape() {
        let mut err = PropertyError::new("a", "1", [RuleError::new("x").with_code("c")]);
        err.is_slice_element_error = true;
        let json = serde_json::to_value(ValidatorError::new(err.into()).with_name("V")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "V",
                "errors": [{
                    "propertyName": "a",
                    "propertyValue": "1",
                    "isSliceElementError": true,
                    "errors": [{ "error": "x", "code": "c" }]
                }]
            })
        );
    }
}
