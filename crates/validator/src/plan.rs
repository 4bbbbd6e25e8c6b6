//! Validation plans.
//!
//! A plan describes the rules declared on a [`Validator`] without running
//! them. It is meant for documentation generators:
//!
//! ```rust
//! use manifest_validator::prelude::*;
//!
//! struct Teacher {
//!     name: String,
//! }
//!
//! let v = validator![
//!     for_property(|t: &Teacher| t.name.clone())
//!         .with_name("name")
//!         .rules(string_length(1, 63)),
//! ];
//! let plans = plan(&v);
//! assert_eq!(plans[0].path, "$.name");
//! assert_eq!(plans[0].rules[0].error_code, "string_length");
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::Validator;
use crate::foundation::codes::{ERROR_CODE_SEPARATOR, ErrorCode};
use crate::foundation::concat_strings;

/// Plan of a single property path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPlan {
    /// JSON-path-like location, e.g. `$.teachers[*].name` or `$.labels.*`.
    pub path: String,
    /// Short Rust type name of the property.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "is_false")]
    pub is_optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_hidden: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RulePlan>,
}

/// Plan of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulePlan {
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error_code: ErrorCode,
    /// Descriptions of the predicates gating the rule.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
}

impl RulePlan {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Prepends `code` onto the plan's code chain.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error_code(mut self, code: &str) -> Self {
        self.error_code = concat_strings(code, &self.error_code, ERROR_CODE_SEPARATOR);
        self
    }
}

/// Creates the plan of `validator`, one entry per property path that
/// declares at least one rule. Entries are sorted by path.
pub fn plan<S>(validator: &Validator<S>) -> Vec<PropertyPlan> {
    let mut sink = Vec::new();
    validator.plan_into(&PlanBuilder::root(), &mut sink);

    let mut properties: BTreeMap<String, PropertyPlan> = BTreeMap::new();
    for PlanEntry { property, rule } in sink {
        properties
            .entry(property.path.clone())
            .or_insert(property)
            .rules
            .push(rule);
    }
    properties.into_values().collect()
}

// ============================================================================
// BUILDER
// ============================================================================

/// Traversal state passed down while planning.
#[derive(Debug, Clone, Default)]
pub struct PlanBuilder {
    conditions: Vec<String>,
    property: PropertyPlan,
}

/// A rule found during traversal, together with its property.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    property: PropertyPlan,
    rule: RulePlan,
}

impl PlanBuilder {
    pub(crate) fn root() -> Self {
        Self {
            conditions: Vec::new(),
            property: PropertyPlan {
                path: "$".to_owned(),
                ..PropertyPlan::default()
            },
        }
    }

    /// Descends into `segment`. Index segments (`[*]`) attach without a dot.
    pub(crate) fn append_path(&self, segment: &str) -> Self {
        let mut next = self.clone();
        if !segment.is_empty() {
            if !segment.starts_with('[') {
                next.property.path.push('.');
            }
            next.property.path.push_str(segment);
        }
        next
    }

    pub(crate) fn with_conditions<I>(&self, conditions: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut next = self.clone();
        next.conditions.extend(conditions);
        next
    }

    /// Describes the property at the current path.
    pub(crate) fn with_property(
        &self,
        type_name: String,
        examples: &[String],
        is_optional: bool,
        is_hidden: bool,
    ) -> Self {
        let mut next = self.clone();
        next.property.type_name = type_name;
        next.property.examples = examples.to_vec();
        next.property.is_optional = is_optional;
        next.property.is_hidden = is_hidden;
        next
    }

    pub(crate) fn push_rules(&self, rules: Vec<RulePlan>, sink: &mut Vec<PlanEntry>) {
        for mut rule in rules {
            let mut conditions = self.conditions.clone();
            conditions.append(&mut rule.conditions);
            rule.conditions = conditions;
            sink.push(PlanEntry {
                property: self.property.clone(),
                rule,
            });
        }
    }
}

/// Short type name of `T`, with module paths stripped.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub(crate) fn type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut token = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            token.push(c);
        } else {
            out.push_str(last_segment(&token));
            token.clear();
            out.push(c);
        }
    }
    out.push_str(last_segment(&token));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
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
    fn test_type_name_strips_paths() {
        assert_eq!(type_name::<String>(), "String");
        assert_eq!(type_name::<Vec<String>>(), "Vec<String>");
        assert_eq!(type_name::<Option<i32>>(), "Option<i32>");
        assert_eq!(
            type_name::<std::collections::HashMap<String, u8>>(),
            "HashMap<String, u8>"
        );
    }

    #[test]
    fn test_append_path() {
        let root = PlanBuilder::root();
        assert_eq!(root.append_path("a").property.path, "$.a");
        assert_eq!(root.append_path("a").append_path("[*]").property.path, "$.a[*]");
        assert_eq!(root.append_path("").property.path, "$");
    }

    #[test]
    fn test_rule_plan_code_chain() {
        let plan = RulePlan::new("d").with_error_code("inner").with_error_code("outer");
        assert_eq!(plan.error_code, "outer:inner");
    }

    #[test]
    fn test_conditions_are_prefixed() {
        let builder = PlanBuilder::root().with_conditions(["outer".to_owned()]);
        let mut rule = RulePlan::new("r");
        rule.conditions.push("inner".to_owned());
        let mut sink = Vec::new();
        builder.push_rules(vec![rule], &mut sink);
        assert_eq!(sink[0].rule.conditions, vec!["outer", "inner"]);
    }
}
