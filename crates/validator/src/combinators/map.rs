//! MAP rules - validates a map property, its keys, values and entries
//!
//! [`PropertyRulesForMap`] keeps four independent step lists: rules for the
//! whole map, for every key, for every value and for every [`MapItem`]
//! (key and value together). Entry errors are named `<name>.<key>`.
//!
//! The result is aggregated and sorted, so it does not depend on the
//! iteration order of the map type.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use crate::Validator;
use crate::combinators::steps::{Step, Steps};
use crate::combinators::when::{CascadeMode, Predicate, Predicates};
use crate::foundation::{
    PropertyError, PropertyErrors, PropertyValidator, PropertyValue, Rule, RuleError,
    property_value_string,
};
use crate::plan::{self, PlanBuilder, PlanEntry};

// ============================================================================
// MAP ABSTRACTION
// ============================================================================

/// A key-value collection that can be validated by [`PropertyRulesForMap`].
pub trait MapLike {
    type Key;
    type Value;

    /// Borrowed entries, in the map's own iteration order.
    fn entries(&self) -> Vec<(&Self::Key, &Self::Value)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, H: BuildHasher> MapLike for HashMap<K, V, H> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl<K, V> MapLike for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    fn len(&self) -> usize {
        self.len()
    }
}

/// A single map entry, validated by item rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MapItem<K, V> {
    pub key: K,
    pub value: V,
}

impl<K: Serialize, V: Serialize> PropertyValue for MapItem<K, V> {
    fn is_empty_value(&self) -> bool {
        false
    }

    fn to_property_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Name of the entry `key` of the map `map_name`.
///
/// ```rust
/// use manifest_validator::map_element_name;
///
/// assert_eq!(map_element_name("labels", &"team"), "labels.team");
/// assert_eq!(map_element_name("", &"team"), "team");
/// ```
pub fn map_element_name<K: fmt::Display + ?Sized>(map_name: &str, key: &K) -> String {
    if map_name.is_empty() {
        key.to_string()
    } else {
        format!("{map_name}.{key}")
    }
}

// ============================================================================
// PROPERTY RULES FOR MAP
// ============================================================================

type MapGetter<M, S> = Arc<dyn Fn(&S) -> M + Send + Sync>;

/// Rules for a map property of `S`.
pub struct PropertyRulesForMap<M: MapLike, S> {
    name: String,
    getter: MapGetter<M, S>,
    map_steps: Steps<M>,
    key_steps: Steps<M::Key>,
    value_steps: Steps<M::Value>,
    item_steps: Steps<MapItem<M::Key, M::Value>>,
    required: bool,
    omit_empty: bool,
    mode: CascadeMode,
    examples: Vec<String>,
    predicates: Predicates<S>,
}

/// Creates [`PropertyRulesForMap`] for the map returned by `getter`.
pub fn for_map<M, S, F>(getter: F) -> PropertyRulesForMap<M, S>
where
    M: MapLike + PropertyValue + 'static,
    M::Key: PropertyValue + fmt::Display + Clone + 'static,
    M::Value: PropertyValue + Clone + 'static,
    S: 'static,
    F: Fn(&S) -> M + Send + Sync + 'static,
{
    PropertyRulesForMap::new(getter)
}

impl<M, S> PropertyRulesForMap<M, S>
where
    M: MapLike + PropertyValue + 'static,
    M::Key: PropertyValue + fmt::Display + Clone + 'static,
    M::Value: PropertyValue + Clone + 'static,
    S: 'static,
{
    pub fn new<F>(getter: F) -> Self
    where
        F: Fn(&S) -> M + Send + Sync + 'static,
    {
        Self {
            name: String::new(),
            getter: Arc::new(getter),
            map_steps: Steps::default(),
            key_steps: Steps::default(),
            value_steps: Steps::default(),
            item_steps: Steps::default(),
            required: false,
            omit_empty: false,
            mode: CascadeMode::default(),
            examples: Vec::new(),
            predicates: Predicates::default(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_examples<I, E>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.examples.extend(examples.into_iter().map(Into::into));
        self
    }

    /// Appends a rule for the whole map.
    #[must_use = "builder methods must be chained or built"]
    pub fn rules<R>(mut self, rule: R) -> Self
    where
        R: Rule<M> + 'static,
    {
        self.map_steps.push(Step::Rule(Arc::new(rule)));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn rules_for_keys<R>(mut self, rule: R) -> Self
    where
        R: Rule<M::Key> + 'static,
    {
        self.key_steps.push(Step::Rule(Arc::new(rule)));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn rules_for_values<R>(mut self, rule: R) -> Self
    where
        R: Rule<M::Value> + 'static,
    {
        self.value_steps.push(Step::Rule(Arc::new(rule)));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn rules_for_items<R>(mut self, rule: R) -> Self
    where
        R: Rule<MapItem<M::Key, M::Value>> + 'static,
    {
        self.item_steps.push(Step::Rule(Arc::new(rule)));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn include_for_keys(mut self, validator: Validator<M::Key>) -> Self {
        self.key_steps.push(Step::Validator(validator));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn include_for_values(mut self, validator: Validator<M::Value>) -> Self {
        self.value_steps.push(Step::Validator(validator));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn include_for_items(mut self, validator: Validator<MapItem<M::Key, M::Value>>) -> Self {
        self.item_steps.push(Step::Validator(validator));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn stop_on_error(mut self) -> Self {
        self.map_steps.push(Step::StopOnError);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn stop_on_error_for_keys(mut self) -> Self {
        self.key_steps.push(Step::StopOnError);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn stop_on_error_for_values(mut self) -> Self {
        self.value_steps.push(Step::StopOnError);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn stop_on_error_for_items(mut self) -> Self {
        self.item_steps.push(Step::StopOnError);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.when_predicate(Predicate::new(predicate))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn when_described<F>(self, predicate: F, description: impl Into<String>) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.when_predicate(Predicate::new(predicate).with_description(description))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn when_predicate(mut self, predicate: Predicate<S>) -> Self {
        self.predicates.push(predicate);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    /// Applies `mode` to every step list. With [`CascadeMode::Stop`] entry
    /// rules are skipped when whole-map rules failed, and each key, value or
    /// item stops at its own first failing step.
    #[must_use = "builder methods must be chained or built"]
    pub fn cascade(mut self, mode: CascadeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validate(&self, owner: &S) -> Result<(), PropertyErrors> {
        if !self.predicates.matches(owner) {
            trace!(property = %self.name, "predicates not met, skipping map");
            return Ok(());
        }
        let map = (self.getter)(owner);
        if map.is_empty_value() {
            if self.required {
                return Err(PropertyError::with_rendered_value(
                    &self.name,
                    "",
                    [RuleError::required()],
                )
                .into());
            }
            if self.omit_empty {
                return Ok(());
            }
        }

        let mut errors: PropertyErrors = self
            .map_steps
            .walk(&map, self.mode)
            .into_errors(&self.name, property_value_string(&map), |_| {})
            .into();
        if !errors.is_empty() && self.mode == CascadeMode::Stop {
            return Err(errors.aggregate().sort());
        }

        let entries = map.entries();
        if !self.key_steps.is_empty() {
            let outcomes = self.key_steps.walk_each(entries.iter().map(|(k, _)| *k), self.mode);
            for (outcome, (key, _)) in outcomes.into_iter().zip(&entries) {
                if outcome.is_empty() {
                    continue;
                }
                errors.extend(outcome.into_errors(
                    &map_element_name(&self.name, *key),
                    property_value_string(*key),
                    |e| e.is_key_error = true,
                ));
            }
        }
        if !self.value_steps.is_empty() {
            let outcomes = self.value_steps.walk_each(entries.iter().map(|(_, v)| *v), self.mode);
            for (outcome, (key, value)) in outcomes.into_iter().zip(&entries) {
                if outcome.is_empty() {
                    continue;
                }
                errors.extend(outcome.into_errors(
                    &map_element_name(&self.name, *key),
                    property_value_string(*value),
                    |_| {},
                ));
            }
        }
        if !self.item_steps.is_empty() {
            let items: Vec<MapItem<M::Key, M::Value>> = entries
                .iter()
                .map(|(key, value)| MapItem {
                    key: (*key).clone(),
                    value: (*value).clone(),
                })
                .collect();
            let outcomes = self.item_steps.walk_each(items.iter(), self.mode);
            for (outcome, (key, value)) in outcomes.into_iter().zip(&entries) {
                if outcome.is_empty() {
                    continue;
                }
                let value = property_value_string(*value);
                errors.extend(outcome.into_errors(
                    &map_element_name(&self.name, *key),
                    value.clone(),
                    |e| e.property_value.clone_from(&value),
                ));
            }
        }
        errors.aggregate().sort().into_result()
    }

    pub(crate) fn plan_into(&self, builder: &PlanBuilder, sink: &mut Vec<PlanEntry>) {
        let builder = builder
            .with_conditions(self.predicates.descriptions())
            .append_path(&self.name);
        self.map_steps.plan(
            &builder.with_property(
                plan::type_name::<M>(),
                &self.examples,
                !self.required && self.omit_empty,
                false,
            ),
            sink,
        );
        let entry = builder.append_path("*");
        self.key_steps.plan(
            &entry.with_property(plan::type_name::<M::Key>(), &[], false, false),
            sink,
        );
        self.value_steps.plan(
            &entry.with_property(plan::type_name::<M::Value>(), &[], false, false),
            sink,
        );
        self.item_steps.plan(
            &entry.with_property(
                plan::type_name::<MapItem<M::Key, M::Value>>(),
                &[],
                false,
                false,
            ),
            sink,
        );
    }
}

impl<M, S> PropertyValidator<S> for PropertyRulesForMap<M, S>
where
    M: MapLike + PropertyValue + 'static,
    M::Key: PropertyValue + fmt::Display + Clone + 'static,
    M::Value: PropertyValue + Clone + 'static,
    S: 'static,
{
    fn validate(&self, owner: &S) -> Result<(), PropertyErrors> {
        Self::validate(self, owner)
    }

    fn plan(&self, builder: &PlanBuilder, sink: &mut Vec<PlanEntry>) {
        self.plan_into(builder, sink);
    }
}

impl<M: MapLike, S> Clone for PropertyRulesForMap<M, S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            getter: Arc::clone(&self.getter),
            map_steps: self.map_steps.clone(),
            key_steps: self.key_steps.clone(),
            value_steps: self.value_steps.clone(),
            item_steps: self.item_steps.clone(),
            required: self.required,
            omit_empty: self.omit_empty,
            mode: self.mode,
            examples: self.examples.clone(),
            predicates: self.predicates.clone(),
        }
    }
}

impl<M: MapLike, S> fmt::Debug for PropertyRulesForMap<M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRulesForMap")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("omit_empty", &self.omit_empty)
            .field("mode", &self.mode)
            .field("predicates", &self.predicates)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_single_rule;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Default)]
    struct Service {
        labels: HashMap<String, String>,
    }

    fn service(labels: &[(&str, &str)]) -> Service {
        Service {
            labels: labels
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }

    fn lowercase() -> impl Rule<String> {
        new_single_rule(|v: &String| {
            if v.chars().all(|c| !c.is_uppercase()) {
                Ok(())
            } else {
                Err("must be lowercase")
            }
        })
    }

    fn labels(s: &Service) -> HashMap<String, String> {
        s.labels.clone()
    }

    #[test]
    fn test_key_errors_report_key() {
        let rules = for_map(labels).with_name("labels").rules_for_keys(lowercase());
        let errors = rules
            .validate(&service(&[("Team", "a"), ("env", "b")]))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property_name, "labels.Team");
        assert_eq!(errors[0].property_value, "Team");
        assert!(errors[0].is_key_error);
    }

    #[test]
    fn test_value_errors_report_value() {
        let rules = for_map(labels).with_name("labels").rules_for_values(lowercase());
        let errors = rules.validate(&service(&[("team", "A")])).unwrap_err();
        assert_eq!(errors[0].property_name, "labels.team");
        assert_eq!(errors[0].property_value, "A");
        assert!(!errors[0].is_key_error);
    }

    #[test]
    fn test_item_rules_see_key_and_value() {
        let rules = for_map(labels)
            .with_name("labels")
            .rules_for_items(new_single_rule(|item: &MapItem<String, String>| {
                if item.key == item.value {
                    Err("key must not equal value")
                } else {
                    Ok(())
                }
            }));
        let errors = rules
            .validate(&service(&[("a", "a"), ("b", "c")]))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property_name, "labels.a");
        assert_eq!(errors[0].property_value, "a");
    }

    #[test]
    fn test_key_and_value_errors_for_same_entry_are_sorted() {
        let rules = for_map(labels)
            .with_name("labels")
            .rules_for_values(lowercase())
            .rules_for_keys(lowercase());
        let errors = rules
            .validate(&service(&[("K", "K"), ("B", "x")]))
            .unwrap_err();
        let summary: Vec<_> = errors
            .iter()
            .map(|e| (e.property_name.as_str(), e.is_key_error))
            .collect();
        assert_eq!(
            summary,
            vec![("labels.B", true), ("labels.K", true), ("labels.K", false)]
        );
    }

    #[test]
    fn test_map_rules_and_unnamed_map() {
        let rules = for_map(labels)
            .rules(new_single_rule(|m: &HashMap<String, String>| {
                if m.len() > 1 { Err("too many labels") } else { Ok(()) }
            }))
            .rules_for_keys(lowercase());
        let errors = rules
            .validate(&service(&[("A", "1"), ("b", "2")]))
            .unwrap_err();
        let names: Vec<_> = errors.iter().map(|e| e.property_name.as_str()).collect();
        assert_eq!(names, vec!["", "A"]);
        assert_eq!(errors[0].property_value, r#"{"A":"1","b":"2"}"#);
    }

    #[test]
    fn test_cascade_stop_is_applied_per_entry() {
        let short = || {
            new_single_rule(|v: &String| {
                if v.chars().count() <= 3 { Ok(()) } else { Err("too long") }
            })
        };
        let rules = for_map(labels)
            .with_name("labels")
            .cascade(CascadeMode::Stop)
            .rules_for_keys(lowercase())
            .rules_for_keys(short())
            .rules_for_values(lowercase())
            .rules_for_values(short());
        let errors = rules
            .validate(&service(&[("Team", "OK"), ("zone", "eu-west")]))
            .unwrap_err();
        let summary: Vec<_> = errors
            .iter()
            .map(|e| {
                (
                    e.property_name.as_str(),
                    e.is_key_error,
                    e.errors.iter().map(|r| r.message.as_str()).collect::<Vec<_>>(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("labels.Team", false, vec!["must be lowercase"]),
                ("labels.Team", true, vec!["must be lowercase"]),
                ("labels.zone", false, vec!["too long"]),
                ("labels.zone", true, vec!["too long"]),
            ]
        );
    }

    #[test]
    fn test_cascade_stop_skips_entries_after_map_rule_failure() {
        let rules = for_map(labels)
            .with_name("labels")
            .cascade(CascadeMode::Stop)
            .rules(new_single_rule(|m: &HashMap<String, String>| {
                if m.len() > 1 { Err("too many labels") } else { Ok(()) }
            }))
            .rules_for_keys(lowercase());
        let errors = rules
            .validate(&service(&[("A", "1"), ("B", "2")]))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property_name, "labels");
    }

    #[test]
    fn test_btree_map() {
        let rules = for_map(|m: &BTreeMap<String, u32>| m.clone())
            .rules_for_values(new_single_rule(|v: &u32| {
                if *v < 10 { Ok(()) } else { Err("too big") }
            }));
        let map = BTreeMap::from([("a".to_owned(), 1), ("b".to_owned(), 11)]);
        let errors = rules.validate(&map).unwrap_err();
        assert_eq!(errors[0].property_name, "b");
        assert_eq!(errors[0].property_value, "11");
    }

    #[test]
    fn test_required_empty_map() {
        let rules = for_map(labels).with_name("labels").required();
        let errors = rules.validate(&Service::default()).unwrap_err();
        assert_eq!(errors[0].errors[0], RuleError::required());
    }
}
