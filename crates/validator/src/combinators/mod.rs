//! Building blocks for declaring validation
//!
//! - **Rules**: [`SingleRule`] and [`RuleSet`] decorate closures with codes,
//!   messages and details
//! - **Properties**: [`PropertyRules`] validates one property extracted from
//!   the validated value
//! - **Collections**: [`PropertyRulesForSlice`] and [`PropertyRulesForMap`]
//!   add per-element rules
//! - **Conditions**: [`Predicate`] gates rules, [`CascadeMode`] controls
//!   whether a failing step stops the remaining ones

pub mod each;
pub mod field;
pub mod map;
pub mod rule;
pub(crate) mod steps;
pub mod when;

pub use each::{PropertyRulesForSlice, for_slice, slice_element_name};
pub use field::{PropertyRules, for_option, for_property, get_self, transform};
pub use map::{MapItem, MapLike, PropertyRulesForMap, for_map, map_element_name};
pub use rule::{RuleSet, SingleRule, new_rule_set, new_single_rule};
pub use when::{CascadeMode, Predicate};
