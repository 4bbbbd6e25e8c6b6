//! Comparison validators
//!
//! Rules comparing a value against a fixed operand. Failures read
//! `should be <operator> '<operand>'`.

use std::cmp::Ordering;
use std::fmt::{self, Display};

use crate::SingleRule;
use crate::foundation::codes;
use crate::new_single_rule;

// ============================================================================
// OPERATORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
}

impl Operator {
    fn accepts(self, ordering: Option<Ordering>) -> bool {
        match (self, ordering) {
            (_, None) => false,
            (Self::EqualTo, Some(o)) => o.is_eq(),
            (Self::NotEqualTo, Some(o)) => o.is_ne(),
            (Self::GreaterThan, Some(o)) => o.is_gt(),
            (Self::GreaterThanOrEqualTo, Some(o)) => o.is_ge(),
            (Self::LessThan, Some(o)) => o.is_lt(),
            (Self::LessThanOrEqualTo, Some(o)) => o.is_le(),
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::EqualTo => codes::EQUAL_TO,
            Self::NotEqualTo => codes::NOT_EQUAL_TO,
            Self::GreaterThan => codes::GREATER_THAN,
            Self::GreaterThanOrEqualTo => codes::GREATER_THAN_OR_EQUAL_TO,
            Self::LessThan => codes::LESS_THAN,
            Self::LessThanOrEqualTo => codes::LESS_THAN_OR_EQUAL_TO,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EqualTo => "equal to",
            Self::NotEqualTo => "not equal to",
            Self::GreaterThan => "greater than",
            Self::GreaterThanOrEqualTo => "greater than or equal to",
            Self::LessThan => "less than",
            Self::LessThanOrEqualTo => "less than or equal to",
        })
    }
}

fn comparison_message(op: Operator, compared: &impl Display) -> String {
    format!("should be {op} '{compared}'")
}

fn ordered_rule<T>(op: Operator, compared: T) -> SingleRule<T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    let description = comparison_message(op, &compared);
    new_single_rule(move |v: &T| {
        if op.accepts(v.partial_cmp(&compared)) {
            Ok(())
        } else {
            Err(comparison_message(op, &compared))
        }
    })
    .with_error_code(op.code())
    .with_description(description)
}

// ============================================================================
// EQUALITY
// ============================================================================

/// Passes when the value equals `compared`.
pub fn equal_to<T>(compared: T) -> SingleRule<T>
where
    T: PartialEq + Display + Send + Sync + 'static,
{
    let description = comparison_message(Operator::EqualTo, &compared);
    new_single_rule(move |v: &T| {
        if *v == compared {
            Ok(())
        } else {
            Err(comparison_message(Operator::EqualTo, &compared))
        }
    })
    .with_error_code(codes::EQUAL_TO)
    .with_description(description)
}

/// Passes when the value differs from `compared`.
pub fn not_equal_to<T>(compared: T) -> SingleRule<T>
where
    T: PartialEq + Display + Send + Sync + 'static,
{
    let description = comparison_message(Operator::NotEqualTo, &compared);
    new_single_rule(move |v: &T| {
        if *v != compared {
            Ok(())
        } else {
            Err(comparison_message(Operator::NotEqualTo, &compared))
        }
    })
    .with_error_code(codes::NOT_EQUAL_TO)
    .with_description(description)
}

// ============================================================================
// ORDERING
// ============================================================================

/// Passes when the value is strictly greater than `n`.
///
/// Incomparable values (`NaN`) never pass.
pub fn greater_than<T>(n: T) -> SingleRule<T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    ordered_rule(Operator::GreaterThan, n)
}

pub fn greater_than_or_equal_to<T>(n: T) -> SingleRule<T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    ordered_rule(Operator::GreaterThanOrEqualTo, n)
}

/// Passes when the value is strictly less than `n`.
pub fn less_than<T>(n: T) -> SingleRule<T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    ordered_rule(Operator::LessThan, n)
}

pub fn less_than_or_equal_to<T>(n: T) -> SingleRule<T>
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    ordered_rule(Operator::LessThanOrEqualTo, n)
}
