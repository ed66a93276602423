//! Leaf comparison engine.
//!
//! Applies one operator to one cell and one needle. The engine is total: any
//! combination it cannot evaluate (missing cell, unknown operator, needle the
//! operator does not take, cell that cannot be read as a date) is `false`.

use crate::access::{Value, ValueKind};
use crate::expression::needle::Needle;
use crate::expression::operator::{ComparisonOperator, Operator};
use std::cmp::Ordering;

/// How operand kinds are reconciled before an operator is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonMode {
    /// Mixed kinds are converted the loose way (`"3" == 3`, `"" < 1`)
    #[default]
    Coercive,
    /// A cell only matches a needle of its own kind; pattern needles match
    /// any cell and set needles match none
    Strict,
}

impl ComparisonMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ComparisonMode::Strict
        } else {
            ComparisonMode::Coercive
        }
    }

    pub fn is_strict(&self) -> bool {
        *self == ComparisonMode::Strict
    }
}

/// Evaluate a leaf comparison against one cell.
///
/// `field` is `None` when the column could not be resolved or the row is too
/// short to hold it.
pub fn matches(
    operator: &Operator,
    field: Option<&Value>,
    needle: &Needle,
    mode: ComparisonMode,
) -> bool {
    let Some(field) = field else {
        return false;
    };

    let converted;
    let field = match needle {
        Needle::Temporal(None) => return false,
        Needle::Temporal(Some(_)) => {
            if field.is_empty() {
                return false;
            }
            match field.to_date() {
                Some(date) => {
                    converted = Value::Date(date);
                    &converted
                }
                None => return false,
            }
        }
        _ => field,
    };

    if mode.is_strict() && !needle.admits_strict(field.kind()) {
        return false;
    }

    match operator {
        Operator::Known(op) => apply(*op, field, needle),
        Operator::Unsupported(_) => false,
    }
}

fn apply(op: ComparisonOperator, field: &Value, needle: &Needle) -> bool {
    match (op, needle) {
        (ComparisonOperator::Matches, Needle::Pattern(re)) => re.is_match(&field.to_text()),
        (ComparisonOperator::MemberOf, Needle::Set(items)) => {
            items.iter().any(|item| same_value_zero(field, item))
        }
        (_, Needle::Scalar(value)) => compare(op, field, value),
        (_, Needle::Temporal(Some(date))) => compare(op, field, &Value::Date(*date)),
        _ => false,
    }
}

fn compare(op: ComparisonOperator, field: &Value, needle: &Value) -> bool {
    match op {
        ComparisonOperator::EqualsLoose => loose_eq(field, needle),
        ComparisonOperator::NotEqualsLoose => !loose_eq(field, needle),
        ComparisonOperator::EqualsStrict => strict_eq(field, needle),
        ComparisonOperator::NotEqualsStrict => !strict_eq(field, needle),
        ComparisonOperator::LessThan => loose_cmp(field, needle) == Some(Ordering::Less),
        ComparisonOperator::LessOrEqual => matches!(
            loose_cmp(field, needle),
            Some(Ordering::Less | Ordering::Equal)
        ),
        ComparisonOperator::GreaterThan => loose_cmp(field, needle) == Some(Ordering::Greater),
        ComparisonOperator::GreaterOrEqual => matches!(
            loose_cmp(field, needle),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        ComparisonOperator::Matches | ComparisonOperator::MemberOf => false,
    }
}

/// Loose equality.
///
/// Values of one kind compare by value. Dates only equal dates. Any other
/// mix is compared through the numeric reading of both sides.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Date(a), Value::Date(b)) => a == b,
        (Value::Date(_), _) | (_, Value::Date(_)) => false,
        _ if left.kind() == right.kind() => strict_eq(left, right),
        _ => left.to_number() == right.to_number(),
    }
}

/// Strict equality: same kind and same value. NaN equals nothing.
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    if left.kind() != right.kind() {
        return false;
    }
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Date(a), Value::Date(b)) => a == b,
        _ => left.as_str() == right.as_str(),
    }
}

/// Membership equality: like [`strict_eq`], except NaN equals NaN
pub fn same_value_zero(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        _ => strict_eq(left, right),
    }
}

/// Loose ordering.
///
/// Two strings order lexicographically; every other pair orders by numeric
/// reading, and a NaN on either side leaves the pair unordered.
pub fn loose_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    if left.kind() == ValueKind::String && right.kind() == ValueKind::String {
        return Some(left.as_str().cmp(&right.as_str()));
    }
    left.to_number().partial_cmp(&right.to_number())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::QueryResult;
    use chrono::NaiveDate;

    fn check(op: &str, field: impl Into<Value>, needle: impl Into<Needle>) -> bool {
        let field = field.into();
        matches(
            &Operator::parse(op),
            Some(&field),
            &needle.into(),
            ComparisonMode::Coercive,
        )
    }

    fn check_strict(op: &str, field: impl Into<Value>, needle: impl Into<Needle>) -> bool {
        let field = field.into();
        matches(
            &Operator::parse(op),
            Some(&field),
            &needle.into(),
            ComparisonMode::Strict,
        )
    }

    fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_missing_field_is_false() {
        for op in ["==", "!=", "!==", "<", ">=", "in"] {
            assert!(!matches(
                &Operator::parse(op),
                None,
                &Needle::from(1),
                ComparisonMode::Coercive
            ));
        }
    }

    #[test]
    fn test_loose_equality() {
        assert!(check("==", 1, 1));
        assert!(check("==", 3, "3"));
        assert!(check("is", "3", 3));
        assert!(check("==", Value::Empty, ""));
        assert!(!check("==", 1, ""));
        assert!(check("==", 0, ""));
        assert!(check("==", true, 1));
        assert!(!check("==", "abc", 0));
        assert!(!check("==", f64::NAN, f64::NAN));
    }

    #[test]
    fn test_strict_equality() {
        assert!(check("===", 1, 1));
        assert!(!check("===", 1, "1"));
        assert!(check("eq", "aiu", "aiu"));
        assert!(check("!==", 1, "1"));
        assert!(!check("!==", 1, 1));
    }

    #[test]
    fn test_not_equals() {
        assert!(!check("!=", 1, 1));
        assert!(!check("not", 1, "1"));
        assert!(check("!=", 1, 2));
    }

    #[test]
    fn test_ordering() {
        assert!(check("<", 1, 2));
        assert!(!check(">", 1, 1));
        assert!(check(">=", 1, 1));
        assert!(check("<=", 1, 1));
        assert!(check("<", "apple", "banana"));
        assert!(!check("<", "10", 9));
        assert!(check("<", "10", "9"));
    }

    #[test]
    fn test_empty_string_orders_as_zero() {
        assert!(check("<", Value::Empty, 1));
        assert!(!check(">=", Value::Empty, 1));
        assert!(check("<", Value::Empty, 2));
    }

    #[test]
    fn test_unordered_pairs_are_false() {
        assert!(!check("<", "abc", 2));
        assert!(!check(">=", "abc", 2));
        assert!(!check("<=", f64::NAN, 1));
    }

    #[test]
    fn test_strict_kind_mismatch() {
        assert!(!check_strict("<", Value::Empty, 1));
        assert!(!check_strict("==", 3, "3"));
        assert!(check_strict("==", 3, 3));
        assert!(check_strict("<", "a", "b"));
        // Negated operators are gated too
        assert!(!check_strict("!=", 3, "4"));
    }

    #[test]
    fn test_pattern() -> QueryResult<()> {
        assert!(check("~", "United States", Needle::pattern("^United")?));
        assert!(check("match", 3, Needle::pattern("^[0-9]{1}$")?));
        assert!(!check("=~", 13, Needle::pattern("^[0-9]{1}$")?));
        assert!(!check("~", 1, Needle::pattern("[a-z]")?));
        // Patterns are not gated by strict mode
        assert!(check_strict("~", 3, Needle::pattern("3")?));
        Ok(())
    }

    #[test]
    fn test_membership() {
        assert!(check("in", 4, Needle::set([2, 4, 6])));
        assert!(!check("in", 4, Needle::set([2, 5, 6])));
        assert!(check("includes", "b", Needle::set(["a", "b"])));
        assert!(!check("in", 4, Needle::set(["4"])));
        assert!(check("in", f64::NAN, Needle::set([f64::NAN])));
        // A cell is never of the kind of a set
        assert!(!check_strict("in", 4, Needle::set([4])));
        assert!(!check_strict("includes", "b", Needle::set(["a", "b"])));
    }

    #[test]
    fn test_operator_needle_mismatch_is_false() -> QueryResult<()> {
        assert!(!check("==", "abc", Needle::pattern("abc")?));
        assert!(!check("~", "abc", "abc"));
        assert!(!check("==", 4, Needle::set([4])));
        assert!(!check("in", 4, 4));
        Ok(())
    }

    #[test]
    fn test_unknown_operator_is_false() {
        assert!(!check("id", 1, 1));
        assert!(!check("", 1, 1));
    }

    #[test]
    fn test_temporal_needle() {
        let needle = Needle::date(date(2024, 1, 10));
        assert!(check("<", "2024-01-01", needle.clone()));
        assert!(check(">=", Value::Date(date(2024, 1, 10)), needle.clone()));
        assert!(check("==", "2024-01-10", needle.clone()));
        assert!(!check("!=", "2024-01-10", needle.clone()));
        assert!(!check("<", Value::Empty, needle.clone()));
        assert!(!check("<", "not a date", needle.clone()));
        assert!(!check(">", true, needle.clone()));
        // Cells are converted before the strict kind check
        assert!(check_strict("<", "2024-01-01", needle.clone()));
        // Epoch milliseconds
        assert!(check("<", 0, needle));
    }

    #[test]
    fn test_invalid_temporal_needle_is_false() {
        let needle = Needle::parse_date("someday");
        assert!(!check("<", "2024-01-01", needle.clone()));
        assert!(!check("!=", "2024-01-01", needle));
    }
}
