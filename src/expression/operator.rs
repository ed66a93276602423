//! Operator definitions for leaf conditions.

use crate::expression::needle::NeedleKind;
use std::fmt;

/// Comparison operators supported by leaf conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    // Equality
    EqualsLoose,
    EqualsStrict,
    NotEqualsLoose,
    NotEqualsStrict,

    // Pattern
    Matches,

    // Ordering
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,

    // Membership
    MemberOf,
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 10] = [
        ComparisonOperator::EqualsLoose,
        ComparisonOperator::EqualsStrict,
        ComparisonOperator::NotEqualsLoose,
        ComparisonOperator::NotEqualsStrict,
        ComparisonOperator::Matches,
        ComparisonOperator::LessThan,
        ComparisonOperator::LessOrEqual,
        ComparisonOperator::GreaterThan,
        ComparisonOperator::GreaterOrEqual,
        ComparisonOperator::MemberOf,
    ];

    /// Resolve an operator token: the canonical name or any alias
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == token || op.aliases().contains(&token))
    }

    /// Canonical name of this operator
    pub fn name(&self) -> &'static str {
        match self {
            ComparisonOperator::EqualsLoose => "equalsLoose",
            ComparisonOperator::EqualsStrict => "equalsStrict",
            ComparisonOperator::NotEqualsLoose => "notEqualsLoose",
            ComparisonOperator::NotEqualsStrict => "notEqualsStrict",
            ComparisonOperator::Matches => "matches",
            ComparisonOperator::LessThan => "lessThan",
            ComparisonOperator::LessOrEqual => "lessOrEqual",
            ComparisonOperator::GreaterThan => "greaterThan",
            ComparisonOperator::GreaterOrEqual => "greaterOrEqual",
            ComparisonOperator::MemberOf => "memberOf",
        }
    }

    /// Tokens accepted for this operator besides its canonical name
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ComparisonOperator::EqualsLoose => &["is", "=="],
            ComparisonOperator::EqualsStrict => &["eq", "==="],
            ComparisonOperator::NotEqualsLoose => &["not", "!="],
            ComparisonOperator::NotEqualsStrict => &["!=="],
            ComparisonOperator::Matches => &["match", "=~", "~"],
            ComparisonOperator::LessThan => &["<"],
            ComparisonOperator::LessOrEqual => &["<="],
            ComparisonOperator::GreaterThan => &[">"],
            ComparisonOperator::GreaterOrEqual => &[">="],
            ComparisonOperator::MemberOf => &["in", "includes"],
        }
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::EqualsLoose => "==",
            ComparisonOperator::EqualsStrict => "===",
            ComparisonOperator::NotEqualsLoose => "!=",
            ComparisonOperator::NotEqualsStrict => "!==",
            ComparisonOperator::Matches => "~",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterOrEqual => ">=",
            ComparisonOperator::MemberOf => "in",
        }
    }

    /// Check whether this operator can be applied to a needle of `kind`
    pub fn accepts(&self, kind: NeedleKind) -> bool {
        match self {
            ComparisonOperator::Matches => kind == NeedleKind::Pattern,
            ComparisonOperator::MemberOf => kind == NeedleKind::Set,
            _ => matches!(kind, NeedleKind::Scalar | NeedleKind::Temporal),
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator slot of a leaf condition.
///
/// Unrecognized tokens are kept rather than rejected: a leaf carrying one
/// matches no row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Known(ComparisonOperator),
    Unsupported(String),
}

impl Operator {
    pub fn parse(token: &str) -> Self {
        match ComparisonOperator::parse(token) {
            Some(op) => Operator::Known(op),
            None => Operator::Unsupported(token.to_string()),
        }
    }

    pub fn known(&self) -> Option<ComparisonOperator> {
        match self {
            Operator::Known(op) => Some(*op),
            Operator::Unsupported(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operator::Known(op) => op.as_str(),
            Operator::Unsupported(token) => token,
        }
    }
}

impl From<ComparisonOperator> for Operator {
    fn from(op: ComparisonOperator) -> Self {
        Operator::Known(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
