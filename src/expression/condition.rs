//! Condition tree definitions.

use crate::expression::needle::Needle;
use crate::expression::operator::{ComparisonOperator, Operator};
use std::fmt;

/// How a combinator merges the results of its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinatorKind {
    And,
    Or,
}

impl CombinatorKind {
    /// Resolve a combinator keyword, ignoring case
    pub fn parse(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("and") {
            Some(CombinatorKind::And)
        } else if keyword.eq_ignore_ascii_case("or") {
            Some(CombinatorKind::Or)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CombinatorKind::And => "and",
            CombinatorKind::Or => "or",
        }
    }
}

/// A single column comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub operator: Operator,
    pub column: String,
    pub needle: Needle,
}

impl Leaf {
    pub fn new(
        operator: impl Into<Operator>,
        column: impl Into<String>,
        needle: impl Into<Needle>,
    ) -> Self {
        Self {
            operator: operator.into(),
            column: column.into(),
            needle: needle.into(),
        }
    }
}

/// Condition tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Leaf(Leaf),
    Combinator {
        kind: CombinatorKind,
        children: Vec<Condition>,
    },
}

impl Condition {
    /// Create a leaf from an operator token such as `"=="` or `"includes"`
    pub fn leaf(operator: &str, column: impl Into<String>, needle: impl Into<Needle>) -> Self {
        Condition::Leaf(Leaf::new(Operator::parse(operator), column, needle))
    }

    /// Create a leaf from a known operator
    pub fn compare(
        op: ComparisonOperator,
        column: impl Into<String>,
        needle: impl Into<Needle>,
    ) -> Self {
        Condition::Leaf(Leaf::new(op, column, needle))
    }

    /// Create an AND combinator
    pub fn and(children: Vec<Condition>) -> Self {
        Condition::Combinator {
            kind: CombinatorKind::And,
            children,
        }
    }

    /// Create an OR combinator
    pub fn or(children: Vec<Condition>) -> Self {
        Condition::Combinator {
            kind: CombinatorKind::Or,
            children,
        }
    }

    /// Create a loose equality comparison (column == needle)
    pub fn eq(column: impl Into<String>, needle: impl Into<Needle>) -> Self {
        Self::compare(ComparisonOperator::EqualsLoose, column, needle)
    }

    /// Create a less-than comparison (column < needle)
    pub fn lt(column: impl Into<String>, needle: impl Into<Needle>) -> Self {
        Self::compare(ComparisonOperator::LessThan, column, needle)
    }

    /// Create a greater-than-or-equal comparison (column >= needle)
    pub fn ge(column: impl Into<String>, needle: impl Into<Needle>) -> Self {
        Self::compare(ComparisonOperator::GreaterOrEqual, column, needle)
    }

    /// Create a pattern match (column ~ needle)
    pub fn matches(column: impl Into<String>, needle: impl Into<Needle>) -> Self {
        Self::compare(ComparisonOperator::Matches, column, needle)
    }

    /// Create a membership test (column in needle)
    pub fn member_of(column: impl Into<String>, needle: impl Into<Needle>) -> Self {
        Self::compare(ComparisonOperator::MemberOf, column, needle)
    }

    /// Number of levels in the tree; a lone leaf has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Condition::Leaf(_) => 1,
            Condition::Combinator { children, .. } => {
                1 + children.iter().map(Condition::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Condition::Leaf(_) => 1,
            Condition::Combinator { children, .. } => {
                children.iter().map(Condition::leaf_count).sum()
            }
        }
    }
}

impl From<Leaf> for Condition {
    fn from(leaf: Leaf) -> Self {
        Condition::Leaf(leaf)
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}, {:?}, {}]",
            self.operator.as_str(),
            self.column,
            self.needle
        )
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Leaf(leaf) => write!(f, "{}", leaf),
            Condition::Combinator { kind, children } => {
                write!(f, "[{:?}, [", kind.as_str())?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, "]]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::QueryResult;

    #[test]
    fn test_leaf_construction() {
        let cond = Condition::leaf("==", "id", 3);
        assert_eq!(
            cond,
            Condition::Leaf(Leaf {
                operator: Operator::Known(ComparisonOperator::EqualsLoose),
                column: "id".to_string(),
                needle: Needle::from(3),
            })
        );
        assert_eq!(cond, Condition::eq("id", 3));
    }

    #[test]
    fn test_combinator_keywords() {
        assert_eq!(CombinatorKind::parse("and"), Some(CombinatorKind::And));
        assert_eq!(CombinatorKind::parse("OR"), Some(CombinatorKind::Or));
        assert_eq!(CombinatorKind::parse("xor"), None);
    }

    #[test]
    fn test_depth_and_leaf_count() -> QueryResult<()> {
        let tree = Condition::or(vec![
            Condition::and(vec![
                Condition::matches("country", Needle::pattern("^United")?),
                Condition::lt("id", 3),
            ]),
            Condition::eq("id", ""),
        ]);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(Condition::and(vec![]).depth(), 1);
        assert_eq!(Condition::and(vec![]).leaf_count(), 0);
        Ok(())
    }

    #[test]
    fn test_display() -> QueryResult<()> {
        let tree = Condition::or(vec![
            Condition::matches("country", Needle::pattern("^United")?),
            Condition::eq("id", ""),
        ]);
        assert_eq!(
            tree.to_string(),
            r#"["or", [["~", "country", /^United/], ["==", "id", ""]]]"#
        );
        Ok(())
    }
}
