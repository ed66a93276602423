//! Condition tree evaluation.
//!
//! Every node is evaluated against the full row set; combinators only merge
//! the row sets their children produced:
//!
//! - a leaf keeps the rows whose cell satisfies the comparison, in input order
//! - `and` counts the distinct rows of each child together and keeps the rows
//!   counted once per child
//! - `or` concatenates the children in order and drops repeated rows
//!
//! Combinators with no children match nothing.

use crate::access::Row;
use crate::catalog::ColumnIndex;
use crate::executor::{MatchSet, Multiplicity};
use crate::expression::{self, CombinatorKind, ComparisonMode, Condition, Leaf};
use log::debug;

/// Evaluates condition trees over rows laid out by one header
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'c> {
    columns: &'c ColumnIndex,
    mode: ComparisonMode,
}

impl<'c> Evaluator<'c> {
    pub fn new(columns: &'c ColumnIndex, mode: ComparisonMode) -> Self {
        Self { columns, mode }
    }

    /// Rows of `rows` matched by `condition`
    pub fn evaluate<'r>(&self, condition: &Condition, rows: &'r [Row]) -> MatchSet<'r> {
        match condition {
            Condition::Leaf(leaf) => self.filter(leaf, rows),
            Condition::Combinator {
                kind: CombinatorKind::And,
                children,
            } => self.intersect(children, rows),
            Condition::Combinator {
                kind: CombinatorKind::Or,
                children,
            } => self.union(children, rows),
        }
    }

    /// Whether a single row satisfies a leaf
    pub fn test(&self, leaf: &Leaf, row: &Row) -> bool {
        let field = self
            .columns
            .position_of(&leaf.column)
            .and_then(|position| row.get(position));
        expression::matches(&leaf.operator, field, &leaf.needle, self.mode)
    }

    fn filter<'r>(&self, leaf: &Leaf, rows: &'r [Row]) -> MatchSet<'r> {
        if self.columns.position_of(&leaf.column).is_none() {
            debug!("column '{}' not found in header", leaf.column);
        }
        let matched: MatchSet<'r> = rows.iter().filter(|row| self.test(leaf, row)).collect();
        debug!("{} matched {} of {} rows", leaf, matched.len(), rows.len());
        matched
    }

    fn intersect<'r>(&self, children: &[Condition], rows: &'r [Row]) -> MatchSet<'r> {
        let mut counter = Multiplicity::new();
        for child in children {
            counter.extend(self.evaluate(child, rows).distinct());
        }
        let required = children.len();
        counter
            .into_iter()
            .filter(|(_, count)| *count == required)
            .map(|(row, _)| row)
            .collect()
    }

    fn union<'r>(&self, children: &[Condition], rows: &'r [Row]) -> MatchSet<'r> {
        children
            .iter()
            .flat_map(|child| self.evaluate(child, rows))
            .collect::<MatchSet<'r>>()
            .distinct()
    }
}

/// Evaluate a condition once without keeping an [`Evaluator`] around
pub fn evaluate<'r>(
    condition: &Condition,
    columns: &ColumnIndex,
    rows: &'r [Row],
    mode: ComparisonMode,
) -> MatchSet<'r> {
    Evaluator::new(columns, mode).evaluate(condition, rows)
}
