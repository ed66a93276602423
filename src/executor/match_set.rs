//! Query results.

use crate::access::Row;
use crate::executor::Multiplicity;
use std::slice;

/// Rows matched by a condition, borrowed from the table they came from.
///
/// Order follows the evaluation: input order for a leaf, first-seen order for
/// a combinator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSet<'a> {
    rows: Vec<&'a Row>,
}

impl<'a> MatchSet<'a> {
    pub fn new(rows: Vec<&'a Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, &'a Row> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    /// Owned copies of the matched rows
    pub fn to_rows(&self) -> Vec<Row> {
        self.rows.iter().map(|row| (*row).clone()).collect()
    }

    /// Drop structurally duplicate rows, keeping the first occurrence
    pub fn distinct(self) -> Self {
        Self::new(Multiplicity::from_items(self.rows).into_values())
    }

    /// Whether a row structurally equal to `row` was matched
    pub fn contains(&self, row: &Row) -> bool {
        self.rows.iter().any(|matched| *matched == row)
    }
}

impl<'a> FromIterator<&'a Row> for MatchSet<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for MatchSet<'a> {
    type Item = &'a Row;
    type IntoIter = std::vec::IntoIter<&'a Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s MatchSet<'a> {
    type Item = &'s &'a Row;
    type IntoIter = slice::Iter<'s, &'a Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
