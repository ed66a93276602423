//! Column name resolution.

use crate::access::Row;
use crate::catalog::HeaderConverter;
use std::collections::HashMap;

/// Ordered header names with constant-time name to position lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Build an index from names taken as they are
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            // A repeated header resolves to its first occurrence
            positions.entry(name.clone()).or_insert(position);
        }
        Self { names, positions }
    }

    /// Build an index, normalizing every name once
    pub fn with_normalizer<I, S, F>(names: I, normalize: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> String,
    {
        Self::from_names(names.into_iter().map(|name| normalize(name.as_ref())))
    }

    /// Build an index from a header row
    pub fn from_header_row(header: &Row, converter: HeaderConverter) -> Self {
        Self::with_normalizer(header.iter().map(|cell| cell.to_text()), |name| {
            converter.apply(name)
        })
    }

    /// Position of `name`, or `None` when no header carries it
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn name_at(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
