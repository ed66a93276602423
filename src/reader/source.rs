//! Row sources.
//!
//! A [`Workbook`] is a collection of named sheets with one active sheet, and a
//! [`RowSource`] hands out the raw rows of a sheet, header rows included.
//! [`InMemoryBook`] implements both over rows held in memory.

use crate::access::Row;
use anyhow::Result;
use indexmap::IndexMap;
use std::sync::Arc;

/// A sheet that can produce its raw rows
pub trait RowSource {
    fn name(&self) -> &str;

    /// Every row of the sheet, header rows included
    fn raw_values(&self) -> Result<Vec<Row>>;
}

/// A collection of sheets
pub trait Workbook {
    type Sheet: RowSource;

    fn sheet_by_name(&self, name: &str) -> Option<Self::Sheet>;

    /// The sheet used when none is named
    fn active_sheet(&self) -> Option<Self::Sheet>;
}

/// Handle to one sheet of an [`InMemoryBook`]
#[derive(Debug, Clone)]
pub struct InMemorySheet {
    name: String,
    rows: Arc<Vec<Row>>,
}

impl RowSource for InMemorySheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn raw_values(&self) -> Result<Vec<Row>> {
        Ok(self.rows.as_ref().clone())
    }
}

/// Workbook whose sheets live in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryBook {
    sheets: IndexMap<String, Arc<Vec<Row>>>,
    active: Option<String>,
}

impl InMemoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add_sheet`](Self::add_sheet)
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.add_sheet(name, rows);
        self
    }

    /// Add or replace a sheet
    pub fn add_sheet(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.sheets.insert(name.into(), Arc::new(rows));
    }

    /// Make `name` the active sheet; returns false when no such sheet exists
    pub fn set_active(&mut self, name: &str) -> bool {
        if self.sheets.contains_key(name) {
            self.active = Some(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    fn sheet(&self, name: &str, rows: &Arc<Vec<Row>>) -> InMemorySheet {
        InMemorySheet {
            name: name.to_string(),
            rows: Arc::clone(rows),
        }
    }
}

impl Workbook for InMemoryBook {
    type Sheet = InMemorySheet;

    fn sheet_by_name(&self, name: &str) -> Option<InMemorySheet> {
        self.sheets
            .get_key_value(name)
            .map(|(name, rows)| self.sheet(name, rows))
    }

    /// The sheet marked active, or the first sheet when none is marked
    fn active_sheet(&self) -> Option<InMemorySheet> {
        match &self.active {
            Some(name) => self.sheet_by_name(name),
            None => self
                .sheets
                .first()
                .map(|(name, rows)| self.sheet(name, rows)),
        }
    }
}
