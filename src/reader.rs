//! One-shot sheet reader.
//!
//! A [`SheetReader`] binds to one sheet of a [`Workbook`], fetches its rows
//! once and answers queries over them. The first fetched row is the header;
//! `skip_headers` rows are dropped before the body. Rows, header names and the
//! bound sheet are memoized until the reader is cleared.
//!
//! # Example
//!
//! ```
//! use sheetquery::access::{Row, Value};
//! use sheetquery::expression::Condition;
//! use sheetquery::reader::{InMemoryBook, SheetReader};
//!
//! let book = InMemoryBook::new().with_sheet(
//!     "members",
//!     vec![
//!         Row::new(vec![Value::from("ID"), Value::from("Name")]),
//!         Row::new(vec![Value::from(1), Value::from("aiu")]),
//!         Row::new(vec![Value::from(2), Value::from("eoka")]),
//!     ],
//! );
//! let reader = SheetReader::new(book);
//! let found = reader.search(&Condition::ge("id", 2)).unwrap();
//! assert_eq!(found.len(), 1);
//! ```

pub mod delimited;
pub mod error;
pub mod options;
pub mod source;

pub use delimited::{load_delimited, parse_delimited};
pub use error::{ReaderError, ReaderResult};
pub use options::{OptionsPatch, ReaderOptions};
pub use source::{InMemoryBook, InMemorySheet, RowSource, Workbook};

use crate::access::{Row, Value};
use crate::catalog::ColumnIndex;
use crate::executor::{project, Evaluator, MatchSet, Record};
use crate::expression::{parse_query, Condition, Deprecation};
use log::debug;
use std::cell::OnceCell;
use std::sync::Arc;

/// Reader bound to at most one sheet of a workbook
pub struct SheetReader<B: Workbook> {
    book: Arc<B>,
    opts: ReaderOptions,
    sheet: OnceCell<B::Sheet>,
    raw: OnceCell<Vec<Row>>,
    headers: OnceCell<ColumnIndex>,
}

impl<B: Workbook> SheetReader<B> {
    /// Create a reader with default options over the active sheet
    pub fn new(book: B) -> Self {
        Self::with_options(book, ReaderOptions::default())
    }

    pub fn with_options(book: B, opts: ReaderOptions) -> Self {
        Self::shared(Arc::new(book), opts)
    }

    fn shared(book: Arc<B>, opts: ReaderOptions) -> Self {
        Self {
            book,
            opts,
            sheet: OnceCell::new(),
            raw: OnceCell::new(),
            headers: OnceCell::new(),
        }
    }

    /// Create a reader and bind it to `sheet` when a name is given
    pub fn open(book: B, sheet: Option<&str>, opts: ReaderOptions) -> ReaderResult<Self> {
        Self::bound(Arc::new(book), sheet, opts)
    }

    fn bound(book: Arc<B>, sheet: Option<&str>, opts: ReaderOptions) -> ReaderResult<Self> {
        let mut reader = Self::shared(book, opts);
        if let Some(name) = sheet {
            reader.bind_sheet(name)?;
        }
        Ok(reader)
    }

    /// Another reader over the same workbook.
    ///
    /// Without `opts` the new reader starts from the default options.
    pub fn new_reader(&self, sheet: &str, opts: Option<ReaderOptions>) -> ReaderResult<Self> {
        Self::bound(Arc::clone(&self.book), Some(sheet), opts.unwrap_or_default())
    }

    pub fn book(&self) -> &Arc<B> {
        &self.book
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.opts
    }

    /// Merge `patch` into the options and return the result
    pub fn configure(&mut self, patch: OptionsPatch) -> &ReaderOptions {
        let converter = self.opts.header_converter;
        self.opts.merge(patch);
        if self.opts.header_converter != converter {
            self.headers.take();
        }
        &self.opts
    }

    /// Bind the reader to the sheet named `name`.
    ///
    /// A reader binds once: if a sheet is already bound, explicitly or through
    /// the active sheet fallback, this fails with
    /// [`ReaderError::SheetAlreadySpecified`].
    pub fn bind_sheet(&mut self, name: &str) -> ReaderResult<&B::Sheet> {
        if let Some(current) = self.sheet.get() {
            return Err(ReaderError::SheetAlreadySpecified {
                current: current.name().to_string(),
            });
        }
        let sheet = self
            .book
            .sheet_by_name(name)
            .ok_or_else(|| ReaderError::SheetNotFound(name.to_string()))?;
        self.clear();
        debug!("bound sheet '{}'", name);
        Ok(self.sheet.get_or_init(|| sheet))
    }

    /// The bound sheet, binding the active sheet on first use
    pub fn sheet(&self) -> ReaderResult<&B::Sheet> {
        if let Some(sheet) = self.sheet.get() {
            return Ok(sheet);
        }
        let sheet = self.book.active_sheet().ok_or(ReaderError::NoActiveSheet)?;
        debug!("bound active sheet '{}'", sheet.name());
        Ok(self.sheet.get_or_init(|| sheet))
    }

    /// Unbind the sheet and drop every memoized value
    pub fn clear(&mut self) {
        self.sheet.take();
        self.raw.take();
        self.headers.take();
    }

    /// Every row of the sheet, header rows included
    pub fn raw_values(&self) -> ReaderResult<&[Row]> {
        if let Some(rows) = self.raw.get() {
            return Ok(rows.as_slice());
        }
        let rows = self.sheet()?.raw_values()?;
        Ok(self.raw.get_or_init(|| rows).as_slice())
    }

    /// Drop the configured number of leading rows
    pub fn skip_headers<'r>(&self, raw: &'r [Row]) -> &'r [Row] {
        &raw[self.opts.skip_headers.min(raw.len())..]
    }

    /// Body rows
    pub fn values(&self) -> ReaderResult<&[Row]> {
        let raw = self.raw_values()?;
        Ok(self.skip_headers(raw))
    }

    /// Header names of the first row, normalized by the header converter
    pub fn headers(&self) -> ReaderResult<&ColumnIndex> {
        if let Some(headers) = self.headers.get() {
            return Ok(headers);
        }
        let headers = match self.raw_values()?.first() {
            Some(row) => ColumnIndex::from_header_row(row, self.opts.header_converter),
            None => ColumnIndex::default(),
        };
        Ok(self.headers.get_or_init(|| headers))
    }

    /// Replace the header names, taken as they are
    pub fn set_headers<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = OnceCell::from(ColumnIndex::from_names(names));
    }

    pub fn column_position(&self, name: &str) -> ReaderResult<Option<usize>> {
        Ok(self.headers()?.position_of(name))
    }

    /// Cells of one column, `None` when no header carries `name`
    pub fn col(&self, name: &str) -> ReaderResult<Option<Vec<Option<&Value>>>> {
        let Some(position) = self.column_position(name)? else {
            return Ok(None);
        };
        let cells = self
            .values()?
            .iter()
            .map(|row| row.get(position))
            .collect();
        Ok(Some(cells))
    }

    /// Body row `n`, counting from zero
    pub fn row(&self, n: usize) -> ReaderResult<Option<&Row>> {
        Ok(self.values()?.get(n))
    }

    /// Body rows matched by `condition`
    pub fn search(&self, condition: &Condition) -> ReaderResult<MatchSet<'_>> {
        let evaluator = Evaluator::new(self.headers()?, self.opts.comparison_mode());
        Ok(evaluator.evaluate(condition, self.values()?))
    }

    /// Parse a JSON query and search with it
    pub fn search_json(&self, query: &str) -> ReaderResult<(MatchSet<'_>, Vec<Deprecation>)> {
        let parsed = parse_query(query)?;
        let found = self.search(&parsed.condition)?;
        Ok((found, parsed.deprecations))
    }

    /// Field names used for records: `pick_fields` when set, else the headers
    pub fn fields_for_writing(&self) -> ReaderResult<Vec<String>> {
        match &self.opts.pick_fields {
            Some(fields) => Ok(fields.clone()),
            None => Ok(self.headers()?.names().to_vec()),
        }
    }

    pub fn to_record(&self, row: &Row) -> ReaderResult<Record> {
        let fields = self.fields_for_writing()?;
        Ok(project(row, &fields, Some(self.headers()?)))
    }

    /// Records of previously matched rows
    pub fn to_records(&self, found: &MatchSet<'_>) -> ReaderResult<Vec<Record>> {
        let fields = self.fields_for_writing()?;
        let headers = self.headers()?;
        Ok(found
            .iter()
            .map(|row| project(row, &fields, Some(headers)))
            .collect())
    }
}
