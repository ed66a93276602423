//! Header catalog.
//!
//! Resolves column names to row positions. A [`ColumnIndex`] is built once
//! from the header row of a sheet, after passing every name through a
//! [`HeaderConverter`], and is then queried for every leaf of a condition.

pub mod column_index;
pub mod header;

pub use column_index::ColumnIndex;
pub use header::HeaderConverter;
