//! Access layer for row-oriented tabular data.
//!
//! This module provides the data model shared by every other layer:
//!
//! - **Value**: a single cell together with the conversions used by
//!   coercive comparisons
//! - **Row**: an immutable, ordered sequence of cells
//! - **CanonicalKey**: structural keys used to detect equal rows
//!
//! Rows are produced once by a row source and never mutated afterwards;
//! evaluation results borrow them.

pub mod key;
pub mod row;
pub mod value;

pub use key::{CanonicalKey, ValueKey};
pub use row::Row;
pub use value::{parse_date, Value, ValueKind};
