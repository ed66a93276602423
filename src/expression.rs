//! Condition language for row queries.
//!
//! This module provides:
//! - Condition tree representation (leaves and AND/OR combinators)
//! - Comparison operators and their aliases
//! - Needles (scalars, patterns, dates and membership sets)
//! - The leaf comparison engine
//! - The JSON query parser

pub mod compare;
pub mod condition;
pub mod error;
pub mod needle;
pub mod operator;
pub mod parser;

pub use compare::{matches, ComparisonMode};
pub use condition::{CombinatorKind, Condition, Leaf};
pub use error::{QueryError, QueryResult};
pub use needle::{Needle, NeedleKind};
pub use operator::{ComparisonOperator, Operator};
pub use parser::{parse_json, parse_query, Deprecation, ParsedQuery};
