//! Evaluation of condition trees over in-memory rows.
//!
//! The evaluator walks a [`Condition`](crate::expression::Condition) once,
//! bottom-up, and produces a [`MatchSet`] of rows borrowed from the input.
//! AND is implemented with the [`Multiplicity`] counter and OR with
//! first-seen deduplication. Matched rows can then be projected into
//! keyed records.

pub mod evaluator;
pub mod match_set;
pub mod multiplicity;
pub mod projection;

pub use evaluator::{evaluate, Evaluator};
pub use match_set::MatchSet;
pub use multiplicity::Multiplicity;
pub use projection::{project, project_all, Record};
