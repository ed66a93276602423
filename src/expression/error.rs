//! Error types for query construction.

use thiserror::Error;

/// Errors raised while turning a query into a [`Condition`](crate::expression::Condition).
///
/// Evaluation itself never fails; these only come out of query ingestion.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid query JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid condition {node}: {reason}")]
    InvalidCondition { node: String, reason: String },

    #[error("Invalid needle {needle}: {reason}")]
    InvalidNeedle { needle: String, reason: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for query construction
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::InvalidCondition {
            node: "[1]".to_string(),
            reason: "expected an array".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid condition [1]: expected an array");

        let err = QueryError::InvalidNeedle {
            needle: "null".to_string(),
            reason: "a needle cannot be null".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid needle null: a needle cannot be null"
        );

        let source = regex::Regex::new("(").unwrap_err();
        let err = QueryError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid pattern '(':"));
    }
}
