//! JSON query language.
//!
//! A query is a JSON array:
//!
//! - `[operator, column, needle]` compares one column
//! - `["and" | "or", [condition, ...]]` combines conditions
//! - `[column, needle]` is the deprecated leaf form without an operator
//!
//! Needles are JSON scalars, arrays of scalars (membership sets),
//! `{"regex": "...", "flags": "..."}` patterns or `{"date": "..."}` dates.

use crate::access::Value;
use crate::expression::condition::{CombinatorKind, Condition, Leaf};
use crate::expression::needle::Needle;
use crate::expression::operator::{ComparisonOperator, Operator};
use crate::expression::{QueryError, QueryResult};
use log::warn;
use serde_json::Value as Json;
use std::fmt;

/// Notice raised for a leaf written without an operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub column: String,
    /// Operator inferred from the needle, if any
    pub inferred: Option<ComparisonOperator>,
}

impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "deprecated leaf [{:?}, needle] without an operator",
            self.column
        )?;
        match self.inferred {
            Some(op) => write!(f, "; treated as {:?}", op.as_str()),
            None => write!(f, "; no operator applies to this needle, it matches nothing"),
        }
    }
}

/// A parsed query together with the deprecation notices raised while parsing
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    pub condition: Condition,
    pub deprecations: Vec<Deprecation>,
}

/// Parse a query from JSON text
pub fn parse_query(text: &str) -> QueryResult<ParsedQuery> {
    let json: Json = serde_json::from_str(text)?;
    parse_json(&json)
}

/// Parse a query from an already decoded JSON value
pub fn parse_json(json: &Json) -> QueryResult<ParsedQuery> {
    let mut deprecations = Vec::new();
    let condition = parse_node(json, &mut deprecations)?;
    Ok(ParsedQuery {
        condition,
        deprecations,
    })
}

fn parse_node(json: &Json, deprecations: &mut Vec<Deprecation>) -> QueryResult<Condition> {
    let items = json
        .as_array()
        .ok_or_else(|| invalid_condition(json, "expected an array"))?;

    if let [Json::String(keyword), Json::Array(children)] = items.as_slice() {
        if let Some(kind) = CombinatorKind::parse(keyword) {
            let children = children
                .iter()
                .map(|child| parse_node(child, deprecations))
                .collect::<QueryResult<Vec<_>>>()?;
            return Ok(Condition::Combinator { kind, children });
        }
    }

    match items.as_slice() {
        [Json::String(operator), Json::String(column), needle] => {
            let leaf = Leaf {
                operator: Operator::parse(operator),
                column: column.clone(),
                needle: parse_needle(needle)?,
            };
            match leaf.operator.known() {
                Some(op) if !op.accepts(leaf.needle.kind()) => {
                    warn!("{} takes no {:?} needle and matches nothing", leaf, leaf.needle.kind());
                }
                None => {
                    warn!("{} uses an unknown operator and matches nothing", leaf);
                }
                _ => {}
            }
            Ok(Condition::Leaf(leaf))
        }
        [Json::String(column), needle] => {
            let needle = parse_needle(needle)?;
            let inferred = infer_operator(&needle);
            let deprecation = Deprecation {
                column: column.clone(),
                inferred,
            };
            warn!("{}", deprecation);
            deprecations.push(deprecation);

            let operator = match inferred {
                Some(op) => Operator::Known(op),
                None => Operator::Unsupported(String::new()),
            };
            Ok(Condition::Leaf(Leaf {
                operator,
                column: column.clone(),
                needle,
            }))
        }
        [_, _, _] => Err(invalid_condition(
            json,
            "operator and column must be strings",
        )),
        _ => Err(invalid_condition(
            json,
            "expected [operator, column, needle], [\"and\" | \"or\", [conditions]] or [column, needle]",
        )),
    }
}

/// Operator implied by a needle in the deprecated two-element form
fn infer_operator(needle: &Needle) -> Option<ComparisonOperator> {
    match needle {
        Needle::Scalar(_) => Some(ComparisonOperator::EqualsLoose),
        Needle::Pattern(_) => Some(ComparisonOperator::Matches),
        Needle::Temporal(_) | Needle::Set(_) => None,
    }
}

fn parse_needle(json: &Json) -> QueryResult<Needle> {
    match json {
        Json::Null => Err(invalid_needle(json, "a needle cannot be null")),
        Json::Array(items) => items
            .iter()
            .map(parse_scalar)
            .collect::<QueryResult<Vec<_>>>()
            .map(Needle::Set),
        Json::Object(fields) => {
            if let Some(pattern) = fields.get("regex") {
                let pattern = pattern
                    .as_str()
                    .ok_or_else(|| invalid_needle(json, "regex must be a string"))?;
                let flags = match fields.get("flags") {
                    None => "",
                    Some(flags) => flags
                        .as_str()
                        .ok_or_else(|| invalid_needle(json, "flags must be a string"))?,
                };
                Needle::pattern_with_flags(pattern, flags)
            } else if let Some(date) = fields.get("date") {
                match date {
                    Json::String(raw) => Ok(Needle::parse_date(raw)),
                    Json::Number(_) => Ok(Needle::Temporal(parse_scalar(date)?.to_date())),
                    _ => Err(invalid_needle(json, "date must be a string or a number")),
                }
            } else {
                Err(invalid_needle(
                    json,
                    "expected an object with a \"regex\" or \"date\" field",
                ))
            }
        }
        _ => parse_scalar(json).map(Needle::Scalar),
    }
}

fn parse_scalar(json: &Json) -> QueryResult<Value> {
    match json {
        Json::String(s) => Ok(Value::from(s.as_str())),
        Json::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| invalid_needle(json, "number out of range")),
        Json::Bool(b) => Ok(Value::Boolean(*b)),
        _ => Err(invalid_needle(json, "expected a string, number or boolean")),
    }
}

fn invalid_condition(json: &Json, reason: &str) -> QueryError {
    QueryError::InvalidCondition {
        node: json.to_string(),
        reason: reason.to_string(),
    }
}

fn invalid_needle(json: &Json, reason: &str) -> QueryError {
    QueryError::InvalidNeedle {
        needle: json.to_string(),
        reason: reason.to_string(),
    }
}
