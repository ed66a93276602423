//! Right-hand operands of leaf conditions.

use crate::access::{parse_date, Value, ValueKind};
use crate::expression::{QueryError, QueryResult};
use chrono::NaiveDateTime;
use log::warn;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Kind of a needle, fixed when the needle is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeedleKind {
    Scalar,
    Pattern,
    Temporal,
    Set,
}

/// Right-hand operand of a leaf condition
#[derive(Debug, Clone)]
pub enum Needle {
    /// A string, number or boolean compared against the cell
    Scalar(Value),
    /// A regular expression searched in the cell text
    Pattern(Regex),
    /// A point in time; `None` when the date literal could not be parsed
    Temporal(Option<NaiveDateTime>),
    /// Scalars the cell must be one of
    Set(Vec<Value>),
}

impl Needle {
    pub fn kind(&self) -> NeedleKind {
        match self {
            Needle::Scalar(_) => NeedleKind::Scalar,
            Needle::Pattern(_) => NeedleKind::Pattern,
            Needle::Temporal(_) => NeedleKind::Temporal,
            Needle::Set(_) => NeedleKind::Set,
        }
    }

    /// Compile a pattern needle
    pub fn pattern(pattern: &str) -> QueryResult<Self> {
        Self::pattern_with_flags(pattern, "")
    }

    /// Compile a pattern needle with regex flags.
    ///
    /// `i`, `m`, `s` and `x` map onto the regex builder options; `g`, `u` and
    /// `y` have no meaning for a single test and are ignored.
    pub fn pattern_with_flags(pattern: &str, flags: &str) -> QueryResult<Self> {
        let mut builder = RegexBuilder::new(pattern);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'g' | 'u' | 'y' => &mut builder,
                other => {
                    return Err(QueryError::InvalidNeedle {
                        needle: format!("/{}/{}", pattern, flags),
                        reason: format!("unknown pattern flag '{}'", other),
                    })
                }
            };
        }
        builder
            .build()
            .map(Needle::Pattern)
            .map_err(|source| QueryError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn date(date: NaiveDateTime) -> Self {
        Needle::Temporal(Some(date))
    }

    /// Build a temporal needle from a date literal.
    ///
    /// An unparseable literal still yields a needle, one that matches nothing.
    pub fn parse_date(raw: &str) -> Self {
        let parsed = parse_date(raw);
        if parsed.is_none() {
            warn!("unparseable date needle '{}' will match no rows", raw);
        }
        Needle::Temporal(parsed)
    }

    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Needle::Set(items.into_iter().map(Into::into).collect())
    }

    /// Kind of the value this needle holds; patterns and sets have none
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Needle::Scalar(value) => Some(value.kind()),
            Needle::Temporal(_) => Some(ValueKind::Date),
            Needle::Pattern(_) | Needle::Set(_) => None,
        }
    }

    /// Whether a field of `kind` may be compared under strict comparison.
    ///
    /// Patterns accept any field. A set is never the kind of a cell, so a set
    /// needle accepts none.
    pub fn admits_strict(&self, kind: ValueKind) -> bool {
        match self {
            Needle::Pattern(_) => true,
            Needle::Set(_) => false,
            Needle::Scalar(_) | Needle::Temporal(_) => self.value_kind() == Some(kind),
        }
    }
}

impl PartialEq for Needle {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Needle::Scalar(a), Needle::Scalar(b)) => a == b,
            (Needle::Pattern(a), Needle::Pattern(b)) => a.as_str() == b.as_str(),
            (Needle::Temporal(a), Needle::Temporal(b)) => a == b,
            (Needle::Set(a), Needle::Set(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Needle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Needle::Scalar(value) => write_scalar(f, value),
            Needle::Pattern(re) => write!(f, "/{}/", re.as_str()),
            Needle::Temporal(Some(date)) => write!(f, "{}", date),
            Needle::Temporal(None) => write!(f, "Invalid Date"),
            Needle::Set(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_scalar(f, item)?;
                }
                write!(f, "]")
            }
        }
    }
}

fn write_scalar(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value.as_str() {
        Some(s) => write!(f, "{:?}", s),
        None => write!(f, "{}", value),
    }
}

impl From<Value> for Needle {
    fn from(value: Value) -> Self {
        Needle::Scalar(value)
    }
}

impl From<&str> for Needle {
    fn from(s: &str) -> Self {
        Needle::Scalar(Value::from(s))
    }
}

impl From<String> for Needle {
    fn from(s: String) -> Self {
        Needle::Scalar(Value::from(s))
    }
}

impl From<i32> for Needle {
    fn from(n: i32) -> Self {
        Needle::Scalar(Value::from(n))
    }
}

impl From<f64> for Needle {
    fn from(n: f64) -> Self {
        Needle::Scalar(Value::from(n))
    }
}

impl From<bool> for Needle {
    fn from(b: bool) -> Self {
        Needle::Scalar(Value::from(b))
    }
}

impl From<Regex> for Needle {
    fn from(re: Regex) -> Self {
        Needle::Pattern(re)
    }
}

impl From<NaiveDateTime> for Needle {
    fn from(date: NaiveDateTime) -> Self {
        Needle::date(date)
    }
}

impl From<Vec<Value>> for Needle {
    fn from(items: Vec<Value>) -> Self {
        Needle::Set(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() -> QueryResult<()> {
        assert_eq!(Needle::from(3).kind(), NeedleKind::Scalar);
        assert_eq!(Needle::pattern("^United")?.kind(), NeedleKind::Pattern);
        assert_eq!(Needle::parse_date("2024-01-01").kind(), NeedleKind::Temporal);
        assert_eq!(Needle::set([2, 4, 6]).kind(), NeedleKind::Set);
        Ok(())
    }

    #[test]
    fn test_pattern_flags() -> QueryResult<()> {
        let Needle::Pattern(re) = Needle::pattern_with_flags("^united", "gi")? else {
            panic!("expected a pattern needle");
        };
        assert!(re.is_match("United States"));
        assert!(Needle::pattern_with_flags("a", "q").is_err());
        Ok(())
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Needle::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, QueryError::InvalidPattern { .. }));
    }

    #[test]
    fn test_unparseable_date_needle() {
        assert_eq!(Needle::parse_date("someday"), Needle::Temporal(None));
    }

    #[test]
    fn test_value_kind() -> QueryResult<()> {
        assert_eq!(Needle::from("x").value_kind(), Some(ValueKind::String));
        assert_eq!(Needle::from(1).value_kind(), Some(ValueKind::Number));
        assert_eq!(
            Needle::parse_date("2024-01-01").value_kind(),
            Some(ValueKind::Date)
        );
        assert_eq!(Needle::pattern("x")?.value_kind(), None);
        assert_eq!(Needle::set(["a"]).value_kind(), None);
        Ok(())
    }

    #[test]
    fn test_admits_strict() -> QueryResult<()> {
        assert!(Needle::from(1).admits_strict(ValueKind::Number));
        assert!(!Needle::from(1).admits_strict(ValueKind::String));
        assert!(Needle::parse_date("2024-01-01").admits_strict(ValueKind::Date));
        assert!(Needle::pattern("x")?.admits_strict(ValueKind::Number));
        assert!(!Needle::set([4]).admits_strict(ValueKind::Number));
        Ok(())
    }

    #[test]
    fn test_display() -> QueryResult<()> {
        assert_eq!(Needle::from("Japan").to_string(), "\"Japan\"");
        assert_eq!(Needle::from(3).to_string(), "3");
        assert_eq!(Needle::pattern("^United")?.to_string(), "/^United/");
        assert_eq!(Needle::set([2, 4, 6]).to_string(), "[2, 4, 6]");
        Ok(())
    }
}
