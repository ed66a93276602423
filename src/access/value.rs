use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

use crate::access::key::CanonicalKey;

/// Runtime kind of a cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Date,
}

/// Values that can appear in a table cell
#[derive(Debug, Clone)]
pub enum Value {
    /// Empty cell. Equal to, and of the same kind as, the empty string.
    Empty,
    Number(f64),
    String(String),
    Boolean(bool),
    Date(NaiveDateTime),
}

impl Value {
    /// Get the runtime kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty | Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Date(_) => ValueKind::Date,
        }
    }

    /// True for the empty cell and the empty string
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Borrow the text of a string-kinded value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Empty => Some(""),
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading used by coercive comparisons.
    ///
    /// Returns NaN when the value has no numeric reading.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Empty => 0.0,
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s),
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Date(d) => d.and_utc().timestamp_millis() as f64,
        }
    }

    /// Date reading used when a cell is compared against a date.
    ///
    /// Numbers are epoch milliseconds, strings go through [`parse_date`].
    pub fn to_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Empty | Value::Boolean(_) => None,
            Value::Number(n) if n.is_finite() => {
                DateTime::from_timestamp_millis(*n as i64).map(|d| d.naive_utc())
            }
            Value::Number(_) => None,
            Value::String(s) => parse_date(s),
            Value::Date(d) => Some(*d),
        }
    }

    /// Text rendering used by pattern matching and delimited output
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Empty => Cow::Borrowed(""),
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(format_number(*n)),
            Value::Boolean(true) => Cow::Borrowed("true"),
            Value::Boolean(false) => Cow::Borrowed("false"),
            Value::Date(d) => Cow::Owned(d.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()),
        }
    }

    /// Parse one cell of delimited text.
    ///
    /// Blank cells become [`Value::Empty`], decimal literals become numbers
    /// and `true`/`false` become booleans. Anything else is kept as text.
    pub fn parse_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Empty;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Value::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Value::Boolean(false);
        }
        if is_decimal_literal(trimmed) {
            if let Ok(n) = trimmed.parse::<f64>() {
                return Value::Number(n);
            }
        }
        Value::String(raw.to_string())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Empty => serializer.serialize_str(""),
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Date(_) => serializer.serialize_str(&self.to_text()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Value::Empty
        } else {
            Value::String(s.to_string())
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Value::Empty
        } else {
            Value::String(s)
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(d: NaiveDateTime) -> Self {
        Value::Date(d)
    }
}

// 2^53
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a date or date-time string.
///
/// Accepts RFC 3339 (converted to UTC), ISO-like date-times with `T` or a
/// space, and plain dates at midnight.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// String to number conversion with the loose-comparison rules: surrounding
/// whitespace is ignored, blank is zero, anything unparseable is NaN.
pub(crate) fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    if is_decimal_literal(s) {
        s.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn is_decimal_literal(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

/// Shortest round-trip text, in exponent form (`1e+21`, `1.5e-7`) outside
/// `1e-6 <= |n| < 1e21`
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        }
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::Empty.kind(), ValueKind::String);
        assert_eq!(Value::from("abc").kind(), ValueKind::String);
        assert_eq!(Value::from(1).kind(), ValueKind::Number);
        assert_eq!(Value::from(true).kind(), ValueKind::Boolean);
    }

    #[test]
    fn test_empty_string_is_empty_cell() {
        assert_eq!(Value::from(""), Value::Empty);
        assert_eq!(Value::String(String::new()), Value::Empty);
        assert!(Value::String(String::new()).is_empty());
        assert!(!Value::from(0).is_empty());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Value::Empty.to_number(), 0.0);
        assert_eq!(Value::from(" 12 ").to_number(), 12.0);
        assert_eq!(Value::from("1e3").to_number(), 1000.0);
        assert_eq!(Value::from("0x1f").to_number(), 31.0);
        assert_eq!(Value::from("-Infinity").to_number(), f64::NEG_INFINITY);
        assert_eq!(Value::from(true).to_number(), 1.0);
        assert!(Value::from("abc").to_number().is_nan());
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::from("1_000").to_number().is_nan());
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::from(3).to_text(), "3");
        assert_eq!(Value::from(1.5).to_text(), "1.5");
        assert_eq!(Value::from(-0.0).to_text(), "0");
        assert_eq!(Value::Number(f64::NAN).to_text(), "NaN");
        assert_eq!(Value::from(false).to_text(), "false");
        assert_eq!(Value::Empty.to_text(), "");
    }

    #[test]
    fn test_to_text_exponent_form() {
        assert_eq!(Value::from(1e21).to_text(), "1e+21");
        assert_eq!(Value::from(-2.5e30).to_text(), "-2.5e+30");
        assert_eq!(Value::from(1e-7).to_text(), "1e-7");
        assert_eq!(Value::from(1.5e-7).to_text(), "1.5e-7");
        assert_eq!(Value::from(1e20).to_text(), "100000000000000000000");
        assert_eq!(Value::from(0.000001).to_text(), "0.000001");
    }

    #[test]
    fn test_parse_date() {
        let midnight = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        assert_eq!(parse_date("2024-03-09"), Some(midnight));
        assert_eq!(parse_date("2024/03/09"), Some(midnight));
        assert_eq!(parse_date("2024-03-09T00:00:00Z"), Some(midnight));
        assert_eq!(parse_date("2024-03-09T09:00:00+09:00"), Some(midnight));
        assert_eq!(parse_date("2024-03-09 00:00:00"), Some(midnight));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_to_date() {
        let epoch = DateTime::from_timestamp_millis(0).unwrap().naive_utc();
        assert_eq!(Value::from(0).to_date(), Some(epoch));
        assert_eq!(Value::Empty.to_date(), None);
        assert_eq!(Value::from(true).to_date(), None);
        assert_eq!(Value::from("garbage").to_date(), None);
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(Value::parse_cell(""), Value::Empty);
        assert_eq!(Value::parse_cell("  "), Value::Empty);
        assert_eq!(Value::parse_cell("42"), Value::from(42));
        assert_eq!(Value::parse_cell("-1.25"), Value::from(-1.25));
        assert_eq!(Value::parse_cell("TRUE"), Value::from(true));
        assert_eq!(Value::parse_cell("Japan"), Value::from("Japan"));
        assert_eq!(Value::parse_cell("2024-01-01"), Value::from("2024-01-01"));
    }

    #[test]
    fn test_serialize() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Value::from(2))?, "2");
        assert_eq!(serde_json::to_string(&Value::from(2.5))?, "2.5");
        assert_eq!(serde_json::to_string(&Value::Empty)?, "\"\"");
        assert_eq!(serde_json::to_string(&Value::from("eoka"))?, "\"eoka\"");
        Ok(())
    }
}
