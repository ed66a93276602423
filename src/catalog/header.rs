//! Header name normalization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalization applied to every header name when a column index is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderConverter {
    #[default]
    #[serde(alias = "toLowerCase")]
    Lowercase,
    #[serde(alias = "toUpperCase")]
    Uppercase,
    Trim,
    /// Keep header names as they are
    #[serde(alias = "none")]
    Verbatim,
}

impl HeaderConverter {
    pub fn apply(&self, header: &str) -> String {
        match self {
            HeaderConverter::Lowercase => header.to_lowercase(),
            HeaderConverter::Uppercase => header.to_uppercase(),
            HeaderConverter::Trim => header.trim().to_string(),
            HeaderConverter::Verbatim => header.to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderConverter::Lowercase => "lowercase",
            HeaderConverter::Uppercase => "uppercase",
            HeaderConverter::Trim => "trim",
            HeaderConverter::Verbatim => "verbatim",
        }
    }
}

impl FromStr for HeaderConverter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lowercase" | "lower" | "tolowercase" => Ok(HeaderConverter::Lowercase),
            "uppercase" | "upper" | "touppercase" => Ok(HeaderConverter::Uppercase),
            "trim" => Ok(HeaderConverter::Trim),
            "verbatim" | "none" => Ok(HeaderConverter::Verbatim),
            other => Err(format!(
                "unknown header converter '{}' (expected lowercase, uppercase, trim or verbatim)",
                other
            )),
        }
    }
}

impl fmt::Display for HeaderConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(HeaderConverter::Lowercase.apply("Country"), "country");
        assert_eq!(HeaderConverter::Uppercase.apply("Country"), "COUNTRY");
        assert_eq!(HeaderConverter::Trim.apply(" id "), "id");
        assert_eq!(HeaderConverter::Verbatim.apply(" Id "), " Id ");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("lower".parse::<HeaderConverter>(), Ok(HeaderConverter::Lowercase));
        assert_eq!("toUpperCase".parse::<HeaderConverter>(), Ok(HeaderConverter::Uppercase));
        assert_eq!("none".parse::<HeaderConverter>(), Ok(HeaderConverter::Verbatim));
        assert!("camel".parse::<HeaderConverter>().is_err());
    }

    #[test]
    fn test_deserialize_aliases() -> serde_json::Result<()> {
        let converter: HeaderConverter = serde_json::from_str("\"toLowerCase\"")?;
        assert_eq!(converter, HeaderConverter::Lowercase);
        let converter: HeaderConverter = serde_json::from_str("\"trim\"")?;
        assert_eq!(converter, HeaderConverter::Trim);
        Ok(())
    }
}
