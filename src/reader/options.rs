//! Reader configuration.
//!
//! Options are plain serde data so they can be loaded from a JSON file. Keys
//! are snake_case; the camelCase spellings (`skipHeaders`, `headerConverter`,
//! `pickFields`, `strictComparison`) are accepted as aliases.

use crate::catalog::HeaderConverter;
use crate::expression::ComparisonMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options of a sheet reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderOptions {
    /// Leading rows dropped before the body starts
    #[serde(alias = "skipHeaders")]
    pub skip_headers: usize,
    /// Normalization applied to header names
    #[serde(alias = "headerConverter")]
    pub header_converter: HeaderConverter,
    /// Field names used for records instead of the headers
    #[serde(alias = "pickFields")]
    pub pick_fields: Option<Vec<String>>,
    /// Reject comparisons between cells and needles of different kinds
    #[serde(alias = "strictComparison")]
    pub strict_comparison: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            skip_headers: 1,
            header_converter: HeaderConverter::default(),
            pick_fields: None,
            strict_comparison: false,
        }
    }
}

impl ReaderOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse reader options")
    }

    /// Load options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid options file {}", path.display()))
    }

    /// Overwrite the options present in `patch`, keeping the others
    pub fn merge(&mut self, patch: OptionsPatch) {
        if let Some(skip_headers) = patch.skip_headers {
            self.skip_headers = skip_headers;
        }
        if let Some(header_converter) = patch.header_converter {
            self.header_converter = header_converter;
        }
        if let Some(pick_fields) = patch.pick_fields {
            self.pick_fields = Some(pick_fields);
        }
        if let Some(strict_comparison) = patch.strict_comparison {
            self.strict_comparison = strict_comparison;
        }
    }

    pub fn comparison_mode(&self) -> ComparisonMode {
        ComparisonMode::from_strict(self.strict_comparison)
    }
}

/// A partial set of options, merged over existing ones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsPatch {
    #[serde(alias = "skipHeaders")]
    pub skip_headers: Option<usize>,
    #[serde(alias = "headerConverter")]
    pub header_converter: Option<HeaderConverter>,
    #[serde(alias = "pickFields")]
    pub pick_fields: Option<Vec<String>>,
    #[serde(alias = "strictComparison")]
    pub strict_comparison: Option<bool>,
}

impl OptionsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let opts = ReaderOptions::default();
        assert_eq!(opts.skip_headers, 1);
        assert_eq!(opts.header_converter, HeaderConverter::Lowercase);
        assert_eq!(opts.pick_fields, None);
        assert!(!opts.strict_comparison);
        assert_eq!(opts.comparison_mode(), ComparisonMode::Coercive);
    }

    #[test]
    fn test_merge_keeps_unset_options() {
        let mut opts = ReaderOptions::default();
        opts.merge(OptionsPatch {
            skip_headers: Some(0),
            ..Default::default()
        });
        assert_eq!(
            opts,
            ReaderOptions {
                skip_headers: 0,
                ..Default::default()
            }
        );

        opts.merge(OptionsPatch {
            strict_comparison: Some(true),
            ..Default::default()
        });
        assert_eq!(opts.skip_headers, 0);
        assert_eq!(opts.comparison_mode(), ComparisonMode::Strict);
    }

    #[test]
    fn test_parse_camel_case_keys() -> Result<()> {
        let opts = ReaderOptions::from_json_str(
            r#"{"skipHeaders": 2, "headerConverter": "toUpperCase", "pickFields": ["a", "b"]}"#,
        )?;
        assert_eq!(opts.skip_headers, 2);
        assert_eq!(opts.header_converter, HeaderConverter::Uppercase);
        assert_eq!(
            opts.pick_fields,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(!opts.strict_comparison);
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(ReaderOptions::from_json_str(r#"{"foo": "bar"}"#).is_err());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"{{"strict_comparison": true, "header_converter": "trim"}}"#)?;
        let opts = ReaderOptions::load(file.path())?;
        assert!(opts.strict_comparison);
        assert_eq!(opts.header_converter, HeaderConverter::Trim);
        assert_eq!(opts.skip_headers, 1);
        Ok(())
    }

    #[test]
    fn test_empty_patch() {
        assert!(OptionsPatch::default().is_empty());
        assert!(!OptionsPatch {
            skip_headers: Some(1),
            ..Default::default()
        }
        .is_empty());
    }
}
