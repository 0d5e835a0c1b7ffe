//! Reduction configuration
//!
//! Loaded from a TOML file; every field is optional and falls back to the
//! defaults below.
//!
//! ```toml
//! name_segment_cutoff = 105.0
//! suppress_short_name_segments = true
//! collapse_use_lane = false
//! name_suffixes = ["N", "S", "Nord", "Sud"]
//! ```

use std::fs;
use std::path::Path;

use butterfly_common::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::guidance::collapsing_utility::NAME_SEGMENT_CUTOFF_LENGTH;
use crate::guidance::name_announcements::DEFAULT_SUFFIXES;

/// Which passes run, and how eagerly name changes are folded away
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReductionConfig {
    /// Name changes followed by less than this many meters before the next
    /// real turn are merged into the preceding instruction
    pub name_segment_cutoff: f64,

    /// Run the short-name-segment suppressor
    pub suppress_short_name_segments: bool,

    /// Run the use-lane collapser
    pub collapse_use_lane: bool,

    /// Prefixes/suffixes ignored when comparing street names
    pub name_suffixes: Vec<String>,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            name_segment_cutoff: NAME_SEGMENT_CUTOFF_LENGTH,
            suppress_short_name_segments: true,
            collapse_use_lane: true,
            name_suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ReductionConfig {
    /// Only the short-name-segment suppressor
    pub fn names_only() -> Self {
        Self {
            collapse_use_lane: false,
            ..Self::default()
        }
    }

    /// Only the use-lane collapser
    pub fn lanes_only() -> Self {
        Self {
            suppress_short_name_segments: false,
            ..Self::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ReductionConfig =
            toml::from_str(contents).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded reduction config from {}", path.as_ref().display());
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.name_segment_cutoff.is_finite() || self.name_segment_cutoff <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "name_segment_cutoff must be a positive number of meters, got {}",
                self.name_segment_cutoff
            )));
        }
        if let Some(blank) = self.name_suffixes.iter().find(|s| s.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "name_suffixes may not contain blank entries, got {blank:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ReductionConfig::default();
        assert_eq!(config.name_segment_cutoff, 105.0);
        assert!(config.suppress_short_name_segments);
        assert!(config.collapse_use_lane);
        assert!(config.name_suffixes.iter().any(|s| s == "North"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ReductionConfig::from_toml_str("collapse_use_lane = false\n").unwrap();
        assert!(!config.collapse_use_lane);
        assert!(config.suppress_short_name_segments);
        assert_eq!(config.name_segment_cutoff, 105.0);
    }

    #[test]
    fn test_full_toml() {
        let config = ReductionConfig::from_toml_str(
            r#"
            name_segment_cutoff = 80.0
            suppress_short_name_segments = false
            collapse_use_lane = true
            name_suffixes = ["Nord", "Sud"]
            "#,
        )
        .unwrap();
        assert_eq!(config.name_segment_cutoff, 80.0);
        assert!(!config.suppress_short_name_segments);
        assert_eq!(config.name_suffixes, vec!["Nord".to_string(), "Sud".to_string()]);
    }

    #[test]
    fn test_rejects_invalid_cutoff() {
        let err = ReductionConfig::from_toml_str("name_segment_cutoff = -5.0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("name_segment_cutoff"));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = ReductionConfig::from_toml_str("cutoff = 10.0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_blank_suffix() {
        let err = ReductionConfig::from_toml_str(r#"name_suffixes = ["N", " "]"#).unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn test_presets() {
        assert!(!ReductionConfig::names_only().collapse_use_lane);
        assert!(!ReductionConfig::lanes_only().suppress_short_name_segments);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name_segment_cutoff = 50.0").unwrap();
        let config = ReductionConfig::load(file.path()).unwrap();
        assert_eq!(config.name_segment_cutoff, 50.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReductionConfig::load("/nonexistent/guidance.toml").unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
