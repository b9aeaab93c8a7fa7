// src/config.rs

use crate::error::{ProjectionError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fraction of current volume a projected drop must exceed to be flagged.
pub const DEFAULT_DECLINE_THRESHOLD: f64 = 0.4;

/// Length of each ranked list.
pub const DEFAULT_TOP_N: usize = 10;

/// Header names of the four required source columns.
///
/// Matching against the file's header row trims both sides, so the sheet's
/// `"articulo "` (trailing space) resolves whether or not the export keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub code: String,
    pub name: String,
    pub prior_units: String,
    pub current_units: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            code: "Código".to_string(),
            name: "articulo ".to_string(),
            prior_units: "Unidades periodo anterior".to_string(),
            current_units: "Unidades periodo".to_string(),
        }
    }
}

impl ColumnNames {
    /// All four required names, in table order.
    pub fn required(&self) -> [&str; 4] {
        [
            &self.code,
            &self.name,
            &self.prior_units,
            &self.current_units,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub decline_threshold: f64,
    pub top_n: usize,
    pub columns: ColumnNames,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            decline_threshold: DEFAULT_DECLINE_THRESHOLD,
            top_n: DEFAULT_TOP_N,
            columns: ColumnNames::default(),
        }
    }
}

impl ProjectionConfig {
    /// Parse a YAML document; missing keys fall back to defaults.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: ProjectionConfig = serde_yaml::from_str(s)
            .map_err(|e| ProjectionError::InvalidConfig(format!("yaml: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ProjectionError::ConfigIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.decline_threshold.is_finite() || self.decline_threshold < 0.0 {
            return Err(ProjectionError::InvalidConfig(format!(
                "decline_threshold must be a finite non-negative fraction, got {}",
                self.decline_threshold
            )));
        }
        for col in self.columns.required() {
            if col.trim().is_empty() {
                return Err(ProjectionError::InvalidConfig(
                    "column names must not be blank".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_source_sheet() {
        let cfg = ProjectionConfig::default();
        assert_eq!(cfg.decline_threshold, 0.4);
        assert_eq!(cfg.top_n, 10);
        assert_eq!(cfg.columns.name, "articulo ");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn yaml_overrides_only_given_keys() {
        let cfg = ProjectionConfig::from_yaml_str(
            "decline_threshold: 0.25\ncolumns:\n  code: SKU\n",
        )
        .unwrap();
        assert_eq!(cfg.decline_threshold, 0.25);
        assert_eq!(cfg.top_n, 10);
        assert_eq!(cfg.columns.code, "SKU");
        assert_eq!(cfg.columns.current_units, "Unidades periodo");
    }

    #[test]
    fn rejects_negative_threshold() {
        let err = ProjectionConfig::from_yaml_str("decline_threshold: -0.1").unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidConfig(_)));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectionConfig::from_yaml_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ProjectionError::ConfigIo { .. }));
    }

    #[test]
    fn rejects_blank_column_name() {
        let cfg = ProjectionConfig {
            columns: ColumnNames {
                prior_units: "  ".into(),
                ..ColumnNames::default()
            },
            ..ProjectionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
