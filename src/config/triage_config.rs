//! Triage Configuration - thresholds and table layout as operator-tunable TOML
//!
//! Each section implements `Default` with the values field engineers start
//! from, so an empty or missing file yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::pipeline::ClassifierOptions;
use crate::spacing::NeighborStrategy;
use crate::types::{ClassificationThresholds, LabelStyle, SpacingThresholds, VolumeThresholds};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a classification run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Acreage boundaries x1..x5
    #[serde(default)]
    pub spacing: SpacingThresholds,

    /// Cumulative-production boundaries y1..y3
    #[serde(default)]
    pub volume: VolumeThresholds,

    /// Label wording
    #[serde(default)]
    pub labels: LabelConfig,

    /// Nearest-neighbor algorithm selection
    #[serde(default)]
    pub neighbors: NeighborConfig,

    /// Input table layout
    #[serde(default)]
    pub input: InputConfig,

    /// Per-zone export layout
    #[serde(default)]
    pub export: ExportConfig,
}

impl TriageConfig {
    /// Load configuration using the standard search order:
    /// 1. `explicit` path (fails if unreadable or invalid)
    /// 2. `$TRIAGE_CONFIG` (fails if the file exists but is invalid)
    /// 3. `./triage_config.toml` (fails if present but invalid)
    /// 4. Built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), "Loaded triage config");
            return Ok(config);
        }

        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                let config = Self::load_from_file(&p)?;
                info!(path = %p.display(), "Loaded triage config from {}", defaults::CONFIG_ENV_VAR);
                return Ok(config);
            }
            warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
        }

        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            let config = Self::load_from_file(&local)?;
            info!("Loaded triage config from ./{}", defaults::LOCAL_CONFIG_FILE);
            return Ok(config);
        }

        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse(&contents, path)
    }

    /// Parse and validate a TOML document held in memory.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, Path::new("<inline>"))
    }

    fn parse(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(origin.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Triage config saved");
        Ok(())
    }

    /// Apply CLI threshold overrides. Call `validate()` afterwards.
    pub fn apply_overrides(&mut self, overrides: &ThresholdOverrides) {
        let s = &mut self.spacing;
        let v = &mut self.volume;
        for (slot, value) in [
            (&mut s.x1, overrides.x1),
            (&mut s.x2, overrides.x2),
            (&mut s.x3, overrides.x3),
            (&mut s.x4, overrides.x4),
            (&mut s.x5, overrides.x5),
            (&mut v.y1, overrides.y1),
            (&mut v.y2, overrides.y2),
            (&mut v.y3, overrides.y3),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }

    pub fn thresholds(&self) -> ClassificationThresholds {
        ClassificationThresholds::new(self.spacing, self.volume)
    }

    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            label_style: self.labels.style,
            separator: self.labels.separator.clone(),
            neighbors: self.neighbors.strategy(),
            parallel: true,
        }
    }

    /// Validate thresholds and layout for internal consistency.
    ///
    /// Rules:
    /// - Each threshold axis must be finite, non-negative and strictly increasing
    /// - The label separator must be non-empty
    /// - Delimiters must be single ASCII characters other than quote/newline
    /// - Column names must be non-empty and distinct
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.thresholds().violations();

        if self.labels.separator.is_empty() {
            errors.push("labels.separator must not be empty".to_string());
        }

        Self::check_delimiter(self.input.delimiter, "input.delimiter", &mut errors);
        Self::check_delimiter(self.export.delimiter, "export.delimiter", &mut errors);

        let columns = self.input.required_columns();
        for (i, (key, name)) in columns.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(format!("input.{key} must not be empty"));
            }
            for (other_key, other) in &columns[i + 1..] {
                if name.trim().eq_ignore_ascii_case(other.trim()) {
                    errors.push(format!(
                        "input.{key} and input.{other_key} both name column '{name}'"
                    ));
                }
            }
        }

        if self.export.file_suffix.is_empty() {
            errors.push("export.file_suffix must not be empty".to_string());
        } else if self.export.file_suffix.contains(['/', '\\']) {
            errors.push(format!(
                "export.file_suffix '{}' must not contain path separators",
                self.export.file_suffix
            ));
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_delimiter(delimiter: char, name: &str, errors: &mut Vec<String>) {
        if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
            errors.push(format!(
                "{name} must be a single ASCII character other than quote or newline (got {delimiter:?})"
            ));
        }
    }
}

// ============================================================================
// CLI Overrides
// ============================================================================

/// Individual threshold values supplied on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdOverrides {
    pub x1: Option<f64>,
    pub x2: Option<f64>,
    pub x3: Option<f64>,
    pub x4: Option<f64>,
    pub x5: Option<f64>,
    pub y1: Option<f64>,
    pub y2: Option<f64>,
    pub y3: Option<f64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Labels
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    /// "interval" or "legacy"
    #[serde(default)]
    pub style: LabelStyle,

    /// Joins the spacing and volume labels
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    defaults::COMBINED_SEPARATOR.to_string()
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            style: LabelStyle::default(),
            separator: default_separator(),
        }
    }
}

// ============================================================================
// Neighbors
// ============================================================================

/// Nearest-neighbor algorithm as written in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborMode {
    Dense,
    KdTree,
    #[default]
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborConfig {
    #[serde(default)]
    pub strategy: NeighborMode,

    /// Zone size at which `auto` switches to the k-d tree
    #[serde(default = "default_kd_tree_min_zone_size")]
    pub kd_tree_min_zone_size: usize,
}

fn default_kd_tree_min_zone_size() -> usize {
    defaults::KD_TREE_MIN_ZONE_SIZE
}

impl Default for NeighborConfig {
    fn default() -> Self {
        Self {
            strategy: NeighborMode::default(),
            kd_tree_min_zone_size: default_kd_tree_min_zone_size(),
        }
    }
}

impl NeighborConfig {
    pub fn strategy(&self) -> NeighborStrategy {
        match self.strategy {
            NeighborMode::Dense => NeighborStrategy::Dense,
            NeighborMode::KdTree => NeighborStrategy::KdTree,
            NeighborMode::Auto => NeighborStrategy::Auto {
                min_zone_size: self.kd_tree_min_zone_size,
            },
        }
    }
}

// ============================================================================
// Input Layout
// ============================================================================

/// Column names of the required fields and the field delimiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_zone_column")]
    pub zone_column: String,

    #[serde(default = "default_x_column")]
    pub x_column: String,

    #[serde(default = "default_y_column")]
    pub y_column: String,

    #[serde(default = "default_cum_column")]
    pub cum_column: String,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_zone_column() -> String {
    defaults::ZONE_COLUMN.to_string()
}
fn default_x_column() -> String {
    defaults::X_COLUMN.to_string()
}
fn default_y_column() -> String {
    defaults::Y_COLUMN.to_string()
}
fn default_cum_column() -> String {
    defaults::CUM_COLUMN.to_string()
}
fn default_delimiter() -> char {
    defaults::DELIMITER
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            zone_column: default_zone_column(),
            x_column: default_x_column(),
            y_column: default_y_column(),
            cum_column: default_cum_column(),
            delimiter: default_delimiter(),
        }
    }
}

impl InputConfig {
    /// `(config key, column name)` for each required field.
    pub fn required_columns(&self) -> [(&'static str, &str); 4] {
        [
            ("zone_column", self.zone_column.as_str()),
            ("x_column", self.x_column.as_str()),
            ("y_column", self.y_column.as_str()),
            ("cum_column", self.cum_column.as_str()),
        ]
    }

    /// Delimiter as a byte for the csv reader. Validated to be ASCII.
    pub fn delimiter_byte(&self) -> u8 {
        ascii_byte(self.delimiter)
    }
}

// ============================================================================
// Export Layout
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Appended to the zone label to form the file name
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_file_suffix() -> String {
    defaults::EXPORT_FILE_SUFFIX.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_suffix: default_file_suffix(),
            delimiter: default_delimiter(),
        }
    }
}

impl ExportConfig {
    pub fn delimiter_byte(&self) -> u8 {
        ascii_byte(self.delimiter)
    }
}

fn ascii_byte(c: char) -> u8 {
    u8::try_from(c).ok().filter(u8::is_ascii).unwrap_or(b',')
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = TriageConfig::default();
        assert!(config.validate().is_ok(), "Default config must always validate");
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: TriageConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config, TriageConfig::default());
        assert_eq!(config.spacing.x1, 4.0);
        assert_eq!(config.volume.y3, 20.01);
        assert_eq!(config.labels.separator, " & ");
        assert_eq!(config.input.zone_column, "Zone Name");
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
[spacing]
x1 = 3.5

[labels]
style = "legacy"

[neighbors]
strategy = "kd_tree"
"#;
        let config = TriageConfig::from_toml_str(toml_str).expect("partial TOML should parse");
        assert_eq!(config.spacing.x1, 3.5);
        assert_eq!(config.spacing.x2, 6.0);
        assert_eq!(config.labels.style, LabelStyle::Legacy);
        assert_eq!(config.neighbors.strategy(), NeighborStrategy::KdTree);
    }

    #[test]
    fn test_validation_catches_inverted_thresholds() {
        let mut config = TriageConfig::default();
        config.spacing.x3 = 5.0;
        let result = config.validate();
        assert!(result.is_err(), "Inverted thresholds should fail validation");
        if let Err(ConfigError::Validation(errors)) = result {
            assert!(errors.iter().any(|e| e.contains("x3")));
        }
    }

    #[test]
    fn test_validation_catches_empty_separator() {
        let mut config = TriageConfig::default();
        config.labels.separator.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_catches_duplicate_columns() {
        let mut config = TriageConfig::default();
        config.input.y_column = "x".to_string();
        let Err(ConfigError::Validation(errors)) = config.validate() else {
            panic!("duplicate columns should fail");
        };
        assert!(errors.iter().any(|e| e.contains("x_column") && e.contains("y_column")));
    }

    #[test]
    fn test_validation_catches_bad_delimiter() {
        let mut config = TriageConfig::default();
        config.export.delimiter = '"';
        assert!(config.validate().is_err());
        config.export.delimiter = 'é';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_catches_suffix_with_separator() {
        let mut config = TriageConfig::default();
        config.export.file_suffix = "/x.csv".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_apply_only_given_values() {
        let mut config = TriageConfig::default();
        config.apply_overrides(&ThresholdOverrides {
            x1: Some(2.0),
            y3: Some(30.0),
            ..Default::default()
        });
        assert_eq!(config.spacing.x1, 2.0);
        assert_eq!(config.spacing.x2, 6.0);
        assert_eq!(config.volume.y3, 30.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_roundtrip_toml() {
        let original = TriageConfig::default();
        let toml_str = original.to_toml().expect("serialization should work");
        let roundtripped: TriageConfig = toml::from_str(&toml_str).expect("deserialization should work");
        assert_eq!(original, roundtripped);
        assert!(toml_str.contains("[spacing]"));
        assert!(toml_str.contains("[neighbors]"));
    }

    #[test]
    fn test_tab_delimiter() {
        let config = TriageConfig::from_toml_str("[input]\ndelimiter = \"\\t\"\n").unwrap();
        assert_eq!(config.input.delimiter_byte(), b'\t');
    }

    #[test]
    fn test_classifier_options_follow_config() {
        let mut config = TriageConfig::default();
        config.neighbors.strategy = NeighborMode::Auto;
        config.neighbors.kd_tree_min_zone_size = 64;
        let opts = config.classifier_options();
        assert_eq!(opts.neighbors, NeighborStrategy::Auto { min_zone_size: 64 });
        assert_eq!(opts.separator, " & ");
        assert!(opts.parallel);
    }
}
