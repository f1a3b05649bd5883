//! Config validation: unknown-key detection with Levenshtein suggestions
//! and plausibility checks on threshold ranges.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for TriageConfig.
///
/// Maintained by hand to match the struct hierarchy in triage_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [spacing]
        "spacing",
        "spacing.x1",
        "spacing.x2",
        "spacing.x3",
        "spacing.x4",
        "spacing.x5",
        // [volume]
        "volume",
        "volume.y1",
        "volume.y2",
        "volume.y3",
        // [labels]
        "labels",
        "labels.style",
        "labels.separator",
        // [neighbors]
        "neighbors",
        "neighbors.strategy",
        "neighbors.kd_tree_min_zone_size",
        // [input]
        "input",
        "input.zone_column",
        "input.x_column",
        "input.y_column",
        "input.cum_column",
        "input.delimiter",
        // [export]
        "export",
        "export.file_suffix",
        "export.delimiter",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so the suggestion is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Unknown keys only warn, they never fail the load.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// One square mile. Spacing buckets beyond a full section are unusual.
const SECTION_ACRES: f64 = 640.0;

/// Validate plausibility on a parsed TriageConfig.
///
/// Returns (errors, warnings). Errors are impossible values that must
/// prevent a run; warnings are suspicious but not fatal. Threshold ordering
/// itself is checked by `ClassificationThresholds::violations`.
pub fn validate_physical_ranges(
    config: &super::TriageConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // kd-tree switch size: 0 would route every zone, including empty ones, to the tree
    if config.neighbors.kd_tree_min_zone_size == 0 {
        errors.push("neighbors.kd_tree_min_zone_size must be > 0".to_string());
    }

    let x5 = config.spacing.x5;
    if x5.is_finite() && x5 > SECTION_ACRES {
        warnings.push(ValidationWarning {
            field: "spacing.x5".to_string(),
            message: format!(
                "spacing.x5 = {x5} acres is larger than a full section ({SECTION_ACRES} acres)"
            ),
            suggestion: None,
        });
    }

    // x5/y3 are display markers; a marker far from the cut point mislabels the top bucket
    for (field, cut, marker) in [
        ("spacing.x5", config.spacing.x4, config.spacing.x5),
        ("volume.y3", config.volume.y2, config.volume.y3),
    ] {
        if cut.is_finite() && marker.is_finite() && cut > 0.0 && marker > cut * 2.0 {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: format!(
                    "{field} = {marker} is more than twice its cut point ({cut}); the top bucket label will overstate its lower edge"
                ),
                suggestion: None,
            });
        }
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriageConfig;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("spacing", "spacing"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("spcing", "spacing"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [spacing]
            x1 = 4.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"spacing".to_string()));
        assert!(keys.contains(&"spacing.x1".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[labels]
seperator = " | "
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("seperator"));
        assert_eq!(warnings[0].suggestion.as_deref(), Some("labels.separator"));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[spacing]
x1 = 4.0
x5 = 10.01

[volume]
y2 = 20.0

[neighbors]
strategy = "auto"
kd_tree_min_zone_size = 512

[input]
zone_column = "Zone Name"
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {:?}", warnings);
    }

    #[test]
    fn test_unknown_section_produces_warning() {
        let warnings = validate_unknown_keys("[clustering]\nk = 4\n");
        assert!(warnings.iter().any(|w| w.field == "clustering"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_physical_ranges_defaults_clean() {
        let (errors, warnings) = validate_physical_ranges(&TriageConfig::default());
        assert!(errors.is_empty(), "Defaults should produce no errors: {errors:?}");
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {warnings:?}");
    }

    #[test]
    fn test_zero_kd_tree_size_is_error() {
        let mut config = TriageConfig::default();
        config.neighbors.kd_tree_min_zone_size = 0;
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("kd_tree_min_zone_size")));
    }

    #[test]
    fn test_far_display_marker_warns() {
        let mut config = TriageConfig::default();
        config.volume.y3 = 100.0;
        let (_, warnings) = validate_physical_ranges(&config);
        assert!(warnings.iter().any(|w| w.field == "volume.y3"));
    }

    #[test]
    fn test_huge_spacing_warns() {
        let mut config = TriageConfig::default();
        config.spacing.x4 = 700.0;
        config.spacing.x5 = 800.0;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "spacing.x5"));
    }
}
