//! Bucket boundaries for the spacing (acreage) and volume (Cum) axes

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::error::TriageError;

/// Five ordered acreage boundaries, `x1 < x2 < x3 < x4 < x5`.
///
/// `x5` is a display marker only: the top bucket is entered above `x4`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingThresholds {
    pub x1: f64,
    pub x2: f64,
    pub x3: f64,
    pub x4: f64,
    pub x5: f64,
}

impl Default for SpacingThresholds {
    fn default() -> Self {
        Self {
            x1: defaults::SPACING_X1_ACRES,
            x2: defaults::SPACING_X2_ACRES,
            x3: defaults::SPACING_X3_ACRES,
            x4: defaults::SPACING_X4_ACRES,
            x5: defaults::SPACING_X5_ACRES,
        }
    }
}

impl SpacingThresholds {
    pub fn new(x1: f64, x2: f64, x3: f64, x4: f64, x5: f64) -> Self {
        Self { x1, x2, x3, x4, x5 }
    }

    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("x1", self.x1),
            ("x2", self.x2),
            ("x3", self.x3),
            ("x4", self.x4),
            ("x5", self.x5),
        ]
    }
}

/// Three ordered Cum boundaries, `y1 < y2 < y3`.
///
/// `y3` is a display marker only: the top bucket is entered above `y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeThresholds {
    pub y1: f64,
    pub y2: f64,
    pub y3: f64,
}

impl Default for VolumeThresholds {
    fn default() -> Self {
        Self {
            y1: defaults::VOLUME_Y1,
            y2: defaults::VOLUME_Y2,
            y3: defaults::VOLUME_Y3,
        }
    }
}

impl VolumeThresholds {
    pub fn new(y1: f64, y2: f64, y3: f64) -> Self {
        Self { y1, y2, y3 }
    }

    fn named(&self) -> [(&'static str, f64); 3] {
        [("y1", self.y1), ("y2", self.y2), ("y3", self.y3)]
    }
}

/// Full threshold set for one classification run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    pub spacing: SpacingThresholds,
    pub volume: VolumeThresholds,
}

impl ClassificationThresholds {
    pub fn new(spacing: SpacingThresholds, volume: VolumeThresholds) -> Self {
        Self { spacing, volume }
    }

    /// Collect every ordering/range violation without failing.
    pub fn violations(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_axis("spacing", &self.spacing.named(), &mut errors);
        check_axis("volume", &self.volume.named(), &mut errors);
        errors
    }

    /// Reject thresholds that are not finite, negative, or not strictly
    /// increasing per axis. Thresholds are never reordered.
    pub fn validate(&self) -> Result<(), TriageError> {
        let errors = self.violations();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(TriageError::Configuration(errors))
        }
    }
}

fn check_axis(axis: &str, values: &[(&'static str, f64)], errors: &mut Vec<String>) {
    // NaN/Inf comparisons silently pass, so reject them before ordering checks
    let non_finite: Vec<_> = values.iter().filter(|(_, v)| !v.is_finite()).collect();
    if !non_finite.is_empty() {
        for (name, v) in non_finite {
            errors.push(format!("{axis}.{name}: value must be finite (got {v})"));
        }
        return;
    }

    if let Some((name, v)) = values.first() {
        if *v < 0.0 {
            errors.push(format!("{axis}.{name} = {v} cannot be negative"));
        }
    }

    for pair in values.windows(2) {
        let (lo_name, lo) = pair[0];
        let (hi_name, hi) = pair[1];
        if hi <= lo {
            errors.push(format!(
                "{axis}: {hi_name} ({hi}) must be greater than {lo_name} ({lo})"
            ));
        }
    }
}
