//! Rule-based bucketing on the spacing (acreage) and volume (Cum) axes
//!
//! Boundaries belong to the lower bucket (`<=`). The top spacing bucket is
//! entered above `x4` but labelled with `x5`; the top volume bucket is
//! entered above `y2` but labelled with `y3`. `x5`/`y3` are display markers.
//!
//! Non-finite acreage (a well alone in its zone, or NaN) always lands in the
//! top spacing bucket.

use crate::types::{LabelStyle, SpacingBucket, SpacingThresholds, VolumeBucket, VolumeThresholds};

/// Bucket an acreage value.
pub fn classify_spacing(acres: f64, t: &SpacingThresholds) -> SpacingBucket {
    if !acres.is_finite() {
        return SpacingBucket::AboveX5;
    }
    if acres <= t.x1 {
        SpacingBucket::BelowX1
    } else if acres <= t.x2 {
        SpacingBucket::X1ToX2
    } else if acres <= t.x3 {
        SpacingBucket::X2ToX3
    } else if acres <= t.x4 {
        SpacingBucket::X3ToX4
    } else {
        SpacingBucket::AboveX5
    }
}

/// Bucket a cumulative-production value.
///
/// NaN falls through to the top bucket; the pipeline rejects such rows
/// per zone before they get here.
pub fn classify_volume(cum: f64, t: &VolumeThresholds) -> VolumeBucket {
    if cum <= t.y1 {
        VolumeBucket::AtMostY1
    } else if cum <= t.y2 {
        VolumeBucket::Y1ToY2
    } else {
        VolumeBucket::AboveY3
    }
}

/// Acreage straight to its label.
pub fn spacing_label(acres: f64, t: &SpacingThresholds, style: LabelStyle) -> String {
    classify_spacing(acres, t).label(t, style)
}

/// Cum straight to its label.
pub fn volume_label(cum: f64, t: &VolumeThresholds, style: LabelStyle) -> String {
    classify_volume(cum, t).label(t, style)
}

/// Joint classification key: `spacing + separator + volume`.
pub fn combine_labels(spacing: &str, volume: &str, separator: &str) -> String {
    let mut combined = String::with_capacity(spacing.len() + separator.len() + volume.len());
    combined.push_str(spacing);
    combined.push_str(separator);
    combined.push_str(volume);
    combined
}
