//! Well records as received and as enriched by the pipeline

use serde::{Deserialize, Serialize};

use super::{SpacingBucket, VolumeBucket};

/// A single well row as supplied by the input provider.
///
/// Immutable once read; the pipeline never mutates it, it only wraps it in an
/// [`EnrichedWell`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    /// 0-based position of the row in the input table
    pub row: usize,
    /// Zone grouping key (`Zone Name`)
    pub zone: String,
    /// Easting, same linear unit as `y` (metres)
    pub x: f64,
    /// Northing (metres)
    pub y: f64,
    /// Cumulative production
    pub cum: f64,
    /// Raw field values of the source row, in header order. Empty for
    /// records built in code.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_fields: Vec<String>,
}

impl WellRecord {
    pub fn new(row: usize, zone: impl Into<String>, x: f64, y: f64, cum: f64) -> Self {
        Self {
            row,
            zone: zone.into(),
            x,
            y,
            cum,
            source_fields: Vec::new(),
        }
    }
}

/// A well together with its derived spacing and volume classification.
///
/// Serialized field names follow the exported column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedWell {
    #[serde(flatten)]
    pub well: WellRecord,
    /// Distance to the nearest other well in the same zone.
    /// `f64::INFINITY` when the zone holds a single well.
    #[serde(rename = "distancia_min")]
    pub distance_min: f64,
    /// Drainage area in acres implied by `distance_min` as a circle diameter
    #[serde(rename = "espaciamiento_acres")]
    pub spacing_acres: f64,
    #[serde(skip)]
    pub spacing_bucket: SpacingBucket,
    #[serde(skip)]
    pub volume_bucket: VolumeBucket,
    #[serde(rename = "grupo_espaciamiento")]
    pub spacing_group: String,
    #[serde(rename = "grupo_volumen")]
    pub volume_group: String,
    #[serde(rename = "grupo_combined")]
    pub combined_group: String,
}

impl EnrichedWell {
    /// Whether another well exists in the same zone.
    pub fn has_neighbor(&self) -> bool {
        self.distance_min.is_finite()
    }
}
