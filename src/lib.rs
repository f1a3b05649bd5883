//! Workover Triage: well spacing and volume classification
//!
//! Groups wells by zone, measures each well's distance to its nearest
//! neighbor, converts it to an implied drainage area in acres, and assigns
//! every well a spacing bucket, a volume bucket and the combined group used
//! to shortlist workover candidates.
//!
//! ## Architecture
//!
//! - **Spacing**: nearest-neighbor distances (dense matrix or k-d tree) and acreage
//! - **Classify**: threshold buckets and their labels
//! - **Pipeline**: per-zone fan-out, failure isolation and cancellation
//! - **Ingest / Export / Report**: CSV in, per-zone CSV out, summaries

pub mod config;
pub mod types;
pub mod error;
pub mod spacing;
pub mod classify;
pub mod zones;
pub mod pipeline;
pub mod ingest;
pub mod export;
pub mod report;

// Re-export configuration
pub use config::{ConfigError, TriageConfig};

// Re-export commonly used types
pub use types::{
    ClassificationThresholds, EnrichedWell, LabelStyle, SpacingBucket, SpacingThresholds,
    VolumeBucket, VolumeThresholds, WellRecord,
};

pub use error::{TriageError, ZoneError};

// Re-export the pipeline entry points
pub use pipeline::{
    classify, Classification, Classifier, ClassifierOptions, ZoneFailure, ZoneTable,
};
pub use spacing::NeighborStrategy;
pub use ingest::{read_wells, read_wells_from_path, TableSchema, WellTable};
pub use export::write_zone_tables;
pub use report::{RunSummary, ZoneSummary};
