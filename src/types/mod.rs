//! Shared data structures for the spacing/volume classification pipeline
//!
//! - `WellRecord`: one input row (zone, X/Y, cumulative production)
//! - `EnrichedWell`: a well plus every derived field the pipeline appends
//! - `SpacingThresholds` / `VolumeThresholds`: bucket boundaries per axis
//! - `SpacingBucket` / `VolumeBucket`: enumerated bucket identifiers

mod bucket;
pub mod thresholds;
mod well;

pub use bucket::*;
pub use thresholds::*;
pub use well::*;
