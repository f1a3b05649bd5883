//! Classification pipeline
//!
//! Zone partition → nearest-neighbor distances → acreage → spacing and volume
//! buckets → combined group key.
//!
//! Each zone is an independent unit of work: it reads only its own wells and
//! returns its own enriched table. Zones run on the rayon pool when
//! `parallel` is set and are collected after all of them finish. A
//! cancellation token is checked before each zone starts; zones already in
//! flight complete, the rest are reported as cancelled.
//!
//! ## Usage
//!
//! ```ignore
//! let result = classify(&wells, &ClassificationThresholds::default())?;
//! for table in &result.zones {
//!     println!("{}: {} wells", table.zone, table.wells.len());
//! }
//! ```

use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::classify::{classify_spacing, classify_volume, combine_labels};
use crate::config::defaults;
use crate::error::{TriageError, ZoneError};
use crate::spacing::{distance_to_acres, min_distances_with, NeighborStrategy, Point};
use crate::types::{ClassificationThresholds, EnrichedWell, LabelStyle, WellRecord};
use crate::zones::{partition_by_zone, ZoneSubset};

// ============================================================================
// Options
// ============================================================================

/// Tuning that does not change which bucket a well lands in.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOptions {
    pub label_style: LabelStyle,
    /// Joins the spacing and volume labels into `combined_group`
    pub separator: String,
    pub neighbors: NeighborStrategy,
    /// Process zones on the rayon pool
    pub parallel: bool,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            label_style: LabelStyle::default(),
            separator: defaults::COMBINED_SEPARATOR.to_string(),
            neighbors: NeighborStrategy::default(),
            parallel: true,
        }
    }
}

// ============================================================================
// Outcome Types
// ============================================================================

/// Enriched wells of one zone, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneTable {
    pub zone: String,
    pub wells: Vec<EnrichedWell>,
}

impl ZoneTable {
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

/// A zone that could not be classified.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneFailure {
    pub zone: String,
    pub error: ZoneError,
}

/// Result of one classification run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Classified zones in first-seen order
    pub zones: Vec<ZoneTable>,
    /// Zones whose input was unusable
    pub failures: Vec<ZoneFailure>,
    /// Zones never started because the run was cancelled
    pub cancelled: Vec<String>,
    labels: Vec<String>,
}

impl Classification {
    /// Every zone label seen in the input, in first-seen order, whatever its outcome.
    pub fn zone_labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, zone: &str) -> Option<&ZoneTable> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    pub fn failure(&self, zone: &str) -> Option<&ZoneFailure> {
        self.failures.iter().find(|f| f.zone == zone)
    }

    /// Number of wells that were classified.
    pub fn total_wells(&self) -> usize {
        self.zones.iter().map(ZoneTable::len).sum()
    }

    /// All zones classified, none failed or cancelled.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.cancelled.is_empty()
    }
}

enum ZoneOutcome {
    Classified(ZoneTable),
    Failed(ZoneFailure),
    Cancelled(String),
}

// ============================================================================
// Classifier
// ============================================================================

/// Validated thresholds plus options, ready to classify any number of tables.
#[derive(Debug, Clone)]
pub struct Classifier {
    thresholds: ClassificationThresholds,
    options: ClassifierOptions,
    cancel: CancellationToken,
}

impl Classifier {
    /// Fails fast on unordered thresholds or an empty separator.
    pub fn new(
        thresholds: ClassificationThresholds,
        options: ClassifierOptions,
    ) -> Result<Self, TriageError> {
        let mut errors = thresholds.violations();
        if options.separator.is_empty() {
            errors.push("labels.separator must not be empty".to_string());
        }
        if !errors.is_empty() {
            return Err(TriageError::Configuration(errors));
        }
        Ok(Self {
            thresholds,
            options,
            cancel: CancellationToken::new(),
        })
    }

    /// Use an externally owned token so the caller can stop the run between zones.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn thresholds(&self) -> &ClassificationThresholds {
        &self.thresholds
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Classify every zone of `wells`.
    pub fn classify(&self, wells: &[WellRecord]) -> Classification {
        self.classify_with_progress(wells, |_| {})
    }

    /// [`Classifier::classify`], calling `on_zone_done` with each zone label
    /// once that zone is classified or has failed. Cancelled zones are not reported.
    pub fn classify_with_progress<F>(&self, wells: &[WellRecord], on_zone_done: F) -> Classification
    where
        F: Fn(&str) + Sync,
    {
        let partition = partition_by_zone(wells);
        let labels: Vec<String> = partition.labels().into_iter().map(str::to_string).collect();
        let subsets = partition.into_subsets();

        info!(
            wells = wells.len(),
            zones = subsets.len(),
            parallel = self.options.parallel,
            "Classifying wells"
        );

        let outcomes: Vec<ZoneOutcome> = if self.options.parallel {
            subsets.par_iter().map(|z| self.run_zone(z, &on_zone_done)).collect()
        } else {
            subsets.iter().map(|z| self.run_zone(z, &on_zone_done)).collect()
        };

        let mut result = Classification {
            labels,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                ZoneOutcome::Classified(table) => result.zones.push(table),
                ZoneOutcome::Failed(failure) => result.failures.push(failure),
                ZoneOutcome::Cancelled(zone) => result.cancelled.push(zone),
            }
        }

        info!(
            classified_zones = result.zones.len(),
            classified_wells = result.total_wells(),
            failed_zones = result.failures.len(),
            cancelled_zones = result.cancelled.len(),
            "Classification complete"
        );
        result
    }

    fn run_zone<F>(&self, subset: &ZoneSubset<'_>, on_zone_done: &F) -> ZoneOutcome
    where
        F: Fn(&str) + Sync,
    {
        if self.cancel.is_cancelled() {
            debug!(zone = %subset.label, "Skipping zone, run cancelled");
            return ZoneOutcome::Cancelled(subset.label.to_string());
        }
        let outcome = match self.classify_zone(subset) {
            Ok(table) => ZoneOutcome::Classified(table),
            Err(error) => {
                warn!(zone = %subset.label, error = %error, "Zone could not be classified");
                ZoneOutcome::Failed(ZoneFailure {
                    zone: subset.label.to_string(),
                    error,
                })
            }
        };
        on_zone_done(subset.label);
        outcome
    }

    /// Classify one zone's wells.
    pub fn classify_zone(&self, subset: &ZoneSubset<'_>) -> Result<ZoneTable, ZoneError> {
        check_zone_inputs(subset)?;

        let points: Vec<Point> = subset.wells.iter().map(|w| Point::new(w.x, w.y)).collect();
        let distances = min_distances_with(&points, self.options.neighbors);

        if subset.len() == 1 {
            debug!(zone = %subset.label, "Single-well zone has no nearest neighbor");
        }

        let t = &self.thresholds;
        let style = self.options.label_style;
        let wells = subset
            .wells
            .iter()
            .zip(distances)
            .map(|(&well, distance_min)| {
                let spacing_acres = distance_to_acres(distance_min);
                let spacing_bucket = classify_spacing(spacing_acres, &t.spacing);
                let volume_bucket = classify_volume(well.cum, &t.volume);
                let spacing_group = spacing_bucket.label(&t.spacing, style);
                let volume_group = volume_bucket.label(&t.volume, style);
                let combined_group =
                    combine_labels(&spacing_group, &volume_group, &self.options.separator);
                EnrichedWell {
                    well: well.clone(),
                    distance_min,
                    spacing_acres,
                    spacing_bucket,
                    volume_bucket,
                    spacing_group,
                    volume_group,
                    combined_group,
                }
            })
            .collect::<Vec<_>>();

        debug!(zone = %subset.label, wells = wells.len(), "Zone classified");
        Ok(ZoneTable {
            zone: subset.label.to_string(),
            wells,
        })
    }
}

/// Reject coordinates and Cum values no bucket can represent.
fn check_zone_inputs(subset: &ZoneSubset<'_>) -> Result<(), ZoneError> {
    for w in &subset.wells {
        if !w.x.is_finite() || !w.y.is_finite() {
            return Err(ZoneError::NonFiniteCoordinate {
                row: w.row,
                x: w.x,
                y: w.y,
            });
        }
        if !w.cum.is_finite() || w.cum < 0.0 {
            return Err(ZoneError::InvalidCumulative {
                row: w.row,
                value: w.cum,
            });
        }
    }
    Ok(())
}

/// Classify `wells` with default options.
///
/// Thresholds are validated first; an invalid set aborts before any zone runs.
pub fn classify(
    wells: &[WellRecord],
    thresholds: &ClassificationThresholds,
) -> Result<Classification, TriageError> {
    let classifier = Classifier::new(*thresholds, ClassifierOptions::default())?;
    Ok(classifier.classify(wells))
}
