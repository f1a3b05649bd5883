//! Presentation helpers: zone selection, group filtering and run summaries.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pipeline::{Classification, ZoneTable};
use crate::types::{
    ClassificationThresholds, EnrichedWell, LabelStyle, SpacingBucket, VolumeBucket,
};

// ============================================================================
// Selection
// ============================================================================

/// Enriched table of one zone, if it was classified.
pub fn select_zone<'a>(result: &'a Classification, zone: &str) -> Option<&'a ZoneTable> {
    result.get(zone)
}

/// Rows whose combined group equals `group`, in input order.
pub fn filter_group<'a>(rows: &'a [EnrichedWell], group: &str) -> Vec<&'a EnrichedWell> {
    rows.iter().filter(|w| w.combined_group == group).collect()
}

/// Combined groups present in `rows`, in first-seen order.
pub fn distinct_groups(rows: &[EnrichedWell]) -> Vec<&str> {
    let mut seen = Vec::new();
    for w in rows {
        if !seen.contains(&w.combined_group.as_str()) {
            seen.push(w.combined_group.as_str());
        }
    }
    seen
}

// ============================================================================
// Summaries
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCount {
    pub group: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSummary {
    pub zone: String,
    pub wells: usize,
    /// Wells that are alone in their zone
    pub without_neighbor: usize,
    /// Combined groups in first-seen order
    pub groups: Vec<GroupCount>,
    /// Every spacing bucket, tightest first, including empty ones
    pub spacing: Vec<GroupCount>,
    /// Every volume bucket, lowest first, including empty ones
    pub volume: Vec<GroupCount>,
}

impl ZoneSummary {
    pub fn new(table: &ZoneTable, thresholds: &ClassificationThresholds, style: LabelStyle) -> Self {
        let groups = distinct_groups(&table.wells)
            .into_iter()
            .map(|group| GroupCount {
                group: group.to_string(),
                count: table.wells.iter().filter(|w| w.combined_group == group).count(),
            })
            .collect();

        let mut spacing_counts: HashMap<SpacingBucket, usize> = HashMap::new();
        let mut volume_counts: HashMap<VolumeBucket, usize> = HashMap::new();
        for w in &table.wells {
            *spacing_counts.entry(w.spacing_bucket).or_default() += 1;
            *volume_counts.entry(w.volume_bucket).or_default() += 1;
        }

        Self {
            zone: table.zone.clone(),
            wells: table.len(),
            without_neighbor: table.wells.iter().filter(|w| !w.has_neighbor()).count(),
            groups,
            spacing: SpacingBucket::ALL
                .iter()
                .map(|b| GroupCount {
                    group: b.label(&thresholds.spacing, style),
                    count: spacing_counts.get(b).copied().unwrap_or(0),
                })
                .collect(),
            volume: VolumeBucket::ALL
                .iter()
                .map(|b| GroupCount {
                    group: b.label(&thresholds.volume, style),
                    count: volume_counts.get(b).copied().unwrap_or(0),
                })
                .collect(),
        }
    }
}

impl fmt::Display for ZoneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Zone {} ({} wells)", self.zone, self.wells)?;
        if self.without_neighbor > 0 {
            writeln!(f, "  wells without neighbor: {}", self.without_neighbor)?;
        }
        for g in &self.groups {
            writeln!(f, "  {:<40} {:>6}", g.group, g.count)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureSummary {
    pub zone: String,
    pub error: String,
}

/// Whole-run summary, written as JSON by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub thresholds: ClassificationThresholds,
    pub label_style: LabelStyle,
    pub total_wells: usize,
    pub zones: Vec<ZoneSummary>,
    pub failures: Vec<FailureSummary>,
    pub cancelled: Vec<String>,
}

impl RunSummary {
    pub fn new(result: &Classification, thresholds: &ClassificationThresholds, style: LabelStyle) -> Self {
        Self {
            generated_at: Utc::now(),
            thresholds: *thresholds,
            label_style: style,
            total_wells: result.total_wells(),
            zones: result
                .zones
                .iter()
                .map(|t| ZoneSummary::new(t, thresholds, style))
                .collect(),
            failures: result
                .failures
                .iter()
                .map(|f| FailureSummary {
                    zone: f.zone.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
            cancelled: result.cancelled.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
