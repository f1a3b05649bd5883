//! Zone partitioning
//!
//! Splits the well table into per-zone subsets. Zones keep the order in
//! which they were first observed; wells keep their input order within a zone.

use std::collections::HashMap;

use crate::types::WellRecord;

/// Wells of one zone, borrowed from the input table.
#[derive(Debug, Clone)]
pub struct ZoneSubset<'a> {
    pub label: &'a str,
    pub wells: Vec<&'a WellRecord>,
}

impl ZoneSubset<'_> {
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

/// Mapping zone label -> wells, built once per run.
#[derive(Debug, Clone, Default)]
pub struct ZonePartition<'a> {
    zones: Vec<ZoneSubset<'a>>,
}

impl<'a> ZonePartition<'a> {
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zone labels in first-seen order.
    pub fn labels(&self) -> Vec<&'a str> {
        self.zones.iter().map(|z| z.label).collect()
    }

    pub fn get(&self, label: &str) -> Option<&ZoneSubset<'a>> {
        self.zones.iter().find(|z| z.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneSubset<'a>> {
        self.zones.iter()
    }

    pub fn total_wells(&self) -> usize {
        self.zones.iter().map(ZoneSubset::len).sum()
    }

    pub fn into_subsets(self) -> Vec<ZoneSubset<'a>> {
        self.zones
    }
}

/// Group wells by their zone label.
///
/// Every well lands in exactly one subset; zones without wells never appear.
pub fn partition_by_zone(wells: &[WellRecord]) -> ZonePartition<'_> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut zones: Vec<ZoneSubset<'_>> = Vec::new();

    for well in wells {
        let slot = *index.entry(well.zone.as_str()).or_insert_with(|| {
            zones.push(ZoneSubset {
                label: well.zone.as_str(),
                wells: Vec::new(),
            });
            zones.len() - 1
        });
        zones[slot].wells.push(well);
    }

    ZonePartition { zones }
}
