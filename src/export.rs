//! Per-zone table export
//!
//! One delimited file per classified zone, named `{zone}{file_suffix}`.
//! Existing files are overwritten. Failed and cancelled zones are not written.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ExportConfig;
use crate::error::TriageError;
use crate::ingest::TableSchema;
use crate::pipeline::{Classification, ZoneTable};

/// Columns appended after the input header, in order.
pub const DERIVED_COLUMNS: [&str; 5] = [
    "distancia_min",
    "espaciamiento_acres",
    "grupo_espaciamiento",
    "grupo_volumen",
    "grupo_combined",
];

/// File name for a zone's table. Path separators and control characters
/// in the label become `_`.
pub fn zone_file_name(zone: &str, suffix: &str) -> String {
    let mut name: String = zone
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if name.is_empty() || name == "." || name == ".." {
        name = name.replace('.', "_");
        name.push('_');
    }
    name.push_str(suffix);
    name
}

/// Write every classified zone of `result` into `dir`, creating it if needed.
///
/// Returns the written paths in zone order.
pub fn write_zone_tables(
    dir: &Path,
    result: &Classification,
    schema: &TableSchema,
    config: &ExportConfig,
) -> Result<Vec<PathBuf>, TriageError> {
    fs::create_dir_all(dir).map_err(|e| TriageError::Io(dir.to_path_buf(), e))?;

    let mut written = Vec::with_capacity(result.zones.len());
    let mut seen = HashSet::new();
    for table in &result.zones {
        let path = dir.join(zone_file_name(&table.zone, &config.file_suffix));
        if !seen.insert(path.clone()) {
            warn!(zone = %table.zone, path = %path.display(), "Zone file name collides with an earlier zone, overwriting");
        }
        let file = File::create(&path).map_err(|e| TriageError::Io(path.clone(), e))?;
        write_zone_table(BufWriter::new(file), table, schema, config)?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "Exported zone tables");
    Ok(written)
}

/// Write one zone's enriched rows as a delimited table.
pub fn write_zone_table<W: Write>(
    writer: W,
    table: &ZoneTable,
    schema: &TableSchema,
    config: &ExportConfig,
) -> Result<(), TriageError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte())
        .from_writer(writer);

    let header = schema
        .header
        .iter()
        .map(String::as_str)
        .chain(DERIVED_COLUMNS);
    csv_writer.write_record(header)?;

    for well in &table.wells {
        let mut fields = schema.row_fields(&well.well);
        fields.extend([
            well.distance_min.to_string(),
            well.spacing_acres.to_string(),
            well.spacing_group.clone(),
            well.volume_group.clone(),
            well.combined_group.clone(),
        ]);
        csv_writer.write_record(&fields)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputConfig;
    use crate::pipeline::classify;
    use crate::types::{ClassificationThresholds, WellRecord};

    fn export_to_string(table: &ZoneTable, schema: &TableSchema) -> String {
        let mut buf = Vec::new();
        write_zone_table(&mut buf, table, schema, &ExportConfig::default()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_zone_file_name_sanitizes_separators() {
        assert_eq!(zone_file_name("Z1", "_clusters.csv"), "Z1_clusters.csv");
        assert_eq!(zone_file_name("A/B\\C", ".csv"), "A_B_C.csv");
        assert_eq!(zone_file_name("tab\there", ".csv"), "tab_here.csv");
        assert_eq!(zone_file_name("..", ".csv"), "___.csv");
        assert_eq!(zone_file_name("", ".csv"), "_.csv");
    }

    #[test]
    fn test_single_well_exports_inf() {
        let wells = vec![WellRecord::new(0, "Solo", 1.0, 2.0, 30.0)];
        let result = classify(&wells, &ClassificationThresholds::default()).unwrap();
        let schema = TableSchema::required_only(&InputConfig::default());
        let out = export_to_string(&result.zones[0], &schema);
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Zone Name,X,Y,Cum,distancia_min,espaciamiento_acres,grupo_espaciamiento,grupo_volumen,grupo_combined"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Solo,1,2,30,inf,inf,above 10.01,> 20.01,above 10.01 & > 20.01"
        );
    }

    #[test]
    fn test_source_fields_are_preserved() {
        let mut w1 = WellRecord::new(0, "Z", 0.0, 0.0, 5.0);
        w1.source_fields = vec!["W-1".into(), "Z".into(), "0.00".into(), "0".into(), "5".into()];
        let mut w2 = WellRecord::new(1, "Z", 3.0, 4.0, 5.0);
        w2.source_fields = vec!["W-2".into(), "Z".into(), "3".into(), "4".into(), "5".into()];
        let schema = TableSchema {
            header: vec!["Well".into(), "Zone Name".into(), "X".into(), "Y".into(), "Cum".into()],
            zone_index: 1,
            x_index: 2,
            y_index: 3,
            cum_index: 4,
        };
        let result = classify(&[w1, w2], &ClassificationThresholds::default()).unwrap();
        let out = export_to_string(&result.zones[0], &schema);
        let first_row = out.lines().nth(1).unwrap();
        assert!(first_row.starts_with("W-1,Z,0.00,0,5,5,"), "got {first_row}");
    }

    #[test]
    fn test_write_zone_tables_one_file_per_zone() {
        let dir = tempfile::tempdir().unwrap();
        let wells = vec![
            WellRecord::new(0, "North", 0.0, 0.0, 1.0),
            WellRecord::new(1, "South", 0.0, 0.0, 1.0),
            WellRecord::new(2, "North", 10.0, 0.0, 1.0),
        ];
        let result = classify(&wells, &ClassificationThresholds::default()).unwrap();
        let schema = TableSchema::required_only(&InputConfig::default());
        let out_dir = dir.path().join("out");
        let paths = write_zone_tables(&out_dir, &result, &schema, &ExportConfig::default()).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("North_clusters.csv"));
        assert!(paths[1].ends_with("South_clusters.csv"));
        let north = std::fs::read_to_string(&paths[0]).unwrap();
        assert_eq!(north.lines().count(), 3);
    }
}
