//! CSV Ingest/Export Integration Test
//!
//! Exercises the full file path: write a well table to disk -> read it with
//! the ingest adapter -> classify -> export per-zone tables -> read the
//! exported files back and check the derived columns.

use std::fs;
use std::path::Path;

use workover_triage::config::{ExportConfig, InputConfig};
use workover_triage::export::{write_zone_tables, DERIVED_COLUMNS};
use workover_triage::ingest::read_wells_from_path;
use workover_triage::{classify, ClassificationThresholds, RunSummary, TriageError, ZoneError};

const WELLS_CSV: &str = "\
Well,Zone Name,X,Y,Cum
A-1,Alpha,0,0,10
A-2,Alpha,3,0,15
A-3,Alpha,1000,1000,25
B-1,Bravo,500,500,8
C-1,Charlie/East,0,0,1
C-2,Charlie/East,0,0,2
";

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("wells.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn read_export(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().clone();
    assert_eq!(header.len(), 5 + DERIVED_COLUMNS.len());
    reader.records().map(|r| r.unwrap()).collect()
}

#[test]
fn classify_and_export_every_zone() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), WELLS_CSV);

    let table = read_wells_from_path(&input, &InputConfig::default()).unwrap();
    assert_eq!(table.len(), 6);

    let result = classify(&table.wells, &ClassificationThresholds::default()).unwrap();
    assert_eq!(result.zone_labels(), &["Alpha", "Bravo", "Charlie/East"]);
    assert!(result.is_complete());

    let out_dir = dir.path().join("clusters");
    let paths = write_zone_tables(&out_dir, &result, &table.schema, &ExportConfig::default()).unwrap();
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "Alpha_clusters.csv",
            "Bravo_clusters.csv",
            "Charlie_East_clusters.csv"
        ]
    );

    let alpha = read_export(&paths[0]);
    assert_eq!(alpha.len(), 3);
    // Passthrough column survives
    assert_eq!(&alpha[0][0], "A-1");
    assert_eq!(&alpha[0][5], "3");
    assert_eq!(&alpha[0][9], "below 4 & ≤ 10");
    assert_eq!(&alpha[2][9], "above 10.01 & > 20.01");

    let bravo = read_export(&paths[1]);
    assert_eq!(&bravo[0][5], "inf");
    assert_eq!(&bravo[0][6], "inf");
    assert_eq!(&bravo[0][7], "above 10.01");

    let charlie = read_export(&paths[2]);
    assert_eq!(&charlie[0][5], "0");
    assert_eq!(&charlie[1][7], "below 4");
}

#[test]
fn export_overwrites_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), WELLS_CSV);
    let table = read_wells_from_path(&input, &InputConfig::default()).unwrap();
    let result = classify(&table.wells, &ClassificationThresholds::default()).unwrap();

    let out_dir = dir.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(out_dir.join("Alpha_clusters.csv"), "stale\n".repeat(50)).unwrap();

    let paths = write_zone_tables(&out_dir, &result, &table.schema, &ExportConfig::default()).unwrap();
    assert_eq!(read_export(&paths[0]).len(), 3);
}

#[test]
fn corrupt_zone_is_reported_and_not_exported() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "Zone Name,X,Y,Cum\nGood,0,0,1\nGood,5,0,1\nBad,NaN,0,1\nBad,1,0,1\n",
    );
    let table = read_wells_from_path(&input, &InputConfig::default()).unwrap();
    let result = classify(&table.wells, &ClassificationThresholds::default()).unwrap();

    assert_eq!(result.zones.len(), 1);
    assert!(matches!(
        result.failure("Bad").unwrap().error,
        ZoneError::NonFiniteCoordinate { row: 2, .. }
    ));

    let paths = write_zone_tables(&dir.path().join("out"), &result, &table.schema, &ExportConfig::default())
        .unwrap();
    assert_eq!(paths.len(), 1);

    let summary = RunSummary::new(&result, &ClassificationThresholds::default(), Default::default());
    let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
    assert_eq!(json["failures"][0]["zone"], "Bad");
}

#[test]
fn missing_required_column_aborts_read() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "Zone Name,X,Y\nA,0,0\n");
    let err = read_wells_from_path(&input, &InputConfig::default()).unwrap_err();
    assert!(matches!(err, TriageError::MissingColumn(ref c) if c == "Cum"));
}

#[test]
fn unreadable_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_wells_from_path(&dir.path().join("nope.csv"), &InputConfig::default()).unwrap_err();
    assert!(matches!(err, TriageError::Io(_, _)));
}
