//! Well table ingest
//!
//! Reads a delimited table with at least the zone, X, Y and Cum columns.
//! Required columns are matched by trimmed, case-insensitive header name;
//! every source field is kept so exports reproduce the input columns. Zone
//! labels are taken as written, so `Z1` and ` Z1` are different zones.
//!
//! Malformed rows abort the whole read. `NaN`/`inf` literals are numbers
//! here and are left to per-zone validation in the pipeline.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::config::InputConfig;
use crate::error::TriageError;
use crate::types::WellRecord;

/// Column layout of an ingested table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSchema {
    /// Header exactly as read, in order
    pub header: Vec<String>,
    pub zone_index: usize,
    pub x_index: usize,
    pub y_index: usize,
    pub cum_index: usize,
}

impl TableSchema {
    /// Schema holding only the four required columns, for wells built in code.
    pub fn required_only(input: &InputConfig) -> Self {
        Self {
            header: input
                .required_columns()
                .iter()
                .map(|(_, name)| name.to_string())
                .collect(),
            zone_index: 0,
            x_index: 1,
            y_index: 2,
            cum_index: 3,
        }
    }

    /// Field values for `well` in header order.
    ///
    /// Uses the raw source fields when they match the header, otherwise the
    /// required columns are filled from the parsed values and the rest left empty.
    pub fn row_fields(&self, well: &WellRecord) -> Vec<String> {
        if well.source_fields.len() == self.header.len() {
            return well.source_fields.clone();
        }
        let mut fields = vec![String::new(); self.header.len()];
        for (index, value) in [
            (self.zone_index, well.zone.clone()),
            (self.x_index, well.x.to_string()),
            (self.y_index, well.y.to_string()),
            (self.cum_index, well.cum.to_string()),
        ] {
            if let Some(slot) = fields.get_mut(index) {
                *slot = value;
            }
        }
        fields
    }
}

/// All wells of one input table plus its header layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WellTable {
    pub schema: TableSchema,
    pub wells: Vec<WellRecord>,
}

impl WellTable {
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

/// Read a well table from a file.
pub fn read_wells_from_path(path: &Path, input: &InputConfig) -> Result<WellTable, TriageError> {
    let file = File::open(path).map_err(|e| TriageError::Io(path.to_path_buf(), e))?;
    let table = read_wells(BufReader::new(file), input)?;
    info!(path = %path.display(), wells = table.len(), "Loaded well table");
    Ok(table)
}

/// Read a well table from any reader.
pub fn read_wells<R: Read>(reader: R, input: &InputConfig) -> Result<WellTable, TriageError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(input.delimiter_byte())
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let header: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let find = |name: &str| -> Result<usize, TriageError> {
        let wanted = name.trim();
        header
            .iter()
            .position(|h| h.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TriageError::MissingColumn(wanted.to_string()))
    };
    let schema = TableSchema {
        zone_index: find(&input.zone_column)?,
        x_index: find(&input.x_column)?,
        y_index: find(&input.y_column)?,
        cum_index: find(&input.cum_column)?,
        header,
    };
    debug!(columns = schema.header.len(), "Resolved input columns");

    let mut wells = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        // 1-based data row for messages
        let line = row + 1;

        let zone = required_field(&record, schema.zone_index, &input.zone_column, line)?.to_string();
        let x = required_number(&record, schema.x_index, &input.x_column, line)?;
        let y = required_number(&record, schema.y_index, &input.y_column, line)?;
        let cum = required_number(&record, schema.cum_index, &input.cum_column, line)?;

        let mut source_fields: Vec<String> = record.iter().map(str::to_string).collect();
        source_fields.resize(schema.header.len(), String::new());

        wells.push(WellRecord {
            row,
            zone,
            x,
            y,
            cum,
            source_fields,
        });
    }

    Ok(WellTable { schema, wells })
}

fn required_field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<&'r str, TriageError> {
    // blank check only; the value is returned untrimmed
    match record.get(index) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(TriageError::MissingField {
            row,
            field: name.to_string(),
        }),
    }
}

fn required_number(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<f64, TriageError> {
    let raw = required_field(record, index, name, row)?.trim();
    raw.parse::<f64>().map_err(|_| TriageError::InvalidNumber {
        row,
        field: name.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str) -> Result<WellTable, TriageError> {
        read_wells(csv.as_bytes(), &InputConfig::default())
    }

    #[test]
    fn test_reads_required_and_passthrough_columns() {
        let table = read("Well,Zone Name,X,Y,Cum\nW-1,Z1,0,0,12.5\nW-2,Z1,3,0,4\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.schema.header, vec!["Well", "Zone Name", "X", "Y", "Cum"]);
        assert_eq!(table.schema.zone_index, 1);
        let w = &table.wells[1];
        assert_eq!(w.row, 1);
        assert_eq!(w.zone, "Z1");
        assert_eq!(w.x, 3.0);
        assert_eq!(w.cum, 4.0);
        assert_eq!(w.source_fields[0], "W-2");
    }

    #[test]
    fn test_header_match_is_case_insensitive_and_trimmed() {
        let table = read(" zone name , x ,y, CUM\nA,1,2,3\n").unwrap();
        assert_eq!(table.wells[0].zone, "A");
        assert_eq!(table.wells[0].y, 2.0);
    }

    #[test]
    fn test_missing_column() {
        let err = read("Zone Name,X,Y\nA,1,2\n").unwrap_err();
        assert!(matches!(err, TriageError::MissingColumn(ref c) if c == "Cum"));
    }

    #[test]
    fn test_missing_field_reports_row() {
        let err = read("Zone Name,X,Y,Cum\nA,1,2,3\nA,1,,3\n").unwrap_err();
        match err {
            TriageError::MissingField { row, field } => {
                assert_eq!(row, 2);
                assert_eq!(field, "Y");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_short_row_is_missing_field() {
        let err = read("Zone Name,X,Y,Cum\nA,1,2\n").unwrap_err();
        assert!(matches!(err, TriageError::MissingField { ref field, .. } if field == "Cum"));
    }

    #[test]
    fn test_invalid_number() {
        let err = read("Zone Name,X,Y,Cum\nA,1,2,lots\n").unwrap_err();
        assert!(matches!(err, TriageError::InvalidNumber { ref value, .. } if value == "lots"));
    }

    #[test]
    fn test_nan_literal_is_accepted() {
        let table = read("Zone Name,X,Y,Cum\nA,NaN,2,3\n").unwrap();
        assert!(table.wells[0].x.is_nan());
    }

    #[test]
    fn test_custom_columns_and_delimiter() {
        let input = InputConfig {
            zone_column: "Reservoir".to_string(),
            x_column: "East".to_string(),
            y_column: "North".to_string(),
            cum_column: "Np".to_string(),
            delimiter: ';',
        };
        let table = read_wells("Reservoir;East;North;Np\nR-1;10.5;2;3\n".as_bytes(), &input).unwrap();
        assert_eq!(table.wells[0].zone, "R-1");
        assert_eq!(table.wells[0].x, 10.5);
    }

    #[test]
    fn test_zone_label_kept_verbatim() {
        let table = read("Zone Name,X,Y,Cum\nZ1,0,0,1\n Z1 , 3 ,0,1\n").unwrap();
        assert_eq!(table.wells[0].zone, "Z1");
        assert_eq!(table.wells[1].zone, " Z1 ");
        assert_eq!(table.wells[1].x, 3.0);
    }

    #[test]
    fn test_whitespace_distinct_zones_stay_apart() {
        let table = read("Zone Name,X,Y,Cum\nZ1,0,0,1\n Z1,3,0,1\n").unwrap();
        let result = crate::pipeline::classify(&table.wells, &Default::default()).unwrap();
        assert_eq!(result.zone_labels(), &["Z1", " Z1"]);
        assert_eq!(result.get("Z1").unwrap().wells[0].distance_min, f64::INFINITY);
        assert_eq!(result.get(" Z1").unwrap().wells[0].distance_min, f64::INFINITY);
    }

    #[test]
    fn test_blank_zone_is_missing_field() {
        let err = read("Zone Name,X,Y,Cum\n  ,0,0,1\n").unwrap_err();
        assert!(matches!(err, TriageError::MissingField { ref field, .. } if field == "Zone Name"));
    }

    #[test]
    fn test_bom_is_stripped_from_header() {
        let table = read("\u{feff}Zone Name,X,Y,Cum\nA,1,2,3\n").unwrap();
        assert_eq!(table.schema.header[0], "Zone Name");
    }
}
