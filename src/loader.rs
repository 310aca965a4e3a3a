//! Load a driving-event spreadsheet (CSV export) and normalize it into
//! [`DrivingRecord`]s.
//!
//! Source columns are labeled in Korean; the loader maps them to canonical
//! behavior keys, resolves a stable per-driver identifier, and zero-fills any
//! recognized column the source omits. Only an unreadable or malformed file
//! aborts the load — every schema gap is compensated with a documented
//! default and reported as a [`SchemaGap`] warning.

use std::path::Path;

use csv::StringRecord;
use thiserror::Error;

use crate::models::{Behavior, DrivingRecord};
use crate::schema;

/// Exact label of the vehicle-number column.
const VEHICLE_NUMBER_LABEL: &str = "차량번호";
/// Substrings used to fuzzy-match a vehicle-number column when the exact
/// label is absent.
const VEHICLE_MARKER: &str = "차량";
const NUMBER_MARKER: &str = "번호";
/// Label of the optional sequential-index column.
const INDEX_LABEL: &str = "인덱스";
/// Label of the optional fuel-type column.
const FUEL_TYPE_LABEL: &str = "Fuel Type";
/// Label of the optional distance column (used by the report summary only).
const DISTANCE_LABEL: &str = "총운행거리(km)";

/// Identifier assigned to every row when no vehicle-number column exists.
/// All such rows intentionally merge into a single aggregate.
pub const UNKNOWN_DRIVER: &str = "Unknown";

/// Fatal load failures. The pipeline halts with no partial output.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read source file: {0}")]
    Io(#[from] std::io::Error),
    #[error("source is not valid tabular data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: index column holds non-numeric value {value:?}")]
    InvalidIndex { row: usize, value: String },
}

/// Non-fatal gaps found while normalizing. Each is recovered locally with a
/// documented default; none halts the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaGap {
    /// A recognized behavior column is absent; its counts are zero-filled.
    MissingBehaviorColumn(Behavior),
    /// No vehicle-number column; every row gets the [`UNKNOWN_DRIVER`] id.
    MissingIdColumn,
    /// No fuel-type column; [`schema::DEFAULT_FUEL_TYPE`] is assumed.
    MissingFuelTypeColumn,
}

impl std::fmt::Display for SchemaGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaGap::MissingBehaviorColumn(b) => {
                write!(f, "column '{}' ({}) missing, counting 0", schema::spec(*b).label_ko, b)
            }
            SchemaGap::MissingIdColumn => {
                write!(f, "no vehicle-number column, merging all rows under '{}'", UNKNOWN_DRIVER)
            }
            SchemaGap::MissingFuelTypeColumn => {
                write!(f, "no fuel-type column, assuming {}", schema::DEFAULT_FUEL_TYPE)
            }
        }
    }
}

/// Normalized records plus the gaps encountered while producing them.
#[derive(Debug)]
pub struct LoadedData {
    pub records: Vec<DrivingRecord>,
    pub gaps: Vec<SchemaGap>,
}

/// How the driver identifier is derived, decided once per file and applied
/// to every row. Strategies are tried in order; the first applicable wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdStrategy {
    /// Vehicle-number column plus index column: substitute the index into
    /// the raw number to de-duplicate repeated placeholders.
    Indexed { vehicle: usize, index: usize },
    /// Vehicle-number column only: use the raw value (duplicates possible
    /// and accepted).
    Raw { vehicle: usize },
    /// No vehicle-number column at all: sentinel id for every row.
    Unknown,
}

impl IdStrategy {
    fn select(vehicle: Option<usize>, index: Option<usize>) -> IdStrategy {
        match (vehicle, index) {
            (Some(vehicle), Some(index)) => IdStrategy::Indexed { vehicle, index },
            (Some(vehicle), None) => IdStrategy::Raw { vehicle },
            (None, _) => IdStrategy::Unknown,
        }
    }

    fn resolve(&self, row: usize, record: &StringRecord) -> Result<String, LoadError> {
        match *self {
            IdStrategy::Indexed { vehicle, index } => {
                let raw = cell(record, vehicle);
                let idx_cell = cell(record, index);
                // Excel exports often render integers as "7.0".
                let idx = idx_cell
                    .parse::<f64>()
                    .map_err(|_| LoadError::InvalidIndex {
                        row,
                        value: idx_cell.to_string(),
                    })? as i64;
                Ok(derive_unique_id(raw, idx))
            }
            IdStrategy::Raw { vehicle } => Ok(cell(record, vehicle).to_string()),
            IdStrategy::Unknown => Ok(UNKNOWN_DRIVER.to_string()),
        }
    }
}

/// De-duplicate a raw vehicle number with the row's sequential index.
///
/// Fleet exports reuse a `"00"` placeholder inside the number
/// (e.g. `혁신00바1234`); the first occurrence is replaced with the
/// zero-padded index. Numbers without the placeholder get `_{index}`
/// appended instead. Note the replacement is positional, not semantic: a
/// `"00"` inside an unrelated digit run is substituted just the same.
fn derive_unique_id(raw: &str, index: i64) -> String {
    if raw.contains("00") {
        raw.replacen("00", &format!("{:02}", index), 1)
    } else {
        format!("{}_{}", raw, index)
    }
}

/// Where each recognized column sits in the source header, if anywhere.
#[derive(Debug)]
struct ColumnMap {
    behaviors: Vec<(Behavior, usize)>,
    id_strategy: IdStrategy,
    fuel_type: Option<usize>,
    distance: Option<usize>,
    gaps: Vec<SchemaGap>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> ColumnMap {
        let trimmed: Vec<&str> = headers.iter().map(str::trim).collect();

        let mut behaviors = Vec::new();
        for (pos, name) in trimmed.iter().enumerate() {
            if let Some(b) = schema::behavior_for_label(name) {
                if !behaviors.iter().any(|&(seen, _)| seen == b) {
                    behaviors.push((b, pos));
                }
            }
        }

        // Vehicle-number column: exact label first, then any header carrying
        // both markers.
        let vehicle = trimmed
            .iter()
            .position(|&name| name == VEHICLE_NUMBER_LABEL)
            .or_else(|| {
                trimmed
                    .iter()
                    .position(|&name| name.contains(VEHICLE_MARKER) && name.contains(NUMBER_MARKER))
            });
        let index = trimmed.iter().position(|&name| name == INDEX_LABEL);
        let fuel_type = trimmed.iter().position(|&name| name == FUEL_TYPE_LABEL);
        let distance = trimmed.iter().position(|&name| name == DISTANCE_LABEL);

        let mut gaps = Vec::new();
        for b in Behavior::ALL {
            if !behaviors.iter().any(|&(seen, _)| seen == b) {
                gaps.push(SchemaGap::MissingBehaviorColumn(b));
            }
        }
        if vehicle.is_none() {
            gaps.push(SchemaGap::MissingIdColumn);
        }
        if fuel_type.is_none() {
            gaps.push(SchemaGap::MissingFuelTypeColumn);
        }

        ColumnMap {
            behaviors,
            id_strategy: IdStrategy::select(vehicle, index),
            fuel_type,
            distance,
            gaps,
        }
    }
}

fn cell<'a>(record: &'a StringRecord, pos: usize) -> &'a str {
    record.get(pos).unwrap_or("").trim()
}

/// Parse a numeric cell. Blank and unparseable cells count as zero so a
/// sparse export still loads.
fn numeric_cell(record: &StringRecord, pos: usize) -> f64 {
    cell(record, pos).parse().unwrap_or(0.0)
}

/// Load and normalize a CSV export of the fleet driving-event report.
///
/// Every returned record carries all 11 behavior counts (zero-filled where
/// the source has no column) and a resolved driver id, name, and fuel type.
pub fn load_csv(path: &Path) -> Result<LoadedData, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let columns = ColumnMap::from_headers(reader.headers()?);

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let driver_id = columns.id_strategy.resolve(row, &record)?;
        let fuel_type = match columns.fuel_type {
            Some(pos) if !cell(&record, pos).is_empty() => cell(&record, pos).to_string(),
            _ => schema::DEFAULT_FUEL_TYPE.to_string(),
        };
        let distance_km = columns.distance.map_or(0.0, |pos| numeric_cell(&record, pos));

        let mut events = Behavior::zeroed_counts();
        for &(behavior, pos) in &columns.behaviors {
            events.insert(behavior, numeric_cell(&record, pos));
        }

        records.push(DrivingRecord {
            driver_name: driver_id.clone(),
            driver_id,
            fuel_type,
            distance_km,
            events,
        });
    }

    Ok(LoadedData {
        records,
        gaps: columns.gaps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", content).unwrap();
        f
    }

    #[test]
    fn test_derive_unique_id_placeholder() {
        assert_eq!(derive_unique_id("혁신00바1234", 7), "혁신07바1234");
    }

    #[test]
    fn test_derive_unique_id_no_placeholder() {
        assert_eq!(derive_unique_id("ABC", 3), "ABC_3");
    }

    #[test]
    fn test_derive_unique_id_replaces_first_occurrence_only() {
        // Positional substitution: an unrelated "00" earlier in the string
        // is the one replaced.
        assert_eq!(derive_unique_id("서울00바4500", 12), "서울12바4500");
        assert_eq!(derive_unique_id("혁신11바1004", 5), "혁신11바1054");
    }

    #[test]
    fn test_load_maps_korean_columns() {
        let f = write_csv("인덱스,차량번호,과속,급가속\n1,혁신00바1234,2,1.5\n");
        let loaded = load_csv(f.path()).unwrap();

        assert_eq!(loaded.records.len(), 1);
        let r = &loaded.records[0];
        assert_eq!(r.driver_id, "혁신01바1234");
        assert_eq!(r.events[&Behavior::Speeding], 2.0);
        assert_eq!(r.events[&Behavior::SuddenAcceleration], 1.5);
        // Unmapped behaviors are zero-filled, not absent.
        assert_eq!(r.events.len(), 11);
        assert_eq!(r.events[&Behavior::SuddenUTurn], 0.0);
    }

    #[test]
    fn test_missing_behavior_columns_reported() {
        let f = write_csv("차량번호,과속\nA,1\n");
        let loaded = load_csv(f.path()).unwrap();
        assert!(loaded
            .gaps
            .contains(&SchemaGap::MissingBehaviorColumn(Behavior::SuddenStop)));
        assert!(!loaded
            .gaps
            .contains(&SchemaGap::MissingBehaviorColumn(Behavior::Speeding)));
    }

    #[test]
    fn test_fuzzy_vehicle_column() {
        let f = write_csv("등록차량번호,과속\nXYZ,1\n");
        let loaded = load_csv(f.path()).unwrap();
        assert_eq!(loaded.records[0].driver_id, "XYZ");
        assert!(!loaded.gaps.contains(&SchemaGap::MissingIdColumn));
    }

    #[test]
    fn test_no_id_column_uses_unknown_sentinel() {
        let f = write_csv("과속,급정지\n1,2\n3,4\n");
        let loaded = load_csv(f.path()).unwrap();
        assert!(loaded.gaps.contains(&SchemaGap::MissingIdColumn));
        assert!(loaded.records.iter().all(|r| r.driver_id == UNKNOWN_DRIVER));
    }

    #[test]
    fn test_no_index_column_keeps_raw_id() {
        // Without an index column the raw number is used as-is, duplicates
        // and all.
        let f = write_csv("차량번호,과속\n혁신00바1234,1\n혁신00바1234,2\n");
        let loaded = load_csv(f.path()).unwrap();
        assert_eq!(loaded.records[0].driver_id, "혁신00바1234");
        assert_eq!(loaded.records[1].driver_id, "혁신00바1234");
    }

    #[test]
    fn test_fuel_type_defaults_to_diesel() {
        let f = write_csv("차량번호,과속\nA,1\n");
        let loaded = load_csv(f.path()).unwrap();
        assert_eq!(loaded.records[0].fuel_type, schema::DEFAULT_FUEL_TYPE);
        assert!(loaded.gaps.contains(&SchemaGap::MissingFuelTypeColumn));
    }

    #[test]
    fn test_fuel_type_passes_through() {
        let f = write_csv("차량번호,Fuel Type,과속\nA,LPG,1\n");
        let loaded = load_csv(f.path()).unwrap();
        assert_eq!(loaded.records[0].fuel_type, "LPG");
    }

    #[test]
    fn test_blank_and_garbage_cells_count_zero() {
        let f = write_csv("차량번호,과속,급가속\nA,,n/a\n");
        let loaded = load_csv(f.path()).unwrap();
        assert_eq!(loaded.records[0].events[&Behavior::Speeding], 0.0);
        assert_eq!(loaded.records[0].events[&Behavior::SuddenAcceleration], 0.0);
    }

    #[test]
    fn test_float_index_accepted() {
        let f = write_csv("인덱스,차량번호,과속\n7.0,혁신00바1234,1\n");
        let loaded = load_csv(f.path()).unwrap();
        assert_eq!(loaded.records[0].driver_id, "혁신07바1234");
    }

    #[test]
    fn test_bad_index_is_fatal() {
        let f = write_csv("인덱스,차량번호,과속\nseven,혁신00바1234,1\n");
        let err = load_csv(f.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidIndex { row: 0, .. }));
    }

    #[test]
    fn test_headers_only_yields_empty_set() {
        let f = write_csv("차량번호,과속\n");
        let loaded = load_csv(f.path()).unwrap();
        assert!(loaded.records.is_empty());
    }

    #[test]
    fn test_missing_columns_equal_explicit_zeros() {
        let sparse = write_csv("차량번호,과속,급가속\nA,2,1\n");
        let filled = write_csv(
            "차량번호,과속,장기과속,급가속,급출발,급감속,급정지,급좌회전,급우회전,급유턴,급앞지르기,급진로변경\n\
             A,2,0,1,0,0,0,0,0,0,0,0\n",
        );

        let sparse_stats = crate::analysis::analyze_driver_risk(&load_csv(sparse.path()).unwrap().records);
        let filled_stats = crate::analysis::analyze_driver_risk(&load_csv(filled.path()).unwrap().records);

        assert_eq!(sparse_stats.len(), filled_stats.len());
        assert_eq!(sparse_stats[0].events, filled_stats[0].events);
        assert_eq!(sparse_stats[0].total_penalty, filled_stats[0].total_penalty);
        assert_eq!(sparse_stats[0].safety_score, filled_stats[0].safety_score);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        assert!(load_csv(Path::new("/nonexistent/report.csv")).is_err());
    }

    #[test]
    fn test_ragged_row_is_load_error() {
        let f = write_csv("차량번호,과속,급가속\nA,1\n");
        assert!(matches!(load_csv(f.path()), Err(LoadError::Csv(_))));
    }
}
