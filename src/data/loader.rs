use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Dataset, Record, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can stop the dataset from loading. All variants are fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file {} is unavailable: {source}", .path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV header could not be read: {0}")]
    Header(#[source] csv::Error),

    #[error("missing required column(s): {}", .missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// Whether the file was readable but did not match the record schema.
    pub fn is_schema_error(&self) -> bool {
        !matches!(self, LoadError::DataUnavailable { .. })
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the patient table from a comma-delimited file.
///
/// The header must contain every column in [`REQUIRED_COLUMNS`]; order is
/// free and extra columns are ignored.
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_from_reader(file, path)?;

    if dataset.is_empty() {
        log::warn!("{} has a header but no records", path.display());
    }
    log::info!(
        "Loaded {} records from {} (drugs: {:?})",
        dataset.len(),
        path.display(),
        dataset.drugs
    );
    Ok(dataset)
}

/// Parse CSV content from any reader. Rows are validated into typed
/// [`Record`]s; the first bad row aborts the load. `path` names the source
/// in errors when reading from it fails.
pub fn load_from_reader<R: Read>(reader: R, path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| classify(e, path, LoadError::Header))?;
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::SchemaMismatch { missing });
    }

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.map_err(|e| {
            classify(e, path, |source| LoadError::InvalidRow { row: i + 1, source })
        })?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

/// I/O failures mean the data could not be read at all; anything else is
/// handed to `otherwise`.
fn classify(
    err: csv::Error,
    path: &Path,
    otherwise: impl FnOnce(csv::Error) -> LoadError,
) -> LoadError {
    let io_kind = match err.kind() {
        csv::ErrorKind::Io(io) => Some(io.kind()),
        _ => None,
    };
    match io_kind {
        Some(kind) => LoadError::DataUnavailable {
            path: path.to_path_buf(),
            source: std::io::Error::new(kind, err),
        },
        None => otherwise(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{BloodPressure, Cholesterol, Sex};

    fn fixture() -> &'static Path {
        Path::new("fixture.csv")
    }

    /// Reader whose every read fails, as a vanished mount would.
    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device went away"))
        }
    }

    const SAMPLE: &str = "\
Age,Sex,BP,Cholesterol,Na_to_K,Drug
23,F,HIGH,HIGH,25.355,DrugY
47,M,LOW,HIGH,13.093,drugC
28,F,NORMAL,HIGH,7.798,drugX
";

    #[test]
    fn loads_typed_records_in_file_order() {
        let ds = load_from_reader(SAMPLE.as_bytes(), fixture()).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.records()[0];
        assert_eq!(first.age, 23);
        assert_eq!(first.sex, Sex::Female);
        assert_eq!(first.bp, BloodPressure::High);
        assert_eq!(first.cholesterol, Cholesterol::High);
        assert!((first.na_to_k - 25.355).abs() < 1e-9);
        assert_eq!(first.drug, "DrugY");

        let ages: Vec<u32> = ds.records().iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![23, 47, 28]);
    }

    #[test]
    fn accepts_reordered_and_extra_columns() {
        let csv = "Drug,Na_to_K,Id,Cholesterol,BP,Sex,Age\ndrugA,10.5,7,NORMAL,HIGH,M,33\n";
        let ds = load_from_reader(csv.as_bytes(), fixture()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].age, 33);
        assert_eq!(ds.records()[0].drug, "drugA");
    }

    #[test]
    fn missing_columns_are_a_schema_mismatch() {
        let csv = "Age,Sex,BP,Drug\n23,F,HIGH,DrugY\n";
        match load_from_reader(csv.as_bytes(), fixture()) {
            Err(LoadError::SchemaMismatch { missing }) => {
                assert_eq!(missing, vec!["Cholesterol".to_string(), "Na_to_K".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let csv = "age,Sex,BP,Cholesterol,Na_to_K,Drug\n23,F,HIGH,HIGH,25.3,DrugY\n";
        let err = load_from_reader(csv.as_bytes(), fixture()).unwrap_err();
        assert!(matches!(err, LoadError::SchemaMismatch { ref missing } if missing == &["Age"]));
        assert!(err.is_schema_error());
    }

    #[test]
    fn unknown_token_reports_row_number() {
        let csv = "\
Age,Sex,BP,Cholesterol,Na_to_K,Drug
23,F,HIGH,HIGH,25.355,DrugY
47,M,LOW,BORDERLINE,13.093,drugC
";
        match load_from_reader(csv.as_bytes(), fixture()) {
            Err(LoadError::InvalidRow { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_age_is_rejected() {
        let csv = "Age,Sex,BP,Cholesterol,Na_to_K,Drug\nold,F,HIGH,HIGH,25.3,DrugY\n";
        let err = load_from_reader(csv.as_bytes(), fixture()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { row: 1, .. }));
    }

    #[test]
    fn empty_input_is_missing_every_column() {
        let err = load_from_reader("".as_bytes(), fixture()).unwrap_err();
        match err {
            LoadError::SchemaMismatch { missing } => assert_eq!(missing.len(), REQUIRED_COLUMNS.len()),
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = load(Path::new("definitely/not/here/Classification.csv")).unwrap_err();
        assert!(matches!(err, LoadError::DataUnavailable { .. }));
        assert!(!err.is_schema_error());
        assert!(err.to_string().contains("Classification.csv"));
    }

    #[test]
    fn directory_path_is_data_unavailable() {
        let err = load(&std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, LoadError::DataUnavailable { .. }), "got {err:?}");
        assert!(!err.is_schema_error());
    }

    #[test]
    fn read_failure_on_header_is_data_unavailable() {
        let err = load_from_reader(BrokenReader, fixture()).unwrap_err();
        match err {
            LoadError::DataUnavailable { path, .. } => assert_eq!(path, fixture()),
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn read_failure_after_header_is_data_unavailable() {
        let input = "Age,Sex,BP,Cholesterol,Na_to_K,Drug\n".as_bytes().chain(BrokenReader);
        let err = load_from_reader(input, fixture()).unwrap_err();
        assert!(matches!(err, LoadError::DataUnavailable { .. }), "got {err:?}");
        assert!(err.to_string().contains("device went away"));
    }
}
