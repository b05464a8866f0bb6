//! CSV loading into [`Dataset`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use roster_model::Dataset;
use tracing::{debug, warn};

use crate::error::{LoadError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn csv_error(path: &Path, error: csv::Error) -> LoadError {
    let line = error.position().map(csv::Position::line);
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        _ => LoadError::CsvParse {
            path: path.to_path_buf(),
            line,
            message,
        },
    }
}

/// Reads a CSV file with a single header row.
///
/// Blank lines are skipped. A header with no data rows loads as an empty
/// dataset; a file without any header is an error.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let file = open(path)?;
    parse_dataset(file, path)
}

/// Reads a CSV file and checks that every column in `required` is present.
pub fn read_dataset_with_columns<S: AsRef<str>>(path: &Path, required: &[S]) -> Result<Dataset> {
    let dataset = read_dataset(path)?;
    require_columns(&dataset, required, path)?;
    Ok(dataset)
}

pub fn require_columns<S: AsRef<str>>(dataset: &Dataset, required: &[S], path: &Path) -> Result<()> {
    match required
        .iter()
        .map(AsRef::as_ref)
        .find(|column| !dataset.has_column(column))
    {
        Some(column) => Err(LoadError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        }),
        None => Ok(()),
    }
}

/// Parses CSV from any reader; `origin` is only used in errors and logs.
pub fn parse_dataset<R: Read>(reader: R, origin: &Path) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut dataset: Option<Dataset> = None;
    let mut ragged = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(origin, e))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        match dataset.as_mut() {
            None => {
                let headers = record.iter().map(normalize_header).collect();
                dataset = Some(Dataset::new(headers));
            }
            Some(dataset) => {
                if row.len() != dataset.columns.len() {
                    ragged += 1;
                }
                dataset.push_row(row);
            }
        }
    }

    let dataset = dataset.ok_or_else(|| LoadError::MissingHeader {
        path: origin.to_path_buf(),
    })?;
    if ragged > 0 {
        debug!(path = %origin.display(), ragged, "rows padded or truncated to header width");
    }
    if dataset.is_empty() {
        warn!(path = %origin.display(), "CSV has a header but no data rows");
    } else {
        debug!(
            path = %origin.display(),
            rows = dataset.row_count(),
            columns = dataset.columns.len(),
            "loaded CSV"
        );
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn reads_headers_and_trimmed_cells() {
        let file = create_temp_csv("\u{feff}Name ,  Born   Location\n LeBron James , Akron\n\n");
        let dataset = read_dataset(file.path()).unwrap();
        assert_eq!(dataset.columns, vec!["Name", "Born Location"]);
        assert_eq!(dataset.row_count(), 1);
        assert_eq!(dataset.rows[0].values, vec!["LeBron James", "Akron"]);
    }

    #[test]
    fn ragged_rows_are_aligned_to_header() {
        let file = create_temp_csv("A,B,C\n1,2\n1,2,3,4\n");
        let dataset = read_dataset(file.path()).unwrap();
        assert_eq!(dataset.rows[0].values, vec!["1", "2", ""]);
        assert_eq!(dataset.rows[1].values, vec!["1", "2", "3"]);
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let file = create_temp_csv("RK,Player,PTS\n");
        let dataset = read_dataset(file.path()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.columns.len(), 3);
    }

    #[test]
    fn empty_file_has_no_header() {
        let file = create_temp_csv("\n\n");
        let err = read_dataset(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_dataset(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn invalid_utf8_reports_line() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Name\nok\n\xff\xfe\n").unwrap();
        let err = read_dataset(file.path()).unwrap_err();
        match err {
            LoadError::CsvParse { line, .. } => assert_eq!(line, Some(3)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn required_columns_are_enforced() {
        let file = create_temp_csv("RK,Player\n1,A\n");
        let err = read_dataset_with_columns(file.path(), &["RK", "Player", "PTS"]).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column, .. } if column == "PTS"));
    }
}
