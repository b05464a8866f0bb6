//! Writers for merged rows, unmatched rows and match statistics.

use std::io::Write;
use std::path::{Path, PathBuf};

use roster_model::{INTERNAL_KEY_COLUMN, MatchStats, MergedDataset, SecondaryColumns, UnmatchedEntry};
use tracing::info;

use crate::error::OutputError;

pub const MERGED_FILE: &str = "merged_players_data.csv";
pub const UNMATCHED_FILE: &str = "unmatched_players.csv";
pub const STATS_FILE: &str = "merge_stats.json";

/// Output file locations inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub merged: PathBuf,
    pub unmatched: PathBuf,
    pub stats: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            merged: dir.join(MERGED_FILE),
            unmatched: dir.join(UNMATCHED_FILE),
            stats: dir.join(STATS_FILE),
        }
    }

    pub fn create_dir(&self) -> Result<(), OutputError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| OutputError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }
}

/// Writes merged records in schema column order.
pub fn write_merged<W: Write>(writer: W, merged: &MergedDataset) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&merged.schema.columns)?;
    for record in &merged.records {
        writer.write_record(&record.values)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes unmatched rows as name, rank, metric and canonical key.
///
/// Suggestion columns are appended when `with_suggestions` is set.
pub fn write_unmatched<W: Write>(
    writer: W,
    unmatched: &[UnmatchedEntry],
    columns: &SecondaryColumns,
    with_suggestions: bool,
) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut header = vec![
        columns.name.as_str(),
        columns.rank.as_str(),
        columns.metric.as_str(),
        INTERNAL_KEY_COLUMN,
    ];
    if with_suggestions {
        header.extend(["Nearest_Name", "Nearest_Similarity"]);
    }
    writer.write_record(&header)?;
    for entry in unmatched {
        let mut row = vec![
            entry.name.clone(),
            entry.rank.clone(),
            entry.metric.clone(),
            entry.canonical_key.to_string(),
        ];
        if with_suggestions {
            match &entry.nearest {
                Some(nearest) => {
                    row.push(nearest.name.clone());
                    row.push(format!("{:.3}", nearest.similarity));
                }
                None => row.extend([String::new(), String::new()]),
            }
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<std::fs::File, OutputError> {
    std::fs::File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Persists the merged dataset. An empty merge is refused.
pub fn write_merged_csv(path: &Path, merged: &MergedDataset) -> Result<usize, OutputError> {
    if merged.is_empty() {
        return Err(OutputError::EmptyMerge {
            path: path.to_path_buf(),
        });
    }
    let file = create(path)?;
    write_merged(file, merged).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = merged.len(), "wrote merged dataset");
    Ok(merged.len())
}

pub fn write_unmatched_csv(
    path: &Path,
    unmatched: &[UnmatchedEntry],
    columns: &SecondaryColumns,
    with_suggestions: bool,
) -> Result<usize, OutputError> {
    let file = create(path)?;
    write_unmatched(file, unmatched, columns, with_suggestions).map_err(|source| {
        OutputError::Csv {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), rows = unmatched.len(), "wrote unmatched rows");
    Ok(unmatched.len())
}

pub fn write_stats_json(path: &Path, stats: &MatchStats) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(stats).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, format!("{json}\n")).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote match statistics");
    Ok(())
}
