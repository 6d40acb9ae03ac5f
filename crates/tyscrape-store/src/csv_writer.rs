use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tyscrape_core::{ProductRecord, CSV_HEADER};

use crate::error::StoreError;

/// Distinguishes temporary files of overlapping writes within one process.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Completion marker returned after the output file is in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows: usize,
}

/// Writes `records` to `path` as CSV, replacing any existing file.
///
/// The header row is always written, even when `records` is empty. Missing
/// fields are written as empty cells. Rows are written to a sibling
/// temporary file first and renamed over `path`, so a failed write leaves
/// the previous file untouched.
///
/// # Errors
///
/// - [`StoreError::Io`] if the temporary file cannot be created, flushed,
///   or renamed.
/// - [`StoreError::Csv`] if a row cannot be serialized.
pub fn write_csv(records: &[ProductRecord], path: &Path) -> Result<WriteSummary, StoreError> {
    let tmp_path = temp_path_for(path);

    if let Err(err) = write_rows(records, &tmp_path) {
        remove_best_effort(&tmp_path);
        return Err(err);
    }

    if let Err(source) = fs::rename(&tmp_path, path) {
        remove_best_effort(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::info!(path = %path.display(), rows = records.len(), "wrote CSV output");
    Ok(WriteSummary {
        path: path.to_path_buf(),
        rows: records.len(),
    })
}

fn write_rows(records: &[ProductRecord], tmp_path: &Path) -> Result<(), StoreError> {
    let file = fs::File::create(tmp_path).map_err(|source| StoreError::Io {
        path: tmp_path.to_path_buf(),
        source,
    })?;

    // Header is written by hand so an empty run still produces one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| StoreError::Io {
        path: tmp_path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map_or_else(|| "output.csv".into(), |n| n.to_string_lossy().into_owned());
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{file_name}.{}.{seq}.tmp", std::process::id()))
}

fn remove_best_effort(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), error = %e, "could not remove temporary CSV file");
    }
}

#[cfg(test)]
#[path = "csv_writer_test.rs"]
mod tests;
