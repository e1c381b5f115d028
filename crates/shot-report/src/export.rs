//! Dispersion-tool CSV export.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::WriterBuilder;
use shot_model::{AnnotatedRecord, ShotTable};
use tracing::info;

use crate::error::{ExportError, Result};

/// Output directory used when none is given, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data/output";

/// `<source stem>_transformed_<YYYYmmdd_HHMMSS>.csv`
pub fn export_file_name(source: &Path, timestamp: NaiveDateTime) -> String {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "shots".to_string());
    format!(
        "{stem}_transformed_{}.csv",
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Formats a measurement with two decimals; missing values are empty.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        // Avoid writing "-0.00".
        Some(v) if v == 0.0 => "0.00".to_string(),
        Some(v) => format!("{v:.2}"),
        None => String::new(),
    }
}

fn record_fields(record: &AnnotatedRecord) -> [String; 5] {
    [
        record.club.to_string(),
        record.shot_type.to_string(),
        record.target.to_string(),
        format_value(record.total),
        format_value(record.side),
    ]
}

/// Writes `table` to `path`, replacing any existing file.
pub fn write_export(path: &Path, table: &ShotTable) -> Result<()> {
    let file = File::create(path).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(file, path, table)
}

fn write_records(file: File, path: &Path, table: &ShotTable) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(file);
    let csv_error = |e: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    writer
        .write_record(AnnotatedRecord::COLUMNS)
        .map_err(csv_error)?;
    for record in table.records() {
        writer
            .write_record(record_fields(record))
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Exports `table` into `output_dir`, creating the directory if needed.
///
/// The file name is derived from `source` and `timestamp`. An export that
/// would land on an existing file fails with [`ExportError::Write`] and leaves
/// that file as it was. Returns the written path.
pub fn export_table(
    table: &ShotTable,
    source: &Path,
    output_dir: &Path,
    timestamp: NaiveDateTime,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDirectory {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(export_file_name(source, timestamp));
    // An existing file with the same name is an error, never overwritten.
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
    write_records(file, &path, table)?;
    info!(
        path = %path.display(),
        shots = table.len(),
        "export written"
    );
    Ok(path)
}
