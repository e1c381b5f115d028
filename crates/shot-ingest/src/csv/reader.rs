//! Launch-monitor CSV reading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ::csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

use super::header::{is_blank_header, normalize_header};
use super::table::{SourceRow, SourceTable};

/// Options controlling how a source file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Skip the row directly below the header (unit descriptions such as `[yds]`).
    pub skip_units_row: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            skip_units_row: true,
        }
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Reads a launch-monitor export into a [`SourceTable`].
///
/// Rows may have fewer or more cells than the header; missing cells read as
/// empty strings. Cell values are trimmed.
pub fn read_source_table(path: &Path, options: &ReadOptions) -> Result<SourceTable> {
    let file = open_file(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(normalize_header)
        .collect();

    if headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    if is_blank_header(&headers) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let skip = usize::from(options.skip_units_row);
    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if index < skip {
            continue;
        }
        let cells = record.iter().map(|value| value.trim().to_string()).collect();
        rows.push(SourceRow::new(rows.len() + 1, cells));
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        units_row_skipped = options.skip_units_row,
        "source file read"
    );

    Ok(SourceTable {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}
