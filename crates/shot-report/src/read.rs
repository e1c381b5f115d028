//! Reading previously exported files back into a [`ShotTable`].

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use shot_model::{AnnotatedRecord, ClubId, ShotTable, ShotType, TargetDistance};
use tracing::debug;

use crate::error::{ExportError, Result};

/// Reads an export written by [`crate::write_export`].
///
/// The header must match the export column layout exactly. Empty `Total` or
/// `Side` cells become missing values.
pub fn read_export(path: &Path) -> Result<ShotTable> {
    let file = File::open(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let csv_error = |e: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let headers = reader.headers().map_err(csv_error)?.clone();
    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found != AnnotatedRecord::COLUMNS {
        return Err(ExportError::InvalidRecord {
            path: path.to_path_buf(),
            line: 1,
            message: format!(
                "expected header {}, found {}",
                AnnotatedRecord::COLUMNS.join(","),
                found.join(",")
            ),
        });
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_error)?;
        let line = row.position().map_or(0, |p| p.line());
        let record = parse_record(&row).map_err(|message| ExportError::InvalidRecord {
            path: path.to_path_buf(),
            line,
            message,
        })?;
        records.push(record);
    }

    debug!(path = %path.display(), shots = records.len(), "export read");
    Ok(ShotTable::new(records))
}

fn parse_record(row: &StringRecord) -> std::result::Result<AnnotatedRecord, String> {
    let field = |index: usize| row.get(index).map_or("", str::trim);

    let club: ClubId = field(0).parse().map_err(|e| format!("{e}"))?;
    let shot_type: ShotType = field(1).parse().map_err(|e| format!("{e}"))?;
    let target = field(2)
        .parse::<u32>()
        .map_err(|_| format!("target '{}' is not a whole number", field(2)))
        .and_then(|value| TargetDistance::new(value).map_err(|e| format!("{e}")))?;
    let total = parse_measurement("Total", field(3))?;
    let side = parse_measurement("Side", field(4))?;

    Ok(AnnotatedRecord {
        club,
        shot_type,
        target,
        total,
        side,
    })
}

fn parse_measurement(column: &str, raw: &str) -> std::result::Result<Option<f64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(format!("{column} value '{raw}' is not a finite number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_export() {
        let file = write_csv("Club,Type,Target,Total,Side\nDr,Tee,250,245.12,-3.40\n7i,Approach,150,,\n");
        let table = read_export(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.club, ClubId::Dr);
        assert_eq!(first.shot_type, ShotType::Tee);
        assert_eq!(first.target.get(), 250);
        assert_eq!(first.total, Some(245.12));
        assert_eq!(first.side, Some(-3.4));
        let second = &table.records()[1];
        assert_eq!(second.club, ClubId::I7);
        assert_eq!(second.total, None);
        assert_eq!(second.side, None);
    }

    #[test]
    fn test_read_export_rejects_foreign_header() {
        let file = write_csv("Club Type,Carry,Total Distance\n7 Iron,150,152\n");
        let err = read_export(file.path()).unwrap_err();
        assert!(matches!(err, ExportError::InvalidRecord { line: 1, .. }));
    }

    #[test]
    fn test_read_export_reports_line_of_bad_row() {
        let file = write_csv("Club,Type,Target,Total,Side\nDr,Tee,250,245,1\n7i,Approach,150,NaN,2\n");
        let err = read_export(file.path()).unwrap_err();
        match err {
            ExportError::InvalidRecord { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("Total"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_export_rejects_unknown_club() {
        let file = write_csv("Club,Type,Target,Total,Side\nSpoon,Tee,200,190,1\n");
        assert!(matches!(
            read_export(file.path()),
            Err(ExportError::InvalidRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_read_export_missing_file() {
        let err = read_export(Path::new("/nonexistent/export.csv")).unwrap_err();
        assert!(matches!(err, ExportError::Read { .. }));
    }
}
