use std::path::{Path, PathBuf};

/// A launch-monitor export held as positional string cells.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub path: PathBuf,
    /// Normalized column names.
    pub headers: Vec<String>,
    pub rows: Vec<SourceRow>,
}

/// One data row of a [`SourceTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based data row number (units row excluded).
    pub number: usize,
    cells: Vec<String>,
}

impl SourceRow {
    pub fn new(number: usize, cells: Vec<String>) -> Self {
        Self { number, cells }
    }

    /// Returns the cell at `index`, or an empty string for short rows.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl SourceTable {
    /// Builds an in-memory table; used by tests and callers that already hold rows.
    pub fn from_rows(
        path: impl Into<PathBuf>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, cells)| SourceRow::new(index + 1, cells))
            .collect();
        Self {
            path: path.into(),
            headers,
            rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// File name for messages; falls back to the full path.
    pub fn source_name(&self) -> String {
        file_name(&self.path)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let row = SourceRow::new(1, vec!["Driver".to_string()]);
        assert_eq!(row.cell(0), "Driver");
        assert_eq!(row.cell(5), "");
    }

    #[test]
    fn test_column_index_and_source_name() {
        let table = SourceTable::from_rows(
            "data/garmin/session.csv",
            vec!["Club".to_string(), "Carry".to_string()],
            vec![vec!["7 Iron".to_string(), "150".to_string()]],
        );
        assert_eq!(table.column_index("Carry"), Some(1));
        assert_eq!(table.column_index("Total"), None);
        assert_eq!(table.source_name(), "session.csv");
        assert_eq!(table.rows[0].number, 1);
    }
}
