//! Schema mapping: source columns to the `Club`, `Total` and `Side` roles.

use shot_ingest::SourceTable;
use shot_model::{FieldMapping, FieldRole};
use tracing::debug;

use crate::error::SchemaError;

/// Column positions of the three roles in a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSchema {
    pub club: usize,
    pub total: usize,
    pub side: usize,
}

/// A source row reduced to the three mapped values, uninterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedRow<'a> {
    /// 1-based data row number in the source file.
    pub number: usize,
    pub club: &'a str,
    pub total: &'a str,
    pub side: &'a str,
}

/// All rows of a source table projected through a [`FieldMapping`].
#[derive(Debug, Clone)]
pub struct MappedSource<'a> {
    pub mapping: &'a FieldMapping,
    pub rows: Vec<MappedRow<'a>>,
}

/// Resolves every role of `mapping` against the header of `table`.
///
/// Runs before any row is looked at, so a missing column fails the whole
/// file instead of individual rows.
pub fn resolve_schema(
    mapping: &FieldMapping,
    table: &SourceTable,
) -> Result<ResolvedSchema, SchemaError> {
    let index_of = |role: FieldRole| {
        let column = mapping.column(role).trim();
        table.column_index(column).ok_or_else(|| SchemaError {
            role,
            column: column.to_string(),
            file: table.source_name(),
            available: table.headers.join(", "),
        })
    };
    let schema = ResolvedSchema {
        club: index_of(FieldRole::Club)?,
        total: index_of(FieldRole::Total)?,
        side: index_of(FieldRole::Side)?,
    };
    debug!(
        file = %table.source_name(),
        club = schema.club,
        total = schema.total,
        side = schema.side,
        "schema resolved"
    );
    Ok(schema)
}

impl ResolvedSchema {
    pub fn map_rows<'a>(&self, table: &'a SourceTable) -> Vec<MappedRow<'a>> {
        table
            .rows
            .iter()
            .map(|row| MappedRow {
                number: row.number,
                club: row.cell(self.club),
                total: row.cell(self.total),
                side: row.cell(self.side),
            })
            .collect()
    }
}

impl<'a> MappedSource<'a> {
    /// Resolves the schema and projects every row.
    pub fn new(mapping: &'a FieldMapping, table: &'a SourceTable) -> Result<Self, SchemaError> {
        let schema = resolve_schema(mapping, table)?;
        Ok(Self {
            mapping,
            rows: schema.map_rows(table),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn table() -> SourceTable {
        SourceTable::from_rows(
            "session.csv",
            strings(&["Date", "ClubType", "Carry", "Lateral"]),
            vec![
                strings(&["2024-05-01", "Drv", "245.123", "-3.4"]),
                strings(&["2024-05-01", "7 Iron", "150"]),
            ],
        )
    }

    #[test]
    fn test_resolve_schema() {
        let mapping = FieldMapping::new("ClubType", "Carry", "Lateral");
        let schema = resolve_schema(&mapping, &table()).unwrap();
        assert_eq!(
            schema,
            ResolvedSchema {
                club: 1,
                total: 2,
                side: 3
            }
        );
    }

    #[test]
    fn test_resolve_schema_missing_column() {
        let mapping = FieldMapping::new("ClubType", "Total Distance", "Lateral");
        let err = resolve_schema(&mapping, &table()).unwrap_err();
        assert_eq!(err.role, FieldRole::Total);
        assert_eq!(err.column, "Total Distance");
        assert_eq!(err.file, "session.csv");
        assert!(err.to_string().contains("available: Date, ClubType, Carry, Lateral"));
    }

    #[test]
    fn test_mapped_rows_keep_raw_values() {
        let mapping = FieldMapping::new("ClubType", "Carry", "Lateral");
        let source = table();
        let mapped = MappedSource::new(&mapping, &source).unwrap();
        assert_eq!(mapped.len(), 2);
        assert_eq!(
            mapped.rows[0],
            MappedRow {
                number: 1,
                club: "Drv",
                total: "245.123",
                side: "-3.4"
            }
        );
        assert_eq!(mapped.rows[1].side, "");
    }
}
