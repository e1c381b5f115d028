//! Record filtering and annotation.

use shot_model::{
    AnnotatedRecord, ClubMapping, CoercionWarning, FieldRole, ShotTable, ShotTypeTable,
    TargetDistanceTable, round2,
};
use tracing::{debug, warn};

use crate::numeric::{Coerced, coerce_numeric};
use crate::schema::{MappedRow, MappedSource};

/// Lookup tables applied to every mapped row.
#[derive(Debug, Clone, Copy)]
pub struct Annotator<'a> {
    pub clubs: &'a ClubMapping,
    pub targets: &'a TargetDistanceTable,
    pub shot_types: &'a ShotTypeTable,
}

/// Result of annotating a source.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    pub table: ShotTable,
    pub warnings: Vec<CoercionWarning>,
    /// Rows dropped because their club label is not mapped.
    pub dropped: usize,
}

impl<'a> Annotator<'a> {
    pub fn new(
        clubs: &'a ClubMapping,
        targets: &'a TargetDistanceTable,
        shot_types: &'a ShotTypeTable,
    ) -> Self {
        Self {
            clubs,
            targets,
            shot_types,
        }
    }

    /// Builds the annotated table, keeping source row order.
    ///
    /// `Type` and `Target` are looked up by the target club, so two source
    /// labels mapped to the same club always share them.
    pub fn annotate(&self, source: &MappedSource<'_>) -> Annotation {
        let mut records = Vec::with_capacity(source.len());
        let mut warnings = Vec::new();
        let mut dropped = 0usize;

        for row in &source.rows {
            let Some(club) = self.clubs.get(row.club) else {
                debug!(row = row.number, label = row.club, "club label not mapped, row dropped");
                dropped += 1;
                continue;
            };
            if self.targets.get(club).is_none() {
                debug!(club = %club, "no target distance configured, using default");
            }
            let total = coerce_field(source, row, FieldRole::Total, row.total, &mut warnings);
            let side = coerce_field(source, row, FieldRole::Side, row.side, &mut warnings);
            records.push(AnnotatedRecord {
                club,
                shot_type: self.shot_types.get(club),
                target: self.targets.get_or_default(club),
                total: total.map(round2),
                side: side.map(round2),
            });
        }

        Annotation {
            table: ShotTable::new(records),
            warnings,
            dropped,
        }
    }
}

fn coerce_field(
    source: &MappedSource<'_>,
    row: &MappedRow<'_>,
    role: FieldRole,
    value: &str,
    warnings: &mut Vec<CoercionWarning>,
) -> Option<f64> {
    let coerced = coerce_numeric(value);
    if coerced == Coerced::Invalid {
        let column = source.mapping.column(role).to_string();
        warn!(
            row = row.number,
            role = %role,
            column = %column,
            value,
            "value is not numeric, treated as missing"
        );
        warnings.push(CoercionWarning {
            row: row.number,
            role,
            column,
            value: value.to_string(),
        });
    }
    coerced.value()
}
