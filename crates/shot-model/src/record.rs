//! Annotated shot records and the table that owns them.

use std::collections::BTreeSet;
use std::fmt;

use crate::club::{ClubId, ShotType};
use crate::config::{FieldRole, TargetDistance};

/// Rounds to two decimal places, ties to even (`245.125` becomes `245.12`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// One normalized shot, in output column order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRecord {
    pub club: ClubId,
    pub shot_type: ShotType,
    pub target: TargetDistance,
    /// Total distance, `None` when the source value was missing or not numeric.
    pub total: Option<f64>,
    /// Signed lateral deviation.
    pub side: Option<f64>,
}

impl AnnotatedRecord {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 5] = ["Club", "Type", "Target", "Total", "Side"];

    /// Returns a copy with `Total` and `Side` rounded to two decimals.
    pub fn rounded(&self) -> Self {
        Self {
            total: self.total.map(round2),
            side: self.side.map(round2),
            ..self.clone()
        }
    }
}

/// Stable identifier of a record: its position in the table it was built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(usize);

impl RecordId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena of annotated records.
///
/// Per-club views are lists of [`RecordId`]s into this table, so a selection
/// made against a view always refers to the same record in the full table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotTable {
    records: Vec<AnnotatedRecord>,
}

impl ShotTable {
    pub fn new(records: Vec<AnnotatedRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&AnnotatedRecord> {
        self.records.get(id.0)
    }

    pub fn records(&self) -> &[AnnotatedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AnnotatedRecord> {
        self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &AnnotatedRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (RecordId(index), record))
    }

    /// Distinct clubs in the order they first appear.
    pub fn clubs_by_appearance(&self) -> Vec<ClubId> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .filter(|record| seen.insert(record.club))
            .map(|record| record.club)
            .collect()
    }

    /// Distinct clubs sorted by their label (`10i` sorts before `7i`).
    pub fn clubs_by_label(&self) -> Vec<ClubId> {
        let mut clubs = self.clubs_by_appearance();
        clubs.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        clubs
    }

    /// Identifiers of every record hit with `club`, in table order.
    pub fn ids_for(&self, club: ClubId) -> Vec<RecordId> {
        self.iter()
            .filter(|(_, record)| record.club == club)
            .map(|(id, _)| id)
            .collect()
    }

    /// Builds a new table without the given records. Identifiers are
    /// reassigned in the returned table.
    pub fn without(self, removed: &BTreeSet<RecordId>) -> ShotTable {
        let records = self
            .records
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !removed.contains(&RecordId(*index)))
            .map(|(_, record)| record)
            .collect();
        ShotTable { records }
    }
}

impl FromIterator<AnnotatedRecord> for ShotTable {
    fn from_iter<T: IntoIterator<Item = AnnotatedRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A source value that could not be read as a number and was treated as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionWarning {
    /// 1-based data row number in the source file (units row excluded).
    pub row: usize,
    pub role: FieldRole,
    pub column: String,
    pub value: String,
}

impl fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: {} value '{}' in column '{}' is not numeric",
            self.row, self.role, self.value, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(club: ClubId, total: Option<f64>) -> AnnotatedRecord {
        AnnotatedRecord {
            club,
            shot_type: ShotType::Approach,
            target: TargetDistance::default(),
            total,
            side: Some(0.0),
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(245.123), 245.12);
        assert_eq!(round2(251.987), 251.99);
        assert_eq!(round2(-3.456), -3.46);
        assert_eq!(round2(round2(10.005)), round2(10.005));
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(245.125), 245.12);
        assert_eq!(round2(245.375), 245.38);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(-1.625), -1.62);
        assert_eq!(round2(-1.875), -1.88);
    }

    #[test]
    fn test_rounded_keeps_missing() {
        let rounded = record(ClubId::I7, None).rounded();
        assert_eq!(rounded.total, None);
        assert_eq!(rounded.side, Some(0.0));
    }

    #[test]
    fn test_club_orders() {
        let table: ShotTable = [
            record(ClubId::I7, Some(1.0)),
            record(ClubId::Dr, Some(1.0)),
            record(ClubId::I10, Some(1.0)),
            record(ClubId::I7, Some(1.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            table.clubs_by_appearance(),
            vec![ClubId::I7, ClubId::Dr, ClubId::I10]
        );
        assert_eq!(
            table.clubs_by_label(),
            vec![ClubId::I10, ClubId::I7, ClubId::Dr]
        );
        assert_eq!(
            table.ids_for(ClubId::I7),
            vec![RecordId::new(0), RecordId::new(3)]
        );
    }

    #[test]
    fn test_without_removes_by_id() {
        let table: ShotTable = (0..4)
            .map(|i| record(ClubId::Pw, Some(f64::from(i))))
            .collect();
        let removed: BTreeSet<RecordId> = [RecordId::new(1), RecordId::new(3)].into();
        let kept = table.without(&removed);
        let totals: Vec<Option<f64>> = kept.records().iter().map(|r| r.total).collect();
        assert_eq!(totals, vec![Some(0.0), Some(2.0)]);
    }

    #[test]
    fn test_coercion_warning_display() {
        let warning = CoercionWarning {
            row: 4,
            role: FieldRole::Side,
            column: "Lateral".to_string(),
            value: "n/a".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "row 4: Side value 'n/a' in column 'Lateral' is not numeric"
        );
    }
}
