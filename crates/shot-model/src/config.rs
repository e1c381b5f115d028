//! Typed mapping configuration.
//!
//! The configuration document has four fixed sections:
//!
//! ```json
//! {
//!   "units": { "distance": "meters", "deviation": "meters" },
//!   "column_mapping": { "Club": "Club Type", "Total": "Total Distance", "Side": "Total Deviation Distance" },
//!   "club_mappings": { "Driver": "Dr", "7 Iron": "7i" },
//!   "target_distances": { "Dr": 230, "7i": 150 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::club::{ClubId, ShotType};
use crate::error::{ModelError, Result};

/// Upper bound for a target distance, inclusive.
pub const MAX_TARGET_DISTANCE: u32 = 500;

/// Target used for clubs without a configured distance.
pub const DEFAULT_TARGET_DISTANCE: u32 = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotConfig {
    pub units: Units,
    pub column_mapping: FieldMapping,
    pub club_mappings: ClubMapping,
    pub target_distances: TargetDistanceTable,
}

impl ShotConfig {
    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.column_mapping.validate()
    }
}

/// Display units for distances and lateral deviation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    pub distance: Unit,
    pub deviation: Unit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Meters,
    Yards,
    Feet,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Meters => "meters",
            Unit::Yards => "yards",
            Unit::Feet => "feet",
        }
    }

    /// Short suffix used in tables.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::Yards => "yd",
            Unit::Feet => "ft",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic role of a mapped source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldRole {
    Club,
    Total,
    Side,
}

impl FieldRole {
    pub const ALL: [FieldRole; 3] = [FieldRole::Club, FieldRole::Total, FieldRole::Side];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRole::Club => "Club",
            FieldRole::Total => "Total",
            FieldRole::Side => "Side",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source column name for each of the three roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldMapping {
    pub club: String,
    pub total: String,
    pub side: String,
}

impl FieldMapping {
    pub fn new(club: impl Into<String>, total: impl Into<String>, side: impl Into<String>) -> Self {
        Self {
            club: club.into(),
            total: total.into(),
            side: side.into(),
        }
    }

    pub fn column(&self, role: FieldRole) -> &str {
        match role {
            FieldRole::Club => &self.club,
            FieldRole::Total => &self.total,
            FieldRole::Side => &self.side,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for role in FieldRole::ALL {
            if self.column(role).trim().is_empty() {
                return Err(ModelError::EmptyColumnMapping {
                    role: role.as_str(),
                });
            }
        }
        Ok(())
    }
}

/// Source club label to target club identifier.
///
/// Labels missing from the mapping are excluded from the analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClubMapping(BTreeMap<String, ClubId>);

impl ClubMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<ClubId> {
        self.0.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ClubId)> {
        self.0.iter().map(|(label, club)| (label.as_str(), *club))
    }
}

impl<L: Into<String>> FromIterator<(L, ClubId)> for ClubMapping {
    fn from_iter<T: IntoIterator<Item = (L, ClubId)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(label, club)| (label.into(), club))
                .collect(),
        )
    }
}

/// Target distance in configured distance units, bounded to `0..=500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TargetDistance(u32);

impl TargetDistance {
    pub fn new(value: u32) -> Result<Self> {
        if value > MAX_TARGET_DISTANCE {
            return Err(ModelError::TargetOutOfRange {
                value,
                max: MAX_TARGET_DISTANCE,
            });
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for TargetDistance {
    fn default() -> Self {
        Self(DEFAULT_TARGET_DISTANCE)
    }
}

impl TryFrom<u32> for TargetDistance {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TargetDistance> for u32 {
    fn from(value: TargetDistance) -> Self {
        value.0
    }
}

impl fmt::Display for TargetDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default target distance per target club.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetDistanceTable(BTreeMap<ClubId, TargetDistance>);

impl TargetDistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the distance for a club. Used for run-scoped overrides; the
    /// configuration file is never rewritten.
    pub fn set(&mut self, club: ClubId, distance: TargetDistance) -> Option<TargetDistance> {
        self.0.insert(club, distance)
    }

    pub fn get(&self, club: ClubId) -> Option<TargetDistance> {
        self.0.get(&club).copied()
    }

    pub fn get_or_default(&self, club: ClubId) -> TargetDistance {
        self.get(club).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ClubId, TargetDistance)> for TargetDistanceTable {
    fn from_iter<T: IntoIterator<Item = (ClubId, TargetDistance)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Shot type per target club. Clubs without an entry are approach shots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShotTypeTable(BTreeMap<ClubId, ShotType>);

impl ShotTypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, club: ClubId, shot_type: ShotType) -> Option<ShotType> {
        self.0.insert(club, shot_type)
    }

    pub fn get(&self, club: ClubId) -> ShotType {
        self.0.get(&club).copied().unwrap_or_default()
    }
}

impl FromIterator<(ClubId, ShotType)> for ShotTypeTable {
    fn from_iter<T: IntoIterator<Item = (ClubId, ShotType)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "units": { "distance": "yards", "deviation": "feet" },
        "column_mapping": { "Club": "Club Type", "Total": "Total Distance", "Side": "Total Deviation Distance" },
        "club_mappings": { "Driver": "Dr", "7 Iron": "7i", "Sand Wedge": "56°" },
        "target_distances": { "Dr": 230, "7i": 150 }
    }"#;

    #[test]
    fn test_config_deserializes() {
        let config: ShotConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.units.distance, Unit::Yards);
        assert_eq!(config.units.deviation, Unit::Feet);
        assert_eq!(config.column_mapping.column(FieldRole::Club), "Club Type");
        assert_eq!(config.club_mappings.get("Sand Wedge"), Some(ClubId::Deg56));
        assert_eq!(config.club_mappings.get("3 Wood"), None);
        assert_eq!(config.target_distances.get(ClubId::Dr).map(|d| d.get()), Some(230));
        config.validate().unwrap();
    }

    #[test]
    fn test_config_rejects_unknown_club() {
        let json = SAMPLE.replace("\"7i\", \"Sand", "\"7 iron\", \"Sand");
        let err = serde_json::from_str::<ShotConfig>(&json).unwrap_err();
        assert!(err.to_string().contains("unknown club identifier"));
    }

    #[test]
    fn test_config_rejects_out_of_range_target() {
        let json = SAMPLE.replace("\"Dr\": 230", "\"Dr\": 501");
        let err = serde_json::from_str::<ShotConfig>(&json).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_config_rejects_missing_section() {
        let json = r#"{ "units": { "distance": "meters", "deviation": "meters" } }"#;
        assert!(serde_json::from_str::<ShotConfig>(json).is_err());
    }

    #[test]
    fn test_field_mapping_validate_empty() {
        let mapping = FieldMapping::new("Club", " ", "Side");
        assert_eq!(
            mapping.validate(),
            Err(ModelError::EmptyColumnMapping { role: "Total" })
        );
    }

    #[test]
    fn test_target_distance_bounds() {
        assert_eq!(TargetDistance::new(0).unwrap().get(), 0);
        assert_eq!(TargetDistance::new(500).unwrap().get(), 500);
        assert!(TargetDistance::new(501).is_err());
        assert_eq!(TargetDistance::default().get(), DEFAULT_TARGET_DISTANCE);
    }

    #[test]
    fn test_target_table_override_is_local() {
        let config: ShotConfig = serde_json::from_str(SAMPLE).unwrap();
        let mut run_targets = config.target_distances.clone();
        run_targets.set(ClubId::Dr, TargetDistance::new(245).unwrap());
        assert_eq!(run_targets.get_or_default(ClubId::Dr).get(), 245);
        assert_eq!(config.target_distances.get_or_default(ClubId::Dr).get(), 230);
        assert_eq!(run_targets.get_or_default(ClubId::Pw).get(), DEFAULT_TARGET_DISTANCE);
    }

    #[test]
    fn test_shot_type_table_defaults_to_approach() {
        let table: ShotTypeTable = [(ClubId::Dr, ShotType::Tee)].into_iter().collect();
        assert_eq!(table.get(ClubId::Dr), ShotType::Tee);
        assert_eq!(table.get(ClubId::I7), ShotType::Approach);
    }
}
