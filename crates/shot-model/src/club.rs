//! Target club identifiers and shot types.
//!
//! The downstream dispersion tool only understands a fixed set of club
//! labels. [`ClubId`] models that set as a closed enumeration so that a
//! club which survived the mapping stage can never hold an unknown label.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ModelError;

/// Standardized club identifier as written to the `Club` output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClubId {
    Dr,
    Dr2,
    W2,
    W3,
    W4,
    W5,
    W6,
    W7,
    W8,
    W9,
    W10,
    W11,
    W12,
    W13,
    W14,
    W15,
    Hy1,
    Hy2,
    Hy3,
    Hy4,
    Hy5,
    Hy6,
    Hy7,
    Hy8,
    Hy9,
    Hy10,
    Hy11,
    Hy12,
    Hy13,
    Hy14,
    Hy15,
    I1,
    I2,
    I3,
    I4,
    I5,
    I6,
    I7,
    I8,
    I9,
    I10,
    I11,
    Pw,
    Gw,
    Sw,
    Lw,
    Deg48,
    Deg49,
    Deg50,
    Deg51,
    Deg52,
    Deg53,
    Deg54,
    Deg55,
    Deg56,
    Deg57,
    Deg58,
    Deg59,
    Deg60,
    Deg61,
    Deg62,
    Deg63,
    Deg64,
    Putter,
}

/// Broad club family, used for listing and default shot types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClubCategory {
    Driver,
    Wood,
    Hybrid,
    Iron,
    Wedge,
    Putter,
}

impl ClubId {
    /// Every identifier, in bag order (driver first, putter last).
    pub const ALL: [ClubId; 64] = [
        ClubId::Dr,
        ClubId::Dr2,
        ClubId::W2,
        ClubId::W3,
        ClubId::W4,
        ClubId::W5,
        ClubId::W6,
        ClubId::W7,
        ClubId::W8,
        ClubId::W9,
        ClubId::W10,
        ClubId::W11,
        ClubId::W12,
        ClubId::W13,
        ClubId::W14,
        ClubId::W15,
        ClubId::Hy1,
        ClubId::Hy2,
        ClubId::Hy3,
        ClubId::Hy4,
        ClubId::Hy5,
        ClubId::Hy6,
        ClubId::Hy7,
        ClubId::Hy8,
        ClubId::Hy9,
        ClubId::Hy10,
        ClubId::Hy11,
        ClubId::Hy12,
        ClubId::Hy13,
        ClubId::Hy14,
        ClubId::Hy15,
        ClubId::I1,
        ClubId::I2,
        ClubId::I3,
        ClubId::I4,
        ClubId::I5,
        ClubId::I6,
        ClubId::I7,
        ClubId::I8,
        ClubId::I9,
        ClubId::I10,
        ClubId::I11,
        ClubId::Pw,
        ClubId::Gw,
        ClubId::Sw,
        ClubId::Lw,
        ClubId::Deg48,
        ClubId::Deg49,
        ClubId::Deg50,
        ClubId::Deg51,
        ClubId::Deg52,
        ClubId::Deg53,
        ClubId::Deg54,
        ClubId::Deg55,
        ClubId::Deg56,
        ClubId::Deg57,
        ClubId::Deg58,
        ClubId::Deg59,
        ClubId::Deg60,
        ClubId::Deg61,
        ClubId::Deg62,
        ClubId::Deg63,
        ClubId::Deg64,
        ClubId::Putter,
    ];

    /// Returns the label understood by the dispersion tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubId::Dr => "Dr",
            ClubId::Dr2 => "Dr2",
            ClubId::W2 => "2W",
            ClubId::W3 => "3W",
            ClubId::W4 => "4W",
            ClubId::W5 => "5W",
            ClubId::W6 => "6W",
            ClubId::W7 => "7W",
            ClubId::W8 => "8W",
            ClubId::W9 => "9W",
            ClubId::W10 => "10W",
            ClubId::W11 => "11W",
            ClubId::W12 => "12W",
            ClubId::W13 => "13W",
            ClubId::W14 => "14W",
            ClubId::W15 => "15W",
            ClubId::Hy1 => "1Hy",
            ClubId::Hy2 => "2Hy",
            ClubId::Hy3 => "3Hy",
            ClubId::Hy4 => "4Hy",
            ClubId::Hy5 => "5Hy",
            ClubId::Hy6 => "6Hy",
            ClubId::Hy7 => "7Hy",
            ClubId::Hy8 => "8Hy",
            ClubId::Hy9 => "9Hy",
            ClubId::Hy10 => "10Hy",
            ClubId::Hy11 => "11Hy",
            ClubId::Hy12 => "12Hy",
            ClubId::Hy13 => "13Hy",
            ClubId::Hy14 => "14Hy",
            ClubId::Hy15 => "15Hy",
            ClubId::I1 => "1i",
            ClubId::I2 => "2i",
            ClubId::I3 => "3i",
            ClubId::I4 => "4i",
            ClubId::I5 => "5i",
            ClubId::I6 => "6i",
            ClubId::I7 => "7i",
            ClubId::I8 => "8i",
            ClubId::I9 => "9i",
            ClubId::I10 => "10i",
            ClubId::I11 => "11i",
            ClubId::Pw => "PW",
            ClubId::Gw => "GW",
            ClubId::Sw => "SW",
            ClubId::Lw => "LW",
            ClubId::Deg48 => "48°",
            ClubId::Deg49 => "49°",
            ClubId::Deg50 => "50°",
            ClubId::Deg51 => "51°",
            ClubId::Deg52 => "52°",
            ClubId::Deg53 => "53°",
            ClubId::Deg54 => "54°",
            ClubId::Deg55 => "55°",
            ClubId::Deg56 => "56°",
            ClubId::Deg57 => "57°",
            ClubId::Deg58 => "58°",
            ClubId::Deg59 => "59°",
            ClubId::Deg60 => "60°",
            ClubId::Deg61 => "61°",
            ClubId::Deg62 => "62°",
            ClubId::Deg63 => "63°",
            ClubId::Deg64 => "64°",
            ClubId::Putter => "Putter",
        }
    }

    pub fn category(&self) -> ClubCategory {
        match self {
            ClubId::Dr | ClubId::Dr2 => ClubCategory::Driver,
            ClubId::W2
            | ClubId::W3
            | ClubId::W4
            | ClubId::W5
            | ClubId::W6
            | ClubId::W7
            | ClubId::W8
            | ClubId::W9
            | ClubId::W10
            | ClubId::W11
            | ClubId::W12
            | ClubId::W13
            | ClubId::W14
            | ClubId::W15 => ClubCategory::Wood,
            ClubId::Hy1
            | ClubId::Hy2
            | ClubId::Hy3
            | ClubId::Hy4
            | ClubId::Hy5
            | ClubId::Hy6
            | ClubId::Hy7
            | ClubId::Hy8
            | ClubId::Hy9
            | ClubId::Hy10
            | ClubId::Hy11
            | ClubId::Hy12
            | ClubId::Hy13
            | ClubId::Hy14
            | ClubId::Hy15 => ClubCategory::Hybrid,
            ClubId::I1
            | ClubId::I2
            | ClubId::I3
            | ClubId::I4
            | ClubId::I5
            | ClubId::I6
            | ClubId::I7
            | ClubId::I8
            | ClubId::I9
            | ClubId::I10
            | ClubId::I11 => ClubCategory::Iron,
            ClubId::Pw
            | ClubId::Gw
            | ClubId::Sw
            | ClubId::Lw
            | ClubId::Deg48
            | ClubId::Deg49
            | ClubId::Deg50
            | ClubId::Deg51
            | ClubId::Deg52
            | ClubId::Deg53
            | ClubId::Deg54
            | ClubId::Deg55
            | ClubId::Deg56
            | ClubId::Deg57
            | ClubId::Deg58
            | ClubId::Deg59
            | ClubId::Deg60
            | ClubId::Deg61
            | ClubId::Deg62
            | ClubId::Deg63
            | ClubId::Deg64 => ClubCategory::Wedge,
            ClubId::Putter => ClubCategory::Putter,
        }
    }

    /// Shot type suggested when the operator has not chosen one.
    pub fn default_shot_type(&self) -> ShotType {
        match self.category() {
            ClubCategory::Driver => ShotType::Tee,
            ClubCategory::Wood
            | ClubCategory::Hybrid
            | ClubCategory::Iron
            | ClubCategory::Wedge
            | ClubCategory::Putter => ShotType::Approach,
        }
    }
}

impl ClubCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubCategory::Driver => "Driver",
            ClubCategory::Wood => "Wood",
            ClubCategory::Hybrid => "Hybrid",
            ClubCategory::Iron => "Iron",
            ClubCategory::Wedge => "Wedge",
            ClubCategory::Putter => "Putter",
        }
    }
}

impl fmt::Display for ClubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ClubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClubId {
    type Err = ModelError;

    /// Parses an identifier label. Exact matches win; otherwise the label is
    /// compared case-insensitively (`pw`, `3w`, `PUTTER`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ClubId::ALL
            .iter()
            .find(|club| club.as_str() == trimmed)
            .or_else(|| {
                ClubId::ALL
                    .iter()
                    .find(|club| club.as_str().eq_ignore_ascii_case(trimmed))
            })
            .copied()
            .ok_or_else(|| ModelError::UnknownClub(s.to_string()))
    }
}

impl Serialize for ClubId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClubId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

/// Whether a club's shots are tee shots or approach shots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotType {
    Tee,
    #[default]
    Approach,
}

impl ShotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::Tee => "Tee",
            ShotType::Approach => "Approach",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TEE" | "T" => Ok(ShotType::Tee),
            "APPROACH" | "A" => Ok(ShotType::Approach),
            _ => Err(ModelError::UnknownShotType(s.to_string())),
        }
    }
}
