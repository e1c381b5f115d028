use crate::club::{ClubId, ShotType};
use crate::config::TargetDistance;

/// Mean, minimum and maximum over the present values of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    /// Number of present values the statistics were computed from.
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Summary of one club's shots. Always derived from the current table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClubStats {
    pub club: ClubId,
    pub shot_type: ShotType,
    pub target: TargetDistance,
    pub shots: usize,
    /// `None` when every `Total` in the group is missing.
    pub total: Option<FieldStats>,
    pub side: Option<FieldStats>,
}
