//! Shared data model for the shot transpiler.
//!
//! - [`ClubId`]: the closed vocabulary of target club identifiers
//! - [`AnnotatedRecord`] and [`ShotTable`]: the normalized shot rows and their arena
//! - [`ClubStats`]: per-club summary statistics
//! - [`ShotConfig`]: the typed mapping configuration

pub mod club;
pub mod config;
pub mod error;
pub mod record;
pub mod stats;

pub use club::{ClubCategory, ClubId, ShotType};
pub use config::{
    ClubMapping, DEFAULT_TARGET_DISTANCE, FieldMapping, FieldRole, MAX_TARGET_DISTANCE,
    ShotConfig, ShotTypeTable, TargetDistance, TargetDistanceTable, Unit, Units,
};
pub use error::{ModelError, Result};
pub use record::{AnnotatedRecord, CoercionWarning, RecordId, ShotTable, round2};
pub use stats::{ClubStats, FieldStats};
