//! Shot transformation pipeline.
//!
//! Stages run strictly in order:
//!
//! 1. [`resolve_schema`]: locate the `Club`, `Total` and `Side` source columns
//! 2. [`Annotator`]: drop unmapped clubs and attach `Type` and `Target`
//! 3. [`club_stats`]: per-club summary statistics
//! 4. [`CurationSession`]: operator-driven removal, committed as one batch

pub mod aggregate;
pub mod annotate;
pub mod curation;
pub mod error;
pub mod inventory;
pub mod numeric;
pub mod schema;

pub use aggregate::{club_stats, field_stats};
pub use annotate::{Annotation, Annotator};
pub use curation::{
    ClubReview, CurationOperator, CurationOutcome, CurationResult, CurationSession, SessionState,
    run_curation,
};
pub use error::{CurationError, SchemaError};
pub use inventory::{ClubInventory, InventoryEntry, club_inventory};
pub use numeric::{Coerced, coerce_numeric, parse_f64};
pub use schema::{MappedRow, MappedSource, ResolvedSchema, resolve_schema};
