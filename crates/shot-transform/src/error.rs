//! Error types for the transformation pipeline.

use std::io;

use shot_model::{ClubId, FieldRole, RecordId};
use thiserror::Error;

use crate::curation::SessionState;

/// A declared source column is absent from the input file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column '{column}' mapped to {role} not found in {file} (available: {available})")]
pub struct SchemaError {
    pub role: FieldRole,
    pub column: String,
    pub file: String,
    /// Comma-separated header names of the source file.
    pub available: String,
}

/// Protocol violations and prompt failures during curation.
#[derive(Debug, Error)]
pub enum CurationError {
    #[error("cannot {action} while session is {state}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },

    #[error("expected review of {expected}, got {got}")]
    ClubOutOfOrder { expected: ClubId, got: ClubId },

    #[error("record {id} does not belong to {club}")]
    ForeignRecord { id: RecordId, club: ClubId },

    #[error("{remaining} club(s) not yet reviewed")]
    Incomplete { remaining: usize },

    #[error("operator prompt failed: {source}")]
    Prompt {
        #[source]
        source: io::Error,
    },
}
