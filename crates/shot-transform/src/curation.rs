//! Operator-driven removal of shots.
//!
//! A session walks every club once, in label order, and collects the
//! identifiers the operator marks. Nothing is removed until [`CurationSession::commit`],
//! which drops every marked record in one step and hands back the new table.
//!
//! ```text
//! NotStarted --start--> Reviewing { position } --submit (per club)--> ... --commit--> Committed
//!      \--decline--> (table returned untouched)
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::io;

use shot_model::{AnnotatedRecord, ClubId, RecordId, ShotTable};
use tracing::{debug, info};

use crate::error::CurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    /// Reviewing the club at `position` in label order.
    Reviewing { position: usize },
    Committed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => f.write_str("not started"),
            SessionState::Reviewing { position } => write!(f, "reviewing club {}", position + 1),
            SessionState::Committed => f.write_str("committed"),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurationOutcome {
    /// The operator did not review at all.
    Declined,
    /// Every club was reviewed and nothing was marked.
    Unchanged,
    Applied { removed: usize },
}

impl CurationOutcome {
    /// True only when records were actually removed, i.e. statistics must be recomputed.
    pub fn changed(&self) -> bool {
        self.removed() > 0
    }

    pub fn removed(&self) -> usize {
        match self {
            CurationOutcome::Applied { removed } => *removed,
            CurationOutcome::Declined | CurationOutcome::Unchanged => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CurationResult {
    pub table: ShotTable,
    pub outcome: CurationOutcome,
}

/// The shots of one club, as presented to the operator.
#[derive(Debug, Clone)]
pub struct ClubReview<'a> {
    pub club: ClubId,
    /// 0-based position of this club in the review order.
    pub position: usize,
    pub club_count: usize,
    pub shots: Vec<(RecordId, &'a AnnotatedRecord)>,
}

/// Operator side of a session.
pub trait CurationOperator {
    /// Asked once before the first club. Returning `false` declines the session.
    fn begin(&mut self, clubs: &[ClubId], shots: usize) -> io::Result<bool>;

    /// Returns the identifiers to remove from `review`.
    fn review(&mut self, review: &ClubReview<'_>) -> io::Result<Vec<RecordId>>;
}

#[derive(Debug)]
pub struct CurationSession {
    table: ShotTable,
    order: Vec<ClubId>,
    marked: BTreeSet<RecordId>,
    state: SessionState,
}

impl CurationSession {
    pub fn new(table: ShotTable) -> Self {
        let order = table.clubs_by_label();
        Self {
            table,
            order,
            marked: BTreeSet::new(),
            state: SessionState::NotStarted,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Clubs in review order.
    pub fn clubs(&self) -> &[ClubId] {
        &self.order
    }

    pub fn table(&self) -> &ShotTable {
        &self.table
    }

    pub fn marked(&self) -> &BTreeSet<RecordId> {
        &self.marked
    }

    pub fn start(&mut self) -> Result<(), CurationError> {
        if self.state != SessionState::NotStarted {
            return Err(CurationError::InvalidState {
                action: "start",
                state: self.state,
            });
        }
        self.state = SessionState::Reviewing { position: 0 };
        Ok(())
    }

    /// The club awaiting review, or `None` once every club has been reviewed.
    pub fn current(&self) -> Option<ClubReview<'_>> {
        let SessionState::Reviewing { position } = self.state else {
            return None;
        };
        let club = *self.order.get(position)?;
        let shots = self
            .table
            .iter()
            .filter(|(_, record)| record.club == club)
            .collect();
        Some(ClubReview {
            club,
            position,
            club_count: self.order.len(),
            shots,
        })
    }

    /// Records the removal choice for the current club and moves to the next.
    ///
    /// Returns how many new identifiers were marked.
    pub fn submit(&mut self, club: ClubId, selected: &[RecordId]) -> Result<usize, CurationError> {
        let SessionState::Reviewing { position } = self.state else {
            return Err(CurationError::InvalidState {
                action: "submit",
                state: self.state,
            });
        };
        let Some(&expected) = self.order.get(position) else {
            return Err(CurationError::InvalidState {
                action: "submit",
                state: self.state,
            });
        };
        if club != expected {
            return Err(CurationError::ClubOutOfOrder {
                expected,
                got: club,
            });
        }
        for id in selected {
            let belongs = self.table.get(*id).is_some_and(|record| record.club == club);
            if !belongs {
                return Err(CurationError::ForeignRecord { id: *id, club });
            }
        }
        let before = self.marked.len();
        self.marked.extend(selected.iter().copied());
        let newly_marked = self.marked.len() - before;
        debug!(club = %club, marked = newly_marked, "club reviewed");
        self.state = SessionState::Reviewing {
            position: position + 1,
        };
        Ok(newly_marked)
    }

    /// Declines the session before it started; the table is returned untouched.
    pub fn decline(self) -> Result<CurationResult, CurationError> {
        if self.state != SessionState::NotStarted {
            return Err(CurationError::InvalidState {
                action: "decline",
                state: self.state,
            });
        }
        Ok(CurationResult {
            table: self.table,
            outcome: CurationOutcome::Declined,
        })
    }

    /// Applies every marked removal at once.
    pub fn commit(mut self) -> Result<CurationResult, CurationError> {
        let SessionState::Reviewing { position } = self.state else {
            return Err(CurationError::InvalidState {
                action: "commit",
                state: self.state,
            });
        };
        if position < self.order.len() {
            return Err(CurationError::Incomplete {
                remaining: self.order.len() - position,
            });
        }
        self.state = SessionState::Committed;
        if self.marked.is_empty() {
            info!(shots = self.table.len(), "curation committed, no shots removed");
            return Ok(CurationResult {
                table: self.table,
                outcome: CurationOutcome::Unchanged,
            });
        }
        let before = self.table.len();
        let table = self.table.without(&self.marked);
        let removed = before - table.len();
        info!(removed, remaining = table.len(), "curation committed");
        Ok(CurationResult {
            table,
            outcome: CurationOutcome::Applied { removed },
        })
    }
}

/// Drives a full session with `operator`.
///
/// An empty table is returned unchanged without prompting.
pub fn run_curation(
    table: ShotTable,
    operator: &mut dyn CurationOperator,
) -> Result<CurationResult, CurationError> {
    let mut session = CurationSession::new(table);
    if session.table().is_empty() {
        return Ok(CurationResult {
            table: session.table,
            outcome: CurationOutcome::Unchanged,
        });
    }
    let wants_review = operator
        .begin(session.clubs(), session.table().len())
        .map_err(|source| CurationError::Prompt { source })?;
    if !wants_review {
        info!("curation declined");
        return session.decline();
    }
    session.start()?;
    loop {
        let (club, selected) = match session.current() {
            Some(review) => {
                let selected = operator
                    .review(&review)
                    .map_err(|source| CurationError::Prompt { source })?;
                (review.club, selected)
            }
            None => break,
        };
        session.submit(club, &selected)?;
    }
    session.commit()
}
