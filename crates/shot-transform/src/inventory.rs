//! Per-label shot counts shown before processing.

use std::collections::BTreeMap;

use shot_model::{ClubId, ClubMapping};

use crate::schema::MappedRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub label: String,
    pub shots: usize,
    /// Target club, or `None` when the label is excluded.
    pub mapped: Option<ClubId>,
}

/// Source club labels with their shot counts, sorted by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClubInventory {
    pub entries: Vec<InventoryEntry>,
}

impl ClubInventory {
    pub fn mapped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.mapped.is_some()).count()
    }

    pub fn excluded_count(&self) -> usize {
        self.entries.len() - self.mapped_count()
    }

    /// Shots that will survive the club filter.
    pub fn mapped_shots(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.mapped.is_some())
            .map(|e| e.shots)
            .sum()
    }

    /// Mapped labels with the target club and shot count, in label order.
    pub fn mapped(&self) -> impl Iterator<Item = (&str, ClubId, usize)> {
        self.entries
            .iter()
            .filter_map(|e| e.mapped.map(|club| (e.label.as_str(), club, e.shots)))
    }
}

/// Counts shots per club label. Blank labels are ignored.
pub fn club_inventory(rows: &[MappedRow<'_>], mapping: &ClubMapping) -> ClubInventory {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows.iter().filter(|row| !row.club.is_empty()) {
        *counts.entry(row.club).or_default() += 1;
    }
    let entries = counts
        .into_iter()
        .map(|(label, shots)| InventoryEntry {
            label: label.to_string(),
            shots,
            mapped: mapping.get(label),
        })
        .collect();
    ClubInventory { entries }
}
