//! Transform run with explicit stages.
//!
//! The stages run in this order:
//! 1. **Ingest**: read the source CSV
//! 2. **Map**: resolve the configured columns and count shots per club label
//! 3. **Settings**: ask the operator for per-club target distance and shot type
//! 4. **Annotate**: drop unmapped clubs, attach `Type` and `Target`
//! 5. **Curate**: operator-driven removal
//! 6. **Export**: write the dispersion-tool CSV
//!
//! Each stage takes the output of the previous one. [`RunOptions`] decides
//! whether the review and export stages run. Printing and spans live in the
//! command layer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::debug;

use shot_ingest::{ReadOptions, SourceTable, read_source_table};
use shot_model::{ClubId, ShotConfig, ShotTable, ShotTypeTable, TargetDistanceTable};
use shot_report::export_table;
use shot_transform::{
    Annotation, Annotator, ClubInventory, CurationOperator, CurationOutcome, CurationResult,
    MappedSource, club_inventory, run_curation,
};

use crate::prompt::Operator;

// ============================================================================
// Stage 1: Ingest
// ============================================================================

pub fn ingest(path: &Path, options: &ReadOptions) -> Result<SourceTable> {
    read_source_table(path, options).with_context(|| format!("read {}", path.display()))
}

// ============================================================================
// Stage 2: Map
// ============================================================================

/// Projected source rows together with the per-label inventory.
#[derive(Debug)]
pub struct MapResult<'a> {
    pub source: MappedSource<'a>,
    pub inventory: ClubInventory,
}

/// Fails before looking at any row when a configured column is missing.
pub fn map_source<'a>(table: &'a SourceTable, config: &'a ShotConfig) -> Result<MapResult<'a>> {
    let source = MappedSource::new(&config.column_mapping, table)?;
    let inventory = club_inventory(&source.rows, &config.club_mappings);
    debug!(
        labels = inventory.entries.len(),
        mapped = inventory.mapped_count(),
        excluded = inventory.excluded_count(),
        "club inventory built"
    );
    Ok(MapResult { source, inventory })
}

/// Stops the run when no source label maps to a target club.
pub fn require_mapped(inventory: &ClubInventory, path: &Path) -> Result<()> {
    if inventory.mapped_count() == 0 {
        bail!(
            "no club in {} is mapped; add its labels to club_mappings",
            path.display()
        );
    }
    Ok(())
}

// ============================================================================
// Stage 3: Settings
// ============================================================================

/// Per-club choices for this run. Never written back to the configuration.
#[derive(Debug, Clone, Default)]
pub struct RunSettings {
    pub targets: TargetDistanceTable,
    pub shot_types: ShotTypeTable,
    /// Target clubs in prompt order, with their shot counts.
    pub clubs: Vec<(ClubId, usize)>,
}

/// Distinct target clubs of the mapped labels, in label order, with the
/// shots of every label mapped onto them.
pub fn mapped_clubs(inventory: &ClubInventory) -> Vec<(ClubId, usize)> {
    let mut clubs: Vec<(ClubId, usize)> = Vec::new();
    for (_, club, shots) in inventory.mapped() {
        match clubs.iter_mut().find(|(seen, _)| *seen == club) {
            Some((_, total)) => *total += shots,
            None => clubs.push((club, shots)),
        }
    }
    clubs
}

/// Asks for the target distance and shot type of every mapped club.
///
/// Configured distances are offered as defaults; the shot type defaults to
/// `Tee` for drivers and `Approach` otherwise.
pub fn collect_settings(
    inventory: &ClubInventory,
    config: &ShotConfig,
    operator: &mut dyn Operator,
) -> Result<RunSettings> {
    let clubs = mapped_clubs(inventory);
    let mut targets = config.target_distances.clone();
    let mut shot_types = ShotTypeTable::new();
    for &(club, shots) in &clubs {
        let default = config.target_distances.get_or_default(club);
        let target = operator
            .target_distance(club, shots, default, config.units.distance)
            .context("read target distance")?;
        targets.set(club, target);
    }
    for &(club, shots) in &clubs {
        let shot_type = operator
            .shot_type(club, shots, club.default_shot_type())
            .context("read shot type")?;
        shot_types.set(club, shot_type);
    }
    Ok(RunSettings {
        targets,
        shot_types,
        clubs,
    })
}

// ============================================================================
// Stage 4: Annotate
// ============================================================================

pub fn annotate(
    source: &MappedSource<'_>,
    config: &ShotConfig,
    settings: &RunSettings,
) -> Annotation {
    Annotator::new(&config.club_mappings, &settings.targets, &settings.shot_types).annotate(source)
}

// ============================================================================
// Stage 5: Curate
// ============================================================================

/// Flags that gate the review and export stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Every prompt takes its default; implies no review.
    pub accept_defaults: bool,
    pub skip_review: bool,
    pub dry_run: bool,
}

impl RunOptions {
    pub fn reviews(&self) -> bool {
        !(self.accept_defaults || self.skip_review)
    }
}

pub fn curate(table: ShotTable, operator: &mut dyn CurationOperator) -> Result<CurationResult> {
    run_curation(table, operator).context("shot review")
}

/// Runs the review unless `options` skip it. A skipped review keeps every
/// shot and reports [`CurationOutcome::Declined`].
pub fn review_shots(
    table: ShotTable,
    options: &RunOptions,
    operator: &mut dyn CurationOperator,
) -> Result<CurationResult> {
    if !options.reviews() {
        debug!(shots = table.len(), "review skipped");
        return Ok(CurationResult {
            table,
            outcome: CurationOutcome::Declined,
        });
    }
    curate(table, operator)
}

/// Statistics are shown again only when the review removed shots and some remain.
pub fn needs_final_stats(result: &CurationResult) -> bool {
    result.outcome.changed() && !result.table.is_empty()
}

// ============================================================================
// Stage 6: Export
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDecision {
    /// `--dry-run`; the operator is not asked.
    DryRun,
    Declined,
    Confirmed,
}

pub fn decide_export(
    shots: usize,
    options: &RunOptions,
    operator: &mut dyn Operator,
) -> Result<ExportDecision> {
    if options.dry_run {
        return Ok(ExportDecision::DryRun);
    }
    let confirmed = operator
        .confirm_export(shots)
        .context("read export confirmation")?;
    Ok(if confirmed {
        ExportDecision::Confirmed
    } else {
        ExportDecision::Declined
    })
}

/// Writes the export into `output_dir`, named after `source` and the local time.
pub fn export(table: &ShotTable, source: &Path, output_dir: &Path) -> Result<PathBuf> {
    export_table(table, source, output_dir, Local::now().naive_local()).context("export shots")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shot_transform::InventoryEntry;

    #[test]
    fn test_mapped_clubs_merges_labels_of_one_club() {
        let inventory = ClubInventory {
            entries: vec![
                InventoryEntry {
                    label: "Driver".to_string(),
                    shots: 4,
                    mapped: Some(ClubId::Dr),
                },
                InventoryEntry {
                    label: "Drv".to_string(),
                    shots: 2,
                    mapped: Some(ClubId::Dr),
                },
                InventoryEntry {
                    label: "Putter".to_string(),
                    shots: 9,
                    mapped: None,
                },
                InventoryEntry {
                    label: "Seven".to_string(),
                    shots: 5,
                    mapped: Some(ClubId::I7),
                },
            ],
        };

        assert_eq!(
            mapped_clubs(&inventory),
            vec![(ClubId::Dr, 6), (ClubId::I7, 5)]
        );
    }

    #[test]
    fn test_run_options_review_gate() {
        assert!(RunOptions::default().reviews());
        let yes = RunOptions {
            accept_defaults: true,
            ..Default::default()
        };
        assert!(!yes.reviews());
        let no_review = RunOptions {
            skip_review: true,
            ..Default::default()
        };
        assert!(!no_review.reviews());
        let dry_run = RunOptions {
            dry_run: true,
            ..Default::default()
        };
        assert!(dry_run.reviews());
    }

    #[test]
    fn test_require_mapped_rejects_unmapped_inventory() {
        let inventory = ClubInventory {
            entries: vec![InventoryEntry {
                label: "Putter".to_string(),
                shots: 3,
                mapped: None,
            }],
        };

        let err = require_mapped(&inventory, Path::new("range.csv")).unwrap_err();

        assert!(err.to_string().contains("range.csv"));
        assert!(require_mapped(&ClubInventory::default(), Path::new("empty.csv")).is_err());
    }
}
