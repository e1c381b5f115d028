//! Integration tests for the transform pipeline stages.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use shot_cli::pipeline::{
    ExportDecision, MapResult, RunOptions, annotate, collect_settings, curate, decide_export,
    export, ingest, map_source, mapped_clubs, needs_final_stats, require_mapped, review_shots,
};
use shot_cli::prompt::{AcceptDefaults, Operator};
use shot_ingest::{ReadOptions, parse_config};
use shot_model::{ClubId, RecordId, ShotConfig, ShotTable, ShotType, TargetDistance, Unit};
use shot_report::read_export;
use shot_transform::{ClubReview, CurationOperator, CurationOutcome, club_stats};

const CONFIG: &str = r#"{
    "units": { "distance": "meters", "deviation": "meters" },
    "column_mapping": { "Club": "ClubType", "Total": "Carry", "Side": "Lateral" },
    "club_mappings": { "Drv": "Dr", "7 Iron": "7i" },
    "target_distances": { "Dr": 250, "7i": 150 }
}"#;

const SOURCE: &str = "\
ClubType,Carry,Lateral
,[m],[m]
Drv,245.123,-4.567
3 Wood,220.4,1.1
Drv,251.987,3.004
7 Iron,148.2,n/a
7 Iron,151.0,-0.5
";

/// Answers from a script instead of a terminal.
#[derive(Default)]
struct ScriptedOperator {
    targets: BTreeMap<ClubId, u32>,
    review: bool,
    /// 1-based shot numbers to remove, per club.
    removals: BTreeMap<ClubId, Vec<usize>>,
    export: bool,
    reviewed: Vec<ClubId>,
    asked_targets: Vec<(ClubId, usize, TargetDistance)>,
    export_prompts: usize,
}

impl CurationOperator for ScriptedOperator {
    fn begin(&mut self, _clubs: &[ClubId], _shots: usize) -> io::Result<bool> {
        Ok(self.review)
    }

    fn review(&mut self, review: &ClubReview<'_>) -> io::Result<Vec<RecordId>> {
        self.reviewed.push(review.club);
        let numbers = self.removals.get(&review.club).cloned().unwrap_or_default();
        Ok(numbers
            .into_iter()
            .map(|number| review.shots[number - 1].0)
            .collect())
    }
}

impl Operator for ScriptedOperator {
    fn target_distance(
        &mut self,
        club: ClubId,
        shots: usize,
        default: TargetDistance,
        _unit: Unit,
    ) -> io::Result<TargetDistance> {
        self.asked_targets.push((club, shots, default));
        match self.targets.get(&club) {
            Some(value) => TargetDistance::new(*value).map_err(io::Error::other),
            None => Ok(default),
        }
    }

    fn shot_type(&mut self, _club: ClubId, _shots: usize, default: ShotType) -> io::Result<ShotType> {
        Ok(default)
    }

    fn confirm_export(&mut self, _shots: usize) -> io::Result<bool> {
        self.export_prompts += 1;
        Ok(self.export)
    }
}

fn write_source(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("range-session.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn config() -> ShotConfig {
    parse_config(Path::new("config.json"), CONFIG).unwrap()
}

/// Ingests, maps and annotates `SOURCE` with the operator's settings.
fn annotated(dir: &Path, operator: &mut dyn Operator) -> ShotTable {
    let source_path = write_source(dir, SOURCE);
    let config = config();
    let source = ingest(&source_path, &ReadOptions::default()).unwrap();
    let MapResult { source: mapped, inventory } = map_source(&source, &config).unwrap();
    let settings = collect_settings(&inventory, &config, operator).unwrap();
    annotate(&mapped, &config, &settings).table
}

#[test]
fn test_transform_with_review_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_source(dir.path(), SOURCE);
    let config = config();
    let mut operator = ScriptedOperator {
        review: true,
        removals: BTreeMap::from([(ClubId::Dr, vec![2])]),
        export: true,
        ..Default::default()
    };

    let source = ingest(&source_path, &ReadOptions::default()).unwrap();
    assert_eq!(source.len(), 5);
    let MapResult {
        source: mapped,
        inventory,
    } = map_source(&source, &config).unwrap();
    assert_eq!(inventory.mapped_count(), 2);
    assert_eq!(inventory.excluded_count(), 1);

    let settings = collect_settings(&inventory, &config, &mut operator).unwrap();
    assert_eq!(settings.shot_types.get(ClubId::Dr), ShotType::Tee);
    assert_eq!(settings.shot_types.get(ClubId::I7), ShotType::Approach);

    let annotation = annotate(&mapped, &config, &settings);
    assert_eq!(annotation.table.len(), 4);
    assert_eq!(annotation.dropped, 1);
    assert_eq!(annotation.warnings.len(), 1);

    let stats = club_stats(&annotation.table);
    assert_eq!(stats[0].club, ClubId::Dr);
    assert_eq!(stats[0].shots, 2);
    let total = stats[0].total.unwrap();
    assert!((total.mean - 248.555).abs() < 1e-9);
    assert_eq!(total.min, 245.12);
    assert_eq!(total.max, 251.99);

    let result = curate(annotation.table, &mut operator).unwrap();
    assert_eq!(operator.reviewed, vec![ClubId::I7, ClubId::Dr]);
    assert_eq!(result.outcome, CurationOutcome::Applied { removed: 1 });
    assert_eq!(result.table.len(), 3);

    let output_dir = dir.path().join("data").join("output");
    let path = export(&result.table, &source_path, &output_dir).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("range-session_transformed_"));
    assert!(name.ends_with(".csv"));

    let reread = read_export(&path).unwrap();
    assert_eq!(reread, result.table);
    let drivers: Vec<_> = reread
        .records()
        .iter()
        .filter(|r| r.club == ClubId::Dr)
        .collect();
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].total, Some(245.12));
    assert_eq!(drivers[0].side, Some(-4.57));
    assert_eq!(drivers[0].target.get(), 250);
}

#[test]
fn test_run_target_overrides_config_for_this_run_only() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_source(dir.path(), SOURCE);
    let config = config();
    let mut operator = ScriptedOperator {
        targets: BTreeMap::from([(ClubId::I7, 160)]),
        ..Default::default()
    };

    let source = ingest(&source_path, &ReadOptions::default()).unwrap();
    let MapResult { source: mapped, inventory } = map_source(&source, &config).unwrap();
    let settings = collect_settings(&inventory, &config, &mut operator).unwrap();
    let annotation = annotate(&mapped, &config, &settings);

    assert_eq!(
        operator.asked_targets,
        vec![
            (ClubId::I7, 2, TargetDistance::new(150).unwrap()),
            (ClubId::Dr, 2, TargetDistance::new(250).unwrap()),
        ]
    );
    let seven: Vec<u32> = annotation
        .table
        .records()
        .iter()
        .filter(|r| r.club == ClubId::I7)
        .map(|r| r.target.get())
        .collect();
    assert_eq!(seven, vec![160, 160]);
    assert_eq!(config.target_distances.get(ClubId::I7).unwrap().get(), 150);
}

#[test]
fn test_declined_review_keeps_every_shot() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_source(dir.path(), SOURCE);
    let config = config();
    let mut operator = ScriptedOperator::default();

    let source = ingest(&source_path, &ReadOptions::default()).unwrap();
    let MapResult { source: mapped, inventory } = map_source(&source, &config).unwrap();
    let settings = collect_settings(&inventory, &config, &mut operator).unwrap();
    let annotation = annotate(&mapped, &config, &settings);
    let result = curate(annotation.table, &mut operator).unwrap();

    assert_eq!(result.outcome, CurationOutcome::Declined);
    assert!(!result.outcome.changed());
    assert_eq!(result.table.len(), 4);
    assert!(operator.reviewed.is_empty());
}

#[test]
fn test_missing_column_fails_before_rows() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_source(dir.path(), "ClubType,Total Distance,Lateral\n,[m],[m]\nDrv,240,1\n");
    let config = config();

    let source = ingest(&source_path, &ReadOptions::default()).unwrap();
    let error = map_source(&source, &config).unwrap_err();

    let message = format!("{error:#}");
    assert!(message.contains("Carry"), "{message}");
    assert!(message.contains("range-session.csv"), "{message}");
}

#[test]
fn test_no_units_row_keeps_first_data_row() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_source(dir.path(), "ClubType,Carry,Lateral\nDrv,240,1\nDrv,250,2\n");
    let options = ReadOptions {
        skip_units_row: false,
    };

    let source = ingest(&source_path, &options).unwrap();
    let config = config();
    let MapResult { inventory, .. } = map_source(&source, &config).unwrap();

    assert_eq!(source.len(), 2);
    assert_eq!(mapped_clubs(&inventory), vec![(ClubId::Dr, 2)]);
}

#[test]
fn test_unmapped_session_stops_before_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_source(
        dir.path(),
        "ClubType,Carry,Lateral\n,[m],[m]\n3 Wood,220,1\n",
    );
    let config = config();

    let source = ingest(&source_path, &ReadOptions::default()).unwrap();
    let MapResult { inventory, .. } = map_source(&source, &config).unwrap();
    let error = require_mapped(&inventory, &source_path).unwrap_err();

    assert_eq!(inventory.excluded_count(), 1);
    assert!(error.to_string().contains("range-session.csv"), "{error}");
}

#[test]
fn test_no_review_keeps_shots_without_asking() {
    let dir = tempfile::tempdir().unwrap();
    let mut operator = ScriptedOperator {
        review: true,
        removals: BTreeMap::from([(ClubId::Dr, vec![1])]),
        ..Default::default()
    };
    let table = annotated(dir.path(), &mut operator);
    let options = RunOptions {
        skip_review: true,
        ..Default::default()
    };

    let result = review_shots(table, &options, &mut operator).unwrap();

    assert!(operator.reviewed.is_empty());
    assert_eq!(result.outcome, CurationOutcome::Declined);
    assert_eq!(result.table.len(), 4);
    assert!(!needs_final_stats(&result));
}

#[test]
fn test_accept_defaults_runs_without_review_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let mut operator = AcceptDefaults;
    let table = annotated(dir.path(), &mut operator);
    let options = RunOptions {
        accept_defaults: true,
        ..Default::default()
    };

    let targets: Vec<(ClubId, u32)> = table
        .records()
        .iter()
        .map(|r| (r.club, r.target.get()))
        .collect();
    assert_eq!(
        targets,
        vec![
            (ClubId::Dr, 250),
            (ClubId::Dr, 250),
            (ClubId::I7, 150),
            (ClubId::I7, 150),
        ]
    );
    let result = review_shots(table, &options, &mut operator).unwrap();
    assert_eq!(result.outcome, CurationOutcome::Declined);
    assert_eq!(
        decide_export(result.table.len(), &options, &mut operator).unwrap(),
        ExportDecision::Confirmed
    );
}

#[test]
fn test_dry_run_skips_export_confirmation() {
    let mut operator = ScriptedOperator {
        export: true,
        ..Default::default()
    };
    let dry_run = RunOptions {
        dry_run: true,
        ..Default::default()
    };

    assert_eq!(
        decide_export(4, &dry_run, &mut operator).unwrap(),
        ExportDecision::DryRun
    );
    assert_eq!(operator.export_prompts, 0);

    operator.export = false;
    assert_eq!(
        decide_export(4, &RunOptions::default(), &mut operator).unwrap(),
        ExportDecision::Declined
    );
    assert_eq!(operator.export_prompts, 1);
}

#[test]
fn test_final_stats_follow_removals() {
    let dir = tempfile::tempdir().unwrap();
    let options = RunOptions::default();

    let mut keep_all = ScriptedOperator {
        review: true,
        ..Default::default()
    };
    let table = annotated(dir.path(), &mut keep_all);
    let result = review_shots(table, &options, &mut keep_all).unwrap();
    assert_eq!(result.outcome, CurationOutcome::Unchanged);
    assert!(!needs_final_stats(&result));

    let mut remove_one = ScriptedOperator {
        review: true,
        removals: BTreeMap::from([(ClubId::I7, vec![2])]),
        ..Default::default()
    };
    let table = annotated(dir.path(), &mut remove_one);
    let result = review_shots(table, &options, &mut remove_one).unwrap();
    assert_eq!(result.outcome.removed(), 1);
    assert!(needs_final_stats(&result));

    let mut remove_all = ScriptedOperator {
        review: true,
        removals: BTreeMap::from([(ClubId::Dr, vec![1, 2]), (ClubId::I7, vec![1, 2])]),
        ..Default::default()
    };
    let table = annotated(dir.path(), &mut remove_all);
    let result = review_shots(table, &options, &mut remove_all).unwrap();
    assert_eq!(result.outcome, CurationOutcome::Applied { removed: 4 });
    assert!(result.table.is_empty());
    assert!(!needs_final_stats(&result));
}
