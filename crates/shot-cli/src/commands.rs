use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use shot_cli::pipeline::{
    ExportDecision, MapResult, RunOptions, annotate, collect_settings, decide_export, export,
    ingest, map_source, needs_final_stats, require_mapped, review_shots,
};
use shot_cli::prompt::{AcceptDefaults, LinePrompt, Operator};
use shot_ingest::{DEFAULT_CONFIG_FILE, ReadOptions, load_config};
use shot_model::{ShotConfig, Units};
use shot_report::{DEFAULT_OUTPUT_DIR, read_export};
use shot_transform::club_stats;

use crate::cli::{ConfigArgs, StatsArgs, TransformArgs};
use crate::summary::{
    print_club_stats, print_clubs, print_config, print_inventory, print_preview,
    print_run_settings, print_warnings,
};
use crate::types::TransformSummary;

pub fn run_clubs() -> Result<()> {
    print_clubs();
    Ok(())
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let path = config_path(args.config.as_deref());
    let config = read_config(&path)?;
    print_config(&config, &path);
    Ok(())
}

pub fn run_stats(args: &StatsArgs) -> Result<()> {
    let units = match &args.config {
        Some(path) => read_config(path)?.units,
        None => Units::default(),
    };
    let table = read_export(&args.file)
        .with_context(|| format!("read export {}", args.file.display()))?;
    if table.is_empty() {
        println!("{} contains no shots", args.file.display());
        return Ok(());
    }
    print_club_stats(
        &format!("Statistics for {}", args.file.display()),
        &club_stats(&table),
        &units,
    );
    Ok(())
}

pub fn run_transform(args: &TransformArgs) -> Result<TransformSummary> {
    let config = read_config(&config_path(args.config.as_deref()))?;
    let options = RunOptions {
        accept_defaults: args.yes,
        skip_review: args.no_review,
        dry_run: args.dry_run,
    };
    let transform_span = info_span!("transform", file = %args.file.display());
    let _transform_guard = transform_span.enter();

    // =========================================================================
    // Stage 1-2: Ingest and map
    // =========================================================================
    let ingest_span = info_span!("ingest", file = %args.file.display());
    let ingest_start = Instant::now();
    let read_options = ReadOptions {
        skip_units_row: !args.no_units_row,
    };
    let source = ingest_span.in_scope(|| ingest(&args.file, &read_options))?;
    let MapResult {
        source: mapped,
        inventory,
    } = ingest_span.in_scope(|| map_source(&source, &config))?;
    info!(
        rows = source.len(),
        labels = inventory.entries.len(),
        mapped_labels = inventory.mapped_count(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );
    print_inventory(&inventory, &args.file, source.len());
    require_mapped(&inventory, &args.file)?;

    // =========================================================================
    // Stage 3: Per-club settings for this run
    // =========================================================================
    let mut defaults = AcceptDefaults;
    let mut terminal;
    let operator: &mut dyn Operator = if args.yes {
        &mut defaults
    } else {
        terminal = LinePrompt::stdio();
        &mut terminal
    };
    let settings = collect_settings(&inventory, &config, &mut *operator)?;
    print_run_settings(&settings, config.units.distance);

    // =========================================================================
    // Stage 4: Annotate
    // =========================================================================
    let annotate_span = info_span!("annotate");
    let annotate_start = Instant::now();
    let annotation = annotate_span.in_scope(|| annotate(&mapped, &config, &settings));
    info!(
        shots = annotation.table.len(),
        dropped = annotation.dropped,
        coercion_warnings = annotation.warnings.len(),
        duration_ms = annotate_start.elapsed().as_millis(),
        "annotate complete"
    );
    print_warnings(&annotation.warnings);
    print_preview(&annotation.table);
    print_club_stats(
        "Statistics by club",
        &club_stats(&annotation.table),
        &config.units,
    );

    // =========================================================================
    // Stage 5: Curate
    // =========================================================================
    let curate_span = info_span!("curate");
    let curate_start = Instant::now();
    let result =
        curate_span.in_scope(|| review_shots(annotation.table, &options, &mut *operator))?;
    info!(
        outcome = ?result.outcome,
        shots = result.table.len(),
        duration_ms = curate_start.elapsed().as_millis(),
        "curate complete"
    );
    if needs_final_stats(&result) {
        print_club_stats(
            "Final statistics by club",
            &club_stats(&result.table),
            &config.units,
        );
    }
    let table = result.table;

    let mut summary = TransformSummary {
        source: args.file.clone(),
        shots: table.len(),
        removed: result.outcome.removed(),
        export: None,
        dry_run: args.dry_run,
    };
    match decide_export(table.len(), &options, &mut *operator)? {
        ExportDecision::Confirmed => {}
        ExportDecision::DryRun => {
            info!("dry run, export skipped");
            return Ok(summary);
        }
        ExportDecision::Declined => return Ok(summary),
    }

    // =========================================================================
    // Stage 6: Export
    // =========================================================================
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let export_span = info_span!("export", output_dir = %output_dir.display());
    let export_start = Instant::now();
    let path = export_span.in_scope(|| export(&table, &args.file, &output_dir))?;
    info!(
        path = %path.display(),
        shots = table.len(),
        duration_ms = export_start.elapsed().as_millis(),
        "export complete"
    );
    summary.export = Some(path);
    Ok(summary)
}

fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf)
}

fn read_config(path: &Path) -> Result<ShotConfig> {
    load_config(path).context("load configuration")
}
