use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use shot_cli::pipeline::RunSettings;
use shot_model::{
    ClubCategory, ClubId, ClubStats, CoercionWarning, FieldStats, ShotConfig, ShotTable, Unit,
    Units,
};
use shot_report::format_value;
use shot_transform::ClubInventory;

use crate::types::TransformSummary;

/// Rows shown in the preview table.
const PREVIEW_ROWS: usize = 10;

pub fn print_inventory(inventory: &ClubInventory, source: &Path, rows: usize) {
    println!("Loaded {rows} shots from {}", source.display());
    println!("{}", inventory_table(inventory));
    println!(
        "Clubs: {} total, {} mapped, {} excluded",
        inventory.entries.len(),
        inventory.mapped_count(),
        inventory.excluded_count()
    );
}

fn inventory_table(inventory: &ClubInventory) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Club Name"),
        header_cell("Shots"),
        header_cell("Maps To"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for entry in &inventory.entries {
        let (target, status) = match entry.mapped {
            Some(club) => (
                Cell::new(club).fg(Color::Blue).add_attribute(Attribute::Bold),
                Cell::new("✓ Mapped").fg(Color::Green),
            ),
            None => (dim_cell("-"), dim_cell("- Excluded")),
        };
        table.add_row(vec![
            Cell::new(&entry.label),
            Cell::new(entry.shots),
            target,
            status,
        ]);
    }
    table
}

pub fn print_run_settings(settings: &RunSettings, unit: Unit) {
    println!("{}", settings_table(settings, unit));
}

fn settings_table(settings: &RunSettings, unit: Unit) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Club"),
        header_cell("Shots"),
        header_cell("Type"),
        header_cell("Target"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for &(club, shots) in &settings.clubs {
        table.add_row(vec![
            club_cell(club),
            Cell::new(shots),
            Cell::new(settings.shot_types.get(club)),
            Cell::new(format!(
                "{} {}",
                settings.targets.get_or_default(club),
                unit.symbol()
            )),
        ]);
    }
    table
}

pub fn print_warnings(warnings: &[CoercionWarning]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!("Values treated as missing ({}):", warnings.len());
    for warning in warnings {
        eprintln!("- {warning}");
    }
}

pub fn print_preview(table: &ShotTable) {
    println!("Data preview (first {PREVIEW_ROWS} of {} rows):", table.len());
    println!("{}", preview_table(table));
}

fn preview_table(shots: &ShotTable) -> Table {
    let mut table = Table::new();
    table.set_header(
        shot_model::AnnotatedRecord::COLUMNS
            .iter()
            .copied()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for index in 2..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for record in shots.records().iter().take(PREVIEW_ROWS) {
        table.add_row(vec![
            club_cell(record.club),
            Cell::new(record.shot_type),
            Cell::new(record.target),
            value_cell(record.total),
            value_cell(record.side),
        ]);
    }
    table
}

pub fn print_club_stats(title: &str, stats: &[ClubStats], units: &Units) {
    println!();
    println!("{title}:");
    println!("{}", club_stats_table(stats, units));
}

fn club_stats_table(stats: &[ClubStats], units: &Units) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Club"),
        header_cell("Type"),
        header_cell("Target"),
        header_cell("Shots"),
        header_cell("Avg Total"),
        header_cell("Min Total"),
        header_cell("Max Total"),
        header_cell("Avg Side"),
        header_cell("Min Side"),
        header_cell("Max Side"),
    ]);
    apply_stats_table_style(&mut table);
    for index in 2..10 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let distance = units.distance.symbol();
    let deviation = units.deviation.symbol();
    for summary in stats {
        let mut row = vec![
            club_cell(summary.club),
            Cell::new(summary.shot_type).fg(Color::Yellow),
            Cell::new(format!("{} {distance}", summary.target)).fg(Color::Green),
            Cell::new(summary.shots),
        ];
        row.extend(field_cells(summary.total.as_ref(), distance));
        row.extend(field_cells(summary.side.as_ref(), deviation));
        table.add_row(row);
    }
    let shots: usize = stats.iter().map(|s| s.shots).sum();
    let mut total_row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(shots).add_attribute(Attribute::Bold),
    ];
    total_row.extend((0..6).map(|_| dim_cell("-")));
    table.add_row(total_row);
    table
}

fn field_cells(stats: Option<&FieldStats>, unit: &str) -> [Cell; 3] {
    match stats {
        Some(stats) => [
            Cell::new(format!("{:.1} {unit}", stats.mean)).fg(Color::Magenta),
            dim_cell(format!("{:.1} {unit}", stats.min)),
            dim_cell(format!("{:.1} {unit}", stats.max)),
        ],
        None => [dim_cell("-"), dim_cell("-"), dim_cell("-")],
    }
}

pub fn print_clubs() {
    println!("{}", clubs_table());
}

fn clubs_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Club"),
        header_cell("Category"),
        header_cell("Default Type"),
    ]);
    apply_table_style(&mut table);
    for club in ClubId::ALL {
        table.add_row(vec![
            club_cell(club),
            category_cell(club.category()),
            Cell::new(club.default_shot_type()),
        ]);
    }
    table
}

pub fn print_config(config: &ShotConfig, path: &Path) {
    println!("Configuration: {}", path.display());
    println!(
        "Units: distance in {}, deviation in {}",
        config.units.distance, config.units.deviation
    );
    println!("{}", column_mapping_table(config));
    println!("{}", club_mapping_table(config));
}

fn column_mapping_table(config: &ShotConfig) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("→"),
        header_cell("Source Column"),
    ]);
    apply_table_style(&mut table);
    for role in shot_model::FieldRole::ALL {
        table.add_row(vec![
            Cell::new(role).fg(Color::Yellow),
            dim_cell("→"),
            Cell::new(config.column_mapping.column(role)).fg(Color::Cyan),
        ]);
    }
    table
}

fn club_mapping_table(config: &ShotConfig) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source Label"),
        header_cell("→"),
        header_cell("Club"),
        header_cell("Target"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    let unit = config.units.distance.symbol();
    for (label, club) in config.club_mappings.iter() {
        let target = match config.target_distances.get(club) {
            Some(target) => Cell::new(format!("{target} {unit}")),
            None => dim_cell(format!("{} {unit} (default)", config.target_distances.get_or_default(club))),
        };
        table.add_row(vec![
            Cell::new(label).fg(Color::Yellow),
            dim_cell("→"),
            club_cell(club),
            target,
        ]);
    }
    table
}

pub fn print_transform_summary(summary: &TransformSummary) {
    println!();
    println!("Source: {}", summary.source.display());
    println!("Shots exported: {}", summary.shots);
    if summary.removed > 0 {
        println!("Shots removed during review: {}", summary.removed);
    }
    match &summary.export {
        Some(path) => println!("Output: {}", path.display()),
        None if summary.dry_run => println!("Dry run: no file written"),
        None => println!("Export cancelled"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_stats_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn club_cell(club: ClubId) -> Cell {
    Cell::new(club).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn category_cell(category: ClubCategory) -> Cell {
    let color = match category {
        ClubCategory::Driver => Color::Red,
        ClubCategory::Wood => Color::Yellow,
        ClubCategory::Hybrid => Color::Magenta,
        ClubCategory::Iron => Color::Cyan,
        ClubCategory::Wedge => Color::Green,
        ClubCategory::Putter => Color::DarkGrey,
    };
    Cell::new(category.as_str()).fg(color)
}

fn value_cell(value: Option<f64>) -> Cell {
    match value {
        Some(_) => Cell::new(format_value(value)),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
