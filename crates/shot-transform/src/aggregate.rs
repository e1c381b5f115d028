//! Per-club summary statistics.

use shot_model::{ClubStats, FieldStats, ShotTable};

/// Mean, minimum and maximum of `values`; `None` for an empty input.
pub fn field_stats(values: impl IntoIterator<Item = f64>) -> Option<FieldStats> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }
    if count == 0 {
        return None;
    }
    // Clamp so accumulated rounding error cannot push the mean outside [min, max].
    let mean = (sum / count as f64).clamp(min, max);
    Some(FieldStats {
        count,
        mean,
        min,
        max,
    })
}

/// One summary per club, in order of first appearance.
///
/// Missing `Total`/`Side` values are left out of the statistics; they still
/// count as shots.
pub fn club_stats(table: &ShotTable) -> Vec<ClubStats> {
    table
        .clubs_by_appearance()
        .into_iter()
        .filter_map(|club| {
            let group: Vec<_> = table
                .records()
                .iter()
                .filter(|record| record.club == club)
                .collect();
            let first = group.first()?;
            Some(ClubStats {
                club,
                shot_type: first.shot_type,
                target: first.target,
                shots: group.len(),
                total: field_stats(group.iter().filter_map(|r| r.total)),
                side: field_stats(group.iter().filter_map(|r| r.side)),
            })
        })
        .collect()
}
