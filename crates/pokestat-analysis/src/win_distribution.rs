//! Raw win counts per entity, for histogram display.

use std::collections::HashMap;

use pokestat_data::{BattleLog, EntityId};
use pokestat_stats::histogram::Histogram;
use serde::{Deserialize, Serialize};

/// How many battles one entity won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinCount {
    pub id: EntityId,
    pub wins: u64,
}

/// Counts the `winner` column.
///
/// Entities that never won are absent. Rows are sorted by count, highest first,
/// then by id.
#[must_use]
pub fn win_distribution(battles: &BattleLog) -> Vec<WinCount> {
    let mut counts = HashMap::<EntityId, u64>::new();
    for battle in battles {
        *counts.entry(battle.winner).or_default() += 1;
    }
    let mut rows = counts
        .into_iter()
        .map(|(id, wins)| WinCount { id, wins })
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.id.cmp(&b.id)));

    tracing::debug!(
        battles = battles.len(),
        winners = rows.len(),
        "counted wins"
    );
    rows
}

/// Bins win counts into `num_bins` equal-width buckets.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn win_count_histogram(counts: &[WinCount], num_bins: usize) -> Histogram {
    Histogram::equal_width(counts.iter().map(|count| count.wins as f64), num_bins)
}
