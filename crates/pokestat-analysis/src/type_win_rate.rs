//! Win rates per type label.
//!
//! Every combatant credits one participation to each of its type labels and the
//! winner additionally one win per label. A dual-type entity therefore counts
//! fully for both of its labels.
//!
//! The aggregation never looks up labels per battle. Battles are first reduced
//! to a per-entity tally, and each entity's record is then added to its labels
//! through an id-to-labels table built once from the catalog. The result is the
//! same as crediting labels battle by battle.

use std::collections::HashMap;

use pokestat_data::{BattleLog, EntityCatalog, EntityId, TypeLabels};
use serde::{Deserialize, Serialize};

use crate::tally::{Tally, entity_tally};

/// Battle totals of one type label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeWinRate {
    pub type_label: String,
    pub total: u64,
    pub wins: u64,
    /// `wins / total * 100`, or `0.0` without battles.
    pub win_rate: f64,
}

/// Aggregates battle outcomes per type label.
///
/// Rows are sorted by win rate, highest first; equal rates are ordered by
/// label. Combatants missing from the catalog contribute to no label.
#[must_use]
pub fn type_win_rates(catalog: &EntityCatalog, battles: &BattleLog) -> Vec<TypeWinRate> {
    let labels_by_id = catalog
        .iter()
        .map(|entity| (entity.id, entity.type_labels()))
        .collect::<HashMap<EntityId, TypeLabels>>();

    let mut tally = Tally::<&str>::new();
    for (id, record) in entity_tally(battles) {
        let Some(labels) = labels_by_id.get(&id) else {
            continue;
        };
        for label in labels.iter() {
            *tally.entry(label).or_default() += record;
        }
    }

    let mut rows = tally
        .into_iter()
        .map(|(label, record)| TypeWinRate {
            type_label: label.to_owned(),
            total: record.total,
            wins: record.wins,
            win_rate: record.win_rate(),
        })
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then_with(|| a.type_label.cmp(&b.type_label))
    });

    tracing::debug!(
        battles = battles.len(),
        types = rows.len(),
        "aggregated type win rates"
    );
    rows
}
