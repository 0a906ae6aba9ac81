//! Battle totals per entity.

use pokestat_data::{BattleLog, EntityCatalog, EntityId};
use serde::{Deserialize, Serialize};

use crate::tally::entity_tally;

/// Battle totals of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityWins {
    pub id: EntityId,
    /// Display name, `None` if the id is missing from the catalog.
    pub name: Option<String>,
    pub total: u64,
    pub wins: u64,
    pub win_rate: f64,
}

/// Counts battles and wins for every entity that fought at least once.
///
/// Rows are sorted by absolute wins, most first, so that entities winning many
/// battles rank above small-sample entities with a high rate. Equal win counts
/// are ordered by id.
#[must_use]
pub fn entity_wins(catalog: &EntityCatalog, battles: &BattleLog) -> Vec<EntityWins> {
    let mut rows = entity_tally(battles)
        .into_iter()
        .map(|(id, record)| EntityWins {
            id,
            name: catalog.get(id).map(|entity| entity.name.clone()),
            total: record.total,
            wins: record.wins,
            win_rate: record.win_rate(),
        })
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.id.cmp(&b.id)));

    tracing::debug!(
        battles = battles.len(),
        entities = rows.len(),
        "aggregated entity wins"
    );
    rows
}
