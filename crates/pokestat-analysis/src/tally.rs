//! Win/participation counters shared by the aggregators.
//!
//! Every aggregator reduces battles to the same pair of counts per key: how
//! many battles the key took part in and how many of those it won. [`credit`]
//! is the single update rule; everything else folds tallies together.

use std::{collections::HashMap, hash::Hash, ops::AddAssign};

use pokestat_data::{BattleLog, EntityId};
use pokestat_stats::rate::win_rate_percent;

/// Participation and win counts of one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinRecord {
    pub total: u64,
    pub wins: u64,
}

impl WinRecord {
    /// Win rate in percent; `0.0` without participations.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        win_rate_percent(self.wins, self.total)
    }
}

impl AddAssign for WinRecord {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.wins += other.wins;
    }
}

/// Win records keyed by entity id, type label, or anything hashable.
pub type Tally<K> = HashMap<K, WinRecord>;

/// Records one participation of `key`, and one win if `did_win`.
///
/// ```
/// use pokestat_analysis::tally::{Tally, WinRecord, credit};
///
/// let mut tally = Tally::new();
/// credit(&mut tally, "Fire", true);
/// credit(&mut tally, "Fire", false);
/// assert_eq!(tally["Fire"], WinRecord { total: 2, wins: 1 });
/// ```
pub fn credit<K>(tally: &mut Tally<K>, key: K, did_win: bool)
where
    K: Eq + Hash,
{
    let record = tally.entry(key).or_default();
    record.total += 1;
    if did_win {
        record.wins += 1;
    }
}

/// Credits both combatants of every battle.
#[must_use]
pub fn entity_tally(battles: &BattleLog) -> Tally<EntityId> {
    let mut tally = Tally::new();
    for battle in battles {
        for (id, did_win) in battle.outcomes() {
            credit(&mut tally, id, did_win);
        }
    }
    tally
}
