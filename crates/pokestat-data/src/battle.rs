use serde::{Deserialize, Serialize};

use crate::EntityId;

/// One pairwise contest between two entities.
///
/// The slot order of `first_pokemon` and `second_pokemon` carries no meaning
/// beyond identifying which combatant a derived feature is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleRecord {
    pub first_pokemon: EntityId,
    pub second_pokemon: EntityId,
    pub winner: EntityId,
}

impl BattleRecord {
    #[must_use]
    pub fn new(first_pokemon: EntityId, second_pokemon: EntityId, winner: EntityId) -> Self {
        Self {
            first_pokemon,
            second_pokemon,
            winner,
        }
    }

    /// Whether the combatant in the first slot won.
    #[must_use]
    pub fn first_won(&self) -> bool {
        self.first_pokemon == self.winner
    }

    /// Both combatants paired with whether each of them won.
    #[must_use]
    pub fn outcomes(&self) -> [(EntityId, bool); 2] {
        let first_won = self.first_won();
        [
            (self.first_pokemon, first_won),
            (self.second_pokemon, !first_won),
        ]
    }

    /// Whether `winner` is one of the two combatants.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.winner == self.first_pokemon || self.winner == self.second_pokemon
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BattleLogError {
    #[display("battle #{index}: winner {winner} is neither {first_pokemon} nor {second_pokemon}")]
    WinnerNotCombatant {
        index: usize,
        first_pokemon: EntityId,
        second_pokemon: EntityId,
        winner: EntityId,
    },
}

/// The table of battle outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleLog {
    records: Vec<BattleRecord>,
}

impl BattleLog {
    #[must_use]
    pub fn new(records: Vec<BattleRecord>) -> Self {
        Self { records }
    }

    /// Checks that every record names one of its combatants as winner.
    ///
    /// Analyses assume this invariant; ingestion calls this before handing the
    /// log over.
    pub fn validate(&self) -> Result<(), BattleLogError> {
        match self
            .records
            .iter()
            .enumerate()
            .find(|(_, record)| !record.is_consistent())
        {
            Some((index, record)) => Err(BattleLogError::WinnerNotCombatant {
                index,
                first_pokemon: record.first_pokemon,
                second_pokemon: record.second_pokemon,
                winner: record.winner,
            }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[BattleRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleRecord> + '_ {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a BattleLog {
    type Item = &'a BattleRecord;
    type IntoIter = std::slice::Iter<'a, BattleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<BattleRecord> for BattleLog {
    fn from_iter<T: IntoIterator<Item = BattleRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
