//! Per-battle attribute-difference features.
//!
//! [`FeatureBuilder`] joins the battle log against the entity catalog once per
//! combatant slot and turns every battle into a [`FeatureRow`]: the six signed
//! differences `attribute(first) - attribute(second)` plus the `p1_won` label.
//!
//! Both sides' legendary flags are normalized and carried on the row, but they
//! are not model features; [`FeatureTable::feature_cols`] lists only the six
//! `diff_*` columns.
//!
//! Battles referring to an id missing from the catalog are dropped, the same
//! way an inner join drops unmatched rows.

use pokestat_data::{Attribute, BattleLog, Entity, EntityCatalog, EntityId};
use serde::{Deserialize, Serialize};

/// A model input column: the signed difference of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureColumn(pub Attribute);

impl FeatureColumn {
    /// All six difference columns in attribute order.
    pub const ALL: [FeatureColumn; 6] = [
        FeatureColumn(Attribute::Hp),
        FeatureColumn(Attribute::Attack),
        FeatureColumn(Attribute::Defense),
        FeatureColumn(Attribute::SpAttack),
        FeatureColumn(Attribute::SpDefense),
        FeatureColumn(Attribute::Speed),
    ];

    /// Column name, e.g. `diff_sp_attack`.
    #[must_use]
    pub fn name(self) -> String {
        format!("diff_{}", self.0.column_name())
    }
}

/// One battle as seen by the importance ranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub first_pokemon: EntityId,
    pub second_pokemon: EntityId,
    pub diff_hp: f64,
    pub diff_attack: f64,
    pub diff_defense: f64,
    pub diff_sp_attack: f64,
    pub diff_sp_defense: f64,
    pub diff_speed: f64,
    pub first_legendary: u8,
    pub second_legendary: u8,
    pub p1_won: u8,
}

impl FeatureRow {
    fn new(first: &Entity, second: &Entity, p1_won: bool) -> Self {
        let diff = |attribute| first.attribute(attribute) - second.attribute(attribute);
        Self {
            first_pokemon: first.id,
            second_pokemon: second.id,
            diff_hp: diff(Attribute::Hp),
            diff_attack: diff(Attribute::Attack),
            diff_defense: diff(Attribute::Defense),
            diff_sp_attack: diff(Attribute::SpAttack),
            diff_sp_defense: diff(Attribute::SpDefense),
            diff_speed: diff(Attribute::Speed),
            first_legendary: u8::from(first.is_legendary()),
            second_legendary: u8::from(second.is_legendary()),
            p1_won: u8::from(p1_won),
        }
    }

    #[must_use]
    pub fn value(&self, column: FeatureColumn) -> f64 {
        match column.0 {
            Attribute::Hp => self.diff_hp,
            Attribute::Attack => self.diff_attack,
            Attribute::Defense => self.diff_defense,
            Attribute::SpAttack => self.diff_sp_attack,
            Attribute::SpDefense => self.diff_sp_defense,
            Attribute::Speed => self.diff_speed,
        }
    }

    #[must_use]
    pub fn first_won(&self) -> bool {
        self.p1_won == 1
    }
}

/// Derived feature rows together with the list of model feature columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
    pub feature_cols: Vec<FeatureColumn>,
}

impl FeatureTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of `column`, one per row.
    #[must_use]
    pub fn column(&self, column: FeatureColumn) -> Vec<f64> {
        self.rows.iter().map(|row| row.value(column)).collect()
    }

    /// The `p1_won` label of every row.
    #[must_use]
    pub fn labels(&self) -> Vec<bool> {
        self.rows.iter().map(FeatureRow::first_won).collect()
    }
}

/// Builds [`FeatureTable`]s from a catalog.
#[derive(Debug, Clone, Copy)]
pub struct FeatureBuilder<'a> {
    catalog: &'a EntityCatalog,
}

impl<'a> FeatureBuilder<'a> {
    #[must_use]
    pub fn new(catalog: &'a EntityCatalog) -> Self {
        Self { catalog }
    }

    /// Derives one row per battle whose combatants are both in the catalog.
    #[must_use]
    pub fn build(&self, battles: &BattleLog) -> FeatureTable {
        let rows = battles
            .iter()
            .filter_map(|battle| {
                let first = self.catalog.get(battle.first_pokemon)?;
                let second = self.catalog.get(battle.second_pokemon)?;
                Some(FeatureRow::new(first, second, battle.first_won()))
            })
            .collect::<Vec<_>>();

        let dropped = battles.len() - rows.len();
        if dropped > 0 {
            tracing::warn!(
                dropped,
                "battles refer to entities missing from the catalog"
            );
        }
        tracing::debug!(rows = rows.len(), "built battle features");

        FeatureTable {
            rows,
            feature_cols: FeatureColumn::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{battle, pikachu_mewtwo};

    #[test]
    fn test_pikachu_loses_to_mewtwo() {
        let catalog = pikachu_mewtwo();
        let battles = BattleLog::from_iter([battle(1, 2, 2)]);
        let table = FeatureBuilder::new(&catalog).build(&battles);

        assert_eq!(table.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.diff_hp, -71.0);
        assert_eq!(row.diff_sp_attack, -104.0);
        assert_eq!(row.diff_speed, -40.0);
        assert_eq!(row.p1_won, 0);
        assert_eq!(row.first_legendary, 0);
        assert_eq!(row.second_legendary, 1);
    }

    #[test]
    fn test_legendary_is_not_a_feature_column() {
        let catalog = pikachu_mewtwo();
        let table = FeatureBuilder::new(&catalog).build(&BattleLog::default());
        let names = table
            .feature_cols
            .iter()
            .map(|column| column.name())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "diff_hp",
                "diff_attack",
                "diff_defense",
                "diff_sp_attack",
                "diff_sp_defense",
                "diff_speed"
            ]
        );
    }

    #[test]
    fn test_empty_log_gives_empty_table_with_schema() {
        let catalog = pikachu_mewtwo();
        let table = FeatureBuilder::new(&catalog).build(&BattleLog::default());
        assert!(table.is_empty());
        assert_eq!(table.feature_cols.len(), 6);
        assert!(table.labels().is_empty());
    }

    #[test]
    fn test_unknown_entities_are_dropped() {
        let catalog = pikachu_mewtwo();
        let battles = BattleLog::from_iter([battle(2, 1, 2), battle(1, 99, 99)]);
        let table = FeatureBuilder::new(&catalog).build(&battles);
        assert_eq!(table.len(), 1);
        assert_eq!(table.labels(), vec![true]);
        assert_eq!(table.column(FeatureColumn(Attribute::Hp)), vec![71.0]);
    }
}
