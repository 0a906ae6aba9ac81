//! Small hand-made datasets for unit tests.

use pokestat_data::{BattleLog, BattleRecord, Entity, EntityCatalog, EntityId, Legendary};

pub(crate) fn battle(first: i64, second: i64, winner: i64) -> BattleRecord {
    BattleRecord::new(EntityId(first), EntityId(second), EntityId(winner))
}

pub(crate) fn log(battles: &[(i64, i64, i64)]) -> BattleLog {
    battles
        .iter()
        .map(|&(first, second, winner)| battle(first, second, winner))
        .collect()
}

/// An entity whose six attributes all equal `stat`.
pub(crate) fn entity(id: i64, name: &str, types: &str, legendary: bool, stat: f64) -> Entity {
    Entity {
        id: EntityId(id),
        name: name.into(),
        hp: stat,
        attack: stat,
        defense: stat,
        sp_attack: stat,
        sp_defense: stat,
        speed: stat,
        generation: 1,
        legendary: Legendary::Bool(legendary),
        types: types.into(),
    }
}

pub(crate) fn pikachu_mewtwo() -> EntityCatalog {
    EntityCatalog::new(vec![
        Entity {
            id: EntityId(1),
            name: "Pikachu".into(),
            hp: 35.0,
            attack: 55.0,
            defense: 40.0,
            sp_attack: 50.0,
            sp_defense: 50.0,
            speed: 90.0,
            generation: 1,
            legendary: Legendary::Text("false".into()),
            types: "Electric".into(),
        },
        Entity {
            id: EntityId(2),
            name: "Mewtwo".into(),
            hp: 106.0,
            attack: 110.0,
            defense: 90.0,
            sp_attack: 154.0,
            sp_defense: 90.0,
            speed: 130.0,
            generation: 1,
            legendary: Legendary::Bool(true),
            types: "Psychic".into(),
        },
    ])
    .unwrap()
}

/// Five entities with mixed single and dual types.
pub(crate) fn starters() -> EntityCatalog {
    EntityCatalog::new(vec![
        entity(1, "Bulbasaur", "Grass/Poison", false, 45.0),
        entity(4, "Charmander", "Fire", false, 50.0),
        entity(6, "Charizard", "Fire/Flying", false, 80.0),
        entity(7, "Squirtle", "Water", false, 48.0),
        entity(146, "Moltres", "Fire/Flying", true, 95.0),
    ])
    .unwrap()
}
