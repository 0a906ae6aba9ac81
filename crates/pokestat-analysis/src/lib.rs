//! Battle statistics and feature-importance analysis
//!
//! This crate turns the two input tables of [`pokestat_data`] into the tables a
//! dashboard renders. Every analysis is a pure function of its inputs.
//!
//! # Analyses
//!
//! ## Importance Ranking
//!
//! Which attribute differences explain battle outcomes:
//!
//! 1. **Build Features** ([`feature_builder::FeatureBuilder`]): Join battles with the
//!    catalog and derive signed attribute differences plus the `p1_won` label
//! 2. **Rank** ([`importance::ImportanceRanker`]): Standardize the columns, fit a
//!    seeded random forest and report impurity importances as percentages
//!
//! ## Aggregations
//!
//! Independent reductions of the battle log:
//!
//! - [`type_win_rate::type_win_rates`]: Participations, wins and win rate per type label
//! - [`entity_wins::entity_wins`]: Participations, wins and win rate per entity
//! - [`win_distribution::win_distribution`]: Raw win count per winning entity
//! - [`attribute_profile::attribute_profile`]: Mean attributes of legendary,
//!   non-legendary and all entities
//!
//! All aggregations share the counting rule in [`tally::credit`].
//!
//! ## Memoization
//!
//! [`cache::AnalysisCache`] memoizes every analysis per dataset
//! [`cache::DatasetFingerprint`], and [`report::AnalysisReport`] bundles one
//! snapshot's results for the presentation layer.
//!
//! # Example
//!
//! ```
//! use pokestat_analysis::{entity_wins::entity_wins, type_win_rate::type_win_rates};
//! use pokestat_data::{BattleLog, BattleRecord, Entity, EntityCatalog, EntityId, Legendary};
//!
//! let entity = |id, name: &str, types: &str| Entity {
//!     id: EntityId(id),
//!     name: name.into(),
//!     hp: 50.0,
//!     attack: 50.0,
//!     defense: 50.0,
//!     sp_attack: 50.0,
//!     sp_defense: 50.0,
//!     speed: 50.0,
//!     generation: 1,
//!     legendary: Legendary::Bool(false),
//!     types: types.into(),
//! };
//! let catalog = EntityCatalog::new(vec![
//!     entity(6, "Charizard", "Fire/Flying"),
//!     entity(7, "Squirtle", "Water"),
//! ])?;
//! let battles = BattleLog::from_iter([BattleRecord::new(EntityId(6), EntityId(7), EntityId(6))]);
//!
//! let types = type_win_rates(&catalog, &battles);
//! assert_eq!(types.len(), 3);
//! assert!(types.iter().filter(|row| row.wins == 1).count() == 2);
//!
//! let winners = entity_wins(&catalog, &battles);
//! assert_eq!(winners[0].name.as_deref(), Some("Charizard"));
//! # Ok::<(), pokestat_data::CatalogError>(())
//! ```

pub mod attribute_profile;
pub mod cache;
pub mod entity_wins;
pub mod feature_builder;
pub mod importance;
pub mod report;
pub mod tally;
pub mod type_win_rate;
pub mod win_distribution;

#[cfg(test)]
mod fixtures;
