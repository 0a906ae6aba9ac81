//! Battle dataset model for pokestat
//!
//! This crate defines the two input tables every analysis consumes and the
//! normalization rules attached to their columns.
//!
//! # Tables
//!
//! - [`EntityCatalog`]: one [`Entity`] per Pokémon, indexed by [`EntityId`]
//! - [`BattleLog`]: one [`BattleRecord`] per pairwise contest
//!
//! # Normalization
//!
//! Source data is loose about two columns, so the crate pins down how they are read:
//!
//! - `legendary` may be a JSON boolean or one of the strings `true`/`false` in any
//!   letter case. [`normalize_legendary`] maps everything else to `false`.
//! - `types` holds one or two labels separated by `/`. [`TypeLabels::parse`] splits,
//!   trims and de-duplicates them.
//!
//! # Loading
//!
//! The [`load`] module reads both tables from JSON files. Failures are reported as
//! [`load::LoadError`], whose `MissingSource` variant lets callers distinguish an
//! absent file from a malformed one.
//!
//! ```no_run
//! use pokestat_data::load;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = load::load_dataset("data/pokemon.json", "data/combats.json")?;
//! println!(
//!     "{} entities, {} battles",
//!     dataset.catalog.len(),
//!     dataset.battles.len()
//! );
//! # Ok(())
//! # }
//! ```

pub use self::{battle::*, catalog::*, entity::*};

pub mod battle;
pub mod catalog;
pub mod entity;
pub mod load;
