//! Memoization of analysis results keyed by dataset content.
//!
//! Every analysis in this crate is a pure function of the two input tables, so
//! a result computed once can be handed out again for as long as the tables are
//! unchanged. [`DatasetFingerprint`] identifies the tables by a SHA-256 digest
//! of their canonical encoding and [`AnalysisCache`] keeps one memo per
//! analysis under that key.
//!
//! The cache only saves time: every method returns exactly what calling the
//! underlying function directly would return.
//!
//! ```
//! use pokestat_analysis::cache::{AnalysisCache, Snapshot};
//! use pokestat_data::load::Dataset;
//!
//! let snapshot = Snapshot::new(Dataset::default());
//! let mut cache = AnalysisCache::new();
//! assert!(cache.type_win_rates(&snapshot).is_empty());
//! assert!(cache.type_win_rates(&snapshot).is_empty());
//! assert_eq!(cache.stats().hits, 1);
//! ```

use std::{collections::HashMap, fmt, hash::Hash, rc::Rc};

use pokestat_data::{BattleLog, EntityCatalog, Legendary, load::Dataset};
use pokestat_forest::{ForestError, ForestParams};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::{
    attribute_profile::{AttributeMean, attribute_profile},
    entity_wins::{EntityWins, entity_wins},
    feature_builder::{FeatureBuilder, FeatureTable},
    importance::{ImportanceRanker, RankedFeature},
    type_win_rate::{TypeWinRate, type_win_rates},
    win_distribution::{WinCount, win_distribution},
};

/// SHA-256 digest identifying the content of both input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetFingerprint([u8; 32]);

impl DatasetFingerprint {
    /// Hashes a length-prefixed, field-by-field encoding of both tables.
    ///
    /// Row order matters; two datasets with the same rows in a different order
    /// get different fingerprints.
    #[must_use]
    pub fn compute(catalog: &EntityCatalog, battles: &BattleLog) -> Self {
        let mut encoder = CanonicalEncoder::default();
        encoder.usize(catalog.len());
        for entity in catalog {
            encoder.i64(entity.id.0);
            encoder.str(&entity.name);
            for value in [
                entity.hp,
                entity.attack,
                entity.defense,
                entity.sp_attack,
                entity.sp_defense,
                entity.speed,
            ] {
                encoder.f64(value);
            }
            encoder.i64(entity.generation);
            match &entity.legendary {
                Legendary::Bool(value) => {
                    encoder.tag(0);
                    encoder.tag(u8::from(*value));
                }
                Legendary::Text(text) => {
                    encoder.tag(1);
                    encoder.str(text);
                }
                Legendary::Other(value) => {
                    encoder.tag(2);
                    encoder.str(&value.to_string());
                }
            }
            encoder.str(&entity.types);
        }
        encoder.usize(battles.len());
        for battle in battles {
            encoder.i64(battle.first_pokemon.0);
            encoder.i64(battle.second_pokemon.0);
            encoder.i64(battle.winner.0);
        }
        Self(encoder.finish())
    }
}

impl fmt::Display for DatasetFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for DatasetFingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Default)]
struct CanonicalEncoder {
    hasher: Sha256,
}

impl CanonicalEncoder {
    fn tag(&mut self, tag: u8) {
        self.hasher.update([tag]);
    }

    fn usize(&mut self, value: usize) {
        self.hasher.update((value as u64).to_le_bytes());
    }

    fn i64(&mut self, value: i64) {
        self.hasher.update(value.to_le_bytes());
    }

    fn f64(&mut self, value: f64) {
        self.hasher.update(value.to_bits().to_le_bytes());
    }

    fn str(&mut self, value: &str) {
        self.usize(value.len());
        self.hasher.update(value.as_bytes());
    }

    fn finish(self) -> [u8; 32] {
        let digest = self.hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        bytes
    }
}

/// A loaded dataset together with its fingerprint.
#[derive(Debug, Clone)]
pub struct Snapshot {
    dataset: Dataset,
    fingerprint: DatasetFingerprint,
}

impl Snapshot {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        let fingerprint = DatasetFingerprint::compute(&dataset.catalog, &dataset.battles);
        tracing::debug!(%fingerprint, "fingerprinted dataset");
        Self {
            dataset,
            fingerprint,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &EntityCatalog {
        &self.dataset.catalog
    }

    #[must_use]
    pub fn battles(&self) -> &BattleLog {
        &self.dataset.battles
    }

    #[must_use]
    pub fn fingerprint(&self) -> DatasetFingerprint {
        self.fingerprint
    }
}

/// Lookup counters of an [`AnalysisCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// One memo per analysis, keyed by [`DatasetFingerprint`].
///
/// Entries live until [`AnalysisCache::retain_only`] or [`AnalysisCache::clear`]
/// drops them.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    features: HashMap<DatasetFingerprint, Rc<FeatureTable>>,
    rankings: HashMap<(DatasetFingerprint, ForestParams), Vec<RankedFeature>>,
    type_win_rates: HashMap<DatasetFingerprint, Vec<TypeWinRate>>,
    entity_wins: HashMap<DatasetFingerprint, Vec<EntityWins>>,
    win_distribution: HashMap<DatasetFingerprint, Vec<WinCount>>,
    attribute_profile: HashMap<DatasetFingerprint, Vec<AttributeMean>>,
    stats: CacheStats,
}

impl AnalysisCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops every memoized result.
    pub fn clear(&mut self) {
        let stats = self.stats;
        *self = Self {
            stats,
            ..Self::default()
        };
    }

    /// Drops every memoized result not computed for `fingerprint`.
    pub fn retain_only(&mut self, fingerprint: DatasetFingerprint) {
        self.features.retain(|key, _| *key == fingerprint);
        self.rankings.retain(|(key, _), _| *key == fingerprint);
        self.type_win_rates.retain(|key, _| *key == fingerprint);
        self.entity_wins.retain(|key, _| *key == fingerprint);
        self.win_distribution.retain(|key, _| *key == fingerprint);
        self.attribute_profile.retain(|key, _| *key == fingerprint);
        tracing::debug!(%fingerprint, "pruned analysis cache");
    }

    /// [`FeatureBuilder::build`] over the snapshot.
    pub fn features(&mut self, snapshot: &Snapshot) -> Rc<FeatureTable> {
        memoize(
            &mut self.features,
            &mut self.stats,
            "features",
            snapshot.fingerprint,
            || Rc::new(FeatureBuilder::new(snapshot.catalog()).build(snapshot.battles())),
        )
    }

    /// [`ImportanceRanker::rank`] over the snapshot's features.
    ///
    /// Keyed by fingerprint and forest parameters; errors are not memoized.
    pub fn ranking(
        &mut self,
        snapshot: &Snapshot,
        params: &ForestParams,
    ) -> Result<Vec<RankedFeature>, ForestError> {
        let key = (snapshot.fingerprint, *params);
        if let Some(ranking) = self.rankings.get(&key) {
            self.stats.hits += 1;
            tracing::debug!(analysis = "ranking", "cache hit");
            return Ok(ranking.clone());
        }
        let features = self.features(snapshot);
        self.stats.misses += 1;
        tracing::debug!(analysis = "ranking", "cache miss");
        let ranking = ImportanceRanker::new(*params).rank(&features)?;
        self.rankings.insert(key, ranking.clone());
        Ok(ranking)
    }

    /// [`type_win_rates`] over the snapshot.
    pub fn type_win_rates(&mut self, snapshot: &Snapshot) -> Vec<TypeWinRate> {
        memoize(
            &mut self.type_win_rates,
            &mut self.stats,
            "type_win_rates",
            snapshot.fingerprint,
            || type_win_rates(snapshot.catalog(), snapshot.battles()),
        )
    }

    /// [`entity_wins`] over the snapshot.
    pub fn entity_wins(&mut self, snapshot: &Snapshot) -> Vec<EntityWins> {
        memoize(
            &mut self.entity_wins,
            &mut self.stats,
            "entity_wins",
            snapshot.fingerprint,
            || entity_wins(snapshot.catalog(), snapshot.battles()),
        )
    }

    /// [`win_distribution`] over the snapshot.
    pub fn win_distribution(&mut self, snapshot: &Snapshot) -> Vec<WinCount> {
        memoize(
            &mut self.win_distribution,
            &mut self.stats,
            "win_distribution",
            snapshot.fingerprint,
            || win_distribution(snapshot.battles()),
        )
    }

    /// [`attribute_profile`] over the snapshot.
    pub fn attribute_profile(&mut self, snapshot: &Snapshot) -> Vec<AttributeMean> {
        memoize(
            &mut self.attribute_profile,
            &mut self.stats,
            "attribute_profile",
            snapshot.fingerprint,
            || attribute_profile(snapshot.catalog()),
        )
    }
}

fn memoize<K, V, F>(
    memo: &mut HashMap<K, V>,
    stats: &mut CacheStats,
    analysis: &'static str,
    key: K,
    compute: F,
) -> V
where
    K: Eq + Hash,
    V: Clone,
    F: FnOnce() -> V,
{
    if let Some(value) = memo.get(&key) {
        stats.hits += 1;
        tracing::debug!(analysis, "cache hit");
        return value.clone();
    }
    stats.misses += 1;
    tracing::debug!(analysis, "cache miss");
    memo.entry(key).or_insert_with(compute).clone()
}
