//! All dashboard sections computed in one pass.

use pokestat_forest::{ForestError, ForestParams};
use pokestat_stats::histogram::Histogram;
use serde::{Deserialize, Serialize};

use crate::{
    attribute_profile::AttributeMean,
    cache::{AnalysisCache, Snapshot},
    entity_wins::EntityWins,
    importance::RankedFeature,
    type_win_rate::TypeWinRate,
    win_distribution::{WinCount, win_count_histogram},
};

/// Smallest top-N the winners table offers.
pub const MIN_TOP_N: usize = 5;
/// Largest top-N the winners table offers.
pub const MAX_TOP_N: usize = 25;

/// Settings shared by every presentation surface.
///
/// Every field has a default, so a configuration file may name only the
/// settings it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub forest: ForestParams,
    pub histogram_bins: usize,
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            forest: ForestParams::default(),
            histogram_bins: 30,
            top_n: 10,
        }
    }
}

/// Clamps a requested top-N to `[5, min(25, available)]`.
///
/// With fewer than five rows available every row is shown.
///
/// ```
/// use pokestat_analysis::report::clamp_top_n;
///
/// assert_eq!(clamp_top_n(10, 800), 10);
/// assert_eq!(clamp_top_n(100, 800), 25);
/// assert_eq!(clamp_top_n(1, 800), 5);
/// assert_eq!(clamp_top_n(10, 12), 10);
/// assert_eq!(clamp_top_n(10, 3), 3);
/// ```
#[must_use]
pub fn clamp_top_n(requested: usize, available: usize) -> usize {
    let max = MAX_TOP_N.min(available);
    requested.clamp(MIN_TOP_N.min(max), max)
}

/// Every analysis of one dataset snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub entities: usize,
    pub battles: usize,
    pub importance: Vec<RankedFeature>,
    pub type_win_rates: Vec<TypeWinRate>,
    pub entity_wins: Vec<EntityWins>,
    pub win_distribution: Vec<WinCount>,
    pub attribute_profile: Vec<AttributeMean>,
}

impl AnalysisReport {
    /// Runs every analysis through `cache`.
    pub fn compute(
        cache: &mut AnalysisCache,
        snapshot: &Snapshot,
        forest: &ForestParams,
    ) -> Result<Self, ForestError> {
        let report = Self {
            entities: snapshot.catalog().len(),
            battles: snapshot.battles().len(),
            importance: cache.ranking(snapshot, forest)?,
            type_win_rates: cache.type_win_rates(snapshot),
            entity_wins: cache.entity_wins(snapshot),
            win_distribution: cache.win_distribution(snapshot),
            attribute_profile: cache.attribute_profile(snapshot),
        };
        tracing::info!(
            entities = report.entities,
            battles = report.battles,
            types = report.type_win_rates.len(),
            "computed analysis report"
        );
        Ok(report)
    }

    /// The `n` entities with the most wins, after [`clamp_top_n`].
    #[must_use]
    pub fn top_winners(&self, n: usize) -> &[EntityWins] {
        &self.entity_wins[..clamp_top_n(n, self.entity_wins.len())]
    }

    #[must_use]
    pub fn win_histogram(&self, num_bins: usize) -> Histogram {
        win_count_histogram(&self.win_distribution, num_bins)
    }
}

#[cfg(test)]
mod tests {
    use pokestat_data::load::Dataset;

    use super::*;
    use crate::fixtures::{log, pikachu_mewtwo, starters};

    fn quick_forest() -> ForestParams {
        ForestParams {
            n_trees: 10,
            ..ForestParams::default()
        }
    }

    #[test]
    fn test_pikachu_mewtwo_report() {
        let snapshot = Snapshot::new(Dataset {
            catalog: pikachu_mewtwo(),
            battles: log(&[(1, 2, 2)]),
        });
        let report =
            AnalysisReport::compute(&mut AnalysisCache::new(), &snapshot, &quick_forest()).unwrap();
        assert_eq!(report.entities, 2);
        assert_eq!(report.battles, 1);
        assert_eq!(report.importance.len(), 6);
        assert_eq!(report.type_win_rates[0].type_label, "Psychic");
        assert_eq!(report.entity_wins[0].name.as_deref(), Some("Mewtwo"));
        assert_eq!(report.win_distribution.len(), 1);
        assert_eq!(report.attribute_profile.len(), 18);
        assert_eq!(report.top_winners(10).len(), 2);
    }

    #[test]
    fn test_empty_log_report() {
        let snapshot = Snapshot::new(Dataset {
            catalog: starters(),
            battles: log(&[]),
        });
        let report =
            AnalysisReport::compute(&mut AnalysisCache::new(), &snapshot, &quick_forest()).unwrap();
        assert!(report.importance.is_empty());
        assert!(report.type_win_rates.is_empty());
        assert!(report.entity_wins.is_empty());
        assert!(report.win_distribution.is_empty());
        assert!(report.top_winners(10).is_empty());
        assert!(report.win_histogram(30).bins.is_empty());
        assert_eq!(report.attribute_profile.len(), 18);
    }

    #[test]
    fn test_config_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"top_n": 15}"#).unwrap();
        assert_eq!(config.top_n, 15);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.forest, ForestParams::default());

        let config: AnalysisConfig =
            serde_json::from_str(r#"{"forest": {"n_trees": 5}}"#).unwrap();
        assert_eq!(config.forest.n_trees, 5);
        assert_eq!(config.forest.seed, 42);
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn test_report_serializes_flat_rows() {
        let snapshot = Snapshot::new(Dataset {
            catalog: starters(),
            battles: log(&[(1, 4, 4), (6, 7, 6), (146, 6, 146)]),
        });
        let report =
            AnalysisReport::compute(&mut AnalysisCache::new(), &snapshot, &quick_forest()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["battles"], 3);
        assert_eq!(json["importance"].as_array().unwrap().len(), 6);
        // three single winners, tied on wins and ordered by id
        assert_eq!(json["entity_wins"][0]["id"], 4);
        assert_eq!(json["entity_wins"][0]["name"], "Charmander");
        assert_eq!(json["attribute_profile"][0]["group"], "legendary");
        assert_eq!(json["attribute_profile"][0]["attribute"], "hp");
    }
}
