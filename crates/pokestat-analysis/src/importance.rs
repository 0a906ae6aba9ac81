//! Ranking of attribute differences by how much they explain battle outcomes.
//!
//! [`ImportanceRanker::rank`] standardizes every feature column of a
//! [`FeatureTable`], fits a seeded random forest against `p1_won` and reports
//! each column's impurity-based importance as a percentage. The percentages sum
//! to 100 and come sorted from most to least important.
//!
//! The fit is descriptive: the model is trained and evaluated on the same rows,
//! and only its importances are kept.

use pokestat_forest::{FeatureMatrix, ForestError, ForestParams, RandomForest};
use pokestat_stats::scaler::StandardScaler;
use serde::{Deserialize, Serialize};

use crate::feature_builder::FeatureTable;

/// One feature's share of the total importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFeature {
    /// Column name, e.g. `diff_speed`.
    pub feature: String,
    /// Display label, e.g. `Speed`.
    pub label: String,
    /// Importance in percent; all features of a ranking sum to 100.
    pub importance: f64,
}

/// Fits the forest and turns its importances into a ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ImportanceRanker {
    params: ForestParams,
}

impl ImportanceRanker {
    #[must_use]
    pub fn new(params: ForestParams) -> Self {
        Self { params }
    }

    /// Ranks the table's feature columns by importance.
    ///
    /// An empty column list or an empty table yields an empty ranking. If the
    /// forest never splits (every battle has the same outcome), each column
    /// gets an equal share of `100 / columns`. scikit-learn reports all zeros
    /// in that case; the even share keeps the ranking summing to 100.
    pub fn rank(&self, table: &FeatureTable) -> Result<Vec<RankedFeature>, ForestError> {
        if table.feature_cols.is_empty() || table.is_empty() {
            return Ok(vec![]);
        }

        let columns = table
            .feature_cols
            .iter()
            .map(|&column| table.column(column))
            .collect::<Vec<_>>();
        let matrix = FeatureMatrix::new(StandardScaler::fit_transform(&columns))?;
        let labels = table.labels();
        let forest = RandomForest::fit(&matrix, &labels, &self.params)?;

        let mut importances = forest.feature_importances();
        if importances.iter().all(|&importance| importance <= 0.0) {
            tracing::warn!("forest made no splits; spreading importance evenly");
            #[expect(clippy::cast_precision_loss)]
            let share = 1.0 / importances.len() as f64;
            importances.fill(share);
        }

        let mut ranking = table
            .feature_cols
            .iter()
            .zip(importances)
            .map(|(column, importance)| {
                let feature = column.name();
                RankedFeature {
                    label: importance_label(&feature),
                    feature,
                    importance: importance * 100.0,
                }
            })
            .collect::<Vec<_>>();
        ranking.sort_by(|a, b| b.importance.total_cmp(&a.importance));

        tracing::info!(
            rows = table.len(),
            features = ranking.len(),
            n_trees = self.params.n_trees,
            seed = self.params.seed,
            "ranked feature importances"
        );
        Ok(ranking)
    }
}

/// Human-readable label of a feature column.
///
/// The `diff_` prefix is dropped, `hp` becomes `HP` and `sp_` becomes `Sp. `;
/// the result is then capitalized (first letter upper case, the rest lower
/// case), so the `HP` spelled out in between ends up as `Hp`.
///
/// ```
/// use pokestat_analysis::importance::importance_label;
///
/// assert_eq!(importance_label("diff_sp_attack"), "Sp. attack");
/// assert_eq!(importance_label("diff_speed"), "Speed");
/// assert_eq!(importance_label("diff_hp"), "Hp");
/// ```
#[must_use]
pub fn importance_label(column: &str) -> String {
    let label = column
        .replace("diff_", "")
        .replace("hp", "HP")
        .replace("sp_", "Sp. ");
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use pokestat_data::{Attribute, EntityCatalog};
    use proptest::prelude::*;

    use super::*;
    use crate::{
        feature_builder::{FeatureBuilder, FeatureColumn},
        fixtures::{battle, entity, log, pikachu_mewtwo},
    };

    fn quick_ranker() -> ImportanceRanker {
        ImportanceRanker::new(ForestParams {
            n_trees: 20,
            ..ForestParams::default()
        })
    }

    /// Battles always won by the faster entity; other attributes are noise.
    fn speed_decides() -> FeatureTable {
        let entities = (0..12)
            .map(|i| {
                let mut entity = entity(i, "mon", "Normal", false, 50.0);
                entity.speed = f64::from(u8::try_from(i).unwrap()) * 10.0;
                entity.hp = f64::from(u8::try_from((i * 7) % 5).unwrap());
                entity.attack = f64::from(u8::try_from((i * 3) % 4).unwrap());
                entity
            })
            .collect();
        let catalog = EntityCatalog::new(entities).unwrap();
        let battles = (0..12)
            .flat_map(|a| (0..12).filter(move |&b| b != a).map(move |b| (a, b)))
            .map(|(a, b)| battle(a, b, a.max(b)))
            .collect();
        FeatureBuilder::new(&catalog).build(&battles)
    }

    #[test]
    fn test_labels() {
        let labels = FeatureColumn::ALL
            .iter()
            .map(|column| importance_label(&column.name()))
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            ["Hp", "Attack", "Defense", "Sp. attack", "Sp. defense", "Speed"]
        );
        assert_eq!(importance_label(""), "");
    }

    #[test]
    fn test_ranking_sums_to_100_and_is_sorted() {
        let ranking = quick_ranker().rank(&speed_decides()).unwrap();
        assert_eq!(ranking.len(), 6);
        let sum = ranking.iter().map(|r| r.importance).sum::<f64>();
        assert!((sum - 100.0).abs() < 1e-9, "{sum}");
        assert!(
            ranking
                .windows(2)
                .all(|pair| pair[0].importance >= pair[1].importance)
        );
        assert!(ranking.iter().all(|r| (0.0..=100.0).contains(&r.importance)));
    }

    #[test]
    fn test_decisive_feature_ranks_first() {
        let ranking = quick_ranker().rank(&speed_decides()).unwrap();
        assert_eq!(ranking[0].feature, "diff_speed");
        assert_eq!(ranking[0].label, "Speed");
    }

    #[test]
    fn test_ranking_is_reproducible() {
        let table = speed_decides();
        let a = quick_ranker().rank(&table).unwrap();
        let b = quick_ranker().rank(&table).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_feature_cols_give_empty_ranking() {
        let mut table = speed_decides();
        table.feature_cols.clear();
        assert!(quick_ranker().rank(&table).unwrap().is_empty());
    }

    #[test]
    fn test_empty_table_gives_empty_ranking() {
        let table = FeatureBuilder::new(&pikachu_mewtwo()).build(&log(&[]));
        assert!(quick_ranker().rank(&table).unwrap().is_empty());
    }

    #[test]
    fn test_single_outcome_spreads_importance_evenly() {
        let table = FeatureBuilder::new(&pikachu_mewtwo()).build(&log(&[(1, 2, 2), (1, 2, 2)]));
        let ranking = quick_ranker().rank(&table).unwrap();
        assert_eq!(ranking.len(), 6);
        for ranked in &ranking {
            assert!((ranked.importance - 100.0 / 6.0).abs() < 1e-9);
        }
        // stable sort keeps column order on ties
        assert_eq!(ranking[0].feature, "diff_hp");
    }

    #[test]
    fn test_subset_of_columns() {
        let mut table = speed_decides();
        table.feature_cols = vec![
            FeatureColumn(Attribute::Speed),
            FeatureColumn(Attribute::Hp),
        ];
        let ranking = quick_ranker().rank(&table).unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].feature, "diff_speed");
    }

    #[test]
    fn test_zero_trees_is_an_error() {
        let ranker = ImportanceRanker::new(ForestParams {
            n_trees: 0,
            ..ForestParams::default()
        });
        assert!(matches!(
            ranker.rank(&speed_decides()),
            Err(ForestError::NoTrees)
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_importances_sum_to_100(
            stats in prop::collection::vec(0.0f64..255.0, 4..10),
            pairs in prop::collection::vec((0usize..10, 0usize..10, any::<bool>()), 1..40),
        ) {
            let entities = stats
                .iter()
                .enumerate()
                .map(|(i, &stat)| {
                    let id = i64::try_from(i).unwrap();
                    let mut entity = entity(id, "mon", "Normal", false, stat);
                    entity.speed = 255.0 - stat;
                    entity
                })
                .collect();
            let catalog = EntityCatalog::new(entities).unwrap();
            let n = stats.len();
            let battles = pairs
                .iter()
                .map(|&(a, b, first_wins)| {
                    let (a, b) = (a % n, b % n);
                    let (a, b) = (i64::try_from(a).unwrap(), i64::try_from(b).unwrap());
                    battle(a, b, if first_wins { a } else { b })
                })
                .collect();
            let table = FeatureBuilder::new(&catalog).build(&battles);

            let ranking = quick_ranker().rank(&table).unwrap();
            prop_assert_eq!(ranking.len(), 6);
            let sum = ranking.iter().map(|r| r.importance).sum::<f64>();
            prop_assert!((sum - 100.0).abs() < 1e-6, "sum = {}", sum);
        }
    }
}
