use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{DecisionTree, FeatureMatrix, ForestError, TreeParams};

/// How many features each node considers when searching a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`
    Sqrt,
    /// `floor(log2(n_features))`
    Log2,
    /// Every feature.
    All,
    /// A fixed count, clamped to `1..=n_features`.
    Count(usize),
}

impl MaxFeatures {
    /// Resolves to a concrete count for `n_features` features; never below one.
    ///
    /// ```
    /// use pokestat_forest::MaxFeatures;
    ///
    /// assert_eq!(MaxFeatures::Sqrt.resolve(6), 2);
    /// assert_eq!(MaxFeatures::Log2.resolve(6), 2);
    /// assert_eq!(MaxFeatures::All.resolve(6), 6);
    /// assert_eq!(MaxFeatures::Count(10).resolve(6), 6);
    /// assert_eq!(MaxFeatures::Sqrt.resolve(1), 1);
    /// ```
    #[must_use]
    pub fn resolve(self, n_features: usize) -> usize {
        let count = match self {
            MaxFeatures::Sqrt => n_features.isqrt(),
            MaxFeatures::Log2 => n_features.checked_ilog2().map_or(0, |log| log as usize),
            MaxFeatures::All => n_features,
            MaxFeatures::Count(count) => count,
        };
        count.clamp(1, n_features.max(1))
    }
}

/// Hyperparameters of [`RandomForest::fit`].
///
/// Missing fields take their defaults when deserialized, so a configuration
/// file only needs to name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    pub bootstrap: bool,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
        }
    }
}

impl ForestParams {
    fn tree_params(&self, n_features: usize) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split.max(2),
            min_samples_leaf: self.min_samples_leaf.max(1),
            max_features: self.max_features.resolve(n_features),
        }
    }
}

/// A bagged ensemble of [`DecisionTree`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForest {
    /// Trains a forest on `matrix` against binary `labels`.
    ///
    /// The master generator is seeded from `params.seed`; tree `i` is grown with
    /// a generator seeded from the `i`-th value the master draws.
    pub fn fit(
        matrix: &FeatureMatrix,
        labels: &[bool],
        params: &ForestParams,
    ) -> Result<Self, ForestError> {
        let n_rows = matrix.n_rows();
        let n_features = matrix.n_features();
        if n_features == 0 {
            return Err(ForestError::NoFeatures);
        }
        if labels.len() != n_rows {
            return Err(ForestError::LabelCountMismatch {
                rows: n_rows,
                labels: labels.len(),
            });
        }
        if n_rows == 0 {
            return Err(ForestError::NoRows);
        }
        if params.n_trees == 0 {
            return Err(ForestError::NoTrees);
        }

        let tree_params = params.tree_params(n_features);
        let mut rng = Pcg32::seed_from_u64(params.seed);
        let trees = (0..params.n_trees)
            .map(|_| {
                let mut tree_rng = Pcg32::seed_from_u64(rng.random());
                let samples = if params.bootstrap {
                    (0..n_rows)
                        .map(|_| tree_rng.random_range(0..n_rows))
                        .collect()
                } else {
                    (0..n_rows).collect()
                };
                DecisionTree::fit(matrix, labels, samples, &tree_params, &mut tree_rng)
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            n_trees = trees.len(),
            n_rows,
            n_features,
            max_features = tree_params.max_features,
            total_nodes = trees.iter().map(DecisionTree::n_nodes).sum::<usize>(),
            "trained random forest"
        );
        Ok(Self { trees, n_features })
    }

    #[must_use]
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Mean decrease in impurity per feature, summing to one.
    ///
    /// Each tree's decreases are normalized before averaging, so every tree that
    /// split carries the same weight. Trees that never split contribute zeros;
    /// if no tree split at all the result is all zeros.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut importances = vec![0.0; self.n_features];
        for tree in &self.trees {
            for (sum, value) in importances.iter_mut().zip(tree.normalized_importances()) {
                *sum += value;
            }
        }
        let n_trees = self.trees.len() as f64;
        for value in &mut importances {
            *value /= n_trees;
        }
        let total = importances.iter().sum::<f64>();
        if total > 0.0 {
            for value in &mut importances {
                *value /= total;
            }
        }
        importances
    }

    /// Mean of the trees' positive-class probabilities for one row.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let sum = self
            .trees
            .iter()
            .map(|tree| tree.predict_proba(row))
            .sum::<f64>();
        sum / self.trees.len() as f64
    }

    /// Predicted class for one row; ties go to the negative class.
    #[must_use]
    pub fn predict(&self, row: &[f64]) -> bool {
        self.predict_proba(row) > 0.5
    }

    /// Fraction of rows whose predicted class matches the label.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn score(&self, matrix: &FeatureMatrix, labels: &[bool]) -> f64 {
        if labels.is_empty() {
            return 0.0;
        }
        let correct = labels
            .iter()
            .enumerate()
            .filter(|&(row, &label)| self.predict(&matrix.row(row)) == label)
            .count();
        correct as f64 / labels.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feature 0 decides the label, feature 1 alternates independently of it.
    #[expect(clippy::cast_precision_loss)]
    fn separable(n: usize) -> (FeatureMatrix, Vec<bool>) {
        let informative = (0..n).map(|i| i as f64).collect();
        let noise = (0..n).map(|i| (i % 2) as f64).collect();
        let labels = (0..n).map(|i| i >= n / 2).collect();
        (
            FeatureMatrix::new(vec![informative, noise]).unwrap(),
            labels,
        )
    }

    #[test]
    fn test_informative_feature_takes_all_importance() {
        let (matrix, labels) = separable(40);
        let params = ForestParams {
            n_trees: 20,
            max_features: MaxFeatures::All,
            ..ForestParams::default()
        };
        let forest = RandomForest::fit(&matrix, &labels, &params).unwrap();
        assert_eq!(forest.trees().len(), 20);

        let importances = forest.feature_importances();
        assert!((importances[0] - 1.0).abs() < 1e-12, "{importances:?}");
        assert!(importances[1].abs() < 1e-12, "{importances:?}");
    }

    #[test]
    fn test_importances_sum_to_one() {
        let (matrix, labels) = separable(60);
        let forest = RandomForest::fit(&matrix, &labels, &ForestParams::default()).unwrap();
        let importances = forest.feature_importances();
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(importances[0] > importances[1], "{importances:?}");
    }

    #[test]
    fn test_training_is_deterministic() {
        let (matrix, labels) = separable(50);
        let params = ForestParams {
            n_trees: 25,
            seed: 7,
            ..ForestParams::default()
        };
        let a = RandomForest::fit(&matrix, &labels, &params).unwrap();
        let b = RandomForest::fit(&matrix, &labels, &params).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.feature_importances(), b.feature_importances());
    }

    #[test]
    fn test_constant_labels_give_zero_importances() {
        let (matrix, _) = separable(10);
        let labels = vec![true; 10];
        let forest = RandomForest::fit(&matrix, &labels, &ForestParams::default()).unwrap();
        assert_eq!(forest.feature_importances(), vec![0.0, 0.0]);
        assert!(forest.predict(&[0.0, 0.0]));
    }

    #[test]
    fn test_fits_training_data() {
        let (matrix, labels) = separable(40);
        let params = ForestParams {
            max_features: MaxFeatures::All,
            ..ForestParams::default()
        };
        let forest = RandomForest::fit(&matrix, &labels, &params).unwrap();
        assert!(forest.score(&matrix, &labels) >= 0.95);
        assert!(!forest.predict(&[0.0, 0.0]));
        assert!(forest.predict(&[39.0, 1.0]));
    }

    #[test]
    fn test_without_bootstrap_all_trees_see_every_row() {
        let (matrix, labels) = separable(20);
        let params = ForestParams {
            n_trees: 3,
            bootstrap: false,
            max_features: MaxFeatures::All,
            ..ForestParams::default()
        };
        let forest = RandomForest::fit(&matrix, &labels, &params).unwrap();
        assert_eq!(forest.score(&matrix, &labels), 1.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let (matrix, labels) = separable(4);
        assert!(matches!(
            RandomForest::fit(&matrix, &labels[..3], &ForestParams::default()),
            Err(ForestError::LabelCountMismatch { rows: 4, labels: 3 })
        ));
        assert!(matches!(
            RandomForest::fit(
                &matrix,
                &labels,
                &ForestParams {
                    n_trees: 0,
                    ..ForestParams::default()
                }
            ),
            Err(ForestError::NoTrees)
        ));
        let empty = FeatureMatrix::new(vec![vec![], vec![]]).unwrap();
        assert!(matches!(
            RandomForest::fit(&empty, &[], &ForestParams::default()),
            Err(ForestError::NoRows)
        ));
        let featureless = FeatureMatrix::new(vec![]).unwrap();
        assert!(matches!(
            RandomForest::fit(&featureless, &[], &ForestParams::default()),
            Err(ForestError::NoFeatures)
        ));
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: ForestParams =
            serde_json::from_str(r#"{"n_trees": 10, "max_features": "all"}"#).unwrap();
        assert_eq!(params.n_trees, 10);
        assert_eq!(params.seed, 42);
        assert_eq!(params.max_features, MaxFeatures::All);
        assert!(params.bootstrap);

        let params: ForestParams = serde_json::from_str(r#"{"max_features": {"count": 3}}"#).unwrap();
        assert_eq!(params.max_features, MaxFeatures::Count(3));
    }
}
