//! Random-forest classification with impurity-based feature importances.
//!
//! This crate implements the small learner the battle analysis uses to attribute
//! outcome prediction to attribute differences. It is a bagged ensemble of CART
//! decision trees trained on binary labels.
//!
//! # How Training Works
//!
//! 1. **Seed** - A single `Pcg32` generator is seeded from [`ForestParams::seed`]
//! 2. **Bootstrap** - Each tree draws its own seed, then samples rows with replacement
//! 3. **Grow** - Trees split on the Gini criterion, considering a random subset of
//!    features at every node ([`MaxFeatures`])
//! 4. **Attribute** - Every split credits its weighted impurity decrease to the
//!    feature it used
//!
//! # Feature Importances
//!
//! [`RandomForest::feature_importances`] normalizes each tree's impurity decreases
//! to sum to one, averages them over the ensemble, and renormalizes. A forest
//! whose trees never split (e.g. all labels equal) reports all zeros.
//!
//! # Determinism
//!
//! Training is single-threaded and all randomness flows from the seed, so the
//! same data and parameters always produce bit-identical trees and importances.
//!
//! # Example
//!
//! ```
//! use pokestat_forest::{FeatureMatrix, ForestParams, RandomForest};
//!
//! let matrix = FeatureMatrix::new(vec![
//!     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
//!     vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
//! ])?;
//! let labels = [false, false, false, true, true, true];
//!
//! let forest = RandomForest::fit(&matrix, &labels, &ForestParams::default())?;
//! let importances = forest.feature_importances();
//! assert_eq!(importances.len(), 2);
//! assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! # Ok::<(), pokestat_forest::ForestError>(())
//! ```

pub use self::{
    forest::{ForestParams, MaxFeatures, RandomForest},
    matrix::FeatureMatrix,
    tree::{DecisionTree, TreeParams},
};

mod forest;
mod matrix;
mod tree;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ForestError {
    #[display("feature column {column} has {actual} rows, expected {expected}")]
    RaggedColumns {
        column: usize,
        expected: usize,
        actual: usize,
    },
    #[display("got {labels} labels for {rows} rows")]
    LabelCountMismatch { rows: usize, labels: usize },
    #[display("cannot fit a forest without rows")]
    NoRows,
    #[display("cannot fit a forest without feature columns")]
    NoFeatures,
    #[display("a forest needs at least one tree")]
    NoTrees,
}
