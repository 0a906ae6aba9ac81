use rand::{Rng, seq::SliceRandom};

use crate::FeatureMatrix;

/// Growth limits of a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    /// Maximum depth; `None` grows until leaves are pure.
    pub max_depth: Option<usize>,
    /// Minimum number of samples a node needs to be split.
    pub min_samples_split: usize,
    /// Minimum number of samples on each side of a split.
    pub min_samples_leaf: usize,
    /// Number of non-constant features evaluated per node.
    pub max_features: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Leaf {
        positive: usize,
        total: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A binary CART classifier grown on the Gini criterion.
///
/// A sample goes to the left child when its feature value is `<= threshold`.
/// Thresholds are midpoints between adjacent distinct training values.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    impurity_decrease: Vec<f64>,
}

#[derive(Debug, Clone, Copy)]
struct PendingNode {
    node: usize,
    start: usize,
    end: usize,
    depth: usize,
}

#[derive(Debug, Clone, Copy)]
struct BestSplit {
    feature: usize,
    threshold: f64,
    weighted_child_impurity: f64,
}

impl DecisionTree {
    /// Grows a tree over `samples`, a multiset of row indices into `matrix`.
    ///
    /// Duplicated indices count once per occurrence, which is how bootstrap
    /// resampling is expressed.
    pub fn fit<R>(
        matrix: &FeatureMatrix,
        labels: &[bool],
        mut samples: Vec<usize>,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut nodes = vec![Node::Leaf {
            positive: 0,
            total: 0,
        }];
        let mut impurity_decrease = vec![0.0; matrix.n_features()];
        let mut features = (0..matrix.n_features()).collect::<Vec<_>>();
        let mut scratch = Vec::with_capacity(samples.len());
        let mut stack = vec![PendingNode {
            node: 0,
            start: 0,
            end: samples.len(),
            depth: 0,
        }];

        while let Some(pending) = stack.pop() {
            let node_samples = &mut samples[pending.start..pending.end];
            let total = node_samples.len();
            let positive = node_samples.iter().filter(|&&row| labels[row]).count();

            let splittable = positive != 0
                && positive != total
                && total >= params.min_samples_split
                && total >= 2 * params.min_samples_leaf
                && params.max_depth.is_none_or(|depth| pending.depth < depth);
            let best = if splittable {
                find_best_split(
                    matrix,
                    labels,
                    node_samples,
                    positive,
                    params,
                    &mut features,
                    &mut scratch,
                    rng,
                )
            } else {
                None
            };
            let Some(best) = best else {
                nodes[pending.node] = Node::Leaf { positive, total };
                continue;
            };

            impurity_decrease[best.feature] +=
                weighted_gini(positive, total) - best.weighted_child_impurity;
            let n_left = partition(node_samples, |row| {
                matrix.value(row, best.feature) <= best.threshold
            });

            let left = nodes.len();
            let right = left + 1;
            nodes.push(Node::Leaf {
                positive: 0,
                total: 0,
            });
            nodes.push(Node::Leaf {
                positive: 0,
                total: 0,
            });
            nodes[pending.node] = Node::Split {
                feature: best.feature,
                threshold: best.threshold,
                left,
                right,
            };

            let mid = pending.start + n_left;
            stack.push(PendingNode {
                node: right,
                start: mid,
                end: pending.end,
                depth: pending.depth + 1,
            });
            stack.push(PendingNode {
                node: left,
                start: pending.start,
                end: mid,
                depth: pending.depth + 1,
            });
        }

        Self {
            nodes,
            impurity_decrease,
        }
    }

    /// Fraction of positive training samples in the leaf `row` falls into.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf { total: 0, .. } => return 0.0,
                Node::Leaf { positive, total } => return positive as f64 / total as f64,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => index = if row[feature] <= threshold { left } else { right },
            }
        }
    }

    /// Total weighted Gini decrease credited to each feature.
    #[must_use]
    pub fn impurity_decrease(&self) -> &[f64] {
        &self.impurity_decrease
    }

    /// Impurity decreases scaled to sum to one, or all zeros if the tree never split.
    #[must_use]
    pub fn normalized_importances(&self) -> Vec<f64> {
        let total = self.impurity_decrease.iter().sum::<f64>();
        if total > 0.0 {
            self.impurity_decrease.iter().map(|d| d / total).collect()
        } else {
            vec![0.0; self.impurity_decrease.len()]
        }
    }

    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }
}

/// Searches the best Gini split among a random subset of features.
///
/// Features are visited in shuffled order. Constant features are skipped and do
/// not count towards `max_features`.
#[expect(clippy::too_many_arguments)]
fn find_best_split<R>(
    matrix: &FeatureMatrix,
    labels: &[bool],
    samples: &[usize],
    positive: usize,
    params: &TreeParams,
    features: &mut [usize],
    scratch: &mut Vec<(f64, bool)>,
    rng: &mut R,
) -> Option<BestSplit>
where
    R: Rng + ?Sized,
{
    let n = samples.len();
    let min_leaf = params.min_samples_leaf.max(1);
    features.shuffle(rng);

    let mut best: Option<BestSplit> = None;
    let mut visited = 0;
    for &feature in features.iter() {
        if visited >= params.max_features {
            break;
        }
        scratch.clear();
        scratch.extend(
            samples
                .iter()
                .map(|&row| (matrix.value(row, feature), labels[row])),
        );
        scratch.sort_by(|a, b| a.0.total_cmp(&b.0));
        if scratch[0].0 >= scratch[n - 1].0 {
            continue;
        }
        visited += 1;

        let mut left_positive = 0;
        for i in 1..n {
            if scratch[i - 1].1 {
                left_positive += 1;
            }
            let (prev, current) = (scratch[i - 1].0, scratch[i].0);
            if prev >= current || i < min_leaf || n - i < min_leaf {
                continue;
            }
            let weighted_child_impurity =
                weighted_gini(left_positive, i) + weighted_gini(positive - left_positive, n - i);
            if best.is_none_or(|best| weighted_child_impurity < best.weighted_child_impurity) {
                let mut threshold = prev / 2.0 + current / 2.0;
                if threshold >= current {
                    threshold = prev;
                }
                best = Some(BestSplit {
                    feature,
                    threshold,
                    weighted_child_impurity,
                });
            }
        }
    }
    best
}

/// Gini impurity of a node multiplied by its sample count.
#[expect(clippy::cast_precision_loss)]
fn weighted_gini(positive: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positive as f64 / total as f64;
    total as f64 * 2.0 * p * (1.0 - p)
}

/// Stable partition; returns the number of samples placed on the left.
fn partition<F>(samples: &mut [usize], goes_left: F) -> usize
where
    F: Fn(usize) -> bool,
{
    let (left, right): (Vec<usize>, Vec<usize>) =
        samples.iter().copied().partition(|&row| goes_left(row));
    let mid = left.len();
    samples[..mid].copy_from_slice(&left);
    samples[mid..].copy_from_slice(&right);
    mid
}
