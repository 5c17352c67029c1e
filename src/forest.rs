//! Bagged regression trees for rating prediction.
//!
//! Each tree is a CART-style regressor: axis-aligned splits chosen to
//! minimize the summed squared error of the two children, grown until a
//! node runs out of samples, variance or valid split points. The forest
//! fits every tree on its own bootstrap sample and predicts the mean of
//! the per-tree predictions.
//!
//! Every random draw comes from an RNG seeded off the caller's base seed,
//! so a fixed seed fixes the whole ensemble.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MIN_SAMPLES_SPLIT: usize = 2;

enum Node {
    Leaf(f64),
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    fn fit(features: &[Vec<f64>], targets: &[f64], indices: &[usize]) -> Self {
        let n_features = features.first().map_or(0, |row| row.len());
        DecisionTree {
            root: build(features, targets, indices, n_features),
        }
    }

    fn predict(&self, x: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

fn mean(targets: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64
}

fn build(features: &[Vec<f64>], targets: &[f64], indices: &[usize], n_features: usize) -> Node {
    if indices.len() < MIN_SAMPLES_SPLIT {
        return Node::Leaf(mean(targets, indices));
    }
    let first = targets[indices[0]];
    if indices.iter().all(|&i| targets[i] == first) {
        return Node::Leaf(first);
    }

    match best_split(features, targets, indices, n_features) {
        None => Node::Leaf(mean(targets, indices)),
        Some((feature, threshold)) => {
            let (left, right): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .partition(|&&i| features[i][feature] <= threshold);
            Node::Split {
                feature,
                threshold,
                left: Box::new(build(features, targets, &left, n_features)),
                right: Box::new(build(features, targets, &right, n_features)),
            }
        }
    }
}

/// Exhaustive scan over candidate thresholds, one pass of prefix sums per
/// feature. Returns `None` when no feature offers two distinct values.
fn best_split(
    features: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    n_features: usize,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64, f64)> = None;

    for feature in 0..n_features {
        let mut order = indices.to_vec();
        order.sort_by(|&a, &b| {
            features[a][feature]
                .partial_cmp(&features[b][feature])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let n = order.len();
        let total_sum: f64 = order.iter().map(|&i| targets[i]).sum();
        let total_sq: f64 = order.iter().map(|&i| targets[i] * targets[i]).sum();

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 1..n {
            let prev = order[k - 1];
            left_sum += targets[prev];
            left_sq += targets[prev] * targets[prev];

            let value_prev = features[prev][feature];
            let value_here = features[order[k]][feature];
            if value_here <= value_prev {
                continue; // no boundary between equal values
            }

            let left_n = k as f64;
            let right_n = (n - k) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if best.map_or(true, |(_, _, current)| sse < current) {
                best = Some((feature, (value_prev + value_here) / 2.0, sse));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

/// An ensemble of bootstrap-sampled regression trees.
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit `n_trees` trees on bootstrap samples of the given rows.
    ///
    /// Tree `t` draws its sample from an RNG seeded `seed + t`, so the
    /// fitted ensemble is a pure function of the data, `n_trees` and `seed`.
    pub fn fit(features: &[Vec<f64>], targets: &[f64], n_trees: usize, seed: u64) -> Self {
        let n = targets.len();
        if n == 0 {
            return RandomForest { trees: Vec::new() };
        }
        let trees = (0..n_trees)
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(t as u64));
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(features, targets, &sample)
            })
            .collect();
        RandomForest { trees }
    }

    /// Predict the target for a single feature vector (mean over trees).
    pub fn predict(&self, x: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|tree| tree.predict(x)).sum();
        sum / self.trees.len() as f64
    }
}
