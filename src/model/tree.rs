use std::cmp::Ordering;

use crate::features::FEATURE_COUNT;

const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

struct Split {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// CART regression tree with variance-reduction splits.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    importances: [f64; FEATURE_COUNT],
}

impl RegressionTree {
    /// Grows a tree over `samples` (indices into `rows`/`labels`, repeats allowed).
    pub fn fit(
        rows: &[[f64; FEATURE_COUNT]],
        labels: &[f64],
        samples: Vec<usize>,
        params: &TreeParams,
    ) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            importances: [0.0; FEATURE_COUNT],
        };
        if !samples.is_empty() {
            tree.grow(rows, labels, samples, 0, params);
        }
        tree
    }

    pub fn predict(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0usize;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }

    /// Total impurity decrease per feature, unnormalized.
    pub fn raw_importances(&self) -> [f64; FEATURE_COUNT] {
        self.importances
    }

    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, idx: usize) -> usize {
        match self.nodes.get(idx) {
            Some(Node::Split { left, right, .. }) => {
                1 + self.depth_from(*left).max(self.depth_from(*right))
            }
            _ => 0,
        }
    }

    fn grow(
        &mut self,
        rows: &[[f64; FEATURE_COUNT]],
        labels: &[f64],
        samples: Vec<usize>,
        depth: usize,
        params: &TreeParams,
    ) -> usize {
        let (mean, sse) = mean_and_sse(labels, &samples);
        let node_idx = self.nodes.len();
        self.nodes.push(Node::Leaf { value: mean });

        if depth >= params.max_depth || samples.len() < params.min_samples_split.max(2) {
            return node_idx;
        }
        let Some(split) = best_split(rows, labels, &samples, sse) else {
            return node_idx;
        };

        self.importances[split.feature] += split.gain;
        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&sample| rows[sample][split.feature] <= split.threshold);

        let left = self.grow(rows, labels, left_samples, depth + 1, params);
        let right = self.grow(rows, labels, right_samples, depth + 1, params);
        self.nodes[node_idx] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_idx
    }
}

fn mean_and_sse(labels: &[f64], samples: &[usize]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let n = samples.len() as f64;
    let sum: f64 = samples.iter().map(|&s| labels[s]).sum();
    let sum_sq: f64 = samples.iter().map(|&s| labels[s] * labels[s]).sum();
    let mean = sum / n;
    (mean, (sum_sq - sum * sum / n).max(0.0))
}

fn best_split(
    rows: &[[f64; FEATURE_COUNT]],
    labels: &[f64],
    samples: &[usize],
    parent_sse: f64,
) -> Option<Split> {
    let n = samples.len();
    let total_sum: f64 = samples.iter().map(|&s| labels[s]).sum();
    let total_sq: f64 = samples.iter().map(|&s| labels[s] * labels[s]).sum();

    let mut best: Option<Split> = None;
    let mut order = samples.to_vec();

    for feature in 0..FEATURE_COUNT {
        order.sort_by(|&a, &b| {
            rows[a][feature]
                .partial_cmp(&rows[b][feature])
                .unwrap_or(Ordering::Equal)
        });

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for pos in 1..n {
            let prev = order[pos - 1];
            left_sum += labels[prev];
            left_sq += labels[prev] * labels[prev];

            let lo = rows[prev][feature];
            let hi = rows[order[pos]][feature];
            if lo >= hi {
                continue;
            }

            let n_left = pos as f64;
            let n_right = (n - pos) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let child_sse = (left_sq - left_sum * left_sum / n_left)
                + (right_sq - right_sum * right_sum / n_right);
            let gain = parent_sse - child_sse;

            if gain > MIN_GAIN && best.as_ref().map_or(true, |current| gain > current.gain) {
                let mid = lo + (hi - lo) / 2.0;
                let threshold = if mid >= hi { lo } else { mid };
                best = Some(Split {
                    feature,
                    threshold,
                    gain,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_the_informative_feature() {
        let rows: Vec<[f64; FEATURE_COUNT]> = (0..20)
            .map(|i| [i as f64 / 20.0, 0.5, 0.5, 0.0, (i % 4) as f64])
            .collect();
        let labels: Vec<f64> = rows.iter().map(|row| if row[0] < 0.5 { 0.02 } else { 0.12 }).collect();
        let tree = RegressionTree::fit(
            &rows,
            &labels,
            (0..rows.len()).collect(),
            &TreeParams {
                max_depth: 3,
                min_samples_split: 2,
            },
        );

        assert!((tree.predict(&[0.1, 0.5, 0.5, 0.0, 0.0]) - 0.02).abs() < 1e-12);
        assert!((tree.predict(&[0.9, 0.5, 0.5, 0.0, 0.0]) - 0.12).abs() < 1e-12);
        let importances = tree.raw_importances();
        assert!(importances[0] > 0.0);
        assert_eq!(importances[1], 0.0);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn respects_max_depth() {
        let rows: Vec<[f64; FEATURE_COUNT]> =
            (0..64).map(|i| [i as f64, 0.0, 0.0, 0.0, 0.0]).collect();
        let labels: Vec<f64> = (0..64).map(|i| (i as f64).sin()).collect();
        let tree = RegressionTree::fit(
            &rows,
            &labels,
            (0..64).collect(),
            &TreeParams {
                max_depth: 2,
                min_samples_split: 2,
            },
        );
        assert!(tree.depth() <= 2);
    }
}
