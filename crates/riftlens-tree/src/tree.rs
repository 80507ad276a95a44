//! C4.5-style decision-tree induction over numeric features.
//!
//! Splits are always binary thresholds (`value <= threshold` goes left,
//! `value > threshold` goes right). Candidate thresholds are the midpoints
//! between adjacent distinct values of a feature in sorted order, so both
//! partitions of a chosen split are guaranteed non-empty and every internal
//! node has exactly two children.

use std::fmt;

use riftlens_model::Team;
use riftlens_stats::frequency::ClassCounts;
use serde::{Deserialize, Serialize};

use crate::sample::{LabeledSample, SampleTable};

/// A node of a trained tree: either a terminal classification or a binary
/// threshold split owning its two children.
///
/// Leaves carry a dense integer id assigned at build time; rule extraction
/// keys on it, so two leaves with equal labels still yield distinct rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecisionNode {
    Leaf {
        id: u32,
        label: Team,
    },
    Split {
        feature: String,
        threshold: f64,
        left: Box<DecisionNode>,
        right: Box<DecisionNode>,
    },
}

/// Raised when prediction walks a path referencing a feature the queried
/// sample does not carry.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("sample has no value for feature {feature:?}")]
pub struct MissingFeatureError {
    pub feature: String,
}

/// Information gain of splitting `parent` into `left` and `right`, in bits.
///
/// Non-negative for any valid partition of `parent`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn information_gain(
    parent: &ClassCounts<Team>,
    left: &ClassCounts<Team>,
    right: &ClassCounts<Team>,
) -> f64 {
    let n = parent.total() as f64;
    parent.entropy_bits()
        - left.entropy_bits() * (left.total() as f64) / n
        - right.entropy_bits() * (right.total() as f64) / n
}

/// A trained decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: DecisionNode,
    leaf_count: u32,
}

impl DecisionTree {
    /// Grows a tree from `table` by recursive depth-first induction.
    ///
    /// Each path consumes the feature it splits on, so a feature is used at
    /// most once between the root and any leaf. Ties between equal-gain
    /// candidates go to the first encountered in (feature order, ascending
    /// threshold order). Induction is deterministic: the same table always
    /// produces the same tree.
    ///
    /// # Panics
    ///
    /// Panics if `table` is empty.
    #[must_use]
    pub fn grow(table: &SampleTable) -> Self {
        assert!(!table.is_empty(), "cannot grow a tree from an empty table");
        let samples: Vec<&LabeledSample> = table.samples().iter().collect();
        let features: Vec<&str> = table.feature_names().iter().map(String::as_str).collect();
        let mut next_leaf_id = 0;
        let root = grow_node(&samples, &features, &mut next_leaf_id);
        DecisionTree {
            root,
            leaf_count: next_leaf_id,
        }
    }

    #[must_use]
    pub fn root(&self) -> &DecisionNode {
        &self.root
    }

    /// Number of leaves; leaf ids are dense in `0..leaf_count`.
    #[must_use]
    pub fn leaf_count(&self) -> u32 {
        self.leaf_count
    }

    /// Classifies `sample` by walking the tree from the root.
    pub fn predict(&self, sample: &LabeledSample) -> Result<Team, MissingFeatureError> {
        let mut node = &self.root;
        loop {
            match node {
                DecisionNode::Leaf { label, .. } => return Ok(*label),
                DecisionNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = sample.value(feature).ok_or_else(|| MissingFeatureError {
                        feature: feature.clone(),
                    })?;
                    node = if value <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }

    /// Fraction of samples in `table` whose prediction matches their label.
    ///
    /// # Panics
    ///
    /// Panics if `table` is empty.
    #[expect(clippy::cast_precision_loss)]
    pub fn accuracy(&self, table: &SampleTable) -> Result<f64, MissingFeatureError> {
        assert!(!table.is_empty(), "cannot score an empty table");
        let mut correct = 0usize;
        for sample in table.samples() {
            if self.predict(sample)? == sample.label() {
                correct += 1;
            }
        }
        Ok(correct as f64 / table.len() as f64)
    }

    /// Mean held-out accuracy over `k` folds.
    ///
    /// Folds are assigned round-robin by sample index (fold `i` holds
    /// samples `i`, `i + k`, `i + 2k`, ...), preserving whatever ordering
    /// bias the caller's sample order carries. For each fold a fresh tree is
    /// grown on the other `k - 1` folds and scored on the held-out one.
    ///
    /// # Panics
    ///
    /// Panics if `k < 2` or `k` exceeds the number of samples.
    #[expect(clippy::cast_precision_loss)]
    pub fn cross_validate(table: &SampleTable, k: usize) -> Result<f64, MissingFeatureError> {
        assert!(
            k >= 2 && k <= table.len(),
            "fold count must be in 2..=sample count"
        );

        let mut accuracy_sum = 0.0;
        for fold in 0..k {
            let mut train = Vec::new();
            let mut test = Vec::new();
            for (i, sample) in table.samples().iter().enumerate() {
                if i % k == fold {
                    test.push(sample.clone());
                } else {
                    train.push(sample.clone());
                }
            }
            let train_table = SampleTable::new(table.feature_names().to_vec(), train);
            let test_table = SampleTable::new(table.feature_names().to_vec(), test);
            let tree = DecisionTree::grow(&train_table);
            accuracy_sum += tree.accuracy(&test_table)?;
        }
        Ok(accuracy_sum / k as f64)
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, &self.root, 0)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &DecisionNode, depth: usize) -> fmt::Result {
    let DecisionNode::Split {
        feature,
        threshold,
        left,
        right,
    } = node
    else {
        return Ok(());
    };
    for (branch, child) in [("<=", left), (">", right)] {
        write!(f, "{:depth$}{feature} {branch} {threshold}", "")?;
        match child.as_ref() {
            DecisionNode::Leaf { label, .. } => writeln!(f, " : {label}")?,
            DecisionNode::Split { .. } => {
                writeln!(f, " :")?;
                write_node(f, child.as_ref(), depth + 4)?;
            }
        }
    }
    Ok(())
}

fn grow_node(samples: &[&LabeledSample], features: &[&str], next_leaf_id: &mut u32) -> DecisionNode {
    let counts: ClassCounts<Team> = samples.iter().map(|s| s.label()).collect();
    let majority = *counts.majority().expect("partition is never empty");

    if counts.is_single_class() || features.is_empty() {
        return new_leaf(next_leaf_id, majority);
    }

    let Some((feature_index, threshold)) = best_split(samples, features, &counts) else {
        // every remaining feature is constant across this partition
        return new_leaf(next_leaf_id, majority);
    };

    let feature = features[feature_index];
    let (left_samples, right_samples): (Vec<&LabeledSample>, Vec<&LabeledSample>) = samples
        .iter()
        .copied()
        .partition(|s| feature_value(s, feature) <= threshold);

    let remaining: Vec<&str> = features
        .iter()
        .copied()
        .filter(|f| *f != feature)
        .collect();

    DecisionNode::Split {
        feature: feature.to_owned(),
        threshold,
        left: Box::new(grow_node(&left_samples, &remaining, next_leaf_id)),
        right: Box::new(grow_node(&right_samples, &remaining, next_leaf_id)),
    }
}

fn new_leaf(next_leaf_id: &mut u32, label: Team) -> DecisionNode {
    let id = *next_leaf_id;
    *next_leaf_id += 1;
    DecisionNode::Leaf { id, label }
}

/// Best (feature index, threshold) by maximum information gain, or `None`
/// when no feature admits a threshold with two non-empty partitions.
fn best_split(
    samples: &[&LabeledSample],
    features: &[&str],
    parent: &ClassCounts<Team>,
) -> Option<(usize, f64)> {
    let mut best: Option<(f64, usize, f64)> = None;

    for (feature_index, feature) in features.iter().enumerate() {
        let mut order: Vec<(f64, Team)> = samples
            .iter()
            .map(|s| (feature_value(s, feature), s.label()))
            .collect();
        order.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left = ClassCounts::new();
        let mut right: ClassCounts<Team> = order.iter().map(|(_, label)| *label).collect();

        for pair in 0..order.len() - 1 {
            let (value, label) = order[pair];
            left.add(label);
            right.remove(&label);
            if value == order[pair + 1].0 {
                continue;
            }

            let threshold = (value + order[pair + 1].0) / 2.0;
            let gain = information_gain(parent, &left, &right);
            if best.is_none_or(|(best_gain, ..)| gain > best_gain) {
                best = Some((gain, feature_index, threshold));
            }
        }
    }

    best.map(|(_, feature_index, threshold)| (feature_index, threshold))
}

fn feature_value(sample: &LabeledSample, feature: &str) -> f64 {
    sample
        .value(feature)
        .expect("table invariant: every sample carries every listed feature")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn sample(label: Team, values: &[(&str, f64)]) -> LabeledSample {
        LabeledSample::new(
            label,
            values
                .iter()
                .map(|(name, value)| ((*name).to_owned(), *value))
                .collect(),
        )
    }

    fn table(feature_names: &[&str], samples: Vec<LabeledSample>) -> SampleTable {
        SampleTable::new(
            feature_names.iter().map(|n| (*n).to_owned()).collect(),
            samples,
        )
    }

    #[test]
    fn test_single_class_collapses_to_leaf() {
        let samples = (0..5)
            .map(|i| sample(Team::T1, &[("f", f64::from(i))]))
            .collect();
        let tree = DecisionTree::grow(&table(&["f"], samples));
        assert_eq!(
            *tree.root(),
            DecisionNode::Leaf {
                id: 0,
                label: Team::T1
            }
        );
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_clean_binary_split() {
        let samples = vec![
            sample(Team::T1, &[("f", 0.0)]),
            sample(Team::T1, &[("f", 1.0)]),
            sample(Team::T2, &[("f", 8.0)]),
            sample(Team::T2, &[("f", 9.0)]),
        ];
        let t = table(&["f"], samples);
        let tree = DecisionTree::grow(&t);

        let DecisionNode::Split {
            feature,
            threshold,
            left,
            right,
        } = tree.root()
        else {
            panic!("expected a split at the root");
        };
        assert_eq!(feature, "f");
        assert_eq!(*threshold, 4.5);
        assert!(matches!(
            left.as_ref(),
            DecisionNode::Leaf {
                label: Team::T1,
                ..
            }
        ));
        assert!(matches!(
            right.as_ref(),
            DecisionNode::Leaf {
                label: Team::T2,
                ..
            }
        ));
        assert_eq!(tree.accuracy(&t).unwrap(), 1.0);
    }

    #[test]
    fn test_full_purity_gives_perfect_training_accuracy() {
        let samples = vec![
            sample(Team::T1, &[("a", 0.0), ("b", 5.0)]),
            sample(Team::T2, &[("a", 1.0), ("b", 5.0)]),
            sample(Team::T1, &[("a", 2.0), ("b", 1.0)]),
            sample(Team::T2, &[("a", 3.0), ("b", 9.0)]),
        ];
        let t = table(&["a", "b"], samples);
        let tree = DecisionTree::grow(&t);
        assert_eq!(tree.accuracy(&t).unwrap(), 1.0);
    }

    #[test]
    fn test_constant_features_fall_back_to_majority_leaf() {
        let samples = vec![
            sample(Team::T2, &[("f", 1.0)]),
            sample(Team::T2, &[("f", 1.0)]),
            sample(Team::T1, &[("f", 1.0)]),
        ];
        let tree = DecisionTree::grow(&table(&["f"], samples));
        assert!(matches!(
            tree.root(),
            DecisionNode::Leaf {
                label: Team::T2,
                ..
            }
        ));
    }

    #[test]
    fn test_split_tie_break_prefers_first_feature() {
        // both features separate the classes equally well
        let samples = vec![
            sample(Team::T1, &[("a", 0.0), ("b", 0.0)]),
            sample(Team::T2, &[("a", 1.0), ("b", 1.0)]),
        ];
        let tree = DecisionTree::grow(&table(&["b", "a"], samples));
        let DecisionNode::Split { feature, .. } = tree.root() else {
            panic!("expected a split at the root");
        };
        assert_eq!(feature, "b");
    }

    #[test]
    fn test_predict_missing_feature_is_an_error() {
        let samples = vec![
            sample(Team::T1, &[("f", 0.0)]),
            sample(Team::T2, &[("f", 1.0)]),
        ];
        let tree = DecisionTree::grow(&table(&["f"], samples));

        let stranger = sample(Team::T1, &[("g", 0.0)]);
        let err = tree.predict(&stranger).unwrap_err();
        assert_eq!(err.feature, "f");
    }

    #[test]
    fn test_information_gain_is_non_negative() {
        let parent: ClassCounts<Team> = [Team::T1, Team::T1, Team::T2, Team::T2]
            .into_iter()
            .collect();
        let left: ClassCounts<Team> = [Team::T1, Team::T2].into_iter().collect();
        let right: ClassCounts<Team> = [Team::T1, Team::T2].into_iter().collect();
        // the least informative partition still has zero gain
        assert_eq!(information_gain(&parent, &left, &right), 0.0);

        let left: ClassCounts<Team> = [Team::T1, Team::T1].into_iter().collect();
        let right: ClassCounts<Team> = [Team::T2, Team::T2].into_iter().collect();
        assert_eq!(information_gain(&parent, &left, &right), 1.0);
    }

    #[test]
    fn test_cross_validate_leaves_table_unchanged() {
        let samples: Vec<_> = (0..8)
            .map(|i| {
                let team = if i < 4 { Team::T1 } else { Team::T2 };
                sample(team, &[("f", f64::from(i))])
            })
            .collect();
        let t = table(&["f"], samples);
        let before = t.clone();

        let mean = DecisionTree::cross_validate(&t, 4).unwrap();
        assert!((0.0..=1.0).contains(&mean));
        assert_eq!(t, before);
    }

    #[test]
    fn test_cross_validate_on_separable_data_is_perfect() {
        // alternate classes so every round-robin fold sees both
        let samples: Vec<_> = (0..12)
            .map(|i| {
                let team = if i % 2 == 0 { Team::T1 } else { Team::T2 };
                let value = if i % 2 == 0 { 0.0 } else { 10.0 };
                sample(team, &[("f", value + f64::from(i) * 0.01)])
            })
            .collect();
        let mean = DecisionTree::cross_validate(&table(&["f"], samples), 3).unwrap();
        assert_eq!(mean, 1.0);
    }

    #[test]
    fn test_display_renders_threshold_lines() {
        let samples = vec![
            sample(Team::T1, &[("f", 0.0)]),
            sample(Team::T2, &[("f", 1.0)]),
        ];
        let tree = DecisionTree::grow(&table(&["f"], samples));
        let rendered = tree.to_string();
        assert_eq!(rendered, "f <= 0.5 : T1\nf > 0.5 : T2\n");
    }

    #[test]
    fn test_serde_roundtrip() {
        let samples = vec![
            sample(Team::T1, &[("f", 0.0)]),
            sample(Team::T2, &[("f", 1.0)]),
        ];
        let tree = DecisionTree::grow(&table(&["f"], samples));
        let json = serde_json::to_string(&tree).unwrap();
        let back: DecisionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
