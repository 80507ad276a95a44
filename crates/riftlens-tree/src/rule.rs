//! Per-leaf classification rules derived from a trained tree.
//!
//! Extraction replays every sample of a table through the tree with the same
//! comparisons prediction uses, records the branch taken at each internal
//! node, and groups the resulting root-to-leaf paths by leaf id. Each group
//! becomes one [`Rule`] carrying its support (samples reaching the leaf) and
//! confidence (fraction of those whose label matches the leaf).

use std::{collections::BTreeMap, fmt};

use riftlens_model::Team;
use serde::{Deserialize, Serialize};

use crate::{
    sample::{LabeledSample, SampleTable},
    tree::{DecisionNode, DecisionTree, MissingFeatureError},
};

/// One step of a root-to-leaf path: the branch taken at an internal node, or
/// the terminal leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "branch", rename_all = "lowercase")]
pub enum RuleStep {
    /// Took the `value <= threshold` branch.
    Le { feature: String, threshold: f64 },
    /// Took the `value > threshold` branch.
    Gt { feature: String, threshold: f64 },
    /// Reached the terminal leaf.
    Leaf { label: Team },
}

/// A classification rule: the full path to one leaf plus its aggregate
/// support and confidence over the extraction table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Build-time id of the leaf this rule ends in.
    pub leaf_id: u32,
    /// Ordered steps from the root, ending with [`RuleStep::Leaf`].
    pub steps: Vec<RuleStep>,
    /// Number of samples that reached the leaf.
    pub support: usize,
    /// Fraction of those samples whose label equals the leaf label.
    pub confidence: f64,
}

impl Rule {
    /// The class this rule predicts.
    ///
    /// # Panics
    ///
    /// Panics if the rule has no terminal leaf step, which extraction never
    /// produces.
    #[must_use]
    pub fn label(&self) -> Team {
        match self.steps.last() {
            Some(RuleStep::Leaf { label }) => *label,
            _ => panic!("rule does not end in a leaf step"),
        }
    }

    /// Whether `sample` satisfies every comparison of this rule and carries
    /// the rule's predicted label.
    pub fn matches(&self, sample: &LabeledSample) -> Result<bool, MissingFeatureError> {
        for step in &self.steps {
            let holds = match step {
                RuleStep::Le { feature, threshold } => {
                    feature_value(sample, feature)? <= *threshold
                }
                RuleStep::Gt { feature, threshold } => {
                    feature_value(sample, feature)? > *threshold
                }
                RuleStep::Leaf { label } => sample.label() == *label,
            };
            if !holds {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn feature_value(sample: &LabeledSample, feature: &str) -> Result<f64, MissingFeatureError> {
    sample.value(feature).ok_or_else(|| MissingFeatureError {
        feature: feature.to_owned(),
    })
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF ")?;
        for step in &self.steps {
            match step {
                RuleStep::Le { feature, threshold } => write!(f, "{feature} <= {threshold} & ")?,
                RuleStep::Gt { feature, threshold } => write!(f, "{feature} > {threshold} & ")?,
                RuleStep::Leaf { label } => write!(f, "THEN {label} wins")?,
            }
        }
        write!(
            f,
            " (support: {}, confidence: {:.2})",
            self.support, self.confidence
        )
    }
}

/// Extracts the rules of `tree` over `table`, keeping only those with
/// support at least `min_support` and confidence at least `min_confidence`.
///
/// Rules are recomputed fresh per call and returned in leaf-id order.
#[expect(clippy::cast_precision_loss)]
pub fn extract_rules(
    tree: &DecisionTree,
    table: &SampleTable,
    min_confidence: f64,
    min_support: usize,
) -> Result<Vec<Rule>, MissingFeatureError> {
    struct LeafGroup {
        steps: Vec<RuleStep>,
        label: Team,
        support: usize,
        hits: usize,
    }

    let mut groups: BTreeMap<u32, LeafGroup> = BTreeMap::new();
    for sample in table.samples() {
        let (leaf_id, label, steps) = trace_path(tree.root(), sample)?;
        let group = groups.entry(leaf_id).or_insert(LeafGroup {
            steps,
            label,
            support: 0,
            hits: 0,
        });
        group.support += 1;
        if sample.label() == group.label {
            group.hits += 1;
        }
    }

    Ok(groups
        .into_iter()
        .map(|(leaf_id, group)| Rule {
            leaf_id,
            steps: group.steps,
            support: group.support,
            confidence: group.hits as f64 / group.support as f64,
        })
        .filter(|rule| rule.support >= min_support && rule.confidence >= min_confidence)
        .collect())
}

/// Replays `sample` from `node` to a leaf, recording each branch taken.
fn trace_path(
    node: &DecisionNode,
    sample: &LabeledSample,
) -> Result<(u32, Team, Vec<RuleStep>), MissingFeatureError> {
    let mut steps = Vec::new();
    let mut node = node;
    loop {
        match node {
            DecisionNode::Leaf { id, label } => {
                steps.push(RuleStep::Leaf { label: *label });
                return Ok((*id, *label, steps));
            }
            DecisionNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let value = feature_value(sample, feature)?;
                if value <= *threshold {
                    steps.push(RuleStep::Le {
                        feature: feature.clone(),
                        threshold: *threshold,
                    });
                    node = left.as_ref();
                } else {
                    steps.push(RuleStep::Gt {
                        feature: feature.clone(),
                        threshold: *threshold,
                    });
                    node = right.as_ref();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn sample(label: Team, value: f64) -> LabeledSample {
        LabeledSample::new(label, HashMap::from([("f".to_owned(), value)]))
    }

    fn split_table() -> SampleTable {
        SampleTable::new(
            vec!["f".to_owned()],
            vec![
                sample(Team::T1, 0.0),
                sample(Team::T1, 1.0),
                sample(Team::T2, 8.0),
                sample(Team::T2, 9.0),
            ],
        )
    }

    #[test]
    fn test_extracts_one_rule_per_leaf() {
        let table = split_table();
        let tree = DecisionTree::grow(&table);
        let rules = extract_rules(&tree, &table, 0.0, 0).unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].label(), Team::T1);
        assert_eq!(rules[1].label(), Team::T2);
        for rule in &rules {
            assert_eq!(rule.support, 2);
            assert_eq!(rule.confidence, 1.0);
            assert_eq!(rule.steps.len(), 2);
        }
        assert_ne!(rules[0].leaf_id, rules[1].leaf_id);
    }

    #[test]
    fn test_support_and_confidence_thresholds_filter() {
        let table = SampleTable::new(
            vec!["f".to_owned()],
            vec![
                sample(Team::T1, 0.0),
                sample(Team::T1, 1.0),
                sample(Team::T2, 8.0),
            ],
        );
        let tree = DecisionTree::grow(&table);

        let by_support = extract_rules(&tree, &table, 0.0, 2).unwrap();
        assert_eq!(by_support.len(), 1);
        assert_eq!(by_support[0].label(), Team::T1);

        // replaying a disagreeing sample drops confidence below 1.0
        let skewed = SampleTable::new(
            vec!["f".to_owned()],
            vec![sample(Team::T1, 0.0), sample(Team::T2, 1.0)],
        );
        let rules = extract_rules(&tree, &skewed, 1.0, 0).unwrap();
        assert_eq!(rules.len(), 0);
        let rules = extract_rules(&tree, &skewed, 0.5, 0).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].confidence, 0.5);
    }

    #[test]
    fn test_rule_matches_requires_comparisons_and_label() {
        let table = split_table();
        let tree = DecisionTree::grow(&table);
        let rules = extract_rules(&tree, &table, 0.0, 0).unwrap();
        let t1_rule = &rules[0];

        assert!(t1_rule.matches(&sample(Team::T1, 0.5)).unwrap());
        // value on the wrong side of the threshold
        assert!(!t1_rule.matches(&sample(Team::T1, 9.0)).unwrap());
        // label disagrees with the leaf
        assert!(!t1_rule.matches(&sample(Team::T2, 0.5)).unwrap());
    }

    #[test]
    fn test_leaf_labels_come_from_reaching_samples() {
        // noisy data: no pure leaves, but every leaf's label is still the
        // label of at least one sample that reaches it
        let table = SampleTable::new(
            vec!["f".to_owned()],
            vec![
                sample(Team::T1, 0.0),
                sample(Team::T1, 1.0),
                sample(Team::T2, 1.0),
                sample(Team::T2, 8.0),
                sample(Team::T1, 9.0),
            ],
        );
        let tree = DecisionTree::grow(&table);
        let rules = extract_rules(&tree, &table, 0.0, 0).unwrap();
        assert!(!rules.is_empty());
        for rule in &rules {
            assert!(rule.confidence > 0.0);
        }
    }

    #[test]
    fn test_rule_matches_missing_feature_is_an_error() {
        let table = split_table();
        let tree = DecisionTree::grow(&table);
        let rules = extract_rules(&tree, &table, 0.0, 0).unwrap();

        let stranger = LabeledSample::new(Team::T1, HashMap::new());
        assert!(rules[0].matches(&stranger).is_err());
    }

    #[test]
    fn test_display_renders_if_then_line() {
        let table = split_table();
        let tree = DecisionTree::grow(&table);
        let rules = extract_rules(&tree, &table, 0.0, 0).unwrap();
        assert_eq!(
            rules[0].to_string(),
            "IF f <= 4.5 & THEN T1 wins (support: 2, confidence: 1.00)"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let table = split_table();
        let tree = DecisionTree::grow(&table);
        let rules = extract_rules(&tree, &table, 0.0, 0).unwrap();
        let json = serde_json::to_string(&rules).unwrap();
        let back: Vec<Rule> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rules);
    }
}
