//! Labeled feature rows and the tables the tree engine trains on.

use std::collections::HashMap;

use riftlens_model::Team;

/// One labeled training or evaluation entity (a game): a mapping from feature
/// name to numeric value plus the match-outcome class.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    label: Team,
    values: HashMap<String, f64>,
}

impl LabeledSample {
    #[must_use]
    pub fn new(label: Team, values: HashMap<String, f64>) -> Self {
        LabeledSample { label, values }
    }

    #[must_use]
    pub fn label(&self) -> Team {
        self.label
    }

    /// The value of `feature`, or `None` if the sample does not carry it.
    #[must_use]
    pub fn value(&self, feature: &str) -> Option<f64> {
        self.values.get(feature).copied()
    }
}

/// An ordered collection of samples plus the feature names they carry.
///
/// The feature name order is the caller's order and fixes the tie-break order
/// of the split search.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    feature_names: Vec<String>,
    samples: Vec<LabeledSample>,
}

impl SampleTable {
    /// Builds a table from feature names and samples.
    ///
    /// # Panics
    ///
    /// Panics if any sample is missing a value for any listed feature.
    #[must_use]
    pub fn new(feature_names: Vec<String>, samples: Vec<LabeledSample>) -> Self {
        for sample in &samples {
            for feature in &feature_names {
                assert!(
                    sample.value(feature).is_some(),
                    "sample is missing a value for feature {feature:?}"
                );
            }
        }
        SampleTable {
            feature_names,
            samples,
        }
    }

    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    #[must_use]
    pub fn samples(&self) -> &[LabeledSample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_lookup() {
        let sample = LabeledSample::new(Team::T1, HashMap::from([("f".to_owned(), 2.5)]));
        assert_eq!(sample.value("f"), Some(2.5));
        assert_eq!(sample.value("g"), None);
        assert_eq!(sample.label(), Team::T1);
    }

    #[test]
    #[should_panic(expected = "missing a value")]
    fn test_table_rejects_incomplete_samples() {
        let sample = LabeledSample::new(Team::T1, HashMap::new());
        let _ = SampleTable::new(vec!["f".to_owned()], vec![sample]);
    }
}
