use chrono::{DateTime, Utc};
use riftlens_search::feature_space::FeatureTriple;
use serde::{Deserialize, Serialize};

/// Result artifact of a feature search run: the best feature subset found
/// plus enough metadata to reproduce and judge it.
///
/// The tree itself is not stored; induction is deterministic, so consumers
/// regrow it from the games and the feature subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureModel {
    pub trained_at: DateTime<Utc>,
    pub generations: usize,
    pub population: usize,
    /// Penalized fitness of the best individual.
    pub final_fitness: f64,
    /// Raw tree accuracy of the best individual (penalty added back).
    pub true_fitness: f64,
    pub features: Vec<FeatureTriple>,
}
