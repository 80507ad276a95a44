//! Addressing of the (metric, vertex, time frame) feature space.
//!
//! Genome bit indices map to concrete features through a mixed-radix
//! positional encoding over the three axes, metric kind most significant:
//! `index = (metric * 11 + vertex) * frame_count + frame`. The axes
//! themselves are fixed by the domain; only the number of time frames varies
//! per dataset.

use std::fmt;

use riftlens_model::{GameRecord, METRIC_COUNT, MetricKind, VERTEX_COUNT, VertexLabel};
use riftlens_tree::sample::{LabeledSample, SampleTable};
use serde::{Deserialize, Serialize};

use crate::genome::Genome;

/// One concrete candidate feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureTriple {
    pub metric: MetricKind,
    pub vertex: VertexLabel,
    pub frame: usize,
}

impl FeatureTriple {
    /// The feature name used in sample tables, trees, and rules.
    #[must_use]
    pub fn feature_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FeatureTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} in time frame {}",
            self.metric, self.vertex, self.frame
        )
    }
}

/// The full feature space for a dataset with a fixed number of time frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpace {
    frame_count: usize,
}

impl FeatureSpace {
    /// A space covering time frames `0..frame_count`.
    ///
    /// # Panics
    ///
    /// Panics if `frame_count` is zero.
    #[must_use]
    pub fn new(frame_count: usize) -> Self {
        assert!(frame_count > 0, "feature space needs at least one frame");
        FeatureSpace { frame_count }
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Genome length: the product of the three axis cardinalities.
    #[must_use]
    pub fn genome_len(&self) -> usize {
        METRIC_COUNT * VERTEX_COUNT * self.frame_count
    }

    /// Bit index of `triple`.
    ///
    /// # Panics
    ///
    /// Panics if the triple's frame is outside this space.
    #[must_use]
    pub fn index_of(&self, triple: FeatureTriple) -> usize {
        assert!(triple.frame < self.frame_count, "frame outside this space");
        (triple.metric.index() * VERTEX_COUNT + triple.vertex.index()) * self.frame_count
            + triple.frame
    }

    /// Feature triple at bit index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the genome length.
    #[must_use]
    pub fn triple_at(&self, index: usize) -> FeatureTriple {
        assert!(index < self.genome_len(), "bit index outside this space");
        let frame = index % self.frame_count;
        let rest = index / self.frame_count;
        let vertex = VertexLabel::ALL[rest % VERTEX_COUNT];
        let metric = MetricKind::ALL[rest / VERTEX_COUNT];
        FeatureTriple {
            metric,
            vertex,
            frame,
        }
    }

    /// The feature subset a genome encodes, in ascending bit-index order.
    #[must_use]
    pub fn decode(&self, genome: &Genome) -> Vec<FeatureTriple> {
        genome.ones().map(|index| self.triple_at(index)).collect()
    }
}

/// Materializes the sample table of `features` over `games`.
///
/// One row per game, labeled with the winner; each feature value is looked
/// up in the game's metric table, with the void value substituted for frames
/// past the game's recorded duration.
#[must_use]
pub fn materialize(games: &[GameRecord], features: &[FeatureTriple]) -> SampleTable {
    let feature_names: Vec<String> = features.iter().map(FeatureTriple::feature_name).collect();
    let samples = games
        .iter()
        .map(|game| {
            let values = std::iter::zip(&feature_names, features)
                .map(|(name, triple)| {
                    let value = game.metric_value(triple.metric, triple.vertex, triple.frame);
                    (name.clone(), value)
                })
                .collect();
            LabeledSample::new(game.winner, values)
        })
        .collect();
    SampleTable::new(feature_names, samples)
}
