use riftlens_model::{InteractionGraph, VertexLabel};
use serde::{Deserialize, Serialize};

/// Wire form of one time frame's merged pattern graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramePattern {
    pub time_frame: usize,
    pub nodes: Vec<VertexLabel>,
    pub edges: Vec<(VertexLabel, VertexLabel)>,
}

impl FramePattern {
    #[must_use]
    pub fn from_graph(time_frame: usize, graph: &InteractionGraph) -> Self {
        FramePattern {
            time_frame,
            nodes: graph.vertices().collect(),
            edges: graph.edges().collect(),
        }
    }
}
