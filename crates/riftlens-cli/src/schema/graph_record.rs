use riftlens_model::{InteractionGraph, VertexLabel};
use serde::{Deserialize, Serialize};

/// Wire form of one game's per-time-frame interaction graphs: edge lists
/// over the fixed vertex universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameGraphRecord {
    pub game_id: String,
    pub time_frames: Vec<FrameGraphRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameGraphRecord {
    pub edges: Vec<(VertexLabel, VertexLabel)>,
}

impl GameGraphRecord {
    /// The interaction graph of `frame`.
    ///
    /// Graphs always carry the full vertex universe; a frame past the
    /// recorded duration is the edgeless universe.
    #[must_use]
    pub fn frame_graph(&self, frame: usize) -> InteractionGraph {
        let mut graph = InteractionGraph::universe();
        if let Some(record) = self.time_frames.get(frame) {
            for (from, to) in &record.edges {
                graph.add_edge(*from, *to);
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_graph_past_duration_is_edgeless_universe() {
        let record = GameGraphRecord {
            game_id: "g1".to_owned(),
            time_frames: vec![FrameGraphRecord {
                edges: vec![(VertexLabel::T1R1, VertexLabel::Death)],
            }],
        };

        let recorded = record.frame_graph(0);
        assert!(recorded.has_edge(VertexLabel::T1R1, VertexLabel::Death));
        assert_eq!(recorded.vertex_count(), 11);

        let past = record.frame_graph(3);
        assert_eq!(past.vertex_count(), 11);
        assert_eq!(past.edge_count(), 0);
    }

    #[test]
    fn test_edge_list_deserializes_wire_names() {
        let json = r#"{
            "game_id": "g2",
            "time_frames": [{ "edges": [["T1-R3", "T2-R1"], ["T2-R1", "DEATH"]] }]
        }"#;
        let record: GameGraphRecord = serde_json::from_str(json).unwrap();
        let graph = record.frame_graph(0);
        assert!(graph.has_edge(VertexLabel::T1R3, VertexLabel::T2R1));
        assert!(graph.has_edge(VertexLabel::T2R1, VertexLabel::Death));
    }
}
