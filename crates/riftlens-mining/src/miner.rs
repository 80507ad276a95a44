//! Frequent-subgraph mining with anchor conditioning.

use std::{collections::HashMap, thread};

use riftlens_model::{InteractionGraph, VertexLabel, VertexSet};

use crate::encoding::CanonicalEncoding;

/// Mines the frequent connected patterns of `graphs`.
///
/// For every input graph, every non-empty vertex subset whose induced
/// subgraph is weakly connected and contains all of `required_vertices` is
/// counted, keyed by canonical encoding. The result is the union of the
/// node and edge sets of every distinct pattern occurring at least
/// `min_support` times; it may be disconnected.
///
/// Mining is defined only relative to anchor vertices: an empty
/// `required_vertices` disables mining and yields the empty graph without
/// enumerating anything.
#[must_use]
pub fn mine(
    graphs: &[InteractionGraph],
    min_support: usize,
    required_vertices: &[VertexLabel],
) -> InteractionGraph {
    let mut frequent = InteractionGraph::empty();
    if required_vertices.is_empty() {
        return frequent;
    }
    let required: VertexSet = required_vertices.iter().copied().collect();

    let mut counter: HashMap<CanonicalEncoding, (usize, InteractionGraph)> = HashMap::new();
    for graph in graphs {
        for subset in graph.vertex_set().non_empty_subsets() {
            if !subset.contains_all(required) {
                continue;
            }
            let subgraph = graph.induced(subset);
            if !subgraph.is_weakly_connected() {
                continue;
            }
            counter
                .entry(CanonicalEncoding::encode(&subgraph))
                .or_insert((0, subgraph))
                .0 += 1;
        }
    }

    for (support, subgraph) in counter.values() {
        if *support >= min_support {
            frequent.merge(subgraph);
        }
    }
    frequent
}

/// One time frame's mining input.
#[derive(Debug, Clone)]
pub struct FrameTask {
    /// The per-game interaction graphs of this time frame.
    pub graphs: Vec<InteractionGraph>,
    /// Minimum occurrence count for a pattern to survive.
    pub min_support: usize,
    /// Anchor vertices every pattern must contain.
    pub required_vertices: Vec<VertexLabel>,
}

/// Mines every time frame of `tasks` across at most `workers` scoped
/// threads.
///
/// Each task is pure in its inputs and independent of the others; results
/// are written into slots addressed by frame index, so the returned vector
/// is in frame order regardless of completion order. A panicking worker
/// propagates out of the scope and aborts the whole batch.
///
/// # Panics
///
/// Panics if `workers` is zero or any worker panics.
#[must_use]
pub fn mine_time_frames(tasks: &[FrameTask], workers: usize) -> Vec<InteractionGraph> {
    assert!(workers > 0, "worker count must be positive");
    if tasks.is_empty() {
        return Vec::new();
    }

    let chunk_len = tasks.len().div_ceil(workers);
    let mut results: Vec<Option<InteractionGraph>> = vec![None; tasks.len()];
    thread::scope(|s| {
        for (task_chunk, result_chunk) in
            std::iter::zip(tasks.chunks(chunk_len), results.chunks_mut(chunk_len))
        {
            s.spawn(move || {
                for (task, slot) in std::iter::zip(task_chunk, result_chunk) {
                    *slot = Some(mine(&task.graphs, task.min_support, &task.required_vertices));
                }
            });
        }
    });
    results
        .into_iter()
        .map(|slot| slot.expect("every frame slot is filled by its worker"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_edges(edges: &[(VertexLabel, VertexLabel)]) -> InteractionGraph {
        let mut graph = InteractionGraph::universe();
        for (from, to) in edges {
            graph.add_edge(*from, *to);
        }
        graph
    }

    #[test]
    fn test_empty_required_vertices_disables_mining() {
        let graph = graph_with_edges(&[(VertexLabel::T1R1, VertexLabel::T2R1)]);
        let result = mine(&[graph], 1, &[]);
        assert_eq!(result.vertex_count(), 0);
        assert_eq!(result.edge_count(), 0);
    }

    #[test]
    fn test_single_edge_is_found_from_anchor() {
        let graph = graph_with_edges(&[(VertexLabel::T1R1, VertexLabel::T2R1)]);
        let result = mine(&[graph], 1, &[VertexLabel::T1R1]);
        assert!(result.has_edge(VertexLabel::T1R1, VertexLabel::T2R1));
        // nothing else is reachable from the anchor
        assert_eq!(result.vertex_count(), 2);
        assert_eq!(result.edge_count(), 1);
    }

    #[test]
    fn test_disconnected_subsets_are_not_counted() {
        // the anchor is isolated, so only the single-vertex pattern survives
        let graph = graph_with_edges(&[(VertexLabel::T1R2, VertexLabel::T2R1)]);
        let result = mine(&[graph], 1, &[VertexLabel::T1R1]);
        assert_eq!(result.vertex_count(), 1);
        assert!(result.contains_vertex(VertexLabel::T1R1));
        assert_eq!(result.edge_count(), 0);
    }

    #[test]
    fn test_min_support_counts_across_graphs() {
        let recurring = graph_with_edges(&[(VertexLabel::T1R1, VertexLabel::T2R1)]);
        let one_off = graph_with_edges(&[
            (VertexLabel::T1R1, VertexLabel::T2R1),
            (VertexLabel::T1R1, VertexLabel::Death),
        ]);

        let graphs = vec![recurring, recurring, one_off];
        let result = mine(&graphs, 3, &[VertexLabel::T1R1]);
        assert!(result.has_edge(VertexLabel::T1R1, VertexLabel::T2R1));
        assert!(!result.has_edge(VertexLabel::T1R1, VertexLabel::Death));
    }

    #[test]
    fn test_lowering_min_support_grows_the_union_monotonically() {
        let a = graph_with_edges(&[(VertexLabel::T1R1, VertexLabel::T2R1)]);
        let b = graph_with_edges(&[(VertexLabel::T1R1, VertexLabel::Death)]);
        let graphs = vec![a, a, b];

        let strict = mine(&graphs, 2, &[VertexLabel::T1R1]);
        let loose = mine(&graphs, 1, &[VertexLabel::T1R1]);

        for vertex in strict.vertices() {
            assert!(loose.contains_vertex(vertex));
        }
        for (from, to) in strict.edges() {
            assert!(loose.has_edge(from, to));
        }
        assert!(loose.has_edge(VertexLabel::T1R1, VertexLabel::Death));
        assert!(!strict.has_edge(VertexLabel::T1R1, VertexLabel::Death));
    }

    #[test]
    fn test_mine_time_frames_preserves_frame_order() {
        let frame0 = FrameTask {
            graphs: vec![graph_with_edges(&[(VertexLabel::T1R1, VertexLabel::T2R1)])],
            min_support: 1,
            required_vertices: vec![VertexLabel::T1R1],
        };
        let frame1 = FrameTask {
            graphs: vec![graph_with_edges(&[(VertexLabel::T2R2, VertexLabel::Death)])],
            min_support: 1,
            required_vertices: vec![VertexLabel::T2R2],
        };
        let frame2 = FrameTask {
            graphs: vec![],
            min_support: 1,
            required_vertices: vec![],
        };

        let results = mine_time_frames(&[frame0, frame1, frame2], 2);
        assert_eq!(results.len(), 3);
        assert!(results[0].has_edge(VertexLabel::T1R1, VertexLabel::T2R1));
        assert!(results[1].has_edge(VertexLabel::T2R2, VertexLabel::Death));
        assert_eq!(results[2].vertex_count(), 0);
    }
}
