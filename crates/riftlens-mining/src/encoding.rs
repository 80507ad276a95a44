//! Exact canonical encoding of interaction graphs.

use riftlens_model::{InteractionGraph, VERTEX_COUNT, VertexLabel};

/// Lossless fixed-width encoding of an [`InteractionGraph`] over the fixed
/// universe: 11 vertex-presence bits and 11 x 11 adjacency bits.
///
/// Since the universe is compile-time fixed, the encoding is a bijection
/// with the (vertex set, edge set) pair: two graphs are structurally equal
/// exactly when their encodings are equal, regardless of construction order.
/// This is the identity key of the pattern occurrence counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalEncoding {
    presence: u16,
    adjacency: u128,
}

impl CanonicalEncoding {
    /// Encodes `graph` into its canonical bit representation.
    #[must_use]
    pub fn encode(graph: &InteractionGraph) -> Self {
        let presence = graph.vertex_set().bits();
        let mut adjacency = 0u128;
        for (from, to) in graph.edges() {
            adjacency |= 1 << (from.index() * VERTEX_COUNT + to.index());
        }
        CanonicalEncoding {
            presence,
            adjacency,
        }
    }

    /// Reconstructs the encoded graph.
    #[must_use]
    pub fn decode(&self) -> InteractionGraph {
        let mut graph = InteractionGraph::empty();
        for vertex in VertexLabel::ALL {
            if self.presence & (1 << vertex.index()) != 0 {
                graph.insert_vertex(vertex);
            }
        }
        for from in VertexLabel::ALL {
            for to in VertexLabel::ALL {
                if self.adjacency & (1 << (from.index() * VERTEX_COUNT + to.index())) != 0 {
                    graph.add_edge(from, to);
                }
            }
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut graph = InteractionGraph::universe();
        graph.add_edge(VertexLabel::T1R1, VertexLabel::T2R2);
        graph.add_edge(VertexLabel::T2R2, VertexLabel::Death);
        graph.add_edge(VertexLabel::T2R5, VertexLabel::T1R3);

        let encoding = CanonicalEncoding::encode(&graph);
        assert_eq!(encoding.decode(), graph);
    }

    #[test]
    fn test_equal_structure_means_equal_encoding() {
        // same vertex and edge sets built in different orders
        let mut a = InteractionGraph::empty();
        a.add_edge(VertexLabel::T1R1, VertexLabel::T2R1);
        a.add_edge(VertexLabel::T1R2, VertexLabel::Death);

        let mut b = InteractionGraph::empty();
        b.insert_vertex(VertexLabel::Death);
        b.add_edge(VertexLabel::T1R2, VertexLabel::Death);
        b.add_edge(VertexLabel::T1R1, VertexLabel::T2R1);

        assert_eq!(CanonicalEncoding::encode(&a), CanonicalEncoding::encode(&b));
    }

    #[test]
    fn test_distinct_structure_means_distinct_encoding() {
        let mut a = InteractionGraph::empty();
        a.add_edge(VertexLabel::T1R1, VertexLabel::T2R1);

        // same vertices, reversed edge
        let mut b = InteractionGraph::empty();
        b.add_edge(VertexLabel::T2R1, VertexLabel::T1R1);
        assert_ne!(CanonicalEncoding::encode(&a), CanonicalEncoding::encode(&b));

        // same edges, one extra isolated vertex
        let mut c = a;
        c.insert_vertex(VertexLabel::Death);
        assert_ne!(CanonicalEncoding::encode(&a), CanonicalEncoding::encode(&c));
    }
}
