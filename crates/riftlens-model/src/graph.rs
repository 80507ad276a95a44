//! Directed interaction graphs over the fixed 11-vertex universe.
//!
//! Vertex membership and adjacency are bitmasks over the canonical vertex
//! order, so graph equality is plain value equality and induced subgraphs
//! and unions are mask operations.

use crate::vertex::{VERTEX_COUNT, VertexLabel};

/// A subset of the fixed vertex universe, one bit per canonical vertex index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VertexSet(u16);

const FULL_MASK: u16 = (1 << VERTEX_COUNT) - 1;

impl VertexSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        VertexSet(0)
    }

    /// The full 11-vertex universe.
    #[must_use]
    pub const fn full() -> Self {
        VertexSet(FULL_MASK)
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn insert(&mut self, vertex: VertexLabel) {
        self.0 |= 1 << vertex.index();
    }

    #[must_use]
    pub const fn contains(self, vertex: VertexLabel) -> bool {
        self.0 & (1 << vertex.index()) != 0
    }

    /// Whether every vertex of `other` is also in `self`.
    #[must_use]
    pub const fn contains_all(self, other: VertexSet) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn intersection(self, other: VertexSet) -> VertexSet {
        VertexSet(self.0 & other.0)
    }

    #[must_use]
    pub const fn union(self, other: VertexSet) -> VertexSet {
        VertexSet(self.0 | other.0)
    }

    /// Iterates the member vertices in canonical order.
    pub fn iter(self) -> impl Iterator<Item = VertexLabel> {
        VertexLabel::ALL
            .into_iter()
            .filter(move |v| self.contains(*v))
    }

    /// Enumerates every non-empty subset of this set.
    ///
    /// Uses the standard decreasing submask walk, so at most `2^11 - 1`
    /// subsets are produced for the full universe.
    pub fn non_empty_subsets(self) -> impl Iterator<Item = VertexSet> {
        let mask = self.0;
        let mut next = if mask == 0 { None } else { Some(mask) };
        std::iter::from_fn(move || {
            let cur = next?;
            next = match (cur - 1) & mask {
                0 => None,
                sub => Some(sub),
            };
            Some(VertexSet(cur))
        })
    }
}

impl FromIterator<VertexLabel> for VertexSet {
    fn from_iter<I: IntoIterator<Item = VertexLabel>>(iter: I) -> Self {
        let mut set = VertexSet::empty();
        for vertex in iter {
            set.insert(vertex);
        }
        set
    }
}

/// A directed graph of interactions within one time frame.
///
/// Externally built input graphs always carry the full universe as vertices
/// (all 11 labels present even when isolated); only the edge set varies.
/// Induced subgraphs and mined pattern graphs may carry any vertex subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractionGraph {
    vertices: VertexSet,
    adjacency: [u16; VERTEX_COUNT],
}

impl InteractionGraph {
    /// A graph with no vertices and no edges.
    #[must_use]
    pub const fn empty() -> Self {
        InteractionGraph {
            vertices: VertexSet::empty(),
            adjacency: [0; VERTEX_COUNT],
        }
    }

    /// A graph with the full vertex universe and no edges.
    ///
    /// This is the starting point for externally built per-frame graphs, and
    /// also the graph of a time frame past a game's recorded duration.
    #[must_use]
    pub const fn universe() -> Self {
        InteractionGraph {
            vertices: VertexSet::full(),
            adjacency: [0; VERTEX_COUNT],
        }
    }

    #[must_use]
    pub const fn vertex_set(&self) -> VertexSet {
        self.vertices
    }

    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .map(|row| row.count_ones() as usize)
            .sum()
    }

    pub const fn insert_vertex(&mut self, vertex: VertexLabel) {
        self.vertices.insert(vertex);
    }

    /// Adds the directed edge `from -> to`, inserting both endpoints.
    pub const fn add_edge(&mut self, from: VertexLabel, to: VertexLabel) {
        self.vertices.insert(from);
        self.vertices.insert(to);
        self.adjacency[from.index()] |= 1 << to.index();
    }

    #[must_use]
    pub const fn contains_vertex(&self, vertex: VertexLabel) -> bool {
        self.vertices.contains(vertex)
    }

    #[must_use]
    pub const fn has_edge(&self, from: VertexLabel, to: VertexLabel) -> bool {
        self.adjacency[from.index()] & (1 << to.index()) != 0
    }

    /// Iterates the vertices in canonical order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexLabel> {
        self.vertices.iter()
    }

    /// Iterates the directed edges in canonical (source, target) order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexLabel, VertexLabel)> + '_ {
        self.vertices().flat_map(move |from| {
            VertexLabel::ALL
                .into_iter()
                .filter(move |to| self.has_edge(from, *to))
                .map(move |to| (from, to))
        })
    }

    /// The subgraph induced by `subset`: its vertices restricted to this
    /// graph's vertex set, plus every edge with both endpoints inside.
    #[must_use]
    pub fn induced(&self, subset: VertexSet) -> InteractionGraph {
        let vertices = subset.intersection(self.vertices);
        let mut adjacency = [0; VERTEX_COUNT];
        for v in vertices.iter() {
            adjacency[v.index()] = self.adjacency[v.index()] & vertices.bits();
        }
        InteractionGraph {
            vertices,
            adjacency,
        }
    }

    /// Whether the graph is weakly connected (connected once edge direction
    /// is ignored). The empty graph is not connected; a single isolated
    /// vertex is.
    #[must_use]
    pub fn is_weakly_connected(&self) -> bool {
        let verts = self.vertices.bits();
        if verts == 0 {
            return false;
        }

        let mut undirected = [0u16; VERTEX_COUNT];
        for from in 0..VERTEX_COUNT {
            let row = self.adjacency[from];
            undirected[from] |= row;
            for to in 0..VERTEX_COUNT {
                if row & (1 << to) != 0 {
                    undirected[to] |= 1 << from;
                }
            }
        }

        let mut seen = 1u16 << verts.trailing_zeros();
        let mut frontier = seen;
        while frontier != 0 {
            let mut next = 0;
            for i in 0..VERTEX_COUNT {
                if frontier & (1 << i) != 0 {
                    next |= undirected[i];
                }
            }
            next &= verts & !seen;
            seen |= next;
            frontier = next;
        }
        seen == verts
    }

    /// Merges `other` into this graph, taking the union of vertex and edge
    /// sets.
    pub fn merge(&mut self, other: &InteractionGraph) {
        self.vertices = self.vertices.union(other.vertices);
        for i in 0..VERTEX_COUNT {
            self.adjacency[i] |= other.adjacency[i];
        }
    }
}
