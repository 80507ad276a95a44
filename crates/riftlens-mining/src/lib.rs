//! Frequent-subgraph mining over the fixed interaction-graph universe.
//!
//! This crate finds the interaction patterns that recur across the per-frame
//! graphs of a set of games. Because the vertex universe is fixed and small
//! (11 labels), mining is exact:
//!
//! - [`encoding::CanonicalEncoding`] gives every graph a lossless 132-bit
//!   identity key (11 presence bits plus 11 x 11 adjacency bits), so
//!   structural equality is integer equality rather than isomorphism
//!   checking
//! - [`miner::mine`] enumerates every vertex-induced subgraph of every input
//!   graph (at most `2^11` subsets each), keeps the weakly connected ones
//!   containing all required anchor vertices, counts occurrences per
//!   encoding, and unions every pattern meeting the support threshold into
//!   one result graph
//!
//! Each per-time-frame invocation is pure in its inputs, so
//! [`miner::mine_time_frames`] fans the frames out across scoped worker
//! threads and reassembles the results in frame order.

pub mod encoding;
pub mod miner;
