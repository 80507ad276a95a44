//! Core domain types for match interaction analysis.
//!
//! This crate defines the shared vocabulary of the analysis pipeline:
//!
//! - [`VertexLabel`] / [`Team`] - the fixed 11-label vertex universe of a
//!   5-vs-5 match (five role slots per team plus a `DEATH` sentinel) and the
//!   two outcome classes
//! - [`InteractionGraph`] - a directed graph of per-time-frame interactions
//!   over that fixed universe
//! - [`MetricKind`] / [`FrameMetrics`] / [`GameRecord`] - the per-game,
//!   per-time-frame table of positional metrics supplied by the external
//!   metric computation step
//!
//! # Fixed Universe
//!
//! Every graph in the pipeline lives over the same 11 vertex labels. Input
//! graphs always carry all 11 vertices (only the edge set varies between time
//! frames); induced subgraphs produced by the mining stage may carry fewer.
//! Because the universe is fixed and small, vertex sets and adjacency are
//! represented as bitmasks, which keeps graph equality, induction, and union
//! operations exact and cheap.
//!
//! # Out-of-range Time Frames
//!
//! Games have different durations. When a time frame beyond a game's recorded
//! length is queried, [`GameRecord::metric_value`] substitutes a fixed neutral
//! "void" value per metric kind instead of failing (see
//! [`MetricKind::void_value`]).

pub use self::{graph::*, metrics::*, vertex::*};

pub mod graph;
pub mod metrics;
pub mod vertex;
