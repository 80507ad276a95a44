//! Genetic search over the combinatorial feature space of match metrics.
//!
//! A candidate feature is a (metric kind, vertex label, time frame) triple:
//! "closeness of T2-R4 in time frame 12" is one feature. With 5 metric
//! kinds, 11 vertex labels, and a per-dataset number of time frames, the
//! space of feature subsets is far too large to scan, so this crate evolves
//! bitstring-encoded subsets with a genetic algorithm.
//!
//! # How the Search Works
//!
//! 1. **Population** - individuals start with exactly one random feature bit
//!    set ([`genetic::Individual`])
//! 2. **Fitness** - each individual's feature subset is materialized into a
//!    sample table over all games and scored by the in-sample accuracy of a
//!    freshly grown decision tree, minus a complexity penalty that grows
//!    exponentially with the subset size ([`genetic::ComplexityPenalty`])
//! 3. **Selection** - rank selection over the non-elite population with
//!    linearly decreasing weights
//! 4. **Crossover** - two-point outer/inner segment exchange at a fixed
//!    crossover rate ([`genome::splice`])
//! 5. **Mutation** - independent per-bit flips
//! 6. **Elitism** - the two fittest individuals survive unchanged
//!
//! Fitness evaluation is embarrassingly parallel and is fanned out across
//! scoped threads over population shards; per-generation statistics are
//! reported via [`genetic::GenerationStats`], including the "true max"
//! (best fitness with its penalty added back) used for convergence
//! tracking.
//!
//! # Modules
//!
//! - [`feature_space`] - triple/bit-index addressing and sample-table
//!   materialization
//! - [`genome`] - fixed-length bitstrings and their genetic operators
//! - [`genetic`] - population, fitness, selection, and generation stepping

pub mod feature_space;
pub mod genetic;
pub mod genome;
