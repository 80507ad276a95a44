//! Statistical helpers for the riftlens pipeline.
//!
//! This crate is dependency-free and provides the small amount of statistics
//! the rest of the workspace shares:
//!
//! - [`descriptive`]: summary statistics (min, max, mean, median, standard
//!   deviation) used for per-generation fitness reporting
//! - [`frequency`]: insertion-ordered class frequency counts providing the
//!   majority vote and entropy used by decision-tree induction
//!
//! # Examples
//!
//! ```
//! use riftlens_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```
//!
//! ```
//! use riftlens_stats::frequency::ClassCounts;
//!
//! let counts: ClassCounts<&str> = ["a", "b", "a"].into_iter().collect();
//! assert_eq!(counts.majority(), Some(&"a"));
//! ```

pub mod descriptive;
pub mod frequency;
