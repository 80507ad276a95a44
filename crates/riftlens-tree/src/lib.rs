//! Decision-tree induction and rule extraction for match-outcome prediction.
//!
//! This crate implements a C4.5-style inducer specialised to numeric features
//! and binary threshold splits, together with the rule extraction step that
//! turns a trained tree back into per-leaf classification rules.
//!
//! # Components
//!
//! - [`sample`] - labeled numeric feature rows ([`sample::LabeledSample`])
//!   and the table type the engine trains on ([`sample::SampleTable`])
//! - [`tree`] - the [`tree::DecisionTree`] itself: induction, prediction,
//!   in-sample accuracy, and k-fold cross-validation
//! - [`rule`] - [`rule::Rule`] extraction by replaying training samples
//!   through a trained tree
//!
//! # Induction
//!
//! Trees are grown depth-first. A node becomes a leaf when its samples share
//! one class, when no features remain on the path, or when every remaining
//! feature is constant across the partition. Otherwise the split maximising
//! information gain over the candidate thresholds (midpoints between adjacent
//! distinct sorted values of each feature) is chosen, and the chosen feature
//! is removed from the feature set for the subtree below it.
//!
//! All induction entry points are pure functions over an immutable
//! [`sample::SampleTable`]; cross-validation in particular borrows the table
//! and trains fresh trees per fold, so there is no engine state to save and
//! restore around it.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use riftlens_model::Team;
//! use riftlens_tree::{
//!     sample::{LabeledSample, SampleTable},
//!     tree::DecisionTree,
//! };
//!
//! let samples = [(0.0, Team::T1), (1.0, Team::T1), (8.0, Team::T2), (9.0, Team::T2)]
//!     .into_iter()
//!     .map(|(v, team)| LabeledSample::new(team, HashMap::from([("kills".to_owned(), v)])))
//!     .collect();
//! let table = SampleTable::new(vec!["kills".to_owned()], samples);
//!
//! let tree = DecisionTree::grow(&table);
//! assert_eq!(tree.accuracy(&table).unwrap(), 1.0);
//! ```

pub mod rule;
pub mod sample;
pub mod tree;
