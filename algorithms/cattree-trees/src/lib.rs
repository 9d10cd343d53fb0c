//!
//! # Decision tree learning on categorical data
//! `cattree-trees` provides a pure Rust implementation of multi-way decision trees for
//! datasets where every attribute, the decision included, takes values from a finite set.
//!
//! # The big picture
//!
//! `cattree-trees` is the learning crate of the cattree workspace. It builds on the
//! [`Dataset`](cattree::Dataset) of the `cattree` crate and is complemented by
//! `cattree-datasets` for reading delimited files.
//!
//! Trees are grown greedily: every node splits on the attribute with the largest gain ratio and
//! gets one child per observed value of that attribute. Grown trees can be pruned either by the
//! agreement of sibling leaves or against held-out validation rows.
//!
//! # Current state
//!
//! `cattree-trees` currently provides
//! * an [implementation](DecisionTree) of single-tree fitting and prediction
//! * frequency and validation pruning
//! * a plain [text rendering](TextDump) of fitted trees
//! * the [`train_and_test`], [`train_and_test_v2`] and [`cross_validation`] evaluation harnesses
//!

mod decision_trees;

pub use decision_trees::*;

// Re-export the common Result alias for convenience
pub use cattree::error::Result;
