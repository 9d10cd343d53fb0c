//! `cattree` provides the building blocks for learning decision trees on categorical data.
//!
//! Every attribute of a dataset, the decision included, takes its values from a finite set of
//! strings. This crate holds the pieces shared by the algorithms of the workspace:
//!
//! * [`Dataset`]: a fixed-schema table of categorical columns with a distinguished decision
//!   column, and the row-range operations (slicing, merging, k-folding) used by evaluation
//!   harnesses
//! * [`error`]: the error taxonomy of the workspace
//! * [`ParamGuard`]: the checked/unchecked hyperparameter pattern
//! * [`traits`]: the `Fit` and `Predict` seams implemented by algorithms
//! * [`metrics`]: one-vs-rest confusion counts with averaged accuracy, recall and precision
//!
//! The tree induction itself lives in `cattree-trees`, loading delimited files in
//! `cattree-datasets`.
//!

pub mod dataset;
pub mod error;
mod metrics_classification;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, Row, DECISION_COLUMN};
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{ConfusionByClass, ConfusionCounts, Metrics};
}
