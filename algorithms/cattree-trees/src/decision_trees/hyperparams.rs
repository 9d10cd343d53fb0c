use cattree::{
    error::{Error, Result},
    ParamGuard,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::DecisionTree;

/// The set of hyperparameters that can be specified for fitting and pruning a
/// [decision tree](struct.DecisionTree.html).
///
/// ### Example
///
/// ```rust
/// use cattree::prelude::*;
/// use cattree_trees::DecisionTree;
///
/// let dataset = Dataset::from_rows(&[
///     ["low", "yes"],
///     ["low", "yes"],
///     ["high", "no"],
///     ["high", "no"],
/// ])
/// .unwrap();
///
/// // Initialize the default set of parameters and change the pruning threshold
/// let params = DecisionTree::params().prune_threshold(0.6);
///
/// let tree = params.fit(&dataset).unwrap();
/// assert_eq!(tree.num_leaves(), 2);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionTreeValidParams {
    stop_threshold: f64,
    prune_threshold: f64,
    validation_ratio: f64,
}

impl DecisionTreeValidParams {
    pub fn stop_threshold(&self) -> f64 {
        self.stop_threshold
    }

    pub fn prune_threshold(&self) -> f64 {
        self.prune_threshold
    }

    pub fn validation_ratio(&self) -> f64 {
        self.validation_ratio
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionTreeParams(DecisionTreeValidParams);

impl DecisionTreeParams {
    pub fn new() -> Self {
        Self(DecisionTreeValidParams {
            stop_threshold: 0.0,
            prune_threshold: 0.75,
            validation_ratio: 0.1,
        })
    }

    /// Sets the gain ratio at or below which a node stops splitting and becomes a leaf
    pub fn stop_threshold(mut self, stop_threshold: f64) -> Self {
        self.0.stop_threshold = stop_threshold;
        self
    }

    /// Sets the share of children which have to agree on a decision before the frequency
    /// pruner collapses their parent
    pub fn prune_threshold(mut self, prune_threshold: f64) -> Self {
        self.0.prune_threshold = prune_threshold;
        self
    }

    /// Sets the leading fraction of the training rows reserved for validation pruning
    pub fn validation_ratio(mut self, validation_ratio: f64) -> Self {
        self.0.validation_ratio = validation_ratio;
        self
    }
}

impl Default for DecisionTreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `stop_threshold = 0.0`
    /// * `prune_threshold = 0.75`
    /// * `validation_ratio = 0.1`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> DecisionTreeParams {
        DecisionTreeParams::new()
    }
}

impl ParamGuard for DecisionTreeParams {
    type Checked = DecisionTreeValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if !(self.0.stop_threshold >= 0.0 && self.0.stop_threshold.is_finite()) {
            Err(Error::Parameters(format!(
                "Stop threshold should be a non-negative number, but was {}",
                self.0.stop_threshold
            )))
        } else if !(self.0.prune_threshold > 0.0 && self.0.prune_threshold <= 1.0) {
            Err(Error::Parameters(format!(
                "Prune threshold should be in (0, 1], but was {}",
                self.0.prune_threshold
            )))
        } else if !(self.0.validation_ratio >= 0.0 && self.0.validation_ratio < 1.0) {
            Err(Error::Parameters(format!(
                "Validation ratio should be in [0, 1), but was {}",
                self.0.validation_ratio
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
