//! Provide traits for different classes of algorithms
//!

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::param_guard::ParamGuard;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// a decision tree fit creates the tree describing how decisions follow from the attributes.
pub trait Fit {
    type Object;

    fn fit(&self, dataset: &Dataset) -> Result<Self::Object>;
}

/// Predict with model
///
/// This trait assumes the `Predict` implementation can classify every row of a dataset.
pub trait Predict<T> {
    fn predict(&self, x: &Dataset) -> T;
}

/// Performs checking step and calls `fit` on the checked hyperparameters. If checking failed, the
/// checking error is converted to the crate error and returned.
impl<P> Fit for P
where
    P: ParamGuard,
    P::Checked: Fit,
    Error: From<P::Error>,
{
    type Object = <P::Checked as Fit>::Object;

    fn fit(&self, dataset: &Dataset) -> Result<Self::Object> {
        let checked = self.check_ref()?;
        checked.fit(dataset)
    }
}
