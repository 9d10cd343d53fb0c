//! Held-out testing and k-fold cross-validation
//!
//! Every call grows its own trees and hands them back, nothing is shared between calls or
//! between folds. Rows are never shuffled here, shuffle the dataset beforehand for randomised
//! splits.
use log::info;

use super::{DecisionTree, DecisionTreeValidParams};
use cattree::{
    error::{Error, Result},
    metrics::{ConfusionByClass, Metrics},
    traits::Fit,
    Dataset,
};

/// A pruned tree together with its results on the test rows
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestOutcome {
    pub tree: DecisionTree,
    pub confusion: ConfusionByClass,
    pub metrics: Metrics,
}

/// Per-fold and averaged results of a cross-validation
#[derive(Debug, Clone, PartialEq)]
pub struct CrossValidation {
    pub folds: Vec<Metrics>,
    pub mean: Metrics,
}

fn check_ratio(ratio: f64) -> Result<()> {
    if ratio > 0.0 && ratio < 1.0 {
        Ok(())
    } else {
        Err(Error::Parameters(format!(
            "Train ratio should be in (0, 1), but was {}",
            ratio
        )))
    }
}

fn outcome(tree: DecisionTree, test: &Dataset, classes: &[String]) -> TrainTestOutcome {
    let confusion = tree.confusion_by_class(test, classes);
    let metrics = confusion.evaluate();

    TrainTestOutcome {
        tree,
        confusion,
        metrics,
    }
}

/// Train on the leading rows and evaluate on the rest
///
/// The first `floor(nsamples * ratio)` rows grow a tree, which is pruned by frequency and
/// evaluated on the remaining rows. All decisions of `dataset` are evaluated, also those which
/// do not occur among the test rows.
///
/// ### Errors
///
/// * `Error::Parameters` if `ratio` is not in `(0, 1)`
/// * `Error::DegenerateDataset` if no training rows remain
pub fn train_and_test(
    params: &DecisionTreeValidParams,
    dataset: &Dataset,
    ratio: f64,
) -> Result<TrainTestOutcome> {
    check_ratio(ratio)?;

    let classes = dataset.labels();
    let (train, test) = dataset.split_with_ratio(ratio);

    let mut tree = params.fit(&train)?;
    tree.prune(params.prune_threshold());

    let outcome = outcome(tree, &test, &classes);
    info!(
        "trained on {} rows, tested on {} rows: {:?}",
        train.nsamples(),
        test.nsamples(),
        outcome.metrics.to_array()
    );

    Ok(outcome)
}

/// Train on the leading rows, prune against a validation slice and evaluate on the rest
///
/// Like [`train_and_test`], but the tree is pruned with
/// [`DecisionTree::prune_with_validation`]. The validation rows are the first
/// `floor(ntrain * validation_ratio)` training rows. They also take part in growing the tree,
/// which is fitted on the full training prefix.
pub fn train_and_test_v2(
    params: &DecisionTreeValidParams,
    dataset: &Dataset,
    ratio: f64,
) -> Result<TrainTestOutcome> {
    check_ratio(ratio)?;

    let classes = dataset.labels();
    let (train, test) = dataset.split_with_ratio(ratio);
    let (validation, _) = train.split_with_ratio(params.validation_ratio());

    let mut tree = params.fit(&train)?;
    tree.prune_with_validation(&validation)?;

    let outcome = outcome(tree, &test, &classes);
    info!(
        "trained on {} rows, validated on {} rows, tested on {} rows: {:?}",
        train.nsamples(),
        validation.nsamples(),
        test.nsamples(),
        outcome.metrics.to_array()
    );

    Ok(outcome)
}

/// Perform k-fold cross-validation
///
/// The rows are cut into `k` contiguous chunks (see [`Dataset::fold`]). For every chunk a fresh
/// tree is grown on the other chunks, pruned by frequency and evaluated on the held-out chunk.
///
/// ### Errors
///
/// * `Error::InvalidFoldCount` if `k` is zero or larger than the number of rows
/// * `Error::DegenerateDataset` if a fold has no training rows, as happens for `k = 1`
pub fn cross_validation(
    params: &DecisionTreeValidParams,
    dataset: &Dataset,
    k: usize,
) -> Result<CrossValidation> {
    let classes = dataset.labels();

    let folds = dataset
        .fold(k)?
        .into_iter()
        .enumerate()
        .map(|(i, (train, valid))| {
            let mut tree = params.fit(&train)?;
            tree.prune(params.prune_threshold());

            let metrics = tree.confusion_by_class(&valid, &classes).evaluate();
            info!("fold {}/{}: {:?}", i + 1, k, metrics.to_array());

            Ok(metrics)
        })
        .collect::<Result<Vec<_>>>()?;

    let mean = Metrics::mean(&folds);
    info!("cross-validation over {} folds: {:?}", k, mean.to_array());

    Ok(CrossValidation { folds, mean })
}
