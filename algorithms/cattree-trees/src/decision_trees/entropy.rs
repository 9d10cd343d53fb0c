//! Entropy and gain ratio of categorical attributes
//!
//! All quantities are measured in bits. Probabilities are the exact relative frequencies of the
//! values observed in a dataset.
use std::collections::BTreeMap;

use cattree::{
    error::{Error, Result},
    Dataset,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Information measures of splitting a dataset on a single attribute
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainRatio {
    /// Entropy of the decision column before the split
    pub base_entropy: f64,
    /// Residual information of the decision column after the split
    pub info: f64,
    /// Information gain, `base_entropy - info`
    pub gain: f64,
    /// Information gain normalised by the entropy of the attribute itself
    pub ratio: f64,
}

/// Entropy of a probability distribution
///
/// Zero probabilities are skipped before taking the logarithm.
pub fn class_entropy<I: IntoIterator<Item = f64>>(probabilities: I) -> f64 {
    -probabilities
        .into_iter()
        .filter(|p| *p != 0.0)
        .map(|p| p * p.log2())
        .sum::<f64>()
}

fn entropy_of_counts<'a, I: IntoIterator<Item = &'a usize>>(counts: I, total: usize) -> f64 {
    class_entropy(counts.into_iter().map(|x| *x as f64 / total as f64))
}

fn ensure_rows(dataset: &Dataset) -> Result<()> {
    if dataset.is_empty() {
        Err(Error::DegenerateDataset(
            "entropy is undefined for a dataset without rows".into(),
        ))
    } else {
        Ok(())
    }
}

/// Entropy of the value distribution of a single column
pub fn attribute_entropy(dataset: &Dataset, attribute: &str) -> Result<f64> {
    ensure_rows(dataset)?;
    let counts = dataset.value_counts(attribute)?;

    Ok(entropy_of_counts(counts.values(), dataset.nsamples()))
}

/// Residual information of the decision column after splitting on `attribute`
///
/// This is the entropy of the decision within each value of the attribute, weighted by the
/// share of rows holding that value.
pub fn information(dataset: &Dataset, attribute: &str) -> Result<f64> {
    ensure_rows(dataset)?;

    // value of the attribute -> decision -> number of rows
    let mut partitions: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    for (value, decision) in dataset.column(attribute)?.into_iter().zip(dataset.targets()) {
        *partitions
            .entry(value.as_str())
            .or_default()
            .entry(decision.as_str())
            .or_insert(0) += 1;
    }

    let nsamples = dataset.nsamples() as f64;
    Ok(partitions
        .values()
        .map(|decisions| {
            let rows = decisions.values().sum::<usize>();
            rows as f64 / nsamples * entropy_of_counts(decisions.values(), rows)
        })
        .sum())
}

/// Gain ratio of splitting `dataset` on `attribute`
///
/// The ratio is zero whenever the attribute takes a single value, as its entropy vanishes.
pub fn gain_ratio(dataset: &Dataset, attribute: &str) -> Result<GainRatio> {
    let base_entropy = attribute_entropy(dataset, dataset.target_name())?;
    let split_entropy = attribute_entropy(dataset, attribute)?;
    let info = information(dataset, attribute)?;
    let gain = base_entropy - info;

    let ratio = if split_entropy != 0.0 {
        gain / split_entropy
    } else {
        0.0
    };

    Ok(GainRatio {
        base_entropy,
        info,
        gain,
        ratio,
    })
}

/// Finds the feature with the largest gain ratio
///
/// Features are visited in declaration order and only a strictly larger ratio replaces the
/// current best, so the first of several equally good features is returned. Returns `None` if
/// the dataset has no feature columns.
pub fn select_best_attribute(dataset: &Dataset) -> Result<Option<(String, f64)>> {
    let mut best: Option<(&str, f64)> = None;

    for attribute in dataset.feature_names() {
        let ratio = gain_ratio(dataset, attribute)?.ratio;

        best = match best.take() {
            None => Some((attribute, ratio)),
            Some((_, best_ratio)) if ratio > best_ratio => Some((attribute, ratio)),
            x => x,
        };
    }

    Ok(best.map(|(attribute, ratio)| (attribute.to_string(), ratio)))
}
