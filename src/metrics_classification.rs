//! Common metrics for performance evaluation of classifier
//!
//! Classification quality is measured one-vs-rest: every class gets its own confusion counts,
//! from which accuracy, recall and precision are computed and then averaged across classes.
//! Rows which could not be classified, because their path through the tree ended at an unseen
//! attribute value, are counted as misses for their actual class and as true negatives for the
//! others.
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// One-vs-rest confusion counts of a single class
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_negative: usize,
}

impl ConfusionCounts {
    /// Number of rows counted
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.false_negative + self.true_negative
    }

    /// Fraction of rows where the class was correctly predicted or correctly ruled out
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    fn count(&mut self, class: &str, predicted: Option<&str>, actual: &str) {
        let predicted = predicted == Some(class);
        let actual = actual == class;

        match (predicted, actual) {
            (true, true) => self.true_positive += 1,
            (true, false) => self.false_positive += 1,
            (false, true) => self.false_negative += 1,
            (false, false) => self.true_negative += 1,
        }
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Round a percentage to two decimal places
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Confusion counts for every class of a classification task
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfusionByClass {
    counts: BTreeMap<String, ConfusionCounts>,
}

impl ConfusionByClass {
    /// Count predictions against the actual decisions, row by row
    ///
    /// ### Parameters
    ///
    /// * `predictions`: predicted class for every row, `None` for unclassifiable rows
    /// * `actuals`: actual class for every row
    /// * `classes`: the classes to evaluate
    ///
    /// Rows are paired up in order; surplus rows on either side are ignored.
    pub fn new<'a, P, A, C>(predictions: P, actuals: A, classes: C) -> ConfusionByClass
    where
        P: IntoIterator<Item = Option<&'a str>>,
        A: IntoIterator<Item = &'a str>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut counts: BTreeMap<String, ConfusionCounts> = classes
            .into_iter()
            .map(|class| (class.into(), ConfusionCounts::default()))
            .collect();

        for (predicted, actual) in predictions.into_iter().zip(actuals) {
            for (class, counts) in counts.iter_mut() {
                counts.count(class, predicted, actual);
            }
        }

        ConfusionByClass { counts }
    }

    /// Counts of a single class
    pub fn get(&self, class: &str) -> Option<&ConfusionCounts> {
        self.counts.get(class)
    }

    /// Iterate over classes and their counts in sorted class order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfusionCounts)> {
        self.counts.iter().map(|(class, counts)| (class.as_str(), counts))
    }

    pub fn nclasses(&self) -> usize {
        self.counts.len()
    }

    /// Average accuracy, recall and precision across classes
    ///
    /// Metrics are percentages rounded to two decimal places. Without classes all metrics are
    /// zero.
    pub fn evaluate(&self) -> Metrics {
        if self.counts.is_empty() {
            return Metrics::default();
        }

        let n = self.counts.len() as f64;
        let (accuracy, recall, precision) =
            self.counts
                .values()
                .fold((0.0, 0.0, 0.0), |(a, r, p), counts| {
                    (
                        a + counts.accuracy(),
                        r + counts.recall(),
                        p + counts.precision(),
                    )
                });

        Metrics {
            accuracy: round2(accuracy / n * 100.0),
            recall: round2(recall / n * 100.0),
            precision: round2(precision / n * 100.0),
        }
    }
}

/// Classification quality in percent
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub accuracy: f64,
    pub recall: f64,
    pub precision: f64,
}

impl Metrics {
    /// Returns `[accuracy, recall, precision]`
    pub fn to_array(&self) -> [f64; 3] {
        [self.accuracy, self.recall, self.precision]
    }

    /// Average of several evaluations, rounded to two decimal places
    pub fn mean(metrics: &[Metrics]) -> Metrics {
        if metrics.is_empty() {
            return Metrics::default();
        }

        let n = metrics.len() as f64;
        Metrics {
            accuracy: round2(metrics.iter().map(|x| x.accuracy).sum::<f64>() / n),
            recall: round2(metrics.iter().map(|x| x.recall).sum::<f64>() / n),
            precision: round2(metrics.iter().map(|x| x.precision).sum::<f64>() / n),
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Accuracy: {}%", self.accuracy)?;
        writeln!(f, "Recall: {}%", self.recall)?;
        write!(f, "Precision: {}%", self.precision)
    }
}
