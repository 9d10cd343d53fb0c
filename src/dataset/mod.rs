//! Datasets
//!
//! This module implements the categorical dataset and the row view used during prediction.
//! A dataset is a fixed-schema table: an ordered list of named feature columns and a single,
//! distinguished decision column. Every operation producing a subset of rows returns a new owned
//! dataset, so partitions never alias the table they were taken from.
use ndarray::{Array1, Array2, ArrayView1, Axis};

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

mod impl_dataset;
mod iter;

pub use iter::RowIter;

/// Name given to the decision column when none is provided
pub const DECISION_COLUMN: &str = "d";

/// Categorical dataset
///
/// # Fields
///
/// * `records`: a two-dimensional matrix of categorical values with dimensionality (nsamples, nfeatures)
/// * `targets`: the decision column with dimensionality (nsamples)
/// * `feature_names`: descriptive feature names with dimensionality (nfeatures), in declaration order
/// * `target_name`: name of the decision column
///
/// The declaration order of the features is significant: attribute selection visits them in
/// this order and keeps the first of several equally good attributes.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Array2<String>,
    targets: Array1<String>,
    feature_names: Vec<String>,
    target_name: String,
}

/// A borrowed view on a single row of a dataset
#[derive(Debug, Clone)]
pub struct Row<'a> {
    feature_names: &'a [String],
    values: ArrayView1<'a, String>,
    target: &'a str,
}

impl<'a> Row<'a> {
    /// Returns the value of the given attribute, `None` if the row has no such attribute
    pub fn value(&self, attribute: &str) -> Option<&'a str> {
        let idx = self.feature_names.iter().position(|name| name == attribute)?;
        self.values.clone().into_iter().nth(idx).map(String::as_str)
    }

    /// Returns the decision value of this row
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// Returns the feature values in declaration order
    pub fn values(&self) -> ArrayView1<'a, String> {
        self.values.clone()
    }
}

impl Dataset {
    /// Create a new dataset from records and decision values
    ///
    /// Features are named `c1..cn` and the decision column is named [`DECISION_COLUMN`].
    pub fn new(records: Array2<String>, targets: Array1<String>) -> Result<Dataset> {
        if records.nrows() != targets.len() {
            return Err(Error::Schema(format!(
                "{} records but {} decision values",
                records.nrows(),
                targets.len()
            )));
        }

        let feature_names = (0..records.ncols())
            .map(|idx| format!("c{}", idx + 1))
            .collect();

        Ok(Dataset {
            records,
            targets,
            feature_names,
            target_name: DECISION_COLUMN.to_string(),
        })
    }

    /// Create a dataset from rows of values, the last value of every row being the decision
    ///
    /// This follows the layout of header-less delimited files: features are named `c1..cn` in
    /// column order and the last column becomes the decision column.
    pub fn from_rows<R, S>(rows: &[R]) -> Result<Dataset>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let ncols = match rows.first() {
            Some(row) => row.as_ref().len(),
            None => return Err(Error::Schema("cannot infer columns without rows".into())),
        };
        if ncols == 0 {
            return Err(Error::Schema("rows need at least a decision value".into()));
        }

        let mut values = Vec::with_capacity(rows.len() * (ncols - 1));
        let mut targets = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(Error::Schema(format!(
                    "row {} has {} values, expected {}",
                    idx,
                    row.len(),
                    ncols
                )));
            }
            let (decision, features) = row.split_last().ok_or_else(|| {
                Error::Schema(format!("row {} has no decision value", idx))
            })?;
            values.extend(features.iter().map(|x| x.as_ref().to_string()));
            targets.push(decision.as_ref().to_string());
        }

        let records = Array2::from_shape_vec((rows.len(), ncols - 1), values)
            .map_err(|err| Error::Schema(err.to_string()))?;

        Dataset::new(records, Array1::from(targets))
    }

    /// Replace the feature names, keeping their declaration order
    pub fn with_feature_names<S: Into<String>>(mut self, names: Vec<S>) -> Result<Dataset> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.nfeatures() {
            return Err(Error::Schema(format!(
                "{} feature names for {} features",
                names.len(),
                self.nfeatures()
            )));
        }
        check_unique(&names, &self.target_name)?;

        self.feature_names = names;
        Ok(self)
    }

    /// Rename the decision column
    pub fn with_target_name<S: Into<String>>(mut self, name: S) -> Result<Dataset> {
        let name = name.into();
        check_unique(&self.feature_names, &name)?;

        self.target_name = name;
        Ok(self)
    }

    /// Builds a dataset sharing this schema from new rows
    pub(crate) fn with_rows(&self, records: Array2<String>, targets: Array1<String>) -> Dataset {
        Dataset {
            records,
            targets,
            feature_names: self.feature_names.clone(),
            target_name: self.target_name.clone(),
        }
    }

    /// Number of rows
    pub fn nsamples(&self) -> usize {
        self.targets.len()
    }

    /// Number of feature columns, the decision column not included
    pub fn nfeatures(&self) -> usize {
        self.records.ncols()
    }

    /// Returns true if the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.nsamples() == 0
    }

    pub fn records(&self) -> &Array2<String> {
        &self.records
    }

    pub fn targets(&self) -> &Array1<String> {
        &self.targets
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Position of a feature column in declaration order
    pub fn feature_index(&self, attribute: &str) -> Option<usize> {
        self.feature_names.iter().position(|name| name == attribute)
    }

    /// Returns a view on the values of a column, the decision column included
    pub fn column(&self, attribute: &str) -> Result<ArrayView1<'_, String>> {
        if attribute == self.target_name {
            return Ok(self.targets.view());
        }

        self.feature_index(attribute)
            .map(|idx| self.records.index_axis(Axis(1), idx))
            .ok_or_else(|| Error::UnknownAttribute(attribute.to_string()))
    }

    /// Returns a borrowed view on the row at `idx`
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    pub fn row(&self, idx: usize) -> Row<'_> {
        Row {
            feature_names: &self.feature_names,
            values: self.records.row(idx),
            target: &self.targets[idx],
        }
    }

    /// Iterate over all rows
    pub fn rows(&self) -> RowIter<'_> {
        RowIter::new(self)
    }

    /// Number of occurrences of every distinct value of a column, in sorted value order
    pub fn value_counts(&self, attribute: &str) -> Result<BTreeMap<&str, usize>> {
        let mut counts = BTreeMap::new();
        for value in self.column(attribute)? {
            *counts.entry(value.as_str()).or_insert(0) += 1;
        }

        Ok(counts)
    }

    /// Sorted distinct values of a column
    pub fn unique_values(&self, attribute: &str) -> Result<Vec<String>> {
        Ok(self
            .column(attribute)?
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect())
    }

    /// Sorted distinct decision values
    pub fn labels(&self) -> Vec<String> {
        self.targets
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }
}

fn check_unique(feature_names: &[String], target_name: &str) -> Result<()> {
    let mut seen = BTreeSet::new();
    for name in feature_names {
        if name == target_name {
            return Err(Error::Schema(format!(
                "feature {} collides with the decision column",
                name
            )));
        }
        if !seen.insert(name) {
            return Err(Error::Schema(format!("duplicate feature name {}", name)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn weather() -> Dataset {
        Dataset::from_rows(&[
            ["sunny", "hot", "no"],
            ["sunny", "mild", "no"],
            ["rain", "mild", "yes"],
            ["overcast", "hot", "yes"],
        ])
        .unwrap()
    }

    #[test]
    fn from_rows_names_columns_like_the_loader() {
        let dataset = weather();

        assert_eq!(dataset.nsamples(), 4);
        assert_eq!(dataset.nfeatures(), 2);
        assert_eq!(dataset.feature_names(), &["c1", "c2"]);
        assert_eq!(dataset.target_name(), DECISION_COLUMN);
        assert_eq!(dataset.targets(), &array!["no", "no", "yes", "yes"].map(|x| x.to_string()));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows: Vec<Vec<&str>> = vec![vec!["a", "yes"], vec!["b"]];
        assert!(matches!(Dataset::from_rows(&rows), Err(Error::Schema(_))));

        let empty: Vec<Vec<&str>> = Vec::new();
        assert!(Dataset::from_rows(&empty).is_err());
    }

    #[test]
    fn mismatched_targets_are_rejected() {
        let records = Array2::from_elem((3, 2), "x".to_string());
        let targets = Array1::from_elem(2, "y".to_string());

        assert!(matches!(Dataset::new(records, targets), Err(Error::Schema(_))));
    }

    #[test]
    fn feature_names_are_validated() {
        let dataset = weather();

        assert!(dataset.clone().with_feature_names(vec!["outlook"]).is_err());
        assert!(dataset
            .clone()
            .with_feature_names(vec!["outlook", "outlook"])
            .is_err());
        assert!(dataset.clone().with_feature_names(vec!["outlook", "d"]).is_err());
        assert!(dataset.clone().with_target_name("c1").is_err());

        let renamed = dataset
            .with_feature_names(vec!["outlook", "temperature"])
            .and_then(|x| x.with_target_name("play"))
            .unwrap();
        assert_eq!(renamed.feature_index("temperature"), Some(1));
        assert_eq!(renamed.column("play").unwrap().len(), 4);
    }

    #[test]
    fn columns_and_rows() {
        let dataset = weather();

        assert_eq!(dataset.column("c2").unwrap()[3], "hot");
        assert!(matches!(
            dataset.column("c9"),
            Err(Error::UnknownAttribute(_))
        ));

        let row = dataset.row(2);
        assert_eq!(row.value("c1"), Some("rain"));
        assert_eq!(row.value("d"), None);
        assert_eq!(row.target(), "yes");
        assert_eq!(row.values().to_vec(), vec!["rain", "mild"]);
        assert_eq!(dataset.rows().count(), 4);
    }

    #[test]
    fn distinct_values_are_sorted() {
        let dataset = weather();

        assert_eq!(dataset.unique_values("c1").unwrap(), &["overcast", "rain", "sunny"]);
        assert_eq!(dataset.labels(), &["no", "yes"]);

        let counts = dataset.value_counts("c2").unwrap();
        assert_eq!(counts.get("hot"), Some(&2));
        assert_eq!(counts.get("mild"), Some(&2));
        assert_eq!(counts.len(), 2);
    }
}
