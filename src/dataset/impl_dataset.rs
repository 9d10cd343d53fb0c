use std::collections::BTreeMap;

use ndarray::{concatenate, s, Axis};
use rand::{seq::SliceRandom, Rng};

use super::Dataset;
use crate::error::{Error, Result};

impl Dataset {
    /// Rows `start..stop` as a new dataset
    ///
    /// Fails with `Error::InvalidPartition` if either bound exceeds the number of rows or if
    /// `start > stop`.
    pub fn slice_rows(&self, start: usize, stop: usize) -> Result<Dataset> {
        let nsamples = self.nsamples();
        if start > nsamples || stop > nsamples || start > stop {
            return Err(Error::InvalidPartition {
                start,
                stop,
                nsamples,
            });
        }

        Ok(self.with_rows(
            self.records.slice(s![start..stop, ..]).to_owned(),
            self.targets.slice(s![start..stop]).to_owned(),
        ))
    }

    /// The single row at `index` as a new dataset
    pub fn row_at(&self, index: usize) -> Result<Dataset> {
        if index >= self.nsamples() {
            return Err(Error::InvalidPartition {
                start: index,
                stop: index + 1,
                nsamples: self.nsamples(),
            });
        }

        self.slice_rows(index, index + 1)
    }

    /// Select rows by index, in the given order
    ///
    /// ### Panics
    ///
    /// If an index is out of bounds
    pub fn select(&self, indices: &[usize]) -> Dataset {
        self.with_rows(
            self.records.select(Axis(0), indices),
            self.targets.select(Axis(0), indices),
        )
    }

    /// Concatenate datasets sharing the same schema row-wise, in the given order
    pub fn merge_rowwise(datasets: &[Dataset]) -> Result<Dataset> {
        let first = datasets
            .first()
            .ok_or_else(|| Error::Schema("nothing to merge".into()))?;

        if let Some(other) = datasets.iter().find(|x| {
            x.feature_names != first.feature_names || x.target_name != first.target_name
        }) {
            return Err(Error::Schema(format!(
                "cannot merge columns {:?} into {:?}",
                other.feature_names, first.feature_names
            )));
        }

        let records = datasets.iter().map(|x| x.records.view()).collect::<Vec<_>>();
        let targets = datasets.iter().map(|x| x.targets.view()).collect::<Vec<_>>();

        Ok(first.with_rows(
            concatenate(Axis(0), &records).map_err(|err| Error::Schema(err.to_string()))?,
            concatenate(Axis(0), &targets).map_err(|err| Error::Schema(err.to_string()))?,
        ))
    }

    /// Split dataset into two disjoint chunks
    ///
    /// The first chunk holds the leading `floor(nsamples * ratio)` rows, the second one the
    /// remaining rows. No shuffling takes place.
    pub fn split_with_ratio(&self, ratio: f64) -> (Dataset, Dataset) {
        let nsamples = self.nsamples();
        let n = ((nsamples as f64 * ratio).floor() as usize).min(nsamples);

        (
            self.with_rows(
                self.records.slice(s![..n, ..]).to_owned(),
                self.targets.slice(s![..n]).to_owned(),
            ),
            self.with_rows(
                self.records.slice(s![n.., ..]).to_owned(),
                self.targets.slice(s![n..]).to_owned(),
            ),
        )
    }

    /// Performs k-folding on the dataset
    ///
    /// The rows are cut into `k` contiguous chunks of `nsamples / k` rows, trailing rows which
    /// do not fill a chunk are dropped. Each fold pairs the rows of all other chunks, merged in
    /// their original order, with one held-out chunk.
    ///
    /// ### Returns
    ///
    /// A vector of `k` pairs `(training, validation)`
    ///
    /// ### Errors
    ///
    /// `Error::InvalidFoldCount` if `k` is zero or larger than the number of rows
    pub fn fold(&self, k: usize) -> Result<Vec<(Dataset, Dataset)>> {
        let nsamples = self.nsamples();
        if k == 0 || k > nsamples {
            return Err(Error::InvalidFoldCount {
                folds: k,
                nsamples,
            });
        }

        let chunk_size = nsamples / k;
        let chunks = (0..k)
            .map(|i| self.slice_rows(i * chunk_size, (i + 1) * chunk_size))
            .collect::<Result<Vec<_>>>()?;

        let mut folds = Vec::with_capacity(k);
        for (i, validation) in chunks.iter().enumerate() {
            let others = chunks
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, chunk)| chunk.clone())
                .collect::<Vec<_>>();

            let training = if others.is_empty() {
                self.slice_rows(0, 0)?
            } else {
                Dataset::merge_rowwise(&others)?
            };

            folds.push((training, validation.clone()));
        }

        Ok(folds)
    }

    /// Partition the rows by the values of a column
    ///
    /// Every row ends up in exactly one partition. Partitions are returned in sorted value order
    /// and keep the relative order of their rows.
    pub fn partition_by(&self, attribute: &str) -> Result<Vec<(String, Dataset)>> {
        let mut indices: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (idx, value) in self.column(attribute)?.into_iter().enumerate() {
            indices.entry(value.as_str()).or_default().push(idx);
        }

        Ok(indices
            .into_iter()
            .map(|(value, rows)| (value.to_string(), self.select(&rows)))
            .collect())
    }

    /// Return a copy of the dataset with shuffled rows
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Dataset {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        self.select(&indices)
    }
}
