//! Error types in cattree
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("invalid row range {start}..{stop} for a dataset with {nsamples} rows")]
    InvalidPartition {
        start: usize,
        stop: usize,
        nsamples: usize,
    },
    #[error("degenerate dataset: {0}")]
    DegenerateDataset(String),
    #[error("invalid number of folds {folds}, expected 1..={nsamples}")]
    InvalidFoldCount { folds: usize, nsamples: usize },
    #[error("invalid dataset schema: {0}")]
    Schema(String),
    #[error("unknown attribute {0}")]
    UnknownAttribute(String),
}
