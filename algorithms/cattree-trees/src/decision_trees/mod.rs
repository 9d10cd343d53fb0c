mod algorithm;
mod entropy;
pub mod harness;
mod hyperparams;
mod iter;
mod prune;
mod text;

pub use algorithm::*;
pub use entropy::*;
pub use harness::{cross_validation, train_and_test, train_and_test_v2};
pub use hyperparams::*;
pub use iter::*;
pub use text::*;
