//! `cattree-datasets` reads categorical datasets from delimited files and provides small datasets
//! ready to be used in tests and examples.
//!
//! ## The Big Picture
//!
//! `cattree-datasets` is a crate in the cattree workspace. Datasets are returned as
//! [`cattree::Dataset`] values, with features named `c1..cn` and the decision in the last column.
//!
//! ## Current State
//!
//! * [`load_dataset`] and [`load_dataset_from_path`]: header-less delimited sources
//! * [`shuffle_rows`] and [`shuffle_file`]: randomised row order, before splitting
//! * [`save_tree`]: writes a rendered tree to a file
//! * `["weather"]` : the classic play-tennis weather dataset
//! * `["generate"]` : random categorical datasets with a known decision rule
//!
//! ## Using a dataset
//!
//! To use one of the provided datasets in your project add the crate to your Cargo.toml with the corresponding feature enabled:
//! ```ignore
//! cattree-datasets = { version = "0.1.0", features = ["weather"] }
//! ```
//! and then use it in your example or tests as
//! ```ignore
//! let (train, valid) = cattree_datasets::weather()
//!     .split_with_ratio(0.8);
//!  /// ...
//! ```

mod dataset;
#[cfg(feature = "generate")]
pub mod generate;

pub use dataset::{
    load_dataset, load_dataset_from_path, save_tree, shuffle_file, shuffle_rows, Error, Result,
};

#[cfg(feature = "weather")]
/// Read in the weather dataset
///
/// 14 days described by outlook, temperature, humidity and wind, with the decision whether to
/// play tennis.
pub fn weather() -> cattree::Dataset {
    let data = include_str!("../data/weather.csv");

    // the bundled file is well-formed
    load_dataset(data.as_bytes(), b',')
        .and_then(|dataset| {
            Ok(dataset
                .with_feature_names(vec!["outlook", "temperature", "humidity", "wind"])?
                .with_target_name("play")?)
        })
        .unwrap()
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "weather")]
    #[test]
    fn test_weather() {
        let ds = super::weather();

        assert_eq!(ds.nsamples(), 14);
        assert_eq!(ds.nfeatures(), 4);
        assert_eq!(ds.target_name(), "play");
        assert_eq!(
            ds.unique_values("outlook").unwrap(),
            vec!["overcast", "rain", "sunny"]
        );
        assert_eq!(ds.value_counts("play").unwrap()["yes"], 9);
    }
}
