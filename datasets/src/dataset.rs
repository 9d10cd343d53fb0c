use std::fs;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

use cattree::Dataset;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not parse delimited data: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Dataset(#[from] cattree::error::Error),
}

/// Read a header-less delimited source into a dataset
///
/// Every line is a row. The last column becomes the decision column `d`, the others are named
/// `c1..cn` in column order. Surrounding whitespace of a value is trimmed, and all lines need the
/// same number of values.
pub fn load_dataset<R: Read>(reader: R, separator: u8) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(separator)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = reader
        .records()
        .map(|record| {
            record.map(|record| record.iter().map(str::to_string).collect::<Vec<_>>())
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Dataset::from_rows(&rows)?)
}

/// Read a header-less delimited file into a dataset, see [`load_dataset`]
pub fn load_dataset_from_path<P: AsRef<Path>>(path: P, separator: u8) -> Result<Dataset> {
    let file = fs::File::open(path)?;
    load_dataset(file, separator)
}

/// Shuffle the lines of a delimited source
///
/// Empty lines are dropped and every line of the result ends with a newline.
pub fn shuffle_rows<R: Rng>(source: &str, rng: &mut R) -> String {
    let mut lines = source
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>();
    lines.shuffle(rng);

    lines.into_iter().map(|line| format!("{}\n", line)).collect()
}

/// Shuffle the lines of the file at `path` and write them to `output`
pub fn shuffle_file<P: AsRef<Path>, Q: AsRef<Path>, R: Rng>(
    path: P,
    output: Q,
    rng: &mut R,
) -> Result<()> {
    let source = fs::read_to_string(path)?;
    fs::write(output, shuffle_rows(&source, rng))?;

    Ok(())
}

/// Write a rendered tree to `path`, replacing previous content
pub fn save_tree<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    fs::write(path, text)?;

    Ok(())
}
