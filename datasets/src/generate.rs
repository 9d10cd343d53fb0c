//! Utility functions for randomly generating datasets

use cattree::Dataset;
use rand::Rng;

use crate::Result;

/// Generate a categorical dataset whose decision depends on the first two features
///
/// Every feature takes one of `nvalues` values `v0..`, drawn uniformly. The decision is `yes` if
/// the indices of the values of the first two features add up to at least `nvalues` and `no`
/// otherwise. With probability `noise` the decision of a row is flipped.
///
/// `categorical` can be used to benchmark or test tree induction on a dataset with a known
/// structure.
pub fn categorical(
    nsamples: usize,
    nfeatures: usize,
    nvalues: usize,
    noise: f64,
    rng: &mut impl Rng,
) -> Result<Dataset> {
    let nvalues = nvalues.max(1);

    let rows = (0..nsamples)
        .map(|_| {
            let indices = (0..nfeatures)
                .map(|_| rng.gen_range(0..nvalues))
                .collect::<Vec<_>>();

            let positive = indices.iter().take(2).sum::<usize>() >= nvalues;
            let flip = rng.gen_bool(noise.clamp(0.0, 1.0));

            let mut row = indices
                .into_iter()
                .map(|idx| format!("v{}", idx))
                .collect::<Vec<_>>();
            row.push(if positive != flip { "yes" } else { "no" }.to_string());

            row
        })
        .collect::<Vec<_>>();

    Ok(Dataset::from_rows(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn shape_and_values() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = categorical(50, 4, 3, 0.0, &mut rng)?;

        assert_eq!(dataset.nsamples(), 50);
        assert_eq!(dataset.nfeatures(), 4);
        for value in dataset.unique_values("c3")? {
            assert!(["v0", "v1", "v2"].contains(&value.as_str()));
        }

        Ok(())
    }

    #[test]
    fn noiseless_decisions_follow_the_rule() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(3);
        let dataset = categorical(40, 3, 2, 0.0, &mut rng)?;

        // with two values the decision is `yes` only if both features hold `v1`
        for row in dataset.rows() {
            let positive = row.value("c1") == Some("v1") && row.value("c2") == Some("v1");
            assert_eq!(row.target(), if positive { "yes" } else { "no" });
        }

        Ok(())
    }
}
