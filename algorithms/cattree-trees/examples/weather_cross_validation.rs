use cattree::prelude::*;
use cattree_datasets::weather;
use cattree_trees::{cross_validation, train_and_test, train_and_test_v2, DecisionTree};
use rand::thread_rng;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Load & shuffle the weather dataset
    let dataset = weather().shuffle(&mut thread_rng());
    let params = DecisionTree::params().prune_threshold(0.75).check()?;

    // 2. Held-out test with frequency pruning
    let outcome = train_and_test(&params, &dataset, 0.7)?;
    println!("Frequency pruning:\n{}", outcome.metrics);
    println!("{}", outcome.tree.export_to_text().compact(true));

    // 3. Held-out test with validation pruning
    let outcome = train_and_test_v2(&params, &dataset, 0.7)?;
    println!("Validation pruning:\n{}", outcome.metrics);

    // 4. Cross-validation
    let result = cross_validation(&params, &dataset, 7)?;
    println!("Cross-validation:\n{}", result.mean);

    Ok(())
}
