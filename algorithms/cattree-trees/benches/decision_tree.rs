use std::time::Duration;

use cattree::prelude::*;
use cattree_datasets::generate;
use cattree_trees::DecisionTree;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::SmallRng, SeedableRng};

fn decision_tree_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);

    // Controls how many rows are generated
    let training_set_sizes = &[100, 1000, 10000];

    let n_features = 6;
    let n_values = 4;

    // Use the default configuration
    let hyperparams = DecisionTree::params();

    // Benchmark training time for each training sample size
    let mut group = c.benchmark_group("decision_tree");
    group
        .sample_size(50)
        .measurement_time(Duration::new(10, 0))
        .warm_up_time(Duration::new(3, 0))
        .noise_threshold(0.05);

    for n in training_set_sizes.iter() {
        let dataset = generate::categorical(*n, n_features, n_values, 0.1, &mut rng).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &dataset, |b, d| {
            b.iter(|| hyperparams.fit(d))
        });
    }

    group.finish();
}

criterion_group!(benches, decision_tree_bench);
criterion_main!(benches);
