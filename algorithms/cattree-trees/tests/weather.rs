use approx::assert_abs_diff_eq;
use cattree::prelude::*;
use cattree_datasets::{generate, load_dataset, weather};
use cattree_trees::{
    cross_validation, gain_ratio, select_best_attribute, train_and_test, train_and_test_v2,
    DecisionTree,
};
use rand::{rngs::SmallRng, SeedableRng};

#[test]
fn weather_tree_structure() -> Result<()> {
    let dataset = weather();

    let (attribute, ratio) = select_best_attribute(&dataset)?.unwrap();
    assert_eq!(attribute, "outlook");
    assert_abs_diff_eq!(ratio, 0.156, epsilon = 1e-3);
    assert_abs_diff_eq!(gain_ratio(&dataset, "humidity")?.gain, 0.152, epsilon = 1e-3);

    let tree = DecisionTree::params().fit(&dataset)?;
    let root = tree.root_node();
    assert_eq!(root.label().attribute(), Some("outlook"));
    assert_eq!(
        root.child_values(),
        vec![Some("overcast"), Some("rain"), Some("sunny")]
    );
    assert_eq!(
        root.child_by_value("sunny").unwrap().label().attribute(),
        Some("humidity")
    );
    assert_eq!(
        root.child_by_value("rain").unwrap().label().attribute(),
        Some("wind")
    );
    assert_eq!(tree.num_leaves(), 5);
    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.test(&dataset), 1.0);

    Ok(())
}

#[test]
fn weather_tree_survives_pruning() -> Result<()> {
    let dataset = weather();
    let mut tree = DecisionTree::params().fit(&dataset)?;
    let grown = tree.clone();

    // siblings never agree on a decision
    tree.prune(0.75);
    assert_eq!(tree, grown);

    tree.prune_with_validation(&dataset)?;
    assert_eq!(tree, grown);

    assert_eq!(tree.evaluate(&dataset).to_array(), [100.0, 100.0, 100.0]);

    Ok(())
}

#[test]
fn weather_text_dump() -> Result<()> {
    let tree = DecisionTree::params().fit(&weather())?;

    let compact = tree.export_to_text().compact(true).to_string();
    assert!(compact.starts_with("Attribute: outlook\n   overcast -> D: yes\n"));
    assert!(compact.contains("\n      high -> D: no"));

    let full = tree.export_to_text().to_string();
    for node in tree.iter_nodes() {
        assert!(full.contains(&format!("ID: {}\n", node.id())));
    }

    Ok(())
}

#[test]
fn harnesses_on_weather() -> Result<()> {
    let params = DecisionTree::params().check()?;
    let dataset = weather().shuffle(&mut SmallRng::seed_from_u64(42));

    let outcome = train_and_test(&params, &dataset, 0.7)?;
    assert_eq!(outcome.confusion.nclasses(), 2);
    for metric in outcome.metrics.to_array().iter() {
        assert!((0.0..=100.0).contains(metric));
    }

    let outcome = train_and_test_v2(&params, &dataset, 0.7)?;
    assert!(outcome.tree.num_nodes() >= 1);

    let result = cross_validation(&params, &dataset, 7)?;
    assert_eq!(result.folds.len(), 7);
    assert_eq!(result.mean, Metrics::mean(&result.folds));

    Ok(())
}

#[test]
fn loaded_rows_predict_their_decisions() -> Result<()> {
    let source = "\
low,a,yes
low,b,yes
high,a,no
high,b,no
";
    let dataset = load_dataset(source.as_bytes(), b',').unwrap();

    let tree = DecisionTree::params().fit(&dataset)?;
    let predictions = tree.predict(&dataset);

    for (predicted, actual) in predictions.iter().zip(dataset.targets()) {
        assert_eq!(predicted.as_deref(), Some(actual.as_str()));
    }

    Ok(())
}

#[test]
fn generated_rule_is_learned() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(42);
    let dataset = generate::categorical(400, 4, 3, 0.0, &mut rng).unwrap();
    let params = DecisionTree::params().check()?;

    let result = cross_validation(&params, &dataset, 5)?;
    assert!(result.mean.accuracy > 90.0);

    Ok(())
}
