use minicart::prelude::*;

use rand::prelude::*;


// A labeled sample of `size` records over three numeric attributes,
// drawn from a seeded generator so every call returns the same data.
fn random_sample(size: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut columns = vec![Vec::with_capacity(size); 3];
    let mut labels = Vec::with_capacity(size);

    for _ in 0..size {
        let record = [
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
        ];
        // A noisy diagonal rule keeps both classes populated.
        let noise: f64 = rng.gen_range(-0.3..0.3);
        let label = if record[0] + record[1] + noise > 1.0 {
            "pos"
        } else {
            "neg"
        };

        for (column, value) in columns.iter_mut().zip(record) {
            column.push(value);
        }
        labels.push(label);
    }

    let mut attributes = columns.into_iter()
        .enumerate()
        .map(|(i, column)| Attribute::numeric(format!("f{i}"), column))
        .collect::<Vec<_>>();
    attributes.push(Attribute::nominal("label", &labels));

    Dataset::from_attributes(attributes)
        .unwrap()
        .set_target("label")
        .unwrap()
}


#[test]
fn building_twice_yields_the_same_tree() {
    let sample = random_sample(60, 777);

    let first = TreeBuilder::new().max_depth(4).build(&sample).unwrap();
    let second = TreeBuilder::new().max_depth(4).build(&sample).unwrap();

    assert_eq!(first, second);
}


#[test]
fn prediction_is_deterministic() {
    let sample = random_sample(60, 1234);
    let tree = TreeBuilder::new().build(&sample).unwrap();

    let n_sample = sample.shape().0;
    for row in 0..n_sample {
        let once = tree.predict(&sample, row).unwrap();
        let again = tree.predict(&sample, row).unwrap();
        assert_eq!(once, again);
    }
}


#[test]
fn missing_value_on_the_path_is_an_error() {
    let a = Attribute::numeric("a", [0.0, 0.0, 1.0, 1.0]);
    let label = Attribute::nominal("label", &["n", "n", "p", "p"]);
    let sample = Dataset::from_attributes(vec![a, label])
        .unwrap()
        .set_target("label")
        .unwrap();

    let tree = TreeBuilder::new().build(&sample).unwrap();
    assert_eq!(tree.depth(), 1);

    // The root tests `a`, which this record does not have.
    let gappy = Dataset::from_attributes(vec![
        Attribute::numeric_with_gaps("a", vec![None]),
    ]).unwrap();

    let err = tree.predict(&gappy, 0).unwrap_err();
    assert!(matches!(err, TreeError::MissingAttribute { .. }));
}


#[test]
fn absent_column_is_an_error() {
    let a = Attribute::numeric("a", [0.0, 0.0, 1.0, 1.0]);
    let label = Attribute::nominal("label", &["n", "n", "p", "p"]);
    let sample = Dataset::from_attributes(vec![a, label])
        .unwrap()
        .set_target("label")
        .unwrap();

    let tree = TreeBuilder::new().build(&sample).unwrap();

    let other = Dataset::from_attributes(vec![
        Attribute::numeric("b", [0.5]),
    ]).unwrap();

    let err = tree.predict_class(&other, 0).unwrap_err();
    assert!(matches!(err, TreeError::MissingAttribute { .. }));
}


#[test]
fn unseen_categories_route_right() {
    let color = Attribute::nominal(
        "color", &["red", "green", "blue", "red"],
    );
    let label = Attribute::nominal(
        "label", &["warm", "cold", "cold", "warm"],
    );
    let sample = Dataset::from_attributes(vec![color, label])
        .unwrap()
        .set_target("label")
        .unwrap();

    let tree = TreeBuilder::new().build(&sample).unwrap();

    // `purple` was never observed during training.
    let unseen = Dataset::from_attributes(vec![
        Attribute::nominal("color", &["purple"]),
    ]).unwrap();

    assert_eq!(tree.predict_class(&unseen, 0).unwrap(), "cold");
}


#[test]
fn scoring_an_unlabeled_sample_is_an_error() {
    let sample = random_sample(20, 42);
    let tree = TreeBuilder::new().build(&sample).unwrap();

    let unlabeled = Dataset::from_attributes(vec![
        Attribute::numeric("f0", [0.5]),
        Attribute::numeric("f1", [0.5]),
        Attribute::numeric("f2", [0.5]),
    ]).unwrap();

    let err = tree.accuracy(&unlabeled).unwrap_err();
    assert!(matches!(err, TreeError::InvalidInput { .. }));
}


#[test]
fn json_roundtrip_preserves_the_tree() {
    let sample = random_sample(40, 2024);
    let tree = TreeBuilder::new().max_depth(3).build(&sample).unwrap();

    let path = std::env::temp_dir().join("minicart_roundtrip.json");
    tree.to_json_file(&path).unwrap();
    let loaded = DecisionTree::from_json_file(&path).unwrap();

    assert_eq!(tree, loaded);

    let n_sample = sample.shape().0;
    for row in 0..n_sample {
        assert_eq!(
            tree.predict(&sample, row).unwrap(),
            loaded.predict(&sample, row).unwrap(),
        );
    }
}
