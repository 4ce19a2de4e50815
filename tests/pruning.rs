use minicart::prelude::*;

// A sample with some class overlap along a single axis,
// so a fully grown tree is strictly deeper than a pruned one.
fn overlapping_sample() -> Dataset {
    let x = Attribute::numeric(
        "x",
        [
            0.0, 1.0, 2.0, 3.0, 4.0, 5.0,
            6.0, 7.0, 8.0, 9.0, 10.0, 11.0,
        ],
    );
    let label = Attribute::nominal(
        "label",
        &["a", "a", "b", "a", "b", "b", "a", "b", "b", "b", "a", "b"],
    );

    Dataset::from_attributes(vec![x, label])
        .unwrap()
        .set_target("label")
        .unwrap()
}


#[test]
fn unreachable_improvement_threshold_keeps_the_root_a_leaf() {
    // Three records of one class and one of the other.
    let a = Attribute::numeric("a", [1.0, 2.0, 3.0, 4.0]);
    let label = Attribute::nominal("label", &["X", "X", "X", "Y"]);
    let sample = Dataset::from_attributes(vec![a, label])
        .unwrap()
        .set_target("label")
        .unwrap();

    let tree = TreeBuilder::new()
        .min_improvement(1.0)
        .build(&sample)
        .unwrap();

    assert_eq!(tree.n_nodes(), 1);

    // The leaf holds the class counts {X: 3, Y: 1}.
    let distribution = tree.predict(&sample, 0).unwrap();
    let x = tree.classes()
        .iter()
        .position(|class| class == "X")
        .unwrap();
    assert_eq!(distribution[x], 0.75);
    assert_eq!(tree.predict_class(&sample, 0).unwrap(), "X");
}


#[test]
fn raising_min_split_size_never_deepens_the_tree() {
    let sample = overlapping_sample();

    let mut previous = usize::MAX;
    for min_split_size in [2, 3, 4, 6, 8, 12, 100] {
        let tree = TreeBuilder::new()
            .min_split_size(min_split_size)
            .build(&sample)
            .unwrap();

        assert!(tree.depth() <= previous);
        previous = tree.depth();
    }
}


#[test]
fn raising_min_improvement_never_deepens_the_tree() {
    let sample = overlapping_sample();

    let mut previous = usize::MAX;
    for min_improvement in [0.0, 0.01, 0.05, 0.1, 0.25, 1.0] {
        let tree = TreeBuilder::new()
            .min_improvement(min_improvement)
            .build(&sample)
            .unwrap();

        assert!(tree.depth() <= previous);
        previous = tree.depth();
    }
}


#[test]
fn max_depth_caps_the_tree() {
    // The xor pattern needs two levels of splits.
    let a = Attribute::numeric("a", [0.0, 0.0, 1.0, 1.0]);
    let b = Attribute::numeric("b", [0.0, 1.0, 0.0, 1.0]);
    let label = Attribute::nominal("label", &["n", "p", "p", "n"]);
    let sample = Dataset::from_attributes(vec![a, b, label])
        .unwrap()
        .set_target("label")
        .unwrap();

    let full = TreeBuilder::new().build(&sample).unwrap();
    assert_eq!(full.depth(), 2);
    assert_eq!(full.accuracy(&sample).unwrap(), 1.0);

    let capped = TreeBuilder::new()
        .max_depth(1)
        .build(&sample)
        .unwrap();
    assert!(capped.depth() <= 1);

    let stump = TreeBuilder::new()
        .max_depth(0)
        .build(&sample)
        .unwrap();
    assert_eq!(stump.n_nodes(), 1);
}


#[test]
fn rejects_nonsense_stopping_parameters() {
    let a = Attribute::numeric("a", [0.0, 1.0]);
    let label = Attribute::nominal("label", &["n", "p"]);
    let sample = Dataset::from_attributes(vec![a, label])
        .unwrap()
        .set_target("label")
        .unwrap();

    let err = TreeBuilder::new()
        .min_split_size(1)
        .build(&sample)
        .unwrap_err();
    assert!(matches!(err, TreeError::InvalidConfig { .. }));

    let err = TreeBuilder::new()
        .min_improvement(-0.1)
        .build(&sample)
        .unwrap_err();
    assert!(matches!(err, TreeError::InvalidConfig { .. }));

    let err = TreeBuilder::new()
        .min_improvement(f64::NAN)
        .build(&sample)
        .unwrap_err();
    assert!(matches!(err, TreeError::InvalidConfig { .. }));
}
