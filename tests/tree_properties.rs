use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use symgp::data::InMemoryDataset;
use symgp::engines::evaluation::{evaluate, fitness};
use symgp::engines::generation::generator::LEAF_ONLY_DEPTH;
use symgp::engines::generation::{crossover, mutate, Program, ProgramGenerator};
use symgp::functions::primitives::{safe_div, DIV};
use symgp::functions::OperatorRegistry;
use symgp::{Node, SymgpError};

fn features() -> Vec<String> {
    vec!["x".to_string(), "y".to_string(), "z".to_string()]
}

fn random_tree(seed: u64) -> Node {
    let registry = OperatorRegistry::new();
    let names = features();
    let generator = ProgramGenerator::new(&registry, &names).unwrap();
    generator.random_program(0, &mut StdRng::seed_from_u64(seed))
}

/// A random tree with at least one operator, so it has an edit point
fn random_internal_tree(seed: u64) -> Node {
    let mut offset = 0;
    loop {
        let tree = random_tree(seed.wrapping_add(offset));
        if !tree.is_leaf() {
            return tree;
        }
        offset += 1;
    }
}

fn check_structure(node: &Node) {
    match node {
        Node::Leaf { feature } => assert!(features().contains(feature)),
        Node::Internal { operator, children } => {
            assert_eq!(children.len(), operator.arity());
            let child_total: usize = children.iter().map(Node::size).sum();
            assert_eq!(node.size(), 1 + child_total);
            children.iter().for_each(check_structure);
        }
    }
}

fn row(x: f64, y: f64, z: f64) -> HashMap<String, f64> {
    HashMap::from([
        ("x".to_string(), x),
        ("y".to_string(), y),
        ("z".to_string(), z),
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_trees_respect_arity(seed in any::<u64>()) {
        let tree = random_tree(seed);
        check_structure(&tree);
        prop_assert!(tree.validate().is_ok());
        prop_assert!(tree.depth() <= LEAF_ONLY_DEPTH);
    }

    #[test]
    fn generation_is_reproducible(seed in any::<u64>()) {
        prop_assert_eq!(random_tree(seed), random_tree(seed));
    }

    #[test]
    fn mutation_keeps_structure_and_parent(tree_seed in any::<u64>(), op_seed in any::<u64>()) {
        let registry = OperatorRegistry::new();
        let names = features();
        let generator = ProgramGenerator::new(&registry, &names).unwrap();
        let parent = Program::new(random_internal_tree(tree_seed));
        let before = parent.clone();

        let first = mutate(&parent, &generator, &mut StdRng::seed_from_u64(op_seed)).unwrap();
        let second = mutate(&parent, &generator, &mut StdRng::seed_from_u64(op_seed)).unwrap();

        prop_assert_eq!(&parent, &before);
        prop_assert_eq!(&first.root, &second.root);
        check_structure(&first.root);
    }

    #[test]
    fn crossover_keeps_structure_and_parents(
        a_seed in any::<u64>(),
        b_seed in any::<u64>(),
        op_seed in any::<u64>(),
    ) {
        let a = Program::new(random_internal_tree(a_seed));
        let b = Program::new(random_internal_tree(b_seed));
        let (a_before, b_before) = (a.clone(), b.clone());

        let first = crossover(&a, &b, &mut StdRng::seed_from_u64(op_seed)).unwrap();
        let second = crossover(&a, &b, &mut StdRng::seed_from_u64(op_seed)).unwrap();

        prop_assert_eq!(&a, &a_before);
        prop_assert_eq!(&b, &b_before);
        prop_assert_eq!(&first.root, &second.root);
        check_structure(&first.root);
    }

    #[test]
    fn evaluation_is_total_over_known_features(
        seed in any::<u64>(),
        x in -1e3f64..1e3,
        y in -1e3f64..1e3,
        z in -1e3f64..1e3,
    ) {
        let tree = random_tree(seed);
        prop_assert!(evaluate(&tree, &row(x, y, z)).is_ok());
    }

    #[test]
    fn division_by_zero_yields_numerator(numerator in -1e6f64..1e6) {
        prop_assert_eq!(safe_div(numerator, 0.0), numerator);
        prop_assert_eq!(DIV.apply(&[numerator, 0.0]), numerator);
    }

    #[test]
    fn fitness_grows_with_size(
        error in 0.0f64..1e3,
        size in 1usize..200,
        extra in 0usize..200,
    ) {
        let small = fitness(size, &[error], &[0.0], 0.5).unwrap();
        let large = fitness(size + extra, &[error], &[0.0], 0.5).unwrap();
        prop_assert!(small <= large);
    }

    #[test]
    fn fitness_grows_with_error(
        low in 0.0f64..1e3,
        gap in 0.0f64..1e3,
        size in 1usize..200,
    ) {
        let better = fitness(size, &[low], &[0.0], 0.5).unwrap();
        let worse = fitness(size, &[low + gap], &[0.0], 0.5).unwrap();
        prop_assert!(better <= worse);
    }
}

#[test]
fn missing_feature_is_a_schema_error() {
    let tree = Node::leaf("w");
    assert!(matches!(
        evaluate(&tree, &row(1.0, 2.0, 3.0)),
        Err(SymgpError::Schema(_))
    ));
}

#[test]
fn predictions_line_up_with_rows() {
    let data = InMemoryDataset::from_rows(
        vec!["x".to_string(), "y".to_string()],
        &[vec![1.0, 0.0], vec![6.0, 3.0]],
        vec![0.0, 0.0],
    )
    .unwrap();
    let tree = Node::internal(&DIV, vec![Node::leaf("x"), Node::leaf("y")]).unwrap();
    let predictions = Program::new(tree).predict(&data).unwrap();
    assert_eq!(predictions, vec![1.0, 2.0]);
}
