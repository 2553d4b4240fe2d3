use hom_count::graph::generators::{complete, complete_bipartite, cycle, empty, path, random_gnp, star};
use hom_count::graph::{BaseGraph, HashMapGraph, MutableGraph};
use hom_count::heuristic_elimination_order::{MinDegreeDecomposer, MinFillDecomposer};
use hom_count::tree_decomposition::TreeDecomposition;
use hom_count::{
    count_homomorphisms, count_homomorphisms_brute_force, DecomposerType, HomomorphismCounter,
    NiceNode, NiceTreeDecomposition, NodeType,
};
use num::BigUint;
use proptest::prelude::*;

fn min_fill(graph: &HashMapGraph) -> NiceTreeDecomposition {
    NiceTreeDecomposition::from_tree_decomposition(&MinFillDecomposer::with_graph(graph).compute())
}

fn min_degree(graph: &HashMapGraph) -> NiceTreeDecomposition {
    NiceTreeDecomposition::from_tree_decomposition(
        &MinDegreeDecomposer::with_graph(graph).compute(),
    )
}

fn single_bag(graph: &HashMapGraph) -> TreeDecomposition {
    TreeDecomposition::with_root(graph.vertices().collect())
}

fn node(bag: &[usize], node_type: NodeType, children: &[usize]) -> NiceNode {
    NiceNode {
        bag: bag.to_vec(),
        node_type,
        children: children.to_vec(),
    }
}

/// 4-cycle 0-1-2-3 through bags {0,1,2} and {0,2,3}, joined on {0,2}.
fn hand_built_c4() -> NiceTreeDecomposition {
    NiceTreeDecomposition::new(vec![
        node(&[], NodeType::Leaf, &[]),
        node(&[0], NodeType::Introduce, &[0]),
        node(&[0, 2], NodeType::Introduce, &[1]),
        node(&[0, 1, 2], NodeType::Introduce, &[2]),
        node(&[0, 2], NodeType::Forget, &[3]),
        node(&[], NodeType::Leaf, &[]),
        node(&[2], NodeType::Introduce, &[5]),
        node(&[2, 3], NodeType::Introduce, &[6]),
        node(&[0, 2, 3], NodeType::Introduce, &[7]),
        node(&[0, 2], NodeType::Forget, &[8]),
        node(&[0, 2], NodeType::Join, &[4, 9]),
        node(&[2], NodeType::Forget, &[10]),
        node(&[], NodeType::Forget, &[11]),
    ])
    .unwrap()
}

#[test]
fn known_closed_forms() {
    let counter = HomomorphismCounter::default();
    for n in 2..8u32 {
        assert_eq!(
            counter.count(&complete(2), &complete(n as usize)).unwrap(),
            BigUint::from(n * (n - 1))
        );
    }
    assert_eq!(
        counter.count(&cycle(4), &complete_bipartite(2, 4)).unwrap(),
        BigUint::from(128u32)
    );
    assert_eq!(
        counter.count(&star(4), &complete(4)).unwrap(),
        BigUint::from(324u32)
    );
}

#[test]
fn hand_built_decomposition() {
    let ntd = hand_built_c4();
    let source = cycle(4);
    assert!(ntd.validate_for(&source).is_ok());
    assert_eq!(ntd.width(), 2);
    let target = complete_bipartite(2, 4);
    assert_eq!(
        count_homomorphisms(&source, &target, &ntd).unwrap(),
        BigUint::from(128u32)
    );
    assert_eq!(
        count_homomorphisms(&source, &target, &min_fill(&source)).unwrap(),
        BigUint::from(128u32)
    );
}

#[test]
fn degenerate_targets() {
    let counter = HomomorphismCounter::default();
    assert_eq!(counter.count(&path(2), &empty(6)).unwrap(), BigUint::from(0u32));
    assert_eq!(
        counter.count(&path(1), &HashMapGraph::new()).unwrap(),
        BigUint::from(0u32)
    );
    assert_eq!(
        counter
            .count(&HashMapGraph::new(), &HashMapGraph::new())
            .unwrap(),
        BigUint::from(1u32)
    );
}

#[test]
fn odd_cycles_into_bipartite_targets() {
    let counter = HomomorphismCounter::default();
    for n in vec![3, 5, 7] {
        assert_eq!(
            counter
                .count(&cycle(n), &complete_bipartite(3, 3))
                .unwrap(),
            BigUint::from(0u32)
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn matches_brute_force(
        source_order in 0usize..7,
        source_density in 0.0f64..1.0,
        target_order in 0usize..5,
        target_density in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        let source = random_gnp(source_order, source_density, seed);
        let target = random_gnp(target_order, target_density, seed.wrapping_add(1));
        let expected = count_homomorphisms_brute_force(&source, &target).unwrap();
        prop_assert_eq!(count_homomorphisms(&source, &target, &min_fill(&source)).unwrap(), expected);
    }

    #[test]
    fn independent_of_decomposition(
        source_order in 1usize..9,
        source_density in 0.0f64..1.0,
        target_order in 1usize..5,
        target_density in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        let source = random_gnp(source_order, source_density, seed);
        let target = random_gnp(target_order, target_density, seed.wrapping_add(1));
        let by_min_fill = count_homomorphisms(&source, &target, &min_fill(&source)).unwrap();
        let by_min_degree = count_homomorphisms(&source, &target, &min_degree(&source)).unwrap();
        let by_single_bag = HomomorphismCounter::default()
            .decomposer(DecomposerType::Custom(single_bag))
            .count(&source, &target)
            .unwrap();
        prop_assert_eq!(&by_min_fill, &by_min_degree);
        prop_assert_eq!(&by_min_fill, &by_single_bag);
    }

    #[test]
    fn dense_and_sparse_targets_agree(
        source_order in 1usize..8,
        target_order in 1usize..6,
        target_density in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        let source = random_gnp(source_order, 0.4, seed);
        let target = random_gnp(target_order, target_density, seed.wrapping_add(1));
        let ntd = min_fill(&source);
        let dense = HomomorphismCounter::default()
            .density_threshold(0.0)
            .count_with(&source, &target, &ntd)
            .unwrap();
        let sparse = HomomorphismCounter::default()
            .density_threshold(2.0)
            .count_with(&source, &target, &ntd)
            .unwrap();
        prop_assert_eq!(dense, sparse);
    }
}
