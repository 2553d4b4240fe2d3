//! Transition rules filling the count vector of one node from the vectors of
//! its children. Entry `m` of a vector counts the homomorphisms of the part of
//! the source below the node that agree with the bag assignment encoded by
//! `m`.

use crate::graph::BaseGraph;
use crate::hom_count::TargetGraph;
use crate::mapping::{extract, insert, power};
use crate::nice_tree_decomposition::NodeChange;
use num::{BigUint, One, Zero};

/// The empty assignment, counted once.
pub fn leaf() -> Vec<BigUint> {
    vec![BigUint::one()]
}

/// Positions within `child_bag` of the source neighbours of `vertex`.
pub fn neighbor_positions<G: BaseGraph>(source: &G, child_bag: &[usize], vertex: usize) -> Vec<usize> {
    child_bag
        .iter()
        .enumerate()
        .filter(|(_, u)| source.has_edge(vertex, **u))
        .map(|(position, _)| position)
        .collect()
}

/// Extends every child assignment by each target vertex for the introduced
/// vertex, keeping the child's count where all edges to already placed
/// neighbours land on target edges and zero elsewhere.
///
/// `neighbor_positions` are the child bag positions holding neighbours of the
/// introduced vertex, `len` is the length of the result, `|V(H)|^|B|`.
pub fn introduce(
    child: &[BigUint],
    neighbor_positions: &[usize],
    change: NodeChange,
    len: usize,
    target: &TargetGraph,
) -> Vec<BigUint> {
    let base = target.order();
    let mut result = vec![BigUint::zero(); len];
    if base == 0 {
        return result;
    }
    let step = power(base, change.position);

    let mut images = Vec::with_capacity(neighbor_positions.len());
    for (child_mapping, count) in child.iter().enumerate() {
        if count.is_zero() {
            continue;
        }
        images.clear();
        images.extend(
            neighbor_positions
                .iter()
                .map(|position| extract(child_mapping, *position, base)),
        );
        let mut mapping = insert(0, child_mapping, change.position, base);
        for t in 0..base {
            if target.adjacent_to_all(t, &images) {
                result[mapping] = count.clone();
            }
            mapping += step;
        }
    }
    result
}

/// Sums the child's counts over every image of the forgotten vertex.
pub fn forget(child: &[BigUint], change: NodeChange, len: usize, base: usize) -> Vec<BigUint> {
    if base == 0 {
        return vec![BigUint::zero(); len];
    }
    let step = power(base, change.position);
    (0..len)
        .map(|mapping| {
            let mut child_mapping = insert(0, mapping, change.position, base);
            let mut sum = BigUint::zero();
            for _ in 0..base {
                sum += &child[child_mapping];
                child_mapping += step;
            }
            sum
        })
        .collect()
}

/// Pointwise product of two vectors over the same bag.
pub fn join(left: &[BigUint], right: &[BigUint]) -> Vec<BigUint> {
    debug_assert_eq!(left.len(), right.len());
    left.iter().zip(right.iter()).map(|(l, r)| l * r).collect()
}

#[cfg(test)]
mod tests {
    use crate::graph::generators::{complete, path};
    use crate::hom_count::evaluators::{forget, introduce, join, leaf, neighbor_positions};
    use crate::hom_count::TargetGraph;
    use crate::mapping::{encode, extract, insert, remove};
    use crate::nice_tree_decomposition::NodeChange;
    use num::BigUint;

    fn counts(values: &[u32]) -> Vec<BigUint> {
        values.iter().map(|v| BigUint::from(*v)).collect()
    }

    #[test]
    fn leaf_is_identity() {
        assert_eq!(leaf(), counts(&[1]));
    }

    #[test]
    fn introduce_checks_edges() {
        // source: edge 0-1, target: path 0-1-2
        let source = path(2);
        let target = TargetGraph::new(&path(3), 0.5);
        let first = introduce(
            &leaf(),
            &[],
            NodeChange {
                vertex: 0,
                position: 0,
            },
            3,
            &target,
        );
        assert_eq!(first, counts(&[1, 1, 1]));

        let positions = neighbor_positions(&source, &[0], 1);
        assert_eq!(positions, vec![0]);
        let second = introduce(
            &first,
            &positions,
            NodeChange {
                vertex: 1,
                position: 1,
            },
            9,
            &target,
        );
        for a in 0..3 {
            for b in 0..3 {
                let expected = if target.has_edge(a, b) { 1u32 } else { 0 };
                assert_eq!(second[encode(&[a, b], 3)], BigUint::from(expected));
            }
        }
    }

    #[test]
    fn introduce_copies_child_counts() {
        // vertex 5 has no neighbours in the bag, every slot gets the child's count
        let source = path(2);
        let target = TargetGraph::new(&complete(2), 0.5);
        let child = counts(&[3, 7]);
        let positions = neighbor_positions(&source, &[1], 5);
        assert!(positions.is_empty());
        let result = introduce(
            &child,
            &positions,
            NodeChange {
                vertex: 5,
                position: 0,
            },
            4,
            &target,
        );
        assert_eq!(result, counts(&[3, 3, 7, 7]));
    }

    #[test]
    fn forget_sums_over_images() {
        let child = counts(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        // digit 0 varies fastest
        let at_front = forget(
            &child,
            NodeChange {
                vertex: 0,
                position: 0,
            },
            3,
            3,
        );
        assert_eq!(at_front, counts(&[6, 15, 24]));
        let at_back = forget(
            &child,
            NodeChange {
                vertex: 0,
                position: 1,
            },
            3,
            3,
        );
        assert_eq!(at_back, counts(&[12, 15, 18]));
    }

    #[test]
    fn forget_after_introduce() {
        // forgetting the vertex just introduced weighs every child assignment
        // by the number of admissible images of that vertex
        let source = path(3);
        let target = TargetGraph::new(&complete(3), 0.5);
        let child = counts(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let change = NodeChange {
            vertex: 1,
            position: 1,
        };
        let positions = neighbor_positions(&source, &[0, 2], 1);
        assert_eq!(positions, vec![0, 1]);
        let introduced = introduce(&child, &positions, change, 27, &target);
        let forgotten = forget(&introduced, change, 9, 3);
        for mapping in 0..9 {
            let (a, c) = (extract(mapping, 0, 3), extract(mapping, 1, 3));
            let images = (0..3).filter(|t| *t != a && *t != c).count();
            assert_eq!(forgotten[mapping], &child[mapping] * BigUint::from(images));
            for t in 0..3 {
                let full = insert(t, mapping, 1, 3);
                assert_eq!(remove(full, 1, 3), mapping);
                if t == a || t == c {
                    assert_eq!(introduced[full], BigUint::from(0u32));
                } else {
                    assert_eq!(introduced[full], child[mapping]);
                }
            }
        }
    }

    #[test]
    fn join_commutes() {
        let left = counts(&[0, 1, 2, 3]);
        let right = counts(&[5, 6, 7, 8]);
        assert_eq!(join(&left, &right), counts(&[0, 6, 14, 24]));
        assert_eq!(join(&left, &right), join(&right, &left));
        let third = counts(&[2, 2, 0, 1]);
        assert_eq!(
            join(&join(&left, &right), &third),
            join(&left, &join(&right, &third))
        );
    }
}
