use crate::error::HomCountError;
use crate::graph::BaseGraph;
use num::{BigUint, One, Zero};

/// Counts homomorphisms by trying every assignment, vertex by vertex in
/// ascending order, and cutting a branch as soon as an edge to an already
/// assigned vertex misses the target. Exponential in `|V(source)|`; meant as a
/// reference for small graphs.
pub fn count_homomorphisms_brute_force<G: BaseGraph, H: BaseGraph>(
    source: &G,
    target: &H,
) -> Result<BigUint, HomCountError> {
    source.check_simple()?;
    target.check_simple()?;
    let vertices = source.sorted_vertices();
    let earlier_neighbors: Vec<Vec<usize>> = vertices
        .iter()
        .enumerate()
        .map(|(i, v)| {
            (0..i)
                .filter(|j| source.has_edge(*v, vertices[*j]))
                .collect()
        })
        .collect();
    let images = target.sorted_vertices();
    let mut assignment = Vec::with_capacity(vertices.len());
    Ok(extend(
        &mut assignment,
        &earlier_neighbors,
        &images,
        target,
    ))
}

fn extend<H: BaseGraph>(
    assignment: &mut Vec<usize>,
    earlier_neighbors: &[Vec<usize>],
    images: &[usize],
    target: &H,
) -> BigUint {
    let position = assignment.len();
    if position == earlier_neighbors.len() {
        return BigUint::one();
    }
    let mut count = BigUint::zero();
    for t in images.iter().copied() {
        if earlier_neighbors[position]
            .iter()
            .all(|j| target.has_edge(assignment[*j], t))
        {
            assignment.push(t);
            count += extend(assignment, earlier_neighbors, images, target);
            assignment.pop();
        }
    }
    count
}
