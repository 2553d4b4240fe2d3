//! Standard graph families on vertices `0..n`.

use crate::graph::{HashMapGraph, MutableGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn with_vertices(n: usize) -> HashMapGraph {
    let mut graph = HashMapGraph::with_capacity(n);
    for v in 0..n {
        graph.add_vertex(v);
    }
    graph
}

/// `n` isolated vertices.
pub fn empty(n: usize) -> HashMapGraph {
    with_vertices(n)
}

pub fn path(n: usize) -> HashMapGraph {
    let mut graph = with_vertices(n);
    for v in 1..n {
        graph.add_edge(v - 1, v);
    }
    graph
}

/// Cycle on `n >= 3` vertices; smaller `n` gives a path.
pub fn cycle(n: usize) -> HashMapGraph {
    let mut graph = path(n);
    if n >= 3 {
        graph.add_edge(n - 1, 0);
    }
    graph
}

pub fn complete(n: usize) -> HashMapGraph {
    let mut graph = with_vertices(n);
    let vertices: Vec<usize> = (0..n).collect();
    graph.make_clique(&vertices);
    graph
}

/// Parts `0..a` and `a..a + b`.
pub fn complete_bipartite(a: usize, b: usize) -> HashMapGraph {
    let mut graph = with_vertices(a + b);
    for u in 0..a {
        for v in a..a + b {
            graph.add_edge(u, v);
        }
    }
    graph
}

/// Center `0` with `leaves` pendant vertices.
pub fn star(leaves: usize) -> HashMapGraph {
    complete_bipartite(1, leaves)
}

/// Outer 5-cycle `0..5`, inner pentagram `5..10`.
pub fn petersen() -> HashMapGraph {
    let mut graph = with_vertices(10);
    for i in 0..5 {
        graph.add_edge(i, (i + 1) % 5);
        graph.add_edge(i, i + 5);
        graph.add_edge(5 + i, 5 + (i + 2) % 5);
    }
    graph
}

/// Erdős–Rényi graph: each of the `n(n-1)/2` edges is present with
/// probability `p`, clamped to `[0, 1]`.
pub fn random_gnp(n: usize, p: f64, seed: u64) -> HashMapGraph {
    let p = p.max(0.0).min(1.0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = with_vertices(n);
    for u in 0..n {
        for v in u + 1..n {
            if rng.gen_bool(p) {
                graph.add_edge(u, v);
            }
        }
    }
    graph
}
