use crate::graph::{BaseGraph, BitGraph, HashMapGraph};

/// The target graph relabelled to `0..n`, so a vertex index doubles as a
/// digit of the mapping encoding. Dense targets are kept as an adjacency
/// matrix, sparse ones as adjacency sets.
#[derive(Debug, Clone)]
pub enum TargetGraph {
    Dense(BitGraph),
    Sparse(HashMapGraph),
}

impl TargetGraph {
    /// Vertices are numbered in ascending order of their original ids.
    pub fn new<H: BaseGraph>(target: &H, density_threshold: f64) -> Self {
        let vertices = target.sorted_vertices();
        if target.density() >= density_threshold {
            TargetGraph::Dense(BitGraph::relabeled(target, &vertices))
        } else {
            TargetGraph::Sparse(HashMapGraph::relabeled(target, &vertices))
        }
    }

    pub fn is_dense(&self) -> bool {
        matches!(self, TargetGraph::Dense(_))
    }

    pub fn order(&self) -> usize {
        match self {
            TargetGraph::Dense(graph) => graph.order(),
            TargetGraph::Sparse(graph) => graph.order(),
        }
    }

    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        match self {
            TargetGraph::Dense(graph) => graph.has_edge(u, v),
            TargetGraph::Sparse(graph) => graph.has_edge(u, v),
        }
    }

    /// Whether `t` is adjacent to every vertex in `images`.
    #[inline]
    pub fn adjacent_to_all(&self, t: usize, images: &[usize]) -> bool {
        match self {
            TargetGraph::Dense(graph) => {
                let nb = graph.neighborhood_as_bitset(t);
                images.iter().all(|u| nb[*u])
            }
            TargetGraph::Sparse(graph) => {
                let nb = graph.neighborhood_set(t);
                images.iter().all(|u| nb.contains(u))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::generators::{complete, path};
    use crate::graph::{HashMapGraph, MutableGraph};
    use crate::hom_count::TargetGraph;

    #[test]
    fn picks_representation() {
        assert!(TargetGraph::new(&complete(4), 0.5).is_dense());
        assert!(!TargetGraph::new(&path(10), 0.5).is_dense());
        assert!(TargetGraph::new(&path(10), 0.0).is_dense());
        assert!(!TargetGraph::new(&complete(4), 1.1).is_dense());
    }

    #[test]
    fn relabels_ascending() {
        let mut graph = HashMapGraph::new();
        graph.add_edge(10, 30);
        graph.add_edge(30, 20);
        graph.add_vertex(5);
        for threshold in vec![0.0, 1.1] {
            let target = TargetGraph::new(&graph, threshold);
            assert_eq!(target.order(), 4);
            assert!(target.has_edge(1, 3));
            assert!(target.has_edge(3, 2));
            assert!(!target.has_edge(1, 2));
            assert!(!target.has_edge(0, 1));
            assert!(target.adjacent_to_all(3, &[1, 2]));
            assert!(!target.adjacent_to_all(1, &[3, 2]));
            assert!(target.adjacent_to_all(0, &[]));
        }
    }
}
