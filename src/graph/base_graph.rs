use crate::error::NonSimple;
use std::fmt::Debug;

pub trait BaseGraph: Clone + Debug {
    fn degree(&self, u: usize) -> usize;
    fn order(&self) -> usize;
    fn has_edge(&self, u: usize, v: usize) -> bool;
    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_>;
    fn neighborhood(&self, u: usize) -> Box<dyn Iterator<Item = usize> + '_>;

    fn edge_count(&self) -> usize {
        self.vertices().map(|v| self.degree(v)).sum::<usize>() / 2
    }

    /// Ratio of present edges to possible edges, `0` for fewer than two vertices.
    fn density(&self) -> f64 {
        let n = self.order();
        if n < 2 {
            return 0.0;
        }
        (2 * self.edge_count()) as f64 / (n * (n - 1)) as f64
    }

    fn fill_in_count(&self, u: usize) -> usize {
        let nb: Vec<usize> = self.neighborhood(u).collect();
        let mut count = 0;
        for (i, x) in nb.iter().enumerate() {
            for y in nb.iter().skip(i + 1) {
                if !self.has_edge(*x, *y) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Rejects self loops and edges present in one direction only. Repeated
    /// edges cannot be represented by adjacency sets.
    fn check_simple(&self) -> Result<(), NonSimple> {
        for v in self.vertices() {
            for u in self.neighborhood(v) {
                if u == v {
                    return Err(NonSimple::SelfLoop(v));
                }
                if !self.has_edge(u, v) {
                    return Err(NonSimple::DirectedEdge((v, u)));
                }
            }
        }
        Ok(())
    }

    /// All vertices in ascending order.
    fn sorted_vertices(&self) -> Vec<usize> {
        let mut vertices: Vec<usize> = self.vertices().collect();
        vertices.sort_unstable();
        vertices
    }
}
