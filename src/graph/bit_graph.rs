use crate::datastructures::BitSet;
use crate::graph::base_graph::BaseGraph;
use fxhash::FxHashMap;

/// Dense adjacency-matrix graph over vertices `0..n`. Edge queries are a
/// single bit lookup, which pays off for dense target graphs.
#[derive(Clone, Debug)]
pub struct BitGraph {
    graph: Vec<BitSet>,
}

/// Rows of a square adjacency matrix. Nothing is checked here; counting
/// rejects a matrix that is not symmetric or has a set diagonal.
impl From<Vec<BitSet>> for BitGraph {
    fn from(graph: Vec<BitSet>) -> Self {
        Self { graph }
    }
}

impl BitGraph {
    /// Copies `og_graph`, renaming vertex `og_vertices[i]` to `i`.
    pub fn relabeled<G: BaseGraph>(og_graph: &G, og_vertices: &[usize]) -> Self {
        let og_to_self: FxHashMap<usize, usize> = og_vertices
            .iter()
            .copied()
            .enumerate()
            .map(|(i, v)| (v, i))
            .collect();
        let mut graph = vec![BitSet::new(og_vertices.len()); og_vertices.len()];
        for (a, v) in og_vertices.iter().copied().enumerate() {
            for u in og_graph.neighborhood(v) {
                if let Some(b) = og_to_self.get(&u) {
                    graph[a].set_bit(*b);
                }
            }
        }
        Self { graph }
    }

    pub fn neighborhood_as_bitset(&self, u: usize) -> &BitSet {
        &self.graph[u]
    }
}

impl BaseGraph for BitGraph {
    fn degree(&self, u: usize) -> usize {
        self.graph[u].cardinality()
    }

    fn order(&self) -> usize {
        self.graph.len()
    }

    #[inline]
    fn has_edge(&self, u: usize, v: usize) -> bool {
        self.graph[u][v]
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(0..self.graph.len())
    }

    fn neighborhood(&self, u: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.graph[u].iter())
    }
}
