use crate::error::NonSimple;
use crate::graph::base_graph::BaseGraph;
use crate::graph::mutable_graph::MutableGraph;
use fxhash::{FxHashMap, FxHashSet};
use std::collections::TryReserveError;

/// Sparse adjacency-set graph over arbitrary `usize` vertex ids.
#[derive(Clone, Debug, Default)]
pub struct HashMapGraph {
    data: FxHashMap<usize, FxHashSet<usize>>,
}

impl HashMapGraph {
    /// Graph on vertices `0..order` with the given edges. Self loops and
    /// repeated edges are rejected rather than dropped.
    pub fn from_edges(order: usize, edges: &[(usize, usize)]) -> Result<Self, NonSimple> {
        let mut graph = Self::with_capacity(order);
        for v in 0..order {
            graph.add_vertex(v);
        }
        for (u, v) in edges.iter().copied() {
            graph.try_add_edge(u, v)?;
        }
        Ok(graph)
    }

    pub fn try_add_edge(&mut self, u: usize, v: usize) -> Result<(), NonSimple> {
        if u == v {
            return Err(NonSimple::SelfLoop(u));
        }
        if self.has_edge(u, v) {
            return Err(NonSimple::MultiEdge((u, v)));
        }
        self.add_edge(u, v);
        Ok(())
    }

    /// Empty graph with room for `capacity` vertices. Fails instead of
    /// aborting when the table cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut data = FxHashMap::default();
        data.try_reserve(capacity)?;
        Ok(Self { data })
    }

    pub fn neighborhood_set(&self, u: usize) -> &FxHashSet<usize> {
        &self.data[&u]
    }

    /// Copies `og_graph`, renaming vertex `og_vertices[i]` to `i`. Vertices
    /// outside `og_vertices` are dropped.
    pub fn relabeled<G: BaseGraph>(og_graph: &G, og_vertices: &[usize]) -> Self {
        let og_to_self: FxHashMap<usize, usize> = og_vertices
            .iter()
            .copied()
            .enumerate()
            .map(|(i, v)| (v, i))
            .collect();
        let mut graph = Self::with_capacity(og_vertices.len());
        for (a, v) in og_vertices.iter().copied().enumerate() {
            graph.add_vertex(a);
            for u in og_graph.neighborhood(v) {
                if let Some(b) = og_to_self.get(&u) {
                    graph.add_edge(a, *b);
                }
            }
        }
        graph
    }

    pub fn from_graph<G: BaseGraph>(graph: &G) -> Self {
        let data = graph
            .vertices()
            .map(|v| (v, graph.neighborhood(v).collect()))
            .collect();
        HashMapGraph { data }
    }
}

impl MutableGraph for HashMapGraph {
    fn add_vertex(&mut self, u: usize) {
        self.data.entry(u).or_insert_with(FxHashSet::default);
    }

    fn remove_vertex(&mut self, u: usize) {
        if let Some(neighbors) = self.data.remove(&u) {
            for i in neighbors.iter() {
                if let Some(x) = self.data.get_mut(i) {
                    x.remove(&u);
                }
            }
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) {
        assert_ne!(u, v);
        self.data.entry(u).or_insert_with(FxHashSet::default).insert(v);
        self.data.entry(v).or_insert_with(FxHashSet::default).insert(u);
    }

    fn remove_edge(&mut self, u: usize, v: usize) {
        if let Some(x) = self.data.get_mut(&u) {
            x.remove(&v);
        }
        if let Some(x) = self.data.get_mut(&v) {
            x.remove(&u);
        }
    }

    fn eliminate_vertex(&mut self, u: usize) {
        let nb = match self.data.remove(&u) {
            Some(nb) => nb,
            None => return,
        };
        for i in &nb {
            if let Some(x) = self.data.get_mut(i) {
                x.remove(&u);
            }
        }
        for i in &nb {
            for j in nb.iter().filter(|j| i < *j) {
                self.add_edge(*i, *j);
            }
        }
    }

    fn new() -> Self {
        HashMapGraph {
            data: FxHashMap::default(),
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        HashMapGraph {
            data: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }
}

impl BaseGraph for HashMapGraph {
    fn degree(&self, u: usize) -> usize {
        self.data.get(&u).map_or(0, |nb| nb.len())
    }

    fn order(&self) -> usize {
        self.data.len()
    }

    fn has_edge(&self, u: usize, v: usize) -> bool {
        self.data.get(&u).map_or(false, |nb| nb.contains(&v))
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.data.keys().copied())
    }

    fn neighborhood(&self, u: usize) -> Box<dyn Iterator<Item = usize> + '_> {
        match self.data.get(&u) {
            Some(nb) => Box::new(nb.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}
