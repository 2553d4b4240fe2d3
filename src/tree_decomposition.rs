use crate::datastructures::BitSet;
use crate::error::{DecompositionError, DecompositionErrorKind};
use crate::graph::BaseGraph;
use fxhash::FxHashSet;
use std::cmp::max;

/// An (unrooted) tree decomposition as produced by the elimination
/// heuristics: bags with undirected neighbor links, `root` marking the bag the
/// traversal starts from.
#[derive(Debug, Clone, Default)]
pub struct TreeDecomposition {
    pub bags: Vec<Bag>,
    pub root: Option<usize>,
    pub max_bag_size: usize,
}

#[derive(Debug, Default, Clone)]
pub struct Bag {
    pub id: usize,
    pub vertex_set: FxHashSet<usize>,
    pub neighbors: FxHashSet<usize>,
}

impl TreeDecomposition {
    pub fn with_root(vertex_set: FxHashSet<usize>) -> Self {
        let mut td = Self::default();
        td.add_bag(vertex_set);
        td
    }

    /// Largest bag size minus one, `0` for an empty decomposition.
    pub fn width(&self) -> usize {
        self.max_bag_size.saturating_sub(1)
    }

    pub fn add_bag(&mut self, vertex_set: FxHashSet<usize>) -> usize {
        let id = self.bags.len();
        if id == 0 {
            self.root = Some(id);
        }
        self.max_bag_size = max(self.max_bag_size, vertex_set.len());
        self.bags.push(Bag {
            id,
            vertex_set,
            neighbors: FxHashSet::default(),
        });
        id
    }

    pub fn add_edge(&mut self, b1: usize, b2: usize) {
        assert!(b1 < self.bags.len());
        assert!(b2 < self.bags.len());
        assert_ne!(b1, b2);
        self.bags[b1].neighbors.insert(b2);
        self.bags[b2].neighbors.insert(b1);
    }

    /// Merges every bag into a neighbor whose vertex set contains it, until no
    /// bag is a subset of an adjacent one.
    pub fn flatten(&mut self) {
        while let Some((parent, child)) = self.find_combinable() {
            self.reroute(child, parent);
            self.remove_bag(child);
        }
    }

    fn find_combinable(&self) -> Option<(usize, usize)> {
        for b in &self.bags {
            if let Some(n) = b
                .neighbors
                .iter()
                .find(|n| self.bags[**n].vertex_set.is_subset(&b.vertex_set))
            {
                return Some((b.id, *n));
            }
        }
        None
    }

    /// Moves all links of `old_bag` over to `parent_idx`.
    fn reroute(&mut self, old_bag: usize, parent_idx: usize) {
        let old_neighbors = std::mem::take(&mut self.bags[old_bag].neighbors);
        for neighbor_idx in old_neighbors {
            self.bags[neighbor_idx].neighbors.remove(&old_bag);
            if neighbor_idx != parent_idx {
                self.bags[neighbor_idx].neighbors.insert(parent_idx);
                self.bags[parent_idx].neighbors.insert(neighbor_idx);
            }
        }
        if self.root == Some(old_bag) {
            self.root = Some(parent_idx);
        }
    }

    fn remove_bag(&mut self, id: usize) {
        assert!(self.bags[id].neighbors.is_empty());
        let old_last = self.bags.len() - 1;
        self.bags.swap_remove(id);
        if id != old_last {
            self.bags[id].id = id;
            for neighbor in self.bags[id].neighbors.clone() {
                assert!(self.bags[neighbor].neighbors.remove(&old_last));
                self.bags[neighbor].neighbors.insert(id);
            }
            if self.root == Some(old_last) {
                self.root = Some(id);
            }
        }
    }

    pub fn dfs(&self) -> TreeDecompositionIterator<'_> {
        let mut visited = BitSet::new(self.bags.len());
        let stack = match self.root {
            Some(root) => {
                visited.set_bit(root);
                vec![root]
            }
            None => vec![],
        };
        TreeDecompositionIterator {
            td: self,
            stack,
            visited,
        }
    }

    pub fn verify<G: BaseGraph>(&self, graph: &G) -> Result<(), DecompositionError> {
        if !self.is_connected() {
            return Err(DecompositionError::global(DecompositionErrorKind::Unreachable));
        }

        if self.is_cyclic() {
            return Err(DecompositionError::global(DecompositionErrorKind::HasCycle));
        }

        if let Some(v) = self.get_missing_vertex(graph) {
            return Err(DecompositionError::global(
                DecompositionErrorKind::MissingVertex(v),
            ));
        }

        if let Some(e) = self.get_missing_edge(graph) {
            return Err(DecompositionError::global(
                DecompositionErrorKind::MissingEdge(e),
            ));
        }

        if let Some(v) = self.get_vertex_not_inducing_subtree(graph) {
            return Err(DecompositionError::global(
                DecompositionErrorKind::NotInducingSubtree(v),
            ));
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.dfs().count() == self.bags.len()
    }

    /// A connected graph is a tree iff it has exactly one edge less than nodes.
    fn is_cyclic(&self) -> bool {
        let links: usize = self.bags.iter().map(|b| b.neighbors.len()).sum();
        !self.bags.is_empty() && links / 2 != self.bags.len() - 1
    }

    fn get_missing_vertex<G: BaseGraph>(&self, graph: &G) -> Option<usize> {
        graph
            .vertices()
            .find(|v| !self.bags.iter().any(|b| b.vertex_set.contains(v)))
    }

    fn get_missing_edge<G: BaseGraph>(&self, graph: &G) -> Option<(usize, usize)> {
        for u in graph.vertices() {
            for v in graph.neighborhood(u).filter(|v| u < *v) {
                if !self
                    .bags
                    .iter()
                    .any(|b| b.vertex_set.contains(&u) && b.vertex_set.contains(&v))
                {
                    return Some((u, v));
                }
            }
        }
        None
    }

    fn get_vertex_not_inducing_subtree<G: BaseGraph>(&self, graph: &G) -> Option<usize> {
        for u in graph.vertices() {
            let mut inducing_bags: FxHashSet<usize> = self
                .bags
                .iter()
                .filter(|b| b.vertex_set.contains(&u))
                .map(|b| b.id)
                .collect();

            let first = match inducing_bags.iter().next() {
                Some(first) => *first,
                None => continue,
            };
            inducing_bags.remove(&first);
            let mut visited = BitSet::new(self.bags.len());
            visited.set_bit(first);
            let mut stack: Vec<usize> = vec![first];
            while let Some(c) = stack.pop() {
                for n in self.bags[c].neighbors.iter().copied() {
                    if !visited[n] && self.bags[n].vertex_set.contains(&u) {
                        inducing_bags.remove(&n);
                        stack.push(n);
                        visited.set_bit(n);
                    }
                }
            }
            if !inducing_bags.is_empty() {
                return Some(u);
            }
        }
        None
    }
}

pub struct TreeDecompositionIterator<'a> {
    td: &'a TreeDecomposition,
    stack: Vec<usize>,
    visited: BitSet,
}

impl<'a> Iterator for TreeDecompositionIterator<'a> {
    type Item = &'a Bag;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        for c in self.td.bags[current].neighbors.iter().copied() {
            if !self.visited.set_bit(c) {
                self.stack.push(c);
            }
        }
        self.td.bags.get(current)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DecompositionErrorKind;
    use crate::graph::generators::{cycle, path};
    use crate::tree_decomposition::TreeDecomposition;
    use fxhash::FxHashSet;

    fn set(vertices: &[usize]) -> FxHashSet<usize> {
        vertices.iter().copied().collect()
    }

    fn path_decomposition() -> TreeDecomposition {
        let mut td = TreeDecomposition::default();
        let a = td.add_bag(set(&[0, 1]));
        let b = td.add_bag(set(&[1, 2]));
        let c = td.add_bag(set(&[2, 3]));
        td.add_edge(a, b);
        td.add_edge(b, c);
        td
    }

    #[test]
    fn verify_path() {
        let td = path_decomposition();
        assert_eq!(td.width(), 1);
        assert!(td.verify(&path(4)).is_ok());
    }

    #[test]
    fn verify_failures() {
        let td = path_decomposition();
        let err = td.verify(&cycle(4)).unwrap_err();
        assert_eq!(err.kind, DecompositionErrorKind::MissingEdge((0, 3)));

        let mut td = TreeDecomposition::default();
        td.add_bag(set(&[0, 1]));
        td.add_bag(set(&[1, 2]));
        let err = td.verify(&path(3)).unwrap_err();
        assert_eq!(err.kind, DecompositionErrorKind::Unreachable);

        let mut td = TreeDecomposition::default();
        let a = td.add_bag(set(&[0, 1]));
        let b = td.add_bag(set(&[2, 3]));
        let c = td.add_bag(set(&[1, 2]));
        td.add_edge(a, b);
        td.add_edge(b, c);
        let err = td.verify(&path(4)).unwrap_err();
        assert_eq!(err.kind, DecompositionErrorKind::NotInducingSubtree(1));

        let mut td = path_decomposition();
        td.add_edge(0, 2);
        let err = td.verify(&path(4)).unwrap_err();
        assert_eq!(err.kind, DecompositionErrorKind::HasCycle);
    }

    #[test]
    fn flatten() {
        let mut td = TreeDecomposition::default();
        let a = td.add_bag(set(&[0]));
        let b = td.add_bag(set(&[0, 1]));
        let c = td.add_bag(set(&[1]));
        let d = td.add_bag(set(&[1, 2]));
        td.add_edge(a, b);
        td.add_edge(b, c);
        td.add_edge(c, d);
        td.flatten();
        assert_eq!(td.bags.len(), 2);
        assert!(td.root.is_some());
        assert!(td.verify(&path(3)).is_ok());
    }
}
