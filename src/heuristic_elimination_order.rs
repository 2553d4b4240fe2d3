use crate::datastructures::BinaryQueue;
use crate::graph::{BaseGraph, HashMapGraph, MutableGraph};
use crate::tree_decomposition::TreeDecomposition;
use fxhash::{FxHashMap, FxHashSet};
#[cfg(feature = "log")]
use log::info;
use std::cmp::max;

/// Picks the next vertex to eliminate: lowest `value` first.
pub trait Selector: From<HashMapGraph> {
    fn graph(&self) -> &HashMapGraph;
    fn value(&self, v: usize) -> i64;
    fn eliminate_vertex(&mut self, v: usize);
}

pub struct MinDegreeSelector {
    graph: HashMapGraph,
}

impl From<HashMapGraph> for MinDegreeSelector {
    fn from(graph: HashMapGraph) -> Self {
        Self { graph }
    }
}

impl Selector for MinDegreeSelector {
    fn graph(&self) -> &HashMapGraph {
        &self.graph
    }

    fn value(&self, v: usize) -> i64 {
        self.graph.degree(v) as i64
    }

    fn eliminate_vertex(&mut self, v: usize) {
        self.graph.eliminate_vertex(v);
    }
}

pub struct MinFillSelector {
    graph: HashMapGraph,
}

impl From<HashMapGraph> for MinFillSelector {
    fn from(graph: HashMapGraph) -> Self {
        Self { graph }
    }
}

impl Selector for MinFillSelector {
    fn graph(&self) -> &HashMapGraph {
        &self.graph
    }

    fn value(&self, v: usize) -> i64 {
        self.graph.fill_in_count(v) as i64
    }

    fn eliminate_vertex(&mut self, v: usize) {
        self.graph.eliminate_vertex(v);
    }
}

pub type MinFillDecomposer = HeuristicEliminationDecomposer<MinFillSelector>;
pub type MinDegreeDecomposer = HeuristicEliminationDecomposer<MinDegreeSelector>;

/// Builds a tree decomposition from a greedy elimination order: every
/// eliminated vertex yields the bag of itself and its neighbors at elimination
/// time, attached to an earlier bag covering those neighbors.
pub struct HeuristicEliminationDecomposer<S: Selector> {
    selector: S,
}

impl<S: Selector> HeuristicEliminationDecomposer<S> {
    pub fn with_graph(graph: &HashMapGraph) -> Self {
        Self {
            selector: S::from(graph.clone()),
        }
    }

    pub fn compute(self) -> TreeDecomposition {
        let mut tree_decomposition = TreeDecomposition::default();
        let mut selector = self.selector;
        if selector.graph().order() <= 2 {
            tree_decomposition.add_bag(selector.graph().vertices().collect());
            return tree_decomposition;
        }

        let mut max_bag = 2;
        let mut pq = BinaryQueue::new();
        let mut bags: FxHashMap<usize, FxHashSet<usize>> = FxHashMap::default();

        for v in selector.graph().vertices() {
            pq.insert(v, selector.value(v))
        }

        let mut stack: Vec<usize> = vec![];
        while let Some((u, _)) = pq.pop_min() {
            if selector.graph().order() <= max_bag {
                break;
            }

            #[cfg(feature = "handle-ctrlc")]
            if crate::signals::received_ctrl_c() {
                // remaining vertices end up in one bag
                break;
            }

            let nb: FxHashSet<usize> = selector.graph().neighborhood(u).collect();
            max_bag = max(max_bag, nb.len() + 1);
            stack.push(u);
            selector.eliminate_vertex(u);
            for v in nb.iter().copied() {
                pq.insert(v, selector.value(v));
            }
            bags.insert(u, nb);
        }

        let mut rest: FxHashSet<usize> = selector.graph().vertices().collect();
        if let Some(u) = rest.iter().next().copied() {
            rest.remove(&u);
            bags.insert(u, rest);
            stack.push(u);
        }

        for v in stack.iter().rev() {
            let mut nb = match bags.remove(v) {
                Some(nb) => nb,
                None => continue,
            };
            let old_bag_id = tree_decomposition
                .bags
                .iter()
                .find(|old_bag| old_bag.vertex_set.is_superset(&nb))
                .map(|old_bag| old_bag.id);
            nb.insert(*v);
            let id = tree_decomposition.add_bag(nb);
            match old_bag_id {
                Some(old_bag_id) => tree_decomposition.add_edge(old_bag_id, id),
                // only for the very first bag, later ones always find a superset
                None => assert_eq!(id, 0),
            }
        }

        #[cfg(feature = "log")]
        info!(
            "elimination produced {} bags of width {}",
            tree_decomposition.bags.len(),
            tree_decomposition.width()
        );
        tree_decomposition
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::generators::{complete, complete_bipartite, cycle, path, petersen, random_gnp};
    use crate::graph::{HashMapGraph, MutableGraph};
    use crate::heuristic_elimination_order::{
        MinDegreeDecomposer, MinDegreeSelector, MinFillDecomposer, MinFillSelector, Selector,
    };

    #[test]
    fn selector_values() {
        let graph = complete_bipartite(1, 3);
        let selector = MinFillSelector::from(graph.clone());
        assert_eq!(selector.value(0), 3);
        assert_eq!(selector.value(1), 0);
        let selector = MinDegreeSelector::from(graph);
        assert_eq!(selector.value(0), 3);
        assert_eq!(selector.value(2), 1);
    }

    #[test]
    fn valid_decompositions() {
        let graphs: Vec<HashMapGraph> = vec![
            HashMapGraph::new(),
            path(1),
            path(7),
            cycle(6),
            complete(5),
            complete_bipartite(2, 4),
            petersen(),
            random_gnp(15, 0.3, 3),
        ];
        for graph in graphs {
            let td = MinFillDecomposer::with_graph(&graph).compute();
            assert!(td.verify(&graph).is_ok());
            let td = MinDegreeDecomposer::with_graph(&graph).compute();
            assert!(td.verify(&graph).is_ok());
        }
    }

    #[test]
    fn known_widths() {
        assert_eq!(MinFillDecomposer::with_graph(&path(10)).compute().width(), 1);
        assert_eq!(MinFillDecomposer::with_graph(&cycle(10)).compute().width(), 2);
        assert_eq!(MinDegreeDecomposer::with_graph(&complete(6)).compute().width(), 5);
    }

    #[test]
    fn disconnected() {
        let mut graph = cycle(4);
        graph.add_edge(10, 11);
        graph.add_vertex(20);
        let td = MinFillDecomposer::with_graph(&graph).compute();
        assert!(td.verify(&graph).is_ok());
    }
}
