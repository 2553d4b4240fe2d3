//! Counting homomorphisms by dynamic programming over a nice tree
//! decomposition of the source graph.
//!
//! Every node holds a count vector over all assignments of its bag to target
//! vertices, encoded with [`crate::mapping`]. Vectors are computed children
//! first; the root has an empty bag and its single entry is the result.

pub mod evaluators;
#[cfg(feature = "parallel")]
mod parallel;
mod table;
mod target;

pub use table::DpTable;
pub use target::TargetGraph;

use crate::error::{DecompositionError, DecompositionErrorKind, HomCountError};
use crate::graph::{BaseGraph, HashMapGraph};
use crate::heuristic_elimination_order::{MinDegreeDecomposer, MinFillDecomposer};
use crate::mapping::checked_power;
use crate::nice_tree_decomposition::{NiceTreeDecomposition, NodeChange, NodeType};
use crate::tree_decomposition::TreeDecomposition;
#[cfg(feature = "log")]
use log::{debug, info};
use num::{BigUint, One, Zero};

pub type DynamicDecomposer = fn(&HashMapGraph) -> TreeDecomposition;

#[derive(Clone, Copy, Debug)]
pub enum DecomposerType {
    MinDegree,
    MinFill,
    Custom(DynamicDecomposer),
}

impl Default for DecomposerType {
    fn default() -> Self {
        Self::MinFill
    }
}

impl DecomposerType {
    pub(crate) fn compute(&self, graph: &HashMapGraph) -> TreeDecomposition {
        match self {
            DecomposerType::MinDegree => MinDegreeDecomposer::with_graph(graph).compute(),
            DecomposerType::MinFill => MinFillDecomposer::with_graph(graph).compute(),
            DecomposerType::Custom(decomposer) => decomposer(graph),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Reverse breadth-first order from the root, releasing child vectors as
    /// soon as their parent is done.
    Sequential,
    /// Subtrees below join nodes on the rayon thread pool.
    #[cfg(feature = "parallel")]
    Parallel,
}

impl Default for Traversal {
    fn default() -> Self {
        Self::Sequential
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HomomorphismCounter {
    decomposer: DecomposerType,
    density_threshold: f64,
    traversal: Traversal,
    validate: bool,
}

impl Default for HomomorphismCounter {
    fn default() -> Self {
        Self {
            decomposer: DecomposerType::default(),
            density_threshold: 0.5,
            traversal: Traversal::default(),
            validate: true,
        }
    }
}

impl HomomorphismCounter {
    impl_setter!(self, decomposer, DecomposerType);
    impl_setter!(self, density_threshold, f64);
    impl_setter!(self, traversal, Traversal);
    impl_setter!(self, validate, bool);

    /// Decomposes `source` with the configured heuristic and counts its
    /// homomorphisms into `target`.
    pub fn count<G: BaseGraph, H: BaseGraph>(
        &self,
        source: &G,
        target: &H,
    ) -> Result<BigUint, HomCountError> {
        source.check_simple()?;
        let graph = HashMapGraph::from_graph(source);
        let mut td = self.decomposer.compute(&graph);
        if self.validate {
            td.verify(&graph)?;
        }
        td.flatten();
        #[cfg(feature = "log")]
        info!(
            "decomposed source into {} bags of width {}",
            td.bags.len(),
            td.width()
        );
        let ntd = NiceTreeDecomposition::from_tree_decomposition(&td);
        self.count_with(source, target, &ntd)
    }

    /// Counts the homomorphisms from `source` into `target` over the given
    /// decomposition of `source`.
    pub fn count_with<G: BaseGraph, H: BaseGraph>(
        &self,
        source: &G,
        target: &H,
        ntd: &NiceTreeDecomposition,
    ) -> Result<BigUint, HomCountError> {
        let evaluation = Evaluation::prepare(source, target, ntd, self)?;
        if evaluation.target.order() == 0 {
            return Ok(if source.order() == 0 {
                BigUint::one()
            } else {
                BigUint::zero()
            });
        }
        #[cfg(feature = "log")]
        info!(
            "counting over {} nodes of width {} into a {} target with {} vertices",
            ntd.len(),
            ntd.width(),
            if evaluation.target.is_dense() {
                "dense"
            } else {
                "sparse"
            },
            evaluation.target.order()
        );
        let root_vector = match self.traversal {
            Traversal::Sequential => evaluation
                .sequential(false)?
                .take(ntd.root())
                .unwrap_or_default(),
            #[cfg(feature = "parallel")]
            Traversal::Parallel => evaluation.parallel()?,
        };
        let count = root_vector.into_iter().next().unwrap_or_else(BigUint::zero);
        #[cfg(feature = "log")]
        info!("found {} homomorphisms", count);
        Ok(count)
    }

    /// Like [`count_with`](Self::count_with), keeping the vector of every
    /// node.
    pub fn table_with<G: BaseGraph, H: BaseGraph>(
        &self,
        source: &G,
        target: &H,
        ntd: &NiceTreeDecomposition,
    ) -> Result<DpTable, HomCountError> {
        Evaluation::prepare(source, target, ntd, self)?.sequential(true)
    }
}

/// Number of homomorphisms from `source` into `target`, computed over `ntd`,
/// a nice tree decomposition of `source`.
pub fn count_homomorphisms<G: BaseGraph, H: BaseGraph>(
    source: &G,
    target: &H,
    ntd: &NiceTreeDecomposition,
) -> Result<BigUint, HomCountError> {
    HomomorphismCounter::default().count_with(source, target, ntd)
}

/// The count vector of every node of `ntd`. The entry at the root is the
/// number of homomorphisms.
pub fn compute_table<G: BaseGraph, H: BaseGraph>(
    source: &G,
    target: &H,
    ntd: &NiceTreeDecomposition,
) -> Result<DpTable, HomCountError> {
    HomomorphismCounter::default().table_with(source, target, ntd)
}

/// Everything the evaluators read, fixed before the first vector is
/// computed.
pub(crate) struct Evaluation<'a> {
    ntd: &'a NiceTreeDecomposition,
    target: TargetGraph,
    changes: Vec<Option<NodeChange>>,
    neighbor_positions: Vec<Vec<usize>>,
    lengths: Vec<usize>,
}

impl<'a> Evaluation<'a> {
    fn prepare<G: BaseGraph, H: BaseGraph>(
        source: &G,
        target: &H,
        ntd: &'a NiceTreeDecomposition,
        counter: &HomomorphismCounter,
    ) -> Result<Self, HomCountError> {
        source.check_simple()?;
        target.check_simple()?;
        if counter.validate {
            ntd.validate_for(source)?;
        }
        let changes = ntd.node_changes()?;
        let target = TargetGraph::new(target, counter.density_threshold);

        let base = target.order();
        let mut lengths = Vec::with_capacity(ntd.len());
        for (idx, node) in ntd.nodes().iter().enumerate() {
            let len = checked_power(base, node.bag.len()).ok_or(HomCountError::TableTooLarge {
                node: idx,
                bag_size: node.bag.len(),
                base,
            })?;
            lengths.push(len);
        }

        let neighbor_positions = ntd
            .nodes()
            .iter()
            .zip(changes.iter())
            .map(|(node, change)| match (node.node_type, change, node.children.first()) {
                (NodeType::Introduce, Some(change), Some(child)) => {
                    evaluators::neighbor_positions(source, ntd.bag(*child), change.vertex)
                }
                _ => vec![],
            })
            .collect();

        Ok(Self {
            ntd,
            target,
            changes,
            neighbor_positions,
            lengths,
        })
    }

    fn evaluate_node(
        &self,
        idx: usize,
        children: &[&[BigUint]],
    ) -> Result<Vec<BigUint>, HomCountError> {
        let node_type = self.ntd.node_type(idx);
        let len = self.lengths[idx];
        let base = self.target.order();
        match (node_type, self.changes[idx], children) {
            (NodeType::Leaf, _, []) => Ok(evaluators::leaf()),
            (NodeType::Introduce, Some(change), [child]) => Ok(evaluators::introduce(
                child,
                &self.neighbor_positions[idx],
                change,
                len,
                &self.target,
            )),
            (NodeType::Forget, Some(change), [child]) => {
                Ok(evaluators::forget(child, change, len, base))
            }
            (NodeType::Join, _, [left, right]) => Ok(evaluators::join(left, right)),
            (node_type, _, children) => Err(DecompositionError::at(
                idx,
                DecompositionErrorKind::WrongChildCount {
                    expected: node_type.child_count(),
                    found: children.len(),
                },
            )
            .into()),
        }
    }

    fn sequential(&self, retain: bool) -> Result<DpTable, HomCountError> {
        let mut table = DpTable::with_nodes(self.ntd.len());
        for idx in self.ntd.bfs_order().into_iter().rev() {
            let vector = {
                let mut children = Vec::with_capacity(2);
                for c in self.ntd.children(idx).iter().copied() {
                    let child = table.get(c).ok_or_else(|| {
                        DecompositionError::at(idx, DecompositionErrorKind::DanglingChild(c))
                    })?;
                    children.push(child);
                }
                self.evaluate_node(idx, &children)?
            };
            #[cfg(feature = "log")]
            if self.ntd.node_type(idx) == NodeType::Join {
                debug!("join at node {} over {} assignments", idx, vector.len());
            }
            table.insert(idx, vector);
            if !retain {
                for c in self.ntd.children(idx).iter().copied() {
                    table.release(c);
                }
            }
        }
        Ok(table)
    }
}
