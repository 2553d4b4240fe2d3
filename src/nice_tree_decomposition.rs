use crate::datastructures::BitSet;
use crate::error::{DecompositionError, DecompositionErrorKind};
use crate::graph::BaseGraph;
use crate::tree_decomposition::TreeDecomposition;
use fxhash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Leaf,
    Introduce,
    Forget,
    Join,
}

impl NodeType {
    /// Type of a node in a nice tree decomposition, read off its bag size and
    /// the bag sizes of its children. `None` for more than two children.
    pub fn infer(bag_size: usize, child_bag_sizes: &[usize]) -> Option<Self> {
        match child_bag_sizes {
            [] => Some(NodeType::Leaf),
            [child] if bag_size == child + 1 => Some(NodeType::Introduce),
            [_] => Some(NodeType::Forget),
            [_, _] => Some(NodeType::Join),
            _ => None,
        }
    }

    pub(crate) fn child_count(&self) -> usize {
        match self {
            NodeType::Leaf => 0,
            NodeType::Introduce | NodeType::Forget => 1,
            NodeType::Join => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NiceNode {
    pub bag: Vec<usize>,
    pub node_type: NodeType,
    pub children: Vec<usize>,
}

/// The vertex an Introduce or Forget node adds or removes, together with its
/// position in the larger of the two bags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeChange {
    pub vertex: usize,
    pub position: usize,
}

/// A rooted nice tree decomposition stored as an arena. Node `i` refers to
/// its children and parent by index; every bag is sorted ascending, which
/// fixes the digit position of each vertex in the encoded mappings.
#[derive(Debug, Clone)]
pub struct NiceTreeDecomposition {
    nodes: Vec<NiceNode>,
    parents: Vec<Option<usize>>,
    root: usize,
}

impl NiceTreeDecomposition {
    /// Takes externally labelled nodes. Bags are brought into ascending order,
    /// parents are derived from the child lists and the whole structure is
    /// validated.
    pub fn new(mut nodes: Vec<NiceNode>) -> Result<Self, DecompositionError> {
        for node in nodes.iter_mut() {
            node.bag.sort_unstable();
        }
        let mut parents = vec![None; nodes.len()];
        for (idx, node) in nodes.iter().enumerate() {
            for child in node.children.iter().copied() {
                if child >= nodes.len() {
                    return Err(DecompositionError::at(
                        idx,
                        DecompositionErrorKind::DanglingChild(child),
                    ));
                }
                if parents[child].is_some() || child == idx {
                    return Err(DecompositionError::at(child, DecompositionErrorKind::HasCycle));
                }
                parents[child] = Some(idx);
            }
        }
        let mut roots = parents
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_none())
            .map(|(idx, _)| idx);
        let root = roots
            .next()
            .ok_or_else(|| DecompositionError::global(DecompositionErrorKind::NoRoot))?;
        if let Some(other) = roots.next() {
            return Err(DecompositionError::at(
                other,
                DecompositionErrorKind::MultipleRoots,
            ));
        }
        let ntd = Self {
            nodes,
            parents,
            root,
        };
        ntd.validate()?;
        Ok(ntd)
    }

    /// Like [`new`](Self::new), with node types inferred from the structure.
    pub fn from_unlabelled(
        bags: Vec<Vec<usize>>,
        children: Vec<Vec<usize>>,
    ) -> Result<Self, DecompositionError> {
        if bags.len() != children.len() {
            return Err(DecompositionError::global(
                DecompositionErrorKind::LengthMismatch {
                    bags: bags.len(),
                    children: children.len(),
                },
            ));
        }
        let mut nodes = Vec::with_capacity(bags.len());
        for (idx, (bag, children)) in bags.iter().zip(children.into_iter()).enumerate() {
            let mut child_bag_sizes = Vec::with_capacity(children.len());
            for child in children.iter().copied() {
                match bags.get(child) {
                    Some(child_bag) => child_bag_sizes.push(child_bag.len()),
                    None => {
                        return Err(DecompositionError::at(
                            idx,
                            DecompositionErrorKind::DanglingChild(child),
                        ))
                    }
                }
            }
            let node_type = NodeType::infer(bag.len(), &child_bag_sizes).ok_or_else(|| {
                DecompositionError::at(
                    idx,
                    DecompositionErrorKind::WrongChildCount {
                        expected: 2,
                        found: children.len(),
                    },
                )
            })?;
            nodes.push(NiceNode {
                bag: bag.clone(),
                node_type,
                children,
            });
        }
        Self::new(nodes)
    }

    /// Rooted conversion of a valid tree decomposition into nice form. Below
    /// every bag each child path first forgets, then introduces one vertex at
    /// a time; several children are combined by a chain of binary joins. The
    /// root forgets everything down to the empty bag.
    pub fn from_tree_decomposition(td: &TreeDecomposition) -> Self {
        let mut builder = Builder::default();
        let root_bag = match td.root {
            Some(root) if root < td.bags.len() => root,
            _ => {
                builder.push(vec![], NodeType::Leaf, vec![]);
                return builder.finish();
            }
        };

        let mut parent: Vec<Option<usize>> = vec![None; td.bags.len()];
        let mut visited = BitSet::new(td.bags.len());
        let mut preorder = Vec::with_capacity(td.bags.len());
        let mut stack = vec![root_bag];
        visited.set_bit(root_bag);
        while let Some(b) = stack.pop() {
            preorder.push(b);
            let mut neighbors: Vec<usize> = td.bags[b].neighbors.iter().copied().collect();
            neighbors.sort_unstable();
            for n in neighbors {
                if !visited.set_bit(n) {
                    parent[n] = Some(b);
                    stack.push(n);
                }
            }
        }

        let mut children: Vec<Vec<usize>> = vec![vec![]; td.bags.len()];
        for b in preorder.iter().copied() {
            if let Some(p) = parent[b] {
                children[p].push(b);
            }
        }

        let mut top: Vec<usize> = vec![0; td.bags.len()];
        for b in preorder.iter().rev().copied() {
            let mut bag: Vec<usize> = td.bags[b].vertex_set.iter().copied().collect();
            bag.sort_unstable();

            let mut branches = Vec::with_capacity(children[b].len().max(1));
            if children[b].is_empty() {
                let leaf = builder.push(vec![], NodeType::Leaf, vec![]);
                branches.push(builder.walk_to(leaf, &bag));
            }
            for c in children[b].iter().copied() {
                branches.push(builder.walk_to(top[c], &bag));
            }
            let mut branches = branches.into_iter();
            let mut current = branches.next().unwrap_or_default();
            for other in branches {
                current = builder.push(bag.clone(), NodeType::Join, vec![current, other]);
            }
            top[b] = current;
        }

        let root = builder.walk_to(top[root_bag], &[]);
        debug_assert_eq!(root, builder.nodes.len() - 1);
        builder.finish()
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[NiceNode] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> &NiceNode {
        &self.nodes[idx]
    }

    pub fn bag(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].bag
    }

    pub fn node_type(&self, idx: usize) -> NodeType {
        self.nodes[idx].node_type
    }

    pub fn children(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].children
    }

    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.parents[idx]
    }

    /// Node type as implied by the bag sizes of `idx` and its children,
    /// ignoring the stored label.
    pub fn label(&self, idx: usize) -> Option<NodeType> {
        let child_bag_sizes: Vec<usize> = self.nodes[idx]
            .children
            .iter()
            .map(|c| self.nodes[*c].bag.len())
            .collect();
        NodeType::infer(self.nodes[idx].bag.len(), &child_bag_sizes)
    }

    /// Largest bag size minus one.
    pub fn width(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.bag.len())
            .max()
            .unwrap_or(0)
            .saturating_sub(1)
    }

    /// Breadth-first discovery order from the root. Its reverse lists every
    /// child before its parent.
    pub fn bfs_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::new();
        queue.push_back(self.root);
        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            queue.extend(self.nodes[idx].children.iter().copied());
        }
        order
    }

    /// Checks the nice-form invariants: a single tree reachable from the
    /// root, empty root and leaf bags, sorted bags, child arity per type,
    /// singleton differences for Introduce/Forget and identical bags below a
    /// Join.
    pub fn validate(&self) -> Result<(), DecompositionError> {
        let mut reached = BitSet::new(self.nodes.len());
        for idx in self.bfs_order() {
            reached.set_bit(idx);
        }
        if let Some(idx) = (0..self.nodes.len()).find(|idx| !reached[*idx]) {
            return Err(DecompositionError::at(
                idx,
                DecompositionErrorKind::Unreachable,
            ));
        }
        if !self.nodes[self.root].bag.is_empty() {
            return Err(DecompositionError::at(
                self.root,
                DecompositionErrorKind::NonEmptyRoot,
            ));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.bag.windows(2).any(|w| w[0] >= w[1]) {
                return Err(DecompositionError::at(
                    idx,
                    DecompositionErrorKind::UnorderedBag,
                ));
            }
            let expected = node.node_type.child_count();
            if node.children.len() != expected {
                return Err(DecompositionError::at(
                    idx,
                    DecompositionErrorKind::WrongChildCount {
                        expected,
                        found: node.children.len(),
                    },
                ));
            }
            match node.node_type {
                NodeType::Leaf if !node.bag.is_empty() => {
                    return Err(DecompositionError::at(
                        idx,
                        DecompositionErrorKind::NonEmptyLeaf,
                    ));
                }
                NodeType::Join => {
                    if node
                        .children
                        .iter()
                        .any(|c| self.nodes[*c].bag != node.bag)
                    {
                        return Err(DecompositionError::at(
                            idx,
                            DecompositionErrorKind::JoinBagMismatch,
                        ));
                    }
                }
                _ => {}
            }
        }
        self.node_changes().map(|_| ())
    }

    /// Checks that this decomposes `graph`: every bag vertex is a graph
    /// vertex, every graph vertex and edge is covered and the nodes holding a
    /// vertex form a connected subtree.
    pub fn validate_for<G: BaseGraph>(&self, graph: &G) -> Result<(), DecompositionError> {
        // number of nodes holding `v` whose parent does not, must be 1 each
        let mut tops: FxHashMap<usize, usize> = FxHashMap::default();
        let mut covered: FxHashSet<(usize, usize)> = FxHashSet::default();
        let vertices: FxHashSet<usize> = graph.vertices().collect();
        for (idx, node) in self.nodes.iter().enumerate() {
            let parent_bag: &[usize] = match self.parents[idx] {
                Some(p) => &self.nodes[p].bag,
                None => &[],
            };
            for (i, v) in node.bag.iter().copied().enumerate() {
                if !vertices.contains(&v) {
                    return Err(DecompositionError::at(
                        idx,
                        DecompositionErrorKind::UnknownVertex(v),
                    ));
                }
                if parent_bag.binary_search(&v).is_err() {
                    *tops.entry(v).or_insert(0) += 1;
                }
                for u in node.bag.iter().copied().skip(i + 1) {
                    if graph.has_edge(v, u) {
                        covered.insert((v, u));
                    }
                }
            }
        }
        for v in graph.vertices() {
            match tops.get(&v) {
                None => {
                    return Err(DecompositionError::global(
                        DecompositionErrorKind::MissingVertex(v),
                    ))
                }
                Some(1) => {}
                Some(_) => {
                    return Err(DecompositionError::global(
                        DecompositionErrorKind::NotInducingSubtree(v),
                    ))
                }
            }
        }
        if covered.len() != graph.edge_count() {
            for u in graph.vertices() {
                for v in graph.neighborhood(u).filter(|v| u < *v) {
                    if !covered.contains(&(u, v)) {
                        return Err(DecompositionError::global(
                            DecompositionErrorKind::MissingEdge((u, v)),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// The vertex added or removed at every Introduce and Forget node, indexed
    /// like the nodes; `None` for leaves and joins.
    pub fn node_changes(&self) -> Result<Vec<Option<NodeChange>>, DecompositionError> {
        let mut changes = Vec::with_capacity(self.nodes.len());
        for (idx, node) in self.nodes.iter().enumerate() {
            let change = match node.node_type {
                NodeType::Introduce | NodeType::Forget => {
                    let child = &self.nodes[node.children[0]].bag;
                    let (wider, narrower) = if node.node_type == NodeType::Introduce {
                        (&node.bag, child)
                    } else {
                        (child, &node.bag)
                    };
                    let (only_wider, only_narrower) = symmetric_difference(wider, narrower);
                    let found = only_wider.len() + only_narrower.len();
                    if found != 1 {
                        return Err(DecompositionError::at(
                            idx,
                            DecompositionErrorKind::NotSingletonChange { found },
                        ));
                    }
                    match only_wider.first() {
                        Some(position) => Some(NodeChange {
                            vertex: wider[*position],
                            position: *position,
                        }),
                        None => {
                            return Err(DecompositionError::at(
                                idx,
                                DecompositionErrorKind::WrongDirection,
                            ))
                        }
                    }
                }
                NodeType::Leaf | NodeType::Join => None,
            };
            changes.push(change);
        }
        Ok(changes)
    }
}

/// Positions of the elements only in `a` and only in `b`, both sorted.
fn symmetric_difference(a: &[usize], b: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let (mut only_a, mut only_b) = (vec![], vec![]);
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        let ordering = match (a.get(i), b.get(j)) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            _ => Ordering::Greater,
        };
        match ordering {
            Ordering::Less => {
                only_a.push(i);
                i += 1;
            }
            Ordering::Greater => {
                only_b.push(j);
                j += 1;
            }
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    (only_a, only_b)
}

#[derive(Default)]
struct Builder {
    nodes: Vec<NiceNode>,
}

impl Builder {
    fn push(&mut self, bag: Vec<usize>, node_type: NodeType, children: Vec<usize>) -> usize {
        self.nodes.push(NiceNode {
            bag,
            node_type,
            children,
        });
        self.nodes.len() - 1
    }

    /// Chain of Forget then Introduce nodes leading from `from` to a node
    /// with bag `target`.
    fn walk_to(&mut self, from: usize, target: &[usize]) -> usize {
        let mut current = from;
        let mut bag = self.nodes[from].bag.clone();
        let (forget, introduce) = symmetric_difference(&bag, target);
        let forget: Vec<usize> = forget.into_iter().map(|i| bag[i]).collect();
        for v in forget {
            bag.retain(|u| *u != v);
            current = self.push(bag.clone(), NodeType::Forget, vec![current]);
        }
        for v in introduce.into_iter().map(|i| target[i]) {
            let position = bag.binary_search(&v).unwrap_or_else(|p| p);
            bag.insert(position, v);
            current = self.push(bag.clone(), NodeType::Introduce, vec![current]);
        }
        current
    }

    fn finish(self) -> NiceTreeDecomposition {
        let mut parents = vec![None; self.nodes.len()];
        for (idx, node) in self.nodes.iter().enumerate() {
            for child in node.children.iter().copied() {
                parents[child] = Some(idx);
            }
        }
        NiceTreeDecomposition {
            root: self.nodes.len() - 1,
            nodes: self.nodes,
            parents,
        }
    }
}
