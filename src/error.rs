use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompositionErrorKind {
    #[error("No Root")]
    NoRoot,
    #[error("Multiple Roots")]
    MultipleRoots,
    #[error("Unreachable From Root")]
    Unreachable,
    #[error("Has Cycle")]
    HasCycle,
    #[error("Dangling Child: {0}")]
    DanglingChild(usize),
    #[error("Length Mismatch: {bags} bags, {children} child lists")]
    LengthMismatch { bags: usize, children: usize },
    #[error("Wrong Child Count: expected {expected}, found {found}")]
    WrongChildCount { expected: usize, found: usize },
    #[error("Non Empty Leaf")]
    NonEmptyLeaf,
    #[error("Non Empty Root")]
    NonEmptyRoot,
    #[error("Unordered Bag")]
    UnorderedBag,
    #[error("Not Singleton Change: {found} vertices differ")]
    NotSingletonChange { found: usize },
    #[error("Wrong Direction")]
    WrongDirection,
    #[error("Join Bag Mismatch")]
    JoinBagMismatch,
    #[error("Missing Vertex: {0}")]
    MissingVertex(usize),
    #[error("Unknown Vertex: {0}")]
    UnknownVertex(usize),
    #[error("Missing Edge: {0:?}")]
    MissingEdge((usize, usize)),
    #[error("Not Inducing Subtree: {0}")]
    NotInducingSubtree(usize),
}

fn node_prefix(node: &Option<usize>) -> String {
    node.map(|node| format!("node {}: ", node)).unwrap_or_default()
}

/// A nice tree decomposition violating one of its structural invariants,
/// reported at the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{}", node_prefix(.node), .kind)]
pub struct DecompositionError {
    pub node: Option<usize>,
    pub kind: DecompositionErrorKind,
}

impl DecompositionError {
    pub(crate) fn at(node: usize, kind: DecompositionErrorKind) -> Self {
        Self {
            node: Some(node),
            kind,
        }
    }

    pub(crate) fn global(kind: DecompositionErrorKind) -> Self {
        Self { node: None, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NonSimple {
    #[error("Self Loop at {0}")]
    SelfLoop(usize),
    #[error("Multi Edge: {0:?}")]
    MultiEdge((usize, usize)),
    #[error("Directed Edge: {0:?}")]
    DirectedEdge((usize, usize)),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HomCountError {
    #[error("Malformed Decomposition: {0}")]
    Decomposition(#[from] DecompositionError),
    #[error("Non Simple Graph: {0}")]
    NonSimpleGraph(#[from] NonSimple),
    #[error("Table Too Large: node {node} needs {base}^{bag_size} entries")]
    TableTooLarge {
        node: usize,
        bag_size: usize,
        base: usize,
    },
}
