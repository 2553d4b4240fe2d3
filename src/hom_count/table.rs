use num::BigUint;

/// Count vectors indexed like the nodes of the decomposition they were
/// computed for. A slot is written once; it may be released after the parent
/// has consumed it.
#[derive(Debug, Clone, Default)]
pub struct DpTable {
    vectors: Vec<Option<Vec<BigUint>>>,
}

impl DpTable {
    pub fn with_nodes(nodes: usize) -> Self {
        Self {
            vectors: vec![None; nodes],
        }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// The count vector of `node`, `None` if not (or no longer) present.
    pub fn get(&self, node: usize) -> Option<&[BigUint]> {
        self.vectors.get(node)?.as_deref()
    }

    pub fn is_finalized(&self, node: usize) -> bool {
        self.get(node).is_some()
    }

    /// Number of vectors currently held.
    pub fn finalized(&self) -> usize {
        self.vectors.iter().filter(|v| v.is_some()).count()
    }

    /// The single entry of the empty-bag vector at `root`.
    pub fn root_count(&self, root: usize) -> Option<&BigUint> {
        self.get(root)?.first()
    }

    pub(crate) fn insert(&mut self, node: usize, vector: Vec<BigUint>) {
        debug_assert!(self.vectors[node].is_none());
        self.vectors[node] = Some(vector);
    }

    pub(crate) fn take(&mut self, node: usize) -> Option<Vec<BigUint>> {
        self.vectors.get_mut(node)?.take()
    }

    pub(crate) fn release(&mut self, node: usize) {
        self.take(node);
    }
}
