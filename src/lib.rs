macro_rules! impl_setter {
    ($self:ident, $field:ident, $type:ty) => {
        pub fn $field(mut $self, $field: $type) -> Self {
            $self.$field = $field;
            $self
        }
    };
}

pub(crate) mod datastructures;

pub mod brute_force;
pub mod error;
pub mod graph;
pub mod heuristic_elimination_order;
pub mod hom_count;
pub mod io;
#[cfg(feature = "logging")]
pub mod logger;
pub mod mapping;
pub mod nice_tree_decomposition;
#[cfg(feature = "handle-ctrlc")]
pub mod signals;
pub mod tree_decomposition;

pub use brute_force::count_homomorphisms_brute_force;
pub use error::{DecompositionError, DecompositionErrorKind, HomCountError, NonSimple};
pub use hom_count::{
    compute_table, count_homomorphisms, DecomposerType, DpTable, HomomorphismCounter, Traversal,
};
pub use nice_tree_decomposition::{NiceNode, NiceTreeDecomposition, NodeChange, NodeType};
