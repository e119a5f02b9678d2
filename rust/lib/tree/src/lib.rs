pub mod error;
pub mod filter;
pub mod node;
pub mod propagate;
pub mod select;

pub use error::TreeError;
pub use filter::{Forest, filter_forest};
pub use node::{Node, NodeStore};
pub use propagate::{cascade_down, reconcile_up};
pub use select::{checked_leaf_nodes, leaf_nodes};
