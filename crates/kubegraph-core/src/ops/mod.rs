pub mod edge_ops;
pub mod ids;
pub mod import_ops;
pub mod node_ops;
pub mod store;

pub use edge_ops::{has_edge, propose_edge, remove_edge, remove_edges_touching};
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use import_ops::{import_manifests, ImportSummary};
pub use node_ops::{
    create_node, create_node_with, delete_node, delete_node_cascade, move_node, relabel,
    update_resource,
};
pub use store::Graph;
