//! Command inventory for the [`apply`](crate::apply::apply) boundary

use crate::model::{Kind, Position, Resource};

/// Every graph mutation a consumer can request
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a node of `kind` with default attributes
    NodeCreate { kind: Kind },

    /// Replace a node's attribute record (kind must not change)
    NodeUpdate { node_id: String, resource: Resource },

    NodeRelabel { node_id: String, label: String },

    NodeMove { node_id: String, position: Position },

    /// Delete a node, leaving its edges dangling
    NodeDelete { node_id: String },

    /// Delete a node and every edge touching it
    NodeDeleteCascade { node_id: String },

    /// Propose an edge; the rule table decides whether it is added
    EdgeCreate { source_id: String, target_id: String },

    EdgeDelete { source_id: String, target_id: String },

    /// Parse manifest text and merge the result into the graph
    Import { text: String },
}

impl Command {
    /// Short operation name used in logs
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::NodeCreate { .. } => "node_create",
            Command::NodeUpdate { .. } => "node_update",
            Command::NodeRelabel { .. } => "node_relabel",
            Command::NodeMove { .. } => "node_move",
            Command::NodeDelete { .. } => "node_delete",
            Command::NodeDeleteCascade { .. } => "node_delete_cascade",
            Command::EdgeCreate { .. } => "edge_create",
            Command::EdgeDelete { .. } => "edge_delete",
            Command::Import { .. } => "import",
        }
    }
}
