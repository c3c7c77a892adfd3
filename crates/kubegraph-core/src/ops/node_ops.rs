use super::ids::IdSource;
use super::store::Graph;
use crate::errors::{KubegraphError, Result};
use crate::model::{Kind, Node, Position, Resource};
use crate::registry::default_for;

/// Create a node of `kind` with default attributes
///
/// The label starts out as the resource name. IDs already present in the
/// graph (for example from a loaded save file) are skipped.
///
/// # Returns
/// The ID of the new node
pub fn create_node(graph: &mut Graph, kind: Kind, ids: &mut dyn IdSource) -> Result<String> {
    create_node_with(graph, default_for(kind), ids)
}

/// Create a node from a prepared attribute record
pub fn create_node_with(
    graph: &mut Graph,
    resource: Resource,
    ids: &mut dyn IdSource,
) -> Result<String> {
    let id = fresh_id(graph, resource.kind(), ids);
    tracing::debug!(node_id = %id, node_kind = %resource.kind(), "create node");
    graph.insert_node(Node::new(id.clone(), resource))?;
    Ok(id)
}

/// Next ID from `ids` not already used in `graph`
pub(crate) fn fresh_id(graph: &Graph, kind: Kind, ids: &mut dyn IdSource) -> String {
    loop {
        let id = ids.next_id(kind);
        if !graph.contains_node(&id) {
            return id;
        }
    }
}

/// Replace a node's whole attribute record
///
/// # Errors
/// * `NodeNotFound` - If no node has this ID
/// * `KindMismatch` - If `resource` is of a different kind than the node
pub fn update_resource(graph: &mut Graph, node_id: &str, resource: Resource) -> Result<()> {
    let node = graph.get_node_mut(node_id)?;
    let expected = node.kind();
    node.replace_resource(resource)
        .map(|_| ())
        .map_err(|rejected| KubegraphError::KindMismatch {
            node_id: node_id.to_string(),
            expected,
            actual: rejected.kind(),
        })
}

/// Change a node's display label
///
/// # Errors
/// * `NodeNotFound` - If no node has this ID
/// * `InvalidLabel` - If the label is empty or whitespace-only
pub fn relabel(graph: &mut Graph, node_id: &str, label: String) -> Result<()> {
    if label.trim().is_empty() {
        return Err(KubegraphError::InvalidLabel {
            reason: "Label cannot be empty or whitespace-only".to_string(),
        });
    }
    graph.get_node_mut(node_id)?.label = label;
    Ok(())
}

pub fn move_node(graph: &mut Graph, node_id: &str, position: Position) -> Result<()> {
    graph.get_node_mut(node_id)?.position = position;
    Ok(())
}

/// Delete a node, leaving its edges in place
///
/// Edges touching the node become dangling; use [`delete_node_cascade`] or
/// [`remove_edges_touching`](super::edge_ops::remove_edges_touching) to
/// clean them up.
pub fn delete_node(graph: &mut Graph, node_id: &str) -> Result<Node> {
    graph.take_node(node_id)
}

/// Delete a node together with every edge touching it
///
/// # Returns
/// The removed node and the number of edges removed
pub fn delete_node_cascade(graph: &mut Graph, node_id: &str) -> Result<(Node, usize)> {
    let node = graph.take_node(node_id)?;
    let removed = super::edge_ops::remove_edges_touching(graph, node_id);
    tracing::debug!(node_id, edges_removed = removed, "cascade delete");
    Ok((node, removed))
}
