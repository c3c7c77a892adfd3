use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{KubegraphError, Result};
use crate::model::{Edge, Kind, Node};

/// In-memory graph of resource nodes and directed edges
///
/// Nodes keep their insertion order, which drives generator output order
/// and every first-match lookup. Edges are not deduplicated.
/// Not thread-safe; each thread owns its own graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: IndexMap<String, Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node by ID
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if no node has this ID.
    pub fn get_node(&self, id: &str) -> Result<&Node> {
        self.nodes.get(id).ok_or_else(|| KubegraphError::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    pub(crate) fn get_node_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| KubegraphError::NodeNotFound {
                node_id: id.to_string(),
            })
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in insertion order
    pub fn list_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes of one kind, in insertion order
    pub fn nodes_of_kind(&self, kind: Kind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |n| n.kind() == kind)
    }

    /// First node (in insertion order) with the given kind and resource name
    pub fn find_by_name(&self, kind: Kind, name: &str) -> Option<&Node> {
        self.nodes_of_kind(kind).find(|n| n.name() == name)
    }

    /// Store a node under its own ID
    ///
    /// # Errors
    ///
    /// Returns `DuplicateNodeId` if the ID is already taken.
    pub fn insert_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(KubegraphError::DuplicateNodeId { node_id: node.id });
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Remove a node, keeping the relative order of the others
    pub(crate) fn take_node(&mut self, id: &str) -> Result<Node> {
        self.nodes
            .shift_remove(id)
            .ok_or_else(|| KubegraphError::NodeNotFound {
                node_id: id.to_string(),
            })
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Append an edge without endpoint or rule checks
    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub(crate) fn edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    /// Edges leaving `id`, in edge order
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Nodes `id` points to, deduplicated by ID, in edge order
    ///
    /// Targets missing from the graph are skipped.
    pub fn targets_of(&self, id: &str) -> Vec<&Node> {
        let mut seen: Vec<&str> = Vec::new();
        let mut targets = Vec::new();
        for edge in self.outgoing(id) {
            if seen.contains(&edge.target.as_str()) {
                continue;
            }
            seen.push(&edge.target);
            if let Some(node) = self.nodes.get(&edge.target) {
                targets.push(node);
            }
        }
        targets
    }

    /// Connected targets of one kind, deduplicated, in edge order
    pub fn targets_of_kind(&self, id: &str, kind: Kind) -> Vec<&Node> {
        self.targets_of(id)
            .into_iter()
            .filter(|n| n.kind() == kind)
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_for;

    fn node(id: &str, kind: Kind) -> Node {
        Node::new(id, default_for(kind))
    }

    #[test]
    fn test_insert_and_get() {
        let mut graph = Graph::new();
        graph.insert_node(node("cm-1", Kind::ConfigMap)).unwrap();

        assert!(graph.contains_node("cm-1"));
        assert_eq!(graph.get_node("cm-1").unwrap().kind(), Kind::ConfigMap);
        assert!(matches!(
            graph.get_node("nope"),
            Err(KubegraphError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut graph = Graph::new();
        graph.insert_node(node("x", Kind::Pod)).unwrap();
        let result = graph.insert_node(node("x", Kind::Service));
        assert!(matches!(result, Err(KubegraphError::DuplicateNodeId { .. })));
        assert_eq!(graph.get_node("x").unwrap().kind(), Kind::Pod);
    }

    #[test]
    fn test_take_node_preserves_order() {
        let mut graph = Graph::new();
        for id in ["a", "b", "c"] {
            graph.insert_node(node(id, Kind::ConfigMap)).unwrap();
        }
        graph.take_node("b").unwrap();
        let ids: Vec<_> = graph.list_nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_targets_of_dedupes_and_skips_missing() {
        let mut graph = Graph::new();
        graph.insert_node(node("dep", Kind::Deployment)).unwrap();
        graph.insert_node(node("cm", Kind::ConfigMap)).unwrap();
        graph.push_edge(Edge::new("dep", "cm"));
        graph.push_edge(Edge::new("dep", "ghost"));
        graph.push_edge(Edge::new("dep", "cm"));

        let targets: Vec<_> = graph.targets_of("dep").iter().map(|n| n.id.clone()).collect();
        assert_eq!(targets, vec!["cm".to_string()]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_find_by_name_first_match() {
        let mut graph = Graph::new();
        graph.insert_node(node("first", Kind::ConfigMap)).unwrap();
        graph.insert_node(node("second", Kind::ConfigMap)).unwrap();

        let found = graph.find_by_name(Kind::ConfigMap, "my-config").unwrap();
        assert_eq!(found.id, "first");
        assert!(graph.find_by_name(Kind::Secret, "my-config").is_none());
    }
}
