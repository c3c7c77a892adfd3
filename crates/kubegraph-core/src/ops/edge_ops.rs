use super::store::Graph;
use crate::errors::{KubegraphError, Result};
use crate::model::Edge;
use crate::rules::{is_allowed, RuleVerdict};

/// Propose an edge, committing it only if the rule table allows it
///
/// A rejection is returned as a verdict, not an error. Duplicate proposals
/// are committed again; callers check [`has_edge`] first if they care.
///
/// # Errors
/// * `NodeNotFound` - If either endpoint is missing
pub fn propose_edge(graph: &mut Graph, source_id: &str, target_id: &str) -> Result<RuleVerdict> {
    let source_kind = graph.get_node(source_id)?.kind();
    let target_kind = graph.get_node(target_id)?.kind();

    let verdict = is_allowed(source_kind, target_kind);
    if verdict.allowed {
        graph.push_edge(Edge::new(source_id, target_id));
    } else {
        tracing::debug!(
            edge_source = source_id,
            edge_target = target_id,
            reason = verdict.reason.as_deref().unwrap_or_default(),
            "edge rejected"
        );
    }
    Ok(verdict)
}

pub fn has_edge(graph: &Graph, source_id: &str, target_id: &str) -> bool {
    graph
        .edges()
        .iter()
        .any(|e| e.source == source_id && e.target == target_id)
}

/// Remove the first edge `source → target`
///
/// # Errors
/// * `EdgeNotFound` - If no such edge exists
pub fn remove_edge(graph: &mut Graph, source_id: &str, target_id: &str) -> Result<()> {
    let edges = graph.edges_mut();
    let position = edges
        .iter()
        .position(|e| e.source == source_id && e.target == target_id)
        .ok_or_else(|| KubegraphError::EdgeNotFound {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
        })?;
    edges.remove(position);
    Ok(())
}

/// Remove every edge with `node_id` as either endpoint
///
/// # Returns
/// The number of edges removed
pub fn remove_edges_touching(graph: &mut Graph, node_id: &str) -> usize {
    let edges = graph.edges_mut();
    let before = edges.len();
    edges.retain(|e| !e.touches(node_id));
    before - edges.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Kind;
    use crate::ops::node_ops::create_node;
    use crate::ops::SequentialIds;

    #[test]
    fn test_allowed_edge_is_committed() {
        let mut graph = Graph::new();
        let mut ids = SequentialIds::new();
        let ing = create_node(&mut graph, Kind::Ingress, &mut ids).unwrap();
        let svc = create_node(&mut graph, Kind::Service, &mut ids).unwrap();

        let verdict = propose_edge(&mut graph, &ing, &svc).unwrap();
        assert!(verdict.allowed);
        assert!(has_edge(&graph, &ing, &svc));
    }

    #[test]
    fn test_rejected_edge_is_not_committed() {
        let mut graph = Graph::new();
        let mut ids = SequentialIds::new();
        let ing = create_node(&mut graph, Kind::Ingress, &mut ids).unwrap();
        let svc = create_node(&mut graph, Kind::Service, &mut ids).unwrap();

        let verdict = propose_edge(&mut graph, &svc, &ing).unwrap();
        assert!(!verdict.allowed);
        assert!(!has_edge(&graph, &svc, &ing));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_missing_endpoint_is_an_error() {
        let mut graph = Graph::new();
        let mut ids = SequentialIds::new();
        let svc = create_node(&mut graph, Kind::Service, &mut ids).unwrap();

        assert!(matches!(
            propose_edge(&mut graph, &svc, "deployment-99"),
            Err(KubegraphError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_edge_first_occurrence() {
        let mut graph = Graph::new();
        let mut ids = SequentialIds::new();
        let dep = create_node(&mut graph, Kind::Deployment, &mut ids).unwrap();
        let cm = create_node(&mut graph, Kind::ConfigMap, &mut ids).unwrap();
        propose_edge(&mut graph, &dep, &cm).unwrap();
        propose_edge(&mut graph, &dep, &cm).unwrap();

        remove_edge(&mut graph, &dep, &cm).unwrap();
        assert_eq!(graph.edge_count(), 1);
        remove_edge(&mut graph, &dep, &cm).unwrap();
        assert!(matches!(
            remove_edge(&mut graph, &dep, &cm),
            Err(KubegraphError::EdgeNotFound { .. })
        ));
    }
}
