use crate::model::Edge;
use crate::ops::Graph;

use super::compatibility::is_allowed;

/// Edges with at least one endpoint missing from the graph
///
/// Returns `(edge, missing_id)` in edge order; when both endpoints are
/// missing the source is reported.
pub fn find_dangling_edges(graph: &Graph) -> Vec<(Edge, String)> {
    graph
        .edges()
        .iter()
        .filter_map(|edge| {
            if !graph.contains_node(&edge.source) {
                Some((edge.clone(), edge.source.clone()))
            } else if !graph.contains_node(&edge.target) {
                Some((edge.clone(), edge.target.clone()))
            } else {
                None
            }
        })
        .collect()
}

/// Edges whose endpoint kinds the compatibility table rejects
///
/// Dangling edges are skipped; they are reported by [`find_dangling_edges`].
pub fn find_disallowed_edges(graph: &Graph) -> Vec<(Edge, String)> {
    let mut disallowed = Vec::new();

    for edge in graph.edges() {
        let (Ok(source), Ok(target)) = (graph.get_node(&edge.source), graph.get_node(&edge.target))
        else {
            continue;
        };
        let verdict = is_allowed(source.kind(), target.kind());
        if !verdict.allowed {
            disallowed.push((edge.clone(), verdict.reason.unwrap_or_default()));
        }
    }

    disallowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Kind, Node};
    use crate::registry::default_for;

    fn graph_with(kinds: &[(&str, Kind)]) -> Graph {
        let mut graph = Graph::new();
        for (id, kind) in kinds {
            graph.insert_node(Node::new(*id, default_for(*kind))).unwrap();
        }
        graph
    }

    #[test]
    fn test_find_dangling_edges() {
        let mut graph = graph_with(&[("svc", Kind::Service)]);
        graph.push_edge(Edge::new("svc", "ghost"));

        let dangling = find_dangling_edges(&graph);
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].1, "ghost");
    }

    #[test]
    fn test_find_disallowed_edges() {
        let mut graph = graph_with(&[("svc", Kind::Service), ("ing", Kind::Ingress)]);
        graph.push_edge(Edge::new("svc", "ing"));
        graph.push_edge(Edge::new("ing", "svc"));

        let disallowed = find_disallowed_edges(&graph);
        assert_eq!(disallowed.len(), 1);
        assert_eq!(disallowed[0].0, Edge::new("svc", "ing"));
    }
}
