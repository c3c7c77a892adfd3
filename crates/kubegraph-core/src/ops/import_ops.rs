use serde::Serialize;

use super::ids::IdSource;
use super::node_ops::fresh_id;
use super::store::Graph;
use crate::errors::Result;
use crate::manifest::{parse, ParseReport};
use crate::model::Kind;
use crate::{log_op_end, log_op_error, log_op_start};

/// What an import added to the graph
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    /// New node IDs in document order
    pub node_ids: Vec<String>,
    pub edge_count: usize,
    pub report: ParseReport,
}

/// Hands out IDs from `inner` that are not yet used in `graph`
struct UnusedIds<'a> {
    graph: &'a Graph,
    inner: &'a mut dyn IdSource,
}

impl IdSource for UnusedIds<'_> {
    fn next_id(&mut self, kind: Kind) -> String {
        fresh_id(self.graph, kind, self.inner)
    }
}

/// Parse manifest text and add the resulting nodes and edges to `graph`
///
/// All-or-nothing: the batch is parsed and staged on a copy first, so on
/// error `graph` is exactly as it was.
///
/// # Errors
/// * `ManifestSyntax` / `ManifestShape` - If the text does not parse
pub fn import_manifests(
    graph: &mut Graph,
    text: &str,
    ids: &mut dyn IdSource,
) -> Result<ImportSummary> {
    log_op_start!("import_manifests", node_count = graph.node_count());
    let start = std::time::Instant::now();

    let summary = import_impl(graph, text, ids).map_err(|e| {
        log_op_error!(
            "import_manifests",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "import_manifests",
        duration_ms = start.elapsed().as_millis() as u64,
        node_count = summary.node_ids.len(),
        edge_count = summary.edge_count
    );
    Ok(summary)
}

fn import_impl(graph: &mut Graph, text: &str, ids: &mut dyn IdSource) -> Result<ImportSummary> {
    let outcome = {
        let mut unused = UnusedIds {
            graph: &*graph,
            inner: &mut *ids,
        };
        parse(text, &mut unused)?
    };

    let mut staged = graph.clone();
    let mut node_ids = Vec::with_capacity(outcome.nodes.len());
    for node in outcome.nodes {
        node_ids.push(node.id.clone());
        staged.insert_node(node)?;
    }
    let edge_count = outcome.edges.len();
    for edge in outcome.edges {
        staged.push_edge(edge);
    }

    *graph = staged;
    Ok(ImportSummary {
        node_ids,
        edge_count,
        report: outcome.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{create_node, SequentialIds};

    #[test]
    fn test_import_skips_ids_already_in_graph() {
        let mut graph = Graph::new();
        let mut ids = SequentialIds::new();
        create_node(&mut graph, Kind::ConfigMap, &mut ids).unwrap();

        // A fresh source would hand out configmap-1 again
        let summary = import_manifests(
            &mut graph,
            "kind: ConfigMap\nmetadata:\n  name: other\n",
            &mut SequentialIds::new(),
        )
        .unwrap();

        assert_eq!(summary.node_ids, vec!["configmap-2".to_string()]);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_failed_import_leaves_graph_untouched() {
        let mut graph = Graph::new();
        let mut ids = SequentialIds::new();
        create_node(&mut graph, Kind::Service, &mut ids).unwrap();
        let before = graph.clone();

        let result = import_manifests(
            &mut graph,
            "kind: ConfigMap\nmetadata:\n  name: ok\n---\nkind: Deployment\nspec:\n  replicas: [1]\n",
            &mut ids,
        );

        assert!(result.is_err());
        assert_eq!(graph, before);
    }
}
