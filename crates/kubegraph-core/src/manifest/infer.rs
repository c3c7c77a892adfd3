//! Edge inference for a freshly parsed batch of nodes
//!
//! Replays, in reverse, every reference mechanism the generator emits:
//! ingress backends, label selectors, `envFrom`/`valueFrom`, volumes,
//! scale targets and embedded sidecar containers.

use std::collections::HashMap;

use super::report::{ParseReport, ReferenceVia, RejectedEdge, UnresolvedReference};
use crate::model::{Edge, Kind, Node, Pairs};
use crate::registry::kind_for_manifest;
use crate::rules::is_allowed;

/// A by-name reference found in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reference {
    /// Manifest kind string, e.g. `PersistentVolumeClaim`
    pub target_kind: String,
    pub name: String,
    pub via: ReferenceVia,
}

impl Reference {
    pub fn new(target_kind: &str, name: impl Into<String>, via: ReferenceVia) -> Self {
        Self {
            target_kind: target_kind.to_string(),
            name: name.into(),
            via,
        }
    }
}

/// What the parser learned about one node beyond its attributes
#[derive(Debug, Clone, Default)]
pub(crate) struct InferenceHints {
    pub node_id: String,
    pub references: Vec<Reference>,
    /// Service selector
    pub selector: Pairs,
    /// Label sets a selector may match (workloads only)
    pub label_sets: Vec<Pairs>,
    /// Sidecar nodes created from this workload's extra containers
    pub attachments: Vec<String>,
}

impl InferenceHints {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            ..Self::default()
        }
    }
}

/// Infer the edge set for `nodes`
///
/// Misses and rule-table rejections are recorded in `report`; nothing here
/// fails. Edges come out grouped by source node in node order.
pub(crate) fn infer_edges(
    nodes: &[Node],
    hints: &[InferenceHints],
    report: &mut ParseReport,
) -> Vec<Edge> {
    let kinds: HashMap<&str, Kind> = nodes.iter().map(|n| (n.id.as_str(), n.kind())).collect();

    // First node with a given (kind, name) wins
    let mut by_name: HashMap<(Kind, &str), &str> = HashMap::new();
    for node in nodes {
        by_name
            .entry((node.kind(), node.name()))
            .or_insert(node.id.as_str());
    }

    let mut edges = Vec::new();
    let mut commit = |source_id: &str, target_id: &str, report: &mut ParseReport| {
        let (Some(source_kind), Some(target_kind)) = (kinds.get(source_id), kinds.get(target_id))
        else {
            return;
        };
        let verdict = is_allowed(*source_kind, *target_kind);
        if verdict.allowed {
            edges.push(Edge::new(source_id, target_id));
        } else {
            let reason = verdict.reason.unwrap_or_default();
            tracing::warn!(
                edge_source = source_id,
                edge_target = target_id,
                reason = %reason,
                "inferred edge rejected"
            );
            report.rejected.push(RejectedEdge {
                source_id: source_id.to_string(),
                target_id: target_id.to_string(),
                reason,
            });
        }
    };

    for hint in hints {
        for reference in &hint.references {
            let target = kind_for_manifest(&reference.target_kind)
                .and_then(|kind| by_name.get(&(kind, reference.name.as_str())));
            match target {
                Some(&target_id) => commit(&hint.node_id, target_id, report),
                None => {
                    tracing::debug!(
                        node_id = %hint.node_id,
                        target_kind = %reference.target_kind,
                        target_name = %reference.name,
                        "unresolved reference"
                    );
                    report.unresolved.push(UnresolvedReference {
                        source_id: hint.node_id.clone(),
                        target_kind: reference.target_kind.clone(),
                        target_name: reference.name.clone(),
                        via: reference.via,
                    });
                }
            }
        }

        if !hint.selector.is_empty() {
            for candidate in hints {
                let matches = candidate
                    .label_sets
                    .iter()
                    .any(|labels| hint.selector.is_subset_of(labels));
                if matches {
                    commit(&hint.node_id, &candidate.node_id, report);
                }
            }
        }

        for sidecar_id in &hint.attachments {
            commit(&hint.node_id, sidecar_id, report);
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Resource;
    use crate::registry::{default_config_map, default_deployment, default_service};

    fn deployment(id: &str, name: &str) -> Node {
        let mut dep = default_deployment();
        dep.name = name.to_string();
        Node::new(id, Resource::Deployment(dep))
    }

    fn config_map(id: &str, name: &str) -> Node {
        let mut cm = default_config_map();
        cm.name = name.to_string();
        Node::new(id, Resource::ConfigMap(cm))
    }

    #[test]
    fn test_reference_resolves_to_first_match() {
        let nodes = vec![
            deployment("d", "web"),
            config_map("c1", "settings"),
            config_map("c2", "settings"),
        ];
        let mut hint = InferenceHints::new("d");
        hint.references
            .push(Reference::new("ConfigMap", "settings", ReferenceVia::EnvFrom));
        let hints = vec![hint, InferenceHints::new("c1"), InferenceHints::new("c2")];

        let mut report = ParseReport::default();
        let edges = infer_edges(&nodes, &hints, &mut report);
        assert_eq!(edges, vec![Edge::new("d", "c1")]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_reference_is_reported() {
        let nodes = vec![deployment("d", "web")];
        let mut hint = InferenceHints::new("d");
        hint.references
            .push(Reference::new("Secret", "db", ReferenceVia::ValueFrom));

        let mut report = ParseReport::default();
        let edges = infer_edges(&nodes, &[hint], &mut report);
        assert!(edges.is_empty());
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].target_name, "db");
    }

    #[test]
    fn test_empty_selector_matches_nothing() {
        let nodes = vec![
            Node::new("s", Resource::Service(default_service())),
            deployment("d", "web"),
        ];
        let mut workload = InferenceHints::new("d");
        workload.label_sets.push([("app", "web")].into_iter().collect());

        let mut report = ParseReport::default();
        let edges = infer_edges(&nodes, &[InferenceHints::new("s"), workload], &mut report);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_rejected_inferred_edge_is_reported() {
        let nodes = vec![
            Node::new("s", Resource::Service(default_service())),
            config_map("c", "settings"),
        ];
        let mut hint = InferenceHints::new("s");
        hint.attachments.push("c".to_string());

        let mut report = ParseReport::default();
        let edges = infer_edges(&nodes, &[hint], &mut report);
        assert!(edges.is_empty());
        assert_eq!(report.rejected.len(), 1);
        assert!(!report.rejected[0].reason.is_empty());
    }
}
