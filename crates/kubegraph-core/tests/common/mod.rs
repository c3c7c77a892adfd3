use std::collections::BTreeSet;

use kubegraph_core::model::{Kind, Node, Resource};
use kubegraph_core::ops::{create_node_with, propose_edge};
use kubegraph_core::registry;
use kubegraph_core::{Graph, IdSource};

/// Add a node built from a prepared attribute record
#[allow(dead_code)]
pub fn add(graph: &mut Graph, ids: &mut dyn IdSource, resource: Resource) -> String {
    create_node_with(graph, resource, ids).unwrap()
}

/// Connect two nodes, failing the test if the rule table refuses
#[allow(dead_code)]
pub fn connect(graph: &mut Graph, source_id: &str, target_id: &str) {
    let verdict = propose_edge(graph, source_id, target_id).unwrap();
    assert!(
        verdict.allowed,
        "edge {} -> {} refused: {:?}",
        source_id, target_id, verdict.reason
    );
}

#[allow(dead_code)]
pub fn named<'a>(nodes: &'a [Node], kind: Kind, name: &str) -> &'a Node {
    nodes
        .iter()
        .find(|n| n.kind() == kind && n.name() == name)
        .unwrap_or_else(|| panic!("no {} named {}", kind, name))
}

/// Edges rendered as `(kind:name, kind:name)` so graphs with different
/// IDs can be compared
#[allow(dead_code)]
pub fn edges_by_name(graph: &Graph) -> BTreeSet<(String, String)> {
    graph
        .edges()
        .iter()
        .map(|e| {
            let source = graph.get_node(&e.source).unwrap();
            let target = graph.get_node(&e.target).unwrap();
            (
                format!("{}:{}", source.kind().as_str(), source.name()),
                format!("{}:{}", target.kind().as_str(), target.name()),
            )
        })
        .collect()
}

/// Split generated text into YAML values for field assertions
#[allow(dead_code)]
pub fn yaml_documents(text: &str) -> Vec<serde_yaml::Value> {
    use serde::Deserialize;

    serde_yaml::Deserializer::from_str(text)
        .map(|doc| serde_yaml::Value::deserialize(doc).unwrap())
        .collect()
}

/// IDs of the nodes in the classic web-app graph
#[allow(dead_code)]
pub struct WebApp {
    pub ingress: String,
    pub service: String,
    pub deployment: String,
    pub config_map: String,
    pub secret: String,
    pub volume_claim: String,
    pub autoscaler: String,
}

/// Ingress → Service → Deployment(app=web) with a ConfigMap, a Secret, a
/// VolumeClaim and an Autoscaler; Service selector, Ingress paths and
/// Autoscaler target are all left empty so the generator falls back to
/// the connected nodes
#[allow(dead_code)]
pub fn web_app(graph: &mut Graph, ids: &mut dyn IdSource) -> WebApp {
    let mut ingress = registry::default_ingress();
    ingress.name = "web-ingress".to_string();
    ingress.host = "example.com".to_string();

    let mut service = registry::default_service();
    service.name = "web-svc".to_string();

    let mut deployment = registry::default_deployment();
    deployment.name = "web".to_string();
    deployment.labels = [("app", "web")].into_iter().collect();

    let mut config_map = registry::default_config_map();
    config_map.name = "web-config".to_string();
    config_map.data = [("LOG_LEVEL", "info")].into_iter().collect();

    let mut secret = registry::default_secret();
    secret.name = "web-secret".to_string();
    secret.data = [("password", "p@ss")].into_iter().collect();

    let mut claim = registry::default_volume_claim();
    claim.name = "web-data".to_string();

    let mut autoscaler = registry::default_autoscaler();
    autoscaler.name = "web-hpa".to_string();

    let app = WebApp {
        ingress: add(graph, ids, Resource::Ingress(ingress)),
        service: add(graph, ids, Resource::Service(service)),
        deployment: add(graph, ids, Resource::Deployment(deployment)),
        config_map: add(graph, ids, Resource::ConfigMap(config_map)),
        secret: add(graph, ids, Resource::Secret(secret)),
        volume_claim: add(graph, ids, Resource::VolumeClaim(claim)),
        autoscaler: add(graph, ids, Resource::Autoscaler(autoscaler)),
    };

    connect(graph, &app.ingress, &app.service);
    connect(graph, &app.service, &app.deployment);
    connect(graph, &app.deployment, &app.config_map);
    connect(graph, &app.deployment, &app.secret);
    connect(graph, &app.deployment, &app.volume_claim);
    connect(graph, &app.autoscaler, &app.deployment);
    app
}
