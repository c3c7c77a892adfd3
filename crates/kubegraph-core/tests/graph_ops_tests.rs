//! Graph operations and validation

mod common;

use common::web_app;
use kubegraph_core::errors::KubegraphError;
use kubegraph_core::model::{Edge, Kind, Position};
use kubegraph_core::ops::{
    create_node, delete_node, delete_node_cascade, has_edge, move_node, propose_edge, relabel,
    remove_edge, remove_edges_touching, update_resource, SequentialIds, UuidIds,
};
use kubegraph_core::rules::invariants::{find_dangling_edges, find_disallowed_edges};
use kubegraph_core::{registry, validate_graph, Graph};

#[test]
fn test_service_to_ingress_rejected_with_direction_hint() {
    let mut graph = Graph::new();
    let mut ids = SequentialIds::new();
    let svc = create_node(&mut graph, Kind::Service, &mut ids).unwrap();
    let ing = create_node(&mut graph, Kind::Ingress, &mut ids).unwrap();

    let verdict = propose_edge(&mut graph, &svc, &ing).unwrap();
    assert!(!verdict.allowed);
    assert!(verdict.reason.unwrap().contains("Wrong direction"));
    assert_eq!(graph.edge_count(), 0);

    assert!(propose_edge(&mut graph, &ing, &svc).unwrap().allowed);
    assert!(has_edge(&graph, &ing, &svc));
}

#[test]
fn test_propose_edge_unknown_endpoint() {
    let mut graph = Graph::new();
    let mut ids = SequentialIds::new();
    let svc = create_node(&mut graph, Kind::Service, &mut ids).unwrap();

    let err = propose_edge(&mut graph, &svc, "ghost").unwrap_err();
    assert_eq!(
        err,
        KubegraphError::NodeNotFound {
            node_id: "ghost".to_string()
        }
    );
}

#[test]
fn test_duplicate_edges_are_kept_and_removed_one_at_a_time() {
    let mut graph = Graph::new();
    let mut ids = SequentialIds::new();
    let dep = create_node(&mut graph, Kind::Deployment, &mut ids).unwrap();
    let cm = create_node(&mut graph, Kind::ConfigMap, &mut ids).unwrap();

    propose_edge(&mut graph, &dep, &cm).unwrap();
    propose_edge(&mut graph, &dep, &cm).unwrap();
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.targets_of(&dep).len(), 1);

    remove_edge(&mut graph, &dep, &cm).unwrap();
    assert!(has_edge(&graph, &dep, &cm));
    remove_edge(&mut graph, &dep, &cm).unwrap();
    assert!(matches!(
        remove_edge(&mut graph, &dep, &cm),
        Err(KubegraphError::EdgeNotFound { .. })
    ));
}

#[test]
fn test_plain_delete_leaves_dangling_edges() {
    let mut graph = Graph::new();
    let mut ids = SequentialIds::new();
    let app = web_app(&mut graph, &mut ids);

    delete_node(&mut graph, &app.config_map).unwrap();

    let dangling = find_dangling_edges(&graph);
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].0, Edge::new(app.deployment.clone(), app.config_map.clone()));
    assert_eq!(dangling[0].1, app.config_map);
    assert!(matches!(
        validate_graph(&graph),
        Err(KubegraphError::DanglingEdge { .. })
    ));

    assert_eq!(remove_edges_touching(&mut graph, &app.config_map), 1);
    assert!(validate_graph(&graph).is_ok());
}

#[test]
fn test_cascade_delete() {
    let mut graph = Graph::new();
    let mut ids = SequentialIds::new();
    let app = web_app(&mut graph, &mut ids);

    let (node, removed) = delete_node_cascade(&mut graph, &app.deployment).unwrap();
    assert_eq!(node.kind(), Kind::Deployment);
    // service, config map, secret, claim and autoscaler edges
    assert_eq!(removed, 5);
    assert!(validate_graph(&graph).is_ok());
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_loaded_graph_with_disallowed_edge_fails_validation() {
    let json = r#"{
        "nodes": {
            "a": {"id": "a", "label": "a",
                  "resource": {"kind": "configmap", "name": "c"}},
            "b": {"id": "b", "label": "b",
                  "resource": {"kind": "pod", "name": "p",
                               "container": {"name": "app", "image": "nginx"}}}
        },
        "edges": [{"source": "a", "target": "b"}]
    }"#;
    let graph: Graph = serde_json::from_str(json).unwrap();

    assert_eq!(find_disallowed_edges(&graph).len(), 1);
    assert!(matches!(
        validate_graph(&graph),
        Err(KubegraphError::DisallowedEdge { .. })
    ));
}

#[test]
fn test_update_relabel_move() {
    let mut graph = Graph::new();
    let mut ids = UuidIds;
    let id = create_node(&mut graph, Kind::Secret, &mut ids).unwrap();
    assert!(id.starts_with("secret-"));

    let mut secret = registry::default_secret();
    secret.name = "db".to_string();
    update_resource(&mut graph, &id, kubegraph_core::Resource::Secret(secret)).unwrap();
    assert_eq!(graph.get_node(&id).unwrap().name(), "db");

    assert!(matches!(
        relabel(&mut graph, &id, "  ".to_string()),
        Err(KubegraphError::InvalidLabel { .. })
    ));
    relabel(&mut graph, &id, "Database credentials".to_string()).unwrap();

    move_node(&mut graph, &id, Position::new(120.0, -40.5)).unwrap();
    let node = graph.get_node(&id).unwrap();
    assert_eq!(node.label, "Database credentials");
    assert_eq!(node.position, Position::new(120.0, -40.5));
}

#[test]
fn test_graph_json_round_trip_keeps_order() {
    let mut graph = Graph::new();
    let mut ids = SequentialIds::new();
    web_app(&mut graph, &mut ids);

    let json = serde_json::to_string(&graph).unwrap();
    let back: Graph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, graph);

    let order: Vec<_> = back.list_nodes().map(|n| n.id.clone()).collect();
    let original: Vec<_> = graph.list_nodes().map(|n| n.id.clone()).collect();
    assert_eq!(order, original);
}
