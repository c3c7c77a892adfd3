//! Apply boundary: every command either yields a new graph or leaves the
//! caller's graph exactly as it was

use kubegraph_core::model::{Kind, Position};
use kubegraph_core::ops::SequentialIds;
use kubegraph_core::{apply, ApplyOutcome, Command, Graph, KubegraphError};

fn create(graph: &Graph, kind: Kind, ids: &mut SequentialIds) -> (Graph, String) {
    let applied = apply(graph, Command::NodeCreate { kind }, ids).unwrap();
    match applied.outcome {
        ApplyOutcome::NodeCreated { node_id } => (applied.graph, node_id),
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_import_command_adds_nodes_and_edges() {
    let mut ids = SequentialIds::new();
    let text = "kind: ConfigMap\nmetadata:\n  name: settings\n---\nkind: Pod\nmetadata:\n  name: worker\nspec:\n  containers:\n    - name: app\n      image: worker:1\n      envFrom:\n        - configMapRef:\n            name: settings\n";

    let applied = apply(
        &Graph::new(),
        Command::Import {
            text: text.to_string(),
        },
        &mut ids,
    )
    .unwrap();

    let ApplyOutcome::Imported(summary) = applied.outcome else {
        panic!("expected an import outcome");
    };
    assert_eq!(summary.node_ids.len(), 2);
    assert_eq!(summary.edge_count, 1);
    assert_eq!(applied.graph.edge_count(), 1);
}

#[test]
fn test_import_is_all_or_nothing() {
    let mut ids = SequentialIds::new();
    let (graph, _) = create(&Graph::new(), Kind::Deployment, &mut ids);

    // First document is fine, second is malformed
    let text = "kind: ConfigMap\nmetadata:\n  name: ok\n---\nkind: Service\nspec:\n  ports: 80\n";
    let err = apply(
        &graph,
        Command::Import {
            text: text.to_string(),
        },
        &mut ids,
    )
    .unwrap_err();

    assert!(matches!(err, KubegraphError::ManifestShape { document_index: 1, .. }));
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_import_does_not_reuse_ids() {
    let mut ids = SequentialIds::new();
    let (graph, existing) = create(&Graph::new(), Kind::ConfigMap, &mut ids);

    let applied = apply(
        &graph,
        Command::Import {
            text: "kind: ConfigMap\nmetadata:\n  name: second\n".to_string(),
        },
        &mut SequentialIds::new(),
    )
    .unwrap();

    let ApplyOutcome::Imported(summary) = applied.outcome else {
        panic!("expected an import outcome");
    };
    assert_ne!(summary.node_ids[0], existing);
    assert_eq!(applied.graph.node_count(), 2);
}

#[test]
fn test_node_commands() {
    let mut ids = SequentialIds::new();
    let (graph, id) = create(&Graph::new(), Kind::Pod, &mut ids);

    let applied = apply(
        &graph,
        Command::NodeRelabel {
            node_id: id.clone(),
            label: "worker pod".to_string(),
        },
        &mut ids,
    )
    .unwrap();
    assert_eq!(applied.outcome, ApplyOutcome::NodeRelabeled);

    let applied = apply(
        &applied.graph,
        Command::NodeMove {
            node_id: id.clone(),
            position: Position::new(10.0, 20.0),
        },
        &mut ids,
    )
    .unwrap();
    let node = applied.graph.get_node(&id).unwrap();
    assert_eq!(node.label, "worker pod");
    assert_eq!(node.position, Position::new(10.0, 20.0));

    let err = apply(
        &applied.graph,
        Command::NodeUpdate {
            node_id: id.clone(),
            resource: kubegraph_core::registry::default_for(Kind::Service),
        },
        &mut ids,
    )
    .unwrap_err();
    assert!(matches!(err, KubegraphError::KindMismatch { .. }));
}

#[test]
fn test_edge_commands() {
    let mut ids = SequentialIds::new();
    let (graph, dep) = create(&Graph::new(), Kind::Deployment, &mut ids);
    let (graph, secret) = create(&graph, Kind::Secret, &mut ids);

    let applied = apply(
        &graph,
        Command::EdgeCreate {
            source_id: secret.clone(),
            target_id: dep.clone(),
        },
        &mut ids,
    )
    .unwrap();
    assert!(matches!(applied.outcome, ApplyOutcome::EdgeRejected { .. }));

    let applied = apply(
        &graph,
        Command::EdgeCreate {
            source_id: dep.clone(),
            target_id: secret.clone(),
        },
        &mut ids,
    )
    .unwrap();
    assert_eq!(applied.outcome, ApplyOutcome::EdgeCreated);

    let applied = apply(
        &applied.graph,
        Command::EdgeDelete {
            source_id: dep,
            target_id: secret,
        },
        &mut ids,
    )
    .unwrap();
    assert_eq!(applied.outcome, ApplyOutcome::EdgeDeleted);
    assert_eq!(applied.graph.edge_count(), 0);
}
