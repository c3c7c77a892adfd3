//! Functional-boundary apply function
//!
//! `apply()` is the single entry point for atomic graph mutations. It works
//! on a copy of the caller's graph: on `Ok` the copy is returned with the
//! change applied, on `Err` nothing observable has changed.
//!
//! ## Example
//!
//! ```
//! use kubegraph_core::{apply, Command, Graph, model::Kind, ops::SequentialIds};
//!
//! let graph = Graph::new();
//! let mut ids = SequentialIds::new();
//! let applied = apply(&graph, Command::NodeCreate { kind: Kind::Deployment }, &mut ids).unwrap();
//! assert_eq!(applied.graph.node_count(), 1);
//! assert!(graph.is_empty());
//! ```

use crate::commands::Command;
use crate::errors::Result;
use crate::model::Node;
use crate::ops::{self, Graph, IdSource, ImportSummary};
use crate::{log_op_end, log_op_error, log_op_start};

/// Result of a successful command
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    NodeCreated { node_id: String },
    NodeUpdated,
    NodeRelabeled,
    NodeMoved,
    NodeDeleted { node: Node },
    NodeDeletedCascade { node: Node, edges_removed: usize },
    EdgeCreated,
    /// The rule table refused the edge; the graph is unchanged
    EdgeRejected { reason: String },
    EdgeDeleted,
    Imported(ImportSummary),
}

/// New graph state plus what the command did
#[derive(Debug, Clone)]
pub struct Applied {
    pub graph: Graph,
    pub outcome: ApplyOutcome,
}

/// Apply a command to a copy of `graph`
///
/// A rejected edge proposal is not an error: it comes back as
/// [`ApplyOutcome::EdgeRejected`] with the unchanged graph.
///
/// # Errors
///
/// Any error of the underlying operation (`NodeNotFound`, `KindMismatch`,
/// `InvalidLabel`, `EdgeNotFound`, `ManifestSyntax`, `ManifestShape`).
/// The caller's graph is never modified.
pub fn apply(graph: &Graph, cmd: Command, ids: &mut dyn IdSource) -> Result<Applied> {
    let op = cmd.op_name();
    log_op_start!("apply", command = op);
    let start = std::time::Instant::now();

    let mut next = graph.clone();
    let outcome = apply_to(&mut next, cmd, ids).map_err(|e| {
        log_op_error!(
            "apply",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "apply",
        duration_ms = start.elapsed().as_millis() as u64,
        command = op,
        node_count = next.node_count(),
        edge_count = next.edge_count()
    );
    Ok(Applied {
        graph: next,
        outcome,
    })
}

fn apply_to(graph: &mut Graph, cmd: Command, ids: &mut dyn IdSource) -> Result<ApplyOutcome> {
    match cmd {
        Command::NodeCreate { kind } => {
            let node_id = ops::create_node(graph, kind, ids)?;
            Ok(ApplyOutcome::NodeCreated { node_id })
        }

        Command::NodeUpdate { node_id, resource } => {
            ops::update_resource(graph, &node_id, resource)?;
            Ok(ApplyOutcome::NodeUpdated)
        }

        Command::NodeRelabel { node_id, label } => {
            ops::relabel(graph, &node_id, label)?;
            Ok(ApplyOutcome::NodeRelabeled)
        }

        Command::NodeMove { node_id, position } => {
            ops::move_node(graph, &node_id, position)?;
            Ok(ApplyOutcome::NodeMoved)
        }

        Command::NodeDelete { node_id } => {
            let node = ops::delete_node(graph, &node_id)?;
            Ok(ApplyOutcome::NodeDeleted { node })
        }

        Command::NodeDeleteCascade { node_id } => {
            let (node, edges_removed) = ops::delete_node_cascade(graph, &node_id)?;
            Ok(ApplyOutcome::NodeDeletedCascade {
                node,
                edges_removed,
            })
        }

        Command::EdgeCreate {
            source_id,
            target_id,
        } => {
            let verdict = ops::propose_edge(graph, &source_id, &target_id)?;
            if verdict.allowed {
                Ok(ApplyOutcome::EdgeCreated)
            } else {
                Ok(ApplyOutcome::EdgeRejected {
                    reason: verdict.reason.unwrap_or_default(),
                })
            }
        }

        Command::EdgeDelete {
            source_id,
            target_id,
        } => {
            ops::remove_edge(graph, &source_id, &target_id)?;
            Ok(ApplyOutcome::EdgeDeleted)
        }

        Command::Import { text } => {
            let summary = ops::import_manifests(graph, &text, ids)?;
            Ok(ApplyOutcome::Imported(summary))
        }
    }
}
