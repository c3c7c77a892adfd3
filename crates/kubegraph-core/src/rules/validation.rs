use crate::errors::{KubegraphError, Result};
use crate::ops::Graph;

use super::invariants;

/// Validate the whole graph
///
/// Checks that every edge endpoint exists and that every edge is allowed by
/// the compatibility table.
///
/// # Errors
/// Returns the first violation found: dangling edges before disallowed ones.
/// For exhaustive reporting, call the functions in [`invariants`] directly.
pub fn validate_graph(graph: &Graph) -> Result<()> {
    if let Some((edge, missing_id)) = invariants::find_dangling_edges(graph).into_iter().next() {
        return Err(KubegraphError::DanglingEdge {
            source_id: edge.source,
            target_id: edge.target,
            missing_id,
        });
    }

    if let Some((edge, reason)) = invariants::find_disallowed_edges(graph).into_iter().next() {
        return Err(KubegraphError::DisallowedEdge {
            source_id: edge.source,
            target_id: edge.target,
            reason,
        });
    }

    Ok(())
}
