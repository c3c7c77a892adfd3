//! Canonical logging macros
//!
//! Each public operation that can touch many nodes or documents
//! (`generate`, `parse`, `import_manifests`, `apply`) logs exactly one
//! start event and exactly one end or end_error event through these
//! macros. Soft-fail branches inside them (skipped documents, unresolved
//! references, rejected edges) use plain `tracing::debug!`/`tracing::warn!`.

/// Log the start of an operation
///
/// Extra fields describe the input, e.g. the graph size for `generate` or
/// the text length for `parse`.
///
/// ```
/// # use kubegraph_core::log_op_start;
/// log_op_start!("generate", node_count = 7);
/// log_op_start!("parse", input_bytes = 1024);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// `duration_ms` is required; extra fields describe the result.
///
/// ```
/// # use kubegraph_core::log_op_end;
/// log_op_end!("generate", duration_ms = 4, document_count = 6);
/// log_op_end!("parse", duration_ms = 2, node_count = 3, edge_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log the failed end of an operation
///
/// The error goes through [`KgError`](crate::errors::KgError), so the
/// event carries its stable kind and code plus the node id or document
/// index it points at. Either of the latter is omitted when absent.
///
/// ```
/// # use kubegraph_core::{log_op_error, errors::KubegraphError};
/// let err = KubegraphError::ManifestSyntax {
///     document_index: Some(2),
///     message: "bad indent".to_string(),
/// };
/// log_op_error!("parse", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let kg_err: $crate::errors::KgError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?kg_err.kind(),
            err_code = kg_err.code(),
            err_node_id = kg_err.node_id(),
            err_document_index = kg_err.document_index(),
            $($field)*
        );
    }};
}
