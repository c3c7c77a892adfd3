use thiserror::Error;

use crate::model::Kind;

/// Result type alias using KubegraphError
pub type Result<T> = std::result::Result<T, KubegraphError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and surfacing to the editing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KgErrorKind {
    // Structural/Validation
    InvalidLabel,
    NotFound,
    AlreadyExists,
    KindMismatch,
    DanglingEdge,
    DisallowedEdge,

    // Manifest import
    /// Input text is not well-formed YAML
    ManifestSyntax,
    /// A recognized document has a field of the wrong shape
    ManifestShape,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
}

impl KgErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            KgErrorKind::InvalidLabel => "ERR_INVALID_LABEL",
            KgErrorKind::NotFound => "ERR_NOT_FOUND",
            KgErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            KgErrorKind::KindMismatch => "ERR_KIND_MISMATCH",
            KgErrorKind::DanglingEdge => "ERR_DANGLING_EDGE",
            KgErrorKind::DisallowedEdge => "ERR_DISALLOWED_EDGE",
            KgErrorKind::ManifestSyntax => "ERR_MANIFEST_SYNTAX",
            KgErrorKind::ManifestShape => "ERR_MANIFEST_SHAPE",
            KgErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            KgErrorKind::Io => "ERR_IO",
            KgErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// debugging. Built from a [`KubegraphError`] at reporting boundaries.
#[derive(Debug, Clone)]
pub struct KgError {
    kind: KgErrorKind,
    op: Option<String>,
    node_id: Option<String>,
    document_index: Option<usize>,
    message: String,
}

impl KgError {
    /// Create a new error with the specified kind
    pub fn new(kind: KgErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node_id: None,
            document_index: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node ID context
    pub fn with_node_id(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    /// Add the zero-based index of the offending manifest document
    pub fn with_document_index(mut self, index: usize) -> Self {
        self.document_index = Some(index);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> KgErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    pub fn document_index(&self) -> Option<usize> {
        self.document_index
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for KgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node_id) = &self.node_id {
            write!(f, " (node_id: {})", node_id)?;
        }
        if let Some(index) = self.document_index {
            write!(f, " (document: {})", index)?;
        }
        Ok(())
    }
}

impl std::error::Error for KgError {}

// ========== End Error Facility ==========

/// Error taxonomy for graph and manifest operations
///
/// Soft-fail conditions (unknown kinds, dangling references, rule-table
/// rejections) are deliberately absent: they are returned as data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KubegraphError {
    // ===== Graph Store Errors =====
    /// Node not found in the graph
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    /// A node with this ID is already stored
    #[error("Node already exists: {node_id}")]
    DuplicateNodeId { node_id: String },

    /// Attribute replacement tried to change a node's kind
    #[error("Node {node_id} is a {expected}; cannot replace its attributes with a {actual}")]
    KindMismatch {
        node_id: String,
        expected: Kind,
        actual: Kind,
    },

    /// Display label is empty or whitespace-only
    #[error("Invalid label: {reason}")]
    InvalidLabel { reason: String },

    /// No edge between the given endpoints
    #[error("Edge not found: {source_id} -> {target_id}")]
    EdgeNotFound {
        source_id: String,
        target_id: String,
    },

    // ===== Validation Errors =====
    /// Edge endpoint is missing from the graph
    #[error("Edge {source_id} -> {target_id} references missing node {missing_id}")]
    DanglingEdge {
        source_id: String,
        target_id: String,
        missing_id: String,
    },

    /// Edge violates the compatibility rule table
    #[error("Edge {source_id} -> {target_id} is not allowed: {reason}")]
    DisallowedEdge {
        source_id: String,
        target_id: String,
        reason: String,
    },

    // ===== Manifest Errors =====
    /// Manifest text is not well-formed YAML
    #[error("Manifest syntax error{}: {message}", fmt_document(.document_index))]
    ManifestSyntax {
        document_index: Option<usize>,
        message: String,
    },

    /// A recognized manifest document has fields of the wrong shape
    #[error("Malformed {kind} manifest in document {document_index}: {message}")]
    ManifestShape {
        document_index: usize,
        kind: String,
        message: String,
    },

    // ===== Configuration Errors =====
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ===== Internal Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

fn fmt_document(index: &Option<usize>) -> String {
    index
        .map(|i| format!(" in document {}", i))
        .unwrap_or_default()
}

impl From<KubegraphError> for KgError {
    fn from(err: KubegraphError) -> Self {
        match err {
            KubegraphError::NodeNotFound { node_id } => KgError::new(KgErrorKind::NotFound)
                .with_node_id(node_id)
                .with_message("Node not found"),

            KubegraphError::DuplicateNodeId { node_id } => {
                KgError::new(KgErrorKind::AlreadyExists)
                    .with_node_id(node_id)
                    .with_message("Node already exists")
            }

            KubegraphError::KindMismatch {
                node_id,
                expected,
                actual,
            } => KgError::new(KgErrorKind::KindMismatch)
                .with_node_id(node_id)
                .with_message(format!("Node kind is {}, got {}", expected, actual)),

            KubegraphError::InvalidLabel { reason } => KgError::new(KgErrorKind::InvalidLabel)
                .with_message(format!("Invalid label: {}", reason)),

            KubegraphError::EdgeNotFound {
                source_id,
                target_id,
            } => KgError::new(KgErrorKind::NotFound)
                .with_node_id(source_id)
                .with_message(format!("No edge to {}", target_id)),

            KubegraphError::DanglingEdge {
                source_id,
                target_id,
                missing_id,
            } => KgError::new(KgErrorKind::DanglingEdge)
                .with_node_id(missing_id)
                .with_message(format!("Edge {} -> {} is dangling", source_id, target_id)),

            KubegraphError::DisallowedEdge {
                source_id,
                target_id,
                reason,
            } => KgError::new(KgErrorKind::DisallowedEdge)
                .with_node_id(source_id)
                .with_message(format!("Edge to {} not allowed: {}", target_id, reason)),

            KubegraphError::ManifestSyntax {
                document_index,
                message,
            } => {
                let err = KgError::new(KgErrorKind::ManifestSyntax)
                    .with_op("parse")
                    .with_message(message);
                match document_index {
                    Some(index) => err.with_document_index(index),
                    None => err,
                }
            }

            KubegraphError::ManifestShape {
                document_index,
                kind,
                message,
            } => KgError::new(KgErrorKind::ManifestShape)
                .with_op("parse")
                .with_document_index(document_index)
                .with_message(format!("{}: {}", kind, message)),

            KubegraphError::InvalidConfig { message } => {
                KgError::new(KgErrorKind::InvalidConfig).with_message(message)
            }

            KubegraphError::Serialization { message } => {
                KgError::new(KgErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for KubegraphError {
    fn from(err: serde_json::Error) -> Self {
        KubegraphError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for KubegraphError {
    fn from(err: serde_yaml::Error) -> Self {
        KubegraphError::ManifestSyntax {
            document_index: None,
            message: err.to_string(),
        }
    }
}
