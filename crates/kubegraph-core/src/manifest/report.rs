use serde::Serialize;

/// How an inferred reference was expressed in the source manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceVia {
    /// `spec.rules[].http.paths[].backend.service.name`
    IngressBackend,
    /// `envFrom[].configMapRef` / `envFrom[].secretRef`
    EnvFrom,
    /// `env[].valueFrom.configMapKeyRef` / `env[].valueFrom.secretKeyRef`
    ValueFrom,
    /// `volumes[]` bound to a claim, configmap or secret
    Volume,
    /// `spec.scaleTargetRef`
    ScaleTarget,
}

/// A document that produced no node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub document_index: usize,
    /// `None` for kindless documents
    pub kind: Option<String>,
    pub name: Option<String>,
}

/// A by-name reference with no matching node in the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedReference {
    pub source_id: String,
    /// Manifest kind the reference points at, e.g. `ConfigMap`
    pub target_kind: String,
    pub target_name: String,
    pub via: ReferenceVia,
}

/// An inferred edge the compatibility table refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEdge {
    pub source_id: String,
    pub target_id: String,
    pub reason: String,
}

/// Every soft-fail branch taken while parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub skipped: Vec<SkippedDocument>,
    pub unresolved: Vec<UnresolvedReference>,
    pub rejected: Vec<RejectedEdge>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.unresolved.is_empty() && self.rejected.is_empty()
    }
}
