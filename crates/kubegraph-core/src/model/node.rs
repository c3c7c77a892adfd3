use serde::{Deserialize, Serialize};

use super::kind::Kind;
use super::resources::Resource;

/// Canvas position of a node
///
/// Metadata for the editing surface; never influences generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Node - a typed infrastructure resource in the graph
///
/// The attribute record is private so that its variant, and therefore the
/// node's kind, can only change through a kind-checked replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identifier issued by an `IdSource`, unique within a session
    pub id: String,

    /// Display label shown on the canvas
    pub label: String,

    #[serde(default)]
    pub position: Position,

    resource: Resource,
}

impl Node {
    /// Create a node whose label is the resource name
    pub fn new(id: impl Into<String>, resource: Resource) -> Self {
        let label = resource.name().to_string();
        Self {
            id: id.into(),
            label,
            position: Position::default(),
            resource,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn kind(&self) -> Kind {
        self.resource.kind()
    }

    pub fn name(&self) -> &str {
        self.resource.name()
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Swap in a new attribute record of the same kind
    ///
    /// Returns the rejected record unchanged when its kind differs.
    pub(crate) fn replace_resource(&mut self, resource: Resource) -> Result<Resource, Resource> {
        if resource.kind() != self.kind() {
            return Err(resource);
        }
        Ok(std::mem::replace(&mut self.resource, resource))
    }
}

/// Directed edge between two nodes, without payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// True when either endpoint is `node_id`
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
