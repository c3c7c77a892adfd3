//! Kind-specific attribute records
//!
//! Every collection-typed attribute is always present (possibly empty) so
//! that consumers never have to distinguish "absent" from "empty".

use serde::{Deserialize, Serialize};

use super::kind::Kind;
use super::pairs::Pairs;

/// Attribute record of a node, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Resource {
    Ingress(Ingress),
    Service(Service),
    Deployment(Deployment),
    Pod(Pod),
    Sidecar(Sidecar),
    ConfigMap(ConfigMap),
    Secret(Secret),
    VolumeClaim(VolumeClaim),
    ScheduledJob(ScheduledJob),
    Autoscaler(Autoscaler),
}

impl Resource {
    pub fn kind(&self) -> Kind {
        match self {
            Resource::Ingress(_) => Kind::Ingress,
            Resource::Service(_) => Kind::Service,
            Resource::Deployment(_) => Kind::Deployment,
            Resource::Pod(_) => Kind::Pod,
            Resource::Sidecar(_) => Kind::Sidecar,
            Resource::ConfigMap(_) => Kind::ConfigMap,
            Resource::Secret(_) => Kind::Secret,
            Resource::VolumeClaim(_) => Kind::VolumeClaim,
            Resource::ScheduledJob(_) => Kind::ScheduledJob,
            Resource::Autoscaler(_) => Kind::Autoscaler,
        }
    }

    /// Name used for `(kind, name)` lookup and as `metadata.name`
    ///
    /// For a Sidecar this is the container name.
    pub fn name(&self) -> &str {
        match self {
            Resource::Ingress(r) => &r.name,
            Resource::Service(r) => &r.name,
            Resource::Deployment(r) => &r.name,
            Resource::Pod(r) => &r.name,
            Resource::Sidecar(r) => &r.name,
            Resource::ConfigMap(r) => &r.name,
            Resource::Secret(r) => &r.name,
            Resource::VolumeClaim(r) => &r.name,
            Resource::ScheduledJob(r) => &r.name,
            Resource::Autoscaler(r) => &r.name,
        }
    }

    /// Labels a Service selector is matched against (workloads only)
    pub fn workload_labels(&self) -> Option<&Pairs> {
        match self {
            Resource::Deployment(d) => Some(&d.labels),
            Resource::Pod(p) => Some(&p.labels),
            _ => None,
        }
    }
}

/// The primary container of a Deployment or Pod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub env: Pairs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub name: String,
    pub replicas: u32,
    pub container: Container,
    #[serde(default)]
    pub labels: Pairs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pod {
    pub name: String,
    pub container: Container,
    #[serde(default)]
    pub labels: Pairs,
}

/// How a Service is exposed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    #[serde(rename = "ClusterIP")]
    ClusterIp,
    NodePort,
    LoadBalancer,
}

impl ServiceType {
    pub const ALL: [ServiceType; 3] = [
        ServiceType::ClusterIp,
        ServiceType::NodePort,
        ServiceType::LoadBalancer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::ClusterIp => "ClusterIP",
            ServiceType::NodePort => "NodePort",
            ServiceType::LoadBalancer => "LoadBalancer",
        }
    }

    pub fn parse(value: &str) -> Option<ServiceType> {
        ServiceType::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub port: u16,
    pub target_port: u16,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub selector: Pairs,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathType {
    #[default]
    Prefix,
    Exact,
    ImplementationSpecific,
}

impl PathType {
    pub const ALL: [PathType; 3] = [
        PathType::Prefix,
        PathType::Exact,
        PathType::ImplementationSpecific,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PathType::Prefix => "Prefix",
            PathType::Exact => "Exact",
            PathType::ImplementationSpecific => "ImplementationSpecific",
        }
    }

    pub fn parse(value: &str) -> Option<PathType> {
        PathType::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// One HTTP path rule of an Ingress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressPath {
    pub path: String,
    #[serde(default)]
    pub path_type: PathType,
    pub service_name: String,
    pub service_port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingress {
    pub name: String,
    pub host: String,
    #[serde(default)]
    pub paths: Vec<IngressPath>,
    #[serde(default)]
    pub tls: bool,
    #[serde(default)]
    pub tls_secret_name: String,
    #[serde(default)]
    pub annotations: Pairs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMap {
    pub name: String,
    #[serde(default)]
    pub data: Pairs,
}

/// Secret with plaintext values; encoding happens at generation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    pub secret_type: String,
    #[serde(default)]
    pub data: Pairs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeClaim {
    pub name: String,
    /// Empty means the cluster default class
    #[serde(default)]
    pub storage_class: String,
    pub size: String,
    #[serde(default)]
    pub access_modes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJob {
    pub name: String,
    pub schedule: String,
    pub image: String,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Autoscaler {
    pub name: String,
    /// Name of the Deployment to scale; empty falls back to the connected one
    #[serde(default)]
    pub target: String,
    pub min_replicas: u32,
    pub max_replicas: u32,
    pub cpu_target_percent: u32,
}

/// Where a sidecar container runs relative to the primary container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Runs alongside the primary container
    #[default]
    Sidecar,
    /// Runs to completion before the primary container starts
    Init,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidecar {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: Pairs,
    #[serde(default)]
    pub volume_mounts: Vec<VolumeMount>,
}
