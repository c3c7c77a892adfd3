//! Resource type registry
//!
//! Per-kind default constructors, attribute schemas for the editing
//! surface, and the manifest `kind`/`apiVersion` each node kind maps to.

use crate::model::{
    Autoscaler, ConfigMap, Container, Deployment, Ingress, Kind, Pairs, PathType, Placement, Pod,
    Resource, ScheduledJob, Secret, Service, ServiceType, Sidecar, VolumeClaim,
};

/// Value type of an editable attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
    Integer,
    OptionalInteger,
    Boolean,
    /// Ordered key/value pairs
    KeyValuePairs,
    /// Ordered list of strings
    TextList,
    /// One of a fixed set of strings
    Choice(&'static [&'static str]),
    /// Ingress path rules
    PathRules,
    /// Sidecar volume mounts
    VolumeMounts,
}

/// One editable attribute of a kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    /// Field name; nested container fields are dotted (`container.image`)
    pub name: &'static str,
    pub title: &'static str,
    pub value_type: ValueType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    pub kind: Kind,
    pub fields: Vec<AttributeDescriptor>,
}

impl AttributeSchema {
    pub fn field(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub const SERVICE_TYPES: &[&str] = &["ClusterIP", "NodePort", "LoadBalancer"];
pub const PATH_TYPES: &[&str] = &["Prefix", "Exact", "ImplementationSpecific"];
pub const PLACEMENTS: &[&str] = &["sidecar", "init"];
pub const SECRET_TYPES: &[&str] = &[
    "Opaque",
    "kubernetes.io/tls",
    "kubernetes.io/dockerconfigjson",
    "kubernetes.io/basic-auth",
];

pub const DEFAULT_SECRET_TYPE: &str = "Opaque";
pub const DEFAULT_ACCESS_MODE: &str = "ReadWriteOnce";

/// Fully populated attribute record for a freshly created node of `kind`
pub fn default_for(kind: Kind) -> Resource {
    match kind {
        Kind::Ingress => Resource::Ingress(default_ingress()),
        Kind::Service => Resource::Service(default_service()),
        Kind::Deployment => Resource::Deployment(default_deployment()),
        Kind::Pod => Resource::Pod(default_pod()),
        Kind::Sidecar => Resource::Sidecar(default_sidecar()),
        Kind::ConfigMap => Resource::ConfigMap(default_config_map()),
        Kind::Secret => Resource::Secret(default_secret()),
        Kind::VolumeClaim => Resource::VolumeClaim(default_volume_claim()),
        Kind::ScheduledJob => Resource::ScheduledJob(default_scheduled_job()),
        Kind::Autoscaler => Resource::Autoscaler(default_autoscaler()),
    }
}

pub fn default_ingress() -> Ingress {
    Ingress {
        name: "my-ingress".to_string(),
        host: "example.com".to_string(),
        paths: Vec::new(),
        tls: false,
        tls_secret_name: String::new(),
        annotations: Pairs::new(),
    }
}

pub fn default_service() -> Service {
    Service {
        name: "my-service".to_string(),
        port: 80,
        target_port: 80,
        service_type: ServiceType::ClusterIp,
        selector: Pairs::new(),
    }
}

pub fn default_deployment() -> Deployment {
    Deployment {
        name: "my-deployment".to_string(),
        replicas: 1,
        container: default_container(),
        labels: [("app", "my-deployment")].into_iter().collect(),
    }
}

pub fn default_pod() -> Pod {
    Pod {
        name: "my-pod".to_string(),
        container: default_container(),
        labels: [("app", "my-pod")].into_iter().collect(),
    }
}

pub fn default_container() -> Container {
    Container {
        name: "app".to_string(),
        image: "nginx:latest".to_string(),
        port: Some(80),
        env: Pairs::new(),
    }
}

pub fn default_sidecar() -> Sidecar {
    Sidecar {
        name: "sidecar".to_string(),
        image: "busybox:latest".to_string(),
        placement: Placement::Sidecar,
        port: None,
        command: Vec::new(),
        args: Vec::new(),
        env: Pairs::new(),
        volume_mounts: Vec::new(),
    }
}

pub fn default_config_map() -> ConfigMap {
    ConfigMap {
        name: "my-config".to_string(),
        data: Pairs::new(),
    }
}

pub fn default_secret() -> Secret {
    Secret {
        name: "my-secret".to_string(),
        secret_type: DEFAULT_SECRET_TYPE.to_string(),
        data: Pairs::new(),
    }
}

pub fn default_volume_claim() -> VolumeClaim {
    VolumeClaim {
        name: "my-volume-claim".to_string(),
        storage_class: String::new(),
        size: "1Gi".to_string(),
        access_modes: vec![DEFAULT_ACCESS_MODE.to_string()],
    }
}

pub fn default_scheduled_job() -> ScheduledJob {
    ScheduledJob {
        name: "my-cronjob".to_string(),
        schedule: "*/5 * * * *".to_string(),
        image: "busybox:latest".to_string(),
        command: Vec::new(),
        args: Vec::new(),
    }
}

pub fn default_autoscaler() -> Autoscaler {
    Autoscaler {
        name: "my-hpa".to_string(),
        target: String::new(),
        min_replicas: 1,
        max_replicas: 10,
        cpu_target_percent: 80,
    }
}

/// Attribute descriptors for the editing surface
pub fn describe(kind: Kind) -> AttributeSchema {
    use ValueType::*;

    let field = |name, title, value_type| AttributeDescriptor {
        name,
        title,
        value_type,
    };
    let container_fields = || {
        vec![
            field("container.name", "Container Name", Text),
            field("container.image", "Image", Text),
            field("container.port", "Container Port", OptionalInteger),
            field("container.env", "Environment Variables", KeyValuePairs),
        ]
    };

    let fields = match kind {
        Kind::Ingress => vec![
            field("name", "Name", Text),
            field("host", "Host", Text),
            field("paths", "Paths", PathRules),
            field("tls", "Enable TLS", Boolean),
            field("tls_secret_name", "TLS Secret Name", Text),
            field("annotations", "Annotations", KeyValuePairs),
        ],
        Kind::Service => vec![
            field("name", "Name", Text),
            field("port", "Port", Integer),
            field("target_port", "Target Port", Integer),
            field("service_type", "Service Type", Choice(SERVICE_TYPES)),
            field("selector", "Selector", KeyValuePairs),
        ],
        Kind::Deployment => {
            let mut fields = vec![
                field("name", "Name", Text),
                field("replicas", "Replicas", Integer),
            ];
            fields.extend(container_fields());
            fields.push(field("labels", "Labels", KeyValuePairs));
            fields
        }
        Kind::Pod => {
            let mut fields = vec![field("name", "Name", Text)];
            fields.extend(container_fields());
            fields.push(field("labels", "Labels", KeyValuePairs));
            fields
        }
        Kind::Sidecar => vec![
            field("name", "Container Name", Text),
            field("image", "Image", Text),
            field("placement", "Placement", Choice(PLACEMENTS)),
            field("port", "Port", OptionalInteger),
            field("command", "Command", TextList),
            field("args", "Arguments", TextList),
            field("env", "Environment Variables", KeyValuePairs),
            field("volume_mounts", "Volume Mounts", VolumeMounts),
        ],
        Kind::ConfigMap => vec![
            field("name", "Name", Text),
            field("data", "Data", KeyValuePairs),
        ],
        Kind::Secret => vec![
            field("name", "Name", Text),
            field("secret_type", "Type", Choice(SECRET_TYPES)),
            field("data", "Data", KeyValuePairs),
        ],
        Kind::VolumeClaim => vec![
            field("name", "Name", Text),
            field("storage_class", "Storage Class", Text),
            field("size", "Size", Text),
            field("access_modes", "Access Modes", TextList),
        ],
        Kind::ScheduledJob => vec![
            field("name", "Name", Text),
            field("schedule", "Schedule", Text),
            field("image", "Image", Text),
            field("command", "Command", TextList),
            field("args", "Arguments", TextList),
        ],
        Kind::Autoscaler => vec![
            field("name", "Name", Text),
            field("target", "Target Deployment", Text),
            field("min_replicas", "Min Replicas", Integer),
            field("max_replicas", "Max Replicas", Integer),
            field("cpu_target_percent", "CPU Target (%)", Integer),
        ],
    };

    AttributeSchema { kind, fields }
}

/// Manifest `kind` string, `None` for kinds embedded in another document
pub fn manifest_kind(kind: Kind) -> Option<&'static str> {
    match kind {
        Kind::Ingress => Some("Ingress"),
        Kind::Service => Some("Service"),
        Kind::Deployment => Some("Deployment"),
        Kind::Pod => Some("Pod"),
        Kind::Sidecar => None,
        Kind::ConfigMap => Some("ConfigMap"),
        Kind::Secret => Some("Secret"),
        Kind::VolumeClaim => Some("PersistentVolumeClaim"),
        Kind::ScheduledJob => Some("CronJob"),
        Kind::Autoscaler => Some("HorizontalPodAutoscaler"),
    }
}

/// Manifest `apiVersion`, `None` for kinds embedded in another document
pub fn api_version(kind: Kind) -> Option<&'static str> {
    match kind {
        Kind::Ingress => Some("networking.k8s.io/v1"),
        Kind::Deployment => Some("apps/v1"),
        Kind::ScheduledJob => Some("batch/v1"),
        Kind::Autoscaler => Some("autoscaling/v2"),
        Kind::Service | Kind::Pod | Kind::ConfigMap | Kind::Secret | Kind::VolumeClaim => {
            Some("v1")
        }
        Kind::Sidecar => None,
    }
}

/// Node kind for a manifest `kind` string
pub fn kind_for_manifest(manifest_kind_str: &str) -> Option<Kind> {
    Kind::ALL
        .into_iter()
        .find(|k| manifest_kind(*k) == Some(manifest_kind_str))
}
