pub mod kind;
pub mod node;
pub mod pairs;
pub mod resources;

pub use kind::{Kind, Role};
pub use node::{Edge, Node, Position};
pub use pairs::Pairs;
pub use resources::{
    Autoscaler, ConfigMap, Container, Deployment, Ingress, IngressPath, PathType, Placement, Pod,
    Resource, ScheduledJob, Secret, Service, ServiceType, Sidecar, VolumeClaim, VolumeMount,
};
