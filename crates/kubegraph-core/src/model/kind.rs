use serde::{Deserialize, Serialize};

/// The closed set of node kinds
///
/// A node's kind is fixed at creation. Variant order here is the canonical
/// listing order; manifest output uses [`Kind::GENERATION_ORDER`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Ingress,
    Service,
    Deployment,
    Pod,
    Sidecar,
    ConfigMap,
    Secret,
    VolumeClaim,
    ScheduledJob,
    Autoscaler,
}

/// Structural role a kind plays in the dependency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Routes external traffic (Ingress)
    Router,
    /// Selects workloads by label (Service)
    Selector,
    /// Runs containers (Deployment, Pod, ScheduledJob)
    Workload,
    /// Only ever an edge target (ConfigMap, Secret, VolumeClaim)
    Passive,
    /// Embedded into a workload's pod (Sidecar)
    Attachment,
    /// Adjusts a workload's replica count (Autoscaler)
    Scaler,
}

impl Kind {
    pub const ALL: [Kind; 10] = [
        Kind::Ingress,
        Kind::Service,
        Kind::Deployment,
        Kind::Pod,
        Kind::Sidecar,
        Kind::ConfigMap,
        Kind::Secret,
        Kind::VolumeClaim,
        Kind::ScheduledJob,
        Kind::Autoscaler,
    ];

    /// Order in which kinds are emitted by the generator
    ///
    /// Passive resources first, then workloads, selectors, routers, and
    /// finally schedulers/autoscalers. Sidecars are embedded in their
    /// workload and never emitted on their own.
    pub const GENERATION_ORDER: [Kind; 9] = [
        Kind::ConfigMap,
        Kind::Secret,
        Kind::VolumeClaim,
        Kind::Deployment,
        Kind::Pod,
        Kind::Service,
        Kind::Ingress,
        Kind::ScheduledJob,
        Kind::Autoscaler,
    ];

    /// Lowercase slug, used as node ID prefix and in serialized graphs
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Ingress => "ingress",
            Kind::Service => "service",
            Kind::Deployment => "deployment",
            Kind::Pod => "pod",
            Kind::Sidecar => "sidecar",
            Kind::ConfigMap => "configmap",
            Kind::Secret => "secret",
            Kind::VolumeClaim => "volumeclaim",
            Kind::ScheduledJob => "scheduledjob",
            Kind::Autoscaler => "autoscaler",
        }
    }

    /// Human-readable name, used in labels and rejection reasons
    pub fn display_name(&self) -> &'static str {
        match self {
            Kind::Ingress => "Ingress",
            Kind::Service => "Service",
            Kind::Deployment => "Deployment",
            Kind::Pod => "Pod",
            Kind::Sidecar => "Sidecar",
            Kind::ConfigMap => "ConfigMap",
            Kind::Secret => "Secret",
            Kind::VolumeClaim => "VolumeClaim",
            Kind::ScheduledJob => "ScheduledJob",
            Kind::Autoscaler => "Autoscaler",
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Kind::Ingress => Role::Router,
            Kind::Service => Role::Selector,
            Kind::Deployment | Kind::Pod | Kind::ScheduledJob => Role::Workload,
            Kind::ConfigMap | Kind::Secret | Kind::VolumeClaim => Role::Passive,
            Kind::Sidecar => Role::Attachment,
            Kind::Autoscaler => Role::Scaler,
        }
    }

    /// Parse the lowercase slug produced by [`Kind::as_str`]
    pub fn from_slug(slug: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.as_str() == slug)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_round_trip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_slug(kind.as_str()), Some(kind));
        }
        assert_eq!(Kind::from_slug("statefulset"), None);
    }

    #[test]
    fn test_generation_order_covers_all_but_sidecar() {
        for kind in Kind::ALL {
            let listed = Kind::GENERATION_ORDER.contains(&kind);
            assert_eq!(listed, kind != Kind::Sidecar, "{kind}");
        }
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&Kind::VolumeClaim).unwrap();
        assert_eq!(json, "\"volumeclaim\"");
    }
}
