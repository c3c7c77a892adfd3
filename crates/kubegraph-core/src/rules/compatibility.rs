use serde::Serialize;

use crate::model::{Kind, Role};

/// Outcome of consulting the compatibility table for one ordered pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleVerdict {
    pub allowed: bool,
    /// Why the pair is rejected; `None` when allowed
    pub reason: Option<String>,
}

impl RuleVerdict {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn deny(source: Kind, target: Kind) -> Self {
        Self {
            allowed: false,
            reason: Some(denial_reason(source, target)),
        }
    }
}

/// Decide whether an edge `source → target` may exist
///
/// Total over all ordered kind pairs. Every pair is listed explicitly so a
/// new kind cannot be added without revisiting each row.
pub fn is_allowed(source: Kind, target: Kind) -> RuleVerdict {
    if permits(source, target) {
        RuleVerdict::allow()
    } else {
        RuleVerdict::deny(source, target)
    }
}

fn permits(source: Kind, target: Kind) -> bool {
    use Kind::*;

    match source {
        Ingress => match target {
            Service => true,
            Ingress | Deployment | Pod | Sidecar | ConfigMap | Secret | VolumeClaim
            | ScheduledJob | Autoscaler => false,
        },
        Service => match target {
            Deployment | Pod => true,
            Ingress | Service | Sidecar | ConfigMap | Secret | VolumeClaim | ScheduledJob
            | Autoscaler => false,
        },
        Deployment => match target {
            ConfigMap | Secret | VolumeClaim | Sidecar => true,
            Ingress | Service | Deployment | Pod | ScheduledJob | Autoscaler => false,
        },
        Pod => match target {
            ConfigMap | Secret | VolumeClaim | Sidecar => true,
            Ingress | Service | Deployment | Pod | ScheduledJob | Autoscaler => false,
        },
        ScheduledJob => match target {
            ConfigMap | Secret | VolumeClaim => true,
            Ingress | Service | Deployment | Pod | Sidecar | ScheduledJob | Autoscaler => false,
        },
        Autoscaler => match target {
            Deployment => true,
            Ingress | Service | Pod | Sidecar | ConfigMap | Secret | VolumeClaim
            | ScheduledJob | Autoscaler => false,
        },
        Sidecar => match target {
            Ingress | Service | Deployment | Pod | Sidecar | ConfigMap | Secret | VolumeClaim
            | ScheduledJob | Autoscaler => false,
        },
        ConfigMap => match target {
            Ingress | Service | Deployment | Pod | Sidecar | ConfigMap | Secret | VolumeClaim
            | ScheduledJob | Autoscaler => false,
        },
        Secret => match target {
            Ingress | Service | Deployment | Pod | Sidecar | ConfigMap | Secret | VolumeClaim
            | ScheduledJob | Autoscaler => false,
        },
        VolumeClaim => match target {
            Ingress | Service | Deployment | Pod | Sidecar | ConfigMap | Secret | VolumeClaim
            | ScheduledJob | Autoscaler => false,
        },
    }
}

/// Kinds `source` may connect to, in canonical kind order
pub fn allowed_targets(source: Kind) -> Vec<Kind> {
    Kind::ALL
        .into_iter()
        .filter(|target| permits(source, *target))
        .collect()
}

fn denial_reason(source: Kind, target: Kind) -> String {
    if source == target {
        return format!("Cannot connect a {} to another {}", source, target);
    }
    if permits(target, source) {
        return format!("Wrong direction: connect {} → {}", target, source);
    }
    match source.role() {
        Role::Passive => {
            return format!(
                "{} is a passive resource and cannot be the source of a connection",
                source
            )
        }
        Role::Attachment => {
            return format!(
                "{} is embedded in its workload and cannot be the source of a connection",
                source
            )
        }
        Role::Router | Role::Selector | Role::Workload | Role::Scaler => {}
    }
    let targets = allowed_targets(source);
    let names: Vec<&str> = targets.iter().map(|k| k.display_name()).collect();
    format!(
        "{} cannot connect to {}; it can connect to {}",
        source,
        target,
        names.join(", ")
    )
}
