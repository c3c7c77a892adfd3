//! Graph → manifest text
//!
//! Each document is a pure function of its node, the node's one-hop
//! targets and the [`GenerateConfig`]. Output order is fixed by
//! [`Kind::GENERATION_ORDER`] and node insertion order, so the same graph
//! always yields the same text.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use super::format::*;
use crate::config::GenerateConfig;
use crate::errors::{KubegraphError, Result};
use crate::model::{self, Container, Kind, Node, Pairs, Placement, Resource};
use crate::ops::Graph;
use crate::registry::{api_version, manifest_kind};
use crate::{log_op_end, log_op_error, log_op_start};

pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// One generated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub node_id: String,
    pub kind: Kind,
    pub name: String,
    pub text: String,
}

/// Generated documents in output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestSet {
    pub documents: Vec<GeneratedDocument>,
}

impl ManifestSet {
    /// Documents of one kind joined by `---`
    pub fn for_kind(&self, kind: Kind) -> Option<String> {
        let texts: Vec<&str> = self
            .documents
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.text.as_str())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.join(DOCUMENT_SEPARATOR))
        }
    }

    /// Per-kind text for every kind with at least one document
    pub fn grouped(&self) -> Vec<(Kind, String)> {
        Kind::GENERATION_ORDER
            .into_iter()
            .filter_map(|kind| self.for_kind(kind).map(|text| (kind, text)))
            .collect()
    }

    /// Every document joined by `---`
    pub fn all(&self) -> String {
        let texts: Vec<&str> = self.documents.iter().map(|d| d.text.as_str()).collect();
        texts.join(DOCUMENT_SEPARATOR)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Generate the manifest set for a whole graph
///
/// Sidecar nodes produce no document of their own; they are embedded in the
/// workloads pointing at them.
///
/// # Errors
/// * `Serialization` - If a document cannot be rendered
pub fn generate(graph: &Graph, config: &GenerateConfig) -> Result<ManifestSet> {
    log_op_start!("generate", node_count = graph.node_count());
    let start = std::time::Instant::now();

    let result = generate_impl(graph, config).map_err(|e| {
        log_op_error!(
            "generate",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "generate",
        duration_ms = start.elapsed().as_millis() as u64,
        document_count = result.len()
    );
    Ok(result)
}

fn generate_impl(graph: &Graph, config: &GenerateConfig) -> Result<ManifestSet> {
    let ctx = Context { graph, config };
    let mut documents = Vec::new();

    for kind in Kind::GENERATION_ORDER {
        for node in graph.nodes_of_kind(kind) {
            if let Some(text) = generate_node(&ctx, node)? {
                documents.push(GeneratedDocument {
                    node_id: node.id.clone(),
                    kind,
                    name: node.name().to_string(),
                    text,
                });
            }
        }
    }

    Ok(ManifestSet { documents })
}

/// Generate the document for a single node
///
/// Returns `None` for Sidecar nodes.
pub fn generate_node_document(
    graph: &Graph,
    node_id: &str,
    config: &GenerateConfig,
) -> Result<Option<String>> {
    let node = graph.get_node(node_id)?;
    generate_node(&Context { graph, config }, node)
}

struct Context<'a> {
    graph: &'a Graph,
    config: &'a GenerateConfig,
}

impl<'a> Context<'a> {
    fn metadata(&self, name: &str, labels: &Pairs, annotations: &Pairs) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            namespace: self.config.namespace.clone(),
            labels: labels.clone(),
            annotations: annotations.clone(),
        }
    }

    fn targets(&self, node: &Node, kind: Kind) -> Vec<&'a Node> {
        self.graph.targets_of_kind(&node.id, kind)
    }
}

/// `(apiVersion, kind)` header strings
fn header(kind: Kind) -> (String, String) {
    (
        api_version(kind).unwrap_or_default().to_string(),
        manifest_kind(kind).unwrap_or_default().to_string(),
    )
}

fn to_text<T: Serialize>(doc: &T) -> Result<String> {
    serde_yaml::to_string(doc).map_err(|e| KubegraphError::Serialization {
        message: e.to_string(),
    })
}

fn generate_node(ctx: &Context<'_>, node: &Node) -> Result<Option<String>> {
    let text = match node.resource() {
        Resource::ConfigMap(r) => to_text(&config_map_doc(ctx, r))?,
        Resource::Secret(r) => to_text(&secret_doc(ctx, r))?,
        Resource::VolumeClaim(r) => to_text(&volume_claim_doc(ctx, r))?,
        Resource::Deployment(r) => to_text(&deployment_doc(ctx, node, r))?,
        Resource::Pod(r) => to_text(&pod_doc(ctx, node, r))?,
        Resource::Service(r) => to_text(&service_doc(ctx, node, r))?,
        Resource::Ingress(r) => to_text(&ingress_doc(ctx, node, r))?,
        Resource::ScheduledJob(r) => to_text(&cron_job_doc(ctx, node, r))?,
        Resource::Autoscaler(r) => to_text(&autoscaler_doc(ctx, node, r))?,
        Resource::Sidecar(_) => return Ok(None),
    };
    Ok(Some(text))
}

fn config_map_doc(ctx: &Context<'_>, cm: &model::ConfigMap) -> ConfigMapManifest {
    let (api_version, kind) = header(Kind::ConfigMap);
    ConfigMapManifest {
        api_version,
        kind,
        metadata: ctx.metadata(&cm.name, &Pairs::new(), &Pairs::new()),
        data: cm.data.clone(),
    }
}

fn secret_doc(ctx: &Context<'_>, secret: &model::Secret) -> SecretManifest {
    let (api_version, kind) = header(Kind::Secret);
    SecretManifest {
        api_version,
        kind,
        metadata: ctx.metadata(&secret.name, &Pairs::new(), &Pairs::new()),
        secret_type: Some(secret.secret_type.clone()),
        data: secret.data.map_values(|v| STANDARD.encode(v.as_bytes())),
        string_data: Pairs::new(),
    }
}

fn volume_claim_doc(ctx: &Context<'_>, claim: &model::VolumeClaim) -> PersistentVolumeClaimManifest {
    let (api_version, kind) = header(Kind::VolumeClaim);
    PersistentVolumeClaimManifest {
        api_version,
        kind,
        metadata: ctx.metadata(&claim.name, &Pairs::new(), &Pairs::new()),
        spec: ClaimSpec {
            access_modes: claim.access_modes.clone(),
            storage_class_name: Some(claim.storage_class.clone()).filter(|s| !s.is_empty()),
            resources: ClaimResources {
                requests: StorageRequest {
                    storage: Some(claim.size.clone()),
                },
            },
        },
    }
}

fn deployment_doc(ctx: &Context<'_>, node: &Node, dep: &model::Deployment) -> DeploymentManifest {
    let (api_version, kind) = header(Kind::Deployment);
    DeploymentManifest {
        api_version,
        kind,
        metadata: ctx.metadata(&dep.name, &dep.labels, &Pairs::new()),
        spec: DeploymentSpec {
            replicas: Some(dep.replicas),
            selector: LabelSelector {
                match_labels: dep.labels.clone(),
            },
            template: PodTemplate {
                metadata: ObjectMeta {
                    labels: dep.labels.clone(),
                    ..ObjectMeta::default()
                },
                spec: pod_spec(ctx, node, primary_container(&dep.container), true),
            },
        },
    }
}

fn pod_doc(ctx: &Context<'_>, node: &Node, pod: &model::Pod) -> PodManifest {
    let (api_version, kind) = header(Kind::Pod);
    PodManifest {
        api_version,
        kind,
        metadata: ctx.metadata(&pod.name, &pod.labels, &Pairs::new()),
        spec: pod_spec(ctx, node, primary_container(&pod.container), true),
    }
}

fn cron_job_doc(ctx: &Context<'_>, node: &Node, job: &model::ScheduledJob) -> CronJobManifest {
    let (api_version, kind) = header(Kind::ScheduledJob);
    let container = ContainerDoc {
        name: Some(job.name.clone()),
        image: Some(job.image.clone()),
        command: job.command.clone(),
        args: job.args.clone(),
        ..ContainerDoc::default()
    };
    let mut spec = pod_spec(ctx, node, container, false);
    spec.restart_policy = Some("OnFailure".to_string());

    CronJobManifest {
        api_version,
        kind,
        metadata: ctx.metadata(&job.name, &Pairs::new(), &Pairs::new()),
        spec: CronJobSpec {
            schedule: Some(job.schedule.clone()),
            job_template: JobTemplate {
                spec: JobSpec {
                    template: PodTemplate {
                        metadata: ObjectMeta::default(),
                        spec,
                    },
                },
            },
        },
    }
}

fn service_doc(ctx: &Context<'_>, node: &Node, svc: &model::Service) -> ServiceManifest {
    let (api_version, kind) = header(Kind::Service);

    // Own selector wins; otherwise borrow the first connected Deployment's labels
    let selector = if svc.selector.is_empty() {
        ctx.targets(node, Kind::Deployment)
            .into_iter()
            .find_map(|n| n.resource().workload_labels().cloned())
            .unwrap_or_default()
    } else {
        svc.selector.clone()
    };

    ServiceManifest {
        api_version,
        kind,
        metadata: ctx.metadata(&svc.name, &Pairs::new(), &Pairs::new()),
        spec: ServiceSpec {
            service_type: Some(svc.service_type.as_str().to_string()),
            selector,
            ports: vec![ServicePort {
                name: None,
                port: Some(svc.port),
                target_port: Some(IntOrString::Int(svc.target_port)),
            }],
        },
    }
}

fn ingress_doc(ctx: &Context<'_>, node: &Node, ing: &model::Ingress) -> IngressManifest {
    let (api_version, kind) = header(Kind::Ingress);

    let paths: Vec<HttpPath> = if ing.paths.is_empty() {
        ctx.targets(node, Kind::Service)
            .into_iter()
            .filter_map(|n| match n.resource() {
                Resource::Service(svc) => Some(http_path(
                    "/",
                    model::PathType::Prefix,
                    &svc.name,
                    svc.port,
                )),
                _ => None,
            })
            .collect()
    } else {
        ing.paths
            .iter()
            .map(|p| http_path(&p.path, p.path_type, &p.service_name, p.service_port))
            .collect()
    };

    let tls = if ing.tls {
        vec![IngressTls {
            hosts: vec![ing.host.clone()],
            secret_name: Some(ing.tls_secret_name.clone()).filter(|s| !s.is_empty()),
        }]
    } else {
        Vec::new()
    };

    IngressManifest {
        api_version,
        kind,
        metadata: ctx.metadata(&ing.name, &Pairs::new(), &ing.annotations),
        spec: IngressSpec {
            tls,
            rules: vec![IngressRule {
                host: Some(ing.host.clone()),
                http: Some(HttpRule { paths }),
            }],
        },
    }
}

fn http_path(path: &str, path_type: model::PathType, service: &str, port: u16) -> HttpPath {
    HttpPath {
        path: Some(path.to_string()),
        path_type: Some(path_type.as_str().to_string()),
        backend: IngressBackend {
            service: Some(BackendService {
                name: service.to_string(),
                port: BackendPort {
                    number: Some(port),
                    name: None,
                },
            }),
        },
    }
}

fn autoscaler_doc(
    ctx: &Context<'_>,
    node: &Node,
    hpa: &model::Autoscaler,
) -> HorizontalPodAutoscalerManifest {
    let (api_version, kind) = header(Kind::Autoscaler);

    let target = if hpa.target.is_empty() {
        ctx.targets(node, Kind::Deployment)
            .first()
            .map(|n| n.name().to_string())
            .unwrap_or_default()
    } else {
        hpa.target.clone()
    };
    let (target_api_version, target_kind) = header(Kind::Deployment);

    HorizontalPodAutoscalerManifest {
        api_version,
        kind,
        metadata: ctx.metadata(&hpa.name, &Pairs::new(), &Pairs::new()),
        spec: AutoscalerSpec {
            scale_target_ref: ScaleTargetRef {
                api_version: target_api_version,
                kind: target_kind,
                name: target,
            },
            min_replicas: Some(hpa.min_replicas),
            max_replicas: Some(hpa.max_replicas),
            metrics: vec![MetricSpec {
                metric_type: "Resource".to_string(),
                resource: Some(ResourceMetric {
                    name: "cpu".to_string(),
                    target: MetricTarget {
                        target_type: "Utilization".to_string(),
                        average_utilization: Some(hpa.cpu_target_percent),
                    },
                }),
            }],
            target_cpu_utilization_percentage: None,
        },
    }
}

fn primary_container(container: &Container) -> ContainerDoc {
    ContainerDoc {
        name: Some(container.name.clone()),
        image: Some(container.image.clone()),
        ports: container
            .port
            .map(|p| {
                vec![ContainerPort {
                    container_port: Some(p),
                }]
            })
            .unwrap_or_default(),
        env: env_vars(&container.env),
        ..ContainerDoc::default()
    }
}

fn env_vars(env: &Pairs) -> Vec<EnvVar> {
    env.iter()
        .map(|(name, value)| EnvVar {
            name: name.to_string(),
            value: Some(value.to_string()),
            value_from: None,
        })
        .collect()
}

/// Pod spec around `main`, wired to the node's connected resources
///
/// ConfigMaps and Secrets become `envFrom` entries and VolumeClaims become
/// a volume plus a mount on the main container, all in edge order. With
/// `with_sidecars`, connected Sidecars are added as extra containers or
/// init containers according to their placement.
fn pod_spec(
    ctx: &Context<'_>,
    node: &Node,
    mut main: ContainerDoc,
    with_sidecars: bool,
) -> PodSpecDoc {
    let mut spec = PodSpecDoc::default();
    let mut sidecars = Vec::new();

    for target in ctx.graph.targets_of(&node.id) {
        match target.resource() {
            Resource::ConfigMap(cm) => main.env_from.push(EnvFromSource {
                config_map_ref: Some(NameRef {
                    name: cm.name.clone(),
                }),
                secret_ref: None,
            }),
            Resource::Secret(secret) => main.env_from.push(EnvFromSource {
                config_map_ref: None,
                secret_ref: Some(NameRef {
                    name: secret.name.clone(),
                }),
            }),
            Resource::VolumeClaim(claim) => {
                let volume_name = format!("{}-volume", claim.name);
                main.volume_mounts.push(VolumeMountDoc {
                    name: volume_name.clone(),
                    mount_path: ctx.config.mount_path_for(&claim.name),
                });
                spec.volumes.push(VolumeDoc {
                    name: volume_name,
                    persistent_volume_claim: Some(ClaimRef {
                        claim_name: claim.name.clone(),
                    }),
                    ..VolumeDoc::default()
                });
            }
            Resource::Sidecar(sidecar) if with_sidecars => sidecars.push(sidecar),
            _ => {}
        }
    }

    spec.containers.push(main);
    for sidecar in sidecars {
        let container = sidecar_container(sidecar);
        match sidecar.placement {
            Placement::Init => spec.init_containers.push(container),
            Placement::Sidecar => spec.containers.push(container),
        }
    }

    spec
}

fn sidecar_container(sidecar: &model::Sidecar) -> ContainerDoc {
    ContainerDoc {
        name: Some(sidecar.name.clone()),
        image: Some(sidecar.image.clone()),
        command: sidecar.command.clone(),
        args: sidecar.args.clone(),
        ports: sidecar
            .port
            .map(|p| {
                vec![ContainerPort {
                    container_port: Some(p),
                }]
            })
            .unwrap_or_default(),
        env: env_vars(&sidecar.env),
        env_from: Vec::new(),
        volume_mounts: sidecar
            .volume_mounts
            .iter()
            .map(|m| VolumeMountDoc {
                name: m.name.clone(),
                mount_path: m.mount_path.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Edge;
    use crate::registry::{default_config_map, default_secret, default_volume_claim};

    fn graph_with(nodes: Vec<Node>, edges: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::new();
        for node in nodes {
            graph.insert_node(node).unwrap();
        }
        for (s, t) in edges {
            graph.push_edge(Edge::new(*s, *t));
        }
        graph
    }

    #[test]
    fn test_empty_graph_generates_nothing() {
        let set = generate(&Graph::new(), &GenerateConfig::default()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.all(), "");
        assert!(set.grouped().is_empty());
    }

    #[test]
    fn test_secret_values_are_base64() {
        let mut secret = default_secret();
        secret.data.push("password", "p@ss");
        let graph = graph_with(vec![Node::new("s", Resource::Secret(secret))], &[]);

        let set = generate(&graph, &GenerateConfig::default()).unwrap();
        let doc: serde_yaml::Value =
            serde_yaml::from_str(&set.for_kind(Kind::Secret).unwrap()).unwrap();
        assert_eq!(doc["data"]["password"].as_str(), Some("cEBzcw=="));
        assert_eq!(doc["type"].as_str(), Some("Opaque"));
    }

    #[test]
    fn test_passive_resources_come_first() {
        let graph = graph_with(
            vec![
                Node::new("dep", crate::registry::default_for(Kind::Deployment)),
                Node::new("cm", Resource::ConfigMap(default_config_map())),
            ],
            &[("dep", "cm")],
        );

        let set = generate(&graph, &GenerateConfig::default()).unwrap();
        let kinds: Vec<Kind> = set.documents.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![Kind::ConfigMap, Kind::Deployment]);
        assert!(set.all().contains("---\n"));
    }

    #[test]
    fn test_volume_claim_mount_uses_config_root() {
        let graph = graph_with(
            vec![
                Node::new("dep", crate::registry::default_for(Kind::Deployment)),
                Node::new("vc", Resource::VolumeClaim(default_volume_claim())),
            ],
            &[("dep", "vc")],
        );
        let config = GenerateConfig {
            volume_mount_root: "/data".to_string(),
            ..GenerateConfig::default()
        };

        let text = generate_node_document(&graph, "dep", &config)
            .unwrap()
            .unwrap();
        assert!(text.contains("mountPath: /data/my-volume-claim"));
        assert!(text.contains("claimName: my-volume-claim"));
        assert!(text.contains("name: my-volume-claim-volume"));
    }

    #[test]
    fn test_sidecar_has_no_document() {
        let graph = graph_with(
            vec![Node::new("sc", crate::registry::default_for(Kind::Sidecar))],
            &[],
        );
        assert_eq!(
            generate_node_document(&graph, "sc", &GenerateConfig::default()).unwrap(),
            None
        );
    }

    #[test]
    fn test_namespace_emitted_when_configured() {
        let graph = graph_with(
            vec![Node::new("cm", Resource::ConfigMap(default_config_map()))],
            &[],
        );
        let config = GenerateConfig::default().with_namespace("shop");

        let set = generate(&graph, &config).unwrap();
        assert!(set.all().contains("namespace: shop"));
    }
}
