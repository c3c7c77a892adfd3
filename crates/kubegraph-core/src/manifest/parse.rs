//! Manifest text → nodes and inferred edges
//!
//! Tolerant by design: absent scalars fall back to registry defaults
//! (an explicit empty string is kept), absent collections to empty, unknown
//! kinds are skipped. Repeated mapping keys are kept in order. Only malformed
//! YAML or a recognized document with wrongly-shaped fields fails the
//! whole batch.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

use super::format::*;
use super::infer::{infer_edges, InferenceHints, Reference};
use super::report::{ParseReport, ReferenceVia, SkippedDocument};
use crate::errors::{KubegraphError, Result};
use crate::model::{
    self, Container, Edge, Kind, Node, Pairs, PathType, Placement, Resource, ServiceType,
};
use crate::ops::IdSource;
use crate::registry::{self, kind_for_manifest};
use crate::{log_op_end, log_op_error, log_op_start};

/// Nodes, inferred edges and soft-fail report of one parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// Nodes in document order; sidecars directly follow their workload
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub report: ParseReport,
}

/// Parse a `---`-separated batch of manifest documents
///
/// # Errors
/// * `ManifestSyntax` - If any document is not well-formed YAML
/// * `ManifestShape` - If a recognized document has a field of the wrong type
pub fn parse(text: &str, ids: &mut dyn IdSource) -> Result<ParseOutcome> {
    log_op_start!("parse", input_bytes = text.len());
    let start = std::time::Instant::now();

    let result = parse_impl(text, ids).map_err(|e| {
        log_op_error!(
            "parse",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "parse",
        duration_ms = start.elapsed().as_millis() as u64,
        node_count = result.nodes.len(),
        edge_count = result.edges.len(),
        skipped = result.report.skipped.len(),
        unresolved = result.report.unresolved.len()
    );
    Ok(result)
}

fn parse_impl(text: &str, ids: &mut dyn IdSource) -> Result<ParseOutcome> {
    let mut ingest = Ingest {
        ids,
        nodes: Vec::new(),
        hints: Vec::new(),
        report: ParseReport::default(),
    };

    // Headers first: a syntax error anywhere fails before any node exists
    let mut headers = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let header = Option::<de::Lenient<DocumentHeader>>::deserialize(document)
            .map_err(|e| KubegraphError::ManifestSyntax {
                document_index: Some(index),
                message: e.to_string(),
            })?;
        headers.push(header.map(|h| h.into_option().unwrap_or_default()));
    }

    let documents = serde_yaml::Deserializer::from_str(text);
    for (index, (header, document)) in headers.into_iter().zip(documents).enumerate() {
        if let Some(header) = header {
            ingest.document(index, header, document)?;
        }
    }

    let Ingest {
        nodes,
        hints,
        mut report,
        ..
    } = ingest;
    let edges = infer_edges(&nodes, &hints, &mut report);

    Ok(ParseOutcome {
        nodes,
        edges,
        report,
    })
}

struct Ingest<'a> {
    ids: &'a mut dyn IdSource,
    nodes: Vec<Node>,
    hints: Vec<InferenceHints>,
    report: ParseReport,
}

impl Ingest<'_> {
    fn document(
        &mut self,
        index: usize,
        header: DocumentHeader,
        value: Document<'_>,
    ) -> Result<()> {
        let Some(kind) = header.kind.as_deref().and_then(kind_for_manifest) else {
            tracing::debug!(document_index = index, kind = ?header.kind, "skipping document");
            self.report.skipped.push(SkippedDocument {
                document_index: index,
                name: header.name(),
                kind: header.kind,
            });
            return Ok(());
        };

        match kind {
            Kind::Deployment => self.deployment(index, value),
            Kind::Pod => self.pod(index, value),
            Kind::ScheduledJob => self.cron_job(index, value),
            Kind::Service => self.service(index, value),
            Kind::Ingress => self.ingress(index, value),
            Kind::ConfigMap => self.config_map(index, value),
            Kind::Secret => self.secret(index, value),
            Kind::VolumeClaim => self.volume_claim(index, value),
            Kind::Autoscaler => self.autoscaler(index, value),
            // no manifest kind maps to a sidecar
            Kind::Sidecar => Ok(()),
        }
    }

    fn add(&mut self, resource: Resource) -> InferenceHints {
        let id = self.ids.next_id(resource.kind());
        self.nodes.push(Node::new(id.clone(), resource));
        InferenceHints::new(id)
    }

    fn deployment(&mut self, index: usize, value: Document<'_>) -> Result<()> {
        let doc: DeploymentManifest = shaped(index, Kind::Deployment, value)?;
        let defaults = registry::default_deployment();
        let pod = &doc.spec.template.spec;

        let metadata_labels = doc.metadata.labels.clone();
        let template_labels = doc.spec.template.metadata.labels.clone();
        let labels = [
            &metadata_labels,
            &template_labels,
            &doc.spec.selector.match_labels,
        ]
        .into_iter()
        .find(|l| !l.is_empty())
        .cloned()
        .unwrap_or_default();

        let mut hints = self.add(Resource::Deployment(model::Deployment {
            name: doc.metadata.name.unwrap_or(defaults.name),
            replicas: doc.spec.replicas.unwrap_or(defaults.replicas),
            container: main_container(pod.containers.first(), defaults.container),
            labels,
        }));
        hints.label_sets = vec![metadata_labels, template_labels];
        hints.references = pod_references(pod);
        hints.attachments = self.sidecars(pod);
        self.hints.push(hints);
        Ok(())
    }

    fn pod(&mut self, index: usize, value: Document<'_>) -> Result<()> {
        let doc: PodManifest = shaped(index, Kind::Pod, value)?;
        let defaults = registry::default_pod();

        let mut hints = self.add(Resource::Pod(model::Pod {
            name: doc.metadata.name.unwrap_or(defaults.name),
            container: main_container(doc.spec.containers.first(), defaults.container),
            labels: doc.metadata.labels.clone(),
        }));
        hints.label_sets = vec![doc.metadata.labels];
        hints.references = pod_references(&doc.spec);
        hints.attachments = self.sidecars(&doc.spec);
        self.hints.push(hints);
        Ok(())
    }

    fn cron_job(&mut self, index: usize, value: Document<'_>) -> Result<()> {
        let doc: CronJobManifest = shaped(index, Kind::ScheduledJob, value)?;
        let defaults = registry::default_scheduled_job();
        let pod = &doc.spec.job_template.spec.template.spec;
        let main = pod.containers.first().cloned().unwrap_or_default();

        if pod.containers.len() > 1 || !pod.init_containers.is_empty() {
            tracing::debug!(
                document_index = index,
                "extra job containers are not modelled; keeping the first"
            );
        }

        let mut hints = self.add(Resource::ScheduledJob(model::ScheduledJob {
            name: doc.metadata.name.unwrap_or(defaults.name),
            schedule: doc.spec.schedule.unwrap_or(defaults.schedule),
            image: main.image.unwrap_or(defaults.image),
            command: main.command,
            args: main.args,
        }));
        hints.references = pod_references(pod);
        self.hints.push(hints);
        Ok(())
    }

    fn service(&mut self, index: usize, value: Document<'_>) -> Result<()> {
        let doc: ServiceManifest = shaped(index, Kind::Service, value)?;
        let defaults = registry::default_service();
        let first_port = doc.spec.ports.first();

        let port = first_port.and_then(|p| p.port).unwrap_or(defaults.port);
        let target_port = first_port
            .and_then(|p| p.target_port.as_ref())
            .and_then(IntOrString::as_number)
            .unwrap_or(port);
        let service_type = doc
            .spec
            .service_type
            .as_deref()
            .and_then(ServiceType::parse)
            .unwrap_or(defaults.service_type);

        let mut hints = self.add(Resource::Service(model::Service {
            name: doc.metadata.name.unwrap_or(defaults.name),
            port,
            target_port,
            service_type,
            selector: doc.spec.selector.clone(),
        }));
        hints.selector = doc.spec.selector;
        self.hints.push(hints);
        Ok(())
    }

    fn ingress(&mut self, index: usize, value: Document<'_>) -> Result<()> {
        let doc: IngressManifest = shaped(index, Kind::Ingress, value)?;
        let defaults = registry::default_ingress();

        let host = doc
            .spec
            .rules
            .iter()
            .find_map(|r| r.host.clone())
            .or_else(|| doc.spec.tls.iter().find_map(|t| t.hosts.first().cloned()))
            .unwrap_or(defaults.host);

        let mut paths = Vec::new();
        let mut references = Vec::new();
        let http_paths = doc
            .spec
            .rules
            .iter()
            .filter_map(|r| r.http.as_ref())
            .flat_map(|h| &h.paths);
        for http_path in http_paths {
            let Some(service) = &http_path.backend.service else {
                tracing::debug!(document_index = index, "ingress path without service backend");
                continue;
            };
            paths.push(model::IngressPath {
                path: http_path.path.clone().unwrap_or_else(|| "/".to_string()),
                path_type: http_path
                    .path_type
                    .as_deref()
                    .and_then(PathType::parse)
                    .unwrap_or_default(),
                service_name: service.name.clone(),
                service_port: service.port.number.unwrap_or(defaults_port()),
            });
            references.push(Reference::new(
                "Service",
                service.name.clone(),
                ReferenceVia::IngressBackend,
            ));
        }

        let mut hints = self.add(Resource::Ingress(model::Ingress {
            name: doc.metadata.name.unwrap_or(defaults.name),
            host,
            paths,
            tls: !doc.spec.tls.is_empty(),
            tls_secret_name: doc
                .spec
                .tls
                .iter()
                .find_map(|t| t.secret_name.clone())
                .unwrap_or_default(),
            annotations: doc.metadata.annotations,
        }));
        hints.references = references;
        self.hints.push(hints);
        Ok(())
    }

    fn config_map(&mut self, index: usize, value: Document<'_>) -> Result<()> {
        let doc: ConfigMapManifest = shaped(index, Kind::ConfigMap, value)?;
        let defaults = registry::default_config_map();

        let hints = self.add(Resource::ConfigMap(model::ConfigMap {
            name: doc.metadata.name.unwrap_or(defaults.name),
            data: doc.data,
        }));
        self.hints.push(hints);
        Ok(())
    }

    fn secret(&mut self, index: usize, value: Document<'_>) -> Result<()> {
        let doc: SecretManifest = shaped(index, Kind::Secret, value)?;
        let defaults = registry::default_secret();

        let mut data = doc.data.map_values(|encoded| decode_secret_value(index, encoded));
        for (key, plain) in doc.string_data.iter() {
            data.set(key, plain);
        }

        let hints = self.add(Resource::Secret(model::Secret {
            name: doc.metadata.name.unwrap_or(defaults.name),
            secret_type: doc.secret_type.unwrap_or(defaults.secret_type),
            data,
        }));
        self.hints.push(hints);
        Ok(())
    }

    fn volume_claim(&mut self, index: usize, value: Document<'_>) -> Result<()> {
        let doc: PersistentVolumeClaimManifest = shaped(index, Kind::VolumeClaim, value)?;
        let defaults = registry::default_volume_claim();

        let hints = self.add(Resource::VolumeClaim(model::VolumeClaim {
            name: doc.metadata.name.unwrap_or(defaults.name),
            storage_class: doc.spec.storage_class_name.unwrap_or_default(),
            size: doc
                .spec
                .resources
                .requests
                .storage
                .unwrap_or(defaults.size),
            access_modes: doc.spec.access_modes,
        }));
        self.hints.push(hints);
        Ok(())
    }

    fn autoscaler(&mut self, index: usize, value: Document<'_>) -> Result<()> {
        let doc: HorizontalPodAutoscalerManifest = shaped(index, Kind::Autoscaler, value)?;
        let defaults = registry::default_autoscaler();
        let spec = doc.spec;

        let cpu_target = spec
            .metrics
            .iter()
            .filter_map(|m| m.resource.as_ref())
            .find(|r| r.name == "cpu")
            .and_then(|r| r.target.average_utilization)
            .or(spec.target_cpu_utilization_percentage)
            .unwrap_or(defaults.cpu_target_percent);

        let target_ref = spec.scale_target_ref;
        let mut hints = self.add(Resource::Autoscaler(model::Autoscaler {
            name: doc.metadata.name.unwrap_or(defaults.name),
            target: target_ref.name.clone(),
            min_replicas: spec.min_replicas.unwrap_or(defaults.min_replicas),
            max_replicas: spec.max_replicas.unwrap_or(defaults.max_replicas),
            cpu_target_percent: cpu_target,
        }));
        if !target_ref.name.is_empty() {
            let target_kind = if target_ref.kind.is_empty() {
                "Deployment"
            } else {
                target_ref.kind.as_str()
            };
            hints.references.push(Reference::new(
                target_kind,
                target_ref.name,
                ReferenceVia::ScaleTarget,
            ));
        }
        self.hints.push(hints);
        Ok(())
    }

    /// Create sidecar nodes for every container after the first and every
    /// init container, returning their IDs in pod order
    fn sidecars(&mut self, pod: &PodSpecDoc) -> Vec<String> {
        let extra = pod.containers.iter().skip(1).map(|c| (c, Placement::Sidecar));
        let init = pod.init_containers.iter().map(|c| (c, Placement::Init));

        let mut ids = Vec::new();
        for (container, placement) in extra.chain(init) {
            let hints = self.add(Resource::Sidecar(sidecar_from(container, placement)));
            ids.push(hints.node_id.clone());
            self.hints.push(hints);
        }
        ids
    }
}

type Document<'de> = serde_yaml::Deserializer<'de>;

fn shaped<'de, T: Deserialize<'de>>(index: usize, kind: Kind, value: Document<'de>) -> Result<T> {
    T::deserialize(value).map_err(|e| KubegraphError::ManifestShape {
        document_index: index,
        kind: registry::manifest_kind(kind).unwrap_or_default().to_string(),
        message: e.to_string(),
    })
}

fn defaults_port() -> u16 {
    registry::default_service().port
}

fn first_port(container: &ContainerDoc) -> Option<u16> {
    container.ports.iter().find_map(|p| p.container_port)
}

/// Literal env entries; `valueFrom` entries become references instead
fn literal_env(container: &ContainerDoc) -> Pairs {
    container
        .env
        .iter()
        .filter(|e| e.value_from.is_none())
        .map(|e| (e.name.clone(), e.value.clone().unwrap_or_default()))
        .collect()
}

fn main_container(doc: Option<&ContainerDoc>, defaults: Container) -> Container {
    let Some(doc) = doc else {
        return defaults;
    };
    Container {
        name: doc.name.clone().unwrap_or(defaults.name),
        image: doc.image.clone().unwrap_or(defaults.image),
        port: first_port(doc),
        env: literal_env(doc),
    }
}

fn sidecar_from(doc: &ContainerDoc, placement: Placement) -> model::Sidecar {
    let defaults = registry::default_sidecar();
    model::Sidecar {
        name: doc.name.clone().unwrap_or(defaults.name),
        image: doc.image.clone().unwrap_or(defaults.image),
        placement,
        port: first_port(doc),
        command: doc.command.clone(),
        args: doc.args.clone(),
        env: literal_env(doc),
        volume_mounts: doc
            .volume_mounts
            .iter()
            .map(|m| model::VolumeMount {
                name: m.name.clone(),
                mount_path: m.mount_path.clone(),
            })
            .collect(),
    }
}

/// Every by-name reference a pod spec makes, in document order
fn pod_references(pod: &PodSpecDoc) -> Vec<Reference> {
    let mut references = Vec::new();

    for container in pod.containers.iter().chain(&pod.init_containers) {
        for source in &container.env_from {
            if let Some(r) = &source.config_map_ref {
                references.push(Reference::new("ConfigMap", r.name.clone(), ReferenceVia::EnvFrom));
            }
            if let Some(r) = &source.secret_ref {
                references.push(Reference::new("Secret", r.name.clone(), ReferenceVia::EnvFrom));
            }
        }
        for var in &container.env {
            let Some(source) = &var.value_from else {
                continue;
            };
            if let Some(r) = &source.config_map_key_ref {
                references.push(Reference::new("ConfigMap", r.name.clone(), ReferenceVia::ValueFrom));
            }
            if let Some(r) = &source.secret_key_ref {
                references.push(Reference::new("Secret", r.name.clone(), ReferenceVia::ValueFrom));
            }
        }
    }

    for volume in &pod.volumes {
        if let Some(claim) = &volume.persistent_volume_claim {
            references.push(Reference::new(
                "PersistentVolumeClaim",
                claim.claim_name.clone(),
                ReferenceVia::Volume,
            ));
        }
        if let Some(cm) = &volume.config_map {
            references.push(Reference::new("ConfigMap", cm.name.clone(), ReferenceVia::Volume));
        }
        if let Some(secret) = &volume.secret {
            references.push(Reference::new(
                "Secret",
                secret.secret_name.clone(),
                ReferenceVia::Volume,
            ));
        }
    }

    references
}

/// Base64-decode one secret value
///
/// Values that are not valid base64 are kept verbatim.
fn decode_secret_value(index: usize, encoded: &str) -> String {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(document_index = index, error = %e, "secret value is not base64; keeping it as-is");
            encoded.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::SequentialIds;

    fn parse_text(text: &str) -> ParseOutcome {
        parse(text, &mut SequentialIds::new()).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let outcome = parse_text("");
        assert!(outcome.nodes.is_empty());
        assert!(outcome.report.is_clean());
    }

    #[test]
    fn test_unknown_and_kindless_documents_skipped() {
        let outcome = parse_text(
            "kind: StatefulSet\nmetadata:\n  name: db\n---\nmetadata:\n  name: orphan\n---\nkind: ConfigMap\nmetadata:\n  name: c\n",
        );
        assert_eq!(outcome.nodes.len(), 1);
        assert_eq!(outcome.report.skipped.len(), 2);
        assert_eq!(outcome.report.skipped[0].kind.as_deref(), Some("StatefulSet"));
        assert_eq!(outcome.report.skipped[1].kind, None);
        assert_eq!(outcome.report.skipped[1].document_index, 1);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let outcome = parse_text("kind: Deployment\n");
        match outcome.nodes[0].resource() {
            Resource::Deployment(d) => {
                let defaults = registry::default_deployment();
                assert_eq!(d.name, defaults.name);
                assert_eq!(d.replicas, defaults.replicas);
                assert_eq!(d.container, registry::default_container());
                assert!(d.labels.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_names_document() {
        let err = parse("kind: [unclosed\n", &mut SequentialIds::new()).unwrap_err();
        assert!(matches!(
            err,
            KubegraphError::ManifestSyntax {
                document_index: Some(0),
                ..
            }
        ));
    }

    #[test]
    fn test_shape_error() {
        let err = parse(
            "kind: Deployment\nspec:\n  replicas: many\n",
            &mut SequentialIds::new(),
        )
        .unwrap_err();
        assert!(matches!(err, KubegraphError::ManifestShape { document_index: 0, .. }));
    }

    #[test]
    fn test_repeated_keys_are_kept_in_order() {
        let outcome = parse_text("kind: ConfigMap\nmetadata:\n  name: c\ndata: {k: one, k: two}\n");
        match outcome.nodes[0].resource() {
            Resource::ConfigMap(cm) => assert_eq!(
                cm.data.as_slice(),
                &[
                    ("k".to_string(), "one".to_string()),
                    ("k".to_string(), "two".to_string())
                ]
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_explicit_empty_values_are_not_defaulted() {
        let outcome = parse_text(
            "kind: Pod\nmetadata:\n  name: ''\nspec:\n  containers:\n  - name: ''\n    image: busybox\n",
        );
        match outcome.nodes[0].resource() {
            Resource::Pod(pod) => {
                assert_eq!(pod.name, "");
                assert_eq!(pod.container.name, "");
                assert_eq!(pod.container.image, "busybox");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_non_mapping_document_is_skipped() {
        let outcome = parse_text("just text\n---\nkind: ConfigMap\n");
        assert_eq!(outcome.nodes.len(), 1);
        assert_eq!(outcome.report.skipped.len(), 1);
        assert_eq!(outcome.report.skipped[0].document_index, 0);
    }

    #[test]
    fn test_invalid_base64_kept_verbatim() {
        let outcome = parse_text("kind: Secret\nmetadata:\n  name: s\ndata:\n  token: not*base64\n");
        match outcome.nodes[0].resource() {
            Resource::Secret(s) => assert_eq!(s.data.get("token"), Some("not*base64")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_string_data_overrides_data() {
        let outcome = parse_text(
            "kind: Secret\nmetadata:\n  name: s\ndata:\n  user: YWRtaW4=\nstringData:\n  user: root\n  extra: x\n",
        );
        match outcome.nodes[0].resource() {
            Resource::Secret(s) => {
                assert_eq!(s.data.get("user"), Some("root"));
                assert_eq!(s.data.get("extra"), Some("x"));
                assert_eq!(s.secret_type, "Opaque");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
