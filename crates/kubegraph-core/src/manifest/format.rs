//! Typed manifest documents
//!
//! One struct per document kind, shared by the generator (serialize) and
//! the parser (deserialize). Every field defaults when absent or null so
//! that partial documents still ingest; empty collections and unset
//! optionals are skipped on output so generated text stays compact.

use serde::{Deserialize, Serialize};

use crate::model::Pairs;

pub(crate) mod de {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    use crate::model::pairs::Scalar;

    /// A `T` if the node has that shape, otherwise nothing
    #[derive(Deserialize)]
    #[serde(untagged)]
    pub enum Lenient<T> {
        Value(T),
        Other(IgnoredAny),
    }

    impl<T> Lenient<T> {
        pub fn into_option(self) -> Option<T> {
            match self {
                Lenient::Value(value) => Some(value),
                Lenient::Other(_) => None,
            }
        }
    }

    /// Absent, null and wrongly-shaped all read as `None`
    pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Lenient<T>>::deserialize(deserializer)?.and_then(Lenient::into_option))
    }

    /// Treat an explicit `null` like an absent field
    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Any scalar as a string, null as empty
    pub fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?
            .map(|s| s.0)
            .unwrap_or_default())
    }

    pub fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| s.0))
    }

    /// Sequence of scalars as strings (`args: ["--port", 8080]`)
    pub fn scalar_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Vec<Scalar>>::deserialize(deserializer)?
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.0)
            .collect())
    }
}

// ===== Document header =====

/// The dispatch fields of any document
///
/// Read in a first pass that ignores everything else, so it accepts any
/// well-formed YAML including repeated keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentHeader {
    #[serde(default, deserialize_with = "de::lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de::lenient")]
    pub metadata: Option<HeaderMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeaderMeta {
    #[serde(default, deserialize_with = "de::lenient")]
    pub name: Option<String>,
}

impl DocumentHeader {
    pub fn name(&self) -> Option<String> {
        self.metadata.as_ref().and_then(|m| m.name.clone())
    }
}

// ===== Shared stanzas =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// `Some("")` is an explicit empty name, `None` an absent one
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Pairs::is_empty")]
    pub labels: Pairs,
    #[serde(default, skip_serializing_if = "Pairs::is_empty")]
    pub annotations: Pairs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "Pairs::is_empty")]
    pub match_labels: Pairs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodTemplate {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub spec: PodSpecDoc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpecDoc {
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub init_containers: Vec<ContainerDoc>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub containers: Vec<ContainerDoc>,
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub restart_policy: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub volumes: Vec<VolumeDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDoc {
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::scalar_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub command: Vec<String>,
    #[serde(
        default,
        deserialize_with = "de::scalar_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub args: Vec<String>,
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ports: Vec<ContainerPort>,
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub env: Vec<EnvVar>,
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub env_from: Vec<EnvFromSource>,
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub volume_mounts: Vec<VolumeMountDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<EnvVarSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_key_ref: Option<KeyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<KeyRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyRef {
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFromSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_ref: Option<NameRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<NameRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameRef {
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMountDoc {
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub mount_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeDoc {
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim: Option<ClaimRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<NameRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<SecretVolumeRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRef {
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub claim_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolumeRef {
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub secret_name: String,
}

// ===== Workloads =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentManifest {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub spec: DeploymentSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub selector: LabelSelector,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub template: PodTemplate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodManifest {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub spec: PodSpecDoc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobManifest {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub spec: CronJobSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronJobSpec {
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub schedule: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub job_template: JobTemplate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTemplate {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub spec: JobSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub template: PodTemplate,
}

// ===== Networking =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceManifest {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub spec: ServiceSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Pairs::is_empty")]
    pub selector: Pairs,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub ports: Vec<ServicePort>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<IntOrString>,
}

/// A port given either by number or by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(u16),
    Str(String),
}

impl IntOrString {
    /// The numeric value, if the port is numeric or a numeric string
    pub fn as_number(&self) -> Option<u16> {
        match self {
            IntOrString::Int(n) => Some(*n),
            IntOrString::Str(s) => s.parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressManifest {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub spec: IngressSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngressSpec {
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tls: Vec<IngressTls>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub rules: Vec<IngressRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressTls {
    #[serde(default, deserialize_with = "de::scalar_list")]
    pub hosts: Vec<String>,
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub secret_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngressRule {
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpRule {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub paths: Vec<HttpPath>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpPath {
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub path_type: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub backend: IngressBackend,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngressBackend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<BackendService>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendService {
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub port: BackendPort,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendPort {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u16>,
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

// ===== Configuration and storage =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapManifest {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Pairs::is_empty")]
    pub data: Pairs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretManifest {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub secret_type: Option<String>,
    /// Base64-encoded values
    #[serde(default, skip_serializing_if = "Pairs::is_empty")]
    pub data: Pairs,
    /// Plaintext values; take precedence over `data` on ingest
    #[serde(default, skip_serializing_if = "Pairs::is_empty")]
    pub string_data: Pairs,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimManifest {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub spec: ClaimSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSpec {
    #[serde(default, deserialize_with = "de::scalar_list")]
    pub access_modes: Vec<String>,
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_class_name: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub resources: ClaimResources,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimResources {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub requests: StorageRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageRequest {
    #[serde(
        default,
        deserialize_with = "de::optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage: Option<String>,
}

// ===== Autoscaling =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPodAutoscalerManifest {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub spec: AutoscalerSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoscalerSpec {
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub scale_target_ref: ScaleTargetRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<u32>,
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub metrics: Vec<MetricSpec>,
    /// `autoscaling/v1` form of the CPU target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cpu_utilization_percentage: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleTargetRef {
    #[serde(
        default,
        deserialize_with = "de::scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub api_version: String,
    #[serde(
        default,
        deserialize_with = "de::scalar_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub kind: String,
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    #[serde(rename = "type", default, deserialize_with = "de::scalar_string")]
    pub metric_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceMetric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetric {
    #[serde(default, deserialize_with = "de::scalar_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub target: MetricTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTarget {
    #[serde(rename = "type", default, deserialize_with = "de::scalar_string")]
    pub target_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_utilization: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_stanzas_deserialize_to_defaults() {
        let doc: DeploymentManifest = serde_yaml::from_str(
            "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\nspec:\n  template:\n    spec:\n      containers: ~\n",
        )
        .unwrap();
        assert_eq!(doc.metadata.name.as_deref(), Some("web"));
        assert!(doc.spec.template.spec.containers.is_empty());
        assert_eq!(doc.spec.replicas, None);
    }

    #[test]
    fn test_numeric_args_are_strings() {
        let container: ContainerDoc =
            serde_yaml::from_str("name: app\nimage: nginx\nargs: [\"--port\", 8080]\n").unwrap();
        assert_eq!(container.args, vec!["--port".to_string(), "8080".to_string()]);
    }

    #[test]
    fn test_target_port_int_or_string() {
        let port: ServicePort = serde_yaml::from_str("port: 80\ntargetPort: http\n").unwrap();
        assert_eq!(port.target_port, Some(IntOrString::Str("http".to_string())));
        assert_eq!(port.target_port.unwrap().as_number(), None);

        let port: ServicePort = serde_yaml::from_str("port: 80\ntargetPort: 8080\n").unwrap();
        assert_eq!(port.target_port.unwrap().as_number(), Some(8080));
    }

    #[test]
    fn test_empty_collections_skipped_on_output() {
        let container = ContainerDoc {
            name: Some("app".to_string()),
            image: Some("nginx".to_string()),
            ..ContainerDoc::default()
        };
        let yaml = serde_yaml::to_string(&container).unwrap();
        assert!(!yaml.contains("env"));
        assert!(!yaml.contains("ports"));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let result: Result<DeploymentManifest, _> =
            serde_yaml::from_str("kind: Deployment\nspec:\n  replicas: lots\n");
        assert!(result.is_err());
    }
}
