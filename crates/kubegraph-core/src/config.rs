//! Generator configuration

use serde::{Deserialize, Serialize};

use crate::errors::{KubegraphError, Result};

pub const DEFAULT_VOLUME_MOUNT_ROOT: &str = "/mnt";

/// Immutable settings consulted by the manifest generator
///
/// Loaded from TOML:
///
/// ```toml
/// namespace = "shop"
/// volume_mount_root = "/data"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Emitted as `metadata.namespace` on every document when set
    pub namespace: Option<String>,
    /// Volume claims are mounted at `<volume_mount_root>/<claim>`
    pub volume_mount_root: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            volume_mount_root: DEFAULT_VOLUME_MOUNT_ROOT.to_string(),
        }
    }
}

impl GenerateConfig {
    /// Parse a TOML document; absent keys keep their defaults
    ///
    /// # Errors
    /// * `InvalidConfig` - If the text is not valid TOML, has unknown keys,
    ///   or names an empty namespace or mount root
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GenerateConfig =
            toml::from_str(text).map_err(|e| KubegraphError::InvalidConfig {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.namespace.as_deref().is_some_and(|ns| ns.trim().is_empty()) {
            return Err(KubegraphError::InvalidConfig {
                message: "namespace cannot be empty".to_string(),
            });
        }
        if self.volume_mount_root.trim().is_empty() {
            return Err(KubegraphError::InvalidConfig {
                message: "volume_mount_root cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Mount path for a volume claim
    pub fn mount_path_for(&self, claim_name: &str) -> String {
        format!(
            "{}/{}",
            self.volume_mount_root.trim_end_matches('/'),
            claim_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = GenerateConfig::from_toml_str("").unwrap();
        assert_eq!(config, GenerateConfig::default());
        assert_eq!(config.mount_path_for("data"), "/mnt/data");
    }

    #[test]
    fn test_toml_overrides() {
        let config =
            GenerateConfig::from_toml_str("namespace = \"shop\"\nvolume_mount_root = \"/srv/\"\n")
                .unwrap();
        assert_eq!(config.namespace.as_deref(), Some("shop"));
        assert_eq!(config.mount_path_for("cache"), "/srv/cache");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = GenerateConfig::from_toml_str("namspace = \"typo\"").unwrap_err();
        assert!(matches!(err, KubegraphError::InvalidConfig { .. }));
    }

    #[test]
    fn test_blank_namespace_rejected() {
        assert!(GenerateConfig::from_toml_str("namespace = \" \"").is_err());
    }
}
