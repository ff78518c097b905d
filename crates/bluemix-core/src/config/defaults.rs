//! Default answers for the settings questions
//!
//! Built-in values can be overridden per product (domain), by environment
//! variable (domain) and by a YAML file passed with `--defaults`. Later
//! sources win; keys missing from the file keep their previous value.

use crate::error::ConfigError;
use crate::product::ProductConfig;
use crate::validate;
use serde::Deserialize;
use std::path::Path;

/// Domain used when neither the product nor the environment sets one
pub const DEFAULT_DOMAIN: &str = "mybluemix.net";

/// Pre-filled answers for every question except the subdomain, which
/// always defaults to the derived application name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDefaults {
    /// Megabytes
    pub app_memory: u32,
    pub app_instances: u32,
    pub app_domain: String,
    /// Megabytes
    pub app_disk_quota: u32,
    pub toolchain: bool,
    pub docker: bool,
    pub enable_auto_scaling: bool,
    pub enable_app_metrics: bool,
}

impl Default for QuestionDefaults {
    fn default() -> Self {
        Self {
            app_memory: 256,
            app_instances: 1,
            app_domain: DEFAULT_DOMAIN.to_string(),
            app_disk_quota: 1024,
            toolchain: false,
            docker: false,
            enable_auto_scaling: false,
            enable_app_metrics: false,
        }
    }
}

/// On-disk overrides; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct DefaultsFile {
    app_memory: Option<u32>,
    app_instances: Option<u32>,
    app_domain: Option<String>,
    app_disk_quota: Option<u32>,
    toolchain: Option<bool>,
    docker: Option<bool>,
    enable_auto_scaling: Option<bool>,
    enable_app_metrics: Option<bool>,
}

impl QuestionDefaults {
    /// Load defaults for a product, applying the domain environment variable
    /// and an optional YAML overrides file
    pub fn from_config<C: ProductConfig>(
        config: &C,
        path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let domain = std::env::var(config.domain_env())
            .ok()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| config.default_domain().to_string());

        let mut defaults = Self {
            app_domain: domain,
            ..Self::default()
        };

        if let Some(path) = path {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            defaults = defaults.with_overrides(&content, path)?;
        }

        defaults.validate()?;
        Ok(defaults)
    }

    /// Apply overrides from YAML content
    pub fn with_overrides(self, content: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not an empty map
        let file: DefaultsFile = if content.trim().is_empty() {
            DefaultsFile::default()
        } else {
            serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };

        Ok(Self {
            app_memory: file.app_memory.unwrap_or(self.app_memory),
            app_instances: file.app_instances.unwrap_or(self.app_instances),
            app_domain: file.app_domain.unwrap_or(self.app_domain),
            app_disk_quota: file.app_disk_quota.unwrap_or(self.app_disk_quota),
            toolchain: file.toolchain.unwrap_or(self.toolchain),
            docker: file.docker.unwrap_or(self.docker),
            enable_auto_scaling: file.enable_auto_scaling.unwrap_or(self.enable_auto_scaling),
            enable_app_metrics: file.enable_app_metrics.unwrap_or(self.enable_app_metrics),
        })
    }

    /// Defaults must pass the same validation as typed answers
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (
                "appMemory",
                validate::validate_app_memory(&self.app_memory.to_string()),
            ),
            (
                "appInstances",
                validate::validate_app_instances(&self.app_instances.to_string()),
            ),
            ("appDomain", validate::validate_app_domain(&self.app_domain)),
            (
                "appDiskQuota",
                validate::validate_app_disk_quota(&self.app_disk_quota.to_string()),
            ),
        ];

        for (question, result) in checks {
            result.map_err(|source| ConfigError::InvalidDefault { question, source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let defaults = QuestionDefaults::default();
        assert_eq!(defaults.app_memory, 256);
        assert_eq!(defaults.app_instances, 1);
        assert_eq!(defaults.app_domain, "mybluemix.net");
        assert_eq!(defaults.app_disk_quota, 1024);
        assert!(!defaults.toolchain);
        assert!(!defaults.docker);
        assert!(defaults.validate().is_ok());
    }

    #[test]
    fn test_overrides_keep_missing_keys() {
        let yaml = "appMemory: 512\ndocker: true\n";
        let defaults = QuestionDefaults::default()
            .with_overrides(yaml, Path::new("defaults.yaml"))
            .unwrap();
        assert_eq!(defaults.app_memory, 512);
        assert!(defaults.docker);
        assert_eq!(defaults.app_instances, 1);
        assert_eq!(defaults.app_domain, "mybluemix.net");
    }

    #[test]
    fn test_empty_overrides_file() {
        let defaults = QuestionDefaults::default()
            .with_overrides("", Path::new("defaults.yaml"))
            .unwrap();
        assert_eq!(defaults, QuestionDefaults::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = QuestionDefaults::default()
            .with_overrides("appMemroy: 512\n", Path::new("defaults.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_default_is_reported() {
        let defaults = QuestionDefaults {
            app_instances: 0,
            ..Default::default()
        };
        let err = defaults.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDefault {
                question: "appInstances",
                ..
            }
        ));
    }
}
