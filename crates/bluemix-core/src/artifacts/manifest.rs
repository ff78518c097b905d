//! Cloud Foundry deployment manifest (`manifest.yml`)

use crate::settings::Settings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Root of `manifest.yml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfManifest {
    pub applications: Vec<CfApplication>,

    /// Keys this tool does not manage, kept as-is when the manifest is rewritten
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

/// One application entry. Only `name` is required; a hand-written manifest
/// may use `routes:` or leave sizing to Cloud Foundry's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfApplication {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Memory per instance, e.g. `256M`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Disk quota per instance, e.g. `1024M`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_quota: Option<String>,

    /// Bound service instances
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,

    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

/// Format a megabyte amount the way Cloud Foundry expects it
pub fn megabytes(value: u32) -> String {
    format!("{}M", value)
}

impl CfManifest {
    /// Build a single-application manifest from the sizing settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let missing = |field: &str| format!("Cannot render manifest.yml: {} was not set", field);

        let memory = settings.app_memory.with_context(|| missing("memory"))?;
        let instances = settings
            .app_instances
            .with_context(|| missing("instance count"))?;
        let domain = settings
            .app_domain
            .clone()
            .with_context(|| missing("domain"))?;
        let host = settings.app_host.clone().with_context(|| missing("host"))?;
        let disk_quota = settings
            .app_disk_quota
            .with_context(|| missing("disk quota"))?;

        Ok(Self {
            applications: vec![CfApplication {
                name: settings.app_name.clone(),
                path: Some(".".to_string()),
                memory: Some(megabytes(memory)),
                instances: Some(instances),
                domain: Some(domain),
                host: Some(host),
                disk_quota: Some(megabytes(disk_quota)),
                services: Vec::new(),
                extra: serde_yaml::Mapping::new(),
            }],
            extra: serde_yaml::Mapping::new(),
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse manifest.yml")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize manifest.yml")
    }
}
