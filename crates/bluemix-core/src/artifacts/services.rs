//! Default-service attachment (auto-scaling and app metrics)

use super::manifest::CfManifest;
use super::MANIFEST;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use tokio::fs;

/// Service instance bound for auto-scaling
pub const AUTO_SCALING_SERVICE: &str = "autoscaling";
/// Service instance bound for app metrics
pub const APP_METRICS_SERVICE: &str = "appmetrics";

/// npm agent enabling auto-scaling inside the app
pub const AUTO_SCALING_AGENT: (&str, &str) = ("bluemix-autoscaling-agent", "^1.0.0");
/// npm agent exposing the app metrics dashboard
pub const APP_METRICS_AGENT: (&str, &str) = ("appmetrics-dash", "^3.0.0");

const PACKAGE_JSON: &str = "package.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOptions {
    pub enable_auto_scaling: bool,
    pub enable_app_metrics: bool,
    pub dest_dir: PathBuf,
}

impl ServiceOptions {
    /// (service name, npm agent) pairs to attach
    fn requested(&self) -> Vec<(&'static str, (&'static str, &'static str))> {
        let mut requested = Vec::new();
        if self.enable_auto_scaling {
            requested.push((AUTO_SCALING_SERVICE, AUTO_SCALING_AGENT));
        }
        if self.enable_app_metrics {
            requested.push((APP_METRICS_SERVICE, APP_METRICS_AGENT));
        }
        requested
    }
}

/// Attaches default services to a generated project
#[allow(async_fn_in_trait)]
pub trait ServiceAttacher {
    /// Returns the names of the services attached
    async fn add_default_services(&self, options: &ServiceOptions) -> Result<Vec<String>>;
}

/// Binds services in `manifest.yml` and adds their agents to `package.json`
#[derive(Debug, Clone, Default)]
pub struct FsServiceAttacher;

impl ServiceAttacher for FsServiceAttacher {
    async fn add_default_services(&self, options: &ServiceOptions) -> Result<Vec<String>> {
        let requested = options.requested();
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let manifest_path = options.dest_dir.join(MANIFEST);
        let content = fs::read_to_string(&manifest_path)
            .await
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        let mut manifest = CfManifest::parse(&content)?;

        let app = manifest
            .applications
            .first_mut()
            .with_context(|| format!("No application declared in {}", manifest_path.display()))?;
        for (service, _) in &requested {
            if !app.services.iter().any(|s| s == service) {
                app.services.push(service.to_string());
            }
        }

        fs::write(&manifest_path, manifest.to_yaml()?)
            .await
            .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

        let package_path = options.dest_dir.join(PACKAGE_JSON);
        if fs::try_exists(&package_path).await.unwrap_or(false) {
            let content = fs::read_to_string(&package_path)
                .await
                .with_context(|| format!("Failed to read {}", package_path.display()))?;
            let agents: Vec<_> = requested.iter().map(|(_, agent)| *agent).collect();
            let updated = add_dependencies(&content, &agents)?;
            fs::write(&package_path, updated)
                .await
                .with_context(|| format!("Failed to write {}", package_path.display()))?;
        }

        Ok(requested
            .iter()
            .map(|(service, _)| service.to_string())
            .collect())
    }
}

/// Add dependencies to package.json content, keeping existing versions and key order
fn add_dependencies(content: &str, agents: &[(&str, &str)]) -> Result<String> {
    let mut package: Value = serde_json::from_str(content).context("Failed to parse package.json")?;

    let root = package
        .as_object_mut()
        .context("package.json is not a JSON object")?;
    let dependencies = root
        .entry("dependencies")
        .or_insert_with(|| Value::Object(Default::default()))
        .as_object_mut()
        .context("package.json dependencies is not an object")?;

    for (name, version) in agents {
        dependencies
            .entry(name.to_string())
            .or_insert_with(|| Value::String(version.to_string()));
    }

    let mut rendered =
        serde_json::to_string_pretty(&package).context("Failed to serialize package.json")?;
    rendered.push('\n');
    Ok(rendered)
}
