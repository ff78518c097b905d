//! File emission into the destination directory

use super::manifest::CfManifest;
use super::*;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

const DATASOURCES_MODULE_TEMPLATE: &str = include_str!("../../templates/datasources.bluemix.js");
const CF_IGNORE_TEMPLATE: &str = include_str!("../../templates/cfignore");
const DOCKER_IGNORE_TEMPLATE: &str = include_str!("../../templates/dockerignore");
const DOCKERFILE_TEMPLATE: &str = include_str!("../../templates/Dockerfile");
const DEPLOY_TEMPLATE: &str = include_str!("../../templates/deploy.json");
const PIPELINE_TEMPLATE: &str = include_str!("../../templates/pipeline.yml");
const TOOLCHAIN_TEMPLATE: &str = include_str!("../../templates/toolchain.yml");

/// Materializes the files of an emit request
#[allow(async_fn_in_trait)]
pub trait FileEmitter {
    async fn generate(&self, request: &EmitRequest, settings: &Settings) -> Result<EmitReport>;
}

/// Files written and files left untouched, relative to the destination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Writes rendered templates to disk
#[derive(Debug, Clone, Default)]
pub struct FsEmitter {
    /// Overwrite files that already exist
    force: bool,
}

impl FsEmitter {
    pub fn new(force: bool) -> Self {
        Self { force }
    }
}

impl FileEmitter for FsEmitter {
    async fn generate(&self, request: &EmitRequest, settings: &Settings) -> Result<EmitReport> {
        fs::create_dir_all(&request.dest_dir)
            .await
            .context("Failed to create destination directory")?;

        let mut report = EmitReport::default();

        for file_path in request.files() {
            let target_path = request.dest_dir.join(file_path);

            if !self.force && exists(&target_path).await {
                report.skipped.push(file_path.to_string());
                continue;
            }

            let content = render_file(file_path, settings)?;

            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }

            fs::write(&target_path, content)
                .await
                .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

            report.written.push(file_path.to_string());
        }

        Ok(report)
    }
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Render one file of a group
fn render_file(file_path: &str, settings: &Settings) -> Result<String> {
    let content = match file_path {
        MANIFEST => CfManifest::from_settings(settings)?.to_yaml()?,
        DATASOURCES_CONFIG => {
            let config = serde_json::json!({ "datasources": {} });
            let mut rendered = serde_json::to_string_pretty(&config)
                .context("Failed to serialize datasources config")?;
            rendered.push('\n');
            rendered
        }
        DATASOURCES_MODULE => DATASOURCES_MODULE_TEMPLATE.to_string(),
        CF_IGNORE => CF_IGNORE_TEMPLATE.to_string(),
        DOCKER_IGNORE => DOCKER_IGNORE_TEMPLATE.to_string(),
        DOCKERFILE => DOCKERFILE_TEMPLATE.to_string(),
        DEPLOY_DESCRIPTOR => substitute(DEPLOY_TEMPLATE, settings)?,
        PIPELINE_DESCRIPTOR => PIPELINE_TEMPLATE.to_string(),
        TOOLCHAIN_DESCRIPTOR => substitute(TOOLCHAIN_TEMPLATE, settings)?,
        other => anyhow::bail!("No template for file '{}'", other),
    };
    Ok(content)
}

/// Templates only place `{{app_name}}` inside double-quoted strings. JSON
/// string escapes are valid there in both JSON and YAML.
fn substitute(template: &str, settings: &Settings) -> Result<String> {
    let quoted = serde_json::to_string(&settings.app_name).context("Failed to escape app name")?;
    let escaped = &quoted[1..quoted.len() - 1];
    Ok(template.replace("{{app_name}}", escaped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::CommandMode;
    use std::path::PathBuf;

    fn settings() -> Settings {
        Settings {
            app_name: "test-app".to_string(),
            app_memory: Some(256),
            app_instances: Some(1),
            app_domain: Some("mybluemix.net".to_string()),
            app_host: Some("test-app".to_string()),
            app_disk_quota: Some(1024),
            ..Default::default()
        }
    }

    fn request(dir: PathBuf, mode: CommandMode, docker: bool, toolchain: bool) -> EmitRequest {
        let settings = Settings {
            enable_docker: docker,
            enable_toolchain: toolchain,
            ..settings()
        };
        select_artifacts(mode, &settings, dir)
    }

    #[tokio::test]
    async fn test_writes_every_file_of_every_group() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path().to_path_buf(), CommandMode::Bluemix, true, true);

        let report = FsEmitter::new(false)
            .generate(&request, &settings())
            .await
            .unwrap();

        assert_eq!(report.written.len(), 9);
        assert!(report.skipped.is_empty());
        for file in request.files() {
            assert!(dir.path().join(file).is_file(), "missing {}", file);
        }
    }

    #[tokio::test]
    async fn test_existing_files_are_skipped_without_force() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();
        let request = request(dir.path().to_path_buf(), CommandMode::Docker, false, false);

        let report = FsEmitter::new(false)
            .generate(&request, &settings())
            .await
            .unwrap();

        assert_eq!(report.skipped, vec!["Dockerfile".to_string()]);
        assert_eq!(report.written, vec![".dockerignore".to_string()]);
        let kept = std::fs::read_to_string(dir.path().join("Dockerfile")).unwrap();
        assert_eq!(kept, "FROM scratch\n");
    }

    #[tokio::test]
    async fn test_force_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();
        let request = request(dir.path().to_path_buf(), CommandMode::Docker, false, false);

        let report = FsEmitter::new(true)
            .generate(&request, &settings())
            .await
            .unwrap();

        assert!(report.skipped.is_empty());
        let written = std::fs::read_to_string(dir.path().join("Dockerfile")).unwrap();
        assert!(written.starts_with("FROM node"));
    }

    #[test]
    fn test_toolchain_templates_use_app_name() {
        let toolchain = render_file(TOOLCHAIN_DESCRIPTOR, &settings()).unwrap();
        assert!(toolchain.contains("name: \"test-app\""));
        assert!(!toolchain.contains("{{app_name}}"));
        // Placeholders owned by the delivery service stay untouched
        assert!(toolchain.contains("{{toolchain.name}}"));
    }

    #[test]
    fn test_app_name_is_escaped_in_descriptors() {
        let settings = Settings {
            app_name: r#"say "hi" \ now"#.to_string(),
            ..settings()
        };

        let deploy = render_file(DEPLOY_DESCRIPTOR, &settings).unwrap();
        let deploy: serde_json::Value = serde_json::from_str(&deploy).unwrap();
        assert_eq!(deploy["title"], r#"Deploy say "hi" \ now"#);

        let toolchain = render_file(TOOLCHAIN_DESCRIPTOR, &settings).unwrap();
        let toolchain: serde_yaml::Value = serde_yaml::from_str(&toolchain).unwrap();
        assert_eq!(toolchain["name"].as_str(), Some(r#"say "hi" \ now"#));
        assert_eq!(
            toolchain["form"]["pipeline"]["parameters"]["prod-app-name"].as_str(),
            Some(r#"say "hi" \ now"#)
        );
    }

    #[test]
    fn test_datasources_config_is_valid_json() {
        let rendered = render_file(DATASOURCES_CONFIG, &settings()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value["datasources"].is_object());
    }

    #[test]
    fn test_unknown_file_is_an_error() {
        assert!(render_file("README.md", &settings()).is_err());
    }
}
