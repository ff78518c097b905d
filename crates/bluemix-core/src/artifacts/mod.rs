//! Deployment artifact selection and emission
//!
//! This module provides:
//! - File groups and the pure mapping from (mode, settings) to an emit request
//! - The Cloud Foundry manifest types
//! - A filesystem emitter that renders every file group
//! - Default-service attachment for full bluemix runs

pub mod emitter;
pub mod manifest;
pub mod services;

use crate::mode::CommandMode;
use crate::settings::Settings;
use std::fmt;
use std::path::PathBuf;

pub use emitter::{EmitReport, FileEmitter, FsEmitter};
pub use manifest::{CfApplication, CfManifest};
pub use services::{FsServiceAttacher, ServiceAttacher, ServiceOptions};

/// A set of files that is always emitted together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileGroup {
    /// Datasource mapping for bound services
    Datasources,
    /// Cloud Foundry manifest and its ignore file
    Manifest,
    Docker,
    /// Continuous delivery toolchain and pipeline
    Toolchain,
    /// Service binding configuration
    ServiceBinding,
}

pub const DATASOURCES_CONFIG: &str = ".bluemix/datasources-config.json";
pub const DATASOURCES_MODULE: &str = "server/datasources.bluemix.js";
pub const CF_IGNORE: &str = ".cfignore";
pub const MANIFEST: &str = "manifest.yml";
pub const DOCKER_IGNORE: &str = ".dockerignore";
pub const DOCKERFILE: &str = "Dockerfile";
pub const DEPLOY_DESCRIPTOR: &str = ".bluemix/deploy.json";
pub const PIPELINE_DESCRIPTOR: &str = ".bluemix/pipeline.yml";
pub const TOOLCHAIN_DESCRIPTOR: &str = ".bluemix/toolchain.yml";

impl FileGroup {
    /// Paths of the group's files, relative to the destination directory
    pub fn files(&self) -> &'static [&'static str] {
        match self {
            FileGroup::Datasources => &[DATASOURCES_CONFIG, DATASOURCES_MODULE],
            FileGroup::Manifest => &[CF_IGNORE, MANIFEST],
            FileGroup::Docker => &[DOCKER_IGNORE, DOCKERFILE],
            FileGroup::Toolchain => &[DEPLOY_DESCRIPTOR, PIPELINE_DESCRIPTOR, TOOLCHAIN_DESCRIPTOR],
            FileGroup::ServiceBinding => &[DATASOURCES_CONFIG],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileGroup::Datasources => "datasources",
            FileGroup::Manifest => "manifest",
            FileGroup::Docker => "docker",
            FileGroup::Toolchain => "toolchain",
            FileGroup::ServiceBinding => "service binding",
        }
    }
}

impl fmt::Display for FileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What the file emitter is asked to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitRequest {
    pub dest_dir: PathBuf,
    pub mode: CommandMode,
    /// Set for bluemix, manifest, toolchain and docker runs
    pub enable_docker: Option<bool>,
    /// Set for bluemix, manifest, toolchain and docker runs
    pub enable_toolchain: Option<bool>,
}

impl EmitRequest {
    /// Groups the mode always produces
    fn baseline(&self) -> &'static [FileGroup] {
        match self.mode {
            CommandMode::Bluemix => &[FileGroup::Datasources, FileGroup::Manifest],
            CommandMode::Manifest => &[FileGroup::Manifest],
            CommandMode::Toolchain => &[],
            CommandMode::Docker => &[FileGroup::Docker],
            // No sizing answers, so no manifest
            CommandMode::Datasource => &[FileGroup::Datasources],
            CommandMode::Service => &[FileGroup::ServiceBinding],
        }
    }

    /// Deterministic list of groups: the mode baseline plus toggled groups
    pub fn file_groups(&self) -> Vec<FileGroup> {
        let mut groups = self.baseline().to_vec();

        if self.enable_docker == Some(true) && !groups.contains(&FileGroup::Docker) {
            groups.push(FileGroup::Docker);
        }
        if self.enable_toolchain == Some(true) && !groups.contains(&FileGroup::Toolchain) {
            groups.push(FileGroup::Toolchain);
        }

        groups
    }

    /// Every file path, in emission order, without duplicates
    pub fn files(&self) -> Vec<&'static str> {
        let mut files: Vec<&'static str> = Vec::new();
        for group in self.file_groups() {
            for &file in group.files() {
                if !files.contains(&file) {
                    files.push(file);
                }
            }
        }
        files
    }
}

/// Map the resolved mode and final settings to an emit request
pub fn select_artifacts(mode: CommandMode, settings: &Settings, dest_dir: PathBuf) -> EmitRequest {
    let toggles = match mode {
        CommandMode::Bluemix
        | CommandMode::Manifest
        | CommandMode::Toolchain
        | CommandMode::Docker => Some((settings.enable_docker, settings.enable_toolchain)),
        CommandMode::Datasource | CommandMode::Service => None,
    };

    EmitRequest {
        dest_dir,
        mode,
        enable_docker: toggles.map(|(docker, _)| docker),
        enable_toolchain: toggles.map(|(_, toolchain)| toolchain),
    }
}

/// Attachment options for runs that attach default services
pub fn select_services(
    mode: CommandMode,
    settings: &Settings,
    dest_dir: PathBuf,
) -> Option<ServiceOptions> {
    mode.attaches_services().then(|| ServiceOptions {
        enable_auto_scaling: settings.enable_auto_scaling,
        enable_app_metrics: settings.enable_app_metrics,
        dest_dir,
    })
}
