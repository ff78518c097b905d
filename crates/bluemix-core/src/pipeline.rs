//! End-to-end generation pipeline
//!
//! Each phase consumes the previous phase's record and returns a new one:
//! flags → [`Resolution`] → [`Answers`] → [`Settings`] → [`EmitRequest`] →
//! emitted files → attached services.

use crate::artifacts::{
    select_artifacts, select_services, EmitReport, EmitRequest, FileEmitter, ServiceAttacher,
};
use crate::config::QuestionDefaults;
use crate::mode::{resolve, InvocationFlags, Resolution};
use crate::prompt::{primary_pass, secondary_pass, PromptHost};
use crate::settings::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Inputs of one run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub flags: InvocationFlags,
    /// Project root; its base name seeds the default subdomain
    pub dest_dir: PathBuf,
    pub defaults: QuestionDefaults,
}

/// Everything a run decided and produced
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub resolution: Resolution,
    pub settings: Settings,
    pub request: EmitRequest,
    pub report: EmitReport,
    /// Services attached after emission; empty when attachment did not run
    pub services: Vec<String>,
}

/// Collect settings from the prompt host without touching the filesystem
pub fn collect_settings<H: PromptHost + ?Sized>(
    host: &mut H,
    resolution: &Resolution,
    defaults: &QuestionDefaults,
) -> Result<Settings> {
    let answers = primary_pass(host, resolution, defaults)?;
    let settings = Settings::from_answers(resolution, &answers);
    let toggles = secondary_pass(host, resolution, defaults)?;
    Ok(settings.with_services(toggles))
}

/// Run a full generation
pub async fn generate<H, E, S>(
    host: &mut H,
    emitter: &E,
    attacher: &S,
    options: &GenerateOptions,
) -> Result<GenerateOutcome>
where
    H: PromptHost + ?Sized,
    E: FileEmitter,
    S: ServiceAttacher,
{
    let resolution = resolve(&options.flags, &options.dest_dir);
    let settings = collect_settings(host, &resolution, &options.defaults)?;

    let request = select_artifacts(resolution.mode, &settings, options.dest_dir.clone());
    let report = emitter.generate(&request, &settings).await?;

    let services = match select_services(resolution.mode, &settings, options.dest_dir.clone()) {
        Some(service_options) => attacher.add_default_services(&service_options).await?,
        None => Vec::new(),
    };

    Ok(GenerateOutcome {
        resolution,
        settings,
        request,
        report,
        services,
    })
}
