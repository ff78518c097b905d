//! Charm-style CLI prompts using cliclack

use crate::artifacts::{FsEmitter, FsServiceAttacher};
use crate::config::QuestionDefaults;
use crate::error::ValidationError;
use crate::mode::{self, CommandMode, InvocationFlags};
use crate::pipeline::{generate, GenerateOptions, GenerateOutcome};
use crate::product::ProductConfig;
use crate::prompt::{DefaultsHost, PromptHost};
use crate::questions::Question;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Mode selection flags
    pub flags: InvocationFlags,

    /// Overwrite files that already exist
    pub force: bool,

    /// Project directory to generate into (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// YAML file overriding the question defaults
    pub defaults_file: Option<PathBuf>,

    /// Accept every default (non-interactive mode)
    pub yes: bool,
}

/// Prompt host asking each question with an inline cliclack input
#[derive(Debug, Default)]
pub struct ClackHost;

impl PromptHost for ClackHost {
    fn ask(&mut self, question: &Question) -> Result<String> {
        let answer: String = cliclack::input(question.message)
            .placeholder(&question.default)
            .default_input(&question.default)
            .interact()?;
        Ok(answer)
    }

    fn reject(&mut self, _question: &Question, reason: &ValidationError) -> Result<()> {
        cliclack::log::warning(reason.to_string())?;
        Ok(())
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: GenerateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Locate the project
    let dest_dir = select_directory(&args)?;

    // Step 2: Load question defaults
    let defaults = QuestionDefaults::from_config(config, args.defaults_file.as_deref())?;
    if let Some(path) = &args.defaults_file {
        cliclack::log::info(format!("Using defaults from {}", path.display()))?;
    }

    // Step 3: Announce the resolved mode before asking anything
    let resolution = mode::resolve(&args.flags, &dest_dir);
    cliclack::log::info(describe_mode(resolution.mode))?;

    // Step 4: Ask, emit, attach
    let options = GenerateOptions {
        flags: args.flags,
        dest_dir: dest_dir.clone(),
        defaults,
    };
    let emitter = FsEmitter::new(args.force);
    let outcome = if args.yes {
        cliclack::log::info("Accepting default answers (--yes mode)")?;
        generate(&mut DefaultsHost, &emitter, &FsServiceAttacher, &options).await?
    } else {
        generate(&mut ClackHost, &emitter, &FsServiceAttacher, &options).await?
    };

    // Step 5: Report
    report_outcome(&outcome, &dest_dir)?;
    print_next_steps(config, outcome.resolution.mode, &dest_dir)?;

    Ok(())
}

fn describe_mode(mode: CommandMode) -> &'static str {
    match mode {
        CommandMode::Bluemix => "Generating Bluemix deployment files",
        CommandMode::Manifest => "Generating the Cloud Foundry manifest",
        CommandMode::Toolchain => "Generating toolchain files",
        CommandMode::Docker => "Generating Docker files",
        CommandMode::Datasource => "Generating the datasource configuration",
        CommandMode::Service => "Generating the service binding configuration",
    }
}

fn select_directory(args: &GenerateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir()?;

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }

    cliclack::log::info(format!("Project directory: {}", path.display()))?;
    Ok(path)
}

fn report_outcome(outcome: &GenerateOutcome, dest_dir: &Path) -> Result<()> {
    if !outcome.report.skipped.is_empty() {
        cliclack::log::warning(format!(
            "Kept {} existing file(s), use --force to overwrite: {}",
            outcome.report.skipped.len(),
            outcome.report.skipped.join(", ")
        ))?;
    }

    let groups: Vec<&str> = outcome
        .request
        .file_groups()
        .iter()
        .map(|g| g.name())
        .collect();
    cliclack::log::success(format!(
        "Created {} files ({}) in {}",
        outcome.report.written.len(),
        groups.join(", "),
        dest_dir.display()
    ))?;

    if !outcome.services.is_empty() {
        cliclack::log::success(format!(
            "Attached services: {}",
            outcome.services.join(", ")
        ))?;
    }

    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, mode: CommandMode, dir: &Path) -> Result<()> {
    let steps = config.next_steps(mode, dir);

    if !steps.is_empty() {
        println!();
        println!("  Next steps");
        println!();

        for (i, step) in steps.iter().enumerate() {
            println!("  {}.  {}", i + 1, step);
        }
    }

    cliclack::outro("Happy deploying!")?;

    Ok(())
}
