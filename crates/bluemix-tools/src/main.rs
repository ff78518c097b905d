//! Bluemix CLI - Deployment files for LoopBack projects

use anyhow::Result;
use bluemix_core::tui::GenerateArgs;
use bluemix_core::{CommandMode, InvocationFlags, ProductConfig};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// LoopBack product configuration
#[derive(Clone)]
pub struct LoopBackConfig;

impl ProductConfig for LoopBackConfig {
    fn display_name(&self) -> &'static str {
        "LoopBack Bluemix"
    }

    fn domain_env(&self) -> &'static str {
        "BLUEMIX_DOMAIN"
    }

    fn next_steps(&self, mode: CommandMode, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        match mode {
            CommandMode::Bluemix | CommandMode::Manifest => {
                steps.push("Review manifest.yml".to_string());
                steps.push("cf push".to_string());
            }
            CommandMode::Docker => {
                steps.push("docker build -t <image-name> .".to_string());
            }
            CommandMode::Toolchain => {
                steps.push(
                    "Commit the .bluemix directory and create a toolchain from the repository"
                        .to_string(),
                );
            }
            CommandMode::Datasource | CommandMode::Service => {
                steps.push(
                    "Map datasources to bound services in .bluemix/datasources-config.json"
                        .to_string(),
                );
            }
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "bluemix")]
#[command(about = "CLI for adding Bluemix deployment files to LoopBack projects")]
#[command(version)]
pub struct Args {
    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,

    /// Generate every Bluemix file (overrides the other mode flags)
    #[arg(long)]
    pub bluemix: bool,

    /// Generate the datasource configuration only
    #[arg(long)]
    pub datasource: bool,

    /// Generate toolchain files only
    #[arg(long)]
    pub toolchain: bool,

    /// Generate the service binding configuration only
    #[arg(long)]
    pub service: bool,

    /// Generate Docker files only
    #[arg(long)]
    pub docker: bool,

    /// Generate manifest.yml only
    #[arg(long)]
    pub manifest: bool,

    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// YAML file overriding the default answers
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Accept all default answers (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<Args> for GenerateArgs {
    fn from(args: Args) -> Self {
        GenerateArgs {
            flags: InvocationFlags {
                bluemix: args.bluemix,
                datasource: args.datasource,
                toolchain: args.toolchain,
                service: args.service,
                docker: args.docker,
                manifest: args.manifest,
            },
            force: args.force,
            directory: args.directory,
            defaults_file: args.defaults,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = LoopBackConfig;

    let result = bluemix_core::run(&config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = &result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}
