//! Bluemix Core - prompt/mode resolution engine for deployment scaffolding
//!
//! This library decides, from a set of mutually exclusive invocation flags,
//! which command mode is active, which settings questions to ask, how the
//! raw answers are validated and normalized, and which deployment file
//! groups the run produces.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pure mode resolution, answer validation, artifact selection
//! - **Layer 2: Pipeline** - `PromptHost`, `FileEmitter` and `ServiceAttacher` seams driven by `generate`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use bluemix_core::{generate, FsEmitter, FsServiceAttacher, GenerateOptions};
//! use bluemix_core::prompt::DefaultsHost;
//!
//! let options = GenerateOptions {
//!     flags: InvocationFlags { manifest: true, ..Default::default() },
//!     dest_dir: std::env::current_dir()?,
//!     defaults: QuestionDefaults::default(),
//! };
//! let outcome = generate(&mut DefaultsHost, &FsEmitter::new(false), &FsServiceAttacher, &options).await?;
//! ```

pub mod artifacts;
pub mod config;
pub mod error;
pub mod mode;
pub mod pipeline;
pub mod product;
pub mod prompt;
pub mod questions;
pub mod settings;
pub mod validate;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use artifacts::{
    select_artifacts, EmitRequest, FileEmitter, FileGroup, FsEmitter, FsServiceAttacher,
    ServiceAttacher,
};
pub use config::QuestionDefaults;
pub use error::{ConfigError, ValidationError};
pub use mode::{resolve, CommandMode, InvocationFlags, Resolution};
pub use pipeline::{generate, GenerateOptions, GenerateOutcome};
pub use product::ProductConfig;
pub use prompt::PromptHost;
pub use settings::Settings;

#[cfg(feature = "tui")]
pub use tui::run;
