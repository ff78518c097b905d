//! Product configuration trait for CLI binaries
//!
//! The host generator implements this trait to brand the prompts and to
//! tell the user what to do with the generated files.

use crate::mode::CommandMode;
use std::path::Path;

/// Configuration trait for the host generator
///
/// Each product defines:
/// - Product identity (display name)
/// - Default deployment domain and its environment override
/// - Post-generation instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Domain pre-filled in the domain question
    fn default_domain(&self) -> &'static str {
        crate::config::defaults::DEFAULT_DOMAIN
    }

    /// Environment variable name for overriding the default domain
    fn domain_env(&self) -> &'static str;

    /// Generate the "next steps" instructions after generation
    fn next_steps(&self, mode: CommandMode, dir: &Path) -> Vec<String>;
}
