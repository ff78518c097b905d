//! Command mode resolution
//!
//! Exactly one mode is active per run. Flags are checked in priority order
//! and the first match wins; conflicting flags are not an error; the
//! lower-priority ones are simply ignored.

use crate::questions::{QuestionKey, SIZING_QUESTIONS};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Characters not allowed in a default subdomain, collapsed to a single `-` per run
static DISALLOWED_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/@\s+%:.]+").expect("name pattern is valid"));

/// Flags supplied once per run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvocationFlags {
    /// Generate everything; overrides every other mode flag
    pub bluemix: bool,
    pub datasource: bool,
    pub toolchain: bool,
    pub service: bool,
    pub docker: bool,
    pub manifest: bool,
}

/// What a run generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandMode {
    /// Full interactive flow
    Bluemix,
    /// Manifest only, no docker/toolchain confirmation
    Manifest,
    Toolchain,
    Docker,
    Datasource,
    Service,
}

impl CommandMode {
    pub fn name(&self) -> &'static str {
        match self {
            CommandMode::Bluemix => "bluemix",
            CommandMode::Manifest => "manifest",
            CommandMode::Toolchain => "toolchain",
            CommandMode::Docker => "docker",
            CommandMode::Datasource => "datasource",
            CommandMode::Service => "service",
        }
    }

    /// Modes whose resolved questions are surfaced to the user.
    /// The secondary service pass runs for the same modes.
    pub fn prompts_settings(&self) -> bool {
        matches!(self, CommandMode::Bluemix | CommandMode::Manifest)
    }

    /// Only a full bluemix run attaches the default services
    pub fn attaches_services(&self) -> bool {
        matches!(self, CommandMode::Bluemix)
    }
}

impl fmt::Display for CommandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of mode resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub mode: CommandMode,
    /// Questions relevant to the mode, in the order they are asked
    pub questions: Vec<QuestionKey>,
    /// Application name derived from the project directory; default subdomain
    pub app_name: String,
}

/// Resolve the active mode and its questions.
///
/// `project_dir` is the directory whose base name becomes the default
/// application name.
pub fn resolve(flags: &InvocationFlags, project_dir: &Path) -> Resolution {
    let app_name = project_dir
        .file_name()
        .map(|name| default_app_name(&name.to_string_lossy()))
        .unwrap_or_default();

    let (mode, questions) = resolve_mode(flags);

    Resolution {
        mode,
        questions,
        app_name,
    }
}

fn resolve_mode(flags: &InvocationFlags) -> (CommandMode, Vec<QuestionKey>) {
    if flags.bluemix {
        let mut questions = SIZING_QUESTIONS.to_vec();
        questions.extend([QuestionKey::Toolchain, QuestionKey::Docker]);
        return (CommandMode::Bluemix, questions);
    }
    if flags.datasource {
        return (CommandMode::Datasource, Vec::new());
    }
    if flags.toolchain {
        return (CommandMode::Toolchain, vec![QuestionKey::Toolchain]);
    }
    if flags.service {
        return (CommandMode::Service, Vec::new());
    }
    if flags.docker {
        return (CommandMode::Docker, Vec::new());
    }

    let mut questions = SIZING_QUESTIONS.to_vec();
    if flags.manifest {
        (CommandMode::Manifest, questions)
    } else {
        questions.extend([QuestionKey::Docker, QuestionKey::Toolchain]);
        (CommandMode::Bluemix, questions)
    }
}

/// Derive a subdomain-safe application name from a directory name
pub fn default_app_name(dir_name: &str) -> String {
    DISALLOWED_NAME_CHARS.replace_all(dir_name, "-").into_owned()
}
