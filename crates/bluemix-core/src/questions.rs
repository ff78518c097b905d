//! Static question definitions
//!
//! The set of questions is fixed. The mode resolver only decides which of
//! them are surfaced and in what order.

use crate::config::QuestionDefaults;
use crate::error::ValidationError;
use crate::validate::{self, Answer};
use std::fmt;

/// Validator attached to a question
pub type Validator = fn(&str) -> Result<Answer, ValidationError>;

/// Stable identity of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionKey {
    AppMemory,
    AppInstances,
    AppDomain,
    AppHost,
    AppDiskQuota,
    Toolchain,
    Docker,
    EnableAutoScaling,
    EnableAppMetrics,
}

/// Application sizing questions, in the order they are asked
pub const SIZING_QUESTIONS: [QuestionKey; 5] = [
    QuestionKey::AppMemory,
    QuestionKey::AppInstances,
    QuestionKey::AppDomain,
    QuestionKey::AppHost,
    QuestionKey::AppDiskQuota,
];

/// Questions of the secondary pass that feed default-service attachment
pub const SERVICE_QUESTIONS: [QuestionKey; 2] =
    [QuestionKey::EnableAutoScaling, QuestionKey::EnableAppMetrics];

impl QuestionKey {
    /// Answer key as exposed to prompt hosts
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKey::AppMemory => "appMemory",
            QuestionKey::AppInstances => "appInstances",
            QuestionKey::AppDomain => "appDomain",
            QuestionKey::AppHost => "appHost",
            QuestionKey::AppDiskQuota => "appDiskQuota",
            QuestionKey::Toolchain => "toolchain",
            QuestionKey::Docker => "docker",
            QuestionKey::EnableAutoScaling => "enableAutoScaling",
            QuestionKey::EnableAppMetrics => "enableAppMetrics",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            QuestionKey::AppMemory => "How much memory to allocate for the app?",
            QuestionKey::AppInstances => "How many instances of app to run?",
            QuestionKey::AppDomain => "What is the domain name of the app?",
            QuestionKey::AppHost => "What is the subdomain of the app?",
            QuestionKey::AppDiskQuota => "How much disk space to allocate for the app?",
            QuestionKey::Toolchain => "Do you want to create toolchain files?",
            QuestionKey::Docker => "Do you want to create a Dockerfile?",
            QuestionKey::EnableAutoScaling => "Do you want to enable autoscaling?",
            QuestionKey::EnableAppMetrics => "Do you want to enable appmetrics?",
        }
    }

    pub fn validator(&self) -> Validator {
        match self {
            QuestionKey::AppMemory => validate::validate_app_memory,
            QuestionKey::AppInstances => validate::validate_app_instances,
            QuestionKey::AppDomain => validate::validate_app_domain,
            QuestionKey::AppHost => validate::validate_app_host,
            QuestionKey::AppDiskQuota => validate::validate_app_disk_quota,
            QuestionKey::Toolchain
            | QuestionKey::Docker
            | QuestionKey::EnableAutoScaling
            | QuestionKey::EnableAppMetrics => validate::validate_yes_no,
        }
    }

    /// Whether this is a yes/no confirmation
    pub fn is_yes_no(&self) -> bool {
        matches!(
            self,
            QuestionKey::Toolchain
                | QuestionKey::Docker
                | QuestionKey::EnableAutoScaling
                | QuestionKey::EnableAppMetrics
        )
    }

    /// Default answer, pre-filled in the prompt
    pub fn default_answer(&self, defaults: &QuestionDefaults, app_name: &str) -> String {
        match self {
            QuestionKey::AppMemory => defaults.app_memory.to_string(),
            QuestionKey::AppInstances => defaults.app_instances.to_string(),
            QuestionKey::AppDomain => defaults.app_domain.clone(),
            QuestionKey::AppHost => app_name.to_string(),
            QuestionKey::AppDiskQuota => defaults.app_disk_quota.to_string(),
            QuestionKey::Toolchain => validate::yes_no(defaults.toolchain).to_string(),
            QuestionKey::Docker => validate::yes_no(defaults.docker).to_string(),
            QuestionKey::EnableAutoScaling => {
                validate::yes_no(defaults.enable_auto_scaling).to_string()
            }
            QuestionKey::EnableAppMetrics => {
                validate::yes_no(defaults.enable_app_metrics).to_string()
            }
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A question ready to be surfaced to a prompt host
#[derive(Debug, Clone)]
pub struct Question {
    pub key: QuestionKey,
    pub message: &'static str,
    pub default: String,
    pub validator: Validator,
}

impl Question {
    pub fn new(key: QuestionKey, defaults: &QuestionDefaults, app_name: &str) -> Self {
        Self {
            key,
            message: key.message(),
            default: key.default_answer(defaults, app_name),
            validator: key.validator(),
        }
    }

    pub fn validate(&self, raw: &str) -> Result<Answer, ValidationError> {
        (self.validator)(raw)
    }
}

/// Build the prompt-ready questions for a list of keys, preserving order
pub fn build_questions(
    keys: &[QuestionKey],
    defaults: &QuestionDefaults,
    app_name: &str,
) -> Vec<Question> {
    keys.iter()
        .map(|key| Question::new(*key, defaults, app_name))
        .collect()
}
