//! Typed settings produced by the prompt passes

use crate::mode::Resolution;
use crate::questions::QuestionKey;
use crate::validate::Answer;
use std::collections::BTreeMap;

/// Validated answers keyed by question
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    values: BTreeMap<QuestionKey, Answer>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: QuestionKey, answer: Answer) {
        self.values.insert(key, answer);
    }

    pub fn get(&self, key: QuestionKey) -> Option<&Answer> {
        self.values.get(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn number(&self, key: QuestionKey) -> Option<u32> {
        self.get(key).and_then(Answer::as_u32)
    }

    fn text(&self, key: QuestionKey) -> Option<String> {
        self.get(key).and_then(Answer::as_text).map(str::to_string)
    }

    fn flag(&self, key: QuestionKey) -> bool {
        self.get(key).and_then(Answer::as_bool).unwrap_or(false)
    }
}

/// Answers of the secondary pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceToggles {
    pub enable_auto_scaling: bool,
    pub enable_app_metrics: bool,
}

impl ServiceToggles {
    pub fn from_answers(answers: &Answers) -> Self {
        Self {
            enable_auto_scaling: answers.flag(QuestionKey::EnableAutoScaling),
            enable_app_metrics: answers.flag(QuestionKey::EnableAppMetrics),
        }
    }
}

/// Settings for one run. Fields irrelevant to the active mode stay unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Derived from the project directory; used as the manifest app name
    pub app_name: String,
    /// Megabytes
    pub app_memory: Option<u32>,
    pub app_instances: Option<u32>,
    pub app_domain: Option<String>,
    pub app_host: Option<String>,
    /// Megabytes
    pub app_disk_quota: Option<u32>,
    pub enable_docker: bool,
    pub enable_toolchain: bool,
    pub enable_auto_scaling: bool,
    pub enable_app_metrics: bool,
}

impl Settings {
    /// Build settings from the primary pass
    pub fn from_answers(resolution: &Resolution, answers: &Answers) -> Self {
        Self {
            app_name: resolution.app_name.clone(),
            app_memory: answers.number(QuestionKey::AppMemory),
            app_instances: answers.number(QuestionKey::AppInstances),
            app_domain: answers.text(QuestionKey::AppDomain),
            app_host: answers.text(QuestionKey::AppHost),
            app_disk_quota: answers.number(QuestionKey::AppDiskQuota),
            enable_docker: answers.flag(QuestionKey::Docker),
            enable_toolchain: answers.flag(QuestionKey::Toolchain),
            enable_auto_scaling: false,
            enable_app_metrics: false,
        }
    }

    /// Fold in the secondary pass
    pub fn with_services(self, toggles: ServiceToggles) -> Self {
        Self {
            enable_auto_scaling: toggles.enable_auto_scaling,
            enable_app_metrics: toggles.enable_app_metrics,
            ..self
        }
    }
}
