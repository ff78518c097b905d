//! Prompt host interface and the two prompt passes

use crate::config::QuestionDefaults;
use crate::error::ValidationError;
use crate::mode::Resolution;
use crate::questions::{build_questions, Question, SERVICE_QUESTIONS};
use crate::settings::{Answers, ServiceToggles};
use crate::validate::Answer;
use anyhow::Result;

/// Displays questions and returns raw answers
///
/// Errors returned here (e.g. the user aborting) are fatal for the run.
pub trait PromptHost {
    /// Ask one question. An empty answer selects the question's default.
    fn ask(&mut self, question: &Question) -> Result<String>;

    /// Report a rejected answer; the same question is asked again afterwards
    fn reject(&mut self, question: &Question, reason: &ValidationError) -> Result<()>;
}

/// Ask until the answer validates
pub fn ask_validated<H: PromptHost + ?Sized>(host: &mut H, question: &Question) -> Result<Answer> {
    loop {
        let raw = host.ask(question)?;
        let raw = if raw.trim().is_empty() {
            question.default.as_str()
        } else {
            raw.as_str()
        };

        match question.validate(raw) {
            Ok(answer) => return Ok(answer),
            Err(reason) => host.reject(question, &reason)?,
        }
    }
}

/// Ask each question in order
pub fn collect_answers<H: PromptHost + ?Sized>(
    host: &mut H,
    questions: &[Question],
) -> Result<Answers> {
    let mut answers = Answers::new();
    for question in questions {
        let answer = ask_validated(host, question)?;
        answers.insert(question.key, answer);
    }
    Ok(answers)
}

/// First pass: the resolved questions.
///
/// Only bluemix and manifest runs surface them. In the other modes the
/// invocation flag is the confirmation, so listed yes/no questions settle
/// to yes without prompting.
pub fn primary_pass<H: PromptHost + ?Sized>(
    host: &mut H,
    resolution: &Resolution,
    defaults: &QuestionDefaults,
) -> Result<Answers> {
    if resolution.mode.prompts_settings() {
        let questions = build_questions(&resolution.questions, defaults, &resolution.app_name);
        return collect_answers(host, &questions);
    }

    let mut answers = Answers::new();
    for key in resolution.questions.iter().filter(|k| k.is_yes_no()) {
        answers.insert(*key, Answer::YesNo(true));
    }
    Ok(answers)
}

/// Second pass: auto-scaling and app-metrics, for bluemix and manifest runs only
pub fn secondary_pass<H: PromptHost + ?Sized>(
    host: &mut H,
    resolution: &Resolution,
    defaults: &QuestionDefaults,
) -> Result<ServiceToggles> {
    if !resolution.mode.prompts_settings() {
        return Ok(ServiceToggles::default());
    }

    let questions = build_questions(&SERVICE_QUESTIONS, defaults, &resolution.app_name);
    let answers = collect_answers(host, &questions)?;
    Ok(ServiceToggles::from_answers(&answers))
}

/// Non-interactive host that accepts every default
#[derive(Debug, Default)]
pub struct DefaultsHost;

impl PromptHost for DefaultsHost {
    fn ask(&mut self, question: &Question) -> Result<String> {
        Ok(question.default.clone())
    }

    fn reject(&mut self, question: &Question, reason: &ValidationError) -> Result<()> {
        // Asking again would return the same default forever
        anyhow::bail!(
            "Default answer for '{}' is invalid: {}",
            question.key,
            reason
        )
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::questions::QuestionKey;
    use std::collections::{HashMap, VecDeque};

    /// Replays canned answers per question; unscripted questions get an empty answer
    #[derive(Debug, Default)]
    pub struct ScriptedHost {
        scripts: HashMap<QuestionKey, VecDeque<String>>,
        pub asked: Vec<QuestionKey>,
        pub rejections: Vec<(QuestionKey, String)>,
    }

    impl ScriptedHost {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn answer(mut self, key: QuestionKey, raw: &str) -> Self {
            self.scripts
                .entry(key)
                .or_default()
                .push_back(raw.to_string());
            self
        }
    }

    impl PromptHost for ScriptedHost {
        fn ask(&mut self, question: &Question) -> Result<String> {
            self.asked.push(question.key);
            Ok(self
                .scripts
                .get_mut(&question.key)
                .and_then(VecDeque::pop_front)
                .unwrap_or_default())
        }

        fn reject(&mut self, question: &Question, reason: &ValidationError) -> Result<()> {
            self.rejections.push((question.key, reason.to_string()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedHost;
    use super::*;
    use crate::mode::{resolve, CommandMode, InvocationFlags};
    use crate::questions::{QuestionKey, SIZING_QUESTIONS};
    use std::path::Path;

    fn resolve_flags(flags: InvocationFlags) -> Resolution {
        resolve(&flags, Path::new("/projects/test-app"))
    }

    #[test]
    fn test_invalid_answer_is_asked_again() {
        let mut host = ScriptedHost::new()
            .answer(QuestionKey::AppMemory, "lots")
            .answer(QuestionKey::AppMemory, "0")
            .answer(QuestionKey::AppMemory, "512");
        let question = Question::new(QuestionKey::AppMemory, &QuestionDefaults::default(), "a");

        let answer = ask_validated(&mut host, &question).unwrap();
        assert_eq!(answer, Answer::Megabytes(512));
        assert_eq!(host.asked.len(), 3);
        assert_eq!(host.rejections.len(), 2);
        assert!(host.rejections[0].1.contains("lots"));
    }

    #[test]
    fn test_empty_answer_takes_default() {
        let mut host = ScriptedHost::new();
        let question = Question::new(QuestionKey::AppHost, &QuestionDefaults::default(), "my-app");
        let answer = ask_validated(&mut host, &question).unwrap();
        assert_eq!(answer, Answer::Text("my-app".to_string()));
        assert!(host.rejections.is_empty());
    }

    #[test]
    fn test_primary_pass_asks_in_resolved_order() {
        let resolution = resolve_flags(InvocationFlags {
            manifest: true,
            ..Default::default()
        });
        let mut host = ScriptedHost::new();
        let answers = primary_pass(&mut host, &resolution, &QuestionDefaults::default()).unwrap();
        assert_eq!(host.asked, SIZING_QUESTIONS.to_vec());
        assert_eq!(answers.len(), 5);
    }

    #[test]
    fn test_toolchain_flag_confirms_without_prompting() {
        let resolution = resolve_flags(InvocationFlags {
            toolchain: true,
            ..Default::default()
        });
        assert_eq!(resolution.mode, CommandMode::Toolchain);

        let mut host = ScriptedHost::new();
        let answers = primary_pass(&mut host, &resolution, &QuestionDefaults::default()).unwrap();
        assert!(host.asked.is_empty());
        assert_eq!(answers.get(QuestionKey::Toolchain), Some(&Answer::YesNo(true)));
    }

    #[test]
    fn test_secondary_pass_only_for_bluemix_and_manifest() {
        let defaults = QuestionDefaults::default();
        for (flags, expect_prompt) in [
            (InvocationFlags::default(), true),
            (
                InvocationFlags {
                    manifest: true,
                    ..Default::default()
                },
                true,
            ),
            (
                InvocationFlags {
                    docker: true,
                    ..Default::default()
                },
                false,
            ),
            (
                InvocationFlags {
                    service: true,
                    ..Default::default()
                },
                false,
            ),
        ] {
            let resolution = resolve_flags(flags);
            let mut host = ScriptedHost::new()
                .answer(QuestionKey::EnableAutoScaling, "yes")
                .answer(QuestionKey::EnableAppMetrics, "no");
            let toggles = secondary_pass(&mut host, &resolution, &defaults).unwrap();

            if expect_prompt {
                assert_eq!(host.asked, SERVICE_QUESTIONS.to_vec());
                assert!(toggles.enable_auto_scaling);
                assert!(!toggles.enable_app_metrics);
            } else {
                assert!(host.asked.is_empty());
                assert_eq!(toggles, ServiceToggles::default());
            }
        }
    }

    #[test]
    fn test_defaults_host_fails_on_invalid_default() {
        let mut host = DefaultsHost;
        // A directory name that derives to an empty subdomain
        let question = Question::new(QuestionKey::AppHost, &QuestionDefaults::default(), "");
        let err = ask_validated(&mut host, &question).unwrap_err();
        assert!(err.to_string().contains("appHost"));
    }
}
