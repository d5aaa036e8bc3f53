//! Scripted answers for driving the wizard without a terminal

use crate::error::{Result, WizardError};
use crate::wizard::Prompter;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Answer {
    Choose(usize),
    Text(String),
    Password(String),
}

/// A [`Prompter`] that replays queued answers and records every question
///
/// Running out of answers behaves like a missing terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
    last_options: Option<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a menu choice
    pub fn then_choose(mut self, index: usize) -> Self {
        self.answers.push_back(Answer::Choose(index));
        self
    }

    /// Queue a text answer; an empty string accepts the default
    pub fn then_text(mut self, value: &str) -> Self {
        self.answers.push_back(Answer::Text(value.to_string()));
        self
    }

    /// Queue a password answer
    pub fn then_password(mut self, value: &str) -> Self {
        self.answers.push_back(Answer::Password(value.to_string()));
        self
    }

    /// Messages of every prompt shown so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Options of the most recent menu
    pub fn last_options(&self) -> Option<Vec<String>> {
        self.last_options.clone()
    }

    /// Answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, message: &str) -> Result<Answer> {
        self.asked.push(message.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| WizardError::NonInteractive {
                prompt: message.to_string(),
            })
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize> {
        self.last_options = Some(options.to_vec());
        match self.next(message)? {
            Answer::Choose(i) if i < options.len() => Ok(i),
            other => Err(unexpected(message, other)),
        }
    }

    fn text(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        match self.next(message)? {
            Answer::Text(v) if v.is_empty() => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(v) => Ok(v),
            other => Err(unexpected(message, other)),
        }
    }

    fn password(&mut self, message: &str) -> Result<String> {
        match self.next(message)? {
            Answer::Password(v) => Ok(v),
            other => Err(unexpected(message, other)),
        }
    }
}

fn unexpected(message: &str, answer: Answer) -> WizardError {
    let answer = match answer {
        Answer::Choose(i) => format!("choice {}", i),
        Answer::Text(v) => format!("text {:?}", v),
        Answer::Password(_) => "password ********".to_string(),
    };
    WizardError::Prompt {
        prompt: message.to_string(),
        message: format!("scripted {} does not fit", answer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let mut p = ScriptedPrompter::new().then_choose(1).then_text("").then_password("pw");
        let opts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(p.select("pick", &opts).unwrap(), 1);
        assert_eq!(p.text("name", Some("ops")).unwrap(), "ops");
        assert_eq!(p.password("secret").unwrap(), "pw");
        assert_eq!(p.asked(), &["pick", "name", "secret"]);
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn test_exhausted_is_non_interactive() {
        let mut p = ScriptedPrompter::new();
        assert!(matches!(
            p.password("secret"),
            Err(WizardError::NonInteractive { .. })
        ));
    }

    #[test]
    fn test_mismatched_password_answer_is_redacted() {
        let mut p = ScriptedPrompter::new().then_password("hunter2");
        let err = p.text("Username:", None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Username:"));
        assert!(!msg.contains("hunter2"));
    }

    #[test]
    fn test_out_of_range_choice_rejected() {
        let mut p = ScriptedPrompter::new().then_choose(5);
        assert!(p.select("pick", &["a".to_string()]).is_err());
    }
}
