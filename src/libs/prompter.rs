// Yes/no questions, kept behind a trait so tests can script the answers.

use colored::Colorize;
use dialoguer::Confirm;

use crate::errors::KubedError;
use crate::libs::environment::Environment;
use crate::{log_debug, log_info, log_warn};

/// Asks the user a yes/no question.
pub trait Prompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool, KubedError>;
}

/// Interactive terminal prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool, KubedError> {
        Ok(Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()?)
    }
}

/// Asks `question`, unless force-yes is on, in which case the answer is "yes"
/// without prompting. A prompt that cannot be shown (no TTY, closed stdin)
/// counts as "no".
pub fn confirm_or_force(
    prompter: &dyn Prompter,
    env: &Environment,
    question: &str,
    default: bool,
) -> bool {
    if env.force_yes {
        log_info!("{} {}", question, "yes (forced)".green());
        return true;
    }
    match prompter.confirm(question, default) {
        Ok(answer) => {
            log_debug!("[Prompt] '{}' answered {}", question, answer);
            answer
        }
        Err(e) => {
            log_warn!("[Prompt] {}. Treating '{}' as declined.", e, question);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::testing::ScriptedPrompter;

    #[test]
    fn test_force_yes_skips_the_prompt() {
        let prompter = ScriptedPrompter::new([false]);
        let env = Environment {
            force_yes: true,
            ..Default::default()
        };
        assert!(confirm_or_force(&prompter, &env, "Install?", true));
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn test_answer_is_passed_through() {
        let prompter = ScriptedPrompter::new([false, true]);
        let env = Environment::default();
        assert!(!confirm_or_force(&prompter, &env, "First?", true));
        assert!(confirm_or_force(&prompter, &env, "Second?", true));
        assert_eq!(prompter.asked(), ["First?", "Second?"]);
    }

    #[test]
    fn test_prompt_failure_counts_as_decline() {
        let prompter = ScriptedPrompter::failing();
        assert!(!confirm_or_force(&prompter, &Environment::default(), "Install?", true));
    }
}
