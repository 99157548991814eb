// Scripted stand-ins for `CommandRunner` and `Prompter` used by unit tests.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::io;

use crate::errors::KubedError;
use crate::libs::prompter::Prompter;
use crate::libs::runner::{CommandRunner, CommandStatus, OutputMode};

struct Rule {
    needle: String,
    code: i32,
    puts_on_path: Option<String>,
}

/// Records every command and answers from rules matched by substring.
/// Commands without a matching rule exit with 1.
#[derive(Default)]
pub struct FakeRunner {
    rules: Vec<Rule>,
    unlaunchable: Vec<String>,
    on_path: RefCell<HashSet<String>>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands containing `needle` exit with 0.
    pub fn succeed(self, needle: &str) -> Self {
        self.exit_with(needle, 0)
    }

    /// Commands containing `needle` exit with `code`.
    pub fn exit_with(mut self, needle: &str, code: i32) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            code,
            puts_on_path: None,
        });
        self
    }

    /// Commands containing `needle` succeed and make `program` resolvable.
    pub fn installs(mut self, needle: &str, program: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            code: 0,
            puts_on_path: Some(program.to_string()),
        });
        self
    }

    /// Commands containing `needle` cannot be started at all.
    pub fn unlaunchable(mut self, needle: &str) -> Self {
        self.unlaunchable.push(needle.to_string());
        self
    }

    pub fn with_program(self, program: &str) -> Self {
        self.on_path.borrow_mut().insert(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of recorded commands containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.contains(needle))
            .count()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &str, _mode: OutputMode) -> io::Result<CommandStatus> {
        self.calls.borrow_mut().push(command.to_string());
        if self.unlaunchable.iter().any(|n| command.contains(n.as_str())) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "not found"));
        }
        match self.rules.iter().find(|r| command.contains(r.needle.as_str())) {
            Some(rule) => {
                if let Some(program) = &rule.puts_on_path {
                    self.on_path.borrow_mut().insert(program.clone());
                }
                Ok(CommandStatus::from_code(rule.code))
            }
            None => Ok(CommandStatus::from_code(1)),
        }
    }

    fn is_on_path(&self, program: &str) -> bool {
        self.on_path.borrow().contains(program)
    }
}

/// Answers prompts from a queue; once the queue is empty it returns the
/// question's default.
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
    fail: bool,
}

impl ScriptedPrompter {
    pub fn new<I: IntoIterator<Item = bool>>(answers: I) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    /// A prompter whose every call errors, like a terminal without a TTY.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new([])
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool, KubedError> {
        self.asked.borrow_mut().push(question.to_string());
        if self.fail {
            return Err(KubedError::Prompt(dialoguer::Error::IO(io::Error::new(
                io::ErrorKind::NotConnected,
                "not a terminal",
            ))));
        }
        Ok(self.answers.borrow_mut().pop_front().unwrap_or(default))
    }
}
