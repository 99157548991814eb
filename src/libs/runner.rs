// Every external process kubed starts goes through `CommandRunner`.
// The real implementation hands the command line to `sh -c`; tests swap in a
// scripted fake so no package manager is ever touched.

use std::fmt;
use std::io;
use std::process::{Command, ExitStatus, Stdio};

use colored::Colorize;

use crate::log_debug;

/// Exit status of an external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    code: Option<i32>,
}

impl CommandStatus {
    #[cfg(test)]
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for CommandStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Whether the child's stdout/stderr reach the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Installers: the user sees progress and answers sudo prompts.
    Inherit,
    /// Presence checks: no output, no stdin.
    Quiet,
}

/// Runs shell command lines and looks up programs on `PATH`.
pub trait CommandRunner {
    /// Runs `command` to completion. `Err` means it could not be started.
    fn run(&self, command: &str, mode: OutputMode) -> io::Result<CommandStatus>;

    /// Whether `program` resolves to an executable (a bare name is searched on
    /// `PATH`, a path is checked directly).
    fn is_on_path(&self, program: &str) -> bool;
}

/// `CommandRunner` backed by `sh -c`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, mode: OutputMode) -> io::Result<CommandStatus> {
        log_debug!("[Runner] sh -c {}", command.dimmed());
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        if mode == OutputMode::Quiet {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }
        let status = CommandStatus::from(cmd.status()?);
        log_debug!("[Runner] `{}` finished with {}", command.dimmed(), status);
        Ok(status)
    }

    fn is_on_path(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_success_only_for_zero() {
        assert!(CommandStatus::from_code(0).success());
        assert!(!CommandStatus::from_code(1).success());
        let signaled = CommandStatus { code: None };
        assert!(!signaled.success());
        assert_eq!(signaled.to_string(), "termination by signal");
        assert_eq!(CommandStatus::from_code(127).to_string(), "exit code 127");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runner_maps_exit_codes() {
        let runner = ShellRunner;
        assert!(runner.run("true", OutputMode::Quiet).unwrap().success());
        let status = runner.run("exit 3", OutputMode::Quiet).unwrap();
        assert_eq!(status.code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runner_path_lookup() {
        let runner = ShellRunner;
        assert!(runner.is_on_path("sh"));
        assert!(!runner.is_on_path("kubed-definitely-not-a-real-program"));
    }
}
