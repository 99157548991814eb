//! # Homebrew
//!
//! Homebrew is the primary installer for every tool in the catalog. This
//! module finds a usable `brew` and, when there is none, runs the official
//! install script.
//!
//! A freshly installed Homebrew is usually not on the `PATH` of the running
//! process (`/opt/homebrew/bin` on Apple Silicon, `/home/linuxbrew/.linuxbrew/bin`
//! on Linux), so the well-known prefixes are checked as well and primary
//! install commands are rewritten to put that prefix on `PATH`.

use std::path::Path;

use colored::Colorize;

use crate::libs::runner::{CommandRunner, OutputMode};
use crate::{log_debug, log_error, log_info};

/// The official Homebrew installer.
pub const HOMEBREW_INSTALL_COMMAND: &str =
    r#"/bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#;

/// Where Homebrew lives when it is not on `PATH`.
const HOMEBREW_LOCATIONS: &[&str] = &[
    "/opt/homebrew/bin/brew",
    "/usr/local/bin/brew",
    "/home/linuxbrew/.linuxbrew/bin/brew",
];

/// A `brew` executable that can run install commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homebrew {
    /// `brew` when it resolves on `PATH`, otherwise an absolute path.
    executable: String,
}

impl Homebrew {
    /// Finds `brew` on `PATH` or in one of the standard prefixes.
    pub fn locate(runner: &dyn CommandRunner) -> Option<Self> {
        if runner.is_on_path("brew") {
            log_debug!("[Brew] Found brew on PATH");
            return Some(Self {
                executable: "brew".to_string(),
            });
        }
        let found = HOMEBREW_LOCATIONS
            .iter()
            .find(|candidate| runner.is_on_path(candidate))
            .map(|candidate| Self {
                executable: candidate.to_string(),
            });
        match &found {
            Some(brew) => log_debug!("[Brew] Found brew at {}", brew.executable.cyan()),
            None => log_debug!("[Brew] brew not found"),
        }
        found
    }

    /// Adapts a `brew ...` command line to this executable.
    ///
    /// When `brew` is not on `PATH` its `bin` directory is prepended so that
    /// the command, and anything Homebrew spawns, finds it.
    pub fn command(&self, install_command: &str) -> String {
        match Path::new(&self.executable).parent() {
            Some(bin_dir) if !bin_dir.as_os_str().is_empty() => {
                format!("PATH=\"{}:$PATH\" {}", bin_dir.display(), install_command)
            }
            _ => install_command.to_string(),
        }
    }
}

/// Runs the Homebrew install script.
///
/// # Arguments
///
/// * `runner` - Executes the curl-piped install script.
/// * `non_interactive` - Prefixes `NONINTERACTIVE=1` so the script does not
///   stop for confirmation.
///
/// # Returns
///
/// `true` when the script exited cleanly.
pub fn bootstrap(runner: &dyn CommandRunner, non_interactive: bool) -> bool {
    let command = if non_interactive {
        format!("NONINTERACTIVE=1 {HOMEBREW_INSTALL_COMMAND}")
    } else {
        HOMEBREW_INSTALL_COMMAND.to_string()
    };
    log_info!("[Brew] Installing {}...", "Homebrew".bold());
    match runner.run(&command, OutputMode::Inherit) {
        Ok(status) if status.success() => {
            log_info!("[Brew] {}", "Homebrew installed successfully!".green());
            true
        }
        Ok(status) => {
            log_error!(
                "[Brew] Failed to install Homebrew ({}). Continuing with alternative installation methods.",
                status
            );
            false
        }
        Err(e) => {
            log_error!(
                "[Brew] Could not start the Homebrew installer: {}. Continuing with alternative installation methods.",
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::testing::FakeRunner;

    #[test]
    fn test_prefers_brew_on_path() {
        let runner = FakeRunner::new()
            .with_program("brew")
            .with_program("/opt/homebrew/bin/brew");
        let brew = Homebrew::locate(&runner).unwrap();
        assert_eq!(brew.command("brew install helm"), "brew install helm");
    }

    #[test]
    fn test_falls_back_to_well_known_prefix() {
        let runner = FakeRunner::new().with_program("/home/linuxbrew/.linuxbrew/bin/brew");
        let brew = Homebrew::locate(&runner).unwrap();
        assert_eq!(
            brew.command("brew install helm"),
            "PATH=\"/home/linuxbrew/.linuxbrew/bin:$PATH\" brew install helm"
        );
    }

    #[test]
    fn test_missing_brew() {
        assert!(Homebrew::locate(&FakeRunner::new()).is_none());
    }

    #[test]
    fn test_bootstrap_reports_status() {
        let ok = FakeRunner::new().succeed("Homebrew/install");
        assert!(bootstrap(&ok, true));
        assert!(ok.calls()[0].starts_with("NONINTERACTIVE=1 "));

        let failing = FakeRunner::new().exit_with("Homebrew/install", 1);
        assert!(!bootstrap(&failing, false));
        assert_eq!(failing.calls(), [HOMEBREW_INSTALL_COMMAND]);
    }
}
