// Environment probe: which shell is in use, which startup file belongs to it,
// and which tools are already installed. Nothing here mutates the machine.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::libs::environment::Environment;
use crate::libs::runner::{CommandRunner, OutputMode};
use crate::libs::shell_configurator::SETUP_BLOCK_MARKER;
use crate::schemas::shell_profile::{ShellKind, ShellProfile};
use crate::schemas::tools::ToolSpec;
use crate::{log_debug, log_warn};

/// Base name of the interactive shell (`/usr/bin/zsh` → `zsh`).
///
/// # Arguments
///
/// * `env` - Its `shell` field holds the captured `SHELL` value.
///
/// # Returns
///
/// The shell name, or `None` when `SHELL` is unset or blank.
pub fn detect_shell(env: &Environment) -> Option<String> {
    let raw = env.shell.as_deref()?.trim();
    if raw.is_empty() {
        return None;
    }
    let name = Path::new(raw)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())?;
    log_debug!("[Probe] Detected shell '{}' from SHELL={}", name.bold(), raw);
    Some(name)
}

/// Startup file for `shell`.
///
/// When a shell has several candidates the first one that already exists is
/// used, falling back to the first candidate.
///
/// # Arguments
///
/// * `env` - Supplies the home directory.
/// * `shell` - A shell name such as `"bash"`, as returned by `detect_shell`.
///
/// # Returns
///
/// The startup file path, which may not exist yet. `None` for unknown shells
/// or an unknown home directory.
pub fn config_file_for(env: &Environment, shell: &str) -> Option<PathBuf> {
    let Some(kind) = ShellKind::from_name(shell) else {
        log_warn!(
            "[Probe] Unsupported shell '{}'. Only bash, zsh and fish can be configured automatically.",
            shell.red()
        );
        return None;
    };
    let Some(home) = env.home.as_ref() else {
        log_warn!("[Probe] Could not determine the home directory.");
        return None;
    };

    let candidates: Vec<PathBuf> = match kind {
        ShellKind::Bash => vec![home.join(".bashrc"), home.join(".bash_profile")],
        ShellKind::Zsh => vec![home.join(".zshrc")],
        ShellKind::Fish => vec![home.join(".config").join("fish").join("config.fish")],
    };

    let chosen = candidates
        .iter()
        .find(|candidate| candidate.exists())
        .or_else(|| candidates.first())
        .cloned();
    if let Some(path) = &chosen {
        log_debug!(
            "[Probe] Using {} for {} (exists: {})",
            path.display().to_string().cyan(),
            kind,
            path.exists()
        );
    }
    chosen
}

/// Shell and startup file for this run, or `None` when either is unknown.
pub fn probe_shell(env: &Environment) -> Option<ShellProfile> {
    let name = detect_shell(env)?;
    let shell = ShellKind::from_name(&name)?;
    let config_path = config_file_for(env, &name)?;
    Some(ShellProfile {
        shell,
        config_path,
        marker: SETUP_BLOCK_MARKER,
    })
}

/// Runs the tool's check command quietly.
///
/// # Arguments
///
/// * `runner` - Executes `tool.check_command` with output suppressed.
/// * `tool` - The catalog entry to check.
///
/// # Returns
///
/// `true` only for exit status zero; a non-zero status or a launch failure
/// means absent.
pub fn is_tool_present(runner: &dyn CommandRunner, tool: &ToolSpec) -> bool {
    match runner.run(&tool.check_command, OutputMode::Quiet) {
        Ok(status) if status.success() => {
            log_debug!("[Probe] {} is installed", tool.name.green());
            true
        }
        Ok(status) => {
            log_debug!(
                "[Probe] `{}` exited with {}; treating {} as absent",
                tool.check_command,
                status,
                tool.name.yellow()
            );
            false
        }
        Err(e) => {
            log_debug!(
                "[Probe] Could not run `{}` ({}); treating {} as absent",
                tool.check_command,
                e,
                tool.name.yellow()
            );
            false
        }
    }
}
