// Installer Resolver.
//
// For every tool in the catalog that is not already installed, asks the user,
// then tries Homebrew and finally the tool's direct-download fallback. Each
// tool is independent: a failure is recorded and the next tool is attempted.
//
// Homebrew itself is resolved lazily, on the first accepted install, and its
// bootstrap is attempted at most once per run.

use colored::Colorize;

use crate::installers::brew::{self, Homebrew};
use crate::libs::environment::Environment;
use crate::libs::probe::is_tool_present;
use crate::libs::prompter::{Prompter, confirm_or_force};
use crate::libs::runner::{CommandRunner, OutputMode};
use crate::schemas::mutation::{MutationResult, Outcome};
use crate::schemas::tools::ToolSpec;
use crate::{log_debug, log_error, log_info, log_warn};

const HOMEBREW_PROMPT: &str =
    "Homebrew is not installed. Would you like to install it? (otherwise direct downloads are used)";

/// Homebrew lookup, cached for the rest of the run.
enum BrewState {
    Unresolved,
    Available(Homebrew),
    Unavailable,
}

/// Walks `catalog` in order and installs whatever is missing.
///
/// # Arguments
/// * `env`: supplies force-yes.
/// * `runner`: runs check and install commands.
/// * `prompter`: asks before each install (and before bootstrapping Homebrew).
/// * `catalog`: tools to check, in output order.
/// * `skip_tools`: names that are reported as skipped without asking.
///
/// # Returns
/// One `MutationResult` per catalog entry, in catalog order.
pub fn install_missing_tools(
    env: &Environment,
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
    catalog: &[ToolSpec],
    skip_tools: &[String],
) -> Vec<MutationResult> {
    log_info!("[Tools] Checking {} tool(s)...", catalog.len());
    let mut brew_state = BrewState::Unresolved;

    catalog
        .iter()
        .map(|tool| {
            let outcome = resolve_tool(env, runner, prompter, tool, skip_tools, &mut brew_state);
            log_debug!("[Tools] {} -> {}", tool.name, outcome);
            MutationResult::new(tool.name.clone(), outcome)
        })
        .collect()
}

fn resolve_tool(
    env: &Environment,
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
    tool: &ToolSpec,
    skip_tools: &[String],
    brew_state: &mut BrewState,
) -> Outcome {
    if is_tool_present(runner, tool) {
        log_info!("[Tools] {} is already installed", tool.name.green());
        return Outcome::AlreadyPresent;
    }

    if skip_tools.iter().any(|skipped| skipped.eq_ignore_ascii_case(&tool.name)) {
        log_info!(
            "[Tools] Skipping {} (listed in skip_tools)",
            tool.name.yellow()
        );
        return Outcome::SkippedByUser;
    }

    if !confirm_or_force(prompter, env, &tool.prompt, true) {
        log_warn!("[Tools] Skipping {} installation", tool.name.yellow());
        return Outcome::SkippedByUser;
    }

    eprintln!("{}", "==============================================================".bright_blue());
    log_info!("[Tools] Installing {}...", tool.name.bright_blue().bold());

    if let Some(found) = homebrew(env, runner, prompter, brew_state) {
        let command = found.command(&tool.primary_install);
        if run_install(runner, &command) {
            log_info!("[Tools] {} installed successfully!", tool.name.green());
            return Outcome::InstalledPrimary;
        }
        log_warn!(
            "[Tools] Homebrew could not install {}. Trying alternative installation method...",
            tool.name.yellow()
        );
    } else {
        log_info!(
            "[Tools] Homebrew unavailable. Using alternative installation method for {}...",
            tool.name.bold()
        );
    }

    if run_install(runner, &tool.fallback_install) {
        log_info!(
            "[Tools] {} installed successfully using alternative method!",
            tool.name.green()
        );
        Outcome::InstalledFallback
    } else {
        log_error!(
            "[Tools] Failed to install {}. Please install it manually.",
            tool.name.red()
        );
        Outcome::Failed
    }
}

/// Returns a usable Homebrew, offering to install it the first time it is
/// found missing. The answer is remembered for the rest of the run.
fn homebrew<'s>(
    env: &Environment,
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
    state: &'s mut BrewState,
) -> Option<&'s Homebrew> {
    if matches!(state, BrewState::Unresolved) {
        let located = Homebrew::locate(runner).or_else(|| {
            if confirm_or_force(prompter, env, HOMEBREW_PROMPT, true)
                && brew::bootstrap(runner, env.force_yes)
            {
                let after_install = Homebrew::locate(runner);
                if after_install.is_none() {
                    log_warn!("[Brew] Homebrew installed but `brew` could not be found.");
                }
                after_install
            } else {
                None
            }
        });
        *state = match located {
            Some(found) => BrewState::Available(found),
            None => BrewState::Unavailable,
        };
    }
    match state {
        BrewState::Available(found) => Some(found),
        _ => None,
    }
}

fn run_install(runner: &dyn CommandRunner, command: &str) -> bool {
    log_debug!("[Tools] Running: {}", command.dimmed());
    match runner.run(command, OutputMode::Inherit) {
        Ok(status) if status.success() => true,
        Ok(status) => {
            log_debug!("[Tools] `{}` exited with {}", command, status);
            false
        }
        Err(e) => {
            log_warn!("[Tools] Could not start `{}`: {}", command, e);
            false
        }
    }
}
