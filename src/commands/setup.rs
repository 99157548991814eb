// `kubed setup`: the Setup Orchestrator.
//
// Stages run strictly in order:
//   ProbeShell -> InstallTools -> ConfigureShellFramework -> WriteTemplates
//   -> PatchConfig -> ReportFollowUp
// A failed probe ends the run in ManualSetupRequired. Every other failure is
// logged, recorded in the report, and the next stage still runs.

use std::fmt::Debug;
use std::fs;
use std::process::ExitCode;

use colored::Colorize;
use serde::Serialize;

use crate::errors::KubedError;
use crate::libs::config_loading::load_settings;
use crate::libs::environment::Environment;
use crate::libs::framework_installer::configure_shell_framework;
use crate::libs::probe::{config_file_for, probe_shell};
use crate::libs::prompter::{Prompter, TerminalPrompter};
use crate::libs::report::{
    offer_to_source, print_manual_setup, print_restart_notice, print_summary,
};
use crate::libs::runner::{CommandRunner, ShellRunner};
use crate::libs::shell_configurator::{
    SETUP_BLOCK_MARKER, ensure_block, ensure_config_file, render_setup_block,
};
use crate::libs::templates;
use crate::libs::tool_installer::install_missing_tools;
use crate::libs::utilities::platform::Platform;
use crate::schemas::mutation::Outcome;
use crate::schemas::setup_report::{SetupReport, Stage};
use crate::schemas::shell_profile::{ShellKind, ShellProfile};
use crate::schemas::tools::{ToolSpec, default_catalog};
use crate::{log_debug, log_error, log_info, log_warn};

/// Knobs for one run, merged from the command line and `config.yaml`.
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Configure zsh whatever `SHELL` says.
    pub prefer_zsh: bool,
    pub skip_framework: bool,
    pub skip_tools: Vec<String>,
    pub catalog: Vec<ToolSpec>,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            prefer_zsh: false,
            skip_framework: false,
            skip_tools: Vec::new(),
            catalog: default_catalog(Platform::current()),
        }
    }
}

/// Entry point for `kubed setup`. Always exits successfully: problems are
/// reported in the summary, not through the exit status.
pub fn run(force_yes: bool, zsh: bool, skip_framework: bool) -> ExitCode {
    log_debug!("Entered setup::run() function.");
    let mut env = Environment::from_process(force_yes);
    let settings = env
        .kubed_home()
        .map(|home| load_settings(&home))
        .unwrap_or_default();

    env.force_yes |= settings.force_yes;
    if env.force_yes {
        log_info!(
            "'{}' is set, answering yes to every prompt",
            "force yes".bright_yellow()
        );
    }
    let options = SetupOptions {
        prefer_zsh: zsh,
        skip_framework: skip_framework || settings.skip_framework,
        skip_tools: settings.skip_tools,
        ..Default::default()
    };

    let report = run_setup(&env, &ShellRunner, &TerminalPrompter, &options);
    if report.needs_manual_setup() {
        log_warn!("'kubed setup' finished without configuring a shell");
    } else {
        log_info!("'kubed setup' command completed!!");
    }
    log_debug!(
        "[Setup] Stages: {}",
        report
            .stages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    );
    ExitCode::SUCCESS
}

/// Pretty-prints `value` as JSON under `--debug`.
fn debug_dump<T: Serialize + Debug>(label: &str, value: &T) {
    if !crate::logger::is_debug_enabled() {
        return;
    }
    match serde_json::to_string_pretty(value) {
        Ok(pretty) => log_debug!("[Setup] {}:\n{}", label, pretty),
        Err(e) => log_debug!("[Setup] {}: {:?} ({})", label, value, e),
    }
}

/// Shell profile for this run. `--zsh` overrides `SHELL`.
fn probe_profile(env: &Environment, prefer_zsh: bool) -> Option<ShellProfile> {
    if prefer_zsh {
        log_info!("[Setup] Configuring {} as requested", "zsh".bold());
        return config_file_for(env, ShellKind::Zsh.name()).map(|config_path| ShellProfile {
            shell: ShellKind::Zsh,
            config_path,
            marker: SETUP_BLOCK_MARKER,
        });
    }
    probe_shell(env)
}

/// Runs the whole workflow against the given collaborators.
///
/// Only failing to detect the shell stops the run early. Tool, framework, template
/// and patch failures are recorded and the follow-up report is still shown.
///
/// # Arguments
///
/// * `env` - Process environment captured once by the caller.
/// * `runner` - Executes install, check and source commands.
/// * `prompter` - Answers yes/no questions unless `env.force_yes` is set.
/// * `options` - Tool catalog plus the zsh, framework and skip-list knobs.
///
/// # Returns
///
/// A `SetupReport` listing the stages entered and what each one did.
pub fn run_setup(
    env: &Environment,
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
    options: &SetupOptions,
) -> SetupReport {
    let mut report = SetupReport::default();
    log_info!("[Setup] Setting up {}...", "kubed".bold());
    debug_dump("Tool catalog", &options.catalog);

    // ProbeShell
    report.stages.push(Stage::ProbeShell);
    let Some(profile) = probe_profile(env, options.prefer_zsh) else {
        log_error!("[Setup] Could not determine your shell or its startup file.");
        report.stages.push(Stage::ManualSetupRequired);
        print_manual_setup(env);
        return report;
    };
    log_info!(
        "[Setup] Configuring {} via {}",
        profile.shell.to_string().bold(),
        profile.config_path.display().to_string().cyan()
    );
    debug_dump("Shell profile", &profile);
    let config_before = fs::read_to_string(&profile.config_path).ok();
    report.profile = Some(profile.clone());

    // InstallTools
    report.stages.push(Stage::InstallTools);
    report.tools = install_missing_tools(
        env,
        runner,
        prompter,
        &options.catalog,
        &options.skip_tools,
    );

    let installed = report.tools.iter().filter(|t| t.outcome.is_change()).count();
    log_debug!("[Setup] {} tool(s) installed this run", installed);
    debug_dump("Tool results", &report.tools);

    // ConfigureShellFramework
    if options.skip_framework {
        log_info!("[Setup] Skipping shell framework setup");
    } else {
        report.stages.push(Stage::ConfigureShellFramework);
        report.framework = configure_shell_framework(env, runner, &profile);
    }

    // WriteTemplates
    report.stages.push(Stage::WriteTemplates);
    match env.kubed_home() {
        Some(kubed_home) => report.templates = Some(templates::write_all(&kubed_home)),
        None => log_error!("[Templates] {}", KubedError::HomeNotFound),
    }

    // PatchConfig
    report.stages.push(Stage::PatchConfig);
    match patch_config(&profile) {
        Ok(added) => {
            report.block_added = added;
            if added {
                log_info!(
                    "[Setup] Added kubed setup to {}",
                    profile.config_path.display().to_string().cyan()
                );
            } else {
                log_info!(
                    "[Setup] kubed is already set up in {}",
                    profile.config_path.display().to_string().cyan()
                );
            }
        }
        Err(e) => {
            log_error!("[Setup] {}", e);
            report.patch_error = Some(e);
        }
    }
    report.config_changed = fs::read_to_string(&profile.config_path).ok() != config_before;

    // ReportFollowUp
    report.stages.push(Stage::ReportFollowUp);
    print_summary(&report);
    print_restart_notice(&report);
    if report.config_changed {
        report.sourced = Some(offer_to_source(env, runner, prompter, &profile));
    } else {
        log_debug!("[Setup] Startup file unchanged; nothing to source");
    }
    if report.tools.iter().any(|t| t.outcome == Outcome::Failed) {
        log_warn!("[Setup] Some tools could not be installed; see the summary above.");
    }
    report
}

/// Creates the startup file when needed and appends the setup block once.
fn patch_config(profile: &ShellProfile) -> Result<bool, KubedError> {
    ensure_config_file(&profile.config_path)?;
    ensure_block(
        &profile.config_path,
        profile.marker,
        &render_setup_block(profile.shell),
    )
}
