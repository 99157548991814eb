// End-of-run output for `kubed setup`: the summary table, the restart banner,
// the offer to source the updated startup file, and the instructions printed
// when the shell could not be configured automatically.

use std::path::Path;

use colored::Colorize;
use prettytable::{Cell, Row, Table, format};

use crate::libs::environment::Environment;
use crate::libs::prompter::{Prompter, confirm_or_force};
use crate::libs::runner::CommandRunner;
use crate::libs::shell_configurator::{render_setup_block, source_config};
use crate::schemas::mutation::{MutationResult, Outcome};
use crate::schemas::setup_report::SetupReport;
use crate::schemas::shell_profile::{ShellKind, ShellProfile};
use crate::{log_info, log_warn};

const BANNER_WIDTH: usize = 78;

fn outcome_style(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::AlreadyPresent => "Fb",
        Outcome::InstalledPrimary | Outcome::InstalledFallback => "Fg",
        Outcome::Failed => "Fr",
        Outcome::SkippedByUser => "Fy",
    }
}

fn result_row(kind: &str, result: &MutationResult) -> Row {
    Row::new(vec![
        Cell::new(kind),
        Cell::new(&result.target).style_spec("b"),
        Cell::new(result.outcome.label()).style_spec(outcome_style(result.outcome)),
    ])
}

/// Builds the summary of everything the run did.
///
/// # Arguments
///
/// * `report` - The finished (or partially finished) run.
///
/// # Returns
///
/// One row per tool, then the framework, templates and shell config rows
/// for the stages that ran.
pub fn summary_table(report: &SetupReport) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("Step").style_spec("b"),
        Cell::new("Target").style_spec("b"),
        Cell::new("Result").style_spec("b"),
    ]));

    for tool in &report.tools {
        table.add_row(result_row("tool", tool));
    }
    if let Some(framework) = &report.framework {
        table.add_row(result_row("framework", framework));
    }
    if let Some(templates) = &report.templates {
        let (text, style) = if templates.is_complete() {
            (format!("{} written", templates.written.len()), "Fg")
        } else {
            (
                format!(
                    "{} written, {} failed",
                    templates.written.len(),
                    templates.failures.len()
                ),
                "Fr",
            )
        };
        table.add_row(Row::new(vec![
            Cell::new("templates"),
            Cell::new("aliases & completions").style_spec("b"),
            Cell::new(&text).style_spec(style),
        ]));
    }
    if let Some(profile) = &report.profile {
        let (text, style) = match (&report.patch_error, report.block_added) {
            (Some(_), _) => ("failed", "Fr"),
            (None, true) => ("updated", "Fg"),
            (None, false) => ("already configured", "Fb"),
        };
        table.add_row(Row::new(vec![
            Cell::new("shell config"),
            Cell::new(&profile.config_path.display().to_string()).style_spec("b"),
            Cell::new(text).style_spec(style),
        ]));
    }
    table
}

pub fn print_summary(report: &SetupReport) {
    println!();
    summary_table(report).printstd();
}

fn banner_line(text: &str) -> String {
    format!("!{:^width$}!", text, width = BANNER_WIDTH)
}

/// Renders the "restart your terminal" banner.
///
/// # Arguments
///
/// * `config_path` - The startup file the user has to source or reload.
///
/// # Returns
///
/// The banner as a block of lines, each `BANNER_WIDTH + 2` characters wide.
pub fn restart_banner(config_path: &Path) -> String {
    let border = "!".repeat(BANNER_WIDTH + 2);
    let lines = [
        border.clone(),
        banner_line(""),
        banner_line("IMPORTANT STEP REQUIRED"),
        banner_line(""),
        banner_line("You MUST restart your terminal or run the following command:"),
        banner_line(&format!("source {}", config_path.display())),
        banner_line(""),
        banner_line("Without this step, kubed will NOT work correctly!"),
        banner_line(""),
        border,
    ];
    lines.join("\n")
}

/// The restart banner for this run, or `None` when the startup file was left
/// as it was and open terminals already have everything they need.
pub fn restart_notice(report: &SetupReport) -> Option<String> {
    let profile = report.profile.as_ref()?;
    report
        .config_changed
        .then(|| restart_banner(&profile.config_path))
}

pub fn print_restart_notice(report: &SetupReport) {
    match restart_notice(report) {
        Some(banner) => println!("\n{}\n", banner.bright_yellow().bold()),
        None => {
            if let Some(profile) = &report.profile {
                log_info!(
                    "[Setup] {} unchanged; no terminal restart needed",
                    profile.config_path.display().to_string().cyan()
                );
            }
        }
    }
}

/// Offers to source the updated startup file.
///
/// Sourcing only checks that the file loads in a fresh shell; the calling
/// terminal still has to be restarted or source it itself.
///
/// # Arguments
///
/// * `env` - Process environment; `force_yes` skips the question.
/// * `runner` - Runs `<shell> -c 'source <rc>'`.
/// * `prompter` - Asks whether to source.
/// * `profile` - The shell and startup file that were patched.
///
/// # Returns
///
/// `true` only when the user accepted and the file sourced cleanly.
pub fn offer_to_source(
    env: &Environment,
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
    profile: &ShellProfile,
) -> bool {
    if !confirm_or_force(
        prompter,
        env,
        "Do you want me to run the source command for you?",
        true,
    ) {
        println!(
            "{}",
            "Please restart your terminal or run the source command manually."
                .yellow()
                .bold()
        );
        return false;
    }

    log_info!(
        "[Setup] Running: source {}",
        profile.config_path.display()
    );
    match source_config(runner, profile.shell.name(), &profile.config_path) {
        Ok(()) => {
            println!("{}", "Successfully sourced changes!".green());
            println!("{}", "kubed is ready to use in new terminals.".green().bold());
            true
        }
        Err(e) => {
            log_warn!("[Setup] Failed to source changes: {}", e);
            println!(
                "{}",
                "Please restart your terminal or run the source command manually."
                    .red()
                    .bold()
            );
            false
        }
    }
}

/// What to do by hand when the shell or its startup file is unknown.
///
/// # Arguments
///
/// * `env` - Used for the `SHELL` value and the kubed home shown to the user.
///
/// # Returns
///
/// Instructions followed by ready-to-paste setup blocks for bash/zsh and fish.
pub fn manual_setup_instructions(env: &Environment) -> String {
    let shell = env.shell.as_deref().unwrap_or("<unset>");
    let kubed_home = env
        .kubed_home()
        .map_or_else(|| "~/.kubed".to_string(), |p| p.display().to_string());
    format!(
        "kubed could not configure your shell automatically (SHELL={shell}).\n\
         Run `kubed setup` from bash, zsh or fish, or add one of these blocks to your shell startup file by hand.\n\
         Aliases and completions are expected under {kubed_home}.\n\n\
         bash (~/.bashrc) or zsh (~/.zshrc):{}\n\
         fish (~/.config/fish/config.fish):{}",
        render_setup_block(ShellKind::Bash),
        render_setup_block(ShellKind::Fish),
    )
}

pub fn print_manual_setup(env: &Environment) {
    println!("\n{}", "Manual setup required".red().bold());
    println!("{}", manual_setup_instructions(env));
}
