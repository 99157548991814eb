//! oh-my-zsh and the Powerlevel10k theme.
//!
//! Installation is driven through the [`CommandRunner`]; the `.zshrc` edits
//! are pure string functions so they can be applied with
//! `shell_configurator::rewrite_config` and tested without a file.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::libs::runner::{CommandRunner, OutputMode};
use crate::{log_debug, log_info, log_warn};

/// Unattended oh-my-zsh installer. `RUNZSH=no` keeps it from replacing the
/// current process with zsh and `CHSH=no` from changing the login shell.
pub const OH_MY_ZSH_INSTALL_COMMAND: &str = r#"RUNZSH=no CHSH=no sh -c "$(curl -fsSL https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh)" "" --unattended"#;

const POWERLEVEL10K_REPOSITORY: &str = "https://github.com/romkatv/powerlevel10k.git";

/// Value of `ZSH_THEME` that selects Powerlevel10k.
pub const P10K_THEME_LINE: &str = r#"ZSH_THEME="powerlevel10k/powerlevel10k""#;

const OH_MY_ZSH_SOURCE_LINE: &str = "source $ZSH/oh-my-zsh.sh";

pub fn oh_my_zsh_dir(home: &Path) -> PathBuf {
    home.join(".oh-my-zsh")
}

pub fn powerlevel10k_dir(home: &Path) -> PathBuf {
    oh_my_zsh_dir(home)
        .join("custom")
        .join("themes")
        .join("powerlevel10k")
}

/// Whether a step had to do anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    AlreadyInstalled,
    Installed,
    Failed,
}

impl StepResult {
    pub fn succeeded(self) -> bool {
        self != StepResult::Failed
    }
}

/// Installs oh-my-zsh into `~/.oh-my-zsh` unless that directory exists.
pub fn install_oh_my_zsh(runner: &dyn CommandRunner, home: &Path) -> StepResult {
    if oh_my_zsh_dir(home).is_dir() {
        log_info!("[Framework] oh-my-zsh is already installed, continuing with configuration...");
        return StepResult::AlreadyInstalled;
    }
    log_info!("[Framework] Installing {}...", "oh-my-zsh".bold());
    run_step(runner, OH_MY_ZSH_INSTALL_COMMAND, "oh-my-zsh")
}

/// Clones Powerlevel10k into the oh-my-zsh custom themes directory unless it
/// is already there.
pub fn install_powerlevel10k(runner: &dyn CommandRunner, home: &Path) -> StepResult {
    let theme_dir = powerlevel10k_dir(home);
    if theme_dir.is_dir() {
        log_info!("[Framework] Powerlevel10k theme is already installed.");
        return StepResult::AlreadyInstalled;
    }
    log_info!("[Framework] Installing {} theme...", "Powerlevel10k".bold());
    let command = format!(
        "git clone --depth=1 {POWERLEVEL10K_REPOSITORY} '{}'",
        theme_dir.display()
    );
    run_step(runner, &command, "Powerlevel10k")
}

fn run_step(runner: &dyn CommandRunner, command: &str, what: &str) -> StepResult {
    match runner.run(command, OutputMode::Inherit) {
        Ok(status) if status.success() => {
            log_info!("[Framework] {} installed successfully.", what.green());
            StepResult::Installed
        }
        Ok(status) => {
            log_warn!("[Framework] Failed to install {} ({})", what.yellow(), status);
            StepResult::Failed
        }
        Err(e) => {
            log_warn!("[Framework] Could not start the {} installer: {}", what.yellow(), e);
            StepResult::Failed
        }
    }
}

/// Adds `kubectl` to the oh-my-zsh `plugins=(...)` list.
///
/// Returns `None` when the plugin is already enabled. Without a `plugins=`
/// line a new one is inserted before oh-my-zsh is sourced (or appended).
pub fn enable_kubectl_plugin(content: &str) -> Option<String> {
    let Some(start) = find_assignment(content, "plugins=(") else {
        return Some(insert_before_oh_my_zsh(content, "plugins=(kubectl)"));
    };
    let list_start = start + "plugins=(".len();
    let list_end = content[list_start..]
        .find(')')
        .map_or(content.len(), |offset| list_start + offset);
    if content[list_start..list_end]
        .split_whitespace()
        .any(|plugin| plugin == "kubectl")
    {
        log_debug!("[Framework] kubectl plugin already enabled");
        return None;
    }

    let separator = if content[list_start..list_end].trim().is_empty() {
        ""
    } else {
        " "
    };
    let mut updated = String::with_capacity(content.len() + 8);
    updated.push_str(&content[..list_start]);
    updated.push_str("kubectl");
    updated.push_str(separator);
    updated.push_str(content[list_start..].trim_start_matches([' ', '\t']));
    Some(updated)
}

/// Points `ZSH_THEME` at Powerlevel10k.
///
/// Every existing `ZSH_THEME=` assignment is replaced. Returns `None` when the
/// theme is already selected and no other theme is assigned.
pub fn select_p10k_theme(content: &str) -> Option<String> {
    let mut found = false;
    let mut changed = false;
    let lines: Vec<String> = content
        .lines()
        .map(|line| {
            if line.trim_start().starts_with("ZSH_THEME=") {
                found = true;
                if line.trim() != P10K_THEME_LINE {
                    changed = true;
                    return P10K_THEME_LINE.to_string();
                }
            }
            line.to_string()
        })
        .collect();

    if !found {
        return Some(insert_before_oh_my_zsh(content, P10K_THEME_LINE));
    }
    if !changed {
        return None;
    }
    let mut updated = lines.join("\n");
    if content.ends_with('\n') {
        updated.push('\n');
    }
    Some(updated)
}

/// Byte offset of an uncommented line starting with `prefix`.
fn find_assignment(content: &str, prefix: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        if line.trim_start().starts_with(prefix) {
            return Some(offset + indent);
        }
        offset += line.len();
    }
    None
}

/// Puts `line` just before `source $ZSH/oh-my-zsh.sh` so oh-my-zsh sees it,
/// or at the end of the file when oh-my-zsh is not sourced.
fn insert_before_oh_my_zsh(content: &str, line: &str) -> String {
    match find_assignment(content, OH_MY_ZSH_SOURCE_LINE) {
        Some(at) => format!("{}{}\n{}", &content[..at], line, &content[at..]),
        None => {
            let separator = if content.is_empty() || content.ends_with('\n') {
                ""
            } else {
                "\n"
            };
            format!("{content}{separator}\n# Added by kubed\n{line}\n")
        }
    }
}
