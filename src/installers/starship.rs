// Starship prompt for fish.

use colored::Colorize;

use crate::installers::oh_my_zsh::StepResult;
use crate::libs::runner::{CommandRunner, OutputMode};
use crate::{log_info, log_warn};

const STARSHIP_INSTALL_SCRIPT: &str = "curl -sS https://starship.rs/install.sh | sh -s --";

/// Line whose presence in `config.fish` means Starship is initialized.
pub const STARSHIP_INIT_MARKER: &str = "starship init fish";

/// Block appended to `config.fish`.
pub const STARSHIP_INIT_BLOCK: &str = "\n# Initialize Starship prompt\nstarship init fish | source\n";

/// Install command; `--yes` skips the script's own confirmation.
pub fn install_command(non_interactive: bool) -> String {
    if non_interactive {
        format!("{STARSHIP_INSTALL_SCRIPT} --yes")
    } else {
        STARSHIP_INSTALL_SCRIPT.to_string()
    }
}

/// Installs Starship unless `starship` is already on `PATH`.
pub fn install_starship(runner: &dyn CommandRunner, non_interactive: bool) -> StepResult {
    if runner.is_on_path("starship") {
        log_info!("[Framework] Starship is already installed.");
        return StepResult::AlreadyInstalled;
    }
    log_info!("[Framework] Installing {}...", "Starship".bold());
    match runner.run(&install_command(non_interactive), OutputMode::Inherit) {
        Ok(status) if status.success() => {
            log_info!("[Framework] {}", "Starship installed successfully.".green());
            StepResult::Installed
        }
        Ok(status) => {
            log_warn!("[Framework] Failed to install Starship ({})", status);
            StepResult::Failed
        }
        Err(e) => {
            log_warn!("[Framework] Could not start the Starship installer: {}", e);
            StepResult::Failed
        }
    }
}
