// Shell framework stage.
//
// zsh gets oh-my-zsh with Powerlevel10k and the `kubectl` plugin; when that
// cannot be installed a small standalone `kubed` zsh plugin is used instead.
// fish gets Starship plus kubed's fish completions; without Starship only the
// completions are installed. bash has no framework step.

use std::path::Path;

use colored::Colorize;

use crate::errors::KubedError;
use crate::installers::oh_my_zsh::{
    self, StepResult, enable_kubectl_plugin, select_p10k_theme,
};
use crate::installers::starship::{self, STARSHIP_INIT_BLOCK, STARSHIP_INIT_MARKER};
use crate::libs::environment::Environment;
use crate::libs::runner::CommandRunner;
use crate::libs::shell_configurator::{ensure_block, ensure_config_file, rewrite_config};
use crate::libs::templates::write_template;
use crate::schemas::mutation::{MutationResult, Outcome};
use crate::schemas::shell_profile::{ShellKind, ShellProfile};
use crate::{log_error, log_info, log_warn};

const P10K_SOURCE_MARKER: &str = "[[ -f ~/.p10k.zsh ]] && source ~/.p10k.zsh";
const P10K_SOURCE_BLOCK: &str =
    "\n# Source Powerlevel10k configuration\n[[ -f ~/.p10k.zsh ]] && source ~/.p10k.zsh\n";

const ZSH_PLUGIN_MARKER: &str = "source ~/.zsh/plugins/kubed/kubed.plugin.zsh";
const ZSH_PLUGIN_BLOCK: &str = "\n# Added by kubed\nsource ~/.zsh/plugins/kubed/kubed.plugin.zsh\n";

const P10K_CONFIG: &str = include_str!("../templates/p10k.zsh");
const ZSH_PLUGIN: &str = include_str!("../templates/kubed.plugin.zsh");
const STARSHIP_CONFIG: &str = include_str!("../templates/starship.toml");
const FISH_COMPLETION: &str = include_str!("../templates/kubed_completion.fish");

/// Name the zsh framework is reported under.
pub const ZSH_FRAMEWORK: &str = "oh-my-zsh + powerlevel10k";
/// Name the fish framework is reported under.
pub const FISH_FRAMEWORK: &str = "starship";

/// Installs and wires up the framework for `profile.shell`.
///
/// zsh gets oh-my-zsh with Powerlevel10k, or the standalone kubed plugin when
/// oh-my-zsh cannot be installed. fish gets Starship, or completions only.
/// Every failure is logged and folded into the returned outcome.
///
/// # Arguments
///
/// * `env` - Supplies the home directory the frameworks live under.
/// * `runner` - Runs the install scripts and `git clone`.
/// * `profile` - The detected shell and its startup file.
///
/// # Returns
///
/// * `Some(MutationResult)` named after the framework.
/// * `None` for bash, or when the home directory is unknown.
pub fn configure_shell_framework(
    env: &Environment,
    runner: &dyn CommandRunner,
    profile: &ShellProfile,
) -> Option<MutationResult> {
    let Some(home) = env.home.as_deref() else {
        log_warn!("[Framework] Home directory unknown; skipping shell framework.");
        return None;
    };
    match profile.shell {
        ShellKind::Zsh => Some(MutationResult::new(
            ZSH_FRAMEWORK,
            configure_zsh(runner, home, &profile.config_path),
        )),
        ShellKind::Fish => Some(MutationResult::new(
            FISH_FRAMEWORK,
            configure_fish(env, runner, home, &profile.config_path),
        )),
        ShellKind::Bash => {
            log_info!("[Framework] No shell framework step for {}", profile.shell);
            None
        }
    }
}

fn configure_zsh(runner: &dyn CommandRunner, home: &Path, zshrc: &Path) -> Outcome {
    let framework = oh_my_zsh::install_oh_my_zsh(runner, home);
    let theme = if framework.succeeded() {
        oh_my_zsh::install_powerlevel10k(runner, home)
    } else {
        StepResult::Failed
    };

    if theme.succeeded() {
        match wire_oh_my_zsh(home, zshrc) {
            Ok(changed) => {
                let installed = framework == StepResult::Installed || theme == StepResult::Installed;
                return if installed || changed {
                    Outcome::InstalledPrimary
                } else {
                    Outcome::AlreadyPresent
                };
            }
            Err(e) => log_warn!("[Framework] Could not configure oh-my-zsh: {}", e),
        }
    }

    log_warn!(
        "[Framework] Falling back to the standalone {} zsh plugin",
        "kubed".bold()
    );
    match install_zsh_plugin(home, zshrc) {
        Ok(()) => Outcome::InstalledFallback,
        Err(e) => {
            log_error!("[Framework] {}", e);
            Outcome::Failed
        }
    }
}

/// Enables the `kubectl` plugin, selects Powerlevel10k and sources `~/.p10k.zsh`.
fn wire_oh_my_zsh(home: &Path, zshrc: &Path) -> Result<bool, KubedError> {
    ensure_config_file(zshrc)?;
    let plugin_added = rewrite_config(zshrc, enable_kubectl_plugin)?;
    let theme_selected = rewrite_config(zshrc, select_p10k_theme)?;
    if plugin_added || theme_selected {
        log_info!("[Framework] Updated .zshrc with kubectl plugin and Powerlevel10k theme.");
    }

    let p10k_config = home.join(".p10k.zsh");
    let wrote_config = if p10k_config.exists() {
        false
    } else {
        write_template(&p10k_config, P10K_CONFIG)?;
        log_info!("[Framework] Created minimal Powerlevel10k configuration.");
        true
    };
    let sourced = ensure_block(zshrc, P10K_SOURCE_MARKER, P10K_SOURCE_BLOCK)?;
    Ok(plugin_added || theme_selected || wrote_config || sourced)
}

fn install_zsh_plugin(home: &Path, zshrc: &Path) -> Result<(), KubedError> {
    let plugin = home
        .join(".zsh")
        .join("plugins")
        .join("kubed")
        .join("kubed.plugin.zsh");
    write_template(&plugin, ZSH_PLUGIN)?;
    ensure_config_file(zshrc)?;
    ensure_block(zshrc, ZSH_PLUGIN_MARKER, ZSH_PLUGIN_BLOCK)?;
    Ok(())
}

fn configure_fish(
    env: &Environment,
    runner: &dyn CommandRunner,
    home: &Path,
    config_fish: &Path,
) -> Outcome {
    let starship_step = starship::install_starship(runner, env.force_yes);
    let completion = home
        .join(".config")
        .join("fish")
        .join("completions")
        .join("kubed.fish");

    if starship_step.succeeded() {
        match wire_starship(home, config_fish, &completion) {
            Ok(changed) if changed || starship_step == StepResult::Installed => {
                log_info!("[Framework] {}", "Fish shell configured with Starship.".green());
                return Outcome::InstalledPrimary;
            }
            Ok(_) => return Outcome::AlreadyPresent,
            Err(e) => log_warn!("[Framework] Could not configure Starship: {}", e),
        }
    }

    log_warn!("[Framework] Installing kubed fish completions without Starship");
    match write_template(&completion, FISH_COMPLETION) {
        Ok(()) => Outcome::InstalledFallback,
        Err(e) => {
            log_error!("[Framework] {}", e);
            Outcome::Failed
        }
    }
}

/// Initializes Starship in `config.fish`, writes a default `starship.toml`
/// when there is none, and installs the kubed completions.
fn wire_starship(home: &Path, config_fish: &Path, completion: &Path) -> Result<bool, KubedError> {
    ensure_config_file(config_fish)?;
    let initialized = ensure_block(config_fish, STARSHIP_INIT_MARKER, STARSHIP_INIT_BLOCK)?;
    let starship_toml = home.join(".config").join("starship.toml");
    let wrote_config = if starship_toml.exists() {
        false
    } else {
        write_template(&starship_toml, STARSHIP_CONFIG)?;
        true
    };
    write_template(completion, FISH_COMPLETION)?;
    Ok(initialized || wrote_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shell_configurator::SETUP_BLOCK_MARKER;
    use crate::libs::testing::FakeRunner;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn profile(shell: ShellKind, config_path: PathBuf) -> ShellProfile {
        ShellProfile {
            shell,
            config_path,
            marker: SETUP_BLOCK_MARKER,
        }
    }

    fn env_for(home: &Path) -> Environment {
        Environment {
            home: Some(home.to_path_buf()),
            force_yes: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_bash_has_no_framework() {
        let home = tempdir().unwrap();
        let runner = FakeRunner::new();
        let result = configure_shell_framework(
            &env_for(home.path()),
            &runner,
            &profile(ShellKind::Bash, home.path().join(".bashrc")),
        );
        assert!(result.is_none());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_zsh_primary_path_configures_zshrc() {
        let home = tempdir().unwrap();
        let zshrc = home.path().join(".zshrc");
        fs::write(&zshrc, "ZSH_THEME=\"robbyrussell\"\nplugins=(git)\nsource $ZSH/oh-my-zsh.sh\n").unwrap();
        let runner = FakeRunner::new()
            .succeed("ohmyzsh/master/tools/install.sh")
            .succeed("git clone");

        let result = configure_shell_framework(
            &env_for(home.path()),
            &runner,
            &profile(ShellKind::Zsh, zshrc.clone()),
        )
        .unwrap();

        assert_eq!(result, MutationResult::new(ZSH_FRAMEWORK, Outcome::InstalledPrimary));
        let content = fs::read_to_string(&zshrc).unwrap();
        assert!(content.contains("plugins=(kubectl git)"));
        assert!(content.contains(oh_my_zsh::P10K_THEME_LINE));
        assert_eq!(content.matches(P10K_SOURCE_MARKER).count(), 1);
        assert!(home.path().join(".p10k.zsh").is_file());
    }

    #[test]
    fn test_zsh_second_run_reports_already_present() {
        let home = tempdir().unwrap();
        let zshrc = home.path().join(".zshrc");
        fs::create_dir_all(oh_my_zsh::powerlevel10k_dir(home.path())).unwrap();
        let runner = FakeRunner::new();
        let env = env_for(home.path());
        let zsh = profile(ShellKind::Zsh, zshrc.clone());

        let first = configure_shell_framework(&env, &runner, &zsh).unwrap();
        let after_first = fs::read_to_string(&zshrc).unwrap();
        let second = configure_shell_framework(&env, &runner, &zsh).unwrap();

        assert_eq!(first.outcome, Outcome::InstalledPrimary);
        assert_eq!(second.outcome, Outcome::AlreadyPresent);
        assert_eq!(fs::read_to_string(&zshrc).unwrap(), after_first);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_zsh_falls_back_to_standalone_plugin() {
        let home = tempdir().unwrap();
        let zshrc = home.path().join(".zshrc");
        let runner = FakeRunner::new().exit_with("ohmyzsh", 1);

        let result = configure_shell_framework(
            &env_for(home.path()),
            &runner,
            &profile(ShellKind::Zsh, zshrc.clone()),
        )
        .unwrap();

        assert_eq!(result.outcome, Outcome::InstalledFallback);
        assert_eq!(runner.count("git clone"), 0);
        assert!(
            home.path()
                .join(".zsh/plugins/kubed/kubed.plugin.zsh")
                .is_file()
        );
        let content = fs::read_to_string(&zshrc).unwrap();
        assert_eq!(content.matches(ZSH_PLUGIN_MARKER).count(), 1);
    }

    #[test]
    fn test_fish_with_starship() {
        let home = tempdir().unwrap();
        let config = home.path().join(".config/fish/config.fish");
        let runner = FakeRunner::new().succeed("starship.rs/install.sh");

        let result = configure_shell_framework(
            &env_for(home.path()),
            &runner,
            &profile(ShellKind::Fish, config.clone()),
        )
        .unwrap();

        assert_eq!(result, MutationResult::new(FISH_FRAMEWORK, Outcome::InstalledPrimary));
        assert!(runner.calls()[0].ends_with("--yes"));
        assert!(
            fs::read_to_string(&config)
                .unwrap()
                .contains("starship init fish | source")
        );
        assert!(home.path().join(".config/starship.toml").is_file());
        assert!(home.path().join(".config/fish/completions/kubed.fish").is_file());
    }

    #[test]
    fn test_existing_starship_config_is_kept() {
        let home = tempdir().unwrap();
        let toml = home.path().join(".config/starship.toml");
        fs::create_dir_all(toml.parent().unwrap()).unwrap();
        fs::write(&toml, "add_newline = false\n").unwrap();
        let runner = FakeRunner::new().with_program("starship");

        configure_shell_framework(
            &env_for(home.path()),
            &runner,
            &profile(ShellKind::Fish, home.path().join(".config/fish/config.fish")),
        );

        assert_eq!(fs::read_to_string(&toml).unwrap(), "add_newline = false\n");
    }

    #[test]
    fn test_fish_without_starship_only_writes_completions() {
        let home = tempdir().unwrap();
        let config = home.path().join(".config/fish/config.fish");
        let runner = FakeRunner::new().exit_with("starship.rs", 1);

        let result = configure_shell_framework(
            &env_for(home.path()),
            &runner,
            &profile(ShellKind::Fish, config.clone()),
        )
        .unwrap();

        assert_eq!(result.outcome, Outcome::InstalledFallback);
        assert!(!config.exists());
        assert!(home.path().join(".config/fish/completions/kubed.fish").is_file());
    }
}
