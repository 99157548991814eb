// `kubed completions-path` and `kubed aliases-path`.
//
// Both print a single path on stdout so they can be used as `$(kubed ...)`
// from the shell setup block. Errors go to stderr with exit status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::errors::KubedError;
use crate::libs::environment::Environment;
use crate::libs::probe::detect_shell;
use crate::schemas::shell_profile::ShellKind;
use crate::{log_debug, log_error};

/// `<kubed home>/completions/<shell>` for the shell named by `SHELL`.
///
/// # Arguments
///
/// * `env` - Supplies `SHELL`, the home directory and `KUBED_HOME`.
///
/// # Returns
///
/// The directory path, or an error when the shell is unset or unsupported
/// or the home directory is unknown.
pub fn completions_path(env: &Environment) -> Result<PathBuf> {
    let name = detect_shell(env).ok_or(KubedError::ShellUndetected)?;
    let shell = ShellKind::from_name(&name).ok_or(KubedError::UnsupportedShell(name))?;
    let kubed_home = env.kubed_home().ok_or(KubedError::HomeNotFound)?;
    Ok(kubed_home.join("completions").join(shell.name()))
}

/// `<kubed home>/aliases`.
pub fn aliases_path(env: &Environment) -> Result<PathBuf> {
    let kubed_home = env.kubed_home().ok_or(KubedError::HomeNotFound)?;
    Ok(kubed_home.join("aliases"))
}

pub fn run_completions_path() -> ExitCode {
    let env = Environment::from_process(false);
    print_path(
        completions_path(&env).context("Could not determine shell or completions directory"),
    )
}

pub fn run_aliases_path() -> ExitCode {
    let env = Environment::from_process(false);
    print_path(aliases_path(&env).context("Could not determine aliases directory"))
}

fn print_path(resolved: Result<PathBuf>) -> ExitCode {
    match resolved {
        Ok(path) => {
            log_debug!("[Paths] Resolved {}", path.display());
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn env(shell: Option<&str>) -> Environment {
        Environment {
            shell: shell.map(str::to_string),
            home: Some(PathBuf::from("/home/dev")),
            ..Default::default()
        }
    }

    #[test]
    fn test_completions_path_follows_shell() {
        assert_eq!(
            completions_path(&env(Some("/bin/zsh"))).unwrap(),
            Path::new("/home/dev/.kubed/completions/zsh")
        );
        assert_eq!(
            completions_path(&env(Some("/usr/local/bin/fish"))).unwrap(),
            Path::new("/home/dev/.kubed/completions/fish")
        );
    }

    #[test]
    fn test_completions_path_needs_a_supported_shell() {
        let unset = completions_path(&env(None)).unwrap_err();
        assert!(matches!(
            unset.downcast_ref::<KubedError>(),
            Some(KubedError::ShellUndetected)
        ));

        let tcsh = completions_path(&env(Some("/bin/tcsh"))).unwrap_err();
        assert!(tcsh.to_string().contains("tcsh"));
    }

    #[test]
    fn test_aliases_path_honours_kubed_home() {
        assert_eq!(
            aliases_path(&env(None)).unwrap(),
            Path::new("/home/dev/.kubed/aliases")
        );
        let custom = Environment {
            kubed_home: Some(PathBuf::from("/opt/kubed")),
            ..env(None)
        };
        assert_eq!(aliases_path(&custom).unwrap(), Path::new("/opt/kubed/aliases"));
    }

    #[test]
    fn test_missing_home_is_an_error() {
        let homeless = Environment {
            shell: Some("/bin/bash".to_string()),
            ..Default::default()
        };
        assert!(aliases_path(&homeless).is_err());
        assert!(completions_path(&homeless).is_err());
    }
}
