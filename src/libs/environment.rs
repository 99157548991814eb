// Ambient process state (SHELL, HOME, KUBED_HOME, force-yes) captured once at
// startup and passed to every component, so nothing below `main` reads
// environment variables directly.

use std::env;
use std::path::PathBuf;

use colored::Colorize;

use crate::log_debug;

/// Name of the per-user kubed directory under `$HOME`.
pub const KUBED_DIR_NAME: &str = ".kubed";

/// Snapshot of the environment kubed runs in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Raw value of `SHELL` (e.g. `/bin/zsh`), if set.
    pub shell: Option<String>,
    /// The user's home directory.
    pub home: Option<PathBuf>,
    /// Explicit kubed home from `KUBED_HOME`, already tilde-expanded.
    pub kubed_home: Option<PathBuf>,
    /// Answer "yes" to every prompt.
    pub force_yes: bool,
}

impl Environment {
    /// Reads `SHELL`, `KUBED_HOME` and the home directory of the current process.
    pub fn from_process(force_yes: bool) -> Self {
        let environment = Self {
            shell: env::var("SHELL").ok(),
            home: dirs::home_dir(),
            kubed_home: env::var("KUBED_HOME")
                .ok()
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| PathBuf::from(shellexpand::tilde(&raw).into_owned())),
            force_yes,
        };
        log_debug!("[Environment] {:?}", environment);
        environment
    }

    /// Directory holding `bin/`, `completions/` and `aliases/`.
    ///
    /// `KUBED_HOME` wins; otherwise `~/.kubed`. `None` when neither is known.
    pub fn kubed_home(&self) -> Option<PathBuf> {
        let resolved = self
            .kubed_home
            .clone()
            .or_else(|| self.home.as_ref().map(|home| home.join(KUBED_DIR_NAME)));
        if let Some(path) = &resolved {
            log_debug!("[Environment] kubed home: {}", path.display().to_string().cyan());
        }
        resolved
    }
}
