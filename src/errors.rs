//! Error types shared by the setup components.
//!
//! None of these abort a `kubed setup` run: the orchestrator logs them and
//! moves on to the next step. They only surface as a non-zero exit status
//! through the path queries.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::libs::runner::CommandStatus;

#[derive(Debug, Error)]
pub enum KubedError {
    /// The shell startup file could not be opened or read.
    #[error("could not read shell config {}: {source}", path.display())]
    ConfigUnreadable { path: PathBuf, source: io::Error },

    /// The shell startup file could not be created or written.
    #[error("could not write shell config {}: {source}", path.display())]
    ConfigWrite { path: PathBuf, source: io::Error },

    /// A generated alias/completion file could not be written.
    #[error("could not write {}: {source}", path.display())]
    TemplateWrite { path: PathBuf, source: io::Error },

    #[error("could not determine the home directory")]
    HomeNotFound,

    /// `SHELL` is unset or empty.
    #[error("could not determine the current shell (SHELL is not set)")]
    ShellUndetected,

    #[error("unsupported shell '{0}' (supported: bash, zsh, fish)")]
    UnsupportedShell(String),

    /// An external command ran but exited unsuccessfully.
    #[error("`{command}` failed with {status}")]
    CommandFailed {
        command: String,
        status: CommandStatus,
    },

    /// An external command could not be started at all.
    #[error("could not start `{command}`: {source}")]
    CommandLaunch { command: String, source: io::Error },

    #[error("invalid settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
