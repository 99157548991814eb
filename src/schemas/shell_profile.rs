// The shell kubed is configuring for this run.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Shells kubed knows how to configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
}

impl ShellKind {
    /// Parses a shell base name such as `zsh`. Unknown shells yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bash" => Some(ShellKind::Bash),
            "zsh" => Some(ShellKind::Zsh),
            "fish" => Some(ShellKind::Fish),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShellKind::Bash => "bash",
            ShellKind::Zsh => "zsh",
            ShellKind::Fish => "fish",
        }
    }

    /// Completion script for this shell, relative to the kubed home.
    pub fn completion_file(self) -> &'static str {
        match self {
            ShellKind::Bash => "completions/bash/bash_completions.sh",
            ShellKind::Zsh => "completions/zsh/zsh_completions.sh",
            ShellKind::Fish => "completions/fish/fish_completions.fish",
        }
    }

    /// Alias file for this shell, relative to the kubed home.
    pub fn aliases_file(self) -> &'static str {
        match self {
            ShellKind::Fish => "aliases/aliases.fish",
            _ => "aliases/aliases.sh",
        }
    }

    /// Help-wrapper script for this shell, relative to the kubed home.
    pub fn help_wrapper_file(self) -> &'static str {
        match self {
            ShellKind::Fish => "aliases/help_wrapper.fish",
            _ => "aliases/help_wrapper.sh",
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the later stages need to know about the user's shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellProfile {
    pub shell: ShellKind,
    /// Startup file the setup block is appended to.
    pub config_path: PathBuf,
    /// Text whose presence in `config_path` means the block was already added.
    pub marker: &'static str,
}
