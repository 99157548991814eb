// Per-step results collected during one `kubed setup` run.
// They are only used for the end-of-run summary and are never persisted.

use std::fmt;

use serde::Serialize;

/// What happened to a single tool (or the shell framework).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// The check succeeded; nothing was installed.
    AlreadyPresent,
    /// Installed with the primary method (Homebrew / oh-my-zsh / Starship).
    InstalledPrimary,
    /// The primary method failed or was unavailable; the fallback worked.
    InstalledFallback,
    /// Both methods failed.
    Failed,
    /// The user said "no" (or listed the tool in `skip_tools`).
    SkippedByUser,
}

impl Outcome {
    /// Whether this step changed the machine.
    pub fn is_change(self) -> bool {
        matches!(self, Outcome::InstalledPrimary | Outcome::InstalledFallback)
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::AlreadyPresent => "already present",
            Outcome::InstalledPrimary => "installed",
            Outcome::InstalledFallback => "installed (fallback)",
            Outcome::Failed => "failed",
            Outcome::SkippedByUser => "skipped",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one step, keyed by the tool or component it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationResult {
    pub target: String,
    pub outcome: Outcome,
}

impl MutationResult {
    pub fn new(target: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            target: target.into(),
            outcome,
        }
    }
}
