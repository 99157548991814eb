// Record of one `kubed setup` run, built up stage by stage by the orchestrator
// and rendered by `libs::report`.

use std::fmt;

use crate::errors::KubedError;
use crate::libs::templates::TemplateReport;
use crate::schemas::mutation::MutationResult;
use crate::schemas::shell_profile::ShellProfile;

/// Stages of the setup workflow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ProbeShell,
    InstallTools,
    ConfigureShellFramework,
    WriteTemplates,
    PatchConfig,
    ReportFollowUp,
    /// Terminal state when the shell or its startup file is unknown.
    ManualSetupRequired,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ProbeShell => "probe shell",
            Stage::InstallTools => "install tools",
            Stage::ConfigureShellFramework => "configure shell framework",
            Stage::WriteTemplates => "write templates",
            Stage::PatchConfig => "patch config",
            Stage::ReportFollowUp => "report follow-up",
            Stage::ManualSetupRequired => "manual setup required",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
pub struct SetupReport {
    /// Stages entered, in order.
    pub stages: Vec<Stage>,
    pub profile: Option<ShellProfile>,
    pub tools: Vec<MutationResult>,
    /// `None` when the framework stage was skipped or does not apply.
    pub framework: Option<MutationResult>,
    pub templates: Option<TemplateReport>,
    /// Whether the setup block was appended during this run.
    pub block_added: bool,
    pub patch_error: Option<KubedError>,
    /// Whether the startup file differs from how the run found it.
    pub config_changed: bool,
    /// `Some(true)` when the updated config was sourced successfully.
    pub sourced: Option<bool>,
}

impl SetupReport {
    pub fn entered(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    pub fn needs_manual_setup(&self) -> bool {
        self.entered(Stage::ManualSetupRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names_read_as_a_trail() {
        let trail = [Stage::ProbeShell, Stage::ManualSetupRequired]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        assert_eq!(trail, "probe shell -> manual setup required");
    }
}
