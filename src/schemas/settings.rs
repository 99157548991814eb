// Optional user settings, read from `config.yaml` in the kubed home.
//
// Example:
//
// ```yaml
// force_yes: true
// skip_framework: false
// skip_tools:
//   - docker
// ```

use serde::{Deserialize, Serialize};

/// Settings that tweak a `kubed setup` run. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Same as passing `--yes`.
    pub force_yes: bool,
    /// Same as passing `--skip-framework`.
    pub skip_framework: bool,
    /// Tools that are never installed; they are reported as skipped.
    pub skip_tools: Vec<String>,
}
