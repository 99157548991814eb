// Static descriptors for the command-line tools kubed manages.
//
// Each `ToolSpec` says how to detect a tool and how to install it: first with
// Homebrew, then with a direct download when Homebrew is unavailable or fails.
// The catalog is rebuilt on every run and never mutated.

use serde::Serialize;

use crate::libs::utilities::platform::Platform;

/// Terraform release used by the direct-download fallback.
pub const TERRAFORM_FALLBACK_VERSION: &str = "1.7.5";

/// Describes one external CLI dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    /// Name shown to the user and used in `skip_tools`.
    pub name: String,
    /// Command whose zero exit status means the tool is installed.
    pub check_command: String,
    /// Homebrew command tried first.
    pub primary_install: String,
    /// Direct download/script tried when the primary install fails.
    pub fallback_install: String,
    /// Question asked before installing.
    pub prompt: String,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        check_command: impl Into<String>,
        primary_install: impl Into<String>,
        fallback_install: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let prompt = format!("{name} is not installed. Would you like to install it?");
        Self {
            name,
            check_command: check_command.into(),
            primary_install: primary_install.into(),
            fallback_install: fallback_install.into(),
            prompt,
        }
    }

    /// Replaces the default prompt text.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

/// Builds the tool catalog for `platform`.
///
/// Order matters only for output: tools are processed one after another and a
/// failure on one never prevents the next from being attempted.
pub fn default_catalog(platform: Platform) -> Vec<ToolSpec> {
    let Platform { os, arch } = platform;

    vec![
        ToolSpec::new(
            "docker",
            "docker --version",
            "brew install docker",
            "curl -fsSL https://get.docker.com -o /tmp/get-docker.sh && sudo sh /tmp/get-docker.sh && rm -f /tmp/get-docker.sh",
        )
        .with_prompt("Docker is not installed. Would you like to install it?"),
        ToolSpec::new(
            "kubectl",
            "kubectl version --client",
            "brew install kubectl",
            format!(
                "curl -fsSLo /tmp/kubectl \"https://dl.k8s.io/release/$(curl -fsSL https://dl.k8s.io/release/stable.txt)/bin/{os}/{arch}/kubectl\" \
                 && chmod +x /tmp/kubectl && sudo mv /tmp/kubectl /usr/local/bin/kubectl"
            ),
        ),
        ToolSpec::new(
            "helm",
            "helm version",
            "brew install helm",
            "curl -fsSL https://raw.githubusercontent.com/helm/helm/main/scripts/get-helm-3 | bash",
        )
        .with_prompt("Helm is not installed. Would you like to install it?"),
        ToolSpec::new(
            "terraform",
            "terraform --version",
            "brew install terraform",
            format!(
                "curl -fsSL https://releases.hashicorp.com/terraform/{v}/terraform_{v}_{os}_{arch}.zip -o /tmp/terraform.zip \
                 && unzip -o /tmp/terraform.zip -d /tmp/kubed-terraform \
                 && sudo mv /tmp/kubed-terraform/terraform /usr/local/bin/terraform \
                 && rm -rf /tmp/terraform.zip /tmp/kubed-terraform",
                v = TERRAFORM_FALLBACK_VERSION
            ),
        )
        .with_prompt("Terraform is not installed. Would you like to install it?"),
    ]
}
