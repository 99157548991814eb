// Template Writer: drops the generated alias, completion and help-wrapper
// scripts into the kubed home.
//
// The content is static, so writing is an unconditional overwrite: running
// setup twice produces byte-identical files.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::errors::KubedError;
use crate::{log_debug, log_info, log_warn};

/// A generated file, relative to the directory it is written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub relative_path: &'static str,
    pub content: &'static str,
}

/// Files written under the kubed home by every `kubed setup`.
pub const KUBED_HOME_TEMPLATES: &[Template] = &[
    Template {
        relative_path: "aliases/aliases.sh",
        content: include_str!("../templates/aliases.sh"),
    },
    Template {
        relative_path: "aliases/aliases.fish",
        content: include_str!("../templates/aliases.fish"),
    },
    Template {
        relative_path: "aliases/help_wrapper.sh",
        content: include_str!("../templates/help_wrapper.sh"),
    },
    Template {
        relative_path: "aliases/help_wrapper.fish",
        content: include_str!("../templates/help_wrapper.fish"),
    },
    Template {
        relative_path: "completions/bash/bash_completions.sh",
        content: include_str!("../templates/bash_completions.sh"),
    },
    Template {
        relative_path: "completions/zsh/zsh_completions.sh",
        content: include_str!("../templates/zsh_completions.sh"),
    },
    Template {
        relative_path: "completions/fish/fish_completions.fish",
        content: include_str!("../templates/fish_completions.fish"),
    },
];

/// Subdirectories created even when nothing is written into them yet.
pub const KUBED_HOME_DIRS: &[&str] = &["bin"];

/// What `write_all` did.
#[derive(Debug, Default)]
pub struct TemplateReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<KubedError>,
}

impl TemplateReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Writes `content` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_template(path: &Path, content: &str) -> Result<(), KubedError> {
    let to_error = |source| KubedError::TemplateWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, content).map_err(to_error)?;
    log_debug!("[Templates] Wrote {}", path.display().to_string().dimmed());
    Ok(())
}

/// Writes every template under `kubed_home`.
///
/// # Arguments
///
/// * `kubed_home` - Root of the kubed home, usually `~/.kubed`.
///
/// # Returns
///
/// A `TemplateReport` with the files written and the ones that failed. A
/// failing file does not stop the remaining ones.
pub fn write_all(kubed_home: &Path) -> TemplateReport {
    let mut report = TemplateReport::default();

    for dir in KUBED_HOME_DIRS {
        let path = kubed_home.join(dir);
        if let Err(source) = fs::create_dir_all(&path) {
            log_warn!("[Templates] Could not create {}: {}", path.display(), source);
            report.failures.push(KubedError::TemplateWrite { path, source });
        }
    }

    for template in KUBED_HOME_TEMPLATES {
        let path = kubed_home.join(template.relative_path);
        match write_template(&path, template.content) {
            Ok(()) => report.written.push(path),
            Err(e) => {
                log_warn!("[Templates] {}", e);
                report.failures.push(e);
            }
        }
    }

    log_info!(
        "[Templates] Wrote {} alias and completion file(s) to {}",
        report.written.len().to_string().bold(),
        kubed_home.display().to_string().cyan()
    );
    report
}
