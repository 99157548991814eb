// Shell startup file patching.
//
// Every edit kubed makes to `.zshrc`, `.bashrc` or `config.fish` goes through
// this module. Edits are guarded by marker text: the file is re-read on every
// call and a block is only appended when its marker is missing, so running
// `kubed setup` any number of times leaves exactly one copy of each block.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use colored::Colorize;

use crate::errors::KubedError;
use crate::libs::runner::{CommandRunner, OutputMode};
use crate::schemas::shell_profile::ShellKind;
use crate::{log_debug, log_info};

/// First line of the setup block; its presence means kubed is already wired in.
pub const SETUP_BLOCK_MARKER: &str = "# >>> kubed setup >>>";
/// Last line of the setup block.
pub const SETUP_BLOCK_END: &str = "# <<< kubed setup <<<";

/// Appends `block` to `config_path` unless `marker` already occurs in it.
///
/// Returns `Ok(true)` when the block was appended and `Ok(false)` when the
/// marker was found (the file is not touched). The file must exist: a missing
/// or unreadable file is reported as [`KubedError::ConfigUnreadable`].
///
/// `block` is written verbatim. Blocks start with a newline so they never
/// run into an unterminated last line.
pub fn ensure_block(config_path: &Path, marker: &str, block: &str) -> Result<bool, KubedError> {
    let content = read_config(config_path)?;
    if content.contains(marker) {
        log_debug!(
            "[Shell Config] '{}' already present in {}",
            marker.dimmed(),
            config_path.display()
        );
        return Ok(false);
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(config_path)
        .map_err(|source| KubedError::ConfigWrite {
            path: config_path.to_path_buf(),
            source,
        })?;
    file.write_all(block.as_bytes())
        .map_err(|source| KubedError::ConfigWrite {
            path: config_path.to_path_buf(),
            source,
        })?;

    log_info!(
        "[Shell Config] Added '{}' to {}",
        marker.green(),
        config_path.display().to_string().cyan()
    );
    Ok(true)
}

/// Creates an empty startup file (and its parent directories) if it does not
/// exist yet. Returns `true` when the file was created.
pub fn ensure_config_file(config_path: &Path) -> Result<bool, KubedError> {
    if config_path.exists() {
        return Ok(false);
    }
    let to_write_error = |source| KubedError::ConfigWrite {
        path: config_path.to_path_buf(),
        source,
    };
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    fs::write(config_path, "").map_err(to_write_error)?;
    log_info!(
        "[Shell Config] Created {}",
        config_path.display().to_string().cyan()
    );
    Ok(true)
}

/// Rewrites `config_path` in place with `edit`.
///
/// `edit` receives the current content and returns `Some(new_content)` to
/// change the file or `None` to leave it alone. Returns whether the file was
/// rewritten.
pub fn rewrite_config<F>(config_path: &Path, edit: F) -> Result<bool, KubedError>
where
    F: FnOnce(&str) -> Option<String>,
{
    let content = read_config(config_path)?;
    match edit(&content) {
        Some(updated) if updated != content => {
            fs::write(config_path, updated).map_err(|source| KubedError::ConfigWrite {
                path: config_path.to_path_buf(),
                source,
            })?;
            log_debug!("[Shell Config] Rewrote {}", config_path.display());
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn read_config(config_path: &Path) -> Result<String, KubedError> {
    fs::read_to_string(config_path).map_err(|source| KubedError::ConfigUnreadable {
        path: config_path.to_path_buf(),
        source,
    })
}

/// The block appended to the startup file of `shell`.
///
/// The block does not hardcode where kubed lives: at source time it asks
/// `kubed aliases-path` (when `kubed` is on `PATH`), then falls back to
/// `$KUBED_HOME`, then to `~/.kubed`.
pub fn render_setup_block(shell: ShellKind) -> String {
    match shell {
        ShellKind::Fish => format!(
            r#"
{SETUP_BLOCK_MARKER}
# Managed by kubed; delete this block to undo.
if not set -q KUBED_HOME; and command -q kubed
    set -l _kubed_aliases (kubed aliases-path 2>/dev/null)
    and set -gx KUBED_HOME (string replace -r '/aliases$' '' -- $_kubed_aliases)
end
set -q KUBED_HOME; or set -gx KUBED_HOME $HOME/.kubed
fish_add_path $KUBED_HOME/bin
for _kubed_file in $KUBED_HOME/{completions} $KUBED_HOME/{aliases} $KUBED_HOME/{help}
    test -f $_kubed_file; and source $_kubed_file
end
set -e _kubed_file
{SETUP_BLOCK_END}
"#,
            completions = shell.completion_file(),
            aliases = shell.aliases_file(),
            help = shell.help_wrapper_file(),
        ),
        ShellKind::Bash | ShellKind::Zsh => format!(
            r#"
{SETUP_BLOCK_MARKER}
# Managed by kubed; delete this block to undo.
if [ -z "${{KUBED_HOME:-}}" ] && command -v kubed >/dev/null 2>&1; then
  _kubed_aliases="$(kubed aliases-path 2>/dev/null)" && KUBED_HOME="${{_kubed_aliases%/aliases}}"
  unset _kubed_aliases
fi
export KUBED_HOME="${{KUBED_HOME:-$HOME/.kubed}}"
export PATH="$KUBED_HOME/bin:$PATH"
for _kubed_file in "$KUBED_HOME/{completions}" "$KUBED_HOME/{aliases}" "$KUBED_HOME/{help}"; do
  [ -f "$_kubed_file" ] && . "$_kubed_file"
done
unset _kubed_file
{SETUP_BLOCK_END}
"#,
            completions = shell.completion_file(),
            aliases = shell.aliases_file(),
            help = shell.help_wrapper_file(),
        ),
    }
}

/// Sources `config_path` in a fresh `shell_program -c` to check that the
/// updated startup file loads cleanly.
///
/// # Arguments
///
/// * `runner` - Executes the shell.
/// * `shell_program` - `bash`, `zsh` or `fish`.
/// * `config_path` - The startup file to source.
///
/// # Returns
///
/// `Ok(())` when the shell exited with status zero, otherwise
/// `CommandFailed` or `CommandLaunch`.
pub fn source_config(
    runner: &dyn CommandRunner,
    shell_program: &str,
    config_path: &Path,
) -> Result<(), KubedError> {
    let inner = format!("source {}", single_quote(&config_path.display().to_string()));
    let command = format!("{shell_program} -c {}", single_quote(&inner));
    match runner.run(&command, OutputMode::Inherit) {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(KubedError::CommandFailed { command, status }),
        Err(source) => Err(KubedError::CommandLaunch { command, source }),
    }
}

/// Quotes `value` as a single POSIX shell word.
fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::testing::FakeRunner;
    use tempfile::tempdir;

    const BLOCK: &str = "\n# >>> test >>>\necho hi\n";

    #[test]
    fn test_appends_block_when_marker_missing() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join(".zshrc");
        fs::write(&rc, "export EDITOR=vim\n").unwrap();

        assert!(ensure_block(&rc, "# >>> test >>>", BLOCK).unwrap());
        assert_eq!(
            fs::read_to_string(&rc).unwrap(),
            format!("export EDITOR=vim\n{BLOCK}")
        );
    }

    #[test]
    fn test_marker_present_means_no_write() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join(".zshrc");
        let original = "alias ll='ls -l'\n# >>> test >>>\necho old\n";
        fs::write(&rc, original).unwrap();

        assert!(!ensure_block(&rc, "# >>> test >>>", BLOCK).unwrap());
        assert_eq!(fs::read_to_string(&rc).unwrap(), original);
    }

    #[test]
    fn test_second_call_in_same_run_does_not_duplicate() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join(".bashrc");
        fs::write(&rc, "").unwrap();

        assert!(ensure_block(&rc, "# >>> test >>>", BLOCK).unwrap());
        assert!(!ensure_block(&rc, "# >>> test >>>", BLOCK).unwrap());
        let content = fs::read_to_string(&rc).unwrap();
        assert_eq!(content.matches("# >>> test >>>").count(), 1);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join(".zshrc");
        let err = ensure_block(&rc, "# >>> test >>>", BLOCK).unwrap_err();
        assert!(matches!(err, KubedError::ConfigUnreadable { .. }));
        assert!(!rc.exists());
    }

    #[test]
    fn test_ensure_config_file_creates_parents_once() {
        let dir = tempdir().unwrap();
        let config = dir.path().join(".config/fish/config.fish");
        assert!(ensure_config_file(&config).unwrap());
        assert!(config.is_file());
        fs::write(&config, "set -x A 1\n").unwrap();
        assert!(!ensure_config_file(&config).unwrap());
        assert_eq!(fs::read_to_string(&config).unwrap(), "set -x A 1\n");
    }

    #[test]
    fn test_rewrite_config_only_writes_on_change() {
        let dir = tempdir().unwrap();
        let rc = dir.path().join(".zshrc");
        fs::write(&rc, "plugins=(git)\n").unwrap();

        assert!(
            rewrite_config(&rc, |c| Some(c.replace("plugins=(", "plugins=(kubectl ")))
                .unwrap()
        );
        assert_eq!(fs::read_to_string(&rc).unwrap(), "plugins=(kubectl git)\n");
        assert!(!rewrite_config(&rc, |_| None).unwrap());
        assert!(!rewrite_config(&rc, |c| Some(c.to_string())).unwrap());
    }

    #[test]
    fn test_setup_block_is_delimited_and_uses_shell_specific_files() {
        let zsh = render_setup_block(ShellKind::Zsh);
        assert!(zsh.starts_with('\n'));
        assert!(zsh.contains(SETUP_BLOCK_MARKER));
        assert!(zsh.trim_end().ends_with(SETUP_BLOCK_END));
        assert!(zsh.contains("\"$KUBED_HOME/completions/zsh/zsh_completions.sh\""));
        assert!(zsh.contains("${KUBED_HOME:-$HOME/.kubed}"));
        assert!(zsh.contains("kubed aliases-path"));

        let fish = render_setup_block(ShellKind::Fish);
        assert!(fish.contains("$KUBED_HOME/completions/fish/fish_completions.fish"));
        assert!(fish.contains("$KUBED_HOME/aliases/help_wrapper.fish"));
        assert!(fish.contains("fish_add_path"));
    }

    #[test]
    fn test_source_config_reports_failures() {
        let rc = Path::new("/home/dev/.zshrc");
        let ok = FakeRunner::new().succeed("zsh -c");
        assert!(source_config(&ok, "zsh", rc).is_ok());
        assert_eq!(ok.count("/home/dev/.zshrc"), 1);

        assert_eq!(ok.calls(), [r"zsh -c 'source '\''/home/dev/.zshrc'\'''"]);

        let failing = FakeRunner::new().exit_with("zsh -c", 1);
        assert!(matches!(
            source_config(&failing, "zsh", rc),
            Err(KubedError::CommandFailed { .. })
        ));
    }
}
