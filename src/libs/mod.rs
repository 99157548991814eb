// Components behind the `kubed` commands.

// Loads the optional `config.yaml` settings file.
pub mod config_loading;
// Process environment captured once and passed around explicitly.
pub mod environment;
// oh-my-zsh / Starship stage.
pub mod framework_installer;
// Shell detection, startup-file lookup and tool presence checks.
pub mod probe;
// Yes/no questions.
pub mod prompter;
// Summary table, restart banner and manual-setup instructions.
pub mod report;
// Running external commands.
pub mod runner;
// Marker-guarded edits to shell startup files.
pub mod shell_configurator;
// Alias, completion and help-wrapper files under the kubed home.
pub mod templates;
// Installer Resolver: Homebrew first, then the direct-download fallback.
pub mod tool_installer;
// Platform detection.
pub mod utilities;

#[cfg(test)]
pub mod testing;
