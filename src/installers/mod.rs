// Installers for the things `kubed setup` may have to put on the machine
// before tools and shell frameworks can be configured.

/// Locates `brew` and bootstraps Homebrew when it is missing. Every tool's
/// primary install command goes through it.
pub(crate) mod brew;

/// oh-my-zsh, the Powerlevel10k theme and the `.zshrc` edits that enable them.
pub(crate) mod oh_my_zsh;

/// The Starship prompt, used for fish.
pub(crate) mod starship;
