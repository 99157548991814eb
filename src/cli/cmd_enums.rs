use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand};

/// Defines the command-line interface (CLI) for `kubed`.
#[derive(Parser)]
#[command(name = "kubed")]
#[command(version)]
#[command(about = "Command-line tools autocompletion and productivity enhancer", long_about = None)]
pub struct Cli {
    /// Enables detailed debug output for troubleshooting.
    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Enumerates the supported subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Installs docker, kubectl, helm and terraform, writes aliases and
    /// completions, and hooks them into your shell startup file.
    Setup {
        /// Answer "yes" to every prompt (also enabled by `KUBED_FORCE_YES`).
        // Any `KUBED_FORCE_YES` value other than 0/false/no/off/empty turns it on.
        #[arg(
            short = 'y',
            long = "yes",
            env = "KUBED_FORCE_YES",
            action = ArgAction::SetTrue,
            value_parser = FalseyValueParser::new()
        )]
        force_yes: bool,
        /// Configure zsh (oh-my-zsh, Powerlevel10k, ~/.zshrc) regardless of `SHELL`.
        #[arg(long)]
        zsh: bool,
        /// Do not install or configure oh-my-zsh, Powerlevel10k or Starship.
        #[arg(long)]
        skip_framework: bool,
    },
    /// Prints the completions directory for the current shell.
    CompletionsPath,
    /// Prints the aliases directory.
    AliasesPath,
}
