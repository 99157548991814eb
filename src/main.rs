mod cli;
mod commands;
mod errors;
mod installers;
mod libs;
mod logger;
mod schemas;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::cmd_enums::{Cli, Commands};
use crate::commands::{paths, setup};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.debug);

    match cli.command {
        Commands::Setup {
            force_yes,
            zsh,
            skip_framework,
        } => setup::run(force_yes, zsh, skip_framework),
        Commands::CompletionsPath => paths::run_completions_path(),
        Commands::AliasesPath => paths::run_aliases_path(),
    }
}
