// Register application subcommands.
// Each module corresponds to a specific `kubed` command-line action.

// Installs the tools and wires kubed into the shell.
pub mod setup;
// Prints the completions and aliases directories.
pub mod paths;
