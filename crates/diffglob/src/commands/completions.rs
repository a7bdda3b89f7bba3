//! CLI handler for `diffglob completions`.

use std::io;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

/// Writes completions for `shell` to stdout.
pub fn run_completions(shell: Shell) -> bool {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "diffglob", &mut io::stdout());
    true
}
