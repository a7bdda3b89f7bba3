mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, ColorMode, Commands};
use output::{OutputMode, Reporter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_tracing();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
        OutputMode::Actions
    } else {
        OutputMode::Human
    };

    match cli.color {
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Auto => {}
    }

    let mut reporter = Reporter::new(mode);

    let success = match cli.command {
        Commands::Check(args) => {
            reporter.section("Changed files");
            commands::check::run_check(&args, &mut reporter)
        }
        Commands::Completions { shell } => commands::completions::run_completions(shell),
    };

    reporter.finish();

    if !success {
        std::process::exit(1);
    }
}

/// Library diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
