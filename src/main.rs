use anyhow::Result;
use clap::Parser;

use tree_index::cli::{Cli, Command, GenerateArgs};
use tree_index::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    // Dispatch to subcommand, bare invocation generates with defaults
    match cli.command {
        Some(Command::Generate(args)) => {
            tracing::info!(?args, "Starting generate");
            commands::generate::run(args, cli.quiet)?;
        }
        Some(Command::Completions(args)) => {
            commands::completions::run(args);
        }
        None => {
            tracing::info!("No subcommand, generating with defaults");
            commands::generate::run(GenerateArgs::default(), cli.quiet)?;
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tree_index={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
