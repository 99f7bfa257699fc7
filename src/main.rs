//! hookcheck - pre-commit gate for staged files.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hookcheck::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout/stderr text stays the only interface by default.
    let filter = EnvFilter::try_from_env("HOOKCHECK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("hookcheck=warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Commands::Check) => return cli::check::run().await,
        Some(Commands::Install { force }) => cli::hooks::install(force),
        Some(Commands::Uninstall) => cli::hooks::uninstall(),
        Some(Commands::Settings) => cli::settings::show(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hookcheck: {}", e);
            ExitCode::FAILURE
        }
    }
}
