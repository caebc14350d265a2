use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use templgen::{Cli, Templgen, TemplgenError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(cli.verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), TemplgenError> {
    let cwd = std::env::current_dir().map_err(|e| TemplgenError::io(".", e))?;
    let mut templgen = Templgen::builder().build()?;
    templgen.ensure_integrity()?;

    let outcome = templgen.handle(&cli.into_action(), &cwd)?;
    println!("{outcome}");
    Ok(())
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "templgen=warn",
        1 => "templgen=info",
        _ => "templgen=debug",
    }
}
