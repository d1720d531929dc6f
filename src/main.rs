// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

mod cmd;
mod config;
mod error;
mod extract;
mod graph;
mod json_schema;
mod schema;

use clap::Parser;
use cmd::Cli;
use error::ErdError;
use tracing_subscriber::EnvFilter;

fn main() {
    // A missing .env is fine; configuration may come from flags or the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("{e}");
    }

    if let Err(e) = cmd::run(cli) {
        match e.chain().find_map(|c| c.downcast_ref::<ErdError>()) {
            Some(erd) => eprintln!("{}: {e:#}", erd.kind()),
            None => eprintln!("{e:#}"),
        }
        std::process::exit(1);
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_env("BASEROW_ERD_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
