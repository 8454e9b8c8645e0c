//! Folio CLI - Documentation browser.
//!
//! Provides commands for:
//! - `index`: Print the documentation index grouped by section
//! - `show`: Open a location and print the resulting view
//! - `links`: Classify the links of a document
//! - `serve`: Start the preview server

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CommonArgs, LinksArgs, ServeArgs, ShowArgs};
use output::Output;

/// Folio - Documentation browser.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the documentation index grouped by section.
    Index,
    /// Open a location and print the resulting view.
    Show(ShowArgs),
    /// List a document's links and how clicks on them are handled.
    Links(LinksArgs),
    /// Start the preview server.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.common.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let common = &cli.common;
    let result = rt.block_on(async {
        match cli.command {
            Commands::Index => commands::index::execute(common).await,
            Commands::Show(args) => args.execute(common).await,
            Commands::Links(args) => args.execute(common).await,
            Commands::Serve(args) => args.execute(common).await,
        }
    });

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
