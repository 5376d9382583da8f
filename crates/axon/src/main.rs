//! # axon
//!
//! Axon - Accessibility tree reconstruction toolchain for markup.
//!
//! ## Name Origin
//!
//! An **axon** is the fiber a neuron sends its signal down. This binary
//! is the gateway to the axon crates: it carries the semantics of a page
//! out of its markup and into a form tooling can consume, as JSON on
//! stdout.

mod commands;
mod config;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "axon")]
#[command(about = "Reconstruct and query accessibility trees from markup", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: (),
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and dump the full accessibility tree (default command)
    Dump(commands::dump::DumpArgs),

    /// Match elements with a CSS-like selector and dump each as a subtree
    Query(commands::query::QueryArgs),

    /// Find nodes by computed role or accessible name
    Find(commands::find::FindArgs),
}

fn main() {
    // Diagnostics go to stderr so JSON on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("AXON_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Some(Commands::Dump(args)) => commands::dump::run(args),
        Some(Commands::Query(args)) => commands::query::run(args),
        Some(Commands::Find(args)) => commands::find::run(args),
        None => {
            // Default to dump with default args
            commands::dump::run(commands::dump::DumpArgs::default())
        }
    };

    std::process::exit(exit_code);
}
