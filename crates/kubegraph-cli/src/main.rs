//! Kubegraph CLI
//!
//! Command-line interface for converting between resource graphs and
//! manifest files

use clap::{Parser, Subcommand, ValueEnum};
use kubegraph_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "kubegraph")]
#[command(about = "Kubegraph - resource graphs to manifests and back", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a manifest file into a graph
    Import(commands::import::ImportArgs),
    /// Generate manifests from a saved graph
    Generate(commands::generate::GenerateArgs),
    /// Parse a manifest file and generate it again
    Roundtrip(commands::roundtrip::RoundtripArgs),
    /// Print the edge compatibility matrix
    Rules,
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Json => Profile::Production,
        LogFormat::Pretty => Profile::Development,
    });

    let result = match cli.command {
        Commands::Import(args) => commands::import::execute(args),
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Roundtrip(args) => commands::roundtrip::execute(args),
        Commands::Rules => commands::rules::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
