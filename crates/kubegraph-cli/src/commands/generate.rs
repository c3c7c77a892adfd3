//! Generate command
//!
//! Usage: kubegraph generate <GRAPH_JSON> [--output <FILE>] [--config <FILE>]

use clap::Args;
use kubegraph_core::{generate, validate_graph, Graph};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Graph saved as JSON (see `kubegraph import --json`)
    pub graph: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML generation settings (namespace, volume_mount_root)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute generate command
pub fn execute(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_deref())?;
    let text = super::read_file(&args.graph, "generate")?;

    let graph: Graph = serde_json::from_str(&text)?;
    validate_graph(&graph)?;

    let manifests = generate(&graph, &config)?;
    super::emit(&manifests.all(), args.output.as_deref())
}
