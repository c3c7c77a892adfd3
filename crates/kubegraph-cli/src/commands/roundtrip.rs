//! Roundtrip command
//!
//! Usage: kubegraph roundtrip <FILE> [--config <FILE>]

use clap::Args;
use kubegraph_core::ops::SequentialIds;
use kubegraph_core::{generate, import_manifests, Graph};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RoundtripArgs {
    /// Manifest file (multi-document YAML)
    pub file: PathBuf,

    /// TOML generation settings (namespace, volume_mount_root)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute roundtrip command
pub fn execute(args: RoundtripArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_deref())?;
    let text = super::read_file(&args.file, "roundtrip")?;

    let mut graph = Graph::new();
    let summary = import_manifests(&mut graph, &text, &mut SequentialIds::new())?;
    if !summary.report.is_clean() {
        tracing::warn!(
            skipped = summary.report.skipped.len(),
            unresolved = summary.report.unresolved.len(),
            rejected = summary.report.rejected.len(),
            "input did not map cleanly onto the graph"
        );
    }

    let manifests = generate(&graph, &config)?;
    super::emit(&manifests.all(), None)
}
