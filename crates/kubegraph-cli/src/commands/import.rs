//! Import command
//!
//! Usage: kubegraph import <FILE> [--json]

use clap::Args;
use kubegraph_core::manifest::ParseReport;
use kubegraph_core::ops::{import_manifests, SequentialIds};
use kubegraph_core::Graph;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Manifest file (multi-document YAML)
    pub file: PathBuf,

    /// Print the resulting graph as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Execute import command
pub fn execute(args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = super::read_file(&args.file, "import")?;

    let mut graph = Graph::new();
    let summary = import_manifests(&mut graph, &text, &mut SequentialIds::new())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
        return Ok(());
    }

    println!("Nodes ({}):", graph.node_count());
    for node in graph.list_nodes() {
        println!("  {:<20} {:<14} {}", node.id, node.kind().display_name(), node.name());
    }
    println!("Edges ({}):", graph.edge_count());
    for edge in graph.edges() {
        println!("  {} -> {}", edge.source, edge.target);
    }
    print_report(&summary.report);
    Ok(())
}

fn print_report(report: &ParseReport) {
    if report.is_clean() {
        return;
    }
    for skipped in &report.skipped {
        println!(
            "skipped document {} (kind: {})",
            skipped.document_index,
            skipped.kind.as_deref().unwrap_or("<none>")
        );
    }
    for unresolved in &report.unresolved {
        println!(
            "unresolved: {} references {} {:?}",
            unresolved.source_id, unresolved.target_kind, unresolved.target_name
        );
    }
    for rejected in &report.rejected {
        println!(
            "rejected: {} -> {}: {}",
            rejected.source_id, rejected.target_id, rejected.reason
        );
    }
}
