//! Manifest generation and parsing
//!
//! `generate` walks a [`Graph`](crate::ops::Graph) into YAML documents;
//! `parse` turns documents back into nodes and infers the edges between
//! them.

pub mod format;
pub mod generate;
mod infer;
pub mod parse;
pub mod report;

pub use generate::{
    generate, generate_node_document, GeneratedDocument, ManifestSet, DOCUMENT_SEPARATOR,
};
pub use parse::{parse, ParseOutcome};
pub use report::{ParseReport, ReferenceVia, RejectedEdge, SkippedDocument, UnresolvedReference};
