//! Kubegraph Core - bidirectional graph ⇄ manifest transformation
//!
//! This crate provides:
//! - A typed model of ten resource kinds and their default attributes
//! - A total compatibility rule table for directed edges
//! - An insertion-ordered graph store with explicit ID sources
//! - A deterministic manifest generator and a tolerant parser that infers
//!   edges from names, selectors, volumes and embedded containers
//! - A command/apply boundary with all-or-nothing semantics

pub mod apply;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod manifest;
pub mod model;
pub mod ops;
pub mod registry;
pub mod rules;

pub use kubegraph_core_types::schema;

// Re-export commonly used types
pub use apply::{apply, Applied, ApplyOutcome};
pub use commands::Command;
pub use config::GenerateConfig;
pub use errors::{KgError, KgErrorKind, KubegraphError, Result};
pub use manifest::{generate, parse, ManifestSet, ParseOutcome, ParseReport};
pub use model::{Edge, Kind, Node, Resource};
pub use ops::{import_manifests, Graph, IdSource, SequentialIds};
pub use rules::{is_allowed, validate_graph, RuleVerdict};
