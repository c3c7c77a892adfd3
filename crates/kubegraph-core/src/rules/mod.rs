pub mod compatibility;
pub mod invariants;
pub mod validation;

pub use compatibility::{allowed_targets, is_allowed, RuleVerdict};
pub use validation::validate_graph;
