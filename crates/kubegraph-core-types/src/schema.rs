//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_NODE_ID: &str = "node_id";
pub const FIELD_NODE_KIND: &str = "node_kind";
pub const FIELD_EDGE_SOURCE: &str = "edge_source";
pub const FIELD_EDGE_TARGET: &str = "edge_target";
pub const FIELD_DOCUMENT_INDEX: &str = "document_index";

// Collection sizes
pub const FIELD_NODE_COUNT: &str = "node_count";
pub const FIELD_EDGE_COUNT: &str = "edge_count";
pub const FIELD_DOCUMENT_COUNT: &str = "document_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
/// Node the failure concerns, when it concerns one
pub const FIELD_ERR_NODE_ID: &str = "err_node_id";
/// Zero-based manifest document that failed to parse
pub const FIELD_ERR_DOCUMENT_INDEX: &str = "err_document_index";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_NODE_ID.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_error_fields_share_prefix() {
        assert!(FIELD_ERR_KIND.starts_with("err_"));
        assert!(FIELD_ERR_CODE.starts_with("err_"));
        assert!(FIELD_ERR_NODE_ID.starts_with("err_"));
        assert!(FIELD_ERR_DOCUMENT_INDEX.starts_with("err_"));
    }
}
