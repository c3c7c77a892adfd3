use uuid::Uuid;

use crate::model::Kind;

/// Source of node identifiers
///
/// Passed explicitly to every operation that creates nodes. Identifiers
/// handed out by one source are never repeated by it.
pub trait IdSource {
    fn next_id(&mut self, kind: Kind) -> String;
}

/// Monotonic `<kind>-<n>` identifiers
///
/// A single counter is shared across kinds, so `deployment-1` is followed
/// by `service-2`, never by `service-1`.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    issued: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume numbering after `issued` identifiers
    pub fn starting_after(issued: u64) -> Self {
        Self { issued }
    }

    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, kind: Kind) -> String {
        self.issued += 1;
        format!("{}-{}", kind.as_str(), self.issued)
    }
}

/// `<kind>-<uuid v7>` identifiers, unique across sessions
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self, kind: Kind) -> String {
        format!("{}-{}", kind.as_str(), Uuid::now_v7())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_share_one_counter() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(Kind::Deployment), "deployment-1");
        assert_eq!(ids.next_id(Kind::Service), "service-2");
        assert_eq!(ids.next_id(Kind::Deployment), "deployment-3");
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn test_starting_after_resumes() {
        let mut ids = SequentialIds::starting_after(41);
        assert_eq!(ids.next_id(Kind::ConfigMap), "configmap-42");
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let mut ids = UuidIds;
        let a = ids.next_id(Kind::Pod);
        let b = ids.next_id(Kind::Pod);
        assert!(a.starts_with("pod-"));
        assert_ne!(a, b);
    }
}
