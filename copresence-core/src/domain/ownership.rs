use crate::domain::{Anchor, AnchorId, SessionIdentity};
use std::collections::{HashMap, HashSet};

/// Tracks which shared anchors belong to which session identity
///
/// Used to garbage-collect anchors when the identity that created them is
/// superseded (the peer re-anchored its frame) or the peer disconnects.
/// Eviction is all-or-nothing per identity; there is no partial removal.
#[derive(Debug, Default, Clone)]
pub struct OwnershipTracker {
    owners: HashMap<SessionIdentity, HashSet<AnchorId>>,
}

impl OwnershipTracker {
    /// Create a new empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an anchor belongs to a session identity
    pub fn attribute(&mut self, anchor_id: AnchorId, owner: SessionIdentity) {
        tracing::debug!("Attributing anchor {} to identity {}", anchor_id, owner);
        self.owners.entry(owner).or_default().insert(anchor_id);
    }

    /// Attribute an anchor from its domain entity
    ///
    /// Ambient anchors have no owner and are ignored.
    pub fn attribute_anchor(&mut self, anchor: &Anchor) {
        if let Some(owner) = &anchor.owner {
            self.attribute(anchor.id, owner.clone());
        }
    }

    /// Remove and return every anchor attributed to an identity
    ///
    /// The mapping entry is deleted entirely. Idempotent: evicting an identity
    /// with no mapping returns an empty set.
    pub fn evict_all(&mut self, owner: &SessionIdentity) -> HashSet<AnchorId> {
        let evicted = self.owners.remove(owner).unwrap_or_default();
        if !evicted.is_empty() {
            tracing::info!(
                "Evicted {} anchors owned by identity {}",
                evicted.len(),
                owner
            );
        }
        evicted
    }

    /// Identities that currently hold at least one anchor
    pub fn tracked_identities(&self) -> impl Iterator<Item = &SessionIdentity> {
        self.owners.keys()
    }

    /// Whether any anchor is attributed to this identity
    pub fn owns_anchors(&self, owner: &SessionIdentity) -> bool {
        self.owners.contains_key(owner)
    }

    /// Total number of tracked anchors across all identities
    pub fn anchor_count(&self) -> usize {
        self.owners.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_and_evict_roundtrip() {
        let mut tracker = OwnershipTracker::new();
        let owner = SessionIdentity::random();
        let anchor = AnchorId::new();

        tracker.attribute(anchor, owner.clone());

        let evicted = tracker.evict_all(&owner);
        assert_eq!(evicted, HashSet::from([anchor]));

        // Second eviction finds nothing
        assert!(tracker.evict_all(&owner).is_empty());
    }

    #[test]
    fn test_eviction_is_per_identity() {
        let mut tracker = OwnershipTracker::new();
        let owner_a = SessionIdentity::new("A").unwrap();
        let owner_b = SessionIdentity::new("B").unwrap();

        let a_anchors: HashSet<AnchorId> = (0..3)
            .map(|_| {
                let id = AnchorId::new();
                tracker.attribute(id, owner_a.clone());
                id
            })
            .collect();
        let b_anchor = AnchorId::new();
        tracker.attribute(b_anchor, owner_b.clone());

        let evicted = tracker.evict_all(&owner_a);

        assert_eq!(evicted, a_anchors);
        assert!(tracker.owns_anchors(&owner_b));
        assert_eq!(tracker.anchor_count(), 1);
    }

    #[test]
    fn test_evict_unknown_identity_is_empty() {
        let mut tracker = OwnershipTracker::new();
        let evicted = tracker.evict_all(&SessionIdentity::random());
        assert!(evicted.is_empty());
    }

    #[test]
    fn test_attribute_is_set_semantics() {
        let mut tracker = OwnershipTracker::new();
        let owner = SessionIdentity::random();
        let anchor = AnchorId::new();

        tracker.attribute(anchor, owner.clone());
        tracker.attribute(anchor, owner.clone());

        assert_eq!(tracker.anchor_count(), 1);
        assert_eq!(tracker.evict_all(&owner).len(), 1);
    }

    #[test]
    fn test_attribute_anchor_ignores_ambient() {
        let mut tracker = OwnershipTracker::new();

        tracker.attribute_anchor(&Anchor::ambient(AnchorId::new()));
        assert!(tracker.is_empty());

        let owner = SessionIdentity::random();
        tracker.attribute_anchor(&Anchor::owned(AnchorId::new(), owner.clone()));
        assert!(tracker.owns_anchors(&owner));
    }

    #[test]
    fn test_tracked_identities() {
        let mut tracker = OwnershipTracker::new();
        let owner_a = SessionIdentity::new("A").unwrap();
        let owner_b = SessionIdentity::new("B").unwrap();

        tracker.attribute(AnchorId::new(), owner_a.clone());
        tracker.attribute(AnchorId::new(), owner_b.clone());

        let identities: Vec<_> = tracker.tracked_identities().cloned().collect();
        assert_eq!(identities.len(), 2);
        assert!(identities.contains(&owner_a));
        assert!(identities.contains(&owner_b));
    }
}
