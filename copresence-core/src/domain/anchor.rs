use crate::domain::SessionIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Domain entity: Unique identifier for a shared anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorId(Uuid);

impl AnchorId {
    /// Create a new random anchor ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for AnchorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A spatially placed entity visible to all participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: AnchorId,

    /// Identity of the coordinate frame the anchor was created relative to.
    /// `None` marks ambient anchors (e.g. derived from reconstructed mesh)
    /// that no participant owns.
    pub owner: Option<SessionIdentity>,
}

impl Anchor {
    /// Create an anchor owned by a participant's frame
    pub fn owned(id: AnchorId, owner: SessionIdentity) -> Self {
        Self {
            id,
            owner: Some(owner),
        }
    }

    /// Create an ambient anchor with no owner
    pub fn ambient(id: AnchorId) -> Self {
        Self { id, owner: None }
    }

    /// Ambient anchors are never evicted by the ownership protocol
    pub fn is_ambient(&self) -> bool {
        self.owner.is_none()
    }
}
