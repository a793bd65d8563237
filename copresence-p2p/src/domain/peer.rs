use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export the underlying matchbox type
pub use matchbox_socket::PeerId as MatchboxPeerId;

/// Domain entity: Network identity of a peer
///
/// Assigned by the transport and stable for the lifetime of one connection.
/// Distinct from the peer's session identity, which is announced over the
/// data channel and may change while the connection stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerId(pub MatchboxPeerId);

impl PeerId {
    pub fn new(id: MatchboxPeerId) -> Self {
        Self(id)
    }

    pub fn inner(&self) -> MatchboxPeerId {
        self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MatchboxPeerId> for PeerId {
    fn from(id: MatchboxPeerId) -> Self {
        Self(id)
    }
}
