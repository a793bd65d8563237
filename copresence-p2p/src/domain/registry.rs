use crate::domain::PeerId;
use copresence_core::SessionIdentity;
use instant::Instant;
use std::collections::HashMap;

/// Maximum number of remote peers admitted into one experience
///
/// Hard cap of five participants total including the local device.
pub const MAX_REMOTE_PEERS: usize = 4;

/// State tracked for one connected peer
#[derive(Debug, Clone)]
pub struct Peer {
    /// When this peer connected
    pub connected_at: Instant,
    /// Last time we received any message from this peer
    pub last_seen: Instant,
    /// The peer's most recently announced session identity
    pub session_identity: Option<SessionIdentity>,
}

impl Peer {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            connected_at: now,
            last_seen: now,
            session_identity: None,
        }
    }
}

impl Default for Peer {
    fn default() -> Self {
        Self::new()
    }
}

/// Manages the set of connected peers and their announced session identities
///
/// Network identity (the map key) is stable for a connection's lifetime;
/// session identity is independently mutable and only ever changed through
/// `update_session_identity`.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: HashMap<PeerId, Peer>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admission policy: a candidate is admitted while fewer than
    /// `MAX_REMOTE_PEERS` peers are connected
    ///
    /// Pure query over the live peer count; no other criteria and no side
    /// effects.
    pub fn admit(&self) -> bool {
        self.peers.len() < MAX_REMOTE_PEERS
    }

    /// Register a newly connected peer with unset session identity
    pub fn on_connected(&mut self, peer_id: PeerId) {
        tracing::info!("Peer connected: {}", peer_id);
        self.peers.insert(peer_id, Peer::new());
    }

    /// Remove a peer, returning its last-known state
    ///
    /// Safe to call more than once per peer; any call after the first returns
    /// `None`.
    pub fn on_disconnected(&mut self, peer_id: &PeerId) -> Option<Peer> {
        let removed = self.peers.remove(peer_id);
        if removed.is_some() {
            tracing::info!("Peer disconnected: {}", peer_id);
        }
        removed
    }

    /// Swap a peer's session identity, returning the previous one
    ///
    /// A peer first seen through a data message is registered implicitly: the
    /// transport delivered its bytes, so it is connected.
    pub fn update_session_identity(
        &mut self,
        peer_id: PeerId,
        identity: SessionIdentity,
    ) -> Option<SessionIdentity> {
        let peer = self.peers.entry(peer_id).or_default();
        peer.last_seen = Instant::now();
        peer.session_identity.replace(identity)
    }

    /// Refresh `last_seen` for a peer that sent us something
    pub fn touch(&mut self, peer_id: &PeerId) {
        if let Some(peer) = self.peers.get_mut(peer_id) {
            peer.last_seen = Instant::now();
        }
    }

    /// The peer's most recently announced session identity, if any
    pub fn session_identity_of(&self, peer_id: &PeerId) -> Option<&SessionIdentity> {
        self.peers
            .get(peer_id)
            .and_then(|peer| peer.session_identity.as_ref())
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.peers.contains_key(peer_id)
    }

    pub fn connected_peers(&self) -> Vec<PeerId> {
        self.peers.keys().copied().collect()
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn create_peer_id() -> PeerId {
        PeerId::new(matchbox_socket::PeerId(Uuid::new_v4()))
    }

    #[test]
    fn test_admission_respects_cap() {
        let mut registry = PeerRegistry::new();

        for _ in 0..MAX_REMOTE_PEERS {
            assert!(registry.admit());
            registry.on_connected(create_peer_id());
        }

        assert!(!registry.admit());
    }

    #[test]
    fn test_admission_counts_live_connections_only() {
        let mut registry = PeerRegistry::new();
        let peers: Vec<PeerId> = (0..MAX_REMOTE_PEERS).map(|_| create_peer_id()).collect();

        for peer in &peers {
            registry.on_connected(*peer);
        }
        assert!(!registry.admit());

        // A disconnect frees a slot regardless of join order
        registry.on_disconnected(&peers[1]);
        assert!(registry.admit());

        registry.on_connected(create_peer_id());
        assert!(!registry.admit());
    }

    #[test]
    fn test_on_connected_starts_without_identity() {
        let mut registry = PeerRegistry::new();
        let peer = create_peer_id();

        registry.on_connected(peer);

        assert!(registry.contains(&peer));
        assert_eq!(registry.session_identity_of(&peer), None);
    }

    #[test]
    fn test_update_session_identity_swaps() {
        let mut registry = PeerRegistry::new();
        let peer = create_peer_id();
        registry.on_connected(peer);

        let first = SessionIdentity::new("A").unwrap();
        let second = SessionIdentity::new("B").unwrap();

        assert_eq!(registry.update_session_identity(peer, first.clone()), None);
        assert_eq!(
            registry.update_session_identity(peer, second.clone()),
            Some(first)
        );
        assert_eq!(registry.session_identity_of(&peer), Some(&second));
    }

    #[test]
    fn test_update_registers_unknown_peer() {
        let mut registry = PeerRegistry::new();
        let peer = create_peer_id();

        let previous = registry.update_session_identity(peer, SessionIdentity::random());

        assert_eq!(previous, None);
        assert!(registry.contains(&peer));
    }

    #[test]
    fn test_disconnect_returns_last_identity() {
        let mut registry = PeerRegistry::new();
        let peer = create_peer_id();
        let identity = SessionIdentity::random();

        registry.on_connected(peer);
        registry.update_session_identity(peer, identity.clone());

        let removed = registry.on_disconnected(&peer).unwrap();
        assert_eq!(removed.session_identity, Some(identity));
    }

    #[test]
    fn test_disconnect_twice_is_noop() {
        let mut registry = PeerRegistry::new();
        let peer = create_peer_id();
        registry.on_connected(peer);

        assert!(registry.on_disconnected(&peer).is_some());
        assert!(registry.on_disconnected(&peer).is_none());
        assert_eq!(registry.peer_count(), 0);
    }

    #[test]
    fn test_identities_are_per_peer() {
        let mut registry = PeerRegistry::new();
        let peer_x = create_peer_id();
        let peer_y = create_peer_id();
        registry.on_connected(peer_x);
        registry.on_connected(peer_y);

        let identity_x = SessionIdentity::new("X1").unwrap();
        let identity_y = SessionIdentity::new("Y1").unwrap();

        registry.update_session_identity(peer_x, identity_x.clone());
        registry.update_session_identity(peer_y, identity_y.clone());

        assert_eq!(registry.session_identity_of(&peer_x), Some(&identity_x));
        assert_eq!(registry.session_identity_of(&peer_y), Some(&identity_y));
    }

    #[test]
    fn test_touch_updates_last_seen() {
        let mut registry = PeerRegistry::new();
        let peer = create_peer_id();
        registry.on_connected(peer);

        let before = registry.peers.get(&peer).unwrap().last_seen;
        registry.touch(&peer);
        let after = registry.peers.get(&peer).unwrap().last_seen;

        assert!(after >= before);
    }
}
