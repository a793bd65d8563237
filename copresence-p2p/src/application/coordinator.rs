use crate::application::ConnectionEvent;
use crate::domain::{PeerId, PeerRegistry};
use crate::infrastructure::wire::{self, WireMessage};
use copresence_core::{
    AnchorId, OwnershipTracker, SceneCommand, SessionIdentity, TrackingEvent,
};

/// Effects produced by the coordinator for its caller to execute
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEffect {
    /// Send a payload to one peer
    SendTo {
        peer: PeerId,
        payload: Vec<u8>,
        reliable: bool,
    },

    /// Send a payload to every connected peer
    Broadcast { payload: Vec<u8>, reliable: bool },

    /// Hand received alignment data to the tracking subsystem
    ApplyAlignment { from: PeerId, blob: Vec<u8> },

    /// Command for the scene collaborator
    Scene(SceneCommand),
}

/// Protocol core: peer admission, the session-identity handshake,
/// alignment-data relay, and ownership garbage collection
///
/// The coordinator owns all shared protocol state (peer registry and
/// ownership map); every event source reaches it through `&mut self`, which
/// serializes them. Operations return effects instead of performing I/O, so
/// no protocol state is held across a network send.
pub struct SyncCoordinator {
    registry: PeerRegistry,
    ownership: OwnershipTracker,
    local_identity: Option<SessionIdentity>,
}

impl SyncCoordinator {
    /// Create a coordinator with no local identity yet
    pub fn new() -> Self {
        Self {
            registry: PeerRegistry::new(),
            ownership: OwnershipTracker::new(),
            local_identity: None,
        }
    }

    /// Create a coordinator with an initial local frame identity
    pub fn with_identity(identity: SessionIdentity) -> Self {
        Self {
            local_identity: Some(identity),
            ..Self::new()
        }
    }

    /// Admission checkpoint for a discovered candidate
    ///
    /// This is the only gate through which peers enter the registry.
    /// Rejection is a policy decision, not an error, and has no side effects.
    pub fn on_peer_discovered(&self) -> bool {
        self.registry.admit()
    }

    /// A peer finished connecting
    ///
    /// Sends our current session identity to this one peer only, so a late
    /// joiner learns the existing frame without a full re-broadcast.
    pub fn on_peer_connected(&mut self, peer: PeerId) -> Vec<SyncEffect> {
        self.registry.on_connected(peer);

        let mut effects = Vec::new();
        if let Some(identity) = &self.local_identity {
            match wire::encode_announcement(identity) {
                Ok(payload) => effects.push(SyncEffect::SendTo {
                    peer,
                    payload,
                    reliable: true,
                }),
                Err(e) => {
                    tracing::warn!("Skipping identity greeting to {}: {}", peer, e);
                }
            }
        }
        effects
    }

    /// A peer disconnected
    ///
    /// Evicts every anchor attributed to the peer's last-known identity.
    /// Idempotent: a second disconnect for the same peer does nothing.
    pub fn on_peer_disconnected(&mut self, peer: &PeerId) -> Vec<SyncEffect> {
        let mut effects = Vec::new();

        if let Some(removed) = self.registry.on_disconnected(peer) {
            if let Some(identity) = removed.session_identity {
                self.evict(&identity, &mut effects);
            }
        }
        effects
    }

    /// The local tracking subsystem changed its frame identity
    ///
    /// Announces the new identity to all connected peers, reliably, exactly
    /// once per change. Peers connecting later receive it through
    /// `on_peer_connected`.
    pub fn on_local_identity_changed(&mut self, identity: SessionIdentity) -> Vec<SyncEffect> {
        tracing::info!("Local session identity changed to {}", identity);
        let encoded = wire::encode_announcement(&identity);
        self.local_identity = Some(identity);

        match encoded {
            Ok(payload) => vec![SyncEffect::Broadcast {
                payload,
                reliable: true,
            }],
            Err(e) => {
                tracing::warn!("Skipping identity announcement: {}", e);
                Vec::new()
            }
        }
    }

    /// Raw bytes arrived from a peer
    ///
    /// Alignment data is tried first and passed through opaquely; only when
    /// that fails is the payload parsed as a command. Unrecognized payloads
    /// are ignored for forward compatibility.
    pub fn on_data_received(&mut self, from: PeerId, bytes: &[u8]) -> Vec<SyncEffect> {
        match wire::decode(bytes) {
            WireMessage::Alignment(blob) => {
                self.registry.touch(&from);
                vec![SyncEffect::ApplyAlignment { from, blob }]
            }
            WireMessage::Announcement(identity) => self.on_identity_announced(from, identity),
            WireMessage::Unknown => {
                tracing::debug!("Ignoring unrecognized {} byte payload from {}", bytes.len(), from);
                Vec::new()
            }
        }
    }

    /// A peer announced its session identity
    fn on_identity_announced(
        &mut self,
        from: PeerId,
        identity: SessionIdentity,
    ) -> Vec<SyncEffect> {
        // A peer first seen through data is registered implicitly, but only
        // through the admission checkpoint.
        if !self.registry.contains(&from) && !self.on_peer_discovered() {
            tracing::warn!("Ignoring announcement from unadmitted peer {}", from);
            return Vec::new();
        }

        tracing::info!("Peer {} announced session identity {}", from, identity);

        let mut effects = Vec::new();
        let previous = self.registry.update_session_identity(from, identity.clone());

        // The first announcement has no previous identity; nothing to evict.
        if let Some(previous) = previous {
            if previous != identity {
                self.evict(&previous, &mut effects);
            }
        }
        effects
    }

    /// The local tracking subsystem produced alignment data to relay
    ///
    /// Dropped when no peers are connected: alignment data is monotonically
    /// superseded, so queueing stale blobs would be wasted work and a
    /// correctness risk. Critical handoffs go on the reliable tier, routine
    /// refinements best-effort.
    pub fn on_alignment_produced(&mut self, blob: &[u8], critical: bool) -> Vec<SyncEffect> {
        if self.registry.is_empty() {
            tracing::debug!("No peers connected, dropping {} byte alignment blob", blob.len());
            return Vec::new();
        }

        vec![SyncEffect::Broadcast {
            payload: wire::encode_alignment(blob),
            reliable: critical,
        }]
    }

    /// An anchor was established relative to a participant's frame
    pub fn on_anchor_established(&mut self, anchor_id: AnchorId, owner: SessionIdentity) {
        self.ownership.attribute(anchor_id, owner);
    }

    /// Dispatch a transport event to the matching operation
    pub fn handle_connection_event(&mut self, event: ConnectionEvent) -> Vec<SyncEffect> {
        match event {
            ConnectionEvent::PeerConnected(peer) => {
                if !self.on_peer_discovered() {
                    tracing::warn!(
                        "Rejecting peer {}: experience is limited to {} remote peers",
                        peer,
                        crate::domain::MAX_REMOTE_PEERS
                    );
                    return Vec::new();
                }
                self.on_peer_connected(peer)
            }
            ConnectionEvent::PeerDisconnected(peer) => self.on_peer_disconnected(&peer),
            ConnectionEvent::MessageReceived { from, data } => self.on_data_received(from, &data),
        }
    }

    /// Dispatch a local tracking event to the matching operation
    pub fn handle_tracking_event(&mut self, event: TrackingEvent) -> Vec<SyncEffect> {
        match event {
            TrackingEvent::FrameIdentityChanged { identity } => {
                self.on_local_identity_changed(identity)
            }
            TrackingEvent::AlignmentReady { blob, critical } => {
                self.on_alignment_produced(&blob, critical)
            }
            TrackingEvent::AnchorEstablished { anchor_id, owner } => {
                self.on_anchor_established(anchor_id, owner);
                Vec::new()
            }
        }
    }

    fn evict(&mut self, identity: &SessionIdentity, effects: &mut Vec<SyncEffect>) {
        let evicted = self.ownership.evict_all(identity);
        if !evicted.is_empty() {
            effects.push(SyncEffect::Scene(SceneCommand::RemoveAnchors {
                anchor_ids: evicted,
            }));
        }
    }

    /// The local frame identity, if one has been announced
    pub fn local_identity(&self) -> Option<&SessionIdentity> {
        self.local_identity.as_ref()
    }

    /// Read-only view of the peer registry
    pub fn registry(&self) -> &PeerRegistry {
        &self.registry
    }

    /// Read-only view of the ownership map
    pub fn ownership(&self) -> &OwnershipTracker {
        &self.ownership
    }
}

impl Default for SyncCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
