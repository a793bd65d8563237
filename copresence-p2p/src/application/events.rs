use crate::domain::PeerId;

/// Events emitted by the peer transport
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// A new peer has connected
    PeerConnected(PeerId),
    /// A peer has disconnected
    PeerDisconnected(PeerId),
    /// Received a payload from a peer
    MessageReceived { from: PeerId, data: Vec<u8> },
}
