use crate::application::ConnectionEvent;
use crate::domain::PeerId;
use crate::infrastructure::error::Result;

/// Trait for the peer transport (allows mocking in tests)
///
/// Implementations expose two delivery tiers: `reliable` guarantees eventual,
/// per-peer-ordered delivery; the other tier is best-effort and low-latency.
/// Identity announcements depend on the per-peer ordering of the reliable
/// tier.
pub trait Connection {
    fn local_peer_id(&self) -> Option<PeerId>;
    fn connected_peers(&self) -> Vec<PeerId>;
    fn send_to(&mut self, peer: PeerId, data: Vec<u8>, reliable: bool) -> Result<()>;
    fn broadcast(&mut self, data: Vec<u8>, reliable: bool) -> Result<()>;
    fn poll_events(&mut self) -> Vec<ConnectionEvent>;
}
