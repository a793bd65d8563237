mod experience;
mod ice_server;
mod peer;
mod registry;

pub use experience::ExperienceId;
pub use ice_server::IceServer;
pub use peer::PeerId;
pub use registry::{Peer, PeerRegistry, MAX_REMOTE_PEERS};
