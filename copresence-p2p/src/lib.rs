// Domain layer (core)
pub mod domain;

// Application layer (use cases)
pub mod application;

// Infrastructure layer (adapters)
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    CollabSession, ConnectionEvent, SessionConfig, SessionUpdate, SyncCoordinator, SyncEffect,
};
pub use domain::{ExperienceId, IceServer, PeerId, PeerRegistry, MAX_REMOTE_PEERS};
pub use infrastructure::error::{P2PError, Result};
pub use infrastructure::wire::{WireError, WireMessage};
