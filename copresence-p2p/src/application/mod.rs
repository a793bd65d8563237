mod config;
mod coordinator;
mod events;
mod session;

pub use config::SessionConfig;
pub use coordinator::{SyncCoordinator, SyncEffect};
pub use events::ConnectionEvent;
pub use session::{CollabSession, SessionUpdate};
