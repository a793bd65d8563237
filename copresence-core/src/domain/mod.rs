mod anchor;
mod events;
mod identity;
mod ownership;

pub use anchor::{Anchor, AnchorId};
pub use events::{SceneCommand, TrackingEvent};
pub use identity::{IdentityError, SessionIdentity};
pub use ownership::OwnershipTracker;
