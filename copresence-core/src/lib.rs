pub mod domain;

pub use domain::{
    Anchor, AnchorId, IdentityError, OwnershipTracker, SceneCommand, SessionIdentity,
    TrackingEvent,
};
