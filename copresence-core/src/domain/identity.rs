use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Domain entity: Opaque identifier for a participant's local coordinate frame
///
/// The tracking subsystem mints a fresh identity whenever it resets or
/// re-anchors its world frame. Anchors are attributed to the identity that was
/// current when they were created, so a superseded identity marks its anchors
/// as stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionIdentity(String);

/// Validation errors for session identities
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("session identity must not be empty")]
    Empty,

    #[error("session identity must not contain control characters")]
    ControlCharacter,
}

impl SessionIdentity {
    /// Create a session identity from its textual form
    ///
    /// The text is opaque to this crate; only the properties the wire protocol
    /// relies on are checked.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentityError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IdentityError::Empty);
        }
        if id.chars().any(char::is_control) {
            return Err(IdentityError::ControlCharacter);
        }
        Ok(Self(id))
    }

    /// Mint a new random identity (UUID rendering)
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
