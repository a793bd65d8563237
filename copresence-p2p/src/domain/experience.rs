use crate::infrastructure::error::{P2PError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Domain entity: Unique identifier for a shared experience
///
/// Participants rendezvous on the signalling server under this identifier to
/// form the ad-hoc mesh. Unrelated to any participant's session identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExperienceId(Uuid);

impl ExperienceId {
    /// Create a new random experience ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an experience ID from a string
    pub fn parse(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| P2PError::InvalidExperienceId(e.to_string()))
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for ExperienceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExperienceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_id_new() {
        assert_ne!(ExperienceId::new(), ExperienceId::new());
    }

    #[test]
    fn test_experience_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = ExperienceId::parse(uuid_str).unwrap();
        assert_eq!(id.as_str(), uuid_str);
    }

    #[test]
    fn test_experience_id_parse_invalid() {
        assert!(ExperienceId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_experience_id_display() {
        let id = ExperienceId::new();
        assert!(ExperienceId::parse(&id.to_string()).is_ok());
    }
}
