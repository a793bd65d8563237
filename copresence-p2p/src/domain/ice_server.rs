use serde::{Deserialize, Serialize};

/// ICE server configuration for WebRTC connectivity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceServer {
    /// Server URLs (multiple for failover)
    pub urls: Vec<String>,
    /// Username (required for TURN)
    pub username: Option<String>,
    /// Credential (required for TURN)
    pub credential: Option<String>,
}

impl IceServer {
    /// STUN server, no authentication
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }

    /// TURN server with authentication
    pub fn turn(url: impl Into<String>, username: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: Some(username.into()),
            credential: Some(credential.into()),
        }
    }

    /// Public STUN servers used when no custom servers are configured
    pub fn default_stun_servers() -> Vec<Self> {
        vec![
            Self::stun("stun:stun.l.google.com:19302"),
            Self::stun("stun:stun1.l.google.com:19302"),
        ]
    }
}
