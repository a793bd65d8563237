use crate::infrastructure::wire::WireError;

/// Infrastructure layer errors
#[derive(Debug, thiserror::Error)]
pub enum P2PError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid experience ID: {0}")]
    InvalidExperienceId(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Wire encoding failed: {0}")]
    Wire(#[from] WireError),
}

pub type Result<T> = std::result::Result<T, P2PError>;
