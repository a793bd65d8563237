//! Wire codec for the per-peer data channels.
//!
//! Two message families share the channels: opaque alignment blobs produced
//! by the tracking subsystem, and UTF-8 text commands. Classification is
//! attempt-decode-first: a payload is treated as alignment data when it
//! carries the alignment magic, as an identity announcement when it parses as
//! `SessionID:<identity>`, and is otherwise ignored for forward
//! compatibility. Alignment must be tried first so that tracking payloads are
//! never misread as commands.

use copresence_core::SessionIdentity;

/// Prefix of an identity-announcement message
pub const SESSION_ID_PREFIX: &str = "SessionID:";

/// Magic marking a payload as a framed alignment blob
const ALIGNMENT_MAGIC: &[u8; 4] = b"ALGN";

/// Encoding errors for outgoing messages
///
/// These indicate an invariant violation in the caller's data, not a
/// transport condition; the affected send is reported and skipped rather than
/// aborting the session.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WireError {
    #[error("cannot encode an empty session identity")]
    EmptyIdentity,

    #[error("session identity is not representable in the text protocol")]
    UnencodableIdentity,
}

/// A classified incoming payload
#[derive(Debug, Clone, PartialEq)]
pub enum WireMessage {
    /// Opaque alignment data for the tracking subsystem
    Alignment(Vec<u8>),

    /// A peer announced its session identity
    Announcement(SessionIdentity),

    /// Unrecognized payload; tolerated and ignored
    Unknown,
}

/// Classify an incoming payload
pub fn decode(bytes: &[u8]) -> WireMessage {
    if let Some(blob) = bytes.strip_prefix(ALIGNMENT_MAGIC) {
        return WireMessage::Alignment(blob.to_vec());
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        if let Some(raw) = text.strip_prefix(SESSION_ID_PREFIX) {
            if let Ok(identity) = SessionIdentity::new(raw) {
                return WireMessage::Announcement(identity);
            }
        }
    }

    WireMessage::Unknown
}

/// Frame an alignment blob for the wire
pub fn encode_alignment(blob: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(ALIGNMENT_MAGIC.len() + blob.len());
    payload.extend_from_slice(ALIGNMENT_MAGIC);
    payload.extend_from_slice(blob);
    payload
}

/// Encode an identity announcement
pub fn encode_announcement(identity: &SessionIdentity) -> Result<Vec<u8>, WireError> {
    let raw = identity.as_str();
    if raw.is_empty() {
        return Err(WireError::EmptyIdentity);
    }
    // Identities built through `SessionIdentity::new` are already clean, but
    // deserialized ones bypass that validation.
    if raw.chars().any(char::is_control) {
        return Err(WireError::UnencodableIdentity);
    }
    Ok(format!("{SESSION_ID_PREFIX}{raw}").into_bytes())
}
