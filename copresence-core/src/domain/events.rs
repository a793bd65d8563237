use crate::domain::{AnchorId, SessionIdentity};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Events consumed from the local spatial-tracking collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TrackingEvent {
    /// The local frame identity changed (tracking reset or re-anchored)
    FrameIdentityChanged { identity: SessionIdentity },

    /// Fresh alignment data is ready to relay to peers
    ///
    /// `critical` selects the reliable delivery tier; routine refinements go
    /// best-effort. Alignment data is monotonically superseded, so a dropped
    /// non-critical blob is replaced by the next one.
    AlignmentReady { blob: Vec<u8>, critical: bool },

    /// An anchor was established relative to a participant's frame
    AnchorEstablished {
        anchor_id: AnchorId,
        owner: SessionIdentity,
    },
}

/// Commands emitted to the scene collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneCommand {
    /// Remove every anchor in the set from the scene
    RemoveAnchors { anchor_ids: HashSet<AnchorId> },
}
