use crate::application::{SessionConfig, SyncCoordinator, SyncEffect};
use crate::domain::{ExperienceId, PeerId};
use crate::infrastructure::{connection::MatchboxConnection, error::Result, Connection};
use copresence_core::{SceneCommand, SessionIdentity, TrackingEvent};

/// Updates surfaced to the embedding application after a poll
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// Alignment data from a peer, to hand to the tracking subsystem
    AlignmentReceived { from: PeerId, blob: Vec<u8> },

    /// Command for the scene collaborator
    Scene(SceneCommand),
}

/// Application service: one device's participation in a shared experience
///
/// Wires a transport to the `SyncCoordinator`: transport events and local
/// tracking events are funneled through the coordinator (the single
/// serialization point), send effects are executed on the transport after the
/// coordinator returns, and the remaining effects surface as
/// `SessionUpdate`s.
pub struct CollabSession<C: Connection> {
    experience_id: ExperienceId,
    connection: C,
    coordinator: SyncCoordinator,
}

impl CollabSession<MatchboxConnection> {
    /// Start a new shared experience under a fresh experience ID
    pub async fn host(config: SessionConfig) -> Result<Self> {
        Self::join(config, ExperienceId::new()).await
    }

    /// Join an existing shared experience
    pub async fn join(config: SessionConfig, experience_id: ExperienceId) -> Result<Self> {
        let room_url = format!("{}/{}", config.signalling_server, experience_id.as_str());
        tracing::info!("Joining experience {} at {}", experience_id, room_url);

        let connection = MatchboxConnection::connect(&room_url, config.ice_servers).await?;
        Ok(Self::with_connection(connection, experience_id))
    }
}

impl<C: Connection> CollabSession<C> {
    /// Build a session over an already-established transport
    pub fn with_connection(connection: C, experience_id: ExperienceId) -> Self {
        Self {
            experience_id,
            connection,
            coordinator: SyncCoordinator::new(),
        }
    }

    pub fn experience_id(&self) -> &ExperienceId {
        &self.experience_id
    }

    pub fn local_peer_id(&self) -> Option<PeerId> {
        self.connection.local_peer_id()
    }

    /// Peers currently registered with the protocol
    pub fn connected_peers(&self) -> Vec<PeerId> {
        self.coordinator.registry().connected_peers()
    }

    /// The local frame identity most recently handed to the session
    pub fn local_identity(&self) -> Option<&SessionIdentity> {
        self.coordinator.local_identity()
    }

    /// Read-only view of the protocol state
    pub fn coordinator(&self) -> &SyncCoordinator {
        &self.coordinator
    }

    /// Drain transport events through the coordinator
    ///
    /// Call regularly from the application's event loop.
    pub fn poll(&mut self) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();

        for event in self.connection.poll_events() {
            let effects = self.coordinator.handle_connection_event(event);
            self.execute(effects, &mut updates);
        }
        updates
    }

    /// Forward an event from the local spatial-tracking collaborator
    pub fn handle_tracking_event(&mut self, event: TrackingEvent) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();
        let effects = self.coordinator.handle_tracking_event(event);
        self.execute(effects, &mut updates);
        updates
    }

    /// Execute send effects on the transport; surface the rest
    ///
    /// Transport send failures are the transport's to handle (the protocol is
    /// self-healing); they are logged and do not interrupt the batch.
    fn execute(&mut self, effects: Vec<SyncEffect>, updates: &mut Vec<SessionUpdate>) {
        for effect in effects {
            match effect {
                SyncEffect::SendTo {
                    peer,
                    payload,
                    reliable,
                } => {
                    if let Err(e) = self.connection.send_to(peer, payload, reliable) {
                        tracing::warn!("Send to {} failed: {}", peer, e);
                    }
                }
                SyncEffect::Broadcast { payload, reliable } => {
                    if let Err(e) = self.connection.broadcast(payload, reliable) {
                        tracing::warn!("Broadcast failed: {}", e);
                    }
                }
                SyncEffect::ApplyAlignment { from, blob } => {
                    updates.push(SessionUpdate::AlignmentReceived { from, blob });
                }
                SyncEffect::Scene(command) => {
                    updates.push(SessionUpdate::Scene(command));
                }
            }
        }
    }
}
