use crate::application::ConnectionEvent;
use crate::domain::{IceServer, PeerId};
use crate::infrastructure::connection_trait::Connection;
use crate::infrastructure::error::{P2PError, Result};
use matchbox_socket::{
    ChannelConfig, MultipleChannels, RtcIceServerConfig, WebRtcSocket, WebRtcSocketBuilder,
};
use std::sync::{Arc, Mutex};

/// Index of the reliable, ordered data channel
const CHANNEL_RELIABLE: usize = 0;
/// Index of the best-effort, low-latency data channel
const CHANNEL_UNRELIABLE: usize = 1;

/// Infrastructure adapter: WebRTC mesh via Matchbox signalling
///
/// Opens two data channels per peer pair: channel 0 reliable and ordered
/// (identity announcements, critical alignment handoffs), channel 1
/// unreliable (routine alignment refinements, where the next blob supersedes
/// a lost one).
pub struct MatchboxConnection {
    socket: Arc<Mutex<WebRtcSocket<MultipleChannels>>>,
    local_peer_id: Option<PeerId>,
}

impl MatchboxConnection {
    /// Connect to a Matchbox signalling server with default STUN servers
    pub async fn connect_default(signalling_url: &str) -> Result<Self> {
        Self::connect(signalling_url, IceServer::default_stun_servers()).await
    }

    /// Connect to a Matchbox signalling server with custom ICE servers
    pub async fn connect(signalling_url: &str, ice_servers: Vec<IceServer>) -> Result<Self> {
        tracing::info!("Connecting to signalling server: {}", signalling_url);

        let (mut socket, loop_fut) = WebRtcSocketBuilder::new(signalling_url)
            .ice_server(build_ice_server_config(&ice_servers))
            .add_channel(ChannelConfig::reliable())
            .add_channel(ChannelConfig::unreliable())
            .build();

        let webrtc_span = tracing::info_span!("matchbox::webrtc_loop");

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let _enter = webrtc_span.enter();
            let _ = loop_fut.await;
        });

        #[cfg(not(target_arch = "wasm32"))]
        {
            #[cfg(feature = "native")]
            tokio::spawn(async move {
                let _enter = webrtc_span.enter();
                let _ = loop_fut.await;
            });

            #[cfg(not(feature = "native"))]
            compile_error!("Non-WASM builds require the 'native' feature to be enabled");
        }

        let peer_id = wait_for_peer_id(&mut socket).await?;
        tracing::info!("Connected with peer ID: {}", peer_id);

        Ok(MatchboxConnection {
            socket: Arc::new(Mutex::new(socket)),
            local_peer_id: Some(peer_id),
        })
    }

    fn send_on_channel(&mut self, channel: usize, peer: PeerId, data: Vec<u8>) {
        let mut socket = self.socket.lock().unwrap();
        socket
            .channel_mut(channel)
            .send(data.into_boxed_slice(), peer.inner());
    }
}

impl Connection for MatchboxConnection {
    fn local_peer_id(&self) -> Option<PeerId> {
        self.local_peer_id
    }

    fn connected_peers(&self) -> Vec<PeerId> {
        let socket = self.socket.lock().unwrap();
        socket.connected_peers().map(PeerId::new).collect()
    }

    fn send_to(&mut self, peer: PeerId, data: Vec<u8>, reliable: bool) -> Result<()> {
        let channel = if reliable {
            CHANNEL_RELIABLE
        } else {
            CHANNEL_UNRELIABLE
        };

        tracing::debug!(
            "Sending {} bytes to peer {} (reliable: {})",
            data.len(),
            peer,
            reliable
        );
        self.send_on_channel(channel, peer, data);
        Ok(())
    }

    fn broadcast(&mut self, data: Vec<u8>, reliable: bool) -> Result<()> {
        let peers = self.connected_peers();
        tracing::debug!(
            "Broadcasting {} bytes to {} peers (reliable: {})",
            data.len(),
            peers.len(),
            reliable
        );

        for peer in peers {
            self.send_to(peer, data.clone(), reliable)?;
        }
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<ConnectionEvent> {
        let mut events = Vec::new();
        let mut socket = self.socket.lock().unwrap();

        for (peer_id, state) in socket.update_peers() {
            let peer = PeerId::new(peer_id);
            match state {
                matchbox_socket::PeerState::Connected => {
                    events.push(ConnectionEvent::PeerConnected(peer));
                }
                matchbox_socket::PeerState::Disconnected => {
                    events.push(ConnectionEvent::PeerDisconnected(peer));
                }
            }
        }

        // Drain the reliable channel first so announcements are handled
        // before best-effort traffic received in the same poll.
        for channel in [CHANNEL_RELIABLE, CHANNEL_UNRELIABLE] {
            for (peer_id, packet) in socket.channel_mut(channel).receive() {
                events.push(ConnectionEvent::MessageReceived {
                    from: PeerId::new(peer_id),
                    data: packet.to_vec(),
                });
            }
        }

        events
    }
}

/// Build the ICE server configuration for Matchbox
fn build_ice_server_config(ice_servers: &[IceServer]) -> RtcIceServerConfig {
    // Matchbox currently supports a single ICE server config entry
    match ice_servers.first() {
        Some(server) => RtcIceServerConfig {
            urls: server.urls.clone(),
            username: server.username.clone(),
            credential: server.credential.clone(),
        },
        None => RtcIceServerConfig::default(),
    }
}

/// Wait for the signalling server to assign us a peer ID
async fn wait_for_peer_id(socket: &mut WebRtcSocket<MultipleChannels>) -> Result<PeerId> {
    use instant::Duration;

    let start = instant::Instant::now();
    let timeout = Duration::from_secs(5);

    loop {
        socket.update_peers();

        if let Some(id) = socket.id() {
            return Ok(PeerId::new(id));
        }

        if start.elapsed() > timeout {
            return Err(P2PError::ConnectionFailed(
                "Timeout waiting for peer ID".to_string(),
            ));
        }

        platform_sleep(10).await;
    }
}

#[cfg(target_arch = "wasm32")]
async fn platform_sleep(millis: u32) {
    use gloo_timers::future::TimeoutFuture;
    TimeoutFuture::new(millis).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn platform_sleep(millis: u32) {
    #[cfg(feature = "native")]
    {
        use instant::Duration;
        tokio::time::sleep(Duration::from_millis(millis as u64)).await;
    }

    #[cfg(not(feature = "native"))]
    compile_error!("Non-WASM builds require the 'native' feature to be enabled");
}
