use copresence_p2p::application::ConnectionEvent;
use copresence_p2p::domain::PeerId;
use copresence_p2p::infrastructure::Connection;
use copresence_p2p::Result;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A payload recorded by the mock network, with its delivery tier
#[derive(Debug, Clone)]
pub struct SentPacket {
    pub from: PeerId,
    pub to: PeerId,
    pub data: Vec<u8>,
    pub reliable: bool,
}

/// Shared in-memory network bus (simulates signalling + data channels)
#[derive(Default)]
pub struct MockNetwork {
    peers: HashMap<PeerId, Arc<Mutex<VecDeque<(PeerId, Vec<u8>)>>>>,
    events: VecDeque<(PeerId, ConnectionEvent)>,
    /// Every packet that crossed the bus, for assertions
    pub sent: Vec<SentPacket>,
}

pub fn create_mock_network() -> Arc<Mutex<MockNetwork>> {
    Arc::new(Mutex::new(MockNetwork::default()))
}

/// Mock transport with synchronous in-memory delivery
///
/// Clones share the same peer identity and inbox, so a test can hand one
/// handle to a session and keep another to drive disconnection.
#[derive(Clone)]
pub struct MockConnection {
    local_id: PeerId,
    network: Arc<Mutex<MockNetwork>>,
    inbox: Arc<Mutex<VecDeque<(PeerId, Vec<u8>)>>>,
}

impl MockConnection {
    /// Join the mock network, notifying all existing peers
    pub fn new(network: Arc<Mutex<MockNetwork>>) -> Self {
        let local_id = PeerId::new(matchbox_socket::PeerId(Uuid::new_v4()));
        let inbox = Arc::new(Mutex::new(VecDeque::new()));

        let mut bus = network.lock().unwrap();
        let existing: Vec<PeerId> = bus.peers.keys().copied().collect();
        bus.peers.insert(local_id, inbox.clone());

        for peer in existing {
            bus.events
                .push_back((local_id, ConnectionEvent::PeerConnected(peer)));
            bus.events
                .push_back((peer, ConnectionEvent::PeerConnected(local_id)));
        }
        drop(bus);

        Self {
            local_id,
            network,
            inbox,
        }
    }

    /// Leave the mock network, notifying all remaining peers
    pub fn disconnect(&mut self) {
        let mut bus = self.network.lock().unwrap();
        bus.peers.remove(&self.local_id);

        let remaining: Vec<PeerId> = bus.peers.keys().copied().collect();
        for peer in remaining {
            bus.events
                .push_back((peer, ConnectionEvent::PeerDisconnected(self.local_id)));
        }
    }

    pub fn id(&self) -> PeerId {
        self.local_id
    }
}

impl Connection for MockConnection {
    fn local_peer_id(&self) -> Option<PeerId> {
        Some(self.local_id)
    }

    fn connected_peers(&self) -> Vec<PeerId> {
        self.network
            .lock()
            .unwrap()
            .peers
            .keys()
            .filter(|&&id| id != self.local_id)
            .copied()
            .collect()
    }

    fn send_to(&mut self, peer: PeerId, data: Vec<u8>, reliable: bool) -> Result<()> {
        let mut bus = self.network.lock().unwrap();
        bus.sent.push(SentPacket {
            from: self.local_id,
            to: peer,
            data: data.clone(),
            reliable,
        });

        if let Some(inbox) = bus.peers.get(&peer) {
            inbox.lock().unwrap().push_back((self.local_id, data));
        }
        Ok(())
    }

    fn broadcast(&mut self, data: Vec<u8>, reliable: bool) -> Result<()> {
        for peer in self.connected_peers() {
            self.send_to(peer, data.clone(), reliable)?;
        }
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<ConnectionEvent> {
        let mut events = Vec::new();

        let mut bus = self.network.lock().unwrap();
        let mut remaining = VecDeque::new();
        for (target, event) in bus.events.drain(..) {
            if target == self.local_id {
                events.push(event);
            } else {
                remaining.push_back((target, event));
            }
        }
        bus.events = remaining;
        drop(bus);

        let mut inbox = self.inbox.lock().unwrap();
        while let Some((from, data)) = inbox.pop_front() {
            events.push(ConnectionEvent::MessageReceived { from, data });
        }

        events
    }
}
