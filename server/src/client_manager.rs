//! Bookkeeping for connected remote controllers
//!
//! This module tracks every live WebSocket controller:
//! - Connection lifecycle (connect, disconnect) and capacity limits
//! - Which paddles each controller has driven, so their flags can be
//!   released when the controller goes away
//! - Per-controller message counters for diagnostics
//!
//! Remote controllers are trusted; there is no authentication and any
//! controller may drive either paddle.

use log::info;
use shared::{Actor, RemoteInput};
use std::collections::{BTreeSet, HashMap};
use std::net::SocketAddr;
use std::time::Instant;

/// A connected remote controller
#[derive(Debug)]
pub struct RemoteClient {
    /// Unique identifier assigned on connect
    pub id: u32,
    /// Peer address of the WebSocket connection
    pub addr: SocketAddr,
    /// When the connection was registered
    pub connected_at: Instant,
    /// Paddles this controller has pressed keys for
    pub driven: BTreeSet<Actor>,
    pub messages_received: u64,
    /// Frames that did not decode to a known event
    pub messages_ignored: u64,
}

impl RemoteClient {
    pub fn new(id: u32, addr: SocketAddr) -> Self {
        Self {
            id,
            addr,
            connected_at: Instant::now(),
            driven: BTreeSet::new(),
            messages_received: 0,
            messages_ignored: 0,
        }
    }

    /// Records a decoded event and remembers the paddle it drives.
    pub fn record_input(&mut self, input: &RemoteInput) {
        self.messages_received += 1;
        if let RemoteInput::Keydown { actor, .. } = input {
            self.driven.insert(*actor);
        }
    }

    pub fn record_ignored(&mut self) {
        self.messages_received += 1;
        self.messages_ignored += 1;
    }
}

/// Registry of all live remote controllers
pub struct ClientManager {
    clients: HashMap<u32, RemoteClient>,
    next_client_id: u32,
    max_clients: usize,
}

impl ClientManager {
    /// Client IDs start at 1 and are never reused.
    pub fn new(max_clients: usize) -> Self {
        Self {
            clients: HashMap::new(),
            next_client_id: 1,
            max_clients,
        }
    }

    /// Registers a new controller. Returns `None` when the host is full.
    pub fn add_client(&mut self, addr: SocketAddr) -> Option<u32> {
        if self.clients.len() >= self.max_clients {
            return None;
        }

        let client_id = self.next_client_id;
        self.next_client_id += 1;

        info!("Remote controller {} connected from {}", client_id, addr);
        self.clients.insert(client_id, RemoteClient::new(client_id, addr));

        Some(client_id)
    }

    /// Removes a controller and returns the paddles whose remote flags should
    /// now be released: those it drove that no remaining controller drives.
    pub fn remove_client(&mut self, client_id: &u32) -> Option<Vec<Actor>> {
        let client = self.clients.remove(client_id)?;
        info!(
            "Remote controller {} disconnected after {:.1}s ({} messages, {} ignored)",
            client.id,
            client.connected_at.elapsed().as_secs_f32(),
            client.messages_received,
            client.messages_ignored
        );

        let orphaned = client
            .driven
            .iter()
            .copied()
            .filter(|actor| !self.is_driven(*actor))
            .collect();
        Some(orphaned)
    }

    /// True when any live controller has driven `actor`
    pub fn is_driven(&self, actor: Actor) -> bool {
        self.clients.values().any(|c| c.driven.contains(&actor))
    }

    pub fn record_input(&mut self, client_id: u32, input: &RemoteInput) -> bool {
        match self.clients.get_mut(&client_id) {
            Some(client) => {
                client.record_input(input);
                true
            }
            None => false,
        }
    }

    pub fn record_ignored(&mut self, client_id: u32) -> bool {
        match self.clients.get_mut(&client_id) {
            Some(client) => {
                client.record_ignored();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
