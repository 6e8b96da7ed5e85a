//! WebSocket transport and the headless simulation loop

use crate::client_manager::ClientManager;
use crate::error::{Result, ServerError};
use crate::sync::{self, GameCommand, RemoteHandle, Synchronizer};
use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use shared::{Game, GameConfig, GameState, LocalInput, RemoteInput};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::RwLock;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

/// Capacity of the command queue between network tasks and the loop
pub const COMMAND_QUEUE_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub game: GameConfig,
    pub tick_rate: u32,
    pub max_clients: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            tick_rate: 60,
            max_clients: 8,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        self.game.validate()?;
        if !(1..=1000).contains(&self.tick_rate) {
            return Err(ServerError::TickRate(self.tick_rate));
        }
        Ok(())
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate as f64)
    }
}

/// Headless authoritative host: accepts remote controllers and runs the game
/// at a fixed tick rate with no local input.
pub struct Server {
    listener: TcpListener,
    clients: Arc<RwLock<ClientManager>>,
    game: Game,
    synchronizer: Synchronizer,
    handle: RemoteHandle,
    tick_duration: Duration,
}

impl Server {
    pub async fn bind(addr: &str, config: ServerConfig) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        info!("Remote control listening on ws://{}", listener.local_addr()?);

        let game = Game::new(config.game);
        let (synchronizer, handle) = sync::channel(game.snapshot(), COMMAND_QUEUE_SIZE);

        Ok(Server {
            listener,
            clients: Arc::new(RwLock::new(ClientManager::new(config.max_clients))),
            game,
            synchronizer,
            handle,
            tick_duration: config.tick_duration(),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Runs until the task is dropped. Connection failures never stop the loop.
    pub async fn run(self) -> Result<()> {
        let Server {
            listener,
            clients,
            mut game,
            mut synchronizer,
            handle,
            tick_duration,
        } = self;

        tokio::spawn(accept_loop(listener, handle, Arc::clone(&clients)));

        let mut tick_interval = interval(tick_duration);
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_tick = Instant::now();
        let mut tick: u64 = 0;
        let local = LocalInput::default();

        info!("Server started, waiting for a start message");

        loop {
            tick_interval.tick().await;
            let now = Instant::now();
            let dt = now.duration_since(last_tick).as_secs_f32();
            last_tick = now;

            let outcome = synchronizer.step(&mut game, &local);
            tick += 1;

            if outcome.previous != outcome.state && outcome.state == GameState::Finished {
                let (left, right) = game.scores();
                info!("Match over: {} - {}", left, right);
            }

            // Periodic performance monitoring
            if tick % 60 == 0 {
                let client_count = clients.read().await.len();
                if client_count > 0 {
                    debug!(
                        "Tick {}: {} controllers, {:.1}Hz, {:?}, rally {}, level {}",
                        tick,
                        client_count,
                        1.0 / dt.max(f32::EPSILON),
                        game.state(),
                        game.rally(),
                        game.level()
                    );
                }
            }
        }
    }
}

/// Accepts WebSocket controllers forever, one task per connection.
pub async fn accept_loop(
    listener: TcpListener,
    handle: RemoteHandle,
    clients: Arc<RwLock<ClientManager>>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let handle = handle.clone();
                let clients = Arc::clone(&clients);
                tokio::spawn(async move {
                    handle_connection(stream, addr, handle, clients).await;
                });
            }
            Err(e) => {
                error!("Error accepting connection: {}", e);
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        }
    }
}

/// Serves one controller until it disconnects.
///
/// Inbound frames become [`GameCommand`]s; a separate writer task forwards
/// the latest snapshot whenever it changes. A stalled socket only holds up
/// its own writer.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    handle: RemoteHandle,
    clients: Arc<RwLock<ClientManager>>,
) {
    let ws = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake with {} failed: {}", addr, e);
            return;
        }
    };
    let (mut sink, mut source) = ws.split();

    let client_id = clients.write().await.add_client(addr);
    let Some(client_id) = client_id else {
        warn!("Rejecting controller from {}: server full", addr);
        let frame = CloseFrame {
            code: CloseCode::Again,
            reason: "Server full".into(),
        };
        let _ = sink.send(Message::Close(Some(frame))).await;
        return;
    };

    let mut snapshots = handle.subscribe();
    let writer = tokio::spawn(async move {
        loop {
            if snapshots.changed().await.is_err() {
                break;
            }
            let snapshot = snapshots.borrow_and_update().clone();
            let text = match snapshot.to_json() {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to encode snapshot: {}", e);
                    continue;
                }
            };
            if let Err(e) = sink.send(Message::Text(text.into())).await {
                debug!("Snapshot delivery to controller {} failed: {}", client_id, e);
                break;
            }
        }
    });

    while let Some(message) = source.next().await {
        match message {
            Ok(Message::Text(text)) => match RemoteInput::from_json(&text) {
                Ok(input) => {
                    debug!("Controller {}: {:?}", client_id, input);
                    clients.write().await.record_input(client_id, &input);
                    if !handle.send(GameCommand::Remote(input)).await {
                        break;
                    }
                }
                Err(e) => {
                    debug!("Controller {} sent unusable frame: {}", client_id, e);
                    clients.write().await.record_ignored(client_id);
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Connection to controller {} lost: {}", client_id, e);
                break;
            }
        }
    }

    writer.abort();

    let released = clients.write().await.remove_client(&client_id);
    for actor in released.unwrap_or_default() {
        handle.send(GameCommand::Release { actor }).await;
    }
}
