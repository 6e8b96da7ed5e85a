//! Remote-control listener embedded in the desktop game

use log::info;
use server::client_manager::ClientManager;
use server::error::{Result, ServerError};
use server::network::accept_loop;
use server::sync::RemoteHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::RwLock;

/// Background tokio runtime serving WebSocket controllers.
///
/// The render loop stays on the main thread and keeps ownership of the
/// game; this side only ever talks to it through the [`RemoteHandle`].
pub struct RemoteControl {
    // Dropping the runtime stops the listener and every connection task
    _runtime: Runtime,
    local_addr: SocketAddr,
    clients: Arc<RwLock<ClientManager>>,
}

impl RemoteControl {
    pub fn start(addr: &str, handle: RemoteHandle, max_clients: usize) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("remote-control")
            .enable_all()
            .build()?;

        let listener = runtime
            .block_on(TcpListener::bind(addr))
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        let clients = Arc::new(RwLock::new(ClientManager::new(max_clients)));
        runtime.spawn(accept_loop(listener, handle, Arc::clone(&clients)));

        info!("Remote control listening on ws://{}", local_addr);

        Ok(RemoteControl {
            _runtime: runtime,
            local_addr,
            clients,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Connected controllers. Reports zero while the registry is busy
    /// rather than blocking the frame.
    pub fn controller_count(&self) -> usize {
        self.clients
            .try_read()
            .map(|clients| clients.len())
            .unwrap_or(0)
    }
}
