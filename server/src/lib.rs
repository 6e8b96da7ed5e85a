//! # Remote Control Host Library
//!
//! This library hosts the authoritative Pong simulation and exposes it to
//! remote controllers over WebSocket. Controllers send JSON key events and
//! receive the full game snapshot every time the game changes.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Simulation
//! A single loop owns the [`shared::Game`] and advances it at a fixed tick
//! rate. Nothing else ever mutates game state.
//!
//! ### Controller Management
//! Handles the lifecycle of controller connections:
//! - WebSocket handshake and capacity limits
//! - Decoding inbound events, ignoring frames that are not understood
//! - Releasing a paddle's remote keys when its last controller leaves
//!
//! ### Snapshot Fan-out
//! Every played tick publishes a new snapshot. Each connection forwards only
//! the newest one, so a slow controller falls behind instead of stalling the
//! game.
//!
//! ## Module Organization
//!
//! - `client_manager`: connected controllers and their counters
//! - `error`: [`error::ServerError`]
//! - `network`: listener, per-connection tasks and the headless tick loop
//! - `sync`: command queue in, snapshot channel out
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = Server::bind("127.0.0.1:8080", ServerConfig::default()).await?;
//!
//!     // Accepts controllers and ticks the game until the task is dropped
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client_manager;
pub mod error;
pub mod network;
pub mod sync;
