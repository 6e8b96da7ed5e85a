//! # Pong simulation core
//!
//! Everything the authoritative host needs to run a match, with no knowledge
//! of windows, keyboards or sockets:
//!
//! - [`geometry`]: positions, rectangles and circles for collision tests
//! - [`entity`]: paddles and the ball
//! - [`physics`]: the pure per-tick ball step and paddle movement
//! - [`game`]: the Idle / Playing / Finished state machine, scoring and the
//!   rally-driven speed ramp
//! - [`protocol`]: JSON messages exchanged with remote controllers
//! - [`input`]: the contract a local front-end implements to feed key state
//! - [`config`]: tunable parameters and their defaults
//!
//! ```rust
//! use shared::{Game, GameConfig, GameState, LocalInput, RemoteInput};
//!
//! let mut game = Game::new(GameConfig::default());
//! game.apply_remote_input(&RemoteInput::Start);
//! assert_eq!(game.state(), GameState::Playing);
//!
//! let outcome = game.update(&LocalInput::default());
//! assert!(outcome.should_publish());
//! let snapshot = game.snapshot();
//! assert_eq!(snapshot.ball.position.x, 405.0);
//! ```

pub mod config;
pub mod entity;
pub mod game;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod protocol;

pub use config::{ConfigError, GameConfig};
pub use entity::{Ball, Paddle, PressedKeys, Side};
pub use game::{Game, GameState, TickOutcome};
pub use geometry::{Circle, Position, Rect};
pub use input::{Control, InputSource, LocalInput};
pub use physics::{advance_ball, move_paddle, BallStep, Bounds};
pub use protocol::{Actor, ProtocolError, RemoteInput, Snapshot, Target};
