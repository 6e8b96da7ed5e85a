//! # Desktop Pong
//!
//! The playable front-end: a macroquad window, two players on one keyboard,
//! and an embedded WebSocket listener so remote controllers can drive either
//! paddle while the game runs.
//!
//! ## Frame Loop
//! Rendering runs at the display rate while the simulation advances in fixed
//! ticks. Each frame the keyboard is polled, as many ticks as the elapsed time
//! allows are stepped through the [`server::sync::Synchronizer`], and the
//! current snapshot is drawn.
//!
//! ## Module Organization
//!
//! ### Input Module (`input`)
//! Keyboard sampling into [`shared::LocalInput`], latching Space until a
//! tick consumes it.
//!
//! ### Network Module (`network`)
//! The remote-control listener on its own tokio runtime.
//!
//! ### Rendering Module (`rendering`)
//! Paddles, ball, score, state captions and a ticks-per-second readout.

pub mod input;
pub mod network;
pub mod rendering;
