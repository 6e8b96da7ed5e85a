//! JSON wire format spoken with remote controllers
//!
//! Inbound frames are key events, outbound frames are full state snapshots:
//!
//! ```text
//! -> {"type":"keydown","actor":"p2","target":"up"}
//! <- {"player1":{..},"player2":{..},"ball":{..},"status":"playing","rally":3,"level":0}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{Ball, Paddle, Side};
use crate::game::GameState;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Which paddle a remote event drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    P1,
    P2,
}

impl Actor {
    pub fn side(self) -> Side {
        match self {
            Actor::P1 => Side::Left,
            Actor::P2 => Side::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Up,
    Down,
}

/// An input event received from a remote controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RemoteInput {
    /// Same meaning as the local start/continue key
    Start,
    Keydown { actor: Actor, target: Target },
    Keyup { actor: Actor, target: Target },
}

impl RemoteInput {
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Paddle this event touches, `None` for `start`
    pub fn actor(&self) -> Option<Actor> {
        match self {
            RemoteInput::Start => None,
            RemoteInput::Keydown { actor, .. } | RemoteInput::Keyup { actor, .. } => Some(*actor),
        }
    }
}

/// Read-only projection of the game published after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player1: Paddle,
    pub player2: Paddle,
    pub ball: Ball,
    pub status: GameState,
    pub rally: u32,
    pub level: u32,
}

impl Snapshot {
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.player1,
            Side::Right => &self.player2,
        }
    }

    pub fn score_text(&self) -> String {
        format!("{} - {}", self.player1.score, self.player2.score)
    }
}
