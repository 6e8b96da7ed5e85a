use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::geometry::{Circle, Position, Rect};

/// Which half of the court an entity belongs to.
///
/// The left paddle is player 1, the right paddle is player 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Held-direction flags for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PressedKeys {
    pub up: bool,
    pub down: bool,
}

impl PressedKeys {
    pub fn union(self, other: PressedKeys) -> PressedKeys {
        PressedKeys {
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.up && !self.down
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    #[serde(flatten)]
    pub position: Position,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub score: u32,
    /// Flags driven by remote controllers. Local keys are merged in per tick.
    pub pressed: PressedKeys,
}

impl Paddle {
    /// Creates a paddle at its home column, vertically centered.
    pub fn new(side: Side, config: &GameConfig) -> Self {
        let mut paddle = Self {
            position: Position::default(),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
            score: 0,
            pressed: PressedKeys::default(),
        };
        paddle.position = paddle.home(side, config);
        paddle
    }

    /// Starting position for a side: `paddle_shift` away from the edge, centered vertically.
    pub fn home(&self, side: Side, config: &GameConfig) -> Position {
        let x = match side {
            Side::Left => config.paddle_shift,
            Side::Right => config.width - config.paddle_shift - self.width,
        };
        Position::new(x, config.center_y() - self.height / 2.0)
    }

    /// Collision rectangle derived from the current position
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn center_y(&self) -> f32 {
        self.position.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    #[serde(flatten)]
    pub position: Position,
    pub radius: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    /// Ball at the center of the court with the canonical serve velocity.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Position::new(config.center_x(), config.center_y()),
            radius: config.ball_radius,
            vx: config.ball_speed,
            vy: config.ball_speed,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    /// Side the ball is currently travelling toward, if any
    pub fn heading(&self) -> Option<Side> {
        if self.vx < 0.0 {
            Some(Side::Left)
        } else if self.vx > 0.0 {
            Some(Side::Right)
        } else {
            None
        }
    }
}
