//! Game parameters and their defaults

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;
pub const MAX_SCORE: u32 = 11;
pub const INIT_BALL_VELOCITY: f32 = 5.0;
pub const INIT_PADDLE_SPEED: f32 = 10.0;
pub const SPEED_UPDATE_COUNT: u32 = 6;
pub const SPEED_INCREMENT: f32 = 0.5;
pub const PADDLE_WIDTH: f32 = 15.0;
pub const PADDLE_HEIGHT: f32 = 80.0;
pub const PADDLE_SHIFT: f32 = 20.0;
pub const BALL_RADIUS: f32 = 8.0;

/// Rejected parameter combinations
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("max score must be at least 1")]
    ZeroMaxScore,

    #[error("rallies per level must be at least 1")]
    ZeroRallyPerLevel,

    #[error("paddles ({paddle_span} units) do not fit in a {width} unit wide world")]
    PaddlesOverlap { paddle_span: f32, width: f32 },

    #[error("{name} ({value}) does not fit in a {height} unit tall world")]
    TooTall {
        name: &'static str,
        value: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub max_score: u32,
    /// Magnitude of each ball velocity component at serve time
    pub ball_speed: f32,
    pub paddle_speed: f32,
    pub rally_per_level: u32,
    pub speed_increment: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between a paddle and its side of the world
    pub paddle_shift: f32,
    pub ball_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            max_score: MAX_SCORE,
            ball_speed: INIT_BALL_VELOCITY,
            paddle_speed: INIT_PADDLE_SPEED,
            rally_per_level: SPEED_UPDATE_COUNT,
            speed_increment: SPEED_INCREMENT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_shift: PADDLE_SHIFT,
            ball_radius: BALL_RADIUS,
        }
    }
}

impl GameConfig {
    /// Checks the geometry contract the simulation relies on.
    ///
    /// The engine itself treats a bad configuration as a programming error,
    /// so anything built from user input goes through here first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("ball speed", self.ball_speed),
            ("paddle speed", self.paddle_speed),
            ("paddle width", self.paddle_width),
            ("paddle height", self.paddle_height),
            ("ball radius", self.ball_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(self.speed_increment.is_finite() && self.speed_increment >= 0.0) {
            return Err(ConfigError::NotPositive {
                name: "speed increment",
                value: self.speed_increment,
            });
        }
        if self.max_score == 0 {
            return Err(ConfigError::ZeroMaxScore);
        }
        if self.rally_per_level == 0 {
            return Err(ConfigError::ZeroRallyPerLevel);
        }

        let paddle_span = 2.0 * (self.paddle_shift.max(0.0) + self.paddle_width);
        if paddle_span >= self.width {
            return Err(ConfigError::PaddlesOverlap {
                paddle_span,
                width: self.width,
            });
        }
        if self.paddle_height >= self.height {
            return Err(ConfigError::TooTall {
                name: "paddle height",
                value: self.paddle_height,
                height: self.height,
            });
        }
        if 2.0 * self.ball_radius >= self.height {
            return Err(ConfigError::TooTall {
                name: "ball diameter",
                value: 2.0 * self.ball_radius,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.max_score, 11);
        assert_eq!(config.ball_speed, 5.0);
        assert_eq!(config.paddle_speed, 10.0);
        assert_eq!(config.rally_per_level, 6);
        assert_eq!(config.speed_increment, 0.5);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let config = GameConfig {
            ball_radius: -1.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                name: "ball radius",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_zero_counters_rejected() {
        let config = GameConfig {
            max_score: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxScore));

        let config = GameConfig {
            rally_per_level: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRallyPerLevel));
    }

    #[test]
    fn test_oversized_paddles_rejected() {
        let config = GameConfig {
            paddle_width: 400.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddlesOverlap { .. })
        ));

        let config = GameConfig {
            paddle_height: 600.0,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TooTall { .. })));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NotPositive {
            name: "width",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "width must be positive, got 0");
    }
}
