//! Ball integration and collision resolution
//!
//! Everything here is a pure function of its inputs: the state machine hands
//! in the current entities and gets back the next ball plus an explicit record
//! of what happened during the step. Scoring decisions are never made here.

use crate::entity::{Ball, Paddle, PressedKeys, Side};

/// Size of the play area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Result of advancing the ball by one tick
#[derive(Debug, Clone, PartialEq)]
pub struct BallStep {
    pub ball: Ball,
    /// Paddle that reflected the ball this tick
    pub paddle_hit: Option<Side>,
    /// Ball bounced off the top or bottom wall
    pub wall_hit: bool,
    /// Ball crossed the left or right boundary
    pub exit: Option<Side>,
}

/// Advances the ball by one fixed tick.
///
/// Explicit Euler with no substeps, so a ball fast enough to jump a paddle in
/// one tick will tunnel through it. A paddle only reflects a ball travelling
/// toward it; this keeps a lingering overlap from flipping `vx` back again on
/// the following tick. When both paddles overlap at once the one in the
/// direction of travel is tested first and at most one hit is honoured.
pub fn advance_ball(ball: &Ball, left: &Paddle, right: &Paddle, bounds: Bounds) -> BallStep {
    let mut next = ball.clone();

    next.position.x += next.vx;
    next.position.y += next.vy;

    let wall_hit = bounce_off_walls(&mut next, bounds.height);

    let candidates = match next.heading() {
        Some(Side::Left) => [(Side::Left, left), (Side::Right, right)],
        _ => [(Side::Right, right), (Side::Left, left)],
    };

    let mut paddle_hit = None;
    for (side, paddle) in candidates {
        if next.heading() == Some(side) && next.circle().intersects_rect(&paddle.rect()) {
            next.vx = -next.vx;
            paddle_hit = Some(side);
            break;
        }
    }

    let exit = if next.position.x < 0.0 {
        Some(Side::Left)
    } else if next.position.x > bounds.width {
        Some(Side::Right)
    } else {
        None
    };

    BallStep {
        ball: next,
        paddle_hit,
        wall_hit,
        exit,
    }
}

fn bounce_off_walls(ball: &mut Ball, height: f32) -> bool {
    let top = ball.radius;
    let bottom = height - ball.radius;

    if ball.position.y < top || ball.position.y > bottom {
        ball.vy = -ball.vy;
        ball.position.y = ball.position.y.clamp(top, bottom);
        true
    } else {
        false
    }
}

/// Moves a paddle vertically according to `held` and keeps it inside the play area.
pub fn move_paddle(paddle: &mut Paddle, held: PressedKeys, height: f32) {
    if held.up {
        paddle.position.y -= paddle.speed;
    }
    if held.down {
        paddle.position.y += paddle.speed;
    }
    paddle.position.y = paddle.position.y.clamp(0.0, height - paddle.height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::geometry::Position;
    use assert_approx_eq::assert_approx_eq;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    fn paddles() -> (Paddle, Paddle) {
        let config = GameConfig::default();
        (
            Paddle::new(Side::Left, &config),
            Paddle::new(Side::Right, &config),
        )
    }

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            position: Position::new(x, y),
            radius: 10.0,
            vx,
            vy,
        }
    }

    #[test]
    fn test_free_flight() {
        let (left, right) = paddles();
        let ball = ball_at(400.0, 300.0, 5.0, 5.0);

        let step = advance_ball(&ball, &left, &right, bounds());

        assert_approx_eq!(step.ball.position.x, 405.0);
        assert_approx_eq!(step.ball.position.y, 305.0);
        assert_eq!(step.ball.vx, 5.0);
        assert_eq!(step.ball.vy, 5.0);
        assert_eq!(step.paddle_hit, None);
        assert!(!step.wall_hit);
        assert_eq!(step.exit, None);
    }

    #[test]
    fn test_left_paddle_reflects() {
        let (mut left, right) = paddles();
        left.position = Position::new(0.0, 280.0);
        left.width = 20.0;
        left.height = 40.0;
        let ball = ball_at(5.0, 300.0, -5.0, 0.0);

        let step = advance_ball(&ball, &left, &right, bounds());

        assert_eq!(step.ball.vx, 5.0);
        assert_eq!(step.paddle_hit, Some(Side::Left));
        assert_eq!(step.exit, None);
    }

    #[test]
    fn test_right_paddle_reflects() {
        let (left, right) = paddles();
        let y = right.center_y();
        let ball = ball_at(right.position.x - 12.0, y, 5.0, 0.0);

        let step = advance_ball(&ball, &left, &right, bounds());

        assert_eq!(step.ball.vx, -5.0);
        assert_eq!(step.paddle_hit, Some(Side::Right));
    }

    #[test]
    fn test_lingering_overlap_flips_once() {
        let (mut left, right) = paddles();
        left.position = Position::new(0.0, 280.0);
        left.width = 20.0;
        left.height = 40.0;
        let ball = ball_at(12.0, 300.0, -2.0, 0.0);

        let first = advance_ball(&ball, &left, &right, bounds());
        assert_eq!(first.paddle_hit, Some(Side::Left));
        assert_eq!(first.ball.vx, 2.0);

        // Still inside the paddle on the next tick but moving away from it
        let second = advance_ball(&first.ball, &left, &right, bounds());
        assert!(second.ball.circle().intersects_rect(&left.rect()));
        assert_eq!(second.paddle_hit, None);
        assert_eq!(second.ball.vx, 2.0);
    }

    #[test]
    fn test_ball_moving_away_passes_through() {
        let (mut left, right) = paddles();
        left.position = Position::new(0.0, 280.0);
        left.width = 20.0;
        left.height = 40.0;
        let ball = ball_at(5.0, 300.0, 5.0, 0.0);

        let step = advance_ball(&ball, &left, &right, bounds());
        assert_eq!(step.paddle_hit, None);
        assert_eq!(step.ball.vx, 5.0);
    }

    #[test]
    fn test_double_overlap_prefers_direction_of_travel() {
        let (mut left, mut right) = paddles();
        // Degenerate court where both paddles cover the ball
        left.position = Position::new(390.0, 250.0);
        right.position = Position::new(395.0, 250.0);
        let ball = ball_at(402.0, 300.0, -2.0, 0.0);

        let step = advance_ball(&ball, &left, &right, bounds());
        assert_eq!(step.paddle_hit, Some(Side::Left));
        assert_eq!(step.ball.vx, 2.0);

        let ball = ball_at(398.0, 300.0, 2.0, 0.0);
        let step = advance_ball(&ball, &left, &right, bounds());
        assert_eq!(step.paddle_hit, Some(Side::Right));
        assert_eq!(step.ball.vx, -2.0);
    }

    #[test]
    fn test_top_wall_bounce_clamps() {
        let (left, right) = paddles();
        let ball = ball_at(400.0, 12.0, 5.0, -5.0);

        let step = advance_ball(&ball, &left, &right, bounds());

        assert!(step.wall_hit);
        assert_eq!(step.ball.vy, 5.0);
        assert_approx_eq!(step.ball.position.y, 10.0);
        assert_eq!(step.paddle_hit, None);
    }

    #[test]
    fn test_bottom_wall_bounce_clamps() {
        let (left, right) = paddles();
        let ball = ball_at(400.0, 588.0, 5.0, 5.0);

        let step = advance_ball(&ball, &left, &right, bounds());

        assert!(step.wall_hit);
        assert_eq!(step.ball.vy, -5.0);
        assert_approx_eq!(step.ball.position.y, 590.0);
    }

    #[test]
    fn test_wall_invariant_over_many_ticks() {
        let (left, right) = paddles();
        let mut ball = ball_at(400.0, 300.0, 0.0, 7.5);

        for _ in 0..500 {
            let before = ball.vy;
            let step = advance_ball(&ball, &left, &right, bounds());
            let raw_y = ball.position.y + ball.vy;
            let escaped = raw_y < ball.radius || raw_y > 600.0 - ball.radius;

            assert_eq!(step.wall_hit, escaped);
            if escaped {
                assert_eq!(step.ball.vy, -before);
            } else {
                assert_eq!(step.ball.vy, before);
            }
            assert!(step.ball.position.y >= ball.radius);
            assert!(step.ball.position.y <= 600.0 - ball.radius);
            ball = step.ball;
        }
    }

    #[test]
    fn test_exit_reported_not_resolved() {
        let (left, right) = paddles();
        let ball = ball_at(797.0, 100.0, 5.0, 0.0);

        let step = advance_ball(&ball, &left, &right, bounds());
        assert_eq!(step.exit, Some(Side::Right));
        assert!(step.ball.position.x > 800.0);

        let ball = ball_at(3.0, 100.0, -5.0, 0.0);
        let step = advance_ball(&ball, &left, &right, bounds());
        assert_eq!(step.exit, Some(Side::Left));
    }

    #[test]
    fn test_move_paddle_clamps() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(Side::Left, &config);
        let up = PressedKeys {
            up: true,
            down: false,
        };
        let down = PressedKeys {
            up: false,
            down: true,
        };

        let start = paddle.position.y;
        move_paddle(&mut paddle, up, config.height);
        assert_approx_eq!(paddle.position.y, start - paddle.speed);

        for _ in 0..100 {
            move_paddle(&mut paddle, up, config.height);
        }
        assert_eq!(paddle.position.y, 0.0);

        for _ in 0..100 {
            move_paddle(&mut paddle, down, config.height);
        }
        assert_eq!(paddle.position.y, config.height - paddle.height);
        assert_eq!(paddle.position.x, config.paddle_shift);
    }

    #[test]
    fn test_move_paddle_opposing_keys_cancel() {
        let config = GameConfig::default();
        let mut paddle = Paddle::new(Side::Right, &config);
        let start = paddle.position;

        move_paddle(
            &mut paddle,
            PressedKeys {
                up: true,
                down: true,
            },
            config.height,
        );
        assert_eq!(paddle.position, start);
    }
}
