//! Match state machine
//!
//! ```text
//!   Idle --start--> Playing --score reaches max--> Finished --start--> Idle
//! ```
//!
//! [`Game`] owns both paddles, the ball, the score pair and the rally/level
//! counters. It is driven by [`Game::update`] once per tick and by
//! [`Game::apply_remote_input`] whenever a remote controller speaks.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::entity::{Ball, Paddle, Side};
use crate::input::{Control, InputSource};
use crate::physics::{advance_ball, move_paddle, Bounds};
use crate::protocol::{RemoteInput, Snapshot, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Idle,
    Playing,
    Finished,
}

/// Signals that move the state machine along its edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Finish,
    Restart,
}

impl GameState {
    /// Target state for `transition`, or `None` when there is no such edge.
    pub fn next(self, transition: Transition) -> Option<GameState> {
        match (self, transition) {
            (GameState::Idle, Transition::Start) => Some(GameState::Playing),
            (GameState::Playing, Transition::Finish) => Some(GameState::Finished),
            (GameState::Finished, Transition::Restart) => Some(GameState::Idle),
            (GameState::Idle, Transition::Finish | Transition::Restart)
            | (GameState::Playing, Transition::Start | Transition::Restart)
            | (GameState::Finished, Transition::Start | Transition::Finish) => None,
        }
    }
}

/// Small caption drawn at the top of the screen
pub fn caption(state: GameState) -> &'static str {
    match state {
        GameState::Idle => "press space or send start to play",
        GameState::Playing => "",
        GameState::Finished => "press space or send start to restart",
    }
}

/// Large centered text
pub fn headline(state: GameState) -> &'static str {
    match state {
        GameState::Idle => "PONG",
        GameState::Playing => "",
        GameState::Finished => "GAME OVER",
    }
}

/// What happened during one call to [`Game::update`]
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub previous: GameState,
    pub state: GameState,
    pub paddle_hit: Option<Side>,
    /// Side that won a point by the ball leaving the court
    pub point: Option<Side>,
}

impl TickOutcome {
    fn unchanged(state: GameState) -> Self {
        Self {
            previous: state,
            state,
            paddle_hit: None,
            point: None,
        }
    }

    /// Remote observers get a snapshot for every played tick and every state change.
    pub fn should_publish(&self) -> bool {
        self.previous == GameState::Playing || self.previous != self.state
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    rally: u32,
    level: u32,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            left: Paddle::new(Side::Left, &config),
            right: Paddle::new(Side::Right, &config),
            ball: Ball::new(&config),
            state: GameState::Idle,
            rally: 0,
            level: 0,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn rally(&self) -> u32 {
        self.rally
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.left.score, self.right.score)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.config.width, self.config.height)
    }

    fn transition(&mut self, transition: Transition) -> bool {
        match self.state.next(transition) {
            Some(next) => {
                info!("Game state {:?} -> {:?}", self.state, next);
                self.state = next;
                true
            }
            None => {
                debug!("Ignoring {:?} while {:?}", transition, self.state);
                false
            }
        }
    }

    /// The start/continue signal: begins a match from Idle, or clears a
    /// finished match back to Idle. Ignored during play.
    pub fn press_start(&mut self) {
        match self.state {
            GameState::Idle => {
                self.transition(Transition::Start);
            }
            GameState::Playing => {}
            GameState::Finished => {
                if self.transition(Transition::Restart) {
                    self.reset(GameState::Idle);
                }
            }
        }
    }

    /// Sets one remote-driven flag on one paddle.
    ///
    /// Pressing a direction releases the opposite one, so a paddle is never
    /// asked to move both ways by the same controller.
    pub fn set_pressed(&mut self, side: Side, target: Target, pressed: bool) {
        let flags = &mut self.paddle_mut(side).pressed;
        match (target, pressed) {
            (Target::Up, true) => {
                flags.up = true;
                flags.down = false;
            }
            (Target::Down, true) => {
                flags.down = true;
                flags.up = false;
            }
            (Target::Up, false) => flags.up = false,
            (Target::Down, false) => flags.down = false,
        }
    }

    /// Drops every remote flag on one side
    pub fn release(&mut self, side: Side) {
        self.paddle_mut(side).pressed = Default::default();
    }

    pub fn apply_remote_input(&mut self, input: &RemoteInput) {
        match *input {
            RemoteInput::Start => self.press_start(),
            RemoteInput::Keydown { actor, target } => self.set_pressed(actor.side(), target, true),
            RemoteInput::Keyup { actor, target } => self.set_pressed(actor.side(), target, false),
        }
    }

    /// Advances the game by one tick using the given local controls.
    pub fn update(&mut self, input: &impl InputSource) -> TickOutcome {
        match self.state {
            GameState::Idle | GameState::Finished => {
                let previous = self.state;
                if input.just_pressed(Control::Start) {
                    self.press_start();
                }
                TickOutcome {
                    previous,
                    ..TickOutcome::unchanged(self.state)
                }
            }
            GameState::Playing => self.play_tick(input),
        }
    }

    fn play_tick(&mut self, input: &impl InputSource) -> TickOutcome {
        let height = self.config.height;
        let left_held = self.left.pressed.union(input.held(Side::Left));
        let right_held = self.right.pressed.union(input.held(Side::Right));
        move_paddle(&mut self.left, left_held, height);
        move_paddle(&mut self.right, right_held, height);

        let step = advance_ball(&self.ball, &self.left, &self.right, self.bounds());
        self.ball = step.ball;

        if step.paddle_hit.is_some() {
            self.register_bounce();
        }

        let point = step.exit.map(|exited| exited.opponent());
        if let Some(scorer) = point {
            self.paddle_mut(scorer).score += 1;
            info!(
                "Point to {:?}, score {} - {}",
                scorer, self.left.score, self.right.score
            );
            self.reset(GameState::Playing);
        }

        if self.left.score >= self.config.max_score || self.right.score >= self.config.max_score {
            self.transition(Transition::Finish);
        }

        TickOutcome {
            previous: GameState::Playing,
            state: self.state,
            paddle_hit: step.paddle_hit,
            point,
        }
    }

    fn register_bounce(&mut self) {
        // Returns made on the left half count as a save for player 1
        if self.ball.position.x < self.config.center_x() {
            self.left.score += 1;
        }

        self.rally += 1;
        if self.rally % self.config.rally_per_level == 0 {
            self.level_up();
        }
    }

    fn level_up(&mut self) {
        let increment = self.config.speed_increment;
        self.level += 1;
        self.ball.vx += increment * self.ball.vx.signum();
        self.ball.vy += increment * self.ball.vy.signum();
        self.left.speed += increment;
        self.right.speed += increment;
        debug!(
            "Level {} after {} rallies, ball velocity ({:.1}, {:.1})",
            self.level, self.rally, self.ball.vx, self.ball.vy
        );
    }

    /// Puts paddles and ball back at their starting spots.
    ///
    /// Scores are cleared only for a full match reset (`to_state == Idle`);
    /// a round reset keeps them. Paddle speed and remote-held flags survive
    /// either way.
    pub fn reset(&mut self, to_state: GameState) {
        self.state = to_state;
        self.rally = 0;
        self.level = 0;

        if to_state == GameState::Idle {
            self.left.score = 0;
            self.right.score = 0;
        }

        for side in [Side::Left, Side::Right] {
            let config = self.config;
            let paddle = self.paddle_mut(side);
            paddle.position = paddle.home(side, &config);
        }

        self.ball = Ball::new(&self.config);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player1: self.left.clone(),
            player2: self.right.clone(),
            ball: self.ball.clone(),
            status: self.state,
            rally: self.rally,
            level: self.level,
        }
    }
}
