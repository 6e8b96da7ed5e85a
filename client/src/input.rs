//! Keyboard sampling for the desktop front-end

use macroquad::prelude::*;
use shared::{LocalInput, PressedKeys};

/// Maps the keyboard onto the engine's logical controls.
///
/// Player one uses the arrow keys, player two uses W/S, and Space starts or
/// restarts a match. Frames and simulation ticks are decoupled, so a Space
/// press is latched until the next tick consumes it.
#[derive(Debug, Default)]
pub struct KeyboardInput {
    held: LocalInput,
    start_latched: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the keyboard. Call once per rendered frame.
    pub fn poll(&mut self) {
        let p1 = PressedKeys {
            up: is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::Down),
        };
        let p2 = PressedKeys {
            up: is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::S),
        };
        self.record(p1, p2, is_key_pressed(KeyCode::Space));
    }

    fn record(&mut self, p1: PressedKeys, p2: PressedKeys, start_pressed: bool) {
        self.held.p1 = p1;
        self.held.p2 = p2;
        self.start_latched |= start_pressed;
    }

    /// Input for one tick. A latched start is handed out exactly once.
    pub fn take(&mut self) -> LocalInput {
        let sample = LocalInput {
            start: self.start_latched,
            ..self.held
        };
        self.start_latched = false;
        sample
    }
}
