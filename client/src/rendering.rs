use macroquad::prelude::*;
use shared::game::{caption, headline};
use shared::{Side, Snapshot};
use std::time::Duration;

const OBJECT_COLOR: Color = Color::new(120.0 / 255.0, 226.0 / 255.0, 160.0 / 255.0, 1.0);

const SCORE_FONT_SIZE: f32 = 48.0;
const HEADLINE_FONT_SIZE: f32 = 64.0;
const CAPTION_FONT_SIZE: f32 = 24.0;
const TPS_FONT_SIZE: f32 = 16.0;

/// Draws one frame from a snapshot. The court is scaled to fit the window.
pub struct Renderer {
    width: f32,
    height: f32,
}

impl Renderer {
    pub fn new(width: f32, height: f32) -> Self {
        Renderer { width, height }
    }

    pub fn render(&self, snapshot: &Snapshot, tps: f32) {
        clear_background(BLACK);

        let scale = (screen_width() / self.width).min(screen_height() / self.height);

        self.draw_center_line(scale);

        for side in [Side::Left, Side::Right] {
            let paddle = snapshot.paddle(side);
            draw_rectangle(
                paddle.position.x * scale,
                paddle.position.y * scale,
                paddle.width * scale,
                paddle.height * scale,
                OBJECT_COLOR,
            );
        }

        let ball = &snapshot.ball;
        draw_circle(
            ball.position.x * scale,
            ball.position.y * scale,
            ball.radius * scale,
            OBJECT_COLOR,
        );

        let court_width = self.width * scale;
        let court_height = self.height * scale;

        self.draw_centered(&snapshot.score_text(), court_width, 60.0, SCORE_FONT_SIZE);
        self.draw_centered(
            headline(snapshot.status),
            court_width,
            court_height / 2.0 - 20.0,
            HEADLINE_FONT_SIZE,
        );
        self.draw_centered(
            caption(snapshot.status),
            court_width,
            court_height / 2.0 + 30.0,
            CAPTION_FONT_SIZE,
        );

        let stats = format!("TPS {:.0}  level {}", tps, snapshot.level);
        draw_text(&stats, 10.0, court_height - 10.0, TPS_FONT_SIZE, GRAY);
    }

    fn draw_center_line(&self, scale: f32) {
        let x = self.width / 2.0 * scale;
        let dash = 20.0 * scale;
        let mut y = 0.0;
        while y < self.height * scale {
            draw_line(x, y, x, y + dash / 2.0, 2.0, DARKGRAY);
            y += dash;
        }
    }

    fn draw_centered(&self, text: &str, width: f32, y: f32, font_size: f32) {
        if text.is_empty() {
            return;
        }
        let dims = measure_text(text, None, font_size as u16, 1.0);
        draw_text(text, (width - dims.width) / 2.0, y, font_size, OBJECT_COLOR);
    }
}

/// Simulation ticks per second, refreshed once per window
#[derive(Debug)]
pub struct TpsMeter {
    window: Duration,
    elapsed: Duration,
    ticks: u32,
    current: f32,
}

impl TpsMeter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            elapsed: Duration::ZERO,
            ticks: 0,
            current: 0.0,
        }
    }

    pub fn record(&mut self, ticks: u32, frame_time: Duration) {
        self.ticks += ticks;
        self.elapsed += frame_time;
        if self.elapsed >= self.window {
            self.current = self.ticks as f32 / self.elapsed.as_secs_f32();
            self.ticks = 0;
            self.elapsed = Duration::ZERO;
        }
    }

    pub fn tps(&self) -> f32 {
        self.current
    }
}

impl Default for TpsMeter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
