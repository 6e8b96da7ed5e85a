use serde::{Deserialize, Serialize};

/// A point in screen space. Positive y points down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Position,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Position, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Closest-point test. Exact tangency does not count as an overlap.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let closest_x = self.center.x.clamp(rect.left(), rect.right());
        let closest_y = self.center.y.clamp(rect.top(), rect.bottom());

        let dx = self.center.x - closest_x;
        let dy = self.center.y - closest_y;

        dx * dx + dy * dy < self.radius * self.radius
    }
}
