//! Local input contract
//!
//! The engine never sees key codes. Whatever front-end hosts the game maps its
//! devices onto these logical controls and hands the engine an [`InputSource`].

use crate::entity::{PressedKeys, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    P1Up,
    P1Down,
    P2Up,
    P2Down,
    /// Start a match, or acknowledge game over
    Start,
}

pub trait InputSource {
    /// Level signal: the control is currently held.
    fn is_pressed(&self, control: Control) -> bool;

    /// Edge signal: the control went down since the previous sample.
    fn just_pressed(&self, control: Control) -> bool;

    /// Movement keys held for one side
    fn held(&self, side: Side) -> PressedKeys {
        let (up, down) = match side {
            Side::Left => (Control::P1Up, Control::P1Down),
            Side::Right => (Control::P2Up, Control::P2Down),
        };
        PressedKeys {
            up: self.is_pressed(up),
            down: self.is_pressed(down),
        }
    }
}

/// One sample of the local controls.
///
/// `Default` is "nothing pressed", which is what a headless host feeds the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalInput {
    pub p1: PressedKeys,
    pub p2: PressedKeys,
    pub start: bool,
}

impl InputSource for LocalInput {
    fn is_pressed(&self, control: Control) -> bool {
        match control {
            Control::P1Up => self.p1.up,
            Control::P1Down => self.p1.down,
            Control::P2Up => self.p2.up,
            Control::P2Down => self.p2.down,
            Control::Start => self.start,
        }
    }

    fn just_pressed(&self, control: Control) -> bool {
        // Only the start control is edge-triggered
        control == Control::Start && self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_is_idle() {
        let input = LocalInput::default();
        assert!(input.held(Side::Left).is_idle());
        assert!(input.held(Side::Right).is_idle());
        assert!(!input.just_pressed(Control::Start));
    }

    #[test]
    fn test_held_maps_controls_to_sides() {
        let input = LocalInput {
            p1: PressedKeys {
                up: true,
                down: false,
            },
            p2: PressedKeys {
                up: false,
                down: true,
            },
            start: false,
        };

        assert_eq!(
            input.held(Side::Left),
            PressedKeys {
                up: true,
                down: false
            }
        );
        assert_eq!(
            input.held(Side::Right),
            PressedKeys {
                up: false,
                down: true
            }
        );
        assert!(!input.just_pressed(Control::P1Up));
    }
}
