//! Held-key state for the two paddles

use serde::{Deserialize, Serialize};

/// A logical paddle control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    P1Up,
    P1Down,
    P2Up,
    P2Down,
}

impl Control {
    pub const ALL: [Control; 4] = [Control::P1Up, Control::P1Down, Control::P2Up, Control::P2Down];

    /// Map a DOM `KeyboardEvent.key` value to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" => Some(Control::P1Up),
            "s" | "S" => Some(Control::P1Down),
            "ArrowUp" => Some(Control::P2Up),
            "ArrowDown" => Some(Control::P2Down),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Control::P1Up => 0,
            Control::P1Down => 1,
            Control::P2Up => 2,
            Control::P2Down => 3,
        }
    }
}

/// Which controls are currently held (most recent press/release wins)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: [bool; 4],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&mut self, control: Control, held: bool) {
        self.held[control.index()] = held;
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    /// Release every control
    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }

    /// Net vertical direction for the left paddle (-1 up, 0, +1 down)
    pub fn left_axis(&self) -> f32 {
        axis(self.is_held(Control::P1Up), self.is_held(Control::P1Down))
    }

    /// Net vertical direction for the right paddle (-1 up, 0, +1 down)
    pub fn right_axis(&self) -> f32 {
        axis(self.is_held(Control::P2Up), self.is_held(Control::P2Down))
    }
}

fn axis(up: bool, down: bool) -> f32 {
    match (up, down) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Control::from_key("w"), Some(Control::P1Up));
        assert_eq!(Control::from_key("S"), Some(Control::P1Down));
        assert_eq!(Control::from_key("ArrowUp"), Some(Control::P2Up));
        assert_eq!(Control::from_key("ArrowDown"), Some(Control::P2Down));
        assert_eq!(Control::from_key("Enter"), None);
        assert_eq!(Control::from_key("x"), None);
    }

    #[test]
    fn test_set_and_release() {
        let mut input = InputState::new();
        for control in Control::ALL {
            assert!(!input.is_held(control));
        }

        input.set_held(Control::P2Down, true);
        assert!(input.is_held(Control::P2Down));
        assert!(!input.is_held(Control::P2Up));
        assert_eq!(input.right_axis(), 1.0);
        assert_eq!(input.left_axis(), 0.0);

        input.set_held(Control::P2Down, false);
        assert!(!input.is_held(Control::P2Down));

        input.set_held(Control::P1Up, true);
        input.set_held(Control::P2Up, true);
        input.release_all();
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::new();
        input.set_held(Control::P1Up, true);
        input.set_held(Control::P1Down, true);
        assert_eq!(input.left_axis(), 0.0);
    }
}
