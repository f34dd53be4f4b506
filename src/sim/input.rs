//! Keyboard input for two players sharing one keyboard
//!
//! Key events only flip flags; the simulation reads the flags once per tick.

use serde::{Deserialize, Serialize};

use super::state::Side;

/// Paddle travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// Keys bound to one player's paddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    pub up: Vec<String>,
    pub down: Vec<String>,
}

impl ControlScheme {
    pub fn new<S: Into<String>>(
        up: impl IntoIterator<Item = S>,
        down: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            up: up.into_iter().map(Into::into).collect(),
            down: down.into_iter().map(Into::into).collect(),
        }
    }

    /// W/S
    pub fn wasd() -> Self {
        Self::new(["w", "W"], ["s", "S"])
    }

    /// Arrow keys (plus the legacy `Up`/`Down` names older browsers send)
    pub fn arrows() -> Self {
        Self::new(["ArrowUp", "Up"], ["ArrowDown", "Down"])
    }

    fn resolve(&self, key: &str) -> Option<Direction> {
        if self.up.iter().any(|k| k == key) {
            Some(Direction::Up)
        } else if self.down.iter().any(|k| k == key) {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// Fixed key-to-action table for both players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    pub left: ControlScheme,
    pub right: ControlScheme,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            left: ControlScheme::wasd(),
            right: ControlScheme::arrows(),
        }
    }
}

impl KeyMap {
    /// Map a key identifier to a paddle action. Left scheme wins on overlap.
    pub fn resolve(&self, key: &str) -> Option<(Side, Direction)> {
        self.left
            .resolve(key)
            .map(|d| (Side::Left, d))
            .or_else(|| self.right.resolve(key).map(|d| (Side::Right, d)))
    }
}

/// Held-key flags for both paddles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

impl InputState {
    pub fn set(&mut self, side: Side, direction: Direction, pressed: bool) {
        let flag = match (side, direction) {
            (Side::Left, Direction::Up) => &mut self.left_up,
            (Side::Left, Direction::Down) => &mut self.left_down,
            (Side::Right, Direction::Up) => &mut self.right_up,
            (Side::Right, Direction::Down) => &mut self.right_down,
        };
        *flag = pressed;
    }

    /// -1 (up), +1 (down) or 0 when both or neither are held
    pub fn axis(&self, side: Side) -> f32 {
        let (up, down) = match side {
            Side::Left => (self.left_up, self.left_down),
            Side::Right => (self.right_up, self.right_down),
        };
        match (up, down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Key map plus the flags it drives
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub keymap: KeyMap,
    pub state: InputState,
}

impl Controls {
    pub fn new(keymap: KeyMap) -> Self {
        Self {
            keymap,
            state: InputState::default(),
        }
    }

    pub fn on_key_down(&mut self, key: &str) {
        self.apply(key, true);
    }

    pub fn on_key_up(&mut self, key: &str) {
        self.apply(key, false);
    }

    /// Forget every held key (new match, lost focus)
    pub fn release_all(&mut self) {
        self.state = InputState::default();
    }

    fn apply(&mut self, key: &str, pressed: bool) {
        if let Some((side, direction)) = self.keymap.resolve(key) {
            self.state.set(side, direction, pressed);
        }
    }
}
