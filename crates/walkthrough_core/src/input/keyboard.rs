//! Held-key tracking for desktop movement

use std::collections::HashSet;

use crate::foundation::math::Vec2;
use crate::input::KeyCode;

/// Keys that drive movement
const MOVEMENT_KEYS: [KeyCode; 8] = [
    KeyCode::W,
    KeyCode::Up,
    KeyCode::S,
    KeyCode::Down,
    KeyCode::A,
    KeyCode::Left,
    KeyCode::D,
    KeyCode::Right,
];

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Repeats of a held key are ignored.
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    /// Record a key release
    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Handle a raw key event
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Release everything (focus lost)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Whether `key` is held
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether any movement key is held
    pub fn is_moving(&self) -> bool {
        MOVEMENT_KEYS.iter().any(|key| self.is_held(*key))
    }

    /// Movement as a thumbstick-style axis pair.
    ///
    /// `x` is strafe (right positive), `y` is forward negative. Opposing keys
    /// cancel and diagonals are normalized to unit length.
    pub fn move_axes(&self) -> Vec2 {
        let mut axes = Vec2::zeros();
        if self.is_held(KeyCode::W) || self.is_held(KeyCode::Up) {
            axes.y -= 1.0;
        }
        if self.is_held(KeyCode::S) || self.is_held(KeyCode::Down) {
            axes.y += 1.0;
        }
        if self.is_held(KeyCode::A) || self.is_held(KeyCode::Left) {
            axes.x -= 1.0;
        }
        if self.is_held(KeyCode::D) || self.is_held(KeyCode::Right) {
            axes.x += 1.0;
        }

        if axes.magnitude_squared() > 0.0 {
            axes.normalize()
        } else {
            axes
        }
    }
}
