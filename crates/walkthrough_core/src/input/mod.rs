//! Input sampling for locomotion
//!
//! The platform layer forwards raw events; these types turn them into the
//! per-frame analog samples the controller consumes:
//!
//! - [`KeyboardState`] for desktop WASD/arrow movement
//! - [`MouseLook`] for right-drag camera rotation
//! - [`xr`] for VR gamepad thumbsticks

pub mod keyboard;
pub mod mouse_look;
pub mod xr;

pub use keyboard::KeyboardState;
pub use mouse_look::MouseLook;
pub use xr::{apply_deadzone, Handedness, ThumbstickSample, XrInputSource, XrSample};

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
