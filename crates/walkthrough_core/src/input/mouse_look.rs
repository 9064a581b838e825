//! Right-drag mouse look for the desktop camera

use crate::core::config::MouseLookSettings;
use crate::foundation::math::{yaw_pitch_rotation, Quat};
use crate::input::MouseButton;

/// Camera yaw and pitch driven by pointer drags
#[derive(Debug, Clone)]
pub struct MouseLook {
    /// Rotation about world up, radians
    pub yaw: f32,
    /// Rotation about the camera's right axis, radians
    pub pitch: f32,
    settings: MouseLookSettings,
    /// Last pointer position while the look button is held
    last_pointer: Option<(f64, f64)>,
}

impl MouseLook {
    /// Create looking down -Z
    pub fn new(settings: MouseLookSettings) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            settings,
            last_pointer: None,
        }
    }

    /// Whether the look button is held
    pub fn is_looking(&self) -> bool {
        self.last_pointer.is_some()
    }

    /// Handle a mouse button event at pointer position `(x, y)`
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool, x: f64, y: f64) {
        if button != MouseButton::Right {
            return;
        }
        self.last_pointer = pressed.then_some((x, y));
    }

    /// Handle pointer movement to `(x, y)`.
    ///
    /// Returns `true` if the orientation changed.
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) -> bool {
        let Some((last_x, last_y)) = self.last_pointer else {
            return false;
        };
        self.last_pointer = Some((x, y));

        let dx = (x - last_x) as f32;
        let dy = (y - last_y) as f32;
        self.yaw -= dx * self.settings.sensitivity;
        self.pitch = (self.pitch - dy * self.settings.sensitivity)
            .clamp(-self.settings.max_pitch, self.settings.max_pitch);
        dx != 0.0 || dy != 0.0
    }

    /// Camera orientation (yaw, then pitch)
    pub fn rotation(&self) -> Quat {
        yaw_pitch_rotation(self.yaw, self.pitch)
    }
}

impl Default for MouseLook {
    fn default() -> Self {
        Self::new(MouseLookSettings::default())
    }
}
