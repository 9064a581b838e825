//! Desktop walking head bob

use crate::core::config::HeadBobSettings;

/// Sinusoidal camera height offset while walking
#[derive(Debug, Clone, Default)]
pub struct HeadBob {
    timer: f32,
}

impl HeadBob {
    /// Create at rest
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds and return the camera's local Y.
    ///
    /// Walking means either axis exceeds the configured threshold; when idle
    /// the phase resets and the camera sits at `eye_height`.
    pub fn update(&mut self, move_x: f32, move_y: f32, delta: f32, eye_height: f32, settings: &HeadBobSettings) -> f32 {
        let walking = move_x.abs() > settings.move_threshold || move_y.abs() > settings.move_threshold;
        if walking {
            self.timer += delta;
            eye_height + (self.timer * settings.frequency).sin() * settings.amplitude
        } else {
            self.timer = 0.0;
            eye_height
        }
    }
}
