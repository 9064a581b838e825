//! Turn state machine
//!
//! Smooth turning rotates continuously with deflection. Snap turning is
//! edge-triggered: one step per stick deflection, and never two steps closer
//! together than the cooldown.

use crate::core::config::TurnSettings;
use crate::foundation::time::FrameTime;
use crate::locomotion::TurnMode;

/// Per-session turn state
#[derive(Debug, Clone, PartialEq)]
pub struct TurnState {
    /// Active turn mode
    pub mode: TurnMode,
    /// Stick is still deflected from the last snap
    was_turning: bool,
    /// Elapsed time of the last snap, in seconds
    last_snap: Option<f64>,
}

impl TurnState {
    /// Create idle state in `mode`
    pub fn new(mode: TurnMode) -> Self {
        Self {
            mode,
            was_turning: false,
            last_snap: None,
        }
    }

    /// Whether a snap has fired and the stick has not returned to center
    pub fn was_turning(&self) -> bool {
        self.was_turning
    }

    /// Yaw change in radians for this frame's turn axis.
    ///
    /// Positive `turn_x` (stick right) turns right, which is a negative yaw.
    pub fn apply(&mut self, turn_x: f32, frame: FrameTime, settings: &TurnSettings, deadzone: f32) -> f32 {
        let deflected = turn_x.abs() > deadzone;
        match self.mode {
            TurnMode::Smooth => {
                if deflected {
                    -turn_x * settings.smooth_speed * frame.delta
                } else {
                    0.0
                }
            }
            TurnMode::Snap => {
                if !deflected {
                    self.was_turning = false;
                    return 0.0;
                }
                let cooled = self
                    .last_snap
                    .map_or(true, |last| frame.elapsed - last > f64::from(settings.snap_cooldown_secs));
                if self.was_turning || !cooled {
                    return 0.0;
                }

                self.was_turning = true;
                self.last_snap = Some(frame.elapsed);
                let delta = if turn_x > 0.0 { -settings.snap_angle } else { settings.snap_angle };
                log::debug!("Snap turn {:+.3} rad at t={:.3}", delta, frame.elapsed);
                delta
            }
        }
    }

    /// Forget an in-progress deflection (session boundary)
    pub fn reset(&mut self) {
        self.was_turning = false;
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new(TurnMode::default())
    }
}
