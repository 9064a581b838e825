//! VR gamepad sampling
//!
//! Controllers disagree on where the thumbstick lives: some report it on
//! axes 0/1, others on 2/3 with a touchpad on 0/1. Both pairs are read every
//! frame and the more deflected one wins.

use serde::{Deserialize, Serialize};

/// Which hand an input source is held in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    /// Left hand; drives movement
    Left,
    /// Right hand; drives turning
    Right,
    /// No hand reported (gaze, screen input)
    None,
}

/// One XR input source as seen this frame
#[derive(Debug, Clone, PartialEq)]
pub struct XrInputSource {
    /// Which hand holds it
    pub handedness: Handedness,
    /// Raw gamepad axes; `None` if the source has no gamepad
    pub axes: Option<Vec<f32>>,
}

impl XrInputSource {
    /// A source with a gamepad
    pub fn gamepad(handedness: Handedness, axes: impl Into<Vec<f32>>) -> Self {
        Self {
            handedness,
            axes: Some(axes.into()),
        }
    }

    /// A source without a gamepad
    pub fn without_gamepad(handedness: Handedness) -> Self {
        Self { handedness, axes: None }
    }
}

/// Zero an analog value whose magnitude is below `deadzone`
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        0.0
    } else {
        value
    }
}

/// Read an axis, treating missing entries as centered
fn axis(axes: &[f32], index: usize) -> f32 {
    axes.get(index).copied().unwrap_or(0.0)
}

/// A thumbstick's two axes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThumbstickSample {
    /// Horizontal deflection, right positive
    pub x: f32,
    /// Vertical deflection, forward negative
    pub y: f32,
}

impl ThumbstickSample {
    /// Pick the more deflected of the `(0, 1)` and `(2, 3)` pairs.
    ///
    /// Ties go to `(2, 3)`.
    pub fn select(axes: &[f32]) -> Self {
        let (x0, y0) = (axis(axes, 0), axis(axes, 1));
        let (x2, y2) = (axis(axes, 2), axis(axes, 3));
        if x2.abs() + y2.abs() >= x0.abs() + y0.abs() {
            Self { x: x2, y: y2 }
        } else {
            Self { x: x0, y: y0 }
        }
    }

    /// Horizontal turn axis: whichever of axes 0 and 2 is further from center.
    ///
    /// Ties go to axis 0.
    pub fn select_turn(axes: &[f32]) -> f32 {
        let (x0, x2) = (axis(axes, 0), axis(axes, 2));
        if x2.abs() > x0.abs() {
            x2
        } else {
            x0
        }
    }

    /// Both components deadzoned independently
    pub fn deadzoned(self, deadzone: f32) -> Self {
        Self {
            x: apply_deadzone(self.x, deadzone),
            y: apply_deadzone(self.y, deadzone),
        }
    }

    /// Whether both components are exactly zero
    pub fn is_idle(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Locomotion input gathered from every XR source for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XrSample {
    /// Move stick (left hand), already deadzoned
    pub movement: ThumbstickSample,
    /// Raw turn axis (right hand); the turn state applies its own deadzone
    pub turn_x: f32,
}

impl XrSample {
    /// Sample `sources`.
    ///
    /// The left hand is ignored when `continuous_movement` is off. Sources
    /// without a gamepad or handedness contribute nothing. If several sources
    /// claim the same hand, the last one wins.
    pub fn from_sources(sources: &[XrInputSource], continuous_movement: bool, deadzone: f32) -> Self {
        let mut sample = Self::default();
        for source in sources {
            let Some(axes) = source.axes.as_deref() else {
                continue;
            };
            match source.handedness {
                Handedness::Left if continuous_movement => {
                    sample.movement = ThumbstickSample::select(axes).deadzoned(deadzone);
                }
                Handedness::Right => sample.turn_x = ThumbstickSample::select_turn(axes),
                Handedness::Left | Handedness::None => {}
            }
        }
        sample
    }
}
