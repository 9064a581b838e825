//! Closed mode enumerations for locomotion
//!
//! The surrounding application flips these at any time; the controller picks
//! the new value up on the next frame.

use serde::{Deserialize, Serialize};

/// How the player moves around in VR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocomotionMode {
    /// Continuous thumbstick movement only
    Smooth,
    /// Teleport only; continuous movement is disabled
    Teleport,
    /// Both continuous movement and teleport
    #[default]
    Hybrid,
}

impl LocomotionMode {
    /// Whether thumbstick-driven continuous movement is active
    pub fn allows_continuous_movement(self) -> bool {
        match self {
            LocomotionMode::Smooth | LocomotionMode::Hybrid => true,
            LocomotionMode::Teleport => false,
        }
    }
}

/// Which transform defines "forward" for movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementReference {
    /// The rig's yaw, so strafing follows body orientation
    #[default]
    Rig,
    /// The headset/camera orientation flattened onto the ground
    Head,
}

/// How the right thumbstick turns the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnMode {
    /// Continuous rotation proportional to deflection
    #[default]
    Smooth,
    /// Fixed-angle steps, one per deflection
    Snap,
}
