//! Transforms the controller reads from and writes to

use crate::foundation::math::{utils, yaw_rotation, Quat, Vec3};
use crate::locomotion::MovementReference;

/// The camera as attached to the rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Position relative to the rig; Y is eye height
    pub local_position: Vec3,
    /// World orientation (headset pose in VR, mouse look on desktop)
    pub rotation: Quat,
}

impl CameraPose {
    /// Camera at eye height looking down -Z
    pub fn at_eye_height(eye_height: f32) -> Self {
        Self {
            local_position: Vec3::new(0.0, eye_height, 0.0),
            rotation: Quat::identity(),
        }
    }
}

/// The tracked origin the headset and controllers hang off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerRig {
    /// World position; Y stays 0 in VR
    pub position: Vec3,
    /// Rotation about world up, radians
    pub yaw: f32,
    /// Attached camera
    pub camera: CameraPose,
}

impl ViewerRig {
    /// Rig at the origin with the camera at `eye_height`
    pub fn new(eye_height: f32) -> Self {
        Self {
            position: Vec3::zeros(),
            yaw: 0.0,
            camera: CameraPose::at_eye_height(eye_height),
        }
    }

    /// Rig orientation as a quaternion
    pub fn rotation(&self) -> Quat {
        yaw_rotation(self.yaw)
    }

    /// Camera position in world space
    pub fn camera_world_position(&self) -> Vec3 {
        self.position + self.rotation() * self.camera.local_position
    }

    /// Horizontal forward and right vectors for `reference`.
    ///
    /// Falls back to the rig basis when the head looks straight up or down.
    pub fn movement_basis(&self, reference: MovementReference) -> (Vec3, Vec3) {
        let rig = || (self.rotation() * -Vec3::z(), self.rotation() * Vec3::x());
        match reference {
            MovementReference::Rig => rig(),
            MovementReference::Head => {
                let forward = utils::flatten_horizontal(self.camera.rotation * -Vec3::z());
                let right = utils::flatten_horizontal(self.camera.rotation * Vec3::x());
                match (forward, right) {
                    (Some(forward), Some(right)) => (forward, right),
                    _ => rig(),
                }
            }
        }
    }

    /// Pin the rig under `position` (XZ), at floor level
    pub fn sync_to(&mut self, position: Vec3) {
        self.position = Vec3::new(position.x, 0.0, position.z);
    }
}

/// The player's collision proxy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Sphere center in world space
    pub position: Vec3,
    /// Sphere radius
    pub radius: f32,
    /// Which frame drives movement direction
    pub reference: MovementReference,
}

impl PlayerState {
    /// Create a player at `position`
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius,
            reference: MovementReference::default(),
        }
    }
}
