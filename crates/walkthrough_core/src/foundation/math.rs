//! Math utilities and types
//!
//! Provides the fundamental math types used by the locomotion core. Everything
//! is a thin alias over `nalgebra` so callers can mix in nalgebra APIs freely.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, UnitQuaternion, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and a rotation around the Y axis
    pub fn from_position_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: yaw_rotation(yaw),
            ..Default::default()
        }
    }

    /// Builder: replace the scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a transformation matrix (translate * rotate * scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 6 (30 degrees), the default turn step
    pub const SIXTH_PI: f32 = PI / 6.0;

    /// Squared length below which a direction is treated as zero
    pub const DIRECTION_EPSILON_SQ: f32 = 1e-8;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec3};

    /// Clamp a value between min and max.
    ///
    /// Unlike `f32::clamp` this never panics: an inverted range collapses to
    /// its midpoint.
    pub fn clamp_or_center(value: f32, min: f32, max: f32) -> f32 {
        if min > max {
            (min + max) * 0.5
        } else if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Project a direction onto the horizontal (XZ) plane and renormalize.
    ///
    /// Returns `None` when nothing is left after flattening (looking straight
    /// up or down).
    pub fn flatten_horizontal(direction: Vec3) -> Option<Vec3> {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.magnitude_squared() < constants::DIRECTION_EPSILON_SQ {
            None
        } else {
            Some(flat.normalize())
        }
    }

    /// Sign of a value, with zero mapping to zero
    pub fn signum_or_zero(value: f32) -> f32 {
        if value > 0.0 {
            1.0
        } else if value < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    /// Extract the yaw (rotation about +Y) of a quaternion
    pub fn yaw_of(rotation: &Quat) -> f32 {
        let forward = rotation * Vec3::new(0.0, 0.0, -1.0);
        (-forward.x).atan2(-forward.z)
    }
}

/// Rotation of `yaw` radians about the world up axis
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::y_axis(), yaw)
}

/// Rotation built from YXZ Euler angles (yaw first, then pitch)
pub fn yaw_pitch_rotation(yaw: f32, pitch: f32) -> Quat {
    yaw_rotation(yaw) * Quat::from_axis_angle(&Vec3::x_axis(), pitch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_yaw_rotation_turns_forward_left() {
        // Positive yaw is counter-clockwise seen from above: -Z swings toward -X
        let forward = yaw_rotation(constants::HALF_PI) * Vec3::new(0.0, 0.0, -1.0);
        assert_relative_eq!(forward, Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_yaw_of_roundtrip() {
        for yaw in [-2.5_f32, -0.3, 0.0, 0.7, 3.0] {
            assert_relative_eq!(utils::yaw_of(&yaw_rotation(yaw)), yaw, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_yaw_pitch_keeps_yaw() {
        let rotation = yaw_pitch_rotation(0.4, -0.9);
        assert_relative_eq!(utils::yaw_of(&rotation), 0.4, epsilon = EPSILON);
    }

    #[test]
    fn test_flatten_horizontal() {
        let flat = utils::flatten_horizontal(Vec3::new(3.0, 5.0, 4.0)).unwrap();
        assert_relative_eq!(flat, Vec3::new(0.6, 0.0, 0.8), epsilon = EPSILON);
        assert!(utils::flatten_horizontal(Vec3::new(0.0, -1.0, 0.0)).is_none());
    }

    #[test]
    fn test_clamp_or_center_never_inverts() {
        assert_eq!(utils::clamp_or_center(5.0, 0.0, 2.0), 2.0);
        assert_eq!(utils::clamp_or_center(-5.0, 0.0, 2.0), 0.0);
        assert_eq!(utils::clamp_or_center(7.0, 3.0, 1.0), 2.0);
    }

    #[test]
    fn test_transform_matrix_applies_scale_then_rotation_then_translation() {
        let transform = Transform::from_position_yaw(Vec3::new(1.0, 0.0, 0.0), constants::HALF_PI)
            .with_scale(Vec3::new(2.0, 2.0, 2.0));
        let p = transform.transform_point(Point3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(p.coords, Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
    }
}
