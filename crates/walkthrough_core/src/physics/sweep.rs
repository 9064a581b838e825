//! Coarse sweep against props and loose obstacles
//!
//! Scenery meshes and authored collision cubes are many and small, so their
//! bounds are recomputed on demand and a hit only nudges the player back a
//! little instead of snapping them to a surface.

use crate::foundation::math::Vec3;
use crate::physics::collision::BoundingSphere;
use crate::scene::WorldBounds;

/// Soft obstacle check with a bounded back-off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSweep {
    /// Player sphere radius
    pub radius: f32,
    /// Largest back-off applied on contact
    pub max_back_off: f32,
}

impl ObstacleSweep {
    /// Create a sweep
    pub fn new(radius: f32, max_back_off: f32) -> Self {
        Self { radius, max_back_off }
    }

    /// Check `desired` against every obstacle in order and back off from the
    /// first one touched.
    ///
    /// The back-off points against `movement` with length
    /// `min(max_back_off, |movement|)`; with no movement nothing changes.
    pub fn sweep<'a, I>(&self, desired: Vec3, movement: Vec3, obstacles: I) -> Vec3
    where
        I: IntoIterator<Item = &'a dyn WorldBounds>,
    {
        let sphere = BoundingSphere::new(desired, self.radius);
        let hit = obstacles
            .into_iter()
            .filter_map(WorldBounds::world_bounds)
            .find(|bounds| bounds.intersects_sphere(&sphere));

        let Some(bounds) = hit else {
            return desired;
        };

        let length = movement.magnitude();
        if length <= 0.0 {
            return desired;
        }
        let back_off = movement * (self.max_back_off.min(length) / length);
        log::trace!("Obstacle {:?} touched, backing off {:?}", bounds, back_off);
        desired - back_off
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::AABB;
    use crate::scene::{CollisionCube, MeshNode, PropKind};
    use approx::assert_relative_eq;

    fn lamp_cube() -> CollisionCube {
        CollisionCube {
            kind: PropKind::PoleLamp,
            bounds: AABB::new(Vec3::new(2.0, 0.0, -0.25), Vec3::new(2.5, 3.5, 0.25)),
        }
    }

    fn sweep() -> ObstacleSweep {
        ObstacleSweep::new(0.5, 0.01)
    }

    #[test]
    fn test_no_obstacles_passes_through() {
        let desired = Vec3::new(1.0, 0.0, 0.0);
        let out = sweep().sweep(desired, Vec3::new(0.1, 0.0, 0.0), std::iter::empty());
        assert_eq!(out, desired);
    }

    #[test]
    fn test_touching_cube_backs_off_at_most_a_centimetre() {
        let cube = lamp_cube();
        let desired = Vec3::new(1.7, 1.0, 0.0);
        let movement = Vec3::new(0.2, 0.0, 0.0);
        let out = sweep().sweep(desired, movement, [&cube as &dyn WorldBounds]);

        assert_relative_eq!(out, Vec3::new(1.69, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_small_movement_backs_off_by_its_own_length() {
        let cube = lamp_cube();
        let desired = Vec3::new(1.7, 1.0, 0.0);
        let movement = Vec3::new(0.004, 0.0, 0.003);
        let out = sweep().sweep(desired, movement, [&cube as &dyn WorldBounds]);

        assert_relative_eq!(out, desired - movement, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_movement_is_not_nudged() {
        let cube = lamp_cube();
        let desired = Vec3::new(1.7, 1.0, 0.0);
        let out = sweep().sweep(desired, Vec3::zeros(), [&cube as &dyn WorldBounds]);
        assert_eq!(out, desired);
    }

    #[test]
    fn test_meshes_and_cubes_share_one_pass() {
        let bench = MeshNode::mesh("bench", AABB::new(Vec3::new(-0.5, 0.0, 1.2), Vec3::new(0.5, 0.5, 1.6)));
        let cube = lamp_cube();
        let list: [&dyn WorldBounds; 2] = [&bench, &cube];

        let movement = Vec3::new(0.0, 0.0, 0.05);
        let out = sweep().sweep(Vec3::new(0.0, 0.3, 0.9), movement, list);
        assert_relative_eq!(out, Vec3::new(0.0, 0.3, 0.89), epsilon = 1e-6);

        // Empty group contributes nothing
        let empty = MeshNode::group("empty");
        let out = sweep().sweep(Vec3::zeros(), movement, [&empty as &dyn WorldBounds]);
        assert_eq!(out, Vec3::zeros());
    }
}
