//! Ground containment and height probing
//!
//! The clamp keeps the player's XZ inside the ground's footprint. The probe
//! is the desktop-only height follow; VR pins the rig to y = 0 and lets the
//! headset supply eye height.

use crate::foundation::math::{utils, Vec3};
use crate::physics::collision::Ray;
use crate::scene::{MeshNode, WorldBounds};

/// Height above the player the ground probe starts from
pub const PROBE_LIFT: f32 = 10.0;

/// Largest step between the player and the ground the follow will snap across
pub const MAX_FOLLOW_STEP: f32 = 5.0;

/// How far below the ground the player may sit and still be lifted back up
pub const BELOW_GROUND_TOLERANCE: f32 = 0.1;

/// Clamp `position` X/Z into the ground's world bounds shrunk by `margin`.
///
/// Y is never touched. With no ground, or a ground without geometry, the
/// position passes through. An axis narrower than twice the margin clamps to
/// its center.
pub fn clamp_to_ground(ground: Option<&MeshNode>, position: Vec3, margin: f32) -> Vec3 {
    let Some(bounds) = ground.and_then(WorldBounds::world_bounds) else {
        return position;
    };

    Vec3::new(
        utils::clamp_or_center(position.x, bounds.min.x + margin, bounds.max.x - margin),
        position.y,
        utils::clamp_or_center(position.z, bounds.min.z + margin, bounds.max.z - margin),
    )
}

/// Height of the highest surface below `from_y + PROBE_LIFT` at `(x, z)`.
///
/// Every mesh under each surface node is tested on its own box rather than
/// the node's combined bounds. A box the probe starts inside reports its
/// start height.
pub fn ground_height_at(x: f32, z: f32, from_y: f32, surfaces: &[&MeshNode]) -> Option<f32> {
    let ray = Ray::new(Vec3::new(x, from_y + PROBE_LIFT, z), -Vec3::y());

    surfaces
        .iter()
        .flat_map(|surface| surface.world_meshes())
        .filter_map(|mesh| mesh.bounds.intersect_ray(&ray))
        .min_by(f32::total_cmp)
        .map(|t| ray.point_at(t).y)
}

/// Rest the player sphere on the ground below it.
///
/// Y becomes `ground + radius` when a surface is found within
/// [`MAX_FOLLOW_STEP`] and the player is not more than
/// [`BELOW_GROUND_TOLERANCE`] under it; otherwise Y is left alone.
pub fn follow_ground(position: Vec3, radius: f32, surfaces: &[&MeshNode]) -> Vec3 {
    let Some(ground) = ground_height_at(position.x, position.z, position.y, surfaces) else {
        return position;
    };

    if (position.y - ground).abs() < MAX_FOLLOW_STEP && position.y > ground - BELOW_GROUND_TOLERANCE {
        Vec3::new(position.x, ground + radius, position.z)
    } else {
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::physics::collision::AABB;
    use approx::assert_relative_eq;

    fn lawn() -> MeshNode {
        MeshNode::mesh("lawn", AABB::new(Vec3::new(-20.0, -0.1, -20.0), Vec3::new(20.0, 0.0, 20.0)))
    }

    #[test]
    fn test_clamp_keeps_margin_from_edge() {
        let margin = 0.55;
        let out = clamp_to_ground(Some(&lawn()), Vec3::new(25.0, 1.3, -30.0), margin);
        assert_relative_eq!(out, Vec3::new(19.45, 1.3, -19.45), epsilon = 1e-5);

        let inside = Vec3::new(3.0, 0.0, 4.0);
        assert_eq!(clamp_to_ground(Some(&lawn()), inside, margin), inside);
    }

    #[test]
    fn test_clamp_containment() {
        let margin = 0.55;
        let ground = lawn();
        let bounds = ground.world_bounds().unwrap();
        for i in -10..=10 {
            for j in -10..=10 {
                let p = Vec3::new(i as f32 * 5.0, 0.0, j as f32 * 3.7);
                let out = clamp_to_ground(Some(&ground), p, margin);
                assert!(out.x >= bounds.min.x + margin - 1e-5 && out.x <= bounds.max.x - margin + 1e-5);
                assert!(out.z >= bounds.min.z + margin - 1e-5 && out.z <= bounds.max.z - margin + 1e-5);
            }
        }
    }

    #[test]
    fn test_clamp_without_ground_passes_through() {
        let p = Vec3::new(100.0, 2.0, -100.0);
        assert_eq!(clamp_to_ground(None, p, 0.55), p);
        assert_eq!(clamp_to_ground(Some(&MeshNode::group("empty")), p, 0.55), p);
    }

    #[test]
    fn test_narrow_ground_clamps_to_center() {
        let strip = MeshNode::mesh("strip", AABB::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.8, 0.0, 10.0)));
        let out = clamp_to_ground(Some(&strip), Vec3::new(5.0, 0.0, 0.0), 0.55);
        assert_relative_eq!(out.x, 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_ground_height_finds_highest_surface() {
        let step = MeshNode::mesh("step", AABB::from_center_size(Vec3::zeros(), Vec3::new(2.0, 0.3, 2.0)))
            .with_transform(Transform::from_position(Vec3::new(0.0, 0.15, 0.0)));
        let yard = MeshNode::group("yard").with_child(lawn()).with_child(step);

        let on_step = ground_height_at(0.0, 0.0, 1.0, &[&yard]).unwrap();
        assert_relative_eq!(on_step, 0.3, epsilon = 1e-5);

        let on_lawn = ground_height_at(5.0, 5.0, 1.0, &[&yard]).unwrap();
        assert_relative_eq!(on_lawn, 0.0, epsilon = 1e-5);

        assert!(ground_height_at(50.0, 0.0, 1.0, &[&yard]).is_none());
    }

    #[test]
    fn test_follow_ground_rests_sphere_on_surface() {
        let ground = lawn();
        let out = follow_ground(Vec3::new(1.0, 1.7, 1.0), 0.5, &[&ground]);
        assert_relative_eq!(out, Vec3::new(1.0, 0.5, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_follow_ground_ignores_far_or_buried_surfaces() {
        let ground = lawn();
        // too far above
        let high = Vec3::new(1.0, 6.0, 1.0);
        assert_eq!(follow_ground(high, 0.5, &[&ground]), high);
        // more than the tolerance below the ground
        let buried = Vec3::new(1.0, -0.5, 1.0);
        assert_eq!(follow_ground(buried, 0.5, &[&ground]), buried);
        // off the edge
        let off = Vec3::new(30.0, 1.0, 0.0);
        assert_eq!(follow_ground(off, 0.5, &[&ground]), off);
    }
}
