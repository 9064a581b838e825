//! Primitive collision shapes and intersection algorithms
//!
//! Provides the axis-aligned box, sphere and ray used by every collision pass
//! in the locomotion pipeline.

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Minimum thickness a box keeps on any axis after shrinking
pub const MIN_BOX_THICKNESS: f32 = 0.001;

/// Axis-Aligned Bounding Box
///
/// Invariant: `min <= max` on every axis for any non-empty box. An empty box
/// is represented by [`AABB::empty`] (inverted infinite extents) and is what
/// unions start from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The empty box: contains nothing, is the identity for [`AABB::union`]
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Create an AABB centered at a point with given full size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing every point
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().fold(Self::empty(), |mut acc, p| {
            acc.min = acc.min.inf(&p);
            acc.max = acc.max.sup(&p);
            acc
        })
    }

    /// True if the box contains no volume at all (any axis inverted)
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the full size of the AABB
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Re-fit the box after transforming its eight corners by `matrix`
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        if self.is_empty() {
            return *self;
        }
        let corners = (0..8).map(|i| {
            let corner = Point3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            matrix.transform_point(&corner).coords
        });
        AABB::from_points(corners)
    }

    /// Deflate the box by `amount` on each side of each axis.
    ///
    /// An axis that would invert is nudged so it keeps
    /// [`MIN_BOX_THICKNESS`] below its max instead.
    pub fn shrunk(&self, amount: Vec3) -> AABB {
        let mut out = AABB::new(self.min + amount, self.max - amount);
        for axis in 0..3 {
            if out.min[axis] > out.max[axis] {
                out.min[axis] = out.max[axis] - MIN_BOX_THICKNESS;
            }
        }
        out
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Closest point on (or in) the box to `point`: a per-axis clamp
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
            point.z.max(self.min.z).min(self.max.z),
        )
    }

    /// Distance from `point` to the box (zero when inside)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        (point - self.closest_point(point)).magnitude()
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Check if a sphere touches or overlaps this box
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        if self.is_empty() {
            return false;
        }
        let nearest = self.closest_point(sphere.center);
        (nearest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
    }

    /// Test ray intersection with this AABB using slab method
    /// Returns the distance to the entry point if the ray intersects, None otherwise
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vec3::new(
            if ray.direction.x != 0.0 { 1.0 / ray.direction.x } else { f32::INFINITY },
            if ray.direction.y != 0.0 { 1.0 / ray.direction.y } else { f32::INFINITY },
            if ray.direction.z != 0.0 { 1.0 / ray.direction.z } else { f32::INFINITY },
        );

        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;
        for axis in 0..3 {
            if ray.direction[axis] == 0.0 {
                // Parallel to this slab: inside it or never
                if ray.origin[axis] < self.min[axis] || ray.origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (self.min[axis] - ray.origin[axis]) * inv_dir[axis];
            let t2 = (self.max[axis] - ray.origin[axis]) * inv_dir[axis];
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));
        }

        // Ray intersects if tmax >= tmin and tmax >= 0
        if tmax >= tmin && tmax >= 0.0 {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere touches or overlaps a box
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.intersects_sphere(self)
    }
}

/// A ray for ground probing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants::HALF_PI, Transform};
    use approx::assert_relative_eq;

    fn unit_box() -> AABB {
        AABB::new(Vec3::new(-1.0, 0.0, 0.8), Vec3::new(1.0, 2.0, 2.0))
    }

    #[test]
    fn test_empty_box_is_union_identity() {
        let b = unit_box();
        assert!(AABB::empty().is_empty());
        assert_eq!(AABB::empty().union(&b), b);
    }

    #[test]
    fn test_from_points() {
        let b = AABB::from_points([
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
        ]);
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 4.0, 3.0));
    }

    #[test]
    fn test_shrunk_nudges_degenerate_axes() {
        let thin = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.01, 2.0));
        let out = thin.shrunk(Vec3::new(0.02, 0.02, 0.02));

        assert_relative_eq!(out.min.x, 0.02);
        assert_relative_eq!(out.max.x, 1.98);
        // Y would invert: min sits just below max instead
        assert!(out.min.y <= out.max.y);
        assert_relative_eq!(out.max.y - out.min.y, MIN_BOX_THICKNESS, epsilon = 1e-6);
    }

    #[test]
    fn test_closest_point_clamps_per_axis() {
        let p = unit_box().closest_point(Vec3::new(5.0, 1.0, 0.0));
        assert_eq!(p, Vec3::new(1.0, 1.0, 0.8));
    }

    #[test]
    fn test_sphere_intersection_is_inclusive() {
        let b = unit_box();
        assert!(b.intersects_sphere(&BoundingSphere::new(Vec3::new(0.0, 1.0, 0.3), 0.5)));
        assert!(!b.intersects_sphere(&BoundingSphere::new(Vec3::new(0.0, 1.0, 0.29), 0.5)));
        assert!(!AABB::empty().intersects_sphere(&BoundingSphere::new(Vec3::zeros(), 100.0)));
    }

    #[test]
    fn test_transformed_refits_rotated_box() {
        let b = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let matrix = Transform::from_position_yaw(Vec3::new(10.0, 0.0, 0.0), HALF_PI).to_matrix();
        let out = b.transformed(&matrix);

        assert_relative_eq!(out.min, Vec3::new(10.0, 0.0, -2.0), epsilon = 1e-5);
        assert_relative_eq!(out.max, Vec3::new(11.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_ray_hits_top_face_from_above() {
        let ground = AABB::new(Vec3::new(-50.0, -0.1, -50.0), Vec3::new(50.0, 0.0, 50.0));
        let ray = Ray::new(Vec3::new(3.0, 10.0, 4.0), Vec3::new(0.0, -1.0, 0.0));
        let t = ground.intersect_ray(&ray).unwrap();

        assert_relative_eq!(t, 10.0);
        assert_relative_eq!(ray.point_at(t).y, 0.0);
    }

    #[test]
    fn test_ray_misses_box_to_the_side() {
        let ground = AABB::new(Vec3::new(-1.0, -0.1, -1.0), Vec3::new(1.0, 0.0, 1.0));
        let ray = Ray::new(Vec3::new(3.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(ground.intersect_ray(&ray).is_none());
    }
}
