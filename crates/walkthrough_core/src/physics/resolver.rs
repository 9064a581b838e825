//! Sphere-vs-box-set resolver
//!
//! Pushes a desired player position out of the first box it overlaps, so the
//! player sits `min_gap` outside the wall at the approach radius.
//!
//! # Hysteresis
//!
//! Every call tests the desired center with the *approach* radius
//! (`radius + skin`) and snaps hits onto the approach shell plus `min_gap`.
//! A player pressing into a wall is therefore put back on the same point each
//! frame. The *stay* radius (`radius + max(0, skin - hysteresis)`) only
//! drives the [`Contact`] memory: contact is made on a hit and held until the
//! player backs off by the approach/stay difference past the resting shell.
//!
//! The caller carries a [`Contact`] per box set from one frame to the next.

use crate::foundation::math::{constants::DIRECTION_EPSILON_SQ, utils, Vec3};
use crate::physics::collision::{BoundingSphere, AABB};

/// Float slack on the contact release shell
const CONTACT_SLACK: f32 = 1e-4;

/// Contact memory for one box set, carried across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Contact {
    /// Not touching any box in the set
    #[default]
    Clear,
    /// Pressed against a box, or still inside the release shell
    Touching,
}

/// Outcome of one resolve call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Corrected position
    pub position: Vec3,
    /// Whether a box was hit and the position was moved
    pub touched: bool,
    /// Contact memory to pass into the next frame's call
    pub contact: Contact,
}

/// Radius and skin parameters for resolving against one box set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereResolver {
    /// Player sphere radius
    pub radius: f32,
    /// Extra radius while approaching
    pub skin: f32,
    /// Gap between approach and stay radii
    pub hysteresis: f32,
    /// Distance kept between the sphere and the box after a push-out
    pub min_gap: f32,
}

impl SphereResolver {
    /// Create a resolver
    pub fn new(radius: f32, skin: f32, hysteresis: f32, min_gap: f32) -> Self {
        Self {
            radius,
            skin,
            hysteresis,
            min_gap,
        }
    }

    /// Radius tested while clear of the set
    pub fn approach_radius(&self) -> f32 {
        self.radius + self.skin
    }

    /// Stickier radius once in contact
    pub fn stay_radius(&self) -> f32 {
        self.radius + (self.skin - self.hysteresis).max(0.0)
    }

    /// Distance from a box within which held contact is kept
    pub fn release_distance(&self) -> f32 {
        let resting = self.approach_radius() + self.min_gap;
        resting + (self.approach_radius() - self.stay_radius()) + CONTACT_SLACK
    }

    /// Resolve `desired` against `boxes`.
    ///
    /// Only the first intersecting box (in storage order) is resolved; run one
    /// call per set and feed each output into the next call for compound
    /// obstacles.
    pub fn resolve(&self, current: Vec3, desired: Vec3, boxes: &[AABB], contact: Contact) -> Resolution {
        if boxes.is_empty() {
            return Resolution {
                position: desired,
                touched: false,
                contact: Contact::Clear,
            };
        }

        let sphere = BoundingSphere::new(desired, self.approach_radius());
        let Some(hit) = first_hit(boxes, &sphere) else {
            return Resolution {
                position: desired,
                touched: false,
                contact: self.contact_after(contact, desired, boxes),
            };
        };

        let (nearest, normal) = surface_normal(hit, current, desired);
        let position = nearest + normal * (self.approach_radius() + self.min_gap);
        log::trace!("Resolved {:?} -> {:?} against box {:?}", desired, position, hit);

        Resolution {
            position,
            touched: true,
            contact: Contact::Touching,
        }
    }

    /// Held contact survives until the sphere leaves the release shell
    fn contact_after(&self, contact: Contact, position: Vec3, boxes: &[AABB]) -> Contact {
        if contact == Contact::Clear {
            return Contact::Clear;
        }
        let shell = BoundingSphere::new(position, self.release_distance());
        if first_hit(boxes, &shell).is_some() {
            Contact::Touching
        } else {
            Contact::Clear
        }
    }
}

fn first_hit<'a>(boxes: &'a [AABB], sphere: &BoundingSphere) -> Option<&'a AABB> {
    boxes.iter().find(|b| b.intersects_sphere(sphere))
}

/// Nearest surface point on `hit` and the outward normal to push along.
///
/// When the desired center is on or inside the box the clamp gives no
/// direction; the player is then sent back out through the face it entered,
/// picked from the dominant horizontal movement axis.
fn surface_normal(hit: &AABB, current: Vec3, desired: Vec3) -> (Vec3, Vec3) {
    let mut nearest = hit.closest_point(desired);
    let offset = desired - nearest;
    if offset.magnitude_squared() >= DIRECTION_EPSILON_SQ {
        return (nearest, offset.normalize());
    }

    let movement = desired - current;
    let axis = if movement.x.abs() > movement.z.abs() {
        0
    } else if movement.z.abs() > 0.0 {
        2
    } else {
        shallowest_horizontal_axis(hit, desired).0
    };

    let direction = if movement[axis] != 0.0 {
        -utils::signum_or_zero(movement[axis])
    } else {
        shallowest_horizontal_axis(hit, desired).1
    };

    let mut normal = Vec3::zeros();
    normal[axis] = direction;
    nearest[axis] = if direction < 0.0 { hit.min[axis] } else { hit.max[axis] };
    (nearest, normal)
}

/// X or Z face closest to `point`, as (axis, outward sign)
fn shallowest_horizontal_axis(hit: &AABB, point: Vec3) -> (usize, f32) {
    [0usize, 2]
        .into_iter()
        .flat_map(|axis| {
            [
                (axis, -1.0, point[axis] - hit.min[axis]),
                (axis, 1.0, hit.max[axis] - point[axis]),
            ]
        })
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map_or((2, -1.0), |(axis, sign, _)| (axis, sign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn resolver() -> SphereResolver {
        SphereResolver::new(0.5, 0.01, 0.008, 0.002)
    }

    fn wall() -> AABB {
        AABB::new(Vec3::new(-1.0, 0.0, 0.8), Vec3::new(1.0, 2.0, 2.0))
    }

    #[test]
    fn test_radii() {
        let r = resolver();
        assert_relative_eq!(r.approach_radius(), 0.51, epsilon = 1e-6);
        assert_relative_eq!(r.stay_radius(), 0.502, epsilon = 1e-6);
        assert_relative_eq!(r.release_distance(), 0.512 + 0.008 + 1e-4, epsilon = 1e-6);

        // Hysteresis larger than skin never shrinks below the bare radius
        let thin = SphereResolver::new(0.5, 0.002, 0.008, 0.002);
        assert_relative_eq!(thin.stay_radius(), 0.5);
    }

    #[test]
    fn test_empty_set_passes_through() {
        let desired = Vec3::new(1.0, 2.0, 3.0);
        let res = resolver().resolve(Vec3::zeros(), desired, &[], Contact::Touching);
        assert_eq!(res.position, desired);
        assert!(!res.touched);
        assert_eq!(res.contact, Contact::Clear);
    }

    #[test]
    fn test_clear_path_passes_through() {
        let desired = Vec3::new(0.0, 0.0, 0.2);
        let res = resolver().resolve(Vec3::zeros(), desired, &[wall()], Contact::Clear);
        assert_eq!(res.position, desired);
        assert!(!res.touched);
        assert_eq!(res.contact, Contact::Clear);
    }

    #[test]
    fn test_walking_into_wall_example() {
        // Desired center lands inside the box: pushed back out the near face
        let res = resolver().resolve(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0), &[wall()], Contact::Clear);

        assert!(res.touched);
        assert_eq!(res.contact, Contact::Touching);
        assert_relative_eq!(res.position, Vec3::new(0.0, 0.0, 0.8 - 0.51 - 0.002), epsilon = 1e-5);
    }

    #[test]
    fn test_grazing_wall_pushes_along_surface_normal() {
        // Center outside the box but within the approach radius
        let desired = Vec3::new(0.0, 1.0, 0.5);
        let res = resolver().resolve(Vec3::new(0.0, 1.0, 0.0), desired, &[wall()], Contact::Clear);

        assert!(res.touched);
        assert_relative_eq!(res.position, Vec3::new(0.0, 1.0, 0.8 - 0.512), epsilon = 1e-5);
    }

    #[test]
    fn test_resolved_position_keeps_min_gap() {
        let r = resolver();
        let b = wall();
        let attempts = [
            (Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.6)),
            (Vec3::new(-2.0, 1.0, 1.2), Vec3::new(-1.3, 1.0, 1.2)),
            (Vec3::new(2.0, 1.0, 2.5), Vec3::new(1.2, 1.0, 2.2)),
            (Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.1, 1.0, 1.5)),
            (Vec3::new(3.0, 1.0, 1.4), Vec3::new(0.5, 1.0, 1.4)),
            // Inside the approach shell but outside the stay radius
            (Vec3::new(0.0, 1.0, 0.288), Vec3::new(0.0, 1.0, 0.2933)),
            (Vec3::new(0.0, 1.0, 0.288), Vec3::new(0.05, 1.0, 0.2905)),
            (Vec3::new(0.0, 1.0, 0.29), Vec3::new(0.0, 1.0, 0.289)),
        ];

        for contact in [Contact::Clear, Contact::Touching] {
            for (current, desired) in attempts {
                let hit_at_approach = b.intersects_sphere(&BoundingSphere::new(desired, r.approach_radius()));
                let res = r.resolve(current, desired, &[b], contact);
                assert_eq!(res.touched, hit_at_approach, "{desired:?} from {contact:?}");
                if hit_at_approach {
                    let gap = b.distance_to_point(res.position) - r.radius;
                    assert!(gap >= r.min_gap - 1e-5, "gap {gap} too small for {desired:?} from {contact:?}");
                    assert_eq!(res.contact, Contact::Touching);
                }
            }
        }
    }

    #[test]
    fn test_entering_from_side_exits_through_side() {
        // Moving mostly along +X into the box: exit through the min X face
        let current = Vec3::new(-2.0, 1.0, 1.4);
        let desired = Vec3::new(-0.9, 1.0, 1.45);
        let res = resolver().resolve(current, desired, &[wall()], Contact::Clear);

        assert_relative_eq!(res.position.x, -1.0 - 0.512, epsilon = 1e-5);
        assert_relative_eq!(res.position.z, 1.45, epsilon = 1e-5);
    }

    #[test]
    fn test_stationary_inside_uses_shallowest_face() {
        let desired = Vec3::new(0.9, 1.0, 1.4);
        let res = resolver().resolve(desired, desired, &[wall()], Contact::Clear);
        assert_relative_eq!(res.position.x, 1.0 + 0.512, epsilon = 1e-5);
    }

    #[test]
    fn test_first_box_in_storage_order_wins() {
        // Both boxes reach the sphere; only the first stored one is resolved
        let near = AABB::new(Vec3::new(-1.0, 0.0, 0.8), Vec3::new(1.0, 2.0, 1.0));
        let far = AABB::new(Vec3::new(-1.0, 0.0, 1.0), Vec3::new(1.0, 2.0, 3.0));
        let desired = Vec3::new(0.0, 1.0, 0.5);

        let near_first = resolver().resolve(Vec3::zeros(), desired, &[near, far], Contact::Clear);
        let far_first = resolver().resolve(Vec3::zeros(), desired, &[far, near], Contact::Clear);
        assert_relative_eq!(near_first.position.z, 0.8 - 0.512, epsilon = 1e-5);
        assert_relative_eq!(far_first.position.z, 1.0 - 0.512, epsilon = 1e-5);
    }

    #[test]
    fn test_contact_is_held_until_release_shell() {
        let r = resolver();
        let b = [wall()];

        // Walk into the wall; contact is established at the approach shell
        let first = r.resolve(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.4), &b, Contact::Clear);
        assert!(first.touched);
        assert_eq!(first.contact, Contact::Touching);
        let rest = first.position;

        // Backing off less than the hysteresis keeps contact
        let near = rest - Vec3::new(0.0, 0.0, 0.005);
        let held = r.resolve(rest, near, &b, first.contact);
        assert!(!held.touched);
        assert_eq!(held.position, near);
        assert_eq!(held.contact, Contact::Touching);

        // The same spot reached without prior contact is clear
        let cold = r.resolve(Vec3::zeros(), near, &b, Contact::Clear);
        assert_eq!(cold.contact, Contact::Clear);

        // Stepping well away releases it
        let away = r.resolve(near, Vec3::new(0.0, 1.0, -0.5), &b, held.contact);
        assert_eq!(away.contact, Contact::Clear);
    }

    #[test]
    fn test_slow_push_rests_on_one_point() {
        let r = resolver();
        let b = [wall()];
        let rest_z = 0.8 - 0.512;
        let mut res = r.resolve(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.3), &b, Contact::Clear);

        // Steps smaller than the hysteresis band, held for many frames
        for frame in 0..300 {
            let current = res.position;
            res = r.resolve(current, current + Vec3::new(0.0, 0.0, 0.003), &b, res.contact);
            assert!(res.touched, "frame {frame} slipped through");
            assert_eq!(res.contact, Contact::Touching);
            assert_relative_eq!(res.position.z, rest_z, epsilon = 1e-5);

            let gap = b[0].distance_to_point(res.position) - r.radius;
            assert!(gap >= r.min_gap - 1e-5, "gap {gap} at frame {frame}");
        }
    }

    #[test]
    fn test_resting_on_the_shell_does_not_oscillate() {
        let r = resolver();
        let b = [wall()];
        let mut res = r.resolve(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.5), &b, Contact::Clear);
        let rest = res.position;

        for _ in 0..10 {
            res = r.resolve(res.position, res.position, &b, res.contact);
            assert!(!res.touched);
            assert_eq!(res.position, rest);
        }
    }
}
