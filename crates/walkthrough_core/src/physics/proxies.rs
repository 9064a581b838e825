//! Building collision proxies
//!
//! Splits a building's meshes into two box sets: a *front band* (meshes near
//! the front face, shrunk and tested with a thin skin so the player can reach
//! doors) and *other* boxes for the rest of the envelope.
//!
//! The split happens once per building; later calls are no-ops.

use serde::{Deserialize, Serialize};

use crate::core::config::FrontBandSettings;
use crate::foundation::math::Vec3;
use crate::physics::collision::AABB;
use crate::scene::{MeshNode, WorldBounds};

/// Axis the building's front face points along (toward its max side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontAxis {
    /// Front face is the building's max X side
    X,
    /// Front face is the building's max Z side
    #[default]
    Z,
}

impl FrontAxis {
    /// Component of `v` along this axis
    pub fn component(self, v: &Vec3) -> f32 {
        match self {
            FrontAxis::X => v.x,
            FrontAxis::Z => v.z,
        }
    }
}

/// Which proxy set a mesh lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandClass {
    /// Inside the front band
    Front,
    /// Everywhere else
    Other,
}

/// Classify a box by the distance of its center inward from the front plane
pub fn classify(bounds: &AABB, front_plane: f32, axis: FrontAxis, depth: f32) -> BandClass {
    let distance = front_plane - axis.component(&bounds.center());
    if (0.0..=depth).contains(&distance) {
        BandClass::Front
    } else {
        BandClass::Other
    }
}

/// Whether a mesh name contains any excluded fragment (case-insensitive)
pub fn is_excluded(name: &str, excluded: &[String]) -> bool {
    let name = name.to_lowercase();
    excluded
        .iter()
        .any(|fragment| !fragment.is_empty() && name.contains(&fragment.to_lowercase()))
}

/// The two box sets for one building, built lazily.
#[derive(Debug, Clone, Default)]
pub struct BuildingProxies {
    front: Vec<AABB>,
    other: Vec<AABB>,
    built: bool,
}

impl BuildingProxies {
    /// Create an unbuilt proxy cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the sets have been built
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Boxes in the front band (already shrunk)
    pub fn front(&self) -> &[AABB] {
        &self.front
    }

    /// Boxes for the rest of the envelope
    pub fn other(&self) -> &[AABB] {
        &self.other
    }

    /// Build both sets from `building`, unless already built or absent.
    pub fn build_once(&mut self, building: Option<&MeshNode>, settings: &FrontBandSettings) {
        if self.built {
            return;
        }
        let Some(root) = building else {
            return;
        };

        self.front.clear();
        self.other.clear();
        self.built = true;

        let Some(building_bounds) = root.world_bounds() else {
            log::warn!("Building '{}' has no geometry; no collision proxies built", root.name);
            return;
        };
        let front_plane = match settings.axis {
            FrontAxis::X => building_bounds.max.x,
            FrontAxis::Z => building_bounds.max.z,
        };

        let mut skipped = 0usize;
        for mesh in root.world_meshes() {
            if is_excluded(&mesh.node.name, &settings.excluded_names) {
                skipped += 1;
                continue;
            }
            match classify(&mesh.bounds, front_plane, settings.axis, settings.depth) {
                BandClass::Front => self.front.push(mesh.bounds.shrunk(settings.shrink)),
                BandClass::Other => self.other.push(mesh.bounds),
            }
        }

        log::debug!(
            "Built proxies for '{}': {} front, {} other, {} excluded (front plane {:?} = {:.3})",
            root.name,
            self.front.len(),
            self.other.len(),
            skipped,
            settings.axis,
            front_plane
        );
        if self.front.is_empty() && self.other.is_empty() {
            log::warn!("Building '{}' produced no collidable meshes", root.name);
        }
    }

    /// Forget the built sets so the next [`build_once`](Self::build_once)
    /// rebuilds them (for a new building instance)
    pub fn clear(&mut self) {
        self.front.clear();
        self.other.clear();
        self.built = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use approx::assert_relative_eq;

    fn slab(name: &str, center: Vec3, size: Vec3) -> MeshNode {
        MeshNode::mesh(name, AABB::from_center_size(Vec3::zeros(), size))
            .with_transform(Transform::from_position(center))
    }

    /// Building whose front plane sits at z = 10
    fn house() -> MeshNode {
        MeshNode::group("house")
            .with_child(slab("FrontDoor", Vec3::new(0.0, 1.0, 9.8), Vec3::new(1.0, 2.0, 0.4)))
            .with_child(slab("BackWall", Vec3::new(0.0, 1.5, 3.0), Vec3::new(6.0, 3.0, 0.2)))
            .with_child(slab("SideWall", Vec3::new(3.0, 1.5, 6.0), Vec3::new(0.2, 3.0, 7.8)))
            .with_child(slab("Porch_Canopy", Vec3::new(0.0, 2.8, 9.9), Vec3::new(3.0, 0.2, 0.2)))
            .with_child(slab("ROOF", Vec3::new(0.0, 3.2, 6.0), Vec3::new(6.5, 0.4, 7.5)))
    }

    #[test]
    fn test_front_band_example() {
        let mut proxies = BuildingProxies::new();
        proxies.build_once(Some(&house()), &FrontBandSettings::default());

        // Door centered 0.2 inside the front plane: front set, shrunk 2cm per side
        assert_eq!(proxies.front().len(), 1);
        let door = proxies.front()[0];
        assert_relative_eq!(door.min, Vec3::new(-0.48, 0.02, 9.62), epsilon = 1e-5);
        assert_relative_eq!(door.max, Vec3::new(0.48, 1.98, 9.98), epsilon = 1e-5);

        // Back wall centered 7.0 inside: other set, unmodified
        assert_eq!(proxies.other().len(), 2);
        let back = proxies.other()[0];
        assert_relative_eq!(back.center(), Vec3::new(0.0, 1.5, 3.0), epsilon = 1e-5);
        assert_relative_eq!(back.size(), Vec3::new(6.0, 3.0, 0.2), epsilon = 1e-5);
    }

    #[test]
    fn test_excluded_names_are_skipped_case_insensitively() {
        let excluded = FrontBandSettings::default().excluded_names;
        assert!(is_excluded("ROOF", &excluded));
        assert!(is_excluded("Porch_Canopy", &excluded));
        assert!(is_excluded("side_canopy_01", &excluded));
        assert!(!is_excluded("FrontDoor", &excluded));
    }

    #[test]
    fn test_partition_is_complete() {
        let mut proxies = BuildingProxies::new();
        let building = house();
        proxies.build_once(Some(&building), &FrontBandSettings::default());

        let collidable = building
            .world_meshes()
            .iter()
            .filter(|m| !is_excluded(&m.node.name, &FrontBandSettings::default().excluded_names))
            .count();
        assert_eq!(proxies.front().len() + proxies.other().len(), collidable);
    }

    #[test]
    fn test_build_is_idempotent() {
        let settings = FrontBandSettings::default();
        let mut once = BuildingProxies::new();
        once.build_once(Some(&house()), &settings);

        let mut twice = BuildingProxies::new();
        twice.build_once(Some(&house()), &settings);
        // Second call, even with a different building, changes nothing
        twice.build_once(Some(&MeshNode::group("other")), &settings);

        assert_eq!(once.front(), twice.front());
        assert_eq!(once.other(), twice.other());
    }

    #[test]
    fn test_missing_building_leaves_cache_unbuilt() {
        let mut proxies = BuildingProxies::new();
        proxies.build_once(None, &FrontBandSettings::default());
        assert!(!proxies.is_built());

        proxies.build_once(Some(&house()), &FrontBandSettings::default());
        assert!(proxies.is_built());
    }

    #[test]
    fn test_x_axis_front_plane() {
        let building = MeshNode::group("shed")
            .with_child(slab("Window", Vec3::new(4.9, 1.0, 0.0), Vec3::new(0.2, 1.0, 1.0)))
            .with_child(slab("Wall", Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.2, 2.0, 4.0)));
        let settings = FrontBandSettings {
            axis: FrontAxis::X,
            ..FrontBandSettings::default()
        };
        let mut proxies = BuildingProxies::new();
        proxies.build_once(Some(&building), &settings);

        assert_eq!(proxies.front().len(), 1);
        assert_eq!(proxies.other().len(), 1);
    }

    #[test]
    fn test_classify_band_edges() {
        let at = |z: f32| AABB::from_center_size(Vec3::new(0.0, 0.0, z), Vec3::repeat(0.1));
        assert_eq!(classify(&at(10.0), 10.0, FrontAxis::Z, 0.4), BandClass::Front);
        assert_eq!(classify(&at(9.6), 10.0, FrontAxis::Z, 0.4), BandClass::Front);
        assert_eq!(classify(&at(9.0), 10.0, FrontAxis::Z, 0.4), BandClass::Other);
        // Outside the front plane (negative distance) is not front band
        assert_eq!(classify(&at(10.5), 10.0, FrontAxis::Z, 0.4), BandClass::Other);
    }
}
