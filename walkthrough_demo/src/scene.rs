//! The demo's walkthrough scene, built in code
//!
//! A small house facing +Z with a door set into its front wall, a porch
//! canopy over the door, lamps and trees along the path, and a bench.

use walkthrough_core::foundation::math::{Transform, Vec3};
use walkthrough_core::locomotion::WorldRefs;
use walkthrough_core::physics::AABB;
use walkthrough_core::scene::{CollisionCube, MeshNode, PropKind};

/// Everything the locomotion core needs from the scene
pub struct DemoScene {
    pub building: MeshNode,
    pub ground: MeshNode,
    pub obstacles: Vec<MeshNode>,
    pub collision_cubes: Vec<CollisionCube>,
}

/// A box-shaped mesh of `size` centered at `center` (parent space)
fn slab(name: &str, center: Vec3, size: Vec3) -> MeshNode {
    MeshNode::mesh(name, AABB::from_center_size(Vec3::zeros(), size)).with_transform(Transform::from_position(center))
}

/// A prop model standing on the ground at `(x, z)`
fn prop(name: &str, x: f32, z: f32, footprint: f32, height: f32) -> MeshNode {
    slab(
        name,
        Vec3::new(x, height * 0.5, z),
        Vec3::new(footprint, height, footprint),
    )
}

/// The house: walls 8 x 6 m, front face at z = -4
fn house() -> MeshNode {
    let walls = MeshNode::group("walls")
        .with_child(slab("Wall_Front_L", Vec3::new(-2.5, 1.5, -4.1), Vec3::new(3.0, 3.0, 0.2)))
        .with_child(slab("Wall_Front_R", Vec3::new(2.5, 1.5, -4.1), Vec3::new(3.0, 3.0, 0.2)))
        .with_child(slab("Wall_Back", Vec3::new(0.0, 1.5, -10.0), Vec3::new(8.0, 3.0, 0.2)))
        .with_child(slab("Wall_Left", Vec3::new(-4.0, 1.5, -7.0), Vec3::new(0.2, 3.0, 6.0)))
        .with_child(slab("Wall_Right", Vec3::new(4.0, 1.5, -7.0), Vec3::new(0.2, 3.0, 6.0)));

    MeshNode::group("house")
        .with_child(walls)
        .with_child(slab("Door", Vec3::new(0.0, 1.1, -4.15), Vec3::new(1.0, 2.2, 0.1)))
        .with_child(slab("Porch_Canopy", Vec3::new(0.0, 2.6, -4.5), Vec3::new(2.4, 0.1, 0.9)))
        .with_child(slab("Roof", Vec3::new(0.0, 3.4, -7.0), Vec3::new(8.6, 0.8, 6.0)))
}

impl DemoScene {
    /// Build the scene, splitting props into authored cubes and plain obstacles
    pub fn build() -> Self {
        let props = [
            prop("tree3", -6.0, 2.0, 3.0, 7.0),
            prop("tree2", 6.5, 4.0, 2.5, 6.0),
            prop("den1", -1.5, 3.0, 0.4, 4.5),
            prop("den2", 3.5, 0.5, 0.4, 3.0),
            prop("den3", 1.5, -1.0, 0.3, 4.0),
            slab("bench", Vec3::new(-3.0, 0.25, 5.0), Vec3::new(1.6, 0.5, 0.5)),
        ];

        let mut obstacles = Vec::new();
        let mut collision_cubes = Vec::new();
        for model in props {
            let cube = PropKind::from_model_name(&model.name).and_then(|kind| CollisionCube::for_model(kind, &model));
            match cube {
                Some(cube) => collision_cubes.push(cube),
                None => obstacles.push(model),
            }
        }
        log::info!(
            "Scene built: {} collision cubes, {} obstacles",
            collision_cubes.len(),
            obstacles.len()
        );

        Self {
            building: house(),
            ground: MeshNode::mesh("ground", AABB::new(Vec3::new(-15.0, -0.1, -15.0), Vec3::new(15.0, 0.0, 15.0))),
            obstacles,
            collision_cubes,
        }
    }

    /// Per-frame view of the scene for the controller
    pub fn world(&self) -> WorldRefs<'_> {
        WorldRefs {
            building: Some(&self.building),
            ground: Some(&self.ground),
            obstacles: &self.obstacles,
            collision_cubes: &self.collision_cubes,
        }
    }
}
