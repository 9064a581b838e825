//! Authored collision cubes for decorative props
//!
//! Trees and lamp posts have visible meshes that make poor collision proxies
//! (thin trunks, wide canopies, arms that overhang the path). Each prop kind
//! instead gets a hand-sized box placed relative to the model's bounds.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::physics::collision::AABB;
use crate::scene::mesh_node::WorldBounds;

/// Prop kinds that receive an authored collision cube.
///
/// Serialized with the model names used by the asset pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropKind {
    /// Leafy tree (`tree3`)
    #[serde(rename = "tree3")]
    LeafyTree,
    /// Bare tree (`tree2`)
    #[serde(rename = "tree2")]
    BareTree,
    /// Street lamp with a side arm (`den1`)
    #[serde(rename = "den1")]
    ArmLamp,
    /// Short post lamp (`den2`)
    #[serde(rename = "den2")]
    PostLamp,
    /// Tall pole lamp (`den3`)
    #[serde(rename = "den3")]
    PoleLamp,
}

/// Size and placement of a prop's collision cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeLayout {
    /// Full size of the cube
    pub size: Vec3,
    /// Height subtracted from the model's height before halving to get the
    /// vertical drop from the model center
    pub drop_reference: f32,
    /// Horizontal shift from the model center
    pub offset: Vec3,
}

impl PropKind {
    /// Every kind, in table order
    pub const ALL: [PropKind; 5] = [
        PropKind::LeafyTree,
        PropKind::BareTree,
        PropKind::ArmLamp,
        PropKind::PostLamp,
        PropKind::PoleLamp,
    ];

    /// Map a model name to its kind; other models get no cube
    pub fn from_model_name(name: &str) -> Option<Self> {
        match name {
            "tree3" => Some(PropKind::LeafyTree),
            "tree2" => Some(PropKind::BareTree),
            "den1" => Some(PropKind::ArmLamp),
            "den2" => Some(PropKind::PostLamp),
            "den3" => Some(PropKind::PoleLamp),
            _ => None,
        }
    }

    /// Model name in the asset pack
    pub fn model_name(self) -> &'static str {
        match self {
            PropKind::LeafyTree => "tree3",
            PropKind::BareTree => "tree2",
            PropKind::ArmLamp => "den1",
            PropKind::PostLamp => "den2",
            PropKind::PoleLamp => "den3",
        }
    }

    /// Whether the prop is a light source
    pub fn is_lamp(self) -> bool {
        matches!(self, PropKind::ArmLamp | PropKind::PostLamp | PropKind::PoleLamp)
    }

    /// Per-kind cube table
    pub fn cube_layout(self) -> CubeLayout {
        match self {
            PropKind::LeafyTree => CubeLayout {
                size: Vec3::new(1.0, 2.0, 1.0),
                drop_reference: 2.0,
                offset: Vec3::zeros(),
            },
            PropKind::BareTree => CubeLayout {
                size: Vec3::new(0.8, 5.5, 0.8),
                drop_reference: 1.5,
                // trunk sits behind and left of the canopy center
                offset: Vec3::new(-0.25, 0.0, -1.5),
            },
            PropKind::ArmLamp => CubeLayout {
                size: Vec3::new(0.6, 3.0, 0.6),
                drop_reference: 3.0,
                offset: Vec3::new(-1.4, 0.0, 0.0),
            },
            PropKind::PostLamp => CubeLayout {
                size: Vec3::new(0.5, 2.5, 0.5),
                drop_reference: 2.5,
                offset: Vec3::new(-1.5, 0.0, 0.0),
            },
            PropKind::PoleLamp => CubeLayout {
                size: Vec3::new(0.5, 3.5, 0.5),
                drop_reference: 2.5,
                offset: Vec3::zeros(),
            },
        }
    }
}

/// A manually authored box proxy attached to a prop.
///
/// Created at model-load time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionCube {
    /// Which prop this cube stands in for
    pub kind: PropKind,
    /// World-space extent of the cube
    pub bounds: AABB,
}

impl CollisionCube {
    /// Place the cube for a prop whose model occupies `model_bounds`.
    ///
    /// Returns `None` if the model bounds are empty.
    pub fn for_prop(kind: PropKind, model_bounds: &AABB) -> Option<Self> {
        if model_bounds.is_empty() {
            return None;
        }
        let layout = kind.cube_layout();
        let model_height = model_bounds.size().y;

        let mut center = model_bounds.center() + layout.offset;
        center.y -= (model_height - layout.drop_reference) * 0.5;

        Some(Self {
            kind,
            bounds: AABB::from_center_size(center, layout.size),
        })
    }

    /// Place the cube for any object that can report world bounds
    pub fn for_model<M: WorldBounds + ?Sized>(kind: PropKind, model: &M) -> Option<Self> {
        model
            .world_bounds()
            .and_then(|bounds| Self::for_prop(kind, &bounds))
    }
}

impl WorldBounds for CollisionCube {
    fn world_bounds(&self) -> Option<AABB> {
        Some(self.bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model_bounds(height: f32) -> AABB {
        AABB::new(Vec3::new(4.0, 0.0, 9.0), Vec3::new(6.0, height, 11.0))
    }

    #[test]
    fn test_model_names_roundtrip() {
        for kind in PropKind::ALL {
            assert_eq!(PropKind::from_model_name(kind.model_name()), Some(kind));
        }
        assert_eq!(PropKind::from_model_name("house"), None);
    }

    #[test]
    fn test_leafy_tree_cube_sits_on_model_base() {
        // 2m cube dropped by (8 - 2) / 2 from a center at y = 4 ⇒ centered at y = 1
        let cube = CollisionCube::for_prop(PropKind::LeafyTree, &model_bounds(8.0)).unwrap();
        assert_relative_eq!(cube.bounds.center(), Vec3::new(5.0, 1.0, 10.0), epsilon = 1e-5);
        assert_relative_eq!(cube.bounds.size(), Vec3::new(1.0, 2.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_bare_tree_cube_is_shifted_back_and_left() {
        let cube = CollisionCube::for_prop(PropKind::BareTree, &model_bounds(6.0)).unwrap();
        let center = cube.bounds.center();
        assert_relative_eq!(center.x, 4.75, epsilon = 1e-5);
        assert_relative_eq!(center.z, 8.5, epsilon = 1e-5);
        assert_relative_eq!(center.y, 3.0 - (6.0 - 1.5) * 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_lamp_offsets() {
        let bounds = model_bounds(10.0);
        let arm = CollisionCube::for_prop(PropKind::ArmLamp, &bounds).unwrap();
        let post = CollisionCube::for_prop(PropKind::PostLamp, &bounds).unwrap();
        let pole = CollisionCube::for_prop(PropKind::PoleLamp, &bounds).unwrap();

        assert_relative_eq!(arm.bounds.center().x, 3.6, epsilon = 1e-5);
        assert_relative_eq!(post.bounds.center().x, 3.5, epsilon = 1e-5);
        assert_relative_eq!(pole.bounds.center().x, 5.0, epsilon = 1e-5);
        // the pole lamp drops against 2.5m even though its cube is 3.5m tall
        assert_relative_eq!(pole.bounds.center().y, 5.0 - 3.75, epsilon = 1e-5);
        assert!(PropKind::PoleLamp.is_lamp() && !PropKind::BareTree.is_lamp());
    }

    #[test]
    fn test_empty_model_gets_no_cube() {
        assert!(CollisionCube::for_prop(PropKind::PoleLamp, &AABB::empty()).is_none());
    }
}
