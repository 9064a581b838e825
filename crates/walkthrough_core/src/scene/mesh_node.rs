//! Mesh hierarchy handed over by the model loader
//!
//! Only what collision needs is kept from a loaded model: node names, local
//! transforms and the local-space bounds of each mesh's geometry.

use crate::foundation::math::{Mat4, Transform};
use crate::physics::collision::AABB;

/// Anything that can report a world-space bounding box.
///
/// Returns `None` when there is no geometry to bound.
pub trait WorldBounds {
    /// World-space bounds, if any
    fn world_bounds(&self) -> Option<AABB>;
}

/// A node in a loaded model hierarchy.
///
/// The root's transform is interpreted in world space; every child's
/// transform is relative to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    /// Node name as authored in the source model
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Local-space bounds of this node's own geometry (`None` for groups)
    pub geometry: Option<AABB>,
    /// Child nodes
    pub children: Vec<MeshNode>,
}

/// A mesh found during traversal, with its geometry in world space
#[derive(Debug, Clone, Copy)]
pub struct WorldMesh<'a> {
    /// The mesh node
    pub node: &'a MeshNode,
    /// Its own geometry bounds in world space
    pub bounds: AABB,
}

impl MeshNode {
    /// Create an empty group node
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            geometry: None,
            children: Vec::new(),
        }
    }

    /// Create a mesh node with local-space geometry bounds
    pub fn mesh(name: impl Into<String>, local_bounds: AABB) -> Self {
        Self {
            geometry: Some(local_bounds),
            ..Self::group(name)
        }
    }

    /// Builder: set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: append a child
    pub fn with_child(mut self, child: MeshNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child
    pub fn add_child(&mut self, child: MeshNode) {
        self.children.push(child);
    }

    /// Whether this node carries geometry
    pub fn is_mesh(&self) -> bool {
        self.geometry.is_some()
    }

    /// Depth-first traversal (parent before children) yielding each node with
    /// its world matrix.
    pub fn traverse<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a MeshNode, &Mat4),
    {
        self.traverse_from(&Mat4::identity(), visit);
    }

    fn traverse_from<'a, F>(&'a self, parent: &Mat4, visit: &mut F)
    where
        F: FnMut(&'a MeshNode, &Mat4),
    {
        let world = parent * self.transform.to_matrix();
        visit(self, &world);
        for child in &self.children {
            child.traverse_from(&world, visit);
        }
    }

    /// Every mesh in the hierarchy with its geometry in world space.
    ///
    /// Meshes whose geometry is empty are skipped.
    pub fn world_meshes(&self) -> Vec<WorldMesh<'_>> {
        let mut meshes = Vec::new();
        self.traverse(&mut |node, world| {
            if let Some(local) = node.geometry {
                let bounds = local.transformed(world);
                if !bounds.is_empty() {
                    meshes.push(WorldMesh { node, bounds });
                }
            }
        });
        meshes
    }
}

impl WorldBounds for MeshNode {
    /// Union of every descendant's geometry in world space
    fn world_bounds(&self) -> Option<AABB> {
        let bounds = self
            .world_meshes()
            .iter()
            .fold(AABB::empty(), |acc, mesh| acc.union(&mesh.bounds));
        (!bounds.is_empty()).then_some(bounds)
    }
}
