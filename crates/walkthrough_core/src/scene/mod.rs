//! Scene collaborators consumed by the locomotion core
//!
//! The model loader owns the real scene; the core only sees the parts that
//! matter for collision:
//!
//! - [`MeshNode`] hierarchies (the building, the ground, loose obstacles)
//! - [`CollisionCube`] proxies authored for trees and lamp posts
//! - the [`WorldBounds`] seam that lets the obstacle sweep treat both alike

mod mesh_node;
mod props;

pub use mesh_node::{MeshNode, WorldBounds, WorldMesh};
pub use props::{CollisionCube, CubeLayout, PropKind};
