//! Collision primitives
//!
//! Every obstacle in the walkthrough is reduced to an axis-aligned box and the
//! player to a sphere; these are the only shapes the locomotion passes test.
//!
//! # Key Types
//!
//! - [`AABB`] - world-space box proxy for meshes, cubes and the ground
//! - [`BoundingSphere`] - the player's collision volume
//! - [`Ray`] - downward ground probe

pub mod primitives;

pub use primitives::{BoundingSphere, Ray, AABB, MIN_BOX_THICKNESS};
