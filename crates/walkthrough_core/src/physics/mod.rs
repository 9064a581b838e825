//! Kinematic collision for the walkthrough player
//!
//! Everything here works on axis-aligned proxies: the building is split into
//! two box sets by [`BuildingProxies`], each resolved with a [`SphereResolver`];
//! props and loose obstacles get the softer [`ObstacleSweep`]; the ground
//! bounds the walkable area.

pub mod collision;
pub mod ground;
pub mod proxies;
pub mod resolver;
pub mod sweep;

pub use collision::{BoundingSphere, Ray, AABB, MIN_BOX_THICKNESS};
pub use ground::{clamp_to_ground, follow_ground, ground_height_at};
pub use proxies::{BandClass, BuildingProxies, FrontAxis};
pub use resolver::{Contact, Resolution, SphereResolver};
pub use sweep::ObstacleSweep;
