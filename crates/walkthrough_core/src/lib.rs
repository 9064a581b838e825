//! # Walkthrough Core
//!
//! Locomotion and collision for an interactive 3D walkthrough, on desktop and
//! in VR.
//!
//! ## Features
//!
//! - **Two-band building collision**: a permissive front band near entrances
//!   and a tighter envelope elsewhere, with hysteresis against jitter
//! - **Prop proxies**: authored collision cubes for trees and lamp posts
//! - **Input sampling**: keyboard, mouse look and VR thumbsticks
//! - **Turning**: smooth or edge-triggered snap turns with cooldown
//! - **Config files**: TOML or RON tuning with serde defaults
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use walkthrough_core::prelude::*;
//!
//! let ground = MeshNode::mesh("ground", AABB::new(Vec3::new(-20.0, -0.1, -20.0), Vec3::new(20.0, 0.0, 20.0)));
//! let world = WorldRefs { ground: Some(&ground), ..WorldRefs::default() };
//!
//! let mut controller = LocomotionController::new(LocomotionConfig::default());
//! let mut rig = controller.spawn_rig();
//! let mut player = controller.spawn_player(Vec3::new(0.0, 0.5, 0.0));
//! let mut keys = KeyboardState::new();
//! keys.press(KeyCode::W);
//!
//! let mut clock = FrameClock::new();
//! controller.update_desktop(clock.tick(), &keys, &world, &mut rig, &mut player);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core modules
pub mod core;
pub mod config;
pub mod foundation;

// Collision and locomotion
pub mod input;
pub mod locomotion;
pub mod physics;
pub mod scene;

/// Common imports for walkthrough users
pub mod prelude {
    pub use crate::{
        core::config::{Config, ConfigError, LocomotionConfig},
        foundation::{
            math::{Quat, Transform, Vec3},
            time::{FrameClock, FrameTime},
        },
        input::{Handedness, KeyCode, KeyboardState, MouseButton, MouseLook, XrInputSource},
        locomotion::{
            LocomotionController, LocomotionMode, MovementReference, PlayerState, SessionState, TurnMode,
            ViewerRig, WorldRefs,
        },
        physics::{FrontAxis, AABB},
        scene::{CollisionCube, MeshNode, PropKind, WorldBounds},
    };
}
