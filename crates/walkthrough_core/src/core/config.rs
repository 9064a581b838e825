//! # Locomotion Configuration
//!
//! All tuning for the locomotion and collision core lives here, grouped by the
//! subsystem that consumes it. Every field has a serde default so a config
//! file only needs to name the values it changes.
//!
//! ## Configuration Categories
//!
//! - **Movement**: deadzone, move speeds, eye height, default modes
//! - **Turn**: smooth/snap turning parameters
//! - **Collision**: player sphere, skin, hysteresis, back-off, ground margin
//! - **Front band**: the tighter approach zone near the building's front face
//! - **Head bob** and **mouse look**: desktop-only feel settings

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError, ConfigFormat};
use crate::foundation::math::{constants, Vec3};
use crate::locomotion::modes::{LocomotionMode, MovementReference, TurnMode};
use crate::physics::proxies::FrontAxis;

/// # Movement Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Analog values below this magnitude read as zero
    pub deadzone: f32,
    /// Thumbstick move speed in VR, metres per second
    pub vr_move_speed: f32,
    /// Keyboard move speed on desktop, metres per second
    pub desktop_move_speed: f32,
    /// Camera height above the rig when not bobbing
    pub eye_height: f32,
    /// Locomotion mode at startup
    pub locomotion_mode: LocomotionMode,
    /// Movement reference frame at startup
    pub reference: MovementReference,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            deadzone: 0.15,
            vr_move_speed: 1.5,
            desktop_move_speed: 8.0,
            eye_height: 1.6,
            locomotion_mode: LocomotionMode::Hybrid,
            reference: MovementReference::Rig,
        }
    }
}

/// # Turn Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnSettings {
    /// Smooth or snap turning
    pub mode: TurnMode,
    /// Smooth turn rate in radians per second at full deflection
    pub smooth_speed: f32,
    /// Snap turn step in radians
    pub snap_angle: f32,
    /// Minimum time between two snaps, in seconds
    pub snap_cooldown_secs: f32,
}

impl Default for TurnSettings {
    fn default() -> Self {
        Self {
            mode: TurnMode::Smooth,
            smooth_speed: constants::SIXTH_PI,
            snap_angle: constants::SIXTH_PI,
            snap_cooldown_secs: 0.18,
        }
    }
}

/// # Collision Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    /// Radius of the player's collision sphere
    pub player_radius: f32,
    /// Extra radius against the building envelope (sides and back)
    pub skin: f32,
    /// Gap kept between the sphere and a wall after a push-out
    pub min_gap: f32,
    /// Difference between the approach and stay radii
    pub hysteresis: f32,
    /// Largest nudge applied when touching a prop or obstacle
    pub obstacle_back_off: f32,
    /// Ground edge margin as a multiple of the player radius
    pub ground_margin_factor: f32,
    /// Snap the desktop player onto the surface below after moving
    pub ground_follow: bool,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            player_radius: 0.5,
            skin: 0.01,
            min_gap: 0.002,
            hysteresis: 0.008,
            obstacle_back_off: 0.01,
            ground_margin_factor: 1.1,
            ground_follow: true,
        }
    }
}

impl CollisionSettings {
    /// Margin kept from the ground's edge
    pub fn ground_margin(&self) -> f32 {
        self.player_radius * self.ground_margin_factor
    }
}

/// # Front Band Configuration
///
/// Meshes whose center lies within `depth` of the building's front face are
/// shrunk and tested with the thin `skin`, so the player can walk right up to
/// doors and windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontBandSettings {
    /// Axis the front face points along (its max side)
    pub axis: FrontAxis,
    /// Depth of the band measured inward from the front plane
    pub depth: f32,
    /// Extra radius used against front boxes
    pub skin: f32,
    /// Per-axis deflation applied to front boxes
    pub shrink: Vec3,
    /// Name fragments (case-insensitive) of meshes that never collide
    pub excluded_names: Vec<String>,
}

impl Default for FrontBandSettings {
    fn default() -> Self {
        Self {
            axis: FrontAxis::Z,
            depth: 0.40,
            skin: 0.002,
            shrink: Vec3::new(0.02, 0.02, 0.02),
            excluded_names: vec!["roof".to_string(), "canopy".to_string(), "porch".to_string()],
        }
    }
}

/// # Head Bob Configuration (desktop only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBobSettings {
    /// Oscillation rate in radians per second of walking
    pub frequency: f32,
    /// Vertical amplitude in metres
    pub amplitude: f32,
    /// Axis magnitude above which the player counts as walking
    pub move_threshold: f32,
}

impl Default for HeadBobSettings {
    fn default() -> Self {
        Self {
            frequency: 10.0,
            amplitude: 0.03,
            move_threshold: 0.1,
        }
    }
}

/// # Mouse Look Configuration (desktop only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseLookSettings {
    /// Radians of rotation per pixel of pointer travel
    pub sensitivity: f32,
    /// Pitch limit in radians, applied symmetrically
    pub max_pitch: f32,
}

impl Default for MouseLookSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.003,
            max_pitch: constants::HALF_PI,
        }
    }
}

/// # Complete Locomotion Configuration
///
/// Top-level configuration handed to the
/// [`LocomotionController`](crate::locomotion::LocomotionController).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Movement settings
    pub movement: MovementSettings,
    /// Turn settings
    pub turn: TurnSettings,
    /// Collision settings
    pub collision: CollisionSettings,
    /// Front band settings
    pub front_band: FrontBandSettings,
    /// Head bob settings
    pub head_bob: HeadBobSettings,
    /// Mouse look settings
    pub mouse_look: MouseLookSettings,
}

impl LocomotionConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the player radius
    pub fn with_player_radius(mut self, radius: f32) -> Self {
        self.collision.player_radius = radius;
        self
    }

    /// Set the turn mode
    pub fn with_turn_mode(mut self, mode: TurnMode) -> Self {
        self.turn.mode = mode;
        self
    }

    /// Set the startup locomotion mode
    pub fn with_locomotion_mode(mut self, mode: LocomotionMode) -> Self {
        self.movement.locomotion_mode = mode;
        self
    }

    /// Set the startup movement reference
    pub fn with_reference(mut self, reference: MovementReference) -> Self {
        self.movement.reference = reference;
        self
    }

    /// Set the front band axis and depth
    pub fn with_front_band(mut self, axis: FrontAxis, depth: f32) -> Self {
        self.front_band.axis = axis;
        self.front_band.depth = depth;
        self
    }

    /// Enable or disable desktop ground following
    pub fn with_ground_follow(mut self, enabled: bool) -> Self {
        self.collision.ground_follow = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        if !(0.0..1.0).contains(&m.deadzone) {
            return Err(invalid(format!("deadzone must be in [0, 1), got {}", m.deadzone)));
        }
        if m.vr_move_speed <= 0.0 || m.desktop_move_speed <= 0.0 {
            return Err(invalid("move speeds must be positive"));
        }

        let c = &self.collision;
        if c.player_radius <= 0.0 {
            return Err(invalid(format!("player radius must be positive, got {}", c.player_radius)));
        }
        if c.skin < 0.0 || c.min_gap < 0.0 || c.hysteresis < 0.0 || c.obstacle_back_off < 0.0 {
            return Err(invalid("skin, gap, hysteresis and back-off must not be negative"));
        }
        if c.ground_margin_factor < 0.0 {
            return Err(invalid("ground margin factor must not be negative"));
        }

        let f = &self.front_band;
        if f.depth < 0.0 || f.skin < 0.0 {
            return Err(invalid("front band depth and skin must not be negative"));
        }
        if f.shrink.iter().any(|s| *s < 0.0) {
            return Err(invalid("front band shrink must not be negative"));
        }

        let t = &self.turn;
        if t.smooth_speed <= 0.0 || t.snap_angle <= 0.0 || t.snap_cooldown_secs < 0.0 {
            return Err(invalid("turn speed and snap angle must be positive"));
        }

        Ok(())
    }
}

impl Config for LocomotionConfig {}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
