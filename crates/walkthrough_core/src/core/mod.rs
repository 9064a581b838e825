//! # Core Module
//!
//! Shared abstractions used by every subsystem of the walkthrough core.
//!
//! ## Organization
//!
//! - **Config**: typed tuning for locomotion, collision and desktop feel
//! - **Foundation**: low-level utilities (math, time, logging)

pub mod config;

// Re-export foundation for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    CollisionSettings,
    Config,
    ConfigError,
    ConfigFormat,
    FrontBandSettings,
    HeadBobSettings,
    LocomotionConfig,
    MouseLookSettings,
    MovementSettings,
    TurnSettings,
};
