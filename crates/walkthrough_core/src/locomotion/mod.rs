//! Player locomotion
//!
//! [`LocomotionController`] is the per-frame entry point for both the VR and
//! desktop paths. The surrounding application owns the rig and player and
//! passes them in every frame along with the scene collaborators.

pub mod controller;
pub mod head_bob;
pub mod modes;
pub mod rig;
pub mod session;
pub mod turn;

pub use controller::{LocomotionController, WorldRefs};
pub use head_bob::HeadBob;
pub use modes::{LocomotionMode, MovementReference, TurnMode};
pub use rig::{CameraPose, PlayerState, ViewerRig};
pub use session::{ControllerSlots, SessionState};
pub use turn::TurnState;
