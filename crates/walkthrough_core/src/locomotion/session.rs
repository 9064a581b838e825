//! VR session lifecycle
//!
//! The platform XR layer calls into the controller when a session starts or
//! ends and when controllers connect; nothing is subscribed implicitly.

use crate::input::Handedness;

/// Whether an immersive session is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Desktop only
    #[default]
    Inactive,
    /// Immersive VR session running
    ActiveVr,
}

impl SessionState {
    /// Whether VR locomotion runs this frame
    pub fn is_vr(self) -> bool {
        matches!(self, SessionState::ActiveVr)
    }
}

/// Which controller index is held in which hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerSlots {
    /// Index of the left-hand controller
    pub left: Option<usize>,
    /// Index of the right-hand controller
    pub right: Option<usize>,
}

impl ControllerSlots {
    /// Record controller `index` connecting in `hand`
    pub fn connect(&mut self, index: usize, hand: Handedness) {
        match hand {
            Handedness::Left => self.left = Some(index),
            Handedness::Right => self.right = Some(index),
            Handedness::None => {}
        }
    }

    /// Forget controller `index` in whichever hand it held
    pub fn disconnect(&mut self, index: usize) {
        if self.left == Some(index) {
            self.left = None;
        }
        if self.right == Some(index) {
            self.right = None;
        }
    }

    /// Forget both hands
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
