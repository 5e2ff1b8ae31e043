//! Per-tick input snapshot consumed by the character controller.
//!
//! The controller never reads a live key map; the client samples its devices
//! once per tick into this value so the whole pipeline stays deterministic
//! and testable.

use serde::{Deserialize, Serialize};

/// Logical input state for one simulation tick.
///
/// Directional and hold fields are level-triggered (true while held).
/// `booster_toggle` is edge-triggered: the client sets it only on the tick
/// the key was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Jump while grounded; ascend while the booster is active.
    pub jump: bool,
    pub sprint: bool,
    /// Booster on/off edge (just-pressed this tick).
    pub booster_toggle: bool,
}

impl InputSnapshot {
    /// True if any directional key is held.
    pub fn any_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}
