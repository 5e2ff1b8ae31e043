//! Facing control: smooth yaw toward the movement direction.
//!
//! Physics rotation is locked on the body; the visual model root is the only
//! thing that turns, driven by this value.

use bevy::prelude::*;

use crate::YAW_SMOOTHING;

/// Blend the current yaw toward the movement direction.
///
/// Exponential smoothing via quaternion slerp: the turn rate is proportional
/// to the angular distance remaining, not a constant speed. With no movement
/// the character keeps its last facing.
pub fn update_yaw(current_yaw: f32, move_dir: Vec3) -> f32 {
    if move_dir.length_squared() <= f32::EPSILON {
        return current_yaw;
    }

    let target_yaw = move_dir.x.atan2(move_dir.z);
    let current = Quat::from_rotation_y(current_yaw);
    let target = Quat::from_rotation_y(target_yaw);
    let blended = current.slerp(target, YAW_SMOOTHING);
    blended.to_euler(EulerRot::YXZ).0
}
