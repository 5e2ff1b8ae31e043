//! Locomotion intent: camera-relative movement direction from raw input.

use bevy::prelude::*;

use crate::InputSnapshot;

/// Derive a normalized, horizontal world-space movement direction.
///
/// The camera basis vectors are flattened onto the XZ plane and renormalized
/// *before* being combined with the key states, so movement stays horizontal
/// regardless of camera pitch and a diagonal press yields a unit vector
/// rather than a length-sqrt(2) one.
///
/// Returns `Vec3::ZERO` when no direction is held (or the camera basis is
/// degenerate, e.g. looking straight down).
pub fn compute_move_direction(
    input: &InputSnapshot,
    camera_forward: Vec3,
    camera_right: Vec3,
) -> Vec3 {
    let forward = Vec3::new(camera_forward.x, 0.0, camera_forward.z).normalize_or_zero();
    let right = Vec3::new(camera_right.x, 0.0, camera_right.z).normalize_or_zero();

    let mut direction = Vec3::ZERO;
    if input.forward {
        direction += forward;
    }
    if input.backward {
        direction -= forward;
    }
    if input.right {
        direction += right;
    }
    if input.left {
        direction -= right;
    }

    direction.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(forward: bool, backward: bool, left: bool, right: bool) -> InputSnapshot {
        InputSnapshot {
            forward,
            backward,
            left,
            right,
            ..Default::default()
        }
    }

    #[test]
    fn test_diagonal_is_unit_length() {
        let dir = compute_move_direction(&keys(true, false, false, true), Vec3::NEG_Z, Vec3::X);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pitched_camera_still_moves_horizontally() {
        // Camera looking 45 degrees down; movement must stay on the XZ plane
        // at full speed, not get scaled by the pitch.
        let cam_forward = Vec3::new(0.0, -0.707, -0.707);
        let dir = compute_move_direction(&keys(true, false, false, false), cam_forward, Vec3::X);
        assert_eq!(dir.y, 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.z < 0.0);
    }

    #[test]
    fn test_no_input_gives_zero() {
        let dir = compute_move_direction(&keys(false, false, false, false), Vec3::NEG_Z, Vec3::X);
        assert_eq!(dir, Vec3::ZERO);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let dir = compute_move_direction(&keys(true, true, false, false), Vec3::NEG_Z, Vec3::X);
        assert_eq!(dir, Vec3::ZERO);
    }

    #[test]
    fn test_straight_down_camera_is_degenerate_not_nan() {
        let dir = compute_move_direction(&keys(true, false, false, false), Vec3::NEG_Y, Vec3::X);
        assert!(dir.is_finite());
        assert_eq!(dir, Vec3::ZERO);
    }
}
