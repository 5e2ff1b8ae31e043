//! Third-person orbit camera

use bevy::prelude::*;
use shared::PLAYER_HEIGHT;

use crate::player::PlayerBody;

/// Orbit radius from the pivot
const THIRD_PERSON_DISTANCE: f32 = 5.5;
/// Default orbit angle (slightly above)
const THIRD_PERSON_DEFAULT_PITCH: f32 = 0.25;

/// Update camera to orbit the player
pub fn update_camera(
    player_query: Query<&Transform, (With<PlayerBody>, Without<Camera3d>)>,
    mut camera_query: Query<&mut Transform, (With<Camera3d>, Without<PlayerBody>)>,
    input_state: Res<crate::input::InputState>,
    time: Res<Time>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    // Looking down orbits the camera up and over; looking up brings it down.
    let orbit_yaw = input_state.yaw;
    let orbit_pitch = (THIRD_PERSON_DEFAULT_PITCH - input_state.pitch * 0.6).clamp(-0.2, 1.3);

    let pivot = player_transform.translation + Vec3::new(0.0, PLAYER_HEIGHT * 0.5, 0.0);
    let target_pos = orbit_position(pivot, orbit_yaw, orbit_pitch, THIRD_PERSON_DISTANCE);
    let target_rot = look_at_level(target_pos, pivot);

    // Mild smoothing to remove micro-jitter from the physics step.
    let cam_rate: f32 = 35.0;
    let cam_t = 1.0_f32 - (-cam_rate * time.delta_secs()).exp();
    camera_transform.translation = camera_transform.translation.lerp(target_pos, cam_t);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, cam_t);
}

/// Calculate camera position orbiting around a pivot point
fn orbit_position(pivot: Vec3, yaw: f32, pitch: f32, distance: f32) -> Vec3 {
    let horizontal_dist = distance * pitch.cos();
    let behind_dir = Vec3::new(yaw.sin(), 0.0, yaw.cos());
    let vertical_offset = distance * pitch.sin();

    pivot + behind_dir * horizontal_dist + Vec3::new(0.0, vertical_offset, 0.0)
}

/// Create a rotation that looks at the target while keeping the camera level
fn look_at_level(eye: Vec3, target: Vec3) -> Quat {
    Transform::from_translation(eye).looking_at(target, Vec3::Y).rotation
}
