//! Player input handling

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use shared::InputSnapshot;
use std::f32::consts::FRAC_PI_2;

use crate::settings::InputSettings;
use crate::states::GameState;

/// Client-side input state, sampled into an [`InputSnapshot`] once per frame.
#[derive(Resource, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
    /// Edge: booster key was pressed this frame.
    pub booster_toggle: bool,
    /// Mouse-controlled orbit yaw
    pub yaw: f32,
    /// Mouse-controlled orbit pitch
    pub pitch: f32,
    /// Sprint latch when `sprint_toggle` is enabled in settings.
    sprint_latched: bool,
}

impl InputState {
    /// Snapshot the logical input for the character controller.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            jump: self.jump,
            sprint: self.sprint,
            booster_toggle: self.booster_toggle,
        }
    }
}

/// Handle keyboard input for movement
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<InputSettings>,
    mut input_state: ResMut<InputState>,
) {
    input_state.forward = keyboard.pressed(KeyCode::KeyW);
    input_state.backward = keyboard.pressed(KeyCode::KeyS);
    input_state.left = keyboard.pressed(KeyCode::KeyA);
    input_state.right = keyboard.pressed(KeyCode::KeyD);
    input_state.jump = keyboard.pressed(KeyCode::Space);

    let shift =
        keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    if settings.sprint_toggle {
        if keyboard.just_pressed(KeyCode::ShiftLeft)
            || keyboard.just_pressed(KeyCode::ShiftRight)
        {
            input_state.sprint_latched = !input_state.sprint_latched;
        }
        // Releasing all movement drops the latch.
        if !(input_state.forward || input_state.backward || input_state.left || input_state.right)
        {
            input_state.sprint_latched = false;
        }
        input_state.sprint = input_state.sprint_latched;
    } else {
        input_state.sprint = shift;
    }

    // Booster is edge-triggered: only true on the press frame.
    input_state.booster_toggle = keyboard.just_pressed(KeyCode::KeyF);
    if input_state.booster_toggle {
        info!("Booster toggled");
    }
}

/// Handle mouse input for the orbit camera
pub fn handle_mouse_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    settings: Res<InputSettings>,
    mut input_state: ResMut<InputState>,
) {
    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }

    if delta != Vec2::ZERO {
        let pitch_sign = if settings.invert_y { 1.0 } else { -1.0 };
        input_state.yaw -= delta.x * settings.mouse_sensitivity;
        input_state.pitch += delta.y * settings.mouse_sensitivity * pitch_sign;
        input_state.pitch = input_state.pitch.clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
    }
}

/// Toggle pause with Escape, releasing the cursor while paused.
pub fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    game_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    let paused = game_state.get() == &GameState::Playing;
    next_state.set(if paused {
        GameState::Paused
    } else {
        GameState::Playing
    });

    if let Ok(window_entity) = windows.single() {
        if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
            if paused {
                cursor.grab_mode = CursorGrabMode::None;
                cursor.visible = true;
            } else {
                cursor.grab_mode = CursorGrabMode::Locked;
                cursor.visible = false;
            }
        }
    }
}

/// Grab cursor for mouse-look on click
pub fn grab_cursor(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mouse_button: Res<ButtonInput<MouseButton>>,
) {
    let Ok(window_entity) = windows.single() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
            cursor.grab_mode = CursorGrabMode::Locked;
            cursor.visible = false;
        }
    }
}
