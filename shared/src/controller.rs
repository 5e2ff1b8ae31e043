//! The character controller: one tick wiring sensing, movement, facing,
//! pose, overlay actions, and equipment into a fixed order.

use bevy::prelude::*;

use crate::{
    apply_equipment_pose, apply_movement, compute_move_direction, is_grounded, update_pose,
    update_yaw, ActionKind, Booster, CharacterRig, GroundProbe, InputSnapshot, ItemType,
    OverlayController, PhysicsBody, TriggerOutcome, VerticalIntent, WalkPhase, FLOAT_PHASE_RATE,
    PLAYER_SPEED, SPRINT_MULTIPLIER, SPRINT_PHASE_RATE, WALK_PHASE_RATE,
};

/// Walk-phase advance for one tick. Moving characters stride at the walk or
/// sprint rate; stationary ones drift slowly (airborne bob; grounded idle
/// resets the phase anyway).
pub fn walk_phase_increment(is_moving: bool, is_sprinting: bool, dt: f32) -> f32 {
    let rate = if is_moving {
        if is_sprinting {
            SPRINT_PHASE_RATE
        } else {
            WALK_PHASE_RATE
        }
    } else {
        FLOAT_PHASE_RATE
    };
    rate * dt
}

/// Everything the pose pipeline needs to know about this tick, computed once
/// after movement has been applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionState {
    pub is_moving: bool,
    pub is_sprinting: bool,
    pub is_grounded: bool,
    pub booster_active: bool,
    /// Post-movement velocity, straight off the physics body.
    pub velocity: Vec3,
    pub yaw: f32,
    pub walk_phase_increment: f32,
}

/// Per-character controller state. The rig and physics body live elsewhere;
/// [`CharacterController::tick`] borrows them for one frame.
#[derive(Component, Default)]
pub struct CharacterController {
    yaw: f32,
    walk: WalkPhase,
    booster: Booster,
    overlay: OverlayController,
    equipped: ItemType,
}

impl CharacterController {
    /// Run one full controller tick.
    ///
    /// Order is fixed: ground sense, booster toggle, movement, facing, base
    /// pose, overlay actions, equipment override. Later layers win on the
    /// joints they touch.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        rig: &mut dyn CharacterRig,
        body: &mut dyn PhysicsBody,
        probe: &dyn GroundProbe,
        input: &InputSnapshot,
        camera_forward: Vec3,
        camera_right: Vec3,
        bounds_min_y: Option<f32>,
        dt: f32,
    ) -> LocomotionState {
        let grounded = is_grounded(probe, body.translation(), bounds_min_y);

        if input.booster_toggle {
            self.booster.toggle(grounded, body.translation().y);
        }

        let move_dir = compute_move_direction(input, camera_forward, camera_right);
        let is_moving = move_dir.length_squared() > 0.0;

        let vertical = if self.booster.is_active() {
            if input.jump {
                VerticalIntent::BoosterAscend
            } else {
                VerticalIntent::BoosterHold
            }
        } else if input.jump {
            VerticalIntent::Jump
        } else {
            VerticalIntent::None
        };

        let speed = if input.sprint {
            PLAYER_SPEED * SPRINT_MULTIPLIER
        } else {
            PLAYER_SPEED
        };
        apply_movement(body, probe, move_dir, speed, grounded, vertical, &self.booster);

        self.yaw = update_yaw(self.yaw, move_dir);

        let state = LocomotionState {
            is_moving,
            is_sprinting: input.sprint,
            is_grounded: grounded,
            booster_active: self.booster.is_active(),
            velocity: body.linear_velocity(),
            yaw: self.yaw,
            walk_phase_increment: walk_phase_increment(is_moving, input.sprint, dt),
        };

        update_pose(rig, &state, &mut self.walk);
        self.overlay.update(rig, dt);
        apply_equipment_pose(rig, self.equipped, &self.overlay, is_moving, self.walk.swing());

        state
    }

    /// Try to start an overlay action at timestamp `now`.
    pub fn trigger_action(&mut self, kind: ActionKind, now: f32) -> TriggerOutcome {
        self.overlay.trigger(kind, now)
    }

    /// Stop the active overlay action, if any.
    pub fn cancel_action(&mut self) {
        self.overlay.cancel();
    }

    /// Whether an overlay action currently owns arm joints.
    pub fn is_arm_animating(&self) -> bool {
        self.overlay.is_active()
    }

    pub fn active_action(&self) -> Option<ActionKind> {
        self.overlay.active_kind()
    }

    /// Swap the held item. Takes effect on the next tick; a playing overlay
    /// action keeps its joints until it finishes.
    pub fn equip(&mut self, item: ItemType) {
        self.equipped = item;
    }

    pub fn equipped(&self) -> ItemType {
        self.equipped
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn booster_active(&self) -> bool {
        self.booster.is_active()
    }
}
