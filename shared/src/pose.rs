//! Pose blending: the locomotion/airborne/booster animation state machine.
//!
//! One call per tick computes every limb rotation and the model-root pose
//! from the [`LocomotionState`] snapshot. Branch precedence is fixed:
//! booster first, then airborne, then grounded; overlay actions and
//! equipment overrides are layered on *after* this runs.

use bevy::prelude::*;

use crate::{write_joint, CharacterRig, Joint, LocomotionState};

// =============================================================================
// TUNING
// =============================================================================

/// Limb swing amplitude (radians) for the normal walk cycle.
pub const WALK_SWING_AMPLITUDE: f32 = 0.8;

/// Limb swing amplitude while sprinting.
pub const SPRINT_SWING_AMPLITUDE: f32 = 1.2;

/// Walk-phase advance rate (radians of phase per second) while moving.
pub const WALK_PHASE_RATE: f32 = 9.0;

/// Phase advance rate while sprinting (faster stride).
pub const SPRINT_PHASE_RATE: f32 = 13.0;

/// Slow phase drift while idling in the air (hover bob, zero-g float).
pub const FLOAT_PHASE_RATE: f32 = 2.0;

/// Vertical-velocity band (m/s) treated as the jump apex.
pub const VERTICAL_EPSILON: f32 = 0.5;

// Booster / float shapes. Left side mirrors the right on Y/Z.
const HOVER_SHOULDER_BASE: Vec3 = Vec3::new(-0.35, 0.0, -0.45);
const HOVER_OSCILLATION: f32 = 0.05;
const HOVER_BOB: f32 = 0.08;
const HOVER_HIP_OSCILLATION: f32 = 0.03;

const FLIGHT_SHOULDER: Vec3 = Vec3::new(0.7, 0.0, -0.25);
const FLIGHT_HIP: f32 = 0.12;
const FLIGHT_LEAN: f32 = 1.25;

// Airborne sprint: near-horizontal "superhero" pose, arms swept back.
const SPRINT_FLIGHT_SHOULDER: Vec3 = Vec3::new(2.9, 0.0, -0.1);
const SPRINT_FLIGHT_HIP: f32 = 0.25;
const SPRINT_FLIGHT_LEAN: f32 = 1.35;

// Jump poses: (shoulder pitch, lead-hip pitch) per vertical phase.
pub const JUMP_RISE_SHOULDER: f32 = -1.9;
pub const JUMP_RISE_HIP: f32 = 0.45;
pub const JUMP_APEX_SHOULDER: f32 = -1.1;
pub const JUMP_APEX_HIP: f32 = 0.2;
pub const JUMP_FALL_SHOULDER: f32 = -0.35;
pub const JUMP_FALL_HIP: f32 = -0.25;
const JUMP_SHOULDER_SPLAY: f32 = 0.3;
const JUMP_TRAIL_HIP_FACTOR: f32 = -0.5;
const JUMP_LEAN: f32 = 0.22;

// =============================================================================
// WALK PHASE
// =============================================================================

/// Accumulating phase scalar whose sine drives limb oscillation.
///
/// Advance policy is asymmetric on purpose: the phase resets to zero on a
/// grounded (non-booster) idle tick, but keeps drifting slowly while idling
/// airborne so hover/float bobbing never snaps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WalkPhase {
    pub time: f32,
}

impl WalkPhase {
    pub fn advance(&mut self, increment: f32) {
        self.time += increment;
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }

    /// Current oscillation value in [-1, 1].
    pub fn swing(&self) -> f32 {
        self.time.sin()
    }
}

// =============================================================================
// VERTICAL CLASSIFICATION
// =============================================================================

/// Three-way classification of airborne vertical motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpPhase {
    Rising,
    Apex,
    Falling,
}

impl JumpPhase {
    pub fn classify(vertical_velocity: f32) -> Self {
        if vertical_velocity > VERTICAL_EPSILON {
            JumpPhase::Rising
        } else if vertical_velocity < -VERTICAL_EPSILON {
            JumpPhase::Falling
        } else {
            JumpPhase::Apex
        }
    }
}

// =============================================================================
// BLENDER
// =============================================================================

/// Compute and write the base pose for this tick.
///
/// Must run after ground sensing / velocity / orientation and before the
/// overlay and equipment layers.
pub fn update_pose(rig: &mut dyn CharacterRig, state: &LocomotionState, walk: &mut WalkPhase) {
    // Asymmetric phase policy: reset only on grounded non-booster idle.
    if state.is_grounded && !state.booster_active && !state.is_moving {
        walk.reset();
    } else {
        walk.advance(state.walk_phase_increment);
    }

    let swing = walk.swing();
    let facing = Quat::from_rotation_y(state.yaw);

    if state.booster_active {
        if state.is_moving {
            apply_flight_pose(rig, facing);
        } else {
            apply_hover_pose(rig, swing, facing);
        }
        return;
    }

    if !state.is_grounded {
        match (state.is_moving, state.is_sprinting) {
            (true, true) => apply_sprint_flight_pose(rig, facing),
            (true, false) => {
                apply_jump_pose(rig, JumpPhase::classify(state.velocity.y), JUMP_LEAN, facing)
            }
            // Sprint held while drifting in place: zero-gravity float,
            // same shape as the booster hover.
            (false, true) => apply_hover_pose(rig, swing, facing),
            (false, false) => {
                apply_jump_pose(rig, JumpPhase::classify(state.velocity.y), 0.0, facing)
            }
        }
        return;
    }

    // Grounded: pin the model root back to rest height, face the yaw.
    {
        let root = rig.root_mut();
        root.offset = Vec3::ZERO;
        root.orientation = facing;
    }

    if state.is_moving {
        let amplitude = if state.is_sprinting {
            SPRINT_SWING_AMPLITUDE
        } else {
            WALK_SWING_AMPLITUDE
        };
        // Contralateral gait: left/right in opposite phase, arms opposite
        // their same-side legs.
        let s = swing * amplitude;
        write_joint(rig, Joint::ShoulderLeft, Vec3::new(s, 0.0, 0.0));
        write_joint(rig, Joint::ShoulderRight, Vec3::new(-s, 0.0, 0.0));
        write_joint(rig, Joint::HipLeft, Vec3::new(-s, 0.0, 0.0));
        write_joint(rig, Joint::HipRight, Vec3::new(s, 0.0, 0.0));
    } else {
        for joint in [
            Joint::ShoulderLeft,
            Joint::ShoulderRight,
            Joint::HipLeft,
            Joint::HipRight,
        ] {
            write_joint(rig, joint, Vec3::ZERO);
        }
    }
}

/// Mirror a right-side joint rotation onto the left side.
fn mirrored(rotation: Vec3) -> Vec3 {
    Vec3::new(rotation.x, -rotation.y, -rotation.z)
}

/// Booster travel: arms swept back along the body, strong forward lean.
fn apply_flight_pose(rig: &mut dyn CharacterRig, facing: Quat) {
    write_joint(rig, Joint::ShoulderLeft, mirrored(FLIGHT_SHOULDER));
    write_joint(rig, Joint::ShoulderRight, FLIGHT_SHOULDER);
    write_joint(rig, Joint::HipLeft, Vec3::new(FLIGHT_HIP, 0.0, 0.0));
    write_joint(rig, Joint::HipRight, Vec3::new(FLIGHT_HIP, 0.0, 0.0));

    let root = rig.root_mut();
    root.offset = Vec3::ZERO;
    root.orientation = facing * Quat::from_rotation_x(FLIGHT_LEAN);
}

/// Booster hover / zero-g float: splayed arms with a slow oscillation and a
/// vertical bob on the model root.
fn apply_hover_pose(rig: &mut dyn CharacterRig, swing: f32, facing: Quat) {
    let oscillation = swing * HOVER_OSCILLATION;
    write_joint(
        rig,
        Joint::ShoulderLeft,
        mirrored(HOVER_SHOULDER_BASE) + Vec3::new(oscillation, 0.0, 0.0),
    );
    write_joint(
        rig,
        Joint::ShoulderRight,
        HOVER_SHOULDER_BASE + Vec3::new(-oscillation, 0.0, 0.0),
    );
    let hip = swing * HOVER_HIP_OSCILLATION;
    write_joint(rig, Joint::HipLeft, Vec3::new(-hip, 0.0, 0.0));
    write_joint(rig, Joint::HipRight, Vec3::new(hip, 0.0, 0.0));

    let root = rig.root_mut();
    root.offset = Vec3::new(0.0, swing * HOVER_BOB, 0.0);
    root.orientation = facing;
}

/// Airborne sprint: near-horizontal body, arms swept past the head.
fn apply_sprint_flight_pose(rig: &mut dyn CharacterRig, facing: Quat) {
    write_joint(rig, Joint::ShoulderLeft, mirrored(SPRINT_FLIGHT_SHOULDER));
    write_joint(rig, Joint::ShoulderRight, SPRINT_FLIGHT_SHOULDER);
    write_joint(rig, Joint::HipLeft, Vec3::new(SPRINT_FLIGHT_HIP, 0.0, 0.0));
    write_joint(rig, Joint::HipRight, Vec3::new(SPRINT_FLIGHT_HIP, 0.0, 0.0));

    let root = rig.root_mut();
    root.offset = Vec3::ZERO;
    root.orientation = facing * Quat::from_rotation_x(SPRINT_FLIGHT_LEAN);
}

/// Jump pose, sub-cased on the vertical phase. `lean` is the horizontal
/// travel lean (zero for a stationary jump).
fn apply_jump_pose(rig: &mut dyn CharacterRig, phase: JumpPhase, lean: f32, facing: Quat) {
    let (shoulder, hip) = match phase {
        JumpPhase::Rising => (JUMP_RISE_SHOULDER, JUMP_RISE_HIP),
        JumpPhase::Apex => (JUMP_APEX_SHOULDER, JUMP_APEX_HIP),
        JumpPhase::Falling => (JUMP_FALL_SHOULDER, JUMP_FALL_HIP),
    };
    write_joint(
        rig,
        Joint::ShoulderLeft,
        Vec3::new(shoulder, 0.0, JUMP_SHOULDER_SPLAY),
    );
    write_joint(
        rig,
        Joint::ShoulderRight,
        Vec3::new(shoulder, 0.0, -JUMP_SHOULDER_SPLAY),
    );
    write_joint(rig, Joint::HipLeft, Vec3::new(hip, 0.0, 0.0));
    write_joint(
        rig,
        Joint::HipRight,
        Vec3::new(hip * JUMP_TRAIL_HIP_FACTOR, 0.0, 0.0),
    );

    let root = rig.root_mut();
    root.offset = Vec3::ZERO;
    root.orientation = facing * Quat::from_rotation_x(lean);
}
