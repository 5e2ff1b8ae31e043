//! Shared character simulation for Voxelstorm.
//!
//! Everything in here is engine-math only (no rendering, no physics crate):
//! the client implements the [`PhysicsBody`] and [`GroundProbe`] traits over
//! its physics backend and drives [`CharacterController::tick`] once per
//! frame.

pub mod controller;
pub mod equipment;
pub mod input;
pub mod intent;
pub mod orientation;
pub mod overlay;
pub mod player;
pub mod pose;
pub mod rig;
pub mod sensor;
pub mod velocity;

pub use controller::{walk_phase_increment, CharacterController, LocomotionState};
pub use equipment::{apply_equipment_pose, EquipmentPose, ItemType, WalkSwing};
pub use input::InputSnapshot;
pub use intent::compute_move_direction;
pub use orientation::update_yaw;
pub use overlay::{ActionKind, ActionSpec, Channel, OverlayController, TriggerOutcome};
pub use player::*;
pub use pose::{
    update_pose, JumpPhase, WalkPhase, FLOAT_PHASE_RATE, SPRINT_PHASE_RATE, SPRINT_SWING_AMPLITUDE,
    WALK_PHASE_RATE, WALK_SWING_AMPLITUDE,
};
pub use rig::{
    write_joint, Axis, BoxManRig, CharacterRig, CharacterVariant, Joint, RootPose, VoxelKnightRig,
    WeaponMount,
};
pub use sensor::{ground_probe_length, is_grounded, GroundProbe};
pub use velocity::{apply_movement, Booster, BoosterMode, PhysicsBody, VerticalIntent};
