//! Held-item pose overrides for the weapon arm.
//!
//! Equipment is the lowest-priority layer: it rewrites the weapon-arm joint
//! after the base pose, but yields entirely whenever an overlay action owns
//! that joint.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{write_joint, Axis, CharacterRig, OverlayController};

/// Ready-stance rotation for a carried melee blade: a slight outward cant.
const BLADE_CARRY_CANT: f32 = 0.15;

/// Walk-cycle amplitude for the blade arm. Matches the base gait's
/// right-arm phase so drawing a blade doesn't flip the swing.
const BLADE_SWING_AMPLITUDE: f32 = -0.8;

/// Walk-cycle amplitude for the raised blaster arm. The aim pitch stays
/// locked; the swing rides a free axis so the arm still moves with the gait.
const BLASTER_SWING_AMPLITUDE: f32 = 0.25;

/// Everything the player can hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    #[default]
    Unarmed,
    PlasmaBlaster,
    ThunderStormBlade,
    InfernoBlade,
    FrostBlade,
}

/// How a held item carries while walking: the overridden axis keeps
/// oscillating with this amplitude instead of the gait's.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkSwing {
    pub axis: Axis,
    pub amplitude: f32,
}

/// Weapon-arm override for one item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquipmentPose {
    /// Base rotation of the weapon-arm joint while the item is held.
    pub rotation: Vec3,
    /// Optional oscillation layered on top while moving.
    pub walk_swing: Option<WalkSwing>,
}

impl ItemType {
    /// The arm override for this item, or `None` when the arm should follow
    /// the base pose untouched.
    pub fn pose(&self) -> Option<EquipmentPose> {
        match self {
            ItemType::Unarmed => None,
            // Hip-fire aim: forearm level. The aim axis holds; the gait
            // swing carries over on Z so the arm doesn't go rigid mid-walk.
            ItemType::PlasmaBlaster => Some(EquipmentPose {
                rotation: Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0),
                walk_swing: Some(WalkSwing {
                    axis: Axis::Z,
                    amplitude: BLASTER_SWING_AMPLITUDE,
                }),
            }),
            ItemType::ThunderStormBlade | ItemType::InfernoBlade | ItemType::FrostBlade => {
                Some(EquipmentPose {
                    rotation: Vec3::new(0.0, 0.0, BLADE_CARRY_CANT),
                    walk_swing: Some(WalkSwing {
                        axis: Axis::X,
                        amplitude: BLADE_SWING_AMPLITUDE,
                    }),
                })
            }
        }
    }

    pub fn is_melee(&self) -> bool {
        matches!(
            self,
            ItemType::ThunderStormBlade | ItemType::InfernoBlade | ItemType::FrostBlade
        )
    }
}

/// Rewrite the weapon-arm joint for the held item.
///
/// Runs last in the pose pipeline. `walk_value` is the current gait
/// oscillation in [-1, 1]; it only matters while moving and for items with a
/// walk swing. The call is a no-op when unarmed or when an overlay action
/// owns the weapon arm.
pub fn apply_equipment_pose(
    rig: &mut dyn CharacterRig,
    equipped: ItemType,
    overlay: &OverlayController,
    is_moving: bool,
    walk_value: f32,
) {
    let Some(pose) = equipped.pose() else {
        return;
    };
    let joint = rig.weapon_mount().joint;
    if overlay.owns(joint) {
        return;
    }

    let mut rotation = pose.rotation;
    if is_moving {
        if let Some(swing) = pose.walk_swing {
            let base = swing.axis.get(rotation);
            swing.axis.set(&mut rotation, base + walk_value * swing.amplitude);
        }
    }
    write_joint(rig, joint, rotation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionKind, BoxManRig, Joint};
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_unarmed_leaves_the_arm_alone() {
        let mut rig = BoxManRig::default();
        rig.shoulder_right = Vec3::new(0.4, 0.0, 0.0);
        let overlay = OverlayController::default();
        apply_equipment_pose(&mut rig, ItemType::Unarmed, &overlay, true, 0.7);
        assert_eq!(rig.shoulder_right, Vec3::new(0.4, 0.0, 0.0));
    }

    #[test]
    fn test_blaster_holds_aim_axis_and_swings_free_axis_while_moving() {
        let mut rig = BoxManRig::default();
        rig.shoulder_right = Vec3::new(0.9, 0.0, 0.0);
        let overlay = OverlayController::default();

        // Standing still: pure aim pose.
        apply_equipment_pose(&mut rig, ItemType::PlasmaBlaster, &overlay, false, 0.7);
        assert_eq!(rig.shoulder_right, Vec3::new(-FRAC_PI_2, 0.0, 0.0));

        // Walking: the aim pitch holds while the gait rides the free axis.
        apply_equipment_pose(&mut rig, ItemType::PlasmaBlaster, &overlay, true, 0.7);
        assert_eq!(rig.shoulder_right.x, -FRAC_PI_2);
        assert!((rig.shoulder_right.z - 0.7 * BLASTER_SWING_AMPLITUDE).abs() < 1e-6);

        // Opposite phase swings the other way; the aim never drifts.
        apply_equipment_pose(&mut rig, ItemType::PlasmaBlaster, &overlay, true, -0.7);
        assert_eq!(rig.shoulder_right.x, -FRAC_PI_2);
        assert!((rig.shoulder_right.z + 0.7 * BLASTER_SWING_AMPLITUDE).abs() < 1e-6);
    }

    #[test]
    fn test_blade_is_still_at_idle_and_swings_while_moving() {
        let mut rig = BoxManRig::default();
        let overlay = OverlayController::default();

        apply_equipment_pose(&mut rig, ItemType::ThunderStormBlade, &overlay, false, 0.7);
        assert_eq!(rig.shoulder_right.x, 0.0);
        assert_eq!(rig.shoulder_right.z, BLADE_CARRY_CANT);

        apply_equipment_pose(&mut rig, ItemType::ThunderStormBlade, &overlay, true, 0.7);
        assert!((rig.shoulder_right.x - 0.7 * BLADE_SWING_AMPLITUDE).abs() < 1e-6);
        assert_eq!(rig.shoulder_right.z, BLADE_CARRY_CANT);
    }

    #[test]
    fn test_all_blades_share_the_carry_pose() {
        for blade in [
            ItemType::ThunderStormBlade,
            ItemType::InfernoBlade,
            ItemType::FrostBlade,
        ] {
            assert!(blade.is_melee());
            assert_eq!(blade.pose(), ItemType::ThunderStormBlade.pose());
        }
        assert!(!ItemType::PlasmaBlaster.is_melee());
    }

    #[test]
    fn test_overlay_ownership_suppresses_the_override() {
        let mut rig = BoxManRig::default();
        let mut overlay = OverlayController::default();
        overlay.trigger(ActionKind::MeleeSlash, 0.0);
        assert!(overlay.owns(Joint::ShoulderRight));

        rig.shoulder_right = Vec3::new(-1.2, 0.0, 0.0);
        apply_equipment_pose(&mut rig, ItemType::PlasmaBlaster, &overlay, false, 0.0);
        assert_eq!(rig.shoulder_right, Vec3::new(-1.2, 0.0, 0.0));
    }
}
