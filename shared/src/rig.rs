//! Character rig abstraction: addressable joints on a skeleton.
//!
//! Concrete character variants (BoxMan, VoxelKnight) implement
//! [`CharacterRig`]; the pose pipeline only ever mutates joints through it
//! and silently skips joints a variant doesn't have, so one pipeline drives
//! every rig.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Addressable limb joints. Rotations are Euler angles in radians,
/// applied XYZ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    ShoulderLeft,
    ShoulderRight,
    HipLeft,
    HipRight,
}

/// One Euler axis of a joint rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn set(&self, rotation: &mut Vec3, value: f32) {
        match self {
            Axis::X => rotation.x = value,
            Axis::Y => rotation.y = value,
            Axis::Z => rotation.z = value,
        }
    }

    pub fn get(&self, rotation: Vec3) -> f32 {
        match self {
            Axis::X => rotation.x,
            Axis::Y => rotation.y,
            Axis::Z => rotation.z,
        }
    }
}

/// The model root: position offset below the physics capsule plus the
/// facing/lean orientation. The capsule itself never rotates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RootPose {
    pub offset: Vec3,
    pub orientation: Quat,
}

/// Root-relative attachment point for held-weapon models and muzzle effects.
/// Read-only: consumers parent to it, they never reach back into the rig.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponMount {
    /// Joint the mount hangs off (the weapon follows its rotation).
    pub joint: Joint,
    /// Offset from that joint's pivot, in joint-local space.
    pub offset: Vec3,
}

/// A character skeleton the pose pipeline can write to.
///
/// `joint_mut` returns `None` for joints the variant doesn't have; writers
/// must treat that as a skip, never an error.
pub trait CharacterRig: Send + Sync {
    fn joint(&self, joint: Joint) -> Option<Vec3>;
    fn joint_mut(&mut self, joint: Joint) -> Option<&mut Vec3>;
    fn root(&self) -> &RootPose;
    fn root_mut(&mut self) -> &mut RootPose;
    fn weapon_mount(&self) -> WeaponMount;
}

/// Write a joint rotation, silently skipping joints the rig doesn't have.
pub fn write_joint(rig: &mut dyn CharacterRig, joint: Joint, rotation: Vec3) {
    if let Some(target) = rig.joint_mut(joint) {
        *target = rotation;
    }
}

/// Which character model the player is using.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterVariant {
    #[default]
    BoxMan,
    VoxelKnight,
}

impl CharacterVariant {
    pub fn build_rig(&self) -> Box<dyn CharacterRig> {
        match self {
            CharacterVariant::BoxMan => Box::new(BoxManRig::default()),
            CharacterVariant::VoxelKnight => Box::new(VoxelKnightRig::default()),
        }
    }
}

/// The default blocky character: two shoulders, two hips, full gait.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxManRig {
    pub shoulder_left: Vec3,
    pub shoulder_right: Vec3,
    pub hip_left: Vec3,
    pub hip_right: Vec3,
    pub root: RootPose,
}

impl CharacterRig for BoxManRig {
    fn joint(&self, joint: Joint) -> Option<Vec3> {
        match joint {
            Joint::ShoulderLeft => Some(self.shoulder_left),
            Joint::ShoulderRight => Some(self.shoulder_right),
            Joint::HipLeft => Some(self.hip_left),
            Joint::HipRight => Some(self.hip_right),
        }
    }

    fn joint_mut(&mut self, joint: Joint) -> Option<&mut Vec3> {
        match joint {
            Joint::ShoulderLeft => Some(&mut self.shoulder_left),
            Joint::ShoulderRight => Some(&mut self.shoulder_right),
            Joint::HipLeft => Some(&mut self.hip_left),
            Joint::HipRight => Some(&mut self.hip_right),
        }
    }

    fn root(&self) -> &RootPose {
        &self.root
    }

    fn root_mut(&mut self) -> &mut RootPose {
        &mut self.root
    }

    fn weapon_mount(&self) -> WeaponMount {
        WeaponMount {
            joint: Joint::ShoulderRight,
            offset: Vec3::new(0.0, -0.55, -0.15),
        }
    }
}

/// Armored variant: the leg armor is one rigid skirt, so there are no
/// articulated hip joints. Hip writes are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct VoxelKnightRig {
    pub shoulder_left: Vec3,
    pub shoulder_right: Vec3,
    pub root: RootPose,
}

impl CharacterRig for VoxelKnightRig {
    fn joint(&self, joint: Joint) -> Option<Vec3> {
        match joint {
            Joint::ShoulderLeft => Some(self.shoulder_left),
            Joint::ShoulderRight => Some(self.shoulder_right),
            Joint::HipLeft | Joint::HipRight => None,
        }
    }

    fn joint_mut(&mut self, joint: Joint) -> Option<&mut Vec3> {
        match joint {
            Joint::ShoulderLeft => Some(&mut self.shoulder_left),
            Joint::ShoulderRight => Some(&mut self.shoulder_right),
            Joint::HipLeft | Joint::HipRight => None,
        }
    }

    fn root(&self) -> &RootPose {
        &self.root
    }

    fn root_mut(&mut self) -> &mut RootPose {
        &mut self.root
    }

    fn weapon_mount(&self) -> WeaponMount {
        WeaponMount {
            joint: Joint::ShoulderRight,
            offset: Vec3::new(0.0, -0.6, -0.18),
        }
    }
}
