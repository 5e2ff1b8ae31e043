//! Overlay actions: short keyframed arm animations layered over the base
//! pose.
//!
//! While an action is active it owns its joints outright; the base pose and
//! equipment layers must skip them. One action at a time, per-action
//! cooldowns timed against the caller's clock.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Axis, CharacterRig, Joint};

// =============================================================================
// CATALOG
// =============================================================================

/// The actions a character can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Overhead melee slash with the weapon arm.
    MeleeSlash,
    /// Two-arm skyward cast.
    ThunderCast,
    /// One-arm forward thrust cast.
    InfernoCast,
}

/// One animated axis of one joint: keyframes as (progress in [0, 1], value
/// in radians) pairs, linearly interpolated. First key must sit at 0.0 and
/// last at 1.0.
pub struct Channel {
    pub joint: Joint,
    pub axis: Axis,
    pub keys: &'static [(f32, f32)],
}

/// Static description of one action.
pub struct ActionSpec {
    /// Joints the action owns while active. Lower layers skip these.
    pub owned_joints: &'static [Joint],
    pub channels: &'static [Channel],
    /// Playback length in seconds.
    pub duration: f32,
    /// Minimum seconds between two triggers of this action.
    pub cooldown: f32,
}

const MELEE_SLASH: ActionSpec = ActionSpec {
    owned_joints: &[Joint::ShoulderRight],
    channels: &[
        // Wind up over the head, then whip down past the hip.
        Channel {
            joint: Joint::ShoulderRight,
            axis: Axis::X,
            keys: &[(0.0, 0.0), (0.3, -2.4), (0.65, 0.9), (1.0, 0.0)],
        },
        Channel {
            joint: Joint::ShoulderRight,
            axis: Axis::Z,
            keys: &[(0.0, 0.0), (0.3, -0.35), (0.65, 0.2), (1.0, 0.0)],
        },
    ],
    duration: 0.4,
    cooldown: 0.55,
};

const THUNDER_CAST: ActionSpec = ActionSpec {
    owned_joints: &[Joint::ShoulderLeft, Joint::ShoulderRight],
    channels: &[
        Channel {
            joint: Joint::ShoulderLeft,
            axis: Axis::X,
            keys: &[(0.0, 0.0), (0.25, -2.9), (0.8, -2.9), (1.0, 0.0)],
        },
        Channel {
            joint: Joint::ShoulderRight,
            axis: Axis::X,
            keys: &[(0.0, 0.0), (0.25, -2.9), (0.8, -2.9), (1.0, 0.0)],
        },
        Channel {
            joint: Joint::ShoulderLeft,
            axis: Axis::Z,
            keys: &[(0.0, 0.0), (0.25, 0.4), (0.8, 0.4), (1.0, 0.0)],
        },
        Channel {
            joint: Joint::ShoulderRight,
            axis: Axis::Z,
            keys: &[(0.0, 0.0), (0.25, -0.4), (0.8, -0.4), (1.0, 0.0)],
        },
    ],
    duration: 0.9,
    cooldown: 2.5,
};

const INFERNO_CAST: ActionSpec = ActionSpec {
    owned_joints: &[Joint::ShoulderRight],
    channels: &[Channel {
        joint: Joint::ShoulderRight,
        axis: Axis::X,
        keys: &[(0.0, 0.0), (0.2, -1.55), (0.75, -1.55), (1.0, 0.0)],
    }],
    duration: 0.6,
    cooldown: 1.5,
};

impl ActionKind {
    pub fn spec(&self) -> &'static ActionSpec {
        match self {
            ActionKind::MeleeSlash => &MELEE_SLASH,
            ActionKind::ThunderCast => &THUNDER_CAST,
            ActionKind::InfernoCast => &INFERNO_CAST,
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Result of a trigger attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerOutcome {
    Started,
    /// Another action (or this one) is still playing.
    AlreadyActive,
    /// This action's cooldown has not elapsed.
    Cooldown { remaining: f32 },
}

struct ActiveAction {
    kind: ActionKind,
    elapsed: f32,
}

/// Single-slot action player with per-action cooldowns.
#[derive(Default)]
pub struct OverlayController {
    active: Option<ActiveAction>,
    last_trigger: HashMap<ActionKind, f32>,
}

impl OverlayController {
    /// Try to start `kind` at timestamp `now` (seconds, caller's clock).
    pub fn trigger(&mut self, kind: ActionKind, now: f32) -> TriggerOutcome {
        if self.active.is_some() {
            return TriggerOutcome::AlreadyActive;
        }
        if let Some(&last) = self.last_trigger.get(&kind) {
            let since = now - last;
            if since < kind.spec().cooldown {
                return TriggerOutcome::Cooldown {
                    remaining: kind.spec().cooldown - since,
                };
            }
        }
        self.last_trigger.insert(kind, now);
        self.active = Some(ActiveAction { kind, elapsed: 0.0 });
        TriggerOutcome::Started
    }

    /// Advance the active action and write its joints. Returns the action
    /// that finished this tick, if any. On the final tick the last keyframe
    /// is written before the joints are released.
    pub fn update(&mut self, rig: &mut dyn CharacterRig, dt: f32) -> Option<ActionKind> {
        let active = self.active.as_mut()?;
        active.elapsed += dt;
        let spec = active.kind.spec();
        let progress = (active.elapsed / spec.duration).min(1.0);

        for joint in spec.owned_joints {
            crate::write_joint(rig, *joint, Vec3::ZERO);
        }
        for channel in spec.channels {
            if let Some(rotation) = rig.joint_mut(channel.joint) {
                channel.axis.set(rotation, sample(channel.keys, progress));
            }
        }

        if active.elapsed >= spec.duration {
            let finished = active.kind;
            self.active = None;
            return Some(finished);
        }
        None
    }

    /// Stop the active action immediately, releasing its joints without
    /// writing the final keyframe. The cooldown stamp stays.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Whether the active action owns `joint` this tick.
    pub fn owns(&self, joint: Joint) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.kind.spec().owned_joints.contains(&joint))
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<ActionKind> {
        self.active.as_ref().map(|a| a.kind)
    }
}

/// Linear interpolation over sorted keyframes.
fn sample(keys: &[(f32, f32)], progress: f32) -> f32 {
    let Some(&(first_t, first_v)) = keys.first() else {
        return 0.0;
    };
    if progress <= first_t {
        return first_v;
    }
    for pair in keys.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if progress <= t1 {
            let span = t1 - t0;
            if span <= f32::EPSILON {
                return v1;
            }
            return v0 + (v1 - v0) * ((progress - t0) / span);
        }
    }
    keys.last().map(|&(_, v)| v).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoxManRig;

    #[test]
    fn test_trigger_starts_and_blocks_while_active() {
        let mut overlay = OverlayController::default();
        assert_eq!(overlay.trigger(ActionKind::MeleeSlash, 0.0), TriggerOutcome::Started);
        assert!(overlay.is_active());
        assert_eq!(
            overlay.trigger(ActionKind::MeleeSlash, 0.1),
            TriggerOutcome::AlreadyActive
        );
        // A different action is also blocked: one slot.
        assert_eq!(
            overlay.trigger(ActionKind::ThunderCast, 0.1),
            TriggerOutcome::AlreadyActive
        );
    }

    #[test]
    fn test_cooldown_blocks_retrigger_after_completion() {
        let mut overlay = OverlayController::default();
        let mut rig = BoxManRig::default();
        overlay.trigger(ActionKind::MeleeSlash, 0.0);
        // Run past the duration in one step.
        assert_eq!(overlay.update(&mut rig, 1.0), Some(ActionKind::MeleeSlash));
        assert!(!overlay.is_active());

        match overlay.trigger(ActionKind::MeleeSlash, 0.3) {
            TriggerOutcome::Cooldown { remaining } => {
                assert!((remaining - (MELEE_SLASH.cooldown - 0.3)).abs() < 1e-5);
            }
            other => panic!("expected cooldown, got {other:?}"),
        }
        assert_eq!(
            overlay.trigger(ActionKind::MeleeSlash, MELEE_SLASH.cooldown + 0.01),
            TriggerOutcome::Started
        );
    }

    #[test]
    fn test_cooldowns_are_per_action() {
        let mut overlay = OverlayController::default();
        let mut rig = BoxManRig::default();
        overlay.trigger(ActionKind::MeleeSlash, 0.0);
        overlay.update(&mut rig, 1.0);
        // Melee is cooling down but the cast is fresh.
        assert_eq!(overlay.trigger(ActionKind::InfernoCast, 0.1), TriggerOutcome::Started);
    }

    #[test]
    fn test_update_writes_interpolated_keyframes() {
        let mut overlay = OverlayController::default();
        let mut rig = BoxManRig::default();
        overlay.trigger(ActionKind::InfernoCast, 0.0);

        // 0.12s of a 0.6s action: progress 0.2, exactly the second key.
        overlay.update(&mut rig, 0.12);
        assert!((rig.shoulder_right.x - (-1.55)).abs() < 1e-4);

        // Mid-return: progress 0.875, halfway between -1.55 and 0.
        overlay.update(&mut rig, 0.405);
        assert!((rig.shoulder_right.x - (-0.775)).abs() < 1e-3);
    }

    #[test]
    fn test_completion_writes_final_keyframe_then_releases() {
        let mut overlay = OverlayController::default();
        let mut rig = BoxManRig::default();
        rig.shoulder_right = Vec3::splat(9.0);
        overlay.trigger(ActionKind::MeleeSlash, 0.0);
        let finished = overlay.update(&mut rig, MELEE_SLASH.duration + 0.01);
        assert_eq!(finished, Some(ActionKind::MeleeSlash));
        assert_eq!(rig.shoulder_right, Vec3::ZERO);
        assert!(!overlay.owns(Joint::ShoulderRight));
    }

    #[test]
    fn test_ownership_covers_exactly_the_owned_joints() {
        let mut overlay = OverlayController::default();
        overlay.trigger(ActionKind::ThunderCast, 0.0);
        assert!(overlay.owns(Joint::ShoulderLeft));
        assert!(overlay.owns(Joint::ShoulderRight));
        assert!(!overlay.owns(Joint::HipLeft));
    }

    #[test]
    fn test_cancel_releases_without_finishing() {
        let mut overlay = OverlayController::default();
        let mut rig = BoxManRig::default();
        overlay.trigger(ActionKind::MeleeSlash, 0.0);
        overlay.update(&mut rig, 0.1);
        let mid = rig.shoulder_right;
        assert!(mid.x != 0.0);

        overlay.cancel();
        assert!(!overlay.is_active());
        assert!(!overlay.owns(Joint::ShoulderRight));
        // Joints keep their last written value; lower layers take over
        // next tick.
        assert_eq!(rig.shoulder_right, mid);
        // The cooldown stamp from the trigger remains.
        assert!(matches!(
            overlay.trigger(ActionKind::MeleeSlash, 0.2),
            TriggerOutcome::Cooldown { .. }
        ));
    }

    #[test]
    fn test_keyframe_tracks_are_well_formed() {
        for kind in [
            ActionKind::MeleeSlash,
            ActionKind::ThunderCast,
            ActionKind::InfernoCast,
        ] {
            let spec = kind.spec();
            assert!(spec.duration > 0.0);
            assert!(spec.cooldown >= spec.duration);
            for channel in spec.channels {
                assert!(spec.owned_joints.contains(&channel.joint));
                assert_eq!(channel.keys.first().map(|k| k.0), Some(0.0));
                assert_eq!(channel.keys.last().map(|k| k.0), Some(1.0));
                for pair in channel.keys.windows(2) {
                    assert!(pair[0].0 < pair[1].0);
                }
            }
        }
    }
}
