//! Velocity commands: horizontal movement, jumping, and booster control.
//!
//! The controller only ever *commands* velocity; gravity integration stays
//! with the physics engine, so the vertical component is preserved untouched
//! unless an explicit jump or booster rule fires.

use bevy::prelude::*;

use crate::{
    GroundProbe, BOOSTER_ASCEND_SPEED, BOOSTER_HOLD_GAIN, BOOSTER_HOVER_GAIN,
    BOOSTER_MAX_CORRECTION, HOVER_PROBE_LENGTH, HOVER_TARGET_DISTANCE, JUMP_VELOCITY,
};

/// Linear-velocity access on the physics body, implemented by the backend.
/// Rotation is expected to be locked on the body; facing is handled by the
/// orientation controller instead.
pub trait PhysicsBody {
    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn translation(&self) -> Vec3;
}

/// Vertical intent for the current tick, derived from input + booster state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalIntent {
    /// Leave the vertical axis to gravity.
    #[default]
    None,
    /// One-shot jump (only honored when grounded and the booster is off).
    Jump,
    /// Booster active, ascend held.
    BoosterAscend,
    /// Booster active, no ascend input: hold altitude / hover.
    BoosterHold,
}

/// Vertical-control sub-mode of an active booster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoosterMode {
    /// Toggled on while grounded: hover a fixed distance above terrain.
    GroundHover,
    /// Toggled on while airborne: hold the altitude captured at toggle time.
    AirHold { hold_y: f32 },
}

/// Booster activation state.
///
/// The sub-mode is latched once when the booster is toggled on and is never
/// re-evaluated while active: a character that lands during air-hold stays
/// in air-hold until the booster is toggled again. Known quirk, kept
/// deliberately.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Booster {
    mode: Option<BoosterMode>,
}

impl Booster {
    pub fn is_active(&self) -> bool {
        self.mode.is_some()
    }

    pub fn mode(&self) -> Option<BoosterMode> {
        self.mode
    }

    /// Flip activation. On activation the sub-mode is chosen from the
    /// grounded state and current altitude at this instant only.
    pub fn toggle(&mut self, grounded: bool, current_y: f32) {
        self.mode = match self.mode {
            Some(_) => None,
            None if grounded => Some(BoosterMode::GroundHover),
            None => Some(BoosterMode::AirHold { hold_y: current_y }),
        };
    }
}

/// Apply one tick of velocity commands to the physics body.
///
/// - Nonzero `move_dir`: horizontal components set to `move_dir * speed`,
///   vertical untouched.
/// - Zero `move_dir`: horizontal components zeroed, vertical untouched.
/// - Vertical rules per [`VerticalIntent`]; ascend never slows an already
///   faster climb, ground-hover never pushes down.
pub fn apply_movement(
    body: &mut dyn PhysicsBody,
    probe: &dyn GroundProbe,
    move_dir: Vec3,
    speed: f32,
    grounded: bool,
    vertical: VerticalIntent,
    booster: &Booster,
) {
    let mut velocity = body.linear_velocity();

    if move_dir.length_squared() > 0.0 {
        velocity.x = move_dir.x * speed;
        velocity.z = move_dir.z * speed;
    } else {
        velocity.x = 0.0;
        velocity.z = 0.0;
    }

    match vertical {
        VerticalIntent::None => {}
        VerticalIntent::Jump => {
            if grounded && !booster.is_active() {
                velocity.y = JUMP_VELOCITY;
            }
        }
        VerticalIntent::BoosterAscend => {
            if booster.is_active() && velocity.y < BOOSTER_ASCEND_SPEED {
                velocity.y = BOOSTER_ASCEND_SPEED;
            }
        }
        VerticalIntent::BoosterHold => match booster.mode() {
            Some(BoosterMode::AirHold { hold_y }) => {
                let error = hold_y - body.translation().y;
                velocity.y =
                    (error * BOOSTER_HOLD_GAIN).clamp(-BOOSTER_MAX_CORRECTION, BOOSTER_MAX_CORRECTION);
            }
            Some(BoosterMode::GroundHover) => {
                if let Some(distance) =
                    probe.distance_to_ground(body.translation(), HOVER_PROBE_LENGTH)
                {
                    if distance < HOVER_TARGET_DISTANCE {
                        let error = HOVER_TARGET_DISTANCE - distance;
                        let correction = (error * BOOSTER_HOVER_GAIN).min(BOOSTER_MAX_CORRECTION);
                        if correction > velocity.y {
                            velocity.y = correction;
                        }
                    }
                }
            }
            None => {}
        },
    }

    body.set_linear_velocity(velocity);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubBody {
        velocity: Vec3,
        position: Vec3,
    }

    impl StubBody {
        fn new(velocity: Vec3, position: Vec3) -> Self {
            Self { velocity, position }
        }
    }

    impl PhysicsBody for StubBody {
        fn linear_velocity(&self) -> Vec3 {
            self.velocity
        }
        fn set_linear_velocity(&mut self, velocity: Vec3) {
            self.velocity = velocity;
        }
        fn translation(&self) -> Vec3 {
            self.position
        }
    }

    struct StubProbe(Option<f32>);

    impl GroundProbe for StubProbe {
        fn distance_to_ground(&self, _origin: Vec3, max_distance: f32) -> Option<f32> {
            self.0.filter(|d| *d <= max_distance)
        }
    }

    const NO_GROUND: StubProbe = StubProbe(None);

    #[test]
    fn test_horizontal_input_preserves_vertical_exactly() {
        let vy = -3.217_f32;
        let mut body = StubBody::new(Vec3::new(0.0, vy, 0.0), Vec3::ZERO);
        apply_movement(
            &mut body,
            &NO_GROUND,
            Vec3::NEG_Z,
            8.0,
            false,
            VerticalIntent::None,
            &Booster::default(),
        );
        assert_eq!(body.velocity.y.to_bits(), vy.to_bits());
        assert_eq!(body.velocity.z, -8.0);
    }

    #[test]
    fn test_no_input_zeroes_horizontal_keeps_vertical() {
        let mut body = StubBody::new(Vec3::new(4.0, 2.5, -1.0), Vec3::ZERO);
        apply_movement(
            &mut body,
            &NO_GROUND,
            Vec3::ZERO,
            8.0,
            true,
            VerticalIntent::None,
            &Booster::default(),
        );
        assert_eq!(body.velocity, Vec3::new(0.0, 2.5, 0.0));
    }

    #[test]
    fn test_jump_only_when_grounded_and_booster_off() {
        let mut body = StubBody::new(Vec3::ZERO, Vec3::ZERO);
        apply_movement(
            &mut body,
            &NO_GROUND,
            Vec3::ZERO,
            8.0,
            true,
            VerticalIntent::Jump,
            &Booster::default(),
        );
        assert_eq!(body.velocity.y, JUMP_VELOCITY);

        // Airborne: no jump.
        let mut body = StubBody::new(Vec3::ZERO, Vec3::ZERO);
        apply_movement(
            &mut body,
            &NO_GROUND,
            Vec3::ZERO,
            8.0,
            false,
            VerticalIntent::Jump,
            &Booster::default(),
        );
        assert_eq!(body.velocity.y, 0.0);

        // Booster active: jump is swallowed.
        let mut booster = Booster::default();
        booster.toggle(true, 0.0);
        let mut body = StubBody::new(Vec3::ZERO, Vec3::ZERO);
        apply_movement(
            &mut body,
            &NO_GROUND,
            Vec3::ZERO,
            8.0,
            true,
            VerticalIntent::Jump,
            &booster,
        );
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_ascend_never_slows_a_faster_climb() {
        let mut booster = Booster::default();
        booster.toggle(false, 10.0);

        let mut body = StubBody::new(Vec3::new(0.0, 9.0, 0.0), Vec3::Y * 10.0);
        apply_movement(
            &mut body,
            &NO_GROUND,
            Vec3::ZERO,
            8.0,
            false,
            VerticalIntent::BoosterAscend,
            &booster,
        );
        assert_eq!(body.velocity.y, 9.0);

        let mut body = StubBody::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y * 10.0);
        apply_movement(
            &mut body,
            &NO_GROUND,
            Vec3::ZERO,
            8.0,
            false,
            VerticalIntent::BoosterAscend,
            &booster,
        );
        assert_eq!(body.velocity.y, BOOSTER_ASCEND_SPEED);
    }

    #[test]
    fn test_air_hold_is_clamped_proportional_control() {
        let mut booster = Booster::default();
        booster.toggle(false, 20.0);

        // Way below hold altitude: correction saturates upward.
        let mut body = StubBody::new(Vec3::ZERO, Vec3::Y * 5.0);
        apply_movement(
            &mut body,
            &NO_GROUND,
            Vec3::ZERO,
            8.0,
            false,
            VerticalIntent::BoosterHold,
            &booster,
        );
        assert_eq!(body.velocity.y, BOOSTER_MAX_CORRECTION);

        // Slightly above: gentle proportional descent.
        let mut body = StubBody::new(Vec3::ZERO, Vec3::Y * 20.5);
        apply_movement(
            &mut body,
            &NO_GROUND,
            Vec3::ZERO,
            8.0,
            false,
            VerticalIntent::BoosterHold,
            &booster,
        );
        assert!((body.velocity.y - (-0.5 * BOOSTER_HOLD_GAIN)).abs() < 1e-5);
    }

    #[test]
    fn test_ground_hover_never_pushes_down() {
        let mut booster = Booster::default();
        booster.toggle(true, 0.0);

        // Too close to terrain, but already climbing faster than the
        // correction: velocity untouched.
        let mut body = StubBody::new(Vec3::new(0.0, 4.0, 0.0), Vec3::Y);
        apply_movement(
            &mut body,
            &StubProbe(Some(0.5)),
            Vec3::ZERO,
            8.0,
            false,
            VerticalIntent::BoosterHold,
            &booster,
        );
        assert_eq!(body.velocity.y, 4.0);

        // Falling close to terrain: correction takes over.
        let mut body = StubBody::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y);
        apply_movement(
            &mut body,
            &StubProbe(Some(0.6)),
            Vec3::ZERO,
            8.0,
            false,
            VerticalIntent::BoosterHold,
            &booster,
        );
        let expected = (HOVER_TARGET_DISTANCE - 0.6) * BOOSTER_HOVER_GAIN;
        assert!((body.velocity.y - expected).abs() < 1e-5);

        // No terrain within probe range: nothing to hover against.
        let mut body = StubBody::new(Vec3::new(0.0, -2.0, 0.0), Vec3::Y * 50.0);
        apply_movement(
            &mut body,
            &NO_GROUND,
            Vec3::ZERO,
            8.0,
            false,
            VerticalIntent::BoosterHold,
            &booster,
        );
        assert_eq!(body.velocity.y, -2.0);
    }

    #[test]
    fn test_booster_mode_is_latched_at_toggle_time() {
        // Known quirk: the sub-mode is decided once per activation and never
        // re-evaluated, even if the character lands mid-air-hold.
        let mut booster = Booster::default();
        booster.toggle(false, 12.0);
        assert_eq!(booster.mode(), Some(BoosterMode::AirHold { hold_y: 12.0 }));

        // "Landing" afterwards changes nothing until the next toggle.
        let mut body = StubBody::new(Vec3::ZERO, Vec3::Y * 12.0);
        apply_movement(
            &mut body,
            &StubProbe(Some(0.2)),
            Vec3::ZERO,
            8.0,
            true,
            VerticalIntent::BoosterHold,
            &booster,
        );
        assert_eq!(booster.mode(), Some(BoosterMode::AirHold { hold_y: 12.0 }));

        booster.toggle(true, 0.0);
        assert_eq!(booster.mode(), None);
        booster.toggle(true, 0.0);
        assert_eq!(booster.mode(), Some(BoosterMode::GroundHover));
    }
}
