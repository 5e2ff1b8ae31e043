//! Player body: physics spawn and the per-frame controller drive.
//!
//! The capsule is a dynamic rigid body with rotation locked; facing and all
//! animation happen on the visual rig, never on the physics body.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use shared::{
    CharacterController, CharacterRig, CharacterVariant, GroundProbe, PhysicsBody,
    PLAYER_HEIGHT, PLAYER_RADIUS, SPAWN_POSITION,
};

use crate::input::InputState;

/// Marker for the player's physics capsule
#[derive(Component)]
pub struct PlayerBody;

/// The player's skeleton, driven by the controller each frame and copied to
/// the visual hierarchy afterwards.
#[derive(Component)]
pub struct PlayerRig {
    pub rig: Box<dyn CharacterRig>,
    pub variant: CharacterVariant,
}

impl PlayerRig {
    pub fn new(variant: CharacterVariant) -> Self {
        Self {
            rig: variant.build_rig(),
            variant,
        }
    }
}

/// Spawn the player capsule with its controller state.
pub fn spawn_player(mut commands: Commands) {
    let variant = CharacterVariant::default();
    commands.spawn((
        PlayerBody,
        PlayerRig::new(variant),
        CharacterController::default(),
        RigidBody::Dynamic,
        Collider::capsule_y(PLAYER_HEIGHT * 0.5 - PLAYER_RADIUS, PLAYER_RADIUS),
        Velocity::default(),
        LockedAxes::ROTATION_LOCKED,
        Transform::from_translation(Vec3::from_array(SPAWN_POSITION)),
        GlobalTransform::default(),
        Visibility::default(),
    ));
    info!("Player spawned as {:?} at {:?}", variant, SPAWN_POSITION);
}

/// [`PhysicsBody`] over a rapier `Velocity` component.
struct RapierBody<'a> {
    velocity: &'a mut Velocity,
    translation: Vec3,
}

impl PhysicsBody for RapierBody<'_> {
    fn linear_velocity(&self) -> Vec3 {
        self.velocity.linvel
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity.linvel = velocity;
    }

    fn translation(&self) -> Vec3 {
        self.translation
    }
}

/// [`GroundProbe`] over the rapier query pipeline, excluding the player's
/// own body from hits.
struct RapierProbe<'a> {
    context: &'a RapierContext<'a>,
    exclude: Entity,
}

impl GroundProbe for RapierProbe<'_> {
    fn distance_to_ground(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        self.context
            .cast_ray(
                origin,
                Vec3::NEG_Y,
                max_distance,
                true,
                QueryFilter::default().exclude_rigid_body(self.exclude),
            )
            .map(|(_, toi)| toi)
    }
}

/// Run the character controller for the local player.
pub fn drive_character(
    rapier_context: ReadRapierContext,
    mut players: Query<
        (
            Entity,
            &Transform,
            &mut Velocity,
            &mut CharacterController,
            &mut PlayerRig,
        ),
        With<PlayerBody>,
    >,
    camera_query: Query<&Transform, (With<Camera3d>, Without<PlayerBody>)>,
    input_state: Res<InputState>,
    time: Res<Time>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };

    for (entity, transform, mut velocity, mut controller, mut player_rig) in &mut players {
        let probe = RapierProbe {
            context: &context,
            exclude: entity,
        };
        let mut body = RapierBody {
            velocity: &mut velocity,
            translation: transform.translation,
        };

        controller.tick(
            player_rig.rig.as_mut(),
            &mut body,
            &probe,
            &input_state.snapshot(),
            *camera_transform.forward(),
            *camera_transform.right(),
            Some(transform.translation.y - PLAYER_HEIGHT * 0.5),
            time.delta_secs(),
        );
    }
}

/// Zero the player's horizontal velocity while paused so the capsule doesn't
/// glide on stale input.
pub fn freeze_player(mut players: Query<&mut Velocity, With<PlayerBody>>) {
    for mut velocity in &mut players {
        velocity.linvel.x = 0.0;
        velocity.linvel.z = 0.0;
    }
}
