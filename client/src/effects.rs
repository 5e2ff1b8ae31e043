//! Short-lived visual effects.
//!
//! Every effect is a TTL entity: spawned with a lifetime, faded and shrunk
//! as it ages, despawned when it runs out. No timers are stored anywhere
//! else; despawning the entity is the whole cleanup.

use bevy::prelude::*;
use rand::Rng;

/// Lifetime bookkeeping for one effect entity.
#[derive(Component)]
pub struct EffectTtl {
    pub remaining: f32,
    pub lifetime: f32,
}

impl EffectTtl {
    pub fn new(lifetime: f32) -> Self {
        Self {
            remaining: lifetime,
            lifetime,
        }
    }
}

/// Constant drift velocity for an effect entity.
#[derive(Component)]
pub struct Drift(pub Vec3);

/// Shared meshes/materials for effect spawning.
#[derive(Resource)]
pub struct EffectAssets {
    pub shard: Handle<Mesh>,
    pub thunder: Handle<StandardMaterial>,
    pub inferno: Handle<StandardMaterial>,
    pub plasma: Handle<StandardMaterial>,
}

pub fn setup_effect_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let shard = meshes.add(Cuboid::new(0.12, 0.12, 0.12));

    let glow = |base: Color, emissive: LinearRgba| StandardMaterial {
        base_color: base,
        emissive,
        unlit: true,
        ..default()
    };

    commands.insert_resource(EffectAssets {
        shard,
        thunder: materials.add(glow(
            Color::srgb(0.6, 0.8, 1.0),
            LinearRgba::rgb(2.0, 4.0, 8.0),
        )),
        inferno: materials.add(glow(
            Color::srgb(1.0, 0.5, 0.1),
            LinearRgba::rgb(8.0, 3.0, 0.5),
        )),
        plasma: materials.add(glow(
            Color::srgb(0.4, 1.0, 0.7),
            LinearRgba::rgb(2.0, 8.0, 4.0),
        )),
    });
}

/// Scatter a burst of glowing shards around `position`.
pub fn spawn_burst(
    commands: &mut Commands,
    assets: &EffectAssets,
    material: &Handle<StandardMaterial>,
    position: Vec3,
    count: usize,
    speed: f32,
    lifetime: f32,
) {
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let dir = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(0.2..1.0),
            rng.gen_range(-1.0..1.0),
        )
        .normalize_or_zero();
        commands.spawn((
            EffectTtl::new(lifetime * rng.gen_range(0.7..1.3)),
            Drift(dir * speed * rng.gen_range(0.5..1.0)),
            Mesh3d(assets.shard.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position),
        ));
    }
}

/// Age, drift, shrink, and despawn effect entities.
pub fn update_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut EffectTtl, Option<&Drift>, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut ttl, drift, mut transform) in &mut effects {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        if let Some(Drift(velocity)) = drift {
            transform.translation += *velocity * dt;
        }
        let fade = (ttl.remaining / ttl.lifetime).clamp(0.0, 1.0);
        transform.scale = Vec3::splat(fade);
    }
}
