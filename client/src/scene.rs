//! Static test arena: ground plane, platforms, lighting, and the camera.

use bevy::light::CascadeShadowConfigBuilder;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

const GROUND_HALF_EXTENT: f32 = 60.0;
const GROUND_THICKNESS: f32 = 0.5;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground: top surface exactly at y = 0 so the grounded fallback lines up.
    let ground_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.5, 0.3),
        perceptual_roughness: 0.95,
        ..default()
    });
    commands.spawn((
        RigidBody::Fixed,
        Collider::cuboid(GROUND_HALF_EXTENT, GROUND_THICKNESS * 0.5, GROUND_HALF_EXTENT),
        Mesh3d(meshes.add(Cuboid::new(
            GROUND_HALF_EXTENT * 2.0,
            GROUND_THICKNESS,
            GROUND_HALF_EXTENT * 2.0,
        ))),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(0.0, -GROUND_THICKNESS * 0.5, 0.0),
    ));

    // A few platforms for jump and booster testing.
    let platform_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.45, 0.4),
        perceptual_roughness: 0.9,
        ..default()
    });
    for (position, half_extents) in [
        (Vec3::new(8.0, 1.0, -6.0), Vec3::new(3.0, 0.25, 3.0)),
        (Vec3::new(-10.0, 2.5, 4.0), Vec3::new(2.5, 0.25, 2.5)),
        (Vec3::new(2.0, 5.0, -14.0), Vec3::new(2.0, 0.25, 2.0)),
    ] {
        commands.spawn((
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            Mesh3d(meshes.add(Cuboid::from_size(half_extents * 2.0))),
            MeshMaterial3d(platform_material.clone()),
            Transform::from_translation(position),
        ));
    }

    // Sun with cheap shadows.
    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            color: Color::srgb(1.0, 0.98, 0.92),
            ..default()
        },
        CascadeShadowConfigBuilder {
            num_cascades: 3,
            maximum_distance: 120.0,
            ..default()
        }
        .build(),
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.8, 0.85, 1.0),
        brightness: 120.0,
        affects_lightmapped_meshes: true,
    });
    commands.insert_resource(ClearColor(Color::srgb(0.5, 0.7, 0.95)));

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.0, 8.0).looking_at(Vec3::new(0.0, 1.5, 0.0), Vec3::Y),
    ));
}
