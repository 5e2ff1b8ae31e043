//! Visual rig hierarchy: blocky limb meshes parented to joint pivots.
//!
//! The shared skeleton holds only rotations; this module mirrors it into
//! Transforms once per frame, after the controller has run.

use bevy::prelude::*;
use shared::{CharacterVariant, Joint};

use crate::player::{PlayerBody, PlayerRig};

// =============================================================================
// GEOMETRY
// =============================================================================

const TORSO_SIZE: Vec3 = Vec3::new(0.5, 0.6, 0.3);
const HEAD_SIZE: f32 = 0.3;
const ARM_SIZE: Vec3 = Vec3::new(0.16, 0.6, 0.16);
const LEG_SIZE: Vec3 = Vec3::new(0.18, 0.6, 0.18);
const SKIRT_SIZE: Vec3 = Vec3::new(0.5, 0.6, 0.35);

const SHOULDER_PIVOT: Vec3 = Vec3::new(0.38, 0.45, 0.0);
const HIP_PIVOT: Vec3 = Vec3::new(0.13, -0.15, 0.0);
/// Limb meshes hang below their pivot by half their length.
const LIMB_DROP: Vec3 = Vec3::new(0.0, -0.3, 0.0);

// =============================================================================
// COMPONENTS
// =============================================================================

/// Model root: receives the rig's root offset and orientation.
#[derive(Component)]
pub struct RigRootLink {
    pub owner: Entity,
}

/// Joint pivot: receives one joint's Euler rotation.
#[derive(Component)]
pub struct RigJointLink {
    pub owner: Entity,
    pub joint: Joint,
}

/// Attachment point for held-weapon models, parented to the weapon-arm pivot.
#[derive(Component)]
pub struct WeaponAnchor;

// =============================================================================
// SYSTEMS
// =============================================================================

/// Build the visual hierarchy for freshly spawned players.
pub fn spawn_rig_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    players: Query<(Entity, &PlayerRig), (With<PlayerBody>, Added<PlayerRig>)>,
) {
    for (player, player_rig) in &players {
        let (body_color, limb_color) = match player_rig.variant {
            CharacterVariant::BoxMan => (Color::srgb(0.25, 0.45, 0.8), Color::srgb(0.2, 0.3, 0.5)),
            CharacterVariant::VoxelKnight => {
                (Color::srgb(0.55, 0.55, 0.6), Color::srgb(0.35, 0.35, 0.4))
            }
        };
        let body_material = materials.add(StandardMaterial {
            base_color: body_color,
            perceptual_roughness: 0.8,
            ..default()
        });
        let limb_material = materials.add(StandardMaterial {
            base_color: limb_color,
            perceptual_roughness: 0.8,
            ..default()
        });

        let torso = meshes.add(Cuboid::new(TORSO_SIZE.x, TORSO_SIZE.y, TORSO_SIZE.z));
        let head = meshes.add(Cuboid::new(HEAD_SIZE, HEAD_SIZE, HEAD_SIZE));
        let arm = meshes.add(Cuboid::new(ARM_SIZE.x, ARM_SIZE.y, ARM_SIZE.z));
        let leg = meshes.add(Cuboid::new(LEG_SIZE.x, LEG_SIZE.y, LEG_SIZE.z));

        let mount = player_rig.rig.weapon_mount();

        let root = commands
            .spawn((
                RigRootLink { owner: player },
                Transform::IDENTITY,
                GlobalTransform::default(),
                Visibility::default(),
            ))
            .id();
        commands.entity(player).add_child(root);

        commands.entity(root).with_children(|parent| {
            parent.spawn((
                Mesh3d(torso),
                MeshMaterial3d(body_material.clone()),
                Transform::from_xyz(0.0, 0.15, 0.0),
            ));
            parent.spawn((
                Mesh3d(head),
                MeshMaterial3d(body_material.clone()),
                Transform::from_xyz(0.0, 0.65, 0.0),
            ));
        });

        // Shoulder pivots, both variants.
        for (joint, side) in [(Joint::ShoulderLeft, -1.0), (Joint::ShoulderRight, 1.0)] {
            let pivot = commands
                .spawn((
                    RigJointLink {
                        owner: player,
                        joint,
                    },
                    Transform::from_translation(SHOULDER_PIVOT * Vec3::new(side, 1.0, 1.0)),
                    GlobalTransform::default(),
                    Visibility::default(),
                ))
                .id();
            commands.entity(root).add_child(pivot);
            commands.entity(pivot).with_children(|parent| {
                parent.spawn((
                    Mesh3d(arm.clone()),
                    MeshMaterial3d(limb_material.clone()),
                    Transform::from_translation(LIMB_DROP),
                ));
                if joint == mount.joint {
                    parent.spawn((
                        WeaponAnchor,
                        Transform::from_translation(mount.offset),
                        GlobalTransform::default(),
                        Visibility::default(),
                    ));
                }
            });
        }

        // Legs: articulated hips for BoxMan, one rigid skirt for the knight.
        match player_rig.variant {
            CharacterVariant::BoxMan => {
                for (joint, side) in [(Joint::HipLeft, -1.0), (Joint::HipRight, 1.0)] {
                    let pivot = commands
                        .spawn((
                            RigJointLink {
                                owner: player,
                                joint,
                            },
                            Transform::from_translation(HIP_PIVOT * Vec3::new(side, 1.0, 1.0)),
                            GlobalTransform::default(),
                            Visibility::default(),
                        ))
                        .id();
                    commands.entity(root).add_child(pivot);
                    commands.entity(pivot).with_children(|parent| {
                        parent.spawn((
                            Mesh3d(leg.clone()),
                            MeshMaterial3d(limb_material.clone()),
                            Transform::from_translation(LIMB_DROP),
                        ));
                    });
                }
            }
            CharacterVariant::VoxelKnight => {
                let skirt = meshes.add(Cuboid::new(SKIRT_SIZE.x, SKIRT_SIZE.y, SKIRT_SIZE.z));
                commands.entity(root).with_children(|parent| {
                    parent.spawn((
                        Mesh3d(skirt),
                        MeshMaterial3d(limb_material.clone()),
                        Transform::from_xyz(0.0, -0.45, 0.0),
                    ));
                });
            }
        }

        info!("Rig visuals spawned for {:?}", player_rig.variant);
    }
}

/// Swap between character variants with V, rebuilding the visual hierarchy.
pub fn handle_variant_input(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    players: Query<(Entity, &PlayerRig), With<PlayerBody>>,
    roots: Query<(Entity, &RigRootLink)>,
) {
    if !keyboard.just_pressed(KeyCode::KeyV) {
        return;
    }

    for (player, player_rig) in &players {
        let next = match player_rig.variant {
            CharacterVariant::BoxMan => CharacterVariant::VoxelKnight,
            CharacterVariant::VoxelKnight => CharacterVariant::BoxMan,
        };
        for (root, link) in &roots {
            if link.owner == player {
                commands.entity(root).despawn();
            }
        }
        // Remove-then-insert so the spawn system sees a fresh rig.
        commands
            .entity(player)
            .remove::<PlayerRig>()
            .insert(PlayerRig::new(next));
        info!("Switched character to {:?}", next);
    }
}

/// Copy the skeleton's pose onto the visual Transforms.
pub fn apply_rig_pose(
    players: Query<&PlayerRig>,
    mut roots: Query<(&RigRootLink, &mut Transform), Without<RigJointLink>>,
    mut joints: Query<(&RigJointLink, &mut Transform), Without<RigRootLink>>,
) {
    for (link, mut transform) in &mut roots {
        let Ok(player_rig) = players.get(link.owner) else {
            continue;
        };
        let root = player_rig.rig.root();
        transform.translation = root.offset;
        transform.rotation = root.orientation;
    }

    for (link, mut transform) in &mut joints {
        let Ok(player_rig) = players.get(link.owner) else {
            continue;
        };
        if let Some(rotation) = player_rig.rig.joint(link.joint) {
            transform.rotation =
                Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
        }
    }
}
