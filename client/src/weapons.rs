//! Held weapons: equipping, weapon models on the rig, and action triggers.

use bevy::prelude::*;
use shared::{ActionKind, CharacterController, ItemType, TriggerOutcome};

use crate::effects::{self, EffectAssets};
use crate::player::PlayerBody;
use crate::rig::WeaponAnchor;

/// Marker + item tag for the weapon model hanging off the anchor.
#[derive(Component)]
pub struct HeldWeapon {
    pub item: ItemType,
}

/// Number keys swap the held item.
pub fn handle_equip_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<&mut CharacterController, With<PlayerBody>>,
) {
    let selected = if keyboard.just_pressed(KeyCode::Digit1) {
        Some(ItemType::Unarmed)
    } else if keyboard.just_pressed(KeyCode::Digit2) {
        Some(ItemType::PlasmaBlaster)
    } else if keyboard.just_pressed(KeyCode::Digit3) {
        Some(ItemType::ThunderStormBlade)
    } else if keyboard.just_pressed(KeyCode::Digit4) {
        Some(ItemType::InfernoBlade)
    } else if keyboard.just_pressed(KeyCode::Digit5) {
        Some(ItemType::FrostBlade)
    } else {
        None
    };

    let Some(item) = selected else {
        return;
    };
    for mut controller in &mut players {
        if controller.equipped() != item {
            controller.equip(item);
            info!("Equipped {:?}", item);
        }
    }
}

/// Keep the weapon model under the anchor in sync with the equipped item.
pub fn sync_held_weapon(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    players: Query<&CharacterController, With<PlayerBody>>,
    anchors: Query<Entity, With<WeaponAnchor>>,
    held: Query<(Entity, &HeldWeapon)>,
) {
    let Ok(controller) = players.single() else {
        return;
    };
    let equipped = controller.equipped();

    let current = held.iter().next();
    if current.map(|(_, h)| h.item) == Some(equipped) {
        return;
    }
    if let Some((entity, _)) = current {
        commands.entity(entity).despawn();
    }
    if equipped == ItemType::Unarmed {
        return;
    }
    let Ok(anchor) = anchors.single() else {
        return;
    };

    let weapon = spawn_weapon_model(&mut commands, &mut meshes, &mut materials, equipped);
    commands.entity(anchor).add_child(weapon);
}

fn spawn_weapon_model(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    item: ItemType,
) -> Entity {
    match item {
        ItemType::PlasmaBlaster => {
            let body = meshes.add(Cuboid::new(0.1, 0.14, 0.3));
            let barrel = meshes.add(Cuboid::new(0.05, 0.05, 0.25));
            let material = materials.add(StandardMaterial {
                base_color: Color::srgb(0.15, 0.17, 0.2),
                metallic: 0.8,
                perceptual_roughness: 0.3,
                ..default()
            });
            commands
                .spawn((
                    HeldWeapon { item },
                    Mesh3d(body),
                    MeshMaterial3d(material.clone()),
                    Transform::IDENTITY,
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Mesh3d(barrel),
                        MeshMaterial3d(material),
                        Transform::from_xyz(0.0, 0.03, -0.25),
                    ));
                })
                .id()
        }
        // The three blades share geometry and differ by color.
        _ => {
            let blade_color = match item {
                ItemType::ThunderStormBlade => Color::srgb(0.5, 0.7, 1.0),
                ItemType::InfernoBlade => Color::srgb(1.0, 0.45, 0.15),
                _ => Color::srgb(0.75, 0.9, 1.0),
            };
            let blade = meshes.add(Cuboid::new(0.06, 0.9, 0.12));
            let grip = meshes.add(Cuboid::new(0.08, 0.2, 0.08));
            let blade_material = materials.add(StandardMaterial {
                base_color: blade_color,
                metallic: 0.9,
                perceptual_roughness: 0.2,
                ..default()
            });
            let grip_material = materials.add(StandardMaterial {
                base_color: Color::srgb(0.2, 0.15, 0.1),
                ..default()
            });
            commands
                .spawn((
                    HeldWeapon { item },
                    Mesh3d(grip),
                    MeshMaterial3d(grip_material),
                    Transform::IDENTITY,
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Mesh3d(blade),
                        MeshMaterial3d(blade_material),
                        Transform::from_xyz(0.0, -0.55, 0.0),
                    ));
                })
                .id()
        }
    }
}

/// Trigger overlay actions from mouse/keyboard.
pub fn handle_action_input(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    assets: Res<EffectAssets>,
    mut players: Query<(&Transform, &mut CharacterController), With<PlayerBody>>,
) {
    let Ok((transform, mut controller)) = players.single_mut() else {
        return;
    };

    // Blaster fire is a plain muzzle flash, no overlay action.
    if mouse_button.just_pressed(MouseButton::Left)
        && controller.equipped() == ItemType::PlasmaBlaster
    {
        let forward = Quat::from_rotation_y(controller.yaw()) * Vec3::NEG_Z;
        effects::spawn_burst(
            &mut commands,
            &assets,
            &assets.plasma,
            transform.translation + Vec3::Y + forward * 0.9,
            8,
            5.0,
            0.25,
        );
        return;
    }

    let requested = if mouse_button.just_pressed(MouseButton::Left)
        && controller.equipped().is_melee()
    {
        Some(ActionKind::MeleeSlash)
    } else if keyboard.just_pressed(KeyCode::KeyQ) {
        Some(ActionKind::ThunderCast)
    } else if keyboard.just_pressed(KeyCode::KeyE) {
        Some(ActionKind::InfernoCast)
    } else {
        None
    };

    let Some(kind) = requested else {
        return;
    };

    match controller.trigger_action(kind, time.elapsed_secs()) {
        TriggerOutcome::Started => {
            let origin = transform.translation + Vec3::Y;
            match kind {
                ActionKind::ThunderCast => {
                    effects::spawn_burst(
                        &mut commands,
                        &assets,
                        &assets.thunder,
                        origin + Vec3::Y * 1.5,
                        24,
                        4.0,
                        0.6,
                    );
                }
                ActionKind::InfernoCast => {
                    let forward = Quat::from_rotation_y(controller.yaw()) * Vec3::NEG_Z;
                    effects::spawn_burst(
                        &mut commands,
                        &assets,
                        &assets.inferno,
                        origin + forward * 1.2,
                        16,
                        3.0,
                        0.5,
                    );
                }
                ActionKind::MeleeSlash => {}
            }
        }
        TriggerOutcome::AlreadyActive => {}
        TriggerOutcome::Cooldown { remaining } => {
            debug!("{kind:?} on cooldown for {remaining:.2}s");
        }
    }
}
