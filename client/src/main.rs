//! Voxelstorm client - renders the arena and drives the local character

mod camera;
mod effects;
mod input;
mod player;
mod rig;
mod scene;
mod settings;
mod states;
mod weapons;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier3d::prelude::*;
use states::GameState;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Voxelstorm".to_string(),
            resolution: WindowResolution::new(1280, 720),
            ..default()
        }),
        ..default()
    }));

    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());

    // Game state machine
    app.init_state::<GameState>();

    // Input settings loaded from disk (a default file is written on first run)
    app.insert_resource(settings::load_or_default());
    app.init_resource::<input::InputState>();

    app.add_systems(
        Startup,
        (scene::setup_scene, effects::setup_effect_assets, player::spawn_player),
    );

    // Pause toggle runs in both states.
    app.add_systems(Update, input::handle_pause_input);

    // Gameplay: input sampling, then the controller, then the visual
    // mirrors. Hard-chained so the rig never renders a stale pose.
    app.add_systems(
        Update,
        (
            input::handle_keyboard_input,
            input::handle_mouse_input,
            input::grab_cursor,
            weapons::handle_equip_input,
            weapons::handle_action_input,
            (
                player::drive_character,
                rig::apply_rig_pose,
                camera::update_camera,
            )
                .chain(),
        )
            .run_if(in_state(GameState::Playing)),
    );

    app.add_systems(
        Update,
        (
            rig::handle_variant_input,
            rig::spawn_rig_visuals,
            weapons::sync_held_weapon,
            effects::update_effects,
        )
            .run_if(in_state(GameState::Playing)),
    );

    app.add_systems(OnEnter(GameState::Paused), player::freeze_player);

    info!("Starting Voxelstorm client");
    app.run();
}
