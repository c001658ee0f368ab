use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier3d::prelude::*;

use spacefleet::SpaceFleetPlugin;

/// Configure Rapier: no gravity, everything in space is velocity-driven.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec3::ZERO;
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Space Fleet".into(),
                resolution: WindowResolution::new(1280, 720),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.01, 0.01, 0.03)))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(SpaceFleetPlugin)
        .add_systems(Startup, setup_physics_config)
        .run();
}
