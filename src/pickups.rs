//! Collectibles: resource crystals and health pickups.
//!
//! Crystals drift toward the player like everything else and pay out score
//! plus a sip of energy. Health pickups are rarer, spawn on their own slow
//! timer near the flight axis, and gently home on the player so a wounded
//! hull can actually reach them. The heal scales with *current* health:
//! half of what you have left, floored, capped at the archetype maximum.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::GameConfig;
use crate::player::Player;
use crate::session::MatchEntity;

/// Score-and-energy crystal.
#[derive(Component)]
pub struct ResourceCrystal;

/// Homing repair pod.
#[derive(Component)]
pub struct HealthPickup;

pub fn spawn_resource(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &GameConfig,
    position: Vec3,
) {
    commands.spawn((
        ResourceCrystal,
        MatchEntity,
        Mesh3d(meshes.add(Tetrahedron::default())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 1.0, 0.6),
            emissive: LinearRgba::rgb(0.1, 0.6, 0.3),
            ..default()
        })),
        Transform::from_translation(position),
        RigidBody::KinematicVelocityBased,
        Velocity::linear(Vec3::new(0.0, 0.0, config.resource_drift_speed)),
    ));
}

pub fn spawn_health_pickup(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
) {
    commands.spawn((
        HealthPickup,
        MatchEntity,
        Mesh3d(meshes.add(Sphere::new(0.5))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.3, 0.5),
            emissive: LinearRgba::rgb(0.8, 0.1, 0.3),
            ..default()
        })),
        Transform::from_translation(position),
        RigidBody::KinematicVelocityBased,
        Velocity::zero(),
    ));
}

/// Steer health pickups toward the player at the approach speed.
pub fn home_health_pickups(
    config: Res<GameConfig>,
    player: Query<&Transform, With<Player>>,
    mut pickups: Query<(&Transform, &mut Velocity), (With<HealthPickup>, Without<Player>)>,
) {
    let Ok(player_tf) = player.single() else {
        return;
    };
    for (transform, mut velocity) in &mut pickups {
        let to_player = player_tf.translation - transform.translation;
        let direction = to_player.try_normalize().unwrap_or(Vec3::Z);
        velocity.linvel = direction * config.health_pickup_approach_speed;
    }
}

/// Idle spin so collectibles read as collectibles.
pub fn spin_pickups(
    time: Res<Time>,
    mut query: Query<&mut Transform, Or<(With<ResourceCrystal>, With<HealthPickup>)>>,
) {
    let angle = time.delta_secs() * 2.0;
    for mut transform in &mut query {
        transform.rotate_y(angle);
    }
}
