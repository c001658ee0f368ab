//! Drifting asteroids.
//!
//! Asteroids are dumb mass: a fixed drift toward the player, a random tumble,
//! and two points of hull. They damage the player on contact and shatter in
//! the process.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::config::GameConfig;
use crate::session::MatchEntity;

/// A drifting rock.
#[derive(Component)]
pub struct Asteroid {
    pub health: f32,
}

/// Per-asteroid tumble axis and rate, rolled at spawn.
#[derive(Component)]
pub struct Tumble {
    pub axis: Vec3,
    pub rate: f32,
}

pub fn spawn_asteroid(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &GameConfig,
    position: Vec3,
) {
    let mut rng = rand::thread_rng();
    let radius = rng.gen_range(0.8..1.6);
    let axis = Vec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    )
    .try_normalize()
    .unwrap_or(Vec3::Y);

    commands.spawn((
        Asteroid { health: config.asteroid_health },
        Tumble { axis, rate: rng.gen_range(0.4..1.4) },
        MatchEntity,
        Mesh3d(meshes.add(Sphere::new(radius).mesh().uv(8, 6))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.45, 0.38, 0.32),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_translation(position),
        RigidBody::KinematicVelocityBased,
        Velocity::linear(Vec3::new(0.0, 0.0, config.asteroid_drift_speed)),
    ));
}

/// Spin each asteroid around its rolled axis.
pub fn tumble_asteroids(time: Res<Time>, mut query: Query<(&Tumble, &mut Transform)>) {
    let dt = time.delta_secs();
    for (tumble, mut transform) in &mut query {
        transform.rotate(Quat::from_axis_angle(tumble.axis, tumble.rate * dt));
    }
}
