//! Enemy fighters.
//!
//! Fighters spawn ahead of the player with a per-ship closing speed rolled at
//! spawn and never change course; the challenge comes from density, not
//! pursuit. Fire control is probabilistic: each eligible fighter carries a
//! personal shot clock and, once it lapses, rolls `rate × dt` per frame, so a
//! wall of fighters doesn't volley in lockstep.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::config::GameConfig;
use crate::player::Player;
use crate::projectile::spawn_enemy_round;
use crate::session::MatchEntity;

/// A hostile fighter.
#[derive(Component)]
pub struct Enemy {
    pub health: f32,
}

/// Seconds until this fighter may roll for another shot.
#[derive(Component, Default)]
pub struct ShotClock(pub f32);

/// Spawn one fighter at `position` with a closing speed rolled from the
/// configured band.
pub fn spawn_enemy(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &GameConfig,
    position: Vec3,
) {
    let mut rng = rand::thread_rng();
    let speed = rng.gen_range(config.enemy_speed_min..config.enemy_speed_max);

    commands.spawn((
        Enemy { health: config.enemy_health },
        ShotClock::default(),
        MatchEntity,
        Mesh3d(meshes.add(Cone { radius: 0.9, height: 2.0 })),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.9, 0.2, 0.2),
            emissive: LinearRgba::rgb(0.35, 0.05, 0.05),
            ..default()
        })),
        // Nose toward the player (+Z).
        Transform::from_translation(position)
            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        RigidBody::KinematicVelocityBased,
        Velocity::linear(Vec3::new(0.0, 0.0, speed)),
    ));
}

/// Whether a fighter at `enemy_z` may fire at a player at `player_z`.
/// Fighters level with or behind the player hold fire.
pub fn can_fire(enemy_z: f32, player_z: f32, ahead_margin: f32) -> bool {
    player_z - enemy_z > ahead_margin
}

/// Per-fighter fire control: tick the shot clock, then roll for a shot.
pub fn enemy_fire(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    player: Query<&Transform, With<Player>>,
    mut enemies: Query<(&Transform, &mut ShotClock), With<Enemy>>,
) {
    let Ok(player_tf) = player.single() else {
        return;
    };
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();

    for (transform, mut clock) in &mut enemies {
        clock.0 = (clock.0 - dt).max(0.0);
        if clock.0 > 0.0 {
            continue;
        }
        if !can_fire(
            transform.translation.z,
            player_tf.translation.z,
            config.enemy_fire_ahead_margin,
        ) {
            continue;
        }
        if !rng.gen_bool((config.enemy_fire_rate_per_sec * dt as f64).min(1.0)) {
            continue;
        }

        clock.0 = config.enemy_fire_cooldown_secs;
        spawn_enemy_round(
            &mut commands,
            &mut meshes,
            &mut materials,
            transform.translation,
            player_tf.translation,
            &config,
        );
    }
}
