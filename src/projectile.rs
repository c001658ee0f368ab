//! Projectiles, both friendly and hostile.
//!
//! Rounds are kinematic bodies launched with a fixed [`Velocity`] at spawn and
//! never steered afterwards. Player rounds travel straight down −Z from their
//! mount; enemy rounds are aimed at the player's position at the moment of
//! firing and fly that straight line (no homing). Anything that strays too far
//! from the player on Z is culled wholesale each frame.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::GameConfig;
use crate::player::Player;
use crate::session::MatchEntity;
use crate::ship::WeaponProfile;

/// A round fired by the player's ship.
#[derive(Component)]
pub struct PlayerRound {
    pub damage: f32,
}

/// An aimed round fired by an enemy fighter.
#[derive(Component)]
pub struct EnemyRound {
    pub damage: f32,
}

/// Launch one player round from a mount position.
pub fn spawn_player_round(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    origin: Vec3,
    weapon: &WeaponProfile,
    color: (f32, f32, f32),
) {
    let (r, g, b) = color;
    commands.spawn((
        PlayerRound { damage: weapon.damage },
        MatchEntity,
        Mesh3d(meshes.add(Capsule3d::new(0.1, 0.8))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(r, g, b),
            emissive: LinearRgba::rgb(r, g, b),
            unlit: true,
            ..default()
        })),
        Transform::from_translation(origin)
            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        RigidBody::KinematicVelocityBased,
        Velocity::linear(Vec3::new(0.0, 0.0, -weapon.speed)),
    ));
}

/// Launch one enemy round aimed at `target` from `origin`.
pub fn spawn_enemy_round(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    origin: Vec3,
    target: Vec3,
    config: &GameConfig,
) {
    let direction = aim_direction(origin, target);
    commands.spawn((
        EnemyRound { damage: config.enemy_projectile_damage },
        MatchEntity,
        Mesh3d(meshes.add(Sphere::new(0.18))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.3, 0.2),
            emissive: LinearRgba::rgb(1.0, 0.3, 0.2),
            unlit: true,
            ..default()
        })),
        Transform::from_translation(origin),
        RigidBody::KinematicVelocityBased,
        Velocity::linear(direction * config.enemy_projectile_speed),
    ));
}

/// Unit vector from `origin` toward `target`. A degenerate zero offset falls
/// back to straight +Z so a round spawned inside the player still travels.
pub fn aim_direction(origin: Vec3, target: Vec3) -> Vec3 {
    (target - origin).try_normalize().unwrap_or(Vec3::Z)
}

/// Despawn rounds that have left the corridor around the player.
pub fn cull_rounds(
    mut commands: Commands,
    config: Res<GameConfig>,
    player: Query<&Transform, With<Player>>,
    rounds: Query<(Entity, &Transform), Or<(With<PlayerRound>, With<EnemyRound>)>>,
) {
    let Ok(player_tf) = player.single() else {
        return;
    };
    for (entity, transform) in &rounds {
        if (transform.translation.z - player_tf.translation.z).abs()
            > config.projectile_cull_distance
        {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aim_direction_is_unit_length() {
        let dir = aim_direction(Vec3::new(0.0, 0.0, -50.0), Vec3::ZERO);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.z > 0.9); // fired from ahead, flies back toward the player
    }

    #[test]
    fn aim_direction_handles_coincident_points() {
        assert_eq!(aim_direction(Vec3::ONE, Vec3::ONE), Vec3::Z);
    }

    #[test]
    fn aimed_round_leads_off_axis_targets() {
        let dir = aim_direction(Vec3::new(10.0, 0.0, -40.0), Vec3::new(0.0, 0.0, 0.0));
        assert!(dir.x < 0.0);
        assert!(dir.z > 0.0);
    }
}
