//! Proximity combat resolution.
//!
//! All hits are centre-to-centre distance checks with a per-pair threshold;
//! nothing here touches physics contacts. Resolution runs as a `PostUpdate`
//! chain after motion has integrated, in a fixed order:
//!
//! 1. player rounds against fighters and asteroids
//! 2. enemy rounds against the player
//! 3. hull contact (fighters, asteroids)
//! 4. pickup collection
//! 5. behind-the-player culling
//!
//! Destruction is deferred through `Commands` and each system tracks what it
//! has already consumed in a local `HashSet`, so one round can never pay out
//! against two targets in the same frame and a despawned entity is never
//! hit twice.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::asteroid::Asteroid;
use crate::camera_rig::ImpactShake;
use crate::config::GameConfig;
use crate::effects::ExplosionBurst;
use crate::enemy::Enemy;
use crate::pickups::{HealthPickup, ResourceCrystal};
use crate::player::Player;
use crate::projectile::{EnemyRound, PlayerRound};
use crate::session::MatchStats;

/// Squared-distance proximity test.
pub fn within(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) <= radius * radius
}

/// Player rounds against fighters and asteroids.
///
/// Each round hits at most one target per frame; fighters are checked first
/// because their hit radius is the tighter of the two.
pub fn resolve_player_rounds(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut stats: ResMut<MatchStats>,
    player: Query<&Player>,
    rounds: Query<(Entity, &Transform, &PlayerRound)>,
    mut enemies: Query<(Entity, &Transform, &mut Enemy)>,
    mut asteroids: Query<(Entity, &Transform, &mut Asteroid), Without<Enemy>>,
    mut explosions: MessageWriter<ExplosionBurst>,
) {
    let kill_score = player.single().map(|p| p.stats.enemy_kill_score).unwrap_or(0);
    let mut spent_rounds: HashSet<Entity> = HashSet::new();
    let mut destroyed: HashSet<Entity> = HashSet::new();

    for (round_entity, round_tf, round) in &rounds {
        if spent_rounds.contains(&round_entity) {
            continue;
        }

        for (enemy_entity, enemy_tf, mut enemy) in &mut enemies {
            if destroyed.contains(&enemy_entity) {
                continue;
            }
            if !within(
                round_tf.translation,
                enemy_tf.translation,
                config.hit_radius_projectile_enemy,
            ) {
                continue;
            }

            spent_rounds.insert(round_entity);
            commands.entity(round_entity).despawn();
            enemy.health -= round.damage;
            if enemy.health <= 0.0 {
                destroyed.insert(enemy_entity);
                commands.entity(enemy_entity).despawn();
                stats.enemies_destroyed += 1;
                stats.score += kill_score;
                explosions.write(ExplosionBurst {
                    position: enemy_tf.translation,
                    color: Color::srgb(1.0, 0.5, 0.1),
                });
            }
            break;
        }
        if spent_rounds.contains(&round_entity) {
            continue;
        }

        for (rock_entity, rock_tf, mut rock) in &mut asteroids {
            if destroyed.contains(&rock_entity) {
                continue;
            }
            if !within(
                round_tf.translation,
                rock_tf.translation,
                config.hit_radius_projectile_asteroid,
            ) {
                continue;
            }

            spent_rounds.insert(round_entity);
            commands.entity(round_entity).despawn();
            rock.health -= round.damage;
            if rock.health <= 0.0 {
                destroyed.insert(rock_entity);
                commands.entity(rock_entity).despawn();
                stats.asteroids_destroyed += 1;
                stats.score += config.score_per_asteroid;
                explosions.write(ExplosionBurst {
                    position: rock_tf.translation,
                    color: Color::srgb(0.6, 0.5, 0.4),
                });
            }
            break;
        }
    }
}

/// Enemy rounds against the player's hull.
pub fn resolve_enemy_rounds(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut stats: ResMut<MatchStats>,
    player: Query<&Transform, With<Player>>,
    rounds: Query<(Entity, &Transform, &EnemyRound)>,
    mut shakes: MessageWriter<ImpactShake>,
) {
    let Ok(player_tf) = player.single() else {
        return;
    };
    for (entity, transform, round) in &rounds {
        if within(
            transform.translation,
            player_tf.translation,
            config.hit_radius_enemy_shot_player,
        ) {
            commands.entity(entity).despawn();
            stats.damage(round.damage);
            shakes.write(ImpactShake { intensity: 1.0 });
        }
    }
}

/// Hull contact with fighters and asteroids. The rammer is destroyed along
/// with the damage it deals; no score is paid for trading paint.
pub fn resolve_hull_contact(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut stats: ResMut<MatchStats>,
    player: Query<&Transform, With<Player>>,
    enemies: Query<(Entity, &Transform), With<Enemy>>,
    asteroids: Query<(Entity, &Transform), (With<Asteroid>, Without<Enemy>)>,
    mut shakes: MessageWriter<ImpactShake>,
    mut explosions: MessageWriter<ExplosionBurst>,
) {
    let Ok(player_tf) = player.single() else {
        return;
    };
    let at = player_tf.translation;

    for (entity, transform) in &enemies {
        if within(transform.translation, at, config.contact_radius_enemy_player) {
            commands.entity(entity).despawn();
            stats.damage(config.enemy_contact_damage);
            shakes.write(ImpactShake { intensity: 1.5 });
            explosions.write(ExplosionBurst {
                position: transform.translation,
                color: Color::srgb(1.0, 0.5, 0.1),
            });
        }
    }
    for (entity, transform) in &asteroids {
        if within(transform.translation, at, config.contact_radius_asteroid_player) {
            commands.entity(entity).despawn();
            stats.damage(config.asteroid_contact_damage);
            shakes.write(ImpactShake { intensity: 2.0 });
            explosions.write(ExplosionBurst {
                position: transform.translation,
                color: Color::srgb(0.6, 0.5, 0.4),
            });
        }
    }
}

/// Collect crystals and health pickups in range of the hull.
pub fn collect_pickups(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut stats: ResMut<MatchStats>,
    player: Query<&Transform, With<Player>>,
    crystals: Query<(Entity, &Transform), With<ResourceCrystal>>,
    pickups: Query<(Entity, &Transform), (With<HealthPickup>, Without<ResourceCrystal>)>,
) {
    let Ok(player_tf) = player.single() else {
        return;
    };
    let at = player_tf.translation;

    for (entity, transform) in &crystals {
        if within(transform.translation, at, config.pickup_radius) {
            commands.entity(entity).despawn();
            stats.score += config.resource_score_value;
            stats.add_energy(config.resource_energy_value);
            stats.resources_collected += 1;
        }
    }
    for (entity, transform) in &pickups {
        if within(transform.translation, at, config.pickup_radius) {
            commands.entity(entity).despawn();
            stats.heal_fraction(config.health_pickup_heal_fraction);
        }
    }
}

/// Despawn anything the player has flown well past.
pub fn cull_passed_entities(
    mut commands: Commands,
    config: Res<GameConfig>,
    player: Query<&Transform, With<Player>>,
    transients: Query<
        (Entity, &Transform),
        Or<(With<Enemy>, With<Asteroid>, With<ResourceCrystal>, With<HealthPickup>)>,
    >,
) {
    let Ok(player_tf) = player.single() else {
        return;
    };
    for (entity, transform) in &transients {
        if transform.translation.z > player_tf.translation.z + config.cull_behind_distance {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::ShipArchetype;

    fn combat_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<GameConfig>();
        app.init_resource::<MatchStats>();
        app.add_message::<ImpactShake>();
        app.add_message::<ExplosionBurst>();
        app
    }

    fn spawn_player(app: &mut App, at: Vec3, archetype: ShipArchetype) -> Entity {
        app.world_mut()
            .spawn((
                Player { stats: archetype.stats() },
                Transform::from_translation(at),
            ))
            .id()
    }

    #[test]
    fn three_interceptor_hits_kill_a_fighter() {
        let mut app = combat_test_app();
        app.add_systems(Update, resolve_player_rounds);
        spawn_player(&mut app, Vec3::ZERO, ShipArchetype::Interceptor);
        let enemy = app
            .world_mut()
            .spawn((Enemy { health: 3.0 }, Transform::from_xyz(0.0, 0.0, -20.0)))
            .id();

        for _ in 0..3 {
            app.world_mut().spawn((
                PlayerRound { damage: 1.0 },
                Transform::from_xyz(0.0, 0.0, -20.0),
            ));
            app.update();
        }

        assert!(app.world().get_entity(enemy).is_err());
        let stats = app.world().resource::<MatchStats>();
        assert_eq!(stats.enemies_destroyed, 1);
        assert_eq!(stats.score, 100);
    }

    #[test]
    fn one_round_pays_out_against_one_target() {
        let mut app = combat_test_app();
        app.add_systems(Update, resolve_player_rounds);
        spawn_player(&mut app, Vec3::ZERO, ShipArchetype::Battlecruiser);

        // Two one-hit fighters inside the same blast radius, one round.
        app.world_mut()
            .spawn((Enemy { health: 1.0 }, Transform::from_xyz(0.5, 0.0, -20.0)));
        app.world_mut()
            .spawn((Enemy { health: 1.0 }, Transform::from_xyz(-0.5, 0.0, -20.0)));
        app.world_mut().spawn((
            PlayerRound { damage: 5.0 },
            Transform::from_xyz(0.0, 0.0, -20.0),
        ));
        app.update();

        let stats = app.world().resource::<MatchStats>();
        assert_eq!(stats.enemies_destroyed, 1);
        assert_eq!(stats.score, 200);
    }

    #[test]
    fn asteroid_kill_scores_flat_fifty() {
        let mut app = combat_test_app();
        app.add_systems(Update, resolve_player_rounds);
        spawn_player(&mut app, Vec3::ZERO, ShipArchetype::Battlecruiser);
        app.world_mut()
            .spawn((Asteroid { health: 2.0 }, Transform::from_xyz(0.0, 0.0, -15.0)));
        app.world_mut().spawn((
            PlayerRound { damage: 5.0 },
            Transform::from_xyz(0.0, 0.0, -15.0),
        ));

        app.update();

        let stats = app.world().resource::<MatchStats>();
        assert_eq!(stats.asteroids_destroyed, 1);
        assert_eq!(stats.score, 50);
    }

    #[test]
    fn enemy_round_damages_the_hull_inside_one_unit() {
        let mut app = combat_test_app();
        app.add_systems(Update, resolve_enemy_rounds);
        spawn_player(&mut app, Vec3::ZERO, ShipArchetype::Interceptor);
        app.world_mut().spawn((
            EnemyRound { damage: 10.0 },
            Transform::from_xyz(0.5, 0.0, 0.0),
        ));
        // Out of radius: must survive the frame untouched.
        let far = app
            .world_mut()
            .spawn((EnemyRound { damage: 10.0 }, Transform::from_xyz(0.0, 0.0, -3.0)))
            .id();

        app.update();

        assert_eq!(app.world().resource::<MatchStats>().health, 90.0);
        assert!(app.world().get_entity(far).is_ok());
    }

    #[test]
    fn ramming_destroys_the_rammer_and_costs_hull() {
        let mut app = combat_test_app();
        app.add_systems(Update, resolve_hull_contact);
        spawn_player(&mut app, Vec3::ZERO, ShipArchetype::Interceptor);
        let enemy = app
            .world_mut()
            .spawn((Enemy { health: 3.0 }, Transform::from_xyz(1.0, 0.0, -2.0)))
            .id();
        let rock = app
            .world_mut()
            .spawn((Asteroid { health: 2.0 }, Transform::from_xyz(0.0, 1.0, 0.0)))
            .id();

        app.update();

        assert!(app.world().get_entity(enemy).is_err());
        assert!(app.world().get_entity(rock).is_err());
        let stats = app.world().resource::<MatchStats>();
        assert_eq!(stats.health, 100.0 - 15.0 - 20.0);
        // No score for trading paint.
        assert_eq!(stats.score, 0);
        assert_eq!(stats.enemies_destroyed, 0);
    }

    #[test]
    fn crystal_pays_score_and_energy() {
        let mut app = combat_test_app();
        app.add_systems(Update, collect_pickups);
        spawn_player(&mut app, Vec3::ZERO, ShipArchetype::Interceptor);
        {
            let mut stats = app.world_mut().resource_mut::<MatchStats>();
            *stats = MatchStats::for_archetype(ShipArchetype::Interceptor.stats());
            stats.drain_energy(20.0);
        }
        app.world_mut()
            .spawn((ResourceCrystal, Transform::from_xyz(0.5, 0.5, 0.0)));

        app.update();

        let stats = app.world().resource::<MatchStats>();
        assert_eq!(stats.score, 10);
        assert_eq!(stats.energy, 35.0);
        assert_eq!(stats.resources_collected, 1);
    }

    #[test]
    fn health_pickup_heals_half_of_current() {
        let mut app = combat_test_app();
        app.add_systems(Update, collect_pickups);
        spawn_player(&mut app, Vec3::ZERO, ShipArchetype::Interceptor);
        {
            let mut stats = app.world_mut().resource_mut::<MatchStats>();
            *stats = MatchStats::for_archetype(ShipArchetype::Interceptor.stats());
            stats.damage(60.0);
        }
        app.world_mut()
            .spawn((HealthPickup, Transform::from_xyz(0.0, 0.0, 0.5)));

        app.update();

        assert_eq!(app.world().resource::<MatchStats>().health, 60.0); // 40 + 20
    }

    #[test]
    fn entities_behind_the_player_are_culled() {
        let mut app = combat_test_app();
        app.add_systems(Update, cull_passed_entities);
        spawn_player(&mut app, Vec3::new(0.0, 0.0, -100.0), ShipArchetype::Interceptor);
        let behind = app
            .world_mut()
            .spawn((Enemy { health: 3.0 }, Transform::from_xyz(0.0, 0.0, -45.0)))
            .id();
        let ahead = app
            .world_mut()
            .spawn((Enemy { health: 3.0 }, Transform::from_xyz(0.0, 0.0, -160.0)))
            .id();

        app.update();

        assert!(app.world().get_entity(behind).is_err());
        assert!(app.world().get_entity(ahead).is_ok());
    }
}
