//! The player's ship: spawning, flight, boost, weapon trigger.
//!
//! Motion is expressed as a rapier [`Velocity`] on a kinematic body; the
//! physics step integrates it and [`clamp_to_arena`] snaps X/Y back inside the
//! bounds afterwards. Forward travel is unconditional: the ship always
//! descends −Z at the scroll speed, steering only adds lateral velocity.
//!
//! Boost is a pure multiplier on lateral speed. It engages only while the
//! boost key is held, the ship is actually steering, and the energy bank is
//! above zero; the same condition gates the drain, so hovering with Shift
//! held costs nothing.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::GameConfig;
use crate::input::FlightInput;
use crate::projectile::spawn_player_round;
use crate::session::{MatchEntity, MatchStats};
use crate::ship::{ArchetypeStats, SelectedShip, ShipArchetype};

/// The ship under player control. Stats are resolved once at spawn.
#[derive(Component)]
pub struct Player {
    pub stats: &'static ArchetypeStats,
}

/// Seconds until the trigger is live again.
#[derive(Component, Default)]
pub struct FireCooldown(pub f32);

/// Lateral speed for one frame of input (u/s).
///
/// Boost multiplies rather than adds, and only counts while steering with
/// energy in the bank.
pub fn lateral_speed(
    stats: &ArchetypeStats,
    config: &GameConfig,
    boosting: bool,
    steering: bool,
    energy: f32,
) -> f32 {
    let base = stats.maneuverability * config.move_speed_per_maneuver;
    if boosting && steering && energy > 0.0 {
        base * stats.boost_capacity * config.boost_factor_per_capacity
    } else {
        base
    }
}

/// `OnEnter(Playing)`: spawn the hull at the origin with its archetype colour.
pub fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    selected: Res<SelectedShip>,
) {
    let archetype = selected
        .0
        .as_ref()
        .map(|s| s.archetype)
        .unwrap_or(ShipArchetype::Interceptor);
    let stats = archetype.stats();
    let (r, g, b) = stats.color;

    commands.spawn((
        Player { stats },
        FireCooldown::default(),
        MatchEntity,
        Mesh3d(meshes.add(Cone { radius: 0.8, height: 2.2 })),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(r, g, b),
            emissive: LinearRgba::rgb(r * 0.4, g * 0.4, b * 0.4),
            ..default()
        })),
        // Point the cone's apex down-range.
        Transform::from_xyz(0.0, 0.0, 0.0)
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
        RigidBody::KinematicVelocityBased,
        Velocity::zero(),
    ));
    eprintln!("[SETUP] Player ship spawned ({})", archetype.name());
}

/// Translate the input snapshot into this frame's velocity and bill the boost
/// drain against the energy bank.
pub fn player_movement(
    time: Res<Time>,
    input: Res<FlightInput>,
    config: Res<GameConfig>,
    mut stats: ResMut<MatchStats>,
    mut query: Query<(&Player, &mut Velocity, &mut Transform)>,
) {
    let Ok((player, mut velocity, mut transform)) = query.single_mut() else {
        return;
    };

    let steering = input.is_steering();
    let speed = lateral_speed(player.stats, &config, input.boost, steering, stats.energy);

    velocity.linvel = Vec3::new(
        input.axis.x * speed,
        input.axis.y * speed,
        -config.forward_scroll_speed,
    );

    if input.boost && steering && stats.energy > 0.0 {
        stats.drain_energy(config.boost_energy_drain * time.delta_secs());
    }

    // Bank into the turn; purely cosmetic.
    let target_roll = -input.axis.x * 0.35;
    let current = transform.rotation;
    let target = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)
        * Quat::from_rotation_y(target_roll);
    transform.rotation = current.slerp(target, (time.delta_secs() * 8.0).min(1.0));
}

/// Keep the hull inside the arena rectangle. Z is never clamped; forward
/// travel is unbounded.
pub fn clamp_to_arena(config: Res<GameConfig>, mut query: Query<&mut Transform, With<Player>>) {
    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    transform.translation.x = transform
        .translation
        .x
        .clamp(-config.arena_half_width, config.arena_half_width);
    transform.translation.y = transform
        .translation
        .y
        .clamp(-config.arena_half_height, config.arena_half_height);
}

/// Fire one round per weapon mount whenever the trigger is held and the
/// cooldown has lapsed. Holding the key gives the maximum sustained rate.
pub fn player_fire(
    mut commands: Commands,
    time: Res<Time>,
    input: Res<FlightInput>,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(&Player, &Transform, &mut FireCooldown)>,
) {
    let Ok((player, transform, mut cooldown)) = query.single_mut() else {
        return;
    };

    cooldown.0 = (cooldown.0 - time.delta_secs()).max(0.0);
    if !input.fire || cooldown.0 > 0.0 {
        return;
    }
    cooldown.0 = config.fire_cooldown_secs;

    let weapon = &player.stats.weapon;
    for &mount in weapon.mounts {
        spawn_player_round(
            &mut commands,
            &mut meshes,
            &mut materials,
            transform.translation + mount,
            weapon,
            player.stats.color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn base_lateral_speed_scales_with_maneuverability() {
        let stats = ShipArchetype::Interceptor.stats();
        let speed = lateral_speed(stats, &config(), false, true, 50.0);
        assert!((speed - 85.0 * 0.18).abs() < 1e-5);
    }

    #[test]
    fn boost_needs_key_steering_and_energy() {
        let stats = ShipArchetype::Interceptor.stats();
        let cfg = config();
        let base = lateral_speed(stats, &cfg, false, true, 50.0);

        // All three conditions met: multiplied.
        let boosted = lateral_speed(stats, &cfg, true, true, 50.0);
        assert!((boosted - base * 60.0 * 0.08).abs() < 1e-3);

        // Missing any one condition: base speed.
        assert_eq!(lateral_speed(stats, &cfg, true, false, 50.0), base);
        assert_eq!(lateral_speed(stats, &cfg, true, true, 0.0), base);
        assert_eq!(lateral_speed(stats, &cfg, false, true, 50.0), base);
    }

    #[test]
    fn held_trigger_respects_the_cooldown() {
        use crate::projectile::PlayerRound;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<GameConfig>();
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<StandardMaterial>>();
        app.insert_resource(FlightInput { fire: true, ..default() });
        app.add_systems(Update, player_fire);

        app.world_mut().spawn((
            Player { stats: ShipArchetype::Dreadnought.stats() },
            FireCooldown::default(),
            Transform::default(),
        ));

        // First frame: one round per wing mount. Immediately after, the
        // cooldown is armed, so back-to-back frames add nothing.
        app.update();
        app.update();
        app.update();

        let mut rounds = app.world_mut().query::<&PlayerRound>();
        assert_eq!(rounds.iter(app.world()).count(), 2);
    }

    #[test]
    fn trigger_is_live_again_once_the_cooldown_lapses() {
        use crate::projectile::PlayerRound;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<GameConfig>();
        app.init_resource::<Assets<Mesh>>();
        app.init_resource::<Assets<StandardMaterial>>();
        app.insert_resource(FlightInput { fire: true, ..default() });
        app.add_systems(Update, player_fire);

        let ship = app
            .world_mut()
            .spawn((
                Player { stats: ShipArchetype::Interceptor.stats() },
                FireCooldown::default(),
                Transform::default(),
            ))
            .id();

        // First pull fires one round and arms the cooldown.
        app.update();

        // Lapse the cooldown as 250 ms of wall time would, then pull again.
        app.world_mut()
            .entity_mut(ship)
            .get_mut::<FireCooldown>()
            .unwrap()
            .0 = 0.0;
        app.update();

        let mut rounds = app.world_mut().query::<&PlayerRound>();
        assert_eq!(rounds.iter(app.world()).count(), 2);
    }

    #[test]
    fn dreadnought_boosts_hardest() {
        let cfg = config();
        let dn = lateral_speed(ShipArchetype::Dreadnought.stats(), &cfg, true, true, 1.0);
        let ic = lateral_speed(ShipArchetype::Interceptor.stats(), &cfg, true, true, 1.0);
        assert!(dn > ic);
    }
}
