//! Wave spawn director.
//!
//! One countdown drives the main spawn cadence: every lapse produces an enemy
//! and independently rolls an asteroid and a resource crystal. Two side
//! timers run alongside it: a failsafe that force-spawns an enemy when the
//! arena has been empty too long, and a slow clock for health pickups.
//!
//! The director owns the current interval; the wave tracker tightens it at
//! each wave threshold down to a hard floor. All spawn positions are relative
//! to the player, ahead on −Z, so the pipeline never runs dry no matter how
//! far the ship has travelled.

use bevy::prelude::*;
use rand::Rng;

use crate::asteroid::spawn_asteroid;
use crate::config::GameConfig;
use crate::constants::*;
use crate::enemy::{spawn_enemy, Enemy};
use crate::pickups::{spawn_health_pickup, spawn_resource};
use crate::player::Player;

/// What one frame of director bookkeeping decided to spawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTick {
    /// Regular cadence lapsed: spawn an enemy and roll the extras.
    pub wave_tick: bool,
    /// Arena empty too long: force one enemy regardless of cadence.
    pub failsafe_enemy: bool,
    pub health_pickup: bool,
}

/// Countdown state for all spawn cadences.
#[derive(Resource, Debug, Clone)]
pub struct SpawnDirector {
    /// Current seconds between wave ticks.
    pub interval: f32,
    tick_remaining: f32,
    since_enemy: f32,
    health_remaining: f32,
}

impl SpawnDirector {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            interval: config.spawn_interval_start,
            tick_remaining: config.spawn_interval_start,
            since_enemy: 0.0,
            health_remaining: config.health_pickup_interval_secs,
        }
    }

    /// Advance all countdowns by `dt` and report what to spawn this frame.
    pub fn advance(&mut self, dt: f32, config: &GameConfig, enemies_alive: bool) -> SpawnTick {
        let mut tick = SpawnTick::default();

        self.tick_remaining -= dt;
        if self.tick_remaining <= 0.0 {
            self.tick_remaining = self.interval;
            self.since_enemy = 0.0;
            tick.wave_tick = true;
        } else {
            self.since_enemy += dt;
            if !enemies_alive && self.since_enemy >= config.enemy_spawn_failsafe_secs {
                self.since_enemy = 0.0;
                tick.failsafe_enemy = true;
            }
        }

        self.health_remaining -= dt;
        if self.health_remaining <= 0.0 {
            self.health_remaining = config.health_pickup_interval_secs;
            tick.health_pickup = true;
        }

        tick
    }

    /// Shorten the wave cadence by one decrement, never below the floor.
    pub fn tighten(&mut self, config: &GameConfig) {
        self.interval = (self.interval - config.spawn_interval_decrement)
            .max(config.spawn_interval_floor);
    }
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

/// Roll a spawn point relative to the player: uniform inside the X/Y span,
/// a rolled distance ahead on −Z.
fn spawn_point(
    rng: &mut impl Rng,
    player: Vec3,
    spread_x: f32,
    spread_y: f32,
    ahead_min: f32,
    ahead_max: f32,
) -> Vec3 {
    let ahead = if ahead_min < ahead_max {
        rng.gen_range(ahead_min..ahead_max)
    } else {
        ahead_min
    };
    player
        + Vec3::new(
            rng.gen_range(-spread_x / 2.0..spread_x / 2.0),
            rng.gen_range(-spread_y / 2.0..spread_y / 2.0),
            -ahead,
        )
}

/// `OnEnter(Playing)`: reset all cadences to their starting values.
pub fn reset_spawn_director(config: Res<GameConfig>, mut director: ResMut<SpawnDirector>) {
    *director = SpawnDirector::new(&config);
}

/// Per-frame director: advance the countdowns and materialise whatever they
/// decided on.
#[allow(clippy::too_many_arguments)]
pub fn run_spawn_director(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut director: ResMut<SpawnDirector>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    player: Query<&Transform, With<Player>>,
    enemies: Query<(), With<Enemy>>,
) {
    let Ok(player_tf) = player.single() else {
        return;
    };
    let at = player_tf.translation;
    let tick = director.advance(time.delta_secs(), &config, !enemies.is_empty());
    let mut rng = rand::thread_rng();

    if tick.wave_tick || tick.failsafe_enemy {
        let pos = spawn_point(
            &mut rng,
            at,
            ENEMY_SPREAD_X,
            ENEMY_SPREAD_Y,
            ENEMY_AHEAD_MIN,
            ENEMY_AHEAD_MAX,
        );
        spawn_enemy(&mut commands, &mut meshes, &mut materials, &config, pos);
    }

    if tick.wave_tick {
        if rng.gen_bool(config.asteroid_spawn_chance) {
            let pos = spawn_point(
                &mut rng,
                at,
                ASTEROID_SPREAD_X,
                ASTEROID_SPREAD_Y,
                ASTEROID_AHEAD_MIN,
                ASTEROID_AHEAD_MAX,
            );
            spawn_asteroid(&mut commands, &mut meshes, &mut materials, &config, pos);
        }
        if rng.gen_bool(config.resource_spawn_chance) {
            let pos = spawn_point(
                &mut rng,
                at,
                RESOURCE_SPREAD_X,
                RESOURCE_SPREAD_Y,
                RESOURCE_AHEAD_MIN,
                RESOURCE_AHEAD_MAX,
            );
            spawn_resource(&mut commands, &mut meshes, &mut materials, &config, pos);
        }
    }

    if tick.health_pickup {
        let pos = spawn_point(
            &mut rng,
            at,
            HEALTH_PICKUP_SPREAD_X,
            HEALTH_PICKUP_SPREAD_Y,
            HEALTH_PICKUP_AHEAD,
            HEALTH_PICKUP_AHEAD,
        );
        spawn_health_pickup(&mut commands, &mut meshes, &mut materials, pos);
    }
}
