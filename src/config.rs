//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the balance constants in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.spawn_interval_start`, `config.enemy_contact_damage`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable combat and balance configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/game.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena Bounds ─────────────────────────────────────────────────────────
    pub arena_half_width: f32,
    pub arena_half_height: f32,

    // ── Ship Controller ──────────────────────────────────────────────────────
    pub forward_scroll_speed: f32,
    pub move_speed_per_maneuver: f32,
    pub boost_factor_per_capacity: f32,
    pub boost_energy_drain: f32,
    pub fire_cooldown_secs: f32,

    // ── Spawner ──────────────────────────────────────────────────────────────
    pub spawn_interval_start: f32,
    pub spawn_interval_floor: f32,
    pub spawn_interval_decrement: f32,
    pub asteroid_spawn_chance: f64,
    pub resource_spawn_chance: f64,
    pub enemy_spawn_failsafe_secs: f32,
    pub health_pickup_interval_secs: f32,

    // ── Transient Entities ───────────────────────────────────────────────────
    pub enemy_health: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub asteroid_health: f32,
    pub asteroid_drift_speed: f32,
    pub resource_drift_speed: f32,
    pub health_pickup_approach_speed: f32,
    pub cull_behind_distance: f32,
    pub projectile_cull_distance: f32,

    // ── Enemy Fire ───────────────────────────────────────────────────────────
    pub enemy_fire_cooldown_secs: f32,
    pub enemy_fire_rate_per_sec: f64,
    pub enemy_fire_ahead_margin: f32,
    pub enemy_projectile_speed: f32,
    pub enemy_projectile_damage: f32,

    // ── Collision Radii ──────────────────────────────────────────────────────
    pub hit_radius_projectile_enemy: f32,
    pub hit_radius_projectile_asteroid: f32,
    pub hit_radius_enemy_shot_player: f32,
    pub contact_radius_enemy_player: f32,
    pub contact_radius_asteroid_player: f32,
    pub pickup_radius: f32,

    // ── Damage & Scoring ─────────────────────────────────────────────────────
    pub enemy_contact_damage: f32,
    pub asteroid_contact_damage: f32,
    pub score_per_asteroid: u32,
    pub resource_score_value: u32,
    pub resource_energy_value: f32,
    pub health_pickup_heal_fraction: f32,

    // ── Wave Progression ─────────────────────────────────────────────────────
    pub wave_duration_secs: f32,

    // ── Camera & Scope ───────────────────────────────────────────────────────
    pub camera_offset_y: f32,
    pub camera_offset_z: f32,
    pub shake_frames_per_intensity: u32,
    pub shake_jitter_per_intensity: f32,
    pub scope_max_range: f32,
    pub scope_band_close: f32,
    pub scope_band_mid: f32,
    pub scope_band_far: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Arena Bounds
            arena_half_width: ARENA_HALF_WIDTH,
            arena_half_height: ARENA_HALF_HEIGHT,
            // Ship Controller
            forward_scroll_speed: FORWARD_SCROLL_SPEED,
            move_speed_per_maneuver: MOVE_SPEED_PER_MANEUVER,
            boost_factor_per_capacity: BOOST_FACTOR_PER_CAPACITY,
            boost_energy_drain: BOOST_ENERGY_DRAIN,
            fire_cooldown_secs: FIRE_COOLDOWN_SECS,
            // Spawner
            spawn_interval_start: SPAWN_INTERVAL_START,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
            spawn_interval_decrement: SPAWN_INTERVAL_DECREMENT,
            asteroid_spawn_chance: ASTEROID_SPAWN_CHANCE,
            resource_spawn_chance: RESOURCE_SPAWN_CHANCE,
            enemy_spawn_failsafe_secs: ENEMY_SPAWN_FAILSAFE_SECS,
            health_pickup_interval_secs: HEALTH_PICKUP_INTERVAL_SECS,
            // Transient Entities
            enemy_health: ENEMY_HEALTH,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            asteroid_health: ASTEROID_HEALTH,
            asteroid_drift_speed: ASTEROID_DRIFT_SPEED,
            resource_drift_speed: RESOURCE_DRIFT_SPEED,
            health_pickup_approach_speed: HEALTH_PICKUP_APPROACH_SPEED,
            cull_behind_distance: CULL_BEHIND_DISTANCE,
            projectile_cull_distance: PROJECTILE_CULL_DISTANCE,
            // Enemy Fire
            enemy_fire_cooldown_secs: ENEMY_FIRE_COOLDOWN_SECS,
            enemy_fire_rate_per_sec: ENEMY_FIRE_RATE_PER_SEC,
            enemy_fire_ahead_margin: ENEMY_FIRE_AHEAD_MARGIN,
            enemy_projectile_speed: ENEMY_PROJECTILE_SPEED,
            enemy_projectile_damage: ENEMY_PROJECTILE_DAMAGE,
            // Collision Radii
            hit_radius_projectile_enemy: HIT_RADIUS_PROJECTILE_ENEMY,
            hit_radius_projectile_asteroid: HIT_RADIUS_PROJECTILE_ASTEROID,
            hit_radius_enemy_shot_player: HIT_RADIUS_ENEMY_SHOT_PLAYER,
            contact_radius_enemy_player: CONTACT_RADIUS_ENEMY_PLAYER,
            contact_radius_asteroid_player: CONTACT_RADIUS_ASTEROID_PLAYER,
            pickup_radius: PICKUP_RADIUS,
            // Damage & Scoring
            enemy_contact_damage: ENEMY_CONTACT_DAMAGE,
            asteroid_contact_damage: ASTEROID_CONTACT_DAMAGE,
            score_per_asteroid: SCORE_PER_ASTEROID,
            resource_score_value: RESOURCE_SCORE_VALUE,
            resource_energy_value: RESOURCE_ENERGY_VALUE,
            health_pickup_heal_fraction: HEALTH_PICKUP_HEAL_FRACTION,
            // Wave Progression
            wave_duration_secs: WAVE_DURATION_SECS,
            // Camera & Scope
            camera_offset_y: CAMERA_OFFSET_Y,
            camera_offset_z: CAMERA_OFFSET_Z,
            shake_frames_per_intensity: SHAKE_FRAMES_PER_INTENSITY,
            shake_jitter_per_intensity: SHAKE_JITTER_PER_INTENSITY,
            scope_max_range: SCOPE_MAX_RANGE,
            scope_band_close: SCOPE_BAND_CLOSE,
            scope_band_mid: SCOPE_BAND_MID,
            scope_band_far: SCOPE_BAND_FAR,
        }
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are printed
/// to stderr but do not abort the game.  A missing file is silently ignored
/// (defaults are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("✓ Loaded game config from {path}");
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.spawn_interval_start, SPAWN_INTERVAL_START);
        assert_eq!(cfg.spawn_interval_floor, SPAWN_INTERVAL_FLOOR);
        assert_eq!(cfg.enemy_contact_damage, ENEMY_CONTACT_DAMAGE);
        assert_eq!(cfg.pickup_radius, PICKUP_RADIUS);
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let cfg: GameConfig = toml::from_str("spawn_interval_start = 1.25").unwrap();
        assert_eq!(cfg.spawn_interval_start, 1.25);
        assert_eq!(cfg.spawn_interval_floor, SPAWN_INTERVAL_FLOOR);
        assert_eq!(cfg.wave_duration_secs, WAVE_DURATION_SECS);
    }
}
