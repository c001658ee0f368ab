//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! Per-frame quantities from the original balance pass have been normalised
//! to per-second units assuming the 60 Hz reference frame.
//!
//! Runtime overrides are possible through `assets/game.toml`; see
//! [`crate::config::GameConfig`], which mirrors the balance values below.
//! Spawn spreads are compile-time only.

// ── Arena Bounds ──────────────────────────────────────────────────────────────

/// Half-width of the playable rectangle on the X axis (world units).
///
/// The ship is clamped per-axis; enemies and pickups may spawn slightly
/// outside so the edges never feel empty.
pub const ARENA_HALF_WIDTH: f32 = 35.0;

/// Half-height of the playable rectangle on the Y axis (world units).
pub const ARENA_HALF_HEIGHT: f32 = 25.0;

// ── Ship Controller ───────────────────────────────────────────────────────────

/// Unconditional forward scroll speed (u/s, −Z). The world streams toward the
/// player regardless of input.
pub const FORWARD_SCROLL_SPEED: f32 = 3.0;

/// Lateral speed contributed per point of archetype maneuverability (u/s).
/// An 85-maneuverability Interceptor strafes at 15.3 u/s unboosted.
pub const MOVE_SPEED_PER_MANEUVER: f32 = 0.18;

/// Boost speed multiplier contributed per point of archetype boost capacity.
/// Applied only while the boost key is held, the ship is moving, and energy
/// is above zero.
pub const BOOST_FACTOR_PER_CAPACITY: f32 = 0.08;

/// Energy drained per second while boosting and moving.
pub const BOOST_ENERGY_DRAIN: f32 = 18.0;

/// Seconds between two consecutive player shots.
pub const FIRE_COOLDOWN_SECS: f32 = 0.2;

// ── Spawner ───────────────────────────────────────────────────────────────────

/// Starting interval between spawner ticks (seconds). Each wave crossing
/// shortens this by [`SPAWN_INTERVAL_DECREMENT`].
pub const SPAWN_INTERVAL_START: f32 = 2.0;

/// Hard floor for the spawn interval; difficulty stops ramping here.
pub const SPAWN_INTERVAL_FLOOR: f32 = 0.5;

/// Seconds removed from the spawn interval at each wave threshold.
pub const SPAWN_INTERVAL_DECREMENT: f32 = 0.05;

/// Probability that a spawner tick also produces an asteroid.
pub const ASTEROID_SPAWN_CHANCE: f64 = 0.15;

/// Probability that a spawner tick also produces a resource crystal.
pub const RESOURCE_SPAWN_CHANCE: f64 = 0.05;

/// If no enemies are alive and this long has passed since the last spawner
/// tick, one enemy is force-spawned so the arena never goes empty.
pub const ENEMY_SPAWN_FAILSAFE_SECS: f32 = 5.0;

/// Seconds between health pickup spawns (independent of the spawner tick).
pub const HEALTH_PICKUP_INTERVAL_SECS: f32 = 60.0;

/// Spawn spreads, relative to the player's position. X/Y values are full
/// spans (offset is uniform in ±span/2); `AHEAD` values are −Z distances.
pub const ENEMY_SPREAD_X: f32 = 30.0;
pub const ENEMY_SPREAD_Y: f32 = 20.0;
pub const ENEMY_AHEAD_MIN: f32 = 90.0;
pub const ENEMY_AHEAD_MAX: f32 = 110.0;
pub const ASTEROID_SPREAD_X: f32 = 25.0;
pub const ASTEROID_SPREAD_Y: f32 = 18.0;
pub const ASTEROID_AHEAD_MIN: f32 = 70.0;
pub const ASTEROID_AHEAD_MAX: f32 = 100.0;
pub const RESOURCE_SPREAD_X: f32 = 35.0;
pub const RESOURCE_SPREAD_Y: f32 = 25.0;
pub const RESOURCE_AHEAD_MIN: f32 = 60.0;
pub const RESOURCE_AHEAD_MAX: f32 = 85.0;
pub const HEALTH_PICKUP_SPREAD_X: f32 = 10.0;
pub const HEALTH_PICKUP_SPREAD_Y: f32 = 8.0;
pub const HEALTH_PICKUP_AHEAD: f32 = 80.0;

// ── Transient Entities ────────────────────────────────────────────────────────

/// Enemy hull integrity; an Interceptor needs three hits to kill.
pub const ENEMY_HEALTH: f32 = 3.0;

/// Minimum / maximum closing speed rolled per enemy at spawn (u/s, +Z).
pub const ENEMY_SPEED_MIN: f32 = 2.4;
pub const ENEMY_SPEED_MAX: f32 = 3.6;

/// Asteroid hull integrity.
pub const ASTEROID_HEALTH: f32 = 2.0;

/// Constant asteroid drift speed toward the player (u/s, +Z).
pub const ASTEROID_DRIFT_SPEED: f32 = 4.2;

/// Resource crystal drift speed toward the player (u/s, +Z).
pub const RESOURCE_DRIFT_SPEED: f32 = 3.0;

/// Health pickups home toward the player at this speed (u/s).
pub const HEALTH_PICKUP_APPROACH_SPEED: f32 = 1.8;

/// Transient entities further than this behind the player are culled.
pub const CULL_BEHIND_DISTANCE: f32 = 50.0;

/// Projectiles beyond this Z distance from the player (either direction)
/// are culled. Wider than the entity cull because rounds outrun the ship.
pub const PROJECTILE_CULL_DISTANCE: f32 = 60.0;

// ── Enemy Fire ────────────────────────────────────────────────────────────────

/// Per-enemy minimum interval between shots (seconds).
pub const ENEMY_FIRE_COOLDOWN_SECS: f32 = 2.0;

/// Poisson-style fire rate: probability mass per second that an eligible
/// enemy squeezes off a shot (applied as `rate × dt` per frame).
pub const ENEMY_FIRE_RATE_PER_SEC: f64 = 0.9;

/// Enemies only fire while more than this far ahead of the player (−Z).
pub const ENEMY_FIRE_AHEAD_MARGIN: f32 = 5.0;

/// Speed of an aimed enemy round (u/s).
pub const ENEMY_PROJECTILE_SPEED: f32 = 9.0;

/// Damage an enemy round deals to the player.
pub const ENEMY_PROJECTILE_DAMAGE: f32 = 10.0;

// ── Collision Radii ───────────────────────────────────────────────────────────
//
// Proximity thresholds per entity-type pair (centre-to-centre, world units).

pub const HIT_RADIUS_PROJECTILE_ENEMY: f32 = 2.5;
pub const HIT_RADIUS_PROJECTILE_ASTEROID: f32 = 2.8;
pub const HIT_RADIUS_ENEMY_SHOT_PLAYER: f32 = 1.0;
pub const CONTACT_RADIUS_ENEMY_PLAYER: f32 = 3.0;
pub const CONTACT_RADIUS_ASTEROID_PLAYER: f32 = 1.5;
pub const PICKUP_RADIUS: f32 = 1.5;

// ── Damage & Scoring ──────────────────────────────────────────────────────────

/// Hull damage from ramming an enemy. The enemy is destroyed too.
pub const ENEMY_CONTACT_DAMAGE: f32 = 15.0;

/// Hull damage from striking an asteroid. The asteroid is destroyed too.
pub const ASTEROID_CONTACT_DAMAGE: f32 = 20.0;

/// Score for destroying an asteroid (flat; no archetype bonus).
pub const SCORE_PER_ASTEROID: u32 = 50;

/// Score granted when a resource crystal is collected.
pub const RESOURCE_SCORE_VALUE: u32 = 10;

/// Energy restored when a resource crystal is collected (clamped to cap).
pub const RESOURCE_ENERGY_VALUE: f32 = 5.0;

/// Fraction of *current* health restored by a health pickup, floored, then
/// clamped to the archetype cap.
pub const HEALTH_PICKUP_HEAL_FRACTION: f32 = 0.5;

// ── Wave Progression ──────────────────────────────────────────────────────────

/// Seconds per difficulty wave. Crossing the threshold increments the wave
/// counter and tightens the spawn interval.
pub const WAVE_DURATION_SECS: f32 = 30.0;

// ── Camera & Scope ────────────────────────────────────────────────────────────

/// Camera offset above and behind the player (world units).
pub const CAMERA_OFFSET_Y: f32 = 5.0;
pub const CAMERA_OFFSET_Z: f32 = 10.0;

/// Base number of shake frames scheduled per unit of hit intensity.
pub const SHAKE_FRAMES_PER_INTENSITY: u32 = 10;

/// Base positional jitter per unit of hit intensity (world units).
pub const SHAKE_JITTER_PER_INTENSITY: f32 = 0.5;

/// Maximum range of the targeting scope (scoped archetypes only).
pub const SCOPE_MAX_RANGE: f32 = 60.0;

/// Discrete scope distance bands: closer is hotter.
pub const SCOPE_BAND_CLOSE: f32 = 15.0;
pub const SCOPE_BAND_MID: f32 = 30.0;
pub const SCOPE_BAND_FAR: f32 = 50.0;
