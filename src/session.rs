//! Match lifecycle: state machine, per-match counters, game-over handling.
//!
//! ```text
//! MainMenu ──launch──▶ Playing ──hull breach──▶ GameOver
//!    ▲                    ▲                        │
//!    │                    └────────restart─────────┤
//!    └───────────────────back to hangar────────────┘
//! ```
//!
//! [`MatchStats`] is the single authority for hull, energy, score, and the
//! kill counters. Combat systems mutate it through clamped helpers; the HUD
//! only reads it. Game-over fires exactly once per match: the first frame the
//! hull reaches zero emits one [`MatchResultReport`] (suppressed in practice
//! mode) and transitions the state, and the latch stays set until the next
//! launch reinitialises everything.

use bevy::prelude::*;

use crate::chain::{ActiveMatchShip, MatchResult, MatchResultReport};
use crate::error::GameError;
use crate::ship::{ArchetypeStats, SelectedShip};

// ── States & markers ──────────────────────────────────────────────────────────

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    GameOver,
}

/// Marker on every entity spawned for the duration of one match. All of them
/// are despawned when `Playing` is left, so a restart starts from nothing.
#[derive(Component)]
pub struct MatchEntity;

/// When set, match results are kept local and never submitted on-chain.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PracticeMode(pub bool);

/// Tournament the current match is entered in, if any. `None` submits with
/// tournament id zero.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ActiveTournament(pub Option<u64>);

// ── Match stats ───────────────────────────────────────────────────────────────

/// Live counters for the match in progress.
#[derive(Resource, Debug, Clone)]
pub struct MatchStats {
    pub health: f32,
    pub max_health: f32,
    pub energy: f32,
    pub max_energy: f32,
    pub score: u32,
    pub enemies_destroyed: u32,
    pub asteroids_destroyed: u32,
    pub resources_collected: u32,
    pub wave: u32,
    game_over_fired: bool,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self {
            health: 100.0,
            max_health: 100.0,
            energy: 50.0,
            max_energy: 50.0,
            score: 0,
            enemies_destroyed: 0,
            asteroids_destroyed: 0,
            resources_collected: 0,
            wave: 1,
            game_over_fired: false,
        }
    }
}

impl MatchStats {
    /// Fresh stats for a match start, caps taken from the hull's archetype.
    pub fn for_archetype(stats: &ArchetypeStats) -> Self {
        Self {
            health: stats.max_health,
            max_health: stats.max_health,
            energy: stats.max_energy,
            max_energy: stats.max_energy,
            ..Self::default()
        }
    }

    /// Apply hull damage, clamped at zero.
    pub fn damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Heal by a fraction of *current* health, floored to a whole point and
    /// clamped to the cap. Healing at full health is a no-op.
    pub fn heal_fraction(&mut self, fraction: f32) {
        let amount = (self.health * fraction).floor();
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Restore energy, clamped to the cap.
    pub fn add_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(self.max_energy);
    }

    /// Drain energy, clamped at zero.
    pub fn drain_energy(&mut self, amount: f32) {
        self.energy = (self.energy - amount).max(0.0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}

// ── Lifecycle systems ─────────────────────────────────────────────────────────

/// `OnEnter(Playing)`: validate the selection and reinitialise all per-match
/// state. An invalid selection bounces straight back to the menu with no
/// partial state left behind.
pub fn begin_match(
    selected: Res<SelectedShip>,
    mut stats: ResMut<MatchStats>,
    mut active: ResMut<ActiveMatchShip>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let ship = match selected.0.as_ref() {
        Some(ship) => ship,
        None => {
            warn!("{}", GameError::NoShipSelected);
            next_state.set(GameState::MainMenu);
            return;
        }
    };
    if ship.staked {
        warn!("{}", GameError::ShipStaked { ship_id: ship.id });
        next_state.set(GameState::MainMenu);
        return;
    }

    *stats = MatchStats::for_archetype(ship.archetype.stats());
    active.0 = Some(ship.id);
    eprintln!(
        "[MATCH] Launching ship #{} ({})",
        ship.id,
        ship.archetype.name()
    );
}

/// `OnExit(Playing)`: tear down every match entity and release the in-match
/// ship so it can be staked again.
pub fn end_match(
    mut commands: Commands,
    mut active: ResMut<ActiveMatchShip>,
    entities: Query<Entity, With<MatchEntity>>,
) {
    for entity in &entities {
        commands.entity(entity).despawn();
    }
    active.0 = None;
}

/// Runs after damage resolution: the first frame the hull reads zero, emit
/// the final-counter snapshot and move to `GameOver`. The latch guarantees a
/// single report even if the transition takes a frame to apply.
pub fn check_game_over(
    mut stats: ResMut<MatchStats>,
    active: Res<ActiveMatchShip>,
    practice: Res<PracticeMode>,
    tournament: Res<ActiveTournament>,
    mut reports: MessageWriter<MatchResultReport>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !stats.is_destroyed() || stats.game_over_fired {
        return;
    }
    stats.game_over_fired = true;

    if let Some(ship_id) = active.0 {
        if practice.0 {
            info!("practice match over, score {} (not submitted)", stats.score);
        } else {
            reports.write(MatchResultReport(MatchResult {
                ship_id,
                score: stats.score,
                enemies_destroyed: stats.enemies_destroyed,
                asteroids_destroyed: stats.asteroids_destroyed,
                resources_collected: stats.resources_collected,
                tournament_id: tournament.0.unwrap_or(0),
            }));
        }
    }
    next_state.set(GameState::GameOver);
}
