//! Space Fleet combat client
//!
//! Real-time endless-runner space combat over an on-chain fleet: hulls are
//! owned tokens, match results are submitted fire-and-forget, and everything
//! between launch and game-over is a local 60 Hz simulation.

use bevy::prelude::*;

pub mod asteroid;
pub mod camera_rig;
pub mod chain;
pub mod combat;
pub mod config;
pub mod constants;
pub mod effects;
pub mod enemy;
pub mod error;
pub mod hud;
pub mod input;
pub mod menu;
pub mod pickups;
pub mod player;
pub mod projectile;
pub mod session;
pub mod ship;
pub mod spawner;
pub mod wave;

use session::GameState;

/// Everything except the window/renderer and the physics plugin, which the
/// binary adds. Headless tests can mount this on `MinimalPlugins`.
pub struct SpaceFleetPlugin;

impl Plugin for SpaceFleetPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .insert_resource(config::GameConfig::default())
            .insert_resource(input::FlightInput::default())
            .insert_resource(session::MatchStats::default())
            .insert_resource(session::PracticeMode::default())
            .insert_resource(session::ActiveTournament::default())
            .insert_resource(spawner::SpawnDirector::default())
            .insert_resource(wave::WaveTimer::default())
            .insert_resource(camera_rig::ShakeState::default())
            .insert_resource(ship::FleetRoster::default())
            .insert_resource(ship::SelectedShip::default())
            .add_message::<camera_rig::ImpactShake>()
            .add_message::<effects::ExplosionBurst>()
            .add_plugins(chain::ChainPlugin)
            .add_systems(
                Startup,
                (
                    // Load config first so every other startup system sees the
                    // final values.
                    config::load_game_config,
                    camera_rig::setup_camera.after(config::load_game_config),
                ),
            )
            // ── Hangar ────────────────────────────────────────────────────
            .add_systems(OnEnter(GameState::MainMenu), menu::setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), menu::cleanup_main_menu)
            .add_systems(
                Update,
                (
                    menu::ship_card_interactions,
                    menu::stake_button_interactions,
                    menu::launch_button_interaction,
                    menu::practice_toggle_interaction,
                    menu::refresh_ship_cards,
                    menu::update_notice_text,
                )
                    .run_if(in_state(GameState::MainMenu)),
            )
            // ── Match setup / teardown ────────────────────────────────────
            .add_systems(
                OnEnter(GameState::Playing),
                (
                    session::begin_match,
                    player::spawn_player,
                    spawner::reset_spawn_director,
                    wave::reset_wave_timer,
                    effects::spawn_starfield,
                    hud::setup_hud,
                )
                    .chain(),
            )
            .add_systems(
                OnExit(GameState::Playing),
                (session::end_match, hud::cleanup_hud),
            )
            // ── Flight loop ───────────────────────────────────────────────
            .add_systems(
                Update,
                (
                    input::sample_flight_input,
                    player::player_movement,
                    player::player_fire,
                    spawner::run_spawn_director,
                    enemy::enemy_fire,
                    wave::track_waves,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    asteroid::tumble_asteroids,
                    pickups::home_health_pickups,
                    pickups::spin_pickups,
                    effects::spawn_explosion_debris,
                    effects::decay_debris,
                    effects::recycle_starfield,
                    camera_rig::absorb_impacts,
                    camera_rig::draw_scope,
                    hud::update_hud,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            // ── Resolution, after motion has integrated ───────────────────
            .add_systems(
                PostUpdate,
                (
                    player::clamp_to_arena,
                    combat::resolve_player_rounds,
                    combat::resolve_enemy_rounds,
                    combat::resolve_hull_contact,
                    combat::collect_pickups,
                    combat::cull_passed_entities,
                    projectile::cull_rounds,
                    session::check_game_over,
                    camera_rig::follow_player,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            // ── Game over ─────────────────────────────────────────────────
            .add_systems(OnEnter(GameState::GameOver), menu::setup_game_over)
            .add_systems(OnExit(GameState::GameOver), menu::cleanup_game_over)
            .add_systems(
                Update,
                menu::game_over_interactions.run_if(in_state(GameState::GameOver)),
            );
    }
}
