//! Difficulty progression.
//!
//! Waves are pure elapsed time: every full wave duration increments the wave
//! counter and tightens the spawn cadence by one decrement. Nothing else
//! scales with the wave number; density does all the work.

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::session::MatchStats;
use crate::spawner::SpawnDirector;

/// Time into the current wave.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct WaveTimer {
    pub elapsed: f32,
}

/// `OnEnter(Playing)`: start over from wave one.
pub fn reset_wave_timer(mut timer: ResMut<WaveTimer>) {
    timer.elapsed = 0.0;
}

/// Tick the wave clock and apply each threshold crossing.
///
/// The loop handles pathological frame spikes that cross more than one
/// threshold at once; each crossing tightens the cadence separately.
pub fn track_waves(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut timer: ResMut<WaveTimer>,
    mut stats: ResMut<MatchStats>,
    mut director: ResMut<SpawnDirector>,
) {
    timer.elapsed += time.delta_secs();
    while timer.elapsed >= config.wave_duration_secs {
        timer.elapsed -= config.wave_duration_secs;
        stats.wave += 1;
        director.tighten(&config);
        info!("wave {} (spawn interval {:.2}s)", stats.wave, director.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_seconds_per_wave() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<GameConfig>();
        app.init_resource::<WaveTimer>();
        app.init_resource::<MatchStats>();
        app.init_resource::<SpawnDirector>();
        app.add_systems(Update, track_waves);

        // Drive the clock by hand past the first threshold.
        app.world_mut().resource_mut::<WaveTimer>().elapsed = 29.0;
        app.update();
        app.world_mut().resource_mut::<WaveTimer>().elapsed = 30.5;
        app.update();

        let stats = app.world().resource::<MatchStats>();
        assert!(stats.wave >= 2);
        let director = app.world().resource::<SpawnDirector>();
        assert!(director.interval < GameConfig::default().spawn_interval_start);
    }

    #[test]
    fn frame_spike_crossing_two_thresholds_applies_both() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<GameConfig>();
        app.init_resource::<MatchStats>();
        app.init_resource::<SpawnDirector>();
        app.insert_resource(WaveTimer { elapsed: 65.0 });
        app.add_systems(Update, track_waves);

        app.update();

        let stats = app.world().resource::<MatchStats>();
        assert_eq!(stats.wave, 3); // started at 1, crossed twice
        let timer = app.world().resource::<WaveTimer>();
        assert!(timer.elapsed < 30.0);
        let expected = GameConfig::default().spawn_interval_start
            - 2.0 * GameConfig::default().spawn_interval_decrement;
        let director = app.world().resource::<SpawnDirector>();
        assert!((director.interval - expected).abs() < 1e-5);
    }
}
