//! Chase camera, impact shake, and the targeting scope overlay.
//!
//! The camera sits a fixed offset above and behind the hull and follows it
//! exactly; there is no smoothing on the follow itself, the world scroll is
//! already smooth. Impacts enqueue shake through [`ImpactShake`] messages:
//! intensity converts to a frame budget and a jitter amplitude, and while the
//! budget lasts the camera is displaced around its follow position by a fresh
//! random offset each frame, the amplitude tapering toward zero as the
//! budget drains.
//!
//! Scoped hulls get a range readout drawn with gizmos: a line from the ship
//! to the nearest fighter in range, coloured by distance band.

use bevy::prelude::*;
use rand::Rng;

use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::player::Player;

/// One impact worth of camera shake.
#[derive(Message, Debug, Clone, Copy)]
pub struct ImpactShake {
    /// 1.0 for a round hit; heavier collisions send more.
    pub intensity: f32,
}

/// Remaining shake budget. Refreshed, not stacked, by new impacts.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ShakeState {
    pub frames_left: u32,
    /// Frame budget of the strongest impact currently decaying; the live
    /// amplitude is `jitter × frames_left / total_frames`.
    pub total_frames: u32,
    pub jitter: f32,
}

impl ShakeState {
    /// Displacement amplitude for the current frame.
    pub fn amplitude(&self) -> f32 {
        if self.total_frames == 0 {
            0.0
        } else {
            self.jitter * self.frames_left as f32 / self.total_frames as f32
        }
    }
}

/// Startup: one camera for every state; menus render through it too.
pub fn setup_camera(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, config.camera_offset_y, config.camera_offset_z)
            .looking_at(Vec3::new(0.0, 0.0, -20.0), Vec3::Y),
    ));
    eprintln!("[SETUP] Camera rig ready");
}

/// Fold new impacts into the shake budget. A heavier hit replaces a lighter
/// tail rather than adding to it.
pub fn absorb_impacts(
    config: Res<GameConfig>,
    mut impacts: MessageReader<ImpactShake>,
    mut shake: ResMut<ShakeState>,
) {
    for impact in impacts.read() {
        let frames = (config.shake_frames_per_intensity as f32 * impact.intensity) as u32;
        let jitter = config.shake_jitter_per_intensity * impact.intensity;
        if frames > shake.frames_left {
            shake.frames_left = frames;
            shake.total_frames = frames;
        }
        shake.jitter = shake.jitter.max(jitter);
    }
}

/// Follow the hull at the fixed offset, plus the shake displacement.
pub fn follow_player(
    config: Res<GameConfig>,
    mut shake: ResMut<ShakeState>,
    player: Query<&Transform, With<Player>>,
    mut camera: Query<&mut Transform, (With<Camera3d>, Without<Player>)>,
) {
    let (Ok(player_tf), Ok(mut camera_tf)) = (player.single(), camera.single_mut()) else {
        return;
    };

    let mut target = player_tf.translation
        + Vec3::new(0.0, config.camera_offset_y, config.camera_offset_z);

    if shake.frames_left > 0 {
        let amplitude = shake.amplitude();
        if amplitude > 0.0 {
            let mut rng = rand::thread_rng();
            target += Vec3::new(
                rng.gen_range(-amplitude..amplitude),
                rng.gen_range(-amplitude..amplitude),
                0.0,
            );
        }
        shake.frames_left -= 1;
        if shake.frames_left == 0 {
            shake.jitter = 0.0;
            shake.total_frames = 0;
        }
    }

    camera_tf.translation = target;
    camera_tf.look_at(player_tf.translation + Vec3::new(0.0, 0.0, -20.0), Vec3::Y);
}

/// Colour for a scope readout at `distance`, or `None` beyond scope range.
pub fn scope_band_color(config: &GameConfig, distance: f32) -> Option<Color> {
    if distance > config.scope_max_range {
        return None;
    }
    Some(if distance < config.scope_band_close {
        Color::srgb(1.0, 0.2, 0.2)
    } else if distance < config.scope_band_mid {
        Color::srgb(1.0, 0.9, 0.2)
    } else if distance < config.scope_band_far {
        Color::srgb(0.3, 1.0, 0.3)
    } else {
        Color::srgb(0.3, 0.9, 1.0)
    })
}

/// Draw the scope line to the nearest fighter in range. Unscoped hulls skip
/// this entirely.
pub fn draw_scope(
    config: Res<GameConfig>,
    mut gizmos: Gizmos,
    player: Query<(&Transform, &Player)>,
    enemies: Query<&Transform, With<Enemy>>,
) {
    let Ok((player_tf, player)) = player.single() else {
        return;
    };
    if !player.stats.has_scope {
        return;
    }

    let at = player_tf.translation;
    let nearest = enemies
        .iter()
        .map(|tf| (tf.translation, at.distance(tf.translation)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((target, distance)) = nearest {
        if let Some(color) = scope_band_color(&config, distance) {
            gizmos.line(at, target, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_colors_step_with_distance() {
        let cfg = GameConfig::default();
        assert_eq!(scope_band_color(&cfg, 10.0), Some(Color::srgb(1.0, 0.2, 0.2)));
        assert_eq!(scope_band_color(&cfg, 20.0), Some(Color::srgb(1.0, 0.9, 0.2)));
        assert_eq!(scope_band_color(&cfg, 40.0), Some(Color::srgb(0.3, 1.0, 0.3)));
        assert_eq!(scope_band_color(&cfg, 55.0), Some(Color::srgb(0.3, 0.9, 1.0)));
        assert_eq!(scope_band_color(&cfg, 61.0), None);
    }

    #[test]
    fn impacts_refresh_the_shake_budget_without_stacking() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<GameConfig>();
        app.init_resource::<ShakeState>();
        app.add_message::<ImpactShake>();
        app.add_systems(Update, absorb_impacts);

        app.world_mut().write_message(ImpactShake { intensity: 1.0 });
        app.world_mut().write_message(ImpactShake { intensity: 2.0 });
        app.update();

        let shake = app.world().resource::<ShakeState>();
        assert_eq!(shake.frames_left, 20);
        assert!((shake.jitter - 1.0).abs() < 1e-5);

        // A lighter follow-up impact does not shorten the running shake.
        app.world_mut().write_message(ImpactShake { intensity: 0.5 });
        app.update();
        assert_eq!(app.world().resource::<ShakeState>().frames_left, 20);
    }

    #[test]
    fn shake_tapers_and_decays_to_rest() {
        use crate::ship::ShipArchetype;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<GameConfig>();
        app.insert_resource(ShakeState { frames_left: 3, total_frames: 3, jitter: 1.0 });
        app.add_systems(Update, follow_player);

        app.world_mut().spawn((
            Player { stats: ShipArchetype::Interceptor.stats() },
            Transform::from_xyz(2.0, -1.0, -40.0),
        ));
        let camera = app
            .world_mut()
            .spawn((Camera3d::default(), Transform::default()))
            .id();

        // Amplitude shrinks as the budget drains.
        let first = app.world().resource::<ShakeState>().amplitude();
        app.update();
        let second = app.world().resource::<ShakeState>().amplitude();
        assert!(second < first);

        // A few more frames exhaust the budget completely.
        app.update();
        app.update();
        let shake = *app.world().resource::<ShakeState>();
        assert_eq!(shake.frames_left, 0);
        assert_eq!(shake.jitter, 0.0);
        assert_eq!(shake.amplitude(), 0.0);

        // At rest the camera sits exactly on the follow offset.
        app.update();
        let cfg = GameConfig::default();
        let camera_tf = app.world().entity(camera).get::<Transform>().unwrap();
        assert_eq!(
            camera_tf.translation,
            Vec3::new(2.0, -1.0 + cfg.camera_offset_y, -40.0 + cfg.camera_offset_z)
        );
    }
}
