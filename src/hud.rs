//! In-match HUD: hull and energy bars, score, wave, kill counters.
//!
//! The HUD is a read-only projection of [`MatchStats`]; nothing here writes
//! game state. Bars are nested nodes whose fill width tracks the stat as a
//! percentage, text lines are rewritten every frame. The whole tree is
//! despawned on `OnExit(Playing)`.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use crate::session::MatchStats;

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HullBarFill;

#[derive(Component)]
pub struct EnergyBarFill;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct WaveText;

#[derive(Component)]
pub struct TallyText;

fn bar(parent: &mut ChildSpawnerCommands, label: &str, fill_color: Color, marker: impl Component) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            column_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                Text::new(label),
                TextFont { font_size: 14.0, ..default() },
                TextColor(Color::srgb(0.7, 0.7, 0.8)),
            ));
            row.spawn((
                Node {
                    width: Val::Px(180.0),
                    height: Val::Px(12.0),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.08, 0.08, 0.12)),
                BorderColor::all(Color::srgb(0.3, 0.3, 0.4)),
            ))
            .with_children(|track| {
                track.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(fill_color),
                    marker,
                ));
            });
        });
}

/// `OnEnter(Playing)`: build the HUD tree in the top-left corner.
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|root| {
            bar(root, "HULL", Color::srgb(0.2, 0.9, 0.3), HullBarFill);
            bar(root, "BOOST", Color::srgb(0.2, 0.6, 1.0), EnergyBarFill);
            root.spawn((
                Text::new("SCORE 0"),
                TextFont { font_size: 20.0, ..default() },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
                ScoreText,
            ));
            root.spawn((
                Text::new("WAVE 1"),
                TextFont { font_size: 16.0, ..default() },
                TextColor(Color::srgb(0.8, 0.95, 1.0)),
                WaveText,
            ));
            root.spawn((
                Text::new(""),
                TextFont { font_size: 13.0, ..default() },
                TextColor(Color::srgb(0.55, 0.55, 0.65)),
                TallyText,
            ));
        });
}

/// Mirror [`MatchStats`] into the HUD widgets.
#[allow(clippy::type_complexity)]
pub fn update_hud(
    stats: Res<MatchStats>,
    mut hull: Query<&mut Node, (With<HullBarFill>, Without<EnergyBarFill>)>,
    mut energy: Query<&mut Node, (With<EnergyBarFill>, Without<HullBarFill>)>,
    mut score: Query<&mut Text, (With<ScoreText>, Without<WaveText>, Without<TallyText>)>,
    mut wave: Query<&mut Text, (With<WaveText>, Without<ScoreText>, Without<TallyText>)>,
    mut tally: Query<&mut Text, (With<TallyText>, Without<ScoreText>, Without<WaveText>)>,
) {
    if let Ok(mut node) = hull.single_mut() {
        node.width = Val::Percent(fill_percent(stats.health, stats.max_health));
    }
    if let Ok(mut node) = energy.single_mut() {
        node.width = Val::Percent(fill_percent(stats.energy, stats.max_energy));
    }
    if let Ok(mut text) = score.single_mut() {
        text.0 = format!("SCORE {}", stats.score);
    }
    if let Ok(mut text) = wave.single_mut() {
        text.0 = format!("WAVE {}", stats.wave);
    }
    if let Ok(mut text) = tally.single_mut() {
        text.0 = format!(
            "kills {} · rocks {} · crystals {}",
            stats.enemies_destroyed, stats.asteroids_destroyed, stats.resources_collected
        );
    }
}

/// Bar fill as a percentage, safe against a zero cap.
pub fn fill_percent(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).clamp(0.0, 100.0)
    }
}

/// `OnExit(Playing)`: tear the HUD down.
pub fn cleanup_hud(mut commands: Commands, roots: Query<Entity, With<HudRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_percent_clamps_and_survives_zero_cap() {
        assert_eq!(fill_percent(50.0, 100.0), 50.0);
        assert_eq!(fill_percent(150.0, 100.0), 100.0);
        assert_eq!(fill_percent(-5.0, 100.0), 0.0);
        assert_eq!(fill_percent(10.0, 0.0), 0.0);
    }
}
