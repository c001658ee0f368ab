//! Hangar menu and game-over overlay.
//!
//! The hangar lists every owned hull as a selectable card with its own
//! stake/unstake button, plus a launch button and a practice toggle. Cards
//! never despawn while the menu is up; selection highlight and stake status
//! are refreshed in place each frame so a settled transaction shows up
//! without rebuilding the tree.
//!
//! Launch is guarded here as well as in the match lifecycle: no selection or
//! a staked selection surfaces a notice and stays on the menu.

use bevy::prelude::*;

use crate::chain::{StakeRequest, TxNotice};
use crate::error::GameError;
use crate::session::{GameState, MatchStats, PracticeMode};
use crate::ship::{FleetRoster, SelectedShip};

// ── Markers ───────────────────────────────────────────────────────────────────

#[derive(Component)]
pub struct MainMenuRoot;

#[derive(Component)]
pub struct GameOverRoot;

/// Selectable hull card.
#[derive(Component)]
pub struct ShipCard {
    pub ship_id: u64,
}

/// Per-card stake/unstake button.
#[derive(Component)]
pub struct ShipStakeButton {
    pub ship_id: u64,
}

/// Status line inside a card, rewritten as the roster changes.
#[derive(Component)]
pub struct ShipCardStatus {
    pub ship_id: u64,
}

#[derive(Component)]
pub struct LaunchButton;

#[derive(Component)]
pub struct PracticeToggle;

#[derive(Component)]
pub struct PracticeToggleText;

#[derive(Component)]
pub struct NoticeText;

#[derive(Component)]
pub struct FlyAgainButton;

#[derive(Component)]
pub struct HangarButton;

fn card_border() -> Color {
    Color::srgb(0.22, 0.38, 0.72)
}
fn card_border_selected() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
fn card_border_staked() -> Color {
    Color::srgb(0.35, 0.35, 0.40)
}

// ── Main menu ─────────────────────────────────────────────────────────────────

/// Spawn the full-screen hangar overlay.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │              SPACE FLEET                    │
/// │        pick a hull, then launch             │
/// │  [card] [card] [card] [card]                │
/// │          [ LAUNCH ]  [ practice: off ]      │
/// │          <tx notice line>                   │
/// └─────────────────────────────────────────────┘
/// ```
pub fn setup_main_menu(mut commands: Commands, roster: Res<FleetRoster>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(14.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.04, 0.95)),
            MainMenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("SPACE FLEET"),
                TextFont { font_size: 56.0, ..default() },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
            ));
            root.spawn((
                Text::new("pick a hull, then launch"),
                TextFont { font_size: 18.0, ..default() },
                TextColor(Color::srgb(0.55, 0.55, 0.65)),
            ));

            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(12.0),
                margin: UiRect::top(Val::Px(24.0)),
                ..default()
            })
            .with_children(|row| {
                for ship in &roster.ships {
                    let stats = ship.archetype.stats();
                    let (r, g, b) = stats.color;
                    row.spawn((
                        Button,
                        Node {
                            width: Val::Px(180.0),
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Center,
                            padding: UiRect::all(Val::Px(12.0)),
                            row_gap: Val::Px(6.0),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.06, 0.09, 0.18)),
                        BorderColor::all(card_border()),
                        ShipCard { ship_id: ship.id },
                    ))
                    .with_children(|card| {
                        card.spawn((
                            Text::new(ship.archetype.name()),
                            TextFont { font_size: 20.0, ..default() },
                            TextColor(Color::srgb(r, g, b)),
                        ));
                        card.spawn((
                            Text::new(format!(
                                "hull {}  ·  dmg {}",
                                stats.max_health, stats.weapon.damage
                            )),
                            TextFont { font_size: 13.0, ..default() },
                            TextColor(Color::srgb(0.45, 0.50, 0.65)),
                        ));
                        card.spawn((
                            Text::new(""),
                            TextFont { font_size: 13.0, ..default() },
                            TextColor(Color::srgb(0.90, 0.90, 1.0)),
                            ShipCardStatus { ship_id: ship.id },
                        ));
                        card.spawn((
                            Button,
                            Node {
                                padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.10, 0.18, 0.36)),
                            BorderColor::all(Color::srgb(0.22, 0.44, 0.78)),
                            ShipStakeButton { ship_id: ship.id },
                        ))
                        .with_children(|btn| {
                            btn.spawn((
                                Text::new("STAKE / UNSTAKE"),
                                TextFont { font_size: 12.0, ..default() },
                                TextColor(Color::srgb(0.65, 0.80, 1.0)),
                            ));
                        });
                    });
                }
            });

            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(14.0),
                margin: UiRect::top(Val::Px(20.0)),
                ..default()
            })
            .with_children(|row| {
                row.spawn((
                    Button,
                    Node {
                        width: Val::Px(220.0),
                        height: Val::Px(50.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.08, 0.36, 0.14)),
                    BorderColor::all(Color::srgb(0.18, 0.72, 0.28)),
                    LaunchButton,
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new("LAUNCH"),
                        TextFont { font_size: 18.0, ..default() },
                        TextColor(Color::srgb(0.75, 1.0, 0.80)),
                    ));
                });
                row.spawn((
                    Button,
                    Node {
                        width: Val::Px(220.0),
                        height: Val::Px(50.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.12, 0.12, 0.18)),
                    BorderColor::all(Color::srgb(0.30, 0.30, 0.46)),
                    PracticeToggle,
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new("practice: off"),
                        TextFont { font_size: 16.0, ..default() },
                        TextColor(Color::srgb(0.55, 0.55, 0.70)),
                        PracticeToggleText,
                    ));
                });
            });

            root.spawn((
                Text::new(""),
                TextFont { font_size: 14.0, ..default() },
                TextColor(Color::srgb(1.0, 0.65, 0.65)),
                NoticeText,
            ));
        });
}

/// Clicking a card selects its hull; a staked hull refuses with a notice.
pub fn ship_card_interactions(
    cards: Query<(&Interaction, &ShipCard), Changed<Interaction>>,
    roster: Res<FleetRoster>,
    mut selected: ResMut<SelectedShip>,
    mut notice: ResMut<TxNotice>,
) {
    for (interaction, card) in &cards {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(ship) = roster.ship_by_id(card.ship_id) else {
            continue;
        };
        if ship.staked {
            let err = GameError::ShipStaked { ship_id: ship.id };
            warn!("{err}");
            notice.show(err.to_string());
            continue;
        }
        selected.0 = Some(ship.clone());
    }
}

/// Stake buttons forward to the transaction boundary.
pub fn stake_button_interactions(
    buttons: Query<(&Interaction, &ShipStakeButton), Changed<Interaction>>,
    roster: Res<FleetRoster>,
    mut requests: MessageWriter<StakeRequest>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(ship) = roster.ship_by_id(button.ship_id) else {
            continue;
        };
        requests.write(StakeRequest { ship_id: ship.id, release: ship.staked });
    }
}

/// Launch guard: a valid, unstaked selection starts the match.
pub fn launch_button_interaction(
    buttons: Query<&Interaction, (Changed<Interaction>, With<LaunchButton>)>,
    selected: Res<SelectedShip>,
    mut notice: ResMut<TxNotice>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for interaction in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match selected.0.as_ref() {
            None => {
                let err = GameError::NoShipSelected;
                warn!("{err}");
                notice.show(err.to_string());
            }
            Some(ship) if ship.staked => {
                let err = GameError::ShipStaked { ship_id: ship.id };
                warn!("{err}");
                notice.show(err.to_string());
            }
            Some(_) => next_state.set(GameState::Playing),
        }
    }
}

/// Flip practice mode and relabel the toggle.
pub fn practice_toggle_interaction(
    buttons: Query<&Interaction, (Changed<Interaction>, With<PracticeToggle>)>,
    mut practice: ResMut<PracticeMode>,
    mut labels: Query<&mut Text, With<PracticeToggleText>>,
) {
    for interaction in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        practice.0 = !practice.0;
        if let Ok(mut text) = labels.single_mut() {
            text.0 = if practice.0 {
                "practice: on".to_string()
            } else {
                "practice: off".to_string()
            };
        }
    }
}

/// Refresh card borders and status lines from live state.
pub fn refresh_ship_cards(
    roster: Res<FleetRoster>,
    selected: Res<SelectedShip>,
    mut borders: Query<(&ShipCard, &mut BorderColor)>,
    mut statuses: Query<(&ShipCardStatus, &mut Text)>,
) {
    let selected_id = selected.0.as_ref().map(|s| s.id);
    for (card, mut border) in &mut borders {
        let staked = roster.ship_by_id(card.ship_id).is_some_and(|s| s.staked);
        *border = BorderColor::all(if staked {
            card_border_staked()
        } else if selected_id == Some(card.ship_id) {
            card_border_selected()
        } else {
            card_border()
        });
    }
    for (status, mut text) in &mut statuses {
        let Some(ship) = roster.ship_by_id(status.ship_id) else {
            continue;
        };
        text.0 = if ship.staked {
            "STAKED".to_string()
        } else {
            format!("#{}  ·  {} matches", ship.id, ship.matches)
        };
    }
}

/// Mirror the transaction notice into whichever overlay is up.
pub fn update_notice_text(notice: Res<TxNotice>, mut texts: Query<&mut Text, With<NoticeText>>) {
    for mut text in &mut texts {
        if text.0 != notice.text {
            text.0 = notice.text.clone();
        }
    }
}

pub fn cleanup_main_menu(mut commands: Commands, roots: Query<Entity, With<MainMenuRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn();
    }
}

// ── Game over ─────────────────────────────────────────────────────────────────

/// Spawn the game-over overlay with the final tallies.
pub fn setup_game_over(mut commands: Commands, stats: Res<MatchStats>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.82)),
            ZIndex(300),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(16.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(320.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.06, 0.02, 0.02)),
                    BorderColor::all(Color::srgb(0.55, 0.10, 0.10)),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("SHIP DESTROYED"),
                        TextFont { font_size: 46.0, ..default() },
                        TextColor(Color::srgb(1.0, 0.22, 0.22)),
                    ));
                    card.spawn((
                        Text::new(format!(
                            "score {}   wave {}\nkills {} · rocks {} · crystals {}",
                            stats.score,
                            stats.wave,
                            stats.enemies_destroyed,
                            stats.asteroids_destroyed,
                            stats.resources_collected
                        )),
                        TextFont { font_size: 16.0, ..default() },
                        TextColor(Color::srgb(0.55, 0.55, 0.65)),
                    ));
                    card.spawn((
                        Button,
                        Node {
                            width: Val::Px(220.0),
                            height: Val::Px(50.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.08, 0.36, 0.14)),
                        BorderColor::all(Color::srgb(0.18, 0.72, 0.28)),
                        FlyAgainButton,
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            Text::new("FLY AGAIN"),
                            TextFont { font_size: 18.0, ..default() },
                            TextColor(Color::srgb(0.75, 1.0, 0.80)),
                        ));
                    });
                    card.spawn((
                        Button,
                        Node {
                            width: Val::Px(220.0),
                            height: Val::Px(50.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.12, 0.12, 0.18)),
                        BorderColor::all(Color::srgb(0.30, 0.30, 0.46)),
                        HangarButton,
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            Text::new("BACK TO HANGAR"),
                            TextFont { font_size: 18.0, ..default() },
                            TextColor(Color::srgb(0.55, 0.55, 0.70)),
                        ));
                    });
                    card.spawn((
                        Text::new("Enter to fly again · Esc for hangar"),
                        TextFont { font_size: 12.0, ..default() },
                        TextColor(Color::srgb(0.28, 0.28, 0.35)),
                    ));
                });
        });
}

/// Buttons and keyboard shortcuts on the game-over overlay.
pub fn game_over_interactions(
    fly_again: Query<&Interaction, (Changed<Interaction>, With<FlyAgainButton>)>,
    hangar: Query<&Interaction, (Changed<Interaction>, With<HangarButton>)>,
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let restart = keys.just_pressed(KeyCode::Enter)
        || fly_again.iter().any(|i| *i == Interaction::Pressed);
    let to_hangar = keys.just_pressed(KeyCode::Escape)
        || hangar.iter().any(|i| *i == Interaction::Pressed);

    if restart {
        next_state.set(GameState::Playing);
    } else if to_hangar {
        next_state.set(GameState::MainMenu);
    }
}

pub fn cleanup_game_over(mut commands: Commands, roots: Query<Entity, With<GameOverRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn();
    }
}
