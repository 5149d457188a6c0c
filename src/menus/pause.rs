//! Pause menu UI: overlay, pause text, and input handling (unpause / quit).

use bevy::prelude::*;

use super::Menu;
use crate::GameState;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::Pause), spawn_pause_menu);
    app.add_systems(
        Update,
        open_pause_menu.run_if(in_state(GameState::InGame).and(in_state(Menu::None))),
    );
    app.add_systems(Update, handle_pause_input.run_if(in_state(Menu::Pause)));
}

fn open_pause_menu(keyboard: Res<ButtonInput<KeyCode>>, mut next_menu: ResMut<NextState<Menu>>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_menu.set(Menu::Pause);
    }
}

fn spawn_pause_menu(mut commands: Commands) {
    // Semi-transparent overlay
    commands.spawn((crate::theme::widget::overlay(), DespawnOnExit(Menu::Pause)));

    // Pause text
    commands.spawn((
        crate::theme::widget::header("PAUSED"),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(40.0),
            ..default()
        },
        DespawnOnExit(Menu::Pause),
    ));

    // Resume prompt
    commands.spawn((
        Text::new("Press ESC to Resume | Q to Quit"),
        TextFont {
            font_size: crate::theme::palette::FONT_SIZE_PROMPT,
            ..default()
        },
        TextColor(crate::theme::palette::BODY_TEXT),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(55.0),
            ..default()
        },
        DespawnOnExit(Menu::Pause),
    ));
}

fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_menu: ResMut<NextState<Menu>>,
    mut next_game_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_menu.set(Menu::None);
    }
    if keyboard.just_pressed(KeyCode::KeyQ) {
        next_game_state.set(GameState::MainMenu);
        // Menu::Main is set by the menus plugin on entering MainMenu.
    }
}
