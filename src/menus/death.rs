//! Death overlay UI with bordered panel and an exit button.

use bevy::prelude::*;

use super::Menu;
use crate::GameState;
use crate::theme::{palette, widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::Death), spawn_death_screen);
}

fn spawn_death_screen(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Death Screen"),
        BackgroundColor(palette::OVERLAY_BACKGROUND),
        GlobalZIndex(1),
        DespawnOnExit(Menu::Death),
        children![
            // Bordered panel
            (
                Name::new("Death Panel"),
                Node {
                    width: Val::Px(500.0),
                    min_height: Val::Px(300.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::SpaceEvenly,
                    padding: UiRect::all(Val::Px(40.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(palette::PANEL_BACKGROUND),
                BorderColor::all(palette::PANEL_BORDER),
                children![
                    (
                        Text::new("YOU WERE SPOTTED ONE TIME TOO MANY"),
                        TextFont::from_font_size(palette::FONT_SIZE_LABEL),
                        TextColor(palette::SPOTTED_TEXT),
                    ),
                    widget::button(
                        "Exit to Menu",
                        |_: On<Pointer<Click>>, mut next_game: ResMut<NextState<GameState>>| {
                            next_game.set(GameState::MainMenu);
                        },
                    ),
                ],
            ),
        ],
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_entity_count;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn death_screen_spawns_panel_and_button() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.init_state::<GameState>();
        app.init_state::<Menu>();
        app.add_plugins(plugin);

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        app.update();
        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::Death);
        app.update();
        app.update(); // Apply deferred

        // Title + 1 button label
        assert_entity_count::<With<Text>>(&mut app, 2);
        assert_entity_count::<With<Button>>(&mut app, 1);
    }
}
