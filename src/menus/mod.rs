//! Menu overlays that can appear on top of any screen.
//!
//! The `Menu` state is orthogonal to `GameState` — menus are overlays,
//! not screens. `Menu::Pause` and `Menu::Death` appear while
//! `GameState::InGame` is active; `Menu::Main` appears on the title screen.

mod death;
mod main_menu;
mod pause;

use bevy::prelude::*;

use crate::GameState;

/// Menu overlay states. Orthogonal to `GameState`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[states(scoped_entities)]
pub enum Menu {
    /// No menu overlay is active.
    #[default]
    None,
    /// Main menu (shown on the title screen).
    Main,
    /// Pause menu (shown in-game).
    Pause,
    /// Death overlay (the archer has fallen).
    Death,
}

pub fn plugin(app: &mut App) {
    app.init_state::<Menu>();
    app.add_plugins((main_menu::plugin, pause::plugin, death::plugin));

    // Keep the overlay in step with the screen: the title screen always shows
    // the main menu, entering the arena always starts unobstructed.
    app.add_systems(OnEnter(GameState::MainMenu), open_main_menu);
    app.add_systems(OnEnter(GameState::InGame), close_menus);

    // Pause/unpause virtual time when any menu overlay opens/closes.
    // This stops physics (avian2d accumulates from Time<Virtual>) and all
    // timer-based systems (draw, dodge, hit stun, light sweep).
    app.add_systems(OnExit(Menu::None), pause_virtual_time);
    app.add_systems(OnEnter(Menu::None), unpause_virtual_time);
}

fn open_main_menu(mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::Main);
}

fn close_menus(mut next_menu: ResMut<NextState<Menu>>) {
    next_menu.set(Menu::None);
}

fn pause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn unpause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_menu_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);
        app.init_state::<Menu>();
        app.add_systems(OnExit(Menu::None), pause_virtual_time);
        app.add_systems(OnEnter(Menu::None), unpause_virtual_time);
        app.update();
        app
    }

    #[test]
    fn virtual_time_paused_while_a_menu_is_open() {
        let mut app = create_menu_test_app();

        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::Pause);
        app.update();

        let time = app.world().resource::<Time<Virtual>>();
        assert!(
            time.is_paused(),
            "Time<Virtual> should be paused when a menu is open"
        );
    }

    #[test]
    fn virtual_time_resumes_when_menus_close() {
        let mut app = create_menu_test_app();

        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::Pause);
        app.update();

        app.world_mut()
            .resource_mut::<NextState<Menu>>()
            .set(Menu::None);
        app.update();

        let time = app.world().resource::<Time<Virtual>>();
        assert!(
            !time.is_paused(),
            "Time<Virtual> should be unpaused when menus close"
        );
    }
}
