//! Top-down stealth archery game library.

#[cfg(feature = "dev")]
pub mod dev_tools;
pub mod gameplay;
pub mod menus;
#[cfg(test)]
pub mod testing;
pub mod theme;
pub mod third_party;

use bevy::prelude::*;

use crate::menus::Menu;

/// Primary game states.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Initial loading state.
    #[default]
    Loading,
    /// Main menu state.
    MainMenu,
    /// Active gameplay state.
    InGame,
}

// === Z Layers ===

/// Arena floor backdrop.
pub const Z_FLOOR: f32 = 0.0;
/// Light glow discs, drawn over the floor.
pub const Z_LIGHT_GLOW: f32 = 0.5;
/// Pickup caches.
pub const Z_PICKUP: f32 = 1.0;
/// The archer.
pub const Z_PLAYER: f32 = 2.0;
/// Arrows in flight, drawn over the archer.
pub const Z_ARROW: f32 = 2.5;
/// Wall blocks, drawn over everything on the ground.
pub const Z_WALL: f32 = 3.0;

// === System Sets ===

/// Per-frame system ordering for gameplay. Configured as a chain in [`plugin`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Keyboard/mouse input handling and the state transitions it drives.
    Input,
    /// Velocity writing, sprint enforcement, and cursor rotation.
    Movement,
    /// Arrow flight, impacts, and damage application.
    Combat,
    /// Illumination sweep against the cached scene lights.
    Visibility,
    /// Pickup overlap dispatch and collection.
    Pickups,
    /// Death detection and its menu transition.
    Death,
    /// HUD refresh.
    Ui,
}

/// Run condition: gameplay is active and no menu overlay is open.
pub fn gameplay_running(game_state: Res<State<GameState>>, menu: Res<State<Menu>>) -> bool {
    *game_state.get() == GameState::InGame && *menu.get() == Menu::None
}

/// Spawns the global 2D camera. Persists across all states (do NOT add `DespawnOnExit`).
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Nothing heavyweight to load yet, so the loading screen lasts one frame.
fn advance_past_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Registers states, set ordering, the camera, and all domain plugins.
pub fn plugin(app: &mut App) {
    app.init_state::<GameState>();

    app.configure_sets(
        Update,
        (
            GameSet::Input,
            GameSet::Movement,
            GameSet::Combat,
            GameSet::Visibility,
            GameSet::Pickups,
            GameSet::Death,
            GameSet::Ui,
        )
            .chain(),
    );

    app.add_systems(Startup, setup_camera);
    app.add_systems(
        Update,
        advance_past_loading.run_if(in_state(GameState::Loading)),
    );

    app.add_plugins((
        third_party::plugin,
        theme::plugin,
        menus::plugin,
        gameplay::plugin,
    ));

    #[cfg(feature = "dev")]
    app.add_plugins(dev_tools::plugin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn game_state_default_is_loading() {
        assert_eq!(GameState::default(), GameState::Loading);
    }

    #[test]
    fn game_states_are_distinct() {
        assert_ne!(GameState::Loading, GameState::MainMenu);
        assert_ne!(GameState::MainMenu, GameState::InGame);
    }
}
