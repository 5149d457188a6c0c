//! Testing utilities for Bevy systems.

#![cfg(test)]

use std::time::Duration;

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::GameState;
use crate::menus::Menu;

/// Minimal headless app with states and input resources, but no plugins
/// beyond what the systems under test need.
pub fn create_base_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>();
    app.init_state::<Menu>();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<ButtonInput<MouseButton>>();
    app
}

/// Drive the app into `GameState::InGame` with no menu overlay.
pub fn transition_to_ingame(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
}

/// Assert the number of entities matching a query filter.
pub fn assert_entity_count<F: QueryFilter>(app: &mut App, expected: usize) {
    let count = app
        .world_mut()
        .query_filtered::<(), F>()
        .iter(app.world())
        .count();
    assert_eq!(
        count,
        expected,
        "expected {expected} entities matching {}, found {count}",
        std::any::type_name::<F>()
    );
}

/// Set a timer's elapsed time to one nanosecond short of its duration, so the
/// next `tick()` with any positive delta finishes it.
pub fn nearly_expire_timer(timer: &mut Timer) {
    let duration = timer.duration();
    timer.set_elapsed(duration.saturating_sub(Duration::from_nanos(1)));
}
