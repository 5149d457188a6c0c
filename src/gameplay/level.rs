//! Arena setup: floor, wall occluders, lights, pickups, and the archer.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::gameplay::pickups::{PickupStock, spawn_pickup};
use crate::gameplay::player::spawn_player;
use crate::gameplay::visibility::{LightKind, LightSource};
use crate::theme::palette;
use crate::third_party::CollisionLayer;
use crate::{GameState, Z_FLOOR, Z_LIGHT_GLOW, Z_WALL};

// === Constants ===

/// Arena dimensions (pixels).
pub const ARENA_WIDTH: f32 = 1920.0;
pub const ARENA_HEIGHT: f32 = 1080.0;

/// Boundary/interior wall thickness (pixels).
const WALL_THICKNESS: f32 = 32.0;

/// Visual marker size for a light fixture.
const LIGHT_FIXTURE_SIZE: Vec2 = Vec2::new(18.0, 18.0);

// === Helpers ===

/// Spawn one wall block: solid, and an occluder for the light sweep.
fn spawn_wall(commands: &mut Commands, position: Vec2, size: Vec2) {
    commands.spawn((
        Name::new("Wall"),
        Sprite::from_color(palette::WALL, size),
        Transform::from_translation(position.extend(Z_WALL)),
        DespawnOnExit(GameState::InGame),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(
            [CollisionLayer::Pushbox, CollisionLayer::Obstacle],
            [CollisionLayer::Pushbox, CollisionLayer::Hitbox],
        ),
    ));
}

/// Spawn one light fixture with a glow disc.
fn spawn_light(commands: &mut Commands, position: Vec2, kind: LightKind, radius: f32) {
    commands.spawn((
        Name::new(match kind {
            LightKind::Point => "Point Light",
            LightKind::Spot => "Spot Light",
            LightKind::Directional => "Directional Light",
        }),
        LightSource {
            kind,
            attenuation_radius: radius,
        },
        Sprite::from_color(palette::LIGHT_FIXTURE, LIGHT_FIXTURE_SIZE),
        Transform::from_translation(position.extend(Z_LIGHT_GLOW)),
        DespawnOnExit(GameState::InGame),
    ));
}

// === Systems ===

/// Builds the arena. Everything here despawns on leaving `InGame`, so
/// re-entering rebuilds a fresh arena (and a fresh light cache).
fn setup_level(mut commands: Commands) {
    info!("building the arena");

    // Floor
    commands.spawn((
        Name::new("Floor"),
        Sprite::from_color(palette::FLOOR, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT)),
        Transform::from_xyz(0.0, 0.0, Z_FLOOR),
        DespawnOnExit(GameState::InGame),
    ));

    // Boundary walls
    let half_w = ARENA_WIDTH / 2.0;
    let half_h = ARENA_HEIGHT / 2.0;
    spawn_wall(
        &mut commands,
        Vec2::new(0.0, half_h),
        Vec2::new(ARENA_WIDTH + WALL_THICKNESS, WALL_THICKNESS),
    );
    spawn_wall(
        &mut commands,
        Vec2::new(0.0, -half_h),
        Vec2::new(ARENA_WIDTH + WALL_THICKNESS, WALL_THICKNESS),
    );
    spawn_wall(
        &mut commands,
        Vec2::new(-half_w, 0.0),
        Vec2::new(WALL_THICKNESS, ARENA_HEIGHT + WALL_THICKNESS),
    );
    spawn_wall(
        &mut commands,
        Vec2::new(half_w, 0.0),
        Vec2::new(WALL_THICKNESS, ARENA_HEIGHT + WALL_THICKNESS),
    );

    // Interior cover the archer can hide behind
    spawn_wall(&mut commands, Vec2::new(-250.0, 120.0), Vec2::new(220.0, WALL_THICKNESS));
    spawn_wall(&mut commands, Vec2::new(300.0, -160.0), Vec2::new(WALL_THICKNESS, 260.0));
    spawn_wall(&mut commands, Vec2::new(120.0, 330.0), Vec2::new(WALL_THICKNESS, 180.0));

    // Lights. The directional light is part of the scene but can never
    // reveal the archer; only point and spot lights are swept.
    spawn_light(&mut commands, Vec2::new(-420.0, 260.0), LightKind::Point, 320.0);
    spawn_light(&mut commands, Vec2::new(420.0, 300.0), LightKind::Point, 280.0);
    spawn_light(&mut commands, Vec2::new(520.0, -300.0), LightKind::Point, 300.0);
    spawn_light(&mut commands, Vec2::new(-80.0, -220.0), LightKind::Spot, 260.0);
    spawn_light(&mut commands, Vec2::ZERO, LightKind::Directional, f32::MAX);

    // Arrow caches
    spawn_pickup(&mut commands, Vec2::new(-720.0, -120.0), PickupStock([6, 0, 0, 0]));
    spawn_pickup(&mut commands, Vec2::new(700.0, 120.0), PickupStock([0, 2, 2, 1]));

    // The archer starts in a dark corner
    spawn_player(&mut commands, Vec2::new(-780.0, -420.0));
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), setup_level);
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::gameplay::pickups::Pickup;
    use crate::gameplay::player::Player;
    use crate::testing::{assert_entity_count, create_base_test_app, transition_to_ingame};

    fn create_level_test_app() -> App {
        let mut app = create_base_test_app();
        app.add_plugins(plugin);
        transition_to_ingame(&mut app);
        app.update(); // Apply deferred spawns
        app
    }

    #[test]
    fn arena_spawns_one_archer() {
        let mut app = create_level_test_app();
        assert_entity_count::<With<Player>>(&mut app, 1);
    }

    #[test]
    fn arena_spawns_walls_and_pickups() {
        let mut app = create_level_test_app();
        assert_entity_count::<(With<RigidBody>, With<Collider>)>(&mut app, 10); // 7 walls + 2 pickups + archer
        assert_entity_count::<With<Pickup>>(&mut app, 2);
    }

    #[test]
    fn arena_has_sweepable_and_directional_lights() {
        let mut app = create_level_test_app();
        let mut lights = app.world_mut().query::<&LightSource>();

        let mut sweepable = 0;
        let mut directional = 0;
        for light in lights.iter(app.world()) {
            match light.kind {
                LightKind::Point | LightKind::Spot => sweepable += 1,
                LightKind::Directional => directional += 1,
            }
            assert!(light.attenuation_radius > 0.0);
        }
        assert_eq!(sweepable, 4);
        assert_eq!(directional, 1);
    }

    #[test]
    fn arena_despawns_on_exit() {
        let mut app = create_level_test_app();
        assert_entity_count::<With<Player>>(&mut app, 1);

        app.world_mut()
            .resource_mut::<NextState<crate::GameState>>()
            .set(crate::GameState::MainMenu);
        app.update();

        assert_entity_count::<With<Player>>(&mut app, 0);
        assert_entity_count::<With<Pickup>>(&mut app, 0);
        assert_entity_count::<With<LightSource>>(&mut app, 0);
    }
}
