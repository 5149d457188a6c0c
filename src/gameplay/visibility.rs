//! Light-visibility evaluation: is the archer standing in light?

use avian2d::prelude::SpatialQuery;
use bevy::prelude::*;

use crate::gameplay::player::Player;
use crate::third_party::line_blocked;
use crate::{GameSet, GameState, gameplay_running};

// === Constants ===

/// Seconds between illumination sweeps.
const LIGHT_CHECK_SECS: f32 = 0.1;

// === Components ===

/// The kind of a scene light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum LightKind {
    Point,
    Spot,
    Directional,
}

/// A light in the arena. Owned by the level; the evaluator only looks lights
/// up by entity each sweep and never holds onto their data.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct LightSource {
    pub kind: LightKind,
    /// Maximum distance at which this light can illuminate a target.
    pub attenuation_radius: f32,
}

/// Whether the archer is currently illuminated. Recomputed every sweep.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct InLight(pub bool);

// === Resources ===

/// Scene lights, cached once per arena entry.
///
/// Directional lights are collected but never swept — only point and spot
/// lights can reveal the archer. Lights spawned after the cache is built are
/// invisible to the evaluator until the arena is re-entered.
#[derive(Resource, Debug, Default)]
pub struct SceneLights {
    /// Point and spot lights, the ones the sweep tests.
    pub lights: Vec<Entity>,
    /// Directional lights, tracked but excluded from the sweep.
    pub directional: Vec<Entity>,
}

/// Sweep cadence. Illumination is checked on a fixed 0.1 s beat rather than
/// every frame.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct LightCheckTimer(pub Timer);

impl Default for LightCheckTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(LIGHT_CHECK_SECS, TimerMode::Repeating))
    }
}

// === Helpers ===

/// Whether a single light reaches a target: inside the attenuation radius
/// (strictly) and with an unblocked straight line.
fn light_reaches(
    light_pos: Vec2,
    attenuation_radius: f32,
    target: Vec2,
    mut blocked: impl FnMut(Vec2, Vec2) -> bool,
) -> bool {
    light_pos.distance(target) < attenuation_radius && !blocked(light_pos, target)
}

// === Systems ===

/// Caches the scene's lights on the first frame they exist.
/// Runs only while the resource is absent, so the cache is built exactly once
/// per arena entry.
fn cache_scene_lights(mut commands: Commands, lights: Query<(Entity, &LightSource)>) {
    if lights.is_empty() {
        return;
    }
    let mut cache = SceneLights::default();
    for (entity, light) in &lights {
        match light.kind {
            LightKind::Point | LightKind::Spot => cache.lights.push(entity),
            LightKind::Directional => cache.directional.push(entity),
        }
    }
    info!(
        "cached {} sweepable lights ({} directional excluded)",
        cache.lights.len(),
        cache.directional.len()
    );
    commands.insert_resource(cache);
}

fn clear_scene_lights(mut commands: Commands) {
    commands.remove_resource::<SceneLights>();
}

/// The illumination sweep: a boolean OR over every cached light, with an
/// occlusion raycast for each light in range. Short-circuits on the first
/// light that reaches the archer.
fn update_in_light(
    time: Res<Time>,
    mut timer: ResMut<LightCheckTimer>,
    scene: Res<SceneLights>,
    spatial: SpatialQuery,
    lights: Query<(&GlobalTransform, &LightSource)>,
    mut players: Query<(&GlobalTransform, &mut InLight), With<Player>>,
) {
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }
    let Ok((player_transform, mut in_light)) = players.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation().truncate();

    in_light.0 = false;
    for &light_entity in &scene.lights {
        let Ok((light_transform, light)) = lights.get(light_entity) else {
            continue;
        };
        let light_pos = light_transform.translation().truncate();
        if light_reaches(light_pos, light.attenuation_radius, player_pos, |from, to| {
            line_blocked(&spatial, from, to)
        }) {
            in_light.0 = true;
            break;
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<LightSource>()
        .register_type::<InLight>()
        .register_type::<LightCheckTimer>()
        .init_resource::<LightCheckTimer>();

    app.add_systems(
        Update,
        (
            cache_scene_lights.run_if(not(resource_exists::<SceneLights>)),
            update_in_light.run_if(resource_exists::<SceneLights>),
        )
            .chain()
            .in_set(GameSet::Visibility)
            .run_if(gameplay_running),
    );

    app.add_systems(OnExit(GameState::InGame), clear_scene_lights);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RADIUS: f32 = 300.0;

    fn never_blocked(_: Vec2, _: Vec2) -> bool {
        false
    }

    fn always_blocked(_: Vec2, _: Vec2) -> bool {
        true
    }

    #[test]
    fn light_reaches_inside_radius_unoccluded() {
        assert!(light_reaches(
            Vec2::ZERO,
            RADIUS,
            Vec2::new(100.0, 0.0),
            never_blocked
        ));
    }

    #[test]
    fn light_misses_outside_radius_even_unoccluded() {
        assert!(!light_reaches(
            Vec2::ZERO,
            RADIUS,
            Vec2::new(400.0, 0.0),
            never_blocked
        ));
    }

    #[test]
    fn radius_boundary_is_exclusive() {
        assert!(!light_reaches(
            Vec2::ZERO,
            RADIUS,
            Vec2::new(RADIUS, 0.0),
            never_blocked
        ));
    }

    #[test]
    fn occluded_light_does_not_reach() {
        assert!(!light_reaches(
            Vec2::ZERO,
            RADIUS,
            Vec2::new(100.0, 0.0),
            always_blocked
        ));
    }

    #[test]
    fn occlusion_is_only_tested_within_radius() {
        let mut ray_casts = 0;
        let reached = light_reaches(Vec2::ZERO, RADIUS, Vec2::new(400.0, 0.0), |_, _| {
            ray_casts += 1;
            false
        });
        assert!(!reached);
        assert_eq!(ray_casts, 0);
    }

    #[test]
    fn any_reaching_light_suffices() {
        // Boolean OR across lights: one blocked, one clear
        let lights = [
            (Vec2::new(-100.0, 0.0), true),  // occluded
            (Vec2::new(100.0, 0.0), false),  // clear
        ];
        let target = Vec2::ZERO;
        let lit = lights
            .iter()
            .any(|&(pos, occluded)| light_reaches(pos, RADIUS, target, |_, _| occluded));
        assert!(lit);
    }

    #[test]
    fn no_reaching_light_means_dark() {
        let lights = [Vec2::new(500.0, 0.0), Vec2::new(0.0, 500.0)];
        let target = Vec2::ZERO;
        let lit = lights
            .iter()
            .any(|&pos| light_reaches(pos, RADIUS, target, never_blocked));
        assert!(!lit);
    }
}
