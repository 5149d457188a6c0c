//! Arrow types, the quiver, and arrow flight.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::third_party::CollisionLayer;
use crate::{GameSet, GameState, Z_ARROW, gameplay_running};

// === Constants ===

/// Visual half-extent of an arrow sprite (pixels).
const ARROW_SIZE: Vec2 = Vec2::new(14.0, 3.0);

/// Arrow collider radius (pixels).
const ARROW_RADIUS: f32 = 2.0;

/// Starting quiver loadout.
const STARTING_ARROWS: [u32; ArrowType::ALL.len()] = [10, 3, 3, 1];

// === Arrow Type System ===

/// The four arrow kinds an archer can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Default)]
pub enum ArrowType {
    /// Plain broadhead.
    #[default]
    Normal,
    /// Ignites on impact.
    Fire,
    /// Dissolves whatever it sticks into.
    Dissolve,
    /// Turns the victim against its allies.
    TeamSwitch,
}

impl ArrowType {
    /// All arrow types, in quiver-slot order.
    pub const ALL: &[Self] = &[Self::Normal, Self::Fire, Self::Dissolve, Self::TeamSwitch];

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Fire => "Fire",
            Self::Dissolve => "Dissolve",
            Self::TeamSwitch => "Team Switch",
        }
    }

    /// Quiver slot index.
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// Tuning for one arrow type. All values are compile-time constants.
#[derive(Debug, Clone, Copy)]
pub struct ArrowSpec {
    pub speed: f32,
    pub lifetime_secs: f32,
    pub color: Color,
}

/// Look up tuning for an arrow type.
#[must_use]
pub const fn arrow_spec(kind: ArrowType) -> ArrowSpec {
    match kind {
        ArrowType::Normal => ArrowSpec {
            speed: 900.0,
            lifetime_secs: 1.5,
            color: Color::srgb(0.85, 0.85, 0.8),
        },
        ArrowType::Fire => ArrowSpec {
            speed: 850.0,
            lifetime_secs: 1.5,
            color: Color::srgb(1.0, 0.5, 0.15),
        },
        ArrowType::Dissolve => ArrowSpec {
            speed: 850.0,
            lifetime_secs: 1.5,
            color: Color::srgb(0.4, 0.9, 0.4),
        },
        ArrowType::TeamSwitch => ArrowSpec {
            speed: 800.0,
            lifetime_secs: 1.5,
            color: Color::srgb(0.5, 0.5, 1.0),
        },
    }
}

// === Components ===

/// Per-type ammo counts plus the currently selected arrow type.
///
/// The only mutator on the firing path is [`Quiver::try_consume`]; counts
/// never go below zero.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Quiver {
    counts: [u32; ArrowType::ALL.len()],
    selected: ArrowType,
}

impl Default for Quiver {
    fn default() -> Self {
        Self {
            counts: STARTING_ARROWS,
            selected: ArrowType::Normal,
        }
    }
}

impl Quiver {
    /// A quiver with the given count for every slot. Test/debug convenience.
    #[must_use]
    pub const fn uniform(count: u32) -> Self {
        Self {
            counts: [count; ArrowType::ALL.len()],
            selected: ArrowType::Normal,
        }
    }

    /// The currently selected arrow type.
    #[must_use]
    pub const fn selected(&self) -> ArrowType {
        self.selected
    }

    /// Switch the selected arrow type.
    pub const fn select(&mut self, kind: ArrowType) {
        self.selected = kind;
    }

    /// Remaining count for an arrow type.
    #[must_use]
    pub const fn count(&self, kind: ArrowType) -> u32 {
        self.counts[kind.slot()]
    }

    /// Add arrows of the given type.
    pub const fn add(&mut self, kind: ArrowType, n: u32) {
        self.counts[kind.slot()] += n;
    }

    /// Decrement the count for `kind` and return `true`, or return `false`
    /// without mutation when the slot is already empty.
    pub const fn try_consume(&mut self, kind: ArrowType) -> bool {
        let slot = kind.slot();
        if self.counts[slot] == 0 {
            return false;
        }
        self.counts[slot] -= 1;
        true
    }
}

/// An arrow in flight.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Arrow {
    pub kind: ArrowType,
}

/// Despawns the arrow when it runs out.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ArrowLifetime(pub Timer);

/// Spawn an arrow entity at `origin` flying along `direction`.
/// Single source of truth for the arrow archetype.
pub fn spawn_arrow(commands: &mut Commands, kind: ArrowType, origin: Vec2, direction: Vec2) {
    let spec = arrow_spec(kind);
    let heading = direction.normalize_or(Vec2::X);

    commands.spawn((
        Name::new(format!("{} Arrow", kind.display_name())),
        Arrow { kind },
        ArrowLifetime(Timer::from_seconds(spec.lifetime_secs, TimerMode::Once)),
        Sprite::from_color(spec.color, ARROW_SIZE),
        Transform::from_translation(origin.extend(Z_ARROW))
            .with_rotation(Quat::from_rotation_z(heading.to_angle())),
        DespawnOnExit(GameState::InGame),
        // Physics: kinematic sensor, avian integrates the velocity
        RigidBody::Kinematic,
        Collider::circle(ARROW_RADIUS),
        Sensor,
        LinearVelocity(heading * spec.speed),
        CollisionLayers::new(CollisionLayer::Hitbox, CollisionLayer::Obstacle),
        CollidingEntities::default(),
    ));
}

// === Systems ===

/// Ticks arrow lifetimes and despawns expired arrows.
/// Runs in `GameSet::Combat`.
fn expire_arrows(
    time: Res<Time>,
    mut commands: Commands,
    mut arrows: Query<(Entity, &mut ArrowLifetime), With<Arrow>>,
) {
    for (entity, mut lifetime) in &mut arrows {
        lifetime.0.tick(time.delta());
        if lifetime.0.just_finished() {
            commands.entity(entity).despawn();
        }
    }
}

/// Despawns arrows that have struck obstacle geometry. The collision mask
/// restricts arrow contacts to `CollisionLayer::Obstacle`, so any colliding
/// entity is a hit.
/// Runs in `GameSet::Combat`.
fn handle_arrow_impacts(
    mut commands: Commands,
    arrows: Query<(Entity, &Arrow, &CollidingEntities)>,
) {
    for (entity, arrow, colliding) in &arrows {
        if colliding.0.is_empty() {
            continue;
        }
        debug!("{:?} arrow struck an obstacle", arrow.kind);
        commands.entity(entity).despawn();
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Quiver>()
        .register_type::<Arrow>()
        .register_type::<ArrowLifetime>();

    app.add_systems(
        Update,
        (expire_arrows, handle_arrow_impacts)
            .in_set(GameSet::Combat)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn arrow_specs_are_valid() {
        for &kind in ArrowType::ALL {
            let spec = arrow_spec(kind);
            assert!(spec.speed > 0.0);
            assert!(spec.lifetime_secs > 0.0);
        }
    }

    #[test]
    fn arrow_slots_are_distinct() {
        let slots: Vec<usize> = ArrowType::ALL.iter().map(|k| k.slot()).collect();
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(*slot, i);
        }
    }

    #[test]
    fn quiver_defaults_to_normal_selection() {
        let quiver = Quiver::default();
        assert_eq!(quiver.selected(), ArrowType::Normal);
    }

    #[test]
    fn quiver_select_switches_type() {
        let mut quiver = Quiver::default();
        quiver.select(ArrowType::Fire);
        assert_eq!(quiver.selected(), ArrowType::Fire);
    }

    #[test]
    fn consume_decrements_count() {
        let mut quiver = Quiver::uniform(3);
        assert!(quiver.try_consume(ArrowType::Normal));
        assert_eq!(quiver.count(ArrowType::Normal), 2);
    }

    #[test]
    fn consume_empty_slot_is_rejected_without_mutation() {
        let mut quiver = Quiver::uniform(0);
        for &kind in ArrowType::ALL {
            assert!(!quiver.try_consume(kind));
        }
        for &kind in ArrowType::ALL {
            assert_eq!(quiver.count(kind), 0);
        }
    }

    #[test]
    fn consume_only_touches_its_own_slot() {
        let mut quiver = Quiver::uniform(2);
        assert!(quiver.try_consume(ArrowType::Fire));
        assert_eq!(quiver.count(ArrowType::Fire), 1);
        assert_eq!(quiver.count(ArrowType::Normal), 2);
        assert_eq!(quiver.count(ArrowType::Dissolve), 2);
        assert_eq!(quiver.count(ArrowType::TeamSwitch), 2);
    }

    #[test]
    fn add_restocks_a_slot() {
        let mut quiver = Quiver::uniform(0);
        quiver.add(ArrowType::Dissolve, 5);
        assert_eq!(quiver.count(ArrowType::Dissolve), 5);
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::testing::assert_entity_count;
    use std::time::Duration;

    fn create_arrow_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, (expire_arrows, handle_arrow_impacts));
        app.update(); // Initialize time (first frame delta=0)
        app
    }

    /// Spawn a bare arrow without physics components, optionally pre-populating
    /// its colliding set to stand in for the collision pipeline.
    fn spawn_test_arrow(world: &mut World, lifetime_secs: f32, colliding_with: &[Entity]) {
        use bevy::ecs::entity::hash_set::EntityHashSet;
        world.spawn((
            Arrow {
                kind: ArrowType::Normal,
            },
            ArrowLifetime(Timer::from_seconds(lifetime_secs, TimerMode::Once)),
            CollidingEntities(EntityHashSet::from_iter(colliding_with.iter().copied())),
        ));
    }

    #[test]
    fn arrow_expires_after_lifetime() {
        let mut app = create_arrow_test_app();

        spawn_test_arrow(app.world_mut(), 0.001, &[]);

        // Any positive wall-clock delta exceeds the 1ms lifetime
        std::thread::sleep(Duration::from_millis(5));
        app.update();

        assert_entity_count::<With<Arrow>>(&mut app, 0);
    }

    #[test]
    fn arrow_survives_within_lifetime() {
        let mut app = create_arrow_test_app();

        spawn_test_arrow(app.world_mut(), 60.0, &[]);
        app.update();

        assert_entity_count::<With<Arrow>>(&mut app, 1);
    }

    #[test]
    fn arrow_despawns_on_obstacle_contact() {
        let mut app = create_arrow_test_app();

        let wall = app.world_mut().spawn_empty().id();
        spawn_test_arrow(app.world_mut(), 60.0, &[wall]);
        app.update();

        assert_entity_count::<With<Arrow>>(&mut app, 0);
    }
}
