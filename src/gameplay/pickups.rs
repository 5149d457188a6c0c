//! Ammo pickups and the overlap dispatcher.
//!
//! Pickups are sensor volumes. A poll-and-diff dispatcher turns raw sensor
//! contacts into exactly-once enter/leave messages for inventory and UI
//! consumers; the archer never owns a pickup, it only tracks which one it is
//! currently standing in.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::gameplay::arrows::{ArrowType, Quiver};
use crate::gameplay::player::{Player, PlayerState};
use crate::theme::palette;
use crate::third_party::CollisionLayer;
use crate::{GameSet, GameState, Z_PICKUP, gameplay_running};

// === Constants ===

/// Pickup trigger radius (pixels).
const PICKUP_RADIUS: f32 = 40.0;

/// Visual size of a pickup cache (pixels).
const PICKUP_SIZE: Vec2 = Vec2::new(22.0, 22.0);

// === Components ===

/// Marker for ammo pickups.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Pickup;

/// The arrows a pickup restocks, slot-for-slot with the quiver.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PickupStock(pub [u32; ArrowType::ALL.len()]);

impl PickupStock {
    /// (kind, amount) pairs for every non-empty slot.
    pub fn iter(&self) -> impl Iterator<Item = (ArrowType, u32)> + '_ {
        ArrowType::ALL
            .iter()
            .copied()
            .zip(self.0.iter().copied())
            .filter(|&(_, n)| n > 0)
    }
}

/// The pickup the archer currently stands in, if any. Set on enter, cleared
/// on leave by the dispatcher alone.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ActivePickup(pub Option<Entity>);

// === Messages ===

/// Exactly-once overlap notifications.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupProximity {
    /// The archer stepped into a pickup's trigger volume.
    Entered(Entity),
    /// The archer stepped out (or the pickup is gone).
    Left(Entity),
}

/// Spawn an ammo pickup at `position`.
/// Single source of truth for the pickup archetype.
pub fn spawn_pickup(commands: &mut Commands, position: Vec2, stock: PickupStock) -> Entity {
    commands
        .spawn((
            Name::new("Arrow Cache"),
            Pickup,
            stock,
            Sprite::from_color(palette::PICKUP, PICKUP_SIZE),
            Transform::from_translation(position.extend(Z_PICKUP)),
            DespawnOnExit(GameState::InGame),
            // Physics: static sensor that only notices the archer
            RigidBody::Static,
            Collider::circle(PICKUP_RADIUS),
            Sensor,
            CollisionLayers::new(CollisionLayer::Trigger, CollisionLayer::Pushbox),
            CollidingEntities::default(),
        ))
        .id()
}

// === Systems ===

/// Diffs sensor contacts into enter/leave messages and keeps the archer's
/// `ActivePickup` reference current. Emits each edge exactly once per
/// overlap, no matter how many frames the overlap lasts.
fn dispatch_pickup_overlaps(
    mut messages: MessageWriter<PickupProximity>,
    mut players: Query<(Entity, &mut ActivePickup), With<Player>>,
    pickups: Query<(Entity, &CollidingEntities), With<Pickup>>,
) {
    let Ok((player, mut active)) = players.single_mut() else {
        return;
    };

    let current = pickups
        .iter()
        .find(|(_, colliding)| colliding.0.contains(&player))
        .map(|(entity, _)| entity);

    if active.0 == current {
        return;
    }
    if let Some(old) = active.0 {
        messages.write(PickupProximity::Left(old));
    }
    if let Some(new) = current {
        debug!("standing in a pickup");
        messages.write(PickupProximity::Entered(new));
    }
    active.0 = current;
}

/// Transfers the active pickup's stock into the quiver on F.
/// The `ActivePickup` reference is left for the dispatcher to clear, so the
/// leave message still fires exactly once.
fn collect_active_pickup(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut players: Query<(&ActivePickup, &mut Quiver, &PlayerState), With<Player>>,
    stocks: Query<&PickupStock, With<Pickup>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyF) {
        return;
    }
    let Ok((active, mut quiver, state)) = players.single_mut() else {
        return;
    };
    if state.is_dead() {
        return;
    }
    let Some(entity) = active.0 else {
        return;
    };
    let Ok(stock) = stocks.get(entity) else {
        return;
    };
    for (kind, n) in stock.iter() {
        quiver.add(kind, n);
    }
    info!("restocked the quiver");
    commands.entity(entity).despawn();
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_message::<PickupProximity>();
    app.register_type::<Pickup>()
        .register_type::<PickupStock>()
        .register_type::<ActivePickup>();

    app.add_systems(
        Update,
        (dispatch_pickup_overlaps, collect_active_pickup)
            .chain()
            .in_set(GameSet::Pickups)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_entity_count;
    use bevy::ecs::entity::hash_set::EntityHashSet;
    use pretty_assertions::assert_eq;

    /// Messages recorded through the same reader API real consumers use.
    #[derive(Resource, Default)]
    struct ProximityLog(Vec<PickupProximity>);

    fn record(mut reader: MessageReader<PickupProximity>, mut log: ResMut<ProximityLog>) {
        log.0.extend(reader.read().copied());
    }

    fn create_pickup_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_message::<PickupProximity>();
        app.init_resource::<ProximityLog>();
        app.add_systems(
            Update,
            (dispatch_pickup_overlaps, collect_active_pickup, record).chain(),
        );
        app
    }

    fn spawn_test_archer(world: &mut World) -> Entity {
        world
            .spawn((
                Player,
                PlayerState::default(),
                ActivePickup::default(),
                Quiver::uniform(0),
            ))
            .id()
    }

    /// Spawn a pickup without physics, with a hand-rolled contact set
    /// standing in for the collision pipeline.
    fn spawn_test_pickup(world: &mut World, stock: [u32; 4], colliding: &[Entity]) -> Entity {
        world
            .spawn((
                Pickup,
                PickupStock(stock),
                CollidingEntities(EntityHashSet::from_iter(colliding.iter().copied())),
            ))
            .id()
    }

    fn set_overlap(app: &mut App, pickup: Entity, with: &[Entity]) {
        app.world_mut()
            .get_mut::<CollidingEntities>(pickup)
            .unwrap()
            .0 = EntityHashSet::from_iter(with.iter().copied());
    }

    fn logged(app: &App) -> Vec<PickupProximity> {
        app.world().resource::<ProximityLog>().0.clone()
    }

    #[test]
    fn enter_fires_exactly_once_across_overlap_frames() {
        let mut app = create_pickup_test_app();
        let archer = spawn_test_archer(app.world_mut());
        let pickup = spawn_test_pickup(app.world_mut(), [5, 0, 0, 0], &[archer]);

        app.update();
        app.update();
        app.update();

        assert_eq!(logged(&app), vec![PickupProximity::Entered(pickup)]);
        let active = app.world().get::<ActivePickup>(archer).unwrap();
        assert_eq!(active.0, Some(pickup));
    }

    #[test]
    fn leave_fires_exactly_once_after_exit() {
        let mut app = create_pickup_test_app();
        let archer = spawn_test_archer(app.world_mut());
        let pickup = spawn_test_pickup(app.world_mut(), [5, 0, 0, 0], &[archer]);

        app.update();
        set_overlap(&mut app, pickup, &[]);
        app.update();
        app.update();

        assert_eq!(
            logged(&app),
            vec![
                PickupProximity::Entered(pickup),
                PickupProximity::Left(pickup)
            ]
        );
        let active = app.world().get::<ActivePickup>(archer).unwrap();
        assert_eq!(active.0, None);
    }

    #[test]
    fn reentry_fires_a_fresh_enter() {
        let mut app = create_pickup_test_app();
        let archer = spawn_test_archer(app.world_mut());
        let pickup = spawn_test_pickup(app.world_mut(), [5, 0, 0, 0], &[archer]);

        app.update();
        set_overlap(&mut app, pickup, &[]);
        app.update();
        set_overlap(&mut app, pickup, &[archer]);
        app.update();

        assert_eq!(
            logged(&app),
            vec![
                PickupProximity::Entered(pickup),
                PickupProximity::Left(pickup),
                PickupProximity::Entered(pickup)
            ]
        );
    }

    #[test]
    fn switching_pickups_leaves_then_enters() {
        let mut app = create_pickup_test_app();
        let archer = spawn_test_archer(app.world_mut());
        let first = spawn_test_pickup(app.world_mut(), [5, 0, 0, 0], &[archer]);
        let second = spawn_test_pickup(app.world_mut(), [0, 2, 0, 0], &[]);

        app.update();
        set_overlap(&mut app, first, &[]);
        set_overlap(&mut app, second, &[archer]);
        app.update();

        assert_eq!(
            logged(&app),
            vec![
                PickupProximity::Entered(first),
                PickupProximity::Left(first),
                PickupProximity::Entered(second)
            ]
        );
    }

    #[test]
    fn other_actors_in_the_trigger_are_ignored() {
        let mut app = create_pickup_test_app();
        let archer = spawn_test_archer(app.world_mut());
        let stray = app.world_mut().spawn_empty().id();
        spawn_test_pickup(app.world_mut(), [5, 0, 0, 0], &[stray]);

        app.update();

        assert!(logged(&app).is_empty());
        let active = app.world().get::<ActivePickup>(archer).unwrap();
        assert_eq!(active.0, None);
    }

    #[test]
    fn collect_restocks_quiver_and_despawns_pickup() {
        let mut app = create_pickup_test_app();
        let archer = spawn_test_archer(app.world_mut());
        let pickup = spawn_test_pickup(app.world_mut(), [5, 2, 0, 1], &[archer]);

        app.update(); // Enter
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyF);
        app.update(); // Collect

        let quiver = app.world().get::<Quiver>(archer).unwrap();
        assert_eq!(quiver.count(ArrowType::Normal), 5);
        assert_eq!(quiver.count(ArrowType::Fire), 2);
        assert_eq!(quiver.count(ArrowType::Dissolve), 0);
        assert_eq!(quiver.count(ArrowType::TeamSwitch), 1);
        assert_entity_count::<With<Pickup>>(&mut app, 0);

        // The dispatcher notices the pickup is gone and emits the leave edge
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
        app.update();
        assert!(logged(&app).contains(&PickupProximity::Left(pickup)));
        let active = app.world().get::<ActivePickup>(archer).unwrap();
        assert_eq!(active.0, None);
    }

    #[test]
    fn dead_archer_cannot_collect() {
        let mut app = create_pickup_test_app();
        let archer = spawn_test_archer(app.world_mut());
        spawn_test_pickup(app.world_mut(), [5, 0, 0, 0], &[archer]);
        app.world_mut()
            .get_mut::<PlayerState>(archer)
            .unwrap()
            .die();

        app.update(); // Enter
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyF);
        app.update();

        let quiver = app.world().get::<Quiver>(archer).unwrap();
        assert_eq!(quiver.count(ArrowType::Normal), 0);
        assert_entity_count::<With<Pickup>>(&mut app, 1);
    }

    #[test]
    fn collect_without_active_pickup_is_a_no_op() {
        let mut app = create_pickup_test_app();
        let archer = spawn_test_archer(app.world_mut());

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyF);
        app.update();

        let quiver = app.world().get::<Quiver>(archer).unwrap();
        for &kind in ArrowType::ALL {
            assert_eq!(quiver.count(kind), 0);
        }
    }
}
