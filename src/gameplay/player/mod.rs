//! The archer: components, spawn archetype, and the systems that drive it.

pub mod bow;
pub mod damage;
pub mod movement;
pub mod state;

use avian2d::prelude::*;
use bevy::prelude::*;

pub use state::{PlayerState, Stance};

use crate::gameplay::Health;
use crate::gameplay::arrows::Quiver;
use crate::gameplay::pickups::ActivePickup;
use crate::gameplay::visibility::InLight;
use crate::theme::palette;
use crate::third_party::CollisionLayer;
use crate::{GameState, Z_PLAYER};

// === Constants ===

/// Player collider radius (pixels).
pub const PLAYER_RADIUS: f32 = 14.0;

/// Player starting/maximum hit points.
pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Visual size of the archer sprite (pixels).
const PLAYER_SIZE: Vec2 = Vec2::new(26.0, 26.0);

// === Components ===

/// Marker for the player-controlled archer.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Spawn the archer with all required components.
/// Single source of truth for the player archetype.
pub fn spawn_player(commands: &mut Commands, position: Vec2) -> Entity {
    commands
        .spawn((
            Name::new("Archer"),
            Player,
            PlayerState::default(),
            Quiver::default(),
            Health::new(PLAYER_MAX_HEALTH),
            InLight::default(),
            ActivePickup::default(),
            Sprite::from_color(palette::PLAYER, PLAYER_SIZE),
            Transform::from_translation(position.extend(Z_PLAYER)),
            DespawnOnExit(GameState::InGame),
        ))
        .insert((
            RigidBody::Dynamic,
            Collider::circle(PLAYER_RADIUS),
            CollisionLayers::new(
                CollisionLayer::Pushbox,
                [CollisionLayer::Pushbox, CollisionLayer::Trigger],
            ),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::ZERO,
        ))
        .id()
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Player>().register_type::<PlayerState>();

    app.add_plugins((movement::plugin, bow::plugin, damage::plugin));
}
