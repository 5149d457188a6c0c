//! Gameplay domain plugins: arena, archer, arrows, lights, pickups, and HUD.

pub mod arrows;
pub mod hud;
pub mod level;
pub mod pickups;
pub mod player;
pub mod visibility;

use bevy::prelude::*;

/// Current and maximum hit points.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    /// Create at full health.
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Whether health has reached zero.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Health>();

    app.add_plugins((
        level::plugin,
        player::plugin,
        arrows::plugin,
        visibility::plugin,
        pickups::plugin,
        hud::plugin,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn health_new_sets_current_to_max() {
        let health = Health::new(100.0);
        assert_eq!(health.current, 100.0);
        assert_eq!(health.max, 100.0);
    }

    #[test]
    fn health_depleted_at_zero() {
        let mut health = Health::new(50.0);
        assert!(!health.is_depleted());
        health.current = 0.0;
        assert!(health.is_depleted());
    }
}
