//! Damage intake, hit stun, and death.

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;

use super::bow::DrawTimer;
use super::{Player, PlayerState};
use crate::gameplay::Health;
use crate::menus::Menu;
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Seconds of hit stun after a non-lethal hit.
const HIT_STUN_SECS: f32 = 0.4;

// === Messages ===

/// Damage dealt to the archer.
#[derive(Message, Debug, Clone, Copy)]
pub struct DamageMessage {
    pub amount: f32,
}

// === Components ===

/// Hit stun recovery countdown. The recovery system clears the stun when it
/// runs out; nothing else does.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HitStunTimer(pub Timer);

impl Default for HitStunTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(HIT_STUN_SECS, TimerMode::Once))
    }
}

// === Systems ===

/// Applies incoming damage. Non-lethal hits stagger the archer; health never
/// drops below zero. Dead archers ignore everything.
fn apply_damage(
    mut messages: MessageReader<DamageMessage>,
    mut commands: Commands,
    mut players: Query<(Entity, &mut Health, &mut PlayerState), With<Player>>,
) {
    let Ok((entity, mut health, mut state)) = players.single_mut() else {
        return;
    };
    for damage in messages.read() {
        if state.is_dead() || damage.amount <= 0.0 {
            continue;
        }
        health.current = (health.current - damage.amount).max(0.0);
        if !health.is_depleted() && state.enter_hit_stun() {
            commands.entity(entity).insert(HitStunTimer::default());
        }
    }
}

/// Ends hit stun when the recovery timer runs out.
fn recover_from_hit_stun(
    time: Res<Time>,
    mut commands: Commands,
    mut players: Query<(Entity, &mut HitStunTimer, &mut PlayerState)>,
) {
    for (entity, mut timer, mut state) in &mut players {
        timer.0.tick(time.delta());
        if timer.0.finished() {
            state.clear_hit_stun();
            commands.entity(entity).remove::<HitStunTimer>();
        }
    }
}

/// Depleted health is terminal: the archer dies exactly once, movement stops,
/// input goes dark, and the death overlay opens.
fn check_death(
    mut commands: Commands,
    mut next_menu: ResMut<NextState<Menu>>,
    mut players: Query<(Entity, &Health, &mut PlayerState, &mut LinearVelocity), With<Player>>,
) {
    let Ok((entity, health, mut state, mut velocity)) = players.single_mut() else {
        return;
    };
    if !health.is_depleted() || state.is_dead() {
        return;
    }
    state.die();
    velocity.0 = Vec2::ZERO;
    commands
        .entity(entity)
        .remove::<(HitStunTimer, DrawTimer)>();
    info!("the archer has fallen");
    next_menu.set(Menu::Death);
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_message::<DamageMessage>();
    app.register_type::<HitStunTimer>();

    app.add_systems(
        Update,
        (apply_damage, recover_from_hit_stun)
            .chain()
            .in_set(GameSet::Combat)
            .run_if(gameplay_running),
    );

    app.add_systems(
        Update,
        check_death.in_set(GameSet::Death).run_if(gameplay_running),
    );
}
