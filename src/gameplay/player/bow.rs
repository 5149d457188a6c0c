//! Drawing, firing, and cancelling the bow.

use bevy::prelude::*;

use super::state::FireOutcome;
use super::{Player, PlayerState};
use crate::gameplay::arrows::{ArrowType, Quiver, spawn_arrow};
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Seconds a draw takes before a release is a legal shot.
const DRAW_SECS: f32 = 0.6;

/// Muzzle distance from the archer's center (pixels).
const ARROW_SPAWN_OFFSET: f32 = 22.0;

/// Number-key bindings for quiver selection.
const SELECT_KEYS: [(KeyCode, ArrowType); 4] = [
    (KeyCode::Digit1, ArrowType::Normal),
    (KeyCode::Digit2, ArrowType::Fire),
    (KeyCode::Digit3, ArrowType::Dissolve),
    (KeyCode::Digit4, ArrowType::TeamSwitch),
];

// === Messages ===

/// Presentation cues for animation/audio systems. The state machine never
/// plays anything itself; it only announces what happened.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BowCue {
    /// A draw began; start the draw animation.
    DrawStarted,
    /// An arrow went out.
    Released(ArrowType),
    /// The draw was abandoned; wind the animation back.
    Cancelled,
}

// === Components ===

/// Tracks an in-progress draw; a release is legal once it completes.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct DrawTimer(pub Timer);

impl Default for DrawTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(DRAW_SECS, TimerMode::Once))
    }
}

// === Systems ===

/// Completes an in-progress draw, making the release a legal shot.
/// Stands in for the draw-animation callback of the presentation layer.
fn complete_draw(
    time: Res<Time>,
    mut commands: Commands,
    mut players: Query<(Entity, &mut DrawTimer, &mut PlayerState)>,
) {
    for (entity, mut timer, mut state) in &mut players {
        timer.0.tick(time.delta());
        if timer.0.finished() {
            state.finish_draw();
            commands.entity(entity).remove::<DrawTimer>();
        }
    }
}

/// Number-key quiver selection. Locked while a draw is in progress so the
/// ammo check made at draw time stays valid through the release.
fn select_arrow(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<(&mut Quiver, &PlayerState), With<Player>>,
) {
    let Ok((mut quiver, state)) = players.single_mut() else {
        return;
    };
    if state.is_aiming() || state.is_dead() {
        return;
    }
    for (key, kind) in SELECT_KEYS {
        if keyboard.just_pressed(key) {
            quiver.select(kind);
        }
    }
}

/// Draw / fire / cancel edges from the mouse.
fn handle_bow_input(
    mouse: Res<ButtonInput<MouseButton>>,
    mut commands: Commands,
    mut cues: MessageWriter<BowCue>,
    mut players: Query<(Entity, &mut PlayerState, &mut Quiver, &Transform), With<Player>>,
) {
    let Ok((entity, mut state, mut quiver, transform)) = players.single_mut() else {
        return;
    };

    if mouse.just_pressed(MouseButton::Left)
        && state.try_draw(quiver.count(quiver.selected()))
    {
        commands.entity(entity).insert(DrawTimer::default());
        cues.write(BowCue::DrawStarted);
    }

    if mouse.just_released(MouseButton::Left) {
        match state.fire() {
            FireOutcome::Released => {
                let kind = quiver.selected();
                // The quiver is spent the moment the shot is taken; the spawn
                // is a deferred command whose outcome is never checked.
                let _ = quiver.try_consume(kind);

                let facing = (transform.rotation * Vec3::X).truncate();
                let muzzle = transform.translation.truncate() + facing * ARROW_SPAWN_OFFSET;
                spawn_arrow(&mut commands, kind, muzzle, facing);

                info!(
                    "loosed a {} arrow ({} left)",
                    kind.display_name(),
                    quiver.count(kind)
                );
                cues.write(BowCue::Released(kind));
            }
            FireOutcome::Cancelled => {
                commands.entity(entity).remove::<DrawTimer>();
                cues.write(BowCue::Cancelled);
            }
        }
    }

    if mouse.just_pressed(MouseButton::Right) && state.cancel_draw() {
        commands.entity(entity).remove::<DrawTimer>();
        cues.write(BowCue::Cancelled);
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_message::<BowCue>();
    app.register_type::<DrawTimer>();

    // complete_draw first so a draw finishing this frame can fire this frame.
    app.add_systems(
        Update,
        (complete_draw, select_arrow, handle_bow_input)
            .chain()
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );
}
