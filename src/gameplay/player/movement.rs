//! Archer movement: directional input, sprinting, dodging, and cursor facing.
//!
//! Within `GameSet::Movement` the systems are chained so the sprint-velocity
//! correction always lands before cursor rotation.

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::state::SPRINT_MIN_SPEED;
use super::{Player, PlayerState};
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Dodge roll speed (pixels per second).
const DODGE_SPEED: f32 = 750.0;

/// Dodge roll duration (seconds).
const DODGE_SECS: f32 = 0.35;

// === Components ===

/// An in-flight dodge roll. Owns the archer's velocity while present.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct DodgeRoll {
    pub timer: Timer,
    pub direction: Vec2,
}

impl DodgeRoll {
    fn new(direction: Vec2) -> Self {
        Self {
            timer: Timer::from_seconds(DODGE_SECS, TimerMode::Once),
            direction,
        }
    }
}

// === Helpers ===

/// WASD input as a normalized direction, or zero when idle.
fn wasd_direction(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    direction.normalize_or_zero()
}

// === Systems ===

/// Sprint press/release edges.
/// Runs in `GameSet::Input`.
fn handle_sprint_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<(&mut PlayerState, &LinearVelocity), With<Player>>,
) {
    let Ok((mut state, velocity)) = players.single_mut() else {
        return;
    };
    if keyboard.just_pressed(KeyCode::ShiftLeft) {
        state.try_start_sprint(velocity.length());
    }
    if keyboard.just_released(KeyCode::ShiftLeft) {
        state.stop_sprint();
    }
}

/// Dodge press edge. The roll direction is the current movement input,
/// falling back to the archer's facing when standing still.
/// Runs in `GameSet::Input`.
fn handle_dodge_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut players: Query<(Entity, &mut PlayerState, &Transform), With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }
    let Ok((entity, mut state, transform)) = players.single_mut() else {
        return;
    };
    if !state.try_dodge() {
        return;
    }
    let input = wasd_direction(&keyboard);
    let direction = if input == Vec2::ZERO {
        (transform.rotation * Vec3::X).truncate()
    } else {
        input
    };
    commands.entity(entity).insert(DodgeRoll::new(direction));
}

/// Forces a sprint stop when the archer is no longer actually moving.
/// First link of the `GameSet::Movement` chain.
fn enforce_sprint_velocity(mut players: Query<(&mut PlayerState, &LinearVelocity), With<Player>>) {
    for (mut state, velocity) in &mut players {
        if state.is_sprinting() && velocity.length() <= SPRINT_MIN_SPEED {
            state.stop_sprint();
        }
    }
}

/// Advances an active dodge roll and returns to Idle when it ends.
fn tick_dodge_roll(
    time: Res<Time>,
    mut commands: Commands,
    mut players: Query<(Entity, &mut DodgeRoll, &mut PlayerState, &mut LinearVelocity)>,
) {
    for (entity, mut roll, mut state, mut velocity) in &mut players {
        roll.timer.tick(time.delta());
        if roll.timer.finished() {
            state.end_dodge();
            velocity.0 = Vec2::ZERO;
            commands.entity(entity).remove::<DodgeRoll>();
        } else {
            velocity.0 = roll.direction * DODGE_SPEED;
        }
    }
}

/// Writes directional input into the velocity at the stance speed cap.
/// Hit-stunned or dead archers stop; an active dodge roll owns the velocity.
fn apply_move_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<(&mut LinearVelocity, &PlayerState), With<Player>>,
) {
    for (mut velocity, state) in &mut players {
        if state.is_dodging() {
            continue;
        }
        if !state.accepts_move_input() {
            velocity.0 = Vec2::ZERO;
            continue;
        }
        velocity.0 = wasd_direction(&keyboard) * state.max_speed();
    }
}

/// Turns the archer toward the mouse cursor, or toward its own movement while
/// sprinting. Suppressed while dodging, hit-stunned, or dead. A missing
/// window, camera, or cursor means no rotation this frame.
fn rotate_archer(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut players: Query<(&mut Transform, &PlayerState, &LinearVelocity), With<Player>>,
) {
    let cursor_world = windows.single().ok().and_then(|window| {
        let cursor = window.cursor_position()?;
        let (camera, camera_transform) = cameras.single().ok()?;
        camera.viewport_to_world_2d(camera_transform, cursor).ok()
    });

    for (mut transform, state, velocity) in &mut players {
        if state.is_sprinting() {
            if velocity.length() > SPRINT_MIN_SPEED {
                transform.rotation = Quat::from_rotation_z(velocity.to_angle());
            }
            continue;
        }
        if !state.faces_cursor() {
            continue;
        }
        let Some(cursor) = cursor_world else {
            continue;
        };
        let to_cursor = cursor - transform.translation.truncate();
        if to_cursor.length_squared() > f32::EPSILON {
            transform.rotation = Quat::from_rotation_z(to_cursor.to_angle());
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<DodgeRoll>();

    app.add_systems(
        Update,
        (handle_sprint_input, handle_dodge_input)
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );

    // Sprint correction is evaluated before rotation, every frame.
    app.add_systems(
        Update,
        (
            enforce_sprint_velocity,
            tick_dodge_roll,
            apply_move_input,
            rotate_archer,
        )
            .chain()
            .in_set(GameSet::Movement)
            .run_if(gameplay_running),
    );
}
