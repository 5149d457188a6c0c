//! Development tools — only included with `cargo run --features dev`.
//!
//! Debug keys for exercising combat and inventory flows without a level
//! scripted to provide them. This module is stripped from release builds.

use bevy::prelude::*;

use crate::gameplay::arrows::{ArrowType, Quiver};
use crate::gameplay::pickups::PickupProximity;
use crate::gameplay::player::Player;
use crate::gameplay::player::bow::BowCue;
use crate::gameplay::player::damage::DamageMessage;
use crate::{GameSet, gameplay_running};

/// Damage dealt per H key press.
const DEBUG_HIT_DAMAGE: f32 = 25.0;

/// Arrows added to every slot per J key press.
const DEBUG_REFILL_AMOUNT: u32 = 5;

/// H: hurt the archer (drives hit stun and, eventually, the death overlay).
fn debug_hurt_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut damage: MessageWriter<DamageMessage>,
) {
    if keyboard.just_pressed(KeyCode::KeyH) {
        damage.write(DamageMessage {
            amount: DEBUG_HIT_DAMAGE,
        });
    }
}

/// J: top up every quiver slot.
fn debug_refill_quiver(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut players: Query<&mut Quiver, With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyJ) {
        return;
    }
    let Ok(mut quiver) = players.single_mut() else {
        return;
    };
    for &kind in ArrowType::ALL {
        quiver.add(kind, DEBUG_REFILL_AMOUNT);
    }
    debug!("quiver refilled");
}

/// Trace the presentation cues an animation/audio layer would consume.
fn log_gameplay_cues(
    mut bow_cues: MessageReader<BowCue>,
    mut pickup_cues: MessageReader<PickupProximity>,
) {
    for cue in bow_cues.read() {
        debug!("bow cue: {cue:?}");
    }
    for cue in pickup_cues.read() {
        debug!("pickup cue: {cue:?}");
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (debug_hurt_player, debug_refill_quiver)
            .in_set(GameSet::Input)
            .run_if(gameplay_running),
    );
    app.add_systems(
        Update,
        log_gameplay_cues
            .in_set(GameSet::Ui)
            .run_if(gameplay_running),
    );
}
