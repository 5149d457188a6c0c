//! In-game HUD: health, quiver counters, visibility indicator, pickup prompt.

use bevy::prelude::*;

use crate::gameplay::Health;
use crate::gameplay::arrows::{ArrowType, Quiver};
use crate::gameplay::pickups::ActivePickup;
use crate::gameplay::player::Player;
use crate::gameplay::visibility::InLight;
use crate::theme::palette;
use crate::{GameSet, GameState, gameplay_running};

// === Components ===

/// Marker for the health text.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HealthReadout;

/// Marker for one quiver slot counter.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct QuiverSlotReadout(pub ArrowType);

/// Marker for the hidden/spotted indicator.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct VisibilityReadout;

/// Marker for the collect prompt, visible only inside a pickup.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PickupPrompt;

// === Systems ===

fn slot_text(kind: ArrowType, count: u32) -> String {
    format!("{} x{count}", kind.display_name())
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("HUD Bottom Bar"),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Px(48.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::SpaceBetween,
            padding: UiRect::horizontal(Val::Px(24.0)),
            column_gap: Val::Px(24.0),
            ..default()
        },
        BackgroundColor(palette::HUD_BACKGROUND),
        DespawnOnExit(GameState::InGame),
        children![
            (
                Text::new("HP 100"),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::BODY_TEXT),
                HealthReadout,
            ),
            (
                Text::new(slot_text(ArrowType::Normal, 0)),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::BODY_TEXT),
                QuiverSlotReadout(ArrowType::Normal),
            ),
            (
                Text::new(slot_text(ArrowType::Fire, 0)),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::BODY_TEXT),
                QuiverSlotReadout(ArrowType::Fire),
            ),
            (
                Text::new(slot_text(ArrowType::Dissolve, 0)),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::BODY_TEXT),
                QuiverSlotReadout(ArrowType::Dissolve),
            ),
            (
                Text::new(slot_text(ArrowType::TeamSwitch, 0)),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::BODY_TEXT),
                QuiverSlotReadout(ArrowType::TeamSwitch),
            ),
            (
                Text::new("F - Collect"),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::PROMPT_TEXT),
                Visibility::Hidden,
                PickupPrompt,
            ),
            (
                Text::new("HIDDEN"),
                TextFont::from_font_size(palette::FONT_SIZE_HUD),
                TextColor(palette::HIDDEN_TEXT),
                VisibilityReadout,
            ),
        ],
    ));
}

fn update_health_readout(
    players: Query<&Health, With<Player>>,
    mut readout: Single<&mut Text, With<HealthReadout>>,
) {
    let Ok(health) = players.single() else {
        return;
    };
    **readout = Text::new(format!("HP {:.0}", health.current));
}

/// Refreshes the four slot counters and highlights the selected one.
fn update_quiver_readout(
    players: Query<&Quiver, With<Player>>,
    mut slots: Query<(&QuiverSlotReadout, &mut Text, &mut TextColor)>,
) {
    let Ok(quiver) = players.single() else {
        return;
    };
    for (slot, mut text, mut color) in &mut slots {
        *text = Text::new(slot_text(slot.0, quiver.count(slot.0)));
        color.0 = if quiver.selected() == slot.0 {
            palette::SELECTED_SLOT_TEXT
        } else {
            palette::BODY_TEXT
        };
    }
}

fn update_visibility_readout(
    players: Query<&InLight, With<Player>>,
    mut readout: Single<(&mut Text, &mut TextColor), With<VisibilityReadout>>,
) {
    let Ok(in_light) = players.single() else {
        return;
    };
    let (text, color) = &mut *readout;
    if in_light.0 {
        ***text = "SPOTTED".to_string();
        color.0 = palette::SPOTTED_TEXT;
    } else {
        ***text = "HIDDEN".to_string();
        color.0 = palette::HIDDEN_TEXT;
    }
}

fn update_pickup_prompt(
    players: Query<&ActivePickup, With<Player>>,
    mut prompt: Single<&mut Visibility, With<PickupPrompt>>,
) {
    let Ok(active) = players.single() else {
        return;
    };
    **prompt = if active.0.is_some() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<HealthReadout>()
        .register_type::<QuiverSlotReadout>()
        .register_type::<VisibilityReadout>()
        .register_type::<PickupPrompt>();

    app.add_systems(OnEnter(GameState::InGame), spawn_hud);

    app.add_systems(
        Update,
        (
            update_health_readout,
            update_quiver_readout,
            update_visibility_readout,
            update_pickup_prompt,
        )
            .in_set(GameSet::Ui)
            .run_if(gameplay_running),
    );
}
