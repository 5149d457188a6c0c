//! Color constants and font size tokens for consistent UI theming.

#![allow(dead_code)] // Constants populated ahead of use across multiple phases.

use bevy::prelude::*;

// === Text Colors ===

/// Header/title text color (white).
pub const HEADER_TEXT: Color = Color::WHITE;

/// Body/subtitle text color (light gray).
pub const BODY_TEXT: Color = Color::srgb(0.7, 0.7, 0.7);

/// Button label text color.
pub const BUTTON_TEXT: Color = Color::srgb(0.925, 0.925, 0.925);

/// Collect/interaction prompt text color (warm yellow).
pub const PROMPT_TEXT: Color = Color::srgb(1.0, 0.85, 0.3);

/// Selected quiver slot highlight.
pub const SELECTED_SLOT_TEXT: Color = Color::srgb(1.0, 0.85, 0.3);

/// The "safe" visibility indicator (muted green).
pub const HIDDEN_TEXT: Color = Color::srgb(0.35, 0.75, 0.4);

/// The "exposed" visibility indicator (alarm red).
pub const SPOTTED_TEXT: Color = Color::srgb(0.95, 0.3, 0.25);

// === UI Backgrounds ===

/// Semi-transparent dark overlay for pause/modal screens.
pub const OVERLAY_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

/// Panel background (dark blue-gray, nearly opaque).
pub const PANEL_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.15, 0.95);

/// Panel border (light blue-gray, semi-transparent).
pub const PANEL_BORDER: Color = Color::srgba(0.5, 0.5, 0.6, 0.8);

/// HUD bottom bar background.
pub const HUD_BACKGROUND: Color = Color::srgba(0.08, 0.08, 0.12, 0.85);

// === Button Colors ===

pub const BUTTON_BACKGROUND: Color = Color::srgb(0.275, 0.4, 0.75);
pub const BUTTON_HOVERED_BACKGROUND: Color = Color::srgb(0.384, 0.6, 0.82);
pub const BUTTON_PRESSED_BACKGROUND: Color = Color::srgb(0.239, 0.286, 0.6);

// === Arena Colors ===

/// Arena floor (near-black; darkness is the point).
pub const FLOOR: Color = Color::srgb(0.07, 0.07, 0.09);

/// Wall blocks.
pub const WALL: Color = Color::srgb(0.3, 0.3, 0.38);

/// Light fixture marker.
pub const LIGHT_FIXTURE: Color = Color::srgb(1.0, 0.95, 0.6);

// === Entity Colors ===

/// The archer.
pub const PLAYER: Color = Color::srgb(0.25, 0.55, 0.85);

/// Arrow pickup caches.
pub const PICKUP: Color = Color::srgb(0.6, 0.45, 0.2);

// === Font Size Tokens ===

pub const FONT_SIZE_TITLE: f32 = 72.0;
pub const FONT_SIZE_HEADER: f32 = 64.0;
pub const FONT_SIZE_LABEL: f32 = 32.0;
pub const FONT_SIZE_HUD: f32 = 24.0;
pub const FONT_SIZE_PROMPT: f32 = 24.0;
