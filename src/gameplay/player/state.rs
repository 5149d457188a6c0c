//! The archer's locomotion/combat state machine.
//!
//! Pure data and transitions. Systems in the sibling modules feed it input
//! edges and apply the side effects (velocity caps, arrow spawning, cues);
//! the component itself never touches the ECS.

use bevy::prelude::*;

// === Constants ===

/// Walking speed (pixels per second).
pub const WALK_SPEED: f32 = 250.0;

/// Sprinting speed (pixels per second).
pub const RUN_SPEED: f32 = 600.0;

/// Movement speed while aiming (pixels per second).
pub const AIM_SPEED: f32 = 225.0;

/// Below this speed a sprint cannot start, and an active sprint is
/// force-stopped on the next frame.
pub const SPRINT_MIN_SPEED: f32 = 10.0;

// === State ===

/// Exclusive locomotion/combat stance. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Default)]
pub enum Stance {
    #[default]
    Idle,
    Sprinting,
    Aiming,
    Dodging,
    Dead,
}

/// Outcome of a fire-release edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// The shot goes out: spawn an arrow and consume ammo.
    Released,
    /// The release was not a legal shot; draw state was cancelled instead.
    Cancelled,
}

/// The archer's state machine.
///
/// Stances are exclusive by construction; `hit_stun` overlays any living
/// stance and suppresses cursor-facing and sprint starts until cleared.
#[derive(Component, Debug, Clone, Reflect, Default)]
#[reflect(Component)]
pub struct PlayerState {
    stance: Stance,
    drawing_bow: bool,
    can_fire: bool,
    hit_stun: bool,
}

impl PlayerState {
    // === Accessors ===

    #[must_use]
    pub const fn stance(&self) -> Stance {
        self.stance
    }

    #[must_use]
    pub const fn is_sprinting(&self) -> bool {
        matches!(self.stance, Stance::Sprinting)
    }

    #[must_use]
    pub const fn is_aiming(&self) -> bool {
        matches!(self.stance, Stance::Aiming)
    }

    #[must_use]
    pub const fn is_dodging(&self) -> bool {
        matches!(self.stance, Stance::Dodging)
    }

    #[must_use]
    pub const fn is_dead(&self) -> bool {
        matches!(self.stance, Stance::Dead)
    }

    #[must_use]
    pub const fn is_drawing_bow(&self) -> bool {
        self.drawing_bow
    }

    #[must_use]
    pub const fn can_fire(&self) -> bool {
        self.can_fire
    }

    #[must_use]
    pub const fn in_hit_stun(&self) -> bool {
        self.hit_stun
    }

    /// Current movement speed cap for this stance.
    #[must_use]
    pub const fn max_speed(&self) -> f32 {
        match self.stance {
            Stance::Sprinting => RUN_SPEED,
            Stance::Aiming => AIM_SPEED,
            Stance::Dead => 0.0,
            Stance::Idle | Stance::Dodging => WALK_SPEED,
        }
    }

    /// Whether the archer turns toward the mouse cursor this frame.
    /// While sprinting the archer faces its movement direction instead.
    #[must_use]
    pub const fn faces_cursor(&self) -> bool {
        matches!(self.stance, Stance::Idle | Stance::Aiming) && !self.hit_stun
    }

    /// Whether directional input moves the archer this frame.
    #[must_use]
    pub const fn accepts_move_input(&self) -> bool {
        !self.hit_stun && !matches!(self.stance, Stance::Dead | Stance::Dodging)
    }

    // === Transitions ===

    /// Idle → Sprinting. Requires the archer to already be moving.
    pub fn try_start_sprint(&mut self, current_speed: f32) -> bool {
        if self.stance != Stance::Idle || self.hit_stun || current_speed < SPRINT_MIN_SPEED {
            return false;
        }
        self.stance = Stance::Sprinting;
        true
    }

    /// Sprinting → Idle. No-op in any other stance.
    pub fn stop_sprint(&mut self) -> bool {
        if self.stance != Stance::Sprinting {
            return false;
        }
        self.stance = Stance::Idle;
        true
    }

    /// Idle → Aiming. Rejected while dodging/dead and when the selected ammo
    /// slot is empty. A draw attempt mid-sprint drops the sprint instead of
    /// aiming.
    pub fn try_draw(&mut self, selected_ammo: u32) -> bool {
        if self.stance == Stance::Sprinting {
            self.stance = Stance::Idle;
            return false;
        }
        if self.stance != Stance::Idle || selected_ammo == 0 {
            return false;
        }
        self.stance = Stance::Aiming;
        self.drawing_bow = true;
        true
    }

    /// The draw animation completed; a release is now a legal shot.
    pub fn finish_draw(&mut self) {
        if self.is_aiming() && self.drawing_bow {
            self.can_fire = true;
        }
    }

    /// Fire-release edge. A legal shot (aiming with a completed draw) passes
    /// through the momentary firing instant straight back to Idle; anything
    /// else degrades to cancel-draw semantics.
    pub fn fire(&mut self) -> FireOutcome {
        if self.is_aiming() && self.can_fire {
            self.stance = Stance::Idle;
            self.drawing_bow = false;
            self.can_fire = false;
            FireOutcome::Released
        } else {
            self.cancel_draw();
            FireOutcome::Cancelled
        }
    }

    /// Aiming → Idle, clearing all draw flags. Idempotent: acts only while
    /// aiming.
    pub fn cancel_draw(&mut self) -> bool {
        if !self.is_aiming() {
            return false;
        }
        self.stance = Stance::Idle;
        self.drawing_bow = false;
        self.can_fire = false;
        true
    }

    /// Idle/Sprinting → Dodging.
    pub fn try_dodge(&mut self) -> bool {
        if !matches!(self.stance, Stance::Idle | Stance::Sprinting) || self.hit_stun {
            return false;
        }
        self.stance = Stance::Dodging;
        true
    }

    /// Dodging → Idle. No-op in any other stance.
    pub fn end_dodge(&mut self) {
        if self.is_dodging() {
            self.stance = Stance::Idle;
        }
    }

    /// Overlay hit stun on any living stance.
    pub fn enter_hit_stun(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.hit_stun = true;
        true
    }

    /// Hit stun recovery, driven by the combat timer.
    pub fn clear_hit_stun(&mut self) {
        self.hit_stun = false;
    }

    /// Terminal. Clears every flag; no transition leaves `Dead`.
    pub fn die(&mut self) {
        self.stance = Stance::Dead;
        self.drawing_bow = false;
        self.can_fire = false;
        self.hit_stun = false;
    }
}
