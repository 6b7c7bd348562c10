// Decision procedures
//
// Each tick a brain proposes a candidate mode and sets the movement intent;
// the state machine decides whether the proposal is accepted. Brains never
// write `mode` themselves.

use crate::engine::input::{Action, KeySnapshot};

use super::entity::{Character, TargetView};
use super::mode::Mode;

/// Who drives a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brain {
    /// Keyboard-driven
    Player,
    /// Distance-threshold AI: patrols far from the target, chases an
    /// engagement point beside it, attacks at contact. Classes whose
    /// descriptor defines a lunge also charge after a sustained run.
    Chaser,
}

/// Engagement distance beyond which a chaser patrols instead of chasing
const PATROL_DISTANCE: i32 = 600;

/// Position tolerance for chase steering and the attack trigger
const NEAR: i32 = 10;

/// Horizontal distance inside which a lunge may start
const LUNGE_DISTANCE: i32 = 120;

/// Ticks of sustained running required before a lunge
const LUNGE_RUN_UP: u32 = 30;

// Patrol cycle boundaries, in ticks
const PATROL_IDLE_UNTIL: u32 = 60;
const PATROL_OUT_UNTIL: u32 = 90;
const PATROL_REST_UNTIL: u32 = 150;
const PATROL_BACK_UNTIL: u32 = 180;

/// Candidate mode from the pressed-key snapshot
pub(super) fn player_candidate(ch: &mut Character, keys: &KeySnapshot) -> Mode {
    ch.direction_x = keys.horizontal();
    ch.direction_y = keys.vertical();

    if keys.is_pressed(Action::Jump) {
        Mode::Jumping
    } else if keys.is_pressed(Action::Attack) {
        Mode::Attacking
    } else if ch.direction_x != 0 {
        Mode::Running
    } else if ch.direction_y != 0 {
        Mode::Walking
    } else {
        Mode::Idle
    }
}

/// Candidate mode for an AI chaser
pub(super) fn chase_candidate(ch: &mut Character, target: &TargetView) -> Mode {
    // Aim for the point one attack range short of the target, on whichever
    // side we already are
    let side: i32 = if ch.rect.left < target.left { -1 } else { 1 };
    let dist_x = (target.left - ch.rect.left + ch.archetype.attack_range * side).abs();
    let dist_y = (target.top - ch.rect.top).abs();

    if dist_x > PATROL_DISTANCE {
        return patrol(ch);
    }

    // The lunge only unlocks after a sustained chase, so it cannot be
    // spammed from a standstill
    if ch.archetype.has_run_attack()
        && dist_x <= LUNGE_DISTANCE
        && dist_y <= NEAR
        && matches!(ch.mode, Mode::Running | Mode::RunAttack)
        && ch.running_time > LUNGE_RUN_UP
    {
        return Mode::RunAttack;
    }

    if dist_x <= NEAR && dist_y <= NEAR {
        if ch.mode != Mode::Attacking {
            ch.facing = side == 1;
        }
        return Mode::Attacking;
    }

    ch.direction_x = if dist_x > NEAR {
        if ch.rect.left < target.left + ch.archetype.attack_range * side {
            1
        } else {
            -1
        }
    } else {
        0
    };
    ch.direction_y = if dist_y > NEAR {
        if ch.rect.top < target.top {
            1
        } else {
            -1
        }
    } else {
        0
    };
    Mode::Running
}

// Deterministic wander loop driven by the free-running patrol counter:
// stand, pace right, stand, pace back, repeat.
fn patrol(ch: &mut Character) -> Mode {
    ch.idle_counter += 1;
    if ch.idle_counter < PATROL_IDLE_UNTIL {
        Mode::Idle
    } else if ch.idle_counter < PATROL_OUT_UNTIL {
        ch.direction_x = 1;
        ch.direction_y = 0;
        ch.facing = false;
        Mode::Walking
    } else if ch.idle_counter < PATROL_REST_UNTIL {
        Mode::Idle
    } else if ch.idle_counter < PATROL_BACK_UNTIL {
        ch.direction_x = -1;
        ch.direction_y = 0;
        ch.facing = true;
        Mode::Walking
    } else {
        ch.idle_counter = 0;
        Mode::Idle
    }
}
