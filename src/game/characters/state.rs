// Mode transition gate

use super::entity::Character;
use super::mode::Mode;

/// Decide whether the mode changes this tick.
///
/// Priority order: death completion, then forced Dying (health gone), then
/// forced Hurt (damage observed), then the decision procedure's candidate.
/// An atomic mode rejects the change until its animation cursor has wrapped
/// back to the start of its own range, except that Hurt and Dying always
/// pre-empt whatever is playing.
pub fn advance_mode(ch: &mut Character, candidate: Mode) {
    // The dying animation wrapping back to its first frame is the completion
    // signal: only then does the entity actually die.
    if ch.mode == Mode::Dying && ch.current_frame == ch.archetype.mode_start(Mode::Dying) {
        ch.dead = true;
    }

    let next = if ch.health <= 0 {
        Mode::Dying
    } else if ch.last_health > ch.health {
        Mode::Hurt
    } else {
        candidate
    };

    if ch.mode == next {
        return;
    }

    let cycle_complete = ch.current_frame == ch.archetype.mode_start(ch.mode);
    let interruptible = !ch.archetype.is_atomic(ch.mode) || cycle_complete;

    if interruptible || next == Mode::Dying || next == Mode::Hurt {
        ch.mode = next;
        ch.current_frame = ch.archetype.mode_start(next);
        ch.frame_counter = 0;
    }
}
