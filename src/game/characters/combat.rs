// Melee combat resolver
//
// A strike only lands on specific frames of the attack animation (the hit
// window) and only inside a narrow horizontal band one attack range in front
// of the attacker. Both attack kinds share the geometry; they differ in
// which frame offsets are live.

use super::entity::Character;
use super::mode::Mode;

/// Half-width of the horizontal band in which a strike connects
pub const HIT_SLACK: i32 = 15;

/// Whether `attacker` lands a hit on `target` this tick
pub fn hits(attacker: &Character, target: &Character) -> bool {
    // A target already reeling or falling cannot be hit again
    if matches!(target.mode, Mode::Hurt | Mode::Dying) {
        return false;
    }

    let in_window = match attacker.mode {
        Mode::Attacking => attacker
            .archetype
            .attack_hit_frames
            .contains(&attacker.frame_offset()),
        Mode::RunAttack => attacker
            .archetype
            .run_attack_hit_frames
            .contains(&attacker.frame_offset()),
        _ => false,
    };
    if !in_window {
        return false;
    }

    let dx = target.rect.left - attacker.rect.left;
    let range = attacker.archetype.attack_range;
    if attacker.facing {
        dx < 0 && (dx + range).abs() <= HIT_SLACK
    } else {
        dx > 0 && (dx - range).abs() <= HIT_SLACK
    }
}
