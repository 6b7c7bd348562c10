// Motion resolver
//
// Translates the entity rectangle according to the mode the state machine
// settled on this tick, clamps it back onto the playable ground band, and
// tracks how long the entity has been running.

use crate::core::math::clamp;

use super::entity::Character;
use super::mode::Mode;

/// Lowest allowed bottom edge (nearest walkable row to the camera)
pub const GROUND_MAX: i32 = 726;
/// Highest allowed bottom edge (farthest walkable row)
pub const GROUND_MIN: i32 = 440;
/// Horizontal arena walls, applied to the left edge
pub const WALL_LEFT: i32 = 0;
pub const WALL_RIGHT: i32 = 1000;

/// Apply this tick's translation for the current mode
pub fn resolve(ch: &mut Character) {
    match ch.mode {
        Mode::Running => {
            ch.rect.left += ch.archetype.vel_x * ch.direction_x;
            ch.rect.top += ch.archetype.vel_y * ch.direction_y;
            ch.facing = ch.direction_x < 0;
        }
        Mode::Walking => {
            ch.rect.top += ch.archetype.vel_y * ch.direction_y;
            if ch.archetype.walk_strafe {
                // half-speed strafe
                ch.rect.left += ch.archetype.vel_x * ch.direction_x / 2;
            }
        }
        Mode::Jumping => {
            // Horizontal push only during the arc apex frames
            let start = ch.archetype.mode_start(Mode::Jumping);
            if ch.current_frame > start + 4 && ch.current_frame < start + 8 {
                ch.rect.left += if ch.facing {
                    ch.archetype.vel_x
                } else {
                    -ch.archetype.vel_x
                };
            }
        }
        Mode::RunAttack => {
            // 1.3x run speed, always toward facing
            let lunge = ch.archetype.vel_x * 13 / 10;
            ch.rect.left += if ch.facing { -lunge } else { lunge };
        }
        Mode::Idle | Mode::Attacking | Mode::Dying | Mode::Hurt => {}
    }

    let bottom = clamp(ch.rect.bottom(), GROUND_MIN, GROUND_MAX);
    ch.rect.set_bottom(bottom);
    ch.rect.left = clamp(ch.rect.left, WALL_LEFT, WALL_RIGHT);

    let sustains_run =
        ch.mode == Mode::Running || (ch.mode == Mode::RunAttack && ch.archetype.has_run_attack());
    if sustains_run {
        ch.running_time += 1;
    } else {
        ch.running_time = 0;
    }
}
