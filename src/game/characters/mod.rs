// Character system
//
// - `mode`: the behavioral state enum and its table indexing
// - `archetype`: per-class descriptors and the animation table builder
// - `entity`: the character struct and its tick sequencing
// - `state`: the mode transition gate (atomicity rules)
// - `brain`: decision procedures (keyboard and chase AI)
// - `motion`: per-mode rectangle translation
// - `animation`: frame cursor advancement
// - `combat`: frame-windowed hit detection

pub mod animation;
pub mod archetype;
pub mod brain;
pub mod combat;
pub mod entity;
pub mod mode;
pub mod motion;
pub mod state;

pub use archetype::{
    load_archetype, Archetype, ArchetypeDef, KUNOICHI, SKELETON_SPEARMAN, SKELETON_WARRIOR,
};
pub use brain::Brain;
pub use entity::{Character, TargetView, MAX_HEALTH};
pub use mode::{Mode, MODE_COUNT};

#[cfg(test)]
pub(crate) mod testkit {
    //! Characters built from the roster defs with fixed frame counts, so
    //! tests never need sprite sheets on disk.

    use std::sync::Arc;

    use crate::core::math::Rect;

    use super::archetype::{Archetype, KUNOICHI, SKELETON_SPEARMAN, SKELETON_WARRIOR};
    use super::brain::Brain;
    use super::entity::Character;
    use super::mode::MODE_COUNT;

    pub const PLAYER_COUNTS: [usize; MODE_COUNT] = [8, 8, 12, 8, 10, 4, 3, 0];
    pub const WARRIOR_COUNTS: [usize; MODE_COUNT] = [4, 6, 0, 5, 8, 4, 3, 0];
    pub const SPEARMAN_COUNTS: [usize; MODE_COUNT] = [4, 6, 0, 5, 8, 4, 3, 5];

    pub const SPRITE_W: i32 = 248;
    pub const SPRITE_H: i32 = 256;

    pub fn player_at(left: i32, top: i32) -> Character {
        Character::new(
            Arc::new(Archetype::build(&KUNOICHI, &PLAYER_COUNTS)),
            Brain::Player,
            0,
            Rect::new(left, top, SPRITE_W, SPRITE_H),
        )
    }

    pub fn warrior_at(left: i32, top: i32) -> Character {
        Character::new(
            Arc::new(Archetype::build(&SKELETON_WARRIOR, &WARRIOR_COUNTS)),
            Brain::Chaser,
            1,
            Rect::new(left, top, SPRITE_W, SPRITE_H),
        )
    }

    pub fn spearman_at(left: i32, top: i32) -> Character {
        Character::new(
            Arc::new(Archetype::build(&SKELETON_SPEARMAN, &SPEARMAN_COUNTS)),
            Brain::Chaser,
            2,
            Rect::new(left, top, SPRITE_W, SPRITE_H),
        )
    }
}
