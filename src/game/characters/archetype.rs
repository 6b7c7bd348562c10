// Archetype descriptors and the animation table builder

use std::ops::Range;
use std::sync::Arc;

use anyhow::Result;
use image::RgbaImage;
use log::info;

use crate::engine::assets::SheetLibrary;

use super::mode::{Mode, MODE_COUNT};

/// Modes whose animation must run to completion before a normal transition
/// is accepted. Hurt and Dying still pre-empt them.
const ATOMIC_MODES: [Mode; 5] = [
    Mode::Jumping,
    Mode::Attacking,
    Mode::Dying,
    Mode::Hurt,
    Mode::RunAttack,
];

/// Compiled-in move table for one character class.
///
/// `sheets[mode]` lists the sprite sheets contributing frames to that mode,
/// in playback order; an empty list makes the mode structurally unreachable
/// for the class (the warrior cannot jump, only the spearman can lunge).
pub struct ArchetypeDef {
    pub name: &'static str,
    pub sheet_dir: &'static str,
    pub sheets: [&'static [&'static str]; MODE_COUNT],
    pub anim_speed: [u32; MODE_COUNT],
    pub vel_x: i32,
    pub vel_y: i32,
    pub attack_range: i32,
    pub attack_hit_frames: &'static [usize],
    pub run_attack_hit_frames: &'static [usize],
    pub damage: i32,
    pub walk_strafe: bool,
}

/// The player character
pub const KUNOICHI: ArchetypeDef = ArchetypeDef {
    name: "kunoichi",
    sheet_dir: "kunoichi",
    sheets: [
        &["idle.png"],
        &["run.png"],
        &["jump.png"],
        &["walk.png"],
        &["attack_1.png", "attack_2.png"],
        &["dead.png"],
        &["hurt.png"],
        &[],
    ],
    anim_speed: [7, 4, 4, 3, 3, 10, 20, 5],
    vel_x: 15,
    vel_y: 7,
    attack_range: 70,
    attack_hit_frames: &[2, 6],
    run_attack_hit_frames: &[],
    damage: 10,
    walk_strafe: true,
};

/// Melee chaser
pub const SKELETON_WARRIOR: ArchetypeDef = ArchetypeDef {
    name: "skeleton_warrior",
    sheet_dir: "skeleton_warrior",
    sheets: [
        &["idle.png"],
        &["run.png"],
        &[],
        &["walk.png"],
        &["attack_1.png", "attack_2.png", "attack_3.png"],
        &["dead.png"],
        &["hurt.png"],
        &[],
    ],
    anim_speed: [7, 5, 0, 8, 3, 10, 10, 5],
    vel_x: 7,
    vel_y: 3,
    attack_range: 70,
    attack_hit_frames: &[2, 6],
    run_attack_hit_frames: &[],
    damage: 10,
    walk_strafe: false,
};

/// Chaser with a charging lunge
pub const SKELETON_SPEARMAN: ArchetypeDef = ArchetypeDef {
    name: "skeleton_spearman",
    sheet_dir: "skeleton_spearman",
    sheets: [
        &["idle.png"],
        &["run.png"],
        &[],
        &["walk.png"],
        &["attack_1.png", "attack_2.png"],
        &["dead.png"],
        &["hurt.png"],
        &["run_attack.png"],
    ],
    anim_speed: [7, 5, 0, 8, 3, 10, 10, 5],
    vel_x: 10,
    vel_y: 5,
    attack_range: 70,
    attack_hit_frames: &[2, 6],
    run_attack_hit_frames: &[1, 2, 3],
    damage: 10,
    walk_strafe: false,
};

/// Immutable per-class constants, shared by every instance of the class.
///
/// `frames` is the cumulative boundary table over the flattened frame list:
/// mode `m` owns indices `frames[m] .. frames[m + 1]`. Built once at startup
/// and never mutated; entities hold it behind an `Arc`.
#[derive(Debug)]
pub struct Archetype {
    pub name: &'static str,
    pub anim_speed: [u32; MODE_COUNT],
    pub frames: [usize; MODE_COUNT + 1],
    pub vel_x: i32,
    pub vel_y: i32,
    pub attack_range: i32,
    pub attack_hit_frames: &'static [usize],
    pub run_attack_hit_frames: &'static [usize],
    pub damage: i32,
    pub atomic: [bool; MODE_COUNT],
    pub walk_strafe: bool,
}

impl Archetype {
    /// Build the descriptor from per-mode frame counts.
    ///
    /// A zero count yields an empty range: that mode exists in the tables but
    /// can never be displayed, and the decision procedures never propose it.
    pub fn build(def: &ArchetypeDef, mode_counts: &[usize; MODE_COUNT]) -> Self {
        let mut frames = [0usize; MODE_COUNT + 1];
        for (i, count) in mode_counts.iter().enumerate() {
            frames[i + 1] = frames[i] + count;
        }

        let mut atomic = [false; MODE_COUNT];
        for mode in ATOMIC_MODES {
            atomic[mode.index()] = true;
        }

        Self {
            name: def.name,
            anim_speed: def.anim_speed,
            frames,
            vel_x: def.vel_x,
            vel_y: def.vel_y,
            attack_range: def.attack_range,
            attack_hit_frames: def.attack_hit_frames,
            run_attack_hit_frames: def.run_attack_hit_frames,
            damage: def.damage,
            atomic,
            walk_strafe: def.walk_strafe,
        }
    }

    /// First frame index of a mode's range
    pub fn mode_start(&self, mode: Mode) -> usize {
        self.frames[mode.index()]
    }

    /// One past the last frame index of a mode's range
    pub fn mode_end(&self, mode: Mode) -> usize {
        self.frames[mode.index() + 1]
    }

    pub fn mode_range(&self, mode: Mode) -> Range<usize> {
        self.mode_start(mode)..self.mode_end(mode)
    }

    pub fn is_atomic(&self, mode: Mode) -> bool {
        self.atomic[mode.index()]
    }

    /// Whether this class has a lunge attack at all
    pub fn has_run_attack(&self) -> bool {
        !self.run_attack_hit_frames.is_empty()
    }

    pub fn total_frames(&self) -> usize {
        self.frames[MODE_COUNT]
    }
}

/// Load an archetype's sheets, slice them, and build the descriptor.
///
/// Returns the shared descriptor plus the flattened frame images in table
/// order. Any sheet failure is fatal: the frame-index arithmetic everywhere
/// else assumes a well-formed boundary table, so no partial descriptor is
/// ever produced.
pub fn load_archetype(
    library: &SheetLibrary,
    def: &ArchetypeDef,
) -> Result<(Arc<Archetype>, Vec<RgbaImage>)> {
    let sliced = library.slice_groups(def.sheet_dir, &def.sheets)?;

    let mut counts = [0usize; MODE_COUNT];
    counts.copy_from_slice(&sliced.counts);

    let archetype = Arc::new(Archetype::build(def, &counts));
    info!(
        "built {} descriptor: {} frames",
        archetype.name,
        archetype.total_frames()
    );

    Ok((archetype, sliced.frames))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTS: [usize; MODE_COUNT] = [4, 6, 0, 5, 8, 4, 3, 5];

    #[test]
    fn test_boundary_table_is_cumulative() {
        let arch = Archetype::build(&SKELETON_SPEARMAN, &COUNTS);
        assert_eq!(arch.frames, [0, 4, 10, 10, 15, 23, 27, 30, 35]);
        assert_eq!(arch.total_frames(), 35);
    }

    #[test]
    fn test_boundaries_are_monotone() {
        let arch = Archetype::build(&SKELETON_WARRIOR, &COUNTS);
        for window in arch.frames.windows(2) {
            assert!(window[0] <= window[1]);
        }
    }

    #[test]
    fn test_zero_count_mode_has_empty_range() {
        let arch = Archetype::build(&SKELETON_WARRIOR, &COUNTS);
        assert!(arch.mode_range(Mode::Jumping).is_empty());
        assert_eq!(arch.mode_start(Mode::Jumping), arch.mode_end(Mode::Jumping));
    }

    #[test]
    fn test_atomic_set() {
        let arch = Archetype::build(&KUNOICHI, &COUNTS);
        for mode in [
            Mode::Jumping,
            Mode::Attacking,
            Mode::Dying,
            Mode::Hurt,
            Mode::RunAttack,
        ] {
            assert!(arch.is_atomic(mode), "{:?} should be atomic", mode);
        }
        for mode in [Mode::Idle, Mode::Running, Mode::Walking] {
            assert!(!arch.is_atomic(mode), "{:?} should not be atomic", mode);
        }
    }

    #[test]
    fn test_run_attack_capability_comes_from_hit_frames() {
        assert!(Archetype::build(&SKELETON_SPEARMAN, &COUNTS).has_run_attack());
        assert!(!Archetype::build(&SKELETON_WARRIOR, &COUNTS).has_run_attack());
        assert!(!Archetype::build(&KUNOICHI, &COUNTS).has_run_attack());
    }

    #[test]
    fn test_roster_constants() {
        // Only the player strafes while walking, only the spearman lunges,
        // and the skeletons have no jump sheets
        assert!(KUNOICHI.walk_strafe);
        assert!(!SKELETON_WARRIOR.walk_strafe);
        assert!(SKELETON_WARRIOR.sheets[Mode::Jumping.index()].is_empty());
        assert_eq!(SKELETON_WARRIOR.anim_speed[Mode::Jumping.index()], 0);
        assert_eq!(SKELETON_SPEARMAN.run_attack_hit_frames, &[1, 2, 3]);
    }
}
