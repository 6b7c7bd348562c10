// Character entity and per-tick sequencing

use std::sync::Arc;

use crate::core::math::Rect;
use crate::engine::input::KeySnapshot;

use super::animation;
use super::archetype::Archetype;
use super::brain::{self, Brain};
use super::mode::Mode;
use super::motion;
use super::state;

/// Health every character spawns with
pub const MAX_HEALTH: i32 = 100;

/// One player or enemy instance.
///
/// All fields are written only by the entity's own tick; other entities read
/// position/mode/health through [`TargetView`] or shared references, so there
/// is no write contention anywhere in a step.
#[derive(Debug)]
pub struct Character {
    /// Shared per-class constants (never mutated after startup)
    pub archetype: Arc<Archetype>,
    /// Which decision procedure drives this character
    pub brain: Brain,
    /// Opaque tag the render collaborator uses to find this class's frames
    pub sprite_bank: usize,

    /// Screen-space bounds, owned exclusively by this entity
    pub rect: Rect,
    /// true = facing toward negative x
    pub facing: bool,
    pub mode: Mode,
    /// Index into the archetype's flattened frame list; always inside the
    /// current mode's range once a tick has completed
    pub current_frame: usize,
    /// Sub-frame counter throttling animation advancement
    pub frame_counter: u32,

    pub health: i32,
    /// Health as of the end of the previous tick; a drop below it is how the
    /// state machine notices damage
    pub last_health: i32,
    /// Set exactly once, when the dying animation has played through
    pub dead: bool,

    /// Consecutive ticks spent running (and lunging, for classes that can)
    pub running_time: u32,
    /// Free-running patrol cycle counter (AI only)
    pub idle_counter: u32,

    /// Movement intent for this tick, in {-1, 0, 1}
    pub direction_x: i32,
    pub direction_y: i32,
}

impl Character {
    pub fn new(archetype: Arc<Archetype>, brain: Brain, sprite_bank: usize, rect: Rect) -> Self {
        let current_frame = archetype.mode_start(Mode::Idle);
        Self {
            archetype,
            brain,
            sprite_bank,
            rect,
            facing: false,
            mode: Mode::Idle,
            current_frame,
            frame_counter: 0,
            health: MAX_HEALTH,
            last_health: MAX_HEALTH,
            dead: false,
            running_time: 0,
            idle_counter: 0,
            direction_x: 0,
            direction_y: 0,
        }
    }

    /// One simulation tick. Dead entities are inert: nothing advances.
    ///
    /// `target` is the entity this one would chase; the player ignores it,
    /// and a chaser given none stands still.
    pub fn step(&mut self, keys: &KeySnapshot, target: Option<&TargetView>) {
        if self.dead {
            return;
        }
        let candidate = match (self.brain, target) {
            (Brain::Player, _) => brain::player_candidate(self, keys),
            (Brain::Chaser, Some(target)) => brain::chase_candidate(self, target),
            (Brain::Chaser, None) => Mode::Idle,
        };
        self.finish_step(candidate);
    }

    // Shared tail of a tick: state machine gate, motion, animation, then the
    // health observation the next tick's gate will compare against.
    fn finish_step(&mut self, candidate: Mode) {
        state::advance_mode(self, candidate);
        if self.dead {
            // Death completed this tick; the corpse keeps its final pose
            return;
        }
        motion::resolve(self);
        animation::advance(self);
        self.last_health = self.health;
    }

    /// Read-only position snapshot another entity may take during a tick
    pub fn target_view(&self) -> TargetView {
        TargetView {
            left: self.rect.left,
            top: self.rect.top,
        }
    }

    /// Offset of the animation cursor inside the current mode's range
    pub fn frame_offset(&self) -> usize {
        self.current_frame - self.archetype.mode_start(self.mode)
    }
}

/// Position another entity reads for chase steering and hit tests
#[derive(Debug, Clone, Copy)]
pub struct TargetView {
    pub left: i32,
    pub top: i32,
}

#[cfg(test)]
mod tests {
    use super::super::testkit;
    use super::*;

    #[test]
    fn test_spawn_state() {
        let ch = testkit::player_at(400, 400);
        assert_eq!(ch.mode, Mode::Idle);
        assert_eq!(ch.health, MAX_HEALTH);
        assert_eq!(ch.last_health, MAX_HEALTH);
        assert_eq!(ch.current_frame, ch.archetype.mode_start(Mode::Idle));
        assert!(!ch.dead);
    }

    #[test]
    fn test_damage_is_noticed_on_the_next_step() {
        // Combat lowered health after the last step synced last_health
        let mut ch = testkit::player_at(400, 400);
        ch.health = 90;
        ch.step(&KeySnapshot::new(), None);
        assert_eq!(ch.mode, Mode::Hurt);
        // and the observation is re-synced at the end of that step
        assert_eq!(ch.last_health, 90);
    }

    #[test]
    fn test_dead_entity_is_inert() {
        let mut ch = testkit::warrior_at(800, 400);
        ch.dead = true;
        ch.mode = Mode::Dying;
        let frame = ch.current_frame;
        let rect = ch.rect;
        let target = TargetView { left: 0, top: 400 };
        ch.step(&KeySnapshot::new(), Some(&target));
        assert_eq!(ch.current_frame, frame);
        assert_eq!(ch.rect, rect);
        assert_eq!(ch.mode, Mode::Dying);
    }

    #[test]
    fn test_frame_offset() {
        let mut ch = testkit::player_at(400, 400);
        ch.mode = Mode::Attacking;
        ch.current_frame = ch.archetype.mode_start(Mode::Attacking) + 2;
        assert_eq!(ch.frame_offset(), 2);
    }

    #[test]
    fn test_death_lands_exactly_on_dying_wraparound() {
        let mut ch = testkit::warrior_at(800, 400);
        ch.health = 0;
        let keys = KeySnapshot::new();
        let target = TargetView { left: 0, top: 400 };
        let dying_start = ch.archetype.mode_start(Mode::Dying);

        let mut before_fatal_step = None;
        let mut steps = 0;
        while !ch.dead {
            before_fatal_step = Some(ch.current_frame);
            ch.step(&keys, Some(&target));
            steps += 1;
            assert!(steps < 1000, "dying animation never completed");
            assert_eq!(ch.mode, Mode::Dying);
        }

        // the flag was set by the step that began with the cursor wrapped
        // back to the start of the dying range, and no earlier
        assert!(steps > 1);
        assert_eq!(before_fatal_step, Some(dying_start));
        assert_eq!(ch.current_frame, dying_start);
    }

    #[test]
    fn test_attack_cannot_be_steered_out_of_mid_swing() {
        let mut ch = testkit::player_at(400, 400);
        let mut keys = KeySnapshot::new();
        keys.press(crate::engine::input::Action::Attack);
        ch.step(&keys, None);
        assert_eq!(ch.mode, Mode::Attacking);

        // conflicting movement input is ignored until the swing wraps
        keys.release(crate::engine::input::Action::Attack);
        keys.press(crate::engine::input::Action::MoveRight);
        let mut steps = 0;
        for _ in 0..100 {
            ch.step(&keys, None);
            steps += 1;
            if ch.mode != Mode::Attacking {
                break;
            }
        }
        assert_eq!(ch.mode, Mode::Running);
        assert!(steps > 10, "swing was interrupted after {steps} steps");
    }
}
