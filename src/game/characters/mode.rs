// Behavioral modes

/// The behavioral/animation state of a character.
///
/// The discriminant doubles as the index into the per-archetype animation
/// tables (`anim_speed`, the `frames` boundary table), so the order here is
/// load-bearing.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Standing still
    Idle = 0,
    /// Moving at full speed
    Running = 1,
    /// Airborne hop
    Jumping = 2,
    /// Slow vertical repositioning
    Walking = 3,
    /// Standing melee strike
    Attacking = 4,
    /// Death animation playing
    Dying = 5,
    /// Damage reaction
    Hurt = 6,
    /// Charging lunge attack
    RunAttack = 7,
}

/// Number of modes, and therefore of per-mode table slots
pub const MODE_COUNT: usize = 8;

impl Mode {
    pub const ALL: [Mode; MODE_COUNT] = [
        Mode::Idle,
        Mode::Running,
        Mode::Jumping,
        Mode::Walking,
        Mode::Attacking,
        Mode::Dying,
        Mode::Hurt,
        Mode::RunAttack,
    ];

    /// Table index for this mode
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Idle
    }
}
