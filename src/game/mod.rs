// Game simulation
//
// Everything behavioral lives here: the character state machine, the
// per-archetype animation tables, AI decision procedures, motion and the
// melee combat resolver. The engine modules feed this one key snapshots and
// sliced sprite frames; nothing in here touches the GPU or the window.

pub mod arena;
pub mod characters;

pub use arena::{Arena, DrawItem, ARENA_HEIGHT, ARENA_WIDTH};
