// Input handling
//
// Translates raw winit keyboard events into a snapshot of logical actions.
// The simulation never sees key codes: once per tick it is handed a
// `KeySnapshot` and queries it by `Action`.

pub mod action;
pub mod snapshot;

pub use action::Action;
pub use snapshot::KeySnapshot;
