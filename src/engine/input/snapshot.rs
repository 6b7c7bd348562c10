// Pressed-key snapshot consumed by the player's decision procedure

use std::collections::{HashMap, HashSet};

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::action::{default_bindings, Action};

/// Which logical actions are held down right now.
///
/// Updated from keyboard events as they arrive; between events the state is
/// stable, so the simulation can query it once per tick without re-decoding
/// anything.
#[derive(Debug)]
pub struct KeySnapshot {
    bindings: HashMap<KeyCode, Action>,
    pressed: HashSet<Action>,
}

impl KeySnapshot {
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            pressed: HashSet::new(),
        }
    }

    /// Feed a winit keyboard event into the snapshot
    pub fn process_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(&action) = self.bindings.get(&code) else {
            return;
        };
        match event.state {
            ElementState::Pressed => self.press(action),
            ElementState::Released => self.release(action),
        }
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Horizontal intent: right minus left, in {-1, 0, 1}
    pub fn horizontal(&self) -> i32 {
        self.is_pressed(Action::MoveRight) as i32 - self.is_pressed(Action::MoveLeft) as i32
    }

    /// Vertical intent: down minus up, in {-1, 0, 1}
    pub fn vertical(&self) -> i32 {
        self.is_pressed(Action::MoveDown) as i32 - self.is_pressed(Action::MoveUp) as i32
    }

    pub fn press(&mut self, action: Action) {
        self.pressed.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Release everything (window focus loss)
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}

impl Default for KeySnapshot {
    fn default() -> Self {
        Self::new()
    }
}
