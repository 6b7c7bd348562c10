// Arena scene: the entity roster and per-tick sequencing
//
// Tick order is significant: every entity fully settles its decision, mode,
// motion and animation first, and only then does combat resolve, so hit
// tests always see this tick's positions and modes.

use std::sync::Arc;

use log::info;

use crate::core::math::Rect;
use crate::engine::input::KeySnapshot;

use super::characters::{combat, Archetype, Brain, Character};

/// Arena layout in pixels
pub const ARENA_WIDTH: u32 = 1400;
pub const ARENA_HEIGHT: u32 = 770;

// Spawn layout: the player starts between the two skeletons
const PLAYER_SPAWN_X: i32 = 400;
const SPEARMAN_SPAWN_X: i32 = 600;
const WARRIOR_SPAWN_X: i32 = 800;
const SPAWN_Y: i32 = 400;

/// Frame banks the renderer registers, in this order
pub const BANK_KUNOICHI: usize = 0;
pub const BANK_WARRIOR: usize = 1;
pub const BANK_SPEARMAN: usize = 2;

/// Everything the render collaborator needs to blit one entity
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub sprite_bank: usize,
    pub frame: usize,
    pub left: i32,
    pub top: i32,
    pub mirrored: bool,
}

/// The whole simulation: one player, a fixed set of enemies
pub struct Arena {
    player: Character,
    enemies: Vec<Character>,
}

impl Arena {
    pub fn new(
        kunoichi: Arc<Archetype>,
        warrior: Arc<Archetype>,
        spearman: Arc<Archetype>,
        sprite_w: i32,
        sprite_h: i32,
    ) -> Self {
        let player = Character::new(
            kunoichi,
            Brain::Player,
            BANK_KUNOICHI,
            Rect::new(PLAYER_SPAWN_X, SPAWN_Y, sprite_w, sprite_h),
        );
        let enemies = vec![
            Character::new(
                spearman,
                Brain::Chaser,
                BANK_SPEARMAN,
                Rect::new(SPEARMAN_SPAWN_X, SPAWN_Y, sprite_w, sprite_h),
            ),
            Character::new(
                warrior,
                Brain::Chaser,
                BANK_WARRIOR,
                Rect::new(WARRIOR_SPAWN_X, SPAWN_Y, sprite_w, sprite_h),
            ),
        ];
        info!("arena ready: player and {} enemies spawned", enemies.len());

        Self { player, enemies }
    }

    /// Advance the whole simulation by one tick
    pub fn step(&mut self, keys: &KeySnapshot) {
        self.player.step(keys, None);

        let target = self.player.target_view();
        for enemy in &mut self.enemies {
            enemy.step(keys, Some(&target));
        }

        // Combat runs last, against settled positions: the player swings at
        // every live enemy, every live enemy swings at the player.
        let player_damage = self.player.archetype.damage;
        for enemy in &mut self.enemies {
            if !enemy.dead && combat::hits(&self.player, enemy) {
                enemy.health -= player_damage;
            }
        }

        let mut incoming = 0;
        for enemy in &self.enemies {
            if !enemy.dead && combat::hits(enemy, &self.player) {
                incoming += enemy.archetype.damage;
            }
        }
        self.player.health -= incoming;
    }

    /// The simulation-over signal
    pub fn player_defeated(&self) -> bool {
        self.player.dead
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn enemies(&self) -> &[Character] {
        &self.enemies
    }

    /// Blit info for every entity, corpses included.
    ///
    /// Unordered: the caller sorts by `top` for the painter's-algorithm depth
    /// effect, which is a presentation choice the simulation only enables.
    pub fn draw_items(&self) -> Vec<DrawItem> {
        std::iter::once(&self.player)
            .chain(self.enemies.iter())
            .map(|ch| DrawItem {
                sprite_bank: ch.sprite_bank,
                frame: ch.current_frame,
                left: ch.rect.left,
                top: ch.rect.top,
                mirrored: ch.facing,
            })
            .collect()
    }
}
