//! Axis-aligned collision tests
//!
//! Hitboxes are inset from the visual sprites so grazing a sprite's fluffy
//! edge does not end the run. Overlap is strict: rectangles that merely share
//! an edge do not collide.

use super::state::{Entity, Player};

/// Player sprite insets: left, top, right, bottom
const PLAYER_INSET: (f32, f32, f32, f32) = (15.0, 10.0, 15.0, 5.0);
/// Entity sprites shrink by this much on every side
const ENTITY_INSET: f32 = 5.0;

/// An axis-aligned rectangle in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Strict rectangle overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// The player's effective hitbox, tighter than the drawn sprite
pub fn player_hitbox(player: &Player) -> Rect {
    let (left, top, right, bottom) = PLAYER_INSET;
    Rect {
        left: player.x + left,
        top: player.y + top,
        right: player.x + player.width - right,
        bottom: player.y + player.height - bottom,
    }
}

/// An entity's effective hitbox
pub fn entity_hitbox(entity: &Entity) -> Rect {
    Rect {
        left: entity.x + ENTITY_INSET,
        top: entity.y + ENTITY_INSET,
        right: entity.x + entity.width - ENTITY_INSET,
        bottom: entity.y + entity.height - ENTITY_INSET,
    }
}

/// Inset-box test between the player and one entity
pub fn player_hits_entity(player: &Player, entity: &Entity) -> bool {
    player_hitbox(player).overlaps(&entity_hitbox(entity))
}
