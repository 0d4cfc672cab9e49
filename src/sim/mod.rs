//! Frame-tied simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One tick per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, entity_hitbox, player_hitbox, player_hits_entity};
pub use state::{Entity, EntityKind, GameEvent, GamePhase, GameState, Particle, Player};
pub use tick::{TickInput, tick};
