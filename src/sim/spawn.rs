//! Procedural entity spawner
//!
//! A tick countdown gates spawning. When it elapses, one entity is drawn from
//! a weighted distribution (30% treat, 70% obstacle split across five bands)
//! and placed at the right field edge, then the countdown is redrawn from
//! [SPAWN_RATE_MIN, SPAWN_RATE_MAX] and scaled down by the current speed
//! ratio, so faster runs spawn more often.

use rand::Rng;

use super::state::{Entity, EntityKind, GameState};
use crate::consts::*;

/// Advance the spawn countdown; called once per playing tick
pub fn advance(state: &mut GameState) {
    if state.spawn_timer > 0.0 {
        state.spawn_timer -= 1.0;
        return;
    }

    let id = state.next_entity_id();
    let entity = roll_entity(&mut state.rng, id);
    state.entities.push(entity);
    state.spawn_timer = roll_interval(&mut state.rng, state.speed);
}

/// Draw the next countdown in ticks
pub fn roll_interval(rng: &mut impl Rng, speed: f32) -> f32 {
    let base = rng.random_range(SPAWN_RATE_MIN..SPAWN_RATE_MAX);
    base / (speed / GAME_SPEED_START)
}

/// Weighted type draw
///
/// First roll picks treat vs obstacle, second roll picks the obstacle band:
/// puddle 25%, bush 25%, poop pile 15%, squirrel 20%, rival dog 15%.
pub fn roll_kind(rng: &mut impl Rng) -> EntityKind {
    if rng.random::<f32>() < 0.3 {
        return EntityKind::Treat;
    }

    let roll = rng.random::<f32>();
    if roll < 0.25 {
        EntityKind::Puddle
    } else if roll < 0.50 {
        EntityKind::Bush
    } else if roll < 0.65 {
        EntityKind::PoopPile
    } else if roll < 0.85 {
        EntityKind::Squirrel
    } else {
        EntityKind::RivalDog
    }
}

/// Build a full entity at the right field edge
pub fn roll_entity(rng: &mut impl Rng, id: u32) -> Entity {
    let kind = roll_kind(rng);

    // Ground obstacles sit on the ground line; airborne entities get a
    // randomized height band.
    let (width, height, y) = match kind {
        EntityKind::Puddle => (50.0, 15.0, GROUND_Y - 15.0),
        EntityKind::Bush => (60.0, 40.0, GROUND_Y - 40.0),
        EntityKind::PoopPile => (25.0, 20.0, GROUND_Y - 20.0),
        EntityKind::Squirrel => {
            (50.0, 30.0, GROUND_Y - 90.0 - rng.random::<f32>() * 40.0)
        }
        EntityKind::RivalDog => (60.0, 50.0, GROUND_Y - 50.0),
        EntityKind::Treat => {
            (25.0, 25.0, GROUND_Y - 30.0 - rng.random::<f32>() * 100.0)
        }
    };

    Entity {
        id,
        kind,
        x: FIELD_WIDTH,
        y,
        width,
        height,
        deleted: false,
        variant: rng.random_range(0..3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_kind_distribution_matches_bands() {
        let mut rng = Pcg32::seed_from_u64(0xC00C1E);
        let draws = 100_000;
        let mut counts = [0usize; 6];

        for _ in 0..draws {
            let slot = match roll_kind(&mut rng) {
                EntityKind::Treat => 0,
                EntityKind::Puddle => 1,
                EntityKind::Bush => 2,
                EntityKind::PoopPile => 3,
                EntityKind::Squirrel => 4,
                EntityKind::RivalDog => 5,
            };
            counts[slot] += 1;
        }

        // 30% treat; 70% obstacle split 25/25/15/20/15
        let expected = [0.30, 0.175, 0.175, 0.105, 0.14, 0.105];
        for (count, want) in counts.iter().zip(expected) {
            let got = *count as f64 / draws as f64;
            assert!(
                (got - want).abs() < 0.01,
                "frequency {:.4} too far from {:.3}",
                got,
                want
            );
        }
    }

    #[test]
    fn test_entities_spawn_at_right_edge_with_sane_boxes() {
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..2_000 {
            let e = roll_entity(&mut rng, id);
            assert_eq!(e.x, FIELD_WIDTH);
            assert!(e.width > 0.0 && e.height > 0.0);
            assert!(!e.deleted);
            assert!(e.variant < 3);

            match e.kind {
                // Ground obstacles rest exactly on the ground line
                EntityKind::Puddle | EntityKind::Bush | EntityKind::PoopPile
                | EntityKind::RivalDog => {
                    assert_eq!(e.y + e.height, GROUND_Y);
                }
                EntityKind::Squirrel => {
                    assert!(e.y <= GROUND_Y - 90.0);
                    assert!(e.y >= GROUND_Y - 130.0);
                }
                EntityKind::Treat => {
                    assert!(e.y <= GROUND_Y - 30.0);
                    assert!(e.y >= GROUND_Y - 130.0);
                }
            }
        }
    }

    #[test]
    fn test_interval_scales_with_speed() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1_000 {
            let base = roll_interval(&mut rng, GAME_SPEED_START);
            assert!((SPAWN_RATE_MIN..SPAWN_RATE_MAX).contains(&base));
        }

        // Doubling the speed halves the countdown range
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1_000 {
            let fast = roll_interval(&mut rng, GAME_SPEED_START * 2.0);
            assert!((SPAWN_RATE_MIN / 2.0..SPAWN_RATE_MAX / 2.0).contains(&fast));
        }
    }

    #[test]
    fn test_advance_counts_down_then_spawns() {
        let mut state = GameState::new(99);
        state.start_run(99);
        assert!(state.entities.is_empty());

        // Countdown starts at zero, so the first call spawns immediately
        advance(&mut state);
        assert_eq!(state.entities.len(), 1);
        assert!(state.spawn_timer > 0.0);

        let mut ticks = 0;
        while state.entities.len() < 2 {
            advance(&mut state);
            ticks += 1;
            assert!(ticks <= SPAWN_RATE_MAX as usize + 2, "spawner never fired");
        }
        assert!(state.entities[1].id > state.entities[0].id);
    }
}
