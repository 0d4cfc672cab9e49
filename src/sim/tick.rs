//! Per-frame simulation tick
//!
//! One tick runs per animation frame (physics is deliberately frame-tied).
//! Order within a tick: player physics, jump edge, difficulty/progress, theme
//! milestone, spawner, entity scroll + collision, particle aging. A hazard
//! contact terminates the tick early and ends the run.

use super::collision::player_hits_entity;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::Theme;
use crate::consts::*;

/// Input sampled for a single tick
///
/// `jump` is a one-shot edge. Every source (key, pointer, touch) sets it, the
/// frame loop clears it after the tick, and key auto-repeat is filtered at
/// the event handler, so holding a key never re-triggers a jump on landing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub jump: bool,
}

/// Advance the session by one frame
///
/// Returns the notifications the presentation layer must see immediately;
/// everything else (score, treats) is read off the state at its own pace.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Playing {
        return events;
    }

    state.frame += 1;

    // Integrate gravity, then clamp to the ground plane. Clamping zeroes
    // velocity so the next tick starts from rest.
    let player = &mut state.player;
    player.vy += GRAVITY;
    player.y += player.vy;
    if player.y + player.height >= GROUND_Y {
        player.y = GROUND_Y - player.height;
        player.vy = 0.0;
        player.airborne = false;
    } else {
        player.airborne = true;
    }

    // Jumps only start from the ground
    if input.jump && !player.airborne {
        player.vy = JUMP_STRENGTH;
        player.airborne = true;
    }
    player.run_frame = player.run_frame.wrapping_add(1);

    // Difficulty ramp and progress
    state.speed = (state.speed + ACCELERATION).min(MAX_SPEED);
    state.score += SCORE_PER_TICK;
    state.distance += state.speed;

    // Theme rolls over on distance milestones; notify only on the transition
    let theme = Theme::for_distance(state.distance);
    if theme != state.theme {
        state.theme = theme;
        events.push(GameEvent::ThemeChanged(theme));
    }

    spawn::advance(state);

    // Scroll entities and resolve contacts. The first hazard contact in
    // spawn order wins; treat bursts are deferred past the loop so the
    // entity list isn't reborrowed mid-iteration.
    let speed = state.speed;
    let mut bursts: Vec<(f32, f32)> = Vec::new();
    let mut ended = false;
    for entity in &mut state.entities {
        entity.x -= speed;
        if entity.deleted {
            continue;
        }

        if player_hits_entity(&state.player, entity) {
            if entity.kind.is_collectible() {
                entity.deleted = true;
                state.treats += 1;
                state.score += TREAT_SCORE_BONUS;
                bursts.push(entity.center());
            } else {
                ended = true;
                break;
            }
        }

        if entity.off_screen() {
            entity.deleted = true;
        }
    }

    for (x, y) in bursts {
        state.spawn_burst(x, y);
    }

    if ended {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::RunEnded {
            score: state.score,
            treats: state.treats,
            theme: state.theme,
        });
        return events;
    }

    state.entities.retain(|e| !e.deleted);

    // Particles drift without gravity and fade linearly
    for p in &mut state.particles {
        p.x += p.vx;
        p.y += p.vy;
        p.life -= PARTICLE_DECAY;
    }
    state.particles.retain(|p| p.life > 0.0);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Entity, EntityKind};

    fn fresh_run(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_run(seed);
        // Keep the spawner quiet so tests control the entity list
        state.spawn_timer = 1e9;
        state
    }

    fn place(state: &mut GameState, kind: EntityKind, x: f32, y: f32, w: f32, h: f32) {
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            kind,
            x,
            y,
            width: w,
            height: h,
            deleted: false,
            variant: 0,
        });
    }

    /// A hazard guaranteed to overlap the player's inset hitbox next tick
    fn place_hazard_on_player(state: &mut GameState) {
        let x = state.player.x + state.speed;
        place(state, EntityKind::Bush, x, GROUND_Y - 40.0, 60.0, 40.0);
    }

    #[test]
    fn test_ground_clamp_zeroes_velocity() {
        let mut state = fresh_run(1);

        // Launch and ride the arc down
        tick(&mut state, &TickInput { jump: true });
        assert!(state.player.airborne);

        let mut landed = false;
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
            if !state.player.airborne {
                landed = true;
                break;
            }
        }

        assert!(landed, "player never came back down");
        assert_eq!(state.player.y + state.player.height, GROUND_Y);
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_grounded_player_stays_clamped() {
        let mut state = fresh_run(2);
        for _ in 0..50 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.player.y + state.player.height, GROUND_Y);
            assert_eq!(state.player.vy, 0.0);
            assert!(!state.player.airborne);
        }
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let mut state = fresh_run(3);

        tick(&mut state, &TickInput { jump: true });
        assert_eq!(state.player.vy, JUMP_STRENGTH);

        // A second edge mid-air must not touch velocity
        tick(&mut state, &TickInput { jump: true });
        assert_eq!(state.player.vy, JUMP_STRENGTH + GRAVITY);
    }

    #[test]
    fn test_single_jump_edge_does_not_retrigger_on_landing() {
        let mut state = fresh_run(4);

        // One edge, then silence
        tick(&mut state, &TickInput { jump: true });
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }

        // Landed and stayed down
        assert!(!state.player.airborne);
        assert_eq!(state.player.y + state.player.height, GROUND_Y);
    }

    #[test]
    fn test_treat_collection_never_ends_the_run() {
        let mut state = fresh_run(5);
        let px = state.player.x;
        let py = state.player.y;
        let speed = state.speed;
        place(&mut state, EntityKind::Treat, px + speed, py, 25.0, 25.0);

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.treats, 1);
        assert_eq!(state.score, SCORE_PER_TICK + TREAT_SCORE_BONUS);
        assert!(state.entities.is_empty(), "collected treat must be purged");
        assert_eq!(state.particles.len(), PARTICLES_PER_TREAT);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::RunEnded { .. })));
    }

    #[test]
    fn test_hazard_contact_ends_the_run() {
        let mut state = fresh_run(6);
        place_hazard_on_player(&mut state);

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            events,
            vec![GameEvent::RunEnded {
                score: state.score,
                treats: 0,
                theme: Theme::Neighborhood,
            }]
        );

        // The session is terminal: further ticks are no-ops
        let frame = state.frame;
        assert!(tick(&mut state, &TickInput::default()).is_empty());
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_first_hazard_in_spawn_order_wins() {
        let mut state = fresh_run(7);
        place_hazard_on_player(&mut state);
        place_hazard_on_player(&mut state);
        // A treat behind the hazards never gets collected this tick
        let px = state.player.x;
        let py = state.player.y;
        let speed = state.speed;
        place(&mut state, EntityKind::Treat, px + speed, py, 25.0, 25.0);

        let events = tick(&mut state, &TickInput::default());

        let ended: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RunEnded { .. }))
            .collect();
        assert_eq!(ended.len(), 1);
        assert_eq!(state.treats, 0);
    }

    #[test]
    fn test_theme_change_fires_once_per_transition() {
        let mut state = fresh_run(8);
        state.distance = THEME_SPAN - state.speed - 1.0;

        // Walk up to the milestone without crossing
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events, vec![GameEvent::ThemeChanged(Theme::DogPark)]);
        assert_eq!(state.theme, Theme::DogPark);

        // Already across: no repeat notification
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
    }

    #[test]
    fn test_full_run_to_second_theme() {
        // Run from a standing start until 2000 distance units have scrolled
        // by without any collisions, then end the run: the theme observed at
        // game over must be the second in the cycle.
        let mut state = fresh_run(9);

        let mut theme_changes = 0;
        while state.distance < THEME_SPAN {
            for event in tick(&mut state, &TickInput::default()) {
                if matches!(event, GameEvent::ThemeChanged(_)) {
                    theme_changes += 1;
                }
            }
            assert_eq!(state.phase, GamePhase::Playing);
        }

        assert_eq!(theme_changes, 1);
        assert_eq!(state.theme, Theme::DogPark);

        place_hazard_on_player(&mut state);
        let events = tick(&mut state, &TickInput::default());
        assert!(matches!(
            events.as_slice(),
            [GameEvent::RunEnded {
                theme: Theme::DogPark,
                ..
            }]
        ));
    }

    #[test]
    fn test_speed_ramps_to_cap() {
        let mut state = fresh_run(10);
        state.speed = MAX_SPEED - 0.01;

        let mut previous = state.speed;
        for _ in 0..50 {
            tick(&mut state, &TickInput::default());
            assert!(state.speed >= previous);
            assert!(state.speed <= MAX_SPEED);
            previous = state.speed;
        }
        assert_eq!(state.speed, MAX_SPEED);
    }

    #[test]
    fn test_score_accumulates_per_tick() {
        let mut state = fresh_run(11);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 100 * SCORE_PER_TICK);
    }

    #[test]
    fn test_particles_fade_and_purge() {
        let mut state = fresh_run(12);
        state.spawn_burst(400.0, 200.0);
        assert_eq!(state.particles.len(), PARTICLES_PER_TREAT);

        tick(&mut state, &TickInput::default());
        assert!(state.particles.iter().all(|p| p.life < 1.0 && p.life > 0.0));

        for _ in 0..25 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_offscreen_entities_are_purged() {
        let mut state = fresh_run(13);
        place(&mut state, EntityKind::Puddle, 10.0, GROUND_Y - 15.0, 50.0, 15.0);

        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.entities.is_empty());
    }
}
