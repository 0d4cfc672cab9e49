//! Frame scene assembly
//!
//! Tessellates one frame back-to-front: parallax clouds, ground band and
//! speed stripes, live entities (per-kind routines), the player, then
//! particles. The sky itself is the render pass clear color.

use glam::Vec2;

use super::shapes::{push_circle, push_ellipse, push_line, push_quad, push_rect, push_triangle};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Entity, EntityKind, GameState, Player};

pub fn build(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(2048);

    push_clouds(&mut out, state.frame);
    push_ground(&mut out, state);

    for entity in &state.entities {
        if entity.deleted {
            continue;
        }
        push_entity(&mut out, entity, state.frame);
    }

    push_player(&mut out, &state.player);
    push_particles(&mut out, state);

    out
}

/// Clouds drift at half frame speed for a cheap parallax read
fn push_clouds(out: &mut Vec<Vertex>, frame: u64) {
    let offset = (frame as f32 * 0.5) % FIELD_WIDTH;
    let x = FIELD_WIDTH - offset;
    push_circle(out, Vec2::new(x, 50.0), 30.0, colors::CLOUD, 20);
    push_circle(out, Vec2::new(x + 40.0, 60.0), 40.0, colors::CLOUD, 20);
}

fn push_ground(out: &mut Vec<Vertex>, state: &GameState) {
    let palette = state.theme.palette();
    push_rect(out, 0.0, GROUND_Y, FIELD_WIDTH, GROUND_HEIGHT, palette.ground);

    // Stripes scroll with distance for a speed illusion
    let stripe_offset = state.distance % 50.0;
    let mut x = -stripe_offset;
    while x < FIELD_WIDTH {
        push_rect(out, x, GROUND_Y, 20.0, GROUND_HEIGHT, colors::GROUND_STRIPE);
        x += 50.0;
    }
}

fn push_entity(out: &mut Vec<Vertex>, entity: &Entity, frame: u64) {
    match entity.kind {
        EntityKind::Treat => push_bone(out, entity),
        EntityKind::Puddle => push_puddle(out, entity),
        EntityKind::Bush => push_bush(out, entity),
        EntityKind::PoopPile => push_poop(out, entity, frame),
        EntityKind::Squirrel => push_squirrel(out, entity),
        EntityKind::RivalDog => push_rival_dog(out, entity),
    }
}

/// Knuckle-knuckle-bar-knuckle-knuckle, the classic
fn push_bone(out: &mut Vec<Vertex>, entity: &Entity) {
    let (x, y) = (entity.x, entity.y);
    let r = 8.0 + entity.variant as f32 * 0.5;

    push_circle(out, Vec2::new(x, y + 5.0), r, colors::BONE, 12);
    push_circle(out, Vec2::new(x, y + 15.0), r, colors::BONE, 12);
    push_rect(out, x, y + 5.0, 25.0, 10.0, colors::BONE);
    push_circle(out, Vec2::new(x + 25.0, y + 5.0), r, colors::BONE, 12);
    push_circle(out, Vec2::new(x + 25.0, y + 15.0), r, colors::BONE, 12);
}

fn push_puddle(out: &mut Vec<Vertex>, entity: &Entity) {
    let (cx, cy) = entity.center();
    push_ellipse(
        out,
        Vec2::new(cx, cy),
        entity.width / 2.0,
        entity.height / 4.0,
        colors::PUDDLE,
        20,
    );
}

fn push_bush(out: &mut Vec<Vertex>, entity: &Entity) {
    let (x, y) = (entity.x, entity.y);
    let wiggle = entity.variant as f32;

    push_circle(out, Vec2::new(x + 15.0, y + 25.0), 15.0 + wiggle, colors::BUSH, 16);
    push_circle(out, Vec2::new(x + 30.0, y + 15.0), 20.0, colors::BUSH, 16);
    push_circle(out, Vec2::new(x + 45.0, y + 25.0), 15.0 + wiggle, colors::BUSH, 16);
}

fn push_poop(out: &mut Vec<Vertex>, entity: &Entity, frame: u64) {
    let (x, y) = (entity.x, entity.y);
    push_triangle(
        out,
        Vec2::new(x, y + entity.height),
        Vec2::new(x + entity.width, y + entity.height),
        Vec2::new(x + entity.width / 2.0, y),
        colors::POOP,
    );

    // Stink lines blink on a 20-frame cycle
    if frame % 20 < 10 {
        push_line(
            out,
            Vec2::new(x + 10.0, y),
            Vec2::new(x + 10.0, y - 10.0),
            2.0,
            colors::STINK,
        );
        push_line(
            out,
            Vec2::new(x + 15.0, y + 5.0),
            Vec2::new(x + 18.0, y - 5.0),
            2.0,
            colors::STINK,
        );
    }
}

fn push_squirrel(out: &mut Vec<Vertex>, entity: &Entity) {
    let (x, y) = (entity.x, entity.y);

    // Bushy tail behind the body
    push_ellipse(out, Vec2::new(x + 35.0, y + 10.0), 15.0, 20.0, colors::SQUIRREL, 16);
    push_ellipse(out, Vec2::new(x + 15.0, y + 20.0), 15.0, 10.0, colors::SQUIRREL, 16);
    push_circle(out, Vec2::new(x + 5.0, y + 12.0), 8.0, colors::SQUIRREL, 12);
    push_triangle(
        out,
        Vec2::new(x + 5.0, y + 6.0),
        Vec2::new(x + 2.0, y - 2.0),
        Vec2::new(x + 8.0, y + 4.0),
        colors::SQUIRREL,
    );
    push_circle(out, Vec2::new(x + 3.0, y + 10.0), 1.5, colors::INK, 8);
}

/// A golden retriever headed the other way
fn push_rival_dog(out: &mut Vec<Vertex>, entity: &Entity) {
    let (x, y) = (entity.x, entity.y);

    push_rect(out, x, y + 10.0, 45.0, 30.0, colors::GOLDEN_DOG);
    // Head faces left, toward the player
    push_rect(out, x - 15.0, y, 25.0, 25.0, colors::GOLDEN_DOG);
    push_rect(out, x - 5.0, y + 5.0, 8.0, 15.0, colors::GOLDEN_EAR);
    // Legs
    push_rect(out, x + 5.0, y + 40.0, 10.0, 10.0, colors::GOLDEN_DOG);
    push_rect(out, x + 30.0, y + 40.0, 10.0, 10.0, colors::GOLDEN_DOG);
    // Tail
    push_rect(out, x + 45.0, y + 10.0, 10.0, 5.0, colors::GOLDEN_DOG);
}

fn push_player(out: &mut Vec<Vertex>, player: &Player) {
    let (x, y, w, h) = (player.x, player.y, player.width, player.height);
    let run_phase = player.run_frame as f32;

    let bounce = if player.airborne {
        -5.0
    } else {
        (run_phase * 0.2).sin() * 3.0
    };

    // Body with Blenheim patches
    push_rect(out, x, y + bounce, w, h, colors::SPANIEL_WHITE);
    push_rect(out, x + 10.0, y + bounce + 5.0, 15.0, 15.0, colors::SPANIEL_BROWN);
    push_rect(out, x + 35.0, y + bounce, 10.0, 10.0, colors::SPANIEL_BROWN);

    // Head
    let head_x = x + w - 15.0;
    let head_y = y - 15.0 + bounce;
    push_rect(out, head_x, head_y, 25.0, 25.0, colors::SPANIEL_WHITE);

    // Long floppy ears, sheared back in the air and swinging on the ground
    let ear_shear = if player.airborne {
        -8.0
    } else {
        (run_phase * 0.2).sin() * 4.0
    };
    push_ear(out, head_x, head_y + 5.0, ear_shear);
    push_ear(out, head_x + 15.0, head_y + 5.0, ear_shear);

    // Eye and nose
    push_rect(out, head_x + 12.0, head_y + 8.0, 3.0, 3.0, colors::INK);
    push_rect(out, head_x + 18.0, head_y + 15.0, 4.0, 3.0, colors::INK);

    // Wagging tail
    let wag = (run_phase * 0.5).sin() * 10.0;
    push_line(
        out,
        Vec2::new(x, y + 10.0 + bounce),
        Vec2::new(x - 15.0, y + 5.0 + bounce + wag),
        6.0,
        colors::SPANIEL_WHITE,
    );
}

/// One ear as a sheared quad: top edge anchored, bottom edge swung by `shear`
fn push_ear(out: &mut Vec<Vertex>, x: f32, y: f32, shear: f32) {
    push_quad(
        out,
        [
            Vec2::new(x, y),
            Vec2::new(x + 10.0, y),
            Vec2::new(x + 10.0 + shear, y + 25.0),
            Vec2::new(x + shear, y + 25.0),
        ],
        colors::SPANIEL_EAR,
    );
}

fn push_particles(out: &mut Vec<Vertex>, state: &GameState) {
    for p in &state.particles {
        let faded = [p.color[0], p.color[1], p.color[2], p.color[3] * p.life];
        push_rect(out, p.x, p.y, 5.0, 5.0, faded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityKind, GameState};

    #[test]
    fn test_fresh_run_produces_a_scene() {
        let mut state = GameState::new(1);
        state.start_run(1);

        let scene = build(&state);
        assert!(!scene.is_empty());
        assert!(scene.len() % 3 == 0, "triangle list");
        for v in &scene {
            assert!(v.position[0].is_finite() && v.position[1].is_finite());
        }
    }

    #[test]
    fn test_flagged_entities_are_not_drawn() {
        let mut state = GameState::new(2);
        state.start_run(2);
        let baseline = build(&state).len();

        let id = state.next_entity_id();
        state.entities.push(crate::sim::Entity {
            id,
            kind: EntityKind::Bush,
            x: 400.0,
            y: GROUND_Y - 40.0,
            width: 60.0,
            height: 40.0,
            deleted: true,
            variant: 0,
        });

        assert_eq!(build(&state).len(), baseline);
    }
}
