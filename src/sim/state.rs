//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`], owned by the frame loop
//! and passed by reference into the tick/spawn routines. Nothing here touches
//! the platform.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Theme;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title overlay, waiting for the start command
    Menu,
    /// Active run
    Playing,
    /// Run ended, stats on screen
    GameOver,
}

/// Everything that can be spawned into the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Ground obstacle, wide and flat
    Puddle,
    /// Ground obstacle, tall enough to demand a clean jump
    Bush,
    /// Small ground hazard
    PoopPile,
    /// Airborne obstacle at duck-or-jump height
    Squirrel,
    /// Another dog out on its own run
    RivalDog,
    /// Collectible bone
    Treat,
}

impl EntityKind {
    /// Treats are collected; everything else ends the run on contact
    pub fn is_collectible(self) -> bool {
        matches!(self, EntityKind::Treat)
    }
}

/// A spawned obstacle or collectible
///
/// Entities enter at the right field edge and scroll left at the current game
/// speed. `deleted` marks them for the end-of-tick purge; a flagged entity is
/// never rendered or collided against again.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub deleted: bool,
    /// Small visual variation per instance (0..3)
    pub variant: u8,
}

impl Entity {
    /// Fully past the left edge
    pub fn off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// The running dog
#[derive(Debug, Clone)]
pub struct Player {
    /// Horizontal position, fixed for the whole run
    pub x: f32,
    pub y: f32,
    /// Vertical velocity, positive is downward
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    /// Set whenever the paws are strictly above the ground line
    pub airborne: bool,
    /// Drives the run-cycle animation (bounce, ears, tail)
    pub run_frame: u32,
}

impl Player {
    fn new() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y - PLAYER_HEIGHT,
            vy: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            airborne: false,
            run_frame: 0,
        }
    }
}

/// A decorative burst fragment (not gameplay-affecting)
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life in (0, 1]; rendering fades alpha with this
    pub life: f32,
    pub color: [f32; 4],
}

/// Notifications the tick surfaces to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Fires exactly when the distance milestone rolls the theme over
    ThemeChanged(Theme),
    /// Fires once, on the tick the run ends
    RunEnded { score: u64, treats: u32, theme: Theme },
}

/// Complete per-run session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// +1 per tick, +50 per treat
    pub score: u64,
    /// Cumulative scroll, drives difficulty and theme
    pub distance: f32,
    /// Current scroll speed, monotonically ramps to the cap
    pub speed: f32,
    /// Treats collected this run
    pub treats: u32,
    pub theme: Theme,
    pub player: Player,
    pub entities: Vec<Entity>,
    pub particles: Vec<Particle>,
    /// Ticks until the spawner fires again
    pub spawn_timer: f32,
    /// Tick counter, drives animation phases
    pub frame: u64,
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh session sitting in the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0,
            distance: 0.0,
            speed: GAME_SPEED_START,
            treats: 0,
            theme: Theme::Neighborhood,
            player: Player::new(),
            entities: Vec::new(),
            particles: Vec::new(),
            spawn_timer: 0.0,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Begin a run: reset all per-run state and reseed the generator.
    ///
    /// Durable counters (high score, lifetime treats) are not touched here.
    pub fn start_run(&mut self, seed: u64) {
        self.seed = seed;
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.distance = 0.0;
        self.speed = GAME_SPEED_START;
        self.treats = 0;
        self.theme = Theme::Neighborhood;
        self.player = Player::new();
        self.entities.clear();
        self.particles.clear();
        self.spawn_timer = 0.0;
        self.frame = 0;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Scatter a burst of accent-colored fragments, used on treat collection
    pub fn spawn_burst(&mut self, x: f32, y: f32) {
        let color = self.theme.palette().accent;
        for _ in 0..PARTICLES_PER_TREAT {
            let vx = (self.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD;
            let vy = (self.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD;
            self.particles.push(Particle {
                x,
                y,
                vx,
                vy,
                life: 1.0,
                color,
            });
        }
    }
}
