//! Cookie Dash - a cozy endless-runner starring a Cavalier King Charles Spaniel
//!
//! Core modules:
//! - `sim`: frame-tied simulation (physics, spawning, collisions, session state)
//! - `renderer`: WebGPU rendering pipeline
//! - `theme`: distance-driven palettes and narrator message pools
//! - `flavor`: end-of-run narrator strategies (static pool / remote service)
//! - `storage`: durable high-score and lifetime-treat counters

pub mod flavor;
pub mod renderer;
pub mod sim;
pub mod storage;
pub mod theme;

pub use theme::Theme;

/// Game configuration constants
///
/// The playfield is 800x400 logical pixels with y growing downward, matching
/// the canvas the game is rendered into. Rates are per simulation tick (one
/// tick per animation frame).
pub mod consts {
    /// Logical playfield size
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Height of the ground band at the bottom of the field
    pub const GROUND_HEIGHT: f32 = 100.0;
    /// The ground line the player runs on
    pub const GROUND_Y: f32 = FIELD_HEIGHT - GROUND_HEIGHT;

    /// Vertical acceleration applied every tick
    pub const GRAVITY: f32 = 0.6;
    /// Upward impulse applied on a jump (y grows downward)
    pub const JUMP_STRENGTH: f32 = -12.0;

    /// Scroll speed at the start of a run
    pub const GAME_SPEED_START: f32 = 5.0;
    /// Scroll speed cap
    pub const MAX_SPEED: f32 = 12.0;
    /// Speed gained per tick until the cap
    pub const ACCELERATION: f32 = 0.001;

    /// Player sprite placement and size (x never changes)
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Spawn interval bounds in ticks, before speed scaling
    pub const SPAWN_RATE_MIN: f32 = 60.0;
    pub const SPAWN_RATE_MAX: f32 = 120.0;

    /// Score gained per tick survived
    pub const SCORE_PER_TICK: u64 = 1;
    /// Score bonus for a collected treat
    pub const TREAT_SCORE_BONUS: u64 = 50;

    /// Distance travelled before the scenery rolls to the next theme
    pub const THEME_SPAN: f32 = 2000.0;

    /// Particle burst on treat collection
    pub const PARTICLES_PER_TREAT: usize = 5;
    /// Life removed from each particle per tick (life starts at 1.0)
    pub const PARTICLE_DECAY: f32 = 0.05;
    /// Particle velocity components are uniform in +/- half this span
    pub const PARTICLE_SPREAD: f32 = 10.0;

    /// DOM score/treat readouts refresh every this many frames
    pub const HUD_SYNC_FRAMES: u64 = 10;
}
