//! Flappy Ghost - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: Draw-command frames and the terminal rasterizer
//! - `platform`: Input, presentation and frame-clock collaborators
//! - `audio`: Sound cues and volume mixing
//! - `highscores` / `persistence`: The persisted high score
//! - `settings`: Configuration file
//! - `app`: The outer loop tying everything together

pub mod app;
pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, AppError, Flow};
pub use highscores::HighScoreStore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;

    /// World dimensions
    pub const WIN_WIDTH: i32 = 551;
    pub const WIN_HEIGHT: i32 = 720;

    /// Ghost sprite box (rotation is cosmetic, the box never changes)
    pub const GHOST_WIDTH: i32 = 40;
    pub const GHOST_HEIGHT: i32 = 40;
    /// Center of the ghost at session start; x doubles as the scoring anchor
    pub const GHOST_START_X: i32 = 100;
    pub const GHOST_START_Y: i32 = 250;
    /// Number of distinct ghost poses
    pub const GHOST_POSES: u32 = 3;
    /// Ticks spent on each pose
    pub const TICKS_PER_POSE: u32 = 10;
    /// Animation counter wraps here
    pub const ANIMATION_CYCLE: u32 = GHOST_POSES * TICKS_PER_POSE;

    /// Vertical kinematics (units per tick)
    pub const GRAVITY: f32 = 0.5;
    pub const MAX_DESCENT: f32 = 5.0;
    pub const JUMP_IMPULSE: f32 = -7.0;
    /// Vertical motion freezes once the ghost's top edge reaches this line
    pub const GROUND_CONTACT_Y: i32 = 500;
    /// Degrees of sprite tilt per unit of velocity
    pub const ROTATION_PER_VELOCITY: f32 = -7.0;

    /// Ground tiles
    pub const GROUND_Y: i32 = 505;
    pub const GROUND_WIDTH: i32 = WIN_WIDTH;
    pub const GROUND_HEIGHT: i32 = WIN_HEIGHT - GROUND_Y;
    pub const MIN_GROUND_SEGMENTS: usize = 3;

    /// Pipes (top and bottom share one sprite size)
    pub const PIPE_WIDTH: i32 = 78;
    pub const PIPE_HEIGHT: i32 = 800;
    pub const PIPE_SPAWN_X: i32 = 550;
    pub const PIPE_TOP_Y_MIN: i32 = -600;
    pub const PIPE_TOP_Y_MAX: i32 = -480;
    pub const PIPE_GAP_MIN: i32 = 90;
    pub const PIPE_GAP_MAX: i32 = 130;
    pub const SPAWN_TIMER_MIN: i32 = 180;
    pub const SPAWN_TIMER_MAX: i32 = 250;
    /// Pipes are dropped once they are a full screen width past the left edge
    pub const PIPE_DESPAWN_X: i32 = -WIN_WIDTH;

    /// Difficulty ramp
    pub const BASE_SCROLL_SPEED: i32 = 2;
    pub const BASE_SPEED_THRESHOLD: u32 = 10;
    pub const SPEED_THRESHOLD_STEP: u32 = 10;
    /// No further speed-ups once the score is past this
    pub const SPEED_RAMP_CEILING: u32 = 30;
}
