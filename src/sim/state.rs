//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here, so a `GameState` plus the
//! input sequence fully determines a run.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::pool;
use super::spawner::{PipePair, Spawner};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the jump key
    Menu,
    /// Active run
    Playing,
    /// Ghost is dead; world frozen, waiting for the ghost to land and restart
    GameOver,
}

/// Things that happened during a tick that the outside world cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run began
    SessionStarted,
    /// Background loop should start
    MusicStarted,
    /// Background loop should stop
    MusicStopped,
    /// Ghost flapped
    Jumped,
    /// Ghost cleared a pipe pair
    Scored { score: u32 },
    /// Scroll speed stepped up
    LevelUp { speed: i32 },
    /// First collision of the session
    Hit,
    /// Score beat the stored record; persist it now
    NewHighScore { score: u32 },
    /// Restart confirmed, back to the menu
    SessionReset,
}

/// The player's ghost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top edge of the sprite box
    pub y: i32,
    /// Vertical velocity (positive = down)
    pub vel: f32,
    pub alive: bool,
    /// Animation counter, cycles through 0..ANIMATION_CYCLE
    pub frame: u32,
    /// Set on jump, cleared at the apex
    pub jump_latch: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            y: GHOST_START_Y - GHOST_HEIGHT / 2,
            vel: 0.0,
            alive: true,
            frame: 0,
            jump_latch: false,
        }
    }
}

impl Player {
    /// Left edge of the sprite box (the ghost never moves horizontally)
    pub const X: i32 = GHOST_START_X - GHOST_WIDTH / 2;

    /// Collision box
    pub fn rect(&self) -> Rect {
        Rect::new(
            IVec2::new(Self::X, self.y),
            IVec2::new(GHOST_WIDTH, GHOST_HEIGHT),
        )
    }

    /// Sprite pose index (0..GHOST_POSES)
    pub fn pose(&self) -> u32 {
        self.frame / TICKS_PER_POSE
    }

    /// Sprite tilt in degrees, counter-clockwise positive
    pub fn rotation_degrees(&self) -> f32 {
        self.vel * ROTATION_PER_VELOCITY
    }
}

/// Which half of a pipe pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeKind {
    Top,
    Bottom,
}

/// One-way pass-through latch carried by the bottom pipe of each pair
///
/// `entered` flips when the anchor crosses the left edge, `exited` when it
/// crosses the right edge, and `passed` once both have happened. None of them
/// ever flips back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassLatch {
    pub entered: bool,
    pub exited: bool,
    pub passed: bool,
}

impl PassLatch {
    /// Feed the anchor position for this tick; returns true on the tick the
    /// pair becomes passed
    pub fn advance(&mut self, anchor_x: i32, left: i32, right: i32) -> bool {
        if self.passed {
            return false;
        }
        if anchor_x > left {
            self.entered = true;
        }
        if anchor_x > right {
            self.exited = true;
        }
        if self.entered && self.exited {
            self.passed = true;
            return true;
        }
        false
    }
}

/// A single pipe entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub kind: PipeKind,
    /// Top-left corner
    pub pos: IVec2,
    /// Only meaningful on `PipeKind::Bottom`
    pub latch: PassLatch,
    /// Cleared when the pipe scrolls off; dropped at the next compaction
    pub live: bool,
}

impl Pipe {
    pub fn new(kind: PipeKind, pos: IVec2) -> Self {
        Self {
            kind,
            pos,
            latch: PassLatch::default(),
            live: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, IVec2::new(PIPE_WIDTH, PIPE_HEIGHT))
    }
}

/// A ground tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ground {
    pub pos: IVec2,
    pub live: bool,
}

impl Ground {
    pub fn new(x: i32) -> Self {
        Self {
            pos: IVec2::new(x, GROUND_Y),
            live: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, IVec2::new(GROUND_WIDTH, GROUND_HEIGHT))
    }

    /// Trailing (right) edge
    pub fn right(&self) -> i32 {
        self.pos.x + GROUND_WIDTH
    }
}

/// Per-session run state; reset on every new session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u32,
    pub scroll_speed: i32,
    pub speed_threshold: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            score: 0,
            scroll_speed: BASE_SCROLL_SPEED,
            speed_threshold: BASE_SPEED_THRESHOLD,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub run: RunState,
    /// Best score seen so far, including previous processes
    pub high_score: u32,
    pub player: Player,
    /// Live pipes, in spawn order
    pub pipes: Vec<Pipe>,
    /// Live ground tiles, left to right
    pub ground: Vec<Ground>,
    pub spawner: Spawner,
    /// Collision cue already fired this session
    pub hit_sound_played: bool,
    /// Ghost is touching the ground (drives the game-over overlay)
    pub ground_contact: bool,
    /// Jump key state on the previous tick
    pub jump_held: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a state sitting on the menu; `seed` drives pipe placement
    pub fn new(seed: u64, high_score: u32) -> Self {
        let mut state = Self {
            phase: GamePhase::Menu,
            run: RunState::default(),
            high_score,
            player: Player::default(),
            pipes: Vec::new(),
            ground: Vec::new(),
            spawner: Spawner::new(seed),
            hit_sound_played: false,
            ground_contact: false,
            jump_held: false,
            time_ticks: 0,
        };
        state.reset_world();
        state
    }

    /// Fresh ghost, no pipes, ground tiled from the left edge
    fn reset_world(&mut self) {
        self.player = Player::default();
        self.pipes.clear();
        self.ground.clear();
        self.ground.push(Ground::new(0));
        pool::replenish_ground(&mut self.ground);
        self.spawner.reset();
        self.hit_sound_played = false;
        self.ground_contact = false;
    }

    /// Menu -> Playing
    pub fn start_session(&mut self, events: &mut Vec<GameEvent>) {
        self.reset_world();
        self.run = RunState::default();
        self.phase = GamePhase::Playing;
        log::info!("Session started (high score {})", self.high_score);
        events.push(GameEvent::SessionStarted);
        events.push(GameEvent::MusicStarted);
    }

    /// GameOver -> Menu
    pub fn reset_session(&mut self, events: &mut Vec<GameEvent>) {
        log::info!("Session reset after scoring {}", self.run.score);
        self.run = RunState::default();
        self.phase = GamePhase::Menu;
        events.push(GameEvent::SessionReset);
    }

    /// Add both halves of a freshly spawned pair
    pub fn push_pair(&mut self, pair: PipePair) {
        self.pipes.push(Pipe::new(PipeKind::Top, pair.top));
        self.pipes.push(Pipe::new(PipeKind::Bottom, pair.bottom));
    }

    /// Raise the record if the current score beats it
    pub fn record_high_score(&mut self, events: &mut Vec<GameEvent>) {
        if self.run.score > self.high_score {
            self.high_score = self.run.score;
            events.push(GameEvent::NewHighScore {
                score: self.high_score,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_sits_on_menu() {
        let state = GameState::new(7, 12);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.run, RunState::default());
        assert_eq!(state.high_score, 12);
        assert!(state.pipes.is_empty());
        assert_eq!(state.ground.len(), MIN_GROUND_SEGMENTS);
        assert_eq!(state.ground[0].pos.x, 0);
    }

    #[test]
    fn test_player_starts_centered_on_anchor() {
        let player = Player::default();
        let rect = player.rect();
        assert_eq!(rect.min.x + GHOST_WIDTH / 2, GHOST_START_X);
        assert_eq!(rect.min.y + GHOST_HEIGHT / 2, GHOST_START_Y);
        assert_eq!(player.pose(), 0);
    }

    #[test]
    fn test_pass_latch_needs_both_edges() {
        let mut latch = PassLatch::default();
        // Anchor left of the pipe
        assert!(!latch.advance(100, 150, 228));
        assert_eq!(latch, PassLatch::default());

        // Inside the pipe
        assert!(!latch.advance(100, 60, 138));
        assert!(latch.entered && !latch.exited && !latch.passed);

        // Past the right edge
        assert!(latch.advance(100, 10, 88));
        assert!(latch.passed);

        // Never again
        assert!(!latch.advance(100, -100, -22));
    }

    #[test]
    fn test_pass_latch_both_edges_in_one_tick() {
        let mut latch = PassLatch::default();
        assert!(latch.advance(100, 0, 78));
        assert!(latch.entered && latch.exited && latch.passed);
    }

    #[test]
    fn test_record_high_score_only_on_improvement() {
        let mut state = GameState::new(1, 5);
        let mut events = Vec::new();

        state.run.score = 5;
        state.record_high_score(&mut events);
        assert!(events.is_empty());

        state.run.score = 6;
        state.record_high_score(&mut events);
        assert_eq!(events, vec![GameEvent::NewHighScore { score: 6 }]);
        assert_eq!(state.high_score, 6);
    }

    #[test]
    fn test_push_pair_adds_top_then_bottom() {
        let mut state = GameState::new(1, 0);
        state.push_pair(PipePair {
            top: IVec2::new(PIPE_SPAWN_X, -500),
            bottom: IVec2::new(PIPE_SPAWN_X, 400),
        });
        assert_eq!(state.pipes.len(), 2);
        assert_eq!(state.pipes[0].kind, PipeKind::Top);
        assert_eq!(state.pipes[1].kind, PipeKind::Bottom);
        assert_eq!(state.pipes[1].pos, IVec2::new(PIPE_SPAWN_X, 400));
        assert!(state.pipes.iter().all(|p| p.live && p.latch == PassLatch::default()));
    }
}
