//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies; side effects leave as `GameEvent`s

pub mod collision;
pub mod difficulty;
pub mod player;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Contacts, Rect};
pub use spawner::{PipePair, Spawner};
pub use state::{
    GameEvent, GamePhase, GameState, Ground, PassLatch, Pipe, PipeKind, Player, RunState,
};
pub use tick::{TickInput, tick};
