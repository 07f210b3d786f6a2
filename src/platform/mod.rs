//! Platform abstraction layer
//!
//! The game loop only talks to these traits:
//! - `InputSource`: held-key snapshot, sampled once per tick
//! - `Presenter`: shows one frame per tick
//! - `FrameClock`: blocks until the next tick boundary
//!
//! `terminal` implements input and presentation on top of crossterm, `clock`
//! provides the fixed-rate limiter.

pub mod clock;
pub mod terminal;

use std::io;

use crate::renderer::Frame;

pub use clock::FixedRateLimiter;
pub use terminal::{KeyTracker, TerminalGuard, TerminalInput, TerminalScreen};

/// Keys that matter to the game, as held at sampling time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Jump / start / restart
    pub jump: bool,
    /// Leave the game
    pub quit: bool,
}

/// Polled input
pub trait InputSource {
    fn poll(&mut self) -> io::Result<InputSnapshot>;
}

/// Frame presentation sink
pub trait Presenter {
    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Frame-rate limiter
pub trait FrameClock {
    /// Sleep until the next tick boundary; returns ticks elapsed so far
    fn wait(&mut self) -> u64;
}
