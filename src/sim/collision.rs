//! Collision detection and pass-through scoring
//!
//! Both run after motion each tick. Scoring looks only at the bottom pipe of
//! each pair and never depends on whether the ghost touched anything.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::{Ground, Pipe, PipeKind};

/// Axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(min: IVec2, size: IVec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner (exclusive)
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    /// Strict overlap; rectangles sharing only an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

/// What the ghost is touching this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub pipe: bool,
    pub ground: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.pipe || self.ground
    }
}

/// Test the ghost box against every live pipe and ground tile
pub fn detect(ghost: &Rect, pipes: &[Pipe], ground: &[Ground]) -> Contacts {
    Contacts {
        pipe: pipes.iter().any(|p| p.live && ghost.intersects(&p.rect())),
        ground: ground.iter().any(|g| g.live && ghost.intersects(&g.rect())),
    }
}

/// Advance the pass latch of every bottom pipe against the anchor
///
/// Returns how many pairs became passed this tick.
pub fn update_scoring(pipes: &mut [Pipe], anchor_x: i32) -> u32 {
    let mut passed = 0;
    for pipe in pipes.iter_mut().filter(|p| p.kind == PipeKind::Bottom) {
        let rect = pipe.rect();
        if pipe.latch.advance(anchor_x, rect.min.x, rect.max().x) {
            passed += 1;
        }
    }
    passed
}
