//! Ghost kinematics and animation

use super::state::Player;
use crate::consts::*;

impl Player {
    /// Advance the ghost by one tick
    ///
    /// Returns true if a jump was triggered this tick. Gravity keeps acting
    /// after death so a dead ghost drops to the ground.
    pub fn advance(&mut self, jump_held: bool) -> bool {
        // Animation freezes on the last pose once dead
        if self.alive {
            self.frame += 1;
        }
        if self.frame >= ANIMATION_CYCLE {
            self.frame = 0;
        }

        self.vel = (self.vel + GRAVITY).min(MAX_DESCENT);

        // Visual guard only; the ground collision is what actually stops a run
        if self.y < GROUND_CONTACT_Y {
            self.y += self.vel.trunc() as i32;
        }

        // Apex: velocity lands exactly on zero because every step is 0.5
        if self.vel == 0.0 {
            self.jump_latch = false;
        }

        if jump_held && !self.jump_latch && self.y > 0 && self.alive {
            self.vel = JUMP_IMPULSE;
            self.jump_latch = true;
            return true;
        }

        false
    }
}
