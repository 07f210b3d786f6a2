//! Fixed-rate frame limiter

use std::thread;
use std::time::{Duration, Instant};

use super::FrameClock;

/// Caps the loop at a fixed rate by sleeping out the rest of each period
#[derive(Debug)]
pub struct FixedRateLimiter {
    period: Duration,
    last: Option<Instant>,
    ticks: u64,
}

impl FixedRateLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            last: None,
            ticks: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameClock for FixedRateLimiter {
    fn wait(&mut self) -> u64 {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.period {
                thread::sleep(self.period - elapsed);
            }
        }
        self.last = Some(Instant::now());
        self.ticks += 1;
        self.ticks
    }
}
