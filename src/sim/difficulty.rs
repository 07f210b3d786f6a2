//! Score-driven speed ramp

use super::state::RunState;
use crate::consts::*;

/// Step the scroll speed up once the score reaches the current threshold
///
/// The ramp stops past `SPEED_RAMP_CEILING`; pipes keep coming at whatever
/// speed was reached. Returns true when the speed changed.
pub fn ramp(run: &mut RunState) -> bool {
    if run.score >= run.speed_threshold && run.score <= SPEED_RAMP_CEILING {
        run.scroll_speed += 1;
        run.speed_threshold += SPEED_THRESHOLD_STEP;
        log::debug!(
            "Level up: speed {} next at {}",
            run.scroll_speed,
            run.speed_threshold
        );
        return true;
    }
    false
}
