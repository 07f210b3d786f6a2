//! Scrolling entity pool
//!
//! Pipes and ground tiles are plain records. Scrolling only clears their
//! `live` flag; removal happens in one compaction pass afterwards.

use super::state::{Ground, Pipe};
use crate::consts::*;

/// Move every pipe and ground tile left by the scroll speed
pub fn scroll(pipes: &mut [Pipe], ground: &mut [Ground], scroll_speed: i32) {
    for pipe in pipes.iter_mut() {
        pipe.pos.x -= scroll_speed;
        if pipe.pos.x <= PIPE_DESPAWN_X {
            pipe.live = false;
        }
    }

    for tile in ground.iter_mut() {
        tile.pos.x -= scroll_speed;
        if tile.right() <= 0 {
            tile.live = false;
        }
    }
}

/// Drop everything that scrolled off
pub fn compact(pipes: &mut Vec<Pipe>, ground: &mut Vec<Ground>) {
    pipes.retain(|p| p.live);
    ground.retain(|g| g.live);
}

/// Append ground tiles at the trailing edge until the minimum is met
///
/// Returns the number of tiles added.
pub fn replenish_ground(ground: &mut Vec<Ground>) -> usize {
    let mut added = 0;
    while ground.len() < MIN_GROUND_SEGMENTS {
        let x = ground.iter().map(Ground::right).max().unwrap_or(0);
        ground.push(Ground::new(x));
        added += 1;
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PipeKind;
    use glam::IVec2;

    #[test]
    fn test_scroll_moves_everything() {
        let mut pipes = vec![Pipe::new(PipeKind::Top, IVec2::new(300, -500))];
        let mut ground = vec![Ground::new(0), Ground::new(GROUND_WIDTH)];
        scroll(&mut pipes, &mut ground, 3);
        assert_eq!(pipes[0].pos.x, 297);
        assert_eq!(ground[0].pos.x, -3);
        assert_eq!(ground[1].pos.x, GROUND_WIDTH - 3);
        assert!(pipes[0].live && ground.iter().all(|g| g.live));
    }

    #[test]
    fn test_pipe_despawns_a_screen_past_the_edge() {
        let mut pipes = vec![
            Pipe::new(PipeKind::Top, IVec2::new(PIPE_DESPAWN_X + 3, -500)),
            Pipe::new(PipeKind::Bottom, IVec2::new(PIPE_DESPAWN_X + 2, 400)),
        ];
        let mut ground = Vec::new();
        scroll(&mut pipes, &mut ground, 2);
        assert!(pipes[0].live);
        assert!(!pipes[1].live);

        compact(&mut pipes, &mut ground);
        assert_eq!(pipes.len(), 1);
        assert_eq!(pipes[0].kind, PipeKind::Top);
    }

    #[test]
    fn test_ground_despawns_when_trailing_edge_passes_zero() {
        let mut ground = vec![Ground::new(-GROUND_WIDTH + 2), Ground::new(2)];
        scroll(&mut [], &mut ground, 2);
        assert!(!ground[0].live);
        assert!(ground[1].live);
    }

    #[test]
    fn test_replenish_tiles_seamlessly() {
        let mut ground = vec![Ground::new(-40)];
        let added = replenish_ground(&mut ground);
        assert_eq!(added, MIN_GROUND_SEGMENTS - 1);
        for pair in ground.windows(2) {
            assert_eq!(pair[0].right(), pair[1].pos.x);
        }
    }

    #[test]
    fn test_replenish_from_empty() {
        let mut ground = Vec::new();
        replenish_ground(&mut ground);
        assert_eq!(ground.len(), MIN_GROUND_SEGMENTS);
        assert_eq!(ground[0].pos.x, 0);
    }

    #[test]
    fn test_ground_always_covers_the_viewport() {
        let mut ground = Vec::new();
        replenish_ground(&mut ground);
        for _ in 0..2_000 {
            scroll(&mut [], &mut ground, 5);
            compact(&mut Vec::new(), &mut ground);
            replenish_ground(&mut ground);

            let left = ground.iter().map(|g| g.pos.x).min().unwrap();
            let right = ground.iter().map(Ground::right).max().unwrap();
            assert!(left <= 0);
            assert!(right >= WIN_WIDTH);
        }
    }
}
