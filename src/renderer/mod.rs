//! Presentation layer
//!
//! `build_frame` turns a `GameState` into a flat list of draw commands in
//! world coordinates; a backend (see `terminal`) turns those into output.

pub mod terminal;

use glam::IVec2;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, PipeKind, Player};

pub use terminal::TerminalRenderer;

/// Full-screen overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Title / "press jump" card on the menu
    Start,
    /// Shown once the dead ghost lies on the ground
    GameOver,
}

/// One thing to draw, back to front
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Background,
    Ground { pos: IVec2 },
    Pipe { kind: PipeKind, pos: IVec2 },
    /// `pose` in 0..GHOST_POSES, `rotation` in degrees (cosmetic)
    Ghost { pos: IVec2, pose: u32, rotation: f32 },
    Score(u32),
    HighScore(u32),
    Overlay(Overlay),
}

/// Everything drawn in one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn overlay(&self) -> Option<Overlay> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Overlay(o) => Some(*o),
            _ => None,
        })
    }
}

/// Build the draw list for the current state
pub fn build_frame(state: &GameState) -> Frame {
    let mut commands = Vec::with_capacity(state.pipes.len() + state.ground.len() + 6);
    commands.push(DrawCommand::Background);

    match state.phase {
        GamePhase::Menu => {
            // Static scene: one ground tile and the resting ghost
            commands.push(DrawCommand::Ground {
                pos: IVec2::new(0, GROUND_Y),
            });
            commands.push(DrawCommand::Ghost {
                pos: Player::default().rect().min,
                pose: 0,
                rotation: 0.0,
            });
            commands.push(DrawCommand::Overlay(Overlay::Start));
        }
        GamePhase::Playing | GamePhase::GameOver => {
            commands.extend(state.pipes.iter().map(|p| DrawCommand::Pipe {
                kind: p.kind,
                pos: p.pos,
            }));
            commands.extend(
                state
                    .ground
                    .iter()
                    .map(|g| DrawCommand::Ground { pos: g.pos }),
            );
            commands.push(DrawCommand::Ghost {
                pos: state.player.rect().min,
                pose: state.player.pose(),
                rotation: state.player.rotation_degrees(),
            });
            commands.push(DrawCommand::Score(state.run.score));
            if state.phase == GamePhase::GameOver && state.ground_contact {
                commands.push(DrawCommand::Overlay(Overlay::GameOver));
            }
        }
    }

    commands.push(DrawCommand::HighScore(state.high_score));
    Frame { commands }
}
