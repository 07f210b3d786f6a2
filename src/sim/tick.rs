//! Fixed timestep simulation tick
//!
//! Drives the menu / playing / game-over state machine and, while a session
//! is running, the per-tick update order: ghost, pool, scoring, collisions,
//! difficulty, spawner.

use super::collision;
use super::difficulty;
use super::pool;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key currently held
    pub jump: bool,
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    let jump_pressed = input.jump && !state.jump_held;
    state.jump_held = input.jump;

    match state.phase {
        GamePhase::Menu => {
            // Needs a fresh press so a key still held from the restart
            // doesn't skip straight past the menu
            if jump_pressed {
                state.start_session(&mut events);
            }
        }
        GamePhase::Playing | GamePhase::GameOver => advance_session(state, input, &mut events),
    }

    events
}

fn advance_session(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if state.player.advance(input.jump) {
        events.push(GameEvent::Jumped);
    }

    // World only moves while the ghost is alive
    if state.player.alive {
        let speed = state.run.scroll_speed;
        pool::scroll(&mut state.pipes, &mut state.ground, speed);

        let passed = collision::update_scoring(&mut state.pipes, GHOST_START_X);
        for _ in 0..passed {
            state.run.score += 1;
            events.push(GameEvent::Scored {
                score: state.run.score,
            });
            state.record_high_score(events);
        }

        pool::compact(&mut state.pipes, &mut state.ground);
        pool::replenish_ground(&mut state.ground);
    }

    let contacts = collision::detect(&state.player.rect(), &state.pipes, &state.ground);
    state.ground_contact = contacts.ground;

    if contacts.any() {
        if !state.hit_sound_played {
            state.hit_sound_played = true;
            events.push(GameEvent::Hit);
        }

        if state.player.alive {
            state.player.alive = false;
            state.phase = GamePhase::GameOver;
            log::info!(
                "Game over at score {} ({})",
                state.run.score,
                if contacts.ground { "ground" } else { "pipe" }
            );
            events.push(GameEvent::MusicStopped);
            state.record_high_score(events);
        }

        // Only a landed ghost can restart
        if contacts.ground && input.jump {
            state.reset_session(events);
            return;
        }
    }

    if difficulty::ramp(&mut state.run) {
        events.push(GameEvent::LevelUp {
            speed: state.run.scroll_speed,
        });
    }

    if let Some(pair) = state
        .spawner
        .tick(state.run.scroll_speed, state.player.alive)
    {
        state.push_pair(pair);
    }
}
