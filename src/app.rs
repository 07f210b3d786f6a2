//! Outer game loop
//!
//! One `step` is one tick: sample input, advance the simulation, act on its
//! events (audio cues, high-score writes), present the frame, then wait for
//! the next tick boundary. Nothing suspends in between.

use std::io;

use thiserror::Error;

use crate::audio::AudioManager;
use crate::highscores::HighScoreStore;
use crate::persistence::StoreError;
use crate::platform::{FrameClock, InputSource, Presenter};
use crate::renderer::build_frame;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Fatal loop errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("high score storage failed: {0}")]
    Store(#[from] StoreError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Whether the loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The running game and its collaborators
pub struct App<I, P, C> {
    state: GameState,
    store: HighScoreStore,
    audio: AudioManager,
    input: I,
    presenter: P,
    clock: C,
}

impl<I: InputSource, P: Presenter, C: FrameClock> App<I, P, C> {
    pub fn new(
        seed: u64,
        store: HighScoreStore,
        audio: AudioManager,
        input: I,
        presenter: P,
        clock: C,
    ) -> Self {
        Self {
            state: GameState::new(seed, store.best()),
            store,
            audio,
            input,
            presenter,
            clock,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &HighScoreStore {
        &self.store
    }

    /// Run one tick
    pub fn step(&mut self) -> Result<Flow, AppError> {
        let input = self.input.poll()?;
        if input.quit {
            log::info!("Quit requested");
            self.audio.stop_music();
            return Ok(Flow::Quit);
        }

        let events = tick(&mut self.state, &TickInput { jump: input.jump });
        for event in &events {
            self.audio.handle(event);
            // Written right away so a crash can't lose a record
            if let GameEvent::NewHighScore { score } = *event {
                self.store.record(score)?;
            }
        }

        let frame = build_frame(&self.state);
        self.presenter.present(&frame)?;
        self.clock.wait();
        Ok(Flow::Continue)
    }

    /// Tick until quit or a fatal error
    pub fn run(&mut self) -> Result<(), AppError> {
        while self.step()? == Flow::Continue {}
        log::info!(
            "Stopped after {} ticks, high score {}",
            self.state.time_ticks,
            self.store.best()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::LogSink;
    use crate::persistence::testutil::scratch_path;
    use crate::platform::InputSnapshot;
    use crate::renderer::Frame;
    use crate::sim::{GamePhase, Pipe, PipeKind};
    use glam::IVec2;
    use std::collections::VecDeque;
    use std::fs;

    /// Plays back a fixed input script, then quits
    struct Script(VecDeque<InputSnapshot>);

    impl Script {
        fn new(jumps: &[bool]) -> Self {
            Self(
                jumps
                    .iter()
                    .map(|&jump| InputSnapshot { jump, quit: false })
                    .collect(),
            )
        }
    }

    impl InputSource for Script {
        fn poll(&mut self) -> io::Result<InputSnapshot> {
            Ok(self.0.pop_front().unwrap_or(InputSnapshot {
                jump: false,
                quit: true,
            }))
        }
    }

    #[derive(Default)]
    struct Frames(Vec<Frame>);

    impl Presenter for Frames {
        fn present(&mut self, frame: &Frame) -> io::Result<()> {
            self.0.push(frame.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct NoWait(u64);

    impl FrameClock for NoWait {
        fn wait(&mut self) -> u64 {
            self.0 += 1;
            self.0
        }
    }

    fn app(script: Script, store: HighScoreStore) -> App<Script, Frames, NoWait> {
        App::new(
            3,
            store,
            AudioManager::new(Box::new(LogSink)),
            script,
            Frames::default(),
            NoWait::default(),
        )
    }

    #[test]
    fn test_one_frame_per_tick_until_quit() {
        let store = HighScoreStore::load(scratch_path("highscore.txt"));
        let mut app = app(Script::new(&[false, true, false, false]), store);
        app.run().unwrap();
        assert_eq!(app.presenter.0.len(), 4);
        assert_eq!(app.clock.0, 4);
        assert_eq!(app.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_starts_with_stored_high_score() {
        let path = scratch_path("highscore.txt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "23").unwrap();
        let app = app(Script::new(&[]), HighScoreStore::load(&path));
        assert_eq!(app.state().high_score, 23);
    }

    #[test]
    fn test_new_record_is_written_immediately() {
        let path = scratch_path("highscore.txt");
        let mut app = app(Script::new(&[true, false]), HighScoreStore::load(&path));
        assert_eq!(app.step().unwrap(), Flow::Continue);

        // A pair that the anchor clears on the next tick
        app.state
            .pipes
            .push(Pipe::new(PipeKind::Bottom, IVec2::new(-40, 2_000)));
        app.state.spawner.timer = 10_000;

        assert_eq!(app.step().unwrap(), Flow::Continue);
        assert_eq!(app.state().run.score, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1");
        assert_eq!(app.store().best(), 1);
    }

    #[test]
    fn test_storage_failure_is_fatal() {
        // The store path is a non-empty directory, so the rename fails
        let path = scratch_path("highscore.txt");
        fs::create_dir_all(path.join("blocker")).unwrap();
        let mut app = app(Script::new(&[true, false]), HighScoreStore::load(&path));
        app.step().unwrap();

        app.state
            .pipes
            .push(Pipe::new(PipeKind::Bottom, IVec2::new(-40, 2_000)));

        assert!(matches!(app.step(), Err(AppError::Store(_))));
    }
}
