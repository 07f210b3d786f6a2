//! Flappy Ghost entry point
//!
//! Loads settings, sets up logging, takes over the terminal and runs the game
//! loop until the player quits.

use std::fs::File;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use flappy_ghost::audio::{AudioManager, AudioSink, LogSink, SynthSink};
use flappy_ghost::platform::{FixedRateLimiter, TerminalGuard, TerminalInput, TerminalScreen};
use flappy_ghost::{App, AppError, HighScoreStore, Settings};

/// Log to a file; the terminal is taken by the game
fn init_logging(path: &Path) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("Cannot open log file {}: {}; logging disabled", path.display(), e);
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<(), AppError> {
    let config_path = Settings::config_path();
    let (settings, problem) = Settings::load(&config_path);
    init_logging(&settings.log_path);
    if let Some(e) = problem {
        log::warn!("{}; using default settings", e);
    }
    log::info!(
        "Flappy Ghost starting (config {}, {} fps)",
        config_path.display(),
        settings.target_fps
    );

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Seed: {}", seed);

    let store = HighScoreStore::load(&settings.high_score_path);
    let sink: Box<dyn AudioSink> = match SynthSink::open() {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            log::warn!("{}; playing silently", e);
            Box::new(LogSink)
        }
    };
    let audio = AudioManager::from_settings(&settings, sink);

    let guard = TerminalGuard::enter()?;
    let mut app = App::new(
        seed,
        store,
        audio,
        TerminalInput::new(settings.hold_window_frames, guard.release_events()),
        TerminalScreen::new(io::BufWriter::new(io::stdout()))?,
        FixedRateLimiter::new(settings.target_fps),
    );
    let result = app.run();
    drop(guard);

    if let Err(e) = &result {
        log::error!("{}", e);
    }
    result
}
