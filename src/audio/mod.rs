//! Audio cues and mixing
//!
//! The simulation only says *what* happened; this module decides how loud it
//! is and hands it to an `AudioSink`. `synth` renders and plays the actual
//! sounds.

pub mod synth;

pub use synth::{AudioError, SoundBank, SynthSink};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ghost flaps
    Jump,
    /// First collision of a run
    Hit,
    /// Scroll speed went up
    LevelUp,
}

impl SoundEffect {
    /// Mix level of the cue before user volume is applied
    pub fn base_gain(&self) -> f32 {
        match self {
            SoundEffect::Jump => 0.025,
            SoundEffect::Hit => 0.3,
            SoundEffect::LevelUp => 0.3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Hit => "hit",
            SoundEffect::LevelUp => "levelup",
        }
    }
}

/// Mix level of the background loop before user volume is applied
pub const MUSIC_BASE_GAIN: f32 = 0.1;

/// Where sounds actually go
pub trait AudioSink {
    /// Fire-and-forget one-shot
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Start the looping background track
    fn start_music(&mut self, volume: f32);
    fn stop_music(&mut self);
}

/// Sink that only logs cues, for machines without an output device
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {} @ {:.3}", effect.as_str(), volume);
    }

    fn start_music(&mut self, volume: f32) {
        log::debug!("music start @ {:.3}", volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music stop");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
            music_playing: false,
        }
    }

    pub fn from_settings(settings: &Settings, sink: Box<dyn AudioSink>) -> Self {
        let mut audio = Self::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume) * effect.base_gain();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    pub fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        self.music_playing = true;
        let vol = self.effective_volume(self.music_volume) * MUSIC_BASE_GAIN;
        self.sink.start_music(vol);
    }

    pub fn stop_music(&mut self) {
        if !self.music_playing {
            return;
        }
        self.music_playing = false;
        self.sink.stop_music();
    }

    /// Route a simulation event to the matching cue
    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Jumped => self.play(SoundEffect::Jump),
            GameEvent::Hit => self.play(SoundEffect::Hit),
            GameEvent::LevelUp { .. } => self.play(SoundEffect::LevelUp),
            GameEvent::MusicStarted => self.start_music(),
            GameEvent::MusicStopped => self.stop_music(),
            _ => {}
        }
    }
}
